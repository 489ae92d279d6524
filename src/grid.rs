// vim: set ai et ts=4 sts=4:
use std::fmt;

pub trait HasGridLocation {
    fn get_row(&self) -> usize;
    fn get_col(&self) -> usize;
    fn fmt_location(&self) -> String {
        format!("(col={:-2}, row={:-2})", self.get_col(), self.get_row())
    }
}

#[derive(PartialEq, Eq, Hash, Copy, Clone, Debug)]
pub enum CellState {
    Filled,
    Empty,
}
impl CellState {
    pub fn toggled(self) -> CellState {
        match self {
            CellState::Filled => CellState::Empty,
            CellState::Empty  => CellState::Filled,
        }
    }
}
impl fmt::Display for CellState {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", match *self {
            CellState::Filled => "Filled",
            CellState::Empty  => "Empty",
        })
    }
}

// ------------------------------------------------

#[derive(PartialEq, Debug, Clone)]
pub struct ToggleChange {
    pub row: usize,
    pub col: usize,
    pub old: CellState,
    pub new: CellState,
}
impl ToggleChange {
    pub fn new(row: usize, col: usize, old: CellState, new: CellState) -> Self {
        Self { row, col, old, new }
    }
}
impl HasGridLocation for ToggleChange {
    fn get_row(&self) -> usize { self.row }
    fn get_col(&self) -> usize { self.col }
}
impl fmt::Display for ToggleChange {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Change: in cell {}, state was flipped from {} to {}",
            self.fmt_location(),
            self.old,
            self.new)
    }
}

// ------------------------------------------------

#[derive(PartialEq, Debug)]
pub enum ParseError {
    InvalidDimensionSpec(String), // dimension text is not exactly two positive integers
}
impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "ParseError: {}", match self {
            ParseError::InvalidDimensionSpec(input) =>
                format!("invalid dimension spec {:?}: expected \"rows,cols\" with two positive integers", input),
        })
    }
}

// ------------------------------------------------

#[derive(Debug, Clone)]
pub struct Square {
    row: usize,
    col: usize,
    state: CellState,
}
impl Square {
    pub fn new(x: usize, y: usize) -> Square {
        Square {
            row: y,
            col: x,
            state: CellState::Empty,
        }
    }

    pub fn get_row(&self) -> usize { self.row }
    pub fn get_col(&self) -> usize { self.col }
    pub fn get_state(&self) -> CellState { self.state }
    pub fn is_filled(&self) -> bool { self.state == CellState::Filled }

    pub fn set_state(&mut self, new_state: CellState) {
        self.state = new_state;
    }
    pub fn toggle(&mut self) -> ToggleChange {
        let change = ToggleChange::new(self.row, self.col, self.state, self.state.toggled());
        self.state = change.new;
        change
    }

    pub fn fmt_visual(&self) -> &str {
        match self.state {
            CellState::Filled => "\u{25A0}",
            CellState::Empty  => ".",
        }
    }
}
impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.fmt_visual())
    }
}
impl HasGridLocation for Square {
    fn get_row(&self) -> usize { self.row }
    fn get_col(&self) -> usize { self.col }
}

// ------------------------------------------------

#[derive(Clone)]
pub struct Grid {
    width: usize,
    height: usize,
    squares: Vec<Vec<Square>>,
}
impl Grid {
    pub fn new(width: usize, height: usize)
        -> Self
    {
        Grid {
            width,
            height,
            squares: (0..height).map(|y| (0..width).map(|x| Square::new(x, y))
                                                   .collect::<Vec<_>>())
                                .collect(),
        }
    }

    /// Builds an all-empty grid from a "rows,cols" dimension spec. Anything
    /// other than exactly two positive integers is rejected without side
    /// effects, so a caller holding an earlier grid keeps it untouched.
    pub fn from_dimension_spec(spec: &str) -> Result<Grid, ParseError> {
        let parts: Vec<&str> = spec.split(',').collect();
        if parts.len() != 2 {
            return Err(ParseError::InvalidDimensionSpec(spec.to_string()));
        }
        let mut dims = [0usize; 2];
        for (i, part) in parts.iter().enumerate() {
            match part.trim().parse::<usize>() {
                Ok(n) if n > 0 => { dims[i] = n; }
                _ => { return Err(ParseError::InvalidDimensionSpec(spec.to_string())); }
            }
        }
        Ok(Grid::new(dims[1], dims[0])) // spec order is rows,cols
    }

    pub fn width(&self) -> usize { self.width }
    pub fn height(&self) -> usize { self.height }
    pub fn get_square(&self, x: usize, y: usize) -> &Square {
        &self.squares[y][x]
    }
    pub fn get_square_mut(&mut self, x: usize, y: usize) -> &mut Square {
        &mut self.squares[y][x]
    }

    pub fn toggle(&mut self, x: usize, y: usize) -> ToggleChange {
        self.get_square_mut(x, y).toggle()
    }
    pub fn fill(&mut self, x: usize, y: usize) {
        self.get_square_mut(x, y).set_state(CellState::Filled);
    }

    /// Coordinates of all filled squares as (row, col), in scan order.
    pub fn filled_cells(&self) -> Vec<(usize, usize)> {
        self.squares.iter()
                    .flatten()
                    .filter(|sq| sq.is_filled())
                    .map(|sq| (sq.get_row(), sq.get_col()))
                    .collect()
    }
    pub fn num_filled(&self) -> usize {
        self.squares.iter().flatten().filter(|sq| sq.is_filled()).count()
    }
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Grid(w={}, h={})", self.width(), self.height())
    }
}

// ------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dimension_spec_builds_an_all_empty_grid() {
        let grid = Grid::from_dimension_spec("3,4").unwrap();
        assert_eq!(grid.height(), 3);
        assert_eq!(grid.width(), 4);
        assert_eq!(grid.num_filled(), 0);
    }

    #[test]
    fn dimension_spec_tolerates_whitespace() {
        let grid = Grid::from_dimension_spec(" 2 , 5 ").unwrap();
        assert_eq!(grid.height(), 2);
        assert_eq!(grid.width(), 5);
    }

    #[test]
    fn dimension_spec_with_one_field_is_rejected() {
        match Grid::from_dimension_spec("3") {
            Err(ParseError::InvalidDimensionSpec(input)) => assert_eq!(input, "3"),
            other => panic!("expected InvalidDimensionSpec, got {:?}", other),
        }
    }

    #[test]
    fn malformed_dimension_specs_are_rejected() {
        for spec in &["", "a,b", "3,", ",4", "0,5", "5,0", "1,2,3", "-1,4"] {
            assert!(Grid::from_dimension_spec(spec).is_err(), "spec {:?} should be invalid", spec);
        }
    }

    #[test]
    fn rejected_spec_leaves_an_existing_grid_untouched() {
        let mut grid = Grid::from_dimension_spec("2,2").unwrap();
        grid.toggle(0, 0);
        assert!(Grid::from_dimension_spec("3").is_err());
        assert_eq!(grid.num_filled(), 1);
        assert!(grid.get_square(0, 0).is_filled());
    }

    #[test]
    fn toggle_flips_and_reports_the_change() {
        let mut grid = Grid::new(3, 2);
        let change = grid.toggle(1, 0);
        assert_eq!(change, ToggleChange::new(0, 1, CellState::Empty, CellState::Filled));
        assert!(grid.get_square(1, 0).is_filled());
    }

    #[test]
    fn double_toggle_restores_the_prior_state() {
        let mut grid = Grid::new(3, 2);
        grid.toggle(2, 1);
        grid.toggle(2, 1);
        assert_eq!(grid.num_filled(), 0);
        assert_eq!(grid.get_square(2, 1).get_state(), CellState::Empty);
    }

    #[test]
    fn filled_cells_come_back_in_scan_order() {
        let mut grid = Grid::new(3, 2);
        grid.fill(2, 0);
        grid.fill(0, 1);
        grid.fill(1, 0);
        assert_eq!(grid.filled_cells(), vec![(0, 1), (0, 2), (1, 0)]);
    }

    #[test]
    fn degenerate_grid_is_allowed() {
        let grid = Grid::new(0, 0);
        assert_eq!(grid.width(), 0);
        assert_eq!(grid.height(), 0);
        assert!(grid.filled_cells().is_empty());
    }
}
