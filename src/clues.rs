// vim: set ai et ts=4 sw=4 sts=4:
use yaml_rust::{Yaml, YamlEmitter};
use yaml_rust::yaml::{Array, Hash};

use super::grid::Grid;
use super::util::{Direction, Direction::*};

/// The derived clue lists of a grid: one run-length list per row and per
/// column, indexed respectively. A ClueSet has no lifecycle of its own; it
/// is recomputed from the grid whenever needed, never updated in place.
#[derive(PartialEq, Eq, Debug, Clone)]
pub struct ClueSet {
    pub rows: Vec<Vec<usize>>,
    pub cols: Vec<Vec<usize>>,
}

pub fn derive(grid: &Grid) -> ClueSet {
    ClueSet {
        rows: (0..grid.height()).map(|y| line_runs(grid, Horizontal, y)).collect(),
        cols: (0..grid.width()).map(|x| line_runs(grid, Vertical, x)).collect(),
    }
}

fn line_runs(grid: &Grid, direction: Direction, index: usize) -> Vec<usize> {
    let length = match direction {
        Horizontal => grid.width(),
        Vertical   => grid.height(),
    };
    let filled = |at: usize| {
        match direction {
            Horizontal => grid.get_square(at, index).is_filled(),
            Vertical   => grid.get_square(index, at).is_filled(),
        }
    };

    let mut runs = Vec::<usize>::new();
    let mut x: usize = 0;
    while x < length {
        // skip past empty squares
        while x < length && !filled(x) {
            x += 1;
        }
        if x >= length { break; }

        // measure the contiguous sequence of filled squares
        let run_start = x;
        while x < length && filled(x) {
            x += 1;
        }
        runs.push(x - run_start);
    }

    if runs.is_empty() {
        runs.push(0); // a line without filled squares clues as [0], not []
    }
    runs
}

impl ClueSet {
    /// Emits the clue document: a `rows:`/`cols:` mapping of space-joined
    /// run lengths, one entry per line, column runs listed top to bottom.
    pub fn to_yaml_string(&self) -> String {
        let mut doc = Hash::new();
        doc.insert(Yaml::String("rows".to_string()), Self::lines_to_yaml(&self.rows));
        doc.insert(Yaml::String("cols".to_string()), Self::lines_to_yaml(&self.cols));

        let mut out = String::new();
        let mut emitter = YamlEmitter::new(&mut out);
        emitter.dump(&Yaml::Hash(doc)).unwrap(); // emitting into a String does not fail
        out.push('\n');
        out
    }

    fn lines_to_yaml(lines: &[Vec<usize>]) -> Yaml {
        Yaml::Array(lines.iter()
                         .map(|runs| runs.iter()
                                         .map(|n| n.to_string())
                                         .collect::<Vec<_>>()
                                         .join(" "))
                         .map(Yaml::String)
                         .collect::<Array>())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_from(pattern: &[&str]) -> Grid {
        let height = pattern.len();
        let width = pattern.first().map(|row| row.len()).unwrap_or(0);
        let mut grid = Grid::new(width, height);
        for (y, row) in pattern.iter().enumerate() {
            for (x, ch) in row.chars().enumerate() {
                if ch == '#' {
                    grid.fill(x, y);
                }
            }
        }
        grid
    }

    #[test]
    fn derives_runs_per_row_and_column() {
        let clues = derive(&grid_from(&["##.",
                                        "..#"]));
        assert_eq!(clues.rows, vec![vec![2], vec![1]]);
        assert_eq!(clues.cols, vec![vec![1], vec![1], vec![1]]);
    }

    #[test]
    fn empty_lines_clue_as_zero() {
        let clues = derive(&grid_from(&["...",
                                        "...",
                                        "..."]));
        assert_eq!(clues.rows, vec![vec![0], vec![0], vec![0]]);
        assert_eq!(clues.cols, vec![vec![0], vec![0], vec![0]]);
    }

    #[test]
    fn multiple_runs_keep_encounter_order() {
        let clues = derive(&grid_from(&["#.##.###"]));
        assert_eq!(clues.rows, vec![vec![1, 2, 3]]);
    }

    #[test]
    fn derivation_is_pure() {
        let grid = grid_from(&["#.#",
                               ".##"]);
        assert_eq!(derive(&grid), derive(&grid));
    }

    #[test]
    fn runs_and_separating_gaps_fit_within_the_line() {
        let grid = grid_from(&["#.##.###",
                               "########",
                               "...#....",
                               "........"]);
        let clues = derive(&grid);
        let occupied = |runs: &Vec<usize>| runs.iter().sum::<usize>() + (runs.len() - 1);
        for runs in &clues.rows {
            assert!(occupied(runs) <= grid.width());
        }
        for runs in &clues.cols {
            assert!(occupied(runs) <= grid.height());
        }
        // first row is maximally packed: 1+2+3 runs plus two gaps fill all 8 cells
        assert_eq!(clues.rows[0].iter().sum::<usize>() + (clues.rows[0].len() - 1), 8);
    }

    #[test]
    fn double_toggle_leaves_clues_unchanged() {
        let mut grid = grid_from(&["##.",
                                   "..#"]);
        let before = derive(&grid);
        grid.toggle(1, 1);
        grid.toggle(1, 1);
        assert_eq!(derive(&grid), before);
    }

    #[test]
    fn degenerate_grid_has_no_clue_lines() {
        let clues = derive(&Grid::new(0, 0));
        assert!(clues.rows.is_empty());
        assert!(clues.cols.is_empty());
    }

    #[test]
    fn yaml_document_lists_rows_and_cols() {
        let doc = derive(&grid_from(&["#.##"])).to_yaml_string();
        assert!(doc.starts_with("---"));
        assert!(doc.contains("rows:"));
        assert!(doc.contains("1 2"));
        assert!(doc.contains("cols:"));
    }
}
