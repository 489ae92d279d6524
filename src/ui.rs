// vim: set ai et ts=4 sts=4 sw=4:
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use ansi_term::{ANSIString, Colour, Style};

use super::clues::{self, ClueSet};
use super::export::{self, ExportError};
use super::grid::Grid;
use super::util::{lalign_colored, ralign, ralign_joined_coloreds};
use super::Args;

// ------------------------------------------------

fn is_blank(runs: &[usize]) -> bool {
    runs.len() == 1 && runs[0] == 0
}

pub struct BoardView {
    pub subdivision: Option<usize>, // visual subdivision size (optional)
    pub emit_color: bool,
}

impl BoardView {
    pub fn new(subdivision: Option<usize>, emit_color: bool) -> Self {
        Self { subdivision, emit_color }
    }

    fn line_style(runs: &[usize]) -> Style {
        // the [0] clue of an all-empty line is dimmed so real clues stand out
        match is_blank(runs) {
            true  => Style::new().fg(Colour::Fixed(241)),
            false => Style::default(),
        }
    }

    fn run_strings(runs: &[usize]) -> Vec<ANSIString<'static>> {
        let style = Self::line_style(runs);
        runs.iter()
            .map(|n| style.paint(n.to_string()))
            .collect()
    }

    pub fn format(&self, grid: &Grid, clue_set: &ClueSet) -> String {
        let row_prefixes: Vec<Vec<ANSIString>> =
            clue_set.rows.iter()
                         .map(|runs| Self::run_strings(runs))
                         .collect();

        let prefix_len = row_prefixes.iter()
                                     .map(|parts| parts.iter()
                                                       .fold(0, |sum, ansi_str| sum + ansi_str.len() + 1) // note: .len() returns length WITHOUT ansi color escape sequences
                                                  -1) // minus one at the end to match the length of a join(" ")
                                     .max().unwrap_or(0);
        let max_col_runs = clue_set.cols.iter()
                                        .map(|runs| runs.len())
                                        .max().unwrap_or(0);

        let mut result = String::new();

        for i in (0..max_col_runs).rev() {
            result.push_str(&self.fmt_header(clue_set, i, prefix_len));
        }

        // top board line
        result.push_str(&self.fmt_line(
            &ralign("", prefix_len),
            "\u{2554}",
            "\u{2557}",
            "\u{2564}",
            &(0..grid.width()).map(|_| String::from("\u{2550}\u{2550}\u{2550}"))
                              .collect::<Vec<_>>()
        ));

        for y in 0..grid.height() {
            // board content line
            result.push_str(&self.fmt_line(
                &ralign_joined_coloreds(&row_prefixes[y], prefix_len, self.emit_color),
                "\u{2551}",
                "\u{2551}",
                "\u{2502}",
                &(0..grid.width()).map(|x| format!(" {:1} ", grid.get_square(x, y)))
                                  .collect::<Vec<_>>()
            ));

            // horizontal subdivisor line
            if let Some(subdiv) = self.subdivision {
                if ((y+1) % subdiv == 0) && (y != grid.height()-1) {
                    result.push_str(&self.fmt_line(
                        &ralign("", prefix_len),
                        "\u{255F}",
                        "\u{2562}",
                        "\u{253C}",
                        &(0..grid.width()).map(|_| String::from("\u{2500}\u{2500}\u{2500}"))
                                          .collect::<Vec<_>>()
                    ));
                }
            }
        }
        // bottom board line
        result.push_str(&self.fmt_line(
            &ralign("", prefix_len),
            "\u{255A}",
            "\u{255D}",
            "\u{2567}",
            &(0..grid.width()).map(|_| String::from("\u{2550}\u{2550}\u{2550}"))
                              .collect::<Vec<_>>()
        ));

        result
    }

    fn fmt_line(&self,
                prefix: &str,
                left_delim: &str,
                right_delim: &str,
                columnwise_separator: &str,
                content_parts: &[String])
        -> String
    {
        let mut result = format!("{} {}", prefix, left_delim);
        for (idx, s) in content_parts.iter().enumerate() {
            result.push_str(s);
            if let Some(subdiv) = self.subdivision {
                if ((idx+1) % subdiv == 0) && (idx < content_parts.len()-1) {
                    result.push_str(columnwise_separator);
                }
            }
        }
        result.push_str(&format!("{}\n", right_delim));
        result
    }

    fn fmt_header(&self, clue_set: &ClueSet,
                         line_idx: usize,
                         prefix_len: usize)
        -> String
    {
        // column clues are stacked bottom-aligned above the board
        let mut content_parts = Vec::<String>::new();
        for runs in &clue_set.cols {
            let part: String;
            if line_idx < runs.len() {
                let colored = Self::line_style(runs).paint(runs[runs.len()-1-line_idx].to_string());
                part = format!(" {}", lalign_colored(&colored, 2, self.emit_color));
            } else {
                part = format!(" {:-2}", " ");
            }
            content_parts.push(part);
        }

        self.fmt_line(
            &ralign("", prefix_len),
            " ",
            " ",
            " ",
            &content_parts
        )
    }
}

// ------------------------------------------------

#[derive(PartialEq, Debug)]
pub enum Command {
    Size(String),
    Toggle(usize, usize),
    Show,
    Clues,
    Export,
    Help,
    Quit,
}

pub fn parse_command(line: &str) -> Result<Command, String> {
    let mut words = line.split_whitespace();
    let keyword = match words.next() {
        Some(w) => w,
        None    => return Err(String::from("empty command; try 'help'")),
    };
    let rest: Vec<&str> = words.collect();

    match keyword {
        "size" | "dim" => {
            if rest.is_empty() {
                return Err(String::from("usage: size ROWS,COLS"));
            }
            Ok(Command::Size(rest.join(" ")))
        }
        "toggle" | "t" => {
            if rest.len() != 2 {
                return Err(String::from("usage: toggle ROW COL"));
            }
            let row = rest[0].parse::<usize>().map_err(|_| format!("not a cell coordinate: {}", rest[0]))?;
            let col = rest[1].parse::<usize>().map_err(|_| format!("not a cell coordinate: {}", rest[1]))?;
            Ok(Command::Toggle(row, col))
        }
        "show"           => Ok(Command::Show),
        "clues"          => Ok(Command::Clues),
        "export"         => Ok(Command::Export),
        "help" | "?"     => Ok(Command::Help),
        "quit" | "q"     => Ok(Command::Quit),
        other            => Err(format!("unknown command: {} (try 'help')", other)),
    }
}

fn print_help() {
    println!("commands:");
    println!("  size ROWS,COLS   start over with an all-empty grid of the given dimensions");
    println!("  toggle ROW COL   flip one cell (0-based coordinates); alias: t");
    println!("  show             redraw the board with its derived clues");
    println!("  clues            print the row and column clue lists");
    println!("  export           write the solution image, teaser image and clue document");
    println!("  help             this text");
    println!("  quit             leave");
}

fn show_board(grid: &Grid, view: &BoardView) {
    print!("{}", view.format(grid, &clues::derive(grid)));
}

fn do_export(grid: &Grid, args: &Args) -> Result<Vec<PathBuf>, ExportError> {
    log::info!("exporting {}x{} grid with {} filled cells",
               grid.height(), grid.width(), grid.num_filled());
    let bundle = export::bundle(grid, &mut export::reveal_rng(args.seed))?;
    let written = export::write_to_dir(&bundle, &args.output_dir)?;
    Ok(written)
}

/// Applies one command to the grid slot. Returns false when the loop should
/// end. Commands that need a grid before one exists, and toggle coordinates
/// outside it, are rejected here with no mutation.
fn dispatch(command: Command, grid: &mut Option<Grid>, view: &BoardView, args: &Args) -> bool {
    const NO_GRID: &str = "no grid yet; set one with 'size ROWS,COLS'";

    match command {
        Command::Size(spec) => {
            match Grid::from_dimension_spec(&spec) {
                Ok(fresh) => {
                    log::info!("grid (re)initialized to {} rows x {} cols",
                               fresh.height(), fresh.width());
                    *grid = Some(fresh);
                    if let Some(g) = grid {
                        show_board(g, view);
                    }
                }
                // the prior grid, if any, stays as it was
                Err(e) => println!("{}", e),
            }
        }
        Command::Toggle(row, col) => {
            match grid {
                Some(g) if row < g.height() && col < g.width() => {
                    let change = g.toggle(col, row);
                    log::debug!("{}", change);
                    show_board(g, view);
                }
                Some(g) => println!("cell (row={}, col={}) is outside the {}x{} grid",
                                    row, col, g.height(), g.width()),
                None => println!("{}", NO_GRID),
            }
        }
        Command::Show => {
            match grid {
                Some(g) => show_board(g, view),
                None    => println!("{}", NO_GRID),
            }
        }
        Command::Clues => {
            match grid {
                Some(g) => {
                    let clue_set = clues::derive(g);
                    println!("rows: {:?}", clue_set.rows);
                    println!("cols: {:?}", clue_set.cols);
                }
                None => println!("{}", NO_GRID),
            }
        }
        Command::Export => {
            match grid {
                Some(g) => {
                    match do_export(g, args) {
                        Ok(written) => {
                            for path in written {
                                println!("wrote {}", path.display());
                            }
                        }
                        Err(e) => println!("export failed: {}", e),
                    }
                }
                None => println!("{}", NO_GRID),
            }
        }
        Command::Help => print_help(),
        Command::Quit => return false,
    }
    true
}

fn prompt() {
    print!("> ");
    let _ = io::stdout().flush();
}

pub fn ui_main(args: &Args) {
    let view = BoardView::new(args.visual_groups, args.emit_color);
    let mut grid: Option<Grid> = None;

    if let Some(spec) = &args.initial_size {
        match Grid::from_dimension_spec(spec) {
            Ok(fresh) => {
                log::info!("grid initialized to {} rows x {} cols from --size",
                           fresh.height(), fresh.width());
                grid = Some(fresh);
            }
            Err(e) => println!("{}", e),
        }
    }
    if let Some(g) = &grid {
        show_board(g, &view);
    }
    println!("nonogram maker; type 'help' for commands");

    let stdin = io::stdin();
    prompt();
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(_)   => break,
        };
        if !line.trim().is_empty() {
            match parse_command(&line) {
                Ok(command) => {
                    if !dispatch(command, &mut grid, &view, args) {
                        break;
                    }
                }
                Err(msg) => println!("{}", msg),
            }
        }
        prompt();
    }
}

// ------------------------------------------------
