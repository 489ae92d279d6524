// vim: set ai et ts=4 sts=4 sw=4:
mod util;
mod grid;
mod clues;
mod render;
mod export;
mod ui;

use std::io;
use std::path::PathBuf;
use std::process;
use clap::{App, Arg};

pub struct Args {
    pub initial_size: Option<String>,
    pub output_dir: PathBuf,
    pub seed: Option<u64>,
    pub visual_groups: Option<usize>,
    pub emit_color: bool,
}

fn init_logging(verbosity: u64) -> Result<(), log::SetLoggerError> {
    let level = match verbosity {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    // log lines go to stderr so they never interleave with the board on stdout
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!("[{}][{}] {}",
                record.level(),
                record.target(),
                message))
        })
        .level(level)
        .chain(io::stderr())
        .apply()
}

fn main() {
    let matches = App::new("nonogram-maker")
        .version("0.1.0")
        .about("Sketch a picture on a grid, derive its nonogram clues, export solution images")
        .arg(Arg::with_name("size")
             .short("s")
             .long("size")
             .value_name("ROWS,COLS")
             .takes_value(true)
             .help("Initialize the grid to the given dimensions on startup"))
        .arg(Arg::with_name("output-dir")
             .short("o")
             .long("output-dir")
             .value_name("DIR")
             .takes_value(true)
             .default_value(".")
             .help("Directory the export artifacts are written into"))
        .arg(Arg::with_name("seed")
             .long("seed")
             .value_name("N")
             .takes_value(true)
             .help("Fixed shuffle seed for reproducible partial reveals"))
        .arg(Arg::with_name("groups")
             .long("groups")
             .value_name("N")
             .takes_value(true)
             .help("Visual subdivision interval on the board; 0 disables (default 5)"))
        .arg(Arg::with_name("no-color")
             .long("no-color")
             .help("Never emit ANSI colors"))
        .arg(Arg::with_name("verbose")
             .short("v")
             .multiple(true)
             .help("Increase log verbosity (-v, -vv, -vvv)"))
        .get_matches();

    if let Err(e) = init_logging(matches.occurrences_of("verbose")) {
        eprintln!("could not initialize logging: {}", e);
        process::exit(1);
    }

    let seed = match matches.value_of("seed").map(|s| s.parse::<u64>()) {
        None              => None,
        Some(Ok(seed))    => Some(seed),
        Some(Err(_))      => {
            eprintln!("--seed expects an unsigned integer");
            process::exit(2);
        }
    };
    let visual_groups = match matches.value_of("groups").map(|s| s.parse::<usize>()) {
        None              => Some(5),
        Some(Ok(0))       => None,
        Some(Ok(groups))  => Some(groups),
        Some(Err(_))      => {
            eprintln!("--groups expects an unsigned integer");
            process::exit(2);
        }
    };
    let emit_color = !matches.is_present("no-color") && util::is_a_tty(io::stdout());

    let args = Args {
        initial_size: matches.value_of("size").map(String::from),
        output_dir: PathBuf::from(matches.value_of("output-dir").unwrap()),
        seed,
        visual_groups,
        emit_color,
    };
    ui::ui_main(&args);
}
