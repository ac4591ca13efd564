mod app;
mod command;
mod config;
mod consts;
mod game;
mod highscore;
mod menu;
mod options;
mod util;
mod warning;
use crate::app::App;
use crate::config::Config;
use crate::highscore::{HighScore, LoadError};
use crate::options::{Difficulty, GridDim};
use crate::util::Globals;
use crate::warning::Warning;
use anyhow::Context;
use lexopt::prelude::*;
use std::io::{self, ErrorKind};
use std::path::PathBuf;
use std::process::ExitCode;

static USAGE: &str = "Usage: slither [options]

Classic Snake in the terminal

Options:
  -c, --config <file>       Read configuration from <file>
      --width <n>           Grid width in cells (10-50)
      --height <n>          Grid height in cells (10-50)
      --difficulty <level>  One of: easy, medium, hard
  -h, --help                Show this help and exit
  -V, --version             Show the program version and exit
";

fn main() -> ExitCode {
    let args = match Arguments::from_env() {
        Ok(Some(args)) => args,
        Ok(None) => return ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("slither: {e}");
            return ExitCode::from(2);
        }
    };
    let (globals, warning) = startup(args);
    let terminal = ratatui::init();
    let r = App::new(globals, warning).run(terminal);
    ratatui::restore();
    io_exit(r)
}

/// Assemble the initial [`Globals`] from the configuration file, the
/// high-score file, and the command line.  Problems with either file are
/// not fatal; they are collected into a warning pop-up and defaults are
/// used instead.
fn startup(args: Arguments) -> (Globals, Option<Warning>) {
    let mut errors = Vec::new();
    let config = match load_config(args.config) {
        Ok(config) => config,
        Err(e) => {
            errors.push(e);
            Config::default()
        }
    };
    let high_score = if config.files.save_high_score {
        match load_high_score(&config) {
            Ok(high_score) => high_score,
            Err(e) => {
                errors.push(e);
                HighScore::default()
            }
        }
    } else {
        HighScore::default()
    };
    let mut options = config.options;
    if let Some(width) = args.width {
        options.grid_width = GridDim::new(width);
    }
    if let Some(height) = args.height {
        options.grid_height = GridDim::new(height);
    }
    if let Some(difficulty) = args.difficulty {
        options.difficulty = difficulty;
    }
    let globals = Globals {
        config,
        options,
        high_score,
    };
    // Only the first problem gets a pop-up; in practice a broken config
    // directory breaks both loads with the same root cause.
    let warning = errors.first().map(Warning::new);
    (globals, warning)
}

fn load_config(path: Option<PathBuf>) -> Result<Config, anyhow::Error> {
    // A path given on the command line must exist; the default path need
    // not.
    let (path, allow_missing) = match path {
        Some(path) => (path, false),
        None => (Config::default_path()?, true),
    };
    Config::load(&path, allow_missing)
        .with_context(|| format!("could not load configuration from {}", path.display()))
}

fn load_high_score(config: &Config) -> Result<HighScore, anyhow::Error> {
    let path = config.high_score_file().ok_or_else(LoadError::no_path)?;
    HighScore::load(&path)
        .with_context(|| format!("could not load the high score from {}", path.display()))
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
struct Arguments {
    config: Option<PathBuf>,
    width: Option<u16>,
    height: Option<u16>,
    difficulty: Option<Difficulty>,
}

impl Arguments {
    fn from_env() -> Result<Option<Arguments>, lexopt::Error> {
        Arguments::parse(lexopt::Parser::from_env())
    }

    /// Parse the command line.  Returns `Ok(None)` if `--help` or
    /// `--version` was given and the program should exit successfully.
    fn parse(mut parser: lexopt::Parser) -> Result<Option<Arguments>, lexopt::Error> {
        let mut args = Arguments::default();
        while let Some(arg) = parser.next()? {
            match arg {
                Short('c') | Long("config") => {
                    args.config = Some(parser.value()?.into());
                }
                Long("width") => args.width = Some(parser.value()?.parse()?),
                Long("height") => args.height = Some(parser.value()?.parse()?),
                Long("difficulty") => args.difficulty = Some(parser.value()?.parse()?),
                Short('h') | Long("help") => {
                    print!("{USAGE}");
                    return Ok(None);
                }
                Short('V') | Long("version") => {
                    println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
                    return Ok(None);
                }
                _ => return Err(arg.unexpected()),
            }
        }
        Ok(Some(args))
    }
}

fn io_exit(r: io::Result<()>) -> ExitCode {
    match r {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if e.kind() == ErrorKind::BrokenPipe => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::from(2)
        }
    }
}
