use std::fmt;
use std::fmt::Display;
use std::fs::File;
use std::io;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use anyhow::Context;
use clap::Parser;
pub use log::{trace, debug, info, warn, error};
pub use anyhow::Result;
pub use anyhow;
pub use dotenvy;
pub use lazy_static::lazy_static;
pub use winnow;

/// Loads `.env` (if present) and installs the logger. Safe to call more than once.
pub fn init() {
    // RUST_LOG may just as well come from the real environment
    dotenvy::dotenv().ok();
    pretty_env_logger::try_init().ok();
}

pub fn lines(path: impl AsRef<Path>) -> Result<impl Iterator<Item=io::Result<String>>> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    Ok(reader.lines())
}

/// Every non-blank line of `path`, trimmed.
pub fn read_lines(path: impl AsRef<Path>) -> Result<Vec<String>> {
    let path = path.as_ref();
    let mut out = Vec::new();
    for line in lines(path).with_context(|| format!("Unable to open {}", path.display()))? {
        let line = line?;
        let line = line.trim();
        if !line.is_empty() {
            out.push(line.to_owned());
        }
    }
    Ok(out)
}

/// Command line shared by every day: `<INPUT> <MODE>`.
#[derive(Debug, Clone, Parser)]
#[command(version, about = "Solve one part of an Advent of Code puzzle")]
pub struct Args {
    /// Path to the puzzle input
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Which part of the puzzle to solve (1 or 2)
    #[arg(value_name = "MODE")]
    pub mode: Mode,
}

/// Parses the command line, reads the input and prints whatever `solve` returns.
///
/// The answer is the only thing written to stdout; logging goes to stderr.
pub fn run<T: Display>(solve: impl FnOnce(Mode, &[String]) -> Result<T>) -> Result<()> {
    init();
    let args = Args::parse();
    debug!("Running {args:?}");
    let lines = read_lines(&args.input)?;
    trace!("Read {} lines from {}", lines.len(), args.input.display());
    let answer = solve(args.mode, &lines)?;
    info!("Answer (part {}): {answer}", args.mode);
    println!("{answer}");
    Ok(())
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Mode {
    PartOne,
    PartTwo,
}

impl FromStr for Mode {
    type Err = ParseError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim() {
            "1" => Ok(Mode::PartOne),
            "2" => Ok(Mode::PartTwo),
            other => Err(ParseError(format!("unknown mode `{other}`, expected 1 or 2"))),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::PartOne => write!(f, "1"),
            Mode::PartTwo => write!(f, "2"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct ParseError(pub String);

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SolveError {
    #[error("no {0} to solve over")]
    Empty(&'static str),
    #[error("part {0} is not implemented for this puzzle")]
    NotImplemented(Mode),
}

#[cfg(test)]
mod tests {
    use std::fs;
    use indoc::indoc;
    use crate::{read_lines, Mode, SolveError};

    #[test]
    fn modes() {
        let cases = [
            ("1", Some(Mode::PartOne)),
            ("2", Some(Mode::PartTwo)),
            (" 2 ", Some(Mode::PartTwo)),
            ("3", None),
            ("one", None),
            ("", None),
        ];
        for (input, expected) in cases {
            assert_eq!(input.parse::<Mode>().ok(), expected, "{input:?}");
        }
        assert_eq!(Mode::PartTwo.to_string(), "2");
    }

    #[test]
    fn not_implemented_message() {
        let error = SolveError::NotImplemented(Mode::PartTwo);
        assert_eq!(error.to_string(), "part 2 is not implemented for this puzzle");
    }

    #[test]
    fn read_lines_drops_blanks() {
        let path = std::env::temp_dir().join(format!("sdk-read-lines-{}.txt", std::process::id()));
        fs::write(&path, indoc! {"
            seeds: 1 2

              a-to-b map:
            1 2 3

        "}).unwrap();
        let lines = read_lines(&path).unwrap();
        fs::remove_file(&path).unwrap();
        assert_eq!(lines, vec!["seeds: 1 2", "a-to-b map:", "1 2 3"]);
    }

    #[test]
    fn read_lines_missing_file() {
        let error = read_lines("/definitely/not/here.txt").unwrap_err();
        assert!(error.to_string().contains("/definitely/not/here.txt"));
    }
}
