//! Argument parsing for `string-hover`.
//!
//! Hand-rolled: the grammar is two positionals and two flags.

use std::path::PathBuf;

use hover_literal::Position;

use crate::error::CliError;

pub const USAGE: &str = "\
Usage: string-hover <file> <line>:<col> [options]

Prints the decoded value of the string literal at <line>:<col> (1-based,
columns in UTF-16 code units). Exits with 1 when there is nothing to show.

Options:
  --lang <id>       Language id: json, jsonc, javascript, javascriptreact,
                    typescript, typescriptreact, rust (default: from extension)
  --lenient-json    Accept unknown and malformed JSON escapes
  -h, --help        Show this help";

/// A parsed command line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Help,
    Hover(Invocation),
}

/// Everything needed for one hover request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Invocation {
    pub path: PathBuf,
    /// Zero-based, converted from the 1-based command line form.
    pub position: Position,
    pub language: Option<String>,
    pub lenient_json: bool,
}

/// Parse arguments, excluding the program name.
pub fn parse_args(args: &[String]) -> Result<Command, CliError> {
    let mut path = None;
    let mut position = None;
    let mut language = None;
    let mut lenient_json = false;

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if let Some(id) = arg.strip_prefix("--lang=") {
            language = Some(id.to_owned());
            continue;
        }
        match arg.as_str() {
            "-h" | "--help" => return Ok(Command::Help),
            "--lenient-json" => lenient_json = true,
            "--lang" => {
                let id = iter.next().ok_or(CliError::MissingArgument("language id after --lang"))?;
                language = Some(id.clone());
            }
            _ if arg.starts_with('-') && arg.len() > 1 => {
                return Err(CliError::UnexpectedArgument(arg.clone()));
            }
            _ if path.is_none() => path = Some(PathBuf::from(arg)),
            _ if position.is_none() => position = Some(parse_position(arg)?),
            _ => return Err(CliError::UnexpectedArgument(arg.clone())),
        }
    }

    Ok(Command::Hover(Invocation {
        path: path.ok_or(CliError::MissingArgument("file path"))?,
        position: position.ok_or(CliError::MissingArgument("<line>:<col>"))?,
        language,
        lenient_json,
    }))
}

/// Parse a 1-based `line:col` into a zero-based position.
fn parse_position(arg: &str) -> Result<Position, CliError> {
    let invalid = || CliError::InvalidPosition(arg.to_owned());
    let (line, column) = arg.split_once(':').ok_or_else(invalid)?;
    let line: u32 = line.parse().map_err(|_| invalid())?;
    let column: u32 = column.parse().map_err(|_| invalid())?;
    match (line.checked_sub(1), column.checked_sub(1)) {
        (Some(line), Some(character)) => Ok(Position::new(line, character)),
        _ => Err(invalid()),
    }
}
