use std::path::PathBuf;

use super::CliFlags;

#[derive(Debug, PartialEq)]
pub enum ParseError {
    InvalidNumber(String),
    InvalidValue { flag: String, value: String },
    MissingValue(String),
    UnknownArg(String),
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::InvalidNumber(s) => write!(f, "Invalid number: {}", s),
            ParseError::InvalidValue { flag, value } => {
                write!(f, "Invalid value for {}: {}", flag, value)
            }
            ParseError::MissingValue(s) => write!(f, "Missing value for {}", s),
            ParseError::UnknownArg(s) => write!(f, "Unknown argument: {}", s),
        }
    }
}

impl std::error::Error for ParseError {}

pub fn parse(args: &[String]) -> Result<CliFlags, ParseError> {
    let mut flags = CliFlags::default();
    let mut i = 1;

    while i < args.len() {
        let arg = args[i].as_str();
        match arg {
            "-h" | "--help" => flags.help = true,
            "-v" | "--version" => flags.version = true,
            "-q" | "--quiet" => flags.quiet = true,
            "--verbose" => flags.verbose = true,
            "-s" | "--stats" => flags.stats = true,
            "-b" | "--board" => flags.clipboard = true,
            "-l" | "--list-presets" => flags.list_presets = true,
            "--save-default" => flags.save_default = true,
            "-p" | "--preset" => flags.preset = Some(value(args, &mut i)?.to_string()),
            "-c" | "--config" => flags.config = Some(PathBuf::from(value(args, &mut i)?)),
            "-o" | "--overrides" => flags.overrides = Some(value(args, &mut i)?.to_string()),
            "-d" | "--dictionary" => {
                flags.dictionary = Some(PathBuf::from(value(args, &mut i)?));
            }
            "-r" | "--rng" => flags.rng = Some(value(args, &mut i)?.to_string()),
            "-n" | "--number" => {
                let raw = value(args, &mut i)?;
                match raw.parse::<usize>() {
                    Ok(n) if n > 0 => flags.number = Some(n),
                    _ => return Err(ParseError::InvalidNumber(raw.to_string())),
                }
            }
            "-w" | "--warn" => {
                let raw = value(args, &mut i)?;
                flags.warn = Some(raw.parse().map_err(|_| ParseError::InvalidValue {
                    flag: arg.to_string(),
                    value: raw.to_string(),
                })?);
            }
            arg => return Err(ParseError::UnknownArg(arg.to_string())),
        }
        i += 1;
    }

    Ok(flags)
}

/// Value following the flag at `args[*i]`, advancing past it.
fn value<'a>(args: &'a [String], i: &mut usize) -> Result<&'a str, ParseError> {
    let flag = &args[*i];
    *i += 1;
    args.get(*i)
        .map(String::as_str)
        .ok_or_else(|| ParseError::MissingValue(flag.clone()))
}
