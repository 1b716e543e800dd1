//! `check`: run a gold program through the search constraints.

use super::{read_file, CliError};
use crate::input::parse_indent;
use splice_ir::Tables;
use splice_search::{pseudo_compile_check, SearchOption};

#[derive(Debug, PartialEq)]
struct CheckArgs {
    path: String,
    indent: Option<String>,
    option: SearchOption,
}

impl CheckArgs {
    fn parse(args: &[String]) -> Result<Self, CliError> {
        let mut path = None;
        let mut indent = None;
        let mut option = SearchOption::Syntax;

        for arg in args {
            if let Some(file) = arg.strip_prefix("--indent=") {
                indent = Some(file.to_string());
            } else if let Some(name) = arg.strip_prefix("--option=") {
                option = name.parse()?;
            } else if !arg.starts_with('-') && path.is_none() {
                path = Some(arg.clone());
            } else {
                return Err(CliError::UnexpectedArgument(arg.clone()));
            }
        }

        Ok(CheckArgs {
            path: path.ok_or(CliError::MissingPath)?,
            indent,
            option,
        })
    }
}

pub fn check_program(args: &[String]) -> Result<(), CliError> {
    let args = CheckArgs::parse(args)?;
    let program = read_file(&args.path)?;
    let indent = match &args.indent {
        Some(file) => Some(parse_indent(&read_file(file)?)?),
        None => None,
    };

    let passed = pseudo_compile_check(
        &program,
        indent.as_deref(),
        args.option,
        Tables::standard(),
    )?;
    if !passed {
        return Err(CliError::GoldRejected {
            path: args.path,
            option: args.option.to_string(),
        });
    }
    println!("'{}' satisfies the {} constraints", args.path, args.option);
    Ok(())
}
