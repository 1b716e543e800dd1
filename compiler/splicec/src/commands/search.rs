//! `search`: enumerate assemblies of a candidate file in cost order.

use super::{parse_count, read_file, CliError};
use crate::input::CandidateFile;
use splice_ir::Tables;
use splice_search::{search_groups, MultiQueue, SearchConfig, SearchMode};

const DEFAULT_COUNT: usize = 10;

#[derive(Debug, PartialEq)]
struct SearchArgs {
    path: String,
    config: SearchConfig,
    count: usize,
}

impl SearchArgs {
    fn parse(args: &[String]) -> Result<Self, CliError> {
        let mut path = None;
        let mut config = SearchConfig::default();
        let mut beam = None;
        let mut top_k = None;
        let mut count = DEFAULT_COUNT;

        for arg in args {
            if let Some(name) = arg.strip_prefix("--option=") {
                config.option = name.parse()?;
            } else if let Some(value) = arg.strip_prefix("--beam=") {
                beam = Some(parse_count("--beam", value)?);
            } else if let Some(value) = arg.strip_prefix("--top-k=") {
                top_k = Some(parse_count("--top-k", value)?);
            } else if let Some(value) = arg.strip_prefix("--count=") {
                count = parse_count("--count", value)?;
            } else if arg == "--regular" {
                config.mode = SearchMode::Regular;
            } else if !arg.starts_with('-') && path.is_none() {
                path = Some(arg.clone());
            } else {
                return Err(CliError::UnexpectedArgument(arg.clone()));
            }
        }

        // Regular mode: beam twice the requested count, keep the count.
        if config.mode == SearchMode::Regular {
            config.beam_width = count.saturating_mul(2);
            config.top_k = count;
        }
        if let Some(beam) = beam {
            config.beam_width = beam;
        }
        if let Some(top_k) = top_k {
            config.top_k = top_k;
        }

        Ok(SearchArgs {
            path: path.ok_or(CliError::MissingPath)?,
            config,
            count,
        })
    }
}

pub fn search_candidates(args: &[String]) -> Result<(), CliError> {
    let args = SearchArgs::parse(args)?;
    let file = CandidateFile::parse(&read_file(&args.path)?, &args.path)?;
    tracing::debug!(lines = file.lines.len(), path = %args.path, "candidates loaded");

    let outcome = search_groups(
        &file.lines,
        file.indent.as_deref(),
        &args.config,
        Tables::standard(),
    )?;

    for (line, mass) in outcome.rejected_mass.iter().enumerate() {
        if *mass > 0.0 {
            println!("line {}: rejected mass {mass:.4}", line + 1);
        }
    }

    let Some(groups) = outcome.groups else {
        println!("no valid assembly found");
        return Ok(());
    };
    println!(
        "{} scaffold(s), {} extension(s)",
        groups.len(),
        outcome.extend_count
    );

    for (rank, assembly) in MultiQueue::new(&groups).take(args.count).enumerate() {
        println!();
        println!(
            "#{rank} cost {:.4} group {}",
            assembly.cost, assembly.group
        );
        for line in assembly.code.lines() {
            println!("    {line}");
        }
    }
    Ok(())
}
