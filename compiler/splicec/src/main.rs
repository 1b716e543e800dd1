//! Splice CLI
//!
//! Inspect how candidate lines lex, parse and classify, check gold programs
//! and enumerate constrained assemblies.

mod commands;
mod input;

use commands::{check_program, lex_file, parse_file, search_candidates, signature_file};
use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Enable with `RUST_LOG=splice_search=debug` or `RUST_LOG=trace`.
fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}

fn main() {
    init_tracing();
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    let command = &args[1];

    let result = match command.as_str() {
        "lex" | "sig" | "parse" => {
            if args.len() < 3 {
                eprintln!("Usage: splice {command} <file>");
                std::process::exit(1);
            }
            match command.as_str() {
                "lex" => lex_file(&args[2]),
                "sig" => signature_file(&args[2]),
                _ => parse_file(&args[2]),
            }
        }
        "check" => {
            if args.len() < 3 {
                eprintln!("Usage: splice check <program> [--indent=<file>] [--option=<name>]");
                std::process::exit(1);
            }
            check_program(&args[2..])
        }
        "search" => {
            if args.len() < 3 {
                eprintln!("Usage: splice search <candidates.json> [options]");
                eprintln!();
                eprintln!("Options:");
                eprintln!("  --option=<name>  base, syntax (default) or semantics");
                eprintln!("  --beam=<n>       Beam width (default: 50)");
                eprintln!("  --top-k=<n>      Scaffolds kept (default: 20)");
                eprintln!("  --count=<n>      Assemblies printed (default: 10)");
                eprintln!("  --regular        Beam over texts instead of scaffolds");
                std::process::exit(1);
            }
            search_candidates(&args[2..])
        }
        "help" | "--help" | "-h" => {
            print_usage();
            Ok(())
        }
        "version" | "--version" | "-v" => {
            println!("Splice {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        _ => {
            eprintln!("Unknown command: {command}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    };

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn print_usage() {
    println!("Splice: constrained assembly of programs from per-line candidates");
    println!();
    println!("Usage: splice <command> [options]");
    println!();
    println!("Commands:");
    println!("  lex <file>                 Tokenize and display tokens");
    println!("  sig <file>                 Display the signature of each line");
    println!("  parse <file>               Display the expression trees of each line");
    println!("  check <program>            Check a gold program against the constraints");
    println!("  search <candidates.json>   Print assemblies in cost order");
    println!("  help                       Show this help message");
    println!("  version                    Show version information");
    println!();
    println!("Check options:");
    println!("  --indent=<file>     Gold indentation, one integer per line");
    println!("  --option=<name>     syntax (default) or semantics");
    println!();
    println!("Search options:");
    println!("  --option=<name>     base, syntax (default) or semantics");
    println!("  --beam=<n>          Beam width");
    println!("  --top-k=<n>         Scaffolds kept after the last line");
    println!("  --count=<n>         Assemblies printed");
    println!("  --regular           Beam over texts instead of scaffolds");
    println!();
    println!("Candidate input:");
    println!(r#"  {{ "lines": [[["text", cost], ...], ...], "indent": [0, 1, ...] }}"#);
    println!();
    println!("Examples:");
    println!("  splice sig solution.cpp");
    println!("  splice check solution.cpp --option=semantics");
    println!("  splice search candidates.json --count=5 --regular");
}
