//! Debug commands: `lex`, `sig` and `parse` for inspecting single lines.

use super::{read_file, CliError};
use splice_ir::Tables;
use splice_lexer::Program;
use splice_parse::{analyze_line, build_signature};
use splice_search::{ConfigKind, FrozenConfig};

/// Tokenize a file and display the program-wide token stream.
pub fn lex_file(path: &str) -> Result<(), CliError> {
    let content = read_file(path)?;
    let program = Program::new(&content);

    println!("Tokens for '{}' ({} tokens):", path, program.tokens().len());
    for token in program.tokens() {
        let Some(pos) = token.pos else {
            continue;
        };
        println!(
            "  #{:<5} {}:{:<4} {} {:?}",
            pos.ordinal,
            pos.line + 1,
            token.offset(),
            token.kind,
            token.text
        );
    }
    Ok(())
}

/// Display the frozen signature of every line.
pub fn signature_file(path: &str) -> Result<(), CliError> {
    let content = read_file(path)?;
    let tables = Tables::standard();

    for (idx, line) in content.lines().enumerate() {
        match build_signature(line, tables) {
            Some(signature) => {
                let config = FrozenConfig::of(&signature, ConfigKind::Table, None);
                let opens = if signature.opens_scope { " opens" } else { "" };
                println!("{:>4}  {config}{opens}", idx + 1);
            }
            None => println!("{:>4}  unparseable: {line}", idx + 1),
        }
    }
    Ok(())
}

/// Display the statement trees of every line as S-expressions.
pub fn parse_file(path: &str) -> Result<(), CliError> {
    let content = read_file(path)?;
    let tables = Tables::standard();

    for (idx, line) in content.lines().enumerate() {
        println!("{:>4}  {line}", idx + 1);
        let Some(analysis) = analyze_line(line, tables) else {
            println!("      unparseable");
            continue;
        };
        for (depth, chunk) in &analysis.chunks {
            let trees: Vec<String> = chunk.roots.iter().map(|&root| chunk.arena.sexpr(root)).collect();
            println!("      [{depth}] {}", trees.join(" "));
            for (name, ty) in &chunk.declared {
                println!("          declares {name}: {ty}");
            }
        }
    }
    Ok(())
}
