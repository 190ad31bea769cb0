//! Covenant CLI

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use covenant::error::{DiagnosticKind, report_diagnostic};
use covenant::sig::ManifestEntry;

#[derive(Parser)]
#[command(name = "covenant", version, about = "Declarative method contract checker")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Check every annotated function in a JSON manifest
    Check {
        /// Manifest file to check
        file: PathBuf,
    },
    /// Parse a contract string and dump its AST (debug)
    Parse {
        /// Contract text, e.g. "null, _ -> fail"
        contract: String,
    },
    /// Tokenize a contract string and dump tokens (debug)
    Tokens {
        /// Contract text to tokenize
        contract: String,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Check { file } => check_manifest(&file),
        Command::Parse { contract } => parse_text(&contract),
        Command::Tokens { contract } => tokenize_text(&contract),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn check_manifest(path: &PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let source = std::fs::read_to_string(path)?;
    let entries: Vec<ManifestEntry> = serde_json::from_str(&source)?;

    let mut problems = 0;
    for entry in &entries {
        let report = covenant::verify::check_annotation(&entry.function, &entry.annotation);

        for diagnostic in &report.diagnostics {
            // Purity conflicts point into the mutation attribute; everything
            // else points into the contract string
            let text = if diagnostic.kind == DiagnosticKind::MutationPurityConflict {
                entry.annotation.mutates.as_deref().unwrap_or("")
            } else {
                entry.annotation.contract.as_deref().unwrap_or("")
            };
            report_diagnostic(&entry.function.name, text, diagnostic);
            problems += 1;
        }

        if report.tracking_abandoned {
            println!(
                "note: `{}`: contract too complex, clause reachability only partially checked",
                entry.function.name
            );
        }
    }

    if problems > 0 {
        return Err(format!("{problems} contract problem(s) found").into());
    }
    println!("✓ {} function(s) check successfully", entries.len());
    Ok(())
}

fn parse_text(contract: &str) -> Result<(), Box<dyn std::error::Error>> {
    let ast = covenant::parser::parse_contract(contract)?;
    println!("{}", serde_json::to_string_pretty(&ast)?);
    Ok(())
}

fn tokenize_text(contract: &str) -> Result<(), Box<dyn std::error::Error>> {
    let tokens = covenant::lexer::tokenize(contract)?;
    for (token, span) in &tokens {
        println!("{:?} @ {}..{}", token, span.start, span.end);
    }
    Ok(())
}
