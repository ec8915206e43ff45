//! `cit check` command - Validate a CSV export without importing it

use console::style;
use miette::{IntoDiagnostic, Result};
use std::io;
use std::path::PathBuf;

use crate::cli::helpers::resolve_format;
use crate::cli::table::{rows_table, write_rows};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::Config;
use crate::import::{check_csv_file, parse_csv_file, ParsedCsv};

#[derive(clap::Args, Debug)]
pub struct CheckArgs {
    /// CSV file to check
    pub file: PathBuf,

    /// Show at most this many accepted rows (counts and errors stay complete)
    #[arg(long, short = 'n')]
    pub limit: Option<usize>,
}

pub fn run(args: CheckArgs, global: &GlobalOpts) -> Result<()> {
    let config = Config::load();
    check_csv_file(&args.file, config.max_file_size()).into_diagnostic()?;

    let parsed = parse_csv_file(&args.file);
    let shown = match args.limit {
        Some(n) => &parsed.data[..n.min(parsed.data.len())],
        None => &parsed.data[..],
    };

    match resolve_format(global, &config) {
        OutputFormat::Json => {
            let json = if shown.len() < parsed.data.len() {
                let limited = ParsedCsv {
                    success: parsed.success,
                    data: shown.to_vec(),
                    errors: parsed.errors.clone(),
                    total_rows: parsed.total_rows,
                    valid_rows: parsed.valid_rows,
                };
                serde_json::to_string_pretty(&limited)
            } else {
                serde_json::to_string_pretty(&parsed)
            }
            .into_diagnostic()?;
            println!("{}", json);
        }
        format @ (OutputFormat::Csv | OutputFormat::Tsv) => {
            write_rows(shown, format, io::stdout().lock()).into_diagnostic()?;
            print_errors(&parsed);
        }
        OutputFormat::Auto | OutputFormat::Table => {
            if !shown.is_empty() {
                println!("{}", rows_table(shown));
            }
            print_errors(&parsed);
            if !global.quiet {
                print_summary(&parsed, shown.len());
            }
        }
    }

    if !parsed.success {
        return Err(miette::miette!(
            "CSV check failed with {} error(s)",
            parsed.errors.len().max(1)
        ));
    }

    Ok(())
}

fn print_errors(parsed: &ParsedCsv) {
    for error in &parsed.errors {
        eprintln!("{} {}", style("✗").red(), error);
    }
}

fn print_summary(parsed: &ParsedCsv, shown: usize) {
    println!();
    println!("{}", style("─".repeat(50)).dim());
    println!("{}", style("Check Summary").bold());
    println!("{}", style("─".repeat(50)).dim());
    println!("  Data rows:   {}", style(parsed.total_rows).cyan());
    println!("  Valid rows:  {}", style(parsed.valid_rows).green());
    if !parsed.errors.is_empty() {
        println!("  Errors:      {}", style(parsed.errors.len()).red());
    }
    if shown < parsed.data.len() {
        println!(
            "  {}",
            style(format!("Showing {} of {} rows", shown, parsed.data.len())).dim()
        );
    }

    if parsed.success {
        println!();
        println!("{} Ready to import", style("✓").green());
    }
}
