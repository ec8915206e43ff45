//! `cit import` command - Create products from a CSV export

use console::style;
use miette::{IntoDiagnostic, Result};
use std::path::PathBuf;

use crate::cli::helpers::{open_store, resolve_format, truncate_str};
use crate::cli::table::products_table;
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::Config;
use crate::import::{
    check_csv_file, dry_run_products, import_products, parse_csv_file, CreationReport,
    CreationStatus,
};

#[derive(clap::Args, Debug)]
pub struct ImportArgs {
    /// CSV file to import
    pub file: PathBuf,

    /// Validate and map the CSV without creating products
    #[arg(long)]
    pub dry_run: bool,

    /// Import the valid rows even when other rows have errors
    #[arg(long)]
    pub skip_errors: bool,

    /// Write product JSON files to this directory instead of the records API
    #[arg(long, value_name = "DIR")]
    pub out_dir: Option<PathBuf>,
}

pub fn run(args: ImportArgs, global: &GlobalOpts) -> Result<()> {
    let config = Config::load();
    let format = resolve_format(global, &config);
    let human = !matches!(format, OutputFormat::Json);

    check_csv_file(&args.file, config.max_file_size()).into_diagnostic()?;

    if human && !global.quiet {
        println!(
            "{} Importing from {}{}",
            style("→").blue(),
            style(args.file.display()).yellow(),
            if args.dry_run { style(" (dry run)").dim().to_string() } else { String::new() }
        );
        println!();
    }

    let parsed = parse_csv_file(&args.file);
    for error in &parsed.errors {
        eprintln!("{} {}", style("✗").red(), error);
    }

    if parsed.data.is_empty() {
        return Err(miette::miette!("No valid rows to import"));
    }
    if !parsed.errors.is_empty() && !args.skip_errors {
        return Err(miette::miette!(
            "CSV has {} error(s). Fix them or pass --skip-errors to import the valid rows",
            parsed.errors.len()
        ));
    }

    if args.dry_run {
        let products = dry_run_products(&parsed.data);
        if !human {
            let json = serde_json::to_string_pretty(&products).into_diagnostic()?;
            println!("{}", json);
            return Ok(());
        }

        if !products.is_empty() {
            println!("{}", products_table(&products));
        }
        println!();
        println!("  Rows accepted:      {}", style(parsed.valid_rows).cyan());
        println!("  Products to create: {}", style(products.len()).green());
        println!();
        println!("{}", style("Dry run complete. No products were created.").yellow());
        return Ok(());
    }

    let store = open_store(args.out_dir.as_deref(), &config)?;
    let report = import_products(store.as_ref(), &parsed.data);

    if human {
        print_details(&report);
        print_summary(&report, parsed.valid_rows);
    } else {
        let json = serde_json::to_string_pretty(&report).into_diagnostic()?;
        println!("{}", json);
    }

    if !report.success {
        return Err(miette::miette!(
            "Import completed with {} error(s)",
            report.errors.len()
        ));
    }

    Ok(())
}

fn print_details(report: &CreationReport) {
    for detail in &report.details {
        match detail.status {
            CreationStatus::Success => println!(
                "{} Created {}",
                style("✓").green(),
                truncate_str(&detail.product_name, 60)
            ),
            CreationStatus::Error => eprintln!(
                "{} {}: {}",
                style("✗").red(),
                truncate_str(&detail.product_name, 60),
                detail.error.as_deref().unwrap_or("unknown error")
            ),
        }
    }
}

fn print_summary(report: &CreationReport, valid_rows: usize) {
    println!();
    println!("{}", style("─".repeat(50)).dim());
    println!("{}", style("Import Summary").bold());
    println!("{}", style("─".repeat(50)).dim());
    println!("  Rows accepted:    {}", style(valid_rows).cyan());
    println!("  Products created: {}", style(report.created).green());
    if report.skipped > 0 {
        println!("  Skipped:          {}", style(report.skipped).dim());
    }
    if !report.errors.is_empty() {
        println!("  Errors:           {}", style(report.errors.len()).red());
    }
}
