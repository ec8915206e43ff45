//! `cit amazon` command - Create products from scraped Amazon JSON

use console::style;
use miette::{IntoDiagnostic, Result, WrapErr};
use serde_json::Value;
use std::fs;
use std::path::PathBuf;

use crate::cli::helpers::{open_store, resolve_format};
use crate::cli::table::products_table;
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::Config;
use crate::mapping::{
    import_amazon, process_amazon_json, validate_amazon_json, AmazonImportReport, AmazonItem,
};

#[derive(clap::Args, Debug)]
pub struct AmazonArgs {
    /// JSON file with scraped search results
    pub file: PathBuf,

    /// Map the items without creating products
    #[arg(long)]
    pub dry_run: bool,

    /// Write product JSON files to this directory instead of the records API
    #[arg(long, value_name = "DIR")]
    pub out_dir: Option<PathBuf>,
}

pub fn run(args: AmazonArgs, global: &GlobalOpts) -> Result<()> {
    let config = Config::load();
    let human = !matches!(resolve_format(global, &config), OutputFormat::Json);

    let text = fs::read_to_string(&args.file)
        .into_diagnostic()
        .wrap_err_with(|| format!("Failed to read {}", args.file.display()))?;
    let data: Value = serde_json::from_str(&text).map_err(|_| {
        miette::miette!("Arquivo JSON inválido. Verifique a sintaxe do arquivo.")
    })?;

    if !validate_amazon_json(&data) {
        return Err(miette::miette!(
            "Formato do Amazon JSON inválido. Verifique se o arquivo contém dados de produtos do Amazon."
        ));
    }

    if args.dry_run {
        let items: Vec<AmazonItem> = data
            .as_array()
            .map(|values| {
                values
                    .iter()
                    .filter_map(|v| AmazonItem::from_value(v).ok())
                    .collect()
            })
            .unwrap_or_default();
        let products = process_amazon_json(&items);

        if !human {
            let json = serde_json::to_string_pretty(&products).into_diagnostic()?;
            println!("{}", json);
            return Ok(());
        }

        if !products.is_empty() {
            println!("{}", products_table(&products));
        }
        println!();
        println!("  Items:              {}", style(items.len()).cyan());
        println!("  Products to create: {}", style(products.len()).green());
        println!();
        println!("{}", style("Dry run complete. No products were created.").yellow());
        return Ok(());
    }

    let store = open_store(args.out_dir.as_deref(), &config)?;
    let report = import_amazon(store.as_ref(), &data);

    if human {
        for error in &report.errors {
            eprintln!("{} {}", style("✗").red(), error);
        }
        if !global.quiet {
            print_summary(&report);
        }
    } else {
        let json = serde_json::to_string_pretty(&report).into_diagnostic()?;
        println!("{}", json);
    }

    if !report.errors.is_empty() {
        return Err(miette::miette!(
            "Import completed with {} error(s)",
            report.errors.len()
        ));
    }

    Ok(())
}

fn print_summary(report: &AmazonImportReport) {
    println!();
    println!("{}", style("─".repeat(50)).dim());
    println!("{}", style("Amazon Import Summary").bold());
    println!("{}", style("─".repeat(50)).dim());
    println!("  Items:            {}", style(report.total).cyan());
    println!("  Processed:        {}", style(report.processed).cyan());
    println!("  Products created: {}", style(report.created).green());
    if report.skipped > 0 {
        println!("  Skipped:          {}", style(report.skipped).dim());
    }
    if !report.errors.is_empty() {
        println!("  Errors:           {}", style(report.errors.len()).red());
    }
}
