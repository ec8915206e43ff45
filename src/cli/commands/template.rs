//! `cit template` command - Print a CSV template for product imports

use console::style;
use miette::Result;

use crate::cli::helpers::escape_csv;
use crate::cli::GlobalOpts;
use crate::entities::csv_product::columns;

/// Example values, one per known column
const EXAMPLE_ROW: [&str; 11] = [
    "batom-matte",
    "Batom Matte",
    "<p>Batom de longa duração</p>",
    "39,90",
    "49,90",
    "https://cdn.example.com/batom-matte.jpg",
    "Vermelho",
    "Vermelho; Nude",
    "Rosa",
    "10",
    "active",
];

/// Header line and example line of the template
pub fn template_lines() -> [String; 2] {
    let header: Vec<String> = columns::KNOWN.iter().map(|c| escape_csv(c)).collect();
    let example: Vec<String> = EXAMPLE_ROW.iter().map(|v| escape_csv(v)).collect();
    [header.join(","), example.join(",")]
}

pub fn run(global: &GlobalOpts) -> Result<()> {
    // Output to stdout (can be redirected to file)
    for line in template_lines() {
        println!("{}", line);
    }

    if !global.quiet {
        eprintln!();
        eprintln!(
            "{} Save as a .csv file and run: {}",
            style("Tip:").cyan(),
            style("cit import products.csv --dry-run").yellow()
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::import::parse_csv_text;

    #[test]
    fn test_template_parses_cleanly() {
        let text = template_lines().join("\n");
        let parsed = parse_csv_text(&text);

        assert!(parsed.success, "errors: {:?}", parsed.errors);
        assert_eq!(parsed.valid_rows, 1);
        assert_eq!(parsed.data[0].variant_price(), "39,90");
        assert_eq!(parsed.data[0].status(), Some("active"));
        assert_eq!(parsed.data[0].inventory_qty(), "10");
    }

    #[test]
    fn test_template_quotes_commas() {
        let [header, example] = template_lines();
        assert!(header.starts_with("Handle,Title,Body (HTML),Variant Price"));
        assert!(example.contains("\"39,90\""));
    }
}
