use std::fs::File;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use estate_data::RuleTableLoader;

/// Validate estate tax rule table data files.
///
/// Reads `rule_tables.csv` and `tax_brackets.csv` from the data directory,
/// joins them on effective date, runs the full set of configuration checks
/// (amounts non-negative, brackets ascending, final bracket unbounded), and
/// prints a summary per statutory period.
#[derive(Parser, Debug)]
#[command(name = "estate-rules-check")]
#[command(version, about, long_about = None)]
struct Args {
    /// Directory containing rule_tables.csv and tax_brackets.csv
    #[arg(short, long, default_value = "estate-data/data")]
    data_dir: PathBuf,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let tables_path = args.data_dir.join("rule_tables.csv");
    let brackets_path = args.data_dir.join("tax_brackets.csv");

    let tables_file = File::open(&tables_path)
        .with_context(|| format!("Failed to open: {}", tables_path.display()))?;
    let tables = RuleTableLoader::parse_tables(tables_file)
        .with_context(|| format!("Failed to parse CSV: {}", tables_path.display()))?;

    let brackets_file = File::open(&brackets_path)
        .with_context(|| format!("Failed to open: {}", brackets_path.display()))?;
    let brackets = RuleTableLoader::parse_brackets(brackets_file)
        .with_context(|| format!("Failed to parse CSV: {}", brackets_path.display()))?;

    println!(
        "Parsed {} rule table row(s) and {} bracket row(s)",
        tables.len(),
        brackets.len()
    );

    let set = RuleTableLoader::assemble(&tables, &brackets)
        .context("Rule table data failed validation")?;

    for table in set.iter() {
        let top_rate = table
            .brackets
            .last()
            .map(|b| b.rate.to_string())
            .unwrap_or_default();
        println!(
            "Effective {}: {} bracket(s), top rate {}, general exemption {}",
            table.effective_from,
            table.brackets.len(),
            top_rate,
            table.general_exemption
        );
    }

    println!("All rule tables are valid.");

    Ok(())
}
