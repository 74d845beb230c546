use std::fs::File;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Parser;
use rust_decimal::Decimal;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use estate_core::calculations::EstateTaxWorksheet;
use estate_core::models::{DeductionSnapshot, EstateSnapshot, HeirSnapshot, RuleTable};
use estate_core::rules::{RuleTableSet, statutory};
use estate_data::RuleTableLoader;

mod report;

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Estate tax calculator.
///
/// Builds the estate, heir, and deduction snapshots from the flags below,
/// selects the rule table in force on the date of death, runs the
/// calculation once, and prints the itemized result. All amounts are in
/// whole New Taiwan Dollars. The output is advisory only.
#[derive(Debug, Parser)]
#[command(name = "estate-tax", version)]
struct Cli {
    /// Assessed value of land and buildings.
    #[arg(long, default_value = "0")]
    real_estate: Decimal,

    /// Cash and bank savings.
    #[arg(long, default_value = "0")]
    cash: Decimal,

    /// Stocks, bonds, and other investments.
    #[arg(long, default_value = "0")]
    securities: Decimal,

    /// Any other declared assets.
    #[arg(long, default_value = "0")]
    other_assets: Decimal,

    /// Decedent died in the course of official duty (elevated exemption).
    #[arg(long)]
    duty_related_death: bool,

    /// A surviving spouse is an heir.
    #[arg(long)]
    spouse: bool,

    /// Number of surviving parents.
    #[arg(long, default_value_t = 0)]
    parents: u32,

    /// Number of adult lineal descendants.
    #[arg(long, default_value_t = 0)]
    adult_children: u32,

    /// Age of one minor lineal descendant; repeat per heir.
    #[arg(long = "minor-child-age", value_name = "AGE")]
    minor_child_ages: Vec<u8>,

    /// Number of dependent siblings (flat per-person deduction).
    #[arg(long, default_value_t = 0)]
    siblings: u32,

    /// Age of one minor dependent sibling; repeat per heir.
    #[arg(long = "minor-sibling-age", value_name = "AGE")]
    minor_sibling_ages: Vec<u8>,

    /// Number of dependent grandparents.
    #[arg(long, default_value_t = 0)]
    grandparents: u32,

    /// Number of heirs with a severe disability.
    #[arg(long, default_value_t = 0)]
    disabled_dependents: u32,

    /// Elect the flat statutory funeral deduction.
    #[arg(long)]
    funeral_standard: bool,

    /// Actual funeral cost, recorded with the declaration. Does not change
    /// the total; only the elected flat amount is deducted.
    #[arg(long, default_value = "0")]
    funeral_actual: Decimal,

    /// Debts of the decedent outstanding at death.
    #[arg(long, default_value = "0")]
    outstanding_debts: Decimal,

    /// Taxes due but unpaid at death.
    #[arg(long, default_value = "0")]
    unpaid_taxes: Decimal,

    /// Public facility reserved land value.
    #[arg(long, default_value = "0")]
    public_reserved_land: Decimal,

    /// Agricultural land value (in continued agricultural use).
    #[arg(long, default_value = "0")]
    agricultural_land: Decimal,

    /// Directory with rule_tables.csv and tax_brackets.csv; the built-in
    /// statutory table is used when omitted.
    #[arg(long, value_name = "DIR")]
    rules_dir: Option<PathBuf>,

    /// Date of death, used to select the rule table in force (ISO date).
    #[arg(long, value_name = "DATE")]
    date_of_death: Option<NaiveDate>,
}

impl Cli {
    fn estate(&self) -> EstateSnapshot {
        EstateSnapshot {
            real_estate_value: self.real_estate,
            cash_and_savings: self.cash,
            securities: self.securities,
            other_assets: self.other_assets,
            duty_related_death: self.duty_related_death,
        }
    }

    fn heirs(&self) -> HeirSnapshot {
        HeirSnapshot {
            has_spouse: self.spouse,
            parents_count: self.parents,
            adult_children_count: self.adult_children,
            minor_children_ages: self.minor_child_ages.clone(),
            siblings_count: self.siblings,
            minor_siblings_ages: self.minor_sibling_ages.clone(),
            grandparents_count: self.grandparents,
            disabled_dependents_count: self.disabled_dependents,
        }
    }

    fn deductions(&self) -> DeductionSnapshot {
        DeductionSnapshot {
            funeral_standard_elected: self.funeral_standard,
            funeral_expenses_actual: self.funeral_actual,
            outstanding_debts: self.outstanding_debts,
            unpaid_taxes: self.unpaid_taxes,
            public_reserved_land_value: self.public_reserved_land,
            agricultural_land_value: self.agricultural_land,
        }
    }
}

// ─── tracing ─────────────────────────────────────────────────────────────────

/// Initialise the tracing subscriber.
///
/// * Honours `RUST_LOG` when set.
/// * Falls back to `info` so normal runs are quiet.
/// * Strips timestamps and target names to keep CLI output clean.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::from("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .without_time()
        .with_target(false)
        .init();
}

// ─── rule table selection ────────────────────────────────────────────────────

fn load_rules(rules_dir: Option<&PathBuf>) -> Result<RuleTableSet> {
    match rules_dir {
        Some(dir) => {
            let tables_path = dir.join("rule_tables.csv");
            let brackets_path = dir.join("tax_brackets.csv");

            let tables_file = File::open(&tables_path)
                .with_context(|| format!("Failed to open: {}", tables_path.display()))?;
            let tables = RuleTableLoader::parse_tables(tables_file)
                .with_context(|| format!("Failed to parse CSV: {}", tables_path.display()))?;

            let brackets_file = File::open(&brackets_path)
                .with_context(|| format!("Failed to open: {}", brackets_path.display()))?;
            let brackets = RuleTableLoader::parse_brackets(brackets_file)
                .with_context(|| format!("Failed to parse CSV: {}", brackets_path.display()))?;

            RuleTableLoader::assemble(&tables, &brackets)
                .with_context(|| format!("Invalid rule data in {}", dir.display()))
        }
        None => RuleTableSet::new(vec![statutory::roc_year_114()])
            .context("built-in statutory table failed validation"),
    }
}

fn select_table<'a>(
    set: &'a RuleTableSet,
    date_of_death: Option<NaiveDate>,
) -> Result<&'a RuleTable> {
    match date_of_death {
        Some(date) => set.in_force_on(date).with_context(|| {
            format!("no rule table in force on {date}; earliest is {}",
                set.iter()
                    .map(|t| t.effective_from)
                    .min()
                    .map(|d| d.to_string())
                    .unwrap_or_default())
        }),
        None => Ok(set.latest()),
    }
}

// ─── entry point ─────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();

    let set = load_rules(cli.rules_dir.as_ref())?;
    let rules = select_table(&set, cli.date_of_death)?;
    debug!("using rule table effective {}", rules.effective_from);

    let worksheet = EstateTaxWorksheet::new(rules);
    let result = worksheet.calculate(&cli.estate(), &cli.heirs(), &cli.deductions())?;

    print!("{}", report::render(&result));

    Ok(())
}
