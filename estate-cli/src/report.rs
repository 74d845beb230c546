//! Plain-text rendering of a calculation result.
//!
//! Breakdown list ordering comes from the engine and is preserved as
//! emitted; the numbers are printed as-is, never re-derived.

use rust_decimal::Decimal;

use estate_core::models::TaxResult;

/// Formats a whole-unit amount with thousands separators.
fn format_amount(value: Decimal) -> String {
    let text = value.to_string();
    let (sign, digits) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text.as_str()),
    };
    let (whole, fraction) = match digits.split_once('.') {
        Some((w, f)) => (w, Some(f)),
        None => (digits, None),
    };

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    match fraction {
        Some(f) => format!("{sign}{grouped}.{f}"),
        None => format!("{sign}{grouped}"),
    }
}

/// Formats a fractional rate as a percentage (0.15 -> "15%").
fn format_rate(rate: Decimal) -> String {
    format!("{}%", (rate * Decimal::ONE_HUNDRED).normalize())
}

/// Renders the full itemized report.
pub fn render(result: &TaxResult) -> String {
    let mut out = String::new();

    out.push_str("Estate tax calculation\n");
    out.push_str("======================\n\n");

    out.push_str(&format!(
        "Gross estate value:     {}\n\n",
        format_amount(result.total_estate_value)
    ));

    out.push_str("Exemption\n");
    for item in &result.exemption_details {
        out.push_str(&format!(
            "  {:<50} {}\n",
            item.label,
            format_amount(item.amount)
        ));
    }

    out.push_str("\nDeductions\n");
    if result.deduction_details.is_empty() {
        out.push_str("  (none)\n");
    }
    for item in &result.deduction_details {
        out.push_str(&format!(
            "  {:<50} {}\n",
            item.label,
            format_amount(item.amount)
        ));
    }
    out.push_str(&format!(
        "  {:<50} {}\n",
        "Total deductions",
        format_amount(result.deduction_amount)
    ));

    out.push_str(&format!(
        "\nTaxable estate value:   {}\n",
        format_amount(result.taxable_estate_value)
    ));
    out.push_str(&format!(
        "Tax bracket rate:       {}\n",
        format_rate(result.tax_bracket_rate)
    ));
    out.push_str(&format!(
        "Progressive difference: {}\n",
        format_amount(result.progressive_difference)
    ));
    out.push_str(&format!(
        "\nFinal tax payable:      {}\n",
        format_amount(result.final_tax_payable)
    ));

    out
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use estate_core::calculations::EstateTaxWorksheet;
    use estate_core::models::{DeductionSnapshot, EstateSnapshot, HeirSnapshot};
    use estate_core::rules::statutory::roc_year_114;

    use super::*;

    #[test]
    fn format_amount_groups_thousands() {
        assert_eq!(format_amount(dec!(0)), "0");
        assert_eq!(format_amount(dec!(999)), "999");
        assert_eq!(format_amount(dec!(1000)), "1,000");
        assert_eq!(format_amount(dec!(13330000)), "13,330,000");
        assert_eq!(format_amount(dec!(100000000)), "100,000,000");
    }

    #[test]
    fn format_rate_drops_trailing_zeroes() {
        assert_eq!(format_rate(dec!(0.10)), "10%");
        assert_eq!(format_rate(dec!(0.15)), "15%");
        assert_eq!(format_rate(dec!(0.20)), "20%");
    }

    #[test]
    fn render_preserves_breakdown_order() {
        let rules = roc_year_114();
        let worksheet = EstateTaxWorksheet::new(&rules);
        let result = worksheet
            .calculate(
                &EstateSnapshot {
                    cash_and_savings: dec!(100_000_000),
                    ..Default::default()
                },
                &HeirSnapshot {
                    has_spouse: true,
                    parents_count: 1,
                    ..Default::default()
                },
                &DeductionSnapshot {
                    funeral_standard_elected: true,
                    ..Default::default()
                },
            )
            .unwrap();

        let report = render(&result);

        let spouse = report.find("Spouse deduction").unwrap();
        let parents = report.find("Parents deduction (1)").unwrap();
        let funeral = report.find("Funeral expenses deduction").unwrap();
        assert!(spouse < parents && parents < funeral);
        assert!(report.contains("General exemption"));
        assert!(report.contains("100,000,000"));
    }
}
