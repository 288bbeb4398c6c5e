// Console report: the formatted sections the analysis modes print.
use chrono::Utc;

use crate::analyzer::dcf::{DcfValuation, SensitivityGrid};
use crate::analyzer::historical::HistoricalMetrics;
use crate::analyzer::multiples::MultiplesValuation;
use crate::analyzer::synthesis::ValuationSummary;
use crate::model::{FinancialRecord, ProjectionRow};

fn millions(value: f64) -> f64 {
    value / 1e6
}

fn rule(width: usize) {
    println!("{}", "=".repeat(width));
}

fn section(title: &str) {
    println!();
    rule(60);
    println!("{title}");
    rule(60);
}

pub fn print_header() {
    println!("🚀 STARTUP VALUATION ANALYSIS");
    println!("DCF and Market Multiples Valuation");
    println!("Analysis Date: {}", Utc::now().format("%B %d, %Y"));
}

pub fn print_historical(history: &[FinancialRecord], metrics: &HistoricalMetrics) {
    section("HISTORICAL FINANCIAL ANALYSIS");
    let first_year = history.first().map(|r| r.year).unwrap_or_default();
    let last_year = history.last().map(|r| r.year).unwrap_or_default();
    println!(
        "Revenue CAGR ({first_year}-{last_year}): {:.1}%",
        metrics.revenue_cagr * 100.0
    );
    println!(
        "Average Revenue Growth: {:.1}%",
        metrics.avg_revenue_growth * 100.0
    );
    println!(
        "Average EBITDA Margin: {:.1}%",
        metrics.avg_ebitda_margin * 100.0
    );
    println!(
        "Average Gross Margin: {:.1}%",
        metrics.avg_gross_margin * 100.0
    );

    println!();
    println!("{:>6} {:>12} {:>12} {:>9} {:>8}", "Year", "Revenue $M", "EBITDA $M", "EBITDA%", "Gross%");
    for record in history {
        println!(
            "{:>6} {:>12.2} {:>12.2} {:>8.1}% {:>7.1}%",
            record.year,
            millions(record.revenue),
            millions(record.ebitda),
            record.ebitda_margin() * 100.0,
            record.gross_margin() * 100.0
        );
    }
}

pub fn print_projections(rows: &[ProjectionRow]) {
    section("FINANCIAL PROJECTIONS");
    println!("Projected Financial Statements (in $M):");
    println!(
        "{:>6} {:>9} {:>8} {:>8} {:>11} {:>7}",
        "Year", "Revenue", "EBITDA", "Margin", "Net Income", "FCF"
    );
    for row in rows {
        println!(
            "{:>6} {:>9.2} {:>8.2} {:>7.1}% {:>11.2} {:>7.2}",
            row.year,
            millions(row.revenue),
            millions(row.ebitda),
            row.ebitda_margin * 100.0,
            millions(row.net_income),
            millions(row.free_cash_flow)
        );
    }
}

pub fn print_dcf(dcf: &DcfValuation, grid: &SensitivityGrid) {
    section("DCF VALUATION ANALYSIS");
    println!("Cost of Equity (CAPM): {:.1}%", dcf.cost_of_equity * 100.0);
    println!("WACC: {:.1}%", dcf.wacc * 100.0);
    println!();
    println!("Cash Flow Valuation:");
    println!("PV of Projected FCF: ${:.1}M", millions(dcf.pv_fcf));
    println!(
        "PV of Terminal Value: ${:.1}M",
        millions(dcf.pv_terminal_value)
    );
    println!("Enterprise Value: ${:.1}M", millions(dcf.enterprise_value));
    println!("Equity Value: ${:.1}M", millions(dcf.equity_value));

    println!();
    println!("Sensitivity: Equity Value ($M), WACC (rows) x Terminal Growth (cols)");
    print!("{:>7}", "");
    for growth in &grid.growth_steps {
        print!("{:>7.2}%", growth * 100.0);
    }
    println!();
    for (i, wacc) in grid.wacc_steps.iter().enumerate() {
        print!("{:>6.2}%", wacc * 100.0);
        for cell in &grid.equity_values[i] {
            match cell {
                Some(value) => print!("{:>8.0}", millions(*value)),
                None => print!("{:>8}", "-"),
            }
        }
        println!();
    }
}

pub fn print_multiples(multiples: &MultiplesValuation) {
    section("MARKET MULTIPLES ANALYSIS");
    println!("Comparable Company Analysis:");
    for segment in &multiples.segments {
        println!();
        println!(
            "{} Companies (n={}, EV/EBITDA sample n={}):",
            segment.segment, segment.companies, segment.ebitda_sample
        );
        println!("Median EV/Revenue: {:.1}x", segment.ev_revenue_median);
        println!("Median EV/EBITDA: {:.1}x", segment.ev_ebitda_median);
    }
    println!();
    println!("Valuation Results (Enterprise Value in $M):");
    println!("{}", "-".repeat(50));
    for estimate in &multiples.estimates {
        println!("{}: ${:.1}M", estimate.label, millions(estimate.value));
    }
}

pub fn print_summary(summary: &ValuationSummary) {
    println!();
    rule(80);
    println!("COMPREHENSIVE VALUATION SUMMARY");
    rule(80);
    println!("DCF Valuation: ${:.1}M", millions(summary.dcf_value));
    println!();
    println!("Multiples Statistics:");
    println!("  Mean: ${:.1}M", millions(summary.multiples_mean));
    println!("  Median: ${:.1}M", millions(summary.multiples_median));
    println!(
        "  Range: ${:.1}M - ${:.1}M",
        millions(summary.multiples_min),
        millions(summary.multiples_max)
    );

    println!();
    rule(50);
    println!("FINAL VALUATION RECOMMENDATION");
    rule(50);
    println!(
        "Weighted Average Valuation: ${:.1}M",
        millions(summary.weighted_valuation)
    );
    println!(
        "  - DCF ({:.0}% weight): ${:.1}M",
        summary.dcf_weight * 100.0,
        millions(summary.dcf_value)
    );
    println!(
        "  - Market Multiples ({:.0}% weight): ${:.1}M",
        summary.multiples_weight * 100.0,
        millions(summary.multiples_median)
    );
    println!(
        "\nValuation Range: ${:.1}M - ${:.1}M",
        millions(summary.range_low),
        millions(summary.range_high)
    );
}

pub fn print_quick_summary(summary: &ValuationSummary) {
    section("QUICK SUMMARY");
    println!(
        "Final Valuation: ${:.1}M",
        millions(summary.weighted_valuation)
    );
    println!("DCF Value: ${:.1}M", millions(summary.dcf_value));
    println!(
        "Multiples Value: ${:.1}M",
        millions(summary.multiples_median)
    );
    println!(
        "Valuation Range: ${:.1}M - ${:.1}M",
        millions(summary.range_low),
        millions(summary.range_high)
    );
}
