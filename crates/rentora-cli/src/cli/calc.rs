//! Tenant and landlord calculators (`rentora calc`).
//!
//! Pure arithmetic commands: no storage is opened and nothing persists.

use anyhow::{Result, anyhow};
use console::style;

use rentora_core::calc::affordability::{self, Affordability, AffordabilityInput};
use rentora_core::calc::earnings::{self, EarningsInput};
use rentora_core::wizard::assembler::format_money;

use super::money::parse_money;

/// `rentora calc affordability` -- what rent fits a tenant's budget.
pub fn run_affordability(
    income: &str,
    obligations: &str,
    target_rent: Option<&str>,
    json: bool,
) -> Result<()> {
    let input = AffordabilityInput {
        net_monthly_income: parse_money(income).map_err(|e| anyhow!(e))?,
        monthly_obligations: parse_money(obligations).map_err(|e| anyhow!(e))?,
        target_rent: target_rent
            .map(|raw| parse_money(raw).map_err(|e| anyhow!(e)))
            .transpose()?,
    };
    let report = affordability::assess(&input);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!();
    println!(
        "  {}  {}",
        style("Recommended budget:").bold(),
        format_money(report.recommended_budget)
    );
    println!(
        "  {}   {}",
        style("Disposable income:").bold(),
        format_money(report.disposable_income)
    );
    if let Some(verdict) = report.verdict {
        let styled = match verdict {
            Affordability::Comfortable => style(verdict.to_string()).green(),
            Affordability::Stretched => style(verdict.to_string()).yellow(),
            Affordability::OverBudget => style(verdict.to_string()).red(),
        };
        println!("  {}             {}", style("Verdict:").bold(), styled);
    }
    println!();

    Ok(())
}

/// `rentora calc earnings` -- projected landlord income for a listing.
pub fn run_earnings(
    rent: &str,
    occupancy: f64,
    outgoings: &str,
    fee: f64,
    value: Option<&str>,
    json: bool,
) -> Result<()> {
    let input = EarningsInput {
        monthly_rent: parse_money(rent).map_err(|e| anyhow!(e))?,
        occupancy_pct: occupancy,
        monthly_outgoings: parse_money(outgoings).map_err(|e| anyhow!(e))?,
        management_fee_pct: fee,
        property_value: value
            .map(|raw| parse_money(raw).map_err(|e| anyhow!(e)))
            .transpose()?,
    };
    let report = earnings::project(&input);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!();
    println!(
        "  {}  {}",
        style("Effective rent:").bold(),
        format_money_f64(report.effective_monthly_rent)
    );
    println!(
        "  {}  {}",
        style("Management fee:").bold(),
        format_money_f64(report.management_fee)
    );
    let net = format_money_f64(report.net_monthly);
    let net_styled = if report.net_monthly < 0.0 {
        style(net).red()
    } else {
        style(net).green()
    };
    println!("  {}     {}", style("Net monthly:").bold(), net_styled);
    println!();
    println!(
        "  {}    {}",
        style("Gross annual:").bold(),
        format_money_f64(report.gross_annual)
    );
    println!(
        "  {}      {}",
        style("Net annual:").bold(),
        format_money_f64(report.net_annual)
    );
    if let Some(yield_pct) = report.gross_yield_pct {
        println!("  {}     {:.1}%", style("Gross yield:").bold(), yield_pct);
    }
    println!();

    Ok(())
}

// --- Formatting helpers ---

/// Format a fractional minor-unit amount (projections can land between
/// pence, and net figures can go negative).
fn format_money_f64(minor: f64) -> String {
    format!("{:.2}", minor / 100.0)
}
