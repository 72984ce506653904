//! Landlord earnings calculator.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq)]
pub struct EarningsInput {
    /// Advertised monthly rent in minor units.
    pub monthly_rent: u64,
    /// Expected occupancy, 0..=100. Out-of-range values are clamped.
    pub occupancy_pct: f64,
    /// Monthly running costs (insurance, maintenance) in minor units.
    pub monthly_outgoings: u64,
    /// Management fee as a percentage of collected rent, 0..=100.
    pub management_fee_pct: f64,
    /// Purchase value, enables the gross yield figure.
    pub property_value: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EarningsReport {
    /// Rent actually collected per month after occupancy.
    pub effective_monthly_rent: f64,
    /// Management fee per month, taken from collected rent.
    pub management_fee: f64,
    /// Monthly income after fee and outgoings. Negative when costs
    /// exceed collected rent.
    pub net_monthly: f64,
    pub gross_annual: f64,
    pub net_annual: f64,
    /// Gross annual rent over property value, as a percentage.
    pub gross_yield_pct: Option<f64>,
}

fn clamp_pct(pct: f64) -> f64 {
    if pct.is_nan() { 0.0 } else { pct.clamp(0.0, 100.0) }
}

/// Project monthly and annual earnings for a let.
pub fn project(input: &EarningsInput) -> EarningsReport {
    let occupancy = clamp_pct(input.occupancy_pct) / 100.0;
    let fee_rate = clamp_pct(input.management_fee_pct) / 100.0;

    let effective_monthly_rent = input.monthly_rent as f64 * occupancy;
    let management_fee = effective_monthly_rent * fee_rate;
    let net_monthly =
        effective_monthly_rent - management_fee - input.monthly_outgoings as f64;
    let gross_annual = effective_monthly_rent * 12.0;
    let net_annual = net_monthly * 12.0;

    let gross_yield_pct = input
        .property_value
        .filter(|value| *value > 0)
        .map(|value| gross_annual / value as f64 * 100.0);

    EarningsReport {
        effective_monthly_rent,
        management_fee,
        net_monthly,
        gross_annual,
        net_annual,
        gross_yield_pct,
    }
}
