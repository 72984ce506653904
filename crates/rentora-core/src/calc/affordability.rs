//! Tenant affordability calculator.

use serde::Serialize;
use std::fmt;

/// Share of net income a tenant is advised to spend on rent.
pub const RENT_SHARE: f64 = 0.30;

#[derive(Debug, Clone, PartialEq)]
pub struct AffordabilityInput {
    /// Net monthly income in minor units.
    pub net_monthly_income: u64,
    /// Fixed monthly obligations (loans, childcare) in minor units.
    pub monthly_obligations: u64,
    /// Rent to assess, if any.
    pub target_rent: Option<u64>,
}

/// Verdict on a target rent against the computed budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Affordability {
    Comfortable,
    Stretched,
    OverBudget,
}

impl fmt::Display for Affordability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Affordability::Comfortable => write!(f, "comfortable"),
            Affordability::Stretched => write!(f, "stretched"),
            Affordability::OverBudget => write!(f, "over budget"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AffordabilityReport {
    /// Advised rent ceiling: the income share, capped by what is left
    /// after obligations.
    pub recommended_budget: u64,
    /// Income remaining after fixed obligations.
    pub disposable_income: u64,
    /// Present when the input carried a target rent.
    pub verdict: Option<Affordability>,
}

/// Compute a rent budget and, when a target rent is given, a verdict.
///
/// A rent within the recommended budget is comfortable; one above the
/// budget but within disposable income is stretched; anything beyond
/// disposable income is over budget.
pub fn assess(input: &AffordabilityInput) -> AffordabilityReport {
    let disposable_income = input
        .net_monthly_income
        .saturating_sub(input.monthly_obligations);
    let income_share = (input.net_monthly_income as f64 * RENT_SHARE).floor() as u64;
    let recommended_budget = income_share.min(disposable_income);

    let verdict = input.target_rent.map(|rent| {
        if rent <= recommended_budget {
            Affordability::Comfortable
        } else if rent <= disposable_income {
            Affordability::Stretched
        } else {
            Affordability::OverBudget
        }
    });

    AffordabilityReport {
        recommended_budget,
        disposable_income,
        verdict,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_budget_is_income_share() {
        let report = assess(&AffordabilityInput {
            net_monthly_income: 300_000,
            monthly_obligations: 0,
            target_rent: None,
        });
        assert_eq!(report.recommended_budget, 90_000);
        assert_eq!(report.disposable_income, 300_000);
        assert_eq!(report.verdict, None);
    }

    #[test]
    fn test_budget_capped_by_disposable_income() {
        let report = assess(&AffordabilityInput {
            net_monthly_income: 300_000,
            monthly_obligations: 250_000,
            target_rent: None,
        });
        assert_eq!(
            report.recommended_budget, 50_000,
            "heavy obligations must cap the budget below the income share"
        );
    }

    #[test]
    fn test_obligations_above_income_leave_nothing() {
        let report = assess(&AffordabilityInput {
            net_monthly_income: 100_000,
            monthly_obligations: 150_000,
            target_rent: Some(50_000),
        });
        assert_eq!(report.disposable_income, 0);
        assert_eq!(report.recommended_budget, 0);
        assert_eq!(report.verdict, Some(Affordability::OverBudget));
    }

    #[test]
    fn test_verdict_comfortable() {
        let report = assess(&AffordabilityInput {
            net_monthly_income: 300_000,
            monthly_obligations: 50_000,
            target_rent: Some(80_000),
        });
        assert_eq!(report.verdict, Some(Affordability::Comfortable));
    }

    #[test]
    fn test_verdict_stretched_between_budget_and_disposable() {
        let report = assess(&AffordabilityInput {
            net_monthly_income: 300_000,
            monthly_obligations: 50_000,
            target_rent: Some(150_000),
        });
        assert_eq!(report.verdict, Some(Affordability::Stretched));
    }

    #[test]
    fn test_verdict_over_budget() {
        let report = assess(&AffordabilityInput {
            net_monthly_income: 300_000,
            monthly_obligations: 50_000,
            target_rent: Some(260_000),
        });
        assert_eq!(report.verdict, Some(Affordability::OverBudget));
    }

    #[test]
    fn test_zero_income() {
        let report = assess(&AffordabilityInput {
            net_monthly_income: 0,
            monthly_obligations: 0,
            target_rent: Some(1),
        });
        assert_eq!(report.recommended_budget, 0);
        assert_eq!(report.verdict, Some(Affordability::OverBudget));
    }
}
