//! Models for comparing a CLT offer against a PJ offer.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{CltResult, PjResult};

/// Which horizon a comparison verdict is based on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewMode {
    /// Compare monthly take-home (CLT salary plus benefits vs PJ net income).
    #[default]
    Monthly,
    /// Compare annualized take-home.
    Yearly,
}

/// Which regime comes out ahead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Advantage {
    /// The PJ offer nets more.
    Pj,
    /// The CLT offer nets more.
    Clt,
    /// Both offers net the same amount.
    Equivalent,
}

impl Advantage {
    /// Classifies a PJ-minus-CLT difference.
    pub fn from_difference(difference: Decimal) -> Self {
        if difference > Decimal::ZERO {
            Advantage::Pj
        } else if difference < Decimal::ZERO {
            Advantage::Clt
        } else {
            Advantage::Equivalent
        }
    }
}

/// Inputs for a CLT vs PJ comparison.
///
/// # Example
///
/// ```
/// use clt_pj_engine::models::{ComparisonInput, ViewMode};
/// use rust_decimal::Decimal;
///
/// let input = ComparisonInput::new(Decimal::new(8000, 0), Decimal::new(14000, 0));
/// assert_eq!(input.view, ViewMode::Monthly);
/// assert_eq!(input.accountant_cost, Decimal::new(300, 0));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonInput {
    /// CLT monthly gross salary.
    pub clt_gross: Decimal,
    /// CLT monthly benefits.
    pub clt_benefits: Decimal,
    /// PJ monthly gross invoice.
    pub pj_gross: Decimal,
    /// Monthly private health plan paid by the PJ company.
    pub pj_health_cost: Decimal,
    /// Monthly accounting fee paid by the PJ company.
    pub accountant_cost: Decimal,
    /// Horizon used for the verdict.
    pub view: ViewMode,
}

impl ComparisonInput {
    /// Creates an input with no benefits, no health cost and the default accounting fee.
    pub fn new(clt_gross: Decimal, pj_gross: Decimal) -> Self {
        Self {
            clt_gross,
            clt_benefits: Decimal::ZERO,
            pj_gross,
            pj_health_cost: Decimal::ZERO,
            accountant_cost: crate::calculation::default_accountant_cost(),
            view: ViewMode::Monthly,
        }
    }

    /// Fixed monthly cost carried by the PJ company.
    pub fn pj_fixed_costs(&self) -> Decimal {
        self.accountant_cost + self.pj_health_cost
    }
}

/// The outcome of a break-even search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakEvenResult {
    /// Monthly PJ invoice whose annual net matches the target.
    pub monthly_invoice: Decimal,
    /// Annual net income the search tried to match.
    pub target_yearly_net: Decimal,
    /// Upper bound of the searched interval (four times the CLT gross).
    pub search_upper_bound: Decimal,
    /// Number of bisection steps performed.
    pub iterations: u32,
    /// False when the target lies outside the searched interval.
    pub within_bounds: bool,
}

/// The outcome of comparing a CLT offer against a PJ offer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comparison {
    /// CLT side of the comparison.
    pub clt: CltResult,
    /// PJ side of the comparison.
    pub pj: PjResult,
    /// Horizon used for `difference` and `advantage`.
    pub view: ViewMode,
    /// PJ net income minus CLT net total per month.
    pub monthly_difference: Decimal,
    /// PJ annual net minus CLT annual net.
    pub yearly_difference: Decimal,
    /// The difference for the selected view.
    pub difference: Decimal,
    /// Which regime comes out ahead for the selected view.
    pub advantage: Advantage,
    /// PJ invoice needed to match the CLT annual net.
    pub break_even: BreakEvenResult,
}
