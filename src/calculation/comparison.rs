//! CLT vs PJ comparison.
//!
//! Runs both calculators on their own offers, measures the difference in
//! take-home on a monthly and yearly basis, and finds the PJ invoice that
//! would match the CLT offer.

use tracing::debug;

use crate::calculation::{calculate_clt_with, calculate_pj_with, search_break_even};
use crate::config::TaxTables;
use crate::models::{Advantage, Comparison, ComparisonInput, ViewMode};

/// Compares a CLT offer against a PJ offer.
///
/// The PJ company's fixed cost is the accounting fee plus the health plan.
/// The monthly difference compares PJ net income with CLT salary plus
/// benefits; the yearly difference compares annual nets.
///
/// # Examples
///
/// ```
/// use clt_pj_engine::calculation::compare;
/// use clt_pj_engine::config::TaxTables;
/// use clt_pj_engine::models::{Advantage, ComparisonInput};
/// use rust_decimal::Decimal;
///
/// let input = ComparisonInput::new(Decimal::from(10000), Decimal::from(10000));
/// let comparison = compare(TaxTables::builtin(), &input);
/// assert_eq!(comparison.advantage, Advantage::Pj);
/// ```
pub fn compare(tables: &TaxTables, input: &ComparisonInput) -> Comparison {
    let fixed_costs = input.pj_fixed_costs();

    let clt = calculate_clt_with(tables, input.clt_gross, input.clt_benefits);
    let pj = calculate_pj_with(tables, input.pj_gross, fixed_costs);

    let monthly_difference = pj.net_income - clt.net_total_monthly;
    let yearly_difference = pj.total_yearly_net - clt.total_yearly_net;

    let difference = match input.view {
        ViewMode::Monthly => monthly_difference,
        ViewMode::Yearly => yearly_difference,
    };
    let advantage = Advantage::from_difference(difference);

    let break_even = search_break_even(tables, input.clt_gross, clt.total_yearly_net, fixed_costs);

    debug!(
        clt_gross = %input.clt_gross,
        pj_gross = %input.pj_gross,
        difference = %difference,
        advantage = ?advantage,
        "Comparison finished"
    );

    Comparison {
        clt,
        pj,
        view: input.view,
        monthly_difference,
        yearly_difference,
        difference,
        advantage,
        break_even,
    }
}
