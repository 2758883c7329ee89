//! Break-even invoice search.
//!
//! Finds the monthly PJ invoice whose annual net income matches a CLT
//! annual net by bisection over `[0, 4 * clt_gross]`. The iteration count
//! alone bounds precision: after 20 halvings the interval is
//! `clt_gross * 4 / 2^20` wide. PJ annual net is non-decreasing in the
//! invoice, which is what makes bisection valid.

use rust_decimal::Decimal;
use tracing::debug;

use crate::calculation::calculate_pj_with;
use crate::config::TaxTables;
use crate::models::BreakEvenResult;

/// Number of bisection steps performed by the search.
pub const BREAK_EVEN_ITERATIONS: u32 = 20;

/// The search interval's upper bound as a multiple of the CLT gross.
pub const BREAK_EVEN_SEARCH_MULTIPLIER: Decimal = Decimal::from_parts(4, 0, 0, false, 0);

/// Searches for the break-even invoice and reports how the search went.
///
/// # Arguments
///
/// * `tables` - The fiscal year's tax tables
/// * `clt_gross` - CLT monthly gross; sizes the search interval
/// * `target_yearly_net` - CLT annual net income to match
/// * `pj_fixed_costs` - Fixed monthly PJ cost passed to the PJ calculator
///
/// A non-positive `clt_gross` leaves no interval to search; the result is
/// zero and `within_bounds` is false.
///
/// # Examples
///
/// ```
/// use clt_pj_engine::calculation::{calculate_clt_with, calculate_pj_with, search_break_even};
/// use clt_pj_engine::config::TaxTables;
/// use rust_decimal::Decimal;
///
/// let tables = TaxTables::builtin();
/// let clt = calculate_clt_with(tables, Decimal::from(8000), Decimal::ZERO);
/// let search = search_break_even(tables, Decimal::from(8000), clt.total_yearly_net, Decimal::from(300));
///
/// let pj = calculate_pj_with(tables, search.monthly_invoice, Decimal::from(300));
/// assert!((pj.total_yearly_net - clt.total_yearly_net).abs() <= Decimal::ONE);
/// assert!(search.within_bounds);
/// ```
pub fn search_break_even(
    tables: &TaxTables,
    clt_gross: Decimal,
    target_yearly_net: Decimal,
    pj_fixed_costs: Decimal,
) -> BreakEvenResult {
    if clt_gross <= Decimal::ZERO {
        debug!(clt_gross = %clt_gross, "Break-even search skipped: empty interval");
        return BreakEvenResult {
            monthly_invoice: Decimal::ZERO,
            target_yearly_net,
            search_upper_bound: Decimal::ZERO,
            iterations: 0,
            within_bounds: false,
        };
    }

    let yearly_net_at = |invoice: Decimal| {
        calculate_pj_with(tables, invoice, pj_fixed_costs).total_yearly_net
    };

    let upper_bound = clt_gross * BREAK_EVEN_SEARCH_MULTIPLIER;
    let within_bounds = yearly_net_at(Decimal::ZERO) <= target_yearly_net
        && target_yearly_net <= yearly_net_at(upper_bound);

    let mut low = Decimal::ZERO;
    let mut high = upper_bound;
    let mut estimate = Decimal::ZERO;

    for _ in 0..BREAK_EVEN_ITERATIONS {
        estimate = (low + high) / Decimal::TWO;
        if yearly_net_at(estimate) < target_yearly_net {
            low = estimate;
        } else {
            high = estimate;
        }
    }

    debug!(
        clt_gross = %clt_gross,
        target_yearly_net = %target_yearly_net,
        monthly_invoice = %estimate,
        within_bounds,
        "Break-even search finished"
    );

    BreakEvenResult {
        monthly_invoice: estimate,
        target_yearly_net,
        search_upper_bound: upper_bound,
        iterations: BREAK_EVEN_ITERATIONS,
        within_bounds,
    }
}

/// Returns the monthly PJ invoice that matches a CLT annual net.
///
/// Shorthand for [`search_break_even`] when only the estimate matters.
pub fn find_break_even(
    tables: &TaxTables,
    clt_gross: Decimal,
    target_yearly_net: Decimal,
    pj_fixed_costs: Decimal,
) -> Decimal {
    search_break_even(tables, clt_gross, target_yearly_net, pj_fixed_costs).monthly_invoice
}
