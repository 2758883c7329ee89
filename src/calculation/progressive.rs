//! Slice-by-slice progressive tax accumulation.
//!
//! Each bracket's rate applies only to the part of the base that falls
//! between the previous bracket's upper limit and its own. This is how the
//! employee INSS contribution is computed.

use rust_decimal::Decimal;

use crate::models::BracketTable;

/// Sums the tax owed on `base` slice by slice across `table`.
///
/// A base below the first limit is taxed entirely at the first rate. A
/// non-positive base owes nothing. Deductions are ignored; the progressive
/// shape comes from the slices themselves.
///
/// # Examples
///
/// ```
/// use clt_pj_engine::calculation::progressive_tax;
/// use clt_pj_engine::models::{Bracket, BracketTable};
/// use rust_decimal::Decimal;
///
/// let table = BracketTable::new(vec![
///     Bracket::bounded(Decimal::new(1000, 0), Decimal::new(10, 2), Decimal::ZERO),
///     Bracket::unbounded(Decimal::new(20, 2), Decimal::ZERO),
/// ])
/// .unwrap();
///
/// // 1000 * 10% + 500 * 20%
/// assert_eq!(progressive_tax(Decimal::new(1500, 0), &table), Decimal::new(200, 0));
/// ```
pub fn progressive_tax(base: Decimal, table: &BracketTable) -> Decimal {
    let mut tax = Decimal::ZERO;
    let mut previous_limit = Decimal::ZERO;

    for bracket in table.brackets() {
        if base <= previous_limit {
            break;
        }

        let slice_top = match bracket.upper_limit {
            Some(limit) => base.min(limit),
            None => base,
        };
        tax += (slice_top - previous_limit) * bracket.rate;

        match bracket.upper_limit {
            Some(limit) => previous_limit = limit,
            None => break,
        }
    }

    tax
}
