//! Single-bracket rate-and-deduction evaluation.
//!
//! Income tax and Simples Nacional publish their progressive schedules in
//! closed form: find the bracket the base falls in, multiply by its rate
//! and subtract its flat deduction. The deduction makes the result equal
//! to a slice-by-slice accumulation without walking the lower brackets.

use rust_decimal::Decimal;

use crate::models::BracketTable;

/// Evaluates `base * rate - deduction` for the bracket covering `base`.
///
/// The result is not floored; callers decide how to treat a negative value.
///
/// # Examples
///
/// ```
/// use clt_pj_engine::calculation::apply_bracket_deduction;
/// use clt_pj_engine::config::TaxTables;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let irrf = TaxTables::builtin().irrf();
///
/// // 3000 falls in the 15% bracket with a 381.44 deduction.
/// let tax = apply_bracket_deduction(Decimal::from(3000), irrf);
/// assert_eq!(tax, Decimal::from_str("68.56").unwrap());
/// ```
pub fn apply_bracket_deduction(base: Decimal, table: &BracketTable) -> Decimal {
    let bracket = table.bracket_for(base);
    base * bracket.rate - bracket.deduction
}
