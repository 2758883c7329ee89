//! Social-security (INSS) withholding.
//!
//! Employees contribute progressively on salary up to the contribution
//! ceiling. Company owners contribute a flat rate on their pro-labore,
//! capped at the same ceiling.

use rust_decimal::Decimal;

use crate::calculation::progressive_tax;
use crate::config::TaxTables;

/// Computes the employee INSS contribution on a monthly gross salary.
///
/// The gross is capped at the contribution ceiling before the progressive
/// brackets are applied, so every salary at or above the ceiling pays the
/// same maximum contribution.
///
/// # Examples
///
/// ```
/// use clt_pj_engine::calculation::calculate_inss;
/// use clt_pj_engine::config::TaxTables;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let tables = TaxTables::builtin();
/// let inss = calculate_inss(Decimal::from(1518), tables);
/// assert_eq!(inss, Decimal::from_str("113.85").unwrap());
/// ```
pub fn calculate_inss(gross: Decimal, tables: &TaxTables) -> Decimal {
    let base = gross.min(tables.constants().inss_ceiling);
    progressive_tax(base, tables.inss())
}

/// Computes the flat INSS withheld from an owner's pro-labore.
///
/// `min(pro_labore * rate, ceiling * rate)`; the progressive employee
/// brackets do not apply.
pub fn calculate_pro_labore_inss(pro_labore: Decimal, tables: &TaxTables) -> Decimal {
    let rate = tables.simples().pro_labore_inss_rate;
    let ceiling = tables.constants().inss_ceiling;
    (pro_labore * rate).min(ceiling * rate)
}
