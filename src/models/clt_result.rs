//! Result model for a salaried (CLT) calculation.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The outcome of a CLT calculation.
///
/// Every field is derived from the same gross salary and benefits; a
/// calculation with identical inputs always yields an identical value.
///
/// # Example
///
/// ```
/// use clt_pj_engine::calculate_clt;
/// use rust_decimal::Decimal;
///
/// let result = calculate_clt(Decimal::new(10000, 0), Decimal::ZERO);
/// assert_eq!(result.net_salary, result.gross_salary - result.inss - result.irrf);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CltResult {
    /// Monthly gross salary.
    pub gross_salary: Decimal,
    /// Monthly untaxed benefits (meal vouchers, health plan, ...).
    pub benefits: Decimal,
    /// Progressive social-security withholding.
    pub inss: Decimal,
    /// Income-tax withholding (cheaper of legal and simplified methods).
    pub irrf: Decimal,
    /// Gross salary minus INSS and IRRF.
    pub net_salary: Decimal,
    /// Net salary plus benefits.
    pub net_total_monthly: Decimal,
    /// Net value of the 13th-salary payment.
    pub net_13th: Decimal,
    /// Net value of the vacation month, including the one-third bonus.
    pub net_vacation: Decimal,
    /// Annualized net: twelve salaries and benefits, the 13th and the vacation bonus increment.
    pub total_yearly_net: Decimal,
}

impl CltResult {
    /// Total withheld from the monthly salary.
    pub fn total_withholding(&self) -> Decimal {
        self.inss + self.irrf
    }
}
