//! Salaried (CLT) net income calculation.
//!
//! ## Annual projection
//!
//! - Twelve monthly salaries, each net of INSS and IRRF
//! - Twelve months of benefits
//! - The 13th salary: the same gross once more, taxed identically
//! - Vacation: one month is paid at `gross * 4/3` (the constitutional
//!   one-third bonus) and taxed on its own; only its increment over a
//!   normal month's net is added

use rust_decimal::Decimal;
use tracing::trace;

use crate::calculation::{calculate_inss, calculate_irrf};
use crate::config::TaxTables;
use crate::models::CltResult;

/// Net of INSS and IRRF for one payment of `gross`.
pub(crate) fn net_of_withholding(gross: Decimal, tables: &TaxTables) -> Decimal {
    let inss = calculate_inss(gross, tables);
    let irrf = calculate_irrf(gross, inss, tables);
    gross - inss - irrf
}

/// Gross of the vacation month including the one-third bonus.
pub fn vacation_gross(gross_salary: Decimal) -> Decimal {
    gross_salary + gross_salary / Decimal::from(3)
}

/// Calculates monthly and annual CLT net income against the given tables.
///
/// # Arguments
///
/// * `tables` - The fiscal year's tax tables
/// * `gross_salary` - Monthly gross salary (non-negative)
/// * `benefits` - Monthly untaxed benefits (non-negative)
///
/// # Examples
///
/// ```
/// use clt_pj_engine::calculation::calculate_clt_with;
/// use clt_pj_engine::config::TaxTables;
/// use rust_decimal::Decimal;
///
/// let result = calculate_clt_with(TaxTables::builtin(), Decimal::from(1518), Decimal::ZERO);
/// assert_eq!(result.irrf, Decimal::ZERO);
/// assert_eq!(result.net_salary, Decimal::from(1518) - result.inss);
/// ```
pub fn calculate_clt_with(tables: &TaxTables, gross_salary: Decimal, benefits: Decimal) -> CltResult {
    let inss = calculate_inss(gross_salary, tables);
    let irrf = calculate_irrf(gross_salary, inss, tables);
    let net_salary = gross_salary - inss - irrf;

    let net_total_monthly = net_salary + benefits;

    let net_13th = net_of_withholding(gross_salary, tables);
    let net_vacation = net_of_withholding(vacation_gross(gross_salary), tables);

    let months = Decimal::from(12);
    let total_yearly_net =
        net_salary * months + benefits * months + net_13th + (net_vacation - net_salary);

    trace!(
        gross_salary = %gross_salary,
        net_salary = %net_salary,
        total_yearly_net = %total_yearly_net,
        "CLT calculation"
    );

    CltResult {
        gross_salary,
        benefits,
        inss,
        irrf,
        net_salary,
        net_total_monthly,
        net_13th,
        net_vacation,
        total_yearly_net,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn clt(gross: &str, benefits: &str) -> CltResult {
        calculate_clt_with(TaxTables::builtin(), dec(gross), dec(benefits))
    }

    /// CLT-001: standard 10k salary
    #[test]
    fn test_standard_10k_salary() {
        let result = clt("10000", "0");

        assert_eq!(result.gross_salary, dec("10000"));
        assert_eq!(result.inss, dec("951.6344"));
        assert_eq!(result.irrf, dec("1592.30054"));
        assert_eq!(result.net_salary, dec("7456.06506"));
        assert!(result.inss > dec("900") && result.inss < dec("960"));
        assert!(result.irrf > dec("1000"));
        assert!(result.total_yearly_net > result.net_salary * dec("12"));
    }

    /// CLT-002: minimum wage is IRRF exempt
    #[test]
    fn test_minimum_wage_is_irrf_exempt() {
        let result = clt("1518", "0");

        assert_eq!(result.irrf, Decimal::ZERO);
        assert_eq!(result.net_salary, dec("1518") - result.inss);
    }

    /// CLT-003: INSS ceiling
    #[test]
    fn test_inss_ceiling_for_high_salaries() {
        let high = clt("15000", "0");
        let higher = clt("20000", "0");

        assert_eq!(high.inss, higher.inss);
    }

    #[test]
    fn test_benefits_add_to_monthly_and_yearly_totals() {
        let without = clt("8000", "0");
        let with = clt("8000", "1000");

        assert_eq!(with.net_salary, without.net_salary);
        assert_eq!(with.net_total_monthly, without.net_salary + dec("1000"));
        assert_eq!(with.total_yearly_net - without.total_yearly_net, dec("12000"));
    }

    #[test]
    fn test_13th_matches_monthly_net() {
        let result = clt("8000", "0");

        assert_eq!(result.net_13th, result.net_salary);
    }

    #[test]
    fn test_vacation_month_is_taxed_on_four_thirds() {
        let result = clt("6000", "0");
        let expected = net_of_withholding(dec("8000"), TaxTables::builtin());

        assert_eq!(result.net_vacation, expected);
        assert!(result.net_vacation > result.net_salary);
    }

    #[test]
    fn test_yearly_total_composition() {
        let result = clt("8000", "500");

        let expected = result.net_salary * dec("12")
            + dec("500") * dec("12")
            + result.net_13th
            + (result.net_vacation - result.net_salary);
        assert_eq!(result.total_yearly_net, expected);
    }

    #[test]
    fn test_zero_salary_yields_zero_everywhere() {
        let result = clt("0", "0");

        assert_eq!(result.inss, Decimal::ZERO);
        assert_eq!(result.irrf, Decimal::ZERO);
        assert_eq!(result.net_salary, Decimal::ZERO);
        assert_eq!(result.total_yearly_net, Decimal::ZERO);
    }

    #[test]
    fn test_same_inputs_give_identical_results() {
        assert_eq!(clt("12345.67", "890"), clt("12345.67", "890"));
    }
}
