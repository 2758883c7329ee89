//! Simples Nacional rate lookup and the Factor R strategy.
//!
//! ## Effective rate
//!
//! The annex tables list a nominal rate and a deduction per revenue
//! bracket. The rate actually paid on the whole revenue is
//! `(RBT12 * nominal - deduction) / RBT12`, where RBT12 is the trailing
//! twelve-month revenue.
//!
//! ## Factor R
//!
//! A service company qualifies for the cheaper Annex III when its payroll
//! (the owner's pro-labore) is at least 28% of revenue; otherwise it falls
//! in Annex V. The strategy modeled here pays the owner exactly that share,
//! but never less than the minimum wage.

use rust_decimal::Decimal;

use crate::calculation::apply_bracket_deduction;
use crate::config::TaxTables;
use crate::models::{BracketTable, SimplesAnnex};

/// Computes the effective Simples Nacional rate for an annual revenue.
///
/// Zero or negative revenue has no meaningful rate and yields zero.
///
/// # Examples
///
/// ```
/// use clt_pj_engine::calculation::effective_rate;
/// use clt_pj_engine::config::TaxTables;
/// use clt_pj_engine::models::SimplesAnnex;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let annex_iii = TaxTables::builtin().annex_table(SimplesAnnex::III);
///
/// assert_eq!(effective_rate(Decimal::from(120000), annex_iii), Decimal::from_str("0.06").unwrap());
/// assert_eq!(effective_rate(Decimal::from(360000), annex_iii), Decimal::from_str("0.086").unwrap());
/// assert_eq!(effective_rate(Decimal::ZERO, annex_iii), Decimal::ZERO);
/// ```
pub fn effective_rate(annual_revenue: Decimal, table: &BracketTable) -> Decimal {
    if annual_revenue <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    apply_bracket_deduction(annual_revenue, table) / annual_revenue
}

/// Returns the pro-labore the Factor R strategy pays for a monthly invoice.
///
/// `max(gross * threshold, minimum_wage)`.
pub fn factor_r_pro_labore(gross_invoice: Decimal, tables: &TaxTables) -> Decimal {
    let ideal = gross_invoice * tables.simples().factor_r_threshold;
    ideal.max(tables.constants().minimum_wage)
}

/// Returns the payroll-to-revenue ratio, or zero when there is no revenue.
pub fn factor_r(pro_labore: Decimal, gross_invoice: Decimal) -> Decimal {
    if gross_invoice <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    pro_labore / gross_invoice
}

/// Selects the annex a company is taxed under.
///
/// Annex III applies when `pro_labore >= gross_invoice * threshold`. The
/// comparison is done on the product rather than the ratio so a pro-labore
/// computed as exactly `gross * threshold` always qualifies. Without revenue
/// any pro-labore meets the ratio.
///
/// # Examples
///
/// ```
/// use clt_pj_engine::calculation::select_annex;
/// use clt_pj_engine::config::TaxTables;
/// use clt_pj_engine::models::SimplesAnnex;
/// use rust_decimal::Decimal;
///
/// let tables = TaxTables::builtin();
/// assert_eq!(select_annex(Decimal::from(2800), Decimal::from(10000), tables), SimplesAnnex::III);
/// assert_eq!(select_annex(Decimal::from(1518), Decimal::from(10000), tables), SimplesAnnex::V);
/// ```
pub fn select_annex(pro_labore: Decimal, gross_invoice: Decimal, tables: &TaxTables) -> SimplesAnnex {
    let required = gross_invoice * tables.simples().factor_r_threshold;
    if pro_labore >= required {
        SimplesAnnex::III
    } else {
        SimplesAnnex::V
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn tables() -> &'static TaxTables {
        TaxTables::builtin()
    }

    #[test]
    fn test_first_bracket_effective_rate_equals_nominal() {
        let rate = effective_rate(dec("180000"), tables().annex_table(SimplesAnnex::III));

        assert_eq!(rate, dec("0.06"));
    }

    #[test]
    fn test_effective_rate_grows_inside_second_bracket() {
        let annex_iii = tables().annex_table(SimplesAnnex::III);
        let low = effective_rate(dec("200000"), annex_iii);
        let high = effective_rate(dec("350000"), annex_iii);

        assert!(low > dec("0.06"));
        assert!(high > low);
        assert!(high < dec("0.112"));
    }

    #[test]
    fn test_effective_rate_is_continuous_across_brackets() {
        let annex_iii = tables().annex_table(SimplesAnnex::III);
        let at_limit = effective_rate(dec("180000"), annex_iii) * dec("180000");
        let above = effective_rate(dec("180000.01"), annex_iii) * dec("180000.01");

        assert!((above - at_limit).abs() < dec("0.01"));
    }

    #[test]
    fn test_revenue_beyond_last_limit_uses_top_bracket() {
        let rate = effective_rate(dec("6000000"), tables().annex_table(SimplesAnnex::III));

        // (6000000 * 0.33 - 648000) / 6000000
        assert_eq!(rate, dec("0.222"));
    }

    #[test]
    fn test_annex_v_is_more_expensive_than_annex_iii() {
        for revenue in ["120000", "300000", "700000", "2000000"] {
            let revenue = dec(revenue);
            let iii = effective_rate(revenue, tables().annex_table(SimplesAnnex::III));
            let v = effective_rate(revenue, tables().annex_table(SimplesAnnex::V));
            assert!(v > iii, "annex V not above III at {}", revenue);
        }
    }

    #[test]
    fn test_zero_revenue_has_zero_rate() {
        assert_eq!(
            effective_rate(Decimal::ZERO, tables().annex_table(SimplesAnnex::V)),
            Decimal::ZERO
        );
    }

    #[test]
    fn test_pro_labore_is_28_percent_of_invoice() {
        assert_eq!(factor_r_pro_labore(dec("10000"), tables()), dec("2800"));
    }

    #[test]
    fn test_pro_labore_never_below_minimum_wage() {
        assert_eq!(factor_r_pro_labore(dec("2000"), tables()), dec("1518"));
        assert_eq!(factor_r_pro_labore(Decimal::ZERO, tables()), dec("1518"));
    }

    #[test]
    fn test_factor_r_pro_labore_always_selects_annex_iii() {
        for gross in ["0", "1", "2000", "5421.43", "7680.7123456789", "10000", "400000"] {
            let gross = dec(gross);
            let pro_labore = factor_r_pro_labore(gross, tables());
            assert_eq!(select_annex(pro_labore, gross, tables()), SimplesAnnex::III);
        }
    }

    #[test]
    fn test_factor_r_ratio() {
        assert_eq!(factor_r(dec("2800"), dec("10000")), dec("0.28"));
        assert_eq!(factor_r(dec("1518"), Decimal::ZERO), Decimal::ZERO);
    }
}
