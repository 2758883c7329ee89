//! Contractor (PJ) net income calculation under Simples Nacional.
//!
//! The company invoices `gross`, pays the Simples Nacional tax (DAS) on it,
//! pays the owner a Factor R pro-labore and its fixed costs, and distributes
//! what is left as tax-free profit. The owner's net is the pro-labore after
//! its own withholding plus that profit.

use rust_decimal::Decimal;
use tracing::trace;

use crate::calculation::{
    calculate_irrf, calculate_pro_labore_inss, effective_rate, factor_r, factor_r_pro_labore,
    select_annex,
};
use crate::config::TaxTables;
use crate::models::PjResult;

/// Calculates monthly and annual PJ net income against the given tables.
///
/// # Arguments
///
/// * `tables` - The fiscal year's tax tables
/// * `gross_invoice` - Monthly gross invoice (non-negative)
/// * `accountant_cost` - Fixed monthly company cost (non-negative)
///
/// # Examples
///
/// ```
/// use clt_pj_engine::calculation::calculate_pj_with;
/// use clt_pj_engine::config::TaxTables;
/// use clt_pj_engine::models::SimplesAnnex;
/// use rust_decimal::Decimal;
///
/// let result = calculate_pj_with(TaxTables::builtin(), Decimal::from(10000), Decimal::from(300));
/// assert_eq!(result.annex, SimplesAnnex::III);
/// assert_eq!(result.pro_labore, Decimal::from(2800));
/// assert_eq!(result.net_income, Decimal::from(8792));
/// ```
pub fn calculate_pj_with(
    tables: &TaxTables,
    gross_invoice: Decimal,
    accountant_cost: Decimal,
) -> PjResult {
    let annual_revenue = gross_invoice * Decimal::from(12);

    let pro_labore = factor_r_pro_labore(gross_invoice, tables);
    let annex = select_annex(pro_labore, gross_invoice, tables);

    let effective_tax_rate = effective_rate(annual_revenue, tables.annex_table(annex));
    let taxes = gross_invoice * effective_tax_rate;

    let inss_pro_labore = calculate_pro_labore_inss(pro_labore, tables);
    let irrf_pro_labore = calculate_irrf(pro_labore, inss_pro_labore, tables);
    let net_pro_labore = pro_labore - inss_pro_labore - irrf_pro_labore;

    let company_profit = gross_invoice - taxes - accountant_cost - pro_labore;

    let net_income = net_pro_labore + company_profit;
    let total_yearly_net = net_income * Decimal::from(12);

    trace!(
        gross_invoice = %gross_invoice,
        annex = %annex,
        effective_tax_rate = %effective_tax_rate,
        net_income = %net_income,
        "PJ calculation"
    );

    PjResult {
        gross_invoice,
        annex,
        tax_model: annex.label().to_string(),
        factor_r: factor_r(pro_labore, gross_invoice),
        effective_tax_rate,
        taxes,
        pro_labore,
        inss_pro_labore,
        irrf_pro_labore,
        accountant_cost,
        company_profit,
        net_income,
        total_yearly_net,
    }
}
