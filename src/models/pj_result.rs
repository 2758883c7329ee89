//! Result model for a contractor (PJ) calculation under Simples Nacional.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The Simples Nacional annex a service company is taxed under.
///
/// # Example
///
/// ```
/// use clt_pj_engine::models::SimplesAnnex;
///
/// assert_eq!(SimplesAnnex::III.label(), "Simples Nacional (Anexo III)");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SimplesAnnex {
    /// Annex III, available when the Factor R payroll ratio is met.
    III,
    /// Annex V, the default for intellectual services below the Factor R ratio.
    V,
}

impl SimplesAnnex {
    /// Returns the human-readable tax model label.
    pub fn label(&self) -> &'static str {
        match self {
            SimplesAnnex::III => "Simples Nacional (Anexo III)",
            SimplesAnnex::V => "Simples Nacional (Anexo V)",
        }
    }
}

impl fmt::Display for SimplesAnnex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The outcome of a PJ calculation.
///
/// # Example
///
/// ```
/// use clt_pj_engine::calculate_pj;
/// use rust_decimal::Decimal;
///
/// let result = calculate_pj(Decimal::new(10000, 0), Decimal::new(300, 0));
/// assert!(result.tax_model.contains("Anexo III"));
/// assert_eq!(result.taxes, Decimal::new(600, 0));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PjResult {
    /// Monthly gross invoice.
    pub gross_invoice: Decimal,
    /// The annex selected by the Factor R rule.
    pub annex: SimplesAnnex,
    /// Label of the selected annex.
    pub tax_model: String,
    /// Payroll-to-revenue ratio achieved by the chosen pro-labore (zero without revenue).
    pub factor_r: Decimal,
    /// Effective Simples Nacional rate for the annualized revenue.
    pub effective_tax_rate: Decimal,
    /// Monthly Simples Nacional tax (DAS).
    pub taxes: Decimal,
    /// Monthly pro-labore drawn by the owner.
    pub pro_labore: Decimal,
    /// Flat-rate INSS withheld from the pro-labore.
    pub inss_pro_labore: Decimal,
    /// IRRF withheld from the pro-labore.
    pub irrf_pro_labore: Decimal,
    /// Fixed monthly company cost (accounting and any other fixed expense).
    pub accountant_cost: Decimal,
    /// Profit left in the company for tax-free distribution.
    pub company_profit: Decimal,
    /// Net pro-labore plus company profit.
    pub net_income: Decimal,
    /// Net income over twelve months.
    pub total_yearly_net: Decimal,
}

impl PjResult {
    /// Pro-labore after its own INSS and IRRF.
    pub fn net_pro_labore(&self) -> Decimal {
        self.pro_labore - self.inss_pro_labore - self.irrf_pro_labore
    }

    /// Annualized revenue used for the bracket lookup.
    pub fn annual_revenue(&self) -> Decimal {
        self.gross_invoice * Decimal::from(12)
    }
}
