//! Income-tax (IRRF) withholding.
//!
//! Two deduction methods are legally available at source. The legal
//! method subtracts the INSS contribution from the gross; the simplified
//! method subtracts a fixed discount instead. The taxpayer is withheld
//! the cheaper of the two, never less than zero.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::apply_bracket_deduction;
use crate::config::TaxTables;

/// The deduction method that produced the withholding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeductionMethod {
    /// Gross minus the social-security contribution.
    Legal,
    /// Gross minus the fixed simplified discount.
    Simplified,
}

/// Both IRRF evaluations and the withholding chosen from them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IrrfComparison {
    /// Base of the legal method (`gross - inss`).
    pub legal_base: Decimal,
    /// Tax under the legal method, before flooring.
    pub legal_tax: Decimal,
    /// Base of the simplified method (`gross - discount`).
    pub simplified_base: Decimal,
    /// Tax under the simplified method, before flooring.
    pub simplified_tax: Decimal,
    /// The cheaper method. Ties go to the legal method.
    pub method: DeductionMethod,
    /// `max(0, min(legal_tax, simplified_tax))`.
    pub withholding: Decimal,
}

/// Evaluates both deduction methods for a gross amount.
///
/// # Examples
///
/// ```
/// use clt_pj_engine::calculation::{DeductionMethod, compare_irrf_methods};
/// use clt_pj_engine::config::TaxTables;
/// use rust_decimal::Decimal;
///
/// let tables = TaxTables::builtin();
/// let comparison = compare_irrf_methods(Decimal::from(1518), Decimal::new(11385, 2), tables);
/// assert_eq!(comparison.withholding, Decimal::ZERO);
/// assert_eq!(comparison.method, DeductionMethod::Legal);
/// ```
pub fn compare_irrf_methods(gross: Decimal, inss: Decimal, tables: &TaxTables) -> IrrfComparison {
    let legal_base = gross - inss;
    let legal_tax = apply_bracket_deduction(legal_base, tables.irrf());

    let simplified_base = gross - tables.constants().irrf_simplified_discount;
    let simplified_tax = apply_bracket_deduction(simplified_base, tables.irrf());

    let (method, cheaper) = if legal_tax <= simplified_tax {
        (DeductionMethod::Legal, legal_tax)
    } else {
        (DeductionMethod::Simplified, simplified_tax)
    };

    IrrfComparison {
        legal_base,
        legal_tax,
        simplified_base,
        simplified_tax,
        method,
        withholding: cheaper.max(Decimal::ZERO),
    }
}

/// Computes the IRRF withheld from a monthly gross.
///
/// `inss` is the social-security amount already withheld from the same
/// gross; it is the deduction used by the legal method.
pub fn calculate_irrf(gross: Decimal, inss: Decimal, tables: &TaxTables) -> Decimal {
    compare_irrf_methods(gross, inss, tables).withholding
}
