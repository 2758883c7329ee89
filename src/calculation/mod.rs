//! Calculation logic for the CLT vs PJ engine.
//!
//! This module contains the tax primitives (progressive and bracket-deduction
//! lookups), the INSS and IRRF withholdings, Simples Nacional with the Factor R
//! strategy, the CLT and PJ calculators, the break-even search, the comparison
//! of two offers and the explanations behind each result.
//!
//! Every function takes the [`TaxTables`] it computes against. The functions
//! at this level without a `_with` suffix use the built-in 2025 tables.

mod bracket_deduction;
mod break_even;
mod clt;
mod comparison;
mod explain;
mod inss;
mod irrf;
mod pj;
mod progressive;
mod simples;

use rust_decimal::Decimal;

use crate::config::TaxTables;
use crate::models::{CltResult, PjResult};

pub use bracket_deduction::apply_bracket_deduction;
pub use break_even::{
    BREAK_EVEN_ITERATIONS, BREAK_EVEN_SEARCH_MULTIPLIER, find_break_even, search_break_even,
};
pub use clt::{calculate_clt_with, vacation_gross};
pub use comparison::compare;
pub use explain::{Explanation, explain_clt, explain_comparison, explain_pj};
pub use inss::{calculate_inss, calculate_pro_labore_inss};
pub use irrf::{DeductionMethod, IrrfComparison, calculate_irrf, compare_irrf_methods};
pub use pj::calculate_pj_with;
pub use progressive::progressive_tax;
pub use simples::{effective_rate, factor_r, factor_r_pro_labore, select_annex};

/// Calculates CLT net income against the built-in 2025 tables.
pub fn calculate_clt(gross_salary: Decimal, benefits: Decimal) -> CltResult {
    calculate_clt_with(TaxTables::builtin(), gross_salary, benefits)
}

/// Calculates PJ net income against the built-in 2025 tables.
pub fn calculate_pj(gross_invoice: Decimal, accountant_cost: Decimal) -> PjResult {
    calculate_pj_with(TaxTables::builtin(), gross_invoice, accountant_cost)
}

/// The monthly accounting fee assumed when a caller gives none.
pub fn default_accountant_cost() -> Decimal {
    TaxTables::builtin().simples().default_accountant_cost
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_shorthands_match_explicit_tables() {
        let gross = Decimal::new(9500, 0);

        assert_eq!(
            calculate_clt(gross, Decimal::ZERO),
            calculate_clt_with(TaxTables::builtin(), gross, Decimal::ZERO)
        );
        assert_eq!(
            calculate_pj(gross, default_accountant_cost()),
            calculate_pj_with(TaxTables::builtin(), gross, default_accountant_cost())
        );
    }

    #[test]
    fn test_default_accountant_cost() {
        assert_eq!(default_accountant_cost(), Decimal::new(300, 0));
    }
}
