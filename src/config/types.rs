//! Configuration types for the tax tables.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files, plus the built-in
//! fiscal-year 2025 tables.

use std::sync::LazyLock;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{Bracket, BracketTable, SimplesAnnex};

/// Metadata about the fiscal year the tables belong to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxYearMetadata {
    /// The jurisdiction the tables model (e.g., "BR").
    pub jurisdiction: String,
    /// The fiscal year the tables are valid for.
    pub fiscal_year: i32,
    /// ISO currency code of every amount.
    pub currency: String,
    /// URL to the official source of the tables.
    pub source_url: String,
}

/// Scalar constants used by the CLT and pro-labore withholding rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WageConstants {
    /// National minimum wage; the pro-labore floor.
    pub minimum_wage: Decimal,
    /// INSS contribution ceiling.
    pub inss_ceiling: Decimal,
    /// Flat discount of the simplified IRRF method.
    pub irrf_simplified_discount: Decimal,
    /// Per-dependent IRRF deduction (not applied by the calculators).
    pub deduction_per_dependent: Decimal,
}

/// tax_year.yaml file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct TaxYearConfig {
    /// Fiscal year metadata.
    pub metadata: TaxYearMetadata,
    /// Wage constants.
    pub constants: WageConstants,
}

/// File structure shared by inss.yaml and irrf.yaml.
#[derive(Debug, Clone, Deserialize)]
pub struct WithholdingTableConfig {
    /// The withholding brackets, ascending.
    pub brackets: BracketTable,
}

/// Simples Nacional configuration from simples.yaml.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimplesConfig {
    /// Payroll-to-revenue ratio required for Annex III (Factor R).
    pub factor_r_threshold: Decimal,
    /// Flat INSS rate on the owner's pro-labore.
    pub pro_labore_inss_rate: Decimal,
    /// Monthly accounting fee assumed when the caller gives none.
    pub default_accountant_cost: Decimal,
    /// Annual revenue above which a company leaves Simples Nacional.
    pub revenue_ceiling: Decimal,
    /// Annex III brackets over annual revenue.
    pub annex_iii: BracketTable,
    /// Annex V brackets over annual revenue.
    pub annex_v: BracketTable,
}

/// The complete set of tax tables for one fiscal year.
///
/// Tables are immutable once built. The built-in 2025 tables are shared
/// process-wide through [`TaxTables::builtin`]; custom tables are loaded
/// with [`crate::config::ConfigLoader`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaxTables {
    metadata: TaxYearMetadata,
    constants: WageConstants,
    inss: BracketTable,
    irrf: BracketTable,
    simples: SimplesConfig,
}

static BUILTIN_TABLES: LazyLock<TaxTables> = LazyLock::new(TaxTables::brazil_2025);

impl TaxTables {
    /// Creates a new TaxTables from its component parts.
    pub fn new(
        metadata: TaxYearMetadata,
        constants: WageConstants,
        inss: BracketTable,
        irrf: BracketTable,
        simples: SimplesConfig,
    ) -> Self {
        Self {
            metadata,
            constants,
            inss,
            irrf,
            simples,
        }
    }

    /// Returns the built-in fiscal-year 2025 tables.
    ///
    /// # Example
    ///
    /// ```
    /// use clt_pj_engine::config::TaxTables;
    /// use rust_decimal::Decimal;
    ///
    /// let tables = TaxTables::builtin();
    /// assert_eq!(tables.metadata().fiscal_year, 2025);
    /// assert_eq!(tables.constants().minimum_wage, Decimal::new(1518, 0));
    /// ```
    pub fn builtin() -> &'static TaxTables {
        &BUILTIN_TABLES
    }

    fn brazil_2025() -> Self {
        let d = Decimal::new;

        let metadata = TaxYearMetadata {
            jurisdiction: "BR".to_string(),
            fiscal_year: 2025,
            currency: "BRL".to_string(),
            source_url: "https://www.gov.br/receitafederal".to_string(),
        };

        let constants = WageConstants {
            minimum_wage: d(151800, 2),
            inss_ceiling: d(815741, 2),
            irrf_simplified_discount: d(56480, 2),
            deduction_per_dependent: d(18959, 2),
        };

        let inss = BracketTable::from_trusted(vec![
            Bracket::bounded(d(151800, 2), d(75, 3), Decimal::ZERO),
            Bracket::bounded(d(279388, 2), d(9, 2), Decimal::ZERO),
            Bracket::bounded(d(419083, 2), d(12, 2), Decimal::ZERO),
            Bracket::unbounded(d(14, 2), Decimal::ZERO),
        ]);

        let irrf = BracketTable::from_trusted(vec![
            Bracket::bounded(d(225920, 2), Decimal::ZERO, Decimal::ZERO),
            Bracket::bounded(d(282665, 2), d(75, 3), d(16944, 2)),
            Bracket::bounded(d(375105, 2), d(15, 2), d(38144, 2)),
            Bracket::bounded(d(466468, 2), d(225, 3), d(66277, 2)),
            Bracket::unbounded(d(275, 3), d(89600, 2)),
        ]);

        let annex_iii = BracketTable::from_trusted(vec![
            Bracket::bounded(d(180000, 0), d(6, 2), Decimal::ZERO),
            Bracket::bounded(d(360000, 0), d(112, 3), d(9360, 0)),
            Bracket::bounded(d(720000, 0), d(135, 3), d(17640, 0)),
            Bracket::bounded(d(1800000, 0), d(16, 2), d(35640, 0)),
            Bracket::bounded(d(3600000, 0), d(21, 2), d(125640, 0)),
            Bracket::unbounded(d(33, 2), d(648000, 0)),
        ]);

        let annex_v = BracketTable::from_trusted(vec![
            Bracket::bounded(d(180000, 0), d(155, 3), Decimal::ZERO),
            Bracket::bounded(d(360000, 0), d(18, 2), d(4500, 0)),
            Bracket::bounded(d(720000, 0), d(195, 3), d(9900, 0)),
            Bracket::bounded(d(1800000, 0), d(205, 3), d(17100, 0)),
            Bracket::bounded(d(3600000, 0), d(23, 2), d(62100, 0)),
            Bracket::unbounded(d(305, 3), d(540000, 0)),
        ]);

        let simples = SimplesConfig {
            factor_r_threshold: d(28, 2),
            pro_labore_inss_rate: d(11, 2),
            default_accountant_cost: d(300, 0),
            revenue_ceiling: d(4800000, 0),
            annex_iii,
            annex_v,
        };

        Self::new(metadata, constants, inss, irrf, simples)
    }

    /// Returns the fiscal year metadata.
    pub fn metadata(&self) -> &TaxYearMetadata {
        &self.metadata
    }

    /// Returns the wage constants.
    pub fn constants(&self) -> &WageConstants {
        &self.constants
    }

    /// Returns the INSS brackets.
    pub fn inss(&self) -> &BracketTable {
        &self.inss
    }

    /// Returns the IRRF brackets.
    pub fn irrf(&self) -> &BracketTable {
        &self.irrf
    }

    /// Returns the Simples Nacional configuration.
    pub fn simples(&self) -> &SimplesConfig {
        &self.simples
    }

    /// Returns the bracket table of a Simples Nacional annex.
    pub fn annex_table(&self, annex: SimplesAnnex) -> &BracketTable {
        match annex {
            SimplesAnnex::III => &self.simples.annex_iii,
            SimplesAnnex::V => &self.simples.annex_v,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_tables_satisfy_bracket_invariants() {
        let tables = TaxTables::builtin();

        for table in [
            tables.inss(),
            tables.irrf(),
            tables.annex_table(SimplesAnnex::III),
            tables.annex_table(SimplesAnnex::V),
        ] {
            let revalidated = BracketTable::new(table.brackets().to_vec());
            assert!(revalidated.is_ok(), "{:?}", revalidated.err());
        }
    }

    #[test]
    fn test_builtin_is_shared() {
        assert!(std::ptr::eq(TaxTables::builtin(), TaxTables::builtin()));
    }

    #[test]
    fn test_annex_table_selects_annex() {
        let tables = TaxTables::builtin();

        assert_eq!(
            tables.annex_table(SimplesAnnex::III).brackets()[0].rate,
            Decimal::new(6, 2)
        );
        assert_eq!(
            tables.annex_table(SimplesAnnex::V).brackets()[0].rate,
            Decimal::new(155, 3)
        );
    }
}
