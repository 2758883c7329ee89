//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading tax tables
//! from YAML files.

use std::fs;
use std::path::Path;

use rust_decimal::Decimal;
use tracing::info;

use crate::error::{EngineError, EngineResult};

use super::types::{SimplesConfig, TaxTables, TaxYearConfig, WithholdingTableConfig};

/// Loads and provides access to a fiscal year's tax tables.
///
/// # Directory Structure
///
/// The configuration directory should have the following structure:
/// ```text
/// config/br2025/
/// ├── tax_year.yaml   # Fiscal year metadata and wage constants
/// ├── inss.yaml       # Social-security brackets
/// ├── irrf.yaml       # Income-tax brackets
/// └── simples.yaml    # Simples Nacional annexes and Factor R settings
/// ```
///
/// # Example
///
/// ```no_run
/// use clt_pj_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/br2025").unwrap();
/// println!("Loaded fiscal year: {}", loader.tables().metadata().fiscal_year);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    tables: TaxTables,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing
    /// - Any file contains invalid YAML
    /// - Any bracket table breaks its ordering or rate invariants
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let tax_year = Self::load_yaml::<TaxYearConfig>(&path.join("tax_year.yaml"))?;
        let inss = Self::load_yaml::<WithholdingTableConfig>(&path.join("inss.yaml"))?;
        let irrf = Self::load_yaml::<WithholdingTableConfig>(&path.join("irrf.yaml"))?;
        let simples = Self::load_yaml::<SimplesConfig>(&path.join("simples.yaml"))?;

        Self::validate_simples(&simples)?;

        let tables = TaxTables::new(
            tax_year.metadata,
            tax_year.constants,
            inss.brackets,
            irrf.brackets,
            simples,
        );

        info!(
            path = %path.display(),
            fiscal_year = tables.metadata().fiscal_year,
            jurisdiction = %tables.metadata().jurisdiction,
            "Loaded tax tables"
        );

        Ok(Self { tables })
    }

    /// Wraps already-built tables, e.g. [`TaxTables::builtin`].
    pub fn from_tables(tables: TaxTables) -> Self {
        Self { tables }
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    fn validate_simples(simples: &SimplesConfig) -> EngineResult<()> {
        let fractions = [
            ("factor_r_threshold", simples.factor_r_threshold),
            ("pro_labore_inss_rate", simples.pro_labore_inss_rate),
        ];
        for (name, value) in fractions {
            if value < Decimal::ZERO || value > Decimal::ONE {
                return Err(EngineError::InvalidTable {
                    table: "simples".to_string(),
                    message: format!("{} {} is outside [0, 1]", name, value),
                });
            }
        }
        if simples.default_accountant_cost < Decimal::ZERO {
            return Err(EngineError::InvalidTable {
                table: "simples".to_string(),
                message: "default_accountant_cost must not be negative".to_string(),
            });
        }
        Ok(())
    }

    /// Returns the loaded tax tables.
    pub fn tables(&self) -> &TaxTables {
        &self.tables
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    use crate::models::SimplesAnnex;

    fn config_path() -> &'static str {
        "./config/br2025"
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_load_valid_configuration() {
        let result = ConfigLoader::load(config_path());
        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());

        let loader = result.unwrap();
        assert_eq!(loader.tables().metadata().jurisdiction, "BR");
        assert_eq!(loader.tables().metadata().fiscal_year, 2025);
    }

    #[test]
    fn test_yaml_tables_match_builtin_tables() {
        let loader = ConfigLoader::load(config_path()).unwrap();

        assert_eq!(loader.tables(), TaxTables::builtin());
    }

    #[test]
    fn test_constants_loaded_correctly() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        let constants = loader.tables().constants();

        assert_eq!(constants.minimum_wage, dec("1518.00"));
        assert_eq!(constants.inss_ceiling, dec("8157.41"));
        assert_eq!(constants.irrf_simplified_discount, dec("564.80"));
        assert_eq!(constants.deduction_per_dependent, dec("189.59"));
    }

    #[test]
    fn test_simples_annexes_loaded_correctly() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        let tables = loader.tables();

        let annex_iii = tables.annex_table(SimplesAnnex::III).brackets();
        assert_eq!(annex_iii.len(), 6);
        assert_eq!(annex_iii[1].rate, dec("0.112"));
        assert_eq!(annex_iii[1].deduction, dec("9360"));
        assert_eq!(annex_iii[5].upper_limit, None);

        let annex_v = tables.annex_table(SimplesAnnex::V).brackets();
        assert_eq!(annex_v[0].rate, dec("0.155"));
    }

    #[test]
    fn test_load_missing_directory_returns_error() {
        let result = ConfigLoader::load("/nonexistent/path");

        match result {
            Err(EngineError::ConfigNotFound { path }) => {
                assert!(path.contains("tax_year.yaml"));
            }
            _ => panic!("Expected ConfigNotFound error"),
        }
    }

    #[test]
    fn test_unsorted_yaml_table_is_a_parse_error() {
        let yaml = "brackets:\n  - upper_limit: \"2000\"\n    rate: \"0.1\"\n  - upper_limit: \"1000\"\n    rate: \"0.2\"\n  - rate: \"0.3\"\n";
        let result = serde_yaml::from_str::<WithholdingTableConfig>(yaml);

        let message = result.unwrap_err().to_string();
        assert!(message.contains("not above the previous limit"), "{}", message);
    }

    #[test]
    fn test_simples_threshold_outside_unit_interval_is_rejected() {
        let mut simples = TaxTables::builtin().simples().clone();
        simples.factor_r_threshold = dec("28");

        let result = ConfigLoader::validate_simples(&simples);
        match result {
            Err(EngineError::InvalidTable { table, message }) => {
                assert_eq!(table, "simples");
                assert!(message.contains("factor_r_threshold"));
            }
            _ => panic!("Expected InvalidTable error"),
        }
    }
}
