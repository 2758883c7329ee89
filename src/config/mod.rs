//! Configuration loading and management for the CLT vs PJ engine.
//!
//! Tax tables are static for a fiscal year. The 2025 tables are compiled in
//! and available through [`TaxTables::builtin`]; the same data ships as YAML
//! so a deployment can point the engine at another year's tables.
//!
//! # Example
//!
//! ```no_run
//! use clt_pj_engine::config::ConfigLoader;
//!
//! let loader = ConfigLoader::load("./config/br2025").unwrap();
//! println!("Fiscal year: {}", loader.tables().metadata().fiscal_year);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    SimplesConfig, TaxTables, TaxYearConfig, TaxYearMetadata, WageConstants,
    WithholdingTableConfig,
};
