//! Core data models for the CLT vs PJ engine.
//!
//! This module contains the bracket tables, the immutable result records
//! produced by the calculators, and the audit trace types.

mod audit;
mod bracket;
mod clt_result;
mod comparison;
mod pj_result;

pub use audit::{AuditStep, AuditTrace, AuditWarning, Severity};
pub use bracket::{Bracket, BracketTable};
pub use clt_result::CltResult;
pub use comparison::{Advantage, BreakEvenResult, Comparison, ComparisonInput, ViewMode};
pub use pj_result::{PjResult, SimplesAnnex};
