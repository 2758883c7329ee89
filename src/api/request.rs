//! Request types for the CLT vs PJ Engine API.
//!
//! This module defines the JSON request bodies for the `/calculate/clt`,
//! `/calculate/pj` and `/compare` endpoints. Amounts are decimal strings or
//! numbers; optional amounts default to zero except the accounting fee,
//! which defaults to the configured fee.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{ComparisonInput, ViewMode};

/// Body of `POST /calculate/clt`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CltRequest {
    /// Monthly gross salary.
    pub gross_salary: Decimal,
    /// Monthly untaxed benefits.
    #[serde(default)]
    pub benefits: Decimal,
}

/// Body of `POST /calculate/pj`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PjRequest {
    /// Monthly gross invoice.
    pub gross_invoice: Decimal,
    /// Monthly accounting fee; the configured default when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accountant_cost: Option<Decimal>,
}

/// Body of `POST /compare`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompareRequest {
    /// CLT monthly gross salary.
    pub clt_gross: Decimal,
    /// CLT monthly benefits.
    #[serde(default)]
    pub clt_benefits: Decimal,
    /// PJ monthly gross invoice.
    pub pj_gross: Decimal,
    /// Monthly health plan paid by the PJ company.
    #[serde(default)]
    pub pj_health_cost: Decimal,
    /// Monthly accounting fee; the configured default when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accountant_cost: Option<Decimal>,
    /// Horizon for the verdict.
    #[serde(default)]
    pub view: ViewMode,
}

/// Largest monthly amount accepted, R$ 1 trillion.
///
/// Annualizing and searching multiply amounts by up to 48; this bound keeps
/// every product far inside `Decimal`'s range.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(3_567_587_328, 232, 0, false, 0);

fn check_amount(field: &str, value: Decimal) -> EngineResult<()> {
    if value < Decimal::ZERO {
        return Err(EngineError::InvalidInput {
            field: field.to_string(),
            message: format!("must not be negative, got {}", value),
        });
    }
    if value > MAX_AMOUNT {
        return Err(EngineError::InvalidInput {
            field: field.to_string(),
            message: format!("must not exceed {}, got {}", MAX_AMOUNT, value),
        });
    }
    Ok(())
}

impl CltRequest {
    /// Rejects negative or out-of-range amounts.
    pub fn validate(&self) -> EngineResult<()> {
        check_amount("gross_salary", self.gross_salary)?;
        check_amount("benefits", self.benefits)
    }
}

impl PjRequest {
    /// Rejects negative or out-of-range amounts.
    pub fn validate(&self) -> EngineResult<()> {
        check_amount("gross_invoice", self.gross_invoice)?;
        if let Some(cost) = self.accountant_cost {
            check_amount("accountant_cost", cost)?;
        }
        Ok(())
    }
}

impl CompareRequest {
    /// Rejects negative or out-of-range amounts.
    pub fn validate(&self) -> EngineResult<()> {
        check_amount("clt_gross", self.clt_gross)?;
        check_amount("clt_benefits", self.clt_benefits)?;
        check_amount("pj_gross", self.pj_gross)?;
        check_amount("pj_health_cost", self.pj_health_cost)?;
        if let Some(cost) = self.accountant_cost {
            check_amount("accountant_cost", cost)?;
        }
        Ok(())
    }

    /// Builds the comparison input, filling the accounting fee from `default_accountant_cost`.
    pub fn into_input(self, default_accountant_cost: Decimal) -> ComparisonInput {
        ComparisonInput {
            clt_gross: self.clt_gross,
            clt_benefits: self.clt_benefits,
            pj_gross: self.pj_gross,
            pj_health_cost: self.pj_health_cost,
            accountant_cost: self.accountant_cost.unwrap_or(default_accountant_cost),
            view: self.view,
        }
    }
}
