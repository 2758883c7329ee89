//! Audit trace models.
//!
//! An audit trace explains a calculation step by step so a consumer can
//! render a breakdown table without re-deriving any figure.

use serde::{Deserialize, Serialize};

/// A single step in the audit trace recording a calculation decision.
///
/// Each step captures the input, output, and reasoning for a rule application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// Reference to the statute behind this rule.
    pub legal_ref: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// How serious an [`AuditWarning`] is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Informational; the figures are still meaningful.
    Low,
    /// The figures are valid but likely not what the caller expects.
    Medium,
    /// The regime modeled probably does not apply.
    High,
}

/// A warning generated during calculation.
///
/// Warnings indicate potential issues that don't prevent calculation
/// but may require attention.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level.
    pub severity: Severity,
}

/// The complete audit trace for a calculation.
///
/// # Example
///
/// ```
/// use clt_pj_engine::models::AuditTrace;
///
/// let trace = AuditTrace {
///     steps: vec![],
///     warnings: vec![],
///     duration_us: 12,
/// };
/// assert!(trace.steps.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of calculation steps.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated during calculation.
    pub warnings: Vec<AuditWarning>,
    /// The total calculation duration in microseconds.
    pub duration_us: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_serializes_snake_case() {
        let json = serde_json::to_string(&Severity::High).unwrap();
        assert_eq!(json, "\"high\"");
    }

    #[test]
    fn test_audit_step_round_trips_through_json() {
        let step = AuditStep {
            step_number: 1,
            rule_id: "inss_progressive".to_string(),
            rule_name: "INSS".to_string(),
            legal_ref: "EC 103/2019".to_string(),
            input: serde_json::json!({ "gross": "10000" }),
            output: serde_json::json!({ "inss": "951.6344" }),
            reasoning: "capped".to_string(),
        };

        let json = serde_json::to_string(&step).unwrap();
        let parsed: AuditStep = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, step);
    }
}
