//! Step-by-step explanations of CLT, PJ and comparison results.
//!
//! Each explanation replays the rules behind an already computed result and
//! records one [`AuditStep`] per rule, plus warnings for inputs where the
//! modeled regime stops being meaningful. Steps are numbered from 1 in the
//! order a reader would follow the calculation.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::calculation::{DeductionMethod, compare_irrf_methods, vacation_gross};
use crate::config::TaxTables;
use crate::models::{
    Advantage, AuditStep, AuditTrace, AuditWarning, CltResult, Comparison, PjResult, Severity,
    ViewMode,
};

const INSS_REF: &str = "EC 103/2019, art. 28";
const IRRF_REF: &str = "Lei 7.713/1988; Lei 15.191/2025";
const THIRTEENTH_REF: &str = "Lei 4.090/1962";
const VACATION_REF: &str = "CF art. 7, XVII";
const SIMPLES_REF: &str = "LC 123/2006, art. 18";
const FACTOR_R_REF: &str = "LC 123/2006, art. 18, §5-J";
const PROFIT_REF: &str = "Lei 9.249/1995, art. 10";

/// Audit steps and warnings gathered while explaining a result.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Explanation {
    /// The steps in reading order.
    pub steps: Vec<AuditStep>,
    /// Warnings raised along the way.
    pub warnings: Vec<AuditWarning>,
}

impl Explanation {
    /// Wraps the explanation into an [`AuditTrace`] with the measured duration.
    pub fn into_trace(self, duration_us: u64) -> AuditTrace {
        AuditTrace {
            steps: self.steps,
            warnings: self.warnings,
            duration_us,
        }
    }

    fn step(
        &mut self,
        rule_id: &str,
        rule_name: &str,
        legal_ref: &str,
        input: serde_json::Value,
        output: serde_json::Value,
        reasoning: String,
    ) {
        let step_number = self.steps.len() as u32 + 1;
        self.steps.push(AuditStep {
            step_number,
            rule_id: rule_id.to_string(),
            rule_name: rule_name.to_string(),
            legal_ref: legal_ref.to_string(),
            input,
            output,
            reasoning,
        });
    }

    fn warn(&mut self, code: &str, message: String, severity: Severity) {
        self.warnings.push(AuditWarning {
            code: code.to_string(),
            message,
            severity,
        });
    }

    fn extend(&mut self, other: Explanation) {
        for step in other.steps {
            let step_number = self.steps.len() as u32 + 1;
            self.steps.push(AuditStep { step_number, ..step });
        }
        self.warnings.extend(other.warnings);
    }
}

fn money(value: Decimal) -> String {
    value
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        .normalize()
        .to_string()
}

fn raw(value: Decimal) -> String {
    value.normalize().to_string()
}

fn percent(rate: Decimal) -> String {
    (rate * Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        .normalize()
        .to_string()
}

/// Explains a CLT result: INSS, IRRF, 13th salary, vacation and the annual total.
///
/// # Examples
///
/// ```
/// use clt_pj_engine::calculation::{calculate_clt_with, explain_clt};
/// use clt_pj_engine::config::TaxTables;
/// use rust_decimal::Decimal;
///
/// let tables = TaxTables::builtin();
/// let result = calculate_clt_with(tables, Decimal::from(10000), Decimal::ZERO);
/// let explanation = explain_clt(tables, &result);
///
/// assert_eq!(explanation.steps[0].rule_id, "clt_inss");
/// assert!(explanation.warnings.is_empty());
/// ```
pub fn explain_clt(tables: &TaxTables, result: &CltResult) -> Explanation {
    let mut explanation = Explanation::default();
    let gross = result.gross_salary;
    let ceiling = tables.constants().inss_ceiling;

    let capped = gross > ceiling;
    explanation.step(
        "clt_inss",
        "INSS Employee Contribution",
        INSS_REF,
        serde_json::json!({
            "gross_salary": raw(gross),
            "inss_ceiling": raw(ceiling),
        }),
        serde_json::json!({
            "inss": raw(result.inss),
            "capped": capped,
        }),
        if capped {
            format!(
                "Gross R$ {} is above the ceiling R$ {}; progressive brackets applied to the ceiling = R$ {}",
                money(gross),
                money(ceiling),
                money(result.inss)
            )
        } else {
            format!(
                "Progressive brackets applied slice by slice to R$ {} = R$ {}",
                money(gross),
                money(result.inss)
            )
        },
    );

    let irrf = compare_irrf_methods(gross, result.inss, tables);
    let method = match irrf.method {
        DeductionMethod::Legal => "legal",
        DeductionMethod::Simplified => "simplified",
    };
    explanation.step(
        "clt_irrf",
        "IRRF Withholding",
        IRRF_REF,
        serde_json::json!({
            "gross_salary": raw(gross),
            "inss": raw(result.inss),
            "simplified_discount": raw(tables.constants().irrf_simplified_discount),
        }),
        serde_json::json!({
            "legal_base": raw(irrf.legal_base),
            "legal_tax": raw(irrf.legal_tax),
            "simplified_base": raw(irrf.simplified_base),
            "simplified_tax": raw(irrf.simplified_tax),
            "method": method,
            "irrf": raw(result.irrf),
        }),
        format!(
            "Legal method R$ {} vs simplified method R$ {}; {} method withheld, floored at zero = R$ {}",
            money(irrf.legal_tax),
            money(irrf.simplified_tax),
            method,
            money(result.irrf)
        ),
    );

    explanation.step(
        "clt_net_salary",
        "Monthly Net Salary",
        INSS_REF,
        serde_json::json!({
            "gross_salary": raw(gross),
            "inss": raw(result.inss),
            "irrf": raw(result.irrf),
            "benefits": raw(result.benefits),
        }),
        serde_json::json!({
            "net_salary": raw(result.net_salary),
            "net_total_monthly": raw(result.net_total_monthly),
        }),
        format!(
            "R$ {} - R$ {} - R$ {} = R$ {}, plus R$ {} in benefits",
            money(gross),
            money(result.inss),
            money(result.irrf),
            money(result.net_salary),
            money(result.benefits)
        ),
    );

    explanation.step(
        "clt_13th_salary",
        "13th Salary",
        THIRTEENTH_REF,
        serde_json::json!({ "gross_salary": raw(gross) }),
        serde_json::json!({ "net_13th": raw(result.net_13th) }),
        format!(
            "One extra salary of R$ {} taxed like a regular month = R$ {}",
            money(gross),
            money(result.net_13th)
        ),
    );

    let vacation = vacation_gross(gross);
    explanation.step(
        "clt_vacation",
        "Vacation One-Third Bonus",
        VACATION_REF,
        serde_json::json!({
            "gross_salary": raw(gross),
            "vacation_gross": raw(vacation),
        }),
        serde_json::json!({
            "net_vacation": raw(result.net_vacation),
            "bonus_over_normal_month": raw(result.net_vacation - result.net_salary),
        }),
        format!(
            "Vacation month paid at R$ {} (gross + 1/3) and taxed on its own = R$ {}",
            money(vacation),
            money(result.net_vacation)
        ),
    );

    explanation.step(
        "clt_yearly_total",
        "Annual Net Income",
        THIRTEENTH_REF,
        serde_json::json!({
            "net_salary": raw(result.net_salary),
            "benefits": raw(result.benefits),
            "net_13th": raw(result.net_13th),
            "net_vacation": raw(result.net_vacation),
        }),
        serde_json::json!({ "total_yearly_net": raw(result.total_yearly_net) }),
        format!(
            "12 x (R$ {} + R$ {}) + R$ {} + (R$ {} - R$ {}) = R$ {}",
            money(result.net_salary),
            money(result.benefits),
            money(result.net_13th),
            money(result.net_vacation),
            money(result.net_salary),
            money(result.total_yearly_net)
        ),
    );

    explanation
}

/// Explains a PJ result: Factor R, annex, Simples tax, pro-labore
/// withholding, company profit and net income.
///
/// Raises `SIMPLES_REVENUE_CEILING_EXCEEDED`, `ZERO_REVENUE` and
/// `NEGATIVE_COMPANY_PROFIT` when they apply.
pub fn explain_pj(tables: &TaxTables, result: &PjResult) -> Explanation {
    let mut explanation = Explanation::default();
    let simples = tables.simples();
    let annual_revenue = result.annual_revenue();

    explanation.step(
        "pj_factor_r",
        "Factor R Pro-Labore",
        FACTOR_R_REF,
        serde_json::json!({
            "gross_invoice": raw(result.gross_invoice),
            "factor_r_threshold": raw(simples.factor_r_threshold),
            "minimum_wage": raw(tables.constants().minimum_wage),
        }),
        serde_json::json!({
            "pro_labore": raw(result.pro_labore),
            "factor_r": raw(result.factor_r),
        }),
        format!(
            "Pro-labore set to {}% of the invoice, never below the minimum wage = R$ {}",
            percent(simples.factor_r_threshold),
            money(result.pro_labore)
        ),
    );

    explanation.step(
        "pj_annex",
        "Simples Nacional Annex",
        FACTOR_R_REF,
        serde_json::json!({
            "factor_r": raw(result.factor_r),
            "factor_r_threshold": raw(simples.factor_r_threshold),
        }),
        serde_json::json!({ "annex": result.annex.to_string() }),
        format!(
            "Payroll reaches the {}% threshold; taxed under {}",
            percent(simples.factor_r_threshold),
            result.tax_model
        ),
    );

    explanation.step(
        "pj_simples_tax",
        "Simples Nacional Tax (DAS)",
        SIMPLES_REF,
        serde_json::json!({
            "gross_invoice": raw(result.gross_invoice),
            "annual_revenue": raw(annual_revenue),
        }),
        serde_json::json!({
            "effective_tax_rate": raw(result.effective_tax_rate),
            "taxes": raw(result.taxes),
        }),
        format!(
            "Effective rate {}% on annual revenue R$ {}; R$ {} x {}% = R$ {}",
            percent(result.effective_tax_rate),
            money(annual_revenue),
            money(result.gross_invoice),
            percent(result.effective_tax_rate),
            money(result.taxes)
        ),
    );

    explanation.step(
        "pj_pro_labore_inss",
        "Pro-Labore INSS",
        INSS_REF,
        serde_json::json!({
            "pro_labore": raw(result.pro_labore),
            "rate": raw(simples.pro_labore_inss_rate),
        }),
        serde_json::json!({ "inss_pro_labore": raw(result.inss_pro_labore) }),
        format!(
            "Flat {}% on the pro-labore, capped at the contribution ceiling = R$ {}",
            percent(simples.pro_labore_inss_rate),
            money(result.inss_pro_labore)
        ),
    );

    explanation.step(
        "pj_pro_labore_irrf",
        "Pro-Labore IRRF",
        IRRF_REF,
        serde_json::json!({
            "pro_labore": raw(result.pro_labore),
            "inss_pro_labore": raw(result.inss_pro_labore),
        }),
        serde_json::json!({ "irrf_pro_labore": raw(result.irrf_pro_labore) }),
        format!(
            "Cheaper of the legal and simplified methods on the pro-labore = R$ {}",
            money(result.irrf_pro_labore)
        ),
    );

    explanation.step(
        "pj_company_profit",
        "Distributed Profit",
        PROFIT_REF,
        serde_json::json!({
            "gross_invoice": raw(result.gross_invoice),
            "taxes": raw(result.taxes),
            "accountant_cost": raw(result.accountant_cost),
            "pro_labore": raw(result.pro_labore),
        }),
        serde_json::json!({ "company_profit": raw(result.company_profit) }),
        format!(
            "R$ {} - R$ {} - R$ {} - R$ {} = R$ {}, distributed tax-free",
            money(result.gross_invoice),
            money(result.taxes),
            money(result.accountant_cost),
            money(result.pro_labore),
            money(result.company_profit)
        ),
    );

    explanation.step(
        "pj_net_income",
        "PJ Net Income",
        PROFIT_REF,
        serde_json::json!({
            "net_pro_labore": raw(result.net_pro_labore()),
            "company_profit": raw(result.company_profit),
        }),
        serde_json::json!({
            "net_income": raw(result.net_income),
            "total_yearly_net": raw(result.total_yearly_net),
        }),
        format!(
            "Net pro-labore R$ {} + profit R$ {} = R$ {} per month, R$ {} per year",
            money(result.net_pro_labore()),
            money(result.company_profit),
            money(result.net_income),
            money(result.total_yearly_net)
        ),
    );

    if annual_revenue > simples.revenue_ceiling {
        explanation.warn(
            "SIMPLES_REVENUE_CEILING_EXCEEDED",
            format!(
                "Annual revenue R$ {} exceeds the Simples Nacional ceiling of R$ {}",
                money(annual_revenue),
                money(simples.revenue_ceiling)
            ),
            Severity::High,
        );
    }

    if result.gross_invoice <= Decimal::ZERO {
        explanation.warn(
            "ZERO_REVENUE",
            "No revenue; the Simples Nacional rate was taken as zero".to_string(),
            Severity::Medium,
        );
    }

    if result.company_profit < Decimal::ZERO {
        explanation.warn(
            "NEGATIVE_COMPANY_PROFIT",
            format!(
                "Pro-labore and fixed costs exceed revenue after tax by R$ {}",
                money(-result.company_profit)
            ),
            Severity::Medium,
        );
    }

    explanation
}

/// Explains a comparison: both sides, the break-even search and the verdict.
///
/// Raises `BREAK_EVEN_OUT_OF_RANGE` when the CLT annual net lies outside
/// what the search interval can reach.
pub fn explain_comparison(tables: &TaxTables, comparison: &Comparison) -> Explanation {
    let mut explanation = explain_clt(tables, &comparison.clt);
    explanation.extend(explain_pj(tables, &comparison.pj));

    let break_even = &comparison.break_even;
    explanation.step(
        "break_even",
        "Break-Even Invoice",
        SIMPLES_REF,
        serde_json::json!({
            "clt_gross": raw(comparison.clt.gross_salary),
            "target_yearly_net": raw(break_even.target_yearly_net),
            "search_upper_bound": raw(break_even.search_upper_bound),
        }),
        serde_json::json!({
            "monthly_invoice": raw(break_even.monthly_invoice),
            "iterations": break_even.iterations,
            "within_bounds": break_even.within_bounds,
        }),
        format!(
            "Bisection over [0, R$ {}] in {} steps: an invoice of R$ {} matches the CLT annual net of R$ {}",
            money(break_even.search_upper_bound),
            break_even.iterations,
            money(break_even.monthly_invoice),
            money(break_even.target_yearly_net)
        ),
    );

    let horizon = match comparison.view {
        ViewMode::Monthly => "monthly",
        ViewMode::Yearly => "yearly",
    };
    let verdict = match comparison.advantage {
        Advantage::Pj => "PJ nets more",
        Advantage::Clt => "CLT nets more",
        Advantage::Equivalent => "both offers net the same",
    };
    explanation.step(
        "verdict",
        "Comparison Verdict",
        SIMPLES_REF,
        serde_json::json!({
            "view": horizon,
            "monthly_difference": raw(comparison.monthly_difference),
            "yearly_difference": raw(comparison.yearly_difference),
        }),
        serde_json::json!({
            "difference": raw(comparison.difference),
            "advantage": comparison.advantage,
        }),
        format!(
            "PJ minus CLT on a {} basis = R$ {}; {}",
            horizon,
            money(comparison.difference),
            verdict
        ),
    );

    if !break_even.within_bounds {
        explanation.warn(
            "BREAK_EVEN_OUT_OF_RANGE",
            format!(
                "CLT annual net R$ {} cannot be matched by an invoice between R$ 0 and R$ {}; the estimate sits at the interval edge",
                money(break_even.target_yearly_net),
                money(break_even.search_upper_bound)
            ),
            Severity::Low,
        );
    }

    explanation
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::{calculate_clt_with, calculate_pj_with, compare};
    use crate::models::ComparisonInput;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn tables() -> &'static TaxTables {
        TaxTables::builtin()
    }

    fn rule_ids(explanation: &Explanation) -> Vec<&str> {
        explanation.steps.iter().map(|s| s.rule_id.as_str()).collect()
    }

    fn warning_codes(explanation: &Explanation) -> Vec<&str> {
        explanation.warnings.iter().map(|w| w.code.as_str()).collect()
    }

    #[test]
    fn test_money_rounds_half_cents_away_from_zero() {
        assert_eq!(money(dec("0.125")), "0.13");
        assert_eq!(money(dec("2.345")), "2.35");
        assert_eq!(money(dec("-0.125")), "-0.13");
        assert_eq!(money(dec("1500.00")), "1500");
    }

    #[test]
    fn test_percent_rounds_half_away_from_zero() {
        assert_eq!(percent(dec("0.00125")), "0.13");
        assert_eq!(percent(dec("0.075")), "7.5");
    }

    /// AT-CLT-001: CLT steps in reading order
    #[test]
    fn test_clt_steps_in_order() {
        let result = calculate_clt_with(tables(), dec("10000"), Decimal::ZERO);
        let explanation = explain_clt(tables(), &result);

        assert_eq!(
            rule_ids(&explanation),
            vec![
                "clt_inss",
                "clt_irrf",
                "clt_net_salary",
                "clt_13th_salary",
                "clt_vacation",
                "clt_yearly_total"
            ]
        );
        let numbers: Vec<u32> = explanation.steps.iter().map(|s| s.step_number).collect();
        assert_eq!(numbers, vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_clt_inss_step_reports_cap() {
        let result = calculate_clt_with(tables(), dec("10000"), Decimal::ZERO);
        let explanation = explain_clt(tables(), &result);
        let inss = &explanation.steps[0];

        assert_eq!(inss.output["capped"], true);
        assert_eq!(inss.output["inss"], "951.6344");
        assert_eq!(inss.legal_ref, INSS_REF);
    }

    #[test]
    fn test_clt_irrf_step_names_method() {
        let result = calculate_clt_with(tables(), dec("3000"), Decimal::ZERO);
        let explanation = explain_clt(tables(), &result);

        assert_eq!(explanation.steps[1].output["method"], "simplified");
    }

    /// AT-PJ-001: PJ steps in reading order
    #[test]
    fn test_pj_steps_in_order() {
        let result = calculate_pj_with(tables(), dec("10000"), dec("300"));
        let explanation = explain_pj(tables(), &result);

        assert_eq!(
            rule_ids(&explanation),
            vec![
                "pj_factor_r",
                "pj_annex",
                "pj_simples_tax",
                "pj_pro_labore_inss",
                "pj_pro_labore_irrf",
                "pj_company_profit",
                "pj_net_income"
            ]
        );
        assert_eq!(explanation.steps[2].output["taxes"], "600");
        assert!(explanation.warnings.is_empty());
    }

    #[test]
    fn test_revenue_ceiling_warning() {
        let result = calculate_pj_with(tables(), dec("500000"), dec("300"));
        let explanation = explain_pj(tables(), &result);

        assert_eq!(warning_codes(&explanation), vec!["SIMPLES_REVENUE_CEILING_EXCEEDED"]);
        assert_eq!(explanation.warnings[0].severity, Severity::High);
    }

    #[test]
    fn test_zero_revenue_raises_two_warnings() {
        let result = calculate_pj_with(tables(), Decimal::ZERO, dec("300"));
        let explanation = explain_pj(tables(), &result);

        assert_eq!(
            warning_codes(&explanation),
            vec!["ZERO_REVENUE", "NEGATIVE_COMPANY_PROFIT"]
        );
    }

    #[test]
    fn test_comparison_renumbers_steps() {
        let comparison = compare(tables(), &ComparisonInput::new(dec("8000"), dec("14000")));
        let explanation = explain_comparison(tables(), &comparison);

        assert_eq!(explanation.steps.len(), 6 + 7 + 2);
        for (index, step) in explanation.steps.iter().enumerate() {
            assert_eq!(step.step_number, index as u32 + 1);
        }
        assert_eq!(explanation.steps.last().unwrap().rule_id, "verdict");
        assert_eq!(explanation.steps.last().unwrap().output["advantage"], "pj");
    }

    #[test]
    fn test_break_even_out_of_range_warning() {
        let mut input = ComparisonInput::new(dec("1000"), dec("2000"));
        input.clt_benefits = dec("20000");
        let comparison = compare(tables(), &input);
        let explanation = explain_comparison(tables(), &comparison);

        assert!(warning_codes(&explanation).contains(&"BREAK_EVEN_OUT_OF_RANGE"));
    }

    #[test]
    fn test_into_trace_keeps_steps_and_duration() {
        let result = calculate_clt_with(tables(), dec("5000"), Decimal::ZERO);
        let trace = explain_clt(tables(), &result).into_trace(42);

        assert_eq!(trace.steps.len(), 6);
        assert_eq!(trace.duration_us, 42);
    }
}
