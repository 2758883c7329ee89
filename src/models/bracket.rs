//! Bracket table models.
//!
//! A [`BracketTable`] is an ordered sequence of [`Bracket`]s where each
//! bracket's implicit lower bound is the previous bracket's upper limit and
//! the final bracket is unbounded. The same shape serves the INSS,
//! IRRF and Simples Nacional tables.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// A single bracket of a tax table.
///
/// # Example
///
/// ```
/// use clt_pj_engine::models::Bracket;
/// use rust_decimal::Decimal;
///
/// let bracket = Bracket::bounded(Decimal::new(225920, 2), Decimal::ZERO, Decimal::ZERO);
/// assert!(bracket.covers(Decimal::new(2000, 0)));
/// assert!(!bracket.covers(Decimal::new(3000, 0)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bracket {
    /// Inclusive upper limit of the bracket; `None` for the unbounded catch-all.
    #[serde(default)]
    pub upper_limit: Option<Decimal>,
    /// Nominal rate as a fraction (0.075 for 7.5%).
    pub rate: Decimal,
    /// Flat deduction subtracted after applying the rate.
    #[serde(default)]
    pub deduction: Decimal,
}

impl Bracket {
    /// Creates a bracket with a finite upper limit.
    pub fn bounded(upper_limit: Decimal, rate: Decimal, deduction: Decimal) -> Self {
        Self {
            upper_limit: Some(upper_limit),
            rate,
            deduction,
        }
    }

    /// Creates the unbounded catch-all bracket.
    pub fn unbounded(rate: Decimal, deduction: Decimal) -> Self {
        Self {
            upper_limit: None,
            rate,
            deduction,
        }
    }

    /// Returns true if `base` does not exceed this bracket's upper limit.
    pub fn covers(&self, base: Decimal) -> bool {
        match self.upper_limit {
            Some(limit) => base <= limit,
            None => true,
        }
    }
}

/// An ordered, validated bracket table.
///
/// Tables built through [`BracketTable::new`] (or deserialized from YAML)
/// are guaranteed to be non-empty, strictly ascending, with rates in
/// `[0, 1]`, non-negative deductions and an unbounded final bracket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Bracket>", into = "Vec<Bracket>")]
pub struct BracketTable {
    brackets: Vec<Bracket>,
}

impl BracketTable {
    /// Builds a table, rejecting any ordering or rate violation.
    ///
    /// # Example
    ///
    /// ```
    /// use clt_pj_engine::models::{Bracket, BracketTable};
    /// use rust_decimal::Decimal;
    ///
    /// let table = BracketTable::new(vec![
    ///     Bracket::bounded(Decimal::new(1000, 0), Decimal::new(5, 2), Decimal::ZERO),
    ///     Bracket::unbounded(Decimal::new(10, 2), Decimal::new(50, 0)),
    /// ]);
    /// assert!(table.is_ok());
    ///
    /// let missing_catch_all = BracketTable::new(vec![
    ///     Bracket::bounded(Decimal::new(1000, 0), Decimal::new(5, 2), Decimal::ZERO),
    /// ]);
    /// assert!(missing_catch_all.is_err());
    /// ```
    pub fn new(brackets: Vec<Bracket>) -> EngineResult<Self> {
        Self::validate(&brackets)?;
        Ok(Self { brackets })
    }

    /// Wraps brackets that are known to be valid, skipping validation.
    ///
    /// Only used for the built-in fiscal-year tables, which are covered by tests.
    pub(crate) fn from_trusted(brackets: Vec<Bracket>) -> Self {
        Self { brackets }
    }

    fn validate(brackets: &[Bracket]) -> EngineResult<()> {
        let invalid = |message: String| EngineError::InvalidTable {
            table: "bracket table".to_string(),
            message,
        };

        let Some((last, bounded)) = brackets.split_last() else {
            return Err(invalid("table has no brackets".to_string()));
        };

        if last.upper_limit.is_some() {
            return Err(invalid("last bracket must be unbounded".to_string()));
        }

        let mut previous_limit: Option<Decimal> = None;
        for (index, bracket) in bounded.iter().enumerate() {
            let Some(limit) = bracket.upper_limit else {
                return Err(invalid(format!(
                    "bracket {} is unbounded but is not the last bracket",
                    index + 1
                )));
            };
            if limit <= Decimal::ZERO {
                return Err(invalid(format!(
                    "bracket {} has a non-positive upper limit {}",
                    index + 1,
                    limit
                )));
            }
            if let Some(previous) = previous_limit {
                if limit <= previous {
                    return Err(invalid(format!(
                        "bracket {} upper limit {} is not above the previous limit {}",
                        index + 1,
                        limit,
                        previous
                    )));
                }
            }
            previous_limit = Some(limit);
        }

        for (index, bracket) in brackets.iter().enumerate() {
            if bracket.rate < Decimal::ZERO || bracket.rate > Decimal::ONE {
                return Err(invalid(format!(
                    "bracket {} rate {} is outside [0, 1]",
                    index + 1,
                    bracket.rate
                )));
            }
            if bracket.deduction < Decimal::ZERO {
                return Err(invalid(format!(
                    "bracket {} has a negative deduction {}",
                    index + 1,
                    bracket.deduction
                )));
            }
        }

        Ok(())
    }

    /// Returns the brackets in ascending order.
    pub fn brackets(&self) -> &[Bracket] {
        &self.brackets
    }

    /// Returns the first bracket whose upper limit is at or above `base`.
    ///
    /// The unbounded final bracket always matches.
    pub fn bracket_for(&self, base: Decimal) -> &Bracket {
        self.brackets
            .iter()
            .find(|bracket| bracket.covers(base))
            .unwrap_or_else(|| self.catch_all())
    }

    fn catch_all(&self) -> &Bracket {
        &self.brackets[self.brackets.len() - 1]
    }
}

impl TryFrom<Vec<Bracket>> for BracketTable {
    type Error = EngineError;

    fn try_from(brackets: Vec<Bracket>) -> Result<Self, Self::Error> {
        Self::new(brackets)
    }
}

impl From<BracketTable> for Vec<Bracket> {
    fn from(table: BracketTable) -> Self {
        table.brackets
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn two_bracket_table() -> BracketTable {
        BracketTable::new(vec![
            Bracket::bounded(dec("1000"), dec("0.05"), dec("0")),
            Bracket::unbounded(dec("0.10"), dec("50")),
        ])
        .unwrap()
    }

    #[test]
    fn test_bracket_for_picks_first_covering_bracket() {
        let table = two_bracket_table();

        assert_eq!(table.bracket_for(dec("500")).rate, dec("0.05"));
        assert_eq!(table.bracket_for(dec("1000")).rate, dec("0.05"));
        assert_eq!(table.bracket_for(dec("1000.01")).rate, dec("0.10"));
    }

    #[test]
    fn test_unbounded_bracket_matches_huge_base() {
        let table = two_bracket_table();

        assert_eq!(table.bracket_for(dec("99999999")).deduction, dec("50"));
    }

    #[test]
    fn test_empty_table_is_rejected() {
        let result = BracketTable::new(vec![]);

        match result {
            Err(EngineError::InvalidTable { message, .. }) => {
                assert!(message.contains("no brackets"));
            }
            _ => panic!("Expected InvalidTable error"),
        }
    }

    #[test]
    fn test_bounded_last_bracket_is_rejected() {
        let result = BracketTable::new(vec![Bracket::bounded(dec("1000"), dec("0.05"), dec("0"))]);

        match result {
            Err(EngineError::InvalidTable { message, .. }) => {
                assert!(message.contains("unbounded"));
            }
            _ => panic!("Expected InvalidTable error"),
        }
    }

    #[test]
    fn test_unsorted_limits_are_rejected() {
        let result = BracketTable::new(vec![
            Bracket::bounded(dec("2000"), dec("0.05"), dec("0")),
            Bracket::bounded(dec("1000"), dec("0.07"), dec("0")),
            Bracket::unbounded(dec("0.10"), dec("0")),
        ]);

        assert!(result.is_err());
    }

    #[test]
    fn test_duplicate_limits_are_rejected() {
        let result = BracketTable::new(vec![
            Bracket::bounded(dec("1000"), dec("0.05"), dec("0")),
            Bracket::bounded(dec("1000"), dec("0.07"), dec("0")),
            Bracket::unbounded(dec("0.10"), dec("0")),
        ]);

        assert!(result.is_err());
    }

    #[test]
    fn test_unbounded_bracket_in_the_middle_is_rejected() {
        let result = BracketTable::new(vec![
            Bracket::unbounded(dec("0.05"), dec("0")),
            Bracket::unbounded(dec("0.10"), dec("0")),
        ]);

        assert!(result.is_err());
    }

    #[test]
    fn test_rate_above_one_is_rejected() {
        let result = BracketTable::new(vec![Bracket::unbounded(dec("1.5"), dec("0"))]);

        match result {
            Err(EngineError::InvalidTable { message, .. }) => {
                assert!(message.contains("outside [0, 1]"));
            }
            _ => panic!("Expected InvalidTable error"),
        }
    }

    #[test]
    fn test_negative_deduction_is_rejected() {
        let result = BracketTable::new(vec![Bracket::unbounded(dec("0.1"), dec("-1"))]);

        assert!(result.is_err());
    }

    #[test]
    fn test_deserialize_validates_table() {
        let yaml = "- upper_limit: \"1000\"\n  rate: \"0.05\"\n";
        let result: Result<BracketTable, _> = serde_yaml::from_str(yaml);

        assert!(result.is_err());
    }

    #[test]
    fn test_deserialize_defaults_missing_deduction_and_limit() {
        let yaml = "- upper_limit: \"1000\"\n  rate: \"0.05\"\n- rate: \"0.10\"\n  deduction: \"50\"\n";
        let table: BracketTable = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(table.brackets().len(), 2);
        assert_eq!(table.brackets()[0].deduction, Decimal::ZERO);
        assert_eq!(table.brackets()[1].upper_limit, None);
    }
}
