//! Statutory income/obligation schedule.
//!
//! The [`ScheduleTable`] pairs ascending combined-income breakpoints with one
//! obligation column per supported child count.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// The basic obligation schedule.
///
/// Row `i` of every obligation column corresponds to `incomes[i]`. The table
/// is treated as immutable once loaded and is passed by reference into every
/// lookup.
///
/// # Example
///
/// ```
/// use support_engine::models::ScheduleTable;
/// use rust_decimal::Decimal;
/// use std::collections::BTreeMap;
///
/// let mut obligations = BTreeMap::new();
/// obligations.insert(1, vec![Decimal::from(150), Decimal::from(220)]);
///
/// let table = ScheduleTable {
///     incomes: vec![Decimal::from(1000), Decimal::from(2000)],
///     obligations,
/// };
/// assert!(table.validate().is_ok());
/// assert_eq!(table.highest_obligation(1).unwrap(), Decimal::from(220));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleTable {
    /// Combined monthly income breakpoints, strictly ascending.
    pub incomes: Vec<Decimal>,
    /// Obligation amounts keyed by number of children.
    pub obligations: BTreeMap<u32, Vec<Decimal>>,
}

impl ScheduleTable {
    /// Checks the structural invariants of the table.
    ///
    /// Returns `InvalidSchedule` if the table has no rows, if the incomes are
    /// not strictly ascending, or if any column's length differs from the
    /// number of income rows.
    pub fn validate(&self) -> EngineResult<()> {
        if self.incomes.is_empty() {
            return Err(EngineError::InvalidSchedule {
                message: "schedule has no income rows".to_string(),
            });
        }

        if let Some(i) = self.incomes.windows(2).position(|w| w[0] >= w[1]) {
            return Err(EngineError::InvalidSchedule {
                message: format!(
                    "incomes must be strictly ascending (row {} = {}, row {} = {})",
                    i,
                    self.incomes[i],
                    i + 1,
                    self.incomes[i + 1]
                ),
            });
        }

        for (children, column) in &self.obligations {
            if column.len() != self.incomes.len() {
                return Err(EngineError::InvalidSchedule {
                    message: format!(
                        "column for {} children has {} entries, expected {}",
                        children,
                        column.len(),
                        self.incomes.len()
                    ),
                });
            }
        }

        Ok(())
    }

    /// Returns the obligation column for a child count.
    pub fn column(&self, children: u32) -> EngineResult<&[Decimal]> {
        self.obligations
            .get(&children)
            .map(Vec::as_slice)
            .ok_or(EngineError::UnsupportedChildCount { count: children })
    }

    /// Returns the top-row obligation for a child count.
    pub fn highest_obligation(&self, children: u32) -> EngineResult<Decimal> {
        let column = self.column(children)?;
        column.last().copied().ok_or_else(|| EngineError::InvalidSchedule {
            message: format!("column for {} children is empty", children),
        })
    }

    /// Returns the supported child counts in ascending order.
    pub fn child_counts(&self) -> Vec<u32> {
        self.obligations.keys().copied().collect()
    }

    /// Returns true if the table has a column for this child count.
    pub fn supports_children(&self, children: u32) -> bool {
        self.obligations.contains_key(&children)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(n: i64) -> Decimal {
        Decimal::from(n)
    }

    fn create_table() -> ScheduleTable {
        let mut obligations = BTreeMap::new();
        obligations.insert(1, vec![dec(150), dec(220), dec(290)]);
        obligations.insert(2, vec![dec(200), dec(300), dec(410)]);
        ScheduleTable {
            incomes: vec![dec(1000), dec(2000), dec(3000)],
            obligations,
        }
    }

    #[test]
    fn test_valid_table_passes() {
        assert!(create_table().validate().is_ok());
    }

    #[test]
    fn test_descending_incomes_rejected() {
        let mut table = create_table();
        table.incomes = vec![dec(1000), dec(3000), dec(2000)];

        match table.validate() {
            Err(EngineError::InvalidSchedule { message }) => {
                assert!(message.contains("strictly ascending"));
            }
            other => panic!("Expected InvalidSchedule, got {:?}", other),
        }
    }

    #[test]
    fn test_duplicate_income_rejected() {
        let mut table = create_table();
        table.incomes = vec![dec(1000), dec(1000), dec(2000)];
        assert!(table.validate().is_err());
    }

    #[test]
    fn test_misaligned_column_rejected() {
        let mut table = create_table();
        table.obligations.insert(3, vec![dec(240), dec(370)]);

        match table.validate() {
            Err(EngineError::InvalidSchedule { message }) => {
                assert!(message.contains("3 children"));
            }
            other => panic!("Expected InvalidSchedule, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_table_rejected() {
        let table = ScheduleTable {
            incomes: vec![],
            obligations: BTreeMap::new(),
        };
        assert!(table.validate().is_err());
    }

    #[test]
    fn test_missing_column_is_unsupported() {
        let table = create_table();
        match table.column(5) {
            Err(EngineError::UnsupportedChildCount { count }) => assert_eq!(count, 5),
            other => panic!("Expected UnsupportedChildCount, got {:?}", other),
        }
    }

    #[test]
    fn test_child_counts_sorted() {
        let table = create_table();
        assert_eq!(table.child_counts(), vec![1, 2]);
        assert!(table.supports_children(2));
        assert!(!table.supports_children(3));
    }
}
