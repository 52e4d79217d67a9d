//! Case result models.
//!
//! This module contains [`CaseOutputs`], the single record returned by
//! [`crate::calculation::calculate_case`], together with the flat
//! [`Worksheet`] line-item map used for display and audit.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Parent;

/// The worksheet that produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorksheetPath {
    /// Primary custody worksheet.
    WorksheetA,
    /// Shared custody worksheet.
    WorksheetB,
}

/// Advisory tags attached to results that need court attention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Advisory {
    /// Combined income is above the highest schedule row; no amount is set.
    AboveTopOfSchedule,
    /// A shared case did not meet the overnight threshold and was computed
    /// on Worksheet A instead.
    RedirectedToWorksheetA,
}

/// Named worksheet line items.
///
/// Keys are stable strings such as `line4_basic`. Absent figures are never
/// stored; [`Worksheet::insert_opt`] skips `None`.
///
/// # Example
///
/// ```
/// use support_engine::models::Worksheet;
/// use rust_decimal::Decimal;
///
/// let mut worksheet = Worksheet::default();
/// worksheet.insert("line4_basic", Decimal::from(300));
/// worksheet.insert_opt("line6_totalObligation", None);
///
/// assert_eq!(worksheet.get("line4_basic"), Some(Decimal::from(300)));
/// assert!(!worksheet.contains("line6_totalObligation"));
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Worksheet(BTreeMap<String, Decimal>);

impl Worksheet {
    /// Records a line item.
    pub fn insert(&mut self, key: &str, value: Decimal) {
        self.0.insert(key.to_string(), value);
    }

    /// Records a line item if a value is present.
    pub fn insert_opt(&mut self, key: &str, value: Option<Decimal>) {
        if let Some(value) = value {
            self.insert(key, value);
        }
    }

    /// Returns a line item's value.
    pub fn get(&self, key: &str) -> Option<Decimal> {
        self.0.get(key).copied()
    }

    /// Returns true if the line item was recorded.
    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }
}

/// The complete result of a case calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseOutputs {
    /// Signed monthly order. Positive means Parent 1 pays Parent 2, negative
    /// means Parent 2 pays Parent 1.
    pub recommended_order: Decimal,
    /// The paying parent, if any.
    pub payor: Option<Parent>,
    /// The worksheet that produced the figures.
    pub path: WorksheetPath,
    /// Every intermediate figure, keyed by worksheet line.
    pub worksheet: Worksheet,
    /// Human-readable notes and warnings.
    pub notes: Vec<String>,
    /// Advisory tag, when the result needs court attention.
    pub advisory: Option<Advisory>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advisory_serialization() {
        assert_eq!(
            serde_json::to_string(&Advisory::AboveTopOfSchedule).unwrap(),
            "\"aboveTopOfSchedule\""
        );
        assert_eq!(
            serde_json::to_string(&Advisory::RedirectedToWorksheetA).unwrap(),
            "\"redirectedToWorksheetA\""
        );
    }

    #[test]
    fn test_worksheet_path_serialization() {
        assert_eq!(
            serde_json::to_string(&WorksheetPath::WorksheetB).unwrap(),
            "\"worksheet_b\""
        );
    }

    #[test]
    fn test_worksheet_serializes_as_flat_map() {
        let mut worksheet = Worksheet::default();
        worksheet.insert("line4_basic", Decimal::from(300));
        worksheet.insert_opt("line5_addOnsTotal", None);

        let json = serde_json::to_value(&worksheet).unwrap();
        assert_eq!(json["line4_basic"], "300");
        assert!(json.get("line5_addOnsTotal").is_none());
        assert!(!worksheet.contains("line5_addOnsTotal"));
    }
}
