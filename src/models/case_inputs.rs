//! Case input models.
//!
//! This module defines [`CaseInputs`], the validated case record consumed by
//! the worksheet pipelines, and the [`CustodyType`] that selects between them.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{AddOnSet, Parent, ParentIncome};

/// Nights in the year used for overnight proration.
pub const NIGHTS_PER_YEAR: u32 = 365;

/// The custody arrangement that selects the worksheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CustodyType {
    /// One parent has primary physical custody (Worksheet A).
    Primary,
    /// Both parents share physical custody (Worksheet B).
    Shared,
}

impl fmt::Display for CustodyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CustodyType::Primary => write!(f, "primary"),
            CustodyType::Shared => write!(f, "shared"),
        }
    }
}

/// Direct payments each parent makes straight to add-on providers.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DirectPayments {
    /// Payments made by Parent 1.
    pub p1: AddOnSet,
    /// Payments made by Parent 2.
    pub p2: AddOnSet,
}

impl DirectPayments {
    /// Returns the direct-payment record for the given parent.
    pub fn for_parent(&self, parent: Parent) -> &AddOnSet {
        match parent {
            Parent::P1 => &self.p1,
            Parent::P2 => &self.p2,
        }
    }
}

/// A validated child support case.
///
/// Values of this type are expected to satisfy every input invariant
/// (non-negative amounts, overnights within a year, at least one child).
/// The request layer in [`crate::api`] enforces them; the worksheets do not
/// re-validate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseInputs {
    /// Number of children covered by this case.
    pub children: u32,
    /// The custody arrangement.
    pub custody_type: CustodyType,
    /// The parent with primary physical custody.
    pub primary_custodian: Parent,
    /// Overnights per year spent with Parent 1.
    pub p1_overnights: u32,
    /// Parent 1 income facts.
    pub parent1: ParentIncome,
    /// Parent 2 income facts.
    pub parent2: ParentIncome,
    /// Case-wide declared add-on expenses.
    pub add_ons: AddOnSet,
    /// Per-parent direct payments to providers.
    pub direct_payments: DirectPayments,
}

impl CaseInputs {
    /// Returns a copy of this case re-routed to Worksheet A with the given
    /// custodian.
    ///
    /// # Examples
    ///
    /// ```
    /// use support_engine::models::{
    ///     AddOnSet, CaseInputs, CustodyType, DirectPayments, Parent, ParentIncome,
    /// };
    /// use rust_decimal::Decimal;
    ///
    /// let case = CaseInputs {
    ///     children: 1,
    ///     custody_type: CustodyType::Shared,
    ///     primary_custodian: Parent::P1,
    ///     p1_overnights: 200,
    ///     parent1: ParentIncome::with_actual(Decimal::from(1000)),
    ///     parent2: ParentIncome::with_actual(Decimal::from(800)),
    ///     add_ons: AddOnSet::default(),
    ///     direct_payments: DirectPayments::default(),
    /// };
    ///
    /// let primary = case.as_primary(Parent::P2);
    /// assert_eq!(primary.custody_type, CustodyType::Primary);
    /// assert_eq!(primary.primary_custodian, Parent::P2);
    /// ```
    pub fn as_primary(&self, custodian: Parent) -> CaseInputs {
        CaseInputs {
            custody_type: CustodyType::Primary,
            primary_custodian: custodian,
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn create_case(p1_overnights: u32) -> CaseInputs {
        CaseInputs {
            children: 2,
            custody_type: CustodyType::Shared,
            primary_custodian: Parent::P1,
            p1_overnights,
            parent1: ParentIncome::with_actual(Decimal::from(900)),
            parent2: ParentIncome::with_actual(Decimal::from(700)),
            add_ons: AddOnSet::default(),
            direct_payments: DirectPayments::default(),
        }
    }

    #[test]
    fn test_as_primary_keeps_financials() {
        let case = create_case(80);
        let primary = case.as_primary(Parent::P2);
        assert_eq!(primary.custody_type, CustodyType::Primary);
        assert_eq!(primary.primary_custodian, Parent::P2);
        assert_eq!(primary.parent1, case.parent1);
        assert_eq!(primary.p1_overnights, 80);
    }

    #[test]
    fn test_custody_type_serialization() {
        assert_eq!(
            serde_json::to_string(&CustodyType::Shared).unwrap(),
            "\"shared\""
        );
        let custody: CustodyType = serde_json::from_str("\"primary\"").unwrap();
        assert_eq!(custody, CustodyType::Primary);
    }
}
