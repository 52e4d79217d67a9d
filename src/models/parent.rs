//! Parent identity and income models.
//!
//! This module defines the [`Parent`] designator used throughout the
//! worksheets and the [`ParentIncome`] record holding one parent's monthly
//! financial facts.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Identifies one of the two parents in a case.
///
/// # Example
///
/// ```
/// use support_engine::models::Parent;
///
/// assert_eq!(Parent::P1.other(), Parent::P2);
/// assert_eq!(Parent::P2.to_string(), "Parent 2");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Parent {
    /// Parent 1. Positive signed amounts mean this parent pays.
    P1,
    /// Parent 2. Negative signed amounts mean this parent pays.
    P2,
}

impl Parent {
    /// Returns the opposite parent.
    pub fn other(self) -> Parent {
        match self {
            Parent::P1 => Parent::P2,
            Parent::P2 => Parent::P1,
        }
    }
}

impl fmt::Display for Parent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Parent::P1 => write!(f, "Parent 1"),
            Parent::P2 => write!(f, "Parent 2"),
        }
    }
}

/// One parent's monthly income facts for a single case.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ParentIncome {
    /// Gross actual monthly income.
    pub actual_monthly: Decimal,
    /// Support already being paid for children of a prior order.
    #[serde(default)]
    pub preexisting_support_paid: Decimal,
    /// Alimony paid to a former spouse.
    #[serde(default)]
    pub alimony_paid: Decimal,
    /// Alimony received from a former spouse.
    #[serde(default)]
    pub alimony_received: Decimal,
    /// Children of another relationship living in this parent's home.
    #[serde(default)]
    pub multifamily_children_in_home: u32,
}

impl ParentIncome {
    /// Creates an income record with only an actual monthly figure.
    ///
    /// # Examples
    ///
    /// ```
    /// use support_engine::models::ParentIncome;
    /// use rust_decimal::Decimal;
    ///
    /// let income = ParentIncome::with_actual(Decimal::from(900));
    /// assert_eq!(income.alimony_paid, Decimal::ZERO);
    /// ```
    pub fn with_actual(actual_monthly: Decimal) -> Self {
        Self {
            actual_monthly,
            ..Self::default()
        }
    }
}
