//! Add-on expense model.
//!
//! An [`AddOnSet`] is used both for the case-wide declared add-on expenses
//! and for each parent's direct payments to providers.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The five monthly add-on expense categories.
///
/// Every category defaults to zero when absent from a request.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AddOnSet {
    /// Work-related childcare.
    pub childcare: Decimal,
    /// Health insurance premium attributable to the children.
    pub health_insurance: Decimal,
    /// Extraordinary medical expenses.
    pub extraordinary_medical: Decimal,
    /// Cash medical support (IV-D).
    pub cash_medical: Decimal,
    /// Any additional expenses ordered by the court.
    pub additional: Decimal,
}

impl AddOnSet {
    /// Returns the categories as labelled pairs, in worksheet order.
    pub fn categories(&self) -> [(&'static str, Decimal); 5] {
        [
            ("childcare", self.childcare),
            ("health_insurance", self.health_insurance),
            ("extraordinary_medical", self.extraordinary_medical),
            ("cash_medical", self.cash_medical),
            ("additional", self.additional),
        ]
    }
}
