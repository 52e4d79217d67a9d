//! Request types for the worksheet engine API.
//!
//! This module defines the JSON body of the `/calculate` endpoint and its
//! validation into a [`CaseInputs`] record.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{
    AddOnSet, CaseInputs, CustodyType, DirectPayments, NIGHTS_PER_YEAR, Parent, ParentIncome,
};

/// Request body for the `/calculate` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseRequest {
    /// Number of children covered by the case.
    pub children: u32,
    /// The custody arrangement.
    pub custody_type: CustodyType,
    /// The primary custodian; required for primary custody.
    #[serde(default)]
    pub primary_custodian: Option<Parent>,
    /// Overnights per year with Parent 1; required for shared custody.
    #[serde(default)]
    pub p1_overnights: Option<u32>,
    /// Parent 1 income facts.
    pub parent1: ParentIncome,
    /// Parent 2 income facts.
    pub parent2: ParentIncome,
    /// Declared add-on expenses.
    #[serde(default)]
    pub add_ons: AddOnSet,
    /// Direct payments to providers.
    #[serde(default)]
    pub direct_payments: DirectPayments,
}

fn invalid(field: impl Into<String>, message: impl Into<String>) -> EngineError {
    EngineError::InvalidCase {
        field: field.into(),
        message: message.into(),
    }
}

/// Largest monthly amount accepted for any money field.
fn max_monthly_amount() -> Decimal {
    Decimal::from(1_000_000_000)
}

fn require_amount_in_range(field: &str, value: Decimal) -> EngineResult<()> {
    if value < Decimal::ZERO {
        return Err(invalid(field, format!("must not be negative (got {})", value)));
    }
    if value > max_monthly_amount() {
        return Err(invalid(
            field,
            format!("must not exceed {} (got {})", max_monthly_amount(), value),
        ));
    }
    Ok(())
}

fn validate_income(prefix: &str, income: &ParentIncome) -> EngineResult<()> {
    require_amount_in_range(&format!("{}.actual_monthly", prefix), income.actual_monthly)?;
    require_amount_in_range(
        &format!("{}.preexisting_support_paid", prefix),
        income.preexisting_support_paid,
    )?;
    require_amount_in_range(&format!("{}.alimony_paid", prefix), income.alimony_paid)?;
    require_amount_in_range(
        &format!("{}.alimony_received", prefix),
        income.alimony_received,
    )
}

fn validate_add_ons(prefix: &str, set: &AddOnSet) -> EngineResult<()> {
    for (category, amount) in set.categories() {
        require_amount_in_range(&format!("{}.{}", prefix, category), amount)?;
    }
    Ok(())
}

impl TryFrom<CaseRequest> for CaseInputs {
    type Error = EngineError;

    fn try_from(req: CaseRequest) -> EngineResult<Self> {
        if req.children == 0 {
            return Err(invalid("children", "must be at least 1"));
        }

        let p1_overnights = match (req.custody_type, req.p1_overnights) {
            (_, Some(nights)) if nights > NIGHTS_PER_YEAR => {
                return Err(invalid(
                    "p1_overnights",
                    format!("must be between 0 and {}", NIGHTS_PER_YEAR),
                ));
            }
            (_, Some(nights)) => nights,
            (CustodyType::Shared, None) => {
                return Err(invalid("p1_overnights", "is required for shared custody"));
            }
            (CustodyType::Primary, None) => 0,
        };

        let primary_custodian = match (req.custody_type, req.primary_custodian) {
            (_, Some(parent)) => parent,
            (CustodyType::Primary, None) => {
                return Err(invalid(
                    "primary_custodian",
                    "is required for primary custody",
                ));
            }
            (CustodyType::Shared, None) => Parent::P1,
        };

        validate_income("parent1", &req.parent1)?;
        validate_income("parent2", &req.parent2)?;
        validate_add_ons("add_ons", &req.add_ons)?;
        validate_add_ons("direct_payments.p1", &req.direct_payments.p1)?;
        validate_add_ons("direct_payments.p2", &req.direct_payments.p2)?;

        Ok(CaseInputs {
            children: req.children,
            custody_type: req.custody_type,
            primary_custodian,
            p1_overnights,
            parent1: req.parent1,
            parent2: req.parent2,
            add_ons: req.add_ons,
            direct_payments: req.direct_payments,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> CaseRequest {
        serde_json::from_str(json).unwrap()
    }

    fn expect_invalid(request: CaseRequest, expected_field: &str) {
        match CaseInputs::try_from(request) {
            Err(EngineError::InvalidCase { field, .. }) => assert_eq!(field, expected_field),
            other => panic!("Expected InvalidCase for {}, got {:?}", expected_field, other),
        }
    }

    const PRIMARY_REQUEST: &str = r#"{
        "children": 2,
        "custody_type": "primary",
        "primary_custodian": "P2",
        "parent1": { "actual_monthly": "900" },
        "parent2": { "actual_monthly": 700 },
        "add_ons": { "childcare": "120", "health_insurance": "30" }
    }"#;

    #[test]
    fn test_deserialize_primary_request() {
        let request = parse(PRIMARY_REQUEST);
        assert_eq!(request.children, 2);
        assert_eq!(request.custody_type, CustodyType::Primary);
        assert_eq!(request.primary_custodian, Some(Parent::P2));
        assert_eq!(request.p1_overnights, None);
        assert_eq!(request.parent2.actual_monthly, Decimal::from(700));
        assert_eq!(request.direct_payments, DirectPayments::default());
    }

    #[test]
    fn test_primary_request_converts() {
        let inputs = CaseInputs::try_from(parse(PRIMARY_REQUEST)).unwrap();
        assert_eq!(inputs.primary_custodian, Parent::P2);
        assert_eq!(inputs.p1_overnights, 0);
        assert_eq!(inputs.add_ons.childcare, Decimal::from(120));
    }

    #[test]
    fn test_shared_request_defaults_custodian() {
        let request = parse(
            r#"{
                "children": 1,
                "custody_type": "shared",
                "p1_overnights": 200,
                "parent1": { "actual_monthly": "900" },
                "parent2": { "actual_monthly": "700" }
            }"#,
        );

        let inputs = CaseInputs::try_from(request).unwrap();
        assert_eq!(inputs.primary_custodian, Parent::P1);
        assert_eq!(inputs.p1_overnights, 200);
    }

    #[test]
    fn test_zero_children_rejected() {
        let mut request = parse(PRIMARY_REQUEST);
        request.children = 0;
        expect_invalid(request, "children");
    }

    #[test]
    fn test_overnights_beyond_year_rejected() {
        let mut request = parse(PRIMARY_REQUEST);
        request.p1_overnights = Some(366);
        expect_invalid(request, "p1_overnights");
    }

    #[test]
    fn test_shared_without_overnights_rejected() {
        let mut request = parse(PRIMARY_REQUEST);
        request.custody_type = CustodyType::Shared;
        expect_invalid(request, "p1_overnights");
    }

    #[test]
    fn test_primary_without_custodian_rejected() {
        let mut request = parse(PRIMARY_REQUEST);
        request.primary_custodian = None;
        expect_invalid(request, "primary_custodian");
    }

    #[test]
    fn test_negative_income_rejected() {
        let mut request = parse(PRIMARY_REQUEST);
        request.parent2.alimony_paid = Decimal::from(-5);
        expect_invalid(request, "parent2.alimony_paid");
    }

    #[test]
    fn test_negative_direct_payment_rejected() {
        let mut request = parse(PRIMARY_REQUEST);
        request.direct_payments.p1.cash_medical = Decimal::from(-1);
        expect_invalid(request, "direct_payments.p1.cash_medical");
    }

    #[test]
    fn test_income_above_ceiling_rejected() {
        let mut request = parse(PRIMARY_REQUEST);
        request.parent1.actual_monthly = Decimal::MAX / Decimal::TWO + Decimal::ONE;

        match CaseInputs::try_from(request) {
            Err(EngineError::InvalidCase { field, message }) => {
                assert_eq!(field, "parent1.actual_monthly");
                assert!(message.contains("must not exceed 1000000000"), "{}", message);
            }
            other => panic!("Expected InvalidCase, got {:?}", other),
        }
    }

    #[test]
    fn test_add_on_above_ceiling_rejected() {
        let mut request = parse(PRIMARY_REQUEST);
        request.add_ons.extraordinary_medical = Decimal::from(1_000_000_001);
        expect_invalid(request, "add_ons.extraordinary_medical");
    }

    #[test]
    fn test_amount_at_ceiling_accepted() {
        let mut request = parse(PRIMARY_REQUEST);
        request.parent2.preexisting_support_paid = Decimal::from(1_000_000_000);
        assert!(CaseInputs::try_from(request).is_ok());
    }
}
