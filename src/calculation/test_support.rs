//! Shared fixtures for calculation unit tests.

use std::collections::BTreeMap;
use std::str::FromStr;

use rust_decimal::Decimal;

use crate::models::{
    AddOnSet, CaseInputs, CustodyType, DirectPayments, Parent, ParentIncome, ScheduleTable,
};

/// Helper function to create Decimal values from strings
pub fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

/// A three-row schedule with columns for one and two children.
pub fn create_test_table() -> ScheduleTable {
    let mut obligations = BTreeMap::new();
    obligations.insert(1, vec![dec("150"), dec("220"), dec("290")]);
    obligations.insert(2, vec![dec("200"), dec("300"), dec("410")]);
    ScheduleTable {
        incomes: vec![dec("1000"), dec("2000"), dec("3000")],
        obligations,
    }
}

/// A two-child case with the given incomes and no deductions or add-ons.
pub fn create_test_case(
    custody_type: CustodyType,
    p1_income: &str,
    p2_income: &str,
    p1_overnights: u32,
) -> CaseInputs {
    CaseInputs {
        children: 2,
        custody_type,
        primary_custodian: Parent::P2,
        p1_overnights,
        parent1: ParentIncome::with_actual(dec(p1_income)),
        parent2: ParentIncome::with_actual(dec(p2_income)),
        add_ons: AddOnSet::default(),
        direct_payments: DirectPayments::default(),
    }
}

/// Childcare 120 plus health insurance 30.
pub fn reference_add_ons() -> AddOnSet {
    AddOnSet {
        childcare: dec("120"),
        health_insurance: dec("30"),
        ..AddOnSet::default()
    }
}
