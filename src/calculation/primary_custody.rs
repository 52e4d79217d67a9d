//! Primary custody worksheet (Worksheet A).
//!
//! The worksheet runs three stages in order: the basic stage from
//! [`compute_basic`], the totals stage that adds add-on expenses and splits
//! the total by income share, and the final stage that credits direct
//! payments and selects the non-custodial parent's amount as the order.
//!
//! Above the top of the schedule the worksheet stops after the basic stage
//! and returns an advisory outcome; no obligation is ever invented there.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{AddOnSet, CaseInputs, CustodyType, Parent, ScheduleTable};

use super::add_on_allocation::{
    direct_pay_consistency_warning, direct_pay_total_for_parent, in_range, split_by_share,
    total_add_ons,
};
use super::income_adjustment::{BasicComputation, compute_basic};

/// Note attached to every result whose combined income exceeds the schedule.
pub const ABOVE_TOP_NOTE: &str = "Combined adjusted income exceeds the highest schedule row; \
     the obligation must be determined by the court and no amount is recommended";

/// The totals stage of Worksheet A.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrimaryTotals {
    /// Sum of declared add-on expenses.
    pub add_ons_total: Decimal,
    /// Basic obligation plus add-ons.
    pub total_obligation: Decimal,
    /// Parent 1 gross obligation.
    pub p1_obligation: Decimal,
    /// Parent 2 gross obligation.
    pub p2_obligation: Decimal,
}

/// A fully computed Worksheet A.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrimaryComputation {
    /// The basic stage.
    pub basic: BasicComputation,
    /// The schedule amount used.
    pub basic_amount: Decimal,
    /// The totals stage.
    pub totals: PrimaryTotals,
    /// The parent with primary custody.
    pub primary_custodian: Parent,
    /// Parent 1 direct payments to providers.
    pub p1_direct_pay: Decimal,
    /// Parent 2 direct payments to providers.
    pub p2_direct_pay: Decimal,
    /// Parent 1 obligation after direct-pay credit, floored at zero.
    pub p1_recommended: Decimal,
    /// Parent 2 obligation after direct-pay credit, floored at zero.
    pub p2_recommended: Decimal,
    /// The non-custodial parent's recommended amount.
    pub recommended_order: Decimal,
    /// Warnings raised while computing.
    pub notes: Vec<String>,
}

impl PrimaryComputation {
    /// The parent the order applies to.
    pub fn payor(&self) -> Parent {
        self.primary_custodian.other()
    }
}

/// The outcome of Worksheet A.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum PrimaryOutcome {
    /// Combined income is above the schedule; only income figures exist.
    Advisory {
        /// The basic stage.
        basic: BasicComputation,
        /// Explanation for the missing amount.
        note: String,
    },
    /// The full worksheet.
    Computed(PrimaryComputation),
}

impl PrimaryOutcome {
    /// The basic stage, present in every outcome.
    pub fn basic(&self) -> &BasicComputation {
        match self {
            PrimaryOutcome::Advisory { basic, .. } => basic,
            PrimaryOutcome::Computed(computation) => &computation.basic,
        }
    }

    /// The recommended order, if one was computed.
    pub fn recommended_order(&self) -> Option<Decimal> {
        match self {
            PrimaryOutcome::Advisory { .. } => None,
            PrimaryOutcome::Computed(computation) => Some(computation.recommended_order),
        }
    }
}

/// Capability to compute Worksheet A for a case.
///
/// The shared custody worksheet receives an implementation of this trait to
/// redirect cases and to compute its cap, rather than calling Worksheet A
/// directly.
pub trait PrimaryWorksheet {
    /// Computes Worksheet A for a case whose custody type is primary.
    fn compute(&self, inputs: &CaseInputs, table: &ScheduleTable) -> EngineResult<PrimaryOutcome>;
}

/// The statutory Worksheet A.
#[derive(Debug, Clone, Copy, Default)]
pub struct WorksheetA;

impl PrimaryWorksheet for WorksheetA {
    fn compute(&self, inputs: &CaseInputs, table: &ScheduleTable) -> EngineResult<PrimaryOutcome> {
        calculate_primary(inputs, table)
    }
}

/// Computes the totals stage.
///
/// Returns `Ok(None)` when the basic stage has no amount (above the top of
/// the schedule).
///
/// # Errors
///
/// Returns `AmountOutOfRange` if a total or an income-share portion
/// overflows.
pub fn compute_primary_totals(
    basic: &BasicComputation,
    add_ons: &AddOnSet,
) -> EngineResult<Option<PrimaryTotals>> {
    let Some(basic_amount) = basic.basic() else {
        return Ok(None);
    };
    let add_ons_total = total_add_ons(add_ons)?;
    let total_obligation = in_range(basic_amount.checked_add(add_ons_total), "total obligation")?;
    let split = split_by_share(total_obligation, basic.p1_share)?;

    Ok(Some(PrimaryTotals {
        add_ons_total,
        total_obligation,
        p1_obligation: split.p1,
        p2_obligation: split.p2,
    }))
}

/// Computes the final stage from the totals.
fn finalize_primary(
    inputs: &CaseInputs,
    basic: BasicComputation,
    basic_amount: Decimal,
    totals: PrimaryTotals,
) -> EngineResult<PrimaryComputation> {
    let p1_direct_pay = direct_pay_total_for_parent(&inputs.direct_payments.p1)?;
    let p2_direct_pay = direct_pay_total_for_parent(&inputs.direct_payments.p2)?;

    let notes: Vec<String> =
        direct_pay_consistency_warning(totals.add_ons_total, p1_direct_pay, p2_direct_pay)?
            .into_iter()
            .collect();

    let p1_recommended = in_range(
        totals.p1_obligation.checked_sub(p1_direct_pay),
        "Parent 1 recommended amount",
    )?
    .max(Decimal::ZERO);
    let p2_recommended = in_range(
        totals.p2_obligation.checked_sub(p2_direct_pay),
        "Parent 2 recommended amount",
    )?
    .max(Decimal::ZERO);

    let recommended_order = match inputs.primary_custodian {
        Parent::P1 => p2_recommended,
        Parent::P2 => p1_recommended,
    };

    Ok(PrimaryComputation {
        basic,
        basic_amount,
        totals,
        primary_custodian: inputs.primary_custodian,
        p1_direct_pay,
        p2_direct_pay,
        p1_recommended,
        p2_recommended,
        recommended_order,
        notes,
    })
}

/// Runs Worksheet A for a primary custody case.
///
/// # Errors
///
/// - `CustodyMismatch` if the case is not a primary custody case
/// - Any schedule error from the basic stage
/// - `AmountOutOfRange` if an amount overflows
///
/// # Examples
///
/// ```
/// use support_engine::calculation::calculate_primary;
/// use support_engine::models::{
///     AddOnSet, CaseInputs, CustodyType, DirectPayments, Parent, ParentIncome, ScheduleTable,
/// };
/// use rust_decimal::Decimal;
/// use std::collections::BTreeMap;
///
/// let mut obligations = BTreeMap::new();
/// obligations.insert(1, vec![Decimal::from(150), Decimal::from(220)]);
/// let table = ScheduleTable {
///     incomes: vec![Decimal::from(1000), Decimal::from(2000)],
///     obligations,
/// };
///
/// let case = CaseInputs {
///     children: 1,
///     custody_type: CustodyType::Primary,
///     primary_custodian: Parent::P2,
///     p1_overnights: 0,
///     parent1: ParentIncome::with_actual(Decimal::from(1000)),
///     parent2: ParentIncome::with_actual(Decimal::from(1000)),
///     add_ons: AddOnSet::default(),
///     direct_payments: DirectPayments::default(),
/// };
///
/// let outcome = calculate_primary(&case, &table).unwrap();
/// assert_eq!(outcome.recommended_order(), Some(Decimal::from(110)));
/// ```
pub fn calculate_primary(
    inputs: &CaseInputs,
    table: &ScheduleTable,
) -> EngineResult<PrimaryOutcome> {
    if inputs.custody_type != CustodyType::Primary {
        return Err(EngineError::CustodyMismatch {
            expected: CustodyType::Primary,
            actual: inputs.custody_type,
        });
    }

    let basic = compute_basic(inputs, table)?;

    let totals = compute_primary_totals(&basic, &inputs.add_ons)?;
    let (basic_amount, totals) = match (basic.basic(), totals) {
        (Some(amount), Some(totals)) => (amount, totals),
        _ => {
            return Ok(PrimaryOutcome::Advisory {
                basic,
                note: ABOVE_TOP_NOTE.to_string(),
            });
        }
    };

    Ok(PrimaryOutcome::Computed(finalize_primary(
        inputs,
        basic,
        basic_amount,
        totals,
    )?))
}
