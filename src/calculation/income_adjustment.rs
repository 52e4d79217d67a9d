//! Adjusted actual income and basic obligation.
//!
//! This module computes each parent's Adjusted Actual Income (AAI), the
//! multifamily allowance for children of another relationship in the home,
//! income shares, and the schedule lookup shared by both worksheets.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::EngineResult;
use crate::models::{CaseInputs, Parent, ParentIncome, ScheduleTable};

use super::add_on_allocation::in_range;
use super::schedule_lookup::{LookupResult, lookup_basic_obligation};

/// Returns the multifamily allowance factor (75% of the one-child amount).
pub fn multifamily_factor() -> Decimal {
    Decimal::new(75, 2)
}

/// Income share used for both parents when combined AAI is exactly zero.
pub fn zero_income_share() -> Decimal {
    Decimal::new(5, 1)
}

/// The basic stage shared by Worksheets A and B.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BasicComputation {
    /// Parent 1 multifamily allowance.
    pub p1_multifamily_allowance: Decimal,
    /// Parent 2 multifamily allowance.
    pub p2_multifamily_allowance: Decimal,
    /// Parent 1 adjusted actual income.
    pub p1_aai: Decimal,
    /// Parent 2 adjusted actual income.
    pub p2_aai: Decimal,
    /// Sum of both parents' AAI.
    pub combined_aai: Decimal,
    /// Parent 1 share of combined AAI.
    pub p1_share: Decimal,
    /// Parent 2 share of combined AAI, always `1 - p1_share`.
    pub p2_share: Decimal,
    /// The schedule lookup for the combined AAI.
    pub lookup: LookupResult,
}

impl BasicComputation {
    /// The basic obligation, or `None` above the top of the schedule.
    pub fn basic(&self) -> Option<Decimal> {
        self.lookup.amount
    }

    /// Income of the schedule row that was used.
    pub fn used_row_income(&self) -> Option<Decimal> {
        self.lookup.row.map(|row| row.income)
    }

    /// The given parent's income share.
    pub fn share(&self, parent: Parent) -> Decimal {
        match parent {
            Parent::P1 => self.p1_share,
            Parent::P2 => self.p2_share,
        }
    }
}

/// Computes a parent's Adjusted Actual Income.
///
/// The result is not floored at zero; deductions larger than income yield a
/// negative AAI that flows into the share computation unchanged.
///
/// # Errors
///
/// Returns `AmountOutOfRange` if an intermediate amount overflows.
///
/// # Examples
///
/// ```
/// use support_engine::calculation::adjusted_actual_income;
/// use support_engine::models::ParentIncome;
/// use rust_decimal::Decimal;
///
/// let parent = ParentIncome {
///     actual_monthly: Decimal::from(3000),
///     preexisting_support_paid: Decimal::from(200),
///     alimony_paid: Decimal::from(100),
///     alimony_received: Decimal::from(50),
///     multifamily_children_in_home: 0,
/// };
/// let aai = adjusted_actual_income(&parent, Decimal::ZERO).unwrap();
/// assert_eq!(aai, Decimal::from(2750));
/// ```
pub fn adjusted_actual_income(
    parent: &ParentIncome,
    multifamily_allowance: Decimal,
) -> EngineResult<Decimal> {
    [
        -parent.preexisting_support_paid,
        -parent.alimony_paid,
        parent.alimony_received,
        -multifamily_allowance,
    ]
    .into_iter()
    .try_fold(parent.actual_monthly, |aai, adjustment| {
        in_range(aai.checked_add(adjustment), "adjusted actual income")
    })
}

/// Computes the multifamily allowance for a parent.
///
/// The one-child amount is looked up using the parent's own actual income,
/// not the combined income. When that income is above the top of the
/// schedule the highest one-child amount is used as a ceiling. The base is
/// then multiplied by 0.75 and by the number of children in the home.
///
/// # Errors
///
/// Returns an error if the table is malformed or has no one-child column.
pub fn multifamily_allowance(
    table: &ScheduleTable,
    parent: &ParentIncome,
) -> EngineResult<Decimal> {
    if parent.multifamily_children_in_home == 0 {
        return Ok(Decimal::ZERO);
    }

    let lookup = lookup_basic_obligation(table, parent.actual_monthly, 1)?;
    let base = match lookup.amount {
        Some(amount) => amount,
        None => table.highest_obligation(1)?,
    };

    let per_child = in_range(base.checked_mul(multifamily_factor()), "multifamily allowance")?;
    in_range(
        per_child.checked_mul(Decimal::from(parent.multifamily_children_in_home)),
        "multifamily allowance",
    )
}

/// Computes both parents' AAI, their income shares, and the basic obligation.
///
/// When combined AAI is exactly zero each parent is assigned a 50% share.
/// This is a policy fallback rather than a mathematical necessity.
///
/// # Errors
///
/// Returns a schedule error from the lookup, or `AmountOutOfRange` when the
/// combined income or a share cannot be represented. A combined AAI close to
/// zero next to large individual incomes produces such a share.
pub fn compute_basic(inputs: &CaseInputs, table: &ScheduleTable) -> EngineResult<BasicComputation> {
    let p1_multifamily_allowance = multifamily_allowance(table, &inputs.parent1)?;
    let p2_multifamily_allowance = multifamily_allowance(table, &inputs.parent2)?;

    let p1_aai = adjusted_actual_income(&inputs.parent1, p1_multifamily_allowance)?;
    let p2_aai = adjusted_actual_income(&inputs.parent2, p2_multifamily_allowance)?;
    let combined_aai = in_range(p1_aai.checked_add(p2_aai), "combined AAI")?;

    let p1_share = if combined_aai.is_zero() {
        zero_income_share()
    } else {
        in_range(p1_aai.checked_div(combined_aai), "Parent 1 income share")?
    };
    let p2_share = in_range(Decimal::ONE.checked_sub(p1_share), "Parent 2 income share")?;

    let lookup = lookup_basic_obligation(table, combined_aai, inputs.children)?;

    Ok(BasicComputation {
        p1_multifamily_allowance,
        p2_multifamily_allowance,
        p1_aai,
        p2_aai,
        combined_aai,
        p1_share,
        p2_share,
        lookup,
    })
}
