//! Basic obligation lookup.
//!
//! This module implements the next-higher-row rule used to read the basic
//! obligation for a combined income from the [`ScheduleTable`].

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::EngineResult;
use crate::models::ScheduleTable;

/// How a combined income relates to the schedule rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LookupStatus {
    /// Income fell on or between schedule rows.
    Ok,
    /// Income is at or below the first row. Informational only; the first
    /// row's amount is used exactly as for `Ok`.
    AtOrBelowMinimum,
    /// Income exceeds the highest row. No amount is available.
    AboveTop,
}

/// The schedule row a lookup selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleRow {
    /// Zero-based row index.
    pub index: usize,
    /// The row's income breakpoint.
    pub income: Decimal,
}

/// The outcome of a basic obligation lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupResult {
    /// Where the income fell in the schedule.
    pub status: LookupStatus,
    /// The obligation amount; always `None` when `status` is `AboveTop`.
    pub amount: Option<Decimal>,
    /// The row used, if any.
    pub row: Option<ScheduleRow>,
}

/// Looks up the basic obligation for a combined income and child count.
///
/// The table is validated on every call. The selected row is the smallest
/// breakpoint greater than or equal to `combined_income`; amounts are never
/// interpolated or extrapolated.
///
/// # Errors
///
/// - `InvalidSchedule` if the table is structurally malformed
/// - `UnsupportedChildCount` if the table has no column for `children`
///
/// # Examples
///
/// ```
/// use support_engine::calculation::{LookupStatus, lookup_basic_obligation};
/// use support_engine::models::ScheduleTable;
/// use rust_decimal::Decimal;
/// use std::collections::BTreeMap;
///
/// let mut obligations = BTreeMap::new();
/// obligations.insert(2, vec![Decimal::from(200), Decimal::from(300)]);
/// let table = ScheduleTable {
///     incomes: vec![Decimal::from(1000), Decimal::from(2000)],
///     obligations,
/// };
///
/// let result = lookup_basic_obligation(&table, Decimal::from(1600), 2).unwrap();
/// assert_eq!(result.status, LookupStatus::Ok);
/// assert_eq!(result.amount, Some(Decimal::from(300)));
/// ```
pub fn lookup_basic_obligation(
    table: &ScheduleTable,
    combined_income: Decimal,
    children: u32,
) -> EngineResult<LookupResult> {
    table.validate()?;
    let column = table.column(children)?;

    let index = table.incomes.partition_point(|&breakpoint| breakpoint < combined_income);

    if index == table.incomes.len() {
        return Ok(LookupResult {
            status: LookupStatus::AboveTop,
            amount: None,
            row: None,
        });
    }

    let status = if index == 0 {
        LookupStatus::AtOrBelowMinimum
    } else {
        LookupStatus::Ok
    };

    Ok(LookupResult {
        status,
        amount: Some(column[index]),
        row: Some(ScheduleRow {
            index,
            income: table.incomes[index],
        }),
    })
}
