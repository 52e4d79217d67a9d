//! Add-on expense totals and income-share allocation.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::AddOnSet;

/// Tolerance used when comparing monetary totals.
pub fn money_tolerance() -> Decimal {
    Decimal::new(1, 6)
}

/// A total split between the two parents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareSplit {
    /// Parent 1 portion.
    pub p1: Decimal,
    /// Parent 2 portion.
    pub p2: Decimal,
}

/// Unwraps a checked `Decimal` operation, naming it in the error on overflow.
pub(crate) fn in_range(value: Option<Decimal>, operation: &str) -> EngineResult<Decimal> {
    value.ok_or_else(|| EngineError::AmountOutOfRange {
        operation: operation.to_string(),
    })
}

/// Sums the five add-on categories.
///
/// # Errors
///
/// Returns `AmountOutOfRange` if the sum overflows.
pub fn total_add_ons(set: &AddOnSet) -> EngineResult<Decimal> {
    set.categories()
        .iter()
        .try_fold(Decimal::ZERO, |sum, (_, amount)| {
            in_range(sum.checked_add(*amount), "add-on total")
        })
}

/// Splits a total by Parent 1's income share.
///
/// Parent 2's portion is the remainder, so the two parts always sum to
/// `total`.
///
/// # Examples
///
/// ```
/// use support_engine::calculation::split_by_share;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let share = Decimal::from_str("0.5625").unwrap();
/// let split = split_by_share(Decimal::from(450), share).unwrap();
/// assert_eq!(split.p1, Decimal::from_str("253.125").unwrap());
/// assert_eq!(split.p2, Decimal::from_str("196.875").unwrap());
/// ```
///
/// # Errors
///
/// Returns `AmountOutOfRange` if either portion overflows, which only
/// happens when the share itself is far outside 0..=1.
pub fn split_by_share(total: Decimal, p1_share: Decimal) -> EngineResult<ShareSplit> {
    let p1 = in_range(total.checked_mul(p1_share), "Parent 1 portion")?;
    let p2 = in_range(total.checked_sub(p1), "Parent 2 portion")?;
    Ok(ShareSplit { p1, p2 })
}

/// Sums one parent's direct payments to providers.
pub fn direct_pay_total_for_parent(direct_pay: &AddOnSet) -> EngineResult<Decimal> {
    total_add_ons(direct_pay)
}

/// Produces a note when the parents' direct payments do not add up to the
/// declared add-on total.
///
/// The note is advisory; calculation continues with the figures as given.
pub fn direct_pay_consistency_warning(
    declared_add_ons_total: Decimal,
    p1_direct: Decimal,
    p2_direct: Decimal,
) -> EngineResult<Option<String>> {
    let direct_total = in_range(p1_direct.checked_add(p2_direct), "direct payment total")?;
    let difference = in_range(
        direct_total.checked_sub(declared_add_ons_total),
        "direct payment difference",
    )?;
    if difference.abs() > money_tolerance() {
        Ok(Some(format!(
            "Direct payments (Parent 1 ${:.2} + Parent 2 ${:.2} = ${:.2}) \
             do not match declared add-on expenses of ${:.2}",
            p1_direct, p2_direct, direct_total, declared_add_ons_total
        )))
    } else {
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::test_support::{dec, reference_add_ons};

    #[test]
    fn test_total_add_ons_sums_all_categories() {
        let set = AddOnSet {
            childcare: dec("120"),
            health_insurance: dec("30"),
            extraordinary_medical: dec("15.50"),
            cash_medical: dec("4.50"),
            additional: dec("10"),
        };
        assert_eq!(total_add_ons(&set).unwrap(), dec("180"));
    }

    #[test]
    fn test_total_add_ons_empty_is_zero() {
        assert_eq!(total_add_ons(&AddOnSet::default()).unwrap(), Decimal::ZERO);
    }

    #[test]
    fn test_split_remainder_goes_to_p2() {
        let split = split_by_share(dec("100"), dec("0.3333")).unwrap();
        assert_eq!(split.p1, dec("33.33"));
        assert_eq!(split.p2, dec("66.67"));
        assert_eq!(split.p1 + split.p2, dec("100"));
    }

    #[test]
    fn test_direct_pay_total_matches_add_on_sum() {
        assert_eq!(direct_pay_total_for_parent(&reference_add_ons()).unwrap(), dec("150"));
    }

    #[test]
    fn test_no_warning_when_direct_pay_matches() {
        assert_eq!(
            direct_pay_consistency_warning(dec("150"), dec("120"), dec("30")).unwrap(),
            None
        );
    }

    #[test]
    fn test_no_warning_within_tolerance() {
        assert_eq!(
            direct_pay_consistency_warning(dec("150"), dec("150.0000005"), Decimal::ZERO).unwrap(),
            None
        );
    }

    #[test]
    fn test_warning_formats_two_decimals() {
        let note = direct_pay_consistency_warning(dec("150"), dec("200"), dec("0"))
            .unwrap()
            .unwrap();
        assert!(note.contains("$200.00"), "note was: {}", note);
        assert!(note.contains("$150.00"), "note was: {}", note);
    }

    #[test]
    fn test_total_add_ons_overflow_is_error() {
        let set = AddOnSet {
            childcare: Decimal::MAX,
            additional: Decimal::ONE,
            ..AddOnSet::default()
        };

        match total_add_ons(&set) {
            Err(EngineError::AmountOutOfRange { operation }) => {
                assert_eq!(operation, "add-on total")
            }
            other => panic!("Expected AmountOutOfRange, got {:?}", other),
        }
    }

    #[test]
    fn test_split_with_runaway_share_is_error() {
        let share = dec("10000000000000000000000000000");
        assert!(matches!(
            split_by_share(dec("200"), share),
            Err(EngineError::AmountOutOfRange { .. })
        ));
    }
}
