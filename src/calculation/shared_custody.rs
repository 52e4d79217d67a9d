//! Shared custody worksheet (Worksheet B).
//!
//! Worksheet B prorates a 150% basic obligation by overnights, reduces the
//! obligation of a parent with 92 to 109 overnights, then nets the two
//! parents' amounts against each other. It has three outcomes:
//!
//! - **Advisory**: combined income is above the schedule.
//! - **Redirected**: a parent has fewer than 25% of overnights, so the case
//!   is computed on Worksheet A with the parent holding more overnights as
//!   custodian.
//! - **Computed**: the netted amount, capped at the Worksheet A amount for
//!   the same case with the non-paying parent as custodian.
//!
//! Worksheet A is reached only through the injected [`PrimaryWorksheet`].

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{CaseInputs, CustodyType, NIGHTS_PER_YEAR, Parent, ScheduleTable};

use super::add_on_allocation::{
    ShareSplit, direct_pay_consistency_warning, direct_pay_total_for_parent, in_range,
    money_tolerance, split_by_share, total_add_ons,
};
use super::income_adjustment::{BasicComputation, compute_basic};
use super::primary_custody::{ABOVE_TOP_NOTE, PrimaryOutcome, PrimaryWorksheet};

/// First overnight count that receives the low-time reduction.
pub const REDUCTION_BAND_START: u32 = 92;

/// Overnight count at which the low-time reduction reaches zero.
pub const REDUCTION_BAND_END: u32 = 110;

/// Minimum overnight fraction each parent needs for Worksheet B.
pub fn shared_threshold() -> Decimal {
    Decimal::new(25, 2)
}

/// Multiplier applied to the basic obligation for shared custody.
pub fn shared_basic_multiplier() -> Decimal {
    Decimal::new(15, 1)
}

/// Each parent's overnights and fraction of the year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OvernightSplit {
    /// Overnights with Parent 1.
    pub p1_nights: u32,
    /// Overnights with Parent 2.
    pub p2_nights: u32,
    /// Parent 1 fraction of the year.
    pub p1_pct: Decimal,
    /// Parent 2 fraction of the year, always `1 - p1_pct`.
    pub p2_pct: Decimal,
}

impl OvernightSplit {
    /// Builds the split from Parent 1's overnights, clamped to a year.
    ///
    /// # Examples
    ///
    /// ```
    /// use support_engine::calculation::OvernightSplit;
    ///
    /// let split = OvernightSplit::from_p1_overnights(400);
    /// assert_eq!(split.p1_nights, 365);
    /// assert_eq!(split.p2_nights, 0);
    /// ```
    pub fn from_p1_overnights(p1_overnights: u32) -> Self {
        let p1_nights = p1_overnights.min(NIGHTS_PER_YEAR);
        let p1_pct = Decimal::from(p1_nights) / Decimal::from(NIGHTS_PER_YEAR);
        Self {
            p1_nights,
            p2_nights: NIGHTS_PER_YEAR - p1_nights,
            p1_pct,
            p2_pct: Decimal::ONE - p1_pct,
        }
    }

    /// Overnights with the given parent.
    pub fn nights(&self, parent: Parent) -> u32 {
        match parent {
            Parent::P1 => self.p1_nights,
            Parent::P2 => self.p2_nights,
        }
    }

    /// The given parent's fraction of the year.
    pub fn pct(&self, parent: Parent) -> Decimal {
        match parent {
            Parent::P1 => self.p1_pct,
            Parent::P2 => self.p2_pct,
        }
    }

    /// Returns true if both parents have at least 25% of overnights.
    pub fn meets_shared_threshold(&self) -> bool {
        self.p1_pct >= shared_threshold() && self.p2_pct >= shared_threshold()
    }

    /// The parent with more overnights. Ties go to Parent 1.
    pub fn majority_parent(&self) -> Parent {
        if self.p1_nights >= self.p2_nights {
            Parent::P1
        } else {
            Parent::P2
        }
    }
}

/// Reduction applied to a parent's theoretical obligation for their own
/// overnights.
///
/// Inside the 92..=109 band the reduction falls linearly from the whole
/// theoretical amount at 92 nights to nothing at 110. Outside the band it is
/// zero; the below-92 branch cannot be reached once the 25% threshold holds
/// but is kept as a guard.
///
/// # Examples
///
/// ```
/// use support_engine::calculation::overnight_adjustment;
/// use rust_decimal::Decimal;
///
/// let theoretical = Decimal::from(180);
/// assert_eq!(overnight_adjustment(theoretical, 92).unwrap(), Decimal::from(180));
/// assert_eq!(overnight_adjustment(theoretical, 101).unwrap(), Decimal::from(90));
/// assert_eq!(overnight_adjustment(theoretical, 110).unwrap(), Decimal::ZERO);
/// ```
///
/// # Errors
///
/// Returns `AmountOutOfRange` if the scaled amount overflows.
pub fn overnight_adjustment(theoretical: Decimal, own_nights: u32) -> EngineResult<Decimal> {
    if !(REDUCTION_BAND_START..REDUCTION_BAND_END).contains(&own_nights) {
        return Ok(Decimal::ZERO);
    }

    let remaining = Decimal::from(REDUCTION_BAND_END - own_nights);
    let span = Decimal::from(REDUCTION_BAND_END - REDUCTION_BAND_START);
    let scaled = in_range(theoretical.checked_mul(remaining), "overnight adjustment")?;
    in_range(scaled.checked_div(span), "overnight adjustment")
}

/// One parent's column of Worksheet B.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SharedParentLine {
    /// Adjusted basic obligation times this parent's income share.
    pub share_of_adjusted_basic: Decimal,
    /// Share of adjusted basic times the other parent's overnight fraction.
    pub theoretical: Decimal,
    /// 92-109 overnight reduction.
    pub overnight_adjustment: Decimal,
    /// Theoretical obligation after the reduction, floored at zero.
    pub adjusted: Decimal,
    /// This parent's share of add-on expenses.
    pub add_ons: Decimal,
    /// Adjusted obligation plus add-ons.
    pub total: Decimal,
    /// Direct payments made to providers.
    pub direct_pay: Decimal,
    /// Total less direct payments, floored at zero.
    pub final_amount: Decimal,
}

/// Comparison of the shared amount with the equivalent Worksheet A order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapComparison {
    /// Worksheet A order with the non-payor as custodian.
    pub primary_amount: Decimal,
    /// Shared amount before the cap.
    pub before: Decimal,
    /// Shared amount after the cap.
    pub after: Decimal,
    /// True if the cap lowered the amount.
    pub applied: bool,
}

/// A fully computed Worksheet B.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SharedComputation {
    /// The basic stage.
    pub basic: BasicComputation,
    /// The schedule amount used.
    pub basic_amount: Decimal,
    /// Overnight counts and fractions.
    pub overnights: OvernightSplit,
    /// Basic obligation times 1.5.
    pub adjusted_basic: Decimal,
    /// Sum of declared add-on expenses.
    pub add_ons_total: Decimal,
    /// Parent 1 column.
    pub p1: SharedParentLine,
    /// Parent 2 column.
    pub p2: SharedParentLine,
    /// Parent 1 final amount less Parent 2 final amount.
    pub net: Decimal,
    /// The paying parent, or `None` when the amounts offset.
    pub payor: Option<Parent>,
    /// The cap comparison, present whenever there is a payor.
    pub cap: Option<CapComparison>,
    /// Unsigned amount after the cap.
    pub recommended_amount: Decimal,
    /// Warnings raised while computing.
    pub notes: Vec<String>,
}

impl SharedComputation {
    /// The recommended amount signed by payor: positive when Parent 1 pays.
    pub fn signed_order(&self) -> Decimal {
        match self.payor {
            Some(Parent::P1) => self.recommended_amount,
            Some(Parent::P2) => -self.recommended_amount,
            None => Decimal::ZERO,
        }
    }
}

/// A shared case recomputed on Worksheet A.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SharedRedirect {
    /// The parent chosen as primary custodian.
    pub custodian: Parent,
    /// The overnights that failed the threshold.
    pub overnights: OvernightSplit,
    /// The Worksheet A result.
    pub primary: PrimaryOutcome,
    /// Explanation naming the custodian and the reason.
    pub note: String,
}

/// The outcome of Worksheet B.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SharedOutcome {
    /// Combined income is above the schedule.
    Advisory {
        /// The basic stage.
        basic: BasicComputation,
        /// Explanation for the missing amount.
        note: String,
    },
    /// The overnight threshold was not met.
    Redirected(SharedRedirect),
    /// The full worksheet.
    Computed(SharedComputation),
}

fn parent_line(
    inputs: &CaseInputs,
    basic: &BasicComputation,
    overnights: &OvernightSplit,
    adjusted_basic: Decimal,
    add_on_split: ShareSplit,
    parent: Parent,
) -> EngineResult<SharedParentLine> {
    let share_of_adjusted_basic = in_range(
        adjusted_basic.checked_mul(basic.share(parent)),
        "share of adjusted basic",
    )?;
    let theoretical = in_range(
        share_of_adjusted_basic.checked_mul(overnights.pct(parent.other())),
        "theoretical obligation",
    )?;
    let overnight_adjustment = overnight_adjustment(theoretical, overnights.nights(parent))?;
    let adjusted = in_range(
        theoretical.checked_sub(overnight_adjustment),
        "adjusted obligation",
    )?
    .max(Decimal::ZERO);

    let add_ons = match parent {
        Parent::P1 => add_on_split.p1,
        Parent::P2 => add_on_split.p2,
    };
    let total = in_range(adjusted.checked_add(add_ons), "shared total")?;
    let direct_pay = direct_pay_total_for_parent(inputs.direct_payments.for_parent(parent))?;
    let final_amount = in_range(total.checked_sub(direct_pay), "shared final amount")?;

    Ok(SharedParentLine {
        share_of_adjusted_basic,
        theoretical,
        overnight_adjustment,
        adjusted,
        add_ons,
        total,
        direct_pay,
        final_amount: final_amount.max(Decimal::ZERO),
    })
}

/// Runs Worksheet B for a shared custody case.
///
/// `primary` computes Worksheet A for redirected cases and for the cap.
///
/// # Errors
///
/// - `CustodyMismatch` if the case is not a shared custody case
/// - Any schedule error, including those raised by `primary`
/// - `AmountOutOfRange` if an amount overflows
pub fn calculate_shared<W: PrimaryWorksheet + ?Sized>(
    inputs: &CaseInputs,
    table: &ScheduleTable,
    primary: &W,
) -> EngineResult<SharedOutcome> {
    if inputs.custody_type != CustodyType::Shared {
        return Err(EngineError::CustodyMismatch {
            expected: CustodyType::Shared,
            actual: inputs.custody_type,
        });
    }

    let basic = compute_basic(inputs, table)?;
    let Some(basic_amount) = basic.basic() else {
        return Ok(SharedOutcome::Advisory {
            basic,
            note: ABOVE_TOP_NOTE.to_string(),
        });
    };

    let overnights = OvernightSplit::from_p1_overnights(inputs.p1_overnights);
    if !overnights.meets_shared_threshold() {
        let custodian = overnights.majority_parent();
        let outcome = primary.compute(&inputs.as_primary(custodian), table)?;
        let note = format!(
            "Shared custody threshold not met (Parent 1: {} overnights, Parent 2: {} overnights; \
             each parent needs at least 25% of the year); calculated on Worksheet A with {} as \
             primary custodian",
            overnights.p1_nights, overnights.p2_nights, custodian
        );
        return Ok(SharedOutcome::Redirected(SharedRedirect {
            custodian,
            overnights,
            primary: outcome,
            note,
        }));
    }

    let adjusted_basic = in_range(
        basic_amount.checked_mul(shared_basic_multiplier()),
        "adjusted basic obligation",
    )?;
    let add_ons_total = total_add_ons(&inputs.add_ons)?;
    let add_on_split = split_by_share(add_ons_total, basic.p1_share)?;

    let p1 = parent_line(inputs, &basic, &overnights, adjusted_basic, add_on_split, Parent::P1)?;
    let p2 = parent_line(inputs, &basic, &overnights, adjusted_basic, add_on_split, Parent::P2)?;

    let notes: Vec<String> =
        direct_pay_consistency_warning(add_ons_total, p1.direct_pay, p2.direct_pay)?
            .into_iter()
            .collect();

    // Both final amounts are floored at zero
    let net = p1.final_amount - p2.final_amount;
    let payor = if net.abs() <= money_tolerance() {
        None
    } else if net > Decimal::ZERO {
        Some(Parent::P1)
    } else {
        Some(Parent::P2)
    };

    let (cap, recommended_amount) = match payor {
        None => (None, Decimal::ZERO),
        Some(payor) => {
            let before = net.abs();
            let comparison = primary.compute(&inputs.as_primary(payor.other()), table)?;
            match comparison.recommended_order() {
                Some(primary_amount) => {
                    let after = before.min(primary_amount);
                    let cap = CapComparison {
                        primary_amount,
                        before,
                        after,
                        applied: after < before,
                    };
                    (Some(cap), after)
                }
                None => (None, before),
            }
        }
    };

    Ok(SharedOutcome::Computed(SharedComputation {
        basic,
        basic_amount,
        overnights,
        adjusted_basic,
        add_ons_total,
        p1,
        p2,
        net,
        payor,
        cap,
        recommended_amount,
        notes,
    }))
}
