//! Case routing and result assembly.
//!
//! [`calculate_case`] selects Worksheet A or B from the custody type, orients
//! the recommended order by payor, and flattens every computed figure into
//! the [`Worksheet`] line-item map.

use rust_decimal::Decimal;
use tracing::debug;

use crate::error::EngineResult;
use crate::models::{
    Advisory, CaseInputs, CaseOutputs, CustodyType, Parent, ScheduleTable, Worksheet,
    WorksheetPath,
};

use super::income_adjustment::BasicComputation;
use super::primary_custody::{PrimaryOutcome, PrimaryWorksheet, WorksheetA};
use super::shared_custody::{SharedComputation, SharedOutcome, SharedRedirect, calculate_shared};

/// Note attached when shared custody amounts cancel out.
pub const NO_PAYOR_NOTE: &str =
    "Shared custody obligations offset each other; neither parent owes support";

/// Calculates the recommended support order for a case.
///
/// # Errors
///
/// Returns an error for a malformed schedule, a child count the schedule does
/// not cover, or an amount that overflows `Decimal`. Above-top incomes and
/// redirected shared cases are reported through [`CaseOutputs::advisory`] and
/// notes.
///
/// # Examples
///
/// ```
/// use support_engine::calculation::calculate_case;
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
///     primary_custodian: Parent::P1,
///     p1_overnights: 300,
///     parent1: ParentIncome::with_actual(Decimal::from(1000)),
///     parent2: ParentIncome::with_actual(Decimal::from(1000)),
///     add_ons: AddOnSet::default(),
///     direct_payments: DirectPayments::default(),
/// };
///
/// let outputs = calculate_case(&case, &table).unwrap();
/// assert_eq!(outputs.recommended_order, Decimal::from(-110));
/// assert_eq!(outputs.payor, Some(Parent::P2));
/// ```
pub fn calculate_case(inputs: &CaseInputs, table: &ScheduleTable) -> EngineResult<CaseOutputs> {
    calculate_case_with(inputs, table, &WorksheetA)
}

/// Calculates a case using the supplied Worksheet A implementation.
pub fn calculate_case_with<W: PrimaryWorksheet + ?Sized>(
    inputs: &CaseInputs,
    table: &ScheduleTable,
    primary: &W,
) -> EngineResult<CaseOutputs> {
    match inputs.custody_type {
        CustodyType::Primary => {
            debug!(children = inputs.children, "Routing case to Worksheet A");
            let outcome = primary.compute(inputs, table)?;
            Ok(primary_outputs(outcome))
        }
        CustodyType::Shared => {
            debug!(
                children = inputs.children,
                p1_overnights = inputs.p1_overnights,
                "Routing case to Worksheet B"
            );
            let outcome = calculate_shared(inputs, table, primary)?;
            Ok(shared_outputs(outcome))
        }
    }
}

fn signed(amount: Decimal, payor: Parent) -> Decimal {
    match payor {
        Parent::P1 => amount,
        Parent::P2 => -amount,
    }
}

fn insert_basic_lines(worksheet: &mut Worksheet, basic: &BasicComputation) {
    worksheet.insert("line1_p1MultifamilyAllowance", basic.p1_multifamily_allowance);
    worksheet.insert("line1_p2MultifamilyAllowance", basic.p2_multifamily_allowance);
    worksheet.insert("line2_p1AAI", basic.p1_aai);
    worksheet.insert("line2_p2AAI", basic.p2_aai);
    worksheet.insert("line2_combinedAAI", basic.combined_aai);
    worksheet.insert("line3_p1Share", basic.p1_share);
    worksheet.insert("line3_p2Share", basic.p2_share);
    worksheet.insert_opt("line4_basic", basic.basic());
    worksheet.insert_opt("line4_usedRowIncome", basic.used_row_income());
}

fn primary_outputs(outcome: PrimaryOutcome) -> CaseOutputs {
    let mut worksheet = Worksheet::default();
    insert_basic_lines(&mut worksheet, outcome.basic());

    match outcome {
        PrimaryOutcome::Advisory { note, .. } => {
            debug!("Worksheet A is above the top of the schedule");
            CaseOutputs {
                recommended_order: Decimal::ZERO,
                payor: None,
                path: WorksheetPath::WorksheetA,
                worksheet,
                notes: vec![note],
                advisory: Some(Advisory::AboveTopOfSchedule),
            }
        }
        PrimaryOutcome::Computed(computation) => {
            let totals = &computation.totals;
            worksheet.insert("line5_addOnsTotal", totals.add_ons_total);
            worksheet.insert("line6_totalObligation", totals.total_obligation);
            worksheet.insert("line7_p1Obligation", totals.p1_obligation);
            worksheet.insert("line7_p2Obligation", totals.p2_obligation);
            worksheet.insert("line8_p1DirectPay", computation.p1_direct_pay);
            worksheet.insert("line8_p2DirectPay", computation.p2_direct_pay);
            worksheet.insert("line9_p1Recommended", computation.p1_recommended);
            worksheet.insert("line9_p2Recommended", computation.p2_recommended);
            worksheet.insert("line9_recommendedOrder", computation.recommended_order);

            let payor = computation.payor();
            CaseOutputs {
                recommended_order: signed(computation.recommended_order, payor),
                payor: Some(payor),
                path: WorksheetPath::WorksheetA,
                worksheet,
                notes: computation.notes,
                advisory: None,
            }
        }
    }
}

fn redirected_outputs(redirect: SharedRedirect) -> CaseOutputs {
    debug!(
        custodian = %redirect.custodian,
        p1_nights = redirect.overnights.p1_nights,
        "Shared threshold not met, redirecting to Worksheet A"
    );

    let mut outputs = primary_outputs(redirect.primary);
    outputs
        .worksheet
        .insert("redirect_p1Overnights", Decimal::from(redirect.overnights.p1_nights));
    outputs
        .worksheet
        .insert("redirect_p2Overnights", Decimal::from(redirect.overnights.p2_nights));
    outputs.notes.insert(0, redirect.note);
    outputs.advisory = outputs.advisory.or(Some(Advisory::RedirectedToWorksheetA));
    outputs
}

fn computed_shared_outputs(computation: SharedComputation) -> CaseOutputs {
    let mut worksheet = Worksheet::default();
    insert_basic_lines(&mut worksheet, &computation.basic);

    let overnights = &computation.overnights;
    worksheet.insert("line5_adjustedBasic", computation.adjusted_basic);
    worksheet.insert("line6_p1ShareOfAdjustedBasic", computation.p1.share_of_adjusted_basic);
    worksheet.insert("line6_p2ShareOfAdjustedBasic", computation.p2.share_of_adjusted_basic);
    worksheet.insert("line7_p1Overnights", Decimal::from(overnights.p1_nights));
    worksheet.insert("line7_p2Overnights", Decimal::from(overnights.p2_nights));
    worksheet.insert("line7_p1OvernightPct", overnights.p1_pct);
    worksheet.insert("line7_p2OvernightPct", overnights.p2_pct);
    worksheet.insert("line8_p1Theoretical", computation.p1.theoretical);
    worksheet.insert("line8_p2Theoretical", computation.p2.theoretical);
    worksheet.insert("line9_p1OvernightAdjustment", computation.p1.overnight_adjustment);
    worksheet.insert("line9_p2OvernightAdjustment", computation.p2.overnight_adjustment);
    worksheet.insert("line10_p1Adjusted", computation.p1.adjusted);
    worksheet.insert("line10_p2Adjusted", computation.p2.adjusted);
    worksheet.insert("line11_addOnsTotal", computation.add_ons_total);
    worksheet.insert("line11_p1AddOns", computation.p1.add_ons);
    worksheet.insert("line11_p2AddOns", computation.p2.add_ons);
    worksheet.insert("line12_p1Total", computation.p1.total);
    worksheet.insert("line12_p2Total", computation.p2.total);
    worksheet.insert("line13_p1DirectPay", computation.p1.direct_pay);
    worksheet.insert("line13_p2DirectPay", computation.p2.direct_pay);
    worksheet.insert("line14_p1Final", computation.p1.final_amount);
    worksheet.insert("line14_p2Final", computation.p2.final_amount);
    worksheet.insert("line15_net", computation.net);
    worksheet.insert_opt("line16_capPrimaryAmount", computation.cap.map(|c| c.primary_amount));
    worksheet.insert_opt("line16_capBefore", computation.cap.map(|c| c.before));
    worksheet.insert_opt("line16_capAfter", computation.cap.map(|c| c.after));

    let recommended_order = computation.signed_order();
    worksheet.insert("line17_recommendedOrder", recommended_order);

    let mut notes = computation.notes.clone();
    match (computation.payor, computation.cap) {
        (None, _) => notes.push(NO_PAYOR_NOTE.to_string()),
        (Some(payor), Some(cap)) if cap.applied => {
            debug!(before = %cap.before, after = %cap.after, "Shared amount capped");
            notes.push(format!(
                "Shared custody amount of ${:.2} exceeds the Worksheet A amount of ${:.2} \
                 with {} as primary custodian; capped at ${:.2}",
                cap.before,
                cap.primary_amount,
                payor.other(),
                cap.after
            ));
        }
        _ => {}
    }

    CaseOutputs {
        recommended_order,
        payor: computation.payor,
        path: WorksheetPath::WorksheetB,
        worksheet,
        notes,
        advisory: None,
    }
}

fn shared_outputs(outcome: SharedOutcome) -> CaseOutputs {
    match outcome {
        SharedOutcome::Advisory { basic, note } => {
            debug!("Worksheet B is above the top of the schedule");
            let mut worksheet = Worksheet::default();
            insert_basic_lines(&mut worksheet, &basic);
            CaseOutputs {
                recommended_order: Decimal::ZERO,
                payor: None,
                path: WorksheetPath::WorksheetB,
                worksheet,
                notes: vec![note],
                advisory: Some(Advisory::AboveTopOfSchedule),
            }
        }
        SharedOutcome::Redirected(redirect) => redirected_outputs(redirect),
        SharedOutcome::Computed(computation) => computed_shared_outputs(computation),
    }
}
