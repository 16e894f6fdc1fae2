//! Top-level report calculator.
//!
//! One synchronous, stateless call per reading: validate, look up the
//! jurisdiction standards, then derive the LSI, the compliance table, the
//! dosing plan and the chlorine/salt recommendations. The whole report is
//! recomputed from scratch on every invocation; nothing is cached or shared
//! between calls.

use serde::Serialize;

use crate::balance::compliance::{ComplianceRow, evaluate_compliance};
use crate::balance::sequencer::{DosingPlan, plan_dosing};
use crate::chemistry::{LsiFactors, LsiScaleBand, LsiStatus, lsi_factors};
use crate::dosing::{
    SaltDose, ShockRecommendation, WeeklyChlorine, breakpoint_chlorination, salt_dose,
    weekly_chlorine_dose,
};
use crate::error::AppError;
use crate::models::{Jurisdiction, PoolType, Settings, WaterReading};
use crate::standards::{golden_numbers, standards_for};

/// The complete advisory result for one water-test reading.
#[derive(Serialize, Clone, Debug)]
pub struct BalanceReport {
    pub jurisdiction: Jurisdiction,
    pub pool_type: PoolType,
    pub lsi: f64,
    pub lsi_status: LsiStatus,
    pub lsi_scale_band: LsiScaleBand,
    pub factors: LsiFactors,
    pub compliance: Vec<ComplianceRow>,
    pub warnings: Vec<String>,
    pub plan: DosingPlan,
    pub shock: ShockRecommendation,
    pub weekly_chlorine: WeeklyChlorine,
    pub salt: Option<SaltDose>,
}

/// Reject malformed input before any formula runs. Per the error contract,
/// invalid numeric input is a single aggregate failure, not field-by-field
/// diagnostics.
fn validate(reading: &WaterReading, settings: &Settings) -> Result<u32, AppError> {
    if !reading.is_well_formed() {
        return Err(AppError::InvalidReading);
    }
    match settings.month {
        Some(month @ 1..=12) => Ok(month),
        _ => Err(AppError::InvalidReading),
    }
}

/// Compute the full advisory report for a reading under the given settings.
///
/// Fails only on malformed input or a missing standards entry; a valid call
/// always yields a complete report (steps that need no dose carry `None`
/// rather than zero quantities).
pub fn compute_report(
    reading: &WaterReading,
    settings: &Settings,
) -> Result<BalanceReport, AppError> {
    let month = validate(reading, settings)?;

    let standard = standards_for(settings.jurisdiction, settings.pool_type).ok_or(
        AppError::MissingStandards {
            jurisdiction: settings.jurisdiction,
            pool_type: settings.pool_type,
        },
    )?;

    let factors = lsi_factors(
        reading.ph,
        reading.alkalinity,
        reading.cya,
        reading.calcium,
        reading.temp_f,
        reading.tds,
    );

    let (compliance, warnings) = evaluate_compliance(reading, standard);

    let targets = golden_numbers(settings.pool_type).with_overrides(&settings.targets);
    let plan = plan_dosing(reading, targets);

    let shock = breakpoint_chlorination(
        reading.free_chlorine,
        reading.total_chlorine,
        reading.pool_volume_gal,
        settings.chlorine_product,
    );

    let weekly_chlorine = weekly_chlorine_dose(
        reading.free_chlorine,
        reading.cya,
        month,
        reading.pool_volume_gal,
        settings.chlorine_product,
    );

    let salt = match (reading.salt_level, reading.salt_target) {
        (Some(current), Some(target)) if target > 0.0 => {
            salt_dose(current, target, reading.pool_volume_gal)
        }
        _ => None,
    };

    Ok(BalanceReport {
        jurisdiction: settings.jurisdiction,
        pool_type: settings.pool_type,
        lsi: factors.lsi,
        lsi_status: LsiStatus::classify(factors.lsi),
        lsi_scale_band: LsiScaleBand::classify(factors.lsi),
        factors,
        compliance,
        warnings,
        plan,
        shock,
        weekly_chlorine,
        salt,
    })
}
