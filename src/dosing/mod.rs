//! Dose-formula library: deterministic pure functions mapping a desired
//! parameter change and pool volume to a chemical quantity.
//!
//! Every formula returns `Option`: `None` means "no dose needed", which
//! covers zero, negative and below-threshold results so negative quantities
//! never propagate. Units are US customary throughout (ppm, gallons, lbs,
//! dry oz, fl oz).
//!
//! Two sodium bicarbonate rates are published in the field material this
//! implements: 1.5 lb per 10 ppm per 10,000 gal (the dosing-plan rate) and
//! 1.4 (the rate printed on the parameter reference chart). Both are exposed
//! under distinct names; neither is authoritative yet.

use std::fmt;

use serde::Serialize;

use crate::models::{ChlorineKind, ChlorineProduct};

/// Sequencer rate: lbs of sodium bicarbonate per 10 ppm per 10,000 gal.
pub const BICARB_RATE_LBS: f64 = 1.5;
/// Reference-chart rate for the same dose; disagrees with [`BICARB_RATE_LBS`].
pub const BICARB_CHART_RATE_LBS: f64 = 1.4;
/// Lbs of calcium chloride per 10 ppm per 10,000 gal.
pub const CALCIUM_CHLORIDE_RATE_LBS: f64 = 1.25;
/// Dry oz of stabilizer per 10 ppm of CYA per 10,000 gal.
pub const STABILIZER_RATE_OZ: f64 = 13.0;
/// Gallons of 31.45% muriatic acid per 10 ppm alkalinity drop per 10,000 gal.
pub const ACID_FOR_ALK_RATE_GAL: f64 = 0.2;
/// Lbs of salt per 1,000 ppm per 10,000 gal.
pub const SALT_RATE_LBS: f64 = 183.0;
/// Lbs of 100% chlorine per 1 ppm per 10,000 gal.
pub const CHLORINE_LBS_PER_PPM_10KGAL: f64 = 0.0834;

/// Estimated pH rise from a sodium bicarbonate dose: ~0.03 pH units per
/// 10 ppm of alkalinity added.
pub fn estimate_ph_rise_from_bicarb(alkalinity_increase: f64) -> f64 {
    (alkalinity_increase / 10.0) * 0.03
}

/// Estimated pH drop from a cyanuric acid dose: ~0.07 pH units per 10 ppm
/// of CYA added.
pub fn estimate_ph_drop_from_cya(cya_increase: f64) -> f64 {
    (cya_increase / 10.0) * 0.07
}

#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Chemical {
    MuriaticAcid,
    SodaAsh,
    SodiumBicarbonate,
    CalciumChloride,
    Stabilizer,
}

impl Chemical {
    pub fn label(self) -> &'static str {
        match self {
            Chemical::MuriaticAcid => "muriatic acid (31.45%)",
            Chemical::SodaAsh => "soda ash",
            Chemical::SodiumBicarbonate => "sodium bicarbonate",
            Chemical::CalciumChloride => "calcium chloride",
            Chemical::Stabilizer => "stabilizer",
        }
    }
}

/// A chemical quantity. `Display` applies the unit-splitting rules used on
/// service tickets: 128+ fl oz print as gallons, 16+ dry oz print as pounds.
#[derive(Serialize, Clone, Copy, Debug, PartialEq)]
#[serde(tag = "unit", content = "value", rename_all = "snake_case")]
pub enum Amount {
    FluidOunces(f64),
    Ounces(f64),
    Pounds(f64),
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Amount::FluidOunces(fl_oz) => {
                if fl_oz < 128.0 {
                    write!(f, "{fl_oz:.1} fl oz")
                } else {
                    write!(f, "{:.2} gal ({fl_oz:.1} fl oz)", fl_oz / 128.0)
                }
            }
            Amount::Ounces(oz) => {
                if oz < 16.0 {
                    write!(f, "{oz:.1} oz")
                } else {
                    write!(f, "{:.2} lbs ({oz:.1} oz)", oz / 16.0)
                }
            }
            Amount::Pounds(lbs) => write!(f, "{lbs:.2} lbs"),
        }
    }
}

/// A quantity of a specific chemical, e.g. "6.5 fl oz muriatic acid (31.45%)".
#[derive(Serialize, Clone, Copy, Debug, PartialEq)]
pub struct ChemDose {
    pub chemical: Chemical,
    pub amount: Amount,
}

impl ChemDose {
    fn new(chemical: Chemical, amount: Amount) -> Self {
        Self { chemical, amount }
    }
}

impl fmt::Display for ChemDose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.amount, self.chemical.label())
    }
}

/// Muriatic acid to lower pH: 1.3 fl oz per 0.1 pH drop per 10,000 gal at
/// 100 ppm alkalinity, scaled linearly by the current alkalinity.
pub fn acid_dose(current_ph: f64, target_ph: f64, gallons: f64, alkalinity: f64) -> Option<ChemDose> {
    if current_ph <= target_ph {
        return None;
    }
    let ph_drop = current_ph - target_ph;
    let fl_oz = 1.3 * (alkalinity / 100.0) * (ph_drop / 0.1) * (gallons / 10_000.0);
    if fl_oz <= 0.0 {
        return None;
    }
    Some(ChemDose::new(Chemical::MuriaticAcid, Amount::FluidOunces(fl_oz)))
}

/// Soda ash to raise pH: 6 oz per 0.2 pH rise per 10,000 gal.
pub fn soda_ash_dose(current_ph: f64, target_ph: f64, gallons: f64) -> Option<ChemDose> {
    if current_ph >= target_ph {
        return None;
    }
    let oz = ((target_ph - current_ph) / 0.2) * 6.0 * (gallons / 10_000.0);
    if oz <= 0.0 {
        return None;
    }
    Some(ChemDose::new(Chemical::SodaAsh, Amount::Ounces(oz)))
}

/// Sodium bicarbonate to raise alkalinity, at the dosing-plan rate of
/// [`BICARB_RATE_LBS`].
pub fn sodium_bicarbonate_dose(current: f64, target: f64, gallons: f64) -> Option<ChemDose> {
    if target <= current {
        return None;
    }
    let lbs = ((target - current) / 10.0) * BICARB_RATE_LBS * (gallons / 10_000.0);
    if lbs <= 0.0 {
        return None;
    }
    Some(ChemDose::new(Chemical::SodiumBicarbonate, Amount::Pounds(lbs)))
}

/// The reference-chart variant of the bicarbonate dose, at
/// [`BICARB_CHART_RATE_LBS`]. Raw pounds; kept separate from
/// [`sodium_bicarbonate_dose`] until the rate discrepancy is resolved.
pub fn sodium_bicarbonate_chart_lbs(current: f64, target: f64, gallons: f64) -> Option<f64> {
    if target <= current {
        return None;
    }
    Some(((target - current) / 10.0) * BICARB_CHART_RATE_LBS * (gallons / 10_000.0))
}

/// Calcium chloride to raise calcium hardness.
pub fn calcium_chloride_dose(current: f64, target: f64, gallons: f64) -> Option<ChemDose> {
    if target <= current {
        return None;
    }
    let lbs = ((target - current) / 10.0) * CALCIUM_CHLORIDE_RATE_LBS * (gallons / 10_000.0);
    if lbs <= 0.0 {
        return None;
    }
    Some(ChemDose::new(Chemical::CalciumChloride, Amount::Pounds(lbs)))
}

/// Stabilizer (cyanuric acid) dose.
pub fn stabilizer_dose(current: f64, target: f64, gallons: f64) -> Option<ChemDose> {
    if target <= current {
        return None;
    }
    let oz = ((target - current) / 10.0) * STABILIZER_RATE_OZ * (gallons / 10_000.0);
    if oz <= 0.0 {
        return None;
    }
    Some(ChemDose::new(Chemical::Stabilizer, Amount::Ounces(oz)))
}

/// Total muriatic acid needed to lower alkalinity, for staged multi-day
/// dosing. Doses under 0.01 gal are not worth staging.
pub fn acid_for_alkalinity(current_alk: f64, target_alk: f64, gallons: f64) -> Option<ChemDose> {
    if current_alk <= target_alk {
        return None;
    }
    let gal_acid =
        ((current_alk - target_alk) / 10.0) * ACID_FOR_ALK_RATE_GAL * (gallons / 10_000.0);
    if gal_acid < 0.01 {
        return None;
    }
    Some(ChemDose::new(
        Chemical::MuriaticAcid,
        Amount::FluidOunces(gal_acid * 128.0),
    ))
}

/// Salt dose: pounds plus how many 40 lb bags to buy.
#[derive(Serialize, Clone, Copy, Debug, PartialEq)]
pub struct SaltDose {
    pub lbs: f64,
    pub bags: u32,
}

/// Salt needed to reach a target level: 183 lbs per 1,000 ppm per 10,000 gal.
pub fn salt_dose(current: f64, target: f64, gallons: f64) -> Option<SaltDose> {
    if target <= current {
        return None;
    }
    let ppm_needed = target - current;
    let lbs = (ppm_needed * gallons * SALT_RATE_LBS) / (1000.0 * 10_000.0);
    if lbs <= 0.01 {
        return None;
    }
    Some(SaltDose {
        lbs,
        bags: (lbs / 40.0).ceil() as u32,
    })
}

#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ShockUrgency {
    NotNeeded,
    Within72Hours,
    Immediate,
}

impl fmt::Display for ShockUrgency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ShockUrgency::NotNeeded => "no shock needed",
            ShockUrgency::Within72Hours => "shock within 72 hours",
            ShockUrgency::Immediate => "shock immediately",
        })
    }
}

/// Breakpoint chlorination recommendation.
#[derive(Serialize, Clone, Copy, Debug)]
pub struct ShockRecommendation {
    pub combined_chlorine: f64,
    pub ppm_needed: f64,
    pub urgency: ShockUrgency,
    pub dose_lbs: Option<f64>,
}

/// Lbs of product to raise chlorine by `ppm` at the given fractional
/// concentration.
pub fn chlorine_dose_lbs(ppm: f64, gallons: f64, concentration: f64) -> f64 {
    (ppm * gallons * CHLORINE_LBS_PER_PPM_10KGAL) / (10_000.0 * concentration)
}

/// Breakpoint chlorination: the shock target is 10x the combined chlorine,
/// and urgency escalates at 0.6 ppm (within 72 hours) and 1.6 ppm
/// (immediately).
pub fn breakpoint_chlorination(
    free_chlorine: f64,
    total_chlorine: f64,
    gallons: f64,
    product: ChlorineProduct,
) -> ShockRecommendation {
    let combined = (total_chlorine - free_chlorine).max(0.0);
    let ppm_needed = (combined * 10.0 - free_chlorine).max(0.0);
    let urgency = if combined >= 1.6 {
        ShockUrgency::Immediate
    } else if combined >= 0.6 {
        ShockUrgency::Within72Hours
    } else {
        ShockUrgency::NotNeeded
    };
    let dose_lbs = if ppm_needed > 0.0 {
        Some(chlorine_dose_lbs(ppm_needed, gallons, product.concentration()))
    } else {
        None
    };
    ShockRecommendation {
        combined_chlorine: combined,
        ppm_needed,
        urgency,
        dose_lbs,
    }
}

/// Daily UV chlorine-loss factor (ppm/day) for a calendar month (1-12).
pub fn uv_loss_factor(month: u32) -> f64 {
    match month {
        11 | 12 | 1 => 1.5,
        2 | 3 => 2.0,
        4 | 5 | 9 | 10 => 2.5,
        _ => 3.0,
    }
}

/// How a weekly chlorine dose is dispensed for a given product.
#[derive(Serialize, Clone, Copy, Debug, PartialEq)]
#[serde(tag = "form", rename_all = "snake_case")]
pub enum ChlorineAmount {
    Liquid { gallons: f64, fl_oz: f64 },
    Granular { ounces: f64 },
}

/// Weekly chlorine maintenance dose breakdown.
#[derive(Serialize, Clone, Copy, Debug)]
pub struct WeeklyChlorine {
    /// CYA-relative free chlorine floor (5% of CYA).
    pub min_fc: f64,
    pub loss_factor: f64,
    pub uv_loss: f64,
    pub calculated_dose: f64,
    pub to_be_dosed: f64,
    pub amount: Option<ChlorineAmount>,
}

/// Weekly maintenance dose: the CYA floor plus a week of seasonal UV loss,
/// less what is already in the water. The month is injected by the caller so
/// the engine stays clock-free.
pub fn weekly_chlorine_dose(
    free_chlorine: f64,
    cya: f64,
    month: u32,
    gallons: f64,
    product: ChlorineProduct,
) -> WeeklyChlorine {
    let min_fc = cya * 0.05;
    let loss_factor = uv_loss_factor(month);
    let uv_loss = loss_factor * 6.0;
    let calculated_dose = min_fc + uv_loss;
    let to_be_dosed = (calculated_dose - free_chlorine).max(0.0);

    let amount = if to_be_dosed > 0.01 {
        Some(match product.kind() {
            ChlorineKind::Liquid => {
                let g = (to_be_dosed * gallons) / (12.0 * 10_000.0);
                ChlorineAmount::Liquid {
                    gallons: g,
                    fl_oz: g * 128.0,
                }
            }
            ChlorineKind::CalHypo => ChlorineAmount::Granular {
                ounces: to_be_dosed * 2.0 * (gallons / 10_000.0),
            },
        })
    } else {
        None
    };

    WeeklyChlorine {
        min_fc,
        loss_factor,
        uv_loss,
        calculated_dose,
        to_be_dosed,
        amount,
    }
}
