//! Dosing recommendation sequencer.
//!
//! Produces the ordered multi-step plan to bring a pool to its golden
//! numbers: alkalinity, then calcium, then CYA, then pH. The ordering is
//! chemical, not cosmetic - the bicarbonate step raises pH and the CYA step
//! lowers it again, so each step's anticipated pH chains onto the previous
//! step's projection rather than the original reading.

use std::fmt;

use serde::Serialize;

use crate::balance::compliance::Parameter;
use crate::chemistry::{compute_lsi, round_to};
use crate::dosing::{
    ChemDose, acid_dose, acid_for_alkalinity, calcium_chloride_dose, estimate_ph_drop_from_cya,
    estimate_ph_rise_from_bicarb, soda_ash_dose, sodium_bicarbonate_dose, stabilizer_dose,
};
use crate::models::WaterReading;
use crate::standards::GoldenNumbers;

/// Alkalinity above this dominates all other chemistry and is lowered in
/// stages before anything else is touched.
const SUPER_HIGH_ALK_PPM: f64 = 180.0;
const SUPER_HIGH_CALCIUM_PPM: f64 = 600.0;
const HIGH_CALCIUM_PPM: f64 = 400.0;
/// Staged alkalinity reduction target and duration.
const STAGED_ALK_TARGET_PPM: f64 = 100.0;
const STAGED_ALK_DAYS: u32 = 3;
/// pH target substituted when calcium pulls the LSI up too hard.
const HIGH_CALCIUM_PH_TARGET: f64 = 7.2;

/// When a dosed step should be performed. One water-balance parameter is
/// adjusted per day; whatever cannot go in today is deferred.
#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Schedule {
    Today,
    NextVisit,
}

/// A step's dose: either a single addition or one split over several days.
#[derive(Serialize, Clone, Copy, Debug, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StepDose {
    Single(ChemDose),
    Staged { total: ChemDose, days: u32 },
}

impl fmt::Display for StepDose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StepDose::Single(dose) => dose.fmt(f),
            StepDose::Staged { total, days } => {
                write!(f, "add 1/{days} of total dose ({total}) per day for {days} days")
            }
        }
    }
}

/// A secondary pH correction made after a primary dose has dispersed.
#[derive(Serialize, Clone, Copy, Debug)]
pub struct PhFollowup {
    pub dose: ChemDose,
    pub from_ph: f64,
    pub to_ph: f64,
}

/// One ordered dosing step.
#[derive(Serialize, Clone, Debug)]
pub struct DosingStep {
    pub parameter: Parameter,
    pub current: f64,
    pub target: f64,
    pub dose: Option<StepDose>,
    pub schedule: Option<Schedule>,
    /// Projected pH after this step's dose disperses.
    pub anticipated_ph: Option<f64>,
    pub followup: Option<PhFollowup>,
}

impl DosingStep {
    fn bare(parameter: Parameter, current: f64, target: f64, dose: Option<ChemDose>) -> Self {
        Self {
            parameter,
            current,
            target,
            dose: dose.map(StepDose::Single),
            schedule: None,
            anticipated_ph: None,
            followup: None,
        }
    }
}

#[derive(Serialize, Clone, Debug, Default)]
pub struct DosingPlan {
    pub steps: Vec<DosingStep>,
    pub notes: Vec<String>,
}

/// Build the ordered dosing plan for a reading against resolved targets.
///
/// Branch order is load-bearing: the extreme-alkalinity override returns
/// early with a single staged step, the extreme-calcium override rewrites
/// the pH target before any step is produced, and the four parameter steps
/// always appear in alkalinity, calcium, CYA, pH order.
pub fn plan_dosing(reading: &WaterReading, targets: GoldenNumbers) -> DosingPlan {
    let mut t = targets;
    let mut steps = Vec::new();
    let mut notes = Vec::new();
    let gallons = reading.pool_volume_gal;

    let super_high_alk = reading.alkalinity > SUPER_HIGH_ALK_PPM;
    let super_high_ca = reading.calcium > SUPER_HIGH_CALCIUM_PPM;
    let high_ca = reading.calcium > HIGH_CALCIUM_PPM;

    let lsi = compute_lsi(
        reading.ph,
        reading.alkalinity,
        reading.cya,
        reading.calcium,
        reading.temp_f,
        reading.tds,
    );

    if super_high_alk && reading.calcium < 500.0 {
        let dose = acid_for_alkalinity(reading.alkalinity, STAGED_ALK_TARGET_PPM, gallons).map(
            |total| StepDose::Staged {
                total,
                days: STAGED_ALK_DAYS,
            },
        );
        let schedule = dose.is_some().then_some(Schedule::Today);
        steps.push(DosingStep {
            parameter: Parameter::Alkalinity,
            current: reading.alkalinity,
            target: STAGED_ALK_TARGET_PPM,
            dose,
            schedule,
            anticipated_ph: None,
            followup: None,
        });
        notes.push(
            "Alkalinity is extremely high. Lower alkalinity in stages over 3 days before \
             adjusting other parameters."
                .to_string(),
        );
        return DosingPlan { steps, notes };
    }

    if super_high_ca || (super_high_alk && high_ca) {
        t.ph = HIGH_CALCIUM_PH_TARGET;
        notes.push(format!(
            "Calcium is extremely high. Lower pH target to {HIGH_CALCIUM_PH_TARGET} for LSI balance."
        ));
    }

    if lsi > 0.5 && (reading.alkalinity > t.alkalinity || reading.ph > t.ph) {
        notes.push(
            "LSI is in extreme scaling condition (>0.5). Prioritize lowering alkalinity and pH."
                .to_string(),
        );
    }

    // Alkalinity step, with its anticipated pH rise and a secondary
    // acid or soda ash correction when the projection misses the target.
    let alk_dose = sodium_bicarbonate_dose(reading.alkalinity, t.alkalinity, gallons);
    let mut anticipated_ph = reading.ph;
    let mut alk_followup = None;
    if alk_dose.is_some() {
        let alk_increase = t.alkalinity - reading.alkalinity;
        anticipated_ph = round_to(reading.ph + estimate_ph_rise_from_bicarb(alk_increase), 2);
        if anticipated_ph > t.ph {
            if let Some(acid) = acid_dose(anticipated_ph, t.ph, gallons, t.alkalinity) {
                notes.push(format!(
                    "Adding sodium bicarbonate to raise alkalinity by {alk_increase} ppm is \
                     expected to raise pH from {} to approximately {anticipated_ph}. After the \
                     bicarb is fully dispersed, wait 15-30 minutes, then test pH and add acid as \
                     needed to bring pH down to {}. Recommended acid dose: {acid}.",
                    reading.ph, t.ph
                ));
                alk_followup = Some(PhFollowup {
                    dose: acid,
                    from_ph: anticipated_ph,
                    to_ph: t.ph,
                });
            }
        } else {
            notes.push(format!(
                "Adding sodium bicarbonate to raise alkalinity by {alk_increase} ppm is expected \
                 to raise pH from {} to approximately {anticipated_ph}.",
                reading.ph
            ));
            if anticipated_ph < t.ph {
                if let Some(soda_ash) = soda_ash_dose(anticipated_ph, t.ph, gallons) {
                    alk_followup = Some(PhFollowup {
                        dose: soda_ash,
                        from_ph: anticipated_ph,
                        to_ph: t.ph,
                    });
                }
            }
        }
    }
    steps.push(DosingStep {
        parameter: Parameter::Alkalinity,
        current: reading.alkalinity,
        target: t.alkalinity,
        dose: alk_dose.map(StepDose::Single),
        schedule: None,
        anticipated_ph: alk_dose.is_some().then_some(anticipated_ph),
        followup: alk_followup,
    });

    // Calcium step. No secondary pH effect is modeled for calcium chloride.
    steps.push(DosingStep::bare(
        Parameter::CalciumHardness,
        reading.calcium,
        t.calcium,
        calcium_chloride_dose(reading.calcium, t.calcium, gallons),
    ));

    // CYA step: its pH drop chains onto the alkalinity step's projection,
    // not the original reading.
    let cya_dose = stabilizer_dose(reading.cya, t.cya, gallons);
    let mut ph_after_cya = anticipated_ph;
    let mut cya_followup = None;
    if cya_dose.is_some() {
        let cya_increase = t.cya - reading.cya;
        ph_after_cya = round_to(anticipated_ph - estimate_ph_drop_from_cya(cya_increase), 2);
        if ph_after_cya < t.ph {
            if let Some(soda_ash) = soda_ash_dose(ph_after_cya, t.ph, gallons) {
                notes.push(format!(
                    "Adding cyanuric acid to raise CYA by {cya_increase} ppm is expected to lower \
                     pH from {anticipated_ph} to approximately {ph_after_cya}. After the CYA is \
                     fully dispersed, wait 15-30 minutes, then test pH and add soda ash as needed \
                     to bring pH up to {}. Recommended soda ash dose: {soda_ash}.",
                    t.ph
                ));
                cya_followup = Some(PhFollowup {
                    dose: soda_ash,
                    from_ph: ph_after_cya,
                    to_ph: t.ph,
                });
            }
        } else {
            notes.push(format!(
                "Adding cyanuric acid to raise CYA by {cya_increase} ppm is expected to lower pH \
                 from {anticipated_ph} to approximately {ph_after_cya}."
            ));
        }
    }
    steps.push(DosingStep {
        parameter: Parameter::CyanuricAcid,
        current: reading.cya,
        target: t.cya,
        dose: cya_dose.map(StepDose::Single),
        schedule: None,
        anticipated_ph: cya_dose.is_some().then_some(ph_after_cya),
        followup: cya_followup,
    });

    // pH step, in either direction.
    let ph_dose = if reading.ph > t.ph {
        acid_dose(reading.ph, t.ph, gallons, reading.alkalinity)
    } else if reading.ph < t.ph {
        soda_ash_dose(reading.ph, t.ph, gallons)
    } else {
        None
    };
    steps.push(DosingStep::bare(Parameter::Ph, reading.ph, t.ph, ph_dose));

    assign_schedules(&mut steps);
    DosingPlan { steps, notes }
}

/// One water-balance parameter per day: the first dosed
/// alkalinity/calcium/CYA step goes today, later ones wait for the next
/// visit. A dosed pH step is always performed today.
fn assign_schedules(steps: &mut [DosingStep]) {
    let mut water_balance_seen = false;
    for step in steps.iter_mut() {
        if step.dose.is_none() {
            continue;
        }
        step.schedule = Some(match step.parameter {
            Parameter::Ph => Schedule::Today,
            _ if !water_balance_seen => {
                water_balance_seen = true;
                Schedule::Today
            }
            _ => Schedule::NextVisit,
        });
    }
}
