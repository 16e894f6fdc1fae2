use poolbalance_rs::standards::{golden_numbers, standards_for};
use poolbalance_rs::{
    Amount, AppError, Jurisdiction, Parameter, PoolType, Schedule, Settings, StepDose,
    WaterReading, compute_report, evaluate_compliance, plan_dosing,
};

fn approx(a: f64, b: f64) {
    assert!((a - b).abs() < 1e-9, "{a} != {b}");
}

fn reading() -> WaterReading {
    WaterReading {
        ph: 7.5,
        free_chlorine: 3.0,
        total_chlorine: 3.2,
        alkalinity: 60.0,
        calcium: 300.0,
        cya: 20.0,
        tds: 1000.0,
        temp_f: 77.0,
        salt_level: None,
        salt_target: None,
        pool_volume_gal: 10_000.0,
    }
}

fn settings() -> Settings {
    Settings {
        month: Some(6),
        ..Settings::default()
    }
}

#[test]
fn extreme_alkalinity_defers_everything_else() {
    let mut r = reading();
    r.alkalinity = 200.0;
    r.calcium = 300.0;
    r.cya = 10.0; // also out of range, but deferred
    r.pool_volume_gal = 20_000.0;

    let plan = plan_dosing(&r, golden_numbers(PoolType::Pool));

    assert_eq!(plan.steps.len(), 1);
    let step = &plan.steps[0];
    assert_eq!(step.parameter, Parameter::Alkalinity);
    approx(step.target, 100.0);
    match step.dose {
        Some(StepDose::Staged { total, days }) => {
            assert_eq!(days, 3);
            // 100 ppm drop in 20,000 gal: 10 * 0.2 gal * 2 = 4 gal = 512 fl oz
            match total.amount {
                Amount::FluidOunces(v) => approx(v, 512.0),
                other => panic!("expected fluid ounces, got {other:?}"),
            }
        }
        ref other => panic!("expected staged dose, got {other:?}"),
    }
    assert!(plan.notes.iter().any(|n| n.contains("extremely high")));
}

#[test]
fn extreme_calcium_lowers_the_ph_target() {
    let mut r = reading();
    r.calcium = 650.0;

    let plan = plan_dosing(&r, golden_numbers(PoolType::Pool));

    let ph_step = plan
        .steps
        .iter()
        .find(|s| s.parameter == Parameter::Ph)
        .expect("ph step");
    approx(ph_step.target, 7.2);
    assert!(plan.notes.iter().any(|n| n.contains("Calcium is extremely high")));
}

#[test]
fn high_alkalinity_with_mid_calcium_takes_the_ph_target_path() {
    // Alkalinity over 180 normally triggers the staged reduction, but
    // calcium at 550 blocks it; the calcium override lowers the pH target
    // instead and the full four-step plan is produced.
    let mut r = reading();
    r.alkalinity = 200.0;
    r.calcium = 550.0;

    let plan = plan_dosing(&r, golden_numbers(PoolType::Pool));

    assert_eq!(plan.steps.len(), 4);
    let ph_step = plan
        .steps
        .iter()
        .find(|s| s.parameter == Parameter::Ph)
        .expect("ph step");
    approx(ph_step.target, 7.2);
    assert!(plan.notes.iter().any(|n| n.contains("Calcium is extremely high")));
}

#[test]
fn scaling_note_fires_above_half_lsi() {
    // pH 8.2, alk 170 (corrected 163.3 -> 2.3), ca 450 -> 2.5, 77 F -> 0.7,
    // TDS 1000 -> 12.2: LSI = 8.2 + 2.5 + 2.3 + 0.7 - 12.2 = 1.5. Neither
    // override applies, so the scaling note rides along with the normal plan.
    let mut r = reading();
    r.ph = 8.2;
    r.alkalinity = 170.0;
    r.calcium = 450.0;

    let plan = plan_dosing(&r, golden_numbers(PoolType::Pool));

    assert_eq!(plan.steps.len(), 4);
    assert!(
        plan.notes
            .iter()
            .any(|n| n.contains("extreme scaling condition"))
    );
}

#[test]
fn steps_come_in_fixed_parameter_order() {
    let plan = plan_dosing(&reading(), golden_numbers(PoolType::Pool));
    let order: Vec<Parameter> = plan.steps.iter().map(|s| s.parameter).collect();
    assert_eq!(
        order,
        vec![
            Parameter::Alkalinity,
            Parameter::CalciumHardness,
            Parameter::CyanuricAcid,
            Parameter::Ph,
        ]
    );
}

#[test]
fn anticipated_ph_chains_through_bicarb_and_cya() {
    // Pool golden numbers: alk 100, cya 50, pH 7.6.
    // Bicarb raises alk by 40 -> pH 7.5 + 0.12 = 7.62, above target, so an
    // acid follow-up is attached to the alkalinity step. The CYA step then
    // drops the *projected* pH by 0.21 -> 7.41, below target, so a soda ash
    // follow-up is attached there.
    let plan = plan_dosing(&reading(), golden_numbers(PoolType::Pool));

    let alk = &plan.steps[0];
    approx(alk.anticipated_ph.expect("projection"), 7.62);
    let acid = alk.followup.as_ref().expect("acid followup");
    approx(acid.to_ph, 7.6);

    let cya = &plan.steps[2];
    approx(cya.anticipated_ph.expect("projection"), 7.41);
    let soda = cya.followup.as_ref().expect("soda ash followup");
    approx(soda.from_ph, 7.41);

    assert!(plan.notes.iter().any(|n| n.contains("raise pH from 7.5")));
    assert!(plan.notes.iter().any(|n| n.contains("lower pH")));
}

#[test]
fn one_water_balance_parameter_per_day() {
    let plan = plan_dosing(&reading(), golden_numbers(PoolType::Pool));

    // Alkalinity and CYA both need a dose; calcium is on target.
    assert_eq!(plan.steps[0].schedule, Some(Schedule::Today));
    assert!(plan.steps[1].dose.is_none());
    assert_eq!(plan.steps[2].schedule, Some(Schedule::NextVisit));
    // pH adjustment is not deferred.
    assert_eq!(plan.steps[3].schedule, Some(Schedule::Today));
}

#[test]
fn on_target_water_needs_no_doses() {
    let mut r = reading();
    r.alkalinity = 100.0;
    r.calcium = 300.0;
    r.cya = 50.0;
    r.ph = 7.6;

    let plan = plan_dosing(&r, golden_numbers(PoolType::Pool));
    assert!(plan.steps.iter().all(|s| s.dose.is_none()));
    assert!(plan.notes.is_empty());
}

#[test]
fn compliance_rows_and_cya_floor_warning() {
    let standard = standards_for(Jurisdiction::Arizona, PoolType::Pool).expect("standards");

    let mut r = reading();
    r.cya = 100.0;
    r.free_chlorine = 2.0; // within 1-5 ppm, but below 5% of CYA

    let (rows, warnings) = evaluate_compliance(&r, standard);
    assert_eq!(rows.len(), 5);
    let fc_row = rows
        .iter()
        .find(|row| row.parameter == Parameter::FreeChlorine)
        .expect("fc row");
    assert!(fc_row.compliant);
    assert!(warnings.iter().any(|w| w.contains("below 5% of CYA")));
}

#[test]
fn every_jurisdiction_pool_type_pair_has_standards() {
    for jurisdiction in [
        Jurisdiction::Arizona,
        Jurisdiction::Florida,
        Jurisdiction::Texas,
    ] {
        for pool_type in [PoolType::Pool, PoolType::Spa] {
            assert!(standards_for(jurisdiction, pool_type).is_some());
        }
    }
}

#[test]
fn florida_spa_has_no_cya_chlorine_floor() {
    let standard = standards_for(Jurisdiction::Florida, PoolType::Spa).expect("standards");
    assert!(standard.free_chlorine.cya_ratio.is_none());

    let mut r = reading();
    r.cya = 100.0;
    r.free_chlorine = 2.0;
    let (_, warnings) = evaluate_compliance(&r, standard);
    assert!(!warnings.iter().any(|w| w.contains("CYA")));
}

#[test]
fn report_is_idempotent_for_a_fixed_month() {
    let r = reading();
    let s = settings();
    let a = compute_report(&r, &s).expect("report");
    let b = compute_report(&r, &s).expect("report");
    assert_eq!(
        serde_json::to_string(&a).expect("json"),
        serde_json::to_string(&b).expect("json")
    );
}

#[test]
fn report_includes_salt_dose_when_requested() {
    let mut r = reading();
    r.salt_level = Some(2000.0);
    r.salt_target = Some(3200.0);
    r.pool_volume_gal = 20_000.0;

    let report = compute_report(&r, &settings()).expect("report");
    let salt = report.salt.expect("salt dose");
    approx(salt.lbs, 439.2);
    assert_eq!(salt.bags, 11);
}

#[test]
fn malformed_readings_are_rejected_before_any_formula() {
    let mut r = reading();
    r.ph = f64::NAN;
    assert!(matches!(
        compute_report(&r, &settings()),
        Err(AppError::InvalidReading)
    ));

    let mut r = reading();
    r.pool_volume_gal = 0.0;
    assert!(matches!(
        compute_report(&r, &settings()),
        Err(AppError::InvalidReading)
    ));

    // The engine refuses to guess the month.
    let r = reading();
    let s = Settings::default();
    assert!(matches!(
        compute_report(&r, &s),
        Err(AppError::InvalidReading)
    ));
}
