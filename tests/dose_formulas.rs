use poolbalance_rs::dosing::{
    BICARB_CHART_RATE_LBS, BICARB_RATE_LBS, acid_dose, acid_for_alkalinity,
    breakpoint_chlorination, calcium_chloride_dose, salt_dose, soda_ash_dose,
    sodium_bicarbonate_chart_lbs, sodium_bicarbonate_dose, stabilizer_dose, uv_loss_factor,
    weekly_chlorine_dose,
};
use poolbalance_rs::{Amount, Chemical, ChlorineAmount, ChlorineProduct, ShockUrgency};

fn approx(a: f64, b: f64) {
    assert!((a - b).abs() < 1e-9, "{a} != {b}");
}

fn amount_value(amount: Amount) -> f64 {
    match amount {
        Amount::FluidOunces(v) | Amount::Ounces(v) | Amount::Pounds(v) => v,
    }
}

#[test]
fn acid_dose_scales_with_alkalinity_and_volume() {
    // 0.5 pH drop at TA 100 in 10,000 gal: 1.3 * 1 * 5 * 1 = 6.5 fl oz
    let dose = acid_dose(8.0, 7.5, 10_000.0, 100.0).expect("dose");
    assert_eq!(dose.chemical, Chemical::MuriaticAcid);
    approx(amount_value(dose.amount), 6.5);

    assert!(acid_dose(7.5, 7.5, 10_000.0, 100.0).is_none());
    assert!(acid_dose(7.2, 7.5, 10_000.0, 100.0).is_none());
}

#[test]
fn soda_ash_dose_and_display() {
    // 0.4 pH rise in 10,000 gal: (0.4 / 0.2) * 6 = 12 oz
    let dose = soda_ash_dose(7.0, 7.4, 10_000.0).expect("dose");
    approx(amount_value(dose.amount), 12.0);
    assert_eq!(dose.to_string(), "12.0 oz soda ash");

    assert!(soda_ash_dose(7.6, 7.4, 10_000.0).is_none());
}

#[test]
fn fluid_ounce_display_switches_to_gallons_at_128() {
    let small = acid_dose(8.0, 7.5, 10_000.0, 100.0).expect("dose");
    assert_eq!(small.to_string(), "6.5 fl oz muriatic acid (31.45%)");

    // 1.0 pH drop at TA 200 in 100,000 gal: 1.3 * 2 * 10 * 10 = 260 fl oz
    let large = acid_dose(8.5, 7.5, 100_000.0, 200.0).expect("dose");
    assert_eq!(
        large.to_string(),
        "2.03 gal (260.0 fl oz) muriatic acid (31.45%)"
    );
}

#[test]
fn both_bicarbonate_rates_are_published_and_disagree() {
    // 40 ppm rise in 10,000 gal.
    let plan = sodium_bicarbonate_dose(60.0, 100.0, 10_000.0).expect("dose");
    approx(amount_value(plan.amount), 6.0);

    let chart = sodium_bicarbonate_chart_lbs(60.0, 100.0, 10_000.0).expect("dose");
    approx(chart, 5.6);

    assert!(BICARB_RATE_LBS != BICARB_CHART_RATE_LBS);
    assert!(amount_value(plan.amount) != chart);
}

#[test]
fn calcium_chloride_dose_rate() {
    // 100 ppm rise in 10,000 gal: 10 * 1.25 = 12.5 lbs
    let dose = calcium_chloride_dose(200.0, 300.0, 10_000.0).expect("dose");
    approx(amount_value(dose.amount), 12.5);
    assert!(calcium_chloride_dose(300.0, 300.0, 10_000.0).is_none());
}

#[test]
fn stabilizer_dose_rate() {
    // 20 ppm rise in 10,000 gal: 2 * 13 = 26 oz
    let dose = stabilizer_dose(30.0, 50.0, 10_000.0).expect("dose");
    approx(amount_value(dose.amount), 26.0);
}

#[test]
fn staged_acid_for_alkalinity_reduction() {
    // 100 ppm drop in 20,000 gal: 10 * 0.2 * 2 = 4 gal = 512 fl oz
    let dose = acid_for_alkalinity(200.0, 100.0, 20_000.0).expect("dose");
    approx(amount_value(dose.amount), 512.0);

    // Sub-0.01 gal doses are not worth staging.
    assert!(acid_for_alkalinity(100.2, 100.0, 1000.0).is_none());
    assert!(acid_for_alkalinity(100.0, 120.0, 20_000.0).is_none());
}

#[test]
fn salt_dose_matches_worked_example() {
    // 1,200 ppm in 20,000 gal: 1200 * 20000 * 183 / 1e7 = 439.2 lbs -> 11 bags
    let dose = salt_dose(2000.0, 3200.0, 20_000.0).expect("dose");
    approx(dose.lbs, 439.2);
    assert_eq!(dose.bags, 11);

    assert!(salt_dose(3200.0, 3200.0, 20_000.0).is_none());
    assert!(salt_dose(3400.0, 3200.0, 20_000.0).is_none());
}

#[test]
fn breakpoint_urgency_thresholds() {
    let product = ChlorineProduct::CalHypo73;

    let none = breakpoint_chlorination(2.0, 2.5, 10_000.0, product);
    approx(none.combined_chlorine, 0.5);
    assert_eq!(none.urgency, ShockUrgency::NotNeeded);

    let soon = breakpoint_chlorination(2.0, 2.7, 10_000.0, product);
    assert_eq!(soon.urgency, ShockUrgency::Within72Hours);

    let now = breakpoint_chlorination(1.0, 3.0, 10_000.0, product);
    assert_eq!(now.urgency, ShockUrgency::Immediate);
    // Target is 10x combined (20 ppm) less the 1 ppm already free.
    approx(now.ppm_needed, 19.0);
    let lbs = now.dose_lbs.expect("dose");
    approx(lbs, (19.0 * 10_000.0 * 0.0834) / (10_000.0 * 0.73));
}

#[test]
fn combined_chlorine_clamps_at_zero() {
    // Total below free is a test artifact, not negative chloramines.
    let rec = breakpoint_chlorination(3.0, 2.0, 10_000.0, ChlorineProduct::Liquid125);
    approx(rec.combined_chlorine, 0.0);
    assert_eq!(rec.urgency, ShockUrgency::NotNeeded);
    assert!(rec.dose_lbs.is_none());
}

#[test]
fn uv_loss_factor_by_season() {
    approx(uv_loss_factor(11), 1.5);
    approx(uv_loss_factor(12), 1.5);
    approx(uv_loss_factor(1), 1.5);
    approx(uv_loss_factor(2), 2.0);
    approx(uv_loss_factor(3), 2.0);
    approx(uv_loss_factor(4), 2.5);
    approx(uv_loss_factor(5), 2.5);
    approx(uv_loss_factor(9), 2.5);
    approx(uv_loss_factor(10), 2.5);
    approx(uv_loss_factor(6), 3.0);
    approx(uv_loss_factor(7), 3.0);
    approx(uv_loss_factor(8), 3.0);
}

#[test]
fn weekly_chlorine_dose_liquid_vs_granular() {
    // cya 50 -> min FC 2.5; June factor 3.0 -> UV loss 18; tested FC 3.0
    // leaves 17.5 ppm to dose.
    let liquid = weekly_chlorine_dose(3.0, 50.0, 6, 10_000.0, ChlorineProduct::Liquid125);
    approx(liquid.min_fc, 2.5);
    approx(liquid.uv_loss, 18.0);
    approx(liquid.to_be_dosed, 17.5);
    match liquid.amount.expect("amount") {
        ChlorineAmount::Liquid { gallons, fl_oz } => {
            approx(gallons, 17.5 * 10_000.0 / (12.0 * 10_000.0));
            approx(fl_oz, gallons * 128.0);
        }
        other => panic!("expected liquid, got {other:?}"),
    }

    let granular = weekly_chlorine_dose(3.0, 50.0, 6, 10_000.0, ChlorineProduct::CalHypo73);
    match granular.amount.expect("amount") {
        ChlorineAmount::Granular { ounces } => approx(ounces, 17.5 * 2.0),
        other => panic!("expected granular, got {other:?}"),
    }
}

#[test]
fn weekly_chlorine_dose_never_negative() {
    // Already chlorinated past the calculated dose: nothing to add.
    let wc = weekly_chlorine_dose(25.0, 50.0, 12, 10_000.0, ChlorineProduct::Liquid125);
    approx(wc.to_be_dosed, 0.0);
    assert!(wc.amount.is_none());
}

#[test]
fn chlorine_products_carry_their_concentration() {
    use poolbalance_rs::ChlorineKind;

    assert_eq!(ChlorineProduct::Liquid10.concentration(), 0.10);
    assert_eq!(ChlorineProduct::Liquid125.concentration(), 0.125);
    assert_eq!(ChlorineProduct::CalHypo68.concentration(), 0.68);
    assert_eq!(ChlorineProduct::CalHypo73.concentration(), 0.73);

    assert_eq!(ChlorineProduct::Liquid10.kind(), ChlorineKind::Liquid);
    assert_eq!(ChlorineProduct::CalHypo68.kind(), ChlorineKind::CalHypo);
    assert_eq!(ChlorineProduct::Liquid125.label(), "Liquid Chlorine (12.5%)");
}
