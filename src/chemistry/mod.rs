//! Chemistry module: factor tables and pure helpers for the Langelier
//! Saturation Index (LSI).
//!
//! This module provides:
//! - CYA-corrected carbonate alkalinity
//! - Ceiling-bucket factor tables for alkalinity, calcium hardness,
//!   temperature and total dissolved solids
//! - The LSI combination formula and two classification band sets
//! - Utility rounding helper
//!
//! Units conventions:
//! - Concentrations (alkalinity, calcium, CYA, TDS) are ppm
//! - Temperature is degrees Fahrenheit
//! - pH and the LSI itself are unitless
//!
//! Design notes:
//! - Factor lookups are step functions, not interpolation: the factor of the
//!   first table entry whose threshold is >= the input applies, and inputs
//!   beyond the last threshold take the last factor
//! - Corrected alkalinity clamps negatives to zero (alkalinity cannot be
//!   negative after the CYA deduction)
//! - Two classification band sets ship side by side: the six-band advisory
//!   set used by the report, and the coarser four-band scale used to place a
//!   marker on a -1.0..+1.0 gauge. They disagree near the boundaries and are
//!   deliberately kept as distinct named views until one is retired
//!
//! # Panics
//! None of the functions panic; lookups fall back to the last table entry.
//!
//! # Errors
//! No error types produced; use higher-level validation if needed.
//!
//! # Limitations
//! The factor tables are empirical pool-industry values, not a thermodynamic
//! carbonate-system model.

use std::fmt;

use serde::Serialize;

/// Alkalinity correction factors, (ppm threshold, factor).
pub const ALKALINITY_FACTORS: &[(f64, f64)] = &[
    (5.0, 0.7),
    (25.0, 1.4),
    (50.0, 1.7),
    (75.0, 1.9),
    (100.0, 2.0),
    (125.0, 2.1),
    (150.0, 2.2),
    (200.0, 2.3),
    (250.0, 2.4),
    (300.0, 2.5),
    (400.0, 2.6),
    (800.0, 2.9),
    (1000.0, 3.0),
];

/// Calcium hardness correction factors, (ppm threshold, factor).
pub const CALCIUM_FACTORS: &[(f64, f64)] = &[
    (5.0, 0.3),
    (25.0, 1.0),
    (50.0, 1.3),
    (75.0, 1.5),
    (100.0, 1.6),
    (125.0, 1.7),
    (150.0, 1.8),
    (200.0, 1.9),
    (250.0, 2.0),
    (300.0, 2.1),
    (400.0, 2.2),
    (800.0, 2.5),
    (1000.0, 2.6),
];

/// Water temperature correction factors, (deg F threshold, factor).
pub const TEMPERATURE_FACTORS: &[(f64, f64)] = &[
    (32.0, 0.1),
    (37.0, 0.1),
    (46.0, 0.2),
    (53.0, 0.3),
    (60.0, 0.4),
    (66.0, 0.5),
    (76.0, 0.6),
    (84.0, 0.7),
    (94.0, 0.8),
    (104.0, 0.9),
    (128.0, 1.0),
];

/// Total dissolved solids constants, (ppm threshold, constant). The final
/// entry covers everything above 5,500 ppm.
pub const TDS_FACTORS: &[(f64, f64)] = &[
    (800.0, 12.1),
    (1500.0, 12.2),
    (2900.0, 12.3),
    (5500.0, 12.4),
    (f64::INFINITY, 12.5),
];

/// Ceiling-bucket lookup: the factor of the first entry whose threshold is
/// >= `value`, or the last entry's factor when `value` exceeds them all.
pub fn ceiling_factor(value: f64, table: &[(f64, f64)]) -> f64 {
    for &(threshold, factor) in table {
        if value <= threshold {
            return factor;
        }
    }
    match table.last() {
        Some(&(_, factor)) => factor,
        None => 0.0,
    }
}

/// Carbonate alkalinity after deducting the cyanurate contribution
/// (one third of the CYA level), floored at zero.
pub fn corrected_alkalinity(alkalinity: f64, cya: f64) -> f64 {
    (alkalinity - cya / 3.0).max(0.0)
}

pub fn tds_factor(tds: f64) -> f64 {
    ceiling_factor(tds, TDS_FACTORS)
}

/// LSI components for one reading. Recomputed fresh on every call, never
/// persisted.
#[derive(Serialize, Clone, Copy, Debug)]
pub struct LsiFactors {
    pub corrected_alkalinity: f64,
    pub alkalinity_factor: f64,
    pub calcium_factor: f64,
    pub temperature_factor: f64,
    pub tds_factor: f64,
    pub lsi: f64,
}

/// Compute the LSI and its per-component factor breakdown.
///
/// LSI = pH + calcium factor + alkalinity factor + temperature factor
///       - TDS constant, with the alkalinity factor looked up against the
/// CYA-corrected alkalinity.
pub fn lsi_factors(
    ph: f64,
    alkalinity: f64,
    cya: f64,
    calcium: f64,
    temp_f: f64,
    tds: f64,
) -> LsiFactors {
    let corrected = corrected_alkalinity(alkalinity, cya);
    let alkalinity_factor = ceiling_factor(corrected, ALKALINITY_FACTORS);
    let calcium_factor = ceiling_factor(calcium, CALCIUM_FACTORS);
    let temperature_factor = ceiling_factor(temp_f, TEMPERATURE_FACTORS);
    let tds_factor = tds_factor(tds);
    LsiFactors {
        corrected_alkalinity: corrected,
        alkalinity_factor,
        calcium_factor,
        temperature_factor,
        tds_factor,
        lsi: ph + calcium_factor + alkalinity_factor + temperature_factor - tds_factor,
    }
}

/// Compute just the LSI scalar.
pub fn compute_lsi(ph: f64, alkalinity: f64, cya: f64, calcium: f64, temp_f: f64, tds: f64) -> f64 {
    lsi_factors(ph, alkalinity, cya, calcium, temp_f, tds).lsi
}

/// Six-band advisory classification of an LSI value.
#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum LsiStatus {
    VeryCorrosive,
    Corrosive,
    SlightlyCorrosive,
    Balanced,
    SlightlyScaleForming,
    ScaleForming,
}

impl LsiStatus {
    /// Band boundaries: < -0.5 very corrosive; [-0.5, -0.2) corrosive;
    /// [-0.2, -0.05) slightly corrosive; [-0.05, 0.3] balanced;
    /// (0.3, 0.5] slightly scale forming; > 0.5 scale forming.
    pub fn classify(lsi: f64) -> Self {
        if lsi < -0.5 {
            LsiStatus::VeryCorrosive
        } else if lsi < -0.2 {
            LsiStatus::Corrosive
        } else if lsi < -0.05 {
            LsiStatus::SlightlyCorrosive
        } else if lsi <= 0.3 {
            LsiStatus::Balanced
        } else if lsi <= 0.5 {
            LsiStatus::SlightlyScaleForming
        } else {
            LsiStatus::ScaleForming
        }
    }
}

impl fmt::Display for LsiStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LsiStatus::VeryCorrosive => "Very Corrosive",
            LsiStatus::Corrosive => "Corrosive",
            LsiStatus::SlightlyCorrosive => "Slightly Corrosive",
            LsiStatus::Balanced => "Balanced",
            LsiStatus::SlightlyScaleForming => "Slightly Scale Forming",
            LsiStatus::ScaleForming => "Scale Forming",
        })
    }
}

/// Coarse four-band view used to color a -1.0..+1.0 LSI gauge. Cut points
/// (+/- 0.3 around zero) intentionally differ from [`LsiStatus`]; the two
/// views have not been reconciled.
#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum LsiScaleBand {
    Corrosive,
    Caution,
    Balanced,
    Scaling,
}

impl LsiScaleBand {
    pub fn classify(lsi: f64) -> Self {
        if lsi < -0.3 {
            LsiScaleBand::Corrosive
        } else if lsi < 0.0 {
            LsiScaleBand::Caution
        } else if lsi <= 0.3 {
            LsiScaleBand::Balanced
        } else {
            LsiScaleBand::Scaling
        }
    }
}

impl fmt::Display for LsiScaleBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LsiScaleBand::Corrosive => "Corrosive",
            LsiScaleBand::Caution => "Caution",
            LsiScaleBand::Balanced => "Balanced",
            LsiScaleBand::Scaling => "Scaling",
        })
    }
}

/// Round a floating-point value to a specified number of decimal digits.
pub fn round_to(x: f64, digits: i32) -> f64 {
    let p = 10f64.powi(digits);
    (x * p).round() / p
}
