//! Compliance evaluation: pure range containment of a reading against the
//! jurisdiction standards, plus human-readable warnings.

use std::fmt;

use serde::Serialize;

use crate::models::WaterReading;
use crate::standards::{JurisdictionStandard, ParamRange};

#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Parameter {
    FreeChlorine,
    Ph,
    Alkalinity,
    CyanuricAcid,
    CalciumHardness,
}

impl Parameter {
    pub fn label(self) -> &'static str {
        match self {
            Parameter::FreeChlorine => "Free Chlorine",
            Parameter::Ph => "pH",
            Parameter::Alkalinity => "Total Alkalinity",
            Parameter::CyanuricAcid => "Cyanuric Acid",
            Parameter::CalciumHardness => "Calcium Hardness",
        }
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One row of the compliance table.
#[derive(Serialize, Clone, Copy, Debug)]
pub struct ComplianceRow {
    pub parameter: Parameter,
    pub current: f64,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub compliant: bool,
}

fn row(parameter: Parameter, current: f64, range: &ParamRange) -> ComplianceRow {
    ComplianceRow {
        parameter,
        current,
        min: range.min,
        max: range.max,
        compliant: range.contains(current),
    }
}

/// Evaluate a reading against the jurisdiction standards. Returns the
/// per-parameter compliance table and free-text warnings, including the
/// CYA-relative free-chlorine floor when the jurisdiction defines one.
pub fn evaluate_compliance(
    reading: &WaterReading,
    standard: &JurisdictionStandard,
) -> (Vec<ComplianceRow>, Vec<String>) {
    let fc = &standard.free_chlorine;
    let fc_range = ParamRange {
        min: Some(fc.min),
        max: Some(fc.max),
    };

    let rows = vec![
        row(Parameter::FreeChlorine, reading.free_chlorine, &fc_range),
        row(Parameter::Ph, reading.ph, &standard.ph),
        row(Parameter::Alkalinity, reading.alkalinity, &standard.alkalinity),
        row(Parameter::CyanuricAcid, reading.cya, &standard.cya),
        row(Parameter::CalciumHardness, reading.calcium, &standard.calcium),
    ];

    let mut warnings = Vec::new();
    if reading.free_chlorine < fc.min {
        warnings.push(format!(
            "Free Chlorine is below minimum ({} ppm).",
            fc.min
        ));
    }
    if reading.free_chlorine > fc.max {
        warnings.push(format!(
            "Free Chlorine is above maximum ({} ppm).",
            fc.max
        ));
    }
    if let Some(ratio) = fc.cya_ratio {
        let floor = reading.cya * ratio;
        if reading.free_chlorine < floor {
            warnings.push(format!(
                "Free Chlorine is below {:.0}% of CYA (min required: {:.2} ppm).",
                ratio * 100.0,
                floor
            ));
        }
    }
    if !standard.ph.contains(reading.ph) {
        warnings.push(format!(
            "pH is out of range ({} - {}).",
            fmt_bound(standard.ph.min),
            fmt_bound(standard.ph.max)
        ));
    }
    if !standard.alkalinity.contains(reading.alkalinity) {
        warnings.push(format!(
            "Alkalinity is out of range ({} - {} ppm).",
            fmt_bound(standard.alkalinity.min),
            fmt_bound(standard.alkalinity.max)
        ));
    }
    if let Some(min) = standard.cya.min {
        if reading.cya < min {
            warnings.push(format!("Cyanuric Acid is below minimum ({min} ppm)."));
        }
    }
    if let Some(max) = standard.cya.max {
        if reading.cya > max {
            warnings.push(format!("Cyanuric Acid is above maximum ({max} ppm)."));
        }
    }
    if let Some(min) = standard.calcium.min {
        if reading.calcium < min {
            warnings.push(format!("Calcium Hardness is below minimum ({min} ppm)."));
        }
    }
    if let Some(max) = standard.calcium.max {
        if reading.calcium > max {
            warnings.push(format!("Calcium Hardness is above maximum ({max} ppm)."));
        }
    }

    (rows, warnings)
}

fn fmt_bound(bound: Option<f64>) -> String {
    match bound {
        Some(v) => format!("{v}"),
        None => "-".to_string(),
    }
}
