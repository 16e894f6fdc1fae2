use std::fmt;

use serde::{Deserialize, Serialize};

/// Regulatory jurisdiction whose chemical standards apply to the pool.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Jurisdiction {
    Arizona,
    Florida,
    Texas,
}

impl fmt::Display for Jurisdiction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Jurisdiction::Arizona => "Arizona",
            Jurisdiction::Florida => "Florida",
            Jurisdiction::Texas => "Texas",
        };
        f.write_str(s)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PoolType {
    Pool,
    Spa,
}

impl fmt::Display for PoolType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PoolType::Pool => "pool",
            PoolType::Spa => "spa",
        })
    }
}

/// Physical form of a chlorine product, which determines how a ppm dose is
/// converted into a purchasable quantity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChlorineKind {
    Liquid,
    CalHypo,
}

/// Supported chlorine products and their fractional available-chlorine
/// concentrations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChlorineProduct {
    #[serde(rename = "liquid-10")]
    Liquid10,
    #[serde(rename = "liquid-12.5")]
    Liquid125,
    #[serde(rename = "cal-hypo-68")]
    CalHypo68,
    #[serde(rename = "cal-hypo-73")]
    CalHypo73,
}

impl ChlorineProduct {
    pub fn kind(self) -> ChlorineKind {
        match self {
            ChlorineProduct::Liquid10 | ChlorineProduct::Liquid125 => ChlorineKind::Liquid,
            ChlorineProduct::CalHypo68 | ChlorineProduct::CalHypo73 => ChlorineKind::CalHypo,
        }
    }

    pub fn concentration(self) -> f64 {
        match self {
            ChlorineProduct::Liquid10 => 0.10,
            ChlorineProduct::Liquid125 => 0.125,
            ChlorineProduct::CalHypo68 => 0.68,
            ChlorineProduct::CalHypo73 => 0.73,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ChlorineProduct::Liquid10 => "Liquid Chlorine (10%)",
            ChlorineProduct::Liquid125 => "Liquid Chlorine (12.5%)",
            ChlorineProduct::CalHypo68 => "Calcium Hypochlorite (68%)",
            ChlorineProduct::CalHypo73 => "Calcium Hypochlorite (73%)",
        }
    }
}

/// A single water-test reading. All concentrations are ppm, temperature is in
/// degrees Fahrenheit, volume is US gallons. Immutable per calculation.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WaterReading {
    pub ph: f64,
    pub free_chlorine: f64,
    pub total_chlorine: f64,
    pub alkalinity: f64,
    pub calcium: f64,
    pub cya: f64,
    pub tds: f64,
    pub temp_f: f64,
    #[serde(default)]
    pub salt_level: Option<f64>,
    #[serde(default)]
    pub salt_target: Option<f64>,
    pub pool_volume_gal: f64,
}

impl WaterReading {
    /// Combined (chloramine) chlorine, clamped at zero. Total chlorine below
    /// free chlorine is a test-kit artifact, not a negative chloramine level.
    pub fn combined_chlorine(&self) -> f64 {
        (self.total_chlorine - self.free_chlorine).max(0.0)
    }

    /// All required fields finite and non-negative, volume strictly positive.
    pub fn is_well_formed(&self) -> bool {
        let required = [
            self.ph,
            self.free_chlorine,
            self.total_chlorine,
            self.alkalinity,
            self.calcium,
            self.cya,
            self.tds,
            self.temp_f,
        ];
        if !required.iter().all(|v| v.is_finite() && *v >= 0.0) {
            return false;
        }
        if !(self.pool_volume_gal.is_finite() && self.pool_volume_gal > 0.0) {
            return false;
        }
        for opt in [self.salt_level, self.salt_target] {
            if let Some(v) = opt {
                if !(v.is_finite() && v >= 0.0) {
                    return false;
                }
            }
        }
        true
    }
}

/// Per-call overrides for the golden-number dosing targets.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
pub struct TargetOverrides {
    pub alkalinity: Option<f64>,
    pub calcium: Option<f64>,
    pub cya: Option<f64>,
    pub ph: Option<f64>,
}

/// Calculation context threaded explicitly through every engine call. There
/// is no ambient selection state: jurisdiction, pool type, chlorine product
/// and the calendar month all arrive here.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub jurisdiction: Jurisdiction,
    pub pool_type: PoolType,
    pub chlorine_product: ChlorineProduct,
    pub targets: TargetOverrides,
    /// Calendar month (1-12) for the UV chlorine-loss factor. The engine
    /// never reads the clock; adapters fill this in when absent.
    pub month: Option<u32>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            jurisdiction: Jurisdiction::Arizona,
            pool_type: PoolType::Pool,
            chlorine_product: ChlorineProduct::Liquid125,
            targets: TargetOverrides::default(),
            month: None,
        }
    }
}
