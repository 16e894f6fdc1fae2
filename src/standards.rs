//! Static jurisdiction standards and golden-number dosing targets.
//!
//! These tables are configuration, not logic: they are defined once, never
//! mutated, and looked up by `(jurisdiction, pool type)` at calculation
//! time. A missing entry is a configuration error surfaced as
//! [`AppError::MissingStandards`](crate::error::AppError) by the caller.

use crate::models::{Jurisdiction, PoolType, TargetOverrides};

/// An acceptable range for one chemistry parameter. An absent bound cannot
/// be violated (e.g. a jurisdiction with no enforced calcium minimum).
#[derive(Clone, Copy, Debug)]
pub struct ParamRange {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl ParamRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
        }
    }

    pub fn contains(&self, value: f64) -> bool {
        if let Some(min) = self.min {
            if value < min {
                return false;
            }
        }
        if let Some(max) = self.max {
            if value > max {
                return false;
            }
        }
        true
    }
}

/// Free-chlorine range with an optional CYA-relative floor: when `cya_ratio`
/// is present, free chlorine must also stay above `cya * cya_ratio`.
#[derive(Clone, Copy, Debug)]
pub struct ChlorineRange {
    pub min: f64,
    pub max: f64,
    pub cya_ratio: Option<f64>,
}

/// Acceptable ranges for one `(jurisdiction, pool type)` pair.
#[derive(Clone, Copy, Debug)]
pub struct JurisdictionStandard {
    pub free_chlorine: ChlorineRange,
    pub ph: ParamRange,
    pub alkalinity: ParamRange,
    pub cya: ParamRange,
    pub calcium: ParamRange,
}

const ARIZONA_POOL: JurisdictionStandard = JurisdictionStandard {
    free_chlorine: ChlorineRange {
        min: 1.0,
        max: 5.0,
        cya_ratio: Some(0.05),
    },
    ph: ParamRange::new(7.2, 7.8),
    alkalinity: ParamRange::new(60.0, 180.0),
    cya: ParamRange::new(0.0, 100.0),
    calcium: ParamRange::new(150.0, 1000.0),
};

const ARIZONA_SPA: JurisdictionStandard = JurisdictionStandard {
    free_chlorine: ChlorineRange {
        min: 3.0,
        max: 5.0,
        cya_ratio: Some(0.05),
    },
    ph: ParamRange::new(7.2, 7.8),
    alkalinity: ParamRange::new(60.0, 180.0),
    cya: ParamRange::new(0.0, 100.0),
    calcium: ParamRange::new(150.0, 1000.0),
};

const FLORIDA_POOL: JurisdictionStandard = JurisdictionStandard {
    free_chlorine: ChlorineRange {
        min: 1.0,
        max: 10.0,
        cya_ratio: Some(0.05),
    },
    ph: ParamRange::new(7.0, 7.8),
    alkalinity: ParamRange::new(60.0, 180.0),
    cya: ParamRange::new(0.0, 100.0),
    calcium: ParamRange::new(150.0, 1000.0),
};

// Florida publishes no CYA-relative chlorine floor for spas.
const FLORIDA_SPA: JurisdictionStandard = JurisdictionStandard {
    free_chlorine: ChlorineRange {
        min: 2.0,
        max: 5.0,
        cya_ratio: None,
    },
    ph: ParamRange::new(7.0, 7.8),
    alkalinity: ParamRange::new(60.0, 180.0),
    cya: ParamRange::new(0.0, 40.0),
    calcium: ParamRange::new(150.0, 1000.0),
};

const TEXAS_POOL: JurisdictionStandard = JurisdictionStandard {
    free_chlorine: ChlorineRange {
        min: 1.0,
        max: 6.0,
        cya_ratio: Some(0.05),
    },
    ph: ParamRange::new(7.2, 7.8),
    alkalinity: ParamRange::new(60.0, 180.0),
    cya: ParamRange::new(0.0, 100.0),
    calcium: ParamRange::new(150.0, 1000.0),
};

const TEXAS_SPA: JurisdictionStandard = TEXAS_POOL;

/// Look up the standards for a `(jurisdiction, pool type)` pair.
///
/// The built-in tables cover every pair, so this currently always returns
/// `Some`. The `Option` stays in the signature as the seam for externally
/// loaded tables; callers route an absent entry to
/// [`AppError::MissingStandards`](crate::error::AppError).
pub fn standards_for(
    jurisdiction: Jurisdiction,
    pool_type: PoolType,
) -> Option<&'static JurisdictionStandard> {
    let standard = match (jurisdiction, pool_type) {
        (Jurisdiction::Arizona, PoolType::Pool) => &ARIZONA_POOL,
        (Jurisdiction::Arizona, PoolType::Spa) => &ARIZONA_SPA,
        (Jurisdiction::Florida, PoolType::Pool) => &FLORIDA_POOL,
        (Jurisdiction::Florida, PoolType::Spa) => &FLORIDA_SPA,
        (Jurisdiction::Texas, PoolType::Pool) => &TEXAS_POOL,
        (Jurisdiction::Texas, PoolType::Spa) => &TEXAS_SPA,
    };
    Some(standard)
}

/// Golden-number dosing targets for a pool type, used by the sequencer
/// absent explicit overrides.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GoldenNumbers {
    pub alkalinity: f64,
    pub calcium: f64,
    pub cya: f64,
    pub ph: f64,
}

pub fn golden_numbers(pool_type: PoolType) -> GoldenNumbers {
    match pool_type {
        PoolType::Pool => GoldenNumbers {
            alkalinity: 100.0,
            calcium: 300.0,
            cya: 50.0,
            ph: 7.6,
        },
        PoolType::Spa => GoldenNumbers {
            alkalinity: 80.0,
            calcium: 300.0,
            cya: 0.0,
            ph: 7.5,
        },
    }
}

impl GoldenNumbers {
    /// Apply per-call target overrides on top of the defaults.
    pub fn with_overrides(mut self, overrides: &TargetOverrides) -> Self {
        if let Some(v) = overrides.alkalinity {
            self.alkalinity = v;
        }
        if let Some(v) = overrides.calcium {
            self.calcium = v;
        }
        if let Some(v) = overrides.cya {
            self.cya = v;
        }
        if let Some(v) = overrides.ph {
            self.ph = v;
        }
        self
    }
}
