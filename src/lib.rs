pub mod adapters;
pub mod balance;
pub mod chemistry;
pub mod dosing;
pub mod error;
pub mod models;
pub mod standards;

pub use crate::balance::calculator::{BalanceReport, compute_report};
pub use crate::balance::compliance::{ComplianceRow, Parameter, evaluate_compliance};
pub use crate::balance::sequencer::{
    DosingPlan, DosingStep, PhFollowup, Schedule, StepDose, plan_dosing,
};
pub use crate::chemistry::{
    LsiFactors, LsiScaleBand, LsiStatus, compute_lsi, corrected_alkalinity, lsi_factors,
};
pub use crate::dosing::{
    Amount, ChemDose, Chemical, ChlorineAmount, SaltDose, ShockRecommendation, ShockUrgency,
    WeeklyChlorine,
};
pub use crate::error::AppError;
pub use crate::models::{
    ChlorineKind, ChlorineProduct, Jurisdiction, PoolType, Settings, TargetOverrides, WaterReading,
};
