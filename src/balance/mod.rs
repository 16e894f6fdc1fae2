pub mod calculator;
pub mod compliance;
pub mod sequencer;
