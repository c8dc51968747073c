pub mod calculator;
pub mod cash;
pub mod financing;
pub mod lcoe;
pub mod plot;
pub mod projection;
pub mod sizing;

pub use calculator::{compute, compute_for_system, validate_configuration};
