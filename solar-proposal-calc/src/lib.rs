pub mod error;
pub mod general;
pub mod reverse;

// Re-export commonly used items for convenience
pub use error::{CalcError, CalcResult};
pub use proposal_model::{Configuration, ReverseCalcResult};
pub use reverse::calculator::{compute, compute_for_system};
