pub mod finance;
pub mod settings_file;

pub use finance::{affordable_principal, annuity_factor, installment, installment_for};
pub use settings_file::{load_configuration, load_or_default};
