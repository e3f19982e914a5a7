// Match group domain module
// Contains the creation wizard, its value objects, and domain events

pub mod events;
pub mod request;
pub mod team_balance;
pub mod value_objects;
pub mod wizard;

// Re-export main types for convenience
pub use request::GroupCreationRequest;
pub use wizard::{GroupCreationWizard, WizardError, WizardStep};
