pub mod policy;
pub mod reconcile;
pub mod validation;

pub use policy::{
    ContactMethodCheck, ContactMethodCorrection, ContactValidationPolicy, PersonCorrection, Record,
};
pub use reconcile::{
    mirror_after_insert, mirror_after_update, mirrored_match, reconcile_after_delete,
    ContactDirectory, Reconciliation,
};
pub use validation::{Messages, PolicyOptions, ValidationError, DEFAULT_BOOTSTRAP_PHONE};
