pub mod contact_methods;
pub mod persons;

pub use contact_methods::{
    ContactMethodNew, ContactMethodRemoval, ContactMethodUpdate, ContactMethodWrite,
    ContactMethodsRepo,
};
pub use persons::{PersonNew, PersonUpdate, PersonsRepo};
