pub mod contact_method;
pub mod email;
pub mod ids;
pub mod person;
pub mod phone;

pub use contact_method::{ContactMethod, ContactMethodKind};
pub use email::is_valid_email;
pub use ids::{ContactMethodId, PersonId};
pub use person::{Person, PersonField};
pub use phone::{BelgianNumberingPlan, BelgianPhoneNumber, PhoneClass, PhoneDigits};
