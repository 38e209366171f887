use crate::domain::ids::PersonId;
use crate::error::CoreError;
use serde::{Deserialize, Serialize};

/// A person and the contact values mirrored from their contact methods.
/// Blank strings mean "unset".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub id: PersonId,
    pub name: String,
    pub phone: String,
    pub mobile_phone: String,
    pub email: String,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Person {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        if self.name.trim().is_empty() {
            return Err(CoreError::EmptyPersonName);
        }
        Ok(())
    }

    pub fn field(&self, field: PersonField) -> &str {
        match field {
            PersonField::Phone => &self.phone,
            PersonField::MobilePhone => &self.mobile_phone,
            PersonField::Email => &self.email,
        }
    }

    pub fn set_field(&mut self, field: PersonField, value: impl Into<String>) {
        let value = value.into();
        match field {
            PersonField::Phone => self.phone = value,
            PersonField::MobilePhone => self.mobile_phone = value,
            PersonField::Email => self.email = value,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PersonField {
    Phone,
    MobilePhone,
    Email,
}

impl PersonField {
    pub fn as_str(self) -> &'static str {
        match self {
            PersonField::Phone => "phone",
            PersonField::MobilePhone => "mobile_phone",
            PersonField::Email => "email",
        }
    }
}
