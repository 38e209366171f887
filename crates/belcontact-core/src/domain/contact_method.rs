use crate::domain::ids::{ContactMethodId, PersonId};
use crate::domain::person::PersonField;
use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Serialized as its label, the same text stored in the database.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum ContactMethodKind {
    Phone,
    MobilePhone,
    Email,
    /// Host-defined kinds that are stored but never validated or mirrored.
    Other(String),
}

impl ContactMethodKind {
    /// Built-in labels are refused so an `Other` kind can never skip
    /// validation and reload as a built-in one.
    pub fn other(label: &str) -> Result<Self, CoreError> {
        let label = label.trim().to_ascii_lowercase();
        if label.is_empty() {
            return Err(CoreError::EmptyContactMethodKind);
        }
        if builtin(&label).is_some() {
            return Err(CoreError::ReservedContactMethodKind(label));
        }
        Ok(Self::Other(label))
    }

    pub fn as_str(&self) -> &str {
        match self {
            ContactMethodKind::Phone => "phone",
            ContactMethodKind::MobilePhone => "mobile_phone",
            ContactMethodKind::Email => "email",
            ContactMethodKind::Other(label) => label,
        }
    }

    /// Person field that mirrors the newest method of this kind.
    pub fn mirrored_field(&self) -> Option<PersonField> {
        match self {
            ContactMethodKind::Phone => Some(PersonField::Phone),
            ContactMethodKind::MobilePhone => Some(PersonField::MobilePhone),
            ContactMethodKind::Email => Some(PersonField::Email),
            ContactMethodKind::Other(_) => None,
        }
    }
}

impl fmt::Display for ContactMethodKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn builtin(label: &str) -> Option<ContactMethodKind> {
    match label {
        "phone" => Some(ContactMethodKind::Phone),
        "mobile_phone" | "mobile" => Some(ContactMethodKind::MobilePhone),
        "email" => Some(ContactMethodKind::Email),
        _ => None,
    }
}

impl FromStr for ContactMethodKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match builtin(&s.trim().to_ascii_lowercase()) {
            Some(kind) => Ok(kind),
            None => Self::other(s),
        }
    }
}

impl From<ContactMethodKind> for String {
    fn from(kind: ContactMethodKind) -> Self {
        match kind {
            ContactMethodKind::Other(label) => label,
            builtin => builtin.as_str().to_string(),
        }
    }
}

impl TryFrom<String> for ContactMethodKind {
    type Error = CoreError;

    fn try_from(label: String) -> Result<Self, Self::Error> {
        label.parse()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactMethod {
    pub id: ContactMethodId,
    pub person_id: Option<PersonId>,
    pub kind: ContactMethodKind,
    pub detail: String,
    pub created_at: i64,
}

impl ContactMethod {
    pub fn new(person_id: PersonId, kind: ContactMethodKind, detail: impl Into<String>) -> Self {
        Self {
            id: ContactMethodId::UNSAVED,
            person_id: Some(person_id),
            kind,
            detail: detail.into(),
            created_at: 0,
        }
    }

    /// `Other` labels must not name a built-in kind, and mirrored kinds need a
    /// value since a blank one would clear the person field.
    pub fn validate(&self) -> Result<(), CoreError> {
        if let ContactMethodKind::Other(label) = &self.kind {
            ContactMethodKind::other(label)?;
        }
        if self.kind.mirrored_field().is_some() && self.detail.trim().is_empty() {
            return Err(CoreError::EmptyContactDetail(self.kind.to_string()));
        }
        Ok(())
    }
}
