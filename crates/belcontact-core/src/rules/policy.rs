//! Business rules applied around contact method and person writes.
//!
//! Every rule comes in two halves: a pure `check_*` / `plan_*` function that
//! returns a decision, and an `apply` step (or a hook) that mutates the record.
//! Hosts call the hooks in this order for each write:
//!
//! 1. [`ContactValidationPolicy::before_save`]
//! 2. [`ContactValidationPolicy::on_check_to_write`]; a non-empty result
//!    blocks the write.

use crate::domain::{is_valid_email, BelgianPhoneNumber, ContactMethod, ContactMethodKind, Person};
use crate::rules::reconcile::{reconcile_after_delete, ContactDirectory, Reconciliation};
use crate::rules::validation::{Messages, PolicyOptions, ValidationError};

/// A record handed to the policy hooks by the host.
#[derive(Debug)]
pub enum Record<'a> {
    ContactMethod(&'a mut ContactMethod),
    Person(&'a mut Person),
}

/// Result of the pre-write check for a single contact method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactMethodCheck {
    /// Digit-only detail the record is rewritten to; phone kinds only.
    pub normalized_detail: Option<String>,
    pub error: Option<ValidationError>,
}

impl ContactMethodCheck {
    pub fn apply_to(&self, method: &mut ContactMethod) {
        if let Some(detail) = &self.normalized_detail {
            method.detail = detail.clone();
        }
    }
}

/// Correction made to a contact method right before it is saved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactMethodCorrection {
    Unchanged,
    Normalize { detail: String },
    /// A number entered as `phone` that is really a mobile number.
    PromoteToMobile { detail: String },
}

impl ContactMethodCorrection {
    pub fn apply_to(self, method: &mut ContactMethod) {
        match self {
            ContactMethodCorrection::Unchanged => {}
            ContactMethodCorrection::Normalize { detail } => method.detail = detail,
            ContactMethodCorrection::PromoteToMobile { detail } => {
                method.detail = detail;
                method.kind = ContactMethodKind::MobilePhone;
            }
        }
    }
}

/// Correction made to a person right before it is saved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersonCorrection {
    Unchanged,
    MovePhoneToMobile { mobile_phone: String },
}

impl PersonCorrection {
    pub fn apply_to(self, person: &mut Person) {
        if let PersonCorrection::MovePhoneToMobile { mobile_phone } = self {
            person.mobile_phone = mobile_phone;
            person.phone.clear();
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ContactValidationPolicy {
    options: PolicyOptions,
    messages: Messages,
}

impl ContactValidationPolicy {
    pub fn new(options: PolicyOptions, messages: Messages) -> Self {
        Self { options, messages }
    }

    pub fn options(&self) -> &PolicyOptions {
        &self.options
    }

    pub fn messages(&self) -> &Messages {
        &self.messages
    }

    pub fn parse_phone(&self, value: &str) -> BelgianPhoneNumber {
        BelgianPhoneNumber::with_plan(value, self.options.plan)
    }

    pub fn check_contact_method(&self, method: &ContactMethod) -> ContactMethodCheck {
        match &method.kind {
            ContactMethodKind::Phone => {
                let number = self.parse_phone(&method.detail);
                ContactMethodCheck {
                    normalized_detail: Some(number.digits().to_string()),
                    error: (!self.accepts_land_line(&number))
                        .then_some(ValidationError::InvalidPhoneNumber),
                }
            }
            ContactMethodKind::MobilePhone => {
                let number = self.parse_phone(&method.detail);
                ContactMethodCheck {
                    normalized_detail: Some(number.digits().to_string()),
                    error: (!self.accepts_mobile(&number))
                        .then_some(ValidationError::InvalidMobilePhoneNumber),
                }
            }
            ContactMethodKind::Email => ContactMethodCheck {
                normalized_detail: None,
                error: (!is_valid_email(&method.detail)).then_some(ValidationError::InvalidEmail),
            },
            ContactMethodKind::Other(_) => ContactMethodCheck {
                normalized_detail: None,
                error: None,
            },
        }
    }

    /// Person fields are optional, so blank values always pass.
    pub fn check_person(&self, person: &Person) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        let phone = self.parse_phone(&person.phone);
        let bootstrap_default = !person.id.is_persisted()
            && person.phone == self.options.bootstrap_phone_sentinel;
        if !(person.phone.is_empty() || self.accepts_land_line(&phone) || bootstrap_default) {
            errors.push(ValidationError::InvalidPhoneNumber);
        }

        let mobile = self.parse_phone(&person.mobile_phone);
        if !(person.mobile_phone.is_empty() || self.accepts_mobile(&mobile)) {
            errors.push(ValidationError::InvalidMobilePhoneNumber);
        }

        if !person.email.is_empty() && !is_valid_email(&person.email) {
            errors.push(ValidationError::InvalidEmail);
        }

        errors
    }

    pub fn plan_contact_method_save(&self, method: &ContactMethod) -> ContactMethodCorrection {
        match &method.kind {
            ContactMethodKind::Phone => {
                let number = self.parse_phone(&method.detail);
                let detail = number.digits().to_string();
                if number.is_valid_mobile_number() {
                    ContactMethodCorrection::PromoteToMobile { detail }
                } else {
                    ContactMethodCorrection::Normalize { detail }
                }
            }
            ContactMethodKind::MobilePhone => ContactMethodCorrection::Normalize {
                detail: self.parse_phone(&method.detail).digits().to_string(),
            },
            ContactMethodKind::Email | ContactMethodKind::Other(_) => {
                ContactMethodCorrection::Unchanged
            }
        }
    }

    pub fn plan_person_save(&self, person: &Person) -> PersonCorrection {
        let phone = self.parse_phone(&person.phone);
        if phone.is_valid_mobile_number() && person.mobile_phone.is_empty() {
            PersonCorrection::MovePhoneToMobile {
                mobile_phone: phone.digits().to_string(),
            }
        } else {
            PersonCorrection::Unchanged
        }
    }

    pub fn before_save(&self, record: Record<'_>) {
        match record {
            Record::ContactMethod(method) => self.before_save_contact_method(method),
            Record::Person(person) => self.before_save_person(person),
        }
    }

    /// Returns display strings; normalizes phone details in place.
    pub fn on_check_to_write(&self, record: Record<'_>) -> Vec<String> {
        let errors = match record {
            Record::ContactMethod(method) => self.check_to_write_contact_method(method),
            Record::Person(person) => self.check_person(person),
        };
        self.messages.render(&errors)
    }

    /// Runs before the row is removed. Persons are left to the host, which
    /// drops their contact methods along with them.
    pub fn on_contact_method_deleted<D: ContactDirectory>(
        &self,
        directory: &D,
        record: Record<'_>,
    ) -> Result<Reconciliation, D::Error> {
        match record {
            Record::ContactMethod(method) => reconcile_after_delete(directory, method),
            Record::Person(_) => Ok(Reconciliation::NotMirrored),
        }
    }

    pub fn on_check_to_delete(&self, _record: Record<'_>) -> Vec<String> {
        Vec::new()
    }

    pub fn on_is_modified(&self, _record: Record<'_>) -> bool {
        false
    }

    pub fn on_before_delete(&self, _record: Record<'_>) {}

    pub fn on_after_insert(&self, _record: Record<'_>) {}

    pub fn on_after_update(&self, _record: Record<'_>) {}

    fn before_save_contact_method(&self, method: &mut ContactMethod) {
        self.plan_contact_method_save(method).apply_to(method);
    }

    fn before_save_person(&self, person: &mut Person) {
        self.plan_person_save(person).apply_to(person);
    }

    fn check_to_write_contact_method(&self, method: &mut ContactMethod) -> Vec<ValidationError> {
        let check = self.check_contact_method(method);
        check.apply_to(method);
        check.error.into_iter().collect()
    }

    fn accepts_land_line(&self, number: &BelgianPhoneNumber) -> bool {
        if self.rejects_characters(number) {
            return false;
        }
        number.is_valid_land_line_number() || !number.has_valid_country_prefix()
    }

    fn accepts_mobile(&self, number: &BelgianPhoneNumber) -> bool {
        if self.rejects_characters(number) {
            return false;
        }
        number.is_valid_mobile_number() || !number.has_valid_country_prefix()
    }

    fn rejects_characters(&self, number: &BelgianPhoneNumber) -> bool {
        self.options.strict_characters && !number.contains_only_allowed_characters()
    }
}
