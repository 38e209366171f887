//! Keeps the person's mirrored phone, mobile and email fields in step with
//! their contact methods.
//!
//! The lookups and the person write go through [`ContactDirectory`]. Nothing
//! here locks: a sibling contact method removed by someone else between the
//! fallback lookup and the person write can still end up mirrored.

use crate::domain::{
    ContactMethod, ContactMethodId, ContactMethodKind, Person, PersonField, PersonId,
};

/// Storage operations reconciliation needs from the host.
pub trait ContactDirectory {
    type Error;

    fn find_person(&self, id: PersonId) -> Result<Option<Person>, Self::Error>;

    /// Newest contact method (highest id) of `kind` for the person, skipping
    /// `excluding`.
    fn latest_contact_method(
        &self,
        person_id: PersonId,
        kind: &ContactMethodKind,
        excluding: ContactMethodId,
    ) -> Result<Option<ContactMethod>, Self::Error>;

    fn save_person(&self, person: &Person) -> Result<(), Self::Error>;
}

/// What happened to the person's mirrored field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reconciliation {
    /// The contact method kind has no mirrored field.
    NotMirrored,
    /// The contact method is not attached to a person.
    Orphaned,
    PersonMissing(PersonId),
    /// The mirrored field already held something else.
    Unchanged,
    Cleared {
        person_id: PersonId,
        field: PersonField,
    },
    Replaced {
        person_id: PersonId,
        field: PersonField,
        value: String,
    },
}

impl Reconciliation {
    pub fn fallback(person_id: PersonId, field: PersonField, fallback: Option<String>) -> Self {
        match fallback {
            Some(value) => Reconciliation::Replaced {
                person_id,
                field,
                value,
            },
            None => Reconciliation::Cleared { person_id, field },
        }
    }

    pub fn apply_to(&self, person: &mut Person) {
        match self {
            Reconciliation::Cleared { field, .. } => person.set_field(*field, String::new()),
            Reconciliation::Replaced { field, value, .. } => {
                person.set_field(*field, value.as_str())
            }
            _ => {}
        }
    }

    pub fn changed_person(&self) -> bool {
        matches!(
            self,
            Reconciliation::Cleared { .. } | Reconciliation::Replaced { .. }
        )
    }
}

/// Field the deleted method is mirrored into, if the person currently shows
/// exactly that value.
pub fn mirrored_match(person: &Person, method: &ContactMethod) -> Option<PersonField> {
    let field = method.kind.mirrored_field()?;
    (person.field(field) == method.detail).then_some(field)
}

/// Runs before the contact method row is removed. When the person mirrors the
/// deleted value, the field falls back to the newest remaining method of the
/// same kind, or is blanked.
pub fn reconcile_after_delete<D: ContactDirectory>(
    directory: &D,
    deleted: &ContactMethod,
) -> Result<Reconciliation, D::Error> {
    if deleted.kind.mirrored_field().is_none() {
        return Ok(Reconciliation::NotMirrored);
    }
    let Some(person_id) = deleted.person_id else {
        return Ok(Reconciliation::Orphaned);
    };
    let Some(mut person) = directory.find_person(person_id)? else {
        return Ok(Reconciliation::PersonMissing(person_id));
    };
    let Some(field) = mirrored_match(&person, deleted) else {
        return Ok(Reconciliation::Unchanged);
    };

    let fallback = directory
        .latest_contact_method(person.id, &deleted.kind, deleted.id)?
        .map(|method| method.detail);
    let outcome = Reconciliation::fallback(person.id, field, fallback);
    outcome.apply_to(&mut person);
    directory.save_person(&person)?;
    Ok(outcome)
}

/// Newest method wins: a freshly inserted method becomes the mirrored value.
pub fn mirror_after_insert<D: ContactDirectory>(
    directory: &D,
    inserted: &ContactMethod,
) -> Result<Reconciliation, D::Error> {
    let Some(field) = inserted.kind.mirrored_field() else {
        return Ok(Reconciliation::NotMirrored);
    };
    let Some(person_id) = inserted.person_id else {
        return Ok(Reconciliation::Orphaned);
    };
    let Some(mut person) = directory.find_person(person_id)? else {
        return Ok(Reconciliation::PersonMissing(person_id));
    };
    if person.field(field) == inserted.detail {
        return Ok(Reconciliation::Unchanged);
    }

    let outcome = Reconciliation::Replaced {
        person_id: person.id,
        field,
        value: inserted.detail.clone(),
    };
    outcome.apply_to(&mut person);
    directory.save_person(&person)?;
    Ok(outcome)
}

/// Called once the edited row is stored. A detail change within the same
/// kind follows the record when the person mirrored the old value. A kind
/// change reconciles the old field as a delete and mirrors the new one as an
/// insert.
pub fn mirror_after_update<D: ContactDirectory>(
    directory: &D,
    before: &ContactMethod,
    after: &ContactMethod,
) -> Result<Vec<Reconciliation>, D::Error> {
    if before.kind == after.kind && before.person_id == after.person_id {
        if before.detail == after.detail {
            return Ok(vec![Reconciliation::Unchanged]);
        }
        let Some(person_id) = after.person_id else {
            return Ok(vec![Reconciliation::Orphaned]);
        };
        let Some(mut person) = directory.find_person(person_id)? else {
            return Ok(vec![Reconciliation::PersonMissing(person_id)]);
        };
        let Some(field) = mirrored_match(&person, before) else {
            let outcome = if before.kind.mirrored_field().is_some() {
                Reconciliation::Unchanged
            } else {
                Reconciliation::NotMirrored
            };
            return Ok(vec![outcome]);
        };
        let outcome = Reconciliation::Replaced {
            person_id,
            field,
            value: after.detail.clone(),
        };
        outcome.apply_to(&mut person);
        directory.save_person(&person)?;
        return Ok(vec![outcome]);
    }

    let removed = reconcile_after_delete(directory, before)?;
    let added = mirror_after_insert(directory, after)?;
    Ok(vec![removed, added])
}
