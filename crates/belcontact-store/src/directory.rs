use crate::error::{Result, StoreError};
use crate::repo::contact_methods::latest_contact_method;
use crate::repo::persons::{find_person, write_mirrored_fields};
use belcontact_core::domain::{
    ContactMethod, ContactMethodId, ContactMethodKind, Person, PersonId,
};
use belcontact_core::rules::ContactDirectory;
use rusqlite::Connection;

/// [`ContactDirectory`] over a connection or an open transaction. Person
/// writes are stamped with `now_utc`.
pub struct StoreDirectory<'a> {
    conn: &'a Connection,
    now_utc: i64,
}

impl<'a> StoreDirectory<'a> {
    pub fn new(conn: &'a Connection, now_utc: i64) -> Self {
        Self { conn, now_utc }
    }
}

impl ContactDirectory for StoreDirectory<'_> {
    type Error = StoreError;

    fn find_person(&self, id: PersonId) -> Result<Option<Person>> {
        find_person(self.conn, id)
    }

    fn latest_contact_method(
        &self,
        person_id: PersonId,
        kind: &ContactMethodKind,
        excluding: ContactMethodId,
    ) -> Result<Option<ContactMethod>> {
        latest_contact_method(self.conn, person_id, kind, excluding)
    }

    fn save_person(&self, person: &Person) -> Result<()> {
        write_mirrored_fields(self.conn, self.now_utc, person)
    }
}
