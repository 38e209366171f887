use crate::directory::StoreDirectory;
use crate::error::{Result, StoreError};
use crate::repo::persons::find_person;
use belcontact_core::domain::{ContactMethod, ContactMethodId, ContactMethodKind, PersonId};
use belcontact_core::rules::{
    mirror_after_insert, mirror_after_update, ContactValidationPolicy, Reconciliation, Record,
};
use rusqlite::{params, Connection, OptionalExtension, Row};

const METHOD_COLUMNS: &str = "id, person_id, contact_method, contact_detail, created_at";

#[derive(Debug, Clone)]
pub struct ContactMethodNew {
    pub person_id: PersonId,
    pub kind: ContactMethodKind,
    pub detail: String,
}

#[derive(Debug, Clone, Default)]
pub struct ContactMethodUpdate {
    pub kind: Option<ContactMethodKind>,
    pub detail: Option<String>,
}

/// A stored contact method and what happened to the person's mirror.
#[derive(Debug, Clone)]
pub struct ContactMethodWrite {
    pub method: ContactMethod,
    pub mirror: Vec<Reconciliation>,
}

#[derive(Debug, Clone)]
pub struct ContactMethodRemoval {
    pub method: ContactMethod,
    pub reconciliation: Reconciliation,
}

pub struct ContactMethodsRepo<'a> {
    conn: &'a Connection,
    policy: &'a ContactValidationPolicy,
}

impl<'a> ContactMethodsRepo<'a> {
    pub fn new(conn: &'a Connection, policy: &'a ContactValidationPolicy) -> Self {
        Self { conn, policy }
    }

    pub fn create(&self, now_utc: i64, input: ContactMethodNew) -> Result<ContactMethodWrite> {
        if find_person(self.conn, input.person_id)?.is_none() {
            return Err(StoreError::NotFound(format!("person {}", input.person_id)));
        }

        let mut method = ContactMethod::new(input.person_id, input.kind, input.detail);
        method.created_at = now_utc;
        method.validate()?;
        self.prepare_write(&mut method)?;

        let tx = self.conn.unchecked_transaction()?;
        tx.execute(
            "INSERT INTO contact_methods (person_id, contact_method, contact_detail, created_at)
             VALUES (?1, ?2, ?3, ?4);",
            params![
                method.person_id.map(PersonId::get),
                method.kind.as_str(),
                method.detail,
                method.created_at
            ],
        )?;
        method.id = ContactMethodId::new(tx.last_insert_rowid());
        self.policy.on_after_insert(Record::ContactMethod(&mut method));
        let mirror = mirror_after_insert(&StoreDirectory::new(&tx, now_utc), &method)?;
        tx.commit()?;

        Ok(ContactMethodWrite {
            method,
            mirror: vec![mirror],
        })
    }

    pub fn get(&self, id: ContactMethodId) -> Result<Option<ContactMethod>> {
        let method = self
            .conn
            .query_row(
                &format!("SELECT {METHOD_COLUMNS} FROM contact_methods WHERE id = ?1;"),
                [id.get()],
                |row| Ok(contact_method_from_row(row)),
            )
            .optional()?;
        method.transpose()
    }

    pub fn list_for_person(&self, person_id: PersonId) -> Result<Vec<ContactMethod>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {METHOD_COLUMNS}
             FROM contact_methods
             WHERE person_id = ?1
             ORDER BY id ASC;"
        ))?;
        let mut rows = stmt.query([person_id.get()])?;
        let mut methods = Vec::new();
        while let Some(row) = rows.next()? {
            methods.push(contact_method_from_row(row)?);
        }
        Ok(methods)
    }

    pub fn update(
        &self,
        now_utc: i64,
        id: ContactMethodId,
        update: ContactMethodUpdate,
    ) -> Result<ContactMethodWrite> {
        let before = self
            .get(id)?
            .ok_or_else(|| StoreError::NotFound(format!("contact method {}", id)))?;

        let mut method = before.clone();
        if let Some(kind) = update.kind {
            method.kind = kind;
        }
        if let Some(detail) = update.detail {
            method.detail = detail;
        }
        method.validate()?;
        self.prepare_write(&mut method)?;
        if method == before && !self.policy.on_is_modified(Record::ContactMethod(&mut method)) {
            return Ok(ContactMethodWrite {
                method,
                mirror: vec![Reconciliation::Unchanged],
            });
        }

        let tx = self.conn.unchecked_transaction()?;
        tx.execute(
            "UPDATE contact_methods
             SET contact_method = ?2, contact_detail = ?3
             WHERE id = ?1;",
            params![method.id.get(), method.kind.as_str(), method.detail],
        )?;
        self.policy.on_after_update(Record::ContactMethod(&mut method));
        let mirror = mirror_after_update(&StoreDirectory::new(&tx, now_utc), &before, &method)?;
        tx.commit()?;

        Ok(ContactMethodWrite { method, mirror })
    }

    /// Reconciles the person before the row goes away, inside one transaction.
    pub fn delete(
        &self,
        now_utc: i64,
        id: ContactMethodId,
    ) -> Result<Option<ContactMethodRemoval>> {
        let Some(mut method) = self.get(id)? else {
            return Ok(None);
        };
        let errors = self
            .policy
            .on_check_to_delete(Record::ContactMethod(&mut method));
        if !errors.is_empty() {
            return Err(StoreError::Rejected(errors));
        }

        self.policy.on_before_delete(Record::ContactMethod(&mut method));

        let tx = self.conn.unchecked_transaction()?;
        let reconciliation = self.policy.on_contact_method_deleted(
            &StoreDirectory::new(&tx, now_utc),
            Record::ContactMethod(&mut method),
        )?;
        tx.execute("DELETE FROM contact_methods WHERE id = ?1;", [id.get()])?;
        tx.commit()?;

        Ok(Some(ContactMethodRemoval {
            method,
            reconciliation,
        }))
    }

    fn prepare_write(&self, method: &mut ContactMethod) -> Result<()> {
        self.policy.before_save(Record::ContactMethod(method));
        let errors = self.policy.on_check_to_write(Record::ContactMethod(method));
        if errors.is_empty() {
            Ok(())
        } else {
            Err(StoreError::Rejected(errors))
        }
    }
}

pub(crate) fn latest_contact_method(
    conn: &Connection,
    person_id: PersonId,
    kind: &ContactMethodKind,
    excluding: ContactMethodId,
) -> Result<Option<ContactMethod>> {
    let method = conn
        .query_row(
            &format!(
                "SELECT {METHOD_COLUMNS}
                 FROM contact_methods
                 WHERE person_id = ?1 AND contact_method = ?2 AND id != ?3
                 ORDER BY id DESC
                 LIMIT 1;"
            ),
            params![person_id.get(), kind.as_str(), excluding.get()],
            |row| Ok(contact_method_from_row(row)),
        )
        .optional()?;
    method.transpose()
}

fn contact_method_from_row(row: &Row<'_>) -> Result<ContactMethod> {
    let person_id: Option<i64> = row.get(1)?;
    let kind: String = row.get(2)?;
    Ok(ContactMethod {
        id: ContactMethodId::new(row.get(0)?),
        person_id: person_id.map(PersonId::new),
        kind: kind.parse()?,
        detail: row.get(3)?,
        created_at: row.get(4)?,
    })
}
