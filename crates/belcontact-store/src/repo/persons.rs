use crate::error::{Result, StoreError};
use belcontact_core::domain::{Person, PersonId};
use belcontact_core::rules::{ContactValidationPolicy, Record};
use rusqlite::{params, Connection, OptionalExtension, Row};

const PERSON_COLUMNS: &str = "id, name, phone, mobile_phone, email, created_at, updated_at";

#[derive(Debug, Clone, Default)]
pub struct PersonNew {
    pub name: String,
    pub phone: String,
    pub mobile_phone: String,
    pub email: String,
}

/// `None` leaves a field as stored; `Some("")` blanks it.
#[derive(Debug, Clone, Default)]
pub struct PersonUpdate {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub mobile_phone: Option<String>,
    pub email: Option<String>,
}

pub struct PersonsRepo<'a> {
    conn: &'a Connection,
    policy: &'a ContactValidationPolicy,
}

impl<'a> PersonsRepo<'a> {
    pub fn new(conn: &'a Connection, policy: &'a ContactValidationPolicy) -> Self {
        Self { conn, policy }
    }

    pub fn create(&self, now_utc: i64, input: PersonNew) -> Result<Person> {
        let mut person = Person {
            id: PersonId::UNSAVED,
            name: input.name.trim().to_string(),
            phone: input.phone,
            mobile_phone: input.mobile_phone,
            email: input.email,
            created_at: now_utc,
            updated_at: now_utc,
        };
        person.validate()?;
        self.prepare_write(&mut person)?;

        self.conn.execute(
            "INSERT INTO persons (name, phone, mobile_phone, email, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
            params![
                person.name,
                person.phone,
                person.mobile_phone,
                person.email,
                person.created_at,
                person.updated_at
            ],
        )?;
        person.id = PersonId::new(self.conn.last_insert_rowid());
        self.policy.on_after_insert(Record::Person(&mut person));
        Ok(person)
    }

    pub fn get(&self, id: PersonId) -> Result<Option<Person>> {
        find_person(self.conn, id)
    }

    pub fn list(&self) -> Result<Vec<Person>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {PERSON_COLUMNS} FROM persons ORDER BY name COLLATE NOCASE ASC, id ASC;"
        ))?;
        let mut rows = stmt.query([])?;
        let mut persons = Vec::new();
        while let Some(row) = rows.next()? {
            persons.push(person_from_row(row)?);
        }
        Ok(persons)
    }

    pub fn update(&self, now_utc: i64, id: PersonId, update: PersonUpdate) -> Result<Person> {
        let mut person = self
            .get(id)?
            .ok_or_else(|| StoreError::NotFound(format!("person {}", id)))?;

        if let Some(name) = update.name {
            person.name = name.trim().to_string();
        }
        if let Some(phone) = update.phone {
            person.phone = phone;
        }
        if let Some(mobile_phone) = update.mobile_phone {
            person.mobile_phone = mobile_phone;
        }
        if let Some(email) = update.email {
            person.email = email;
        }
        person.updated_at = now_utc;
        person.validate()?;
        self.prepare_write(&mut person)?;

        self.conn.execute(
            "UPDATE persons
             SET name = ?2, phone = ?3, mobile_phone = ?4, email = ?5, updated_at = ?6
             WHERE id = ?1;",
            params![
                person.id.get(),
                person.name,
                person.phone,
                person.mobile_phone,
                person.email,
                person.updated_at
            ],
        )?;
        self.policy.on_after_update(Record::Person(&mut person));
        Ok(person)
    }

    /// Contact methods of the person are removed with it.
    pub fn delete(&self, id: PersonId) -> Result<bool> {
        let mut person = self
            .get(id)?
            .ok_or_else(|| StoreError::NotFound(format!("person {}", id)))?;
        let errors = self.policy.on_check_to_delete(Record::Person(&mut person));
        if !errors.is_empty() {
            return Err(StoreError::Rejected(errors));
        }
        self.policy.on_before_delete(Record::Person(&mut person));
        let removed = self
            .conn
            .execute("DELETE FROM persons WHERE id = ?1;", [id.get()])?;
        Ok(removed > 0)
    }

    fn prepare_write(&self, person: &mut Person) -> Result<()> {
        self.policy.before_save(Record::Person(person));
        let errors = self.policy.on_check_to_write(Record::Person(person));
        if errors.is_empty() {
            Ok(())
        } else {
            Err(StoreError::Rejected(errors))
        }
    }
}

pub(crate) fn find_person(conn: &Connection, id: PersonId) -> Result<Option<Person>> {
    let person = conn
        .query_row(
            &format!("SELECT {PERSON_COLUMNS} FROM persons WHERE id = ?1;"),
            [id.get()],
            |row| Ok(person_from_row(row)),
        )
        .optional()?;
    person.transpose()
}

/// Writes only the mirrored contact fields; no hooks run.
pub(crate) fn write_mirrored_fields(
    conn: &Connection,
    now_utc: i64,
    person: &Person,
) -> Result<()> {
    let updated = conn.execute(
        "UPDATE persons
         SET phone = ?2, mobile_phone = ?3, email = ?4, updated_at = ?5
         WHERE id = ?1;",
        params![
            person.id.get(),
            person.phone,
            person.mobile_phone,
            person.email,
            now_utc
        ],
    )?;
    if updated == 0 {
        return Err(StoreError::NotFound(format!("person {}", person.id)));
    }
    Ok(())
}

fn person_from_row(row: &Row<'_>) -> Result<Person> {
    Ok(Person {
        id: PersonId::new(row.get(0)?),
        name: row.get(1)?,
        phone: row.get(2)?,
        mobile_phone: row.get(3)?,
        email: row.get(4)?,
        created_at: row.get(5)?,
        updated_at: row.get(6)?,
    })
}
