use belcontact_core::domain::{ContactMethodId, ContactMethodKind, Person, PersonField};
use belcontact_core::rules::Reconciliation;
use belcontact_store::error::{StoreError, StoreErrorKind};
use belcontact_store::repo::{ContactMethodNew, ContactMethodUpdate, PersonNew};
use belcontact_store::Store;

const LATER: i64 = 1_700_000_500;

fn store() -> Store {
    let store = Store::open_in_memory().expect("open in memory");
    store.migrate().expect("migrate");
    store
}

fn person(store: &Store) -> Person {
    store
        .persons()
        .create(
            1_700_000_000,
            PersonNew {
                name: "Ada".to_string(),
                ..PersonNew::default()
            },
        )
        .expect("create person")
}

fn add(store: &Store, person: &Person, kind: ContactMethodKind, detail: &str) -> i64 {
    store
        .contact_methods()
        .create(
            1_700_000_000,
            ContactMethodNew {
                person_id: person.id,
                kind,
                detail: detail.to_string(),
            },
        )
        .expect("create contact method")
        .method
        .id
        .get()
}

fn reload(store: &Store, person: &Person) -> Person {
    store
        .persons()
        .get(person.id)
        .expect("get person")
        .expect("person exists")
}

#[test]
fn phone_entered_as_mobile_is_stored_as_mobile() {
    let store = store();
    let ada = person(&store);

    let write = store
        .contact_methods()
        .create(
            1_700_000_000,
            ContactMethodNew {
                person_id: ada.id,
                kind: ContactMethodKind::Phone,
                detail: "0470 12 34 56".to_string(),
            },
        )
        .expect("create contact method");

    assert_eq!(write.method.kind, ContactMethodKind::MobilePhone);
    assert_eq!(write.method.detail, "0470123456");
    assert_eq!(
        write.mirror,
        vec![Reconciliation::Replaced {
            person_id: ada.id,
            field: PersonField::MobilePhone,
            value: "0470123456".to_string(),
        }]
    );

    let ada = reload(&store, &ada);
    assert_eq!(ada.mobile_phone, "0470123456");
    assert_eq!(ada.phone, "");
}

#[test]
fn invalid_contact_methods_are_rejected() {
    let store = store();
    let ada = person(&store);

    for (kind, detail) in [
        (ContactMethodKind::Phone, "02 345 67"),
        (ContactMethodKind::MobilePhone, "02 345 67 89"),
        (ContactMethodKind::Email, "ada.example.com"),
    ] {
        let err = store
            .contact_methods()
            .create(
                1,
                ContactMethodNew {
                    person_id: ada.id,
                    kind,
                    detail: detail.to_string(),
                },
            )
            .unwrap_err();
        assert_eq!(err.kind(), StoreErrorKind::Rejected, "{detail}");
    }

    assert!(store
        .contact_methods()
        .list_for_person(ada.id)
        .expect("list")
        .is_empty());
    assert_eq!(reload(&store, &ada), ada);
}

#[test]
fn foreign_numbers_are_accepted_as_digits() {
    let store = store();
    let ada = person(&store);
    add(&store, &ada, ContactMethodKind::Phone, "+31 20 123 4567");

    let methods = store
        .contact_methods()
        .list_for_person(ada.id)
        .expect("list");
    assert_eq!(methods.len(), 1);
    assert_eq!(methods[0].kind, ContactMethodKind::Phone);
    assert_eq!(methods[0].detail, "31201234567");
}

#[test]
fn contact_method_requires_existing_person() {
    let store = store();
    let ada = person(&store);
    store.persons().delete(ada.id).expect("delete person");

    let err = store
        .contact_methods()
        .create(
            1,
            ContactMethodNew {
                person_id: ada.id,
                kind: ContactMethodKind::Email,
                detail: "ada@example.com".to_string(),
            },
        )
        .unwrap_err();
    assert!(matches!(err, StoreError::NotFound(_)));
}

#[test]
fn newest_method_is_mirrored_and_delete_falls_back() {
    let store = store();
    let ada = person(&store);
    let first = add(&store, &ada, ContactMethodKind::Phone, "02 345 67 89");
    let second = add(&store, &ada, ContactMethodKind::Phone, "03 123 45 67");
    assert_eq!(reload(&store, &ada).phone, "031234567");

    let removal = store
        .contact_methods()
        .delete(LATER, second.into())
        .expect("delete")
        .expect("removed");
    assert_eq!(
        removal.reconciliation,
        Reconciliation::Replaced {
            person_id: ada.id,
            field: PersonField::Phone,
            value: "023456789".to_string(),
        }
    );
    assert_eq!(reload(&store, &ada).phone, "023456789");

    store
        .contact_methods()
        .delete(LATER, first.into())
        .expect("delete")
        .expect("removed");
    assert_eq!(reload(&store, &ada).phone, "");
}

#[test]
fn deleting_a_non_mirrored_method_leaves_person_untouched() {
    let store = store();
    let ada = person(&store);
    let older = add(&store, &ada, ContactMethodKind::Email, "old@example.com");
    add(&store, &ada, ContactMethodKind::Email, "ada@example.com");
    let before = reload(&store, &ada);
    assert_eq!(before.email, "ada@example.com");

    let removal = store
        .contact_methods()
        .delete(LATER, older.into())
        .expect("delete")
        .expect("removed");
    assert_eq!(removal.reconciliation, Reconciliation::Unchanged);
    assert_eq!(reload(&store, &ada), before);
}

#[test]
fn legacy_mirrored_phone_falls_back_to_newer_sibling() {
    let store = store();
    let ada = person(&store);
    let conn = store.connection();
    conn.execute(
        "UPDATE persons SET phone = '0470123456' WHERE id = ?1;",
        [ada.id.get()],
    )
    .expect("set phone");
    conn.execute(
        "INSERT INTO contact_methods (person_id, contact_method, contact_detail, created_at)
         VALUES (?1, 'phone', '0470123456', 1), (?1, 'phone', '023456789', 2);",
        [ada.id.get()],
    )
    .expect("insert legacy rows");
    let legacy = store
        .contact_methods()
        .list_for_person(ada.id)
        .expect("list")[0]
        .id;

    store
        .contact_methods()
        .delete(LATER, legacy)
        .expect("delete")
        .expect("removed");
    assert_eq!(reload(&store, &ada).phone, "023456789");
}

#[test]
fn update_switching_kind_moves_the_mirror() {
    let store = store();
    let ada = person(&store);
    let land_line = add(&store, &ada, ContactMethodKind::Phone, "02 345 67 89");
    let typo = add(&store, &ada, ContactMethodKind::Phone, "03 123 45 67");

    let write = store
        .contact_methods()
        .update(
            LATER,
            typo.into(),
            ContactMethodUpdate {
                detail: Some("+32 478 12 34 56".to_string()),
                ..ContactMethodUpdate::default()
            },
        )
        .expect("update");
    assert_eq!(write.method.kind, ContactMethodKind::MobilePhone);
    assert_eq!(write.method.detail, "32478123456");
    assert_eq!(write.mirror.len(), 2);

    let ada = reload(&store, &ada);
    assert_eq!(ada.phone, "023456789");
    assert_eq!(ada.mobile_phone, "32478123456");
    assert!(store
        .contact_methods()
        .get(land_line.into())
        .expect("get")
        .is_some());
}

#[test]
fn update_within_kind_follows_the_mirror() {
    let store = store();
    let ada = person(&store);
    let id = add(&store, &ada, ContactMethodKind::Email, "ada@example.com");

    store
        .contact_methods()
        .update(
            LATER,
            id.into(),
            ContactMethodUpdate {
                detail: Some("ada@example.be".to_string()),
                ..ContactMethodUpdate::default()
            },
        )
        .expect("update");
    assert_eq!(reload(&store, &ada).email, "ada@example.be");
}

#[test]
fn mirror_writes_stamp_the_person_with_the_caller_clock() {
    let store = store();
    let ada = person(&store);
    let id = add(&store, &ada, ContactMethodKind::Email, "ada@example.com");

    store
        .contact_methods()
        .update(
            LATER,
            id.into(),
            ContactMethodUpdate {
                detail: Some("ada@example.be".to_string()),
                ..ContactMethodUpdate::default()
            },
        )
        .expect("update");
    assert_eq!(reload(&store, &ada).updated_at, LATER);

    store
        .contact_methods()
        .delete(LATER + 60, id.into())
        .expect("delete");
    let ada = reload(&store, &ada);
    assert_eq!(ada.email, "");
    assert_eq!(ada.updated_at, LATER + 60);
}

#[test]
fn blank_phone_methods_are_refused_and_keep_the_mirror() {
    let store = store();
    let ada = person(&store);
    let id = add(&store, &ada, ContactMethodKind::Phone, "02 345 67 89");

    let err = store
        .contact_methods()
        .create(
            LATER,
            ContactMethodNew {
                person_id: ada.id,
                kind: ContactMethodKind::Phone,
                detail: "   ".to_string(),
            },
        )
        .unwrap_err();
    assert_eq!(err.kind(), StoreErrorKind::Core);

    let err = store
        .contact_methods()
        .update(
            LATER,
            id.into(),
            ContactMethodUpdate {
                detail: Some(String::new()),
                ..ContactMethodUpdate::default()
            },
        )
        .unwrap_err();
    assert_eq!(err.kind(), StoreErrorKind::Core);

    assert_eq!(reload(&store, &ada).phone, "023456789");
    assert_eq!(
        store
            .contact_methods()
            .list_for_person(ada.id)
            .expect("list")
            .len(),
        1
    );
}

#[test]
fn other_kinds_with_builtin_labels_are_refused() {
    let store = store();
    let ada = person(&store);

    assert!(ContactMethodKind::other("Phone").is_err());
    let err = store
        .contact_methods()
        .create(
            LATER,
            ContactMethodNew {
                person_id: ada.id,
                kind: ContactMethodKind::Other("phone".to_string()),
                detail: "02 345 67".to_string(),
            },
        )
        .unwrap_err();
    assert_eq!(err.kind(), StoreErrorKind::Core);
    assert!(store
        .contact_methods()
        .list_for_person(ada.id)
        .expect("list")
        .is_empty());
}

#[test]
fn other_kinds_are_stored_without_mirroring() {
    let store = store();
    let ada = person(&store);
    let fax = ContactMethodKind::other("Fax").expect("kind");
    let id = add(&store, &ada, fax.clone(), "02/345.67.89");

    let stored = store
        .contact_methods()
        .get(id.into())
        .expect("get")
        .expect("exists");
    assert_eq!(stored.kind, fax);
    assert_eq!(stored.detail, "02/345.67.89");

    let removal = store
        .contact_methods()
        .delete(LATER, id.into())
        .expect("delete")
        .expect("removed");
    assert_eq!(removal.reconciliation, Reconciliation::NotMirrored);
    assert_eq!(reload(&store, &ada), ada);
}

#[test]
fn deleting_a_missing_method_is_a_no_op() {
    let store = store();
    assert!(store
        .contact_methods()
        .delete(LATER, ContactMethodId::new(99))
        .expect("delete")
        .is_none());
}

#[test]
fn update_without_changes_skips_the_write() {
    let store = store();
    let ada = person(&store);
    let id = add(&store, &ada, ContactMethodKind::Phone, "02 345 67 89");
    let before = reload(&store, &ada);

    let written = store
        .contact_methods()
        .update(
            LATER,
            id.into(),
            ContactMethodUpdate {
                detail: Some("02.345.67.89".to_string()),
                ..ContactMethodUpdate::default()
            },
        )
        .expect("update");
    assert_eq!(written.method.detail, "023456789");
    assert_eq!(written.mirror, vec![Reconciliation::Unchanged]);
    assert_eq!(reload(&store, &ada), before);
}
