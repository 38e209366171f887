use belcontact_core::domain::PersonId;
use belcontact_core::rules::{ContactValidationPolicy, Messages, PolicyOptions};
use belcontact_store::error::{StoreError, StoreErrorKind};
use belcontact_store::repo::{PersonNew, PersonUpdate};
use belcontact_store::Store;

fn store() -> Store {
    let store = Store::open_in_memory().expect("open in memory");
    store.migrate().expect("migrate");
    store
}

#[test]
fn create_person_moves_mobile_out_of_phone_field() {
    let store = store();
    let now = 1_700_000_000;

    let person = store
        .persons()
        .create(
            now,
            PersonNew {
                name: " Ada ".to_string(),
                phone: "+32 470 12 34 56".to_string(),
                ..PersonNew::default()
            },
        )
        .expect("create person");

    assert!(person.id.is_persisted());
    assert_eq!(person.name, "Ada");
    assert_eq!(person.phone, "");
    assert_eq!(person.mobile_phone, "32470123456");

    let stored = store
        .persons()
        .get(person.id)
        .expect("get person")
        .expect("person exists");
    assert_eq!(stored, person);
}

#[test]
fn create_person_rejects_invalid_fields_with_messages() {
    let store = store();
    let err = store
        .persons()
        .create(
            1_700_000_000,
            PersonNew {
                name: "Ada".to_string(),
                phone: "02 345 67".to_string(),
                email: "ada-at-example.com".to_string(),
                ..PersonNew::default()
            },
        )
        .unwrap_err();

    assert_eq!(err.kind(), StoreErrorKind::Rejected);
    let StoreError::Rejected(messages) = err else {
        panic!("expected rejection");
    };
    let defaults = Messages::default();
    assert_eq!(
        messages,
        vec![
            defaults.invalid_phone_number.clone(),
            defaults.invalid_email.clone()
        ]
    );
    assert!(store.persons().list().expect("list").is_empty());
}

#[test]
fn bootstrap_sentinel_is_only_accepted_on_creation() {
    let store = store();
    let now = 1_700_000_000;
    let admin = store
        .persons()
        .create(
            now,
            PersonNew {
                name: "admin".to_string(),
                phone: "+00 000 000 000".to_string(),
                ..PersonNew::default()
            },
        )
        .expect("create admin");
    assert_eq!(admin.phone, "+00 000 000 000");

    let err = store
        .persons()
        .update(
            now + 10,
            admin.id,
            PersonUpdate {
                name: Some("Administrator".to_string()),
                ..PersonUpdate::default()
            },
        )
        .unwrap_err();
    assert!(matches!(err, StoreError::Rejected(_)));

    let updated = store
        .persons()
        .update(
            now + 20,
            admin.id,
            PersonUpdate {
                phone: Some(String::new()),
                ..PersonUpdate::default()
            },
        )
        .expect("clear phone");
    assert_eq!(updated.phone, "");
    assert_eq!(updated.updated_at, now + 20);
}

#[test]
fn update_missing_person_is_not_found() {
    let store = store();
    let err = store
        .persons()
        .update(1, PersonId::new(42), PersonUpdate::default())
        .unwrap_err();
    assert_eq!(err.kind(), StoreErrorKind::NotFound);
}

#[test]
fn create_person_requires_a_name() {
    let store = store();
    let err = store
        .persons()
        .create(1, PersonNew::default())
        .unwrap_err();
    assert_eq!(err.kind(), StoreErrorKind::Core);
}

#[test]
fn custom_policy_messages_reach_rejections() {
    let messages = Messages {
        invalid_email: "Ongeldig e-mailadres".to_string(),
        ..Messages::default()
    };
    let store = Store::open_in_memory()
        .expect("open in memory")
        .with_policy(ContactValidationPolicy::new(
            PolicyOptions::default(),
            messages,
        ));
    store.migrate().expect("migrate");

    let err = store
        .persons()
        .create(
            1,
            PersonNew {
                name: "Ada".to_string(),
                email: "nope".to_string(),
                ..PersonNew::default()
            },
        )
        .unwrap_err();
    assert_eq!(err.to_string(), "Ongeldig e-mailadres");
}

#[test]
fn list_orders_by_name_and_delete_cascades() {
    let store = store();
    for name in ["grace", "Ada", "linus"] {
        store
            .persons()
            .create(
                1,
                PersonNew {
                    name: name.to_string(),
                    ..PersonNew::default()
                },
            )
            .expect("create person");
    }
    let names: Vec<String> = store
        .persons()
        .list()
        .expect("list")
        .into_iter()
        .map(|person| person.name)
        .collect();
    assert_eq!(names, vec!["Ada", "grace", "linus"]);

    let first = store.persons().list().expect("list")[0].id;
    assert!(store.persons().delete(first).expect("delete"));
    assert!(store.persons().get(first).expect("get").is_none());
    assert_eq!(store.persons().list().expect("list").len(), 2);
}
