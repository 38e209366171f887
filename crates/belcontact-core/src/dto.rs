use crate::domain::{
    BelgianPhoneNumber, ContactMethod, ContactMethodId, Person, PersonId, PhoneClass,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhoneReportDto {
    pub input: String,
    pub digits: String,
    pub local_digits: String,
    pub class: PhoneClass,
    pub has_valid_country_prefix: bool,
    pub is_valid_land_line_number: bool,
    pub is_valid_mobile_number: bool,
    pub contains_only_allowed_characters: bool,
    pub valid: bool,
}

impl PhoneReportDto {
    pub fn from_number(number: &BelgianPhoneNumber, strict: bool) -> Self {
        Self {
            input: number.original().to_string(),
            digits: number.digits().to_string(),
            local_digits: number.local_digits().to_string(),
            class: number.classification(),
            has_valid_country_prefix: number.has_valid_country_prefix(),
            is_valid_land_line_number: number.is_valid_land_line_number(),
            is_valid_mobile_number: number.is_valid_mobile_number(),
            contains_only_allowed_characters: number.contains_only_allowed_characters(),
            valid: number.is_valid_number(strict),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactMethodDto {
    pub id: ContactMethodId,
    pub person_id: Option<PersonId>,
    pub kind: String,
    pub detail: String,
    pub created_at: i64,
}

impl From<&ContactMethod> for ContactMethodDto {
    fn from(method: &ContactMethod) -> Self {
        Self {
            id: method.id,
            person_id: method.person_id,
            kind: method.kind.to_string(),
            detail: method.detail.clone(),
            created_at: method.created_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonDetailDto {
    pub id: PersonId,
    pub name: String,
    pub phone: String,
    pub mobile_phone: String,
    pub email: String,
    pub created_at: i64,
    pub updated_at: i64,
    pub contact_methods: Vec<ContactMethodDto>,
}

impl PersonDetailDto {
    pub fn new(person: &Person, methods: &[ContactMethod]) -> Self {
        Self {
            id: person.id,
            name: person.name.clone(),
            phone: person.phone.clone(),
            mobile_phone: person.mobile_phone.clone(),
            email: person.email.clone(),
            created_at: person.created_at,
            updated_at: person.updated_at,
            contact_methods: methods.iter().map(ContactMethodDto::from).collect(),
        }
    }
}
