use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

macro_rules! id_type {
    ($name:ident) => {
        #[derive(
            Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl $name {
            /// Identifier carried by a record that has not been written yet.
            pub const UNSAVED: Self = Self(0);

            pub fn new(value: i64) -> Self {
                Self(value)
            }

            pub fn get(self) -> i64 {
                self.0
            }

            pub fn is_persisted(self) -> bool {
                self.0 >= 1
            }
        }

        impl From<i64> for $name {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(s.trim().parse()?))
            }
        }
    };
}

id_type!(PersonId);
id_type!(ContactMethodId);

#[cfg(test)]
mod tests {
    use super::{ContactMethodId, PersonId};

    #[test]
    fn unsaved_ids_are_not_persisted() {
        assert!(!PersonId::UNSAVED.is_persisted());
        assert!(!PersonId::new(-3).is_persisted());
        assert!(PersonId::new(1).is_persisted());
    }

    #[test]
    fn ids_parse_and_display() {
        let id: ContactMethodId = " 42 ".parse().expect("parse id");
        assert_eq!(id.get(), 42);
        assert_eq!(id.to_string(), "42");
        assert!("abc".parse::<ContactMethodId>().is_err());
    }

    #[test]
    fn ids_order_by_value() {
        assert!(ContactMethodId::new(7) > ContactMethodId::new(3));
    }
}
