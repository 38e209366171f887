use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("contact method kind is required")]
    EmptyContactMethodKind,
    #[error("contact method kind {0:?} is built in")]
    ReservedContactMethodKind(String),
    #[error("{0} contact method needs a value")]
    EmptyContactDetail(String),
    #[error("person name is required")]
    EmptyPersonName,
    #[error("invalid record id: {0}")]
    InvalidId(i64),
}
