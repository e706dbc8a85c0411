use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("unrecoverable phone number: {0:?}")]
    UnrecoverablePhone(String),
    #[error("status cannot be empty")]
    EmptyStatus,
}
