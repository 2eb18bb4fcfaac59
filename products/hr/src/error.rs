use thiserror::Error;

use crate::model::EmployeeId;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HrError {
    #[error("employee {0} not found")]
    EmployeeNotFound(EmployeeId),
    #[error("employee id {0} appears more than once")]
    DuplicateEmployee(EmployeeId),
    #[error("unknown experience band `{0}` (expected 0-2, 3-5 or 6+)")]
    UnknownExperienceBand(String),
    #[error("unknown sort key `{0}` (expected name, experience or salary)")]
    UnknownSortKey(String),
    #[error("invalid seed data: {0}")]
    InvalidSeed(String),
}

pub type HrResult<T> = Result<T, HrError>;
