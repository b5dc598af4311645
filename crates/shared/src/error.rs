use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    domain::{RecordId, Role},
    notice::Notice,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    InvalidCredentials,
    SelectionRequired,
    NotFound,
    NoData,
    NoMatches,
    OpenFailed,
    AccessDenied,
}

/// Every failure the registry reports. All of them are recoverable and meant to be
/// shown to the person at the keyboard; none should end the process.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("incorrect username or password")]
    InvalidCredentials,
    #[error("no record selected")]
    SelectionRequired,
    #[error("record {id} no longer exists")]
    NotFound { id: RecordId },
    #[error("no records stored")]
    NoData,
    #[error("no record name matches {keyword:?}")]
    NoMatches { keyword: String },
    #[error("cannot open {url}: {reason}")]
    OpenFailed { url: String, reason: String },
    #[error("{required} session required")]
    AccessDenied { required: Role },
}

impl RegistryError {
    pub fn code(&self) -> ErrorCode {
        match self {
            RegistryError::InvalidCredentials => ErrorCode::InvalidCredentials,
            RegistryError::SelectionRequired => ErrorCode::SelectionRequired,
            RegistryError::NotFound { .. } => ErrorCode::NotFound,
            RegistryError::NoData => ErrorCode::NoData,
            RegistryError::NoMatches { .. } => ErrorCode::NoMatches,
            RegistryError::OpenFailed { .. } => ErrorCode::OpenFailed,
            RegistryError::AccessDenied { .. } => ErrorCode::AccessDenied,
        }
    }

    /// Text for the notify surface.
    pub fn notice(&self) -> Notice {
        let message = match self {
            RegistryError::InvalidCredentials => "Incorrect username or password.".to_string(),
            RegistryError::SelectionRequired => "Please select a record first.".to_string(),
            RegistryError::NotFound { .. } => {
                "The selected record no longer exists; reopen the list and try again.".to_string()
            }
            RegistryError::NoData => "No data available.".to_string(),
            RegistryError::NoMatches { .. } => "No matching data found.".to_string(),
            RegistryError::OpenFailed { url, .. } => format!("Cannot open the webpage: {url}"),
            RegistryError::AccessDenied { required } => {
                format!("This screen requires the {required} role.")
            }
        };
        Notice::new(self.code(), message)
    }
}

impl From<RegistryError> for Notice {
    fn from(value: RegistryError) -> Self {
        value.notice()
    }
}
