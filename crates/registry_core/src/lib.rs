//! Session gating and the admin/user controllers for the URL registry.

use desktop_integration::BrowserOpener;
use shared::error::RegistryError;
use storage::{RecordStore, Snapshot};
use tracing::warn;

pub mod admin;
pub mod session;
pub mod user;

pub use admin::{AdminController, DeleteOutcome, EditOutcome};
pub use session::{authenticate, AdminGrant, Session, SessionState};
pub use user::UserController;

/// Owns the session and the single record store, and hands out the controller the
/// current session is allowed to use.
#[derive(Debug, Default)]
pub struct Registry {
    session: Session,
    store: RecordStore,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn admin(&mut self) -> Result<AdminController<'_>, RegistryError> {
        AdminController::new(&self.session, &mut self.store)
    }

    pub fn user(&self) -> Result<UserController<'_>, RegistryError> {
        UserController::new(&self.session, &self.store)
    }
}

/// Opens the record displayed at `position` in `snapshot`.
pub fn open_record(
    snapshot: &Snapshot,
    position: usize,
    opener: &dyn BrowserOpener,
) -> Result<(), RegistryError> {
    let record = snapshot
        .get(position)
        .ok_or(RegistryError::SelectionRequired)?;
    opener.open(&record.url).map_err(|err| {
        warn!(record_id = record.id.0, url = %record.url, error = %err, "failed to open record");
        RegistryError::OpenFailed {
            url: record.url.clone(),
            reason: err.to_string(),
        }
    })
}

#[cfg(test)]
#[path = "tests/support.rs"]
pub(crate) mod test_support;
