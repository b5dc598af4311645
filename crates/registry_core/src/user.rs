use desktop_integration::{BrowserOpener, FormRenderer, Prompt};
use shared::{domain::Role, error::RegistryError};
use storage::{RecordStore, Snapshot};
use tracing::{debug, info};

use crate::{open_record, session::{Session, SessionState}};

pub const KEYWORD_PROMPT: &str = "Enter search keyword:";

/// Read-only access to the store for a user session.
pub struct UserController<'a> {
    store: &'a RecordStore,
}

impl<'a> UserController<'a> {
    pub fn new(session: &Session, store: &'a RecordStore) -> Result<Self, RegistryError> {
        if session.state() != &SessionState::User {
            return Err(RegistryError::AccessDenied {
                required: Role::User,
            });
        }
        Ok(Self { store })
    }

    pub fn browse(&self) -> Result<Snapshot, RegistryError> {
        let snapshot = self.store.list();
        if snapshot.is_empty() {
            return Err(RegistryError::NoData);
        }
        Ok(snapshot)
    }

    pub fn search(&self, keyword: &str) -> Result<Snapshot, RegistryError> {
        let hits = self.store.search(keyword);
        if hits.is_empty() {
            return Err(RegistryError::NoMatches {
                keyword: keyword.to_string(),
            });
        }
        Ok(hits)
    }

    /// `Ok(None)` when the keyword prompt is cancelled. An empty store reports
    /// `NoData` without prompting.
    pub fn browse_by_keyword(
        &self,
        prompt: &mut dyn Prompt,
    ) -> Result<Option<Snapshot>, RegistryError> {
        if self.store.is_empty() {
            return Err(RegistryError::NoData);
        }
        let Some(keyword) = prompt.ask_text(KEYWORD_PROMPT, None) else {
            debug!("keyword search cancelled");
            return Ok(None);
        };
        self.search(&keyword).map(Some)
    }

    pub fn open_selected(
        &self,
        position: usize,
        snapshot: &Snapshot,
        opener: &dyn BrowserOpener,
    ) -> Result<(), RegistryError> {
        open_record(snapshot, position, opener)
    }

    /// Leaves the user screen for the footprint form.
    pub fn open_footprint_form(self, renderer: &mut dyn FormRenderer) {
        info!("opening carbon footprint form");
        renderer.render();
    }
}

#[cfg(test)]
#[path = "tests/user_tests.rs"]
mod tests;
