use desktop_integration::{BrowserOpener, Confirm, Prompt};
use shared::{
    domain::{RecordId, Role, UrlRecord},
    error::RegistryError,
};
use storage::{RecordStore, Snapshot};
use tracing::{debug, warn};

use crate::{
    open_record,
    session::{AdminGrant, Session},
};

pub const URL_PROMPT: &str = "Please enter the URL:";
pub const NAME_PROMPT: &str = "Please enter a name for this URL:";
pub const DELETE_PROMPT: &str = "Are you sure you want to delete?";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted(UrlRecord),
    Declined,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    Edited,
    Cancelled,
}

/// Create/update/delete access to the store. Only constructible from an admin session.
pub struct AdminController<'a> {
    store: &'a mut RecordStore,
    _grant: AdminGrant,
}

impl<'a> AdminController<'a> {
    pub fn new(session: &Session, store: &'a mut RecordStore) -> Result<Self, RegistryError> {
        let grant = session.admin_grant().cloned().ok_or(RegistryError::AccessDenied {
            required: Role::Admin,
        })?;
        Ok(Self {
            store,
            _grant: grant,
        })
    }

    pub fn records(&self) -> Snapshot {
        self.store.list()
    }

    /// Stores the pair exactly as given, empty or malformed included.
    pub fn add_record(&mut self, url: impl Into<String>, name: impl Into<String>) -> RecordId {
        self.store.add(url, name)
    }

    pub fn edit_record(
        &mut self,
        selected: Option<RecordId>,
        url: impl Into<String>,
        name: impl Into<String>,
    ) -> Result<(), RegistryError> {
        let id = selected.ok_or(RegistryError::SelectionRequired)?;
        self.store.update(id, url, name).inspect_err(|_| {
            warn!(record_id = id.0, "edit targeted a stale selection");
        })
    }

    /// Removes the selected record once `confirm` says yes. Declining changes nothing.
    pub fn delete_record(
        &mut self,
        selected: Option<RecordId>,
        confirm: &mut dyn Confirm,
    ) -> Result<DeleteOutcome, RegistryError> {
        let id = selected.ok_or(RegistryError::SelectionRequired)?;
        if self.store.get(id).is_none() {
            warn!(record_id = id.0, "delete targeted a stale selection");
            return Err(RegistryError::NotFound { id });
        }
        if !confirm.ask_yes_no(DELETE_PROMPT) {
            debug!(record_id = id.0, "delete declined");
            return Ok(DeleteOutcome::Declined);
        }
        self.store.remove(id).map(DeleteOutcome::Deleted)
    }

    /// Asks for a URL and then a name. Cancelling either prompt adds nothing.
    pub fn upload(&mut self, prompt: &mut dyn Prompt) -> Option<RecordId> {
        let url = prompt.ask_text(URL_PROMPT, None)?;
        let name = prompt.ask_text(NAME_PROMPT, None)?;
        Some(self.add_record(url, name))
    }

    /// Edit flow with both prompts pre-filled from the record's current values.
    pub fn edit_with_prompt(
        &mut self,
        selected: Option<RecordId>,
        prompt: &mut dyn Prompt,
    ) -> Result<EditOutcome, RegistryError> {
        let id = selected.ok_or(RegistryError::SelectionRequired)?;
        let current = self
            .store
            .get(id)
            .cloned()
            .ok_or(RegistryError::NotFound { id })?;

        let Some(url) = prompt.ask_text(URL_PROMPT, Some(&current.url)) else {
            return Ok(EditOutcome::Cancelled);
        };
        let Some(name) = prompt.ask_text(NAME_PROMPT, Some(&current.name)) else {
            return Ok(EditOutcome::Cancelled);
        };
        self.edit_record(Some(id), url, name)?;
        Ok(EditOutcome::Edited)
    }

    /// The admin screen's "Check" view opens records the same way users do.
    pub fn open_selected(
        &self,
        position: usize,
        snapshot: &Snapshot,
        opener: &dyn BrowserOpener,
    ) -> Result<(), RegistryError> {
        open_record(snapshot, position, opener)
    }
}

#[cfg(test)]
#[path = "tests/admin_tests.rs"]
mod tests;
