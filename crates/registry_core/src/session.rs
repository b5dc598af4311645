use shared::{domain::Role, error::RegistryError};
use tracing::{info, warn};

const CREDENTIALS: [(&str, &str, Role); 2] = [
    ("admin", "password", Role::Admin),
    ("user", "password", Role::User),
];

/// Proof that the holder logged in as admin. Only [`Session::login`] can mint one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminGrant {
    _private: (),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SessionState {
    #[default]
    LoggedOut,
    Admin(AdminGrant),
    User,
}

impl SessionState {
    pub fn role(&self) -> Option<Role> {
        match self {
            SessionState::LoggedOut => None,
            SessionState::Admin(_) => Some(Role::Admin),
            SessionState::User => Some(Role::User),
        }
    }
}

/// Checks a credential pair against the two fixed accounts. Exact, case-sensitive match.
pub fn authenticate(username: &str, password: &str) -> Result<Role, RegistryError> {
    CREDENTIALS
        .iter()
        .find(|(u, p, _)| *u == username && *p == password)
        .map(|(_, _, role)| *role)
        .ok_or(RegistryError::InvalidCredentials)
}

/// The one process-wide session. Starts logged out.
#[derive(Debug, Default)]
pub struct Session {
    state: SessionState,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn role(&self) -> Option<Role> {
        self.state.role()
    }

    /// Single credential check. Any session already active is discarded first, so a
    /// failed attempt always leaves the machine logged out; retrying is up to the caller.
    pub fn login(&mut self, username: &str, password: &str) -> Result<Role, RegistryError> {
        if let Some(previous) = self.state.role() {
            info!(%previous, "discarding active session before login");
            self.state = SessionState::LoggedOut;
        }

        let role = authenticate(username, password).inspect_err(|_| {
            warn!(username, "login rejected");
        })?;

        self.state = match role {
            Role::Admin => SessionState::Admin(AdminGrant { _private: () }),
            Role::User => SessionState::User,
        };
        info!(username, %role, "logged in");
        Ok(role)
    }

    pub fn logout(&mut self) {
        if let Some(role) = self.state.role() {
            info!(%role, "logged out");
        }
        self.state = SessionState::LoggedOut;
    }

    pub(crate) fn admin_grant(&self) -> Option<&AdminGrant> {
        match &self.state {
            SessionState::Admin(grant) => Some(grant),
            _ => None,
        }
    }
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;
