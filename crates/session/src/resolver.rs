use serde::Deserialize;
use strum::EnumString;

use crate::{Event, FarmerStanding, LineSettings, Role, Session, exchange_code};

/// Raw query string of an entry url, e.g. `/?role=factory&action=direct`
/// or the LINE redirect `/?code=...&state=farmer`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EntryQuery {
    pub role: Option<String>,
    pub action: Option<String>,
    pub code: Option<String>,
    pub state: Option<String>,
}

impl EntryQuery {
    pub fn is_empty(&self) -> bool {
        self.role.is_none() && self.action.is_none() && self.code.is_none() && self.state.is_none()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum Action {
    Login,
    Register,
    Direct,
}

/// Entry path chosen from the query, in priority order: LINE callback,
/// then `action`, then the role selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    Callback { code: String, role: Role },
    Register,
    Login(Role),
    Direct(Role),
    RoleSelector,
}

impl Entry {
    pub fn parse(query: &EntryQuery) -> Self {
        if let Some(code) = non_empty(&query.code) {
            return match non_empty(&query.state).and_then(Role::from_token) {
                Some(role) => Entry::Callback {
                    code: code.to_owned(),
                    role,
                },
                None => Entry::RoleSelector,
            };
        }

        let action = non_empty(&query.action).and_then(|v| v.parse::<Action>().ok());
        let role = non_empty(&query.role).and_then(Role::from_token);

        match (action, role) {
            (Some(Action::Register), _) => Entry::Register,
            (Some(Action::Login), Some(role)) => Entry::Login(role),
            (Some(Action::Direct), Some(role)) => Entry::Direct(role),
            _ => Entry::RoleSelector,
        }
    }

    /// Registration state is only consulted when a farmer comes back from LINE.
    pub fn needs_farmer_lookup(&self) -> bool {
        matches!(
            self,
            Entry::Callback {
                role: Role::Farmer,
                ..
            }
        )
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// Decides the starting session for an entry.
///
/// `standing` is ignored unless [`Entry::needs_farmer_lookup`] holds; callers
/// should not bother fetching it otherwise.
pub fn resolve(entry: &Entry, line: &LineSettings, standing: Option<FarmerStanding>) -> Session {
    let event = match entry {
        Entry::Callback {
            code,
            role: Role::Farmer,
        } => Event::LineSignedIn {
            profile: exchange_code(code, line),
            standing,
        },
        Entry::Callback { role, .. } => Event::SelectRole(*role),
        Entry::Register => Event::StartRegistration,
        Entry::Login(role) => Event::SelectRole(*role),
        Entry::Direct(role) => Event::DirectLogin(*role),
        Entry::RoleSelector => Event::ShowRoleSelector,
    };

    Session::loading().apply(event)
}
