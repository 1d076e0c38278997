use serde::Deserialize;

use crate::Role;

#[derive(Debug, Clone, Deserialize)]
pub struct Credential {
    pub username: String,
    pub password: String,
}

/// Fixed username/password pair per role.
///
/// This is a stand-in for a real identity provider: values come from
/// configuration and are compared as plain text.
#[derive(Debug, Clone, Deserialize)]
pub struct CredentialBook {
    pub factory: Credential,
    pub admin: Credential,
}

impl CredentialBook {
    pub fn get(&self, role: Role) -> Option<&Credential> {
        match role {
            Role::Farmer => None,
            Role::Factory => Some(&self.factory),
            Role::Admin => Some(&self.admin),
        }
    }

    pub fn verify(
        &self,
        role: Role,
        username: &str,
        password: &str,
    ) -> bambooflow_shared::Result<()> {
        let Some(credential) = self.get(role) else {
            bambooflow_shared::user!("Farmers sign in with LINE.");
        };

        if credential.username != username.trim() || credential.password != password {
            bambooflow_shared::user!("Invalid username or password. Please try again.");
        }

        Ok(())
    }
}
