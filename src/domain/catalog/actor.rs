//! The user on whose behalf an output is produced.

use serde::{Deserialize, Serialize};

/// Role granting access to restricted attribute groups.
pub const ADMINISTRATOR_ROLE: &str = "ROLE_ADMINISTRATOR";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub username: String,
    #[serde(default)]
    pub roles: Vec<String>,
}

impl Actor {
    pub fn new(username: impl Into<String>, roles: Vec<String>) -> Self {
        Self {
            username: username.into(),
            roles,
        }
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }

    pub fn is_admin(&self) -> bool {
        self.has_role(ADMINISTRATOR_ROLE)
    }
}

/// Admin check for an optional actor; nobody logged in is not an admin.
pub fn actor_is_admin(actor: Option<&Actor>) -> bool {
    actor.is_some_and(Actor::is_admin)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn administrator_role_makes_actor_admin() {
        let actor = Actor::new("julia", vec!["ROLE_USER".into(), ADMINISTRATOR_ROLE.into()]);
        assert!(actor.is_admin());
    }

    #[test]
    fn other_roles_are_not_admin() {
        let actor = Actor::new("mary", vec!["ROLE_CATALOG_MANAGER".into()]);
        assert!(!actor.is_admin());
    }

    #[test]
    fn missing_actor_is_not_admin() {
        assert!(!actor_is_admin(None));
    }
}
