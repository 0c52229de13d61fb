use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::*;

/// A person whose payments are tracked.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: Uuid,
    pub login: String,
    pub full_name: String,
    #[serde(default)]
    pub role: UserRole,
}

impl User {
    pub fn new(login: impl Into<String>, full_name: impl Into<String>, role: UserRole) -> Self {
        Self {
            id: Uuid::new_v4(),
            login: login.into(),
            full_name: full_name.into(),
            role,
        }
    }

    /// Case-insensitive match against the login or the full name.
    pub fn matches(&self, needle: &str) -> bool {
        let needle = needle.trim();
        self.login.eq_ignore_ascii_case(needle)
            || self.full_name.to_lowercase() == needle.to_lowercase()
    }
}

impl Identifiable for User {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl NamedEntity for User {
    fn name(&self) -> &str {
        &self.full_name
    }
}

impl Displayable for User {
    fn display_label(&self) -> String {
        format!("{} ({})", self.full_name, self.role)
    }
}

/// Access level of a user account.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum UserRole {
    Admin,
    #[default]
    User,
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            UserRole::Admin => "Admin",
            UserRole::User => "User",
        };
        f.write_str(label)
    }
}
