//! Read-only access to users, categories and payments.

pub mod json_backend;

use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

use crate::domain::{Category, Payment, User};
use crate::errors::Result;

/// Abstraction over the data-access layer feeding the reporting core.
///
/// Implementations hand out owned snapshots; the core never writes back.
pub trait ExpenseRepository {
    fn users(&self) -> Result<Vec<User>>;
    fn categories(&self) -> Result<Vec<Category>>;
    fn payments(&self) -> Result<Vec<Payment>>;

    /// Loads all three collections in one call.
    fn snapshot(&self) -> Result<Dataset> {
        Ok(Dataset {
            users: self.users()?,
            categories: self.categories()?,
            payments: self.payments()?,
        })
    }
}

/// In-memory collection of everything the reports read.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Dataset {
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub payments: Vec<Payment>,
}

impl Dataset {
    pub fn new(users: Vec<User>, categories: Vec<Category>, payments: Vec<Payment>) -> Self {
        Self {
            users,
            categories,
            payments,
        }
    }

    pub fn user(&self, id: Uuid) -> Option<&User> {
        self.users.iter().find(|user| user.id == id)
    }

    pub fn category(&self, id: Uuid) -> Option<&Category> {
        self.categories.iter().find(|category| category.id == id)
    }

    /// Finds a user by login or full name.
    pub fn find_user(&self, needle: &str) -> Option<&User> {
        self.users.iter().find(|user| user.matches(needle))
    }

    /// Payments whose user and category both exist; the rest are logged and skipped.
    pub fn linked_payments(&self) -> Vec<Payment> {
        for warning in self.warnings() {
            warn!("{warning}");
        }
        self.payments
            .iter()
            .filter(|payment| {
                self.user(payment.user_id).is_some() && self.category(payment.category_id).is_some()
            })
            .cloned()
            .collect()
    }

    /// Describes payments that reference a missing user or category.
    pub fn warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        for payment in &self.payments {
            if self.user(payment.user_id).is_none() {
                warnings.push(format!(
                    "payment {} references unknown user {}",
                    payment.id, payment.user_id
                ));
            }
            if self.category(payment.category_id).is_none() {
                warnings.push(format!(
                    "payment {} references missing category {}",
                    payment.id, payment.category_id
                ));
            }
        }
        warnings
    }
}

impl ExpenseRepository for Dataset {
    fn users(&self) -> Result<Vec<User>> {
        Ok(self.users.clone())
    }

    fn categories(&self) -> Result<Vec<Category>> {
        Ok(self.categories.clone())
    }

    fn payments(&self) -> Result<Vec<Payment>> {
        Ok(self.linked_payments())
    }

    fn snapshot(&self) -> Result<Dataset> {
        Ok(Dataset::new(
            self.users.clone(),
            self.categories.clone(),
            self.linked_payments(),
        ))
    }
}

pub use json_backend::{load_dataset_from_path, save_dataset_to_path, JsonRepository};
