//! Entities read from the expense store.

pub mod category;
pub mod common;
pub mod payment;
pub mod user;

pub use category::Category;
pub use common::{Displayable, Identifiable, NamedEntity};
pub use payment::Payment;
pub use user::{User, UserRole};
