//! This file serves as the root for all SeaORM entity modules.
//! We define the data models for the finance tracking application here.
//! The structure mirrors the document schemas of the original application
//! but is adapted for Rust's type system and the SeaORM framework.

pub mod account;
pub mod bill;
pub mod goal;
pub mod transaction;
pub mod user;

pub mod prelude {
    //! A prelude module for easy importing of all entities.
    pub use super::account::Entity as Account;
    pub use super::bill::Entity as Bill;
    pub use super::goal::Entity as Goal;
    pub use super::transaction::Entity as Transaction;
    pub use super::user::Entity as User;
}
