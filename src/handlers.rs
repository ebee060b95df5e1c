pub mod accounts;
pub mod bills;
pub mod goals;
pub mod health;
pub mod schedule;
pub mod transactions;
pub mod users;
