//! Transaction entities.

pub mod model;

pub use model::{CreateTransaction, Transaction, TransactionStatus};
