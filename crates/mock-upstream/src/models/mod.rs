pub mod status;
pub mod transaction;

pub use status::{CounterBody, StatusBody};
pub use transaction::TransactionBody;
