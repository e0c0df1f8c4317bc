// Application layer: the in-memory expense collection and its use cases.
// Clients (the CLI, tests) go through `ExpenseService`; persistence stays
// behind the storage `Repository`.

pub mod error;
pub mod service;

pub use error::*;
pub use service::*;
