pub mod engine;
pub mod limits;
pub mod loans;
pub mod model;
pub mod notify;
pub mod observability;
pub mod store;
