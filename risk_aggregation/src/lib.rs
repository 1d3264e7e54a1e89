pub mod aggregate;
pub mod contracts;
pub mod snapshot;
