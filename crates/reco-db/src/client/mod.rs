//! MongoDB client construction

mod mongo;

pub use mongo::{connect, effective_uri, ping, ConnectError};
