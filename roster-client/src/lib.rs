mod error;
mod http_client;

pub use error::RosterClientError;
pub use http_client::RosterClient;
pub use roster_core::{NewUser, User};
