pub mod envelope;
pub mod user;
pub mod validation;

pub use envelope::Envelope;
pub use user::{NewUser, User};
pub use validation::{ValidationError, validate_candidate};
