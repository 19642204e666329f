//! Domain value objects for the sign-in flow.

pub mod phone;
pub mod verification;

pub use phone::PhoneNumber;
pub use verification::{Session, VerificationHandle};
