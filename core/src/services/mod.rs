//! Business services for the sign-in flow.

pub mod flow;

pub use flow::*;
