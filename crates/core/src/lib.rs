//! Domain types and rules shared by the storage and HTTP layers.
//!
//! Nothing in this crate touches the database or the network: it holds the
//! error taxonomy, the role model, and the car field/patch rules so they can
//! be tested in isolation.

pub mod car;
pub mod error;
pub mod roles;
pub mod types;
