pub mod account;
pub mod car;
pub mod owner;
pub mod stats;
