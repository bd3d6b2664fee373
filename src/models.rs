pub mod account;
pub mod complaint;
pub mod stats;
