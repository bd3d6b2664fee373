pub mod accounts;
pub mod auth;
pub mod catalog;
pub mod complaints;
pub mod dashboard;
