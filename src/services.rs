pub mod account_service;
pub mod auth;
pub mod complaint_service;
pub mod routing;
pub mod stats_service;
