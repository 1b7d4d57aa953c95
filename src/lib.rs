// Library surface shared by the server binary and the integration tests.
pub mod api;
pub mod calculator;
pub mod chart;
pub mod config;
pub mod error;
pub mod homepage;
pub mod model;
