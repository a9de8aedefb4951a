pub mod domain;
pub mod email_client;
pub mod error;
pub mod routes;
pub mod settings;
pub mod startup;
pub mod telemetry;
pub mod utils;
