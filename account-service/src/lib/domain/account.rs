pub mod errors;
pub mod models;
pub mod outcome;
pub mod ports;
pub mod service;
