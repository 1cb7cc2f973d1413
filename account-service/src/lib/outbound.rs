pub mod credentials;
pub mod repositories;
