// Reliability dashboard backend - condition monitoring and maintenance calculators
pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod presentation;
