pub mod client;
pub mod generator;
