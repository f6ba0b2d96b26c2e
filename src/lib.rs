pub mod client;
pub mod config;
pub mod countdown;
pub mod domain;
pub mod errors;
pub mod logging;
pub mod monitor;
pub mod render;
pub mod schedule;
pub mod tasks;
