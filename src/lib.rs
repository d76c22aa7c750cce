pub mod cli;
pub mod clock;
pub mod config;
pub mod db;
pub mod elapsed;
pub mod error;
pub mod models;
pub mod output;
pub mod persist;
pub mod stats;
pub mod store;
