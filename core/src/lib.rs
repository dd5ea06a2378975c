pub mod annotate;
pub mod api;
pub mod command;
pub mod config;
pub mod error;
pub mod runner;
pub mod session;
