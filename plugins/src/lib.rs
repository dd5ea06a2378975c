pub mod factory;
pub mod notifier;
pub mod presenter;
pub mod runner;
pub mod workspace;
