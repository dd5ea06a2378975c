mod load;
mod store;
mod types;

pub use load::{load_default, load_from, CONFIG_FILE_NAME};
pub use store::ConfigStore;
pub use types::{AppConfig, LoggingConfig, OutputFormat};
