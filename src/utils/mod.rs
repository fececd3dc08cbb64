pub mod logging;
pub mod validation;

pub use logging::LoggingConfig;
pub use validation::validate_url;
