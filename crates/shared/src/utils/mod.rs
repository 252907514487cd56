mod logs;
mod metrics;
mod validation;

pub use self::logs::init_logger;
pub use self::metrics::{Labels, Method, Metrics, Status};
pub use self::validation::format_validation_errors;
