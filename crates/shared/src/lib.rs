pub mod config;
pub mod errors;
pub mod pagination;
pub mod utils;
