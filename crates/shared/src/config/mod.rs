mod database;
mod myconfig;

pub use self::database::{ConnectionManager, ConnectionPool, run_migrations};
pub use self::myconfig::Config;
