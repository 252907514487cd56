mod command;
mod query;

pub use self::command::RacketCommandService;
pub use self::query::RacketQueryService;
