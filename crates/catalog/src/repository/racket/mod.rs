mod command;
mod query;

pub use self::command::RacketCommandRepository;
pub use self::query::RacketQueryRepository;
