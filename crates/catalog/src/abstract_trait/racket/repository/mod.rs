mod command;
mod query;

pub use self::command::{
    DynRacketCommandRepository, MockRacketCommandRepositoryTrait, RacketCommandRepositoryTrait,
};
pub use self::query::{
    DynRacketQueryRepository, MockRacketQueryRepositoryTrait, RacketQueryRepositoryTrait,
};
