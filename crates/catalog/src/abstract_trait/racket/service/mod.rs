mod command;
mod query;

pub use self::command::{
    DynRacketCommandService, MockRacketCommandServiceTrait, RacketCommandServiceTrait,
};
pub use self::query::{DynRacketQueryService, MockRacketQueryServiceTrait, RacketQueryServiceTrait};
