mod command;
mod query;

pub use self::command::{
    DynOrderCommandRepository, MockOrderCommandRepositoryTrait, OrderCommandRepositoryTrait,
};
pub use self::query::{
    DynOrderQueryRepository, MockOrderQueryRepositoryTrait, OrderQueryRepositoryTrait,
};
