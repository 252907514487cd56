mod command;
mod query;

pub use self::command::{
    CartCommandRepositoryTrait, DynCartCommandRepository, MockCartCommandRepositoryTrait,
};
pub use self::query::{
    CartQueryRepositoryTrait, DynCartQueryRepository, MockCartQueryRepositoryTrait,
};
