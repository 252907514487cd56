pub mod repository;
mod service;

pub use self::service::{CartServiceTrait, DynCartService, MockCartServiceTrait};
