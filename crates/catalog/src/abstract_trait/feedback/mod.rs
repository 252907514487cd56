mod repository;
mod service;

pub use self::repository::{
    DynFeedbackRepository, FeedbackRepositoryTrait, MockFeedbackRepositoryTrait,
};
pub use self::service::{DynFeedbackService, FeedbackServiceTrait, MockFeedbackServiceTrait};
