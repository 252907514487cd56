use crate::{
    domain::requests::feedback::{CreateFeedbackRequest, DeleteFeedbackRequest},
    model::feedback::Feedback as FeedbackModel,
};
use async_trait::async_trait;
use mockall::automock;
use shared::errors::RepositoryError;
use std::sync::Arc;

pub type DynFeedbackRepository = Arc<dyn FeedbackRepositoryTrait + Send + Sync>;

#[automock]
#[async_trait]
pub trait FeedbackRepositoryTrait {
    async fn create(&self, req: &CreateFeedbackRequest) -> Result<FeedbackModel, RepositoryError>;
    async fn delete(&self, req: &DeleteFeedbackRequest) -> Result<(), RepositoryError>;
    async fn find_feedback(
        &self,
        racket_id: i32,
        user_id: i32,
    ) -> Result<Option<FeedbackModel>, RepositoryError>;
    async fn find_by_racket_id(
        &self,
        racket_id: i32,
    ) -> Result<Vec<FeedbackModel>, RepositoryError>;
    async fn find_by_user_id(&self, user_id: i32) -> Result<Vec<FeedbackModel>, RepositoryError>;
}
