use crate::{
    domain::requests::feedback::{CreateFeedbackRequest, DeleteFeedbackRequest},
    model::feedback::Feedback as FeedbackModel,
};
use async_trait::async_trait;
use mockall::automock;
use shared::errors::ServiceError;
use std::sync::Arc;

pub type DynFeedbackService = Arc<dyn FeedbackServiceTrait + Send + Sync>;

#[automock]
#[async_trait]
pub trait FeedbackServiceTrait {
    async fn create_feedback(
        &self,
        req: &CreateFeedbackRequest,
    ) -> Result<FeedbackModel, ServiceError>;
    async fn delete_feedback(&self, req: &DeleteFeedbackRequest) -> Result<(), ServiceError>;
    async fn find_by_racket_id(
        &self,
        racket_id: i32,
    ) -> Result<Vec<FeedbackModel>, ServiceError>;
    async fn find_by_user_id(&self, user_id: i32) -> Result<Vec<FeedbackModel>, ServiceError>;
}
