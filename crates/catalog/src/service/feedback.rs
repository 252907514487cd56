use crate::{
    abstract_trait::feedback::{DynFeedbackRepository, FeedbackServiceTrait},
    domain::requests::feedback::{CreateFeedbackRequest, DeleteFeedbackRequest},
    model::feedback::Feedback as FeedbackModel,
};
use anyhow::Result;
use async_trait::async_trait;
use prometheus_client::registry::Registry;
use shared::{
    errors::ServiceError,
    utils::{Method, Metrics, Status, format_validation_errors},
};
use tokio::time::Instant;
use tracing::{error, info};
use validator::Validate;

#[derive(Clone)]
pub struct FeedbackService {
    repository: DynFeedbackRepository,
    metrics: Metrics,
}

impl FeedbackService {
    pub fn new(repository: DynFeedbackRepository, registry: &mut Registry) -> Result<Self> {
        let metrics = Metrics::new();

        registry.register(
            "feedback_service_request_counter",
            "Total number of requests to the FeedbackService",
            metrics.request_counter.clone(),
        );
        registry.register(
            "feedback_service_request_duration",
            "Histogram of request durations for the FeedbackService",
            metrics.request_duration.clone(),
        );

        Ok(Self {
            repository,
            metrics,
        })
    }
}

#[async_trait]
impl FeedbackServiceTrait for FeedbackService {
    async fn create_feedback(
        &self,
        req: &CreateFeedbackRequest,
    ) -> Result<FeedbackModel, ServiceError> {
        info!(
            "🏗️ Creating feedback for racket {} by user {}",
            req.racket_id, req.user_id
        );

        let started = Instant::now();
        let method = Method::Post;

        if let Err(errors) = req.validate() {
            let messages = format_validation_errors(&errors);
            error!("❌ Feedback validation failed: {:?}", messages);
            self.metrics
                .record(method, Status::Error, started.elapsed().as_secs_f64());
            return Err(ServiceError::Validation(messages));
        }

        match self.repository.create(req).await {
            Ok(feedback) => {
                info!(
                    "✅ Feedback created for racket {} by user {}",
                    feedback.racket_id, feedback.user_id
                );
                self.metrics
                    .record(method, Status::Success, started.elapsed().as_secs_f64());
                Ok(feedback)
            }
            Err(e) => {
                error!("❌ Failed to create feedback: {e:?}");
                self.metrics
                    .record(method, Status::Error, started.elapsed().as_secs_f64());
                Err(ServiceError::Repo(e))
            }
        }
    }

    async fn delete_feedback(&self, req: &DeleteFeedbackRequest) -> Result<(), ServiceError> {
        info!(
            "🗑️ Deleting feedback for racket {} by user {}",
            req.racket_id, req.user_id
        );

        let started = Instant::now();
        let method = Method::Delete;

        match self
            .repository
            .find_feedback(req.racket_id, req.user_id)
            .await
        {
            Ok(Some(_)) => {}
            Ok(None) => {
                error!(
                    "❌ Feedback not found for racket {} by user {}",
                    req.racket_id, req.user_id
                );
                self.metrics
                    .record(method, Status::Error, started.elapsed().as_secs_f64());
                return Err(ServiceError::NotFound(format!(
                    "feedback for racket {} by user {} not found",
                    req.racket_id, req.user_id
                )));
            }
            Err(e) => {
                error!("❌ Failed to fetch feedback: {e:?}");
                self.metrics
                    .record(method, Status::Error, started.elapsed().as_secs_f64());
                return Err(ServiceError::Repo(e));
            }
        }

        match self.repository.delete(req).await {
            Ok(()) => {
                info!(
                    "✅ Feedback deleted for racket {} by user {}",
                    req.racket_id, req.user_id
                );
                self.metrics
                    .record(method, Status::Success, started.elapsed().as_secs_f64());
                Ok(())
            }
            Err(e) => {
                error!("❌ Failed to delete feedback: {e:?}");
                self.metrics
                    .record(method, Status::Error, started.elapsed().as_secs_f64());
                Err(ServiceError::Repo(e))
            }
        }
    }

    async fn find_by_racket_id(
        &self,
        racket_id: i32,
    ) -> Result<Vec<FeedbackModel>, ServiceError> {
        info!("🔍 Listing feedbacks for racket {racket_id}");

        let started = Instant::now();
        let method = Method::Get;

        match self.repository.find_by_racket_id(racket_id).await {
            Ok(feedbacks) => {
                info!("✅ Found {} feedbacks", feedbacks.len());
                self.metrics
                    .record(method, Status::Success, started.elapsed().as_secs_f64());
                Ok(feedbacks)
            }
            Err(e) => {
                error!("❌ Failed to list feedbacks for racket {racket_id}: {e:?}");
                self.metrics
                    .record(method, Status::Error, started.elapsed().as_secs_f64());
                Err(ServiceError::Repo(e))
            }
        }
    }

    async fn find_by_user_id(&self, user_id: i32) -> Result<Vec<FeedbackModel>, ServiceError> {
        info!("🔍 Listing feedbacks left by user {user_id}");

        let started = Instant::now();
        let method = Method::Get;

        match self.repository.find_by_user_id(user_id).await {
            Ok(feedbacks) => {
                info!("✅ Found {} feedbacks", feedbacks.len());
                self.metrics
                    .record(method, Status::Success, started.elapsed().as_secs_f64());
                Ok(feedbacks)
            }
            Err(e) => {
                error!("❌ Failed to list feedbacks for user {user_id}: {e:?}");
                self.metrics
                    .record(method, Status::Error, started.elapsed().as_secs_f64());
                Err(ServiceError::Repo(e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::abstract_trait::feedback::MockFeedbackRepositoryTrait;
    use chrono::NaiveDate;
    use std::sync::Arc;

    fn feedback(racket_id: i32, user_id: i32) -> FeedbackModel {
        FeedbackModel {
            racket_id,
            user_id,
            feedback: "solid frame".to_string(),
            rating: 5,
            date: NaiveDate::from_ymd_opt(2025, 3, 1)
                .expect("valid date")
                .and_hms_opt(12, 0, 0)
                .expect("valid time"),
        }
    }

    fn service(repository: MockFeedbackRepositoryTrait) -> FeedbackService {
        let mut registry = Registry::default();
        FeedbackService::new(Arc::new(repository), &mut registry).expect("service construction")
    }

    #[tokio::test]
    async fn create_feedback_rejects_out_of_range_rating() {
        let mut repository = MockFeedbackRepositoryTrait::new();
        repository.expect_create().never();

        let svc = service(repository);

        let req = CreateFeedbackRequest {
            racket_id: 1,
            user_id: 1,
            feedback: "meh".to_string(),
            rating: 6,
        };

        let err = svc.create_feedback(&req).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
    }

    #[tokio::test]
    async fn delete_feedback_requires_existing_row() {
        let mut repository = MockFeedbackRepositoryTrait::new();
        repository.expect_find_feedback().returning(|_, _| Ok(None));
        repository.expect_delete().never();

        let svc = service(repository);

        let req = DeleteFeedbackRequest {
            racket_id: 1,
            user_id: 1,
        };

        let err = svc.delete_feedback(&req).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }

    #[tokio::test]
    async fn delete_feedback_removes_existing_row() {
        let mut repository = MockFeedbackRepositoryTrait::new();
        repository
            .expect_find_feedback()
            .returning(|racket_id, user_id| Ok(Some(feedback(racket_id, user_id))));
        repository.expect_delete().returning(|_| Ok(()));

        let svc = service(repository);

        let req = DeleteFeedbackRequest {
            racket_id: 1,
            user_id: 1,
        };

        svc.delete_feedback(&req).await.expect("delete should pass");
    }
}
