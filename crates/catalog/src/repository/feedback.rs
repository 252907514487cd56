use crate::{
    abstract_trait::feedback::FeedbackRepositoryTrait,
    domain::requests::feedback::{CreateFeedbackRequest, DeleteFeedbackRequest},
    model::feedback::Feedback as FeedbackModel,
};
use shared::{config::ConnectionPool, errors::RepositoryError};

use async_trait::async_trait;
use tracing::{error, info};

pub struct FeedbackRepository {
    db: ConnectionPool,
}

impl FeedbackRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl FeedbackRepositoryTrait for FeedbackRepository {
    async fn create(&self, req: &CreateFeedbackRequest) -> Result<FeedbackModel, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let result = sqlx::query_as::<_, FeedbackModel>(
            r#"
        INSERT INTO feedbacks (racket_id, user_id, feedback, rating, date)
        VALUES ($1, $2, $3, $4, current_timestamp)
        RETURNING racket_id, user_id, feedback, rating, date
        "#,
        )
        .bind(req.racket_id)
        .bind(req.user_id)
        .bind(&req.feedback)
        .bind(req.rating)
        .fetch_one(&mut *conn)
        .await
        .map_err(|err| {
            error!(
                "❌ Failed to create feedback for racket {} by user {}: {:?}",
                req.racket_id, req.user_id, err
            );
            RepositoryError::from(err)
        })?;

        info!(
            "✅ Created feedback for racket {} by user {}",
            result.racket_id, result.user_id
        );
        Ok(result)
    }

    async fn delete(&self, req: &DeleteFeedbackRequest) -> Result<(), RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let result = sqlx::query("DELETE FROM feedbacks WHERE racket_id = $1 AND user_id = $2")
            .bind(req.racket_id)
            .bind(req.user_id)
            .execute(&mut *conn)
            .await
            .map_err(|err| {
                error!(
                    "❌ Failed to delete feedback for racket {} by user {}: {:?}",
                    req.racket_id, req.user_id, err
                );
                RepositoryError::from(err)
            })?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        info!(
            "🗑️ Deleted feedback for racket {} by user {}",
            req.racket_id, req.user_id
        );
        Ok(())
    }

    async fn find_feedback(
        &self,
        racket_id: i32,
        user_id: i32,
    ) -> Result<Option<FeedbackModel>, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let feedback = sqlx::query_as::<_, FeedbackModel>(
            r#"
        SELECT racket_id, user_id, feedback, rating, date
        FROM feedbacks
        WHERE racket_id = $1 AND user_id = $2
        "#,
        )
        .bind(racket_id)
        .bind(user_id)
        .fetch_optional(&mut *conn)
        .await
        .map_err(|err| {
            error!(
                "❌ Failed to fetch feedback for racket {racket_id} by user {user_id}: {:?}",
                err
            );
            RepositoryError::from(err)
        })?;

        Ok(feedback)
    }

    async fn find_by_racket_id(
        &self,
        racket_id: i32,
    ) -> Result<Vec<FeedbackModel>, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let feedbacks = sqlx::query_as::<_, FeedbackModel>(
            r#"
        SELECT racket_id, user_id, feedback, rating, date
        FROM feedbacks
        WHERE racket_id = $1
        ORDER BY date DESC
        "#,
        )
        .bind(racket_id)
        .fetch_all(&mut *conn)
        .await
        .map_err(|err| {
            error!(
                "❌ Failed to list feedbacks for racket {racket_id}: {:?}",
                err
            );
            RepositoryError::from(err)
        })?;

        info!(
            "✅ Retrieved {} feedbacks for racket {racket_id}",
            feedbacks.len()
        );
        Ok(feedbacks)
    }

    async fn find_by_user_id(&self, user_id: i32) -> Result<Vec<FeedbackModel>, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let feedbacks = sqlx::query_as::<_, FeedbackModel>(
            r#"
        SELECT racket_id, user_id, feedback, rating, date
        FROM feedbacks
        WHERE user_id = $1
        ORDER BY date DESC
        "#,
        )
        .bind(user_id)
        .fetch_all(&mut *conn)
        .await
        .map_err(|err| {
            error!("❌ Failed to list feedbacks for user {user_id}: {:?}", err);
            RepositoryError::from(err)
        })?;

        info!(
            "✅ Retrieved {} feedbacks for user {user_id}",
            feedbacks.len()
        );
        Ok(feedbacks)
    }
}
