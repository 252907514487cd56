use crate::{
    abstract_trait::racket::repository::RacketCommandRepositoryTrait,
    domain::requests::racket::{CreateRacketRequest, UpdateRacketQuantityRequest},
    model::racket::Racket as RacketModel,
};
use shared::{config::ConnectionPool, errors::RepositoryError};

use async_trait::async_trait;
use tracing::{error, info};

pub struct RacketCommandRepository {
    db: ConnectionPool,
}

impl RacketCommandRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl RacketCommandRepositoryTrait for RacketCommandRepository {
    async fn create(&self, req: &CreateRacketRequest) -> Result<RacketModel, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let result = sqlx::query_as::<_, RacketModel>(
            r#"
        INSERT INTO rackets (brand, weight, balance, head_size, price, quantity, available, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, current_timestamp, current_timestamp)
        RETURNING racket_id, brand, weight, balance, head_size, price, quantity, available, created_at, updated_at
        "#,
        )
        .bind(&req.brand)
        .bind(req.weight)
        .bind(req.balance)
        .bind(req.head_size)
        .bind(req.price)
        .bind(req.quantity)
        .bind(req.available)
        .fetch_one(&mut *conn)
        .await
        .map_err(|err| {
            error!("❌ Failed to create racket '{}': {:?}", req.brand, err);
            RepositoryError::from(err)
        })?;

        info!(
            "✅ Created racket ID {} brand '{}'",
            result.racket_id, result.brand
        );
        Ok(result)
    }

    async fn update_quantity(
        &self,
        req: &UpdateRacketQuantityRequest,
    ) -> Result<RacketModel, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let result = sqlx::query_as::<_, RacketModel>(
            r#"
        UPDATE rackets
        SET quantity   = $2,
            updated_at = current_timestamp
        WHERE racket_id = $1
        RETURNING racket_id, brand, weight, balance, head_size, price, quantity, available, created_at, updated_at
        "#,
        )
        .bind(req.racket_id)
        .bind(req.quantity)
        .fetch_optional(&mut *conn)
        .await
        .map_err(|err| {
            error!(
                "❌ Failed to update quantity for racket ID {}: {:?}",
                req.racket_id, err
            );
            RepositoryError::from(err)
        })?
        .ok_or(RepositoryError::NotFound)?;

        info!(
            "🔄 Updated racket ID {} quantity to {}",
            result.racket_id, result.quantity
        );
        Ok(result)
    }

    async fn delete(&self, racket_id: i32) -> Result<(), RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let result = sqlx::query("DELETE FROM rackets WHERE racket_id = $1")
            .bind(racket_id)
            .execute(&mut *conn)
            .await
            .map_err(|err| {
                error!("❌ Failed to delete racket ID {racket_id}: {:?}", err);
                RepositoryError::from(err)
            })?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        info!("🗑️ Deleted racket ID {racket_id}");
        Ok(())
    }
}
