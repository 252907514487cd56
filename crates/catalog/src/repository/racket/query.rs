use crate::{
    abstract_trait::racket::repository::RacketQueryRepositoryTrait,
    domain::requests::racket::FindAllRackets, model::racket::Racket as RacketModel,
};
use shared::{config::ConnectionPool, errors::RepositoryError};

use async_trait::async_trait;
use tracing::{error, info};

pub struct RacketQueryRepository {
    db: ConnectionPool,
}

impl RacketQueryRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl RacketQueryRepositoryTrait for RacketQueryRepository {
    async fn find_all(&self, req: &FindAllRackets) -> Result<Vec<RacketModel>, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        // Sort columns come from the caller unchecked; an unknown column
        // fails here as a query error.
        let sql = format!(
            r#"
        SELECT racket_id, brand, weight, balance, head_size, price, quantity, available, created_at, updated_at
        FROM rackets
        {}
        "#,
            req.pagination.order_by_clause()
        );

        let rackets = sqlx::query_as::<_, RacketModel>(&sql)
            .fetch_all(&mut *conn)
            .await
            .map_err(|err| {
                error!("❌ Failed to list rackets: {:?}", err);
                RepositoryError::from(err)
            })?;

        info!("✅ Retrieved {} rackets", rackets.len());
        Ok(rackets)
    }

    async fn find_by_id(&self, racket_id: i32) -> Result<Option<RacketModel>, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let racket = sqlx::query_as::<_, RacketModel>(
            r#"
        SELECT racket_id, brand, weight, balance, head_size, price, quantity, available, created_at, updated_at
        FROM rackets
        WHERE racket_id = $1
        "#,
        )
        .bind(racket_id)
        .fetch_optional(&mut *conn)
        .await
        .map_err(|err| {
            error!("❌ Failed to fetch racket ID {racket_id}: {:?}", err);
            RepositoryError::from(err)
        })?;

        Ok(racket)
    }
}
