use crate::{
    abstract_trait::racket::{repository::DynRacketQueryRepository, service::RacketQueryServiceTrait},
    domain::requests::racket::FindAllRackets,
    model::racket::Racket as RacketModel,
};
use anyhow::Result;
use async_trait::async_trait;
use prometheus_client::registry::Registry;
use shared::{
    errors::ServiceError,
    utils::{Method, Metrics, Status},
};
use tokio::time::Instant;
use tracing::{error, info};

#[derive(Clone)]
pub struct RacketQueryService {
    query: DynRacketQueryRepository,
    metrics: Metrics,
}

impl RacketQueryService {
    pub fn new(query: DynRacketQueryRepository, registry: &mut Registry) -> Result<Self> {
        let metrics = Metrics::new();

        registry.register(
            "racket_query_service_request_counter",
            "Total number of requests to the RacketQueryService",
            metrics.request_counter.clone(),
        );
        registry.register(
            "racket_query_service_request_duration",
            "Histogram of request durations for the RacketQueryService",
            metrics.request_duration.clone(),
        );

        Ok(Self { query, metrics })
    }
}

#[async_trait]
impl RacketQueryServiceTrait for RacketQueryService {
    async fn find_all(&self, req: &FindAllRackets) -> Result<Vec<RacketModel>, ServiceError> {
        info!(
            "🔍 Listing rackets sorted by [{}]",
            req.pagination.sort.format()
        );

        let started = Instant::now();
        let method = Method::Get;

        match self.query.find_all(req).await {
            Ok(rackets) => {
                info!("✅ Found {} rackets", rackets.len());
                self.metrics
                    .record(method, Status::Success, started.elapsed().as_secs_f64());
                Ok(rackets)
            }
            Err(e) => {
                error!("❌ Failed to list rackets: {e:?}");
                self.metrics
                    .record(method, Status::Error, started.elapsed().as_secs_f64());
                Err(ServiceError::Repo(e))
            }
        }
    }

    async fn find_by_id(&self, racket_id: i32) -> Result<RacketModel, ServiceError> {
        info!("🆔 Fetching racket ID {racket_id}");

        let started = Instant::now();
        let method = Method::Get;

        match self.query.find_by_id(racket_id).await {
            Ok(Some(racket)) => {
                info!("✅ Found racket '{}' (ID {racket_id})", racket.brand);
                self.metrics
                    .record(method, Status::Success, started.elapsed().as_secs_f64());
                Ok(racket)
            }
            Ok(None) => {
                error!("❌ Racket not found with ID {racket_id}");
                self.metrics
                    .record(method, Status::Error, started.elapsed().as_secs_f64());
                Err(ServiceError::NotFound(format!(
                    "racket {racket_id} not found"
                )))
            }
            Err(e) => {
                error!("❌ Failed to fetch racket ID {racket_id}: {e:?}");
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
    use crate::abstract_trait::racket::repository::MockRacketQueryRepositoryTrait;
    use shared::pagination::{Pagination, SortDirection, SortOptions};
    use std::sync::Arc;

    fn racket(racket_id: i32, price: i64) -> RacketModel {
        RacketModel {
            racket_id,
            brand: "Wilson".to_string(),
            weight: 290.0,
            balance: 33.0,
            head_size: 630.0,
            price,
            quantity: 5,
            available: true,
            created_at: None,
            updated_at: None,
        }
    }

    fn service(query: MockRacketQueryRepositoryTrait) -> RacketQueryService {
        let mut registry = Registry::default();
        RacketQueryService::new(Arc::new(query), &mut registry).expect("service construction")
    }

    #[tokio::test]
    async fn find_by_id_maps_missing_to_not_found() {
        let mut query = MockRacketQueryRepositoryTrait::new();
        query.expect_find_by_id().returning(|_| Ok(None));

        let svc = service(query);

        let err = svc.find_by_id(7).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }

    #[tokio::test]
    async fn find_all_passes_sort_options_through() {
        let mut query = MockRacketQueryRepositoryTrait::new();
        query
            .expect_find_all()
            .withf(|req| req.pagination.sort.format() == "price ASC")
            .returning(|_| Ok(vec![racket(1, 100), racket(2, 200)]));

        let svc = service(query);

        let req = FindAllRackets {
            pagination: Pagination {
                sort: SortOptions {
                    direction: SortDirection::Asc,
                    columns: vec!["price".to_string()],
                },
                ..Pagination::default()
            },
        };

        let rackets = svc.find_all(&req).await.expect("list should pass");
        assert_eq!(rackets.len(), 2);
    }
}
