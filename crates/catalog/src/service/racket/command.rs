use crate::{
    abstract_trait::racket::{
        repository::{DynRacketCommandRepository, DynRacketQueryRepository},
        service::RacketCommandServiceTrait,
    },
    domain::requests::racket::{CreateRacketRequest, UpdateRacketQuantityRequest},
    model::racket::Racket as RacketModel,
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
pub struct RacketCommandService {
    query: DynRacketQueryRepository,
    command: DynRacketCommandRepository,
    metrics: Metrics,
}

impl RacketCommandService {
    pub fn new(
        query: DynRacketQueryRepository,
        command: DynRacketCommandRepository,
        registry: &mut Registry,
    ) -> Result<Self> {
        let metrics = Metrics::new();

        registry.register(
            "racket_command_service_request_counter",
            "Total number of requests to the RacketCommandService",
            metrics.request_counter.clone(),
        );
        registry.register(
            "racket_command_service_request_duration",
            "Histogram of request durations for the RacketCommandService",
            metrics.request_duration.clone(),
        );

        Ok(Self {
            query,
            command,
            metrics,
        })
    }
}

#[async_trait]
impl RacketCommandServiceTrait for RacketCommandService {
    async fn create_racket(
        &self,
        req: &CreateRacketRequest,
    ) -> Result<RacketModel, ServiceError> {
        info!("🏗️ Creating racket brand '{}'", req.brand);

        let started = Instant::now();
        let method = Method::Post;

        if let Err(errors) = req.validate() {
            let messages = format_validation_errors(&errors);
            error!("❌ Racket validation failed: {:?}", messages);
            self.metrics
                .record(method, Status::Error, started.elapsed().as_secs_f64());
            return Err(ServiceError::Validation(messages));
        }

        match self.command.create(req).await {
            Ok(racket) => {
                info!("✅ Racket created with ID {}", racket.racket_id);
                self.metrics
                    .record(method, Status::Success, started.elapsed().as_secs_f64());
                Ok(racket)
            }
            Err(e) => {
                error!("❌ Failed to create racket: {e:?}");
                self.metrics
                    .record(method, Status::Error, started.elapsed().as_secs_f64());
                Err(ServiceError::Repo(e))
            }
        }
    }

    async fn update_racket_quantity(
        &self,
        req: &UpdateRacketQuantityRequest,
    ) -> Result<RacketModel, ServiceError> {
        info!(
            "✏️ Updating racket ID {} quantity to {}",
            req.racket_id, req.quantity
        );

        let started = Instant::now();
        let method = Method::Put;

        if let Err(errors) = req.validate() {
            let messages = format_validation_errors(&errors);
            error!("❌ Racket update validation failed: {:?}", messages);
            self.metrics
                .record(method, Status::Error, started.elapsed().as_secs_f64());
            return Err(ServiceError::Validation(messages));
        }

        let existing = match self.query.find_by_id(req.racket_id).await {
            Ok(Some(racket)) => racket,
            Ok(None) => {
                error!("❌ Racket not found with ID {}", req.racket_id);
                self.metrics
                    .record(method, Status::Error, started.elapsed().as_secs_f64());
                return Err(ServiceError::NotFound(format!(
                    "racket {} not found",
                    req.racket_id
                )));
            }
            Err(e) => {
                error!("❌ Failed to fetch racket ID {}: {e:?}", req.racket_id);
                self.metrics
                    .record(method, Status::Error, started.elapsed().as_secs_f64());
                return Err(ServiceError::Repo(e));
            }
        };

        match self.command.update_quantity(req).await {
            Ok(racket) => {
                info!(
                    "✅ Racket ID {} quantity {} -> {}",
                    racket.racket_id, existing.quantity, racket.quantity
                );
                self.metrics
                    .record(method, Status::Success, started.elapsed().as_secs_f64());
                Ok(racket)
            }
            Err(e) => {
                error!("❌ Failed to update racket ID {}: {e:?}", req.racket_id);
                self.metrics
                    .record(method, Status::Error, started.elapsed().as_secs_f64());
                Err(ServiceError::Repo(e))
            }
        }
    }

    async fn delete_racket(&self, racket_id: i32) -> Result<(), ServiceError> {
        info!("🗑️ Deleting racket ID {racket_id}");

        let started = Instant::now();
        let method = Method::Delete;

        match self.command.delete(racket_id).await {
            Ok(()) => {
                info!("✅ Racket ID {racket_id} deleted");
                self.metrics
                    .record(method, Status::Success, started.elapsed().as_secs_f64());
                Ok(())
            }
            Err(shared::errors::RepositoryError::NotFound) => {
                error!("❌ Racket not found with ID {racket_id}");
                self.metrics
                    .record(method, Status::Error, started.elapsed().as_secs_f64());
                Err(ServiceError::NotFound(format!(
                    "racket {racket_id} not found"
                )))
            }
            Err(e) => {
                error!("❌ Failed to delete racket ID {racket_id}: {e:?}");
                self.metrics
                    .record(method, Status::Error, started.elapsed().as_secs_f64());
                Err(ServiceError::Repo(e))
            }
        }
    }
}
