use crate::{domain::requests::racket::FindAllRackets, model::racket::Racket as RacketModel};
use async_trait::async_trait;
use mockall::automock;
use shared::errors::ServiceError;
use std::sync::Arc;

pub type DynRacketQueryService = Arc<dyn RacketQueryServiceTrait + Send + Sync>;

#[automock]
#[async_trait]
pub trait RacketQueryServiceTrait {
    async fn find_all(&self, req: &FindAllRackets) -> Result<Vec<RacketModel>, ServiceError>;
    async fn find_by_id(&self, racket_id: i32) -> Result<RacketModel, ServiceError>;
}
