use crate::{
    domain::requests::racket::{CreateRacketRequest, UpdateRacketQuantityRequest},
    model::racket::Racket as RacketModel,
};
use async_trait::async_trait;
use mockall::automock;
use shared::errors::RepositoryError;
use std::sync::Arc;

pub type DynRacketCommandRepository = Arc<dyn RacketCommandRepositoryTrait + Send + Sync>;

#[automock]
#[async_trait]
pub trait RacketCommandRepositoryTrait {
    async fn create(&self, req: &CreateRacketRequest) -> Result<RacketModel, RepositoryError>;
    async fn update_quantity(
        &self,
        req: &UpdateRacketQuantityRequest,
    ) -> Result<RacketModel, RepositoryError>;
    async fn delete(&self, racket_id: i32) -> Result<(), RepositoryError>;
}
