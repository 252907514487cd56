use crate::{
    domain::requests::racket::{CreateRacketRequest, UpdateRacketQuantityRequest},
    model::racket::Racket as RacketModel,
};
use async_trait::async_trait;
use mockall::automock;
use shared::errors::ServiceError;
use std::sync::Arc;

pub type DynRacketCommandService = Arc<dyn RacketCommandServiceTrait + Send + Sync>;

#[automock]
#[async_trait]
pub trait RacketCommandServiceTrait {
    async fn create_racket(&self, req: &CreateRacketRequest)
    -> Result<RacketModel, ServiceError>;
    async fn update_racket_quantity(
        &self,
        req: &UpdateRacketQuantityRequest,
    ) -> Result<RacketModel, ServiceError>;
    async fn delete_racket(&self, racket_id: i32) -> Result<(), ServiceError>;
}
