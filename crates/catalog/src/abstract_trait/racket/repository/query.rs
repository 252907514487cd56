use crate::{domain::requests::racket::FindAllRackets, model::racket::Racket as RacketModel};
use async_trait::async_trait;
use mockall::automock;
use shared::errors::RepositoryError;
use std::sync::Arc;

pub type DynRacketQueryRepository = Arc<dyn RacketQueryRepositoryTrait + Send + Sync>;

#[automock]
#[async_trait]
pub trait RacketQueryRepositoryTrait {
    async fn find_all(&self, req: &FindAllRackets) -> Result<Vec<RacketModel>, RepositoryError>;
    async fn find_by_id(&self, racket_id: i32) -> Result<Option<RacketModel>, RepositoryError>;
}
