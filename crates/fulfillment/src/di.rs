use crate::{
    repository::{
        cart::{CartCommandRepository, CartQueryRepository},
        order::{OrderCommandRepository, OrderQueryRepository},
    },
    service::{
        CartService,
        order::{OrderCommandService, OrderQueryService},
    },
};
use anyhow::{Context, Result};
use catalog::{
    repository::{
        feedback::FeedbackRepository,
        racket::{RacketCommandRepository, RacketQueryRepository},
    },
    service::{
        feedback::FeedbackService,
        racket::{RacketCommandService, RacketQueryService},
    },
};
use prometheus_client::registry::Registry;
use shared::config::ConnectionPool;
use std::{fmt, sync::Arc};

#[derive(Clone)]
pub struct DependenciesInject {
    pub cart_service: CartService,
    pub order_command: OrderCommandService,
    pub order_query: OrderQueryService,
    pub racket_command: RacketCommandService,
    pub racket_query: RacketQueryService,
    pub feedback_service: FeedbackService,
}

impl fmt::Debug for DependenciesInject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DependenciesInject")
            .field("cart_service", &"CartService")
            .field("order_command", &"OrderCommandService")
            .field("order_query", &"OrderQueryService")
            .field("racket_command", &"RacketCommandService")
            .field("racket_query", &"RacketQueryService")
            .field("feedback_service", &"FeedbackService")
            .finish()
    }
}

#[derive(Clone)]
pub struct DependenciesInjectDeps {
    pub pool: ConnectionPool,
}

impl DependenciesInject {
    pub fn new(deps: DependenciesInjectDeps, registry: &mut Registry) -> Result<Self> {
        let DependenciesInjectDeps { pool } = deps;

        let racket_query_repo = Arc::new(RacketQueryRepository::new(pool.clone()));
        let racket_command_repo = Arc::new(RacketCommandRepository::new(pool.clone()));
        let feedback_repo = Arc::new(FeedbackRepository::new(pool.clone()));

        let cart_query_repo = Arc::new(CartQueryRepository::new(pool.clone()));
        let cart_command_repo = Arc::new(CartCommandRepository::new(pool.clone()));

        let order_query_repo = Arc::new(OrderQueryRepository::new(pool.clone()));
        let order_command_repo = Arc::new(OrderCommandRepository::new(pool.clone()));

        let racket_query = RacketQueryService::new(racket_query_repo.clone(), registry)
            .context("failed initialize racket query")?;

        let racket_command = RacketCommandService::new(
            racket_query_repo.clone(),
            racket_command_repo,
            registry,
        )
        .context("failed initialize racket command")?;

        let feedback_service = FeedbackService::new(feedback_repo, registry)
            .context("failed initialize feedback")?;

        let cart_service = CartService::new(
            cart_query_repo.clone(),
            cart_command_repo,
            racket_query_repo,
            registry,
        )
        .context("failed initialize cart")?;

        let order_query = OrderQueryService::new(order_query_repo.clone(), registry)
            .context("failed initialize order query")?;

        let order_command = OrderCommandService::new(
            cart_query_repo,
            order_query_repo,
            order_command_repo,
            registry,
        )
        .context("failed initialize order command")?;

        Ok(Self {
            cart_service,
            order_command,
            order_query,
            racket_command,
            racket_query,
            feedback_service,
        })
    }
}
