use crate::{
    abstract_trait::order::{
        repository::DynOrderQueryRepository, service::OrderQueryServiceTrait,
    },
    domain::requests::order::FindAllOrders,
    model::order::Order as OrderModel,
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
pub struct OrderQueryService {
    query: DynOrderQueryRepository,
    metrics: Metrics,
}

impl OrderQueryService {
    pub fn new(query: DynOrderQueryRepository, registry: &mut Registry) -> Result<Self> {
        let metrics = Metrics::new();

        registry.register(
            "order_query_service_request_counter",
            "Total number of requests to the OrderQueryService",
            metrics.request_counter.clone(),
        );
        registry.register(
            "order_query_service_request_duration",
            "Histogram of request durations for the OrderQueryService",
            metrics.request_duration.clone(),
        );

        Ok(Self { query, metrics })
    }
}

#[async_trait]
impl OrderQueryServiceTrait for OrderQueryService {
    async fn find_all(&self, req: &FindAllOrders) -> Result<Vec<OrderModel>, ServiceError> {
        info!(
            "🔍 Fetching all orders sorted by {}",
            req.pagination.sort.format()
        );

        let started = Instant::now();
        let method = Method::Get;

        match self.query.find_all(req).await {
            Ok(orders) => {
                info!("✅ Retrieved {} orders", orders.len());
                self.metrics
                    .record(method, Status::Success, started.elapsed().as_secs_f64());
                Ok(orders)
            }
            Err(e) => {
                error!("❌ Failed to fetch orders: {e:?}");
                self.metrics
                    .record(method, Status::Error, started.elapsed().as_secs_f64());
                Err(ServiceError::Repo(e))
            }
        }
    }

    async fn find_my_orders(&self, user_id: i32) -> Result<Vec<OrderModel>, ServiceError> {
        info!("🔍 Fetching orders of user ID {user_id}");

        let started = Instant::now();
        let method = Method::Get;

        match self.query.find_by_user_id(user_id).await {
            Ok(orders) => {
                info!("✅ Retrieved {} orders for user ID {user_id}", orders.len());
                self.metrics
                    .record(method, Status::Success, started.elapsed().as_secs_f64());
                Ok(orders)
            }
            Err(e) => {
                error!("❌ Failed to fetch orders of user ID {user_id}: {e:?}");
                self.metrics
                    .record(method, Status::Error, started.elapsed().as_secs_f64());
                Err(ServiceError::Repo(e))
            }
        }
    }

    async fn find_by_id(&self, order_id: i32) -> Result<OrderModel, ServiceError> {
        info!("🆔 Fetching order ID {order_id}");

        let started = Instant::now();
        let method = Method::Get;

        match self.query.find_by_id(order_id).await {
            Ok(Some(order)) => {
                info!("✅ Order ID {order_id} found");
                self.metrics
                    .record(method, Status::Success, started.elapsed().as_secs_f64());
                Ok(order)
            }
            Ok(None) => {
                error!("❌ Order not found with ID {order_id}");
                self.metrics
                    .record(method, Status::Error, started.elapsed().as_secs_f64());
                Err(ServiceError::NotFound(format!("order {order_id} not found")))
            }
            Err(e) => {
                error!("❌ Failed to fetch order ID {order_id}: {e:?}");
                self.metrics
                    .record(method, Status::Error, started.elapsed().as_secs_f64());
                Err(ServiceError::Repo(e))
            }
        }
    }
}
