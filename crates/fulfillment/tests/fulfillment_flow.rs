//! End-to-end tests for the cart to order flow, running the real services
//! against in-memory repositories.

use async_trait::async_trait;
use catalog::abstract_trait::racket::repository::RacketQueryRepositoryTrait;
use catalog::domain::requests::racket::FindAllRackets;
use catalog::model::racket::Racket as RacketModel;
use chrono::{NaiveDate, NaiveDateTime, Utc};
use fulfillment::abstract_trait::cart::CartServiceTrait;
use fulfillment::abstract_trait::cart::repository::{
    CartCommandRepositoryTrait, CartQueryRepositoryTrait,
};
use fulfillment::abstract_trait::order::repository::{
    OrderCommandRepositoryTrait, OrderQueryRepositoryTrait,
};
use fulfillment::abstract_trait::order::service::{OrderCommandServiceTrait, OrderQueryServiceTrait};
use fulfillment::domain::requests::cart::{
    AddCartLineRecordRequest, AddRacketCartRequest, RemoveCartLineRecordRequest,
    RemoveRacketCartRequest, UpdateCartLineRecordRequest, UpdateRacketCartRequest,
};
use fulfillment::domain::requests::order::{
    CreateOrderRecordRequest, CreateOrderRequest, FindAllOrders, UpdateOrderStatusRequest,
};
use fulfillment::model::cart::{Cart as CartModel, CartLine};
use fulfillment::model::order::{Order as OrderModel, OrderLine, OrderStatus};
use fulfillment::service::CartService;
use fulfillment::service::order::{OrderCommandService, OrderQueryService};
use prometheus_client::registry::Registry;
use shared::errors::{RepositoryError, ServiceError};
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, RwLock};
use tokio::sync::Barrier;

#[derive(Debug, Default)]
struct StoreState {
    rackets: HashMap<i32, RacketModel>,
    carts: HashMap<i32, CartModel>,
    orders: BTreeMap<i32, OrderModel>,
    next_order_id: i32,
}

/// In-memory stand-in for the Postgres repositories. A single `RwLock` over
/// the whole state makes every write exactly as atomic as the real
/// transactions it imitates.
#[derive(Debug, Clone, Default)]
struct InMemoryStore {
    state: Arc<RwLock<StoreState>>,
}

impl InMemoryStore {
    fn new() -> Self {
        Self::default()
    }

    fn stock_racket(&self, racket_id: i32, price: i64, quantity: i32) {
        let now = Utc::now().naive_utc();
        self.state.write().unwrap().rackets.insert(
            racket_id,
            RacketModel {
                racket_id,
                brand: format!("Frame {racket_id}"),
                weight: 300.0,
                balance: 320.0,
                head_size: 100.0,
                price,
                quantity,
                available: true,
                created_at: Some(now),
                updated_at: Some(now),
            },
        );
    }

    fn set_racket_price(&self, racket_id: i32, price: i64) {
        if let Some(racket) = self.state.write().unwrap().rackets.get_mut(&racket_id) {
            racket.price = price;
        }
    }

    fn racket_quantity(&self, racket_id: i32) -> i32 {
        self.state.read().unwrap().rackets[&racket_id].quantity
    }

    fn has_cart(&self, user_id: i32) -> bool {
        self.state.read().unwrap().carts.contains_key(&user_id)
    }

    fn order_count(&self) -> usize {
        self.state.read().unwrap().orders.len()
    }
}

fn empty_cart(user_id: i32) -> CartModel {
    let now = Utc::now().naive_utc();
    CartModel {
        user_id,
        total_price: 0,
        total_quantity: 0,
        version: 0,
        created_at: Some(now),
        updated_at: Some(now),
        lines: Vec::new(),
    }
}

fn guard_version(cart: &CartModel, expected: i32) -> Result<(), RepositoryError> {
    if cart.version != expected {
        return Err(RepositoryError::VersionConflict(format!(
            "cart of user {} is no longer at version {}",
            cart.user_id, expected
        )));
    }
    Ok(())
}

fn refresh_totals(cart: &mut CartModel) {
    cart.total_price = cart
        .lines
        .iter()
        .map(|line| line.price * i64::from(line.quantity))
        .sum();
    cart.total_quantity = cart.lines.iter().map(|line| line.quantity).sum();
    cart.version += 1;
    cart.updated_at = Some(Utc::now().naive_utc());
}

#[async_trait]
impl RacketQueryRepositoryTrait for InMemoryStore {
    async fn find_all(&self, _req: &FindAllRackets) -> Result<Vec<RacketModel>, RepositoryError> {
        let state = self.state.read().unwrap();
        let mut rackets: Vec<RacketModel> = state.rackets.values().cloned().collect();
        rackets.sort_by_key(|racket| racket.racket_id);
        Ok(rackets)
    }

    async fn find_by_id(&self, racket_id: i32) -> Result<Option<RacketModel>, RepositoryError> {
        Ok(self.state.read().unwrap().rackets.get(&racket_id).cloned())
    }
}

#[async_trait]
impl CartQueryRepositoryTrait for InMemoryStore {
    async fn find_by_user_id(&self, user_id: i32) -> Result<Option<CartModel>, RepositoryError> {
        Ok(self.state.read().unwrap().carts.get(&user_id).cloned())
    }
}

#[async_trait]
impl CartCommandRepositoryTrait for InMemoryStore {
    async fn create(&self, user_id: i32) -> Result<CartModel, RepositoryError> {
        let mut state = self.state.write().unwrap();
        let cart = state
            .carts
            .entry(user_id)
            .or_insert_with(|| empty_cart(user_id));
        Ok(cart.clone())
    }

    async fn add_line(&self, req: &AddCartLineRecordRequest) -> Result<(), RepositoryError> {
        let mut state = self.state.write().unwrap();
        let cart = state
            .carts
            .get_mut(&req.user_id)
            .ok_or(RepositoryError::NotFound)?;
        guard_version(cart, req.cart_version)?;
        cart.lines.push(CartLine {
            racket_id: req.racket_id,
            quantity: req.quantity,
            price: req.price,
        });
        refresh_totals(cart);
        Ok(())
    }

    async fn update_line(&self, req: &UpdateCartLineRecordRequest) -> Result<(), RepositoryError> {
        let mut state = self.state.write().unwrap();
        let cart = state
            .carts
            .get_mut(&req.user_id)
            .ok_or(RepositoryError::NotFound)?;
        guard_version(cart, req.cart_version)?;
        let position = cart
            .lines
            .iter()
            .position(|line| line.racket_id == req.racket_id)
            .ok_or(RepositoryError::NotFound)?;
        if req.quantity > 0 {
            cart.lines[position].quantity = req.quantity;
        } else {
            cart.lines.remove(position);
        }
        refresh_totals(cart);
        Ok(())
    }

    async fn remove_line(&self, req: &RemoveCartLineRecordRequest) -> Result<(), RepositoryError> {
        let mut state = self.state.write().unwrap();
        let cart = state
            .carts
            .get_mut(&req.user_id)
            .ok_or(RepositoryError::NotFound)?;
        guard_version(cart, req.cart_version)?;
        let position = cart
            .lines
            .iter()
            .position(|line| line.racket_id == req.racket_id)
            .ok_or(RepositoryError::NotFound)?;
        cart.lines.remove(position);
        refresh_totals(cart);
        Ok(())
    }

    async fn delete(&self, user_id: i32) -> Result<(), RepositoryError> {
        let mut state = self.state.write().unwrap();
        state
            .carts
            .remove(&user_id)
            .map(|_| ())
            .ok_or(RepositoryError::NotFound)
    }
}

#[async_trait]
impl OrderQueryRepositoryTrait for InMemoryStore {
    // Sorting and pagination happen in SQL against the real backend; the
    // in-memory store hands everything back in id order.
    async fn find_all(&self, _req: &FindAllOrders) -> Result<Vec<OrderModel>, RepositoryError> {
        Ok(self.state.read().unwrap().orders.values().cloned().collect())
    }

    async fn find_by_user_id(&self, user_id: i32) -> Result<Vec<OrderModel>, RepositoryError> {
        Ok(self
            .state
            .read()
            .unwrap()
            .orders
            .values()
            .filter(|order| order.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, order_id: i32) -> Result<Option<OrderModel>, RepositoryError> {
        Ok(self.state.read().unwrap().orders.get(&order_id).cloned())
    }
}

#[async_trait]
impl OrderCommandRepositoryTrait for InMemoryStore {
    async fn create_order(
        &self,
        req: &CreateOrderRecordRequest,
    ) -> Result<OrderModel, RepositoryError> {
        let mut state = self.state.write().unwrap();

        // Check every line before touching stock, so a late failure leaves
        // the store exactly as a rolled-back transaction would.
        for line in &req.lines {
            let racket = state
                .rackets
                .get(&line.racket_id)
                .ok_or(RepositoryError::NotFound)?;
            if racket.quantity < line.quantity {
                return Err(RepositoryError::InsufficientStock {
                    racket_id: line.racket_id,
                    requested: line.quantity,
                    available: racket.quantity,
                });
            }
        }
        for line in &req.lines {
            if let Some(racket) = state.rackets.get_mut(&line.racket_id) {
                racket.quantity -= line.quantity;
            }
        }

        state.next_order_id += 1;
        let order = OrderModel {
            order_id: state.next_order_id,
            user_id: req.user_id,
            status: OrderStatus::InProgress,
            total_price: req.total_price,
            creation_date: Utc::now().naive_utc(),
            delivery_date: req.delivery_date,
            address: req.address.clone(),
            recipient_name: req.recipient_name.clone(),
            lines: req
                .lines
                .iter()
                .map(|line| OrderLine {
                    racket_id: line.racket_id,
                    quantity: line.quantity,
                })
                .collect(),
        };
        state.carts.remove(&req.user_id);
        state.orders.insert(order.order_id, order.clone());

        Ok(order)
    }

    async fn update_status(
        &self,
        req: &UpdateOrderStatusRequest,
    ) -> Result<OrderModel, RepositoryError> {
        let mut state = self.state.write().unwrap();
        let order = state
            .orders
            .get_mut(&req.order_id)
            .ok_or(RepositoryError::NotFound)?;
        order.status = req.status;
        Ok(order.clone())
    }
}

struct TestHarness {
    store: InMemoryStore,
    cart_service: CartService,
    order_command: OrderCommandService,
    order_query: OrderQueryService,
}

impl TestHarness {
    fn new() -> Self {
        let store = InMemoryStore::new();
        let mut registry = Registry::default();

        let cart_service = CartService::new(
            Arc::new(store.clone()),
            Arc::new(store.clone()),
            Arc::new(store.clone()),
            &mut registry,
        )
        .unwrap();
        let order_command = OrderCommandService::new(
            Arc::new(store.clone()),
            Arc::new(store.clone()),
            Arc::new(store.clone()),
            &mut registry,
        )
        .unwrap();
        let order_query = OrderQueryService::new(Arc::new(store.clone()), &mut registry).unwrap();

        Self {
            store,
            cart_service,
            order_command,
            order_query,
        }
    }
}

fn delivery() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 3, 14)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap()
}

fn add_req(user_id: i32, racket_id: i32, quantity: i32) -> AddRacketCartRequest {
    AddRacketCartRequest {
        user_id,
        racket_id,
        quantity,
    }
}

fn order_req(user_id: i32) -> CreateOrderRequest {
    CreateOrderRequest {
        user_id,
        delivery_date: delivery(),
        address: "1 Baseline Rd".to_string(),
        recipient_name: "R. Nadal".to_string(),
    }
}

#[tokio::test]
async fn test_cart_to_order_happy_path() {
    let h = TestHarness::new();
    h.store.stock_racket(1, 15_000, 10);
    h.store.stock_racket(2, 30_000, 5);

    h.cart_service.add_racket(&add_req(7, 1, 2)).await.unwrap();
    h.cart_service.add_racket(&add_req(7, 2, 1)).await.unwrap();
    let cart = h
        .cart_service
        .update_racket(&UpdateRacketCartRequest {
            user_id: 7,
            racket_id: 1,
            quantity: 1,
        })
        .await
        .unwrap();

    assert_eq!(cart.total_quantity, 4);
    assert_eq!(cart.total_price, 75_000);

    let order = h.order_command.create_order(&order_req(7)).await.unwrap();

    assert_eq!(order.user_id, 7);
    assert_eq!(order.status, OrderStatus::InProgress);
    assert_eq!(order.total_price, 75_000);
    assert_eq!(order.lines.len(), 2);
    assert_eq!(order.address, "1 Baseline Rd");

    // Stock went down by exactly the ordered quantities.
    assert_eq!(h.store.racket_quantity(1), 7);
    assert_eq!(h.store.racket_quantity(2), 4);

    // The cart was spent by the checkout.
    assert!(!h.store.has_cart(7));

    let found = h.order_query.find_by_id(order.order_id).await.unwrap();
    assert_eq!(found.total_price, 75_000);
    assert_eq!(found.status, OrderStatus::InProgress);

    let mine = h.order_query.find_my_orders(7).await.unwrap();
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].order_id, order.order_id);

    // The next visit to the cart starts from scratch.
    let fresh = h.cart_service.get_cart(7).await.unwrap();
    assert_eq!(fresh.version, 0);
    assert!(fresh.lines.is_empty());
}

#[tokio::test]
async fn test_checkout_charges_snapshot_prices() {
    let h = TestHarness::new();
    h.store.stock_racket(1, 100, 10);

    h.cart_service.add_racket(&add_req(3, 1, 2)).await.unwrap();

    // A catalog price change between add and checkout must not move the bill.
    h.store.set_racket_price(1, 999);

    let order = h.order_command.create_order(&order_req(3)).await.unwrap();
    assert_eq!(order.total_price, 200);
}

#[tokio::test]
async fn test_insufficient_stock_rolls_back_checkout() {
    let h = TestHarness::new();
    h.store.stock_racket(1, 10_000, 5);
    h.store.stock_racket(2, 20_000, 1);

    h.cart_service.add_racket(&add_req(4, 1, 2)).await.unwrap();
    h.cart_service.add_racket(&add_req(4, 2, 3)).await.unwrap();

    let err = h
        .order_command
        .create_order(&order_req(4))
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::InsufficientStock(_)));

    // Nothing moved: stock for both rackets, the cart, and the order table
    // all look exactly as they did before the attempt.
    assert_eq!(h.store.racket_quantity(1), 5);
    assert_eq!(h.store.racket_quantity(2), 1);
    assert!(h.store.has_cart(4));
    assert_eq!(h.store.order_count(), 0);

    let cart = h.cart_service.get_cart(4).await.unwrap();
    assert_eq!(cart.lines.len(), 2);
    assert_eq!(cart.total_price, 80_000);
}

#[tokio::test]
async fn test_checkout_rejects_emptied_cart() {
    let h = TestHarness::new();
    h.store.stock_racket(1, 5_000, 3);

    h.cart_service.add_racket(&add_req(9, 1, 1)).await.unwrap();
    let cart = h
        .cart_service
        .remove_racket(&RemoveRacketCartRequest {
            user_id: 9,
            racket_id: 1,
        })
        .await
        .unwrap();
    assert!(cart.lines.is_empty());

    let err = h
        .order_command
        .create_order(&order_req(9))
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Validation(_)));
    assert_eq!(h.store.order_count(), 0);
}

#[tokio::test]
async fn test_update_order_status_lifecycle() {
    let h = TestHarness::new();
    h.store.stock_racket(1, 12_000, 2);

    h.cart_service.add_racket(&add_req(5, 1, 1)).await.unwrap();
    let order = h.order_command.create_order(&order_req(5)).await.unwrap();
    assert_eq!(order.status, OrderStatus::InProgress);

    let done = h
        .order_command
        .update_order_status(&UpdateOrderStatusRequest {
            order_id: order.order_id,
            status: OrderStatus::Done,
        })
        .await
        .unwrap();
    assert_eq!(done.status, OrderStatus::Done);

    // Writing the same state again is allowed and changes nothing.
    let again = h
        .order_command
        .update_order_status(&UpdateOrderStatusRequest {
            order_id: order.order_id,
            status: OrderStatus::Done,
        })
        .await
        .unwrap();
    assert_eq!(again.status, OrderStatus::Done);

    let found = h.order_query.find_by_id(order.order_id).await.unwrap();
    assert_eq!(found.status, OrderStatus::Done);
}

#[tokio::test]
async fn test_first_get_creates_and_persists_cart() {
    let h = TestHarness::new();
    assert!(!h.store.has_cart(11));

    let cart = h.cart_service.get_cart(11).await.unwrap();
    assert_eq!(cart.user_id, 11);
    assert_eq!(cart.version, 0);
    assert!(cart.lines.is_empty());
    assert!(h.store.has_cart(11));

    // A second read finds the persisted cart instead of minting another.
    let same = h.cart_service.get_cart(11).await.unwrap();
    assert_eq!(same.version, 0);
}

#[tokio::test]
async fn test_my_orders_lists_only_own_orders() {
    let h = TestHarness::new();
    h.store.stock_racket(1, 8_000, 10);

    h.cart_service.add_racket(&add_req(1, 1, 1)).await.unwrap();
    h.cart_service.add_racket(&add_req(2, 1, 2)).await.unwrap();
    h.order_command.create_order(&order_req(1)).await.unwrap();
    h.order_command.create_order(&order_req(2)).await.unwrap();

    let mine = h.order_query.find_my_orders(2).await.unwrap();
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].user_id, 2);
    assert_eq!(mine[0].total_price, 16_000);

    let nobody = h.order_query.find_my_orders(42).await.unwrap();
    assert!(nobody.is_empty());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_checkouts_never_oversell() {
    let h = TestHarness::new();
    h.store.stock_racket(1, 20_000, 3);

    // Four shoppers, three rackets on the shelf.
    for user_id in 1..=4 {
        h.cart_service
            .add_racket(&add_req(user_id, 1, 1))
            .await
            .unwrap();
    }

    let barrier = Arc::new(Barrier::new(4));
    let mut handles = Vec::new();
    for user_id in 1..=4 {
        let service = h.order_command.clone();
        let barrier = barrier.clone();
        handles.push(tokio::spawn(async move {
            barrier.wait().await;
            service.create_order(&order_req(user_id)).await
        }));
    }

    let mut fulfilled = 0;
    let mut rejected = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(order) => {
                assert_eq!(order.status, OrderStatus::InProgress);
                fulfilled += 1;
            }
            Err(ServiceError::InsufficientStock(_)) => rejected += 1,
            Err(err) => panic!("unexpected checkout error: {err}"),
        }
    }

    assert_eq!(fulfilled, 3);
    assert_eq!(rejected, 1);
    assert_eq!(h.store.racket_quantity(1), 0);
    assert_eq!(h.store.order_count(), 3);
}
