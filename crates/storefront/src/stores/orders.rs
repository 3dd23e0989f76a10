//! Order history.
//!
//! An append-only log of placed orders, most recent first. Orders snapshot
//! the cart lines and address at placement and are never edited or deleted
//! afterwards.

use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use shopkart_core::{Address, OrderId, OrderStatus, UserId};

use crate::storage::{Storage, slots};
use crate::stores::cart::CartLine;
use crate::stores::session::User;

/// Owner id recorded when an order is placed without a session.
pub const GUEST_USER_ID: &str = "guest";

/// A placed order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub user_id: UserId,
    /// Cart lines as they were at placement.
    pub lines: Vec<CartLine>,
    pub total_amount: Decimal,
    pub address: Address,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub estimated_delivery: DateTime<Utc>,
}

/// Durable order log.
pub struct OrderStore {
    storage: Storage,
    orders: Vec<Order>,
}

impl OrderStore {
    /// Re-hydrate the order log from durable storage.
    #[must_use]
    pub fn open(storage: Storage) -> Self {
        let orders = storage.load(slots::ORDER_LIST).unwrap_or_default();
        Self { storage, orders }
    }

    /// All orders, most recent first.
    #[must_use]
    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    /// Place a new order.
    ///
    /// The order id combines the placement time with a random suffix, which
    /// keeps ids unique within a session. Status always starts at
    /// [`OrderStatus::Placed`]; the estimated delivery lands 3 to 7 days
    /// (inclusive) after placement. The new order is prepended and the full
    /// log persisted before returning.
    pub fn create_order(
        &mut self,
        lines: &[CartLine],
        address: Address,
        total_amount: Decimal,
        user: Option<&User>,
    ) -> Order {
        let now = Utc::now();
        let mut rng = rand::rng();

        let order = Order {
            id: generate_order_id(now, &mut rng),
            user_id: user.map_or_else(|| UserId::new(GUEST_USER_ID), |u| u.id.clone()),
            lines: lines.to_vec(),
            total_amount,
            address,
            status: OrderStatus::Placed,
            created_at: now,
            updated_at: now,
            estimated_delivery: now + Duration::days(rng.random_range(3..=7)),
        };

        self.orders.insert(0, order.clone());
        self.storage.save(slots::ORDER_LIST, &self.orders);

        tracing::info!(order_id = %order.id, total = %order.total_amount, "order placed");
        order
    }

    /// Look up an order by id.
    #[must_use]
    pub fn get(&self, id: &OrderId) -> Option<&Order> {
        self.orders.iter().find(|order| order.id == *id)
    }

    /// Orders belonging to the given session user, most recent first.
    ///
    /// Without a session there is nothing to show: the result is empty,
    /// guest orders stay reachable only by id.
    #[must_use]
    pub fn user_orders(&self, user: Option<&User>) -> Vec<&Order> {
        user.map_or_else(Vec::new, |u| {
            self.orders
                .iter()
                .filter(|order| order.user_id == u.id)
                .collect()
        })
    }
}

/// Order id: `ORD` + placement millis in base 36 + 4 random characters,
/// all uppercase.
fn generate_order_id(now: DateTime<Utc>, rng: &mut impl Rng) -> OrderId {
    let suffix: String = (0..4)
        .map(|_| char::from(rng.sample(rand::distr::Alphanumeric)).to_ascii_uppercase())
        .collect();
    OrderId::new(format!("ORD{}{suffix}", to_base36_upper(now.timestamp_millis())))
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_base36_upper(mut value: i64) -> String {
    if value <= 0 {
        return "0".to_owned();
    }

    let mut digits = Vec::new();
    while value > 0 {
        let digit = char::from_digit((value % 36) as u32, 36).unwrap_or('0');
        digits.push(digit.to_ascii_uppercase());
        value /= 36;
    }
    digits.iter().rev().collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    use shopkart_core::{Email, ProductId};

    use crate::catalog::Product;

    fn product(id: &str, discounted_price: i64) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("Product {id}"),
            brand: "Acme".to_owned(),
            category: "general".to_owned(),
            subcategory: "misc".to_owned(),
            price: Decimal::from(discounted_price + 20),
            discounted_price: Decimal::from(discounted_price),
            discount_percentage: 0,
            rating: 4.0,
            review_count: 3,
            in_stock: true,
            image: String::new(),
            description: String::new(),
        }
    }

    fn lines() -> Vec<CartLine> {
        vec![CartLine {
            product: product("a", 80),
            quantity: 2,
        }]
    }

    fn address() -> Address {
        Address {
            name: "Asha Rao".to_owned(),
            phone: "9876543210".to_owned(),
            address_line1: "12 MG Road".to_owned(),
            address_line2: None,
            city: "Bengaluru".to_owned(),
            state: "Karnataka".to_owned(),
            pincode: "560001".to_owned(),
        }
    }

    fn user() -> User {
        User {
            id: UserId::new("user_1"),
            name: "Asha".to_owned(),
            email: Email::parse("asha@example.com").unwrap(),
        }
    }

    #[test]
    fn test_create_order_scenario() {
        let mut orders = OrderStore::open(Storage::memory());
        let user = user();
        let order = orders.create_order(&lines(), address(), Decimal::from(160), Some(&user));

        assert_eq!(order.status, OrderStatus::Placed);
        assert_eq!(order.total_amount, Decimal::from(160));
        assert_eq!(order.user_id, user.id);
        assert_eq!(order.created_at, order.updated_at);

        let earliest = order.created_at + Duration::days(3);
        let latest = order.created_at + Duration::days(7);
        assert!(order.estimated_delivery >= earliest);
        assert!(order.estimated_delivery <= latest);

        // The new order leads the owner's history.
        let history = orders.user_orders(Some(&user));
        assert_eq!(history.first().map(|o| &o.id), Some(&order.id));
    }

    #[test]
    fn test_orders_are_most_recent_first() {
        let mut orders = OrderStore::open(Storage::memory());
        let user = user();
        let first = orders.create_order(&lines(), address(), Decimal::from(160), Some(&user));
        let second = orders.create_order(&lines(), address(), Decimal::from(160), Some(&user));

        let all: Vec<&OrderId> = orders.orders().iter().map(|o| &o.id).collect();
        assert_eq!(all, [&second.id, &first.id]);
    }

    #[test]
    fn test_order_ids_are_unique() {
        let mut orders = OrderStore::open(Storage::memory());
        let a = orders.create_order(&lines(), address(), Decimal::from(160), None);
        let b = orders.create_order(&lines(), address(), Decimal::from(160), None);

        assert_ne!(a.id, b.id);
        assert!(a.id.as_str().starts_with("ORD"));
    }

    #[test]
    fn test_guest_orders_have_guest_owner() {
        let mut orders = OrderStore::open(Storage::memory());
        let order = orders.create_order(&lines(), address(), Decimal::from(160), None);

        assert_eq!(order.user_id.as_str(), GUEST_USER_ID);
        // Reachable by id, but no session means no history.
        assert!(orders.get(&order.id).is_some());
        assert!(orders.user_orders(None).is_empty());
    }

    #[test]
    fn test_user_orders_filters_by_owner() {
        let mut orders = OrderStore::open(Storage::memory());
        let asha = user();
        let ravi = User {
            id: UserId::new("user_2"),
            name: "Ravi".to_owned(),
            email: Email::parse("ravi@example.com").unwrap(),
        };

        orders.create_order(&lines(), address(), Decimal::from(160), Some(&asha));
        orders.create_order(&lines(), address(), Decimal::from(50), Some(&ravi));

        let asha_orders = orders.user_orders(Some(&asha));
        assert_eq!(asha_orders.len(), 1);
        assert!(asha_orders.iter().all(|o| o.user_id == asha.id));
    }

    #[test]
    fn test_get_unknown_id_is_absent() {
        let orders = OrderStore::open(Storage::memory());
        assert!(orders.get(&OrderId::new("ORDNOPE")).is_none());
    }

    #[test]
    fn test_orders_survive_reopen_with_timestamps() {
        let storage = Storage::memory();
        let mut orders = OrderStore::open(storage.clone());
        let order = orders.create_order(&lines(), address(), Decimal::from(160), None);
        drop(orders);

        let reopened = OrderStore::open(storage);
        let restored = reopened.get(&order.id).unwrap();
        assert_eq!(*restored, order);
        assert_eq!(restored.created_at, order.created_at);
        assert_eq!(restored.estimated_delivery, order.estimated_delivery);
    }

    #[test]
    fn test_base36_encoding() {
        assert_eq!(to_base36_upper(0), "0");
        assert_eq!(to_base36_upper(35), "Z");
        assert_eq!(to_base36_upper(36), "10");
        assert_eq!(to_base36_upper(36 * 36 + 1), "101");
    }
}
