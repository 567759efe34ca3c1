//! Orders.
//!
//! Orders are listed newest first. Only status and tracking URL change after
//! an order is placed.

pub mod model;

use bazaar_db::{ChangePublisher, Db};
use chrono::Utc;
use model::{Order, OrderInput, OrderUpdate};

use crate::error::{BazaarError, BazaarResult};
use crate::write::{self, fetch, new_id, required};

const LABEL: &str = "Order";
const MISSING: &str = "Required fields are missing.";

pub async fn list_orders(db: &Db) -> BazaarResult<Vec<Order>> {
    let mut orders: Vec<Order> = db.list().await?;
    orders.reverse();
    Ok(orders)
}

pub async fn list_orders_by_user(db: &Db, user_id: &str) -> BazaarResult<Vec<Order>> {
    let mut orders = list_orders(db).await?;
    orders.retain(|o| o.user_id == user_id);
    Ok(orders)
}

pub async fn get_order(db: &Db, id: &str) -> BazaarResult<Order> {
    fetch(db, id, LABEL).await
}

pub async fn create_order(
    db: &Db,
    events: &dyn ChangePublisher,
    input: OrderInput,
) -> BazaarResult<Order> {
    let user_id = required(input.user_id, MISSING)?;
    let items = match input.items {
        Some(items) if !items.is_empty() => items,
        _ => return Err(BazaarError::validation(MISSING)),
    };
    let total_price = match input.total_price {
        Some(p) if p.is_finite() && p >= 0.0 => p,
        Some(_) => return Err(BazaarError::validation("Total price must be a non-negative number.")),
        None => return Err(BazaarError::validation(MISSING)),
    };
    let shipping_address = input
        .shipping_address
        .ok_or_else(|| BazaarError::validation(MISSING))?;
    let payment_method = input
        .payment_method
        .ok_or_else(|| BazaarError::validation(MISSING))?;
    let order_total = input
        .order_total
        .ok_or_else(|| BazaarError::validation(MISSING))?;

    let now = Utc::now();
    let order = Order {
        id: new_id(),
        user_id,
        order_date: now,
        order_status: input.order_status.unwrap_or_default(),
        items,
        total_price,
        shipping_address,
        payment_method,
        coupon_code: input.coupon_code,
        order_total,
        tracking_url: input.tracking_url,
        created_at: now,
        updated_at: now,
    };
    write::insert_and_publish(db, events, &order).await?;
    Ok(order)
}

pub async fn update_order(
    db: &Db,
    events: &dyn ChangePublisher,
    id: &str,
    update: OrderUpdate,
) -> BazaarResult<Order> {
    let status = update
        .order_status
        .ok_or_else(|| BazaarError::validation("Order Status required."))?;
    let mut order: Order = fetch(db, id, LABEL).await?;
    order.order_status = status;
    if update.tracking_url.is_some() {
        order.tracking_url = update.tracking_url;
    }
    order.updated_at = Utc::now();

    write::replace_and_publish(db, events, &order, LABEL).await?;
    Ok(order)
}

pub async fn delete_order(db: &Db, events: &dyn ChangePublisher, id: &str) -> BazaarResult<()> {
    write::remove_and_publish::<Order>(db, events, id, LABEL).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use bazaar_db::{ChangeAction, EntityType, RecordingPublisher};
    use model::{OrderItem, OrderStatus, OrderTotal, PaymentMethod, ShippingAddress};

    fn order_for(user: &str) -> OrderInput {
        OrderInput {
            user_id: Some(user.to_string()),
            items: Some(vec![OrderItem {
                product_id: "p1".into(),
                product_name: "Rake".into(),
                quantity: 2,
                price: 12.5,
                variant: None,
            }]),
            total_price: Some(25.0),
            shipping_address: Some(ShippingAddress {
                phone: Some("555".into()),
                street: Some("1 Main".into()),
                city: Some("Springfield".into()),
                state: None,
                postal_code: Some("12345".into()),
                country: Some("US".into()),
            }),
            payment_method: Some(PaymentMethod::CashOnDelivery),
            order_total: Some(OrderTotal {
                subtotal: 25.0,
                discount: 0.0,
                total: 25.0,
            }),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_create_defaults_to_pending() {
        let db = Db::in_memory();
        let events = RecordingPublisher::new();
        let order = create_order(&db, &events, order_for("u1")).await.unwrap();

        assert_eq!(order.order_status, OrderStatus::Pending);
        let published = events.events();
        assert_eq!(published[0].entity(), EntityType::Order);
        assert_eq!(published[0].data()["userID"], "u1");
        assert_eq!(published[0].data()["paymentMethod"], "cod");
    }

    #[tokio::test]
    async fn test_create_requires_items() {
        let db = Db::in_memory();
        let events = RecordingPublisher::new();
        let mut input = order_for("u1");
        input.items = Some(Vec::new());

        let err = create_order(&db, &events, input).await.unwrap_err();
        assert_eq!(err.to_string(), MISSING);
    }

    #[tokio::test]
    async fn test_listing_is_newest_first_and_filters_by_user() {
        let db = Db::in_memory();
        let events = RecordingPublisher::new();
        let first = create_order(&db, &events, order_for("u1")).await.unwrap();
        let second = create_order(&db, &events, order_for("u2")).await.unwrap();
        let third = create_order(&db, &events, order_for("u1")).await.unwrap();

        let all = list_orders(&db).await.unwrap();
        let ids: Vec<&str> = all.iter().map(|o| o.id.as_str()).collect();
        assert_eq!(ids, vec![third.id.as_str(), second.id.as_str(), first.id.as_str()]);

        let mine = list_orders_by_user(&db, "u1").await.unwrap();
        assert_eq!(mine.len(), 2);
        assert_eq!(mine[0].id, third.id);
    }

    #[tokio::test]
    async fn test_update_status_keeps_items() {
        let db = Db::in_memory();
        let events = RecordingPublisher::new();
        let order = create_order(&db, &events, order_for("u1")).await.unwrap();

        let updated = update_order(
            &db,
            &events,
            &order.id,
            OrderUpdate {
                order_status: Some(OrderStatus::Shipped),
                tracking_url: Some("http://track/1".into()),
            },
        )
        .await
        .unwrap();

        assert_eq!(updated.order_status, OrderStatus::Shipped);
        assert_eq!(updated.items, order.items);
        assert_eq!(events.events()[1].action(), ChangeAction::Updated);

        let err = update_order(&db, &events, &order.id, OrderUpdate::default())
            .await
            .unwrap_err();
        assert!(matches!(err, BazaarError::Validation(_)));
    }
}
