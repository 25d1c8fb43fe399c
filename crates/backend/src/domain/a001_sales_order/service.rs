use super::repository;
use anyhow::Result;
use chrono::{Duration, Utc};
use contracts::domain::a001_sales_order::aggregate::{SalesOrder, SalesOrderLine};
use uuid::Uuid;

pub async fn get_by_id(id: Uuid) -> Result<Option<SalesOrder>> {
    repository::get_by_id(id).await
}

pub async fn list_all() -> Result<Vec<SalesOrder>> {
    repository::list_all().await
}

/// Find the order a customer is asking about. The order number must
/// match exactly; the e-mail is compared case-insensitively. Returns
/// None on any mismatch so the caller cannot tell which part failed.
pub async fn lookup_order(order_number: &str, customer_email: &str) -> Result<Option<SalesOrder>> {
    let order = repository::get_by_order_number(order_number.trim()).await?;
    Ok(order.filter(|o| {
        o.customer_email
            .trim()
            .eq_ignore_ascii_case(customer_email.trim())
    }))
}

fn demo_line(sku: &str, name: &str, quantity: i32, unit_price: f64) -> SalesOrderLine {
    SalesOrderLine {
        id: Uuid::new_v4().to_string(),
        product_variant_id: Uuid::new_v4().to_string(),
        sku: sku.to_string(),
        name: name.to_string(),
        quantity,
        quantity_returned: 0,
        unit_price,
        image_url: None,
    }
}

/// Insert the demo orders, skipping numbers that already exist so the
/// endpoint can be hit repeatedly.
pub async fn insert_test_data() -> Result<()> {
    let orders = vec![
        SalesOrder::new_for_insert(
            "ORD-2025-1042".to_string(),
            "Sarah Mitchell".to_string(),
            "sarah.mitchell@example.com".to_string(),
            "DELIVERED".to_string(),
            Some(Utc::now() - Duration::days(12)),
            vec![
                demo_line("AUD-WH5-BLK", "Wireless Headphones WH-5 (Black)", 1, 349.99),
                demo_line("ACC-USBC-2M", "USB-C Cable 2m", 2, 19.99),
            ],
        ),
        SalesOrder::new_for_insert(
            "ORD-2025-1787".to_string(),
            "James Okafor".to_string(),
            "james.okafor@example.com".to_string(),
            "DELIVERED".to_string(),
            Some(Utc::now() - Duration::days(45)),
            vec![demo_line(
                "KIT-ESP-900",
                "Espresso Machine ES-900",
                1,
                589.00,
            )],
        ),
        SalesOrder::new_for_insert(
            "ORD-2025-2203".to_string(),
            "Priya Sharma".to_string(),
            "priya.sharma@example.com".to_string(),
            "PROCESSING".to_string(),
            None,
            vec![demo_line("LGT-DLX-3", "Desk Lamp DLX (Set of 3)", 3, 42.50)],
        ),
    ];

    for mut order in orders {
        if repository::get_by_order_number(&order.order_number)
            .await?
            .is_some()
        {
            continue;
        }
        order.before_write();
        repository::insert(&order).await?;
        tracing::info!("Inserted demo order {}", order.order_number);
    }

    Ok(())
}

/// Seed the demo orders on an empty database so the lookup flow can be
/// exercised without an order-management import.
pub async fn ensure_demo_orders() -> Result<()> {
    if repository::count_all().await? > 0 {
        return Ok(());
    }

    tracing::info!("Seeding demo sales orders");
    insert_test_data().await
}
