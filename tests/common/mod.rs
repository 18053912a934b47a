#![allow(dead_code)]

use mockpay::PaymentGateway;
use mockpay::config::SimulationConfig;
use mockpay::domain::behavior::FixedBehavior;
use mockpay::domain::transaction::{CreateTransactionRequest, OrderItem};
use mockpay::infrastructure::in_memory::InMemoryStore;
use std::sync::Arc;
use std::time::Duration;

pub const AUTO_PAY_DELAY: Duration = Duration::from_secs(30);

pub fn gateway(behavior: FixedBehavior) -> PaymentGateway {
    PaymentGateway::new(
        Arc::new(InMemoryStore::new()),
        Arc::new(behavior),
        SimulationConfig {
            auto_pay_delay: AUTO_PAY_DELAY,
            ..Default::default()
        },
    )
}

pub fn request(method: &str, amount: i64) -> CreateTransactionRequest {
    CreateTransactionRequest {
        method: method.to_string(),
        merchant_ref: format!("INV-{method}-{amount}"),
        amount,
        customer_name: "Siti Rahma".to_string(),
        customer_email: "siti@example.com".to_string(),
        customer_phone: "081234567890".to_string(),
        order_items: vec![OrderItem {
            sku: "TICKET-A".to_string(),
            name: "Concert ticket".to_string(),
            price: amount,
            quantity: 1,
            product_url: None,
            image_url: None,
        }],
        return_url: "https://shop.example.com/return".to_string(),
        expired_time: 1_760_000_000,
        signature: "unchecked".to_string(),
    }
}

pub fn request_json(method: &str, amount: i64) -> serde_json::Value {
    serde_json::json!({
        "method": method,
        "merchant_ref": "INV-HTTP-1",
        "amount": amount,
        "customer_name": "Siti Rahma",
        "customer_email": "siti@example.com",
        "customer_phone": "081234567890",
        "order_items": [
            { "sku": "TICKET-A", "name": "Concert ticket", "price": amount, "quantity": 1 }
        ],
        "return_url": "https://shop.example.com/return",
        "expired_time": 1760000000,
        "signature": "unchecked"
    })
}
