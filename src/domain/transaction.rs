use super::fee::FeeQuote;
use crate::config::SimulationConfig;
use crate::error::{GatewayError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    #[serde(default)]
    pub sku: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub price: i64,
    #[serde(default)]
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// Transaction-creation request as received from a client.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CreateTransactionRequest {
    pub method: String,
    pub merchant_ref: String,
    pub amount: i64,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    #[serde(default)]
    pub order_items: Vec<OrderItem>,
    #[serde(default)]
    pub return_url: String,
    #[serde(default)]
    pub expired_time: i64,
    /// Accepted for wire compatibility, never verified.
    #[serde(default)]
    pub signature: String,
}

impl CreateTransactionRequest {
    /// Boundary checks: required fields present and `amount >= 1`.
    pub fn validate(&self) -> Result<()> {
        let required = [
            ("method", &self.method),
            ("merchant_ref", &self.merchant_ref),
            ("customer_name", &self.customer_name),
            ("customer_email", &self.customer_email),
            ("customer_phone", &self.customer_phone),
        ];
        if let Some((field, _)) = required.iter().find(|(_, v)| v.trim().is_empty()) {
            return Err(GatewayError::ValidationError(format!("{field} is required")));
        }
        if self.amount < 1 {
            return Err(GatewayError::ValidationError(
                "amount must be at least 1".to_string(),
            ));
        }
        if !is_plausible_email(&self.customer_email) {
            return Err(GatewayError::ValidationError(
                "customer_email is not a valid email address".to_string(),
            ));
        }
        Ok(())
    }
}

fn is_plausible_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => !local.is_empty() && !domain.is_empty() && !domain.contains('@'),
        None => false,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionStatus {
    #[default]
    Unpaid,
    Paid,
}

/// Canonical state of one simulated payment.
///
/// Only `status`, `paid_at` and `updated_at` ever change, and only through
/// [`TransactionRecord::mark_paid`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransactionRecord {
    pub reference: String,
    pub merchant_ref: String,
    pub payment_method: String,
    pub payment_name: String,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub amount: i64,
    pub fee: i64,
    pub total_fee: i64,
    pub amount_received: i64,
    pub pay_code: String,
    pub status: TransactionStatus,
    pub expired_time: i64,
    pub paid_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TransactionRecord {
    pub fn new(
        reference: String,
        request: &CreateTransactionRequest,
        quote: FeeQuote,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            reference,
            merchant_ref: request.merchant_ref.clone(),
            payment_method: request.method.clone(),
            payment_name: quote.payment_name.to_string(),
            customer_name: request.customer_name.clone(),
            customer_email: request.customer_email.clone(),
            customer_phone: request.customer_phone.clone(),
            amount: request.amount,
            fee: quote.fee,
            total_fee: quote.fee,
            amount_received: quote.amount_received,
            pay_code: quote.pay_code,
            status: TransactionStatus::Unpaid,
            expired_time: request.expired_time,
            paid_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Moves an UNPAID record to PAID. Returns `false` and leaves the record
    /// untouched if it is not UNPAID.
    pub fn mark_paid(&mut self, at: DateTime<Utc>) -> bool {
        if self.status != TransactionStatus::Unpaid {
            return false;
        }
        self.status = TransactionStatus::Paid;
        self.paid_at = Some(at);
        self.updated_at = at;
        true
    }
}

/// Response view of a freshly created transaction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransactionView {
    pub reference: String,
    pub merchant_ref: String,
    pub payment_selection_type: String,
    pub payment_method: String,
    pub payment_name: String,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub callback_url: String,
    pub return_url: String,
    pub amount: i64,
    pub fee: i64,
    pub total_fee: i64,
    pub amount_received: i64,
    pub pay_code: String,
    pub pay_url: String,
    pub checkout_url: String,
    pub status: TransactionStatus,
    pub expired_time: i64,
    pub order_items: Vec<OrderItem>,
    pub paid_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TransactionView {
    pub fn new(
        record: &TransactionRecord,
        request: CreateTransactionRequest,
        config: &SimulationConfig,
    ) -> Self {
        Self {
            reference: record.reference.clone(),
            merchant_ref: record.merchant_ref.clone(),
            payment_selection_type: "static".to_string(),
            payment_method: record.payment_method.clone(),
            payment_name: record.payment_name.clone(),
            customer_name: record.customer_name.clone(),
            customer_email: record.customer_email.clone(),
            customer_phone: record.customer_phone.clone(),
            callback_url: String::new(),
            return_url: request.return_url,
            amount: record.amount,
            fee: record.fee,
            total_fee: record.total_fee,
            amount_received: record.amount_received,
            pay_code: record.pay_code.clone(),
            pay_url: config.pay_url(&record.reference),
            checkout_url: config.checkout_url(&record.reference),
            status: record.status,
            expired_time: record.expired_time,
            order_items: request.order_items,
            paid_at: record.paid_at,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

/// Time-prefixed reference with a random suffix, e.g. `T1760880000a1b2c3d4`.
pub fn generate_reference() -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    format!("T{}{}", Utc::now().timestamp(), &suffix[..8])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::fee;

    fn sample_request() -> CreateTransactionRequest {
        CreateTransactionRequest {
            method: "QRIS".to_string(),
            merchant_ref: "INV-001".to_string(),
            amount: 100_000,
            customer_name: "Budi".to_string(),
            customer_email: "budi@example.com".to_string(),
            customer_phone: "08123456789".to_string(),
            order_items: vec![],
            return_url: String::new(),
            expired_time: 0,
            signature: String::new(),
        }
    }

    #[test]
    fn test_request_deserialization_defaults_optional_fields() {
        let json = r#"{
            "method": "BRIVA",
            "merchant_ref": "INV-1",
            "amount": 50000,
            "customer_name": "Ani",
            "customer_email": "ani@example.com",
            "customer_phone": "0811"
        }"#;
        let request: CreateTransactionRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.method, "BRIVA");
        assert!(request.order_items.is_empty());
        assert_eq!(request.expired_time, 0);
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_order_item_fields_are_optional() {
        let json = r#"{
            "method": "QRIS",
            "merchant_ref": "INV-2",
            "amount": 15000,
            "customer_name": "Ani",
            "customer_email": "ani@example.com",
            "customer_phone": "0811",
            "order_items": [{"sku": "SKU-1"}, {"name": "Poster", "quantity": 2}]
        }"#;
        let request: CreateTransactionRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.order_items.len(), 2);

        let first = &request.order_items[0];
        assert_eq!(first.sku, "SKU-1");
        assert_eq!(first.name, "");
        assert_eq!(first.price, 0);
        assert_eq!(first.quantity, 0);

        let second = &request.order_items[1];
        assert_eq!(second.name, "Poster");
        assert_eq!(second.price, 0);
        assert_eq!(second.quantity, 2);
    }

    #[test]
    fn test_request_validation() {
        let mut request = sample_request();
        request.amount = 0;
        assert!(matches!(
            request.validate(),
            Err(GatewayError::ValidationError(_))
        ));

        let mut request = sample_request();
        request.merchant_ref = "  ".to_string();
        assert!(request.validate().is_err());

        let mut request = sample_request();
        request.customer_email = "not-an-email".to_string();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_new_record_is_unpaid() {
        let request = sample_request();
        let record = TransactionRecord::new(
            "T1".to_string(),
            &request,
            fee::quote(&request.method, request.amount),
            Utc::now(),
        );
        assert_eq!(record.status, TransactionStatus::Unpaid);
        assert_eq!(record.paid_at, None);
        assert_eq!(record.amount_received, record.amount - record.fee);
        assert_eq!(record.created_at, record.updated_at);
    }

    #[test]
    fn test_mark_paid_only_once() {
        let request = sample_request();
        let created = Utc::now();
        let mut record = TransactionRecord::new(
            "T1".to_string(),
            &request,
            fee::quote(&request.method, request.amount),
            created,
        );

        let paid_at = created + chrono::Duration::seconds(30);
        assert!(record.mark_paid(paid_at));
        assert_eq!(record.status, TransactionStatus::Paid);
        assert_eq!(record.paid_at, Some(paid_at));
        assert_eq!(record.updated_at, paid_at);
        assert_eq!(record.created_at, created);

        let later = paid_at + chrono::Duration::seconds(5);
        assert!(!record.mark_paid(later));
        assert_eq!(record.paid_at, Some(paid_at));
    }

    #[test]
    fn test_status_serializes_uppercase() {
        assert_eq!(
            serde_json::to_value(TransactionStatus::Unpaid).unwrap(),
            "UNPAID"
        );
        assert_eq!(serde_json::to_value(TransactionStatus::Paid).unwrap(), "PAID");
    }

    #[test]
    fn test_reference_format() {
        let reference = generate_reference();
        assert!(reference.starts_with('T'));
        assert!(reference.len() > 9);
        assert_ne!(reference, generate_reference());
    }

    #[test]
    fn test_view_carries_urls() {
        let request = sample_request();
        let record = TransactionRecord::new(
            "T42abc".to_string(),
            &request,
            fee::quote(&request.method, request.amount),
            Utc::now(),
        );
        let view = TransactionView::new(&record, request, &SimulationConfig::default());
        assert_eq!(view.pay_url, "mock://tripay.com/pay/T42abc");
        assert_eq!(view.checkout_url, "mock://tripay.com/checkout/T42abc");
        assert_eq!(view.payment_selection_type, "static");
        assert_eq!(view.status, TransactionStatus::Unpaid);
    }
}
