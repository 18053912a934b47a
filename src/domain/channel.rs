use super::fee::{FeeSchedule, KNOWN_METHODS, KnownMethod, MethodCategory};
use serde::Serialize;

const ICON_BASE_URL: &str = "https://tripay.co.id/images/payment_icon";

/// Catalog entry describing one available payment method.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaymentChannel {
    pub group: String,
    pub code: String,
    pub name: String,
    #[serde(rename = "type")]
    pub r#type: MethodCategory,
    pub fee_merchant: FeeSchedule,
    pub fee_customer: FeeSchedule,
    pub total_fee: FeeSchedule,
    pub minimum_fee: i64,
    pub maximum_fee: i64,
    pub icon_url: String,
    pub active: bool,
}

impl From<&KnownMethod> for PaymentChannel {
    fn from(method: &KnownMethod) -> Self {
        let merchant = method.category.fee_schedule();
        let customer = FeeSchedule::ZERO;
        Self {
            group: method.group.to_string(),
            code: method.code.to_string(),
            name: method.name.to_string(),
            r#type: method.category,
            fee_merchant: merchant,
            fee_customer: customer,
            total_fee: FeeSchedule {
                flat: merchant.flat + customer.flat,
                percent: merchant.percent + customer.percent,
            },
            minimum_fee: 0,
            maximum_fee: 0,
            icon_url: format!("{}/{}", ICON_BASE_URL, method.icon),
            active: true,
        }
    }
}

/// Builds the static channel catalog from the recognised methods.
pub fn catalog() -> Vec<PaymentChannel> {
    KNOWN_METHODS.iter().map(PaymentChannel::from).collect()
}
