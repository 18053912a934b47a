use rand::Rng;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal_macros::dec;
use serde::Serialize;

/// Groups payment methods that share a fee schedule and pay-code format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MethodCategory {
    QrCode,
    VirtualAccount,
    ConvenienceStore,
    Other,
}

/// A fee made of a flat part plus a percentage of the amount.
///
/// `percent` is expressed in percent, so `0.7` means 0.7% of the amount.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FeeSchedule {
    pub flat: i64,
    pub percent: Decimal,
}

impl FeeSchedule {
    pub const ZERO: Self = Self::flat(0);

    pub const fn flat(flat: i64) -> Self {
        Self {
            flat,
            percent: Decimal::ZERO,
        }
    }

    pub const fn percent(percent: Decimal) -> Self {
        Self { flat: 0, percent }
    }

    /// Fee in minor units; the percentage part is rounded down.
    pub fn fee_for(&self, amount: i64) -> i64 {
        let variable = (Decimal::from(amount) * self.percent / dec!(100)).floor();
        self.flat + variable.to_i64().unwrap_or_default()
    }
}

impl MethodCategory {
    pub fn of(code: &str) -> Self {
        known_method(code).map_or(MethodCategory::Other, |m| m.category)
    }

    pub fn fee_schedule(self) -> FeeSchedule {
        match self {
            MethodCategory::QrCode => FeeSchedule::percent(dec!(0.7)),
            MethodCategory::VirtualAccount => FeeSchedule::flat(4000),
            MethodCategory::ConvenienceStore => FeeSchedule::flat(2500),
            MethodCategory::Other => FeeSchedule::percent(dec!(1)),
        }
    }

    /// Number of digits in the pay code, `0` when the category has none.
    pub fn pay_code_digits(self) -> u32 {
        match self {
            MethodCategory::QrCode => 0,
            MethodCategory::VirtualAccount => 10,
            MethodCategory::ConvenienceStore => 9,
            MethodCategory::Other => 4,
        }
    }

    /// Random numeric pay code with no leading zero.
    pub fn generate_pay_code(self) -> String {
        let digits = self.pay_code_digits();
        if digits == 0 {
            return String::new();
        }
        let low = 10u64.pow(digits - 1);
        let high = 10u64.pow(digits);
        rand::thread_rng().gen_range(low..high).to_string()
    }
}

/// Static description of a payment method the gateway recognises.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KnownMethod {
    pub code: &'static str,
    pub name: &'static str,
    pub group: &'static str,
    pub category: MethodCategory,
    pub icon: &'static str,
}

pub static KNOWN_METHODS: [KnownMethod; 6] = [
    KnownMethod {
        code: "BRIVA",
        name: "BRI Virtual Account",
        group: "Virtual Account",
        category: MethodCategory::VirtualAccount,
        icon: "bri.png",
    },
    KnownMethod {
        code: "BCAVA",
        name: "BCA Virtual Account",
        group: "Virtual Account",
        category: MethodCategory::VirtualAccount,
        icon: "bca.png",
    },
    KnownMethod {
        code: "MANDIRIVA",
        name: "Mandiri Virtual Account",
        group: "Virtual Account",
        category: MethodCategory::VirtualAccount,
        icon: "mandiri.png",
    },
    KnownMethod {
        code: "QRIS",
        name: "QRIS",
        group: "E-Wallet",
        category: MethodCategory::QrCode,
        icon: "qris.png",
    },
    KnownMethod {
        code: "ALFAMART",
        name: "Alfamart",
        group: "Convenience Store",
        category: MethodCategory::ConvenienceStore,
        icon: "alfamart.png",
    },
    KnownMethod {
        code: "INDOMARET",
        name: "Indomaret",
        group: "Convenience Store",
        category: MethodCategory::ConvenienceStore,
        icon: "indomaret.png",
    },
];

pub const UNKNOWN_METHOD_NAME: &str = "Unknown Payment Method";

pub fn known_method(code: &str) -> Option<&'static KnownMethod> {
    KNOWN_METHODS.iter().find(|m| m.code == code)
}

pub fn payment_name(code: &str) -> &'static str {
    known_method(code).map_or(UNKNOWN_METHOD_NAME, |m| m.name)
}

/// Fee, net amount, pay code and display name for one transaction.
#[derive(Debug, Clone, PartialEq)]
pub struct FeeQuote {
    pub fee: i64,
    pub amount_received: i64,
    pub pay_code: String,
    pub payment_name: &'static str,
}

/// Prices a transaction. Unknown method codes fall back to the default rules.
pub fn quote(code: &str, amount: i64) -> FeeQuote {
    let category = MethodCategory::of(code);
    let fee = category.fee_schedule().fee_for(amount);
    FeeQuote {
        fee,
        amount_received: amount - fee,
        pay_code: category.generate_pay_code(),
        payment_name: payment_name(code),
    }
}
