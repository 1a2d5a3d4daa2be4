//! Status and classification enums shared by the payment and catalog APIs.
//!
//! Every enum serializes as the backend's snake_case string and exposes
//! `as_str()` for use in query strings.

use serde::{Deserialize, Serialize};

/// Implements `Display` by delegating to the type's `as_str()`.
macro_rules! display_as_str {
    ($($name:ident),+ $(,)?) => {
        $(
            impl std::fmt::Display for $name {
                fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                    f.write_str(self.as_str())
                }
            }
        )+
    };
}

/// Lifecycle state of a payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    #[default]
    Pending,
    Processing,
    Completed,
    Failed,
    Cancelled,
    Refunded,
}

impl PaymentStatus {
    /// Wire representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Processing => "processing",
            Self::Completed => "completed",
            Self::Failed => "failed",
            Self::Cancelled => "cancelled",
            Self::Refunded => "refunded",
        }
    }

    /// Whether the payment can no longer change state on its own.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::Completed | Self::Failed | Self::Cancelled | Self::Refunded
        )
    }
}

/// Lifecycle state of a refund.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RefundStatus {
    #[default]
    Pending,
    Processing,
    Completed,
    Failed,
}

impl RefundStatus {
    /// Wire representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Processing => "processing",
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }
}

/// Method a payment was made with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethodKind {
    CreditCard,
    DebitCard,
    BankTransfer,
    Paypal,
    Stripe,
}

impl PaymentMethodKind {
    /// Wire representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::CreditCard => "credit_card",
            Self::DebitCard => "debit_card",
            Self::BankTransfer => "bank_transfer",
            Self::Paypal => "paypal",
            Self::Stripe => "stripe",
        }
    }
}

/// Kind of instrument saved as a payment method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethodType {
    CreditCard,
    DebitCard,
    BankAccount,
}

impl PaymentMethodType {
    /// Wire representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::CreditCard => "credit_card",
            Self::DebitCard => "debit_card",
            Self::BankAccount => "bank_account",
        }
    }
}

/// Aggregation window for admin payment analytics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum StatsPeriod {
    Daily,
    Weekly,
    #[default]
    Monthly,
    Yearly,
}

impl StatsPeriod {
    /// Wire representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
        }
    }
}

impl std::str::FromStr for StatsPeriod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "daily" => Ok(Self::Daily),
            "weekly" => Ok(Self::Weekly),
            "monthly" => Ok(Self::Monthly),
            "yearly" => Ok(Self::Yearly),
            _ => Err(format!("invalid stats period: {s}")),
        }
    }
}

/// Sort key accepted by catalog listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortBy {
    Name,
    Price,
    CreatedAt,
    UpdatedAt,
}

impl SortBy {
    /// Wire representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Price => "price",
            Self::CreatedAt => "created_at",
            Self::UpdatedAt => "updated_at",
        }
    }
}

impl std::str::FromStr for SortBy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(Self::Name),
            "price" => Ok(Self::Price),
            "created_at" => Ok(Self::CreatedAt),
            "updated_at" => Ok(Self::UpdatedAt),
            _ => Err(format!("invalid sort key: {s}")),
        }
    }
}

/// Sort direction accepted by catalog listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    /// Wire representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

impl std::str::FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            _ => Err(format!("invalid sort order: {s}")),
        }
    }
}

display_as_str!(
    PaymentStatus,
    RefundStatus,
    PaymentMethodKind,
    PaymentMethodType,
    StatsPeriod,
    SortBy,
    SortOrder,
);

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_as_str_matches_serde() {
        let json = serde_json::to_string(&PaymentStatus::Cancelled).unwrap();
        assert_eq!(json, format!("\"{}\"", PaymentStatus::Cancelled.as_str()));

        let json = serde_json::to_string(&PaymentMethodKind::BankTransfer).unwrap();
        assert_eq!(json, "\"bank_transfer\"");

        let json = serde_json::to_string(&SortBy::CreatedAt).unwrap();
        assert_eq!(json, "\"created_at\"");
    }

    #[test]
    fn test_terminal_payment_states() {
        assert!(!PaymentStatus::Pending.is_terminal());
        assert!(!PaymentStatus::Processing.is_terminal());
        assert!(PaymentStatus::Completed.is_terminal());
        assert!(PaymentStatus::Refunded.is_terminal());
    }

    #[test]
    fn test_stats_period_defaults_to_monthly() {
        assert_eq!(StatsPeriod::default(), StatsPeriod::Monthly);
        assert_eq!("weekly".parse::<StatsPeriod>().unwrap(), StatsPeriod::Weekly);
        assert!("hourly".parse::<StatsPeriod>().is_err());
    }

    #[test]
    fn test_display_uses_wire_names() {
        assert_eq!(RefundStatus::Processing.to_string(), "processing");
        assert_eq!(PaymentMethodType::BankAccount.to_string(), "bank_account");
        assert_eq!(SortOrder::Desc.to_string(), "desc");
    }

    #[test]
    fn test_sort_options_parse_wire_names() {
        assert_eq!("created_at".parse::<SortBy>().unwrap(), SortBy::CreatedAt);
        assert_eq!("price".parse::<SortBy>().unwrap(), SortBy::Price);
        assert_eq!(
            "popularity".parse::<SortBy>().unwrap_err(),
            "invalid sort key: popularity"
        );
        assert_eq!("desc".parse::<SortOrder>().unwrap(), SortOrder::Desc);
        assert!("DESC".parse::<SortOrder>().is_err());
        for key in [SortBy::Name, SortBy::Price, SortBy::CreatedAt, SortBy::UpdatedAt] {
            assert_eq!(key.as_str().parse::<SortBy>().unwrap(), key);
        }
    }
}
