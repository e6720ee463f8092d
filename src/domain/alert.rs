use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertSeverity {
    Error,
    Warning,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AlertCategory {
    PaymentMethod,
    FeeInfo,
}

/// A user-facing notification raised by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Alert {
    pub severity: AlertSeverity,
    pub category: AlertCategory,
}

impl Alert {
    pub fn error(category: AlertCategory) -> Self {
        Self {
            severity: AlertSeverity::Error,
            category,
        }
    }

    pub fn warning(category: AlertCategory) -> Self {
        Self {
            severity: AlertSeverity::Warning,
            category,
        }
    }
}

impl fmt::Display for AlertCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlertCategory::PaymentMethod => f.write_str("PAYMENT_METHOD"),
            AlertCategory::FeeInfo => f.write_str("FEE_INFO"),
        }
    }
}
