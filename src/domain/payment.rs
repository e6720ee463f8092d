use super::alert::{Alert, AlertCategory};
use serde::{Deserialize, Deserializer, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    DirectPay,
    Pad,
}

impl FromStr for PaymentMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "DIRECT_PAY" => Ok(Self::DirectPay),
            "PAD" => Ok(Self::Pad),
            other => Err(format!("unsupported payment method {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    Pending,
    PendingPadActivation,
    Active,
}

impl PaymentStatus {
    /// PAD is not usable until the account leaves these states.
    pub fn is_pending(self) -> bool {
        matches!(self, Self::Pending | Self::PendingPadActivation)
    }
}

impl FromStr for PaymentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(Self::Pending),
            "PENDING_PAD_ACTIVATION" => Ok(Self::PendingPadActivation),
            "ACTIVE" => Ok(Self::Active),
            other => Err(format!("unsupported payment status {other}")),
        }
    }
}

/// Values outside the closed set come back as `None` instead of failing the
/// whole snapshot.
fn deserialize_lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|value| value.parse().ok()))
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CfsAccount {
    #[serde(default, deserialize_with = "deserialize_lenient")]
    pub status: Option<PaymentStatus>,
    #[serde(default)]
    pub bank_account_number: Option<String>,
    #[serde(default)]
    pub bank_institution_number: Option<String>,
    #[serde(default)]
    pub bank_transit_number: Option<String>,
}

/// The account's payment configuration as reported by the payment service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentAccountSnapshot {
    #[serde(default)]
    pub account_id: Option<u64>,
    #[serde(default, deserialize_with = "deserialize_lenient")]
    pub payment_method: Option<PaymentMethod>,
    #[serde(default)]
    pub cfs_account: Option<CfsAccount>,
}

impl PaymentAccountSnapshot {
    pub fn status(&self) -> Option<PaymentStatus> {
        self.cfs_account.as_ref().and_then(|cfs| cfs.status)
    }

    pub fn is_pad_pending(&self) -> bool {
        self.status().is_some_and(PaymentStatus::is_pending)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectorState {
    #[default]
    Uninitialized,
    Initializing,
    Ready,
    Failed,
}

/// Payment options offered to the user for the current account.
///
/// Every reset bumps `generation`; a fetch started under an older generation
/// must not be applied.
#[derive(Debug, Clone)]
pub struct PaymentOptions {
    pub user_payment_account: Option<PaymentAccountSnapshot>,
    pub user_selected_payment_method: PaymentMethod,
    pub allowed_payment_methods: Vec<PaymentMethod>,
    pub allow_alternate_payment_method: bool,
    pub state: SelectorState,
    generation: u64,
}

impl Default for PaymentOptions {
    fn default() -> Self {
        Self {
            user_payment_account: None,
            user_selected_payment_method: PaymentMethod::Pad,
            allowed_payment_methods: Vec::new(),
            allow_alternate_payment_method: false,
            state: SelectorState::Uninitialized,
            generation: 0,
        }
    }
}

impl PaymentOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        *self = Self {
            generation: self.generation + 1,
            ..Self::default()
        };
    }

    /// Resets and enters `Initializing`; returns the generation the fetch belongs to.
    pub fn begin_init(&mut self) -> u64 {
        self.reset();
        self.state = SelectorState::Initializing;
        self.generation
    }

    /// Applies a fetched snapshot. Returns false if the fetch is stale.
    pub fn apply_snapshot(&mut self, generation: u64, snapshot: PaymentAccountSnapshot) -> bool {
        if generation != self.generation {
            return false;
        }

        let mut default_method = snapshot.payment_method.unwrap_or(PaymentMethod::DirectPay);
        let mut allowed = vec![default_method];
        if default_method != PaymentMethod::DirectPay {
            allowed.push(PaymentMethod::DirectPay);
        }
        if snapshot.is_pad_pending() {
            default_method = PaymentMethod::DirectPay;
        }

        self.user_payment_account = Some(snapshot);
        self.user_selected_payment_method = default_method;
        self.allowed_payment_methods = allowed;
        self.allow_alternate_payment_method = true;
        self.state = SelectorState::Ready;
        true
    }

    /// Marks the fetch as failed. Returns false if the fetch is stale.
    pub fn fail(&mut self, generation: u64) -> bool {
        if generation != self.generation {
            return false;
        }
        self.state = SelectorState::Failed;
        true
    }

    /// Whether `method` may be selected. Before an account is loaded any
    /// method is accepted.
    pub fn is_selectable(&self, method: PaymentMethod) -> bool {
        self.state != SelectorState::Ready || self.allowed_payment_methods.contains(&method)
    }

    /// Changes the selection and enforces the allowed list and the
    /// pending-PAD rule.
    ///
    /// Assigning the current value does nothing. Selecting anything other
    /// than DIRECT_PAY while PAD activation is pending is reverted and
    /// reported through the returned alert.
    pub fn select(&mut self, method: PaymentMethod) -> Option<Alert> {
        if method == self.user_selected_payment_method || !self.is_selectable(method) {
            return None;
        }
        self.user_selected_payment_method = method;

        let pending = self
            .user_payment_account
            .as_ref()
            .is_some_and(PaymentAccountSnapshot::is_pad_pending);
        if pending && method != PaymentMethod::DirectPay {
            self.user_selected_payment_method = PaymentMethod::DirectPay;
            return Some(Alert::warning(AlertCategory::PaymentMethod));
        }
        None
    }
}
