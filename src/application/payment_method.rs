use super::pay_fees::PayFeesStore;
use crate::domain::alert::{Alert, AlertCategory};
use crate::domain::payment::{PaymentAccountSnapshot, PaymentMethod, SelectorState};
use crate::error::PayFeesError;
use tracing::{debug, error, info, warn};

impl PayFeesStore {
    /// Drops the cached account snapshot and restores the default options.
    pub async fn reset_payment_options(&self) {
        self.payment.write().await.reset();
    }

    /// Fetches the account's payment configuration and derives the selectable
    /// payment methods from it.
    ///
    /// On failure the options stay at their reset values and a PAYMENT_METHOD
    /// alert is raised. A result arriving after another reset or init is ignored.
    pub async fn init_payment_method(&self) {
        let generation = self.payment.write().await.begin_init();

        let fetched = match self.account_id {
            Some(account_id) => self
                .payment_accounts
                .fetch_payment_account(account_id)
                .await
                .map(|snapshot| (account_id, snapshot)),
            None => Err(PayFeesError::Config("no account selected".to_string())),
        };

        let mut payment = self.payment.write().await;
        match fetched {
            Ok((account_id, snapshot)) => {
                let status = snapshot.status();
                if payment.apply_snapshot(generation, snapshot) {
                    info!(
                        account_id,
                        ?status,
                        selected = ?payment.user_selected_payment_method,
                        "payment method initialized"
                    );
                } else {
                    debug!(
                        account_id,
                        "payment options changed during fetch, dropping snapshot"
                    );
                }
            }
            Err(e) => {
                error!("failed to load payment account: {e}");
                if payment.fail(generation) {
                    drop(payment);
                    self.alerts
                        .add_alert(Alert::error(AlertCategory::PaymentMethod));
                }
            }
        }
    }

    /// Changes the user's payment method.
    ///
    /// Methods outside the allowed list are ignored once the account is
    /// loaded. While the account's PAD activation is pending only DIRECT_PAY
    /// may be selected; other choices are reverted and reported with a single
    /// PAYMENT_METHOD alert.
    pub async fn set_user_selected_payment_method(&self, method: PaymentMethod) {
        let alert = {
            let mut payment = self.payment.write().await;
            if !payment.is_selectable(method) {
                warn!(?method, "payment method not offered for this account");
                return;
            }
            payment.select(method)
        };
        if let Some(alert) = alert {
            info!(?method, "PAD activation pending, reverting to DIRECT_PAY");
            self.alerts.add_alert(alert);
        }
    }

    pub async fn user_payment_account(&self) -> Option<PaymentAccountSnapshot> {
        self.payment.read().await.user_payment_account.clone()
    }

    pub async fn user_selected_payment_method(&self) -> PaymentMethod {
        self.payment.read().await.user_selected_payment_method
    }

    pub async fn allowed_payment_methods(&self) -> Vec<PaymentMethod> {
        self.payment.read().await.allowed_payment_methods.clone()
    }

    pub async fn allow_alternate_payment_method(&self) -> bool {
        self.payment.read().await.allow_alternate_payment_method
    }

    pub async fn payment_state(&self) -> SelectorState {
        self.payment.read().await.state
    }
}
