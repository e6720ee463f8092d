//! A client for the pay-api HTTP service.
//!
//! [`PayApiClient`] implements both remote ports of the store:
//!
//! - `GET {base}/fees/{entity_type}/{filing_type_code}` resolves fee-schedule
//!   entries; `futureEffective`, `priority` and `waiveFees` are passed as query
//!   flags when set. A `404` means the schedule has no such fee.
//! - `GET {base}/user/accounts/{account_id}/payment` returns the account's
//!   payment configuration and requires a bearer token.

use crate::domain::fee::{FeeInfo, FilingData};
use crate::domain::payment::PaymentAccountSnapshot;
use crate::domain::ports::{FeeScheduleResolver, PaymentAccountResolver};
use crate::error::{PayFeesError, Result};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::instrument;
use url::Url;

#[derive(Clone, Debug)]
pub struct PayApiClient {
    base_url: Url,
    client: Client,
    token: Option<String>,
    timeout: Option<Duration>,
}

impl PayApiClient {
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            client: Client::new(),
            token: None,
            timeout: None,
        }
    }

    pub fn try_from_str(base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url).map_err(|source| PayFeesError::UrlParse {
            context: "Invalid pay-api base URL",
            source,
        })?;
        Ok(Self::new(base_url))
    }

    /// Sends `Authorization: Bearer <token>` with every request.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| PayFeesError::Config(format!("{} cannot be a base URL", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn get(&self, url: Url) -> RequestBuilder {
        let mut request = self.client.get(url);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }
        request
    }

    /// Sends a GET request, mapping `404` to `None`.
    async fn get_json<R>(&self, url: Url, context: &'static str) -> Result<Option<R>>
    where
        R: DeserializeOwned,
    {
        let response = self
            .get(url)
            .send()
            .await
            .map_err(|source| PayFeesError::Http { context, source })?;

        match response.status() {
            StatusCode::OK => response
                .json::<R>()
                .await
                .map(Some)
                .map_err(|source| PayFeesError::Http { context, source }),
            StatusCode::NOT_FOUND => Ok(None),
            status => Err(PayFeesError::HttpStatus { context, status }),
        }
    }

    /// Fetches the fee-schedule entry described by `filing_data`.
    #[instrument(name = "pay_api.fetch_fee", skip_all, fields(
        entity_type = %filing_data.entity_type,
        filing_type_code = %filing_data.filing_type_code
    ))]
    pub async fn fee(&self, filing_data: &FilingData) -> Result<Option<FeeInfo>> {
        let mut url = self.endpoint(&[
            "fees",
            &filing_data.entity_type,
            &filing_data.filing_type_code,
        ])?;
        {
            let mut query = url.query_pairs_mut();
            for (name, flag) in [
                ("futureEffective", filing_data.future_effective),
                ("priority", filing_data.priority),
                ("waiveFees", filing_data.waive_fees),
            ] {
                if flag == Some(true) {
                    query.append_pair(name, "true");
                }
            }
        }
        if url.query() == Some("") {
            url.set_query(None);
        }

        self.get_json(url, "GET /fees").await
    }

    /// Fetches the payment configuration of `account_id`.
    #[instrument(name = "pay_api.fetch_payment_account", skip(self))]
    pub async fn payment_account(&self, account_id: u64) -> Result<PaymentAccountSnapshot> {
        if self.token.is_none() {
            return Err(PayFeesError::MissingAuthToken("fetch the payment account"));
        }
        let url = self.endpoint(&["user", "accounts", &account_id.to_string(), "payment"])?;

        self.get_json(url, "GET /user/accounts/{id}/payment")
            .await?
            .ok_or(PayFeesError::PaymentAccountNotFound(account_id))
    }
}

#[async_trait]
impl FeeScheduleResolver for PayApiClient {
    async fn fetch_fee(&self, filing_data: &FilingData) -> Result<Option<FeeInfo>> {
        self.fee(filing_data).await
    }
}

#[async_trait]
impl PaymentAccountResolver for PayApiClient {
    async fn fetch_payment_account(&self, account_id: u64) -> Result<PaymentAccountSnapshot> {
        self.payment_account(account_id).await
    }
}
