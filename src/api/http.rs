//! HTTP implementation of the [`Api`] port over `reqwest`.
//!
//! Every request carries the currently stored credential (if any) as
//! `Authorization: token <value>`. The credential is read from the shared
//! [`CredentialStore`] at request-construction time, so a login or logout
//! takes effect before the next request goes out.

use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::debug;

use super::types::{LoginRequest, LoginResponse, TopUpRequest};
use super::Api;
use crate::domain::{
    Advice, AssetDetail, ExpensesStatistics, InvestmentOrder, Portfolio, RiskAmountQuery,
    Transaction, User, WalletId, WalletSummary,
};
use crate::error::{ApiError, ApiResult};
use crate::session::CredentialStore;

/// Shared HTTP adapter for the fulfillment API.
///
/// One instance per running application; cheap to clone via the `Arc`s it
/// holds internally if callers need it, but normally passed around as
/// `Arc<dyn Api>`.
pub struct HttpApi {
    client: Client,
    base_url: String,
    credentials: Arc<CredentialStore>,
}

impl HttpApi {
    /// Create an adapter for `base_url`, e.g. `http://localhost:8000/api/v1`.
    #[must_use]
    pub fn new(base_url: &str, credentials: Arc<CredentialStore>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            credentials,
        }
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self.client.request(method, url);
        if let Some(token) = self.credentials.get() {
            request = request.header(AUTHORIZATION, auth_header_value(&token));
        }
        request
    }

    async fn send(&self, request: RequestBuilder) -> ApiResult<Response> {
        let response = request.send().await?;
        check_status(response).await
    }
}

/// Format a bearer token the way the API expects it in `Authorization`.
pub(crate) fn auth_header_value(token: &str) -> String {
    format!("token {token}")
}

/// Map non-success statuses into the adapter taxonomy, consuming the body
/// as the server-side message.
async fn check_status(response: Response) -> ApiResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = response.text().await.unwrap_or_default();
    debug!(status = %status, message = %message, "API request failed");
    Err(ApiError::from_status(status.as_u16(), message))
}

#[async_trait]
impl Api for HttpApi {
    async fn login(&self, request: &LoginRequest) -> ApiResult<LoginResponse> {
        debug!(username = %request.username, "Logging in");
        let response = self
            .send(self.request(Method::POST, "/auth/login/").json(request))
            .await?;
        Ok(response.json().await?)
    }

    async fn logout(&self) -> ApiResult<()> {
        self.send(self.request(Method::GET, "/auth/logout/")).await?;
        Ok(())
    }

    async fn current_user(&self) -> ApiResult<User> {
        let response = self.send(self.request(Method::GET, "/auth/user/")).await?;
        Ok(response.json().await?)
    }

    async fn wallets(&self) -> ApiResult<Vec<WalletSummary>> {
        let response = self.send(self.request(Method::GET, "/wallets/")).await?;
        let wallets: Vec<WalletSummary> = response.json().await?;
        debug!(count = wallets.len(), "Fetched wallets");
        Ok(wallets)
    }

    async fn wallet_transactions(&self, wallet: &WalletId) -> ApiResult<Vec<Transaction>> {
        let path = format!("/wallets/{wallet}/transactions/");
        let response = self.send(self.request(Method::GET, &path)).await?;
        Ok(response.json().await?)
    }

    async fn top_up(&self, wallet: &WalletId, sum: Decimal) -> ApiResult<()> {
        let path = format!("/wallets/{wallet}/topup/");
        self.send(
            self.request(Method::POST, &path)
                .json(&TopUpRequest { sum }),
        )
        .await?;
        Ok(())
    }

    async fn expenses_statistics(&self) -> ApiResult<ExpensesStatistics> {
        let response = self
            .send(self.request(Method::GET, "/wallets/expenses/stat/"))
            .await?;
        Ok(response.json().await?)
    }

    async fn portfolio(&self) -> ApiResult<Option<Portfolio>> {
        let response = self.send(self.request(Method::GET, "/assets/")).await?;
        // 204 means the user has not purchased any assets yet
        if response.status() == StatusCode::NO_CONTENT {
            return Ok(None);
        }
        Ok(Some(response.json().await?))
    }

    async fn initial_advice(&self) -> ApiResult<Advice> {
        let response = self
            .send(self.request(Method::GET, "/assets/advice/"))
            .await?;
        Ok(response.json().await?)
    }

    async fn advice(&self, query: &RiskAmountQuery) -> ApiResult<Advice> {
        debug!(risk_level = query.risk_level, amount = %query.amount, "Fetching advice");
        let response = self
            .send(
                self.request(Method::GET, "/assets/advice/").query(&[
                    ("investing_sum", query.amount.to_string()),
                    ("risk_level", query.risk_level.to_string()),
                ]),
            )
            .await?;
        Ok(response.json().await?)
    }

    async fn asset_detail(&self, name: &str) -> ApiResult<AssetDetail> {
        let path = format!("/assets/{name}/stat/");
        let response = self.send(self.request(Method::GET, &path)).await?;
        Ok(response.json().await?)
    }

    async fn submit_investment(&self, order: &InvestmentOrder) -> ApiResult<()> {
        debug!(invested_sum = %order.invested_sum, assets = order.assets.len(), "Submitting investment");
        self.send(self.request(Method::POST, "/assets/").json(order))
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_header_value() {
        assert_eq!(auth_header_value("9c53a367"), "token 9c53a367");
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let credentials = Arc::new(CredentialStore::ephemeral());
        let api = HttpApi::new("http://localhost:8000/api/v1/", credentials);
        assert_eq!(api.base_url, "http://localhost:8000/api/v1");
    }
}

// Live tests against a running fulfillment API; opt in with
// `--features integration-tests` and FINBOARD_API_URL pointing at it.
#[cfg(all(test, feature = "integration-tests"))]
mod live_tests {
    use super::*;

    #[tokio::test]
    async fn test_probe_without_credential_is_unauthorized() {
        let base = std::env::var("FINBOARD_API_URL")
            .unwrap_or_else(|_| "http://localhost:8000/api/v1".to_string());
        let api = HttpApi::new(&base, Arc::new(CredentialStore::ephemeral()));
        let err = api.current_user().await.unwrap_err();
        assert!(err.is_unauthorized());
    }
}
