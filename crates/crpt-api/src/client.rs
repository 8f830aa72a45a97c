use std::sync::Arc;
use std::time::Duration;

use log::{error, info};
use reqwest::header::AUTHORIZATION;
use reqwest::Client;

use crpt_core::model::{DocumentType, LpIntroduceGoods, ProductGroup};
use crpt_throttle::SlidingWindowLimiter;

use crate::config::Config;
use crate::counter::next_request_id;
use crate::error::{ApiError, ApiResult};
use crate::request::{CreateDocumentRequest, DOCUMENT_CREATE_PATH};

/// Status and body of an API call.
///
/// A non-2xx status is still a completed call; use
/// [`error_for_status`](Self::error_for_status) to treat it as an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status <= 299
    }

    /// Turn a non-2xx response into [`ApiError::Status`].
    pub fn error_for_status(self) -> ApiResult<Self> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(ApiError::Status {
                status: self.status,
                body: self.body,
            })
        }
    }
}

/// Document API client.
///
/// All clones share the same HTTP connection pool and the same request
/// throttle, which should be the one throttle for the whole process.
#[derive(Debug, Clone)]
pub struct CrptClient {
    http: Client,
    base_url: String,
    auth_token: Option<String>,
    limiter: Arc<SlidingWindowLimiter>,
}

impl CrptClient {
    /// Create a new client that sends every request through `limiter`.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(config: &Config, limiter: Arc<SlidingWindowLimiter>) -> ApiResult<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("crpt/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_owned(),
            auth_token: config.auth_token.clone(),
            limiter,
        })
    }

    #[must_use]
    pub const fn limiter(&self) -> &Arc<SlidingWindowLimiter> {
        &self.limiter
    }

    /// URL of the document creation endpoint for `group`.
    #[must_use]
    pub fn document_create_url(&self, group: ProductGroup) -> String {
        format!("{}{}?pg={}", self.base_url, DOCUMENT_CREATE_PATH, group)
    }

    /// Create an "introduce goods into circulation" document.
    ///
    /// The document is validated locally first; an invalid document is
    /// never sent and does not use up a request slot.
    ///
    /// # Errors
    /// Returns an error on validation failure, missing token, or HTTP
    /// failure. A non-2xx answer is returned as a response, not an error.
    pub async fn introduce_goods(
        &self,
        input: &LpIntroduceGoods,
        signature: &str,
    ) -> ApiResult<ApiResponse> {
        input.document.validate()?;
        let json = input.document.to_json()?;

        self.create_document(
            input.product_group,
            &json,
            signature,
            LpIntroduceGoods::DOCUMENT_TYPE,
        )
        .await
    }

    /// Submit an already serialized document.
    ///
    /// Waits on the shared throttle exactly once, right before sending.
    ///
    /// # Errors
    /// Returns an error if no token is configured or the HTTP exchange
    /// fails.
    pub async fn create_document(
        &self,
        group: ProductGroup,
        product_document_json: &str,
        signature: &str,
        doc_type: DocumentType,
    ) -> ApiResult<ApiResponse> {
        let request_id = next_request_id();
        info!("CRPT request {} received: {} for group {}", request_id, doc_type, group);

        let token = self.auth_token.as_deref().ok_or(ApiError::MissingToken)?;
        let body = CreateDocumentRequest::new(product_document_json, signature, doc_type);
        let request = self
            .http
            .post(self.document_create_url(group))
            .header(AUTHORIZATION, token)
            .json(&body);

        self.limiter.acquire_async().await;

        let response = request.send().await.map_err(|e| {
            error!("CRPT request {} failed: {}", request_id, e);
            ApiError::from(e)
        })?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        info!(
            "CRPT request {} finished with status {} (ok = {})",
            request_id,
            status,
            (200..=299).contains(&status)
        );

        Ok(ApiResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base_url: &str) -> CrptClient {
        let config = Config {
            base_url: String::from(base_url),
            ..Config::default()
        };
        let limiter = Arc::new(SlidingWindowLimiter::from_millis(1_000, 1).unwrap());
        CrptClient::new(&config, limiter).unwrap()
    }

    #[test]
    fn test_client_creation() {
        let client = client("https://ismp.crpt.ru");
        assert_eq!(client.limiter().capacity(), 1);
    }

    #[test]
    fn test_document_create_url() {
        let client = client("https://ismp.crpt.ru/");
        assert_eq!(
            client.document_create_url(ProductGroup::Milk),
            "https://ismp.crpt.ru/api/v3/lk/documents/create?pg=milk"
        );
    }

    #[test]
    fn test_response_success_range() {
        let ok = ApiResponse {
            status: 201,
            body: String::new(),
        };
        let redirect = ApiResponse {
            status: 302,
            body: String::new(),
        };
        assert!(ok.is_success());
        assert!(!redirect.is_success());
    }

    #[test]
    fn test_error_for_status() {
        let ok = ApiResponse {
            status: 200,
            body: String::from("{}"),
        };
        assert_eq!(ok.clone().error_for_status().unwrap(), ok);

        let rejected = ApiResponse {
            status: 403,
            body: String::from("forbidden"),
        };
        match rejected.error_for_status() {
            Err(ApiError::Status { status, body }) => {
                assert_eq!(status, 403);
                assert_eq!(body, "forbidden");
            }
            other => panic!("expected status error, got {other:?}"),
        }
    }
}
