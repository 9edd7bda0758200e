//! HTTP client for the remote auth API

use crate::auth::forms::INVALID_PINCODE;
use crate::auth::models::{AuthResponse, LoginRequest, ProfileDetails, RegisterRequest, User};
use crate::config::ApiConfig;
use crate::error::{Error, Result};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

const DEFAULT_ERROR_MESSAGE: &str = "API request failed";

/// Error body returned by the API
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Client for the login, registration and profile endpoints
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    config: ApiConfig,
}

impl ApiClient {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            config: config.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Exchange credentials for a token and user record
    pub async fn login(&self, credentials: &LoginRequest) -> Result<AuthResponse> {
        debug!("POST /login for {}", credentials.email);
        let response = self
            .http
            .post(self.config.endpoint("login"))
            .json(credentials)
            .send()
            .await?;
        handle_response(response).await
    }

    /// Create an account
    pub async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse> {
        debug!("POST /register for {}", request.email);
        let response = self
            .http
            .post(self.config.endpoint("register"))
            .json(request)
            .send()
            .await?;

        handle_response(response).await.map_err(|e| match e {
            Error::Api { message, .. } if message.contains("Invalid value provided. Expected Int") => {
                Error::Validation(INVALID_PINCODE.to_string())
            }
            other => other,
        })
    }

    /// Fetch a user's full record, including profile details
    pub async fn user_details(&self, user_id: &str, token: &str) -> Result<User> {
        debug!("GET /users/{}", user_id);
        let response = self
            .http
            .get(self.config.endpoint(&format!("users/{}", user_id)))
            .bearer_auth(token)
            .send()
            .await?;
        handle_response(response).await
    }

    /// Replace a user's profile details, returning the updated record
    pub async fn update_profile(
        &self,
        user_id: &str,
        token: &str,
        details: &ProfileDetails,
    ) -> Result<User> {
        debug!("PUT /users/{}/details", user_id);
        let response = self
            .http
            .put(self.config.endpoint(&format!("users/{}/details", user_id)))
            .bearer_auth(token)
            .json(details)
            .send()
            .await?;
        handle_response(response).await
    }
}

/// Decode a successful body or turn a failure status into `Error::Api`
async fn handle_response<T: DeserializeOwned>(response: Response) -> Result<T> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        let message = serde_json::from_str::<ErrorBody>(&body)
            .ok()
            .and_then(|b| b.message)
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| DEFAULT_ERROR_MESSAGE.to_string());

        return Err(Error::Api {
            status: status.as_u16(),
            message,
        });
    }

    Ok(serde_json::from_str(&body)?)
}
