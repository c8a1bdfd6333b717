use std::time::Duration;

use log::{debug, info};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::ApiConfig;
use crate::error::ApiError;
use crate::submissions::InterviewRecord;

#[derive(Serialize)]
struct CredentialsPayload<'a> {
    name: &'a str,
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct StartInterviewPayload<'a> {
    topic: &'a str,
    session_id: &'a str,
}

#[derive(Serialize)]
struct ContinueInterviewPayload<'a> {
    session_id: &'a str,
    answer: &'a str,
    topic: &'a str,
}

#[derive(Serialize)]
struct EndInterviewPayload<'a> {
    session_id: &'a str,
    topic: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub loggedin: bool,
    #[serde(default)]
    pub message: Option<String>,
}

/// Thin HTTP client over the VocaHire backend, plaintext JSON, unauthenticated.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(config: &ApiConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(5))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn post_json<P: Serialize + ?Sized>(
        &self,
        path: &str,
        payload: &P,
    ) -> Result<String, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        debug!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.text().await?)
    }

    /// The interview endpoints return a bare JSON string body; fall back to
    /// the raw text when the body is not valid JSON.
    fn text_body(body: &str) -> String {
        serde_json::from_str::<String>(body).unwrap_or_else(|_| body.trim().to_string())
    }

    pub async fn signup(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<Value, ApiError> {
        info!("Signing up user: {}", email);
        let body = self
            .post_json(
                "/signup",
                &CredentialsPayload {
                    name,
                    email,
                    password,
                },
            )
            .await?;
        serde_json::from_str(&body).map_err(|e| ApiError::Malformed(e.to_string()))
    }

    pub async fn login(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<LoginResponse, ApiError> {
        info!("Logging in user: {}", email);
        let body = self
            .post_json(
                "/login",
                &CredentialsPayload {
                    name,
                    email,
                    password,
                },
            )
            .await?;
        serde_json::from_str(&body).map_err(|e| ApiError::Malformed(e.to_string()))
    }

    pub async fn start_interview(
        &self,
        topic: &str,
        session_id: &str,
    ) -> Result<String, ApiError> {
        info!("Starting interview on '{}' (session {})", topic, session_id);
        let body = self
            .post_json("/start-interview", &StartInterviewPayload { topic, session_id })
            .await?;
        Ok(Self::text_body(&body))
    }

    pub async fn continue_interview(
        &self,
        session_id: &str,
        answer: &str,
        topic: &str,
    ) -> Result<String, ApiError> {
        info!("Continuing interview (session {})", session_id);
        let body = self
            .post_json(
                "/continue-interview",
                &ContinueInterviewPayload {
                    session_id,
                    answer,
                    topic,
                },
            )
            .await?;
        Ok(Self::text_body(&body))
    }

    pub async fn end_interview(&self, session_id: &str, topic: &str) -> Result<String, ApiError> {
        info!("Ending interview (session {})", session_id);
        let body = self
            .post_json("/end-interview", &EndInterviewPayload { session_id, topic })
            .await?;
        Ok(Self::text_body(&body))
    }

    pub async fn get_all_interviews(&self) -> Result<Vec<InterviewRecord>, ApiError> {
        let url = format!("{}/getallinterviews", self.base_url);
        debug!("GET {}", url);

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| ApiError::Malformed(e.to_string()))
    }
}
