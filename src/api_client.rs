//! api_client.rs
//!
//! Клиент REST API платформы кампусных событий.
//!
//! Токен организатора передаётся клиенту явно при создании (`AuthToken`)
//! и прикрепляется к каждому запросу как `Authorization: Bearer <token>`.
//! Никакого глобального состояния: кто создал клиент, тот и решает, с каким
//! токеном он работает.

use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use tracing::{debug, error, info};

use crate::config::ApiConfig;
use crate::error::ApiError;
use crate::models::{Registration, RegistrationId, RegistrationStatus, Review};

/// Bearer-токен организатора.
#[derive(Clone)]
pub struct AuthToken(String);

impl AuthToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    fn expose(&self) -> &str {
        &self.0
    }
}

// Токен не должен попадать в логи
impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AuthToken(***)")
    }
}

#[derive(Debug, Serialize)]
struct StatusUpdateRequest {
    status: RegistrationStatus,
}

#[derive(Debug, Deserialize)]
struct StatusUpdateResponse {
    registration: Registration,
}

/// Тело ошибки бэкенда. Node API кладёт текст в `message`, иногда в `error`.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
    error: Option<String>,
}

#[derive(Clone)]
pub struct ApiClient {
    base_url: Url,
    token: AuthToken,
    http_client: reqwest::Client,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, token: AuthToken) -> Result<Self, ApiError> {
        Self::with_timeout(base_url, token, None)
    }

    pub fn from_config(config: &ApiConfig) -> Result<Self, ApiError> {
        Self::with_timeout(
            config.base_url.clone(),
            AuthToken::new(config.token.clone()),
            config.request_timeout_seconds.map(Duration::from_secs),
        )
    }

    fn with_timeout(
        base_url: impl Into<String>,
        token: AuthToken,
        timeout: Option<Duration>,
    ) -> Result<Self, ApiError> {
        let raw = base_url.into();
        let base_url = match Url::parse(&raw) {
            Ok(url) if !url.cannot_be_a_base() => url,
            _ => return Err(ApiError::InvalidBaseUrl(raw)),
        };

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            base_url,
            token,
            http_client: builder.build()?,
        })
    }

    /// Собирает URL эндпоинта из сегментов пути.
    ///
    /// Каждый сегмент кодируется целиком, так что `/`, `?` и `#` внутри
    /// идентификатора не меняют маршрут.
    fn url(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidBaseUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// GET /api/registrations/event/:eventId
    pub async fn list_registrations(&self, event_id: &str) -> Result<Vec<Registration>, ApiError> {
        let request = self
            .http_client
            .get(self.url(&["api", "registrations", "event", event_id])?)
            .bearer_auth(self.token.expose());

        let registrations: Vec<Registration> = Self::send_json(request).await?;
        debug!("Fetched {} registrations for event {}", registrations.len(), event_id);
        Ok(registrations)
    }

    /// PATCH /api/registrations/:id/status
    ///
    /// Возвращает запись в том виде, в каком её подтвердил сервер.
    pub async fn update_status(
        &self,
        id: &RegistrationId,
        status: RegistrationStatus,
    ) -> Result<Registration, ApiError> {
        info!("Updating registration {} to {}", id, status);

        let request = self
            .http_client
            .patch(self.url(&["api", "registrations", id.as_str(), "status"])?)
            .bearer_auth(self.token.expose())
            .json(&StatusUpdateRequest { status });

        let response: StatusUpdateResponse = Self::send_json(request).await?;
        Ok(response.registration)
    }

    /// GET /api/events/organizer/reviews?event_id=:id
    pub async fn list_reviews(&self, event_id: &str) -> Result<Vec<Review>, ApiError> {
        let request = self
            .http_client
            .get(self.url(&["api", "events", "organizer", "reviews"])?)
            .query(&[("event_id", event_id)])
            .bearer_auth(self.token.expose());

        let reviews: Vec<Review> = Self::send_json(request).await?;
        debug!("Fetched {} reviews for event {}", reviews.len(), event_id);
        Ok(reviews)
    }

    async fn send_json<T: serde::de::DeserializeOwned>(
        request: reqwest::RequestBuilder,
    ) -> Result<T, ApiError> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            let message = serde_json::from_slice::<ErrorBody>(&body)
                .ok()
                .and_then(|b| b.message.or(b.error))
                .filter(|m| !m.trim().is_empty());
            error!("API request failed with {}: {:?}", status, message);
            return Err(ApiError::Server {
                status: status.as_u16(),
                message,
            });
        }

        Ok(serde_json::from_slice(&body)?)
    }
}
