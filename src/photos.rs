//! City photo lookup via the Unsplash search API.
//! Purely decorative: failures are logged and swallowed.

use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;

use crate::constants::{REQUEST_TIMEOUT_SECS, USER_AGENT};
use crate::error::{WeatherError, WeatherResult};
use crate::models::PhotoSearchResponse;

#[derive(Debug, Clone)]
pub struct PhotoClient {
    client: Arc<Client>,
    base_url: String,
    access_key: String,
}

impl PhotoClient {
    pub fn new(base_url: impl Into<String>, access_key: impl Into<String>) -> WeatherResult<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| WeatherError::upstream("client setup", e))?;

        Ok(Self {
            client: Arc::new(client),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            access_key: access_key.into(),
        })
    }

    /// URL of the top search result for the city, if any
    pub async fn city_photo(&self, city: &str) -> Option<String> {
        match self.search(city).await {
            Ok(url) => url,
            Err(e) => {
                tracing::warn!("Photo lookup for {} failed: {}", city, e);
                None
            }
        }
    }

    async fn search(&self, city: &str) -> WeatherResult<Option<String>> {
        let endpoint = "search/photos";
        let response = self
            .client
            .get(format!("{}/{}", self.base_url, endpoint))
            .query(&[("query", city), ("per_page", "1")])
            .header("Authorization", format!("Client-ID {}", self.access_key))
            .send()
            .await
            .map_err(|e| WeatherError::upstream(endpoint, e.without_url()))?;

        if !response.status().is_success() {
            return Err(WeatherError::upstream(
                endpoint,
                format!("status {}", response.status()),
            ));
        }

        let body: PhotoSearchResponse = response
            .json()
            .await
            .map_err(|e| WeatherError::upstream(endpoint, e.without_url()))?;

        Ok(body.results.into_iter().next().map(|photo| photo.urls.regular))
    }
}
