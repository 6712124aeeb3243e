use catalog::{Building, Company, Room};
use serde::de::DeserializeOwned;

use crate::{BoxFuture, DataService, Endpoint, PathRequest, RouteGeometry, ServiceError};

/// JSON-over-HTTP data service rooted at a base URL such as
/// `http://localhost:3000/api`.
#[derive(Debug, Clone)]
pub struct HttpDataService {
    base_url: String,
    client: reqwest::Client,
}

impl HttpDataService {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, reqwest::Client::new())
    }

    pub fn with_client(base_url: impl Into<String>, client: reqwest::Client) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url, client }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, endpoint: Endpoint) -> String {
        format!("{}{}", self.base_url, endpoint.path())
    }

    async fn read_json<T: DeserializeOwned>(
        endpoint: Endpoint,
        resp: reqwest::Response,
    ) -> Result<T, ServiceError> {
        if !resp.status().is_success() {
            return Err(ServiceError::Status {
                endpoint,
                status: resp.status().as_u16(),
            });
        }

        let bytes = resp
            .bytes()
            .await
            .map_err(|source| ServiceError::Request { endpoint, source })?;

        serde_json::from_slice(&bytes).map_err(|source| ServiceError::Decode { endpoint, source })
    }

    async fn get_json<T: DeserializeOwned>(&self, endpoint: Endpoint) -> Result<T, ServiceError> {
        let url = self.url(endpoint);
        tracing::debug!(%url, "GET");
        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|source| ServiceError::Request { endpoint, source })?;
        Self::read_json(endpoint, resp).await
    }
}

impl DataService for HttpDataService {
    fn buildings(&self) -> BoxFuture<'_, Result<Vec<Building>, ServiceError>> {
        Box::pin(self.get_json(Endpoint::Buildings))
    }

    fn companies(&self) -> BoxFuture<'_, Result<Vec<Company>, ServiceError>> {
        Box::pin(self.get_json(Endpoint::Companies))
    }

    fn rooms(&self) -> BoxFuture<'_, Result<Vec<Room>, ServiceError>> {
        Box::pin(self.get_json(Endpoint::Rooms))
    }

    fn calculate_path(
        &self,
        request: PathRequest,
    ) -> BoxFuture<'_, Result<RouteGeometry, ServiceError>> {
        let endpoint = Endpoint::CalculatePath;
        let url = self.url(endpoint);
        Box::pin(async move {
            tracing::debug!(%url, destination = %request.destination_building_name, "POST");
            let resp = self
                .client
                .post(&url)
                .json(&request)
                .send()
                .await
                .map_err(|source| ServiceError::Request { endpoint, source })?;
            Self::read_json(endpoint, resp).await
        })
    }
}
