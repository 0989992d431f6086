//! HTTP implementation of the gateway contract.

use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, instrument};

use model::{
    OrderRequest, RegisteredRestaurant, RestaurantListing, RestaurantRegistration, SearchArea,
};

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::gateway::{
    ApiResponse, GatewayClient, HEALTH_PATH, LIST_PATH, ORDERS_PATH, REGISTER_PATH,
};

/// Blocking HTTP client for the API gateway.
///
/// The underlying connection pool is shared; cloning is cheap.
#[derive(Debug, Clone)]
pub struct HttpGatewayClient {
    base_url: String,
    http: Client,
    config: ClientConfig,
}

impl HttpGatewayClient {
    pub fn new(config: ClientConfig) -> ClientResult<Self> {
        let base_url = config.normalized_base_url().to_string();
        let parsed = reqwest::Url::parse(&base_url).map_err(|e| ClientError::InvalidConfig {
            message: format!("invalid base url {base_url:?}: {e}"),
        })?;
        if parsed.host_str().is_none() {
            return Err(ClientError::InvalidConfig {
                message: format!("base url {base_url:?} has no host"),
            });
        }

        let mut headers = HeaderMap::new();
        if let Some(token) = &config.token {
            let value = HeaderValue::from_str(&format!("Bearer {token}")).map_err(|e| {
                ClientError::InvalidConfig {
                    message: format!("invalid auth header: {e}"),
                }
            })?;
            headers.insert(AUTHORIZATION, value);
        }

        let http = Client::builder()
            .timeout(config.request_timeout)
            .default_headers(headers)
            .build()?;

        Ok(Self {
            base_url,
            http,
            config,
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, endpoint: &str) -> String {
        if endpoint.starts_with('/') {
            format!("{}{endpoint}", self.base_url)
        } else {
            format!("{}/{endpoint}", self.base_url)
        }
    }

    fn post_json<T: Serialize + ?Sized, R: DeserializeOwned>(
        &self,
        endpoint: &str,
        payload: &T,
    ) -> ClientResult<R> {
        let request = self.http.post(self.url(endpoint)).json(payload);
        decode_success(send(request)?)
    }
}

fn send(request: RequestBuilder) -> ClientResult<Response> {
    request.send().map_err(ClientError::from)
}

fn decode_success<R: DeserializeOwned>(response: Response) -> ClientResult<R> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().unwrap_or_default();
        return Err(ClientError::Status {
            status: status.as_u16(),
            body,
        });
    }
    let text = response.text()?;
    Ok(serde_json::from_str(&text)?)
}

impl GatewayClient for HttpGatewayClient {
    fn health_check(&self) -> bool {
        let result = self
            .http
            .get(self.url(HEALTH_PATH))
            .timeout(self.config.health_timeout)
            .send();
        match result {
            Ok(response) => response.status() == StatusCode::OK,
            Err(err) => {
                debug!(error = %err, base_url = %self.base_url, "health check failed");
                false
            }
        }
    }

    #[instrument(level = "debug", skip_all, fields(name = registration.name()))]
    fn register_restaurant(
        &self,
        registration: &RestaurantRegistration,
    ) -> ClientResult<RegisteredRestaurant> {
        self.post_json(REGISTER_PATH, registration)
    }

    #[instrument(level = "debug", skip(self))]
    fn list_restaurants(&self, area: &SearchArea) -> ClientResult<RestaurantListing> {
        let request = self
            .http
            .post(self.url(LIST_PATH))
            .query(&[
                ("Latitude", area.latitude()),
                ("Longitude", area.longitude()),
                ("RadiusKm", area.radius_km()),
            ])
            .timeout(self.config.list_timeout);
        decode_success(send(request)?)
    }

    fn post(&self, endpoint: &str, payload: &Value) -> ClientResult<Value> {
        self.post_json(endpoint, payload)
    }

    fn place_order(&self, order: &OrderRequest) -> ClientResult<ApiResponse> {
        let response = send(self.http.post(self.url(ORDERS_PATH)).json(order))?;
        let status = response.status().as_u16();
        let body = response.text()?;
        Ok(ApiResponse::new(status, body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_unparseable_base_url() {
        let err = HttpGatewayClient::new(ClientConfig::new("not a url")).unwrap_err();
        assert!(matches!(err, ClientError::InvalidConfig { .. }));
    }

    #[test]
    fn joins_endpoints_without_double_slash() {
        let client = HttpGatewayClient::new(ClientConfig::new("http://gateway:8080/")).unwrap();
        assert_eq!(client.base_url(), "http://gateway:8080");
        assert_eq!(
            client.url(ORDERS_PATH),
            "http://gateway:8080/api/v1/restaurants/orders"
        );
        assert_eq!(client.url("health"), "http://gateway:8080/health");
    }

    #[test]
    fn rejects_token_with_newline() {
        let config = ClientConfig::new("http://gateway:8080").with_token(Some("a\nb".to_string()));
        assert!(matches!(
            HttpGatewayClient::new(config),
            Err(ClientError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn unreachable_gateway_is_unhealthy() {
        // Port 9 (discard) on loopback is expected to refuse connections.
        let client = HttpGatewayClient::new(ClientConfig::for_testing("http://127.0.0.1:9")).unwrap();
        assert!(!client.health_check());
    }

    #[test]
    fn unreachable_gateway_is_transport_error() {
        let client = HttpGatewayClient::new(ClientConfig::for_testing("http://127.0.0.1:9")).unwrap();
        let err = client
            .list_restaurants(&SearchArea::discovery())
            .unwrap_err();
        assert!(matches!(err, ClientError::Transport { .. }));
    }
}
