use reqwest::{
    header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE},
    Client, Method,
};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use tracing::{debug, error, warn};

use shared_config::AppConfig;

use crate::error::ServiceError;

/// Thin REST client for the clinic backend. Every call carries the caller's
/// bearer token; the backend enforces ownership.
#[derive(Clone)]
pub struct BackendClient {
    client: Client,
    base_url: String,
}

impl BackendClient {
    pub fn new(config: &AppConfig) -> Self {
        let client = Client::builder()
            .timeout(config.backend_timeout())
            .build()
            .unwrap_or_else(|e| {
                warn!("Failed to build HTTP client with timeout ({}), using defaults", e);
                Client::new()
            });

        Self::with_client(client, &config.backend_api_url)
    }

    pub fn with_client(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn headers(&self, auth_token: &str) -> Result<HeaderMap, ServiceError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let bearer = HeaderValue::from_str(&format!("Bearer {}", auth_token))
            .map_err(|_| ServiceError::InvalidRequest("bearer token is not a valid header value".to_string()))?;
        headers.insert(AUTHORIZATION, bearer);

        Ok(headers)
    }

    pub async fn request<B, T>(
        &self,
        method: Method,
        path: &str,
        auth_token: &str,
        query: &[(&str, &str)],
        body: Option<&B>,
    ) -> Result<T, ServiceError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        debug!("{} {}", method, url);

        let mut req = self
            .client
            .request(method, &url)
            .headers(self.headers(auth_token)?);

        if !query.is_empty() {
            req = req.query(query);
        }
        if let Some(body) = body {
            req = req.json(body);
        }

        let response = req.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;

        if !status.is_success() {
            let message = error_message(&bytes)
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("request failed").to_string());
            error!("Backend error ({}) for {}: {}", status, url, message);
            return Err(ServiceError::Http {
                status: status.as_u16(),
                message,
            });
        }

        let value: Value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).map_err(|e| ServiceError::Decode(e.to_string()))?
        };

        if let Some(message) = application_failure(&value) {
            warn!("Backend reported failure for {}: {}", url, message);
            return Err(ServiceError::Application(message));
        }

        decode_payload(value)
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        auth_token: &str,
        query: &[(&str, &str)],
    ) -> Result<T, ServiceError> {
        self.request::<Value, T>(Method::GET, path, auth_token, query, None).await
    }

    pub async fn put<B, T>(&self, path: &str, auth_token: &str, body: &B) -> Result<T, ServiceError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.request(Method::PUT, path, auth_token, &[], Some(body)).await
    }

    pub async fn post<B, T>(&self, path: &str, auth_token: &str, body: Option<&B>) -> Result<T, ServiceError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.request(Method::POST, path, auth_token, &[], body).await
    }
}

/// Percent-encodes an identifier for use as a single path segment.
pub fn path_segment(id: &str) -> String {
    urlencoding::encode(id).into_owned()
}

fn error_message(bytes: &[u8]) -> Option<String> {
    let value: Value = serde_json::from_slice(bytes).ok()?;
    message_field(&value)
}

fn message_field(value: &Value) -> Option<String> {
    ["message", "error"].iter().find_map(|key| match value.get(*key) {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s.clone()),
        Some(Value::Object(inner)) => inner
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string),
        _ => None,
    })
}

fn application_failure(value: &Value) -> Option<String> {
    let object = value.as_object()?;
    let failed = matches!(object.get("success"), Some(Value::Bool(false)))
        || matches!(object.get("error"), Some(Value::String(_)) | Some(Value::Object(_)));
    if !failed {
        return None;
    }
    Some(message_field(value).unwrap_or_else(|| "request was not successful".to_string()))
}

/// Accepts both a bare payload and a `{ "data": ... }` envelope.
fn decode_payload<T: DeserializeOwned>(value: Value) -> Result<T, ServiceError> {
    match serde_json::from_value::<T>(value.clone()) {
        Ok(decoded) => Ok(decoded),
        Err(first) => match value {
            Value::Object(mut object) if object.contains_key("data") => {
                let data = object.remove("data").unwrap_or(Value::Null);
                serde_json::from_value(data).map_err(|e| ServiceError::Decode(e.to_string()))
            }
            _ => Err(ServiceError::Decode(first.to_string())),
        },
    }
}
