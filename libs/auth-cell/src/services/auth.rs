use std::collections::HashMap;
use std::time::{Duration, Instant};

use serde_json::Value;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use shared_backend::{BackendClient, ServiceError};
use shared_config::AppConfig;

use crate::models::UserInfo;

/// How long a `/me` payload is served from memory before re-fetching.
pub const USER_INFO_TTL: Duration = Duration::from_secs(60);

/// Session-facing calls against the backend auth endpoints, with a short-lived
/// per-user cache of the `/me` payload.
pub struct AuthService {
    backend: BackendClient,
    ttl: Duration,
    cache: RwLock<HashMap<String, (Instant, UserInfo)>>,
}

impl AuthService {
    pub fn new(config: &AppConfig) -> Self {
        Self::with_backend(BackendClient::new(config))
    }

    pub fn with_backend(backend: BackendClient) -> Self {
        Self::with_ttl(backend, USER_INFO_TTL)
    }

    pub fn with_ttl(backend: BackendClient, ttl: Duration) -> Self {
        Self {
            backend,
            ttl,
            cache: RwLock::new(HashMap::new()),
        }
    }

    pub async fn get_user_info(&self, user_id: &str, auth_token: &str) -> Result<UserInfo, ServiceError> {
        if let Some(info) = self.cached_user_info(user_id).await {
            debug!("User info cache hit for {}", user_id);
            return Ok(info);
        }

        let info: UserInfo = self.backend.get("/api/auth/me", auth_token, &[]).await?;

        let now = Instant::now();
        let mut cache = self.cache.write().await;
        // expired entries are dropped on every insert
        cache.retain(|_, (stored, _)| now.duration_since(*stored) < self.ttl);
        cache.insert(user_id.to_string(), (now, info.clone()));
        Ok(info)
    }

    /// The cached payload, if one was stored within the TTL.
    pub async fn cached_user_info(&self, user_id: &str) -> Option<UserInfo> {
        self.cache
            .read()
            .await
            .get(user_id)
            .filter(|(stored, _)| stored.elapsed() < self.ttl)
            .map(|(_, info)| info.clone())
    }

    pub async fn cached_entries(&self) -> usize {
        self.cache.read().await.len()
    }

    /// Local session data is cleared whether or not the upstream call succeeds.
    pub async fn logout(&self, user_id: &str, auth_token: &str) -> Result<(), ServiceError> {
        let result = self
            .backend
            .post::<Value, Value>("/api/auth/logout", auth_token, None)
            .await;

        self.clear_auth_data(user_id).await;

        match result {
            Ok(_) => {
                info!("User {} logged out", user_id);
                Ok(())
            }
            Err(e) => {
                warn!("Upstream logout failed for {}: {}", user_id, e);
                Err(e)
            }
        }
    }

    pub async fn clear_auth_data(&self, user_id: &str) {
        if self.cache.write().await.remove(user_id).is_some() {
            debug!("Cleared cached auth data for {}", user_id);
        }
    }
}
