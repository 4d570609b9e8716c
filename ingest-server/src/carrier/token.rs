//! Carrier OAuth token cache
//!
//! Tokens are cached in memory for the fast path and persisted so a
//! restart does not burn a fresh OAuth exchange. The expiry stored on a
//! row already has the safety margin subtracted, so freshness is a plain
//! `expiry > now` check everywhere.

use parking_lot::RwLock;
use sqlx::SqlitePool;

use shared::error::{AppError, AppResult};

use crate::core::config::CarrierConfig;
use crate::db::repository::carrier_token;

/// Safety margin: a token within 5 minutes of expiry is treated as stale
const EXPIRY_MARGIN_MS: i64 = 5 * 60 * 1000;

/// Cached carrier access token with memory and database tiers
pub struct TokenCache {
    pool: SqlitePool,
    http: reqwest::Client,
    config: CarrierConfig,
    cached: RwLock<Option<(String, i64)>>,
}

impl TokenCache {
    pub fn new(pool: SqlitePool, http: reqwest::Client, config: CarrierConfig) -> Self {
        Self {
            pool,
            http,
            config,
            cached: RwLock::new(None),
        }
    }

    /// Return a usable access token, refreshing if needed.
    ///
    /// Concurrent refreshes are allowed; both produce valid tokens and
    /// the last write wins. Refresh failure maps to `CarrierAuthFailed`.
    pub async fn get_token(&self) -> AppResult<String> {
        let now = shared::util::now_millis();

        if let Some((token, expiry)) = self.cached.read().clone()
            && expiry > now
        {
            return Ok(token);
        }

        // Second tier: a previous process run may have left a fresh row
        if let Ok(Some(row)) = carrier_token::find_latest(&self.pool).await
            && row.is_fresh(now)
        {
            *self.cached.write() = Some((row.token.clone(), row.expiry));
            return Ok(row.token);
        }

        self.refresh(now).await
    }

    async fn refresh(&self, now: i64) -> AppResult<String> {
        let body = super::types::TokenRequest::client_credentials(
            &self.config.client_id,
            &self.config.client_secret,
        );
        let url = format!("{}/2.0/oauth/access_token", self.config.base_url);

        let response = self
            .http
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::carrier_auth(format!("Token request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(AppError::carrier_auth(format!(
                "Token request rejected ({status}): {text}"
            )));
        }

        let token: super::types::TokenResponse = response
            .json()
            .await
            .map_err(|e| AppError::carrier_auth(format!("Malformed token response: {e}")))?;

        let expiry = now + token.expires_in * 1000 - EXPIRY_MARGIN_MS;

        if let Err(e) = carrier_token::insert(&self.pool, &token.access_token, expiry).await {
            // A lost row only costs one extra refresh after restart
            tracing::warn!("Failed to persist carrier token: {e}");
        }
        let _ = carrier_token::prune_expired(&self.pool, now).await;

        *self.cached.write() = Some((token.access_token.clone(), expiry));
        tracing::info!("Carrier token refreshed, valid for {}s", token.expires_in);
        Ok(token.access_token)
    }

    /// Drop the in-memory token, forcing the next call through the slow path
    #[cfg(test)]
    pub fn clear_memory(&self) {
        *self.cached.write() = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;

    fn config() -> CarrierConfig {
        CarrierConfig {
            base_url: "http://127.0.0.1:1".into(),
            client_id: "id".into(),
            client_secret: "secret".into(),
            request_timeout_ms: 100,
        }
    }

    #[tokio::test]
    async fn test_fresh_db_row_reused() {
        let db = DbService::in_memory().await.unwrap();
        let now = shared::util::now_millis();
        carrier_token::insert(&db.pool, "persisted-token", now + 60 * 60 * 1000)
            .await
            .unwrap();

        let cache = TokenCache::new(db.pool.clone(), reqwest::Client::new(), config());
        let token = cache.get_token().await.unwrap();
        assert_eq!(token, "persisted-token");

        // Second call hits the memory tier
        let token = cache.get_token().await.unwrap();
        assert_eq!(token, "persisted-token");
    }

    #[tokio::test]
    async fn test_stale_row_triggers_refresh_failure() {
        let db = DbService::in_memory().await.unwrap();
        let now = shared::util::now_millis();
        carrier_token::insert(&db.pool, "stale-token", now - 1000)
            .await
            .unwrap();

        // base_url points nowhere, so the forced refresh must fail with
        // a carrier auth error rather than silently using the stale row
        let cache = TokenCache::new(db.pool.clone(), reqwest::Client::new(), config());
        let err = cache.get_token().await.unwrap_err();
        assert_eq!(err.code, shared::error::ErrorCode::CarrierAuthFailed);
    }

    #[tokio::test]
    async fn test_memory_cleared_falls_back_to_db() {
        let db = DbService::in_memory().await.unwrap();
        let now = shared::util::now_millis();
        carrier_token::insert(&db.pool, "tok", now + 60 * 60 * 1000)
            .await
            .unwrap();

        let cache = TokenCache::new(db.pool.clone(), reqwest::Client::new(), config());
        assert_eq!(cache.get_token().await.unwrap(), "tok");
        cache.clear_memory();
        assert_eq!(cache.get_token().await.unwrap(), "tok");
    }
}
