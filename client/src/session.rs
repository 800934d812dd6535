//! Session lifecycle: login, logout, and background token renewal
//!
//! The token is an opaque string issued by the server and persisted to a
//! file between runs. Renewal runs on a fixed interval with bounded
//! linear-backoff retries; exhausting the retries forces a logout. This
//! is the only retry policy in the client.

use std::path::PathBuf;
use std::time::Duration;

use crate::api::ApiClient;
use crate::config::Config;
use crate::error::{ClientError, ClientResult};
use crate::store::Store;

/// Session manager owning token persistence and the renewal policy
#[derive(Debug, Clone)]
pub struct Session {
    token_path: PathBuf,
    renew_interval: Duration,
    max_renew_attempts: u32,
    renew_backoff: Duration,
}

/// Linear backoff: the nth retry waits n times the base delay
pub fn backoff_delay(attempt: u32, base: Duration) -> Duration {
    base * attempt
}

impl Session {
    pub fn new(config: &Config) -> Self {
        Self {
            token_path: PathBuf::from(&config.session.token_path),
            renew_interval: Duration::from_secs(config.session.renew_interval_secs),
            max_renew_attempts: config.session.max_renew_attempts,
            renew_backoff: Duration::from_secs(config.session.renew_backoff_secs),
        }
    }

    /// Token persisted by a previous run, if any
    pub fn stored_token(&self) -> Option<String> {
        let token = std::fs::read_to_string(&self.token_path).ok()?;
        let token = token.trim();
        if token.is_empty() {
            None
        } else {
            Some(token.to_string())
        }
    }

    /// Restore a persisted session into the API client; true if one existed
    pub fn restore(&self, api: &ApiClient) -> bool {
        match self.stored_token() {
            Some(token) => {
                api.set_token(token);
                true
            }
            None => false,
        }
    }

    /// Log in and persist the issued token
    pub async fn login(
        &self,
        api: &ApiClient,
        username: &str,
        password: &str,
    ) -> ClientResult<()> {
        let token = api.login(username, password).await?;
        api.set_token(token.clone());
        self.persist(&token)?;
        tracing::info!("session established");
        Ok(())
    }

    /// Tear down the session: token, persisted copy, and every store slice
    pub fn logout(&self, api: &ApiClient, store: &mut Store) {
        api.clear_token();
        if self.token_path.exists() {
            if let Err(err) = std::fs::remove_file(&self.token_path) {
                tracing::warn!("failed to remove persisted token: {}", err);
            }
        }
        store.clear_all();
        tracing::info!("session cleared");
    }

    /// One renewal round with the bounded linear-backoff retry schedule.
    ///
    /// Returns `AuthExpired` once every attempt has failed; the caller is
    /// expected to force a logout.
    pub async fn renew_with_retry(&self, api: &ApiClient) -> ClientResult<()> {
        for attempt in 1..=self.max_renew_attempts {
            match api.renew().await {
                Ok(token) => {
                    api.set_token(token.clone());
                    self.persist(&token)?;
                    return Ok(());
                }
                Err(err) => {
                    tracing::warn!(attempt, "token renewal failed: {}", err);
                    if attempt < self.max_renew_attempts {
                        tokio::time::sleep(backoff_delay(attempt, self.renew_backoff)).await;
                    }
                }
            }
        }
        Err(ClientError::AuthExpired)
    }

    /// Background renewal loop. Runs until renewal is exhausted, then
    /// returns `AuthExpired` so the owner can log out and redirect.
    pub async fn run_renewal(&self, api: &ApiClient) -> ClientError {
        let mut ticker = tokio::time::interval(self.renew_interval);
        // The first tick fires immediately; skip it so a fresh login is
        // not renewed right away
        ticker.tick().await;
        loop {
            ticker.tick().await;
            if let Err(err) = self.renew_with_retry(api).await {
                return err;
            }
        }
    }

    fn persist(&self, token: &str) -> ClientResult<()> {
        if let Some(parent) = self.token_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(&self.token_path, token)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backoff_is_linear_in_attempt() {
        let base = Duration::from_secs(3);
        assert_eq!(backoff_delay(1, base), Duration::from_secs(3));
        assert_eq!(backoff_delay(2, base), Duration::from_secs(6));
        assert_eq!(backoff_delay(5, base), Duration::from_secs(15));
    }
}
