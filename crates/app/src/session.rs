//! Session cookie persistence.
//!
//! The backend authenticates with cookies. The jar is saved between runs the way a browser
//! keeps its cookie store.

use std::sync::Arc;

use reqwest::{
    Url,
    cookie::{CookieStore, Jar},
};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use dacha::storage::{SnapshotStorage, StorageError};

/// Snapshot key holding the session cookies.
pub const SESSION_STORAGE_KEY: &str = "dacha_session";

#[derive(Debug, Default, Serialize, Deserialize)]
struct SessionSnapshot {
    origin: String,
    cookies: Vec<String>,
}

/// Cookie jar bound to the API origin.
#[derive(Debug)]
pub struct Session {
    origin: Url,
    jar: Arc<Jar>,
}

impl Session {
    /// Create an empty session for `origin`.
    pub fn new(origin: Url) -> Self {
        Self {
            origin,
            jar: Arc::new(Jar::default()),
        }
    }

    /// Jar to hand to the HTTP client.
    pub fn jar(&self) -> Arc<Jar> {
        Arc::clone(&self.jar)
    }

    /// Cookies currently held for the origin, as `name=value` pairs.
    pub fn cookies(&self) -> Vec<String> {
        self.jar
            .cookies(&self.origin)
            .and_then(|header| header.to_str().ok().map(str::to_string))
            .map(|header| {
                header
                    .split(';')
                    .map(str::trim)
                    .filter(|pair| !pair.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Load saved cookies into the jar.
    ///
    /// Missing, unreadable or foreign snapshots leave the session empty.
    pub fn restore(&self, storage: &impl SnapshotStorage) {
        let snapshot = match storage.load(SESSION_STORAGE_KEY) {
            Ok(Some(snapshot)) => snapshot,
            Ok(None) => return,
            Err(error) => {
                warn!("failed to read session snapshot: {error}");
                return;
            }
        };

        let snapshot: SessionSnapshot = match serde_json::from_str(&snapshot) {
            Ok(snapshot) => snapshot,
            Err(error) => {
                warn!("discarding malformed session snapshot: {error}");
                return;
            }
        };

        if snapshot.origin != self.origin.as_str() {
            debug!(saved = %snapshot.origin, "ignoring session saved for another origin");
            return;
        }

        for cookie in &snapshot.cookies {
            self.jar.add_cookie_str(cookie, &self.origin);
        }

        debug!(cookies = snapshot.cookies.len(), "session restored");
    }

    /// Persist the jar's cookies.
    ///
    /// A snapshot that cannot be serialized is logged and the stored one is left in place.
    ///
    /// # Errors
    ///
    /// Returns an error when the snapshot cannot be written.
    pub fn save(&self, storage: &mut impl SnapshotStorage) -> Result<(), StorageError> {
        let snapshot = SessionSnapshot {
            origin: self.origin.to_string(),
            cookies: self.cookies(),
        };

        let value = match serde_json::to_string(&snapshot) {
            Ok(value) => value,
            Err(error) => {
                warn!("failed to serialize session: {error}");
                return Ok(());
            }
        };

        debug!(cookies = snapshot.cookies.len(), "saving session");

        storage.save(SESSION_STORAGE_KEY, &value)
    }
}
