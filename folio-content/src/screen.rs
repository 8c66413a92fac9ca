//! Per-screen content state
//!
//! Each screen fetches independently on mount; there is no shared cache and
//! no request de-duplication. Every mount takes a fresh generation number;
//! a fetch commits only while its own generation is still current, so a
//! late response from an earlier mount is dropped even after a re-mount.
//! The request itself is not aborted.

use crate::client::ApiClient;
use crate::model::{CanonicalArticle, SourceKind};
use crate::resolver::{resolve, ResolveOptions, Strategy};
use folio_common::api::Resource;
use serde_json::Value;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::debug;

/// Transient view state for one screen
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScreenState {
    pub articles: Vec<CanonicalArticle>,
    pub loading: bool,
    pub last_error: Option<String>,
    pub strategy: Option<Strategy>,
}

/// A content-bearing screen bound to one resource
pub struct ContentScreen {
    client: Arc<ApiClient>,
    resource: Resource,
    fixtures: Arc<Vec<Value>>,
    options: ResolveOptions,
    state: Arc<RwLock<ScreenState>>,
    mounted: AtomicBool,
    /// Bumped on every mount and unmount; a fetch holds the value it started with
    generation: Arc<AtomicU64>,
}

impl ContentScreen {
    pub fn new(
        client: Arc<ApiClient>,
        resource: Resource,
        fixtures: Arc<Vec<Value>>,
        options: ResolveOptions,
    ) -> Self {
        Self {
            client,
            resource,
            fixtures,
            options,
            state: Arc::new(RwLock::new(ScreenState::default())),
            mounted: AtomicBool::new(false),
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Mark the screen mounted and start its fetch
    ///
    /// The returned handle resolves to `true` if the result was committed,
    /// `false` if this mount ended (unmount or re-mount) first.
    pub async fn mount(&self) -> JoinHandle<bool> {
        let mount_generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.mounted.store(true, Ordering::SeqCst);
        {
            let mut state = self.state.write().await;
            state.loading = true;
        }

        let client = Arc::clone(&self.client);
        let fixtures = Arc::clone(&self.fixtures);
        let state = Arc::clone(&self.state);
        let generation = Arc::clone(&self.generation);
        let resource = self.resource;
        let options = self.options.clone();

        tokio::spawn(async move {
            let outcome = client.fetch_list(resource).await;
            let resolution = resolve(
                &outcome.records,
                &fixtures,
                SourceKind::from(resource),
                &options,
            );

            let mut state = state.write().await;
            if generation.load(Ordering::SeqCst) != mount_generation {
                debug!(
                    resource = %resource,
                    generation = mount_generation,
                    "Mount ended, discarding result"
                );
                return false;
            }

            state.articles = resolution.articles;
            state.strategy = Some(resolution.strategy);
            state.last_error = outcome.last_error;
            state.loading = false;
            true
        })
    }

    /// Mark the screen unmounted; any in-flight result is discarded
    pub fn unmount(&self) {
        self.mounted.store(false, Ordering::SeqCst);
        self.generation.fetch_add(1, Ordering::SeqCst);
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted.load(Ordering::SeqCst)
    }

    /// Snapshot of the current view state
    pub async fn state(&self) -> ScreenState {
        self.state.read().await.clone()
    }
}

impl Drop for ContentScreen {
    fn drop(&mut self) {
        self.unmount();
    }
}
