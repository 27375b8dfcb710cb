//! Preview References
//!
//! Local, renderable references to a selected file's bytes. A reference is
//! live for as long as its [`PreviewUrl`] guard exists; dropping the guard
//! revokes it from the registry.

use crate::controller::SelectedFile;
use bytes::Bytes;
use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::debug;

const SCHEME: &str = "preview";

#[derive(Default)]
struct Inner {
    next_id: AtomicU64,
    entries: Mutex<HashMap<u64, Bytes>>,
}

impl Inner {
    fn entries(&self) -> MutexGuard<'_, HashMap<u64, Bytes>> {
        // A poisoned map is still consistent: every mutation is a single insert/remove.
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Registry of live preview references
#[derive(Clone, Default)]
pub struct PreviewRegistry {
    inner: Arc<Inner>,
}

impl PreviewRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the bytes of `file` and hand back the guard that owns the reference
    pub fn create(&self, file: &SelectedFile) -> PreviewUrl {
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        self.inner.entries().insert(id, file.bytes().clone());

        let url = format!("{}:{}/{}", SCHEME, id, file.name());
        debug!(%url, "Created preview reference");

        PreviewUrl {
            id,
            url,
            registry: Arc::clone(&self.inner),
        }
    }

    /// Resolve a reference string back to the bytes it points at
    pub fn resolve(&self, url: &str) -> Option<Bytes> {
        let id = parse_id(url)?;
        self.inner.entries().get(&id).cloned()
    }

    /// Number of references that have not been released yet
    pub fn live_count(&self) -> usize {
        self.inner.entries().len()
    }
}

impl fmt::Debug for PreviewRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PreviewRegistry")
            .field("live", &self.live_count())
            .finish()
    }
}

fn parse_id(url: &str) -> Option<u64> {
    let rest = url.strip_prefix(SCHEME)?.strip_prefix(':')?;
    let id = rest.split('/').next()?;
    id.parse().ok()
}

/// A live preview reference. Released on drop.
pub struct PreviewUrl {
    id: u64,
    url: String,
    registry: Arc<Inner>,
}

impl PreviewUrl {
    pub fn as_str(&self) -> &str {
        &self.url
    }
}

impl fmt::Display for PreviewUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}

impl fmt::Debug for PreviewUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("PreviewUrl").field(&self.url).finish()
    }
}

impl Drop for PreviewUrl {
    fn drop(&mut self) {
        self.registry.entries().remove(&self.id);
        debug!(url = %self.url, "Released preview reference");
    }
}
