//! Latest-known snapshots of asynchronously fetched data.
//!
//! Every category the wizard depends on (providers, plans, namespaces,
//! networks, storages, NIC profiles, disks) arrives from its own watch or
//! inventory query. Updates carry the fetcher's `(items, loading, error)`
//! triple; only completed, error-free updates replace the stored items.

use serde::{Deserialize, Serialize};

/// One update from a data-fetching collaborator.
///
/// `request` is an optional monotonically increasing id issued per fetch.
/// Updates tagged with an id older than one already seen for the same slot
/// are dropped, so a slow response cannot overwrite a newer one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotUpdate<T> {
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
    #[serde(default)]
    pub loading: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request: Option<u64>,
}

impl<T> SnapshotUpdate<T> {
    pub fn loaded(items: Vec<T>) -> Self {
        Self {
            items,
            loading: false,
            error: None,
            request: None,
        }
    }

    pub fn loading() -> Self {
        Self {
            items: Vec::new(),
            loading: true,
            error: None,
            request: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            items: Vec::new(),
            loading: false,
            error: Some(error.into()),
            request: None,
        }
    }

    pub fn with_request(mut self, request: u64) -> Self {
        self.request = Some(request);
        self
    }

    /// Collapse the wire triple into a tagged state. An error wins over
    /// `loading`.
    pub fn into_fetch(self) -> Fetch<T> {
        match (self.error, self.loading) {
            (Some(error), _) => Fetch::Failed(error),
            (None, true) => Fetch::Loading,
            (None, false) => Fetch::Loaded(self.items),
        }
    }
}

/// State of a single fetch as seen by the reducer.
#[derive(Debug, Clone, PartialEq)]
pub enum Fetch<T> {
    Loading,
    Failed(String),
    Loaded(Vec<T>),
}

/// What the stored snapshot holds.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", content = "items", rename_all = "camelCase")]
pub enum Snapshot<T> {
    /// Nothing usable has arrived yet.
    Pending,
    Ready(Vec<T>),
}

/// Outcome of applying an update to a slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Applied {
    Stored,
    Loading,
    Failed(String),
    Stale,
}

/// A snapshot plus the newest request id observed for it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Availability<T> {
    snapshot: Snapshot<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    latest_request: Option<u64>,
}

impl<T> Default for Availability<T> {
    fn default() -> Self {
        Self::pending()
    }
}

impl<T> Availability<T> {
    pub fn pending() -> Self {
        Self {
            snapshot: Snapshot::Pending,
            latest_request: None,
        }
    }

    pub fn snapshot(&self) -> &Snapshot<T> {
        &self.snapshot
    }

    /// Last applied items; empty while pending.
    pub fn items(&self) -> &[T] {
        match &self.snapshot {
            Snapshot::Pending => &[],
            Snapshot::Ready(items) => items,
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.snapshot, Snapshot::Ready(_))
    }

    /// Forget the items. The request watermark survives so that responses
    /// to fetches issued before the reset stay rejected.
    pub fn reset(&mut self) {
        self.snapshot = Snapshot::Pending;
    }

    pub fn apply(&mut self, update: SnapshotUpdate<T>) -> Applied {
        if let Some(request) = update.request {
            match self.latest_request {
                Some(latest) if request < latest => return Applied::Stale,
                _ => self.latest_request = Some(request),
            }
        }

        match update.into_fetch() {
            Fetch::Loading => Applied::Loading,
            Fetch::Failed(error) => Applied::Failed(error),
            Fetch::Loaded(items) => {
                self.snapshot = Snapshot::Ready(items);
                Applied::Stored
            }
        }
    }
}
