use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::meta::ObjectMeta;
use super::network_map::{MapProviders, SourceRef};
use super::FORKLIFT_API_VERSION;
use crate::object_ref::ObjectRef;

/// A Forklift `StorageMap`: which source datastore/domain/volume type lands
/// on which target storage class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct StorageMap {
    pub api_version: String,
    pub kind: String,
    pub metadata: ObjectMeta,
    pub spec: StorageMapSpec,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct StorageMapSpec {
    pub provider: MapProviders,
    #[serde(default)]
    pub map: Vec<StoragePair>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct StoragePair {
    pub source: SourceRef,
    pub destination: StorageDestination,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct StorageDestination {
    pub storage_class: String,
}

impl StorageMap {
    pub const KIND: &'static str = "StorageMap";

    pub fn new(metadata: ObjectMeta, provider: MapProviders, map: Vec<StoragePair>) -> Self {
        Self {
            api_version: FORKLIFT_API_VERSION.to_string(),
            kind: Self::KIND.to_string(),
            metadata,
            spec: StorageMapSpec { provider, map },
        }
    }

    pub fn object_ref(&self) -> ObjectRef {
        ObjectRef {
            api_version: self.api_version.clone(),
            kind: self.kind.clone(),
            name: self.metadata.name.clone(),
            namespace: self.metadata.namespace.clone(),
            uid: self.metadata.uid.clone(),
        }
    }
}
