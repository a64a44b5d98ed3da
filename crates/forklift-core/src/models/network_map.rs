use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::meta::ObjectMeta;
use super::FORKLIFT_API_VERSION;
use crate::object_ref::ObjectRef;

/// A Forklift `NetworkMap`: which source network lands on which target
/// network.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct NetworkMap {
    pub api_version: String,
    pub kind: String,
    pub metadata: ObjectMeta,
    pub spec: NetworkMapSpec,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NetworkMapSpec {
    pub provider: MapProviders,
    #[serde(default)]
    pub map: Vec<NetworkPair>,
}

/// Source/destination provider pair shared by network and storage maps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct MapProviders {
    pub source: ObjectRef,
    pub destination: ObjectRef,
}

/// Identifies a source inventory item by id and/or name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SourceRef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// `pod` for an OpenShift source's pod network, which has no id.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub source_type: Option<String>,
}

impl SourceRef {
    pub fn inventory(id: &str, name: &str) -> Self {
        Self {
            id: Some(id.to_string()),
            name: Some(name.to_string()),
            source_type: None,
        }
    }

    pub fn pod() -> Self {
        Self {
            source_type: Some("pod".to_string()),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NetworkPair {
    pub source: SourceRef,
    pub destination: NetworkDestination,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "type", rename_all = "lowercase")]
#[ts(export)]
pub enum NetworkDestination {
    /// The cluster's default pod network.
    Pod,
    /// A NetworkAttachmentDefinition in the target cluster.
    Multus { name: String, namespace: String },
}

impl NetworkMap {
    pub const KIND: &'static str = "NetworkMap";

    pub fn new(metadata: ObjectMeta, provider: MapProviders, map: Vec<NetworkPair>) -> Self {
        Self {
            api_version: FORKLIFT_API_VERSION.to_string(),
            kind: Self::KIND.to_string(),
            metadata,
            spec: NetworkMapSpec { provider, map },
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
