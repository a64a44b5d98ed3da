//! The wizard's action vocabulary.
//!
//! On the wire an action is `{ "type": "SET_NAME", "payload": { ... } }`.

use forklift_core::models::inventory::{
    Disk, Namespace, NicProfile, SourceNetwork, SourceStorage, TargetNetwork, TargetStorage,
};
use forklift_core::models::plan::Plan;
use forklift_core::models::provider::Provider;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::availability::SnapshotUpdate;
use crate::error::WizardError;
use crate::mapping::Mapping;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Action {
    SetName(PlanName),
    SetDescription(PlanDescription),
    SetTargetProvider(PlanTargetProvider),
    SetTargetNamespace(PlanTargetNamespace),
    SetAvailableProviders(SnapshotUpdate<Provider>),
    SetExistingPlans(SnapshotUpdate<Plan>),
    SetAvailableTargetNamespaces(SnapshotUpdate<Namespace>),
    SetAvailableTargetNetworks(SnapshotUpdate<TargetNetwork>),
    SetAvailableSourceNetworks(SnapshotUpdate<SourceNetwork>),
    SetNicProfiles(SnapshotUpdate<NicProfile>),
    SetAvailableTargetStorages(SnapshotUpdate<TargetStorage>),
    SetAvailableSourceStorages(SnapshotUpdate<SourceStorage>),
    SetDisks(SnapshotUpdate<Disk>),
    AddNetworkMapping,
    DeleteNetworkMapping(MappingSelector),
    ReplaceNetworkMapping(MappingReplacement),
    AddStorageMapping,
    DeleteStorageMapping(MappingSelector),
    ReplaceStorageMapping(MappingReplacement),
    StartCreate,
    SetApiError(ApiError),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanName {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanDescription {
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanTargetProvider {
    pub target_provider_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanTargetNamespace {
    pub target_namespace: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingSelector {
    pub source: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingReplacement {
    pub current: Mapping,
    pub next: Mapping,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    #[serde(default)]
    pub error: Option<String>,
}

impl Action {
    /// Every wire `type` this vocabulary understands.
    pub const TYPES: &'static [&'static str] = &[
        "SET_NAME",
        "SET_DESCRIPTION",
        "SET_TARGET_PROVIDER",
        "SET_TARGET_NAMESPACE",
        "SET_AVAILABLE_PROVIDERS",
        "SET_EXISTING_PLANS",
        "SET_AVAILABLE_TARGET_NAMESPACES",
        "SET_AVAILABLE_TARGET_NETWORKS",
        "SET_AVAILABLE_SOURCE_NETWORKS",
        "SET_NIC_PROFILES",
        "SET_AVAILABLE_TARGET_STORAGES",
        "SET_AVAILABLE_SOURCE_STORAGES",
        "SET_DISKS",
        "ADD_NETWORK_MAPPING",
        "DELETE_NETWORK_MAPPING",
        "REPLACE_NETWORK_MAPPING",
        "ADD_STORAGE_MAPPING",
        "DELETE_STORAGE_MAPPING",
        "REPLACE_STORAGE_MAPPING",
        "START_CREATE",
        "SET_API_ERROR",
    ];

    /// The wire `type` of this action.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::SetName(_) => "SET_NAME",
            Self::SetDescription(_) => "SET_DESCRIPTION",
            Self::SetTargetProvider(_) => "SET_TARGET_PROVIDER",
            Self::SetTargetNamespace(_) => "SET_TARGET_NAMESPACE",
            Self::SetAvailableProviders(_) => "SET_AVAILABLE_PROVIDERS",
            Self::SetExistingPlans(_) => "SET_EXISTING_PLANS",
            Self::SetAvailableTargetNamespaces(_) => "SET_AVAILABLE_TARGET_NAMESPACES",
            Self::SetAvailableTargetNetworks(_) => "SET_AVAILABLE_TARGET_NETWORKS",
            Self::SetAvailableSourceNetworks(_) => "SET_AVAILABLE_SOURCE_NETWORKS",
            Self::SetNicProfiles(_) => "SET_NIC_PROFILES",
            Self::SetAvailableTargetStorages(_) => "SET_AVAILABLE_TARGET_STORAGES",
            Self::SetAvailableSourceStorages(_) => "SET_AVAILABLE_SOURCE_STORAGES",
            Self::SetDisks(_) => "SET_DISKS",
            Self::AddNetworkMapping => "ADD_NETWORK_MAPPING",
            Self::DeleteNetworkMapping(_) => "DELETE_NETWORK_MAPPING",
            Self::ReplaceNetworkMapping(_) => "REPLACE_NETWORK_MAPPING",
            Self::AddStorageMapping => "ADD_STORAGE_MAPPING",
            Self::DeleteStorageMapping(_) => "DELETE_STORAGE_MAPPING",
            Self::ReplaceStorageMapping(_) => "REPLACE_STORAGE_MAPPING",
            Self::StartCreate => "START_CREATE",
            Self::SetApiError(_) => "SET_API_ERROR",
        }
    }

    pub fn set_name(name: &str) -> Self {
        Self::SetName(PlanName {
            name: name.to_string(),
        })
    }

    pub fn set_description(description: &str) -> Self {
        Self::SetDescription(PlanDescription {
            description: description.to_string(),
        })
    }

    pub fn set_target_provider(name: &str) -> Self {
        Self::SetTargetProvider(PlanTargetProvider {
            target_provider_name: name.to_string(),
        })
    }

    pub fn set_target_namespace(namespace: &str) -> Self {
        Self::SetTargetNamespace(PlanTargetNamespace {
            target_namespace: namespace.to_string(),
        })
    }

    pub fn replace_network_mapping(current: Mapping, next: Mapping) -> Self {
        Self::ReplaceNetworkMapping(MappingReplacement { current, next })
    }

    pub fn replace_storage_mapping(current: Mapping, next: Mapping) -> Self {
        Self::ReplaceStorageMapping(MappingReplacement { current, next })
    }

    pub fn delete_network_mapping(source: &str) -> Self {
        Self::DeleteNetworkMapping(MappingSelector {
            source: source.to_string(),
        })
    }

    pub fn delete_storage_mapping(source: &str) -> Self {
        Self::DeleteStorageMapping(MappingSelector {
            source: source.to_string(),
        })
    }

    pub fn set_api_error(error: Option<String>) -> Self {
        Self::SetApiError(ApiError { error })
    }
}

/// Loosely typed action as received from outside (recorded logs, the
/// frontend bridge).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionEnvelope {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub payload: Value,
}

impl ActionEnvelope {
    pub fn new(action: &Action) -> Result<Self, WizardError> {
        Ok(serde_json::from_value(serde_json::to_value(action)?)?)
    }

    /// Decode into a typed action. Unknown types decode to `Ok(None)`; a
    /// known type with a payload of the wrong shape is an error.
    pub fn decode(self) -> Result<Option<Action>, WizardError> {
        if !Action::TYPES.contains(&self.kind.as_str()) {
            tracing::debug!(kind = %self.kind, "ignoring unknown action type");
            return Ok(None);
        }

        let mut object = serde_json::Map::new();
        object.insert("type".to_string(), Value::String(self.kind.clone()));
        let empty_payload = match &self.payload {
            Value::Null => true,
            Value::Object(fields) => fields.is_empty(),
            _ => false,
        };
        if !empty_payload || !is_unit_kind(&self.kind) {
            object.insert("payload".to_string(), self.payload);
        }

        serde_json::from_value(Value::Object(object))
            .map(Some)
            .map_err(|source| WizardError::MalformedPayload {
                kind: self.kind,
                source,
            })
    }
}

fn is_unit_kind(kind: &str) -> bool {
    matches!(
        kind,
        "ADD_NETWORK_MAPPING" | "ADD_STORAGE_MAPPING" | "START_CREATE"
    )
}
