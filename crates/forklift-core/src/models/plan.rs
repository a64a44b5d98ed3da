use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::meta::ObjectMeta;
use super::FORKLIFT_API_VERSION;
use crate::object_ref::ObjectRef;

/// A Forklift migration `Plan` resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Plan {
    pub api_version: String,
    pub kind: String,
    pub metadata: ObjectMeta,
    pub spec: PlanSpec,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PlanSpec {
    #[serde(default)]
    pub description: String,
    pub provider: PlanProviders,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_namespace: Option<String>,
    #[serde(default)]
    pub vms: Vec<PlanVm>,
    #[serde(default)]
    pub map: PlanMaps,
    #[serde(default)]
    pub warm: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PlanProviders {
    pub source: ObjectRef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination: Option<ObjectRef>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PlanVm {
    pub name: String,
    pub id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PlanMaps {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network: Option<ObjectRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage: Option<ObjectRef>,
}

impl Plan {
    pub const KIND: &'static str = "Plan";

    pub fn new(name: &str, namespace: &str, source: ObjectRef) -> Self {
        Self {
            api_version: FORKLIFT_API_VERSION.to_string(),
            kind: Self::KIND.to_string(),
            metadata: ObjectMeta::named(name, namespace),
            spec: PlanSpec {
                description: String::new(),
                provider: PlanProviders {
                    source,
                    destination: None,
                },
                target_namespace: None,
                vms: Vec::new(),
                map: PlanMaps::default(),
                warm: false,
            },
        }
    }

    pub fn name(&self) -> &str {
        &self.metadata.name
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
