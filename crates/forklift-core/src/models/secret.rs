use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::meta::ObjectMeta;
use crate::object_ref::ObjectRef;

/// Credentials for a provider, stored as a core/v1 `Secret`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Secret {
    pub api_version: String,
    pub kind: String,
    pub metadata: ObjectMeta,
    #[serde(rename = "type", default = "Secret::default_type")]
    pub secret_type: String,
    #[serde(default)]
    pub string_data: BTreeMap<String, String>,
}

impl Secret {
    pub const KIND: &'static str = "Secret";

    pub fn new(metadata: ObjectMeta, string_data: BTreeMap<String, String>) -> Self {
        Self {
            api_version: "v1".to_string(),
            kind: Self::KIND.to_string(),
            metadata,
            secret_type: Self::default_type(),
            string_data,
        }
    }

    fn default_type() -> String {
        "Opaque".to_string()
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
