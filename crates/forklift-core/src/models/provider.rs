use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::meta::ObjectMeta;
use super::FORKLIFT_API_VERSION;
use crate::error::CoreError;
use crate::object_ref::ObjectRef;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum ProviderType {
    Openshift,
    Openstack,
    Ova,
    Ovirt,
    Vsphere,
}

impl ProviderType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Openshift => "openshift",
            Self::Openstack => "openstack",
            Self::Ova => "ova",
            Self::Ovirt => "ovirt",
            Self::Vsphere => "vsphere",
        }
    }
}

impl fmt::Display for ProviderType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "openshift" => Ok(Self::Openshift),
            "openstack" => Ok(Self::Openstack),
            "ova" => Ok(Self::Ova),
            "ovirt" => Ok(Self::Ovirt),
            "vsphere" => Ok(Self::Vsphere),
            other => Err(CoreError::UnknownProviderType(other.to_string())),
        }
    }
}

/// A Forklift `Provider` resource: a source or destination virtualization
/// platform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Provider {
    pub api_version: String,
    pub kind: String,
    pub metadata: ObjectMeta,
    pub spec: ProviderSpec,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ProviderSpec {
    #[serde(rename = "type")]
    pub provider_type: ProviderType,
    /// Empty for the OpenShift cluster the console runs on.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret: Option<ObjectRef>,
}

impl Provider {
    pub const KIND: &'static str = "Provider";

    pub fn new(name: &str, namespace: &str, provider_type: ProviderType) -> Self {
        Self {
            api_version: FORKLIFT_API_VERSION.to_string(),
            kind: Self::KIND.to_string(),
            metadata: ObjectMeta::named(name, namespace),
            spec: ProviderSpec {
                provider_type,
                url: None,
                secret: None,
            },
        }
    }

    pub fn with_url(mut self, url: &str) -> Self {
        self.spec.url = Some(url.to_string());
        self
    }

    pub fn with_uid(mut self, uid: &str) -> Self {
        self.metadata.uid = Some(uid.to_string());
        self
    }

    pub fn name(&self) -> &str {
        &self.metadata.name
    }

    pub fn provider_type(&self) -> ProviderType {
        self.spec.provider_type
    }

    /// Only OpenShift clusters can receive migrated VMs.
    pub fn is_target(&self) -> bool {
        self.spec.provider_type == ProviderType::Openshift
    }

    /// The "host" provider: the OpenShift cluster the console itself runs on,
    /// registered without a URL.
    pub fn is_local_openshift(&self) -> bool {
        self.spec.provider_type == ProviderType::Openshift
            && self.spec.url.as_deref().is_none_or(str::is_empty)
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
