//! Items served by the Forklift inventory service and the target cluster.
//!
//! Only the fields the plan wizard reads are modelled.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::provider::ProviderType;

/// A namespace on the target cluster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Namespace {
    pub name: String,
}

impl Namespace {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
        }
    }
}

/// A NetworkAttachmentDefinition on the target cluster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TargetNetwork {
    pub name: String,
    pub namespace: String,
    pub uid: String,
}

/// A storage class on the target cluster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct TargetStorage {
    pub name: String,
    #[serde(default)]
    pub uid: Option<String>,
    #[serde(default)]
    pub is_default: bool,
}

/// A network known to the source provider's inventory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct SourceNetwork {
    pub id: String,
    pub name: String,
    pub provider_type: ProviderType,
    /// OpenShift only.
    #[serde(default)]
    pub namespace: Option<String>,
    /// oVirt only: `datacenter/network`.
    #[serde(default)]
    pub path: Option<String>,
}

impl SourceNetwork {
    /// Human-readable label shown in mapping pickers.
    pub fn label(&self) -> String {
        match self.provider_type {
            ProviderType::Openshift => match &self.namespace {
                Some(ns) => format!("{ns}/{}", self.name),
                None => self.name.clone(),
            },
            ProviderType::Ovirt => self.path.clone().unwrap_or_else(|| self.name.clone()),
            ProviderType::Openstack | ProviderType::Ova | ProviderType::Vsphere => {
                self.name.clone()
            }
        }
    }
}

/// A datastore, storage domain or volume type in the source inventory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct SourceStorage {
    pub id: String,
    pub name: String,
    pub provider_type: ProviderType,
    #[serde(default)]
    pub path: Option<String>,
}

impl SourceStorage {
    pub fn label(&self) -> String {
        match self.provider_type {
            ProviderType::Ovirt => self.path.clone().unwrap_or_else(|| self.name.clone()),
            _ => self.name.clone(),
        }
    }
}

/// oVirt vNIC profile: VM NICs reference a profile, the profile references
/// the network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NicProfile {
    pub id: String,
    pub name: String,
    pub network: String,
}

/// oVirt disk or OpenStack volume: VM disks reference it, it references the
/// storage domain / volume type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Disk {
    pub id: String,
    pub storage: String,
}

/// A VM selected for migration, with the references needed to work out
/// which networks and storages it uses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SourceVm {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub networks: Vec<VmNetwork>,
    #[serde(default)]
    pub nics: Vec<VmNic>,
    #[serde(default)]
    pub disks: Vec<VmDisk>,
}

impl SourceVm {
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            networks: Vec::new(),
            nics: Vec::new(),
            disks: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "type", rename_all = "lowercase")]
#[ts(export)]
pub enum VmNetwork {
    /// The source cluster's pod network (OpenShift sources).
    Pod,
    /// A NetworkAttachmentDefinition, named `namespace/name` (OpenShift sources).
    Multus { name: String },
    /// An inventory network id (vSphere, OpenStack, OVA).
    Id { id: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct VmNic {
    pub profile: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct VmDisk {
    /// Datastore id (vSphere, OVA) or disk/volume id (oVirt, OpenStack).
    pub id: String,
}
