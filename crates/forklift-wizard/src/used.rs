//! Which source networks and storages the selected VMs actually use.
//!
//! VMs reference networks and storages by inventory id (or, for OpenShift
//! sources, by `namespace/name`). oVirt NICs go through vNIC profiles and
//! oVirt/OpenStack disks through disk records, so for those providers the
//! result depends on data that arrives after the wizard opens.

use std::collections::BTreeMap;

use forklift_core::models::inventory::{Disk, NicProfile, SourceVm, VmNetwork};
use forklift_core::models::provider::ProviderType;
use serde::Serialize;

/// A network reference taken from a VM, before it is turned into a label.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum UsedSource {
    Id(String),
    Label(String),
    Pod,
}

pub fn needs_nic_profiles(provider_type: ProviderType) -> bool {
    provider_type == ProviderType::Ovirt
}

pub fn needs_disks(provider_type: ProviderType) -> bool {
    matches!(provider_type, ProviderType::Ovirt | ProviderType::Openstack)
}

/// Deduplicated network references of `vms`, in first-seen order.
pub fn networks_used_by_selected_vms(
    vms: &[SourceVm],
    provider_type: ProviderType,
    nic_profiles: &[NicProfile],
) -> Vec<UsedSource> {
    let mut used = Vec::new();

    for vm in vms {
        if needs_nic_profiles(provider_type) {
            for nic in &vm.nics {
                if let Some(profile) = nic_profiles.iter().find(|p| p.id == nic.profile) {
                    push_unique(&mut used, UsedSource::Id(profile.network.clone()));
                }
            }
            continue;
        }

        for network in &vm.networks {
            let source = match network {
                VmNetwork::Pod => UsedSource::Pod,
                VmNetwork::Multus { name } => UsedSource::Label(name.clone()),
                VmNetwork::Id { id } => UsedSource::Id(id.clone()),
            };
            push_unique(&mut used, source);
        }
    }

    used
}

/// Deduplicated storage ids (datastore, storage domain or volume type) of
/// `vms`, in first-seen order.
pub fn storages_used_by_selected_vms(
    vms: &[SourceVm],
    provider_type: ProviderType,
    disks: &[Disk],
) -> Vec<String> {
    let mut used = Vec::new();

    for disk in vms.iter().flat_map(|vm| &vm.disks) {
        if needs_disks(provider_type) {
            if let Some(record) = disks.iter().find(|d| d.id == disk.id) {
                push_unique(&mut used, record.storage.clone());
            }
        } else {
            push_unique(&mut used, disk.id.clone());
        }
    }

    used
}

/// Two-way index between display labels and inventory ids.
///
/// Several ids may share a label (same network name in two datacenters);
/// they are shown as one source and all land in the submitted map.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LabelIndex {
    #[serde(rename = "labelToIds")]
    by_label: BTreeMap<String, Vec<String>>,
    #[serde(skip)]
    by_id: BTreeMap<String, String>,
}

impl LabelIndex {
    pub fn from_pairs(pairs: impl IntoIterator<Item = (String, String)>) -> Self {
        let mut index = Self::default();
        for (label, id) in pairs {
            index
                .by_id
                .entry(id.clone())
                .or_insert_with(|| label.clone());
            let ids = index.by_label.entry(label).or_default();
            if !ids.contains(&id) {
                ids.push(id);
            }
        }
        index
    }

    pub fn label_for(&self, id: &str) -> Option<&str> {
        self.by_id.get(id).map(String::as_str)
    }

    /// First id listed under `label`.
    pub fn id_for(&self, label: &str) -> Option<&str> {
        self.ids_for(label).first().map(String::as_str)
    }

    pub fn ids_for(&self, label: &str) -> &[String] {
        self.by_label
            .get(label)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Sorted labels.
    pub fn labels(&self) -> Vec<String> {
        self.by_label.keys().cloned().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.by_label.is_empty()
    }
}

/// Turn VM network references into labels. An id the source inventory does
/// not list is labelled with the id itself, so it still needs a mapping.
pub fn resolve_network_labels(
    used: &[UsedSource],
    index: &LabelIndex,
    pod_label: &str,
) -> Vec<String> {
    let mut labels = Vec::new();
    for source in used {
        let label = match source {
            UsedSource::Id(id) => index.label_for(id).unwrap_or(id).to_string(),
            UsedSource::Label(label) => label.clone(),
            UsedSource::Pod => pod_label.to_string(),
        };
        push_unique(&mut labels, label);
    }
    labels
}

/// Storage analogue of [`resolve_network_labels`].
pub fn resolve_storage_labels(used: &[String], index: &LabelIndex) -> Vec<String> {
    let mut labels = Vec::new();
    for id in used {
        let label = index.label_for(id).unwrap_or(id);
        push_unique(&mut labels, label.to_string());
    }
    labels
}

fn push_unique<T: PartialEq>(items: &mut Vec<T>, item: T) {
    if !items.contains(&item) {
        items.push(item);
    }
}
