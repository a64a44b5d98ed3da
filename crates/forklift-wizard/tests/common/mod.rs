#![allow(dead_code)]

use forklift_core::models::inventory::{
    Namespace, SourceNetwork, SourceStorage, SourceVm, TargetNetwork, TargetStorage, VmDisk,
    VmNetwork,
};
use forklift_core::models::plan::Plan;
use forklift_core::models::provider::{Provider, ProviderType};
use forklift_wizard::{Action, DraftSettings, InitialParams, PlanDraft, SnapshotUpdate, reduce};

pub const NS: &str = "konveyor";
pub const POD: &str = "Pod Networking";

pub fn source_provider() -> Provider {
    Provider::new("vcenter", NS, ProviderType::Vsphere)
        .with_url("https://vcenter.example/sdk")
        .with_uid("uid-vcenter")
}

pub fn host() -> Provider {
    Provider::new("host", NS, ProviderType::Openshift).with_uid("uid-host")
}

pub fn remote() -> Provider {
    Provider::new("remote", NS, ProviderType::Openshift)
        .with_url("https://api.remote.example:6443")
        .with_uid("uid-remote")
}

/// Two VMs using networks `net-a`, `net-b` and datastore `ds-1`.
pub fn vms() -> Vec<SourceVm> {
    let mut web = SourceVm::new("vm-1", "web");
    web.networks = vec![
        VmNetwork::Id {
            id: "net-a".to_string(),
        },
        VmNetwork::Id {
            id: "net-b".to_string(),
        },
    ];
    web.disks = vec![VmDisk {
        id: "ds-1".to_string(),
    }];

    let mut db = SourceVm::new("vm-2", "db");
    db.networks = vec![VmNetwork::Id {
        id: "net-a".to_string(),
    }];
    db.disks = vec![VmDisk {
        id: "ds-1".to_string(),
    }];

    vec![web, db]
}

pub fn params() -> InitialParams {
    InitialParams {
        namespace: NS.to_string(),
        source_provider: source_provider(),
        selected_vms: vms(),
    }
}

pub fn new_draft() -> PlanDraft {
    PlanDraft::new(params(), DraftSettings::default())
}

pub fn target_network(namespace: &str, name: &str) -> TargetNetwork {
    TargetNetwork {
        name: name.to_string(),
        namespace: namespace.to_string(),
        uid: format!("uid-{namespace}-{name}"),
    }
}

pub fn source_network(id: &str, name: &str) -> SourceNetwork {
    SourceNetwork {
        id: id.to_string(),
        name: name.to_string(),
        provider_type: ProviderType::Vsphere,
        namespace: None,
        path: None,
    }
}

pub fn target_storage(name: &str, is_default: bool) -> TargetStorage {
    TargetStorage {
        name: name.to_string(),
        uid: Some(format!("uid-{name}")),
        is_default,
    }
}

pub fn providers() -> Action {
    Action::SetAvailableProviders(SnapshotUpdate::loaded(vec![
        host(),
        remote(),
        source_provider(),
    ]))
}

pub fn plans(names: &[&str]) -> Action {
    Action::SetExistingPlans(SnapshotUpdate::loaded(
        names
            .iter()
            .map(|name| Plan::new(name, NS, source_provider().object_ref()))
            .collect(),
    ))
}

pub fn namespaces() -> Action {
    Action::SetAvailableTargetNamespaces(SnapshotUpdate::loaded(
        [NS, "default", "ns1", "ns2"]
            .into_iter()
            .map(Namespace::new)
            .collect(),
    ))
}

/// `konveyor/nad`, `ns1/t1`, `ns2/t2`.
pub fn target_networks() -> Action {
    Action::SetAvailableTargetNetworks(SnapshotUpdate::loaded(vec![
        target_network(NS, "nad"),
        target_network("ns1", "t1"),
        target_network("ns2", "t2"),
    ]))
}

pub fn source_networks() -> Action {
    Action::SetAvailableSourceNetworks(SnapshotUpdate::loaded(vec![
        source_network("net-a", "VM Network"),
        source_network("net-b", "Storage Net"),
        source_network("net-c", "Unused"),
    ]))
}

pub fn target_storages() -> Action {
    Action::SetAvailableTargetStorages(SnapshotUpdate::loaded(vec![
        target_storage("fast", false),
        target_storage("standard", true),
    ]))
}

pub fn source_storages() -> Action {
    Action::SetAvailableSourceStorages(SnapshotUpdate::loaded(vec![SourceStorage {
        id: "ds-1".to_string(),
        name: "datastore1".to_string(),
        provider_type: ProviderType::Vsphere,
        path: None,
    }]))
}

pub fn apply(draft: PlanDraft, actions: impl IntoIterator<Item = Action>) -> PlanDraft {
    actions.into_iter().fold(draft, reduce)
}

/// Host provider selected, every inventory loaded, defaults generated.
pub fn loaded_draft() -> PlanDraft {
    apply(
        new_draft(),
        [
            providers(),
            plans(&[]),
            namespaces(),
            target_networks(),
            source_networks(),
            target_storages(),
            source_storages(),
        ],
    )
}
