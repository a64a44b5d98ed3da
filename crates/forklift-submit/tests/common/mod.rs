#![allow(dead_code)]

use forklift_core::models::inventory::{
    Namespace, SourceNetwork, SourceStorage, SourceVm, TargetNetwork, TargetStorage, VmDisk,
    VmNetwork,
};
use forklift_core::models::provider::{Provider, ProviderType};
use forklift_wizard::{Action, DraftSettings, InitialParams, PlanDraft, SnapshotUpdate, reduce};

pub const NS: &str = "konveyor";

pub fn source_provider() -> Provider {
    Provider::new("vcenter", NS, ProviderType::Vsphere)
        .with_url("https://vcenter.example/sdk")
        .with_uid("uid-vcenter")
}

pub fn host() -> Provider {
    Provider::new("host", NS, ProviderType::Openshift).with_uid("uid-host")
}

fn vm() -> SourceVm {
    let mut vm = SourceVm::new("vm-1", "web");
    vm.networks = vec![
        VmNetwork::Id {
            id: "net-a".to_string(),
        },
        VmNetwork::Id {
            id: "net-b".to_string(),
        },
    ];
    vm.disks = vec![VmDisk {
        id: "ds-1".to_string(),
    }];
    vm
}

pub fn new_draft() -> PlanDraft {
    PlanDraft::new(
        InitialParams {
            namespace: NS.to_string(),
            source_provider: source_provider(),
            selected_vms: vec![vm()],
        },
        DraftSettings::default(),
    )
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

/// Host target, namespace `konveyor`, both networks mapped to
/// `konveyor/nad`, the datastore mapped to `standard`.
pub fn ready_draft() -> PlanDraft {
    ready_draft_with(vec![
        source_network("net-a", "VM Network"),
        source_network("net-b", "Storage Net"),
    ])
}

/// Like [`ready_draft`], with a different source network inventory.
pub fn ready_draft_with(source_networks: Vec<SourceNetwork>) -> PlanDraft {
    [
        Action::SetAvailableProviders(SnapshotUpdate::loaded(vec![host(), source_provider()])),
        Action::SetExistingPlans(SnapshotUpdate::loaded(Vec::new())),
        Action::SetAvailableTargetNamespaces(SnapshotUpdate::loaded(vec![Namespace::new(NS)])),
        Action::SetAvailableTargetNetworks(SnapshotUpdate::loaded(vec![TargetNetwork {
            name: "nad".to_string(),
            namespace: NS.to_string(),
            uid: "uid-nad".to_string(),
        }])),
        Action::SetAvailableSourceNetworks(SnapshotUpdate::loaded(source_networks)),
        Action::SetAvailableTargetStorages(SnapshotUpdate::loaded(vec![TargetStorage {
            name: "standard".to_string(),
            uid: None,
            is_default: true,
        }])),
        Action::SetAvailableSourceStorages(SnapshotUpdate::loaded(vec![SourceStorage {
            id: "ds-1".to_string(),
            name: "datastore1".to_string(),
            provider_type: ProviderType::Vsphere,
            path: None,
        }])),
        Action::set_name("migrate-web"),
    ]
    .into_iter()
    .fold(new_draft(), reduce)
}
