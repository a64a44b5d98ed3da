mod common;

use common::*;
use forklift_core::models::inventory::{
    NicProfile, SourceNetwork, SourceStorage, SourceVm, VmNic,
};
use forklift_core::models::provider::{Provider, ProviderType};
use forklift_wizard::availability::Snapshot;
use forklift_wizard::{
    Action, DraftSettings, InitialParams, Mapping, MappingState, NetworkDefault, PlanDraft,
    SnapshotUpdate, Validation, reduce,
};

#[test]
fn new_draft_starts_unvalidated() {
    let draft = new_draft();
    assert!(draft.plan_name().starts_with("vcenter-"));
    assert_eq!(draft.plan_name().len(), "vcenter-".len() + 8);
    assert_ne!(draft.network_map_name, draft.storage_map_name);
    assert_eq!(draft.plan.spec.vms.len(), 2);
    assert_eq!(draft.validation.plan_name, Validation::Default);
    assert_eq!(draft.target_namespace(), None);
    assert!(!draft.calculated_per_namespace.network_mappings.is_generated());
    assert!(!draft.is_ready_to_submit());
}

#[test]
fn loaded_draft_selects_host_and_generates_defaults() {
    let draft = loaded_draft();

    assert_eq!(draft.target_provider_name(), Some("host"));
    assert_eq!(draft.validation.target_provider, Validation::Success);
    // Host provider: the plan's own namespace wins over "default".
    assert_eq!(draft.target_namespace(), Some(NS));
    assert_eq!(draft.validation.target_namespace, Validation::Success);
    assert_eq!(draft.validation.plan_name, Validation::Success);

    assert_eq!(
        draft.network_mappings(),
        &[
            Mapping::new("VM Network", "konveyor/nad"),
            Mapping::new("Storage Net", "konveyor/nad"),
        ]
    );
    assert_eq!(
        draft.storage_mappings(),
        &[Mapping::new("datastore1", "standard")]
    );
    assert!(draft.unmapped_networks().is_empty());
    assert!(draft.unmapped_storages().is_empty());
    assert!(draft.is_ready_to_submit());
}

// ---------------------------------------------------------------------------
// Provider selection
// ---------------------------------------------------------------------------

#[test]
fn reselecting_the_same_provider_is_a_no_op() {
    let loaded = loaded_draft();

    let once = reduce(loaded.clone(), Action::set_target_provider("remote"));
    let twice = reduce(once.clone(), Action::set_target_provider("remote"));
    assert_eq!(once, twice);

    let same = reduce(loaded.clone(), Action::set_target_provider("host"));
    assert_eq!(same, loaded);
}

#[test]
fn changing_provider_cascades_downstream_reset() {
    let draft = reduce(loaded_draft(), Action::set_target_provider("remote"));

    assert_eq!(draft.target_provider_name(), Some("remote"));
    assert_eq!(
        draft.target_provider.as_ref().map(Provider::name),
        Some("remote")
    );
    assert_eq!(draft.validation.target_provider, Validation::Success);
    assert_eq!(draft.target_namespace(), None);
    assert_eq!(draft.validation.target_namespace, Validation::Default);
    assert_eq!(draft.existing.target_namespaces.snapshot(), &Snapshot::Pending);
    assert_eq!(draft.existing.target_networks.snapshot(), &Snapshot::Pending);
    assert_eq!(draft.existing.target_storages.snapshot(), &Snapshot::Pending);
    assert_eq!(
        draft.calculated_per_namespace.network_mappings,
        MappingState::NotGenerated
    );
    assert_eq!(
        draft.calculated_per_namespace.storage_mappings,
        MappingState::NotGenerated
    );
    assert!(draft.calculated_per_namespace.target_network_labels.is_empty());

    // Source-side data is not provider relative and survives.
    assert!(draft.existing.source_networks.is_ready());
    assert_eq!(
        draft.unmapped_networks(),
        &["VM Network".to_string(), "Storage Net".to_string()]
    );
}

#[test]
fn unknown_provider_clears_destination() {
    let draft = reduce(loaded_draft(), Action::set_target_provider("vcenter"));
    assert_eq!(draft.target_provider_name(), None);
    assert!(draft.target_provider.is_none());
    assert_eq!(draft.validation.target_provider, Validation::Error);
    assert_eq!(draft.target_namespace(), None);
}

#[test]
fn provider_list_without_current_destination_falls_back_to_host() {
    let draft = reduce(loaded_draft(), Action::set_target_provider("remote"));
    let draft = reduce(
        draft,
        Action::SetAvailableProviders(SnapshotUpdate::loaded(vec![host(), source_provider()])),
    );
    assert_eq!(draft.target_provider_name(), Some("host"));
    assert_eq!(draft.validation.target_provider, Validation::Success);
}

#[test]
fn provider_list_keeps_current_destination() {
    let draft = reduce(loaded_draft(), Action::set_target_provider("remote"));
    let draft = reduce(draft, providers());
    assert_eq!(draft.target_provider_name(), Some("remote"));
}

#[test]
fn no_eligible_provider_is_an_error() {
    let draft = reduce(
        new_draft(),
        Action::SetAvailableProviders(SnapshotUpdate::loaded(vec![source_provider()])),
    );
    assert_eq!(draft.target_provider_name(), None);
    assert_eq!(draft.validation.target_provider, Validation::Error);
}

// ---------------------------------------------------------------------------
// Availability updates
// ---------------------------------------------------------------------------

#[test]
fn loading_update_does_not_clobber_snapshot() {
    let draft = loaded_draft();
    let before = draft.existing.target_networks.items().to_vec();

    let draft = reduce(
        draft,
        Action::SetAvailableTargetNetworks(SnapshotUpdate::loading()),
    );
    assert_eq!(draft.existing.target_networks.items(), before.as_slice());

    let draft = reduce(
        draft,
        Action::SetAvailableTargetNetworks(SnapshotUpdate::failed("connection refused")),
    );
    assert_eq!(draft.existing.target_networks.items(), before.as_slice());
    assert_eq!(draft.network_mappings().len(), 2);
}

#[test]
fn stale_response_is_ignored() {
    let draft = apply(
        loaded_draft(),
        [
            Action::SetAvailableTargetNetworks(
                SnapshotUpdate::loaded(vec![target_network(NS, "newer")]).with_request(2),
            ),
            Action::SetAvailableTargetNetworks(
                SnapshotUpdate::loaded(vec![target_network(NS, "older")]).with_request(1),
            ),
        ],
    );
    let names: Vec<&str> = draft
        .existing
        .target_networks
        .items()
        .iter()
        .map(|n| n.name.as_str())
        .collect();
    assert_eq!(names, ["newer"]);
}

#[test]
fn stale_response_stays_rejected_after_cascade() {
    let draft = reduce(
        loaded_draft(),
        Action::SetAvailableTargetNetworks(
            SnapshotUpdate::loaded(vec![target_network(NS, "nad")]).with_request(5),
        ),
    );
    let draft = reduce(draft, Action::set_target_provider("remote"));
    let draft = reduce(
        draft,
        Action::SetAvailableTargetNetworks(
            SnapshotUpdate::loaded(vec![target_network(NS, "nad")]).with_request(4),
        ),
    );
    assert!(!draft.existing.target_networks.is_ready());
}

#[test]
fn availability_updates_converge_in_any_order() {
    let base = reduce(new_draft(), providers());
    let updates = vec![
        plans(&["existing-plan"]),
        namespaces(),
        target_networks(),
        source_networks(),
        target_storages(),
        source_storages(),
        Action::SetAvailableTargetNetworks(SnapshotUpdate::loading()),
    ];

    let expected = apply(base.clone(), updates.clone());
    assert_eq!(expected.network_mappings().len(), 2);

    for order in permutations(updates.len()) {
        let draft = apply(base.clone(), order.iter().map(|&i| updates[i].clone()));
        assert_eq!(
            draft.calculated_per_namespace, expected.calculated_per_namespace,
            "order {order:?}"
        );
        assert_eq!(draft.validation, expected.validation, "order {order:?}");
        assert_eq!(draft.target_namespace(), expected.target_namespace());
    }
}

#[test]
fn namespace_and_networks_converge_in_either_order() {
    // No namespace list: nothing picks a namespace on its own.
    let base = apply(new_draft(), [providers(), source_networks()]);

    let namespace_first = apply(
        base.clone(),
        [Action::set_target_namespace("ns1"), target_networks()],
    );
    let networks_first = apply(
        base,
        [target_networks(), Action::set_target_namespace("ns1")],
    );
    assert_eq!(
        namespace_first.calculated_per_namespace,
        networks_first.calculated_per_namespace
    );
    assert_eq!(
        namespace_first.network_mappings(),
        &[
            Mapping::new("VM Network", "ns1/t1"),
            Mapping::new("Storage Net", "ns1/t1"),
        ]
    );
}

fn permutations(n: usize) -> Vec<Vec<usize>> {
    if n == 0 {
        return vec![Vec::new()];
    }
    let mut out = Vec::new();
    for shorter in permutations(n - 1) {
        for at in 0..=shorter.len() {
            let mut order = shorter.clone();
            order.insert(at, n - 1);
            out.push(order);
        }
    }
    out
}

// ---------------------------------------------------------------------------
// Target namespace
// ---------------------------------------------------------------------------

#[test]
fn remote_provider_defaults_to_configured_namespace() {
    let draft = apply(
        loaded_draft(),
        [Action::set_target_provider("remote"), namespaces()],
    );
    assert_eq!(draft.target_namespace(), Some("default"));
    assert_eq!(draft.validation.target_namespace, Validation::Success);
}

#[test]
fn namespace_default_falls_back_to_first_listed() {
    let draft = apply(
        loaded_draft(),
        [
            Action::set_target_provider("remote"),
            Action::SetAvailableTargetNamespaces(SnapshotUpdate::loaded(vec![
                forklift_core::models::inventory::Namespace::new("apps"),
                forklift_core::models::inventory::Namespace::new("infra"),
            ])),
        ],
    );
    assert_eq!(draft.target_namespace(), Some("apps"));
}

#[test]
fn unknown_namespace_fails_validation() {
    let draft = reduce(loaded_draft(), Action::set_target_namespace("missing"));
    assert_eq!(draft.target_namespace(), Some("missing"));
    assert_eq!(draft.validation.target_namespace, Validation::Error);
    assert!(!draft.is_ready_to_submit());
}

#[test]
fn namespace_change_drops_invalid_mappings_without_remapping() {
    let draft = apply(
        new_draft(),
        [
            providers(),
            namespaces(),
            Action::set_target_namespace("ns1"),
            target_networks(),
            source_networks(),
        ],
    );
    assert_eq!(
        draft.network_mappings(),
        &[
            Mapping::new("VM Network", "ns1/t1"),
            Mapping::new("Storage Net", "ns1/t1"),
        ]
    );

    let draft = reduce(draft, Action::set_target_namespace("ns2"));
    assert_eq!(
        draft.calculated_per_namespace.network_mappings,
        MappingState::Tracked(Vec::new())
    );
    assert_eq!(
        draft.unmapped_networks(),
        &["VM Network".to_string(), "Storage Net".to_string()]
    );
    assert_eq!(
        draft.calculated_per_namespace.target_network_labels,
        ["ns2/t2".to_string()]
    );
}

#[test]
fn pod_network_mapping_survives_namespace_change() {
    let draft = reduce(
        loaded_draft(),
        Action::replace_network_mapping(
            Mapping::new("Storage Net", "konveyor/nad"),
            Mapping::new("Storage Net", POD),
        ),
    );
    let draft = reduce(draft, Action::set_target_namespace("ns1"));
    assert_eq!(draft.network_mappings(), &[Mapping::new("Storage Net", POD)]);
    assert_eq!(draft.unmapped_networks(), &["VM Network".to_string()]);
}

// ---------------------------------------------------------------------------
// Source inventory labels
// ---------------------------------------------------------------------------

fn loaded_with_source_networks(networks: Vec<SourceNetwork>) -> PlanDraft {
    apply(
        new_draft(),
        [
            providers(),
            plans(&[]),
            namespaces(),
            target_networks(),
            Action::SetAvailableSourceNetworks(SnapshotUpdate::loaded(networks)),
            target_storages(),
            source_storages(),
        ],
    )
}

#[test]
fn networks_sharing_a_label_are_one_used_source() {
    let draft = loaded_with_source_networks(vec![
        source_network("net-x", "VM Network"),
        source_network("net-a", "VM Network"),
        source_network("net-b", "Storage Net"),
    ]);

    assert_eq!(
        draft.network_mappings(),
        &[
            Mapping::new("VM Network", "konveyor/nad"),
            Mapping::new("Storage Net", "konveyor/nad"),
        ]
    );
    assert!(draft.unmapped_networks().is_empty());
    assert_eq!(
        draft.calculated_once.source_network_labels.ids_for("VM Network"),
        ["net-x".to_string(), "net-a".to_string()]
    );
    let vm_network = draft
        .calculated_per_namespace
        .network_sources
        .iter()
        .find(|s| s.label == "VM Network")
        .unwrap();
    assert!(vm_network.used_by_selected_vms);
    assert!(vm_network.is_mapped);
}

#[test]
fn storages_sharing_a_label_are_one_used_source() {
    let draft = reduce(
        loaded_draft(),
        Action::SetAvailableSourceStorages(SnapshotUpdate::loaded(vec![
            SourceStorage {
                id: "ds-9".to_string(),
                name: "datastore1".to_string(),
                provider_type: ProviderType::Vsphere,
                path: None,
            },
            SourceStorage {
                id: "ds-1".to_string(),
                name: "datastore1".to_string(),
                provider_type: ProviderType::Vsphere,
                path: None,
            },
        ])),
    );
    assert_eq!(
        draft.storage_mappings(),
        &[Mapping::new("datastore1", "standard")]
    );
    assert!(draft.unmapped_storages().is_empty());
}

#[test]
fn network_missing_from_inventory_still_needs_a_mapping() {
    let draft = loaded_with_source_networks(vec![source_network("net-a", "VM Network")]);

    assert_eq!(
        draft.network_mappings(),
        &[
            Mapping::new("VM Network", "konveyor/nad"),
            Mapping::new("net-b", "konveyor/nad"),
        ]
    );
    assert!(draft.is_ready_to_submit());

    let draft = reduce(draft, Action::delete_network_mapping("net-b"));
    assert_eq!(draft.unmapped_networks(), &["net-b".to_string()]);
    assert!(!draft.is_ready_to_submit());
}

#[test]
fn unresolved_networks_block_submission_until_inventory_arrives() {
    let draft = apply(
        new_draft(),
        [
            providers(),
            plans(&[]),
            namespaces(),
            target_networks(),
            target_storages(),
            source_storages(),
        ],
    );
    assert!(draft.validation.all_success());
    assert!(draft.network_mappings().is_empty());
    assert_eq!(
        draft.unmapped_networks(),
        &["net-a".to_string(), "net-b".to_string()]
    );
    assert!(!draft.is_ready_to_submit());

    let draft = reduce(draft, source_networks());
    assert!(draft.unmapped_networks().is_empty());
    assert!(draft.is_ready_to_submit());
}

#[test]
fn storage_missing_from_inventory_gets_a_default() {
    let draft = apply(
        new_draft(),
        [
            providers(),
            plans(&[]),
            namespaces(),
            target_networks(),
            source_networks(),
            target_storages(),
            Action::SetAvailableSourceStorages(SnapshotUpdate::loaded(Vec::new())),
        ],
    );
    assert_eq!(draft.storage_mappings(), &[Mapping::new("ds-1", "standard")]);
    assert!(draft.is_ready_to_submit());
}

// ---------------------------------------------------------------------------
// Plan name
// ---------------------------------------------------------------------------

#[test]
fn plan_name_validation_round_trip() {
    let draft = reduce(loaded_draft(), plans(&["taken"]));

    let draft = reduce(draft, Action::set_name("taken"));
    assert_eq!(draft.validation.plan_name, Validation::Error);

    let draft = reduce(draft, Action::set_name("fresh"));
    assert_eq!(draft.validation.plan_name, Validation::Success);
    assert_eq!(draft.plan_name(), "fresh");

    let draft = reduce(draft, Action::set_name("Not_A_Name"));
    assert_eq!(draft.validation.plan_name, Validation::Error);
}

#[test]
fn late_plan_list_revalidates_name() {
    let draft = reduce(new_draft(), Action::set_name("migrate-web"));
    assert_eq!(draft.validation.plan_name, Validation::Success);

    let draft = reduce(draft, plans(&["migrate-web"]));
    assert_eq!(draft.validation.plan_name, Validation::Error);
}

#[test]
fn description_is_stored() {
    let draft = reduce(new_draft(), Action::set_description("wave 1"));
    assert_eq!(draft.plan.spec.description, "wave 1");
}

// ---------------------------------------------------------------------------
// Mapping edits
// ---------------------------------------------------------------------------

#[test]
fn delete_then_add_network_mapping() {
    let draft = reduce(loaded_draft(), Action::delete_network_mapping("VM Network"));
    assert_eq!(
        draft.network_mappings(),
        &[Mapping::new("Storage Net", "konveyor/nad")]
    );
    assert_eq!(draft.unmapped_networks(), &["VM Network".to_string()]);
    assert!(!draft.is_ready_to_submit());

    let draft = reduce(draft, Action::AddNetworkMapping);
    assert_eq!(
        draft.network_mappings(),
        &[
            Mapping::new("Storage Net", "konveyor/nad"),
            Mapping::new("VM Network", "konveyor/nad"),
        ]
    );
    assert!(draft.unmapped_networks().is_empty());

    // Nothing left to add.
    let again = reduce(draft.clone(), Action::AddNetworkMapping);
    assert_eq!(again, draft);
}

#[test]
fn replace_rejects_unavailable_destination() {
    let draft = loaded_draft();
    let next = reduce(
        draft.clone(),
        Action::replace_network_mapping(
            Mapping::new("VM Network", "konveyor/nad"),
            Mapping::new("VM Network", "ns1/t1"),
        ),
    );
    assert_eq!(next.network_mappings(), draft.network_mappings());
}

#[test]
fn replace_rejects_source_not_used_by_vms() {
    let draft = loaded_draft();
    let next = reduce(
        draft.clone(),
        Action::replace_network_mapping(
            Mapping::new("VM Network", "konveyor/nad"),
            Mapping::new("Unused", "konveyor/nad"),
        ),
    );
    assert_eq!(next.network_mappings(), draft.network_mappings());
}

#[test]
fn storage_mapping_edits() {
    let draft = reduce(
        loaded_draft(),
        Action::replace_storage_mapping(
            Mapping::new("datastore1", "standard"),
            Mapping::new("datastore1", "fast"),
        ),
    );
    assert_eq!(
        draft.storage_mappings(),
        &[Mapping::new("datastore1", "fast")]
    );

    let draft = reduce(draft, Action::delete_storage_mapping("datastore1"));
    assert!(draft.storage_mappings().is_empty());
    assert_eq!(draft.unmapped_storages(), &["datastore1".to_string()]);

    let draft = reduce(draft, Action::AddStorageMapping);
    assert_eq!(
        draft.storage_mappings(),
        &[Mapping::new("datastore1", "fast")]
    );
}

#[test]
fn storage_default_prefers_default_class() {
    let draft = loaded_draft();
    assert_eq!(
        draft.calculated_per_namespace.target_storage_labels,
        ["fast".to_string(), "standard".to_string()]
    );
    assert_eq!(draft.storage_mappings()[0].destination, "standard");
}

// ---------------------------------------------------------------------------
// Settings and provider-specific lookups
// ---------------------------------------------------------------------------

#[test]
fn pod_network_policy_maps_to_pod() {
    let settings = DraftSettings {
        network_default: NetworkDefault::PodNetwork,
        ..DraftSettings::default()
    };
    let draft = apply(
        PlanDraft::new(params(), settings),
        [providers(), namespaces(), target_networks(), source_networks()],
    );
    assert_eq!(
        draft.network_mappings(),
        &[Mapping::new("VM Network", POD), Mapping::new("Storage Net", POD)]
    );
}

#[test]
fn namespace_without_networks_falls_back_to_pod() {
    let draft = apply(
        new_draft(),
        [
            providers(),
            namespaces(),
            Action::set_target_namespace("default"),
            target_networks(),
            source_networks(),
        ],
    );
    assert_eq!(
        draft.network_mappings(),
        &[Mapping::new("VM Network", POD), Mapping::new("Storage Net", POD)]
    );
}

#[test]
fn ovirt_networks_resolve_through_nic_profiles() {
    let ovirt = Provider::new("rhv", NS, ProviderType::Ovirt).with_uid("uid-rhv");
    let mut vm = SourceVm::new("vm-9", "legacy");
    vm.nics = vec![VmNic {
        profile: "profile-1".to_string(),
    }];
    let draft = PlanDraft::new(
        InitialParams {
            namespace: NS.to_string(),
            source_provider: ovirt,
            selected_vms: vec![vm],
        },
        DraftSettings::default(),
    );
    let draft = apply(
        draft,
        [
            providers(),
            namespaces(),
            target_networks(),
            Action::SetAvailableSourceNetworks(SnapshotUpdate::loaded(vec![SourceNetwork {
                id: "net-ovirt".to_string(),
                name: "ovirtmgmt".to_string(),
                provider_type: ProviderType::Ovirt,
                namespace: None,
                path: Some("dc1/ovirtmgmt".to_string()),
            }])),
        ],
    );
    // Profiles unknown: nothing is used yet, nothing generated.
    assert!(draft.network_mappings().is_empty());
    assert!(!draft.calculated_per_namespace.network_mappings.is_generated());

    let draft = reduce(
        draft,
        Action::SetNicProfiles(SnapshotUpdate::loaded(vec![NicProfile {
            id: "profile-1".to_string(),
            name: "ovirtmgmt".to_string(),
            network: "net-ovirt".to_string(),
        }])),
    );
    assert_eq!(
        draft.network_mappings(),
        &[Mapping::new("dc1/ovirtmgmt", "konveyor/nad")]
    );
}

// ---------------------------------------------------------------------------
// Submission flow
// ---------------------------------------------------------------------------

#[test]
fn api_error_reopens_editing() {
    let draft = reduce(loaded_draft(), Action::StartCreate);
    assert!(draft.flow.editing_done);
    assert_eq!(draft.flow.api_error, None);

    let draft = reduce(draft, Action::set_api_error(Some("forbidden".to_string())));
    assert!(!draft.flow.editing_done);
    assert_eq!(draft.flow.api_error.as_deref(), Some("forbidden"));

    let draft = reduce(draft, Action::StartCreate);
    assert!(draft.flow.editing_done);
    assert_eq!(draft.flow.api_error, None);
}
