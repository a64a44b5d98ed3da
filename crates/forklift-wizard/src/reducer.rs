//! The plan draft reducer.
//!
//! `reduce` is total: every action yields a draft, nothing panics and
//! nothing errors. Derived state (validation, mapping calculations) is
//! recomputed from the stored snapshots after each change instead of being
//! patched incrementally, which is what makes availability updates
//! order-tolerant.

use forklift_core::models::provider::Provider;

use crate::action::{Action, MappingReplacement};
use crate::availability::{Applied, Availability, SnapshotUpdate};
use crate::draft::{PerNamespace, PlanDraft};
use crate::mapping::{self, Mapping, MappingInputs, MappingState};
use crate::resolve::{default_target_provider, eligible_targets, resolve_target_provider};
use crate::settings::NetworkDefault;
use crate::used::{
    LabelIndex, UsedSource, needs_disks, needs_nic_profiles, networks_used_by_selected_vms,
    resolve_network_labels, resolve_storage_labels, storages_used_by_selected_vms,
};
use crate::validation::{Validation, validate_plan_name, validate_target_namespace};

pub fn reduce(mut draft: PlanDraft, action: Action) -> PlanDraft {
    let kind = action.kind();
    tracing::debug!(action = %kind, "reducing");

    match action {
        Action::SetName(payload) => {
            draft.plan.metadata.name = payload.name;
            revalidate_plan_name(&mut draft);
        }
        Action::SetDescription(payload) => {
            draft.plan.spec.description = payload.description;
        }
        Action::SetTargetProvider(payload) => {
            set_target_provider(&mut draft, &payload.target_provider_name);
        }
        Action::SetTargetNamespace(payload) => {
            set_target_namespace(&mut draft, &payload.target_namespace);
        }
        Action::SetAvailableProviders(update) => {
            if store(&mut draft.existing.providers, update, kind) {
                reconcile_target_provider(&mut draft);
            }
        }
        Action::SetExistingPlans(update) => {
            if store(&mut draft.existing.plans, update, kind) {
                revalidate_plan_name(&mut draft);
            }
        }
        Action::SetAvailableTargetNamespaces(update) => {
            if store(&mut draft.existing.target_namespaces, update, kind) {
                reconcile_target_namespace(&mut draft);
            }
        }
        Action::SetAvailableTargetNetworks(update) => {
            if store(&mut draft.existing.target_networks, update, kind) {
                recalculate_networks(&mut draft);
            }
        }
        Action::SetAvailableSourceNetworks(update) => {
            if store(&mut draft.existing.source_networks, update, kind) {
                draft.calculated_once.source_network_labels = LabelIndex::from_pairs(
                    draft
                        .existing
                        .source_networks
                        .items()
                        .iter()
                        .map(|n| (n.label(), n.id.clone())),
                );
                recalculate_networks(&mut draft);
            }
        }
        Action::SetNicProfiles(update) => {
            if store(&mut draft.existing.nic_profiles, update, kind) {
                draft.calculated_once.networks_used_by_selected_vms =
                    networks_used_by_selected_vms(
                        &draft.received_as_params.selected_vms,
                        draft.received_as_params.source_provider.provider_type(),
                        draft.existing.nic_profiles.items(),
                    );
                recalculate_networks(&mut draft);
            }
        }
        Action::SetAvailableTargetStorages(update) => {
            if store(&mut draft.existing.target_storages, update, kind) {
                recalculate_storages(&mut draft);
            }
        }
        Action::SetAvailableSourceStorages(update) => {
            if store(&mut draft.existing.source_storages, update, kind) {
                draft.calculated_once.source_storage_labels = LabelIndex::from_pairs(
                    draft
                        .existing
                        .source_storages
                        .items()
                        .iter()
                        .map(|s| (s.label(), s.id.clone())),
                );
                recalculate_storages(&mut draft);
            }
        }
        Action::SetDisks(update) => {
            if store(&mut draft.existing.disks, update, kind) {
                draft.calculated_once.storages_used_by_selected_vms =
                    storages_used_by_selected_vms(
                        &draft.received_as_params.selected_vms,
                        draft.received_as_params.source_provider.provider_type(),
                        draft.existing.disks.items(),
                    );
                recalculate_storages(&mut draft);
            }
        }
        Action::AddNetworkMapping => {
            let per_ns = &draft.calculated_per_namespace;
            let destinations = network_destinations(&draft);
            if let Some(updated) = mapping::add_mapping(
                &per_ns.network_sources,
                &destinations,
                per_ns.network_mappings.mappings(),
            ) {
                draft.calculated_per_namespace.network_mappings = MappingState::Tracked(updated);
                recalculate_networks(&mut draft);
            }
        }
        Action::DeleteNetworkMapping(payload) => {
            let per_ns = &draft.calculated_per_namespace;
            if let Some(updated) =
                mapping::delete_mapping(per_ns.network_mappings.mappings(), &payload.source)
            {
                draft.calculated_per_namespace.network_mappings = MappingState::Tracked(updated);
                recalculate_networks(&mut draft);
            }
        }
        Action::ReplaceNetworkMapping(MappingReplacement { current, next }) => {
            replace_network_mapping(&mut draft, &current, &next);
        }
        Action::AddStorageMapping => {
            let per_ns = &draft.calculated_per_namespace;
            if let Some(updated) = mapping::add_mapping(
                &per_ns.storage_sources,
                &per_ns.target_storage_labels,
                per_ns.storage_mappings.mappings(),
            ) {
                draft.calculated_per_namespace.storage_mappings = MappingState::Tracked(updated);
                recalculate_storages(&mut draft);
            }
        }
        Action::DeleteStorageMapping(payload) => {
            let per_ns = &draft.calculated_per_namespace;
            if let Some(updated) =
                mapping::delete_mapping(per_ns.storage_mappings.mappings(), &payload.source)
            {
                draft.calculated_per_namespace.storage_mappings = MappingState::Tracked(updated);
                recalculate_storages(&mut draft);
            }
        }
        Action::ReplaceStorageMapping(MappingReplacement { current, next }) => {
            replace_storage_mapping(&mut draft, &current, &next);
        }
        Action::StartCreate => {
            draft.flow.editing_done = true;
            draft.flow.api_error = None;
        }
        Action::SetApiError(payload) => {
            if payload.error.is_some() {
                draft.flow.editing_done = false;
            }
            draft.flow.api_error = payload.error;
        }
    }

    draft
}

/// Apply an availability update. Returns true when new items were stored.
fn store<T>(slot: &mut Availability<T>, update: SnapshotUpdate<T>, kind: &'static str) -> bool {
    match slot.apply(update) {
        Applied::Stored => true,
        Applied::Loading => {
            tracing::debug!(action = %kind, "fetch in progress, keeping previous snapshot");
            false
        }
        Applied::Failed(error) => {
            tracing::warn!(action = %kind, %error, "fetch failed, keeping previous snapshot");
            false
        }
        Applied::Stale => {
            tracing::debug!(action = %kind, "ignoring response to superseded request");
            false
        }
    }
}

fn revalidate_plan_name(draft: &mut PlanDraft) {
    draft.validation.plan_name =
        validate_plan_name(&draft.plan.metadata.name, draft.existing.plans.items());
}

fn set_target_provider(draft: &mut PlanDraft, name: &str) {
    if draft.target_provider_name() == Some(name) {
        return;
    }
    let resolved = resolve_target_provider(name, draft.existing.providers.items()).cloned();
    if resolved.is_none() {
        tracing::warn!(provider = %name, "target provider not among eligible providers");
    }
    cascade_target_provider(draft, resolved);
}

/// Switch the destination provider and invalidate everything computed
/// relative to the previous one.
fn cascade_target_provider(draft: &mut PlanDraft, provider: Option<Provider>) {
    tracing::info!(
        from = draft.target_provider_name().unwrap_or("<none>"),
        to = provider.as_ref().map(Provider::name).unwrap_or("<none>"),
        "changing target provider"
    );

    draft.plan.spec.target_namespace = None;
    draft.validation.target_namespace = Validation::Default;
    draft.existing.target_namespaces.reset();
    draft.existing.target_networks.reset();
    draft.existing.target_storages.reset();
    draft.calculated_per_namespace = PerNamespace::default();

    draft.plan.spec.provider.destination = provider.as_ref().map(Provider::object_ref);
    draft.validation.target_provider = Validation::from_check(provider.is_some());
    draft.target_provider = provider;

    recalculate_mappings(draft);
}

/// Keep the current destination if it is still eligible, otherwise fall
/// back to the host provider, then to any eligible one.
fn reconcile_target_provider(draft: &mut PlanDraft) {
    let providers = draft.existing.providers.items();

    if let Some(current) = draft
        .target_provider_name()
        .and_then(|name| resolve_target_provider(name, providers))
    {
        let current = current.clone();
        draft.plan.spec.provider.destination = Some(current.object_ref());
        draft.target_provider = Some(current);
        draft.validation.target_provider = Validation::Success;
        return;
    }

    let fallback = default_target_provider(providers)
        .or_else(|| eligible_targets(providers).next())
        .cloned();

    match fallback {
        Some(provider) => cascade_target_provider(draft, Some(provider)),
        None if draft.plan.spec.provider.destination.is_some() => {
            cascade_target_provider(draft, None)
        }
        None => draft.validation.target_provider = Validation::Error,
    }
}

fn set_target_namespace(draft: &mut PlanDraft, namespace: &str) {
    draft.plan.spec.target_namespace = Some(namespace.to_string());
    draft.validation.target_namespace =
        validate_target_namespace(namespace, draft.existing.target_namespaces.items());
    recalculate_mappings(draft);
}

/// Re-validate the namespace against the new list; if it does not pass,
/// choose one: the plan's own namespace on the host cluster, else the
/// configured default, else the first listed.
fn reconcile_target_namespace(draft: &mut PlanDraft) {
    let namespaces = draft.existing.target_namespaces.items();
    draft.validation.target_namespace = match draft.target_namespace() {
        Some(current) => validate_target_namespace(current, namespaces),
        None => Validation::Error,
    };
    if draft.validation.target_namespace.is_success() {
        return;
    }

    let is_listed = |name: &str| namespaces.iter().any(|n| n.name == name);
    let local = draft
        .target_provider
        .as_ref()
        .is_some_and(Provider::is_local_openshift);

    let pick = [
        local.then(|| draft.plan.metadata.namespace.clone()),
        Some(draft.settings.default_target_namespace.clone()),
    ]
    .into_iter()
    .flatten()
    .find(|candidate| is_listed(candidate))
    .or_else(|| namespaces.first().map(|n| n.name.clone()));

    match pick {
        Some(namespace) => {
            tracing::debug!(namespace = %namespace, "selecting default target namespace");
            set_target_namespace(draft, &namespace);
        }
        None => recalculate_mappings(draft),
    }
}

pub(crate) fn recalculate_mappings(draft: &mut PlanDraft) {
    recalculate_networks(draft);
    recalculate_storages(draft);
}

/// Labels and defaults shared by the network calculator and network edits.
struct NetworkView {
    used: Vec<String>,
    targets: Vec<String>,
    target_index: LabelIndex,
    default_destination: Option<String>,
}

fn network_view(draft: &PlanDraft) -> NetworkView {
    let pod_label = &draft.settings.pod_network_label;
    let used = resolve_network_labels(
        &draft.calculated_once.networks_used_by_selected_vms,
        &draft.calculated_once.source_network_labels,
        pod_label,
    );

    let in_namespace: Vec<(String, String)> = match draft.target_namespace() {
        Some(namespace) => draft
            .existing
            .target_networks
            .items()
            .iter()
            .filter(|n| n.namespace == namespace)
            .map(|n| (format!("{}/{}", n.namespace, n.name), n.uid.clone()))
            .collect(),
        None => Vec::new(),
    };
    let target_index = LabelIndex::from_pairs(in_namespace);
    let targets = target_index.labels();

    let default_destination = if network_inputs_ready(draft) && !used.is_empty() {
        match draft.settings.network_default {
            NetworkDefault::PodNetwork => Some(pod_label.clone()),
            NetworkDefault::FirstAvailable => {
                Some(targets.first().unwrap_or(pod_label).clone())
            }
        }
    } else {
        None
    };

    NetworkView {
        used,
        targets,
        target_index,
        default_destination,
    }
}

/// Defaults are generated only once everything that shapes them is known:
/// a target namespace with its networks, and every source lookup the VMs'
/// network references go through.
fn network_inputs_ready(draft: &PlanDraft) -> bool {
    let existing = &draft.existing;
    let provider_type = draft.received_as_params.source_provider.provider_type();
    let uses_ids = draft
        .calculated_once
        .networks_used_by_selected_vms
        .iter()
        .any(|u| matches!(u, UsedSource::Id(_)));

    draft.target_namespace().is_some()
        && existing.target_networks.is_ready()
        && (!uses_ids || existing.source_networks.is_ready())
        && (!needs_nic_profiles(provider_type) || existing.nic_profiles.is_ready())
}

/// Destinations offered for a new network mapping, preferred first.
fn network_destinations(draft: &PlanDraft) -> Vec<String> {
    let pod_label = draft.settings.pod_network_label.clone();
    let targets = draft.calculated_per_namespace.target_network_labels.clone();
    match draft.settings.network_default {
        NetworkDefault::PodNetwork => std::iter::once(pod_label).chain(targets).collect(),
        NetworkDefault::FirstAvailable => targets.into_iter().chain([pod_label]).collect(),
    }
}

fn recalculate_networks(draft: &mut PlanDraft) {
    let view = network_view(draft);
    let pod_label = draft.settings.pod_network_label.as_str();
    let per_ns = &draft.calculated_per_namespace;

    let calculation = mapping::calculate(
        &per_ns.network_mappings,
        &MappingInputs {
            used_sources: &view.used,
            targets: &view.targets,
            default_destination: view.default_destination.as_deref(),
            always_valid: Some(pod_label),
        },
    );
    let sources = mapping::mapping_sources(
        &draft.calculated_once.source_network_labels.labels(),
        &view.used,
        calculation.mappings.mappings(),
    );

    let per_ns = &mut draft.calculated_per_namespace;
    per_ns.target_network_labels = calculation.target_labels;
    per_ns.target_network_label_to_id = view.target_index;
    per_ns.source_network_labels = calculation.unmapped_sources;
    per_ns.network_sources = sources;
    per_ns.network_mappings = calculation.mappings;
}

struct StorageView {
    used: Vec<String>,
    targets: Vec<String>,
    default_destination: Option<String>,
}

fn storage_view(draft: &PlanDraft) -> StorageView {
    let existing = &draft.existing;
    let provider_type = draft.received_as_params.source_provider.provider_type();
    let used = resolve_storage_labels(
        &draft.calculated_once.storages_used_by_selected_vms,
        &draft.calculated_once.source_storage_labels,
    );
    let target_storages = existing.target_storages.items();
    let targets: Vec<String> = target_storages.iter().map(|s| s.name.clone()).collect();

    let ready = existing.target_storages.is_ready()
        && existing.source_storages.is_ready()
        && (!needs_disks(provider_type) || existing.disks.is_ready());
    let default_destination = if ready && !used.is_empty() {
        target_storages
            .iter()
            .find(|s| s.is_default)
            .or_else(|| target_storages.first())
            .map(|s| s.name.clone())
    } else {
        None
    };

    StorageView {
        used,
        targets,
        default_destination,
    }
}

fn recalculate_storages(draft: &mut PlanDraft) {
    let view = storage_view(draft);
    let per_ns = &draft.calculated_per_namespace;

    let calculation = mapping::calculate(
        &per_ns.storage_mappings,
        &MappingInputs {
            used_sources: &view.used,
            targets: &view.targets,
            default_destination: view.default_destination.as_deref(),
            always_valid: None,
        },
    );
    let sources = mapping::mapping_sources(
        &draft.calculated_once.source_storage_labels.labels(),
        &view.used,
        calculation.mappings.mappings(),
    );

    let per_ns = &mut draft.calculated_per_namespace;
    per_ns.target_storage_labels = calculation.target_labels;
    per_ns.source_storage_labels = calculation.unmapped_sources;
    per_ns.storage_sources = sources;
    per_ns.storage_mappings = calculation.mappings;
}

fn replace_network_mapping(draft: &mut PlanDraft, current: &Mapping, next: &Mapping) {
    let view = network_view(draft);
    let per_ns = &draft.calculated_per_namespace;
    let inputs = MappingInputs {
        used_sources: &view.used,
        targets: &view.targets,
        default_destination: view.default_destination.as_deref(),
        always_valid: Some(&draft.settings.pod_network_label),
    };

    match mapping::replace_mapping(
        &per_ns.network_sources,
        &inputs,
        per_ns.network_mappings.mappings(),
        current,
        next,
    ) {
        Some(updated) => {
            draft.calculated_per_namespace.network_mappings = MappingState::Tracked(updated);
            recalculate_networks(draft);
        }
        None => tracing::debug!(source = %current.source, "network mapping replacement rejected"),
    }
}

fn replace_storage_mapping(draft: &mut PlanDraft, current: &Mapping, next: &Mapping) {
    let view = storage_view(draft);
    let per_ns = &draft.calculated_per_namespace;
    let inputs = MappingInputs {
        used_sources: &view.used,
        targets: &view.targets,
        default_destination: view.default_destination.as_deref(),
        always_valid: None,
    };

    match mapping::replace_mapping(
        &per_ns.storage_sources,
        &inputs,
        per_ns.storage_mappings.mappings(),
        current,
        next,
    ) {
        Some(updated) => {
            draft.calculated_per_namespace.storage_mappings = MappingState::Tracked(updated);
            recalculate_storages(draft);
        }
        None => tracing::debug!(source = %current.source, "storage mapping replacement rejected"),
    }
}
