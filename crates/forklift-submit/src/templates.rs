//! Cluster resources built from a finished draft.

use forklift_core::ObjectRef;
use forklift_core::models::SHARED_ANNOTATION;
use forklift_core::models::meta::ObjectMeta;
use forklift_core::models::network_map::{
    MapProviders, NetworkDestination, NetworkMap, NetworkPair, SourceRef,
};
use forklift_core::models::plan::{Plan, PlanMaps};
use forklift_core::models::storage_map::{StorageDestination, StorageMap, StoragePair};
use forklift_wizard::PlanDraft;
use forklift_wizard::used::UsedSource;

use crate::error::SubmitError;

/// Metadata for a map owned by exactly one plan.
fn plan_owned_meta(name: &str, namespace: &str) -> ObjectMeta {
    let mut meta = ObjectMeta::named(name, namespace);
    meta.annotations
        .insert(SHARED_ANNOTATION.to_string(), "false".to_string());
    meta
}

fn map_providers(draft: &PlanDraft) -> Result<MapProviders, SubmitError> {
    let provider = &draft.plan.spec.provider;
    Ok(MapProviders {
        source: provider.source.clone(),
        destination: provider
            .destination
            .clone()
            .ok_or(SubmitError::MissingTargetProvider)?,
    })
}

pub fn network_map_for(draft: &PlanDraft) -> Result<NetworkMap, SubmitError> {
    let pod_label = draft.settings.pod_network_label.as_str();
    let source_index = &draft.calculated_once.source_network_labels;
    let target_index = &draft.calculated_per_namespace.target_network_label_to_id;
    let used = &draft.calculated_once.networks_used_by_selected_vms;

    let mut pairs = Vec::new();
    for mapping in draft.network_mappings() {
        let destination = if mapping.destination == pod_label {
            NetworkDestination::Pod
        } else {
            match (
                target_index.id_for(&mapping.destination),
                mapping.destination.split_once('/'),
            ) {
                (Some(_), Some((namespace, name))) => NetworkDestination::Multus {
                    name: name.to_string(),
                    namespace: namespace.to_string(),
                },
                _ => {
                    return Err(SubmitError::UnknownLabel {
                        kind: "target network",
                        label: mapping.destination.clone(),
                    });
                }
            }
        };

        let ids = source_index.ids_for(&mapping.source);
        let sources: Vec<SourceRef> = if !ids.is_empty() {
            ids.iter()
                .map(|id| SourceRef::inventory(id, &mapping.source))
                .collect()
        } else if mapping.source == pod_label {
            vec![SourceRef::pod()]
        } else if used.contains(&UsedSource::Id(mapping.source.clone())) {
            // Not in the inventory: the label is the raw id.
            vec![SourceRef {
                id: Some(mapping.source.clone()),
                ..SourceRef::default()
            }]
        } else {
            vec![SourceRef {
                name: Some(mapping.source.clone()),
                ..SourceRef::default()
            }]
        };

        pairs.extend(sources.into_iter().map(|source| NetworkPair {
            source,
            destination: destination.clone(),
        }));
    }

    Ok(NetworkMap::new(
        plan_owned_meta(&draft.network_map_name, &draft.plan.metadata.namespace),
        map_providers(draft)?,
        pairs,
    ))
}

pub fn storage_map_for(draft: &PlanDraft) -> Result<StorageMap, SubmitError> {
    let source_index = &draft.calculated_once.source_storage_labels;
    let used = &draft.calculated_once.storages_used_by_selected_vms;

    let mut pairs = Vec::new();
    for mapping in draft.storage_mappings() {
        let ids = source_index.ids_for(&mapping.source);
        let sources: Vec<SourceRef> = if !ids.is_empty() {
            ids.iter()
                .map(|id| SourceRef::inventory(id, &mapping.source))
                .collect()
        } else if used.contains(&mapping.source) {
            vec![SourceRef {
                id: Some(mapping.source.clone()),
                ..SourceRef::default()
            }]
        } else {
            return Err(SubmitError::UnknownLabel {
                kind: "source storage",
                label: mapping.source.clone(),
            });
        };

        pairs.extend(sources.into_iter().map(|source| StoragePair {
            source,
            destination: StorageDestination {
                storage_class: mapping.destination.clone(),
            },
        }));
    }

    Ok(StorageMap::new(
        plan_owned_meta(&draft.storage_map_name, &draft.plan.metadata.namespace),
        map_providers(draft)?,
        pairs,
    ))
}

/// The draft's plan, pointed at the created maps.
pub fn plan_for(draft: &PlanDraft, network_map: ObjectRef, storage_map: ObjectRef) -> Plan {
    let mut plan = draft.plan.clone();
    plan.spec.map = PlanMaps {
        network: Some(network_map),
        storage: Some(storage_map),
    };
    plan
}
