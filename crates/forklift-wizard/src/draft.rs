use forklift_core::models::inventory::{
    Disk, Namespace, NicProfile, SourceNetwork, SourceStorage, SourceVm, TargetNetwork,
    TargetStorage,
};
use forklift_core::models::plan::{Plan, PlanVm};
use forklift_core::models::provider::Provider;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::availability::Availability;
use crate::mapping::{Mapping, MappingSource, MappingState};
use crate::settings::DraftSettings;
use crate::used::{
    LabelIndex, UsedSource, networks_used_by_selected_vms, storages_used_by_selected_vms,
};
use crate::validation::Validation;

/// What the wizard is opened with: the namespace, the source provider and
/// the VMs picked on the provider's VM list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitialParams {
    pub namespace: String,
    pub source_provider: Provider,
    #[serde(default)]
    pub selected_vms: Vec<SourceVm>,
}

/// The plan being built by the wizard, plus everything derived for it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanDraft {
    pub plan: Plan,
    pub network_map_name: String,
    pub storage_map_name: String,
    pub validation: DraftValidation,
    pub existing: ExistingResources,
    pub calculated_once: CalculatedOnce,
    pub calculated_per_namespace: PerNamespace,
    pub received_as_params: InitialParams,
    /// Resolved destination provider, if any.
    pub target_provider: Option<Provider>,
    pub flow: Flow,
    pub settings: DraftSettings,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftValidation {
    pub plan_name: Validation,
    pub target_namespace: Validation,
    pub target_provider: Validation,
}

impl DraftValidation {
    pub fn all_success(&self) -> bool {
        self.plan_name.is_success()
            && self.target_namespace.is_success()
            && self.target_provider.is_success()
    }
}

/// Data fetched from the cluster or the inventory service.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExistingResources {
    pub providers: Availability<Provider>,
    pub plans: Availability<Plan>,
    pub target_namespaces: Availability<Namespace>,
    pub target_networks: Availability<TargetNetwork>,
    pub source_networks: Availability<SourceNetwork>,
    pub target_storages: Availability<TargetStorage>,
    pub source_storages: Availability<SourceStorage>,
    pub nic_profiles: Availability<NicProfile>,
    pub disks: Availability<Disk>,
}

/// Computed from the selected VMs and the source inventory. Independent of
/// the target.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculatedOnce {
    pub networks_used_by_selected_vms: Vec<UsedSource>,
    pub storages_used_by_selected_vms: Vec<String>,
    pub source_network_labels: LabelIndex,
    pub source_storage_labels: LabelIndex,
}

/// Recomputed whenever the target namespace or target inventory changes.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PerNamespace {
    pub target_network_labels: Vec<String>,
    pub target_network_label_to_id: LabelIndex,
    /// Used source networks without a mapping.
    pub source_network_labels: Vec<String>,
    pub network_sources: Vec<MappingSource>,
    pub network_mappings: MappingState,
    pub target_storage_labels: Vec<String>,
    /// Used source storages without a mapping.
    pub source_storage_labels: Vec<String>,
    pub storage_sources: Vec<MappingSource>,
    pub storage_mappings: MappingState,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Flow {
    pub editing_done: bool,
    pub api_error: Option<String>,
}

impl PlanDraft {
    /// Initial draft for one wizard session.
    pub fn new(params: InitialParams, settings: DraftSettings) -> Self {
        let source = &params.source_provider;
        let provider_type = source.provider_type();

        let mut plan = Plan::new(
            &generated_name(source.name(), settings.name_suffix_len),
            &params.namespace,
            source.object_ref(),
        );
        plan.spec.vms = params
            .selected_vms
            .iter()
            .map(|vm| PlanVm {
                name: vm.name.clone(),
                id: vm.id.clone(),
            })
            .collect();

        let calculated_once = CalculatedOnce {
            networks_used_by_selected_vms: networks_used_by_selected_vms(
                &params.selected_vms,
                provider_type,
                &[],
            ),
            storages_used_by_selected_vms: storages_used_by_selected_vms(
                &params.selected_vms,
                provider_type,
                &[],
            ),
            ..CalculatedOnce::default()
        };

        tracing::debug!(
            source = %source.name(),
            vms = params.selected_vms.len(),
            "creating plan draft"
        );

        let mut draft = Self {
            network_map_name: generated_name(source.name(), settings.name_suffix_len),
            storage_map_name: generated_name(source.name(), settings.name_suffix_len),
            plan,
            validation: DraftValidation::default(),
            existing: ExistingResources::default(),
            calculated_once,
            calculated_per_namespace: PerNamespace::default(),
            received_as_params: params,
            target_provider: None,
            flow: Flow::default(),
            settings,
        };
        crate::reducer::recalculate_mappings(&mut draft);
        draft
    }

    pub fn plan_name(&self) -> &str {
        self.plan.name()
    }

    pub fn target_namespace(&self) -> Option<&str> {
        self.plan.spec.target_namespace.as_deref()
    }

    pub fn target_provider_name(&self) -> Option<&str> {
        self.plan
            .spec
            .provider
            .destination
            .as_ref()
            .map(|d| d.name.as_str())
    }

    pub fn network_mappings(&self) -> &[Mapping] {
        self.calculated_per_namespace.network_mappings.mappings()
    }

    pub fn storage_mappings(&self) -> &[Mapping] {
        self.calculated_per_namespace.storage_mappings.mappings()
    }

    pub fn unmapped_networks(&self) -> &[String] {
        &self.calculated_per_namespace.source_network_labels
    }

    pub fn unmapped_storages(&self) -> &[String] {
        &self.calculated_per_namespace.source_storage_labels
    }

    /// All fields validated and every used source mapped.
    pub fn is_ready_to_submit(&self) -> bool {
        self.validation.all_success()
            && self.unmapped_networks().is_empty()
            && self.unmapped_storages().is_empty()
    }
}

/// `<base>-<hex suffix>`, the naming scheme for generated resources.
pub fn generated_name(base: &str, suffix_len: usize) -> String {
    let hex = Uuid::new_v4().simple().to_string();
    let len = suffix_len.clamp(1, hex.len());
    format!("{base}-{}", &hex[..len])
}
