use forklift_core::models::meta::OwnerReference;
use forklift_core::models::network_map::NetworkMap;
use forklift_core::models::plan::Plan;
use forklift_core::models::storage_map::StorageMap;
use forklift_wizard::{Action, PlanDraft, WizardSession};

use crate::api::ConsoleApi;
use crate::error::{SubmitError, format_err_chain};
use crate::templates::{network_map_for, plan_for, storage_map_for};

/// Create the plan and its two maps.
///
/// Order: both maps, then the plan referencing them, then owner references
/// from each map to the plan. A failure stops the sequence; resources
/// created before it are left in place.
pub async fn submit_plan(api: &dyn ConsoleApi, draft: &PlanDraft) -> Result<Plan, SubmitError> {
    ensure_ready(draft)?;

    let network_map = network_map_for(draft)?;
    let storage_map = storage_map_for(draft)?;

    tracing::info!(
        map = %network_map.metadata.name,
        pairs = network_map.spec.map.len(),
        "creating network map"
    );
    let network_map = api
        .create_network_map(network_map.clone())
        .await
        .map_err(SubmitError::create(
            NetworkMap::KIND,
            &network_map.metadata.name,
        ))?;

    tracing::info!(
        map = %storage_map.metadata.name,
        pairs = storage_map.spec.map.len(),
        "creating storage map"
    );
    let storage_map = api
        .create_storage_map(storage_map.clone())
        .await
        .map_err(SubmitError::create(
            StorageMap::KIND,
            &storage_map.metadata.name,
        ))?;

    let plan = plan_for(draft, network_map.object_ref(), storage_map.object_ref());
    tracing::info!(plan = %plan.name(), vms = plan.spec.vms.len(), "creating plan");
    let plan = api
        .create_plan(plan.clone())
        .await
        .map_err(SubmitError::create(Plan::KIND, plan.name()))?;

    let owner = OwnerReference::for_object(&plan.object_ref()).ok_or_else(|| {
        SubmitError::MissingUid {
            kind: Plan::KIND,
            name: plan.name().to_string(),
        }
    })?;

    api.patch_owner_references(network_map.object_ref(), vec![owner.clone()])
        .await
        .map_err(SubmitError::link(
            NetworkMap::KIND,
            &network_map.metadata.name,
        ))?;
    api.patch_owner_references(storage_map.object_ref(), vec![owner])
        .await
        .map_err(SubmitError::link(
            StorageMap::KIND,
            &storage_map.metadata.name,
        ))?;

    tracing::info!(plan = %plan.name(), "plan created");
    Ok(plan)
}

fn ensure_ready(draft: &PlanDraft) -> Result<(), SubmitError> {
    let mut problems = Vec::new();
    let validation = &draft.validation;
    if !validation.plan_name.is_success() {
        problems.push("plan name".to_string());
    }
    if !validation.target_provider.is_success() {
        problems.push("target provider".to_string());
    }
    if !validation.target_namespace.is_success() {
        problems.push("target namespace".to_string());
    }
    if !draft.unmapped_networks().is_empty() {
        problems.push(format!(
            "unmapped networks ({})",
            draft.unmapped_networks().join(", ")
        ));
    }
    if !draft.unmapped_storages().is_empty() {
        problems.push(format!(
            "unmapped storages ({})",
            draft.unmapped_storages().join(", ")
        ));
    }

    if problems.is_empty() {
        Ok(())
    } else {
        Err(SubmitError::NotReady(problems.join("; ")))
    }
}

/// The action that records a submission result on the draft.
pub fn record_submit_outcome(result: &Result<Plan, SubmitError>) -> Action {
    match result {
        Ok(_) => Action::set_api_error(None),
        Err(err) => Action::set_api_error(Some(format_err_chain(err))),
    }
}

/// Run the full create flow for a session: mark editing done, submit the
/// current draft, record the outcome.
pub async fn submit_from_session(
    session: &WizardSession,
    api: &dyn ConsoleApi,
) -> Result<Plan, SubmitError> {
    let draft = session.dispatch(Action::StartCreate).await;
    let result = submit_plan(api, &draft).await;
    if let Err(err) = &result {
        tracing::warn!(error = %format_err_chain(err), "plan submission failed");
    }
    session.dispatch(record_submit_outcome(&result)).await;
    result
}
