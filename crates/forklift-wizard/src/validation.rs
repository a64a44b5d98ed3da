use forklift_core::k8s_name::is_valid_k8s_name;
use forklift_core::models::inventory::Namespace;
use forklift_core::models::plan::Plan;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Result of validating one field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum Validation {
    /// Not evaluated yet. Distinct from passing.
    #[default]
    Default,
    Success,
    Error,
}

impl Validation {
    pub fn from_check(ok: bool) -> Self {
        if ok { Self::Success } else { Self::Error }
    }

    pub fn is_success(&self) -> bool {
        *self == Self::Success
    }
}

pub fn validate_unique_name<'a>(
    name: &str,
    mut existing_names: impl Iterator<Item = &'a str>,
) -> bool {
    existing_names.all(|existing| existing != name)
}

/// A plan name must be a valid resource name and not taken by another plan.
pub fn validate_plan_name(name: &str, existing_plans: &[Plan]) -> Validation {
    Validation::from_check(
        is_valid_k8s_name(name)
            && validate_unique_name(name, existing_plans.iter().map(|p| p.name())),
    )
}

/// A target namespace must be a valid name and exist on the target cluster.
pub fn validate_target_namespace(namespace: &str, available: &[Namespace]) -> Validation {
    Validation::from_check(
        is_valid_k8s_name(namespace) && available.iter().any(|n| n.name == namespace),
    )
}
