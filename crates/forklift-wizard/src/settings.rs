use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Knobs that shape default choices made by the wizard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase", default)]
#[ts(export)]
pub struct DraftSettings {
    /// Namespace preferred when the target is a remote cluster.
    pub default_target_namespace: String,
    /// Label of the pod-network sentinel destination.
    pub pod_network_label: String,
    pub network_default: NetworkDefault,
    /// Hex characters appended to generated plan and map names.
    pub name_suffix_len: usize,
}

impl Default for DraftSettings {
    fn default() -> Self {
        Self {
            default_target_namespace: "default".to_string(),
            pod_network_label: "Pod Networking".to_string(),
            network_default: NetworkDefault::FirstAvailable,
            name_suffix_len: 8,
        }
    }
}

/// Destination given to freshly generated network mappings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum NetworkDefault {
    /// First target network in the namespace; the pod network when the
    /// namespace has none.
    #[default]
    FirstAvailable,
    /// Always the pod network.
    PodNetwork,
}
