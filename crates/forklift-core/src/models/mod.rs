pub mod inventory;
pub mod meta;
pub mod network_map;
pub mod plan;
pub mod provider;
pub mod secret;
pub mod storage_map;

/// Group/version of every Forklift custom resource.
pub const FORKLIFT_API_VERSION: &str = "forklift.konveyor.io/v1beta1";

/// Annotation marking a map as owned by a single plan.
pub const SHARED_ANNOTATION: &str = "forklift.konveyor.io/shared";
