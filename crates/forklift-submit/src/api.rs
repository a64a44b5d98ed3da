use std::future::Future;
use std::pin::Pin;

use forklift_core::ObjectRef;
use forklift_core::models::meta::OwnerReference;
use forklift_core::models::network_map::NetworkMap;
use forklift_core::models::plan::Plan;
use forklift_core::models::provider::Provider;
use forklift_core::models::secret::Secret;
use forklift_core::models::storage_map::StorageMap;
use thiserror::Error;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// A failed call to the cluster API.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ApiError {
    /// HTTP status, when the server answered at all.
    pub status: Option<u16>,
    pub message: String,
}

impl ApiError {
    pub fn new(status: Option<u16>, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }
}

/// The cluster operations the submission protocols need.
///
/// Create calls return the object as stored by the server, with `uid` and
/// (for `generateName` objects) the final name filled in.
///
/// Methods return boxed futures for dyn compatibility.
pub trait ConsoleApi: Send + Sync {
    fn create_network_map(&self, map: NetworkMap) -> BoxFuture<'_, Result<NetworkMap, ApiError>>;

    fn create_storage_map(&self, map: StorageMap) -> BoxFuture<'_, Result<StorageMap, ApiError>>;

    fn create_plan(&self, plan: Plan) -> BoxFuture<'_, Result<Plan, ApiError>>;

    fn create_secret(&self, secret: Secret) -> BoxFuture<'_, Result<Secret, ApiError>>;

    fn create_provider(&self, provider: Provider) -> BoxFuture<'_, Result<Provider, ApiError>>;

    /// Replace the owner references of `target`.
    fn patch_owner_references(
        &self,
        target: ObjectRef,
        owners: Vec<OwnerReference>,
    ) -> BoxFuture<'_, Result<(), ApiError>>;

    fn delete(&self, target: ObjectRef) -> BoxFuture<'_, Result<(), ApiError>>;
}
