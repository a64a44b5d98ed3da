//! A `ConsoleApi` that records calls instead of sending them.

use std::fmt;

use forklift_core::ObjectRef;
use forklift_core::models::meta::{ObjectMeta, OwnerReference};
use forklift_core::models::network_map::NetworkMap;
use forklift_core::models::plan::Plan;
use forklift_core::models::provider::Provider;
use forklift_core::models::secret::Secret;
use forklift_core::models::storage_map::StorageMap;
use serde::Serialize;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::api::{ApiError, BoxFuture, ConsoleApi};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    CreateNetworkMap,
    CreateStorageMap,
    CreatePlan,
    CreateSecret,
    CreateProvider,
    PatchOwnerReferences,
    Delete,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CreateNetworkMap => "create_network_map",
            Self::CreateStorageMap => "create_storage_map",
            Self::CreatePlan => "create_plan",
            Self::CreateSecret => "create_secret",
            Self::CreateProvider => "create_provider",
            Self::PatchOwnerReferences => "patch_owner_references",
            Self::Delete => "delete",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One recorded call, with the object as it was sent.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "call", rename_all = "snake_case")]
pub enum ApiCall {
    CreateNetworkMap {
        map: NetworkMap,
    },
    CreateStorageMap {
        map: StorageMap,
    },
    CreatePlan {
        plan: Plan,
    },
    CreateSecret {
        secret: Secret,
    },
    CreateProvider {
        provider: Provider,
    },
    PatchOwnerReferences {
        target: ObjectRef,
        owners: Vec<OwnerReference>,
    },
    Delete {
        target: ObjectRef,
    },
}

impl ApiCall {
    pub fn operation(&self) -> Operation {
        match self {
            Self::CreateNetworkMap { .. } => Operation::CreateNetworkMap,
            Self::CreateStorageMap { .. } => Operation::CreateStorageMap,
            Self::CreatePlan { .. } => Operation::CreatePlan,
            Self::CreateSecret { .. } => Operation::CreateSecret,
            Self::CreateProvider { .. } => Operation::CreateProvider,
            Self::PatchOwnerReferences { .. } => Operation::PatchOwnerReferences,
            Self::Delete { .. } => Operation::Delete,
        }
    }
}

/// Records every call and answers like a cluster would: created objects get
/// a uid, and `generateName` objects get a name.
#[derive(Debug, Default)]
pub struct DryRunApi {
    calls: Mutex<Vec<ApiCall>>,
    failing: Vec<Operation>,
}

impl DryRunApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every call of `operation` fail after being recorded.
    pub fn failing(mut self, operation: Operation) -> Self {
        self.failing.push(operation);
        self
    }

    pub async fn calls(&self) -> Vec<ApiCall> {
        self.calls.lock().await.clone()
    }

    pub async fn operations(&self) -> Vec<Operation> {
        self.calls
            .lock()
            .await
            .iter()
            .map(ApiCall::operation)
            .collect()
    }

    async fn record(&self, call: ApiCall) -> Result<(), ApiError> {
        let operation = call.operation();
        tracing::debug!(%operation, "dry-run call");
        self.calls.lock().await.push(call);
        if self.failing.contains(&operation) {
            return Err(ApiError::new(
                Some(500),
                format!("{operation} rejected by dry run"),
            ));
        }
        Ok(())
    }
}

fn assign_identity(metadata: &mut ObjectMeta) {
    if let (true, Some(prefix)) = (metadata.name.is_empty(), &metadata.generate_name) {
        let suffix = Uuid::new_v4().simple().to_string();
        metadata.name = format!("{prefix}{}", &suffix[..5]);
    }
    metadata.uid = Some(Uuid::new_v4().to_string());
}

impl ConsoleApi for DryRunApi {
    fn create_network_map(
        &self,
        mut map: NetworkMap,
    ) -> BoxFuture<'_, Result<NetworkMap, ApiError>> {
        Box::pin(async move {
            self.record(ApiCall::CreateNetworkMap { map: map.clone() })
                .await?;
            assign_identity(&mut map.metadata);
            Ok(map)
        })
    }

    fn create_storage_map(
        &self,
        mut map: StorageMap,
    ) -> BoxFuture<'_, Result<StorageMap, ApiError>> {
        Box::pin(async move {
            self.record(ApiCall::CreateStorageMap { map: map.clone() })
                .await?;
            assign_identity(&mut map.metadata);
            Ok(map)
        })
    }

    fn create_plan(&self, mut plan: Plan) -> BoxFuture<'_, Result<Plan, ApiError>> {
        Box::pin(async move {
            self.record(ApiCall::CreatePlan { plan: plan.clone() })
                .await?;
            assign_identity(&mut plan.metadata);
            Ok(plan)
        })
    }

    fn create_secret(&self, mut secret: Secret) -> BoxFuture<'_, Result<Secret, ApiError>> {
        Box::pin(async move {
            self.record(ApiCall::CreateSecret {
                secret: secret.clone(),
            })
            .await?;
            assign_identity(&mut secret.metadata);
            Ok(secret)
        })
    }

    fn create_provider(
        &self,
        mut provider: Provider,
    ) -> BoxFuture<'_, Result<Provider, ApiError>> {
        Box::pin(async move {
            self.record(ApiCall::CreateProvider {
                provider: provider.clone(),
            })
            .await?;
            assign_identity(&mut provider.metadata);
            Ok(provider)
        })
    }

    fn patch_owner_references(
        &self,
        target: ObjectRef,
        owners: Vec<OwnerReference>,
    ) -> BoxFuture<'_, Result<(), ApiError>> {
        Box::pin(async move {
            self.record(ApiCall::PatchOwnerReferences { target, owners })
                .await
        })
    }

    fn delete(&self, target: ObjectRef) -> BoxFuture<'_, Result<(), ApiError>> {
        Box::pin(async move { self.record(ApiCall::Delete { target }).await })
    }
}
