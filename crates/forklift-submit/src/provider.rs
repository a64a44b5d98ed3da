use std::collections::BTreeMap;

use forklift_core::k8s_name::check_k8s_name;
use forklift_core::models::meta::{ObjectMeta, OwnerReference};
use forklift_core::models::provider::Provider;
use forklift_core::models::secret::Secret;

use crate::api::ConsoleApi;
use crate::error::SubmitError;

/// Create a provider together with its credentials secret.
///
/// Secret first, then the provider referencing it, then an owner reference
/// from the secret to the provider. If the provider cannot be created the
/// secret is deleted again.
pub async fn create_provider(
    api: &dyn ConsoleApi,
    mut provider: Provider,
    credentials: BTreeMap<String, String>,
) -> Result<Provider, SubmitError> {
    check_k8s_name(provider.name())?;

    let metadata = ObjectMeta {
        generate_name: Some(format!("{}-", provider.name())),
        ..ObjectMeta::named("", provider.metadata.namespace.clone())
    };
    let secret = api
        .create_secret(Secret::new(metadata, credentials))
        .await
        .map_err(SubmitError::create(Secret::KIND, provider.name()))?;
    tracing::info!(secret = %secret.metadata.name, "created provider secret");

    provider.spec.secret = Some(secret.object_ref());
    let name = provider.name().to_string();
    let created = match api.create_provider(provider).await {
        Ok(created) => created,
        Err(source) => {
            tracing::warn!(
                provider = %name,
                error = %source,
                "provider creation failed, rolling back secret"
            );
            let secret_name = secret.metadata.name.clone();
            return Err(match api.delete(secret.object_ref()).await {
                Ok(()) => SubmitError::RolledBack {
                    secret: secret_name,
                    source,
                },
                Err(rollback) => SubmitError::RollbackFailed {
                    secret: secret_name,
                    rollback,
                    source,
                },
            });
        }
    };

    let owner = OwnerReference::for_object(&created.object_ref()).ok_or_else(|| {
        SubmitError::MissingUid {
            kind: Provider::KIND,
            name: name.clone(),
        }
    })?;
    api.patch_owner_references(secret.object_ref(), vec![owner])
        .await
        .map_err(SubmitError::link(Secret::KIND, &secret.metadata.name))?;

    tracing::info!(provider = %name, "provider created");
    Ok(created)
}
