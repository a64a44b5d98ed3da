use forklift_core::models::provider::Provider;

/// Providers that may receive migrated VMs.
pub fn eligible_targets(providers: &[Provider]) -> impl Iterator<Item = &Provider> {
    providers.iter().filter(|p| p.is_target())
}

/// Find the eligible target provider called `name`.
///
/// `None` means the selection is pending or was cleared; it is not an error.
pub fn resolve_target_provider<'a>(name: &str, providers: &'a [Provider]) -> Option<&'a Provider> {
    eligible_targets(providers).find(|p| p.name() == name)
}

/// The provider to fall back to when nothing valid is selected: the first
/// local ("host") OpenShift provider.
pub fn default_target_provider(providers: &[Provider]) -> Option<&Provider> {
    providers.iter().find(|p| p.is_local_openshift())
}
