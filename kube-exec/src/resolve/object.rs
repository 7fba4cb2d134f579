use snafu::{OptionExt, ResultExt, ensure};

use super::{Error, LabelSelector, Resource, WorkloadKind, WorkloadReference, error};
use crate::cluster::ClusterApi;

/// Fetches the referenced object and extracts its pod selector.
pub async fn resolve_selector<C: ClusterApi>(
    cluster: &C,
    resource: &Resource,
    reference: &WorkloadReference,
) -> Result<LabelSelector, Error> {
    let WorkloadReference { kind, name, namespace } = reference;
    let api_kind = &resource.descriptor.kind;

    ensure!(
        resource.descriptor.namespaced && resource.supports("get"),
        error::UnsupportedKindSnafu { kind }
    );

    let object = cluster
        .get_object(&resource.api_resource, namespace, name)
        .await
        .with_context(|_| error::GetObjectSnafu { kind, name, namespace })?
        .with_context(|| error::ObjectNotFoundSnafu { kind, name, namespace })?;

    let workload = WorkloadKind::from_kind(api_kind)
        .with_context(|| error::UnsupportedKindSnafu { kind })?;
    tracing::debug!("Resolved {kind} {name} as {workload:?}");

    let selector = workload
        .selector(object)
        .with_context(|_| error::ParseObjectSnafu { kind: api_kind, name })?
        .map(LabelSelector::try_from)
        .transpose()?
        .filter(|selector| !selector.is_empty())
        .with_context(|| error::EmptySelectorSnafu { kind, name, namespace })?;
    tracing::info!("{kind} {name} selects pods with {selector}");
    Ok(selector)
}
