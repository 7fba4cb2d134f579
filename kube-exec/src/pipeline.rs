use std::ffi::OsString;

use crate::{
    cli::Error,
    cluster::ClusterApi,
    dispatch::{Dispatch, ExecRequest},
    resolve::{self, ResourceCatalog, WorkloadReference},
};

/// One run of the tool, as parsed from the command line.
#[derive(Clone, Debug)]
pub struct Invocation {
    pub reference: WorkloadReference,
    pub context: Option<String>,
    pub passthrough: Vec<OsString>,
    pub command: Vec<OsString>,
    pub api_groups: Vec<String>,
}

/// Resolves the referenced workload to a pod and execs into it.
///
/// Returns the exit code of the exec'd command.
pub async fn run<C, D>(cluster: &C, dispatcher: &D, invocation: Invocation) -> Result<i32, Error>
where
    C: ClusterApi,
    D: Dispatch,
{
    let Invocation { reference, context, passthrough, command, api_groups } = invocation;

    let catalog = ResourceCatalog::discover(cluster, &api_groups).await?;
    let resource = catalog.lookup(&reference.kind)?;
    let selector = resolve::resolve_selector(cluster, resource, &reference).await?;
    let pod_name = resolve::select_pod(cluster, &reference.namespace, &selector).await?;

    eprintln!("Executing command in pod {pod_name}");
    let request =
        ExecRequest { namespace: reference.namespace, context, pod_name, passthrough, command };
    dispatcher.dispatch(&request).await.map_err(Error::from)
}
