//! Access to the Kubernetes API server.
//!
//! Every request the resolution pipeline makes goes through [`ClusterApi`].
//! "Not found" answers come back as `Ok(None)` so callers can tell an absent
//! group or object apart from a transport failure.

#[cfg(test)]
pub mod fake;

use k8s_openapi::{api::core::v1::Pod, apimachinery::pkg::apis::meta::v1::APIResourceList};
use kube::{
    Api,
    api::{ApiResource, DynamicObject, ListParams},
};

/// The API group/version of the core (legacy) group.
pub const CORE_GROUP_VERSION: &str = "v1";

pub trait ClusterApi {
    /// Lists the resources served under `group_version`, or `None` when the
    /// cluster does not serve that group/version.
    async fn api_resources(
        &self,
        group_version: &str,
    ) -> Result<Option<APIResourceList>, kube::Error>;

    /// Fetches one namespaced object, or `None` when it does not exist.
    async fn get_object(
        &self,
        resource: &ApiResource,
        namespace: &str,
        name: &str,
    ) -> Result<Option<DynamicObject>, kube::Error>;

    /// Lists the pods in `namespace` matching `label_selector`, in server order.
    async fn list_pods(
        &self,
        namespace: &str,
        label_selector: &str,
    ) -> Result<Vec<Pod>, kube::Error>;
}

/// [`ClusterApi`] backed by a live `kube::Client`.
#[derive(Clone)]
pub struct KubeCluster {
    client: kube::Client,
}

impl From<kube::Client> for KubeCluster {
    fn from(client: kube::Client) -> Self { Self { client } }
}

impl ClusterApi for KubeCluster {
    async fn api_resources(
        &self,
        group_version: &str,
    ) -> Result<Option<APIResourceList>, kube::Error> {
        let result = if group_version == CORE_GROUP_VERSION {
            self.client.list_core_api_resources(group_version).await
        } else {
            self.client.list_api_group_resources(group_version).await
        };
        match result {
            Ok(list) => Ok(Some(list)),
            Err(err) if is_not_found(&err) => Ok(None),
            Err(err) => Err(err),
        }
    }

    async fn get_object(
        &self,
        resource: &ApiResource,
        namespace: &str,
        name: &str,
    ) -> Result<Option<DynamicObject>, kube::Error> {
        Api::<DynamicObject>::namespaced_with(self.client.clone(), namespace, resource)
            .get_opt(name)
            .await
    }

    async fn list_pods(
        &self,
        namespace: &str,
        label_selector: &str,
    ) -> Result<Vec<Pod>, kube::Error> {
        let list_params = ListParams::default().labels(label_selector);
        let pods =
            Api::<Pod>::namespaced(self.client.clone(), namespace).list(&list_params).await?;
        Ok(pods.items)
    }
}

fn is_not_found(err: &kube::Error) -> bool {
    matches!(err, kube::Error::Api(status) if status.is_not_found())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_not_found() {
        assert!(is_not_found(&fake::api_error(404)));
        assert!(!is_not_found(&fake::api_error(403)));
        assert!(!is_not_found(&fake::api_error(500)));
    }
}
