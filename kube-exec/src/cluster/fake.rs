//! In-memory [`ClusterApi`] used by the resolution tests.

use std::{cell::RefCell, collections::HashMap};

use k8s_openapi::{api::core::v1::Pod, apimachinery::pkg::apis::meta::v1::APIResourceList};
use kube::{
    api::{ApiResource, DynamicObject},
    core::Status,
};
use serde_json::json;

use super::{ClusterApi, is_not_found};

/// Builds the error the API server answers with for a failed request.
pub fn api_error(code: u16) -> kube::Error {
    let reason = match code {
        403 => "Forbidden",
        404 => "NotFound",
        _ => "InternalError",
    };
    let message = format!("request failed with status {code}");
    kube::Error::Api(Status::failure(&message, reason).with_code(code).boxed())
}

// Mirrors `KubeCluster`: 404 answers are absent values, everything else fails.
fn fail<T>(code: u16) -> Result<Option<T>, kube::Error> {
    let err = api_error(code);
    if is_not_found(&err) { Ok(None) } else { Err(err) }
}

#[derive(Default)]
pub struct FakeCluster {
    resources: HashMap<String, APIResourceList>,
    objects: HashMap<(String, String, String), DynamicObject>,
    pods: HashMap<(String, String), Vec<Pod>>,
    failing_groups: HashMap<String, u16>,
    failing_objects: HashMap<String, u16>,
    failing_pod_lists: HashMap<String, u16>,
    pub requested_groups: RefCell<Vec<String>>,
    pub requested_selectors: RefCell<Vec<String>>,
}

impl FakeCluster {
    /// Serves `resources` (a list of discovery `APIResource` JSON objects)
    /// under `group_version`.
    pub fn with_resources(mut self, group_version: &str, resources: serde_json::Value) -> Self {
        let list = serde_json::from_value(json!({
            "apiVersion": "v1",
            "kind": "APIResourceList",
            "groupVersion": group_version,
            "resources": resources,
        }))
        .unwrap();
        let _unused = self.resources.insert(group_version.to_string(), list);
        self
    }

    pub fn with_object(mut self, object: serde_json::Value) -> Self {
        let object: DynamicObject = serde_json::from_value(object).unwrap();
        let kind = object.types.as_ref().map(|types| types.kind.clone()).unwrap();
        let namespace = object.metadata.namespace.clone().unwrap();
        let name = object.metadata.name.clone().unwrap();
        let _unused = self.objects.insert((kind, namespace, name), object);
        self
    }

    pub fn with_pods(mut self, namespace: &str, label_selector: &str, names: &[&str]) -> Self {
        let pods = names
            .iter()
            .map(|name| {
                serde_json::from_value(json!({
                    "apiVersion": "v1",
                    "kind": "Pod",
                    "metadata": { "name": name, "namespace": namespace },
                }))
                .unwrap()
            })
            .collect();
        let _unused =
            self.pods.insert((namespace.to_string(), label_selector.to_string()), pods);
        self
    }

    /// Answers discovery of `group_version` with status `code`.
    pub fn with_failing_group(mut self, group_version: &str, code: u16) -> Self {
        let _unused = self.failing_groups.insert(group_version.to_string(), code);
        self
    }

    /// Answers any fetch of an object called `name` with status `code`.
    pub fn with_failing_object(mut self, name: &str, code: u16) -> Self {
        let _unused = self.failing_objects.insert(name.to_string(), code);
        self
    }

    /// Answers pod listings in `namespace` with status `code`.
    pub fn with_failing_pod_list(mut self, namespace: &str, code: u16) -> Self {
        let _unused = self.failing_pod_lists.insert(namespace.to_string(), code);
        self
    }
}

impl ClusterApi for FakeCluster {
    async fn api_resources(
        &self,
        group_version: &str,
    ) -> Result<Option<APIResourceList>, kube::Error> {
        self.requested_groups.borrow_mut().push(group_version.to_string());
        if let Some(&code) = self.failing_groups.get(group_version) {
            return fail(code);
        }
        Ok(self.resources.get(group_version).cloned())
    }

    async fn get_object(
        &self,
        resource: &ApiResource,
        namespace: &str,
        name: &str,
    ) -> Result<Option<DynamicObject>, kube::Error> {
        if let Some(&code) = self.failing_objects.get(name) {
            return fail(code);
        }
        let key = (resource.kind.clone(), namespace.to_string(), name.to_string());
        Ok(self.objects.get(&key).cloned())
    }

    async fn list_pods(
        &self,
        namespace: &str,
        label_selector: &str,
    ) -> Result<Vec<Pod>, kube::Error> {
        self.requested_selectors.borrow_mut().push(label_selector.to_string());
        if let Some(&code) = self.failing_pod_lists.get(namespace) {
            return fail::<Vec<Pod>>(code).map(Option::unwrap_or_default);
        }
        let key = (namespace.to_string(), label_selector.to_string());
        Ok(self.pods.get(&key).cloned().unwrap_or_default())
    }
}

/// Discovery data for the core and `apps` groups, shaped like a real API
/// server response.
pub fn standard_cluster() -> FakeCluster {
    FakeCluster::default()
        .with_resources(
            "v1",
            json!([
                {
                    "name": "pods", "singularName": "pod", "namespaced": true,
                    "kind": "Pod", "verbs": ["get", "list"], "shortNames": ["po"],
                },
                {
                    "name": "services", "singularName": "service", "namespaced": true,
                    "kind": "Service", "verbs": ["get", "list"], "shortNames": ["svc"],
                },
                {
                    "name": "nodes", "singularName": "node", "namespaced": false,
                    "kind": "Node", "verbs": ["get", "list"], "shortNames": ["no"],
                },
                {
                    "name": "configmaps", "singularName": "configmap", "namespaced": true,
                    "kind": "ConfigMap", "verbs": ["get", "list"], "shortNames": ["cm"],
                },
            ]),
        )
        .with_resources(
            "apps/v1",
            json!([
                {
                    "name": "deployments", "singularName": "deployment", "namespaced": true,
                    "kind": "Deployment", "verbs": ["get", "list"], "shortNames": ["deploy"],
                },
                {
                    "name": "deployments/scale", "singularName": "", "namespaced": true,
                    "kind": "Scale", "verbs": ["get", "patch", "update"],
                },
                {
                    "name": "statefulsets", "singularName": "statefulset", "namespaced": true,
                    "kind": "StatefulSet", "verbs": ["get", "list"], "shortNames": ["sts"],
                },
                {
                    "name": "daemonsets", "singularName": "daemonset", "namespaced": true,
                    "kind": "DaemonSet", "verbs": ["get", "list"], "shortNames": ["ds"],
                },
            ]),
        )
}
