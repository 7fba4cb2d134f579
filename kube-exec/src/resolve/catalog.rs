use std::collections::{HashMap, hash_map::Entry};

use k8s_openapi::apimachinery::pkg::apis::meta::v1::{APIResource, APIResourceList};
use kube::api::{ApiResource, GroupVersionKind};
use snafu::{OptionExt, ResultExt};

use super::{Error, error};
use crate::cluster::ClusterApi;

/// A resource kind served by the cluster.
#[derive(Clone, Debug)]
pub struct Resource {
    /// Group, version, kind and plural used to address objects of this kind.
    pub api_resource: ApiResource,
    pub descriptor: ResourceDescriptor,
}

/// What discovery reported about a resource kind.
#[derive(Clone, Debug)]
pub struct ResourceDescriptor {
    pub kind: String,
    pub short_names: Vec<String>,
    pub verbs: Vec<String>,
    pub namespaced: bool,
}

impl Resource {
    fn from_discovery(group_version: &str, resource: APIResource) -> Self {
        let (group, version) = group_version.split_once('/').unwrap_or(("", group_version));
        let gvk = GroupVersionKind::gvk(group, version, &resource.kind);
        let api_resource = ApiResource::from_gvk_with_plural(&gvk, &resource.name);
        let APIResource { kind, short_names, verbs, namespaced, .. } = resource;
        Self {
            api_resource,
            descriptor: ResourceDescriptor {
                kind,
                short_names: short_names.unwrap_or_default(),
                verbs,
                namespaced,
            },
        }
    }

    /// Names this resource can be looked up by: kind, plural, short names.
    fn lookup_names(&self) -> impl Iterator<Item = String> + '_ {
        [&self.descriptor.kind, &self.api_resource.plural]
            .into_iter()
            .chain(&self.descriptor.short_names)
            .map(|name| name.to_lowercase())
    }

    pub fn supports(&self, verb: &str) -> bool {
        self.descriptor.verbs.iter().any(|supported| supported == verb)
    }
}

/// Lookup table from lower-cased kind, plural and short names to the
/// resource serving them.
#[derive(Debug, Default)]
pub struct ResourceCatalog {
    resources: HashMap<String, Resource>,
}

impl ResourceCatalog {
    /// Queries each of `group_versions` in order and registers every resource
    /// they serve.
    ///
    /// Group/versions the cluster does not serve are skipped. On name
    /// collisions the group listed first wins.
    pub async fn discover<C, S>(cluster: &C, group_versions: &[S]) -> Result<Self, Error>
    where
        C: ClusterApi,
        S: AsRef<str>,
    {
        let mut catalog = Self::default();
        for group_version in group_versions {
            let group_version = group_version.as_ref();
            let Some(list) = cluster
                .api_resources(group_version)
                .await
                .context(error::DiscoverResourcesSnafu { group_version })?
            else {
                tracing::debug!("API group {group_version} is not served, skipping");
                continue;
            };
            catalog.register(list);
        }
        tracing::debug!("Discovered {} resource names", catalog.resources.len());
        Ok(catalog)
    }

    fn register(&mut self, list: APIResourceList) {
        let APIResourceList { group_version, resources } = list;
        for resource in resources {
            // Subresources such as `deployments/scale` are not addressable kinds.
            if resource.name.contains('/') {
                continue;
            }
            let resource = Resource::from_discovery(&group_version, resource);
            for name in resource.lookup_names().collect::<Vec<_>>() {
                match self.resources.entry(name) {
                    Entry::Vacant(entry) => {
                        let _unused = entry.insert(resource.clone());
                    }
                    Entry::Occupied(entry) => {
                        tracing::debug!(
                            "{} already refers to {}, ignoring {}",
                            entry.key(),
                            entry.get().api_resource.api_version,
                            resource.api_resource.api_version,
                        );
                    }
                }
            }
        }
    }

    /// Finds the resource registered under `name`, ignoring case.
    pub fn lookup(&self, name: &str) -> Result<&Resource, Error> {
        self.resources
            .get(&name.to_lowercase())
            .context(error::InvalidKindSnafu { kind: name.to_string() })
    }
}
