use std::collections::BTreeMap;

use k8s_openapi::{
    api::{
        apps::v1::{DaemonSet, Deployment, ReplicaSet, StatefulSet},
        batch::v1::Job,
        core::v1::{ReplicationController, Service},
        policy::v1::PodDisruptionBudget,
    },
    apimachinery::pkg::apis::meta::v1::LabelSelector,
};
use kube::api::DynamicObject;
use serde::de::DeserializeOwned;

/// Kinds whose objects carry a pod selector.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum WorkloadKind {
    Deployment,
    StatefulSet,
    ReplicaSet,
    DaemonSet,
    Job,
    ReplicationController,
    Service,
    PodDisruptionBudget,
}

impl WorkloadKind {
    /// Maps an API kind name (`StatefulSet`) onto its workload variant.
    pub fn from_kind(kind: &str) -> Option<Self> {
        match camel_to_snake(kind).as_str() {
            "deployment" => Some(Self::Deployment),
            "stateful_set" => Some(Self::StatefulSet),
            "replica_set" => Some(Self::ReplicaSet),
            "daemon_set" => Some(Self::DaemonSet),
            "job" => Some(Self::Job),
            "replication_controller" => Some(Self::ReplicationController),
            "service" => Some(Self::Service),
            "pod_disruption_budget" => Some(Self::PodDisruptionBudget),
            _ => None,
        }
    }

    /// Parses `object` as this kind and returns its pod selector, if it has
    /// one.
    pub fn selector(
        self,
        object: DynamicObject,
    ) -> Result<Option<LabelSelector>, serde_json::Error> {
        let selector = match self {
            Self::Deployment => parse::<Deployment>(object)?.spec.map(|spec| spec.selector),
            Self::StatefulSet => parse::<StatefulSet>(object)?.spec.map(|spec| spec.selector),
            Self::ReplicaSet => parse::<ReplicaSet>(object)?.spec.map(|spec| spec.selector),
            Self::DaemonSet => parse::<DaemonSet>(object)?.spec.map(|spec| spec.selector),
            Self::Job => parse::<Job>(object)?.spec.and_then(|spec| spec.selector),
            Self::ReplicationController => parse::<ReplicationController>(object)?
                .spec
                .and_then(|spec| spec.selector)
                .map(match_labels),
            Self::Service => {
                parse::<Service>(object)?.spec.and_then(|spec| spec.selector).map(match_labels)
            }
            Self::PodDisruptionBudget => {
                parse::<PodDisruptionBudget>(object)?.spec.and_then(|spec| spec.selector)
            }
        };
        Ok(selector)
    }
}

fn match_labels(labels: BTreeMap<String, String>) -> LabelSelector {
    LabelSelector { match_labels: Some(labels), match_expressions: None }
}

fn parse<K: DeserializeOwned>(object: DynamicObject) -> Result<K, serde_json::Error> {
    serde_json::to_value(object).and_then(serde_json::from_value)
}

/// Converts a CamelCase kind name to snake_case.
///
/// Acronyms stay together: `HTTPRoute` becomes `http_route`.
pub fn camel_to_snake(name: &str) -> String {
    let chars = name.chars().collect::<Vec<_>>();
    let mut snake = String::with_capacity(name.len() + 4);
    for (index, &current) in chars.iter().enumerate() {
        if index > 0 && current.is_ascii_uppercase() {
            let previous = chars[index - 1];
            let starts_word = chars.get(index + 1).is_some_and(char::is_ascii_lowercase);
            if starts_word || previous.is_ascii_lowercase() || previous.is_ascii_digit() {
                snake.push('_');
            }
        }
        snake.push(current.to_ascii_lowercase());
    }
    snake
}
