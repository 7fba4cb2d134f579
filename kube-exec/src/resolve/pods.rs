use snafu::{OptionExt, ResultExt};

use super::{Error, LabelSelector, error};
use crate::cluster::ClusterApi;

/// Returns the name of the first pod, in server order, that `selector`
/// matches in `namespace`.
pub async fn select_pod<C: ClusterApi>(
    cluster: &C,
    namespace: &str,
    selector: &LabelSelector,
) -> Result<String, Error> {
    let selector = selector.to_string();
    let pods = cluster
        .list_pods(namespace, &selector)
        .await
        .with_context(|_| error::ListPodsSnafu { selector: &selector, namespace })?;
    tracing::debug!("{} pods match {selector} in namespace {namespace}", pods.len());

    pods.into_iter()
        .find_map(|pod| pod.metadata.name)
        .with_context(|| error::NoMatchingPodsSnafu { selector: &selector, namespace })
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::cluster::fake::FakeCluster;

    fn selector() -> LabelSelector {
        LabelSelector::from(BTreeMap::from([
            ("app".to_string(), "foo".to_string()),
            ("tier".to_string(), "backend".to_string()),
        ]))
    }

    #[tokio::test]
    async fn test_first_pod_wins() {
        let cluster = FakeCluster::default().with_pods(
            "default",
            "app=foo,tier=backend",
            &["foo-b", "foo-a", "foo-c"],
        );
        let pod = select_pod(&cluster, "default", &selector()).await.unwrap();
        assert_eq!(pod, "foo-b");
        assert_eq!(*cluster.requested_selectors.borrow(), vec!["app=foo,tier=backend".to_string()]);
    }

    #[tokio::test]
    async fn test_no_pods() {
        let cluster = FakeCluster::default().with_pods("other", "app=foo,tier=backend", &["foo"]);
        let err = select_pod(&cluster, "default", &selector()).await.unwrap_err();
        assert!(matches!(err, Error::NoMatchingPods { .. }));
        assert!(err.to_string().contains("app=foo,tier=backend"));
    }

    #[tokio::test]
    async fn test_list_failure_is_fatal() {
        let cluster = FakeCluster::default()
            .with_pods("default", "app=foo,tier=backend", &["foo"])
            .with_failing_pod_list("default", 500);
        let err = select_pod(&cluster, "default", &selector()).await.unwrap_err();
        assert!(matches!(err, Error::ListPods { ref namespace, .. } if namespace == "default"));
    }
}
