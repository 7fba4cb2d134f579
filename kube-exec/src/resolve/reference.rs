use snafu::ensure;

use super::{Error, error};
use crate::consts::DEFAULT_KIND;

/// A `kind/name` reference typed by the user, scoped to a namespace.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WorkloadReference {
    /// Lower-cased kind, plural or short name.
    pub kind: String,
    pub name: String,
    pub namespace: String,
}

impl WorkloadReference {
    /// Parses `kind/name` or a bare `name`, which refers to a deployment.
    pub fn parse(object: &str, namespace: impl Into<String>) -> Result<Self, Error> {
        let (kind, name) = match object.split_once('/') {
            Some((kind, name)) => (kind.to_lowercase(), name),
            None => (DEFAULT_KIND.to_string(), object),
        };
        ensure!(
            !kind.is_empty() && !name.is_empty(),
            error::InvalidReferenceSnafu { object: object.to_string() }
        );
        Ok(Self { kind, name: name.to_string(), namespace: namespace.into() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_is_case_folded() {
        let upper = WorkloadReference::parse("Deployment/foo", "default").unwrap();
        let lower = WorkloadReference::parse("deployment/foo", "default").unwrap();
        assert_eq!(upper, lower);
        assert_eq!(upper.kind, "deployment");
    }

    #[test]
    fn test_bare_name_defaults_to_deployment() {
        let reference = WorkloadReference::parse("web", "prod").unwrap();
        assert_eq!(reference.kind, "deployment");
        assert_eq!(reference.name, "web");
        assert_eq!(reference.namespace, "prod");
    }

    #[test]
    fn test_name_keeps_case_and_extra_slashes() {
        let reference = WorkloadReference::parse("STS/Web/0", "default").unwrap();
        assert_eq!(reference.kind, "sts");
        assert_eq!(reference.name, "Web/0");
    }

    #[test]
    fn test_empty_parts_are_rejected() {
        for object in ["", "deployment/", "/web"] {
            let err = WorkloadReference::parse(object, "default").unwrap_err();
            assert!(matches!(err, Error::InvalidReference { .. }), "accepted {object:?}");
        }
    }
}
