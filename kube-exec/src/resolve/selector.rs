use std::{collections::BTreeMap, fmt};

use k8s_openapi::apimachinery::pkg::apis::meta::v1::{
    LabelSelector as ApiLabelSelector, LabelSelectorRequirement,
};

use super::{Error, error};

/// Pod label selector of a workload.
///
/// Renders to the string form accepted by the `labelSelector` query
/// parameter. Equality terms come first, sorted by key, followed by the
/// set-based requirements in declaration order.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct LabelSelector {
    match_labels: BTreeMap<String, String>,
    requirements: Vec<Requirement>,
}

#[derive(Clone, Debug, Eq, PartialEq)]
enum Requirement {
    In { key: String, values: Vec<String> },
    NotIn { key: String, values: Vec<String> },
    Exists { key: String },
    DoesNotExist { key: String },
}

impl LabelSelector {
    pub fn is_empty(&self) -> bool { self.match_labels.is_empty() && self.requirements.is_empty() }
}

impl From<BTreeMap<String, String>> for LabelSelector {
    fn from(match_labels: BTreeMap<String, String>) -> Self {
        Self { match_labels, requirements: Vec::new() }
    }
}

impl TryFrom<ApiLabelSelector> for LabelSelector {
    type Error = Error;

    /// Fails on requirements with an operator other than `In`, `NotIn`,
    /// `Exists` or `DoesNotExist`; dropping one would widen the selector.
    fn try_from(selector: ApiLabelSelector) -> Result<Self, Self::Error> {
        let ApiLabelSelector { match_labels, match_expressions } = selector;
        let requirements = match_expressions
            .into_iter()
            .flatten()
            .map(Requirement::from_api)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { match_labels: match_labels.unwrap_or_default(), requirements })
    }
}

impl Requirement {
    fn from_api(requirement: LabelSelectorRequirement) -> Result<Self, Error> {
        let LabelSelectorRequirement { key, operator, values } = requirement;
        let values = values.unwrap_or_default();
        match operator.as_str() {
            "In" => Ok(Self::In { key, values }),
            "NotIn" => Ok(Self::NotIn { key, values }),
            "Exists" => Ok(Self::Exists { key }),
            "DoesNotExist" => Ok(Self::DoesNotExist { key }),
            _ => error::UnsupportedSelectorSnafu { key, operator }.fail(),
        }
    }
}

impl fmt::Display for LabelSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut terms = self
            .match_labels
            .iter()
            .map(|(key, value)| format!("{key}={value}"))
            .chain(self.requirements.iter().map(ToString::to_string));
        if let Some(first) = terms.next() {
            f.write_str(&first)?;
        }
        for term in terms {
            write!(f, ",{term}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::In { key, values } => write!(f, "{key} in ({})", values.join(",")),
            Self::NotIn { key, values } => write!(f, "{key} notin ({})", values.join(",")),
            Self::Exists { key } => f.write_str(key),
            Self::DoesNotExist { key } => write!(f, "!{key}"),
        }
    }
}
