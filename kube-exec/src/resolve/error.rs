use snafu::Snafu;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum Error {
    #[snafu(display("Invalid object reference '{object}', expected KIND/NAME or NAME"))]
    InvalidReference { object: String },

    #[snafu(display("Invalid kind: {kind}"))]
    InvalidKind { kind: String },

    #[snafu(display("{kind} {name} does not exist in namespace {namespace}"))]
    ObjectNotFound { kind: String, name: String, namespace: String },

    #[snafu(display("Unsupported kind: {kind}"))]
    UnsupportedKind { kind: String },

    #[snafu(display("{kind} {name} in namespace {namespace} has no pod selector"))]
    EmptySelector { kind: String, name: String, namespace: String },

    #[snafu(display("Unsupported label selector operator {operator} on key {key}"))]
    UnsupportedSelector { key: String, operator: String },

    #[snafu(display("No running pods with selector {selector} in namespace {namespace}"))]
    NoMatchingPods { selector: String, namespace: String },

    #[snafu(display("Failed to discover API resources of {group_version}, error: {source}"))]
    DiscoverResources {
        group_version: String,
        #[snafu(source(from(kube::Error, Box::new)))]
        source: Box<kube::Error>,
    },

    #[snafu(display("Failed to get {kind} {name} in namespace {namespace}, error: {source}"))]
    GetObject {
        kind: String,
        name: String,
        namespace: String,
        #[snafu(source(from(kube::Error, Box::new)))]
        source: Box<kube::Error>,
    },

    #[snafu(display(
        "Failed to list pods with selector {selector} in namespace {namespace}, error: {source}"
    ))]
    ListPods {
        selector: String,
        namespace: String,
        #[snafu(source(from(kube::Error, Box::new)))]
        source: Box<kube::Error>,
    },

    #[snafu(display("Failed to parse {kind} {name}, error: {source}"))]
    ParseObject { kind: String, name: String, source: serde_json::Error },
}
