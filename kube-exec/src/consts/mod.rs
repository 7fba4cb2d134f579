/// Kind assumed when the object reference has no `kind/` prefix.
pub const DEFAULT_KIND: &str = "deployment";

/// Program used to exec into the selected pod.
pub const DEFAULT_KUBECTL_PROGRAM: &str = "kubectl";

/// Group/versions queried during discovery, in precedence order.
///
/// Earlier entries win when two groups register the same kind or short
/// name, so the core group comes first.
pub const DEFAULT_API_GROUPS: &[&str] = &[
    "v1",
    "apps/v1",
    "batch/v1",
    "policy/v1",
    "autoscaling/v2",
    "networking.k8s.io/v1",
    "discovery.k8s.io/v1",
    "rbac.authorization.k8s.io/v1",
    "storage.k8s.io/v1",
    "scheduling.k8s.io/v1",
    "coordination.k8s.io/v1",
    "node.k8s.io/v1",
    "certificates.k8s.io/v1",
    "admissionregistration.k8s.io/v1",
    "apiextensions.k8s.io/v1",
    "events.k8s.io/v1",
];

pub mod kubectl {
    //! Flags of `kubectl exec` that consume the following token as their value.

    pub const VALUE_LONG_FLAGS: &[&str] = &["container", "filename", "pod-running-timeout"];

    pub const VALUE_SHORT_FLAGS: &[char] = &['c', 'f'];
}
