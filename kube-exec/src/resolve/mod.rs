//! Resolution of a workload reference to the pod to exec into.
//!
//! The stages run in order: the [`ResourceCatalog`] maps the typed kind onto a
//! served resource, [`resolve_selector`] reads the object's pod selector and
//! [`select_pod`] picks the first pod it matches.

mod catalog;
mod error;
mod object;
mod pods;
mod reference;
mod selector;
mod workload;

pub use self::{
    catalog::{Resource, ResourceCatalog},
    error::Error,
    object::resolve_selector,
    pods::select_pod,
    reference::WorkloadReference,
    selector::LabelSelector,
    workload::WorkloadKind,
};
