//! Shared command-line plumbing for `kube-exec`.

pub mod config;
