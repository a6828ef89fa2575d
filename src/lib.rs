//! kube-resolve
//!
//! Decides between in-cluster service-account credentials and a local
//! kubeconfig, then builds a Kubernetes API client from the result.
pub mod cli;
pub mod config;
pub mod k8s;
pub mod utils;

pub use config::ResolverOptions;
pub use k8s::{
    create_client, create_client_or_die, resolve_config, ExecutionMode, ResolveError,
    ResolvedConfig,
};
