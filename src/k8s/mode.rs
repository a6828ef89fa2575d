/// Execution mode detection (in-cluster vs local kubeconfig)
use std::fmt;

use crate::utils::env::{EnvSource, IN_CLUSTER_VAR, SERVICE_HOST_VAR, SERVICE_PORT_VAR};

/// Strategy used to obtain the API server connection details
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionMode {
    /// Service-account credentials injected into the pod
    InCluster,
    /// A kubeconfig file on the local filesystem
    Local,
}

impl ExecutionMode {
    /// Decide the mode from the environment.
    ///
    /// In-cluster when both service host and port are non-empty, or when
    /// `honor_override` is set and `IN_CLUSTER` is exactly `"true"`.
    pub fn detect(env: &impl EnvSource, honor_override: bool) -> Self {
        let host = env.var_or_empty(SERVICE_HOST_VAR);
        let port = env.var_or_empty(SERVICE_PORT_VAR);
        if !host.is_empty() && !port.is_empty() {
            return Self::InCluster;
        }

        if honor_override && env.var(IN_CLUSTER_VAR).as_deref() == Some("true") {
            return Self::InCluster;
        }

        Self::Local
    }
}

impl fmt::Display for ExecutionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InCluster => write!(f, "in-cluster"),
            Self::Local => write!(f, "local"),
        }
    }
}
