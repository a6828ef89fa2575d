/// Environment lookup utilities shared by mode detection and path defaulting
use std::collections::HashMap;
use std::path::{Path, PathBuf};

pub const SERVICE_HOST_VAR: &str = "KUBERNETES_SERVICE_HOST";
pub const SERVICE_PORT_VAR: &str = "KUBERNETES_SERVICE_PORT";
pub const IN_CLUSTER_VAR: &str = "IN_CLUSTER";
pub const HOME_VAR: &str = "HOME";
pub const USERPROFILE_VAR: &str = "USERPROFILE";

/// Source of environment variables
///
/// Resolution reads the environment through this trait so callers (and
/// tests) can supply a fixed set of variables instead of the process
/// environment.
pub trait EnvSource {
    /// Look up a variable, returning None when it is unset or not valid UTF-8
    fn var(&self, key: &str) -> Option<String>;

    /// Look up a variable, treating unset as the empty string
    fn var_or_empty(&self, key: &str) -> String {
        self.var(key).unwrap_or_default()
    }
}

/// The real process environment
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

impl EnvSource for HashMap<String, String> {
    fn var(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

impl EnvSource for HashMap<&str, &str> {
    fn var(&self, key: &str) -> Option<String> {
        self.get(key).map(|v| v.to_string())
    }
}

/// Home directory: `HOME`, falling back to `USERPROFILE` on Windows hosts.
///
/// Returns an empty string when neither is set.
pub fn home_dir(env: &impl EnvSource) -> String {
    let home = env.var_or_empty(HOME_VAR);
    if !home.is_empty() {
        return home;
    }
    env.var_or_empty(USERPROFILE_VAR)
}

/// `<home>/.kube/config` for a given home directory
pub fn kubeconfig_under(home: &str) -> PathBuf {
    Path::new(home).join(".kube").join("config")
}

/// Default kubeconfig path advertised to users, or None without a home directory
pub fn default_kubeconfig_path(env: &impl EnvSource) -> Option<PathBuf> {
    let home = home_dir(env);
    if home.is_empty() {
        None
    } else {
        Some(kubeconfig_under(&home))
    }
}
