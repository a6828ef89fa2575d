/// Resolver options: the explicit replacement for process-global flags
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Options controlling how the client configuration is resolved
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolverOptions {
    /// Kubeconfig file to read in local mode (defaults to <home>/.kube/config)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kubeconfig: Option<PathBuf>,

    /// Named context to select; the kubeconfig's current context when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,

    /// Treat `IN_CLUSTER=true` as a request for in-cluster mode
    #[serde(default = "default_true")]
    pub honor_in_cluster_override: bool,
}

fn default_true() -> bool {
    true
}

impl Default for ResolverOptions {
    fn default() -> Self {
        Self {
            kubeconfig: None,
            context: None,
            honor_in_cluster_override: true,
        }
    }
}

impl ResolverOptions {
    /// Load options from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let options: ResolverOptions = serde_yaml::from_str(&content)?;
        options.validate()?;
        Ok(options.normalized())
    }

    /// Set the kubeconfig path
    pub fn with_kubeconfig<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.kubeconfig = Some(path.into());
        self
    }

    /// Set the context name
    pub fn with_context<S: Into<String>>(mut self, context: S) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Enable or disable the `IN_CLUSTER` override
    pub fn honor_in_cluster_override(mut self, honor: bool) -> Self {
        self.honor_in_cluster_override = honor;
        self
    }

    /// Validate the options
    pub fn validate(&self) -> anyhow::Result<()> {
        if let Some(context) = &self.context {
            if !context.is_empty() && context.trim().is_empty() {
                anyhow::bail!("context name cannot be blank");
            }
        }

        if let Some(path) = &self.kubeconfig {
            if path.is_dir() {
                anyhow::bail!("kubeconfig path is a directory: {}", path.display());
            }
        }

        Ok(())
    }

    /// Empty strings mean "not set"
    pub fn normalized(mut self) -> Self {
        if self.context.as_deref() == Some("") {
            self.context = None;
        }
        if self
            .kubeconfig
            .as_ref()
            .is_some_and(|p| p.as_os_str().is_empty())
        {
            self.kubeconfig = None;
        }
        self
    }

    /// Fill unset fields from `fallback`; fields already set win
    pub fn or(self, fallback: ResolverOptions) -> Self {
        Self {
            kubeconfig: self.kubeconfig.or(fallback.kubeconfig),
            context: self.context.or(fallback.context),
            honor_in_cluster_override: self.honor_in_cluster_override
                && fallback.honor_in_cluster_override,
        }
    }

    /// Generate an example options file
    pub fn example() -> Self {
        Self {
            kubeconfig: Some(PathBuf::from("/etc/kubernetes/admin.conf")),
            context: Some("staging".to_string()),
            honor_in_cluster_override: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = ResolverOptions::default();
        assert!(options.kubeconfig.is_none());
        assert!(options.context.is_none());
        assert!(options.honor_in_cluster_override);
    }

    #[test]
    fn test_options_validation() {
        let options = ResolverOptions::example();
        assert!(options.validate().is_ok());

        let blank = ResolverOptions::default().with_context("   ");
        assert!(blank.validate().is_err());

        let dir = tempfile::tempdir().unwrap();
        let options = ResolverOptions::default().with_kubeconfig(dir.path());
        assert!(options.validate().is_err());
    }

    #[test]
    fn test_normalized_drops_empty_values() {
        let options = ResolverOptions::default()
            .with_context("")
            .with_kubeconfig("")
            .normalized();
        assert_eq!(options, ResolverOptions::default());
    }

    #[test]
    fn test_or_prefers_explicit_values() {
        let file = ResolverOptions::default()
            .with_kubeconfig("/etc/kube/config")
            .with_context("prod");
        let cli = ResolverOptions::default().with_context("staging");

        let merged = cli.or(file);
        assert_eq!(merged.kubeconfig, Some(PathBuf::from("/etc/kube/config")));
        assert_eq!(merged.context.as_deref(), Some("staging"));
        assert!(merged.honor_in_cluster_override);
    }

    #[test]
    fn test_or_override_disabled_by_either_side() {
        let file = ResolverOptions::default().honor_in_cluster_override(false);
        let merged = ResolverOptions::default().or(file);
        assert!(!merged.honor_in_cluster_override);
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("kube-resolve.yaml");
        std::fs::write(
            &path,
            "kubeconfig: /tmp/kc.yaml\ncontext: ''\nhonor_in_cluster_override: false\n",
        )
        .unwrap();

        let options = ResolverOptions::from_file(&path).unwrap();
        assert_eq!(options.kubeconfig, Some(PathBuf::from("/tmp/kc.yaml")));
        assert!(options.context.is_none());
        assert!(!options.honor_in_cluster_override);
    }
}
