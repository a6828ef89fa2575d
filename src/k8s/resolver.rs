/// Configuration resolver: in-cluster credentials or a local kubeconfig
use std::path::{Path, PathBuf};

use kube::config::{InClusterError, KubeConfigOptions, Kubeconfig, KubeconfigError};
use kube::Config;
use thiserror::Error;
use tracing::debug;

use super::mode::ExecutionMode;
use crate::config::ResolverOptions;
use crate::utils::env::{default_kubeconfig_path, kubeconfig_under, EnvSource, ProcessEnv};

/// Errors surfaced while resolving or building a client.
///
/// Every variant is transparent so the underlying loader error reaches the
/// caller unchanged.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// Service-account files missing or unreadable, or service env incomplete
    #[error(transparent)]
    InCluster(#[from] InClusterError),

    /// Kubeconfig missing, malformed, or naming an unknown context
    #[error(transparent)]
    Kubeconfig(#[from] KubeconfigError),

    /// Client construction from a resolved configuration failed
    #[error(transparent)]
    Client(#[from] kube::Error),
}

/// A fully-populated client configuration and how it was obtained
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    mode: ExecutionMode,
    context: Option<String>,
    kubeconfig: Option<PathBuf>,
    config: Config,
}

impl ResolvedConfig {
    pub fn mode(&self) -> ExecutionMode {
        self.mode
    }

    /// Context in effect (explicit or the kubeconfig's current context)
    pub fn context(&self) -> Option<&str> {
        self.context.as_deref()
    }

    /// Kubeconfig file that was read; None in-cluster
    pub fn kubeconfig(&self) -> Option<&Path> {
        self.kubeconfig.as_deref()
    }

    /// API server URL without a trailing slash
    pub fn server(&self) -> String {
        self.config
            .cluster_url
            .to_string()
            .trim_end_matches('/')
            .to_string()
    }

    pub fn namespace(&self) -> &str {
        &self.config.default_namespace
    }

    /// Short name for the kind of credentials carried
    pub fn auth_kind(&self) -> &'static str {
        let auth = &self.config.auth_info;
        if auth.exec.is_some() {
            "exec"
        } else if auth.auth_provider.is_some() {
            "auth-provider"
        } else if auth.token.is_some() || auth.token_file.is_some() {
            "token"
        } else if auth.client_certificate.is_some() || auth.client_certificate_data.is_some() {
            "client-certificate"
        } else if auth.username.is_some() {
            "basic"
        } else {
            "none"
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn into_config(self) -> Config {
        self.config
    }
}

/// Resolve client configuration from the process environment
pub async fn resolve_config(options: &ResolverOptions) -> Result<ResolvedConfig, ResolveError> {
    resolve_config_with_env(options, &ProcessEnv).await
}

/// Resolve client configuration using an explicit environment source
///
/// `env` decides the mode; in-cluster loading itself reads the process
/// environment and service-account files through `Config::incluster`.
pub async fn resolve_config_with_env(
    options: &ResolverOptions,
    env: &impl EnvSource,
) -> Result<ResolvedConfig, ResolveError> {
    let mode = ExecutionMode::detect(env, options.honor_in_cluster_override);
    debug!(%mode, "Selected configuration mode");

    match mode {
        ExecutionMode::InCluster => {
            let config = Config::incluster()?;
            Ok(ResolvedConfig {
                mode,
                context: None,
                kubeconfig: None,
                config,
            })
        }
        ExecutionMode::Local => resolve_local(options, env).await,
    }
}

async fn resolve_local(
    options: &ResolverOptions,
    env: &impl EnvSource,
) -> Result<ResolvedConfig, ResolveError> {
    // Without a home directory this is the relative path .kube/config
    let path = options
        .kubeconfig
        .clone()
        .filter(|p| !p.as_os_str().is_empty())
        .or_else(|| default_kubeconfig_path(env))
        .unwrap_or_else(|| kubeconfig_under(""));
    let context = options.context.clone().filter(|c| !c.is_empty());

    debug!(
        kubeconfig = %path.display(),
        context = context.as_deref().unwrap_or("<current>"),
        "Loading kubeconfig"
    );

    let kubeconfig = Kubeconfig::read_from(&path)?;
    let effective_context = context
        .clone()
        .or_else(|| kubeconfig.current_context.clone());

    let kube_options = KubeConfigOptions {
        context,
        ..Default::default()
    };
    let config = Config::from_custom_kubeconfig(kubeconfig, &kube_options).await?;

    Ok(ResolvedConfig {
        mode: ExecutionMode::Local,
        context: effective_context,
        kubeconfig: Some(path),
        config,
    })
}
