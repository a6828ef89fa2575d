/// Client factory: build a kube client from resolved configuration
use kube::Client;
use tracing::debug;

use super::resolver::{resolve_config, resolve_config_with_env, ResolveError, ResolvedConfig};
use crate::config::ResolverOptions;
use crate::utils::env::{EnvSource, ProcessEnv};

/// Resolve configuration from the process environment and build a client
pub async fn create_client(options: &ResolverOptions) -> Result<Client, ResolveError> {
    let resolved = resolve_config(options).await?;
    client_from_resolved(resolved)
}

/// Resolve configuration from `env` and build a client
pub async fn create_client_with_env(
    options: &ResolverOptions,
    env: &impl EnvSource,
) -> Result<Client, ResolveError> {
    let resolved = resolve_config_with_env(options, env).await?;
    client_from_resolved(resolved)
}

/// Build a client from an already resolved configuration.
///
/// Must be called from within a Tokio runtime.
pub fn client_from_resolved(resolved: ResolvedConfig) -> Result<Client, ResolveError> {
    debug!(
        mode = %resolved.mode(),
        server = %resolved.server(),
        "Building Kubernetes client"
    );
    Ok(Client::try_from(resolved.into_config())?)
}

/// Like [`create_client`], but panics on failure.
///
/// Only meant for a program's outermost entry point.
pub async fn create_client_or_die(options: &ResolverOptions) -> Client {
    create_client_or_die_with_env(options, &ProcessEnv).await
}

/// Like [`create_client_with_env`], but panics on failure
pub async fn create_client_or_die_with_env(
    options: &ResolverOptions,
    env: &impl EnvSource,
) -> Client {
    match create_client_with_env(options, env).await {
        Ok(client) => client,
        Err(e) => panic!("failed to create Kubernetes client: {e}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::k8s::resolver::tests::write_kubeconfig;
    use std::collections::HashMap;

    #[tokio::test]
    async fn test_client_from_kubeconfig() {
        let dir = tempfile::tempdir().unwrap();
        let options = ResolverOptions::default().with_kubeconfig(write_kubeconfig(dir.path()));
        let env = HashMap::from([("HOME", "/nonexistent-home")]);

        let client = create_client_with_env(&options, &env).await.unwrap();
        assert_eq!(client.default_namespace(), "default");
    }

    #[tokio::test]
    async fn test_client_uses_context_namespace() {
        let dir = tempfile::tempdir().unwrap();
        let options = ResolverOptions::default()
            .with_kubeconfig(write_kubeconfig(dir.path()))
            .with_context("staging");
        let env = HashMap::from([("HOME", "/nonexistent-home")]);

        let client = create_client_with_env(&options, &env).await.unwrap();
        assert_eq!(client.default_namespace(), "payments");
    }

    #[tokio::test]
    async fn test_resolution_error_propagates() {
        let dir = tempfile::tempdir().unwrap();
        let options = ResolverOptions::default().with_kubeconfig(dir.path().join("missing"));
        let env = HashMap::from([("HOME", "/nonexistent-home")]);

        let result = create_client_with_env(&options, &env).await;
        assert!(matches!(result, Err(ResolveError::Kubeconfig(_))));
    }

    #[test]
    fn test_or_die_returns_client() {
        let dir = tempfile::tempdir().unwrap();
        let options = ResolverOptions::default().with_kubeconfig(write_kubeconfig(dir.path()));
        let env = HashMap::from([("HOME", "/nonexistent-home")]);

        let client = tokio_test::block_on(create_client_or_die_with_env(&options, &env));
        assert_eq!(client.default_namespace(), "default");
    }

    #[tokio::test]
    #[should_panic(expected = "failed to create Kubernetes client")]
    async fn test_or_die_panics_on_failure() {
        let dir = tempfile::tempdir().unwrap();
        let options = ResolverOptions::default().with_kubeconfig(dir.path().join("missing"));
        let env = HashMap::from([("HOME", "/nonexistent-home")]);

        create_client_or_die_with_env(&options, &env).await;
    }
}
