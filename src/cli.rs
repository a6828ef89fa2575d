/// Command-line arguments for selecting the kubeconfig and context
use clap::Args;
use std::path::PathBuf;

use crate::config::ResolverOptions;

/// Kubernetes connection flags, meant to be flattened into an entry point's parser
///
/// ```ignore
/// #[derive(clap::Parser)]
/// struct Cli {
///     #[command(flatten)]
///     kube: kube_resolve::cli::KubeArgs,
/// }
/// ```
#[derive(Args, Debug, Clone, Default)]
pub struct KubeArgs {
    /// Path to the kubeconfig file (default: $HOME/.kube/config, or $USERPROFILE on Windows)
    #[arg(long, global = true, value_name = "PATH")]
    pub kubeconfig: Option<PathBuf>,

    /// Kubeconfig context to use (default: the current context)
    #[arg(long, global = true, value_name = "NAME")]
    pub context: Option<String>,

    /// Do not let IN_CLUSTER=true force in-cluster mode
    #[arg(long, global = true)]
    pub ignore_in_cluster_override: bool,
}

impl KubeArgs {
    /// Convert parsed flags into resolver options
    pub fn to_options(&self) -> ResolverOptions {
        ResolverOptions {
            kubeconfig: self.kubeconfig.clone(),
            context: self.context.clone(),
            honor_in_cluster_override: !self.ignore_in_cluster_override,
        }
        .normalized()
    }
}
