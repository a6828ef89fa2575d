/// Kubernetes client configuration resolution
pub mod client;
pub mod mode;
pub mod resolver;

pub use client::{
    client_from_resolved, create_client, create_client_or_die, create_client_or_die_with_env,
    create_client_with_env,
};
pub use mode::ExecutionMode;
pub use resolver::{resolve_config, resolve_config_with_env, ResolveError, ResolvedConfig};
