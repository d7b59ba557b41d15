//! Connection setup from kubeconfig files and command-line overrides.

use kube::config::{InferConfigError, KubeConfigOptions, Kubeconfig, KubeconfigError};
use kube::{Client, Config};
use pkg_constants::api::KUBECONFIG_ENV;
use std::path::PathBuf;
use thiserror::Error;
use tracing::debug;

use crate::api::KubeCluster;

#[derive(Debug, Error)]
pub enum ConnectError {
    #[error(transparent)]
    Kubeconfig(#[from] KubeconfigError),

    #[error(transparent)]
    Infer(#[from] InferConfigError),

    #[error("invalid server address {server:?}: {message}")]
    Server { server: String, message: String },

    #[error(transparent)]
    Kube(#[from] kube::Error),
}

/// Connection flags shared by all commands.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConnectOptions {
    /// Kubeconfig file; overrides KUBECONFIG.
    pub kubeconfig: Option<PathBuf>,
    /// Kubeconfig context instead of the current one.
    pub context: Option<String>,
    /// Namespace instead of the context's.
    pub namespace: Option<String>,
    /// API server address instead of the context cluster's.
    pub server: Option<String>,
    pub insecure_skip_tls_verify: bool,
}

impl ConnectOptions {
    /// The namespace flag, else the namespace of the selected context.
    pub fn namespace(&self, config: &Config) -> String {
        self.namespace
            .clone()
            .unwrap_or_else(|| config.default_namespace.clone())
    }

    fn kubeconfig_paths(&self, env: impl Fn(&str) -> Option<String>) -> Vec<PathBuf> {
        if let Some(path) = &self.kubeconfig {
            return vec![path.clone()];
        }
        env(KUBECONFIG_ENV)
            .map(|value| {
                std::env::split_paths(&value)
                    .filter(|path| !path.as_os_str().is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// A client together with the namespace commands operate in.
#[derive(Clone)]
pub struct Connection {
    pub cluster: KubeCluster,
    pub namespace: String,
}

/// Resolve the client configuration.
///
/// Kubeconfig files come from `--kubeconfig`, else from the
/// path list in KUBECONFIG, merged in order. Without either, the in-cluster
/// environment and `~/.kube/config` are tried.
pub async fn load_config(
    options: &ConnectOptions,
    env: impl Fn(&str) -> Option<String>,
) -> Result<Config, ConnectError> {
    let kubeconfig_options = KubeConfigOptions {
        context: options.context.clone(),
        ..Default::default()
    };

    let paths = options.kubeconfig_paths(env);
    let mut config = if let Some((first, rest)) = paths.split_first() {
        debug!("Reading kubeconfig from {:?}", paths);
        let mut kubeconfig = Kubeconfig::read_from(first)?;
        for path in rest {
            kubeconfig = kubeconfig.merge(Kubeconfig::read_from(path)?)?;
        }
        Config::from_custom_kubeconfig(kubeconfig, &kubeconfig_options).await?
    } else if options.context.is_some() {
        Config::from_kubeconfig(&kubeconfig_options).await?
    } else {
        match (Config::infer().await, &options.server) {
            (Ok(config), _) => config,
            (Err(err), Some(server)) => {
                debug!("No kubeconfig found ({}), using {} directly", err, server);
                Config::new(parse_server(server)?)
            }
            (Err(err), None) => return Err(err.into()),
        }
    };

    if let Some(server) = &options.server {
        config.cluster_url = parse_server(server)?;
    }
    if options.insecure_skip_tls_verify {
        config.accept_invalid_certs = true;
    }
    Ok(config)
}

fn parse_server<T>(server: &str) -> Result<T, ConnectError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    server.parse().map_err(|err: T::Err| ConnectError::Server {
        server: server.to_string(),
        message: format!("{}", err),
    })
}

/// Connect with the process environment.
pub async fn connect(options: &ConnectOptions) -> Result<Connection, ConnectError> {
    let config = load_config(options, |key| std::env::var(key).ok()).await?;
    let namespace = options.namespace(&config);
    debug!("Using API server {} in namespace {}", config.cluster_url, namespace);
    let client = Client::try_from(config)?;
    Ok(Connection {
        cluster: KubeCluster::new(client),
        namespace,
    })
}
