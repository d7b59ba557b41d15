use clap::Args;
use pkg_cluster::ConnectOptions;
use std::path::PathBuf;

/// Connection flags shared by all commands.
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Path to the kubeconfig file to use; overrides KUBECONFIG
    #[arg(long, global = true, value_name = "PATH")]
    pub kubeconfig: Option<PathBuf>,

    /// The name of the kubeconfig context to use
    #[arg(long, global = true)]
    pub context: Option<String>,

    /// Namespace of the workload; defaults to the context's namespace
    #[arg(short = 'n', long, global = true)]
    pub namespace: Option<String>,

    /// The address and port of the Kubernetes API server
    #[arg(short = 's', long, global = true)]
    pub server: Option<String>,

    /// Skip verification of the API server's certificate
    #[arg(long, global = true)]
    pub insecure_skip_tls_verify: bool,
}

impl GlobalArgs {
    pub fn connect_options(&self) -> ConnectOptions {
        ConnectOptions {
            kubeconfig: self.kubeconfig.clone(),
            context: self.context.clone(),
            namespace: self.namespace.clone(),
            server: self.server.clone(),
            insecure_skip_tls_verify: self.insecure_skip_tls_verify,
        }
    }
}
