//! Kubernetes API groups, versions and client configuration.

/// API version of the apps group, accepted in `TYPE.VERSION.GROUP` arguments.
pub const APPS_VERSION: &str = "v1";

/// Environment variable listing kubeconfig files, separated like `PATH`.
pub const KUBECONFIG_ENV: &str = "KUBECONFIG";
