//! Read access to cluster objects.
//!
//! [`ClusterReader`] is the seam between revision discovery and the API
//! transport. [`KubeCluster`] reads from a real API server through a
//! `kube::Client`, [`MemoryCluster`] serves objects held in memory.

pub mod api;
pub mod connect;
pub mod memory;
pub mod reader;

pub use api::KubeCluster;
pub use connect::{ConnectError, ConnectOptions, Connection, connect, load_config};
pub use memory::MemoryCluster;
pub use reader::{ClusterError, ClusterReader, get, list};
