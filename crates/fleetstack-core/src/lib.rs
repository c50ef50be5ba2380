//! FleetStack core
//!
//! Options tree describing a container-cluster deployment: the cluster,
//! its services, where the network comes from and the tags to stamp on
//! every taggable resource.
//!
//! The types derive serde `Deserialize` with camelCase keys, so callers can
//! build them from whatever document they already hold:
//!
//! ```
//! use fleetstack_core::ClusterSpec;
//!
//! let spec: ClusterSpec = serde_json::from_value(serde_json::json!({
//!     "clusterName": "api",
//!     "public": true,
//!     "services": [{ "name": "web", "image": "nginx:1.27", "port": 8080 }]
//! }))
//! .unwrap();
//!
//! assert!(spec.validate().is_ok());
//! ```

pub mod error;
pub mod model;
pub mod naming;

pub use error::*;
pub use model::*;
pub use naming::pascal_case;
