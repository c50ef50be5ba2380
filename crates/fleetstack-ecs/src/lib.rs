//! ECS/Fargate synthesizer for FleetStack
//!
//! Turns a [`ClusterSpec`](fleetstack_core::ClusterSpec) into the resource
//! graph of an ECS cluster: the cluster, its load balancer, the security
//! groups that wire them together, and one Fargate service per declared
//! service.
//!
//! # Components
//!
//! - [`Cluster`]: owns the services and assembles the merged graph
//! - [`Service`]: task definition, target group, listener and ECS service
//! - [`Vpc`]: the [`NetworkContext`] the cluster is placed in
//! - [`security`]: which security groups exist for a given topology
//!
//! Synthesis is synchronous and pure. Calling [`Cluster::generate`] twice
//! yields the same graph.
//!
//! # Example
//!
//! ```
//! use fleetstack_core::{ClusterSpec, ServiceSpec, Tags, VpcSpec};
//! use fleetstack_ecs::{Cluster, Vpc};
//!
//! let tags = Tags::new().with("team", "payments");
//! let vpc = Vpc::new("prod", VpcSpec::default(), Some(tags.clone()))?;
//!
//! let spec = ClusterSpec::new("billing")
//!     .with_public(true)
//!     .with_service(ServiceSpec::new("api", "billing-api:1.4.0").with_port(8080));
//! let cluster = Cluster::new("prod", spec, &vpc, Some(tags))?;
//!
//! let resources = vpc.generate()?.merge(cluster.generate()?)?;
//! assert!(resources.contains("ECSBillingLoadBalancerProd"));
//! assert!(cluster.outputs().contains("ECSBillingApiEndpointProd"));
//! # Ok::<(), fleetstack_ecs::EcsError>(())
//! ```

pub mod cluster;
pub mod error;
pub mod network;
pub mod security;
pub mod service;

pub use cluster::{Cluster, IDLE_TIMEOUT_SECONDS};
pub use error::{EcsError, Result};
pub use network::{NetworkContext, Vpc};
pub use service::{Service, ServiceArgs, ServiceSynthesizer};
