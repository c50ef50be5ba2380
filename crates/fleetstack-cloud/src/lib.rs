//! FleetStack template model
//!
//! Building blocks shared by every synthesizer: typed resource
//! definitions, the ordered resource graph they are collected into,
//! intrinsic references, stack outputs and the naming scheme that keeps
//! every logical resource name unique for a stage.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │               fleetstack-ecs                     │
//! │     Cluster ─── Service ─── Vpc synthesizers     │
//! └─────────────────┬───────────────────────────────┘
//!                   │ generate()
//! ┌─────────────────▼───────────────────────────────┐
//! │               fleetstack-cloud                   │
//! │  ┌──────────────┐  ┌──────────────┐             │
//! │  │ResourceGraph │  │   Outputs    │             │
//! │  └──────────────┘  └──────────────┘             │
//! │  ┌──────────────┐  ┌──────────────┐             │
//! │  │  Reference   │  │ResourceNamer │             │
//! │  └──────────────┘  └──────────────┘             │
//! └─────────────────┬───────────────────────────────┘
//!                   │
//! ┌─────────────────▼───────────────────────────────┐
//! │               fleetstack-core                    │
//! │        ClusterSpec / ServiceSpec / Tags          │
//! └─────────────────────────────────────────────────┘
//! ```

pub mod error;
pub mod graph;
pub mod naming;
pub mod output;
pub mod reference;
pub mod resource;

// Re-exports
pub use error::{Result, TemplateError};
pub use graph::ResourceGraph;
pub use naming::{NamePostFix, ResourceNamer, pascal_case};
pub use output::{OutputDefinition, Outputs};
pub use reference::Reference;
pub use resource::{DeletionPolicy, ResourceDefinition, ResourceType};
