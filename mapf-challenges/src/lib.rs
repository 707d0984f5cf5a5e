pub mod distance;
pub mod error;
pub mod graph;
pub mod grid_map;
pub mod instance;
pub mod lower_bound;
pub mod max_flow;
pub mod picat;
pub mod sampler;
pub mod settings;

pub use error::{GeneratorError, Result};
pub use graph::Graph;
pub use grid_map::GridMap;
pub use instance::{Instance, InstanceGenerator, Team};
pub use lower_bound::{compute_instance_bound, compute_team_bound, ThresholdSearch};
pub use max_flow::FlowNetwork;
pub use settings::{GeneratorSettings, OutputFormat};
