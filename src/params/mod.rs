//! Automatable parameters: the discovery table and per-quantum resolution.

/// Block-constant vs per-sample resolution and the k-rate snapshot.
pub mod automation;
/// Parameter names, defaults and ranges.
pub mod descriptor;

pub use automation::{BlockParams, ParamSnapshot, ResolvedParam};
pub use descriptor::{descriptors, ParamId, ParameterDescriptor};
