//! Task module - the data a scoring routine sees and the descriptors the
//! registry hands out.
//!
//! Contexts borrow caller data and are never mutated by scoring; entries are
//! immutable once the registry hands them out.

pub mod args;
mod context;
mod entry;
mod error;
pub mod params;
pub mod reward;

pub use args::{ArgSchema, ArgValue, ArgValues};
pub use context::{derive_logic_id, ContextBuilder, NeighborBuffers, NeighborId, TaskContext, LOGIC_INPUTS};
pub use entry::{Requirements, TaskEntry};
pub use error::{ArgError, TaskError};
pub use params::TaskArgs;
