//! # tasklib
//!
//! Task registry and reward evaluation engine for digital evolution
//! experiments.
//!
//! Agents in a population receive inputs, produce outputs, and are rewarded
//! for the computations their behavior performs. This library decides which
//! of a configured set of named tasks an agent's behavior satisfies and how
//! well, as a reward in `[0, 1]` per task.
//!
//! ## Architecture
//!
//! ```text
//!   "MatchNumber 42"            Episode (inputs, outputs, neighbors, ...)
//!          │                                  │
//!          ▼                                  ▼
//!   ┌──────────────┐    lookup    ┌──────────────────┐
//!   │   TaskLib    │─────────────▶│     catalog      │
//!   │  (registry)  │              │ name -> scorer + │
//!   └──────┬───────┘              │   arg parser     │
//!          │ evaluate             └──────────────────┘
//!          ▼
//!   ┌──────────────┐   TaskContext bound to entry
//!   │   Scorer     │◀──────────────────────────────
//!   │ (dispatcher) │──▶ logic / arithmetic / math / sequence /
//!   └──────────────┘    matching / resource / comm
//! ```
//!
//! ## Modules
//! - `task`: Task Context, Task Entry, requirements, argument grammar, reward helpers
//! - `scoring`: Scoring routines per task family and the dispatcher
//! - `registry`: `TaskLib` and the name catalog
//! - `episode`: Serializable episode record that lends a Task Context
//! - `config`: Environment configuration for the binary

pub mod config;
pub mod episode;
pub mod registry;
pub mod scoring;
pub mod task;

pub use episode::Episode;
pub use registry::catalog::task_names;
pub use registry::TaskLib;
pub use task::{
    ArgError, NeighborBuffers, Requirements, TaskArgs, TaskContext, TaskEntry, TaskError,
};
