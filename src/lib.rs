//! Task board state: columns of tasks, team presence, an activity log, and a
//! simulated feed of teammate actions.
//!
//! ARCHITECTURE
//! ============
//! `store::BoardStore` owns all mutable state and is the only mutation entry
//! point. Presentation code reads snapshots from it and calls its actions;
//! `form`, `filter`, and `feed` hold the pure helpers such code needs.
//! `simulation` drives the store from a cancellable tokio task.

pub mod config;
pub mod feed;
pub mod filter;
pub mod form;
pub mod ids;
pub mod model;
pub mod seed;
pub mod simulation;
pub mod store;

pub use config::BoardConfig;
pub use ids::{IdGenerator, SequentialIds, UuidIds};
pub use model::{ColumnId, Priority, Task, TaskDraft, TaskPatch, User, UserStatus};
pub use seed::Seed;
pub use simulation::CollaborationHandle;
pub use store::{BoardState, BoardStore, TaskLocation};
