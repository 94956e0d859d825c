//! Core identifier types.

mod ids;
mod proptests;

pub use ids::{GroupId, NodeId, UserId};
