mod document;
mod node;
mod scalar;

pub use document::{Document, NodeId};
pub use node::{Node, NodeKind};
pub use scalar::Scalar;
