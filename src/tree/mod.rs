//! Chart-of-accounts tree: building, expand/collapse state, and row flattening.

pub mod expansion;
pub mod model;
pub mod render;

pub use expansion::ExpansionSet;
pub use model::{build_tree, into_tree, AccountNode};
pub use render::{render, Row, DEFAULT_INDENT};
