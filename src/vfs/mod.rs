mod node;
mod path;
mod tree_fs;

pub use node::{Node, NodeId, NodeKind};
pub use path::split_dir_and_name;
pub use tree_fs::TreeFS;
