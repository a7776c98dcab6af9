mod reduce;

pub use reduce::{TreeNode, reduce_tree};
