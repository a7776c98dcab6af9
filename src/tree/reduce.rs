//! Depth-bounded fold over a named n-ary tree.

/// A node of a tree that owns its children.
pub trait TreeNode: Sized {
    /// The name recorded in the root-to-node path.
    fn name(&self) -> &str;

    /// Direct children, in traversal order.
    fn children(&self) -> &[Self];
}

/// Fold `reducer` over `root` and its descendants in pre-order.
///
/// The reducer receives the accumulator, the node, and the path of node names from the root to
/// that node (the root's path is `[root.name()]`). Children are visited left to right in the
/// order returned by [`TreeNode::children`], so the traversal is fully determined by the input.
///
/// When `max_depth` is set, a node whose path is longer than `max_depth` still contributes, but
/// its children are not visited: `Some(0)` visits only the root, `Some(1)` the root and its
/// direct children, and `None` the whole tree.
pub fn reduce_tree<N, A, F>(root: &N, mut reducer: F, initial: A, max_depth: Option<usize>) -> A
where
    N: TreeNode,
    F: FnMut(A, &N, &[&str]) -> A,
{
    let mut path = vec![root.name()];
    reduce_node(root, &mut reducer, initial, &mut path, max_depth)
}

fn reduce_node<'a, N, A, F>(node: &'a N, reducer: &mut F, acc: A, path: &mut Vec<&'a str>, max_depth: Option<usize>) -> A
where
    N: TreeNode,
    F: FnMut(A, &N, &[&str]) -> A,
{
    let acc = reducer(acc, node, path);
    if max_depth.is_some_and(|depth| path.len() > depth) {
        return acc;
    }

    node.children().iter().fold(acc, |acc, child| {
        path.push(child.name());
        let acc = reduce_node(child, reducer, acc, path, max_depth);
        let _ = path.pop();
        acc
    })
}
