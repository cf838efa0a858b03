//! Order statistics on top of [`SubtreeSize`].

use std::cmp::Ordering;

use super::node::NodeRef;
use super::RbTree;
use crate::argument::SubtreeSize;
use crate::compare::Compare;

impl<T, C: Compare<T>> RbTree<T, C, SubtreeSize> {
    fn size_of(&self, at: Option<generational_arena::Index>) -> usize {
        at.map_or(0, |at| self.nodes[at].argument)
    }

    /// The `k`-th smallest node (0-based).
    ///
    /// Complexity: O(log(n))
    pub fn nth(&self, mut k: usize) -> Option<NodeRef> {
        let mut cursor = self.root;
        while let Some(at) = cursor {
            let node = &self.nodes[at];
            let left = self.size_of(node.left);
            cursor = match k.cmp(&left) {
                Ordering::Less => node.left,
                Ordering::Equal => return Some(NodeRef(at)),
                Ordering::Greater => {
                    k -= left + 1;
                    node.right
                }
            };
        }
        None
    }

    /// How many values are smaller than the one at `at`; `None` for a stale handle.
    ///
    /// Complexity: O(log(n))
    pub fn rank(&self, at: NodeRef) -> Option<usize> {
        let node = self.nodes.get(at.0)?;
        let mut rank = self.size_of(node.left);
        let mut child = at.0;
        let mut parent = node.parent;
        while let Some(p) = parent {
            let up = &self.nodes[p];
            if up.right == Some(child) {
                rank += self.size_of(up.left) + 1;
            }
            child = p;
            parent = up.parent;
        }
        Some(rank)
    }

    /// How many values in the tree are smaller than `value` (which need not be present).
    pub fn count_less(&self, value: &T) -> usize {
        let mut count = 0;
        let mut cursor = self.root;
        while let Some(at) = cursor {
            let node = &self.nodes[at];
            cursor = match self.compare.compare(value, &node.value) {
                Ordering::Less => node.left,
                Ordering::Equal => return count + self.size_of(node.left),
                Ordering::Greater => {
                    count += self.size_of(node.left) + 1;
                    node.right
                }
            };
        }
        count
    }
}
