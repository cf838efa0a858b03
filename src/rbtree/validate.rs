use std::cmp::Ordering;

use generational_arena::Index;

use super::node::{Color, NodeRef, Side};
use super::RbTree;
use crate::argument::Argument;
use crate::compare::Compare;
use crate::error::InvalidTree;

impl<T, C: Compare<T>, A: Argument<T>> RbTree<T, C, A> {
    /// Checks every invariant of the tree and returns the number of black nodes
    /// on each path from the root down to a missing child.
    ///
    /// Complexity: O(n), recursion depth is the height of the tree.
    pub fn validate(&self) -> Result<usize, InvalidTree> {
        let Some(root) = self.root else {
            return match self.nodes.len() {
                0 => Ok(0),
                recorded => Err(InvalidTree::SizeMismatch { counted: 0, recorded }),
            };
        };

        if self.nodes[root].color == Color::Red {
            return Err(InvalidTree::RedRoot);
        }

        let mut counted = 0;
        let black_height = self.check_subtree(root, None, &mut counted)?;
        if counted != self.len() {
            return Err(InvalidTree::SizeMismatch { counted, recorded: self.len() });
        }

        let mut prev = self.extreme(root, Side::Left);
        while let Some(at) = self.step(prev, Side::Right) {
            if self.compare.compare(&self.nodes[prev].value, &self.nodes[at].value) != Ordering::Less {
                return Err(InvalidTree::OutOfOrder(NodeRef(at)));
            }
            prev = at;
        }

        Ok(black_height)
    }

    fn check_subtree(&self, at: Index, parent: Option<Index>, counted: &mut usize) -> Result<usize, InvalidTree> {
        let node = &self.nodes[at];
        *counted += 1;

        if node.parent != parent {
            return Err(InvalidTree::BrokenParent(NodeRef(at)));
        }
        if node.color == Color::Red && self.is_red(parent) {
            return Err(InvalidTree::RedChild(NodeRef(at)));
        }

        let mut heights = [0; 2];
        for (height, child) in heights.iter_mut().zip([node.left, node.right]) {
            if let Some(child) = child {
                *height = self.check_subtree(child, Some(at), counted)?;
            }
        }
        if heights[0] != heights[1] {
            return Err(InvalidTree::BlackHeight(NodeRef(at)));
        }

        if A::ENABLED {
            let left = node.left.map(|l| &self.nodes[l].argument);
            let right = node.right.map(|r| &self.nodes[r].argument);
            let fresh = self.argument.compute(&node.value, left, right);
            if !self.argument.same(&node.argument, &fresh) {
                return Err(InvalidTree::StaleArgument(NodeRef(at)));
            }
        }

        Ok(heights[0] + usize::from(node.color == Color::Black))
    }
}
