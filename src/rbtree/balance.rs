//! Rotations and the two fix-up loops that restore the red-black invariants after
//! an insert or a delete.

use generational_arena::Index;
use log::trace;

use super::node::{Color, Side};
use super::RbTree;
use crate::argument::Argument;

impl<T, C, A: Argument<T>> RbTree<T, C, A> {
    /// Puts `n` (which may be absent) where `pos` used to hang. `pos` keeps its own
    /// parent link; the caller relinks it.
    pub(super) fn transplant(&mut self, pos: Index, n: Option<Index>) {
        let parent = self.nodes[pos].parent;
        match parent {
            None => self.root = n,
            Some(p) => {
                let side = self.side_of(p, Some(pos));
                *self.nodes[p].child_mut(side) = n;
            }
        }
        if let Some(n) = n {
            self.nodes[n].parent = parent;
        }
    }

    /// Rotates `x` down towards `dir`, promoting its child on the opposite side.
    ///
    /// `rotate(x, Side::Left)` is the classic left rotation:
    /// ```txt
    ///       x                y
    ///      / \              / \
    ///     a   y    --->    x   c
    ///        / \          / \
    ///       b   c        a   b
    /// ```
    /// Colors are untouched. The arguments of `x` and then `y` are recomputed
    /// (their children changed) and the change is propagated above `y`.
    pub(super) fn rotate(&mut self, x: Index, dir: Side) {
        let y = self.child(x, dir.opposite()).expect("rotation needs a child to promote");

        let inner = self.child(y, dir);
        *self.nodes[x].child_mut(dir.opposite()) = inner;
        if let Some(b) = inner {
            self.nodes[b].parent = Some(x);
        }

        self.transplant(x, Some(y));
        *self.nodes[y].child_mut(dir) = Some(x);
        self.nodes[x].parent = Some(y);
        trace!("Rotated {x:?} {dir:?}, {y:?} promoted");

        if A::ENABLED {
            self.recompute(x);
            self.recompute(y);
            let above = self.nodes[y].parent;
            self.propagate(above);
        }
    }

    /// Restores the invariants after `z` was linked in as a red leaf.
    ///
    /// The only possible violation is a red `z` under a red parent. A red uncle
    /// lets us push the violation two levels up by recoloring. Otherwise one or
    /// two rotations around the grandparent end the loop.
    /// ```txt
    ///   red uncle           inner grandchild       outer grandchild
    ///       [g]                   [g]                    [g]
    ///      /   \                 /   \                  /   \
    ///     p     u               p    [u]               p    [u]
    ///    /                       \                    /
    ///   z                         z                  z
    /// ```
    pub(super) fn insert_fixup(&mut self, mut z: Index) {
        while let Some(p) = self.nodes[z].parent {
            if self.nodes[p].color == Color::Black {
                break;
            }
            let g = self.nodes[p].parent.expect("a red node is never the root");
            let side = self.side_of(g, Some(p));
            let uncle = self.child(g, side.opposite());

            if let Some(u) = uncle.filter(|&u| self.nodes[u].color == Color::Red) {
                trace!("Insert fixup at {z:?}: red uncle, recoloring");
                self.nodes[p].color = Color::Black;
                self.nodes[u].color = Color::Black;
                self.nodes[g].color = Color::Red;
                z = g;
                continue;
            }

            // bring an inner grandchild to the outside first, it then takes `p`'s place
            let top = if self.child(p, side.opposite()) == Some(z) {
                trace!("Insert fixup at {z:?}: inner grandchild");
                self.rotate(p, side);
                z
            } else {
                p
            };

            trace!("Insert fixup at {z:?}: outer grandchild, rotating {g:?}");
            self.nodes[top].color = Color::Black;
            self.nodes[g].color = Color::Red;
            self.rotate(g, side.opposite());
            break;
        }

        if let Some(root) = self.root {
            self.nodes[root].color = Color::Black;
        }
    }

    /// Restores the invariants after a black node was spliced out from under
    /// `parent`, leaving `z` (possibly absent) one black short.
    ///
    /// With `w` the sibling of `z`:
    /// 1. red `w`: rotate it above `parent` so the sibling becomes black,
    /// 2. black `w` with two black children: paint `w` red and move up,
    /// 3. black `w` with a red near child: rotate that child above `w`,
    /// 4. black `w` with a red far child: rotate `w` above `parent`, done.
    pub(super) fn delete_fixup(&mut self, mut parent: Option<Index>, mut z: Option<Index>) {
        while z != self.root && self.is_black(z) {
            let Some(p) = parent else { break };
            let side = self.side_of(p, z);
            let mut w = self.sibling(p, side);

            if self.nodes[w].color == Color::Red {
                trace!("Delete fixup under {p:?}: red sibling");
                self.nodes[w].color = Color::Black;
                self.nodes[p].color = Color::Red;
                self.rotate(p, side);
                w = self.sibling(p, side);
            }

            let near = self.child(w, side);
            let far = self.child(w, side.opposite());

            if self.is_black(near) && self.is_black(far) {
                trace!("Delete fixup under {p:?}: black nephews, moving up");
                self.nodes[w].color = Color::Red;
                z = Some(p);
                parent = self.nodes[p].parent;
                continue;
            }

            if self.is_black(far) {
                if let Some(near) = near {
                    trace!("Delete fixup under {p:?}: red near nephew");
                    self.nodes[near].color = Color::Black;
                    self.nodes[w].color = Color::Red;
                    self.rotate(w, side.opposite());
                    w = self.sibling(p, side);
                }
            }

            trace!("Delete fixup under {p:?}: red far nephew, rotating");
            self.nodes[w].color = self.nodes[p].color;
            self.nodes[p].color = Color::Black;
            if let Some(far) = self.child(w, side.opposite()) {
                self.nodes[far].color = Color::Black;
            }
            self.rotate(p, side);
            z = self.root;
            parent = None;
        }

        if let Some(z) = z {
            self.nodes[z].color = Color::Black;
        }
    }

    /// The sibling of the `side` child of `p`. A node that is one black short
    /// always has one, since the other side still has a positive black height.
    fn sibling(&self, p: Index, side: Side) -> Index {
        self.child(p, side.opposite()).expect("a double-black node always has a sibling")
    }
}
