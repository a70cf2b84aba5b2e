//! A Red-Black tree ordered by a caller-supplied comparator. Nodes live in an arena and refer
//! to each other (children and parent) by index, so there's no `unsafe` and no reference cycle
//! even though every node knows its parent.
//!
//! The comparator isn't stored. Every ordered operation takes one and callers must hand the same
//! ordering to every call on a given tree, otherwise lookups will wander off into the wrong
//! subtrees. Types that are `Ord` can skip all that and use [`Tree::insert`] and
//! [`Tree::search`].
//!
//! # Examples
//!
//! ```
//! use rbtree::Tree;
//!
//! // Order people by age only.
//! let by_age = |a: &(u8, &str), b: &(u8, &str)| a.0.cmp(&b.0);
//!
//! let mut tree = Tree::new();
//! tree.insert_by(by_age, [(30, "ada"), (25, "grace")])
//!     .insert_by(by_age, [(30, "alan")]);
//!
//! // Someone is already 30 so "alan" was ignored.
//! assert_eq!(tree.len(), 2);
//!
//! // Searching finds the stored value that compares equal.
//! assert_eq!(tree.search_by(by_age, &(30, "")), Some(&(30, "ada")));
//! assert_eq!(tree.search_by(by_age, &(40, "")), None);
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::iter::FusedIterator;

use log::{debug, trace};

use crate::queue::Queue;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Color {
    Red,
    Black,
}

/// Which child of a node we're talking about.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Side {
    Left,
    Right,
}

impl Side {
    fn opposite(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

/// Index of a node in [`Tree::nodes`]. Nodes are never removed so an id stays valid for the
/// lifetime of the tree.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct NodeId(usize);

#[derive(Clone, Debug)]
struct Node<E> {
    value: E,
    color: Color,
    left: Option<NodeId>,
    right: Option<NodeId>,
    /// `None` only for the root.
    parent: Option<NodeId>,
}

impl<E> Node<E> {
    fn child(&self, side: Side) -> Option<NodeId> {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    fn child_mut(&mut self, side: Side) -> &mut Option<NodeId> {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }
}

/// A Red-Black tree. Values can be inserted and searched for but never removed. See the
/// [module documentation](self) for how ordering works.
#[derive(Clone)]
pub struct Tree<E> {
    nodes: Vec<Node<E>>,
    root: Option<NodeId>,
}

impl<E> Default for Tree<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> fmt::Debug for Tree<E>
where
    E: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<E> Tree<E> {
    /// Generates a new, empty `Tree`.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            root: None,
        }
    }

    /// The number of values stored in the tree.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the tree holds no values.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// The value currently sitting at the root, if any. Rotations during insertion can move a
    /// different value up here.
    pub fn root(&self) -> Option<&E> {
        self.root.map(|root| &self.node(root).value)
    }

    /// The number of nodes on the longest path from the root down to a missing child. An empty
    /// tree has height 0 and a lone root has height 1.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree::Tree;
    ///
    /// let mut tree = Tree::new();
    /// assert_eq!(tree.height(), 0);
    ///
    /// tree.insert(1);
    /// assert_eq!(tree.height(), 1);
    ///
    /// // Sorted input doesn't degrade into a list.
    /// tree.extend(2..=7);
    /// assert_eq!(tree.height(), 4);
    /// ```
    pub fn height(&self) -> usize {
        self.subtree_height(self.root)
    }

    fn subtree_height(&self, id: Option<NodeId>) -> usize {
        id.map_or(0, |id| {
            let node = self.node(id);
            let left_height = self.subtree_height(node.left);
            let right_height = self.subtree_height(node.right);
            left_height.max(right_height) + 1
        })
    }

    /// Potentially finds the stored value that `cmp` considers equal to `target`. The stored
    /// value is returned, which needn't be identical to `target`. `cmp` is always called as
    /// `cmp(target, stored)`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree::Tree;
    ///
    /// let cmp = |a: &i32, b: &i32| a.cmp(b);
    /// let mut tree = Tree::new();
    /// assert_eq!(tree.search_by(cmp, &1), None);
    ///
    /// tree.insert_by(cmp, [1, 2]);
    /// assert_eq!(tree.search_by(cmp, &1), Some(&1));
    /// assert_eq!(tree.search_by(cmp, &42), None);
    /// ```
    pub fn search_by<F>(&self, cmp: F, target: &E) -> Option<&E>
    where
        F: Fn(&E, &E) -> Ordering,
    {
        let mut cur = self.root;
        while let Some(id) = cur {
            let node = self.node(id);
            match cmp(target, &node.value) {
                Ordering::Less => cur = node.left,
                Ordering::Equal => return Some(&node.value),
                Ordering::Greater => cur = node.right,
            }
        }
        None
    }

    /// Inserts each of `values` in order. A value that `cmp` considers equal to one already in
    /// the tree is dropped and the tree is left untouched. Returns the tree so calls can be
    /// chained.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree::Tree;
    ///
    /// let cmp = |a: &i32, b: &i32| a.cmp(b);
    /// let mut tree = Tree::new();
    ///
    /// tree.insert_by(cmp, [3, 1, 2]).insert_by(cmp, [1]);
    /// assert_eq!(tree.len(), 3);
    /// assert_eq!(tree.iter().collect::<Vec<_>>(), vec![&1, &2, &3]);
    /// ```
    pub fn insert_by<F, I>(&mut self, cmp: F, values: I) -> &mut Self
    where
        F: Fn(&E, &E) -> Ordering,
        I: IntoIterator<Item = E>,
    {
        for value in values {
            self.insert_one(&cmp, value);
        }
        self
    }

    /// Inserts a single value and rebalances. Returns whether the value was new.
    fn insert_one<F>(&mut self, cmp: &F, value: E) -> bool
    where
        F: Fn(&E, &E) -> Ordering,
    {
        let Some(mut parent) = self.root else {
            let root = self.push_node(value, Color::Black, None);
            trace!("{root:?} is the first node and becomes the root");
            self.root = Some(root);
            return true;
        };

        let side = loop {
            let node = self.node(parent);
            let side = match cmp(&value, &node.value) {
                Ordering::Less => Side::Left,
                Ordering::Equal => {
                    debug!("Ignoring a value equal to the one in {parent:?}");
                    return false;
                }
                Ordering::Greater => Side::Right,
            };
            match node.child(side) {
                Some(child) => parent = child,
                None => break side,
            }
        };

        let new = self.push_node(value, Color::Red, Some(parent));
        *self.node_mut(parent).child_mut(side) = Some(new);
        trace!("Attached {new:?} as the {side:?} child of {parent:?}");
        self.balance(new);

        if cfg!(debug_assertions) {
            let root = self.root.expect("Inserting leaves a root");
            assert_eq!(self.node(root).color, Color::Black);
            assert!(self.node(root).parent.is_none());
            let node = self.node(new);
            if let Some(parent) = node.parent {
                let expected = match self.side_of(new) {
                    Side::Left => Ordering::Less,
                    Side::Right => Ordering::Greater,
                };
                assert_eq!(cmp(&node.value, &self.node(parent).value), expected);
            }
        }
        true
    }

    /// Restores the color invariants after `cur` was made red, either because it was just
    /// inserted or because its children were recolored black.
    ///
    /// See <https://en.wikipedia.org/wiki/Red%E2%80%93black_tree#Insertion> for terminology.
    fn balance(&mut self, mut cur: NodeId) {
        loop {
            if self.node(cur).color == Color::Black {
                return;
            }
            let Some(parent) = self.node(cur).parent else {
                trace!("Recoloring the root {cur:?} black");
                self.node_mut(cur).color = Color::Black;
                return;
            };
            if self.node(parent).color == Color::Black {
                return;
            }

            let grandparent = self
                .node(parent)
                .parent
                .expect("A red parent is never the root");
            let parent_side = self.side_of(parent);
            let uncle = self
                .node(grandparent)
                .child(parent_side.opposite())
                .filter(|&uncle| self.node(uncle).color == Color::Red);

            // A red uncle means we can push the blackness of the grandparent down a level. The
            // grandparent might now be a red child of a red node so keep going from there.
            if let Some(uncle) = uncle {
                trace!("Pushing black down from {grandparent:?}");
                self.node_mut(parent).color = Color::Black;
                self.node_mut(uncle).color = Color::Black;
                self.node_mut(grandparent).color = Color::Red;
                cur = grandparent;
                continue;
            }

            // Otherwise rotate whichever node ends up in the middle of the three to the top of
            // this subtree. Black-heights below are unchanged so no further fix-up is needed.
            let new_top = match (parent_side, self.side_of(cur)) {
                (Side::Left, Side::Left) => self.rotate_right(parent),
                (Side::Right, Side::Right) => self.rotate_left(parent),
                (Side::Left, Side::Right) => {
                    self.rotate_left(cur);
                    self.rotate_right(cur)
                }
                (Side::Right, Side::Left) => {
                    self.rotate_right(cur);
                    self.rotate_left(cur)
                }
            };
            self.node_mut(new_top).color = Color::Black;
            self.node_mut(grandparent).color = Color::Red;
            return;
        }
    }

    /// Rotates `node` up and to the left over its parent. `node` must be its parent's right
    /// child. Returns the new root of the rotated subtree.
    fn rotate_left(&mut self, node: NodeId) -> NodeId {
        self.rotate(node, Side::Left)
    }

    /// Rotates `node` up and to the right over its parent. `node` must be its parent's left
    /// child. Returns the new root of the rotated subtree.
    fn rotate_right(&mut self, node: NodeId) -> NodeId {
        self.rotate(node, Side::Right)
    }

    /// Swaps `node` with its parent, moving the parent down on the `dir` side. Returns `node`,
    /// which now sits where the parent was.
    ///
    /// ## Panics
    ///
    /// When `node` has no parent.
    ///
    /// # Diagram
    ///
    /// For `dir == Side::Right` we want to perform this transformation (`Side::Left` is the
    /// mirror image):
    ///
    /// ```text
    ///    Option<grandparent>       Option<grandparent>
    ///        /                         /
    ///     parent                     node
    ///      /   \                    /    \
    ///    node   z    rotate ->     x    parent
    ///    / \                             /  \
    ///   x   y                           y    z
    /// ```
    fn rotate(&mut self, node: NodeId, dir: Side) -> NodeId {
        let parent = self.node(node).parent.expect("Rotating requires a parent");
        debug_assert_eq!(self.node(parent).child(dir.opposite()), Some(node));
        let grandparent = self.node(parent).parent;
        trace!("Rotating {node:?} {dir:?} over {parent:?}");

        // `y` in the diagram changes parents but keeps its place in the in-order sequence.
        let inner = self.node(node).child(dir);
        *self.node_mut(parent).child_mut(dir.opposite()) = inner;
        if let Some(inner) = inner {
            self.node_mut(inner).parent = Some(parent);
        }

        *self.node_mut(node).child_mut(dir) = Some(parent);
        self.node_mut(parent).parent = Some(node);

        self.node_mut(node).parent = grandparent;
        match grandparent {
            Some(grandparent) => {
                let grandparent = self.node_mut(grandparent);
                if grandparent.left == Some(parent) {
                    grandparent.left = Some(node);
                } else {
                    grandparent.right = Some(node);
                }
            }
            None => {
                trace!("{node:?} is the new root");
                self.root = Some(node);
            }
        }
        node
    }

    /// Checks the Red-Black invariants:
    ///
    /// 1. The root is black.
    /// 2. No red node has a red child.
    /// 3. Every path from the root to a missing child passes through the same number of black
    ///    nodes.
    ///
    /// This never modifies the tree and is only meant as a self-check for tests. An empty tree
    /// is valid.
    pub fn is_valid(&self) -> bool {
        let Some(root) = self.root else {
            return true;
        };
        self.node(root).color == Color::Black
            && self.no_red_red(root)
            && self.black_heights_match(root)
    }

    fn no_red_red(&self, id: NodeId) -> bool {
        let node = self.node(id);
        [node.left, node.right].into_iter().flatten().all(|child| {
            !(node.color == Color::Red && self.node(child).color == Color::Red)
                && self.no_red_red(child)
        })
    }

    /// If every path from `root` down to a missing child has the same number of black nodes then
    /// the same is true below every other node, since the part of the path above it is shared.
    fn black_heights_match(&self, root: NodeId) -> bool {
        let mut counts = self
            .nodes_with_missing_child(root)
            .into_iter()
            .map(|id| self.black_nodes_up_to_root(id));
        match counts.next() {
            Some(first) => counts.all(|count| count == first),
            None => true,
        }
    }

    /// Every node with at least one missing child, in level order.
    fn nodes_with_missing_child(&self, root: NodeId) -> Vec<NodeId> {
        let mut queue = Queue::new();
        queue.enqueue(root);

        let mut found = Vec::new();
        while let Ok(id) = queue.dequeue() {
            let node = self.node(id);
            if node.left.is_none() || node.right.is_none() {
                found.push(id);
            }
            for child in [node.left, node.right].into_iter().flatten() {
                queue.enqueue(child);
            }
        }
        found
    }

    fn black_nodes_up_to_root(&self, id: NodeId) -> usize {
        let mut count = 0;
        let mut cur = Some(id);
        while let Some(id) = cur {
            let node = self.node(id);
            if node.color == Color::Black {
                count += 1;
            }
            cur = node.parent;
        }
        count
    }

    /// Iterates over the values in ascending order (according to the comparator they were
    /// inserted with).
    pub fn iter(&self) -> Iter<'_, E> {
        let mut iter = Iter {
            tree: self,
            stack: Vec::new(),
            remaining: self.len(),
        };
        iter.push_left_spine(self.root);
        iter
    }

    /// Which side of its parent `id` hangs off.
    ///
    /// ## Panics
    ///
    /// When `id` is the root.
    fn side_of(&self, id: NodeId) -> Side {
        let parent = self.node(id).parent.expect("The root isn't anyone's child");
        if self.node(parent).left == Some(id) {
            Side::Left
        } else {
            Side::Right
        }
    }

    fn push_node(&mut self, value: E, color: Color, parent: Option<NodeId>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            value,
            color,
            left: None,
            right: None,
            parent,
        });
        id
    }

    fn node(&self, id: NodeId) -> &Node<E> {
        &self.nodes[id.0]
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node<E> {
        &mut self.nodes[id.0]
    }
}

impl<E> Tree<E>
where
    E: Ord,
{
    /// Inserts `value` ordered by [`Ord`]. Returns `false`, leaving the tree unchanged, if an
    /// equal value is already present.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree::Tree;
    ///
    /// let mut tree = Tree::new();
    /// assert!(tree.insert(1));
    /// assert!(!tree.insert(1));
    /// assert_eq!(tree.len(), 1);
    /// ```
    pub fn insert(&mut self, value: E) -> bool {
        self.insert_one(&E::cmp, value)
    }

    /// Potentially finds the stored value equal to `target` according to [`Ord`].
    pub fn search(&self, target: &E) -> Option<&E> {
        self.search_by(E::cmp, target)
    }

    /// Whether a value equal to `target` is stored in the tree.
    pub fn contains(&self, target: &E) -> bool {
        self.search(target).is_some()
    }
}

impl<E> Extend<E> for Tree<E>
where
    E: Ord,
{
    fn extend<I: IntoIterator<Item = E>>(&mut self, iter: I) {
        self.insert_by(E::cmp, iter);
    }
}

impl<E> FromIterator<E> for Tree<E>
where
    E: Ord,
{
    fn from_iter<I: IntoIterator<Item = E>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<'a, E> IntoIterator for &'a Tree<E> {
    type Item = &'a E;
    type IntoIter = Iter<'a, E>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An in-order iterator over a [`Tree`], created by [`Tree::iter`].
pub struct Iter<'a, E> {
    tree: &'a Tree<E>,
    /// Nodes whose left subtree has been (or is being) visited but which haven't been yielded.
    stack: Vec<NodeId>,
    remaining: usize,
}

impl<'a, E> Iter<'a, E> {
    fn push_left_spine(&mut self, mut cur: Option<NodeId>) {
        while let Some(id) = cur {
            self.stack.push(id);
            cur = self.tree.node(id).left;
        }
    }
}

impl<'a, E> Iterator for Iter<'a, E> {
    type Item = &'a E;

    fn next(&mut self) -> Option<Self::Item> {
        let tree = self.tree;
        let node = tree.node(self.stack.pop()?);
        self.push_left_spine(node.right);
        self.remaining -= 1;
        Some(&node.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<E> ExactSizeIterator for Iter<'_, E> {}

impl<E> FusedIterator for Iter<'_, E> {}
