use alloc::boxed::Box;
use core::ops::Not;

/// An owned, possibly empty subtree.
pub(crate) type Link<T> = Option<Box<Node<T>>>;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Dir {
    Left,
    Right,
}

impl Not for Dir {
    type Output = Dir;

    fn not(self) -> Self::Output {
        match self {
            Dir::Left => Dir::Right,
            Dir::Right => Dir::Left,
        }
    }
}

#[derive(Clone, Debug)]
pub(crate) struct Node<T> {
    pub(crate) value: T,
    pub(crate) left: Link<T>,
    pub(crate) right: Link<T>,
    /// Height of the subtree rooted here. Leaves have height 1.
    pub(crate) height: i8,
}

/// Returns the height of `link`, which is 0 for an empty subtree.
#[inline]
pub(crate) fn height<T>(link: &Link<T>) -> i8 {
    link.as_ref().map_or(0, |node| node.height)
}

impl<T> Node<T> {
    pub(crate) fn new(value: T) -> Box<Node<T>> {
        Box::new(Node {
            value,
            left: None,
            right: None,
            height: 1,
        })
    }

    #[inline]
    pub(crate) fn child(&self, dir: Dir) -> &Link<T> {
        match dir {
            Dir::Left => &self.left,
            Dir::Right => &self.right,
        }
    }

    #[inline]
    pub(crate) fn child_mut(&mut self, dir: Dir) -> &mut Link<T> {
        match dir {
            Dir::Left => &mut self.left,
            Dir::Right => &mut self.right,
        }
    }

    #[inline]
    pub(crate) fn update_height(&mut self) {
        self.height = 1 + height(&self.left).max(height(&self.right));
    }

    /// Returns `height(left) - height(right)`.
    #[inline]
    pub(crate) fn balance(&self) -> i8 {
        height(&self.left) - height(&self.right)
    }

    /// Returns the side that is more than one level taller than the other, if any.
    #[inline]
    pub(crate) fn heavy_side(&self) -> Option<Dir> {
        match self.balance() {
            b if b > 1 => Some(Dir::Left),
            b if b < -1 => Some(Dir::Right),
            _ => None,
        }
    }

    /// Returns `true` if the `dir` subtree is strictly taller than the other one.
    #[inline]
    fn leans(&self, dir: Dir) -> bool {
        match dir {
            Dir::Left => self.balance() > 0,
            Dir::Right => self.balance() < 0,
        }
    }
}

// Performs a rotation, moving `down` into its `dir` subtree and lifting its `!dir` child into its
// place. Returns the new subtree root.
//
// `down` is recomputed before the lifted node, since it is now below it.
fn rotate<T>(mut down: Box<Node<T>>, dir: Dir) -> Box<Node<T>> {
    let Some(mut up) = down.child_mut(!dir).take() else {
        unreachable!("rotation requires a child on the lifted side");
    };

    // The lifted node's `dir` subtree moves across to become `down`'s `!dir` subtree.
    *down.child_mut(!dir) = up.child_mut(dir).take();
    down.update_height();

    *up.child_mut(dir) = Some(down);
    up.update_height();

    up
}

/// Left rotation: the right child of `x` takes its place and `x` becomes its left child.
#[inline]
pub(crate) fn rotate_left<T>(x: Box<Node<T>>) -> Box<Node<T>> {
    rotate(x, Dir::Left)
}

/// Right rotation: the left child of `x` takes its place and `x` becomes its right child.
#[inline]
pub(crate) fn rotate_right<T>(x: Box<Node<T>>) -> Box<Node<T>> {
    rotate(x, Dir::Right)
}

// Rotates `node`, whose `heavy` subtree is two levels taller than the other one.
//
// If the excess height sits in the inner grandchild, the heavy child is first rotated outward.
fn restore<T>(mut node: Box<Node<T>>, heavy: Dir, inner: bool, cause: &'static str) -> Box<Node<T>> {
    match (heavy, inner) {
        (Dir::Left, false) => {
            tracing::trace!(case = "LL", cause, "rotating right");
            rotate_right(node)
        }

        (Dir::Left, true) => {
            tracing::trace!(case = "LR", cause, "rotating left child left, then right");
            node.left = node.left.take().map(rotate_left);
            rotate_right(node)
        }

        (Dir::Right, false) => {
            tracing::trace!(case = "RR", cause, "rotating left");
            rotate_left(node)
        }

        (Dir::Right, true) => {
            tracing::trace!(case = "RL", cause, "rotating right child right, then left");
            node.right = node.right.take().map(rotate_right);
            rotate_left(node)
        }
    }
}

/// Restores balance at `node` after an insertion into its `heavy` subtree, where the insertion
/// went down the `grew` side of that subtree's root.
pub(crate) fn rebalance_inserted<T>(node: Box<Node<T>>, heavy: Dir, grew: Dir) -> Box<Node<T>> {
    restore(node, heavy, grew != heavy, "insert")
}

/// Restores balance at `node`, if needed, after a removal somewhere below it.
///
/// The rotation case is chosen from the heavy child's own balance: a child that is level or leans
/// outward takes a single rotation, one that leans inward takes a double rotation.
pub(crate) fn rebalance_after_removal<T>(node: Box<Node<T>>) -> Box<Node<T>> {
    let Some(heavy) = node.heavy_side() else {
        return node;
    };

    let inner = node
        .child(heavy)
        .as_ref()
        .is_some_and(|child| child.leans(!heavy));

    restore(node, heavy, inner, "remove")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(value: u32) -> Link<u32> {
        Some(Node::new(value))
    }

    fn join(left: Link<u32>, value: u32, right: Link<u32>) -> Link<u32> {
        let mut node = Node::new(value);
        node.left = left;
        node.right = right;
        node.update_height();
        Some(node)
    }

    fn shape(link: &Link<u32>) -> Option<(u32, i8)> {
        link.as_ref().map(|n| (n.value, n.height))
    }

    #[test]
    fn heights() {
        assert_eq!(height::<u32>(&None), 0);
        assert_eq!(height(&leaf(1)), 1);

        let tree = join(leaf(1), 2, join(None, 3, leaf(4)));
        assert_eq!(height(&tree), 3);
        assert_eq!(tree.as_ref().unwrap().balance(), -1);
    }

    #[test]
    fn rotate_left_relinks_inner_subtree() {
        //   2              4
        //  / \            / \
        // 1   4    =>    2   5
        //    / \        / \
        //   3   5      1   3
        let x = join(leaf(1), 2, join(leaf(3), 4, leaf(5))).unwrap();
        let y = rotate_left(x);

        assert_eq!((y.value, y.height), (4, 3));
        assert_eq!(shape(&y.right), Some((5, 1)));

        let x = y.left.as_ref().unwrap();
        assert_eq!((x.value, x.height), (2, 2));
        assert_eq!(shape(&x.left), Some((1, 1)));
        assert_eq!(shape(&x.right), Some((3, 1)));
    }

    #[test]
    fn rotate_right_relinks_inner_subtree() {
        let x = join(join(leaf(1), 2, leaf(3)), 4, leaf(5)).unwrap();
        let y = rotate_right(x);

        assert_eq!((y.value, y.height), (2, 3));
        assert_eq!(shape(&y.left), Some((1, 1)));

        let x = y.right.as_ref().unwrap();
        assert_eq!((x.value, x.height), (4, 2));
        assert_eq!(shape(&x.left), Some((3, 1)));
        assert_eq!(shape(&x.right), Some((5, 1)));
    }

    #[test]
    fn removal_prefers_single_rotation_for_level_child() {
        // The left child is level (balance 0), which only happens after a removal. A single right
        // rotation is required; a double rotation would leave the tree unbalanced.
        let node = join(join(leaf(1), 2, leaf(3)), 4, None).unwrap();
        let root = rebalance_after_removal(node);

        assert_eq!(root.value, 2);
        assert_eq!(root.height, 3);
        assert_eq!(shape(&root.left), Some((1, 1)));

        let right = root.right.as_ref().unwrap();
        assert_eq!((right.value, right.height), (4, 2));
        assert_eq!(shape(&right.left), Some((3, 1)));
    }

    #[test]
    fn removal_double_rotation_for_inward_child() {
        let node = join(None, 1, join(leaf(2), 3, None)).unwrap();
        let root = rebalance_after_removal(node);

        assert_eq!((root.value, root.height), (2, 2));
        assert_eq!(shape(&root.left), Some((1, 1)));
        assert_eq!(shape(&root.right), Some((3, 1)));
    }

    #[test]
    fn balanced_node_is_untouched() {
        let node = join(leaf(1), 2, None).unwrap();
        let root = rebalance_after_removal(node);

        assert_eq!((root.value, root.height), (2, 2));
    }
}
