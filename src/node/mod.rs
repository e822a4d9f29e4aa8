mod iter;

#[cfg(test)]
mod test;

use compare::Compare;
use std::cmp::Ordering::*;
use std::mem::{self, swap};

pub use self::iter::{Iter, IterMut};

pub type Link<K, V> = Option<Box<Node<K, V>>>;

pub trait LinkExt: Sized {
    type K;
    type V;
    fn as_node_ref(&self) -> Option<&Node<Self::K, Self::V>>;
    fn key_value(&self) -> Option<(&Self::K, &Self::V)>;
    fn key_value_mut(&mut self) -> Option<(&Self::K, &mut Self::V)>;
    fn height(&self) -> usize;
}

impl<K, V> LinkExt for Link<K, V> {
    type K = K;
    type V = V;

    fn as_node_ref(&self) -> Option<&Node<K, V>> {
        self.as_deref()
    }

    fn key_value(&self) -> Option<(&K, &V)> {
        self.as_ref().map(|node| (&node.key, &node.value))
    }

    fn key_value_mut(&mut self) -> Option<(&K, &mut V)> {
        self.as_mut().map(|node| (&node.key, &mut node.value))
    }

    fn height(&self) -> usize {
        self.as_ref().map_or(0, |node| node.height)
    }
}

#[derive(Clone)]
pub struct Node<K, V> {
    left: Link<K, V>,
    right: Link<K, V>,
    height: usize,
    key: K,
    value: V,
}

impl<K, V> Node<K, V> {
    fn new(key: K, value: V) -> Self {
        Node { left: None, right: None, height: 1, key, value }
    }

    fn update_height(&mut self) {
        self.height = 1 + std::cmp::max(self.left.height(), self.right.height());
    }
}

// Promote the right child, demoting the old root to its left slot
fn rotate_left<K, V>(node: &mut Box<Node<K, V>>) {
    let mut save = node.right.take().unwrap();
    swap(&mut node.right, &mut save.left); // save.left now None
    node.update_height();
    swap(node, &mut save);
    node.left = Some(save);
    node.update_height();
}

fn rotate_right<K, V>(node: &mut Box<Node<K, V>>) {
    let mut save = node.left.take().unwrap();
    swap(&mut node.left, &mut save.right); // save.right now None
    node.update_height();
    swap(node, &mut save);
    node.right = Some(save);
    node.update_height();
}

// Restore the height invariant at this node, assuming both subtrees already
// satisfy it. A child leaning toward the inside of the rotation is rotated
// outward first.
fn rebalance<K, V>(node: &mut Box<Node<K, V>>) {
    let delta = node.left.height() as isize - node.right.height() as isize;

    if delta > 1 {
        let left = node.left.as_mut().unwrap();
        if left.right.height() > left.left.height() {
            rotate_left(left);
        }
        rotate_right(node);
    } else if delta < -1 {
        let right = node.right.as_mut().unwrap();
        if right.left.height() > right.right.height() {
            rotate_right(right);
        }
        rotate_left(node);
    } else {
        node.update_height();
    }
}

pub fn insert<K, V, C>(link: &mut Link<K, V>, cmp: &C, key: K, value: V) -> Option<V>
    where C: Compare<K>
{
    match link {
        None => {
            *link = Some(Box::new(Node::new(key, value)));
            None
        }
        Some(node) => {
            let old_value = match cmp.compare(&key, &node.key) {
                Equal => return Some(mem::replace(&mut node.value, value)),
                Less => insert(&mut node.left, cmp, key, value),
                Greater => insert(&mut node.right, cmp, key, value),
            };

            if old_value.is_none() {
                rebalance(node);
            }

            old_value
        }
    }
}

pub fn insert_multi<K, V, C>(link: &mut Link<K, V>, cmp: &C, key: K, value: V)
    where C: Compare<K>
{
    match link {
        None => *link = Some(Box::new(Node::new(key, value))),
        Some(node) => {
            // Equal keys descend right, so duplicates enumerate in
            // insertion order
            if cmp.compares_lt(&key, &node.key) {
                insert_multi(&mut node.left, cmp, key, value);
            } else {
                insert_multi(&mut node.right, cmp, key, value);
            }

            rebalance(node);
        }
    }
}

pub fn remove<K, V, C, Q: ?Sized>(link: &mut Link<K, V>, cmp: &C, key: &Q)
    -> Option<(K, V)> where C: Compare<Q, K>
{
    let ordering = match link {
        None => return None,
        Some(node) => cmp.compare(key, &node.key),
    };

    if ordering == Equal {
        let node = *link.take().unwrap();
        *link = merge(node.left, node.right);
        return Some((node.key, node.value));
    }

    let node = link.as_mut().unwrap();

    let removed = match ordering {
        Less => remove(&mut node.left, cmp, key),
        _ => remove(&mut node.right, cmp, key),
    };

    if removed.is_some() {
        rebalance(node);
    }

    removed
}

// Rejoins the two subtrees of a removed node without relocating any key or
// value: the rightmost node of `left` is unlinked and becomes the junction
// holding the remaining left subtree and `right`. Requires the subtree
// heights to differ by at most one, which holds for the children of any
// node.
fn merge<K, V>(left: Link<K, V>, right: Link<K, V>) -> Link<K, V> {
    match left {
        None => right,
        Some(node) => {
            let mut junction = detach_max(node);
            junction.right = right;
            rebalance(&mut junction);
            Some(junction)
        }
    }
}

// Unlinks the rightmost node of the subtree, rebalancing the right spine on
// the way back up, and returns it with the rest of the subtree as its left
// child.
fn detach_max<K, V>(mut node: Box<Node<K, V>>) -> Box<Node<K, V>> {
    match node.right.take() {
        None => node,
        Some(right) => {
            let mut max = detach_max(right);
            node.right = max.left.take();
            rebalance(&mut node);
            max.left = Some(node);
            max
        }
    }
}

pub fn get<'a, K, V, C, Q: ?Sized>(link: &'a Link<K, V>, cmp: &C, key: &Q)
    -> &'a Link<K, V> where C: Compare<Q, K>
{
    match link {
        None => link,
        Some(node) => match cmp.compare(key, &node.key) {
            Equal => link,
            Less => get(&node.left, cmp, key),
            Greater => get(&node.right, cmp, key),
        },
    }
}

pub fn get_mut<'a, K, V, C, Q: ?Sized>(link: &'a mut Link<K, V>, cmp: &C, key: &Q)
    -> &'a mut Link<K, V> where C: Compare<Q, K>
{
    let ordering = match link {
        None => return link,
        Some(node) => cmp.compare(key, &node.key),
    };

    match ordering {
        Equal => link,
        Less => get_mut(&mut link.as_mut().unwrap().left, cmp, key),
        Greater => get_mut(&mut link.as_mut().unwrap().right, cmp, key),
    }
}

pub trait Dir {
    type Opposite: Dir<Opposite = Self>;

    fn left() -> bool;

    fn forward<K, V>(node: &Node<K, V>) -> &Link<K, V>;
}

pub enum Left {}

impl Dir for Left {
    type Opposite = Right;

    fn left() -> bool { true }

    fn forward<K, V>(node: &Node<K, V>) -> &Link<K, V> { &node.left }
}

pub enum Right {}

impl Dir for Right {
    type Opposite = Left;

    fn left() -> bool { false }

    fn forward<K, V>(node: &Node<K, V>) -> &Link<K, V> { &node.right }
}

pub fn extremum<'a, D, K, V>(mut link: &'a Link<K, V>) -> &'a Link<K, V>
    where D: Dir
{
    while let Some(node) = link {
        let child = D::forward(node);
        if child.is_none() { break; }
        link = child;
    }

    link
}

// Finds the closest key on the `D` side of `key` (predecessor for `Left`,
// successor for `Right`) in a single top-down pass: descending away from the
// probe records the node as the best candidate so far, and an exact hit
// resolves to the near extremum of its far subtree, falling back to the
// candidate. No parent pointers are consulted.
pub fn closest<'a, D, K, V, C, Q: ?Sized>(mut link: &'a Link<K, V>, cmp: &C, key: &Q,
                                          inclusive: bool)
    -> &'a Link<K, V> where D: Dir, C: Compare<Q, K>
{
    let mut candidate = None;

    while let Some(node) = link {
        match cmp.compare(key, &node.key) {
            Equal => {
                if inclusive { return link; }

                let child = D::forward(node);

                return match candidate {
                    Some(ancestor) if child.is_none() => ancestor,
                    _ => extremum::<D::Opposite, _, _>(child),
                };
            }
            order => {
                link = if D::left() == (order == Less) {
                    D::forward(node)
                } else {
                    candidate = Some(link);
                    D::Opposite::forward(node)
                };
            }
        }
    }

    candidate.unwrap_or(link)
}

// In-order walk for `Left`, reverse in-order for `Right`. The first `Some`
// returned by the visitor unwinds the whole walk immediately.
pub fn find_map<D, K, V, F, R>(link: &Link<K, V>, visit: &mut F) -> Option<R>
    where D: Dir, F: FnMut(&K, &V) -> Option<R>
{
    match link {
        None => None,
        Some(node) => {
            if let Some(found) = find_map::<D, _, _, _, _>(D::forward(node), visit) {
                return Some(found);
            }

            if let Some(found) = visit(&node.key, &node.value) {
                return Some(found);
            }

            find_map::<D, _, _, _, _>(D::Opposite::forward(node), visit)
        }
    }
}
