
use compare::Compare;
use std::cmp::Ordering::*;
use std::fmt::{self, Debug};
use std::mem::{replace, swap};

use self::Balance::*;

pub type Link<K, V> = Option<Box<Node<K, V>>>;

/// Which of a node's subtrees is the taller. Rebalancing keeps the
/// difference within one level, so three states suffice.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Balance {
    LeftHigher,
    Level,
    RightHigher,
}

#[derive(Clone)]
pub struct Node<K, V> {
    left: Link<K, V>,
    right: Link<K, V>,
    balance: Balance,
    key: K,
    value: V,
}

impl<K, V> Node<K, V> {
    fn new(key: K, value: V) -> Self {
        Node { left: None, right: None, balance: Level, key, value }
    }
}

/// One counter per rotation kind. The facade keeps separate tallies for the
/// insertion and removal paths.
#[derive(Clone, Copy, Default, PartialEq, Eq, Debug)]
pub struct Rotations {
    /// Single rotations fixing a left-left imbalance.
    pub ll: u64,
    /// Double rotations fixing a left-right imbalance.
    pub lr: u64,
    /// Double rotations fixing a right-left imbalance.
    pub rl: u64,
    /// Single rotations fixing a right-right imbalance.
    pub rr: u64,
}

// Moves the left child up; the old subtree root becomes its right child.
// Balance factors are restamped by the caller.
fn rotate_right<K, V>(node: &mut Box<Node<K, V>>) {
    let mut save = node.left.take().unwrap();
    swap(&mut node.left, &mut save.right); // save.right now None
    swap(node, &mut save);
    node.right = Some(save);
}

// Mirror of `rotate_right`.
fn rotate_left<K, V>(node: &mut Box<Node<K, V>>) {
    let mut save = node.right.take().unwrap();
    swap(&mut node.right, &mut save.left); // save.left now None
    swap(node, &mut save);
    node.left = Some(save);
}

// The left subtree is two levels taller than the right. Applies the LL or LR
// sequence and returns whether the subtree as a whole lost a level.
fn rebalance_left<K, V>(node: &mut Box<Node<K, V>>, tally: &mut Rotations) -> bool {
    if node.left.as_ref().unwrap().balance == RightHigher {
        // LR: the left child leans the opposite way, so its right child
        // comes up two levels.
        tally.lr += 1;
        let mut p1 = node.left.take().unwrap();
        let mut p2 = p1.right.take().unwrap();
        p1.right = p2.left.take();
        node.left = p2.right.take();
        p1.balance = if p2.balance == RightHigher { LeftHigher } else { Level };
        node.balance = if p2.balance == LeftHigher { RightHigher } else { Level };
        p2.balance = Level;
        p2.left = Some(p1);
        swap(node, &mut p2);
        node.right = Some(p2);
        true
    } else {
        tally.ll += 1;
        let lean = node.left.as_ref().unwrap().balance;
        rotate_right(node);
        if lean == Level {
            // Removal only: raising a level child keeps the subtree height.
            node.balance = RightHigher;
            node.right.as_mut().unwrap().balance = LeftHigher;
            false
        } else {
            node.balance = Level;
            node.right.as_mut().unwrap().balance = Level;
            true
        }
    }
}

// Mirror of `rebalance_left`.
fn rebalance_right<K, V>(node: &mut Box<Node<K, V>>, tally: &mut Rotations) -> bool {
    if node.right.as_ref().unwrap().balance == LeftHigher {
        // RL
        tally.rl += 1;
        let mut p1 = node.right.take().unwrap();
        let mut p2 = p1.left.take().unwrap();
        p1.left = p2.right.take();
        node.right = p2.left.take();
        p1.balance = if p2.balance == LeftHigher { RightHigher } else { Level };
        node.balance = if p2.balance == RightHigher { LeftHigher } else { Level };
        p2.balance = Level;
        p2.right = Some(p1);
        swap(node, &mut p2);
        node.left = Some(p2);
        true
    } else {
        tally.rr += 1;
        let lean = node.right.as_ref().unwrap().balance;
        rotate_left(node);
        if lean == Level {
            node.balance = LeftHigher;
            node.left.as_mut().unwrap().balance = RightHigher;
            false
        } else {
            node.balance = Level;
            node.left.as_mut().unwrap().balance = Level;
            true
        }
    }
}

// The left subtree gained a level; returns whether this subtree did too.
fn grew_left<K, V>(node: &mut Box<Node<K, V>>, tally: &mut Rotations) -> bool {
    match node.balance {
        RightHigher => {
            node.balance = Level;
            false
        }
        Level => {
            node.balance = LeftHigher;
            true
        }
        LeftHigher => {
            // An insertion rotation restores the pre-insertion height.
            rebalance_left(node, tally);
            false
        }
    }
}

// Mirror of `grew_left`.
fn grew_right<K, V>(node: &mut Box<Node<K, V>>, tally: &mut Rotations) -> bool {
    match node.balance {
        LeftHigher => {
            node.balance = Level;
            false
        }
        Level => {
            node.balance = RightHigher;
            true
        }
        RightHigher => {
            rebalance_right(node, tally);
            false
        }
    }
}

// The left subtree lost a level; returns whether this subtree did too.
// Unlike the insertion path, a rotation here may keep the flag set.
fn shrank_left<K, V>(node: &mut Box<Node<K, V>>, tally: &mut Rotations) -> bool {
    match node.balance {
        LeftHigher => {
            node.balance = Level;
            true
        }
        Level => {
            node.balance = RightHigher;
            false
        }
        RightHigher => rebalance_right(node, tally),
    }
}

// Mirror of `shrank_left`.
fn shrank_right<K, V>(node: &mut Box<Node<K, V>>, tally: &mut Rotations) -> bool {
    match node.balance {
        RightHigher => {
            node.balance = Level;
            true
        }
        Level => {
            node.balance = LeftHigher;
            false
        }
        LeftHigher => rebalance_left(node, tally),
    }
}

/// Inserts the entry, returning the replaced value, if any, and whether the
/// subtree rooted at `link` gained a level.
pub fn insert<K, V, C>(
    link: &mut Link<K, V>,
    cmp: &C,
    key: K,
    value: V,
    tally: &mut Rotations,
) -> (Option<V>, bool)
where
    C: Compare<K>,
{
    match *link {
        None => {
            *link = Some(Box::new(Node::new(key, value)));
            (None, true)
        }
        Some(ref mut node) => match cmp.compare(&key, &node.key) {
            Equal => (Some(replace(&mut node.value, value)), false),
            Less => {
                let (old, grew) = insert(&mut node.left, cmp, key, value, tally);
                let grew = grew && grew_left(node, tally);
                (old, grew)
            }
            Greater => {
                let (old, grew) = insert(&mut node.right, cmp, key, value, tally);
                let grew = grew && grew_right(node, tally);
                (old, grew)
            }
        },
    }
}

/// Removes the entry with the given key, returning it, if present, and
/// whether the subtree rooted at `link` lost a level.
pub fn remove<K, V, C, Q: ?Sized>(
    link: &mut Link<K, V>,
    cmp: &C,
    key: &Q,
    tally: &mut Rotations,
) -> (Option<(K, V)>, bool)
where
    C: Compare<Q, K>,
{
    let ordering = match *link {
        None => return (None, false),
        Some(ref node) => cmp.compare(key, &node.key),
    };

    match ordering {
        Less => {
            let node = link.as_mut().unwrap();
            let (removed, shrank) = remove(&mut node.left, cmp, key, tally);
            let shrank = shrank && shrank_left(node, tally);
            (removed, shrank)
        }
        Greater => {
            let node = link.as_mut().unwrap();
            let (removed, shrank) = remove(&mut node.right, cmp, key, tally);
            let shrank = shrank && shrank_right(node, tally);
            (removed, shrank)
        }
        Equal => {
            let mut node = link.take().unwrap();

            if node.left.is_none() {
                let Node { right, key, value, .. } = *node;
                *link = right;
                (Some((key, value)), true)
            } else if node.right.is_none() {
                let Node { left, key, value, .. } = *node;
                *link = left;
                (Some((key, value)), true)
            } else {
                // Two children: draw the replacement from the taller side so
                // the shrink is less likely to propagate.
                let from_right = node.balance == RightHigher;

                let (mut entry, shrank) = if from_right {
                    remove_leftmost(&mut node.right, tally)
                } else {
                    remove_rightmost(&mut node.left, tally)
                };

                swap(&mut node.key, &mut entry.0);
                swap(&mut node.value, &mut entry.1);

                let shrank = shrank
                    && if from_right {
                        shrank_right(&mut node, tally)
                    } else {
                        shrank_left(&mut node, tally)
                    };

                *link = Some(node);
                (Some(entry), shrank)
            }
        }
    }
}

// Unlinks the leftmost node of a nonempty subtree, returning its entry and
// whether the subtree lost a level.
fn remove_leftmost<K, V>(link: &mut Link<K, V>, tally: &mut Rotations) -> ((K, V), bool) {
    if link.as_ref().unwrap().left.is_some() {
        let node = link.as_mut().unwrap();
        let (entry, shrank) = remove_leftmost(&mut node.left, tally);
        let shrank = shrank && shrank_left(node, tally);
        (entry, shrank)
    } else {
        let Node { right, key, value, .. } = *link.take().unwrap();
        *link = right;
        ((key, value), true)
    }
}

// Mirror of `remove_leftmost`.
fn remove_rightmost<K, V>(link: &mut Link<K, V>, tally: &mut Rotations) -> ((K, V), bool) {
    if link.as_ref().unwrap().right.is_some() {
        let node = link.as_mut().unwrap();
        let (entry, shrank) = remove_rightmost(&mut node.right, tally);
        let shrank = shrank && shrank_right(node, tally);
        (entry, shrank)
    } else {
        let Node { left, key, value, .. } = *link.take().unwrap();
        *link = left;
        ((key, value), true)
    }
}

/// Finds the entry with the given key, descending iteratively.
pub fn get<'a, K, V, C, Q: ?Sized>(link: &'a Link<K, V>, cmp: &C, key: &Q) -> Option<(&'a K, &'a V)>
where
    C: Compare<Q, K>,
{
    let mut link = link;

    loop {
        match *link {
            None => return None,
            Some(ref node) => match cmp.compare(key, &node.key) {
                Equal => return Some((&node.key, &node.value)),
                Less => link = &node.left,
                Greater => link = &node.right,
            },
        }
    }
}

/// Finds the entry with the given key, returning a mutable reference to its
/// value.
pub fn get_mut<'a, K, V, C, Q: ?Sized>(
    link: &'a mut Link<K, V>,
    cmp: &C,
    key: &Q,
) -> Option<(&'a K, &'a mut V)>
where
    C: Compare<Q, K>,
{
    let mut link = link;

    while let Some(node) = link {
        match cmp.compare(key, &node.key) {
            Equal => return Some((&node.key, &mut node.value)),
            Less => link = &mut node.left,
            Greater => link = &mut node.right,
        }
    }

    None
}

/// Visits every entry in ascending key order.
pub fn in_order<K, V, F>(link: &Link<K, V>, visit: &mut F)
where
    F: FnMut(&K, &V),
{
    if let Some(ref node) = *link {
        in_order(&node.left, visit);
        visit(&node.key, &node.value);
        in_order(&node.right, visit);
    }
}

/// Writes an indented rendering of the tree, right subtree first, one key
/// per line.
pub fn write_tree<K, V>(f: &mut fmt::Formatter<'_>, link: &Link<K, V>, depth: usize) -> fmt::Result
where
    K: Debug,
{
    if let Some(ref node) = *link {
        write_tree(f, &node.right, depth + 1)?;
        writeln!(f, "{:indent$}{:?}", "", node.key, indent = depth * 4)?;
        write_tree(f, &node.left, depth + 1)?;
    }

    Ok(())
}
