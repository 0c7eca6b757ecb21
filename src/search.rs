//! This module implements a uniform-cost search over an implicit graph,
//! generic over the node and cost types. It supports multiple start nodes
//! and stops at the first node satisfying the success predicate. Frontier
//! entries with equal cost are popped most-recent-first, which makes the
//! search fully deterministic for a fixed start order and successor order.
use fxhash::FxHashSet;
use num_traits::Zero;

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::hash::Hash;

/// Parent index of a start node in the arena.
const NO_PARENT: usize = usize::MAX;

struct FrontierEntry<C> {
    cost: C,
    index: usize,
}

impl<C: PartialEq> Eq for FrontierEntry<C> {}

impl<C: PartialEq> PartialEq for FrontierEntry<C> {
    fn eq(&self, other: &Self) -> bool {
        self.cost.eq(&other.cost) && self.index == other.index
    }
}

impl<C: Ord> PartialOrd for FrontierEntry<C> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<C: Ord> Ord for FrontierEntry<C> {
    fn cmp(&self, other: &Self) -> Ordering {
        // First orders per cost, then creates a subordering on the arena
        // index. Arena indices grow with every push, so among entries of
        // equal cost the most recently pushed one is popped first.
        match other.cost.cmp(&self.cost) {
            Ordering::Equal => self.index.cmp(&other.index),
            s => s,
        }
    }
}

fn backtrack<N, C>(arena: &[(N, usize, C)], last: usize) -> Vec<N>
where
    N: Clone,
{
    let mut path: Vec<N> = itertools::unfold(last, |i| {
        arena.get(*i).map(|(node, parent, _)| {
            *i = *parent;
            node.clone()
        })
    })
    .collect();
    path.reverse();
    path
}

/// Expands nodes in order of increasing cost until one satisfies `success`,
/// returning the start-to-goal node sequence and its cost, or [None] if the
/// frontier is exhausted first.
///
/// Nodes are kept in an arena and refer to their parent by index, so the
/// whole search state is dropped in one go when the call returns.
pub(crate) fn uniform_cost_search<N, C, FN, IN, FS>(
    starts: impl IntoIterator<Item = N>,
    mut successors: FN,
    mut success: FS,
) -> Option<(Vec<N>, C)>
where
    N: Eq + Hash + Clone,
    C: Zero + Ord + Copy,
    FN: FnMut(&N) -> IN,
    IN: IntoIterator<Item = (N, C)>,
    FS: FnMut(&N) -> bool,
{
    let mut arena: Vec<(N, usize, C)> = Vec::new();
    let mut frontier = BinaryHeap::new();
    for start in starts {
        arena.push((start, NO_PARENT, C::zero()));
        frontier.push(FrontierEntry {
            cost: C::zero(),
            index: arena.len() - 1,
        });
    }
    let mut settled: FxHashSet<N> = FxHashSet::default();
    while let Some(FrontierEntry { cost, index }) = frontier.pop() {
        let node = arena[index].0.clone();
        if success(&node) {
            return Some((backtrack(&arena, index), cost));
        }
        // A node may sit in the frontier several times when it was discovered
        // through different parents before being settled, and such duplicates
        // may even be popped after it settled. Re-expanding then finds every
        // successor settled or already enqueued at equal or lower cost, so
        // with uniform edge costs the extra pops cannot change the result.
        for (successor, move_cost) in successors(&node) {
            if settled.contains(&successor) {
                continue;
            }
            let new_cost = cost + move_cost;
            arena.push((successor, index, new_cost));
            frontier.push(FrontierEntry {
                cost: new_cost,
                index: arena.len() - 1,
            });
        }
        settled.insert(node);
    }
    None
}
