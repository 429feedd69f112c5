//! The frontier structures used by the solvers. Every frontier stores `(node, priority)` pairs so
//! the weighted solvers can recognise stale entries; the unweighted ones ignore the priority.
use std::cmp::Ordering;
use std::collections::{BinaryHeap, VecDeque};

use crate::{Cost, NodeId};

pub trait Frontier: Default {
    fn push(&mut self, node: NodeId, priority: Cost);
    fn pop(&mut self) -> Option<(NodeId, Cost)>;
    fn len(&self) -> usize;
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Heap entry ordered by smallest priority first and, among equal priorities, by insertion.
struct SmallestCostHolder<K> {
    priority: K,
    order: usize,
    node: NodeId,
}

impl<K: PartialEq> Eq for SmallestCostHolder<K> {}

impl<K: PartialEq> PartialEq for SmallestCostHolder<K> {
    fn eq(&self, other: &Self) -> bool {
        self.priority.eq(&other.priority) && self.order == other.order
    }
}

impl<K: Ord> PartialOrd for SmallestCostHolder<K> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<K: Ord> Ord for SmallestCostHolder<K> {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap is a max-heap, so both comparisons are reversed
        match other.priority.cmp(&self.priority) {
            Ordering::Equal => other.order.cmp(&self.order),
            s => s,
        }
    }
}

/// Min-priority queue. The insertion counter makes the order total and deterministic.
#[derive(Default)]
pub struct PriorityFrontier {
    heap: BinaryHeap<SmallestCostHolder<Cost>>,
    count: usize,
}

impl Frontier for PriorityFrontier {
    fn push(&mut self, node: NodeId, priority: Cost) {
        self.heap.push(SmallestCostHolder {
            priority,
            order: self.count,
            node,
        });
        self.count += 1;
    }
    fn pop(&mut self) -> Option<(NodeId, Cost)> {
        self.heap.pop().map(|h| (h.node, h.priority))
    }
    fn len(&self) -> usize {
        self.heap.len()
    }
}

#[derive(Default)]
pub struct FifoFrontier(VecDeque<(NodeId, Cost)>);

impl Frontier for FifoFrontier {
    fn push(&mut self, node: NodeId, priority: Cost) {
        self.0.push_back((node, priority));
    }
    fn pop(&mut self) -> Option<(NodeId, Cost)> {
        self.0.pop_front()
    }
    fn len(&self) -> usize {
        self.0.len()
    }
}

#[derive(Default)]
pub struct LifoFrontier(Vec<(NodeId, Cost)>);

impl Frontier for LifoFrontier {
    fn push(&mut self, node: NodeId, priority: Cost) {
        self.0.push((node, priority));
    }
    fn pop(&mut self) -> Option<(NodeId, Cost)> {
        self.0.pop()
    }
    fn len(&self) -> usize {
        self.0.len()
    }
}
