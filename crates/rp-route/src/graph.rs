//! Ephemeral weighted graph for a single shortest-path query.
//!
//! Nodes are coordinates, registered once per [`PointKey`]; edges carry
//! Euclidean lengths.  The graph is built, queried, and dropped inside one
//! routing call — it never outlives the query.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use geo::Point;
use ordered_float::OrderedFloat;
use rustc_hash::FxHashMap;

use rp_core::geom::PointKey;

pub(crate) struct CostGraph {
    index: FxHashMap<PointKey, u32>,
    pos: Vec<Point<f64>>,
    adj: Vec<Vec<(u32, f64)>>,
}

impl CostGraph {
    pub(crate) fn new() -> Self {
        Self {
            index: FxHashMap::default(),
            pos: Vec::new(),
            adj: Vec::new(),
        }
    }

    /// Register `p` as a node (deduplicated by quantized key) and return
    /// its index.
    pub(crate) fn node(&mut self, p: Point<f64>) -> u32 {
        let key = PointKey::of(p);
        if let Some(&i) = self.index.get(&key) {
            return i;
        }
        let i = self.pos.len() as u32;
        self.index.insert(key, i);
        self.pos.push(p);
        self.adj.push(Vec::new());
        i
    }

    /// Look up the node previously registered at `p`.
    pub(crate) fn lookup(&self, p: Point<f64>) -> Option<u32> {
        self.index.get(&PointKey::of(p)).copied()
    }

    /// Add an undirected edge of weight `w` between `a` and `b`.
    pub(crate) fn connect(&mut self, a: u32, b: u32, w: f64) {
        self.adj[a as usize].push((b, w));
        self.adj[b as usize].push((a, w));
    }

    pub(crate) fn position(&self, node: u32) -> Point<f64> {
        self.pos[node as usize]
    }

    pub(crate) fn node_count(&self) -> usize {
        self.pos.len()
    }

    /// Dijkstra from `from` to `to`: ordered node path plus total cost, or
    /// `None` if the destination is unreachable.
    pub(crate) fn shortest_path(&self, from: u32, to: u32) -> Option<(Vec<u32>, f64)> {
        if from == to {
            return Some((vec![from], 0.0));
        }

        let n = self.pos.len();
        let mut dist = vec![f64::INFINITY; n];
        let mut prev = vec![u32::MAX; n];
        dist[from as usize] = 0.0;

        // Min-heap: Reverse makes BinaryHeap (max) behave as min-heap.
        // Secondary key keeps tie-breaking deterministic.
        let mut heap: BinaryHeap<Reverse<(OrderedFloat<f64>, u32)>> = BinaryHeap::new();
        heap.push(Reverse((OrderedFloat(0.0), from)));

        while let Some(Reverse((cost, node))) = heap.pop() {
            let cost = cost.into_inner();
            if node == to {
                break;
            }
            // Skip stale heap entries.
            if cost > dist[node as usize] {
                continue;
            }
            for &(next, w) in &self.adj[node as usize] {
                let next_cost = cost + w;
                if next_cost < dist[next as usize] {
                    dist[next as usize] = next_cost;
                    prev[next as usize] = node;
                    heap.push(Reverse((OrderedFloat(next_cost), next)));
                }
            }
        }

        if dist[to as usize].is_infinite() {
            return None;
        }

        let mut path = vec![to];
        let mut cur = to;
        while cur != from {
            cur = prev[cur as usize];
            path.push(cur);
        }
        path.reverse();
        Some((path, dist[to as usize]))
    }
}
