// Board sensing
//
// The snake has no sense of time. Each turn it plots the cells it could
// reach from its head, out to a fixed depth, and lets what it finds there
// leave a scent on every cell along the way back: food attracts, hazards
// repel, and open space adds freedom.
//
// The walk is a breadth-first expansion whose frontier is shuffled as it
// grows, so that no cardinal direction is favored. A cell may show up as
// several nodes reached along different branches; the result is a tree,
// not a deduplicated graph. A per-cell visit cap bounds the work.

use std::collections::{HashMap, VecDeque};

use log::debug;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::config::PerceptionConfig;
use crate::occupancy::{Cell, Grid};
use crate::types::{Coord, Direction};

/// Index of a node in its `Perception` arena
pub type NodeId = usize;

/// One reachable cell, as seen along one particular path from the head
#[derive(Debug, Clone)]
pub struct Node {
    pub coord: Coord,
    parent: Option<NodeId>,
    /// Length of the ancestor chain back to the root
    depth: usize,
    children: [Option<NodeId>; 4],

    // What is good in this life?
    /// Cumulative attraction to food
    pub yum: u32,
    /// Cumulative count of open cells reachable through here
    pub freedom: u32,
    /// Cumulative repulsion from hazards
    pub yuck: u32,
    /// Set only on a direct child of the root that holds a prey head
    pub can_strike: bool,
}

impl Node {
    fn new(coord: Coord, parent: Option<NodeId>, depth: usize) -> Self {
        Node {
            coord,
            parent,
            depth,
            children: [None; 4],
            yum: 0,
            freedom: 0,
            yuck: 0,
            can_strike: false,
        }
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn child(&self, direction: Direction) -> Option<NodeId> {
        self.children[direction.index()]
    }
}

/// Arena holding the sensing tree for one turn; the root is the head
#[derive(Debug, Clone)]
pub struct Perception {
    nodes: Vec<Node>,
}

impl Perception {
    const ROOT: NodeId = 0;

    fn new(head: Coord) -> Self {
        Perception {
            nodes: vec![Node::new(head, None, 0)],
        }
    }

    pub fn root(&self) -> &Node {
        &self.nodes[Self::ROOT]
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    /// Node reached by stepping `direction` from `id`, if that cell was passable
    pub fn child(&self, id: NodeId, direction: Direction) -> Option<&Node> {
        self.nodes[id].child(direction).map(|c| &self.nodes[c])
    }

    /// Direct child of the root in `direction`
    pub fn first_step(&self, direction: Direction) -> Option<&Node> {
        self.child(Self::ROOT, direction)
    }

    /// Ancestors of `id`, closest first, ending with the root
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors {
            tree: self,
            next: self.nodes[id].parent,
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes.iter().enumerate()
    }

    /// Builds a node for `coord` under `parent` and spreads its scent
    ///
    /// Returns `None` for walls and bodies, which end the branch.
    fn attach(
        &mut self,
        parent: NodeId,
        direction: Direction,
        coord: Coord,
        cell: Cell,
        params: &PerceptionConfig,
    ) -> Option<NodeId> {
        if !cell.is_passable() {
            return None;
        }

        let depth = self.nodes[parent].depth + 1;
        let id = self.nodes.len();
        self.nodes.push(Node::new(coord, Some(parent), depth));
        self.nodes[parent].children[direction.index()] = Some(id);

        match cell {
            Cell::Food => {
                self.nodes[id].freedom += 1;
                let attraction = params.food_scent_range.saturating_sub(depth);
                self.nodes[id].yum += attraction as u32;
                // Reachable food is still usable space, at any distance
                self.propagate(id, |i, node| {
                    if i < attraction {
                        node.yum += (attraction - i) as u32;
                    }
                    node.freedom += 1;
                    true
                });
            }
            Cell::Hazard => {
                // yucky but still free
                self.nodes[id].freedom += 1;
                let repulsion = params.hazard_scent_range.saturating_sub(depth);
                self.nodes[id].yuck += repulsion as u32;
                self.propagate(id, |i, node| {
                    if i >= repulsion {
                        return false;
                    }
                    node.yuck += (repulsion - i) as u32;
                    true
                });
            }
            Cell::Empty => {
                self.nodes[id].freedom += 1;
                self.propagate(id, |_, node| {
                    node.freedom += 1;
                    true
                });
            }
            Cell::Prey => {
                if depth == 1 {
                    self.nodes[id].can_strike = true;
                }
            }
            Cell::Wall | Cell::Body => {}
        }

        Some(id)
    }

    /// Walks the ancestor chain of `id` closest first, stopping when `visit` returns false
    fn propagate<F>(&mut self, id: NodeId, mut visit: F)
    where
        F: FnMut(usize, &mut Node) -> bool,
    {
        let mut cursor = self.nodes[id].parent;
        let mut position = 0;
        while let Some(ancestor) = cursor {
            let node = &mut self.nodes[ancestor];
            if !visit(position, node) {
                break;
            }
            cursor = node.parent;
            position += 1;
        }
    }
}

/// Iterator over a node's ancestor chain
pub struct Ancestors<'a> {
    tree: &'a Perception,
    next: Option<NodeId>,
}

impl<'a> Iterator for Ancestors<'a> {
    type Item = (NodeId, &'a Node);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.next?;
        let node = &self.tree.nodes[id];
        self.next = node.parent;
        Some((id, node))
    }
}

/// Senses the board from `head`, returning the annotated tree
pub fn explore<R>(grid: &Grid, head: Coord, params: &PerceptionConfig, rng: &mut R) -> Perception
where
    R: Rng + ?Sized,
{
    let mut tree = Perception::new(head);
    let mut frontier = VecDeque::from([Perception::ROOT]);
    let mut visited: HashMap<Coord, u32> = HashMap::new();

    while let Some(cur) = frontier.pop_front() {
        let (coord, depth) = {
            let node = tree.node(cur);
            (node.coord, node.depth)
        };
        if depth >= params.max_depth {
            continue;
        }

        let mut adjacent = Vec::with_capacity(4);
        for direction in Direction::all() {
            let next = direction.apply(&coord);
            // Allow sensing in adjacent directions to overlap
            if visited.get(&next).copied().unwrap_or(0) >= params.visit_cap {
                continue;
            }
            if let Some(child) = tree.attach(cur, direction, next, grid.get(&next), params) {
                if depth + 1 < params.max_depth {
                    adjacent.push(child);
                }
            }
        }
        *visited.entry(coord).or_insert(0) += 1;

        adjacent.shuffle(rng);
        frontier.extend(adjacent);
    }

    debug!("Sensed {} nodes from {:?}", tree.len(), head);
    tree
}
