//! Topology labels and the coordinate-keyed node table.
//!
//! - `TopologyLocation`: On/Left/Right locations for one geometry.
//! - `Label`: one `TopologyLocation` per input geometry (index 0 or 1).
//! - `NodeMap`: arena of nodes keyed by exact 2D coordinate.

use std::collections::HashMap;

use crate::kernel::{CoordKey, Coordinate, Location};

/// Position relative to an edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Position {
    On,
    Left,
    Right,
}

/// Locations of a component relative to one geometry. `None` is unknown.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TopologyLocation {
    pub on: Option<Location>,
    pub left: Option<Location>,
    pub right: Option<Location>,
}

impl TopologyLocation {
    #[inline]
    pub fn line(on: Location) -> Self {
        Self {
            on: Some(on),
            left: None,
            right: None,
        }
    }

    #[inline]
    pub fn area(on: Location, left: Location, right: Location) -> Self {
        Self {
            on: Some(on),
            left: Some(left),
            right: Some(right),
        }
    }

    #[inline]
    pub fn get(&self, pos: Position) -> Option<Location> {
        match pos {
            Position::On => self.on,
            Position::Left => self.left,
            Position::Right => self.right,
        }
    }

    #[inline]
    pub fn set(&mut self, pos: Position, loc: Location) {
        match pos {
            Position::On => self.on = Some(loc),
            Position::Left => self.left = Some(loc),
            Position::Right => self.right = Some(loc),
        }
    }

    pub fn set_all(&mut self, loc: Location) {
        self.on = Some(loc);
        self.left = Some(loc);
        self.right = Some(loc);
    }

    /// True when no position is known.
    #[inline]
    pub fn is_null(&self) -> bool {
        self.on.is_none() && self.left.is_none() && self.right.is_none()
    }

    /// True when side locations are present.
    #[inline]
    pub fn is_area(&self) -> bool {
        self.left.is_some() || self.right.is_some()
    }

    /// Swap left and right (edge reversed).
    pub fn flip(&mut self) {
        std::mem::swap(&mut self.left, &mut self.right);
    }
}

/// Topology state of a node or edge with respect to both input geometries.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Label {
    elt: [TopologyLocation; 2],
}

impl Label {
    /// Label with only `index` set to `on`.
    pub fn on(index: usize, on: Location) -> Self {
        let mut l = Self::default();
        l.elt[index] = TopologyLocation::line(on);
        l
    }

    /// Area-edge label with side locations for `index`.
    pub fn area(index: usize, on: Location, left: Location, right: Location) -> Self {
        let mut l = Self::default();
        l.elt[index] = TopologyLocation::area(on, left, right);
        l
    }

    #[inline]
    pub fn get(&self, index: usize) -> &TopologyLocation {
        &self.elt[index]
    }

    #[inline]
    pub fn location(&self, index: usize, pos: Position) -> Option<Location> {
        self.elt[index].get(pos)
    }

    #[inline]
    pub fn on_location(&self, index: usize) -> Option<Location> {
        self.elt[index].on
    }

    #[inline]
    pub fn set_location(&mut self, index: usize, pos: Position, loc: Location) {
        self.elt[index].set(pos, loc);
    }

    pub fn set_all_locations(&mut self, index: usize, loc: Location) {
        self.elt[index].set_all(loc);
    }

    #[inline]
    pub fn is_null(&self, index: usize) -> bool {
        self.elt[index].is_null()
    }

    /// Number of geometries with a non-nil location.
    pub fn geometry_count(&self) -> usize {
        self.elt.iter().filter(|t| !t.is_null()).count()
    }
}

/// A graph vertex shared by one or more edges.
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    pub coord: Coordinate,
    pub label: Label,
    /// Line-endpoint touches per geometry, fed to the boundary rule.
    pub(crate) boundary_touches: [usize; 2],
}

impl Node {
    fn new(coord: Coordinate) -> Self {
        Self {
            coord,
            label: Label::default(),
            boundary_touches: [0, 0],
        }
    }

    /// Labeled by exactly one of the two geometries.
    #[inline]
    pub fn is_isolated(&self) -> bool {
        self.label.geometry_count() == 1
    }
}

/// Node arena keyed by exact 2D coordinate; insertion order is preserved.
#[derive(Clone, Debug, Default)]
pub struct NodeMap {
    nodes: Vec<Node>,
    index: HashMap<CoordKey, usize>,
}

impl NodeMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index of the node at `coord`, created unlabeled if absent.
    pub fn add_node(&mut self, coord: Coordinate) -> usize {
        let next = self.nodes.len();
        let slot = *self.index.entry(coord.key()).or_insert(next);
        if slot == next {
            self.nodes.push(Node::new(coord));
        }
        slot
    }

    pub fn find(&self, coord: &Coordinate) -> Option<&Node> {
        self.index.get(&coord.key()).map(|&i| &self.nodes[i])
    }

    #[inline]
    pub fn node(&self, i: usize) -> &Node {
        &self.nodes[i]
    }

    #[inline]
    pub fn node_mut(&mut self, i: usize) -> &mut Node {
        &mut self.nodes[i]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Node> {
        self.nodes.iter_mut()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
