use std::collections::{HashMap, HashSet};

use crate::grid::{Grid, Symbol};
use crate::types::Cell;

/// Walkability rules for one pathfinding query.
///
/// The query's own start and goal cells are always passable regardless of
/// their symbol. Hazards always block. Cells occupied by other agents block
/// only when `avoid_agents` is set.
#[derive(Debug, Clone, Copy)]
pub struct ObstaclePolicy {
    pub start: Cell,
    pub goal: Cell,
    pub avoid_agents: bool,
}

impl ObstaclePolicy {
    pub fn new(start: Cell, goal: Cell) -> Self {
        Self {
            start,
            goal,
            avoid_agents: true,
        }
    }

    pub fn ignoring_agents(start: Cell, goal: Cell) -> Self {
        Self {
            start,
            goal,
            avoid_agents: false,
        }
    }
}

/// Undirected 4-connected traversability graph over the grid.
///
/// Holds a node for every grid cell; isolated nodes are legal and simply
/// unreachable. Rebuilt fresh for every query, never mutated in place.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    adjacency: HashMap<Cell, Vec<Cell>>,
}

impl Graph {
    fn add_node(&mut self, cell: Cell) {
        self.adjacency.entry(cell).or_default();
    }

    fn add_edge(&mut self, a: Cell, b: Cell) {
        self.adjacency.entry(a).or_default().push(b);
        self.adjacency.entry(b).or_default().push(a);
    }

    pub fn contains(&self, cell: &Cell) -> bool {
        self.adjacency.contains_key(cell)
    }

    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    pub fn neighbors(&self, cell: &Cell) -> &[Cell] {
        self.adjacency.get(cell).map_or(&[], |v| v.as_slice())
    }

    pub fn has_edge(&self, a: &Cell, b: &Cell) -> bool {
        self.neighbors(a).contains(b)
    }
}

fn passable(grid: &Grid, policy: &ObstaclePolicy, occupied: &HashSet<Cell>, cell: Cell) -> bool {
    if cell == policy.start || cell == policy.goal {
        return true;
    }
    let Some(symbol) = grid.get(&cell) else {
        return false;
    };
    if symbol == Symbol::Hazard {
        return false;
    }
    if policy.avoid_agents && occupied.contains(&cell) {
        return false;
    }
    symbol.can_pass_through()
}

/// Build the traversability graph for one query.
///
/// Edges are added cell-to-right and cell-to-bottom only, so each undirected
/// edge is considered exactly once.
#[tracing::instrument(level = "trace", skip(grid, occupied), fields(width = grid.width, height = grid.height, avoid_agents = policy.avoid_agents))]
pub fn build(grid: &Grid, policy: &ObstaclePolicy, occupied: &HashSet<Cell>) -> Graph {
    let mut graph = Graph::default();

    for (cell, _) in grid.iter() {
        graph.add_node(cell);
    }

    for (cell, _) in grid.iter() {
        if !passable(grid, policy, occupied, cell) {
            continue;
        }

        let right = Cell::new(cell.row, cell.col + 1);
        if grid.in_bounds(&right) && passable(grid, policy, occupied, right) {
            graph.add_edge(cell, right);
        }

        let bottom = Cell::new(cell.row + 1, cell.col);
        if grid.in_bounds(&bottom) && passable(grid, policy, occupied, bottom) {
            graph.add_edge(cell, bottom);
        }
    }

    graph
}
