use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};

use crate::graph::{self, Graph, ObstaclePolicy};
use crate::grid::Grid;
use crate::types::{Cell, Direction};

#[derive(Clone, Eq, PartialEq)]
struct Node {
    cell: Cell,
    f_score: i32,
}

impl Ord for Node {
    fn cmp(&self, other: &Self) -> Ordering {
        other.f_score.cmp(&self.f_score)
    }
}

impl PartialOrd for Node {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

pub struct AStar;

impl AStar {
    /// Heuristic shortest-path search over a prebuilt graph.
    ///
    /// Returns the inclusive cell sequence from start to goal, or `None` when
    /// the two lie in different connected components. An unreachable goal is
    /// an expected outcome, not an error.
    #[tracing::instrument(level = "trace", skip(graph), fields(start_row = start.row, start_col = start.col, goal_row = goal.row, goal_col = goal.col))]
    pub fn find_path(graph: &Graph, start: Cell, goal: Cell) -> Option<Vec<Cell>> {
        if !graph.contains(&start) || !graph.contains(&goal) {
            return None;
        }

        let mut open_set = BinaryHeap::new();
        let mut came_from: HashMap<Cell, Cell> = HashMap::new();
        let mut g_score: HashMap<Cell, i32> = HashMap::new();
        let mut closed_set: HashSet<Cell> = HashSet::new();

        g_score.insert(start, 0);
        open_set.push(Node {
            cell: start,
            f_score: heuristic(start, goal),
        });

        let mut expansions = 0;

        while let Some(Node { cell: current, .. }) = open_set.pop() {
            if current == goal {
                tracing::trace!(expansions, "Path found");
                return Some(reconstruct_path(&came_from, current));
            }

            if closed_set.contains(&current) {
                continue;
            }
            closed_set.insert(current);
            expansions += 1;

            for &neighbor in graph.neighbors(&current) {
                if closed_set.contains(&neighbor) {
                    continue;
                }

                let tentative_g = g_score.get(&current).unwrap_or(&i32::MAX) + 1;

                if tentative_g < *g_score.get(&neighbor).unwrap_or(&i32::MAX) {
                    came_from.insert(neighbor, current);
                    g_score.insert(neighbor, tentative_g);
                    open_set.push(Node {
                        cell: neighbor,
                        f_score: tentative_g + heuristic(neighbor, goal),
                    });
                }
            }
        }

        tracing::trace!(expansions, "No path found");
        None
    }
}

fn heuristic(a: Cell, b: Cell) -> i32 {
    a.distance(&b)
}

fn reconstruct_path(came_from: &HashMap<Cell, Cell>, mut current: Cell) -> Vec<Cell> {
    let mut path = vec![current];
    while let Some(&prev) = came_from.get(&current) {
        path.push(prev);
        current = prev;
    }
    path.reverse();
    path
}

/// Build a fresh graph for this query and search it.
pub fn path_between(
    grid: &Grid,
    occupied: &HashSet<Cell>,
    start: Cell,
    goal: Cell,
    avoid_agents: bool,
) -> Option<Vec<Cell>> {
    let policy = if avoid_agents {
        ObstaclePolicy::new(start, goal)
    } else {
        ObstaclePolicy::ignoring_agents(start, goal)
    };
    let graph = graph::build(grid, &policy, occupied);
    AStar::find_path(&graph, start, goal)
}

/// First step of the shortest agent-avoiding path from start to goal.
///
/// `None` when the goal is unreachable or the agent already stands on it.
pub fn next_direction(
    grid: &Grid,
    occupied: &HashSet<Cell>,
    start: Cell,
    goal: Cell,
) -> Option<Direction> {
    let path = path_between(grid, occupied, start, goal, true)?;
    if path.len() < 2 {
        return None;
    }
    Direction::between(path[0], path[1])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_agents() -> HashSet<Cell> {
        HashSet::new()
    }

    fn assert_valid_path(path: &[Cell], start: Cell, goal: Cell, graph: &Graph) {
        assert_eq!(*path.first().unwrap(), start);
        assert_eq!(*path.last().unwrap(), goal);
        for pair in path.windows(2) {
            assert!(pair[0].is_adjacent(&pair[1]), "{:?} and {:?} not adjacent", pair[0], pair[1]);
            assert!(graph.has_edge(&pair[0], &pair[1]), "{:?} -> {:?} not an edge", pair[0], pair[1]);
        }
    }

    #[test]
    fn test_straight_corridor() {
        let grid = Grid::parse("#....#");
        let start = Cell::new(0, 1);
        let goal = Cell::new(0, 4);
        let graph = graph::build(&grid, &ObstaclePolicy::new(start, goal), &no_agents());
        let path = AStar::find_path(&graph, start, goal).unwrap();
        assert_eq!(path.len(), 4);
        assert_valid_path(&path, start, goal, &graph);
    }

    #[test]
    fn test_path_routes_around_walls() {
        let grid = Grid::parse(
            ".#.\n\
             .#.\n\
             ...",
        );
        let start = Cell::new(0, 0);
        let goal = Cell::new(0, 2);
        let graph = graph::build(&grid, &ObstaclePolicy::new(start, goal), &no_agents());
        let path = AStar::find_path(&graph, start, goal).unwrap();
        // Around the wall: down, across, back up
        assert_eq!(path.len(), 7);
        assert_valid_path(&path, start, goal, &graph);
    }

    #[test]
    fn test_unreachable_returns_none() {
        let grid = Grid::parse(
            ".#.\n\
             .#.",
        );
        let start = Cell::new(0, 0);
        let goal = Cell::new(0, 2);
        let graph = graph::build(&grid, &ObstaclePolicy::new(start, goal), &no_agents());
        assert_eq!(AStar::find_path(&graph, start, goal), None);
    }

    #[test]
    fn test_start_equals_goal() {
        let grid = Grid::parse("...");
        let start = Cell::new(0, 1);
        let graph = graph::build(&grid, &ObstaclePolicy::new(start, start), &no_agents());
        let path = AStar::find_path(&graph, start, start).unwrap();
        assert_eq!(path, vec![start]);
    }

    #[test]
    fn test_out_of_bounds_goal_is_unreachable() {
        let grid = Grid::parse("...");
        assert_eq!(
            path_between(&grid, &no_agents(), Cell::new(0, 0), Cell::new(5, 5), true),
            None
        );
    }

    #[test]
    fn test_next_direction_first_step() {
        let grid = Grid::parse(
            "...\n\
             ...",
        );
        let dir = next_direction(&grid, &no_agents(), Cell::new(0, 0), Cell::new(0, 2));
        assert_eq!(dir, Some(Direction::Right));
    }

    #[test]
    fn test_next_direction_none_when_unreachable_or_arrived() {
        let grid = Grid::parse(
            ".#.\n\
             .#.",
        );
        assert_eq!(next_direction(&grid, &no_agents(), Cell::new(0, 0), Cell::new(0, 2)), None);
        assert_eq!(next_direction(&grid, &no_agents(), Cell::new(0, 0), Cell::new(0, 0)), None);
    }

    #[test]
    fn test_next_direction_routes_around_other_agents() {
        let grid = Grid::parse(
            "...\n\
             ...",
        );
        let occupied: HashSet<Cell> = [Cell::new(0, 1)].into_iter().collect();
        let dir = next_direction(&grid, &occupied, Cell::new(0, 0), Cell::new(0, 2));
        assert_eq!(dir, Some(Direction::Down));
    }
}
