use std::collections::BTreeMap;
use tracing::debug;

use crate::decision::ActionSelector;
use crate::deposits::DepositTracker;
use crate::grid::Grid;
use crate::state::{AgentState, OtherAgent};
use crate::types::{Action, Cell};

/// One running game: owns the deposit tracker and the previous turn's
/// snapshot, and turns per-turn state into a single action.
pub struct Session {
    tracker: DepositTracker,
    last_state: Option<AgentState>,
}

impl Session {
    /// Seed the deposit tracker from the initial map.
    pub fn new(grid: &Grid, base: Cell) -> Self {
        let tracker = DepositTracker::new(grid, base);
        debug!(deposits = tracker.len(), "Session started");
        Self {
            tracker,
            last_state: None,
        }
    }

    pub fn tracker(&self) -> &DepositTracker {
        &self.tracker
    }

    /// Decide the one action for this turn.
    #[tracing::instrument(level = "debug", skip(self, grid, others), fields(row = agent.location.row, col = agent.location.col, carried = agent.carried))]
    pub fn turn(&mut self, grid: &Grid, agent: &AgentState, others: &[OtherAgent]) -> Action {
        self.tracker.mark_visited(agent.location);

        // A pickup lands in our inventory one turn after standing on the
        // deposit, so the credit goes to the previous turn's location.
        if let Some(last) = self.last_state {
            self.tracker.record_yield(last.location, agent.carried - last.carried);
        }

        // Dedup by location; stale entries from earlier turns never survive
        let others_by_cell: BTreeMap<Cell, OtherAgent> = others
            .iter()
            .map(|other| (other.location, *other))
            .collect();

        let action =
            ActionSelector::decide(grid, &self.tracker, agent, self.last_state.as_ref(), &others_by_cell);

        self.last_state = Some(*agent);
        action
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Direction;

    fn agent(location: Cell, base: Cell, carried: i32, health: i32) -> AgentState {
        AgentState {
            location,
            base,
            carried,
            health,
        }
    }

    #[test]
    fn test_yield_credited_to_previous_location() {
        let grid = Grid::parse("BJ.");
        let base = Cell::new(0, 0);
        let deposit = Cell::new(0, 1);
        let mut session = Session::new(&grid, base);

        session.turn(&grid, &agent(deposit, base, 0, 100), &[]);
        assert!(session.tracker().get(&deposit).unwrap().visited);

        // Carried amount went up while we stood elsewhere this turn: the
        // deposit we left gets the credit.
        session.turn(&grid, &agent(Cell::new(0, 2), base, 8, 100), &[]);
        assert_eq!(session.tracker().get(&deposit).unwrap().history, vec![8]);

        // No increase, no entry.
        session.turn(&grid, &agent(Cell::new(0, 2), base, 8, 100), &[]);
        assert_eq!(session.tracker().get(&deposit).unwrap().history, vec![8]);
    }

    #[test]
    fn test_first_turn_targets_nearest_unvisited() {
        // Best deposit by value-per-turn is the one next to the base, but on
        // turn one the agent is parked next to the far deposit and goes there.
        let grid = Grid::parse("B.J....J");
        let base = Cell::new(0, 0);
        let mut session = Session::new(&grid, base);

        let action = session.turn(&grid, &agent(Cell::new(0, 6), base, 0, 100), &[]);
        assert_eq!(action, Action::Move(Direction::Right));

        // With a snapshot in place, ranking switches to expected value.
        let action = session.turn(&grid, &agent(Cell::new(0, 6), base, 0, 100), &[]);
        assert_eq!(action, Action::Move(Direction::Left));
    }

    #[test]
    fn test_duplicate_other_agents_collapse() {
        let grid = Grid::parse(
            "...\n\
             .J.",
        );
        let base = Cell::new(0, 0);
        let mut session = Session::new(&grid, base);
        let enemy = OtherAgent {
            location: Cell::new(0, 1),
            carried: 4,
        };

        // The same location reported twice behaves like a single enemy.
        let action = session.turn(&grid, &agent(Cell::new(0, 0), base, 0, 100), &[enemy, enemy]);
        assert_eq!(action, Action::Attack(Direction::Right));
    }
}
