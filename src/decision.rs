use std::collections::{BTreeMap, HashSet};
use tracing::debug;

use crate::deposits::DepositTracker;
use crate::grid::Grid;
use crate::pathfinding;
use crate::state::{AgentState, OtherAgent};
use crate::types::{Action, Cell};

pub const MATERIAL_THRESHOLD: i32 = 100;
pub const HEALTH_THRESHOLD: i32 = 20;

const DEFAULT_MOVE: i32 = 1;
const NEVER: i32 = -1;
const DEFINITELY: i32 = 1000;
const PREFERABLE: i32 = 50;

/// Candidate actions in fixed evaluation order. The order doubles as the
/// tie-break priority: a later candidate only displaces an earlier one by
/// scoring strictly higher, never equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Candidate {
    Move,
    Attack,
    Collect,
    Store,
    Rest,
}

pub const EVALUATION_ORDER: [Candidate; 5] = [
    Candidate::Move,
    Candidate::Attack,
    Candidate::Collect,
    Candidate::Store,
    Candidate::Rest,
];

/// Utility scores, indexed by evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scores {
    values: [i32; 5],
}

impl Scores {
    pub fn baseline() -> Self {
        Self {
            values: [DEFAULT_MOVE, 0, 0, 0, 0],
        }
    }

    fn idx(candidate: Candidate) -> usize {
        match candidate {
            Candidate::Move => 0,
            Candidate::Attack => 1,
            Candidate::Collect => 2,
            Candidate::Store => 3,
            Candidate::Rest => 4,
        }
    }

    pub fn get(&self, candidate: Candidate) -> i32 {
        self.values[Self::idx(candidate)]
    }

    pub fn bump(&mut self, candidate: Candidate, amount: i32) {
        self.values[Self::idx(candidate)] += amount;
    }

    pub fn force(&mut self, candidate: Candidate, value: i32) {
        self.values[Self::idx(candidate)] = value;
    }
}

/// First candidate holding the maximum score, in evaluation order.
pub fn select_winner(scores: &Scores) -> Candidate {
    let mut winner = Candidate::Move;
    for &candidate in &EVALUATION_ORDER[1..] {
        if scores.get(candidate) > scores.get(winner) {
            winner = candidate;
        }
    }
    winner
}

pub struct ActionSelector;

impl ActionSelector {
    /// Score every candidate action for this turn and realize the winner.
    ///
    /// `last` is the previous turn's snapshot, absent on the first turn.
    /// `others` must already be deduplicated by location.
    #[tracing::instrument(level = "debug", skip(grid, tracker, others), fields(row = agent.location.row, col = agent.location.col, carried = agent.carried, health = agent.health))]
    pub fn decide(
        grid: &Grid,
        tracker: &DepositTracker,
        agent: &AgentState,
        last: Option<&AgentState>,
        others: &BTreeMap<Cell, OtherAgent>,
    ) -> Action {
        let occupied: HashSet<Cell> = others.keys().copied().collect();
        let nearest_enemy = Self::nearest_enemy(grid, &occupied, agent.location, others);

        let mut scores = Scores::baseline();
        let on_deposit = tracker.is_tracked(&agent.location);

        // Until the first snapshot exists there is no yield history anywhere,
        // so head for the closest unexplored deposit instead of ranking by
        // expected value.
        let collect_goal = if last.is_none() {
            tracker.nearest_unvisited(grid, agent.location, &occupied)
        } else {
            tracker.best_deposit()
        };
        let mut move_goal = collect_goal;

        if on_deposit {
            scores.bump(Candidate::Collect, PREFERABLE);
        }

        // Once over the material threshold, stop collecting
        if agent.carried > MATERIAL_THRESHOLD {
            scores.force(Candidate::Collect, NEVER);
        }

        if let Some(enemy) = nearest_enemy
            && agent.location.is_adjacent(&enemy.location)
            && enemy.carried > 0
        {
            scores.bump(Candidate::Attack, PREFERABLE);
        }

        if agent.health < HEALTH_THRESHOLD {
            scores.bump(Candidate::Move, PREFERABLE);
            move_goal = Some(agent.base);
        }

        // Carrying a lot: bring it home
        if agent.carried > MATERIAL_THRESHOLD {
            scores.bump(Candidate::Move, PREFERABLE);
            move_goal = Some(agent.base);
        }

        if agent.carried > 0 && agent.at_base() {
            scores.force(Candidate::Store, DEFINITELY);
        }

        // Must stay last: collecting off a deposit is a protocol violation,
        // so the sentinel overrides any earlier bonus.
        if !on_deposit {
            scores.force(Candidate::Collect, NEVER);
        }

        let winner = select_winner(&scores);
        debug!(?scores, ?winner, ?move_goal, "Turn decision");

        match winner {
            Candidate::Attack => nearest_enemy
                .and_then(|enemy| {
                    pathfinding::next_direction(grid, &occupied, agent.location, enemy.location)
                })
                .map_or(Action::Idle, Action::Attack),
            Candidate::Collect => Action::Collect,
            Candidate::Store => Action::Store,
            Candidate::Rest => Action::Rest,
            Candidate::Move => move_goal
                .and_then(|goal| pathfinding::next_direction(grid, &occupied, agent.location, goal))
                .map_or(Action::Idle, Action::Move),
        }
    }

    /// Other agent with the shortest current path from our location.
    ///
    /// Enemies are targets, not obstacles, so agent avoidance is disabled for
    /// this search. Unreachable enemies are skipped.
    fn nearest_enemy(
        grid: &Grid,
        occupied: &HashSet<Cell>,
        from: Cell,
        others: &BTreeMap<Cell, OtherAgent>,
    ) -> Option<OtherAgent> {
        let mut nearest: Option<(usize, OtherAgent)> = None;
        for (&cell, &other) in others {
            let Some(path) = pathfinding::path_between(grid, occupied, from, cell, false) else {
                continue;
            };
            if nearest.is_none_or(|(best_len, _)| path.len() < best_len) {
                nearest = Some((path.len(), other));
            }
        }
        nearest.map(|(_, other)| other)
    }
}
