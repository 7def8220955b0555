use crate::types::Cell;

/// Per-turn snapshot of our own agent, handed in by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgentState {
    pub location: Cell,
    pub base: Cell,
    pub carried: i32,
    pub health: i32,
}

impl AgentState {
    pub fn at_base(&self) -> bool {
        self.location == self.base
    }
}

/// A visible competing agent. Rebuilt from scratch every turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OtherAgent {
    pub location: Cell,
    pub carried: i32,
}
