pub mod decision;
pub mod deposits;
pub mod graph;
pub mod grid;
pub mod pathfinding;
pub mod session;
pub mod state;
pub mod types;

// Re-export commonly used types for convenience
pub use decision::ActionSelector;
pub use deposits::DepositTracker;
pub use graph::{Graph, ObstaclePolicy};
pub use grid::{Grid, Symbol};
pub use pathfinding::AStar;
pub use session::Session;
pub use state::{AgentState, OtherAgent};
pub use types::{Action, Cell, Direction};
