use std::collections::HashSet;

use rand::Rng;
use rand::rngs::ThreadRng;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use gridbot::{Action, AgentState, Cell, Direction, Grid, OtherAgent, Session, Symbol};

// Stand-in for the real game server: a fixed map and a toy rule set, enough
// to watch the decision core play a full game locally.
const DEMO_MAP: &str = "\
    ############\n\
    #B.....S..J#\n\
    #..##..S...#\n\
    #..##......#\n\
    #......##.J#\n\
    #.J....##..#\n\
    #..........#\n\
    ############";

const DEMO_TURNS: i32 = 80;

fn init_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("gridbot=debug,info"));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");
}

fn step(cell: Cell, direction: Direction) -> Cell {
    match direction {
        Direction::Up => Cell::new(cell.row - 1, cell.col),
        Direction::Down => Cell::new(cell.row + 1, cell.col),
        Direction::Left => Cell::new(cell.row, cell.col - 1),
        Direction::Right => Cell::new(cell.row, cell.col + 1),
    }
}

fn wander(rng: &mut ThreadRng, grid: &Grid, enemy: &mut OtherAgent, blocked: &HashSet<Cell>) {
    let neighbors = enemy.location.neighbors();
    let candidate = neighbors[rng.random_range(0..neighbors.len())];
    let walkable = grid
        .get(&candidate)
        .is_some_and(|s| s.can_pass_through() && s != Symbol::Hazard);
    if walkable && !blocked.contains(&candidate) {
        enemy.location = candidate;
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    let grid = Grid::parse(DEMO_MAP);
    let base = grid
        .find(Symbol::Base)
        .ok_or("demo map has no base cell")?;

    let mut rng = rand::rng();
    let mut session = Session::new(&grid, base);

    let mut me = AgentState {
        location: base,
        base,
        carried: 0,
        health: 100,
    };
    let mut enemies = vec![
        OtherAgent {
            location: Cell::new(6, 9),
            carried: 12,
        },
        OtherAgent {
            location: Cell::new(3, 6),
            carried: 0,
        },
    ];
    let mut stored = 0;

    for turn in 1..=DEMO_TURNS {
        let action = session.turn(&grid, &me, &enemies);
        tracing::info!(turn, ?action, carried = me.carried, stored, "Turn");

        match action {
            Action::Move(direction) => {
                let next = step(me.location, direction);
                let occupied = enemies.iter().any(|e| e.location == next);
                if grid.get(&next).is_some_and(|s| s.can_pass_through()) && !occupied {
                    me.location = next;
                }
            }
            Action::Collect => {
                me.carried += rng.random_range(5..=25);
            }
            Action::Store => {
                stored += me.carried;
                me.carried = 0;
            }
            Action::Rest => {
                me.health = (me.health + 5).min(100);
            }
            Action::Attack(direction) => {
                let target = step(me.location, direction);
                for enemy in &mut enemies {
                    if enemy.location == target {
                        enemy.carried = 0;
                    }
                }
            }
            Action::Idle => {}
        }

        let mut blocked: HashSet<Cell> = enemies.iter().map(|e| e.location).collect();
        blocked.insert(me.location);
        for i in 0..enemies.len() {
            let mut enemy = enemies[i];
            blocked.remove(&enemy.location);
            wander(&mut rng, &grid, &mut enemy, &blocked);
            blocked.insert(enemy.location);
            enemies[i] = enemy;
        }
    }

    tracing::info!(stored, "Demo finished");
    Ok(())
}
