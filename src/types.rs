#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cell {
    pub row: i32,
    pub col: i32,
}

impl Cell {
    pub fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    pub fn distance(&self, other: &Cell) -> i32 {
        (self.row - other.row).abs() + (self.col - other.col).abs()
    }

    pub fn neighbors(&self) -> [Cell; 4] {
        [
            Cell::new(self.row - 1, self.col), // Up
            Cell::new(self.row, self.col + 1), // Right
            Cell::new(self.row + 1, self.col), // Down
            Cell::new(self.row, self.col - 1), // Left
        ]
    }

    pub fn is_adjacent(&self, other: &Cell) -> bool {
        self.distance(other) == 1
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Direction of the single step from `from` to an orthogonally adjacent `to`.
    pub fn between(from: Cell, to: Cell) -> Option<Direction> {
        if to.row < from.row {
            Some(Direction::Up)
        } else if to.row > from.row {
            Some(Direction::Down)
        } else if to.col > from.col {
            Some(Direction::Right)
        } else if to.col < from.col {
            Some(Direction::Left)
        } else {
            None
        }
    }
}

/// The one action submitted to the game each turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Idle,
    Move(Direction),
    Attack(Direction),
    Collect,
    Store,
    Rest,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_is_manhattan() {
        let a = Cell::new(1, 2);
        let b = Cell::new(4, 0);
        assert_eq!(a.distance(&b), 5);
        assert_eq!(b.distance(&a), 5);
    }

    #[test]
    fn test_adjacency() {
        let center = Cell::new(3, 3);
        for n in center.neighbors() {
            assert!(center.is_adjacent(&n));
        }
        assert!(!center.is_adjacent(&Cell::new(4, 4)));
        assert!(!center.is_adjacent(&center));
    }

    #[test]
    fn test_direction_between() {
        let c = Cell::new(2, 2);
        assert_eq!(Direction::between(c, Cell::new(1, 2)), Some(Direction::Up));
        assert_eq!(Direction::between(c, Cell::new(3, 2)), Some(Direction::Down));
        assert_eq!(Direction::between(c, Cell::new(2, 3)), Some(Direction::Right));
        assert_eq!(Direction::between(c, Cell::new(2, 1)), Some(Direction::Left));
        assert_eq!(Direction::between(c, c), None);
    }

    #[test]
    fn test_cell_ordering_is_row_major() {
        let mut cells = vec![Cell::new(1, 0), Cell::new(0, 4), Cell::new(0, 1), Cell::new(1, 3)];
        cells.sort();
        assert_eq!(
            cells,
            vec![Cell::new(0, 1), Cell::new(0, 4), Cell::new(1, 0), Cell::new(1, 3)]
        );
    }
}
