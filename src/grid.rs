use crate::types::Cell;

/// Terrain/object classification of a single map cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Symbol {
    Floor,
    Wall,
    Hazard,
    Deposit,
    Base,
}

impl Symbol {
    pub fn can_pass_through(&self) -> bool {
        match self {
            Symbol::Floor | Symbol::Deposit | Symbol::Base => true,
            Symbol::Wall | Symbol::Hazard => false,
        }
    }

    pub fn from_char(c: char) -> Option<Symbol> {
        match c {
            '.' | ' ' => Some(Symbol::Floor),
            '#' => Some(Symbol::Wall),
            'S' => Some(Symbol::Hazard),
            'J' => Some(Symbol::Deposit),
            'B' => Some(Symbol::Base),
            _ => None,
        }
    }
}

/// Rectangular grid of symbols, row-major.
#[derive(Clone, Debug)]
pub struct Grid {
    pub width: i32,
    pub height: i32,
    cells: Vec<Symbol>,
}

impl Grid {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            cells: vec![Symbol::Floor; (width * height) as usize],
        }
    }

    /// Parse a newline-separated map literal. Unknown characters become floor.
    pub fn parse(text: &str) -> Self {
        let rows: Vec<&str> = text.trim().lines().map(str::trim).collect();
        let height = rows.len() as i32;
        let width = rows.first().map_or(0, |r| r.chars().count()) as i32;

        let mut grid = Grid::new(width, height);
        for (row, line) in rows.iter().enumerate() {
            for (col, c) in line.chars().enumerate() {
                let symbol = Symbol::from_char(c).unwrap_or(Symbol::Floor);
                grid.set(Cell::new(row as i32, col as i32), symbol);
            }
        }
        grid
    }

    pub fn in_bounds(&self, cell: &Cell) -> bool {
        cell.row >= 0 && cell.row < self.height && cell.col >= 0 && cell.col < self.width
    }

    pub fn get(&self, cell: &Cell) -> Option<Symbol> {
        if !self.in_bounds(cell) {
            return None;
        }
        Some(self.cells[(cell.row * self.width + cell.col) as usize])
    }

    pub fn set(&mut self, cell: Cell, symbol: Symbol) {
        if self.in_bounds(&cell) {
            self.cells[(cell.row * self.width + cell.col) as usize] = symbol;
        }
    }

    /// Iterate all cells in row-major scan order.
    pub fn iter(&self) -> impl Iterator<Item = (Cell, Symbol)> + '_ {
        (0..self.height).flat_map(move |row| {
            (0..self.width).map(move |col| {
                let cell = Cell::new(row, col);
                (cell, self.cells[(row * self.width + col) as usize])
            })
        })
    }

    /// First cell carrying the given symbol, in row-major order.
    pub fn find(&self, symbol: Symbol) -> Option<Cell> {
        self.iter().find(|(_, s)| *s == symbol).map(|(cell, _)| cell)
    }
}
