//! Cell module - one discrete grid coordinate
//!
//! Coordinates: (x, y) where x grows to the right and y grows downwards,
//! so row 0 is the top of the board and row `height - 1` is the floor.

/// A grid coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// 4-neighbour adjacency: exactly one axis differs, and by exactly one
    pub fn adjacent_to(&self, other: Cell) -> bool {
        (self.x == other.x && (self.y - other.y).abs() == 1)
            || (self.y == other.y && (self.x - other.x).abs() == 1)
    }

    /// The cell shifted by (dx, dy)
    #[inline(always)]
    pub fn offset(&self, dx: i32, dy: i32) -> Cell {
        Cell::new(self.x + dx, self.y + dy)
    }

    /// The cell directly underneath
    #[inline(always)]
    pub fn below(&self) -> Cell {
        self.offset(0, 1)
    }
}

impl From<(i32, i32)> for Cell {
    fn from((x, y): (i32, i32)) -> Self {
        Cell::new(x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adjacency_is_four_connected() {
        let c = Cell::new(3, 3);
        assert!(c.adjacent_to(Cell::new(2, 3)));
        assert!(c.adjacent_to(Cell::new(4, 3)));
        assert!(c.adjacent_to(Cell::new(3, 2)));
        assert!(c.adjacent_to(Cell::new(3, 4)));

        // Diagonals, self and distance two are not neighbours.
        assert!(!c.adjacent_to(Cell::new(4, 4)));
        assert!(!c.adjacent_to(Cell::new(2, 2)));
        assert!(!c.adjacent_to(c));
        assert!(!c.adjacent_to(Cell::new(5, 3)));
    }

    #[test]
    fn test_adjacency_is_symmetric() {
        let a = Cell::new(0, 0);
        let b = Cell::new(0, 1);
        assert_eq!(a.adjacent_to(b), b.adjacent_to(a));
    }

    #[test]
    fn test_structural_equality() {
        assert_eq!(Cell::new(1, 2), Cell::from((1, 2)));
        assert_ne!(Cell::new(1, 2), Cell::new(2, 1));
        assert_eq!(Cell::new(1, 2).below(), Cell::new(1, 3));
    }
}
