use pathtable_core::Direction;

use crate::{Host, Position};

/// Finite rectangular map hosting a single agent.
///
/// Cells are stored densely in row-major order. Positions outside the
/// `width × height` rectangle are off the map and therefore never traversable.
/// The agent's own cell does not count as occupied.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    width: u32,
    height: u32,
    agent: Position,
    blocked: Vec<bool>,
    rubble: Vec<i32>,
}

impl Board {
    /// Creates an empty board without rubble.
    #[must_use]
    pub fn new(width: u32, height: u32, agent: Position) -> Self {
        let cell_count = usize::try_from(u64::from(width) * u64::from(height)).unwrap_or(0);
        Self {
            width,
            height,
            agent,
            blocked: vec![false; cell_count],
            rubble: vec![0; cell_count],
        }
    }

    /// Returns the board with the provided position occupied.
    #[must_use]
    pub fn with_obstacle(mut self, position: Position) -> Self {
        self.set_blocked(position, true);
        self
    }

    /// Marks a position as occupied or free; positions off the map are ignored.
    pub fn set_blocked(&mut self, position: Position, blocked: bool) {
        if let Some(index) = self.index(position) {
            self.blocked[index] = blocked;
        }
    }

    /// Sets the rubble of a position; positions off the map are ignored.
    pub fn set_rubble(&mut self, position: Position, rubble: i32) {
        if let Some(index) = self.index(position) {
            self.rubble[index] = rubble;
        }
    }

    /// Sets the same rubble on every cell.
    pub fn fill_rubble(&mut self, rubble: i32) {
        self.rubble.fill(rubble);
    }

    /// Width of the board in cells.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Height of the board in cells.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Current position of the agent.
    #[must_use]
    pub const fn agent(&self) -> Position {
        self.agent
    }

    /// Whether the position lies on the board.
    #[must_use]
    pub fn contains(&self, position: Position) -> bool {
        self.index(position).is_some()
    }

    /// Whether the position is occupied by an obstacle.
    #[must_use]
    pub fn is_blocked(&self, position: Position) -> bool {
        self.index(position)
            .map_or(false, |index| self.blocked[index])
    }

    /// Moves the agent one step, returning whether the move happened.
    ///
    /// `Center` and moves onto occupied or off-map cells leave the agent in place.
    pub fn step(&mut self, direction: Direction) -> bool {
        if direction == Direction::Center {
            return false;
        }

        let destination = self.agent.add(direction);
        if !self.is_traversable(destination) {
            return false;
        }

        self.agent = destination;
        true
    }

    fn index(&self, position: Position) -> Option<usize> {
        let column = u32::try_from(position.x()).ok()?;
        let row = u32::try_from(position.y()).ok()?;
        if column >= self.width || row >= self.height {
            return None;
        }

        let width = usize::try_from(self.width).ok()?;
        let column = usize::try_from(column).ok()?;
        let row = usize::try_from(row).ok()?;
        row.checked_mul(width)?.checked_add(column)
    }
}

impl Host for Board {
    fn location(&self) -> Position {
        self.agent
    }

    fn is_traversable(&self, position: Position) -> bool {
        self.contains(position) && !self.is_blocked(position)
    }

    fn rubble(&self, position: Position) -> i32 {
        self.index(position)
            .map_or(0, |index| self.rubble[index])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn off_board_positions_are_not_traversable() {
        let board = Board::new(3, 4, Position::new(1, 1));

        assert!(board.is_traversable(Position::new(2, 3)));
        assert!(!board.is_traversable(Position::new(3, 0)));
        assert!(!board.is_traversable(Position::new(-1, 2)));
    }

    #[test]
    fn step_respects_obstacles() {
        let mut board = Board::new(3, 3, Position::new(1, 1)).with_obstacle(Position::new(1, 2));

        assert!(!board.step(Direction::North));
        assert_eq!(board.agent(), Position::new(1, 1));
        assert!(board.step(Direction::NorthEast));
        assert_eq!(board.agent(), Position::new(2, 2));
        assert!(!board.step(Direction::East));
    }

    #[test]
    fn rubble_is_stored_per_cell() {
        let mut board = Board::new(2, 2, Position::new(0, 0));
        board.fill_rubble(5);
        board.set_rubble(Position::new(1, 1), 40);

        assert_eq!(board.rubble(Position::new(0, 1)), 5);
        assert_eq!(board.rubble(Position::new(1, 1)), 40);
    }
}
