use Direction::*;

// Signed so a head that steps past the border is still representable.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Position { x, y }
    }

    pub fn moved(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Position { x: self.x + dx, y: self.y + dy }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right
}

impl Direction {
    pub fn opposite(self) -> Direction {
        match self {
            Up => Down,
            Down => Up,
            Left => Right,
            Right => Left,
        }
    }

    pub fn is_opposite(self, other: Direction) -> bool {
        self.opposite() == other
    }

    pub fn delta(self) -> (i32, i32) {
        match self {
            Up => (0, -1),
            Down => (0, 1),
            Left => (-1, 0),
            Right => (1, 0),
        }
    }
}

/// Snake body, head at index 0.
///
/// The body buffer is allocated once with room for the longest snake the board
/// can hold, so moving and growing never reallocate.
#[derive(Debug, Clone)]
pub struct Snake {
    body: Vec<Position>,
    direction: Direction,
    max_len: usize,
}

impl Snake {
    pub fn new(head: Position, size: usize, direction: Direction, max_len: usize) -> Self {
        let (dx, dy) = direction.delta();

        let mut body = Vec::with_capacity(max_len.max(size));
        body.extend((0..size as i32).map(|i| Position::new(head.x - dx * i, head.y - dy * i)));

        Snake { body, direction, max_len }
    }

    pub fn body(&self) -> &[Position] {
        &self.body
    }

    pub fn head(&self) -> Position {
        self.body[0]
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn max_len(&self) -> usize {
        self.max_len
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Shift every segment onto its predecessor, then displace the head.
    /// Returns the tail cell given up by the shift.
    pub fn move_step(&mut self, direction: Direction) -> Position {
        let len = self.body.len();
        let vacated_tail = self.body[len - 1];

        self.body.copy_within(0..len - 1, 1);
        self.direction = direction;
        self.body[0] = self.body[0].moved(direction);

        vacated_tail
    }

    /// Returns false at maximum length.
    pub fn grow(&mut self, vacated_tail: Position) -> bool {
        if self.body.len() >= self.max_len {
            return false;
        }

        self.body.push(vacated_tail);
        true
    }

    pub fn occupies(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    pub fn head_hits_body(&self) -> bool {
        let head = self.head();
        self.body[1..].contains(&head)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snake_at(x: i32, y: i32, size: usize, direction: Direction) -> Snake {
        Snake::new(Position::new(x, y), size, direction, 100)
    }

    #[test]
    fn test_new_trails_behind_head() {
        let snake = snake_at(5, 5, 3, Right);
        assert_eq!(
            snake.body(),
            &[Position::new(5, 5), Position::new(4, 5), Position::new(3, 5)]
        );

        let snake = snake_at(5, 5, 3, Up);
        assert_eq!(snake.body()[2], Position::new(5, 7));
    }

    #[test]
    fn test_opposites() {
        assert!(Up.is_opposite(Down));
        assert!(Left.is_opposite(Right));
        assert!(!Up.is_opposite(Left));
        assert!(!Right.is_opposite(Right));
    }

    #[test]
    fn test_move_shifts_then_displaces_head() {
        let mut snake = snake_at(5, 5, 3, Right);
        let vacated = snake.move_step(Down);

        assert_eq!(vacated, Position::new(3, 5));
        assert_eq!(snake.direction(), Down);
        assert_eq!(
            snake.body(),
            &[Position::new(5, 6), Position::new(5, 5), Position::new(4, 5)]
        );
    }

    #[test]
    fn test_grow_reclaims_vacated_tail() {
        let mut snake = snake_at(5, 5, 3, Right);
        let vacated = snake.move_step(Right);

        assert!(snake.grow(vacated));
        assert_eq!(snake.len(), 4);
        assert_eq!(snake.body()[3], Position::new(3, 5));
    }

    #[test]
    fn test_grow_stops_at_max_len() {
        let mut snake = Snake::new(Position::new(5, 5), 3, Right, 3);
        let vacated = snake.move_step(Right);

        assert!(!snake.grow(vacated));
        assert_eq!(snake.len(), 3);
    }

    #[test]
    fn test_body_does_not_reallocate() {
        let mut snake = snake_at(5, 5, 3, Right);
        let ptr = snake.body().as_ptr();

        for _ in 0..10 {
            let vacated = snake.move_step(Right);
            snake.grow(vacated);
        }

        assert_eq!(snake.body().as_ptr(), ptr);
    }

    #[test]
    fn test_head_hits_body() {
        let mut snake = snake_at(5, 5, 5, Right);
        assert!(!snake.head_hits_body());

        snake.move_step(Down);
        snake.move_step(Left);
        snake.move_step(Up);
        assert!(snake.head_hits_body());
    }
}
