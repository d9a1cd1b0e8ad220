use std::fmt;

use crate::game::GameState;
use crate::snake::Position;

pub const BORDER_CHAR: char = '#';
pub const EMPTY_CHAR: char = ' ';
pub const SNAKE_HEAD_CHAR: char = 'O';
pub const SNAKE_BODY_CHAR: char = 'o';
pub const FOOD_CHAR: char = '*';

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    rows: Vec<String>,
    score: u32,
    length: usize,
}

impl Frame {
    pub fn of(state: &GameState) -> Self {
        let board = state.board();
        let (width, height) = (board.width as usize, board.height as usize);
        let mut grid = vec![vec![EMPTY_CHAR; width]; height];

        for (y, row) in grid.iter_mut().enumerate() {
            for (x, cell) in row.iter_mut().enumerate() {
                if x == 0 || y == 0 || x == width - 1 || y == height - 1 {
                    *cell = BORDER_CHAR;
                }
            }
        }

        let mut paint = |pos: Position, ch: char| {
            if pos.x >= 0 && pos.y >= 0 && (pos.x as usize) < width && (pos.y as usize) < height {
                grid[pos.y as usize][pos.x as usize] = ch;
            }
        };

        for pos in state.snake().body().iter().skip(1) {
            paint(*pos, SNAKE_BODY_CHAR);
        }
        // After the body, so a head that ran into it stays visible.
        paint(state.snake().head(), SNAKE_HEAD_CHAR);

        // Once the board is full the last food is under the head.
        if state.food() != state.snake().head() {
            paint(state.food(), FOOD_CHAR);
        }

        let rows = grid.into_iter().map(|row| row.into_iter().collect()).collect();
        Frame { rows, score: state.score(), length: state.snake().len() }
    }

    pub fn rows(&self) -> &[String] {
        &self.rows
    }

    pub fn status_line(&self) -> String {
        format!("Score: {} | Length: {}", self.score, self.length)
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.rows {
            writeln!(f, "{}", row)?;
        }
        write!(f, "{}", self.status_line())
    }
}
