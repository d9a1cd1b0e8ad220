use std::{thread::sleep, time::Duration};

use anyhow::Result;
use log::{debug, info, warn};
use rand::Rng;

use crate::input::{poll_intent, Intent};
use crate::render::Frame;
use crate::snake::{Direction::{self, *}, Position, Snake};
use crate::term::Terminal;

pub const BOARD_WIDTH: i32 = 40;
pub const BOARD_HEIGHT: i32 = 20;
pub const TICK_INTERVAL_MS: u64 = 100;
pub const FOOD_REWARD: u32 = 10;
pub const INITIAL_SNAKE_LENGTH: usize = 3;
pub const INITIAL_DIRECTION: Direction = Right;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Board {
    pub width: i32,
    pub height: i32,
}

impl Board {
    /// Panics if the interior cannot hold the starting snake plus one food cell.
    pub fn new(width: i32, height: i32) -> Self {
        assert!(width >= 6 && height >= 3, "board {}x{} is too small", width, height);
        Board { width, height }
    }

    pub fn cell_count(&self) -> usize {
        (self.width * self.height) as usize
    }

    pub fn interior_cell_count(&self) -> usize {
        ((self.width - 2) * (self.height - 2)) as usize
    }

    pub fn is_interior(&self, pos: Position) -> bool {
        pos.x >= 1 && pos.x <= self.width - 2 && pos.y >= 1 && pos.y <= self.height - 2
    }

    pub fn center(&self) -> Position {
        Position::new(self.width / 2, self.height / 2)
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::new(BOARD_WIDTH, BOARD_HEIGHT)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum CollisionKind {
    Wall,
    SelfHit,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Tick {
    Moved,
    Ate,
    Collided(CollisionKind),
    /// Food was eaten and no free interior cell is left for the next one.
    BoardFull,
    Over,
}

#[derive(Debug, Clone)]
pub struct GameState {
    board: Board,
    snake: Snake,
    food: Position,
    score: u32,
    alive: bool,
}

impl GameState {
    pub fn new<R: Rng>(board: Board, rng: &mut R) -> Self {
        let snake = Snake::new(board.center(), INITIAL_SNAKE_LENGTH, INITIAL_DIRECTION, board.cell_count());
        let food = spawn_food(&board, &snake, rng).expect("board minimum size leaves room for food");

        GameState::with_parts(board, snake, food)
    }

    pub fn with_parts(board: Board, snake: Snake, food: Position) -> Self {
        GameState { board, snake, food, score: 0, alive: true }
    }

    pub fn board(&self) -> Board {
        self.board
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> Position {
        self.food
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn quit(&mut self) {
        self.alive = false;
    }

    /// Move, then eat/grow/respawn, then check for collisions against the grown body.
    pub fn tick<R: Rng>(&mut self, turn: Option<Direction>, rng: &mut R) -> Tick {
        if !self.alive {
            return Tick::Over;
        }

        let direction = turn.unwrap_or_else(|| self.snake.direction());
        let vacated_tail = self.snake.move_step(direction);

        let mut event = Tick::Moved;

        if self.snake.head() == self.food {
            self.score += FOOD_REWARD;
            if !self.snake.grow(vacated_tail) {
                debug!("snake is at maximum length {}, not growing", self.snake.max_len());
            }

            match spawn_food(&self.board, &self.snake, rng) {
                Some(food) => {
                    debug!("food eaten at {:?}, next food at {:?}", self.food, food);
                    self.food = food;
                    event = Tick::Ate;
                },
                None => event = Tick::BoardFull,
            }
        }

        if let Some(kind) = self.collision() {
            self.alive = false;
            return Tick::Collided(kind);
        }

        if event == Tick::BoardFull {
            self.alive = false;
        }

        event
    }

    pub fn collision(&self) -> Option<CollisionKind> {
        if !self.board.is_interior(self.snake.head()) {
            Some(CollisionKind::Wall)
        } else if self.snake.head_hits_body() {
            Some(CollisionKind::SelfHit)
        } else {
            None
        }
    }
}

///////////////////////////////////////////////////////////////////////////

/// Picks a random interior cell that the snake does not cover, or `None` if
/// the snake already covers the whole interior.
pub fn spawn_food<R: Rng>(board: &Board, snake: &Snake, rng: &mut R) -> Option<Position> {
    let covered = snake.body().iter().filter(|pos| board.is_interior(**pos)).count();
    let free = board.interior_cell_count().saturating_sub(covered);
    if free == 0 {
        return None;
    }

    loop {
        let pos = Position::new(rng.gen_range(1..board.width - 1), rng.gen_range(1..board.height - 1));
        if !snake.occupies(pos) {
            return Some(pos);
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum EndReason {
    Quit,
    Collision(CollisionKind),
    BoardFull,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub reason: EndReason,
    pub score: u32,
    pub length: usize,
}

/// Runs ticks at a fixed interval until the player quits or the snake dies.
pub struct GameLoop<R: Rng> {
    board: Board,
    tick_interval: Duration,
    rng: R,
}

impl<R: Rng> GameLoop<R> {
    pub fn new(rng: R) -> Self {
        GameLoop { board: Board::default(), tick_interval: Duration::from_millis(TICK_INTERVAL_MS), rng }
    }

    pub fn with_tick_interval(mut self, tick_interval: Duration) -> Self {
        self.tick_interval = tick_interval;
        self
    }

    pub fn with_board(mut self, board: Board) -> Self {
        self.board = board;
        self
    }

    pub fn run<T: Terminal + ?Sized>(&mut self, term: &mut T) -> Result<Outcome> {
        let mut state = GameState::new(self.board, &mut self.rng);
        info!("game started: {}x{} board, food at {:?}", self.board.width, self.board.height, state.food());

        term.render(&Frame::of(&state))?;

        let reason = loop {
            let turn = match poll_intent(term, state.snake().direction())? {
                Some(Intent::Quit) => {
                    state.quit();
                    break EndReason::Quit;
                },
                Some(Intent::Turn(dir)) => Some(dir),
                None => None,
            };

            let event = state.tick(turn, &mut self.rng);
            term.render(&Frame::of(&state))?;

            match event {
                Tick::Collided(kind) => break EndReason::Collision(kind),
                Tick::BoardFull => {
                    warn!("no free cell left for food");
                    break EndReason::BoardFull;
                },
                Tick::Moved | Tick::Ate | Tick::Over => {},
            }

            sleep(self.tick_interval);
        }; // Game loop

        let outcome = Outcome { reason, score: state.score(), length: state.snake().len() };
        info!("game over: {:?}", outcome);

        Ok(outcome)
    }
}
