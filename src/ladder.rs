//! Snake and Ladder: two players race along a numbered track, rolling a die
//! each turn. Landing on a snake's head slides you down to its tail, landing
//! at the foot of a ladder lifts you to its top.

use rand::Rng;

pub const BOARD_SIZE: u8 = 100;
pub const NUM_PLAYERS: usize = 2;
pub const DICE_FACES: u8 = 6;

/// A shortcut on the track, from `start` to `end`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Jump {
    pub start: u8,
    pub end: u8,
}

const fn jump(start: u8, end: u8) -> Jump {
    Jump { start, end }
}

pub const SNAKES: [Jump; 5] = [jump(99, 54), jump(70, 55), jump(52, 42), jump(25, 2), jump(95, 72)];
pub const LADDERS: [Jump; 5] = [jump(6, 25), jump(11, 40), jump(60, 85), jump(46, 90), jump(17, 69)];

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum JumpKind {
    Snake,
    Ladder,
}

/// Looks up the snake or ladder starting at `square`. Snakes are checked first.
pub fn jump_at(square: u8) -> Option<(JumpKind, Jump)> {
    SNAKES.iter().find(|j| j.start == square).map(|j| (JumpKind::Snake, *j))
        .or_else(|| LADDERS.iter().find(|j| j.start == square).map(|j| (JumpKind::Ladder, *j)))
}

pub fn roll_dice<R: Rng>(rng: &mut R) -> u8 {
    rng.gen_range(1..=DICE_FACES)
}

/// What happened during one player's turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnReport {
    /// Zero-based index of the player who moved.
    pub player: usize,
    pub roll: u8,
    pub from: u8,
    /// Square reached by the roll, before any jump. `None` on an overshoot.
    pub landed: Option<u8>,
    pub jump: Option<(JumpKind, Jump)>,
    pub to: u8,
    pub won: bool,
}

#[derive(Debug, Clone)]
pub struct LadderGame {
    positions: [u8; NUM_PLAYERS],
    current: usize,
    winner: Option<usize>,
}

impl LadderGame {
    pub fn new() -> Self {
        LadderGame { positions: [0; NUM_PLAYERS], current: 0, winner: None }
    }

    pub fn positions(&self) -> [u8; NUM_PLAYERS] {
        self.positions
    }

    pub fn current_player(&self) -> usize {
        self.current
    }

    pub fn winner(&self) -> Option<usize> {
        self.winner
    }

    pub fn is_over(&self) -> bool {
        self.winner.is_some()
    }

    /// Moves the current player by `roll`. An exact roll is needed to finish:
    /// overshooting the last square leaves the player where they are.
    /// Returns `None` once somebody has won.
    pub fn take_turn(&mut self, roll: u8) -> Option<TurnReport> {
        if self.is_over() {
            return None;
        }

        let player = self.current;
        let from = self.positions[player];
        let target = from as u16 + roll as u16;

        let mut report = TurnReport { player, roll, from, landed: None, jump: None, to: from, won: false };

        if target <= BOARD_SIZE as u16 {
            let landed = target as u8;
            report.landed = Some(landed);
            report.jump = jump_at(landed);
            report.to = report.jump.map_or(landed, |(_, j)| j.end);
            self.positions[player] = report.to;
        }

        if report.to == BOARD_SIZE {
            report.won = true;
            self.winner = Some(player);
        } else {
            self.current = (self.current + 1) % NUM_PLAYERS;
        }

        Some(report)
    }
}

impl Default for LadderGame {
    fn default() -> Self {
        Self::new()
    }
}
