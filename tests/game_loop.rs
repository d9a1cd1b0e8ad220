use std::collections::VecDeque;
use std::time::Duration;

use anyhow::Result;
use rand::{rngs::StdRng, SeedableRng};

use terminal_snakes::game::{Board, CollisionKind, EndReason, GameLoop, Outcome};
use terminal_snakes::input::{ByteSource, ESC};
use terminal_snakes::render::{Frame, SNAKE_HEAD_CHAR};
use terminal_snakes::term::Terminal;

/// Releases one batch of bytes per tick, on top of whatever is still unread,
/// and keeps every frame it is asked to draw.
struct ScriptedTerminal {
    batches: VecDeque<VecDeque<u8>>,
    current: VecDeque<u8>,
    frames: Vec<Frame>,
}

impl ScriptedTerminal {
    fn new(batches: &[&[u8]]) -> Self {
        ScriptedTerminal {
            batches: batches.iter().map(|b| b.iter().copied().collect()).collect(),
            current: VecDeque::new(),
            frames: vec![],
        }
    }
}

impl ByteSource for ScriptedTerminal {
    fn poll_byte(&mut self) -> Result<Option<u8>> {
        Ok(self.current.pop_front())
    }

    fn read_byte(&mut self) -> Result<Option<u8>> {
        Ok(self.current.pop_front())
    }
}

impl Terminal for ScriptedTerminal {
    fn render(&mut self, frame: &Frame) -> Result<()> {
        self.frames.push(frame.clone());
        if let Some(batch) = self.batches.pop_front() {
            self.current.extend(batch);
        }
        Ok(())
    }
}

fn run(term: &mut ScriptedTerminal) -> Outcome {
    GameLoop::new(StdRng::seed_from_u64(42))
        .with_tick_interval(Duration::ZERO)
        .run(term)
        .unwrap()
}

fn head_of(frame: &Frame) -> (usize, usize) {
    frame.rows().iter().enumerate()
        .find_map(|(y, row)| row.chars().position(|c| c == SNAKE_HEAD_CHAR).map(|x| (x, y)))
        .unwrap()
}

#[test]
fn test_quit_before_first_tick() {
    let mut term = ScriptedTerminal::new(&[b"q"]);
    let outcome = run(&mut term);

    assert_eq!(outcome, Outcome { reason: EndReason::Quit, score: 0, length: 3 });
    assert_eq!(term.frames.len(), 1);
    assert_eq!(head_of(&term.frames[0]), (20, 10));
}

#[test]
fn test_straight_run_hits_wall() {
    let mut term = ScriptedTerminal::new(&[]);
    let outcome = run(&mut term);

    assert_eq!(outcome.reason, EndReason::Collision(CollisionKind::Wall));
    assert_eq!(outcome.score as usize, (outcome.length - 3) * 10);
    // Initial frame plus 19 ticks: x goes 21..=39 and 39 is the border.
    assert_eq!(term.frames.len(), 20);
    assert_eq!(head_of(term.frames.last().unwrap()), (39, 10));
}

#[test]
fn test_arrow_key_turns() {
    let mut term = ScriptedTerminal::new(&[&[ESC, b'[', b'A'], b"", b"Q"]);
    let outcome = run(&mut term);

    assert_eq!(outcome.reason, EndReason::Quit);
    assert_eq!(term.frames.len(), 3);
    assert_eq!(head_of(&term.frames[1]), (20, 9));
    assert_eq!(head_of(&term.frames[2]), (20, 8));
}

#[test]
fn test_reversal_is_ignored() {
    let mut term = ScriptedTerminal::new(&[b"a", b"q"]);
    run(&mut term);

    assert_eq!(head_of(&term.frames[1]), (21, 10));
}

#[test]
fn test_double_tap_turns_on_consecutive_ticks() {
    let mut term = ScriptedTerminal::new(&[b"wa", b"q"]);
    let outcome = run(&mut term);

    assert_eq!(outcome.reason, EndReason::Quit);
    assert_eq!(term.frames.len(), 3);
    assert_eq!(head_of(&term.frames[1]), (20, 9));
    assert_eq!(head_of(&term.frames[2]), (19, 9));
}

#[test]
fn test_second_key_is_kept_for_next_tick() {
    let mut term = ScriptedTerminal::new(&[b"wd", b"", b"q"]);
    let outcome = run(&mut term);

    assert_eq!(outcome.reason, EndReason::Quit);
    assert_eq!(term.frames.len(), 3);
    assert_eq!(head_of(&term.frames[1]), (20, 9));
    assert_eq!(head_of(&term.frames[2]), (21, 9));
}

#[test]
fn test_garbled_escape_keeps_course() {
    let mut term = ScriptedTerminal::new(&[&[ESC, b'[', b'Z'], b"q"]);
    run(&mut term);

    assert_eq!(head_of(&term.frames[1]), (21, 10));
}

#[test]
fn test_filling_the_board_ends_the_game() {
    // A single interior row of four cells: three snake, one food.
    let mut term = ScriptedTerminal::new(&[]);
    let outcome = GameLoop::new(StdRng::seed_from_u64(1))
        .with_board(Board::new(6, 3))
        .with_tick_interval(Duration::ZERO)
        .run(&mut term)
        .unwrap();

    assert_eq!(outcome, Outcome { reason: EndReason::BoardFull, score: 10, length: 4 });
    assert_eq!(term.frames.len(), 2);
}
