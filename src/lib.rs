//! Two terminal games: a real-time Snake and a turn-based Snake and Ladder.
//!
//! The Snake core (`snake`, `input`, `game`, `render`) has no terminal
//! dependency; `term` plugs it into a real terminal through crossterm.

pub mod game;
pub mod input;
pub mod ladder;
pub mod render;
pub mod snake;
pub mod term;
