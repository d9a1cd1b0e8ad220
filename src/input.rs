use anyhow::Result;

use crate::snake::Direction::{self, *};

pub const ESC: u8 = 0x1b;
pub const CTRL_C: u8 = 0x03;

pub trait ByteSource {
    /// Returns immediately; `None` means nothing has been typed.
    fn poll_byte(&mut self) -> Result<Option<u8>>;

    /// Next byte of a sequence that is already in flight.
    fn read_byte(&mut self) -> Result<Option<u8>>;
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Key {
    Arrow(Direction),
    Char(u8),
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Intent {
    Turn(Direction),
    Quit,
}

/// Decodes the key starting with `first`, pulling the rest of an escape
/// sequence from `source`. Unknown escape sequences decode to nothing.
pub fn decode_key<S: ByteSource + ?Sized>(first: u8, source: &mut S) -> Result<Option<Key>> {
    if first != ESC {
        return Ok(Some(Key::Char(first)));
    }

    let Some(open) = source.read_byte()? else {
        return Ok(None);
    };
    let Some(code) = source.read_byte()? else {
        return Ok(None);
    };

    let dir = match (open, code) {
        (b'[', b'A') => Up,
        (b'[', b'B') => Down,
        (b'[', b'C') => Right,
        (b'[', b'D') => Left,
        _ => return Ok(None),
    };

    Ok(Some(Key::Arrow(dir)))
}

/// Maps a key to an intent. A turn back onto `committed`, the direction the
/// snake is moving in right now, is dropped.
pub fn translate(key: Key, committed: Direction) -> Option<Intent> {
    let dir = match key {
        Key::Arrow(dir) => dir,
        Key::Char(c) => match c.to_ascii_lowercase() {
            b'w' => Up,
            b's' => Down,
            b'a' => Left,
            b'd' => Right,
            b'q' | CTRL_C => return Some(Intent::Quit),
            _ => return None,
        },
    };

    if dir.is_opposite(committed) {
        None
    } else {
        Some(Intent::Turn(dir))
    }
}

/// Reads keys without blocking until one of them asks for something. Keys
/// typed after it stay buffered for the next tick.
pub fn poll_intent<S: ByteSource + ?Sized>(source: &mut S, committed: Direction) -> Result<Option<Intent>> {
    while let Some(byte) = source.poll_byte()? {
        let key = match decode_key(byte, source)? {
            Some(key) => key,
            None => continue,
        };

        if let Some(intent) = translate(key, committed) {
            return Ok(Some(intent));
        }
    }

    Ok(None)
}
