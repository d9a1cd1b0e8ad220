use std::collections::VecDeque;
use std::io::{stdout, Stdout, Write};
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::{cursor, execute, queue, style, terminal};
use crossterm::event::{poll, read, Event, KeyCode, KeyEvent, KeyModifiers};
use crossterm::terminal::{ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use log::{debug, error};

use crate::input::{ByteSource, CTRL_C, ESC};
use crate::render::Frame;

pub trait Terminal: ByteSource {
    fn render(&mut self, frame: &Frame) -> Result<()>;
}

/// Crossterm-backed terminal. Raw mode and the alternate screen are held for
/// as long as the value lives; dropping it puts the terminal back, also when
/// unwinding from a panic.
pub struct TermManager {
    stdout: Stdout,
    pending: VecDeque<u8>,
}

impl TermManager {
    pub fn setup() -> Result<Self> {
        let mut stdout = stdout();
        execute!(stdout, EnterAlternateScreen).context("Error entering alt screen")?;

        // From here on the terminal is modified, so let Drop undo it on any failure.
        let mut term = TermManager { stdout, pending: VecDeque::new() };
        terminal::enable_raw_mode().context("Error setting raw mode")?;
        execute!(term.stdout, cursor::Hide, terminal::Clear(ClearType::All)).context("Error preparing screen")?;

        debug!("terminal set up");
        Ok(term)
    }

    ///////////////////////////////////////////////////////////////////////////

    fn restore(&mut self) -> Result<()> {
        terminal::disable_raw_mode().context("Error leaving raw mode")?;
        execute!(self.stdout, cursor::Show, LeaveAlternateScreen).context("Error leaving alt screen")?;
        Ok(())
    }

    // One key at a time, so an escape sequence is always complete in
    // `pending` and a bare Esc is never glued to the next key.
    fn fill_pending(&mut self) -> Result<()> {
        while self.pending.is_empty() && poll(Duration::from_millis(0)).context("Error polling input")? {
            if let Event::Key(ev) = read().context("Error reading input")? {
                self.pending.extend(encode_key(&ev));
            }
        }

        Ok(())
    }
}

impl ByteSource for TermManager {
    fn poll_byte(&mut self) -> Result<Option<u8>> {
        if self.pending.is_empty() {
            self.fill_pending()?;
        }

        Ok(self.pending.pop_front())
    }

    fn read_byte(&mut self) -> Result<Option<u8>> {
        Ok(self.pending.pop_front())
    }
}

impl Terminal for TermManager {
    fn render(&mut self, frame: &Frame) -> Result<()> {
        for (y, row) in frame.rows().iter().enumerate() {
            queue!(self.stdout, cursor::MoveTo(0, y as u16), style::Print(row))?;
        }

        let status_y = frame.rows().len() as u16 + 1;
        queue!(
            self.stdout,
            cursor::MoveTo(0, status_y),
            terminal::Clear(ClearType::CurrentLine),
            style::Print(frame.status_line()),
            cursor::MoveTo(0, status_y + 1),
            style::Print("Controls: Arrow Keys or WASD | Q to Quit")
        )?;

        self.stdout.flush().context("Error flushing")?;
        Ok(())
    }
}

impl Drop for TermManager {
    fn drop(&mut self) {
        if let Err(e) = self.restore() {
            error!("failed to restore terminal: {:#}", e);
        }
    }
}

/// Turns a key event back into the bytes a raw-mode terminal would send.
pub fn encode_key(ev: &KeyEvent) -> Vec<u8> {
    match ev {
        KeyEvent { code: KeyCode::Char('c'), modifiers } if modifiers.contains(KeyModifiers::CONTROL) => vec![CTRL_C],
        KeyEvent { code, modifiers: _ } => match code {
            KeyCode::Char(c) if c.is_ascii() => vec![*c as u8],
            KeyCode::Up => vec![ESC, b'[', b'A'],
            KeyCode::Down => vec![ESC, b'[', b'B'],
            KeyCode::Right => vec![ESC, b'[', b'C'],
            KeyCode::Left => vec![ESC, b'[', b'D'],
            KeyCode::Esc => vec![ESC],
            _ => vec![],
        }
    }
}
