//! Terminal frontend: crossterm rendering, key input, and setup/teardown.

use crate::engine::{Board, Direction, SIZE};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    style::{self, Color},
    terminal::{self, ClearType},
    ExecutableCommand, QueueableCommand,
};
use std::io::{self, Write};

/// One decoded key press, as seen by the session loop.
pub enum InputEvent {
    Dir(Direction),
    Quit,
    Other,
}

/// Puts the terminal into game mode and restores it on drop, so the shell
/// gets its terminal back even if the session errors out mid-frame.
pub struct TerminalGuard;

impl TerminalGuard {
    pub fn init(title: &str) -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let mut stdout = io::stdout();
        stdout.execute(terminal::SetTitle(title))?;
        stdout.execute(cursor::Hide)?;
        Ok(TerminalGuard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let mut stdout = io::stdout();
        let _ = stdout.execute(style::ResetColor);
        let _ = stdout.execute(cursor::Show);
        let _ = terminal::disable_raw_mode();
    }
}

/// Scoped foreground color: set on construction, reset when dropped. The
/// reset runs even when a write between the two fails with `?`.
struct ColorScope<'a> {
    out: &'a mut io::Stdout,
}

impl<'a> ColorScope<'a> {
    fn new(out: &'a mut io::Stdout, color: Color) -> io::Result<Self> {
        out.queue(style::SetForegroundColor(color))?;
        Ok(ColorScope { out })
    }

    fn print(&mut self, text: impl std::fmt::Display) -> io::Result<()> {
        self.out.queue(style::Print(text))?;
        Ok(())
    }
}

impl Drop for ColorScope<'_> {
    fn drop(&mut self) {
        let _ = self.out.queue(style::ResetColor);
    }
}

fn tile_color(value: u64) -> Color {
    match value {
        0 => Color::DarkGrey,
        2 => Color::Cyan,
        4 => Color::Magenta,
        8 => Color::Red,
        16 => Color::Green,
        32 | 64 => Color::Yellow,
        128 => Color::DarkCyan,
        256 => Color::Cyan,
        512 => Color::DarkMagenta,
        1024 => Color::Magenta,
        _ => Color::Red,
    }
}

/// Draw one frame: the colored grid, the score line, and an optional status
/// message (the echo of the last key press).
pub fn render(board: &Board, score: u64, message: Option<&str>) -> io::Result<()> {
    let mut stdout = io::stdout();
    stdout.queue(terminal::Clear(ClearType::All))?;
    stdout.queue(cursor::MoveTo(0, 0))?;
    stdout.queue(style::Print("\r\n"))?;
    for row in 0..SIZE {
        for col in 0..SIZE {
            let value = board.get(row, col);
            let mut cell = ColorScope::new(&mut stdout, tile_color(value))?;
            cell.print(format!("{:>6}", value))?;
        }
        stdout.queue(style::Print("\r\n\r\n"))?;
    }
    stdout.queue(style::Print(format!("Score: {}\r\n", score)))?;
    if let Some(msg) = message {
        stdout.queue(style::Print(format!("{}\r\n", msg)))?;
    }
    stdout.flush()?;
    Ok(())
}

/// Append the red loss banner below the final frame.
pub fn render_loss() -> io::Result<()> {
    let mut stdout = io::stdout();
    {
        let mut banner = ColorScope::new(&mut stdout, Color::Red)?;
        banner.print("You Lose!\r\n")?;
    }
    stdout.queue(style::Print("Press any key to exit.\r\n"))?;
    stdout.flush()?;
    Ok(())
}

/// Block until the next key press and map it to an [`InputEvent`].
///
/// Arrow keys and WASD are directions; q, Esc and Ctrl-C quit (raw mode
/// swallows the usual interrupt, so quitting has to be a key binding here);
/// everything else is `Other`.
pub fn read_input() -> io::Result<InputEvent> {
    loop {
        if let Event::Key(KeyEvent {
            code,
            modifiers,
            kind,
            ..
        }) = event::read()?
        {
            if kind != KeyEventKind::Press {
                continue;
            }
            if modifiers.contains(KeyModifiers::CONTROL) && code == KeyCode::Char('c') {
                return Ok(InputEvent::Quit);
            }
            return Ok(match code {
                KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => {
                    InputEvent::Dir(Direction::Up)
                }
                KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => {
                    InputEvent::Dir(Direction::Down)
                }
                KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => {
                    InputEvent::Dir(Direction::Left)
                }
                KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => {
                    InputEvent::Dir(Direction::Right)
                }
                KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => InputEvent::Quit,
                _ => InputEvent::Other,
            });
        }
    }
}

/// Block until any key is pressed. Used to hold the loss screen on screen.
pub fn wait_for_key() -> io::Result<()> {
    loop {
        if let Event::Key(KeyEvent { kind, .. }) = event::read()? {
            if kind == KeyEventKind::Press {
                return Ok(());
            }
        }
    }
}
