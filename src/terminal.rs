use std::io::{self, Stdout, Write};

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{self, Event as TermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{execute, queue};
use tracing::debug;

use crate::resolver::Lookup;
use crate::session::{Event, Flow, Session};
use crate::view;

// Screen is where frames go and where events come from.
pub trait Screen {
    // Blocks until the next event the session cares about. None means the
    // input stream is gone.
    fn next_event(&mut self) -> io::Result<Option<Event>>;
    fn draw(&mut self, frame: &str) -> io::Result<()>;
}

// Terminal owns raw mode and the alternate screen for its lifetime.
pub struct Terminal {
    out: Stdout,
}

impl Terminal {
    pub fn acquire() -> io::Result<Terminal> {
        terminal::enable_raw_mode()?;
        let mut out = io::stdout();
        if let Err(e) = execute!(out, EnterAlternateScreen, Hide) {
            let _ = terminal::disable_raw_mode();
            return Err(e);
        }
        Ok(Terminal { out })
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        let _ = execute!(self.out, Show, LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

impl Screen for Terminal {
    fn next_event(&mut self) -> io::Result<Option<Event>> {
        loop {
            if let TermEvent::Key(key) = event::read()? {
                if let Some(event) = map_key(key) {
                    return Ok(Some(event));
                }
            }
        }
    }

    fn draw(&mut self, frame: &str) -> io::Result<()> {
        queue!(self.out, MoveTo(0, 0), Clear(ClearType::All))?;
        // raw mode does not turn \n into a carriage return
        self.out.write_all(frame.replace('\n', "\r\n").as_bytes())?;
        self.out.flush()
    }
}

// Translates a key press into a session event. Releases, repeats of
// non-character keys and everything without a meaning here map to None.
pub fn map_key(key: KeyEvent) -> Option<Event> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Some(Event::Cancel),
        KeyCode::Char(_) if key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) => None,
        KeyCode::Char(c) => Some(Event::Char(c)),
        KeyCode::Enter => Some(Event::Submit),
        KeyCode::Backspace => Some(Event::Backspace),
        KeyCode::Esc => Some(Event::Cancel),
        _ => None,
    }
}

// Runs the session until it is cancelled or the input stream ends,
// drawing a fresh frame after every event.
pub fn run<L: Lookup, S: Screen>(session: &mut Session<L>, screen: &mut S, styled: bool) -> io::Result<()> {
    screen.draw(&view::render(session, styled))?;

    while let Some(event) = screen.next_event()? {
        if session.apply(event) == Flow::Quit {
            debug!("session cancelled");
            break;
        }
        screen.draw(&view::render(session, styled))?;
    }
    Ok(())
}
