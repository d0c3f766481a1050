//! Crossterm terminal driver.
//!
//! [`CrosstermDriver`] implements [`gridsearch_core::Driver`]: it turns
//! terminal key, mouse and resize events into [`Input`]s and paints
//! [`Frame`] diffs with 24-bit colours.

use std::io::{self, Write};
use std::sync::mpsc::Sender;
use std::time::Duration;

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind},
    execute, queue,
    style::{Color as CtColor, Print, SetBackgroundColor, SetForegroundColor},
    terminal::{self, ClearType},
};

use gridsearch_core::{Color, Context, Driver, Frame, Input, Key, MouseAction, Point};

/// How long `poll_msgs` waits for the first event.
const POLL_TIMEOUT: Duration = Duration::from_millis(16);

/// Maps a [`Color`] to a crossterm colour; [`Color::DEFAULT`] is the
/// terminal's own.
fn to_ct_color(c: Color) -> CtColor {
    if c == Color::DEFAULT {
        CtColor::Reset
    } else {
        CtColor::Rgb {
            r: c.r(),
            g: c.g(),
            b: c.b(),
        }
    }
}

fn to_key(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::Char(' ') => Some(Key::Space),
        KeyCode::Char(c) => Some(Key::Char(c)),
        KeyCode::Enter => Some(Key::Enter),
        KeyCode::Esc => Some(Key::Escape),
        KeyCode::Backspace => Some(Key::Backspace),
        KeyCode::Tab => Some(Key::Tab),
        KeyCode::Up => Some(Key::ArrowUp),
        KeyCode::Down => Some(Key::ArrowDown),
        KeyCode::Left => Some(Key::ArrowLeft),
        KeyCode::Right => Some(Key::ArrowRight),
        _ => None,
    }
}

fn to_input(ev: Event) -> Option<Input> {
    match ev {
        // Windows also reports releases; only presses count.
        Event::Key(KeyEvent { code, kind, .. }) if kind != KeyEventKind::Release => {
            to_key(code).map(Input::Key)
        }
        Event::Mouse(MouseEvent {
            kind, column, row, ..
        }) => {
            let action = match kind {
                MouseEventKind::Down(MouseButton::Left) => MouseAction::Main,
                MouseEventKind::Down(MouseButton::Right) => MouseAction::Secondary,
                MouseEventKind::Down(MouseButton::Middle) => MouseAction::Auxiliary,
                MouseEventKind::Up(_) => MouseAction::Release,
                MouseEventKind::Moved | MouseEventKind::Drag(_) => MouseAction::Move,
                _ => return None,
            };
            Some(Input::Mouse {
                action,
                pos: Point::new(column as i32, row as i32),
            })
        }
        Event::Resize(w, h) => Some(Input::Screen {
            width: w as i32,
            height: h as i32,
        }),
        _ => None,
    }
}

/// A terminal back-end using crossterm. Mouse capture is always on.
#[derive(Default)]
pub struct CrosstermDriver;

impl CrosstermDriver {
    pub fn new() -> Self {
        Self
    }

    /// Current terminal size in cells.
    pub fn size() -> io::Result<(i32, i32)> {
        let (w, h) = terminal::size()?;
        Ok((w as i32, h as i32))
    }
}

impl Driver for CrosstermDriver {
    fn init(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        terminal::enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(
            stdout,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::Clear(ClearType::All),
            event::EnableMouseCapture
        )?;
        log::debug!("terminal initialised");
        Ok(())
    }

    fn poll_msgs<M: From<Input>>(
        &mut self,
        ctx: &Context,
        tx: &Sender<M>,
    ) -> Result<(), Box<dyn std::error::Error>> {
        if !event::poll(POLL_TIMEOUT)? {
            return Ok(());
        }

        while event::poll(Duration::ZERO)? {
            if ctx.is_done() {
                return Ok(());
            }
            if let Some(input) = to_input(event::read()?) {
                if tx.send(M::from(input)).is_err() {
                    // The receiving side is gone; nothing left to feed.
                    return Ok(());
                }
            }
        }
        Ok(())
    }

    fn flush(&mut self, frame: Frame) -> Result<(), Box<dyn std::error::Error>> {
        let mut stdout = io::stdout().lock();
        for fc in &frame.cells {
            let (p, g) = (fc.pos, fc.glyph);
            queue!(
                stdout,
                cursor::MoveTo(p.x as u16, p.y as u16),
                SetForegroundColor(to_ct_color(g.fg)),
                SetBackgroundColor(to_ct_color(g.bg)),
                Print(g.ch)
            )?;
        }
        stdout.flush()?;
        Ok(())
    }

    fn close(&mut self) {
        let mut stdout = io::stdout();
        let _ = execute!(
            stdout,
            event::DisableMouseCapture,
            SetForegroundColor(CtColor::Reset),
            SetBackgroundColor(CtColor::Reset),
            cursor::Show,
            terminal::LeaveAlternateScreen
        );
        let _ = terminal::disable_raw_mode();
        log::debug!("terminal restored");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEventState, KeyModifiers};

    fn press(code: KeyCode) -> Event {
        Event::Key(KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        })
    }

    #[test]
    fn default_color_is_reset() {
        assert_eq!(to_ct_color(Color::DEFAULT), CtColor::Reset);
        assert_eq!(
            to_ct_color(Color::from_rgb(255, 165, 0)),
            CtColor::Rgb { r: 255, g: 165, b: 0 }
        );
    }

    #[test]
    fn keys_map_to_input() {
        assert_eq!(to_input(press(KeyCode::Char('g'))), Some(Input::char('g')));
        assert_eq!(to_input(press(KeyCode::Char(' '))), Some(Input::Key(Key::Space)));
        assert_eq!(to_input(press(KeyCode::Tab)), Some(Input::Key(Key::Tab)));
        assert_eq!(to_input(press(KeyCode::F(5))), None);
    }

    #[test]
    fn key_releases_are_dropped() {
        let ev = Event::Key(KeyEvent {
            code: KeyCode::Enter,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        });
        assert_eq!(to_input(ev), None);
    }

    #[test]
    fn mouse_and_resize_events() {
        let click = Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 4,
            row: 2,
            modifiers: KeyModifiers::NONE,
        });
        assert_eq!(to_input(click), Some(Input::click(Point::new(4, 2))));
        assert_eq!(
            to_input(Event::Resize(80, 24)),
            Some(Input::Screen {
                width: 80,
                height: 24
            })
        );
        assert_eq!(to_input(Event::FocusGained), None);
    }
}
