// Menu engine: a tiny render-on-input loop shared by the interactive menus.
// Each menu is a plain state machine (`Menu`) that reacts to abstract keys and
// renders itself to text; `run_menu` wires it to a key source and redraws the
// view in place after every key.

pub mod bookmark;
pub mod pinned;

use anyhow::{Context, Result};
use crossterm::cursor::{Hide, MoveToColumn, MoveUp, Show};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::style::Print;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode, Clear, ClearType};
use crossterm::{execute, queue};
use std::io::{self, IsTerminal, Write};

/// Keys the menus understand. Everything else is ignored by the key source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuKey {
    Up,
    Down,
    Left,
    Right,
    Enter,
    /// `q` or Ctrl+C.
    Quit,
}

/// Whether the menu loop should keep going after a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuStep {
    Continue,
    Done,
}

pub trait Menu {
    fn handle_key(&mut self, key: MenuKey) -> MenuStep;
    /// Full text view of the menu. An empty string once the menu is done.
    fn render(&self) -> String;
}

/// Source of menu keys. `None` means the input ended before the menu
/// finished; each menu then falls back to its default result.
pub trait KeySource {
    fn next_key(&mut self) -> Result<Option<MenuKey>>;
}

/// Replays a fixed sequence of keys. Handy for scripted runs and tests.
#[derive(Debug, Clone, Default)]
pub struct ScriptedKeys {
    keys: std::collections::VecDeque<MenuKey>,
}

impl ScriptedKeys {
    pub fn new(keys: impl IntoIterator<Item = MenuKey>) -> Self {
        ScriptedKeys {
            keys: keys.into_iter().collect(),
        }
    }

    /// Keys not consumed yet.
    pub fn remaining(&self) -> usize {
        self.keys.len()
    }
}

impl KeySource for ScriptedKeys {
    fn next_key(&mut self) -> Result<Option<MenuKey>> {
        Ok(self.keys.pop_front())
    }
}

/// Drive `menu` until it reports `Done` or the keys run out.
pub fn run_menu<M, K, W>(menu: &mut M, keys: &mut K, out: W) -> Result<()>
where
    M: Menu,
    K: KeySource,
    W: Write,
{
    let mut painter = Painter::new(out);
    painter.draw(&menu.render())?;
    while let Some(key) = keys.next_key()? {
        let step = menu.handle_key(key);
        painter.draw(&menu.render())?;
        if step == MenuStep::Done {
            break;
        }
    }
    painter.clear()?;
    Ok(())
}

/// Run `menu` against the real terminal: raw mode on stdout, keys from
/// crossterm events.
pub fn run_interactive<M: Menu>(menu: &mut M) -> Result<()> {
    if !io::stdin().is_terminal() || !io::stdout().is_terminal() {
        anyhow::bail!("interactive menu requires a terminal");
    }
    let _guard = RawModeGuard::enter()?;
    run_menu(menu, &mut TerminalKeys, io::stdout())
}

/// Redraws a block of text in place, erasing whatever it drew last time.
struct Painter<W: Write> {
    out: W,
    lines: u16,
}

impl<W: Write> Painter<W> {
    fn new(out: W) -> Self {
        Painter { out, lines: 0 }
    }

    fn draw(&mut self, view: &str) -> io::Result<()> {
        self.erase()?;
        let mut lines = 0u16;
        for line in view.lines() {
            // raw mode: no implicit carriage return
            queue!(self.out, Print(line), Print("\r\n"))?;
            lines = lines.saturating_add(1);
        }
        self.lines = lines;
        self.out.flush()
    }

    fn clear(&mut self) -> io::Result<()> {
        self.erase()?;
        self.out.flush()
    }

    fn erase(&mut self) -> io::Result<()> {
        if self.lines > 0 {
            queue!(self.out, MoveUp(self.lines))?;
        }
        queue!(self.out, MoveToColumn(0), Clear(ClearType::FromCursorDown))?;
        self.lines = 0;
        Ok(())
    }
}

/// Blocking key reader over crossterm events.
struct TerminalKeys;

impl KeySource for TerminalKeys {
    fn next_key(&mut self) -> Result<Option<MenuKey>> {
        loop {
            let ev = event::read().context("failed to read menu input")?;
            let Event::Key(key) = ev else {
                continue;
            };
            if let Some(mapped) = map_key(key) {
                return Ok(Some(mapped));
            }
        }
    }
}

fn map_key(key: KeyEvent) -> Option<MenuKey> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Some(MenuKey::Quit),
        KeyCode::Char('q') => Some(MenuKey::Quit),
        KeyCode::Up => Some(MenuKey::Up),
        KeyCode::Down => Some(MenuKey::Down),
        KeyCode::Left => Some(MenuKey::Left),
        KeyCode::Right => Some(MenuKey::Right),
        KeyCode::Enter => Some(MenuKey::Enter),
        _ => None,
    }
}

/// Raw mode and a hidden cursor for as long as the guard lives.
struct RawModeGuard;

impl RawModeGuard {
    fn enter() -> Result<Self> {
        enable_raw_mode().context("failed to enable raw mode")?;
        let guard = RawModeGuard;
        execute!(io::stdout(), Hide).context("failed to hide cursor")?;
        Ok(guard)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = execute!(io::stdout(), Show);
        let _ = disable_raw_mode();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Counts keys and finishes on Enter.
    #[derive(Default)]
    struct Counter {
        seen: usize,
        done: bool,
    }

    impl Menu for Counter {
        fn handle_key(&mut self, key: MenuKey) -> MenuStep {
            self.seen += 1;
            if key == MenuKey::Enter {
                self.done = true;
                return MenuStep::Done;
            }
            MenuStep::Continue
        }

        fn render(&self) -> String {
            if self.done {
                return String::new();
            }
            format!("seen {}\nline two", self.seen)
        }
    }

    #[test]
    fn stops_at_done() {
        let mut menu = Counter::default();
        let mut keys = ScriptedKeys::new([MenuKey::Down, MenuKey::Enter, MenuKey::Down]);
        run_menu(&mut menu, &mut keys, io::sink()).unwrap();
        assert_eq!(menu.seen, 2);
        assert_eq!(keys.remaining(), 1);
    }

    #[test]
    fn stops_when_keys_run_out() {
        let mut menu = Counter::default();
        let mut keys = ScriptedKeys::new([MenuKey::Up, MenuKey::Left]);
        run_menu(&mut menu, &mut keys, io::sink()).unwrap();
        assert_eq!(menu.seen, 2);
        assert!(!menu.done);
    }

    #[test]
    fn view_text_reaches_the_writer() {
        let mut menu = Counter::default();
        let mut out: Vec<u8> = Vec::new();
        let mut keys = ScriptedKeys::default();
        run_menu(&mut menu, &mut keys, &mut out).unwrap();
        let written = String::from_utf8_lossy(&out);
        assert!(written.contains("seen 0\r\nline two\r\n"));
    }

    #[test]
    fn maps_quit_and_arrow_keys() {
        let press = |code, modifiers| KeyEvent::new(code, modifiers);
        assert_eq!(map_key(press(KeyCode::Char('q'), KeyModifiers::NONE)), Some(MenuKey::Quit));
        assert_eq!(map_key(press(KeyCode::Char('c'), KeyModifiers::CONTROL)), Some(MenuKey::Quit));
        assert_eq!(map_key(press(KeyCode::Char('c'), KeyModifiers::NONE)), None);
        assert_eq!(map_key(press(KeyCode::Right, KeyModifiers::NONE)), Some(MenuKey::Right));
        assert_eq!(map_key(press(KeyCode::Enter, KeyModifiers::NONE)), Some(MenuKey::Enter));
    }

    #[test]
    fn ignores_key_release() {
        let mut key = KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE);
        key.kind = KeyEventKind::Release;
        assert_eq!(map_key(key), None);
    }
}
