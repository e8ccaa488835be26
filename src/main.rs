//! Astro Drift entry point
//!
//! Sets up the terminal, reads keys on a dedicated thread, and runs the
//! handle → update → draw frame loop.

use std::io::{self, BufWriter, Write, stdout};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::{
    ExecutableCommand, cursor,
    event::{self, Event as TermEvent, KeyCode as TermKey, KeyEvent, KeyEventKind, KeyModifiers},
    terminal,
};

use astro_drift::game::{InputEvent, KeyCode};
use astro_drift::renderer::TerminalSurface;
use astro_drift::{Clock, Game, LaunchOptions, Settings};

fn main() {
    env_logger::init();
    log::info!("Astro Drift starting...");

    let options = LaunchOptions::parse(std::env::args().skip(1));
    let settings = match &options.config {
        Some(path) => Settings::load(path).unwrap_or_else(|e| {
            log::error!("{}; using default settings", e);
            Settings::default()
        }),
        None => Settings::default(),
    };

    let game = Game::new(&settings, &options);
    if let Err(e) = run(game, &settings) {
        log::error!("Terminal unavailable: {}", e);
        eprintln!("astro-drift: terminal unavailable: {}", e);
    }
}

fn run(mut game: Game, settings: &Settings) -> io::Result<()> {
    let mut out = BufWriter::new(stdout());
    let _guard = TerminalGuard::enter(&mut out)?;

    // Blocking reads live on their own thread so the frame loop only drains
    let (tx, rx) = mpsc::channel::<TermEvent>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break;
            }
        }
    });

    frame_loop(&mut out, &mut game, &rx, settings)
}

/// Raw mode plus alternate screen, undone on drop whichever way `run` exits
struct TerminalGuard;

impl TerminalGuard {
    fn enter<W: Write>(out: &mut W) -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let guard = TerminalGuard;
        out.execute(terminal::EnterAlternateScreen)?;
        out.execute(cursor::Hide)?;
        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let mut out = stdout();
        let _ = out.execute(cursor::Show);
        let _ = out.execute(terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

fn frame_loop<W: Write>(
    out: &mut W,
    game: &mut Game,
    rx: &mpsc::Receiver<TermEvent>,
    settings: &Settings,
) -> io::Result<()> {
    let (cols, rows) = terminal::size()?;
    let mut surface = TerminalSurface::new(cols, rows, game.world().bounds());
    let frame = Duration::from_secs_f32(settings.frame_time());

    let mut clock = Clock::new();
    clock.start();

    while game.is_running() {
        let frame_start = Instant::now();
        let dt = clock.tick();

        // Drain pending input (non-blocking)
        while let Ok(ev) = rx.try_recv() {
            match ev {
                TermEvent::Key(KeyEvent {
                    code,
                    kind: KeyEventKind::Press | KeyEventKind::Repeat,
                    modifiers,
                    ..
                }) => {
                    if code == TermKey::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
                        game.handle(InputEvent::Quit, dt);
                    } else if let Some(key) = map_key(code) {
                        game.handle(InputEvent::KeyDown(key), dt);
                    }
                }
                TermEvent::Resize(c, r) => surface.resize(c, r),
                _ => {}
            }
        }

        game.update(dt);
        game.draw(&mut surface);
        surface.present(out)?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame {
            thread::sleep(frame - elapsed);
        }
    }

    Ok(())
}

fn map_key(code: TermKey) -> Option<KeyCode> {
    let key = match code {
        TermKey::Char(' ') => KeyCode::Space,
        TermKey::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
        TermKey::Backspace => KeyCode::Backspace,
        TermKey::Esc => KeyCode::Escape,
        TermKey::Enter => KeyCode::Enter,
        TermKey::Tab => KeyCode::Tab,
        _ => return None,
    };
    Some(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct ClosedWriter;

    impl Write for ClosedWriter {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::other("closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::Error::other("closed"))
        }
    }

    #[test]
    fn test_failed_setup_leaves_raw_mode_off() {
        assert!(TerminalGuard::enter(&mut ClosedWriter).is_err());
        assert!(!terminal::is_raw_mode_enabled().unwrap_or(false));
    }

    #[test]
    fn test_map_key() {
        assert_eq!(map_key(TermKey::Char(' ')), Some(KeyCode::Space));
        assert_eq!(map_key(TermKey::Char('W')), Some(KeyCode::Char('w')));
        assert_eq!(map_key(TermKey::Backspace), Some(KeyCode::Backspace));
        assert_eq!(map_key(TermKey::F(1)), None);
    }
}
