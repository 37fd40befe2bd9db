//! TUI effects boundary: event loop, terminal lifecycle, key mapping.
//!
//! This is the only module with side effects. It wires the pure layers
//! (state, update, view) to the real terminal via crossterm and ratatui.
//! Kept minimal: all intelligence lives in the pure layers.
//!
//! A reader thread forwards terminal events into an mpsc channel. The
//! event loop blocks on that channel, maps each event to an Action, runs
//! one pure transition, carries out the resulting directives and redraws.

use std::io;
use std::sync::mpsc;
use std::thread;

use crossterm::ExecutableCommand;
use crossterm::cursor::SetCursorStyle;
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
    PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use log::{debug, info, warn};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use super::field::Directive;
use super::state::{Action, AppEvent, Outcome, Transition, Wizard};
use super::update::update;
use super::view::{frame_text, render};

// ============================================================================
// KEY MAPPING
// ============================================================================

/// Map a crossterm key event to a semantic Action.
///
/// Enter confirms; a line break needs Alt+Enter, Shift+Enter or Ctrl+J.
/// Returns None for key releases and keys that don't map to any action.
pub fn map_key(key: KeyEvent) -> Option<Action> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let alt = key.modifiers.contains(KeyModifiers::ALT);
    let shift = key.modifiers.contains(KeyModifiers::SHIFT);
    // AltGr arrives as Ctrl+Alt on Windows
    let alt_gr = ctrl && alt;

    match key.code {
        // Cancel
        KeyCode::Char('c') if ctrl => Some(Action::Cancel),
        KeyCode::Esc => Some(Action::Cancel),

        // Confirm / line break
        KeyCode::Enter if alt || shift => Some(Action::NewLine),
        KeyCode::Char('j') if ctrl => Some(Action::NewLine),
        KeyCode::Enter => Some(Action::Confirm),

        // Readline-style editing
        KeyCode::Char('w') if ctrl => Some(Action::DeletePrevWord),
        KeyCode::Char('u') if ctrl => Some(Action::ClearLine),
        KeyCode::Char('a') if ctrl => Some(Action::MoveHome),
        KeyCode::Char('e') if ctrl => Some(Action::MoveEnd),
        KeyCode::Backspace if ctrl || alt => Some(Action::DeletePrevWord),
        KeyCode::Backspace => Some(Action::DeletePrev),
        KeyCode::Delete => Some(Action::DeleteNext),

        // Navigation
        KeyCode::Left if ctrl || alt => Some(Action::WordLeft),
        KeyCode::Right if ctrl || alt => Some(Action::WordRight),
        KeyCode::Left => Some(Action::MoveLeft),
        KeyCode::Right => Some(Action::MoveRight),
        KeyCode::Up => Some(Action::MoveUp),
        KeyCode::Down => Some(Action::MoveDown),
        KeyCode::Home => Some(Action::MoveHome),
        KeyCode::End => Some(Action::MoveEnd),

        // Text
        KeyCode::Char(c) if alt_gr || (!ctrl && !alt) => Some(Action::Insert(c)),

        _ => None,
    }
}

/// Map any channel event to an Action.
pub fn map_event(event: AppEvent) -> Option<Action> {
    match event {
        AppEvent::Key(key) => map_key(key),
        AppEvent::Resize { width, height } => Some(Action::Resize { width, height }),
    }
}

// ============================================================================
// TERMINAL LIFECYCLE
// ============================================================================

/// Keyboard protocol flags; without them most terminals send Shift+Enter
/// as a plain Enter.
fn keyboard_flags() -> KeyboardEnhancementFlags {
    KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
}

/// Set up the terminal for TUI mode.
fn setup_terminal() -> io::Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    io::stdout().execute(EnterAlternateScreen)?;
    // Unsupported on some terminals (and on Windows); Alt+Enter and
    // Ctrl+J still insert line breaks there.
    if let Err(e) = io::stdout().execute(PushKeyboardEnhancementFlags(keyboard_flags())) {
        debug!("keyboard enhancement unavailable: {}", e);
    }
    let backend = CrosstermBackend::new(io::stdout());
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore the terminal to normal mode.
fn restore_terminal() -> io::Result<()> {
    let _ = io::stdout().execute(PopKeyboardEnhancementFlags);
    disable_raw_mode()?;
    io::stdout().execute(SetCursorStyle::DefaultUserShape)?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

/// Install a panic hook that restores the terminal before printing the panic.
fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        // Best-effort terminal restoration
        let _ = restore_terminal();
        original_hook(panic_info);
    }));
}

// ============================================================================
// EVENT READER
// ============================================================================

/// Spawn a thread that reads crossterm events and forwards keys and
/// resizes to the channel.
fn spawn_event_reader(tx: mpsc::Sender<AppEvent>) {
    thread::spawn(move || {
        loop {
            let event = match event::read() {
                Ok(Event::Key(key)) => AppEvent::Key(key),
                Ok(Event::Resize(width, height)) => AppEvent::Resize { width, height },
                Ok(_) => continue, // mouse, focus, paste
                Err(e) => {
                    warn!("event reader stopped: {}", e);
                    break;
                }
            };
            if tx.send(event).is_err() {
                break; // receiver dropped, TUI is shutting down
            }
        }
    });
}

// ============================================================================
// DIRECTIVES
// ============================================================================

/// Carry out cursor directives from a transition, in order.
///
/// Cursor placement itself is decided by the view on every frame; this
/// only switches the indicator between blinking and the default shape.
fn apply_directives(directives: &[Directive]) -> io::Result<()> {
    for directive in directives {
        debug!("directive {:?}", directive);
        let style = match directive {
            Directive::Blink => SetCursorStyle::BlinkingBar,
            Directive::Hide => SetCursorStyle::DefaultUserShape,
        };
        io::stdout().execute(style)?;
    }
    Ok(())
}

// ============================================================================
// EVENT LOOP
// ============================================================================

/// Run the wizard until every question is answered or the user cancels.
///
/// Sets up the terminal, runs the event loop, and restores the terminal
/// before returning, whatever the outcome.
pub fn run(wizard: Wizard) -> io::Result<Outcome> {
    install_panic_hook();
    let mut terminal = setup_terminal()?;
    let result = event_loop(&mut terminal, wizard);
    restore_terminal()?;
    result
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    wizard: Wizard,
) -> io::Result<Outcome> {
    let (tx, rx) = mpsc::channel::<AppEvent>();

    // Seed the viewport; later sizes arrive as resize events.
    let (width, height) = crossterm::terminal::size()?;
    let _ = tx.send(AppEvent::Resize { width, height });
    spawn_event_reader(tx);

    let (mut wizard, directives) = wizard.init();
    info!("wizard started with {} questions", wizard.questions().len());
    apply_directives(&directives)?;

    loop {
        terminal.draw(|frame| render(&wizard, frame))?;
        let last_frame = frame_text(&wizard);

        // Block on the next event
        let Ok(event) = rx.recv() else {
            warn!("event source closed before completion");
            return Ok(Outcome::Pending(wizard));
        };

        let Some(action) = map_event(event) else {
            continue;
        };
        debug!("action {:?}", action);

        match update(wizard, &action) {
            Transition::Quit => {
                info!("cancelled");
                return Ok(Outcome::Cancelled { last_frame });
            }
            Transition::Continue {
                wizard: next,
                directives,
            } => {
                apply_directives(&directives)?;
                if next.is_done() {
                    info!("all {} questions answered", next.questions().len());
                    return Ok(Outcome::Completed(next));
                }
                wizard = next;
            }
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
