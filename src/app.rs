//! App: terminal init, frame loop, tick and key handling.

use crate::GameConfig;
use crate::game::GameState;
use crate::input::{Action, key_to_action};
use crate::piece::Rotation;
use crate::player::Direction;
use crate::theme::Theme;
use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};
use ratatui::DefaultTerminal;
use std::time::{Duration, Instant};

/// Frame budget (~60 FPS).
const FRAME_DURATION: Duration = Duration::from_millis(16);

pub struct App {
    state: GameState,
    theme: Theme,
    /// Clock origin; the game sees time elapsed since this instant.
    start: Instant,
}

impl App {
    pub fn new(config: &GameConfig, theme: Theme) -> Self {
        Self {
            state: GameState::new(config),
            theme,
            start: Instant::now(),
        }
    }

    /// Dispatch one action into the game. Returns false on quit.
    fn apply_action(&mut self, action: Action) -> bool {
        match action {
            Action::Quit => return false,
            Action::MoveLeft => self.state.move_piece(Direction::Left),
            Action::MoveRight => self.state.move_piece(Direction::Right),
            Action::Drop => self.state.drop_piece(),
            Action::RotateCcw => self.state.rotate(Rotation::CounterClockwise),
            Action::RotateCw => self.state.rotate(Rotation::Clockwise),
            Action::None => {}
        }
        true
    }

    pub fn run(&mut self) -> Result<()> {
        use crossterm::{
            execute,
            terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
        };

        enable_raw_mode()?;
        let mut stdout = std::io::stdout();
        let result = execute!(stdout, EnterAlternateScreen)
            .map_err(anyhow::Error::from)
            .and_then(|()| {
                ratatui::DefaultTerminal::new(ratatui::backend::CrosstermBackend::new(stdout))
                    .map_err(anyhow::Error::from)
            })
            .and_then(|mut terminal| self.run_loop(&mut terminal));

        // Restore
        let leave = execute!(std::io::stdout(), LeaveAlternateScreen);
        let raw = disable_raw_mode();
        tracing::info!(ok = leave.is_ok() && raw.is_ok(), "terminal restored");

        finish(result, leave, raw)
    }

    fn run_loop(&mut self, terminal: &mut DefaultTerminal) -> Result<()> {
        self.start = Instant::now();
        loop {
            let frame_start = Instant::now();
            self.state.update(frame_start.duration_since(self.start));
            terminal.draw(|f| crate::ui::draw(f, &self.state, &self.theme))?;

            let timeout = FRAME_DURATION.saturating_sub(frame_start.elapsed());
            if event::poll(timeout)? {
                while event::poll(Duration::ZERO)? {
                    if let Event::Key(key) = event::read()? {
                        if key.kind != KeyEventKind::Press {
                            continue;
                        }
                        if !self.apply_action(key_to_action(key)) {
                            tracing::info!("quit requested");
                            return Ok(());
                        }
                    }
                }
            }
        }
    }
}

/// Loop error first, then whichever restore step failed.
fn finish(result: Result<()>, leave: std::io::Result<()>, raw: std::io::Result<()>) -> Result<()> {
    result?;
    leave.context("leaving alternate screen")?;
    raw.context("disabling raw mode")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arena::Position;

    fn app() -> App {
        let config = GameConfig {
            width: 12,
            height: 20,
            drop_interval: Duration::from_millis(500),
            pieces: "T".parse().unwrap(),
            seed: Some(3),
        };
        App::new(&config, Theme::default())
    }

    #[test]
    fn actions_reach_game_state() {
        let mut app = app();
        assert!(app.apply_action(Action::MoveLeft));
        assert_eq!(app.state.player.pos, Position::new(4, 0));
        assert!(app.apply_action(Action::MoveRight));
        assert!(app.apply_action(Action::MoveRight));
        assert_eq!(app.state.player.pos, Position::new(6, 0));
        assert!(app.apply_action(Action::Drop));
        assert_eq!(app.state.player.pos, Position::new(6, 1));
        let flat = app.state.player.matrix.clone();
        assert!(app.apply_action(Action::RotateCw));
        assert_ne!(app.state.player.matrix, flat);
        assert!(app.apply_action(Action::RotateCcw));
        assert_eq!(app.state.player.matrix, flat);
        assert!(app.apply_action(Action::None));
    }

    #[test]
    fn quit_stops_loop() {
        let mut app = app();
        assert!(!app.apply_action(Action::Quit));
    }

    fn io_err(msg: &str) -> std::io::Result<()> {
        Err(std::io::Error::other(msg.to_string()))
    }

    #[test]
    fn loop_error_wins_over_restore_errors() {
        let err = finish(Err(anyhow::anyhow!("draw failed")), io_err("leave"), io_err("raw")).unwrap_err();
        assert_eq!(err.to_string(), "draw failed");
    }

    #[test]
    fn restore_errors_surface_after_clean_loop() {
        assert!(finish(Ok(()), Ok(()), Ok(())).is_ok());

        let err = finish(Ok(()), io_err("leave"), io_err("raw")).unwrap_err();
        assert_eq!(format!("{err:#}"), "leaving alternate screen: leave");

        let err = finish(Ok(()), Ok(()), io_err("raw")).unwrap_err();
        assert_eq!(format!("{err:#}"), "disabling raw mode: raw");
    }
}
