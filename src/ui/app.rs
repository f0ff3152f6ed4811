use crate::game::{GameState, Outcome, COLS};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{backend::Backend, Terminal};
use std::io;
use tracing::{debug, info};

pub struct App {
    game_state: GameState,
    /// 0-indexed column under the selector.
    selected_column: usize,
    start_column: usize,
    should_quit: bool,
    message: Option<String>,
}

impl App {
    /// `start_column` is 1-indexed, as in the config file.
    pub fn new(start_column: usize) -> Self {
        let start_column = start_column.clamp(1, COLS) - 1;
        App {
            game_state: GameState::new(),
            selected_column: start_column,
            start_column,
            should_quit: false,
            message: None,
        }
    }

    pub fn game_state(&self) -> &GameState {
        &self.game_state
    }

    pub fn selected_column(&self) -> usize {
        self.selected_column
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Main application loop
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()>
    where
        B::Error: Into<io::Error>,
    {
        info!("starting terminal game");
        loop {
            terminal
                .draw(|f| self.render(f))
                .map_err(Into::<io::Error>::into)?;

            if self.should_quit {
                break;
            }

            self.handle_events()?;
        }
        info!(outcome = ?self.game_state.outcome(), "leaving terminal game");
        Ok(())
    }

    /// Handle keyboard events
    fn handle_events(&mut self) -> io::Result<()> {
        if event::poll(std::time::Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    self.handle_key(key);
                }
            }
        }
        Ok(())
    }

    /// Handle key press
    pub fn handle_key(&mut self, key: KeyEvent) {
        // Clear message on any key press
        self.message = None;

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Left => {
                self.selected_column = self.selected_column.saturating_sub(1);
            }
            KeyCode::Right => {
                if self.selected_column < COLS - 1 {
                    self.selected_column += 1;
                }
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.drop_piece();
            }
            KeyCode::Char(c @ '1'..='7') => {
                self.selected_column = (c as u8 - b'1') as usize;
                self.drop_piece();
            }
            KeyCode::Char('r') => {
                self.game_state = GameState::new();
                self.selected_column = self.start_column;
                self.message = Some("New game started!".to_string());
                debug!("game reset");
            }
            _ => {}
        }
    }

    /// Drop piece in selected column
    fn drop_piece(&mut self) {
        if self.game_state.is_terminal() {
            self.message = Some("Game over! Press 'r' to restart.".to_string());
            return;
        }

        match self.game_state.apply_move(self.selected_column as i64 + 1) {
            Ok(()) => {
                let outcome = self.game_state.outcome();
                if outcome != Outcome::InProgress {
                    info!(?outcome, "game finished");
                    self.message = Some(outcome.to_string());
                }
            }
            Err(e) => {
                debug!(%e, "move refused");
                self.message = Some(format!("Invalid move: {e}"));
            }
        }
    }

    /// Render the UI
    fn render(&self, frame: &mut ratatui::Frame) {
        super::game_view::render(frame, &self.game_state, self.selected_column, &self.message);
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new(4)
    }
}
