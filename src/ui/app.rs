use std::io;
use std::sync::mpsc::{Receiver, TryRecvError};
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use log::{debug, error};
use ratatui::{backend::Backend, Terminal};

use crate::coordinator::MoveCoordinator;
use crate::engine::{Engine, EngineReply};
use crate::game::COLS;

pub struct App<E> {
    game: MoveCoordinator<E>,
    replies: Receiver<EngineReply>,
    tick: Duration,
    selected_column: usize,
    engine_lost: bool,
    should_quit: bool,
}

impl<E: Engine> App<E> {
    pub fn new(game: MoveCoordinator<E>, replies: Receiver<EngineReply>, tick: Duration) -> Self {
        App {
            game,
            replies,
            tick,
            selected_column: COLS / 2, // Start in middle
            engine_lost: false,
            should_quit: false,
        }
    }

    /// Main application loop
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()>
    where
        B::Error: Into<io::Error>,
    {
        self.game.start();

        loop {
            self.drain_replies();

            terminal.draw(|f| self.render(f)).map_err(Into::into)?;

            if self.should_quit {
                break;
            }

            self.handle_events()?;
        }
        Ok(())
    }

    /// Feed every reply that has arrived since the last tick to the game.
    fn drain_replies(&mut self) {
        loop {
            match self.replies.try_recv() {
                Ok(reply) => self.game.on_engine_reply(reply),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    if !self.engine_lost {
                        error!("engine reply channel disconnected");
                        self.engine_lost = true;
                    }
                    break;
                }
            }
        }
    }

    /// Handle keyboard events
    fn handle_events(&mut self) -> io::Result<()> {
        if event::poll(self.tick)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    self.handle_key(key);
                }
            }
        }
        Ok(())
    }

    /// Handle key press
    fn handle_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Left => {
                self.selected_column = self.selected_column.saturating_sub(1);
            }
            KeyCode::Right => {
                if self.selected_column + 1 < COLS {
                    self.selected_column += 1;
                }
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.drop_piece(self.selected_column);
            }
            KeyCode::Char(c @ '1'..='7') => {
                let col = c as usize - '1' as usize;
                self.selected_column = col;
                self.drop_piece(col);
            }
            KeyCode::Char('u') => {
                if let Err(err) = self.game.undo() {
                    debug!("undo ignored: {err}");
                }
            }
            KeyCode::Char('r') => {
                self.game.reset();
                self.selected_column = COLS / 2;
            }
            KeyCode::Char('m') => {
                let mode = self.game.mode().next();
                self.game.set_mode(mode);
            }
            _ => {}
        }
    }

    fn drop_piece(&mut self, col: usize) {
        if let Err(err) = self.game.apply_move(col, false) {
            debug!("move in column {col} ignored: {err}");
        }
    }

    /// Render the UI
    fn render(&self, frame: &mut ratatui::Frame) {
        super::game_view::render(frame, &self.game, self.selected_column);
    }
}
