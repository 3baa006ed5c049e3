//! Front-end application state.
//!
//! [`App`] sits between key actions and the engines: it owns the active game,
//! the board cursor, a short-lived status line and the player's stats. Every
//! finished game is recorded into [`PlayerStats`] exactly once.

use tracing::{debug, info};

use crate::cli::GameKind;
use crate::config::AppConfig;
use crate::core::{
    OrderingGame, OrderingSnapshot, PlayerStats, SelectOutcome, Session, SessionSnapshot,
    SwapReport,
};
use crate::term::{FrameBuffer, GameView, OrderingView, Overlay, Viewport};
use crate::types::{GameAction, Position, SessionState, STATUS_MESSAGE_MS};

/// The game currently on screen
pub enum ActiveGame {
    Match3(Session),
    Ordering(OrderingGame),
}

impl ActiveGame {
    pub fn kind(&self) -> GameKind {
        match self {
            ActiveGame::Match3(_) => GameKind::Match3,
            ActiveGame::Ordering(_) => GameKind::Ordering,
        }
    }

    pub fn state(&self) -> SessionState {
        match self {
            ActiveGame::Match3(s) => s.state(),
            ActiveGame::Ordering(g) => g.state(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct StatusMessage {
    text: String,
    remaining_ms: u32,
}

pub struct App {
    game: ActiveGame,
    cursor: Position,
    status: Option<StatusMessage>,
    stats: PlayerStats,
    /// Set once the current game's result is in `stats`
    recorded: bool,
    board_view: GameView,
    ordering_view: OrderingView,
    session_snap: SessionSnapshot,
    ordering_snap: OrderingSnapshot,
}

impl App {
    /// Build and start the chosen game from config
    pub fn new(kind: GameKind, config: &AppConfig) -> Self {
        match kind {
            GameKind::Match3 => {
                let mut session = Session::new(config.session.clone());
                session.start();
                Self::with_session(session)
            }
            GameKind::Ordering => {
                let mut game = OrderingGame::new(config.ordering.clone());
                game.start();
                Self::with_ordering(game)
            }
        }
    }

    pub fn with_session(session: Session) -> Self {
        Self::with_game(ActiveGame::Match3(session))
    }

    pub fn with_ordering(game: OrderingGame) -> Self {
        Self::with_game(ActiveGame::Ordering(game))
    }

    fn with_game(game: ActiveGame) -> Self {
        let mut app = Self {
            game,
            cursor: Position::new(0, 0),
            status: None,
            stats: PlayerStats::new(),
            recorded: false,
            board_view: GameView::default(),
            ordering_view: OrderingView::default(),
            session_snap: SessionSnapshot::default(),
            ordering_snap: OrderingSnapshot::default(),
        };
        app.record_if_finished();
        app
    }

    pub fn game(&self) -> &ActiveGame {
        &self.game
    }

    pub fn cursor(&self) -> Position {
        self.cursor
    }

    pub fn stats(&self) -> &PlayerStats {
        &self.stats
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_ref().map(|s| s.text.as_str())
    }

    fn set_status(&mut self, text: impl Into<String>) {
        self.status = Some(StatusMessage {
            text: text.into(),
            remaining_ms: STATUS_MESSAGE_MS,
        });
    }

    /// Apply one player action to the active game
    pub fn apply_action(&mut self, action: GameAction) {
        if action == GameAction::Restart {
            self.restart();
            return;
        }
        match self.game {
            ActiveGame::Match3(_) => self.apply_match3(action),
            ActiveGame::Ordering(_) => self.apply_ordering(action),
        }
        self.record_if_finished();
    }

    fn apply_match3(&mut self, action: GameAction) {
        let ActiveGame::Match3(session) = &mut self.game else {
            return;
        };

        if let Some((dr, dc)) = action.cursor_delta() {
            if let Some(next) = self.cursor.offset(dr, dc) {
                self.cursor = next;
            }
            return;
        }

        match action {
            GameAction::Select | GameAction::Confirm => match session.select_cell(self.cursor) {
                Ok(SelectOutcome::Selected(_)) | Ok(SelectOutcome::Deselected) => {}
                Ok(SelectOutcome::Swapped(report)) => {
                    let text = swap_message(&report, session.score());
                    self.set_status(text);
                }
                Err(err) => {
                    debug!(%err, "selection refused");
                    self.set_status(err.to_string());
                }
            },
            GameAction::Cancel => session.clear_selection(),
            _ => {}
        }
    }

    fn apply_ordering(&mut self, action: GameAction) {
        let ActiveGame::Ordering(game) = &mut self.game else {
            return;
        };
        let slots = game.numbers().len() as u8;

        let result = match action {
            GameAction::CursorLeft => {
                self.cursor.col = self.cursor.col.saturating_sub(1);
                Ok(None)
            }
            GameAction::CursorRight => {
                if self.cursor.col + 1 < slots {
                    self.cursor.col += 1;
                }
                Ok(None)
            }
            GameAction::CursorUp | GameAction::CursorDown => Ok(None),
            GameAction::Pick(slot) => game.pick(slot).map(|_| None),
            GameAction::Select => game.pick(self.cursor.col).map(|_| None),
            GameAction::Cancel => game.reset_round().map(|_| None),
            GameAction::Confirm => match game.verdict() {
                None => game.check().map(|result| {
                    Some(if result.correct {
                        format!("Correct! +{}", result.points)
                    } else {
                        "Not quite. Enter for the next round".to_string()
                    })
                }),
                Some(_) => game.next_round().map(|state| {
                    (state == SessionState::Ended)
                        .then(|| format!("Final score {}", game.score()))
                }),
            },
            GameAction::Restart => Ok(None),
        };

        match result {
            Ok(Some(text)) => self.set_status(text),
            Ok(None) => {}
            Err(err) => {
                debug!(%err, "ordering action refused");
                self.set_status(err.to_string());
            }
        }
    }

    fn restart(&mut self) {
        match &mut self.game {
            ActiveGame::Match3(session) => session.restart(),
            ActiveGame::Ordering(game) => game.restart(),
        }
        self.cursor = Position::new(0, 0);
        self.status = None;
        self.recorded = false;
        self.record_if_finished();
    }

    fn record_if_finished(&mut self) {
        if self.recorded || self.game.state() != SessionState::Ended {
            return;
        }
        match &self.game {
            ActiveGame::Match3(session) => {
                self.stats.record_match3(session.score());
                info!(score = session.score(), "match-3 result recorded");
            }
            ActiveGame::Ordering(game) => {
                self.stats
                    .record_ordering(game.score(), game.correct_rounds(), game.checked_rounds());
                info!(score = game.score(), correct = game.correct_rounds(), "ordering result recorded");
            }
        }
        self.recorded = true;
    }

    /// Advance timers by `elapsed_ms`
    pub fn tick(&mut self, elapsed_ms: u32) {
        if let ActiveGame::Match3(session) = &mut self.game {
            session.tick(elapsed_ms);
        }
        if let Some(status) = &mut self.status {
            status.remaining_ms = status.remaining_ms.saturating_sub(elapsed_ms);
            if status.remaining_ms == 0 {
                self.status = None;
            }
        }
    }

    /// Render the active game into a reusable framebuffer
    pub fn render_into(&mut self, viewport: Viewport, fb: &mut FrameBuffer) {
        let overlay = Overlay {
            cursor: Some(self.cursor),
            status: self.status.as_ref().map(|s| s.text.as_str()),
        };
        match &self.game {
            ActiveGame::Match3(session) => {
                session.snapshot_into(&mut self.session_snap);
                self.board_view
                    .render_into(&self.session_snap, &overlay, viewport, fb);
            }
            ActiveGame::Ordering(game) => {
                game.snapshot_into(&mut self.ordering_snap);
                self.ordering_view
                    .render_into(&self.ordering_snap, &overlay, viewport, fb);
            }
        }
    }
}

fn swap_message(report: &SwapReport, score: u32) -> String {
    if report.ended {
        format!("+{} Final score {}", report.score_delta, score)
    } else if report.steps > 1 {
        format!("Cascade x{}! +{}", report.steps, report.score_delta)
    } else {
        format!("+{}", report.score_delta)
    }
}
