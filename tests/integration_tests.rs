//! Integration tests for the application layer: actions in, games and stats out

use tui_candy::app::{ActiveGame, App};
use tui_candy::cli::GameKind;
use tui_candy::config::AppConfig;
use tui_candy::core::{Board, OrderingConfig, OrderingGame, Session, SessionConfig};
use tui_candy::term::{FrameBuffer, Viewport};
use tui_candy::types::{GameAction, Position, SessionState, Symbol};

fn six_cell_board() -> Board {
    let mut board = Board::from_fn(|pos| Symbol::from_index((pos.row + 2 * pos.col) % 6));
    let row6 = [Symbol::Chocolate, Symbol::Chocolate, Symbol::Donut];
    let row7 = [Symbol::Donut, Symbol::Donut, Symbol::Chocolate];
    for col in 0..3u8 {
        board.set(Position::new(6, col), Some(row6[col as usize]));
        board.set(Position::new(7, col), Some(row7[col as usize]));
    }
    board
}

fn press(app: &mut App, action: GameAction, times: usize) {
    for _ in 0..times {
        app.apply_action(action);
    }
}

fn ascending_picks(app: &App) -> Vec<GameAction> {
    let ActiveGame::Ordering(game) = app.game() else {
        panic!("expected the ordering game");
    };
    let mut slots: Vec<(u32, u8)> = game
        .numbers()
        .iter()
        .enumerate()
        .map(|(i, &n)| (n, i as u8))
        .collect();
    slots.sort_unstable();
    slots.into_iter().map(|(_, slot)| GameAction::Pick(slot)).collect()
}

#[test]
fn test_app_starts_requested_game() {
    let config = AppConfig::default();

    let app = App::new(GameKind::Match3, &config);
    assert_eq!(app.game().kind(), GameKind::Match3);
    assert_eq!(app.game().state(), SessionState::Playing);

    let app = App::new(GameKind::Ordering, &config);
    assert_eq!(app.game().kind(), GameKind::Ordering);
    assert_eq!(app.game().state(), SessionState::Playing);
}

#[test]
fn test_keyboard_swap_ends_game_and_records_once() {
    let mut session = Session::new(SessionConfig {
        moves: 1,
        ..SessionConfig::default()
    });
    session.start_with_board(six_cell_board());
    let mut app = App::with_session(session);

    press(&mut app, GameAction::CursorDown, 6);
    press(&mut app, GameAction::CursorRight, 2);
    assert_eq!(app.cursor(), Position::new(6, 2));
    app.apply_action(GameAction::Select);
    app.apply_action(GameAction::CursorDown);
    app.apply_action(GameAction::Confirm);

    let ActiveGame::Match3(session) = app.game() else {
        panic!("expected match-3");
    };
    assert!(session.is_ended());
    assert!(session.score() >= 60);
    let score = session.score();

    assert_eq!(app.stats().games_played, 1);
    assert_eq!(app.stats().best_match3, score);
    assert!(app.status().is_some());

    // More input after the end does not record again
    app.apply_action(GameAction::Select);
    app.apply_action(GameAction::Confirm);
    assert_eq!(app.stats().games_played, 1);
    assert_eq!(app.status(), Some("no game in progress"));
}

#[test]
fn test_restart_starts_fresh_game() {
    let mut session = Session::new(SessionConfig {
        moves: 1,
        ..SessionConfig::default()
    });
    session.start_with_board(six_cell_board());
    let mut app = App::with_session(session);
    press(&mut app, GameAction::CursorDown, 6);
    press(&mut app, GameAction::CursorRight, 2);
    app.apply_action(GameAction::Select);
    app.apply_action(GameAction::CursorDown);
    app.apply_action(GameAction::Select);
    assert_eq!(app.game().state(), SessionState::Ended);

    app.apply_action(GameAction::Restart);
    assert_eq!(app.game().state(), SessionState::Playing);
    assert_eq!(app.cursor(), Position::new(0, 0));
    assert_eq!(app.status(), None);
    assert_eq!(app.stats().games_played, 1);
}

#[test]
fn test_ordering_game_through_actions() {
    let game = {
        let mut g = OrderingGame::new(OrderingConfig {
            rounds: 2,
            ..OrderingConfig::default()
        });
        g.start();
        g
    };
    let mut app = App::with_ordering(game);

    for action in ascending_picks(&app) {
        app.apply_action(action);
    }
    app.apply_action(GameAction::Confirm);
    assert_eq!(app.status(), Some("Correct! +20"));
    app.apply_action(GameAction::Confirm);

    // Second round picked with the cursor instead of digits
    let picks = ascending_picks(&app);
    for action in picks {
        let GameAction::Pick(slot) = action else { unreachable!() };
        press(&mut app, GameAction::CursorLeft, 9);
        press(&mut app, GameAction::CursorRight, slot as usize);
        app.apply_action(GameAction::Select);
    }
    app.apply_action(GameAction::Confirm);
    app.apply_action(GameAction::Confirm);

    assert_eq!(app.game().state(), SessionState::Ended);
    assert_eq!(app.status(), Some("Final score 40"));
    let stats = app.stats();
    assert_eq!(stats.games_played, 1);
    assert_eq!(stats.best_ordering, 40);
    assert_eq!(stats.correct_rounds, 2);
    assert_eq!(stats.total_rounds, 2);
    assert_eq!(stats.accuracy_percent(), 100);
}

#[test]
fn test_app_renders_both_games() {
    let config = AppConfig::default();
    let viewport = Viewport::new(60, 20);
    let mut fb = FrameBuffer::new(viewport.width, viewport.height);

    let mut app = App::new(GameKind::Match3, &config);
    app.render_into(viewport, &mut fb);
    // Board and side panel (30 columns) centered together
    assert_eq!(fb.get(15, 4).unwrap().ch, '┌');

    let mut app = App::new(GameKind::Ordering, &config);
    app.render_into(viewport, &mut fb);
    let text: String = fb.cells().iter().map(|c| c.ch).collect();
    assert!(text.contains("ORDER THE NUMBERS"));
}
