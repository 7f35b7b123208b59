//! Tests for the round and game lifecycle.

use tictactoe_minimax::{
    BoardState, Control, Game, GameError, Move, NullRenderer, Renderer, Side, Starter, Turn,
};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Event {
    Placed(Move, Side),
    Cleared,
    Round(u32),
    Score(Side, u32),
    TurnOf(Side),
    Won(Side),
    Tied,
}

#[derive(Debug, Default)]
struct Recorder {
    events: Vec<Event>,
}

impl Recorder {
    fn placements(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, Event::Placed(..)))
            .count()
    }
}

impl Renderer for Recorder {
    fn piece_placed(&mut self, mv: Move, side: Side) {
        self.events.push(Event::Placed(mv, side));
    }

    fn board_cleared(&mut self) {
        self.events.push(Event::Cleared);
    }

    fn round_updated(&mut self, rounds_played: u32) {
        self.events.push(Event::Round(rounds_played));
    }

    fn score_updated(&mut self, side: Side, rounds_won: u32) {
        self.events.push(Event::Score(side, rounds_won));
    }

    fn turn_changed(&mut self, side: Side) {
        self.events.push(Event::TurnOf(side));
    }

    fn round_won(&mut self, side: Side) {
        self.events.push(Event::Won(side));
    }

    fn round_tied(&mut self) {
        self.events.push(Event::Tied);
    }
}

fn mv(row: usize, col: usize) -> Move {
    Move::new(row, col).unwrap()
}

fn two_humans() -> Game<Recorder> {
    let mut game = Game::new(Control::Human, Control::Human, Recorder::default());
    game.new_game(Starter::X);
    game
}

/// X takes the top row while O plays the middle row.
fn x_wins_top_row(game: &mut Game<Recorder>) {
    for (row, col) in [(0, 0), (1, 0), (0, 1), (1, 1)] {
        assert!(matches!(game.play_human(mv(row, col)), Ok(Turn::Continue(_))));
    }
    assert_eq!(game.play_human(mv(0, 2)), Ok(Turn::Won(Side::X)));
}

#[test]
fn test_new_game_announces_scores_and_first_turn() {
    let game = two_humans();
    assert_eq!(game.current(), Side::X);
    assert_eq!(
        game.renderer().events,
        vec![
            Event::Round(0),
            Event::Score(Side::X, 0),
            Event::Score(Side::O, 0),
            Event::Cleared,
            Event::TurnOf(Side::X),
        ]
    );
}

#[test]
fn test_turns_alternate() {
    let mut game = two_humans();
    assert_eq!(game.play_human(mv(1, 1)), Ok(Turn::Continue(Side::O)));
    assert_eq!(game.play_human(mv(0, 0)), Ok(Turn::Continue(Side::X)));
    assert_eq!(*game.player(Side::X).pieces_played(), 1);
    assert_eq!(*game.player(Side::O).last_move(), Some(mv(0, 0)));
}

#[test]
fn test_occupied_cell_is_rejected_without_advancing() {
    let mut game = two_humans();
    game.play_human(mv(1, 1)).unwrap();
    let board_before = game.board().clone();

    assert_eq!(game.play_human(mv(1, 1)), Ok(Turn::Rejected));

    assert_eq!(game.current(), Side::O);
    assert_eq!(*game.player(Side::O).pieces_played(), 0);
    assert_eq!(game.board(), &board_before);
}

#[test]
fn test_win_ends_round_and_credits_winner() {
    let mut game = two_humans();
    x_wins_top_row(&mut game);

    assert!(game.is_round_over());
    assert_eq!(game.board().state(), BoardState::Won(Side::X));
    assert_eq!(game.rounds_played(), 1);
    assert_eq!(*game.player(Side::X).rounds_won(), 1);
    assert_eq!(*game.player(Side::O).rounds_won(), 0);

    let tail = &game.renderer().events[game.renderer().events.len() - 3..];
    assert_eq!(
        tail,
        &[Event::Round(1), Event::Score(Side::X, 1), Event::Won(Side::X)]
    );
    assert_eq!(game.play_human(mv(2, 2)), Err(GameError::RoundOver));
}

#[test]
fn test_tied_round_credits_nobody() {
    let mut game = two_humans();
    let moves = [
        (0, 0),
        (0, 1),
        (0, 2),
        (1, 1),
        (1, 0),
        (1, 2),
        (2, 1),
        (2, 0),
    ];
    for (row, col) in moves {
        game.play_human(mv(row, col)).unwrap();
    }
    assert_eq!(game.play_human(mv(2, 2)), Ok(Turn::Tied));
    assert_eq!(game.rounds_played(), 1);
    assert_eq!(*game.player(Side::X).rounds_won(), 0);
    assert_eq!(*game.player(Side::O).rounds_won(), 0);
    assert_eq!(game.renderer().events.last(), Some(&Event::Tied));
}

#[test]
fn test_new_round_keeps_scores_new_game_clears_them() {
    let mut game = two_humans();
    x_wins_top_row(&mut game);

    assert_eq!(game.new_round(Starter::O), Side::O);
    assert!(!game.is_round_over());
    assert_eq!(game.board().occupied(), 0);
    assert_eq!(*game.player(Side::X).rounds_won(), 1);
    assert_eq!(*game.player(Side::X).pieces_played(), 0);
    assert_eq!(*game.player(Side::X).last_move(), None);
    assert_eq!(game.rounds_played(), 1);

    game.new_game(Starter::X);
    assert_eq!(*game.player(Side::X).rounds_won(), 0);
    assert_eq!(game.rounds_played(), 0);
}

#[test]
fn test_computer_reply_renders_only_the_committed_move() {
    let mut game = Game::new(Control::Human, Control::Computer, Recorder::default());
    game.new_round(Starter::X);

    assert_eq!(game.play_human(mv(0, 0)), Ok(Turn::Continue(Side::O)));
    let (reply, turn) = game.play_computer().unwrap();

    assert_eq!(reply, Move::CENTER);
    assert_eq!(turn, Turn::Continue(Side::X));
    assert_eq!(game.renderer().placements(), 2);
    assert_eq!(game.board().occupied(), 2);
}

#[test]
fn test_wrong_controller_is_error() {
    let mut game = Game::new(Control::Human, Control::Computer, Recorder::default());
    game.new_round(Starter::X);
    assert_eq!(game.play_computer(), Err(GameError::NotComputerTurn(Side::X)));

    game.play_human(mv(2, 2)).unwrap();
    assert_eq!(game.play_human(mv(0, 0)), Err(GameError::NotHumanTurn(Side::O)));
}

#[test]
fn test_computer_against_computer_ties() {
    let mut game = Game::new(Control::Computer, Control::Computer, Recorder::default());
    game.new_round(Starter::X);

    let played = game.run_computer_turns().unwrap();

    assert_eq!(played.len(), 9);
    assert_eq!(played.last().map(|(_, turn)| *turn), Some(Turn::Tied));
    assert_eq!(game.board().state(), BoardState::Tied);
    assert_eq!(game.renderer().placements(), 9);
    assert_eq!(game.play_computer(), Err(GameError::RoundOver));
}

#[test]
fn test_run_computer_turns_stops_for_human() {
    let mut game = Game::new(Control::Human, Control::Computer, Recorder::default());
    game.new_round(Starter::O);

    let played = game.run_computer_turns().unwrap();
    assert_eq!(played.len(), 1);
    assert_eq!(game.current(), Side::X);
    assert!(game.run_computer_turns().unwrap().is_empty());
}

#[test]
fn test_set_control_hands_side_to_computer() {
    let mut game = two_humans();
    game.set_control(Side::X, Control::Computer);
    assert!(!*game.current_player().is_human());
    assert!(game.play_computer().is_ok());
}

#[test]
fn test_random_starter_picks_a_side() {
    let mut game = two_humans();
    let first = game.new_round(Starter::Random);
    assert_eq!(game.current(), first);
}

#[test]
fn test_game_runs_without_display() {
    let mut game = Game::new(Control::Human, Control::Computer, NullRenderer);
    game.new_game(Starter::O);
    let (opening, _) = game.play_computer().unwrap();
    assert_eq!(game.board().occupied(), 1);
    assert_eq!(*game.player(Side::O).last_move(), Some(opening));
    assert_eq!(game.current_player().to_string(), "Player X");
}
