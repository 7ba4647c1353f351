//! Full games between agents through the match runner

use noughts_mcts::{
    Error, Result,
    agents::{
        Agent, DefensiveAgent, MatchConfig, MatchRunner, MctsAgent, RandomAgent, play_game,
    },
    mcts::SearchConfig,
    ports::{Outcome, Position, Status},
    tictactoe::{BoardState, Game, Player},
};

fn mcts_agent(seed: u64) -> MctsAgent {
    MctsAgent::new(
        "MCTS",
        SearchConfig::new(40).with_seed(seed).with_rollouts_per_leaf(10),
    )
}

fn assert_consistent(game: &Game, first: Player) {
    let mut expected = first;
    for mv in &game.moves {
        assert_eq!(mv.player, expected);
        expected = expected.opponent();
    }

    let replayed: Vec<_> = game.state_sequence();
    let last = replayed.last().copied().unwrap_or(game.initial);
    assert_eq!(last, game.current_state());
    match last.status() {
        Status::Finished(outcome) => assert_eq!(game.outcome, Some(outcome)),
        Status::Ongoing => panic!("game stopped early"),
    }
}

#[test]
fn test_mcts_against_random_plays_full_games() {
    let runner = MatchRunner::new(MatchConfig {
        games: 4,
        seed: Some(8),
        agent_player: Player::X,
        first_player: Player::X,
    });

    let mut games = Vec::new();
    let summary = runner
        .run_with(&mut mcts_agent(1), &mut RandomAgent::new("Random"), |_, game| {
            games.push(game.clone())
        })
        .unwrap();

    assert_eq!(summary.total_games, 4);
    assert_eq!(summary.wins + summary.draws + summary.losses, 4);
    assert!((summary.win_rate + summary.draw_rate + summary.loss_rate - 1.0).abs() < 1e-12);
    for game in &games {
        assert_consistent(game, Player::X);
    }
}

#[test]
fn test_mcts_as_o_with_o_opening() {
    let runner = MatchRunner::new(MatchConfig {
        games: 3,
        seed: Some(2),
        agent_player: Player::O,
        first_player: Player::O,
    });

    let mut games = Vec::new();
    let summary = runner
        .run_with(
            &mut mcts_agent(4),
            &mut DefensiveAgent::new("Defensive"),
            |_, game| games.push(game.clone()),
        )
        .unwrap();

    assert_eq!(summary.agent_player, Player::O);
    assert_eq!(summary.agent, "MCTS");
    for game in &games {
        assert_eq!(game.initial, BoardState::new_with_player(Player::O));
        assert_consistent(game, Player::O);
    }
}

#[test]
fn test_seeded_matches_repeat() {
    let config = MatchConfig {
        games: 3,
        seed: Some(31),
        ..MatchConfig::default()
    };
    let play = || {
        MatchRunner::new(config.clone())
            .run(&mut mcts_agent(0), &mut RandomAgent::new("Random"))
            .unwrap()
    };
    assert_eq!(play(), play());
}

#[test]
fn test_mcts_finishes_a_won_position() {
    // X to move with the top row open at 2
    let start = BoardState::from_string("XX.OO....", None).unwrap();
    let game = play_game(
        start,
        &mut mcts_agent(6),
        &mut RandomAgent::with_seed("Random", 0),
    )
    .unwrap();
    assert_eq!(game.moves[0].position, 2);
    assert_eq!(game.outcome, Some(Outcome::Win(Player::X)));
}

struct OutOfRange;

impl Agent for OutOfRange {
    fn select_move(&mut self, _state: &BoardState) -> Result<usize> {
        Ok(9)
    }

    fn name(&self) -> &str {
        "OutOfRange"
    }
}

#[test]
fn test_illegal_move_stops_the_match() {
    let runner = MatchRunner::new(MatchConfig::default());
    let err = runner
        .run(&mut OutOfRange, &mut RandomAgent::new("Random"))
        .unwrap_err();
    assert!(matches!(
        err,
        Error::IllegalAgentMove { position: 9, ref agent } if agent == "OutOfRange"
    ));
}
