//! Random playouts used to estimate the value of a node.

use std::collections::HashSet;

use log::trace;
use rand::Rng;

use crate::ports::{Outcome, Position, Status};

/// Reward for a finished game the guarded mark lost
pub const WIN_REWARD: f64 = 1.0;
/// Reward for a drawn game
pub const DRAW_REWARD: f64 = 0.5;
/// Reward for a finished game the guarded mark won
pub const LOSS_REWARD: f64 = 0.0;

/// Result of a single rollout attempt
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RolloutOutcome {
    /// The playout reached a terminal position
    Reward(f64),
    /// The guarded mark had a winning reply available during the playout
    ForcedLoss,
    /// The playout could not find a fresh move (or any move at all)
    NoProgress,
}

impl RolloutOutcome {
    /// The numeric reward, if the playout finished normally
    pub fn reward(self) -> Option<f64> {
        match self {
            RolloutOutcome::Reward(value) => Some(value),
            RolloutOutcome::ForcedLoss | RolloutOutcome::NoProgress => None,
        }
    }
}

/// Reward of a finished game seen from the side opposing `guarded`.
pub fn terminal_reward<P: PartialEq>(outcome: &Outcome<P>, guarded: &P) -> f64 {
    match outcome {
        Outcome::Draw => DRAW_REWARD,
        Outcome::Win(winner) if winner != guarded => WIN_REWARD,
        Outcome::Win(_) => LOSS_REWARD,
    }
}

/// Whether `guarded`, if handed the move in `state`, could win with any of
/// the legal moves there.
pub fn guarded_threat<P: Position>(state: &P, guarded: P::Player) -> bool {
    let probe = state.with_to_move(guarded);
    probe.legal_moves().into_iter().any(|mv| {
        matches!(
            probe.apply_move(mv).status(),
            Status::Finished(Outcome::Win(winner)) if winner == guarded
        )
    })
}

/// One random playout.
///
/// Every chosen move extends the rollout's path; a candidate whose extended
/// path was already produced earlier in the same playout is redrawn, up to
/// `retry_limit` times per step. Before each move is played the position is
/// scanned for a winning reply by the guarded mark.
#[derive(Debug)]
pub struct Rollout<P: Position> {
    guarded: P::Player,
    retry_limit: usize,
    path: Vec<P::Action>,
    seen: HashSet<Vec<P::Action>>,
    draws: usize,
}

impl<P: Position> Rollout<P> {
    pub fn new(guarded: P::Player, retry_limit: usize) -> Self {
        Rollout {
            guarded,
            retry_limit,
            path: Vec::new(),
            seen: HashSet::new(),
            draws: 0,
        }
    }

    /// Moves played so far
    pub fn plies(&self) -> usize {
        self.path.len()
    }

    /// Random candidates drawn so far, including rejected ones
    pub fn draws(&self) -> usize {
        self.draws
    }

    /// Play from `start` until the game ends or the rollout is abandoned.
    pub fn run<R: Rng + ?Sized>(&mut self, start: &P, rng: &mut R) -> RolloutOutcome {
        let mut state = start.clone();
        loop {
            if let Status::Finished(outcome) = state.status() {
                return RolloutOutcome::Reward(terminal_reward(&outcome, &self.guarded));
            }

            let Some(mv) = self.choose_move(&state, rng) else {
                trace!("rollout stalled after {} plies", self.plies());
                return RolloutOutcome::NoProgress;
            };

            if guarded_threat(&state, self.guarded) {
                trace!("rollout hit a forced loss after {} plies", self.plies());
                return RolloutOutcome::ForcedLoss;
            }

            state = state.apply_move(mv);
        }
    }

    /// Draw a legal move whose extended path is new to this rollout.
    fn choose_move<R: Rng + ?Sized>(&mut self, state: &P, rng: &mut R) -> Option<P::Action> {
        let moves = state.legal_moves();
        if moves.is_empty() {
            return None;
        }

        for _ in 0..=self.retry_limit {
            self.draws += 1;
            let mv = moves[rng.random_range(0..moves.len())];
            self.path.push(mv);
            if self.seen.insert(self.path.clone()) {
                return Some(mv);
            }
            self.path.pop();
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;
    use crate::tictactoe::{BoardState, Player};

    #[test]
    fn test_terminal_reward_encoding() {
        assert_eq!(terminal_reward(&Outcome::Win(Player::X), &Player::O), 1.0);
        assert_eq!(terminal_reward(&Outcome::Draw, &Player::O), 0.5);
        assert_eq!(terminal_reward(&Outcome::Win(Player::O), &Player::O), 0.0);
    }

    #[test]
    fn test_finished_start_returns_reward_immediately() {
        let mut rng = StdRng::seed_from_u64(0);
        let won = BoardState::from_string("XXXOO....", None).unwrap();
        let mut rollout = Rollout::new(Player::O, 100);
        assert_eq!(rollout.run(&won, &mut rng), RolloutOutcome::Reward(1.0));
        assert_eq!(rollout.draws(), 0);

        let drawn = BoardState::from_string("XOXXOOOXX", None).unwrap();
        let mut rollout = Rollout::new(Player::O, 100);
        assert_eq!(rollout.run(&drawn, &mut rng), RolloutOutcome::Reward(0.5));
    }

    #[test]
    fn test_threat_by_guarded_mark_is_forced_loss() {
        // O owns 3 and 4 with 5 open, X to move
        let board = BoardState::from_string("XX.OO.X..", Some(Player::O))
            .unwrap()
            .apply_move(7);
        assert!(guarded_threat(&board, Player::O));

        let mut rng = StdRng::seed_from_u64(9);
        let mut rollout = Rollout::new(Player::O, 100);
        assert_eq!(rollout.run(&board, &mut rng), RolloutOutcome::ForcedLoss);
        assert_eq!(rollout.plies(), 1);
    }

    #[test]
    fn test_threat_scan_ignores_other_side() {
        let board = BoardState::from_string("XX.OO....", Some(Player::X)).unwrap();
        assert!(guarded_threat(&board, Player::X));
        let blocked = BoardState::from_string("XXOOO.X..", Some(Player::X)).unwrap();
        assert!(guarded_threat(&blocked, Player::O));
        assert!(!guarded_threat(&blocked, Player::X));
    }

    #[test]
    fn test_exhausted_retries_is_no_progress() {
        let mut rng = StdRng::seed_from_u64(3);
        let board = BoardState::new();
        let mut rollout = Rollout::<BoardState>::new(Player::O, 100);
        for mv in board.legal_moves() {
            rollout.seen.insert(vec![mv]);
        }

        assert_eq!(rollout.run(&board, &mut rng), RolloutOutcome::NoProgress);
        assert_eq!(rollout.draws(), 101);
        assert_eq!(rollout.plies(), 0);
    }

    #[test]
    fn test_rollouts_terminate_within_bound() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..200 {
            let mut rollout = Rollout::new(Player::O, 100);
            let outcome = rollout.run(&BoardState::new(), &mut rng);
            assert!(rollout.plies() <= 9);
            assert!(rollout.draws() <= 9 * 101);
            if let Some(reward) = outcome.reward() {
                assert!([0.0, 0.5, 1.0].contains(&reward));
            }
        }
    }

    #[derive(Debug, Clone)]
    struct Stuck;

    impl Position for Stuck {
        type Action = u8;
        type Player = bool;

        fn status(&self) -> Status<bool> {
            Status::Ongoing
        }
        fn legal_moves(&self) -> Vec<u8> {
            Vec::new()
        }
        fn apply_move(&self, _action: u8) -> Self {
            unreachable!("no legal moves")
        }
        fn to_move(&self) -> bool {
            true
        }
        fn opponent(player: bool) -> bool {
            !player
        }
        fn pass_turn(&self) -> Self {
            Stuck
        }
    }

    #[test]
    fn test_no_legal_moves_before_end_is_no_progress() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut rollout = Rollout::new(false, 100);
        assert_eq!(rollout.run(&Stuck, &mut rng), RolloutOutcome::NoProgress);
    }
}
