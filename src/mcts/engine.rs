//! Search driver: runs iterations against a tree and answers best-move queries.

use log::{debug, info};
use rand::{SeedableRng, rngs::StdRng};
use serde::Serialize;

use super::{
    config::SearchConfig,
    node::NodeId,
    rollout::{Rollout, RolloutOutcome},
    tree::SearchTree,
};
use crate::{Error, Result, ports::Position};

/// Running totals over every iteration of a search
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SearchStats {
    pub iterations: usize,
    pub rollouts: usize,
    pub forced_losses: usize,
    pub stalled: usize,
}

/// What a single iteration did
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IterationReport {
    /// Node the rollouts were run from
    pub simulated: NodeId,
    /// Whether `simulated` was created by this iteration
    pub expanded: bool,
    /// Distance of `simulated` from the root
    pub depth: usize,
    /// Rollout attempts made, including the one that stopped the batch
    pub rollouts: usize,
    /// Rollouts that produced a numeric reward
    pub rewards: usize,
    /// Value added to every node on the path back to the root
    pub mean: f64,
    /// A forced-loss rollout reset `simulated` to the penalty value
    pub forced_loss: bool,
    /// A rollout could not make progress
    pub stalled: bool,
}

/// Statistics for one child of the root
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChildSummary<A> {
    pub action: A,
    pub visits: u32,
    pub value: f64,
    pub mean: Option<f64>,
}

/// Monte-Carlo Tree Search over a [`Position`].
///
/// Each iteration selects down the tree by UCT, expands one untried move,
/// runs a batch of rollouts from the new node and adds their mean reward to
/// every node on the path back to the root. Rewards are scored against the
/// *guarded mark*, the opponent of the side to move at the root, so the
/// root's children carry values from the searching side's point of view.
///
/// # Examples
///
/// ```
/// use noughts_mcts::{mcts::{Mcts, SearchConfig}, ports::Position, tictactoe::BoardState};
///
/// let board = BoardState::new();
/// let mut search = Mcts::new(board, SearchConfig::new(50).with_seed(1).with_rollouts_per_leaf(10))?;
/// search.search();
/// let mv = search.best_move()?;
/// assert!(board.legal_moves().contains(&mv));
/// # Ok::<(), noughts_mcts::Error>(())
/// ```
#[derive(Debug)]
pub struct Mcts<P: Position> {
    tree: SearchTree<P>,
    config: SearchConfig,
    guarded: P::Player,
    rng: StdRng,
    stats: SearchStats,
}

impl<P: Position> Mcts<P> {
    /// Create a search rooted at `initial`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] if `config` does not validate.
    pub fn new(initial: P, config: SearchConfig) -> Result<Self> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::seed_from_u64(rand::random::<u64>()),
        };
        let guarded = P::opponent(initial.to_move());

        Ok(Mcts {
            tree: SearchTree::new(initial),
            config,
            guarded,
            rng,
            stats: SearchStats::default(),
        })
    }

    pub fn tree(&self) -> &SearchTree<P> {
        &self.tree
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    /// Mark whose wins count against the searching side
    pub fn guarded_mark(&self) -> P::Player {
        self.guarded
    }

    pub fn root_state(&self) -> &P {
        &self.tree.root().state
    }

    /// Run the configured number of iterations.
    pub fn search(&mut self) -> SearchStats {
        for _ in 0..self.config.iterations {
            self.iterate();
        }
        info!(
            "search finished: {} iterations, {} nodes, {} rollouts ({} forced losses, {} stalled)",
            self.stats.iterations,
            self.tree.len(),
            self.stats.rollouts,
            self.stats.forced_losses,
            self.stats.stalled
        );
        self.stats
    }

    /// Run one select / expand / simulate / backpropagate cycle.
    pub fn iterate(&mut self) -> IterationReport {
        let leaf = self.tree.select(NodeId::ROOT, self.config.exploration);

        let (simulated, expanded) = if self.tree.node(leaf).is_fully_expanded() {
            (leaf, false)
        } else {
            match self.tree.expand(leaf, &mut self.rng) {
                Some(child) => (child, true),
                None => (leaf, false),
            }
        };

        let mut report = self.simulate(simulated);
        report.expanded = expanded;
        self.tree.backpropagate(simulated, report.mean);

        self.stats.iterations += 1;
        self.stats.rollouts += report.rollouts;
        self.stats.forced_losses += usize::from(report.forced_loss);
        self.stats.stalled += usize::from(report.stalled);

        debug!(
            "iteration {}: node {} depth {} mean {:.4} over {}/{} rollouts{}{}",
            self.stats.iterations,
            simulated.index(),
            report.depth,
            report.mean,
            report.rewards,
            report.rollouts,
            if report.forced_loss { ", forced loss" } else { "" },
            if report.stalled { ", stalled" } else { "" },
        );
        report
    }

    /// Run the rollout batch for `id`, applying the forced-loss penalty.
    fn simulate(&mut self, id: NodeId) -> IterationReport {
        let state = self.tree.node(id).state.clone();
        let mut report = IterationReport {
            simulated: id,
            expanded: false,
            depth: self.tree.depth(id),
            rollouts: 0,
            rewards: 0,
            mean: 0.0,
            forced_loss: false,
            stalled: false,
        };
        let mut total = 0.0;

        for _ in 0..self.config.rollouts() {
            report.rollouts += 1;
            let mut rollout = Rollout::new(self.guarded, self.config.retry_limit);
            match rollout.run(&state, &mut self.rng) {
                RolloutOutcome::Reward(reward) => {
                    total += reward;
                    report.rewards += 1;
                }
                RolloutOutcome::ForcedLoss => {
                    self.tree.node_mut(id).value = self.config.forced_loss_penalty;
                    report.forced_loss = true;
                    break;
                }
                RolloutOutcome::NoProgress => {
                    report.stalled = true;
                    break;
                }
            }
        }

        if report.rewards > 0 {
            report.mean = total / report.rewards as f64;
        }
        report
    }

    /// Root child with the highest mean value, first one on ties.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyTree`] when the root has no visited children,
    /// i.e. `search` was never run or could not expand anything.
    pub fn best_move(&self) -> Result<P::Action> {
        let mut best: Option<(P::Action, f64)> = None;
        for (&action, &child) in &self.tree.root().children {
            let Some(mean) = self.tree.node(child).mean() else {
                continue;
            };
            match best {
                Some((_, best_mean)) if mean <= best_mean => {}
                _ => best = Some((action, mean)),
            }
        }
        best.map(|(action, _)| action).ok_or(Error::EmptyTree)
    }

    /// Statistics for each child of the root, in action order
    pub fn child_summaries(&self) -> Vec<ChildSummary<P::Action>> {
        self.tree
            .root()
            .children
            .iter()
            .map(|(&action, &child)| {
                let node = self.tree.node(child);
                ChildSummary {
                    action,
                    visits: node.visits,
                    value: node.value,
                    mean: node.mean(),
                }
            })
            .collect()
    }
}
