//! Structural invariants of the search tree across iterations

use std::collections::HashSet;

use noughts_mcts::{
    mcts::{Mcts, NodeId, SearchConfig, SearchTree},
    ports::Position,
    tictactoe::{BoardState, Player},
};

const PENALTY: f64 = -100.0;

fn config(seed: u64) -> SearchConfig {
    SearchConfig::new(80)
        .with_seed(seed)
        .with_rollouts_per_leaf(10)
        .with_forced_loss_penalty(PENALTY)
}

fn assert_well_formed(tree: &SearchTree<BoardState>) {
    for (id, node) in tree.iter() {
        let legal = node.state.legal_moves();
        assert!(node.children.len() <= legal.len());

        let mut seen = HashSet::new();
        for (&action, &child) in &node.children {
            assert!(legal.contains(&action), "child {action} not legal");
            assert!(seen.insert(child), "child node shared");
            let child_node = tree.node(child);
            assert_eq!(child_node.parent, Some(id));
            assert_eq!(child_node.state, node.state.apply_move(action));
        }
        assert_eq!(node.is_fully_expanded(), node.children.len() == legal.len());
    }
    assert_eq!(tree.root().parent, None);
}

fn snapshot(tree: &SearchTree<BoardState>) -> Vec<(u32, f64)> {
    tree.iter().map(|(_, node)| (node.visits, node.value)).collect()
}

fn check_iterations(board: BoardState, seed: u64) {
    let mut search = Mcts::new(board, config(seed)).unwrap();

    for iteration in 1..=80 {
        let before = snapshot(search.tree());
        let report = search.iterate();
        let tree = search.tree();
        let path: HashSet<NodeId> = tree.path_to_root(report.simulated).into_iter().collect();

        assert_eq!(tree.root().visits, iteration);
        assert_eq!(report.depth + 1, path.len());

        for (id, node) in tree.iter() {
            let (visits, value) = before.get(id.index()).copied().unwrap_or((0, 0.0));
            if !path.contains(&id) {
                assert_eq!((node.visits, node.value), (visits, value));
                continue;
            }

            assert_eq!(node.visits, visits + 1);
            let expected = if id == report.simulated && report.forced_loss {
                PENALTY + report.mean
            } else {
                value + report.mean
            };
            assert!(
                (node.value - expected).abs() < 1e-9,
                "node {} value {} expected {expected}",
                id.index(),
                node.value
            );
        }

        assert!((0.0..=1.0).contains(&report.mean));
        assert!(report.rewards <= report.rollouts);
    }

    assert_well_formed(search.tree());
}

#[test]
fn test_invariants_from_empty_board() {
    for seed in [0, 7, 99] {
        check_iterations(BoardState::new(), seed);
    }
}

#[test]
fn test_invariants_with_o_to_move() {
    check_iterations(BoardState::new_with_player(Player::O), 3);
    check_iterations(BoardState::from_string("X...O..X.", None).unwrap(), 5);
}

#[test]
fn test_invariants_near_end_of_game() {
    // Three empty cells; the tree exhausts them quickly
    check_iterations(BoardState::from_string("XOXOXO...", None).unwrap(), 11);
}

#[test]
fn test_child_visits_account_for_parent_visits() {
    let mut search = Mcts::new(BoardState::new(), config(21)).unwrap();
    search.search();

    // A non-terminal root is never simulated in place
    let tree = search.tree();
    let through_children: u32 = tree
        .root()
        .children
        .values()
        .map(|&child| tree.node(child).visits)
        .sum();
    assert_eq!(through_children, tree.root().visits);
    assert!(tree.len() <= 81);
}
