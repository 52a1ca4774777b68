use super::mdp_simulator::Weighted;
use crate::envs::frozen_lake::{Action, Cell, FrozenLake, State};
use crate::error::{LakeError, Result};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    pub next_state: State,
    pub probability: f64,
}

impl Weighted<State> for Transition {
    fn s(&self) -> State {
        self.next_state
    }

    fn p(&self) -> f64 {
        self.probability
    }
}

/// Actuator slip: the intended move succeeds with `success_prob`, otherwise the
/// agent drifts to one of the two perpendicular neighbours with equal odds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlipModel {
    success_prob: f64,
}

impl SlipModel {
    pub fn new(success_prob: f64) -> Self {
        Self { success_prob }
    }

    /// Successor distribution of taking `action` in the free state `state`.
    ///
    /// Moves that leave the grid or hit a blocked cell keep the agent in place;
    /// that mass is reported as a single trailing entry for `state`, omitted when zero.
    pub fn transitions(
        &self,
        lake: &FrozenLake,
        state: State,
        action: Action,
    ) -> Result<Vec<Transition>> {
        if !lake.is_free(state) {
            return Err(LakeError::NotFree(state));
        }

        let fail_prob = (1. - self.success_prob) / 2.;
        let [left, right] = action.perpendicular();
        let moves = [
            (action, self.success_prob),
            (left, fail_prob),
            (right, fail_prob),
        ];

        let mut ts = Vec::with_capacity(moves.len() + 1);
        let mut remain_p = 0.;
        for (a, p) in moves {
            match state
                .offset(a)
                .filter(|&s| !matches!(lake.cell(s), None | Some(Cell::Blocked)))
            {
                Some(next_state) => ts.push(Transition {
                    next_state,
                    probability: p,
                }),
                None => remain_p += p,
            }
        }

        if remain_p > 0. {
            ts.push(Transition {
                next_state: state,
                probability: remain_p,
            });
        }

        Ok(ts)
    }
}
