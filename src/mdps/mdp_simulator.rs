use super::{mdp::Mdp, tables::Policy};
use crate::envs::frozen_lake::{Cell, State};
use crate::error::{invalid_parameter, LakeError, Result};
use rand::distributions::WeightedIndex;
use rand::prelude::*;
use std::rc::Rc;
use tracing::{debug, info, warn};

pub trait Weighted<S> {
    fn s(&self) -> S;

    fn p(&self) -> f64;
}

/// Draws one successor from `ts` in proportion to the weights.
pub fn pick_next<T, S, R>(rng: &mut R, ts: &[T]) -> Result<S>
where
    T: Weighted<S>,
    R: Rng + ?Sized,
{
    let dist = WeightedIndex::new(ts.iter().map(|item| item.p()))?;
    Ok(ts[dist.sample(rng)].s())
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rollout {
    pub success: bool,
    pub total_reward: f64,
    pub steps: usize,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Evaluation {
    pub success_rate: f64,
    pub average_return: f64,
}

/// Monte Carlo estimate of how a fixed policy fares from the start state.
pub struct PolicyEvaluator {
    mdp: Rc<dyn Mdp>,
    max_steps: usize,
}

impl PolicyEvaluator {
    pub const DEFAULT_MAX_STEPS: usize = 100_000;

    pub fn new(mdp: Rc<dyn Mdp>, max_steps: usize) -> Self {
        Self { mdp, max_steps }
    }

    /// Follows `policy` until a target or hole is reached.
    pub fn rollout<R: Rng + ?Sized>(&self, policy: &Policy, rng: &mut R) -> Result<Rollout> {
        let lake = self.mdp.lake();
        let rewards = self.mdp.rewards();
        let mut s = lake.start();
        let mut total_reward = 0.;
        let mut steps = 0;

        loop {
            if let Some(cell @ (Cell::Target | Cell::Hole)) = lake.cell(s) {
                return Ok(Rollout {
                    success: cell == Cell::Target,
                    total_reward: total_reward + rewards.reward(lake, s),
                    steps,
                });
            }

            if steps == self.max_steps {
                warn!(max_steps = self.max_steps, "rollout did not reach a terminal cell");
                return Err(LakeError::StepBudgetExceeded(self.max_steps));
            }

            let i = lake.free_index(s)?;
            let a = *policy
                .as_slice()
                .get(i)
                .ok_or(LakeError::MissingAction(s))?;
            let ts = self.mdp.transitions(s, a)?;
            s = pick_next::<_, State, _>(rng, &ts)?;
            total_reward += rewards.living_reward;
            steps += 1;
        }
    }

    /// Runs `trials` rollouts; returns the fraction reaching a target and the mean return.
    pub fn evaluate<R: Rng + ?Sized>(
        &self,
        policy: &Policy,
        trials: usize,
        rng: &mut R,
    ) -> Result<Evaluation> {
        if trials == 0 {
            return Err(invalid_parameter("trials", "must be positive"));
        }

        let mut successes = 0;
        let mut total_reward = 0.;
        for t in 0..trials {
            let r = self.rollout(policy, rng)?;
            debug!(trial = t, success = r.success, steps = r.steps, reward = r.total_reward);
            if r.success {
                successes += 1;
            }
            total_reward += r.total_reward;
        }

        let eval = Evaluation {
            success_rate: successes as f64 / trials as f64,
            average_return: total_reward / trials as f64,
        };
        info!(
            trials,
            success_rate = eval.success_rate,
            average_return = eval.average_return,
            "policy evaluated"
        );

        Ok(eval)
    }
}
