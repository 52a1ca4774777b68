use crate::envs::frozen_lake::{Action, State};
use crate::error::{invalid_parameter, LakeError, Result};
use crate::mdps::{mdp::Mdp, mdp_simulator::pick_next, tables::*};
use rand::prelude::*;
use std::rc::Rc;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QLearningParams {
    /// Initial learning rate.
    pub alpha: f64,
    /// Initial exploration rate.
    pub epsilon: f64,
    /// Number of episodes, each ending on a target or a hole.
    pub num_robots: usize,
    /// Total step budget across all episodes.
    pub max_steps: usize,
}

impl Default for QLearningParams {
    fn default() -> Self {
        Self {
            alpha: 0.6,
            epsilon: 0.6,
            num_robots: 60,
            max_steps: 10_000_000,
        }
    }
}

impl QLearningParams {
    pub fn validate(&self) -> Result<()> {
        if !(self.alpha > 0. && self.alpha <= 1.) {
            return Err(invalid_parameter(
                "alpha",
                format!("must lie in (0, 1], got {}", self.alpha),
            ));
        }
        if !(0.0..=1.0).contains(&self.epsilon) {
            return Err(invalid_parameter(
                "epsilon",
                format!("must lie in [0, 1], got {}", self.epsilon),
            ));
        }
        if self.num_robots == 0 {
            return Err(invalid_parameter("num_robots", "must be positive"));
        }
        Ok(())
    }
}

/// Linear decay of the learning and exploration rates, clamped at a tenth of
/// their initial values.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Annealing {
    alpha: f64,
    epsilon: f64,
    alpha_floor: f64,
    epsilon_floor: f64,
    decay: f64,
}

impl Annealing {
    fn new(alpha: f64, epsilon: f64, num_robots: usize) -> Self {
        Self {
            alpha,
            epsilon,
            alpha_floor: 0.1 * alpha,
            epsilon_floor: 0.1 * epsilon,
            decay: 1. / num_robots as f64,
        }
    }

    /// Decays both rates by one step once fewer than 20% of `n` episodes remain.
    fn step(&mut self, remaining: usize, n: usize) -> bool {
        if remaining as f64 >= 0.2 * n as f64 {
            return false;
        }
        self.alpha = (self.alpha - self.decay).max(self.alpha_floor);
        self.epsilon = (self.epsilon - self.decay).max(self.epsilon_floor);
        true
    }
}

/// Tabular one-step Q-learning over a single trajectory that restarts at the
/// lake's start state whenever a terminal cell is reached.
///
/// Once fewer than 20% of the episodes remain, alpha and epsilon decay by
/// `1 / num_robots` per step down to a tenth of their initial values.
pub struct QLearning {
    mdp: Rc<dyn Mdp>,
    params: QLearningParams,
}

impl QLearning {
    pub fn new(mdp: Rc<dyn Mdp>, params: QLearningParams) -> Self {
        Self { mdp, params }
    }

    pub fn exec<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<QTable> {
        self.params.validate()?;

        let lake = self.mdp.lake();
        let rewards = self.mdp.rewards();
        let n = self.params.num_robots;
        let mut rates = Annealing::new(self.params.alpha, self.params.epsilon, n);

        let mut q = QTable::zeros(lake.n_s());
        let mut remaining = n;
        let mut s = lake.start();
        let mut steps = 0;
        let mut annealing = false;
        while remaining > 0 {
            if steps == self.params.max_steps {
                warn!(steps, remaining, "q-learning exceeded its step budget");
                return Err(LakeError::StepBudgetExceeded(self.params.max_steps));
            }
            steps += 1;

            let i = lake.free_index(s)?;
            let a = if rng.gen::<f64>() < rates.epsilon {
                Action::ALL[rng.gen_range(0..Action::ALL.len())]
            } else {
                greedy(q.row(i)).0
            };

            let next: State = pick_next(rng, &self.mdp.transitions(s, a)?)?;
            let terminal = lake.cell(next).filter(|&c| c.is_terminal());
            let bootstrap = match terminal {
                Some(_) => rewards.reward(lake, next),
                None => greedy(q.row(lake.free_index(next)?)).1,
            };

            let alpha = rates.alpha;
            let qsa = &mut q.row_mut(i)[a.index()];
            *qsa = (1. - alpha) * *qsa + alpha * rewards.backup(bootstrap);

            if terminal.is_some() {
                remaining -= 1;
                s = lake.start();
            } else {
                s = next;
            }

            if rates.step(remaining, n) && !annealing {
                debug!(steps, remaining, "annealing alpha and epsilon");
                annealing = true;
            }
        }

        info!(
            episodes = n,
            steps,
            alpha = rates.alpha,
            epsilon = rates.epsilon,
            "q-learning finished"
        );
        Ok(q)
    }
}

/// Optimal state values implied by a Q-table.
pub fn q_to_values(q: &QTable) -> ValueFunction {
    ValueFunction::from_vec(q.rows().iter().map(|qs| greedy(qs).1).collect())
}
