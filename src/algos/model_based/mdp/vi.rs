use super::common::*;
use crate::error::{invalid_parameter, LakeError, Result};
use crate::mdps::{mdp::Mdp, tables::*};
use std::rc::Rc;
use tracing::{debug, info, warn};

/// Outcome of a converged value iteration run.
#[derive(Debug, Clone, PartialEq)]
pub struct Convergence {
    /// The snapshot that satisfied the stopping test, i.e. the table the last
    /// sweep read from, not the one it produced.
    pub values: ValueFunction,
    pub iterations: usize,
    /// Max per-state change of every sweep, in order.
    pub deltas: Vec<f64>,
}

/// Synchronous value iteration: every sweep reads only the previous table.
pub struct ValueIteration {
    mdp: Rc<dyn Mdp>,
}

impl ValueIteration {
    pub const DEFAULT_THETA: f64 = 1e-3;
    pub const DEFAULT_MAX_ITERATIONS: usize = 10_000;

    pub fn new(mdp: Rc<dyn Mdp>) -> Self {
        Self { mdp }
    }

    pub fn exec(&self, theta: f64, max_iterations: Option<usize>) -> Result<Convergence> {
        if !(theta.is_finite() && theta > 0.) {
            return Err(invalid_parameter(
                "theta",
                format!("must be positive, got {theta}"),
            ));
        }
        let max_iterations = max_iterations.unwrap_or(Self::DEFAULT_MAX_ITERATIONS);

        let mut values = ValueFunction::zeros(self.mdp.n_s());
        let mut deltas = Vec::new();
        for iteration in 1..=max_iterations {
            let prev = values;
            let next = self.sweep(&prev)?;
            let delta = next.max_diff(&prev);
            deltas.push(delta);
            debug!(iteration, delta, "value iteration sweep");

            if delta < theta {
                info!(iterations = iteration, delta, "value iteration converged");
                return Ok(Convergence {
                    values: prev,
                    iterations: iteration,
                    deltas,
                });
            }
            values = next;
        }

        let delta = deltas.last().copied().unwrap_or_default();
        warn!(max_iterations, delta, "value iteration did not converge");
        Err(LakeError::DidNotConverge {
            iterations: max_iterations,
            delta,
        })
    }

    fn sweep(&self, prev: &ValueFunction) -> Result<ValueFunction> {
        let mdp = self.mdp.as_ref();
        let values = mdp
            .lake()
            .states()
            .iter()
            .map(|&s| q_values(mdp, s, prev).map(|qs| greedy(&qs).1))
            .collect::<Result<Vec<_>>>()?;

        Ok(ValueFunction::from_vec(values))
    }
}
