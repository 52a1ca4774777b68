use crate::envs::frozen_lake::{FrozenLake, State};
use crate::error::{invalid_parameter, Result};
use crate::mdps::mdp::SlipperyLake;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Dynamics and reward constants of the lake.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MdpParams {
    pub gamma: f64,
    pub success_prob: f64,
    pub hole_reward: f64,
    pub target_reward: f64,
    pub living_reward: f64,
}

impl Default for MdpParams {
    fn default() -> Self {
        Self {
            gamma: 0.9,
            success_prob: 0.8,
            hole_reward: -5.0,
            target_reward: 1.0,
            living_reward: -0.1,
        }
    }
}

impl MdpParams {
    /// Value iteration only terminates for `gamma < 1`.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..1.0).contains(&self.gamma) {
            return Err(invalid_parameter(
                "gamma",
                format!("must lie in [0, 1), got {}", self.gamma),
            ));
        }
        if !(0.0..=1.0).contains(&self.success_prob) {
            return Err(invalid_parameter(
                "success_prob",
                format!("must lie in [0, 1], got {}", self.success_prob),
            ));
        }
        for (name, r) in [
            ("hole_reward", self.hole_reward),
            ("target_reward", self.target_reward),
            ("living_reward", self.living_reward),
        ] {
            if !r.is_finite() {
                return Err(invalid_parameter(name, "must be finite"));
            }
        }
        Ok(())
    }
}

/// Serializable description of a lake.
///
/// ```json
/// { "width": 3, "height": 1, "start": [0, 0], "targets": [[2, 0]] }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LakeConfig {
    pub width: usize,
    pub height: usize,
    pub start: State,
    #[serde(default)]
    pub targets: HashSet<State>,
    #[serde(default)]
    pub blocked: HashSet<State>,
    #[serde(default)]
    pub holes: HashSet<State>,
    #[serde(default)]
    pub params: MdpParams,
}

impl LakeConfig {
    /// The 8x8 lake used by the demo binary.
    pub fn demo() -> Self {
        let set = |items: &[(usize, usize)]| -> HashSet<State> {
            items.iter().copied().map(State::from).collect()
        };
        Self {
            width: 8,
            height: 8,
            start: State::new(0, 0),
            targets: set(&[(3, 4)]),
            blocked: set(&[(3, 3), (2, 3), (2, 4)]),
            holes: set(&[
                (4, 0),
                (4, 1),
                (3, 0),
                (3, 1),
                (6, 4),
                (6, 5),
                (0, 7),
                (0, 6),
                (1, 7),
            ]),
            params: MdpParams::default(),
        }
    }

    pub fn from_json_str(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let s = std::fs::read_to_string(path)?;
        Self::from_json_str(&s)
    }

    pub fn lake(&self) -> Result<FrozenLake> {
        FrozenLake::new(
            self.width,
            self.height,
            self.start,
            &self.targets,
            &self.blocked,
            &self.holes,
        )
    }

    pub fn build(&self) -> Result<SlipperyLake> {
        SlipperyLake::new(self.lake()?, self.params)
    }
}
