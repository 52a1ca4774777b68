extern crate rand;
extern crate serde;
extern crate serde_json;

pub mod algos;
pub mod config;
pub mod envs;
pub mod error;
pub mod mdps;
pub mod render;

pub use algos::model_based::mdp::{policy::extract_policy, vi::*};
pub use algos::model_free::q_learning::*;
pub use config::{LakeConfig, MdpParams};
pub use envs::frozen_lake::{Action, Cell, FrozenLake, State};
pub use error::{LakeError, Result};
pub use mdps::{
    mdp::*,
    mdp_simulator::{pick_next, Evaluation, PolicyEvaluator, Rollout},
    reward::RewardModel,
    tables::*,
    transitions::*,
};
