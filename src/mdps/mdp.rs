use super::{reward::RewardModel, transitions::*};
use crate::config::MdpParams;
use crate::envs::frozen_lake::{Action, FrozenLake, State};
use crate::error::Result;

/// Markov Decision Process - Sutton & Barto 2018.
pub trait Mdp {
    fn lake(&self) -> &FrozenLake;

    fn transitions(&self, s: State, a: Action) -> Result<Vec<Transition>>;

    fn rewards(&self) -> &RewardModel;

    fn n_s(&self) -> usize {
        self.lake().n_s()
    }

    fn n_a(&self) -> usize {
        self.lake().n_a()
    }

    fn gamma(&self) -> f64 {
        self.rewards().gamma
    }
}

/// A frozen lake with actuator slip.
#[derive(Debug, Clone)]
pub struct SlipperyLake {
    lake: FrozenLake,
    slip: SlipModel,
    rewards: RewardModel,
}

impl SlipperyLake {
    pub fn new(lake: FrozenLake, params: MdpParams) -> Result<Self> {
        params.validate()?;

        Ok(Self {
            lake,
            slip: SlipModel::new(params.success_prob),
            rewards: RewardModel::new(&params),
        })
    }
}

impl Mdp for SlipperyLake {
    fn lake(&self) -> &FrozenLake {
        &self.lake
    }

    fn transitions(&self, s: State, a: Action) -> Result<Vec<Transition>> {
        self.slip.transitions(&self.lake, s, a)
    }

    fn rewards(&self) -> &RewardModel {
        &self.rewards
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LakeError;
    use float_eq::*;
    use std::collections::HashSet;

    #[test]
    fn exposes_lake_shape_and_discount() {
        let lake = FrozenLake::new(
            3,
            1,
            State::new(0, 0),
            &HashSet::from([State::new(2, 0)]),
            &HashSet::new(),
            &HashSet::new(),
        )
        .unwrap();
        let mdp = SlipperyLake::new(lake, MdpParams::default()).unwrap();

        assert_eq!(mdp.n_s(), 2);
        assert_eq!(mdp.n_a(), 4);
        assert_float_eq!(mdp.gamma(), 0.9, abs <= 1e-12);
        assert_eq!(
            mdp.transitions(State::new(1, 0), Action::East).unwrap()[0].next_state,
            State::new(2, 0)
        );
    }

    #[test]
    fn invalid_params_are_rejected() {
        let lake = FrozenLake::new(
            2,
            1,
            State::new(0, 0),
            &HashSet::new(),
            &HashSet::new(),
            &HashSet::new(),
        )
        .unwrap();
        let params = MdpParams {
            success_prob: 1.5,
            ..Default::default()
        };

        assert!(matches!(
            SlipperyLake::new(lake, params),
            Err(LakeError::InvalidParameter {
                name: "success_prob",
                ..
            })
        ));
    }
}
