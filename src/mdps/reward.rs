use crate::config::MdpParams;
use crate::envs::frozen_lake::{Cell, FrozenLake, State};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RewardModel {
    pub gamma: f64,
    pub target_reward: f64,
    pub hole_reward: f64,
    pub living_reward: f64,
}

impl RewardModel {
    pub fn new(params: &MdpParams) -> Self {
        Self {
            gamma: params.gamma,
            target_reward: params.target_reward,
            hole_reward: params.hole_reward,
            living_reward: params.living_reward,
        }
    }

    /// Reward collected on arriving in `s`. Positions off the grid pay nothing.
    pub fn reward(&self, lake: &FrozenLake, s: State) -> f64 {
        match lake.cell(s) {
            Some(Cell::Free) => self.living_reward,
            Some(cell) => self.terminal_value(cell).unwrap_or_default(),
            None => 0.,
        }
    }

    /// Fixed value of cells that are never looked up in a value table.
    pub fn terminal_value(&self, cell: Cell) -> Option<f64> {
        match cell {
            Cell::Target => Some(self.target_reward),
            Cell::Hole => Some(self.hole_reward),
            Cell::Blocked => Some(0.),
            Cell::Free => None,
        }
    }

    /// One-step return: every move pays the living cost, the rest is discounted.
    pub fn backup(&self, continuation: f64) -> f64 {
        self.living_reward + self.gamma * continuation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_eq::*;
    use rstest::*;
    use std::collections::HashSet;

    // . T O #
    #[rstest]
    #[case(State::new(0, 0), -0.1)]
    #[case(State::new(1, 0), 1.)]
    #[case(State::new(2, 0), -5.)]
    #[case(State::new(3, 0), 0.)]
    #[case(State::new(4, 0), 0.)]
    fn rewards_by_destination(#[case] s: State, #[case] expected: f64) {
        let lake = FrozenLake::new(
            4,
            1,
            State::new(0, 0),
            &HashSet::from([State::new(1, 0)]),
            &HashSet::from([State::new(3, 0)]),
            &HashSet::from([State::new(2, 0)]),
        )
        .unwrap();
        let r = RewardModel::new(&MdpParams::default());

        assert_float_eq!(r.reward(&lake, s), expected, abs <= 1e-12);
    }

    #[test]
    fn only_free_cells_lack_a_terminal_value() {
        let r = RewardModel::new(&MdpParams::default());

        assert_eq!(r.terminal_value(Cell::Free), None);
        assert_eq!(r.terminal_value(Cell::Target), Some(1.));
        assert_eq!(r.terminal_value(Cell::Blocked), Some(0.));
    }

    #[test]
    fn backup_discounts_continuation() {
        let r = RewardModel::new(&MdpParams::default());

        assert_float_eq!(r.backup(1.), 0.8, abs <= 1e-12);
        assert_float_eq!(r.backup(-5.), -4.6, abs <= 1e-12);
        assert_float_eq!(r.backup(0.), -0.1, abs <= 1e-12);
    }
}
