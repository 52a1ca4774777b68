use crate::envs::frozen_lake::{Action, FrozenLake, State};
use crate::error::{LakeError, Result};
use rand::Rng;
use std::collections::HashMap;
use std::ops::Index;

/// Picks the best entry of `qs`, ties going to the earliest action in [`Action::ALL`].
pub fn greedy(qs: &[f64; 4]) -> (Action, f64) {
    let mut best = (Action::ALL[0], qs[0]);
    for (&a, &q) in Action::ALL.iter().zip(qs.iter()).skip(1) {
        if q > best.1 {
            best = (a, q);
        }
    }
    best
}

/// State values over the free states of a lake, in index order.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueFunction {
    values: Vec<f64>,
}

impl ValueFunction {
    pub fn zeros(n_s: usize) -> Self {
        Self {
            values: vec![0.; n_s],
        }
    }

    pub fn from_vec(values: Vec<f64>) -> Self {
        Self { values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    pub fn get(&self, lake: &FrozenLake, s: State) -> Option<f64> {
        lake.index(s).and_then(|i| self.values.get(i).copied())
    }

    pub fn iter<'a>(&'a self, lake: &'a FrozenLake) -> impl Iterator<Item = (State, f64)> + 'a {
        lake.states().iter().copied().zip(self.values.iter().copied())
    }

    /// Largest absolute per-state difference.
    pub fn max_diff(&self, other: &ValueFunction) -> f64 {
        self.values
            .iter()
            .zip(&other.values)
            .fold(0., |d, (a, b)| f64::max(d, (a - b).abs()))
    }
}

impl Index<usize> for ValueFunction {
    type Output = f64;

    fn index(&self, i: usize) -> &f64 {
        &self.values[i]
    }
}

/// Action values indexed by (free state index, action index).
#[derive(Debug, Clone, PartialEq)]
pub struct QTable {
    q: Vec<[f64; 4]>,
}

impl QTable {
    pub fn zeros(n_s: usize) -> Self {
        Self {
            q: vec![[0.; 4]; n_s],
        }
    }

    pub fn n_s(&self) -> usize {
        self.q.len()
    }

    pub fn row(&self, i: usize) -> &[f64; 4] {
        &self.q[i]
    }

    pub fn rows(&self) -> &[[f64; 4]] {
        &self.q
    }

    pub(crate) fn row_mut(&mut self, i: usize) -> &mut [f64; 4] {
        &mut self.q[i]
    }
}

/// A deterministic policy: one action per free state, in index order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Policy {
    actions: Vec<Action>,
}

impl Policy {
    pub fn from_vec(actions: Vec<Action>) -> Self {
        Self { actions }
    }

    pub fn from_fn(lake: &FrozenLake, f: impl FnMut(State) -> Action) -> Self {
        Self {
            actions: lake.states().iter().copied().map(f).collect(),
        }
    }

    /// Fails when a free state has no entry. Entries for other cells are ignored.
    pub fn from_map(lake: &FrozenLake, map: &HashMap<State, Action>) -> Result<Self> {
        let actions = lake
            .states()
            .iter()
            .map(|s| map.get(s).copied().ok_or(LakeError::MissingAction(*s)))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { actions })
    }

    /// Uniformly random action for every free state.
    pub fn random<R: Rng + ?Sized>(lake: &FrozenLake, rng: &mut R) -> Self {
        Self::from_fn(lake, |_| Action::ALL[rng.gen_range(0..Action::ALL.len())])
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn as_slice(&self) -> &[Action] {
        &self.actions
    }

    pub fn action(&self, lake: &FrozenLake, s: State) -> Option<Action> {
        lake.index(s).and_then(|i| self.actions.get(i).copied())
    }
}

impl Index<usize> for Policy {
    type Output = Action;

    fn index(&self, i: usize) -> &Action {
        &self.actions[i]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::prelude::*;
    use rstest::*;
    use std::collections::HashSet;

    fn corridor() -> FrozenLake {
        FrozenLake::new(
            4,
            1,
            State::new(0, 0),
            &HashSet::from([State::new(3, 0)]),
            &HashSet::new(),
            &HashSet::new(),
        )
        .unwrap()
    }

    #[rstest]
    #[case([0., 0., 0., 0.], Action::North)]
    #[case([-1., 0., 0., -1.], Action::South)]
    #[case([-1., -1., 2., 2.], Action::East)]
    #[case([-3., -2., -1., 0.5], Action::West)]
    fn greedy_prefers_first_maximum(#[case] qs: [f64; 4], #[case] expected: Action) {
        assert_eq!(greedy(&qs).0, expected);
    }

    #[test]
    fn policy_from_map_requires_every_free_state() {
        let lake = corridor();
        let mut map = HashMap::from([
            (State::new(0, 0), Action::East),
            (State::new(1, 0), Action::East),
        ]);

        assert!(matches!(
            Policy::from_map(&lake, &map),
            Err(LakeError::MissingAction(s)) if s == State::new(2, 0)
        ));

        map.insert(State::new(2, 0), Action::West);
        map.insert(State::new(3, 0), Action::North);
        let pi = Policy::from_map(&lake, &map).unwrap();
        assert_eq!(pi.as_slice(), &[Action::East, Action::East, Action::West]);
        assert_eq!(pi.action(&lake, State::new(3, 0)), None);
    }

    #[test]
    fn random_policy_is_seeded() {
        let lake = corridor();
        let a = Policy::random(&lake, &mut StdRng::seed_from_u64(2718));
        let b = Policy::random(&lake, &mut StdRng::seed_from_u64(2718));

        assert_eq!(a, b);
        assert_eq!(a.len(), lake.n_s());
    }

    #[test]
    fn value_lookup_by_state() {
        let lake = corridor();
        let v = ValueFunction::from_vec(vec![0.1, 0.2, 0.3]);

        assert_eq!(v.get(&lake, State::new(1, 0)), Some(0.2));
        assert_eq!(v.get(&lake, State::new(3, 0)), None);
        assert_eq!(
            v.iter(&lake).map(|(s, _)| s.x).collect::<Vec<_>>(),
            vec![0, 1, 2]
        );
        assert_eq!(v.max_diff(&ValueFunction::zeros(3)), 0.3);
    }
}
