use crate::envs::frozen_lake::{Action, State};
use crate::error::{invalid_parameter, Result};
use crate::mdps::{mdp::Mdp, tables::ValueFunction};

/// Expected one-step return of taking `a` in `s`, continuing with `values`.
///
/// Targets, holes and blocked cells contribute their fixed value and are never
/// looked up in `values`. A table too short for the lake is an error.
pub fn q_value(mdp: &dyn Mdp, s: State, a: Action, values: &ValueFunction) -> Result<f64> {
    let lake = mdp.lake();
    let rewards = mdp.rewards();

    mdp.transitions(s, a)?
        .iter()
        .try_fold(0., |acc, t| -> Result<f64> {
            let v = match lake
                .cell(t.next_state)
                .and_then(|c| rewards.terminal_value(c))
            {
                Some(v) => v,
                None => {
                    let i = lake.free_index(t.next_state)?;
                    values.as_slice().get(i).copied().ok_or_else(|| {
                        invalid_parameter(
                            "values",
                            format!("expected {} entries, got {}", lake.n_s(), values.len()),
                        )
                    })?
                }
            };
            Ok(acc + t.probability * rewards.backup(v))
        })
}

pub fn q_values(mdp: &dyn Mdp, s: State, values: &ValueFunction) -> Result<[f64; 4]> {
    let mut qs = [0.; 4];
    for a in Action::ALL {
        qs[a.index()] = q_value(mdp, s, a, values)?;
    }
    Ok(qs)
}
