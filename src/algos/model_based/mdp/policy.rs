use super::common::*;
use crate::error::{invalid_parameter, Result};
use crate::mdps::{mdp::Mdp, tables::*};

/// Greedy policy with respect to `values`; ties go to the earliest action.
pub fn extract_policy(mdp: &dyn Mdp, values: &ValueFunction) -> Result<Policy> {
    if values.len() != mdp.n_s() {
        return Err(invalid_parameter(
            "values",
            format!("expected {} entries, got {}", mdp.n_s(), values.len()),
        ));
    }

    let actions = mdp
        .lake()
        .states()
        .iter()
        .map(|&s| q_values(mdp, s, values).map(|qs| greedy(&qs).0))
        .collect::<Result<Vec<_>>>()?;

    Ok(Policy::from_vec(actions))
}
