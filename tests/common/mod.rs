use frozen_lake::*;
use std::collections::HashSet;
use std::rc::Rc;

fn set(items: &[(usize, usize)]) -> HashSet<State> {
    items.iter().copied().map(State::from).collect()
}

#[allow(dead_code)]
pub fn make_lake(
    width: usize,
    height: usize,
    targets: &[(usize, usize)],
    blocked: &[(usize, usize)],
    holes: &[(usize, usize)],
    params: MdpParams,
) -> Rc<dyn Mdp> {
    let lake = FrozenLake::new(
        width,
        height,
        State::new(0, 0),
        &set(targets),
        &set(blocked),
        &set(holes),
    )
    .unwrap();
    Rc::new(SlipperyLake::new(lake, params).unwrap())
}

/// `width x 1` lake starting at the west end with the target at the east end.
#[allow(dead_code)]
pub fn corridor(width: usize) -> Rc<dyn Mdp> {
    make_lake(width, 1, &[(width - 1, 0)], &[], &[], MdpParams::default())
}

#[allow(dead_code)]
pub fn optimal_policy(mdp: &Rc<dyn Mdp>) -> Policy {
    let c = ValueIteration::new(Rc::clone(mdp))
        .exec(ValueIteration::DEFAULT_THETA, None)
        .unwrap();
    extract_policy(mdp.as_ref(), &c.values).unwrap()
}
