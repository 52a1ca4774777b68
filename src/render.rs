use crate::envs::frozen_lake::{Cell, FrozenLake, State};
use crate::mdps::{reward::RewardModel, tables::*};

/// Text map of the lake: `*` start, `T` target, `#` blocked, `O` hole and `.`
/// free. With a policy, free cells show the prescribed move instead.
pub fn map(lake: &FrozenLake, policy: Option<&Policy>) -> String {
    let border = format!(" {}\n", "--".repeat(2 * lake.width()));
    let mut out = border.clone();
    for y in 0..lake.height() {
        out.push('|');
        for x in 0..lake.width() {
            let s = State::new(x, y);
            let c = match lake.cell(s) {
                Some(Cell::Target) => 'T',
                Some(Cell::Hole) => 'O',
                Some(Cell::Blocked) => '#',
                _ => match policy.and_then(|pi| pi.action(lake, s)) {
                    Some(a) => a.arrow(),
                    None if s == lake.start() => '*',
                    None => '.',
                },
            };
            out.push(c);
            out.push('\t');
        }
        out.push_str("|\n");
    }
    out.push_str(&border);
    out
}

/// Value grid. Terminal and blocked cells show their fixed values.
pub fn values(lake: &FrozenLake, rewards: &RewardModel, values: &ValueFunction) -> String {
    let mut out = String::new();
    for y in 0..lake.height() {
        for x in 0..lake.width() {
            let s = State::new(x, y);
            let v = match lake.cell(s).and_then(|c| rewards.terminal_value(c)) {
                Some(v) => v,
                None => values.get(lake, s).unwrap_or_default(),
            };
            out.push_str(&format!("{v:10.2}"));
        }
        out.push('\n');
    }
    out
}
