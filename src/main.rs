use frozen_lake::*;
use rand::prelude::*;
use std::env;
use std::rc::Rc;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

const EVAL_TRIALS: usize = 100;

fn init_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("frozen_lake=info"));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");
}

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    init_logging();

    let config = match env::args().nth(1) {
        Some(path) => LakeConfig::from_path(path)?,
        None => LakeConfig::demo(),
    };
    let rng = &mut match env::var("FROZEN_LAKE_SEED").ok().and_then(|s| s.parse().ok()) {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let lake = Rc::new(config.build()?);
    let mdp = Rc::clone(&lake) as Rc<dyn Mdp>;
    print!("{}", render::map(lake.lake(), None));

    let vi = ValueIteration::new(Rc::clone(&mdp)).exec(ValueIteration::DEFAULT_THETA, None)?;
    info!(iterations = vi.iterations, "optimal values computed");
    print!("{}", render::values(lake.lake(), lake.rewards(), &vi.values));

    let evaluator = PolicyEvaluator::new(Rc::clone(&mdp), PolicyEvaluator::DEFAULT_MAX_STEPS);
    let opt_policy = extract_policy(mdp.as_ref(), &vi.values)?;
    print!("{}", render::map(lake.lake(), Some(&opt_policy)));
    let eval = evaluator.evaluate(&opt_policy, EVAL_TRIALS, rng)?;
    println!("({}, {})", eval.success_rate, eval.average_return);

    let q = QLearning::new(Rc::clone(&mdp), QLearningParams::default()).exec(rng)?;
    let learned_policy = extract_policy(mdp.as_ref(), &q_to_values(&q))?;
    print!("{}", render::map(lake.lake(), Some(&learned_policy)));
    match evaluator.evaluate(&learned_policy, EVAL_TRIALS, rng) {
        Ok(eval) => println!("({}, {})", eval.success_rate, eval.average_return),
        Err(LakeError::StepBudgetExceeded(n)) => {
            println!("learned policy does not reach a terminal cell within {n} steps")
        }
        Err(e) => return Err(e.into()),
    }

    Ok(())
}
