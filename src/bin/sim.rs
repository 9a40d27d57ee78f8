use clap::Parser;
use rand::{rngs::SmallRng, SeedableRng};
use seabattle::{
    fleet_lengths, init_logging, run_hunt, AiPlayer, Engagement, RandomPlayer, SamplerConfig,
    DEFAULT_TRIALS, HEIGHT, WIDTH,
};
use serde_json::json;

/// Run the AI and a random shooter against identical fleets and print a JSON summary.
#[derive(Parser)]
struct Args {
    seed: u64,
    #[arg(long, default_value_t = DEFAULT_TRIALS)]
    trials: usize,
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let args = Args::parse();
    let lengths = fleet_lengths();
    let max_shots = HEIGHT * WIDTH;

    let mut ai = AiPlayer::new(SamplerConfig::with_trials(args.trials), lengths.clone());
    let mut random = RandomPlayer::new();

    // Both shooters face the same layout.
    let mut placement_rng = SmallRng::seed_from_u64(args.seed);
    let mut ai_target = Engagement::deploy(&mut random, &mut placement_rng, HEIGHT, WIDTH, &lengths)?;
    let mut placement_rng = SmallRng::seed_from_u64(args.seed);
    let mut random_target = Engagement::deploy(&mut random, &mut placement_rng, HEIGHT, WIDTH, &lengths)?;

    let mut rng = SmallRng::seed_from_u64(args.seed.wrapping_add(1));
    let ai_report = run_hunt(&mut ai, &mut ai_target, &mut rng, max_shots)?;
    let random_report = run_hunt(&mut random, &mut random_target, &mut rng, max_shots)?;

    let winner = match (ai_report.complete, random_report.complete) {
        (true, true) if ai_report.shots < random_report.shots => "ai",
        (true, true) if ai_report.shots > random_report.shots => "random",
        (true, true) => "tie",
        (true, false) => "ai",
        (false, true) => "random",
        (false, false) => "none",
    };

    let result = json!({
        "seed": args.seed,
        "trials": args.trials,
        "ai": ai_report,
        "random": random_report,
        "winner": winner,
    });

    println!("{}", serde_json::to_string(&result)?);
    Ok(())
}
