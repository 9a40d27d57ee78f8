use clap::{Parser, Subcommand};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use seabattle::{
    fleet_lengths, init_logging, run_hunt, ship_class, take_turn, AiPlayer, Engagement,
    RandomPlayer, SamplerConfig, DEFAULT_TRIALS, HEIGHT, WIDTH,
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Let the AI hunt a randomly placed fleet and report how many shots it took.
    Hunt {
        #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
        seed: Option<u64>,
        #[arg(long, default_value_t = DEFAULT_TRIALS)]
        trials: usize,
        #[arg(long, default_value_t = HEIGHT * WIDTH)]
        max_shots: usize,
        #[arg(long, help = "Print the grid and heat-map after every shot")]
        verbose: bool,
    },
    /// Play the AI against a random shooter, alternating turns.
    Duel {
        #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
        seed: Option<u64>,
        #[arg(long, default_value_t = DEFAULT_TRIALS)]
        trials: usize,
    },
}

fn make_rng(seed: Option<u64>) -> SmallRng {
    if let Some(s) = seed {
        println!("Using fixed seed: {} (game will be reproducible)", s);
        SmallRng::seed_from_u64(s)
    } else {
        let mut seed_rng = rand::rng();
        SmallRng::from_rng(&mut seed_rng)
    }
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Hunt {
            seed,
            trials,
            max_shots,
            verbose,
        } => {
            let mut rng = make_rng(seed);
            let lengths = fleet_lengths();
            let mut defender = RandomPlayer::new();
            let mut engagement = Engagement::deploy(&mut defender, &mut rng, HEIGHT, WIDTH, &lengths)?;
            let mut ai = AiPlayer::new(SamplerConfig::with_trials(trials), lengths);

            if verbose {
                while !engagement.is_over() && engagement.shots() < max_shots {
                    let Some(shot) = take_turn(&mut ai, &mut engagement, &mut rng)? else {
                        break;
                    };
                    let (row, col) = engagement.grid().coords(shot.index);
                    println!(
                        "Shot {}: {}{} {:?}",
                        engagement.shots(),
                        (b'A' + col as u8) as char,
                        row + 1,
                        shot.outcome
                    );
                    if let Some(length) = shot.destroyed {
                        println!("Destroyed the {}!", ship_class(length).unwrap_or("ship"));
                    }
                    print!("{}", engagement.grid());
                    if let Some(heatmap) = ai.last_heatmap() {
                        println!("\nHeat-map:");
                        print!("{}", heatmap);
                    }
                    println!();
                }
            }
            let report = run_hunt(&mut ai, &mut engagement, &mut rng, max_shots)?;
            engagement.grid_mut().refresh(true);
            print!("{}", engagement.grid());
            println!(
                "Shots: {} (hits {}, misses {}), ships destroyed: {}",
                report.shots, report.hits, report.misses, report.ships_destroyed
            );
        }
        Commands::Duel { seed, trials } => {
            let mut rng = make_rng(seed);
            let lengths = fleet_lengths();
            let mut ai = AiPlayer::new(SamplerConfig::with_trials(trials), lengths.clone());
            let mut random = RandomPlayer::new();

            // Each side defends its own grid; the other side shoots at it.
            let mut ai_side = Engagement::deploy(&mut ai, &mut rng, HEIGHT, WIDTH, &lengths)?;
            let mut random_side = Engagement::deploy(&mut random, &mut rng, HEIGHT, WIDTH, &lengths)?;

            let winner = loop {
                let shot = take_turn(&mut ai, &mut random_side, &mut rng)?;
                if random_side.is_over() {
                    break "AI";
                }
                let reply = take_turn(&mut random, &mut ai_side, &mut rng)?;
                if ai_side.is_over() {
                    break "Random";
                }
                if shot.is_none() && reply.is_none() {
                    break "nobody";
                }
            };

            let hits = |side: &Engagement| {
                side.grid().hit_positions().len() + side.grid().sunk_positions().len()
            };
            println!(
                "AI: {} shots, {} hits | Random: {} shots, {} hits",
                random_side.shots(),
                hits(&random_side),
                ai_side.shots(),
                hits(&ai_side)
            );
            println!("Winner: {}", winner);
        }
    }
    Ok(())
}
