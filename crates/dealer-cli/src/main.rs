use clap::Parser;
use dealer_core::io::lin;
use dealer_core::{Deal, Seat, Suit};
use dealer_engine::{
    generate_deals_with, load_profile, validate_profile_feasibility, GenConfig, GenHooks,
    SortOrder,
};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Generate constrained bridge deals from a JSON hand profile"
)]
struct Args {
    /// Path to the profile JSON file
    profile: PathBuf,

    /// Number of boards to generate
    #[arg(short = 'n', long, default_value_t = 16)]
    count: u32,

    /// Random seed for reproducible runs (random if omitted, always printed)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Rotate seat assignments to balance dealer frequency
    #[arg(long)]
    rotate: bool,

    /// Emit LIN lines instead of hand diagrams
    #[arg(long)]
    lin: bool,

    /// Disable wall-clock re-seeding for byte-for-byte reproducibility
    #[arg(long)]
    no_reseed: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let profile = match load_profile(&args.profile) {
        Ok(profile) => profile,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::FAILURE;
        }
    };

    match validate_profile_feasibility(&profile) {
        Ok(report) => {
            for dead in &report.dead {
                eprintln!(
                    "warning: seat {} sub-profile {} can never be used and will be skipped",
                    dead.seat,
                    dead.index + 1
                );
            }
        }
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::FAILURE;
        }
    }

    let seed = args.seed.unwrap_or_else(rand::random);
    println!("# profile: {}  seed: {seed}  boards: {}", profile.name, args.count);

    let cfg = if args.no_reseed {
        GenConfig::deterministic()
    } else {
        GenConfig::default()
    };

    let set = match generate_deals_with(
        seed,
        &profile,
        args.count,
        args.rotate,
        &cfg,
        &mut GenHooks::default(),
    ) {
        Ok(set) => set,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::FAILURE;
        }
    };

    if args.lin {
        print!("{}", lin::encode_deals(&set.deals));
    } else {
        for deal in &set.deals {
            print_deal(deal, profile.sort_order);
        }
        let total: f64 = set.board_times.iter().map(|d| d.as_secs_f64()).sum();
        println!(
            "# generated {} boards in {:.2}s ({} re-seeds)",
            set.deals.len(),
            total,
            set.reseed_count
        );
    }
    ExitCode::SUCCESS
}

fn print_deal(deal: &Deal, sort_order: SortOrder) {
    println!(
        "Board {}  Dealer {}  Vul {:?}",
        deal.board_number, deal.dealer, deal.vulnerability
    );
    for seat in Seat::ALL {
        let mut hand = deal.hand(seat).clone();
        if sort_order == SortOrder::Descending {
            hand.sort();
        }
        let suits: Vec<String> = Suit::DESCENDING
            .iter()
            .map(|&suit| {
                let ranks: String = hand
                    .cards
                    .iter()
                    .filter(|c| c.suit == suit)
                    .map(|c| c.rank.to_char())
                    .collect();
                if ranks.is_empty() {
                    "-".to_string()
                } else {
                    ranks
                }
            })
            .collect();
        println!("  {seat}: {}", suits.join(" "));
    }
    println!();
}
