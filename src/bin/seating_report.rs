//! Seating report - fairness of randomize and latency of each operation.

use std::time::Instant;

use clap::Parser;
use hdrhistogram::Histogram;
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use turn_order::{OrderMaintainer, Participant};

#[derive(Parser, Debug)]
#[command(name = "seating-report", about = "Measure seating fairness and operation latency")]
struct Args {
    /// Number of participants to seat
    #[arg(long, default_value_t = 6)]
    players: usize,

    /// Iterations per measured operation
    #[arg(long, default_value_t = 100_000)]
    iterations: u64,

    /// Seed for the random number generator
    #[arg(long, default_value_t = 0xC0FFEE)]
    seed: u64,

    /// Default log filter when RUST_LOG is unset
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() {
    let args = Args::parse();
    turn_order::logging::init(&args.log_level);

    if args.players == 0 {
        eprintln!("nothing to seat: --players must be at least 1");
        std::process::exit(2);
    }

    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);
    let mut seating = OrderMaintainer::with_capacity(args.players);
    for i in 0..args.players {
        seating.add(Participant::guest(format!("Player {}", i + 1)));
    }
    let ids: Vec<_> = seating.participants().iter().map(Participant::id).collect();

    println!(
        "Seating {} players, {} iterations, seed {:#x}",
        args.players, args.iterations, args.seed
    );

    // Who draws seat 1, and latency of randomize
    let mut first_seat = vec![0u64; args.players];
    let mut randomize_ns = new_histogram();
    for _ in 0..args.iterations {
        let start = Instant::now();
        std::hint::black_box(seating.randomize_with(&mut rng));
        record(&mut randomize_ns, start);

        if let Some(first) = ids.iter().position(|id| seating.rank_of(id) == Some(1)) {
            first_seat[first] += 1;
        }
    }

    let mut rotate_ns = new_histogram();
    for _ in 0..args.iterations {
        let index = rng.gen_range(0..args.players);
        let start = Instant::now();
        let _ = std::hint::black_box(seating.rotate_to_start(index));
        record(&mut rotate_ns, start);
    }

    let mut move_ns = new_histogram();
    for _ in 0..args.iterations {
        let from = rng.gen_range(0..args.players);
        let to = rng.gen_range(0..args.players);
        let start = Instant::now();
        let _ = std::hint::black_box(seating.move_seat(from, to));
        record(&mut move_ns, start);
    }

    println!("\n=== Seat 1 Distribution ===");
    let expected = args.iterations as f64 / args.players as f64;
    let mut chi_square = 0.0;
    for (id, count) in ids.iter().zip(&first_seat) {
        let diff = *count as f64 - expected;
        chi_square += diff * diff / expected;
        println!("{:>16}: {:10} ({:+.2}%)", id.as_str(), count, diff / expected * 100.0);
    }
    println!("chi-square: {:.3} ({} degrees of freedom)", chi_square, args.players - 1);

    println!("\n=== Latency Report (ns) ===");
    print_histogram("randomize", &randomize_ns);
    print_histogram("rotate", &rotate_ns);
    print_histogram("move", &move_ns);
}

fn new_histogram() -> Histogram<u64> {
    Histogram::<u64>::new_with_bounds(1, 10_000_000, 3).expect("valid histogram bounds")
}

fn record(histogram: &mut Histogram<u64>, start: Instant) {
    // Outliers past the upper bound are dropped
    histogram.record(start.elapsed().as_nanos() as u64).unwrap_or(());
}

fn print_histogram(label: &str, histogram: &Histogram<u64>) {
    println!(
        "{:<10} min {:6}  p50 {:6}  p99 {:6}  p99.9 {:6}  max {:8}",
        label,
        histogram.min(),
        histogram.value_at_quantile(0.50),
        histogram.value_at_quantile(0.99),
        histogram.value_at_quantile(0.999),
        histogram.max(),
    );
}
