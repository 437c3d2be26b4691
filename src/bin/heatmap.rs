//! Price Heatmap
//!
//! Sweeps Black-Scholes over spot × strike and prints call and put tables.

use clap::Parser;

use options_pricer::prelude::*;

#[derive(Parser)]
#[command(name = "heatmap")]
#[command(about = "Black-Scholes call/put prices over a spot x strike grid")]
struct Args {
    /// Centre spot price
    #[arg(long, default_value = "100.0")]
    spot: f64,

    /// Centre strike price
    #[arg(long, default_value = "100.0")]
    strike: f64,

    /// Time to maturity in years
    #[arg(long, default_value = "1.0")]
    time: f64,

    /// Risk-free rate (defaults to PRICER_RISK_FREE_RATE or 0.05)
    #[arg(long, allow_negative_numbers = true)]
    rate: Option<f64>,

    /// Volatility (σ)
    #[arg(long, default_value = "0.2")]
    vol: f64,

    /// Relative half-width of both axes around their centres
    #[arg(long, default_value = "0.2")]
    range: f64,

    /// Points per axis
    #[arg(long, default_value = "20")]
    points: usize,

    /// Write the grid as JSON instead of printing tables
    #[arg(long)]
    json: Option<String>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    if let Err(e) = run(&args) {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}

fn run(args: &Args) -> PricingResult<()> {
    if !(0.0..1.0).contains(&args.range) {
        return Err(PricingError::invalid_parameter("range must be in [0, 1)"));
    }
    let config = EngineConfig::from_env()?;
    let base = PricingRequest::new(
        args.spot,
        args.strike,
        args.time,
        args.rate.unwrap_or(config.risk_free_rate),
        args.vol,
    );

    let spots = linspace(args.spot * (1.0 - args.range), args.spot * (1.0 + args.range), args.points);
    let strikes = linspace(
        args.strike * (1.0 - args.range),
        args.strike * (1.0 + args.range),
        args.points,
    );
    let grid = price_grid(&base, &spots, &strikes)?;

    if let Some(path) = &args.json {
        return grid.save_json(path);
    }

    println!("Black-Scholes Price Heatmap");
    println!("===========================\n");
    println!("  Time: {:.2} years", base.time);
    println!("  Rate: {:.2}%", base.rate * 100.0);
    println!("  Vol:  {:.1}%\n", base.vol * 100.0);

    print_table("Call Prices", &grid, &grid.calls);
    println!();
    print_table("Put Prices", &grid, &grid.puts);

    Ok(())
}

fn print_table(title: &str, grid: &PriceGrid, values: &ndarray::Array2<f64>) {
    println!("{} (rows: spot, columns: strike):", title);
    print!("  Spot\\K  |");
    for k in &grid.strikes {
        print!(" {:>7.2}", k);
    }
    println!();
    println!("----------+{}", "-".repeat(8 * grid.strikes.len()));

    for (i, s) in grid.spots.iter().enumerate() {
        print!("  {:>7.2} |", s);
        for j in 0..grid.strikes.len() {
            print!(" {:>7.2}", values[[i, j]]);
        }
        println!();
    }
}
