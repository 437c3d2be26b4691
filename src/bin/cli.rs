//! Options Pricer CLI
//!
//! Prices a European call and put with one of the three models.

use clap::Parser;

use options_pricer::data::{wants_lookup, NO_TICKER};
use options_pricer::models::monte_carlo;
use options_pricer::prelude::*;

#[derive(Parser)]
#[command(name = "cli")]
#[command(about = "Price European call and put options")]
struct Args {
    /// Pricing model: black-scholes, monte-carlo or binomial
    #[arg(long, short, default_value = "black-scholes")]
    model: String,

    /// Ticker symbol to look up the spot price, or N/A for manual input
    #[arg(long, default_value = NO_TICKER)]
    ticker: String,

    /// Current asset price (used when the ticker is N/A or the lookup fails)
    #[arg(long, default_value = "100.0")]
    spot: f64,

    /// Strike price
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

    /// Monte Carlo paths
    #[arg(long)]
    paths: Option<usize>,

    /// Monte Carlo time steps per year
    #[arg(long)]
    steps_per_year: Option<usize>,

    /// Monte Carlo seed; omit for a fresh random run
    #[arg(long)]
    seed: Option<u64>,

    /// Binomial tree steps
    #[arg(long)]
    tree_steps: Option<usize>,

    /// Also print Black-Scholes Greeks
    #[arg(long)]
    greeks: bool,
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
    let config = EngineConfig::from_env()?;
    let model = select_model(args, &config)?;

    let spot = if wants_lookup(&args.ticker) {
        let client = YahooClient::new()?;
        resolve_spot(&client, &args.ticker, args.spot)
    } else {
        ResolvedSpot {
            price: args.spot,
            source: SpotSource::Manual,
        }
    };

    let req = PricingRequest::new(
        spot.price,
        args.strike,
        args.time,
        args.rate.unwrap_or(config.risk_free_rate),
        args.vol,
    );

    println!("{} Pricing Model", model);
    println!("==========================\n");
    match &spot.source {
        SpotSource::Ticker(symbol) => println!("  Spot:   ${:.2} ({})", req.spot, symbol),
        SpotSource::Manual => println!("  Spot:   ${:.2}", req.spot),
    }
    println!("  Strike: ${:.2}", req.strike);
    println!("  Time:   {:.2} years", req.time);
    println!("  Rate:   {:.2}%", req.rate * 100.0);
    println!("  Vol:    {:.1}%\n", req.vol * 100.0);

    println!("Option Prices:");
    if let PricingModel::MonteCarlo(mc) = model {
        // Both legs share one seed so the pair comes from the same paths
        let mc = mc.resolved_seed();
        let call = monte_carlo::estimate(&req, OptionType::Call, &mc)?;
        let put = monte_carlo::estimate(&req, OptionType::Put, &mc)?;
        println!("  Call: ${:.2} (± {:.4})", call.price, call.std_error);
        println!("  Put:  ${:.2} (± {:.4})", put.price, put.std_error);
        println!("  {} paths x {} steps, seed {}", call.num_paths, call.num_steps, call.seed);
    } else {
        let pair = model.price_pair(&req)?;
        println!("  Call: ${:.2}", pair.call);
        println!("  Put:  ${:.2}", pair.put);
    }

    if args.greeks {
        for option_type in OptionType::both() {
            let g = bs_greeks(&req, option_type)?;
            println!("\n{} Greeks (Black-Scholes):", option_type);
            println!("  Delta: {:.4}", g.delta);
            println!("  Gamma: {:.6}", g.gamma);
            println!("  Theta: {:.4}", g.theta);
            println!("  Vega:  {:.4}", g.vega);
            println!("  Rho:   {:.4}", g.rho);
        }
    }

    Ok(())
}

fn select_model(args: &Args, config: &EngineConfig) -> PricingResult<PricingModel> {
    let model = match args.model.parse::<PricingModel>()? {
        PricingModel::BlackScholes => PricingModel::BlackScholes,
        PricingModel::MonteCarlo(_) => {
            let mut mc = config.monte_carlo;
            if let Some(paths) = args.paths {
                mc.num_paths = paths;
            }
            if let Some(steps) = args.steps_per_year {
                mc.steps_per_year = steps;
            }
            if args.seed.is_some() {
                mc.seed = args.seed;
            }
            PricingModel::MonteCarlo(mc)
        }
        PricingModel::BinomialTree(_) => {
            PricingModel::BinomialTree(BinomialTree::new(
                args.tree_steps.unwrap_or(config.tree.num_steps),
            ))
        }
    };
    Ok(model)
}
