//! Example: price one option with all three models
//!
//! Run with: cargo run --example basic_pricing

use options_pricer::models::monte_carlo;
use options_pricer::prelude::*;

fn main() {
    let req = PricingRequest::new(100.0, 105.0, 0.5, 0.05, 0.25);

    println!("=== European Option Pricing ===\n");
    println!("Spot:     ${:.2}", req.spot);
    println!("Strike:   ${:.2}", req.strike);
    println!("Time:     {:.2} years", req.time);
    println!("Rate:     {:.1}%", req.rate * 100.0);
    println!("Vol:      {:.1}%\n", req.vol * 100.0);

    println!("{:<15} {:>10} {:>10}", "Model", "Call", "Put");
    for model in PricingModel::all() {
        match model.price_pair(&req) {
            Ok(pair) => println!("{:<15} {:>10.4} {:>10.4}", model.name(), pair.call, pair.put),
            Err(e) => println!("{:<15} failed: {}", model.name(), e),
        }
    }

    // Verify put-call parity: C - P = S - K*e^(-rT)
    if let Ok(call) = bs_price(&req, OptionType::Call) {
        if let Ok(put) = bs_price(&req, OptionType::Put) {
            println!("\nPut-Call Parity Check:");
            println!("  C - P           = {:.6}", call - put);
            println!("  S - K*e^(-rT)   = {:.6}", req.parity_forward());
        }
    }

    // Monte Carlo sampling error shrinks like 1/sqrt(paths)
    println!("\n=== Monte Carlo Convergence (seed 42) ===\n");
    for paths in [1_000, 10_000, 100_000] {
        let config = MonteCarloConfig::default()
            .with_paths(paths)
            .with_steps_per_year(52)
            .with_seed(42);
        match monte_carlo::estimate(&req, OptionType::Call, &config) {
            Ok(est) => println!(
                "  {:>7} paths: {:.4} ± {:.4}",
                paths, est.price, est.std_error
            ),
            Err(e) => println!("  {:>7} paths: failed: {}", paths, e),
        }
    }

    // Binomial convergence toward the closed form
    println!("\n=== Binomial Convergence ===\n");
    for steps in [10, 100, 1000] {
        if let Ok(price) = BinomialTree::new(steps).price(&req, OptionType::Call) {
            println!("  {:>5} steps: {:.4}", steps, price);
        }
    }
}
