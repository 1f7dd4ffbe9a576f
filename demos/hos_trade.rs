//! Two-country Heckscher-Ohlin trade example.
//!
//! A capital-rich and a labor-rich economy with identical technologies open
//! up to trade. Run with `RUST_LOG=debug` to watch the solvers.

use trade_equilibrium::prelude::*;
use trade_equilibrium::simulation::sweep::stolper_samuelson_curve;
use trade_equilibrium::solver::autarky;

fn main() -> Result<()> {
    env_logger::init();
    let config = SolverConfig::default();

    println!("╔══════════════════════════════════════════╗");
    println!("║  trade-equilibrium: HOS Trade Example    ║");
    println!("╚══════════════════════════════════════════╝\n");

    let home = HosEconomy::new(EconomyParameters::new(130.0, 100.0, 0.6, 0.4, 0.5)?)?;
    let foreign = HosEconomy::new(EconomyParameters::new(100.0, 130.0, 0.6, 0.4, 0.5)?)?;

    // --- Autarky ---
    println!("━━━ Autarky ━━━\n");
    for (name, economy) in [("Home", &home), ("Foreign", &foreign)] {
        let closed = autarky_equilibrium(economy, &config)?;
        let planner = autarky::optimize(economy.params(), &config)?;
        println!("  {name} (market clearing):\n{closed}");
        println!(
            "  {name} (planner):          p = {:.6}, L_A = {:.4}\n",
            planner.price(),
            planner.allocation().labor_a()
        );
    }

    // --- Free trade ---
    println!("━━━ Free Trade ━━━\n");
    let eq = world_equilibrium(&home, &foreign, &config)?;
    println!("  World price:    {:.6}", eq.world_price());
    println!("  Iterations:     {}", eq.iterations());
    for (name, result) in [("Home", eq.home()), ("Foreign", eq.foreign())] {
        if let Some((imports_a, imports_b)) = result.net_imports() {
            println!("  {name:<8} imports A = {imports_a:>9.4}, B = {imports_b:>9.4}");
        }
    }
    println!(
        "  Excess demand:  A = {:.2e}, B = {:.2e}\n",
        eq.excess_demand_a(),
        eq.excess_demand_b()
    );

    // --- Stolper-Samuelson ---
    println!("━━━ Stolper-Samuelson (Home) ━━━\n");
    let prices: Vec<f64> = (0..9).map(|i| 0.90 + 0.025 * i as f64).collect();
    for (p, omega) in stolper_samuelson_curve(&home, &prices, &config)? {
        println!("  p = {p:.3}  ->  w/r = {omega:.4}");
    }

    println!("\n━━━ JSON ━━━\n");
    match serde_json::to_string_pretty(&eq) {
        Ok(json) => println!("{json}"),
        Err(e) => eprintln!("serialization failed: {e}"),
    }
    Ok(())
}
