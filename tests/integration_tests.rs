use approx::{assert_abs_diff_eq, assert_relative_eq};
use trade_equilibrium::config::SolverConfig;
use trade_equilibrium::core::allocation::ProductionRegime;
use trade_equilibrium::core::equilibrium::{EquilibriumResult, TradeEquilibrium};
use trade_equilibrium::core::error::EquilibriumError;
use trade_equilibrium::core::parameters::{EconomyParameters, HosEconomy, SpecificFactorsParameters};
use trade_equilibrium::model::technology::output;
use trade_equilibrium::simulation::sweep::{
    frontier, specific_factors_frontier, stolper_samuelson_curve,
};
use trade_equilibrium::solver::market::{
    autarky_price, open_economy, open_economy_with_tariff, world_equilibrium,
    world_equilibrium_with_tariff,
};
use trade_equilibrium::solver::{autarky, hos, specific_factors};

fn hos_economy(capital: f64, labor: f64) -> HosEconomy {
    HosEconomy::new(EconomyParameters::new(capital, labor, 0.6, 0.4, 0.5).unwrap()).unwrap()
}

/// Full pipeline: autarky prices → world price → trade pattern → factor prices.
#[test]
fn full_pipeline_two_country_hos() {
    let config = SolverConfig::default();
    let home = hos_economy(130.0, 100.0);
    let foreign = hos_economy(100.0, 130.0);

    let p_home = autarky_price(&home, &config).unwrap();
    let p_foreign = autarky_price(&foreign, &config).unwrap();
    // Capital-abundant home has the lower autarky price of the capital-intensive good
    assert!(p_home < p_foreign);

    let eq = world_equilibrium(&home, &foreign, &config).unwrap();
    assert!(p_home < eq.world_price() && eq.world_price() < p_foreign);
    // Mirror-image economies trade at unit price
    assert_relative_eq!(eq.world_price(), 1.0, max_relative = 1e-8);

    // Heckscher-Ohlin: each country exports the good using its abundant factor
    let (home_a, home_b) = eq.home().net_imports().unwrap();
    let (foreign_a, foreign_b) = eq.foreign().net_imports().unwrap();
    assert!(home_a < 0.0 && home_b > 0.0);
    assert!(foreign_a > 0.0 && foreign_b < 0.0);
    assert_abs_diff_eq!(home_a + foreign_a, 0.0, epsilon = 1e-8);
    assert_abs_diff_eq!(home_b + foreign_b, 0.0, epsilon = 1e-8);

    // Factor-price equalization while both stay diversified
    assert_eq!(eq.home().regime(), ProductionRegime::Diversified);
    assert_eq!(eq.foreign().regime(), ProductionRegime::Diversified);
    assert_relative_eq!(
        eq.home().wage_rental_ratio(),
        eq.foreign().wage_rental_ratio(),
        max_relative = 1e-10
    );
    assert_relative_eq!(
        eq.home().factor_prices().wage,
        eq.foreign().factor_prices().wage,
        max_relative = 1e-10
    );
}

#[test]
fn textbook_hos_allocation_recombines_to_endowments() {
    let economy = HosEconomy::new(EconomyParameters::textbook_hos()).unwrap();
    let r = hos::solve(&economy, 1.0, &SolverConfig::default()).unwrap();

    assert_relative_eq!(r.wage_rental_ratio(), 1.0, max_relative = 1e-12);
    assert_relative_eq!(r.allocation().labor_a(), 40.0, max_relative = 1e-10);
    assert_relative_eq!(r.allocation().capital_a(), 60.0, max_relative = 1e-10);
    assert_relative_eq!(
        r.allocation().capital_a() + r.allocation().capital_b(),
        100.0,
        max_relative = 1e-14
    );
    assert_relative_eq!(
        r.allocation().labor_a() + r.allocation().labor_b(),
        100.0,
        max_relative = 1e-14
    );

    let a = r.allocation();
    assert_relative_eq!(
        r.output().good_a(),
        output(a.capital_a(), a.labor_a(), 0.6),
        max_relative = 1e-12
    );
    assert_relative_eq!(
        r.output().good_b(),
        output(a.capital_b(), a.labor_b(), 0.4),
        max_relative = 1e-12
    );
}

#[test]
fn specific_factors_scenario_equalizes_marginal_products() {
    let params = SpecificFactorsParameters::textbook();
    let r = specific_factors::solve(&params, 1.0, &SolverConfig::default()).unwrap();
    assert_relative_eq!(r.allocation().labor_a(), 200.0, max_relative = 1e-9);
    assert_relative_eq!(r.allocation().total_labor(), 400.0, max_relative = 1e-12);

    let (vmp_a, vmp_b) =
        specific_factors::value_marginal_products(&params, 1.0, r.allocation().labor_a());
    assert_relative_eq!(vmp_a, vmp_b, max_relative = 1e-9);
}

#[test]
fn symmetric_autarky_optimum_is_the_midpoint() {
    let params = EconomyParameters::new(100.0, 100.0, 0.5, 0.5, 0.5).unwrap();
    let r = autarky::optimize(&params, &SolverConfig::default()).unwrap();
    assert_abs_diff_eq!(r.allocation().capital_a(), 50.0, epsilon = 1e-3);
    assert_abs_diff_eq!(r.allocation().labor_a(), 50.0, epsilon = 1e-3);
}

#[test]
fn equal_intensities_are_rejected_by_hos() {
    let params = EconomyParameters::new(100.0, 100.0, 0.5, 0.5, 0.5).unwrap();
    assert!(matches!(
        HosEconomy::new(params),
        Err(EquilibriumError::SingularFactorIntensity { .. })
    ));
}

#[test]
fn specialization_outside_the_cone() {
    let economy = HosEconomy::new(EconomyParameters::textbook_hos()).unwrap();
    let config = SolverConfig::default();

    let dear_a = hos::solve(&economy, 5.0, &config).unwrap();
    assert_eq!(dear_a.regime(), ProductionRegime::SpecializedA);
    assert_eq!(dear_a.output().good_b(), 0.0);

    let cheap_a = hos::solve(&economy, 0.2, &config).unwrap();
    assert_eq!(cheap_a.regime(), ProductionRegime::SpecializedB);
    assert_eq!(cheap_a.output().good_a(), 0.0);
}

#[test]
fn stolper_samuelson_and_frontier_series() {
    let economy = HosEconomy::new(EconomyParameters::textbook_hos()).unwrap();
    let config = SolverConfig::default();
    let curve = stolper_samuelson_curve(&economy, &[0.8, 1.0, 1.2], &config).unwrap();
    assert!(curve[0].1 > curve[1].1 && curve[1].1 > curve[2].1);

    // The equilibrium at p = 1 lies on the frontier
    let r = hos::solve(&economy, 1.0, &config).unwrap();
    let ppf = frontier(economy.params(), 101).unwrap();
    let on_frontier = &ppf[40];
    assert_relative_eq!(on_frontier.good_a(), r.output().good_a(), max_relative = 1e-9);
    assert_relative_eq!(on_frontier.good_b(), r.output().good_b(), max_relative = 1e-9);
}

#[test]
fn results_serialize_to_json() {
    let config = SolverConfig::default();
    let eq = world_equilibrium(&hos_economy(130.0, 100.0), &hos_economy(100.0, 130.0), &config)
        .unwrap();
    let json = serde_json::to_string(&eq).unwrap();
    let back: TradeEquilibrium = serde_json::from_str(&json).unwrap();
    assert_eq!(back, eq);

    let single: EquilibriumResult = serde_json::from_str(&serde_json::to_string(eq.home()).unwrap())
        .unwrap();
    assert_eq!(single.consumption(), eq.home().consumption());
}

#[test]
fn json_parameters_are_validated() {
    let ok: HosEconomy = serde_json::from_str(
        r#"{"capital": 100.0, "labor": 100.0, "alpha": 0.6, "beta": 0.4, "theta": 0.5}"#,
    )
    .unwrap();
    assert_eq!(ok.params(), &EconomyParameters::textbook_hos());

    let bad_share = serde_json::from_str::<EconomyParameters>(
        r#"{"capital": 100.0, "labor": 100.0, "alpha": 1.2, "beta": 0.4, "theta": 0.5}"#,
    );
    assert!(bad_share.is_err());

    let singular = serde_json::from_str::<HosEconomy>(
        r#"{"capital": 100.0, "labor": 100.0, "alpha": 0.5, "beta": 0.5, "theta": 0.5}"#,
    );
    assert!(singular.is_err());

    let sfm = serde_json::from_str::<SpecificFactorsParameters>(
        r#"{"land": 100.0, "capital": 100.0, "labor": -4.0,
            "labor_share_a": 0.5, "labor_share_b": 0.5, "theta": 0.5}"#,
    );
    assert!(sfm.is_err());
}

#[test]
fn solver_config_loads_from_json() {
    let mut config = SolverConfig::default();
    config.root.tolerance = 1e-10;
    let json = serde_json::to_string(&config).unwrap();
    let back: SolverConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(back, config);
}

/// Tariff pipeline: small-country tariff, then a large-country tariff war.
#[test]
fn tariff_in_general_equilibrium() {
    let config = SolverConfig::default();
    let params = SpecificFactorsParameters::textbook();

    // Small country importing A loses welfare as the tariff rises.
    let mut last_utility = f64::INFINITY;
    for tariff in [0.0, 0.05, 0.1, 0.2] {
        let outcome = open_economy_with_tariff(&params, 0.8, tariff, &config).unwrap();
        let (imports_a, imports_b) = outcome.result().net_imports().unwrap();
        assert_abs_diff_eq!(0.8 * imports_a + imports_b, 0.0, epsilon = 1e-9);
        let utility = outcome.result().consumption().unwrap().utility();
        assert!(utility < last_utility);
        last_utility = utility;
    }
    let free = open_economy(&params, 0.8, &config).unwrap();
    let zero = open_economy_with_tariff(&params, 0.8, 0.0, &config).unwrap();
    assert_eq!(zero.result(), &free);

    // Large labor-rich importer of A turns the terms of trade in its favor.
    let home = hos_economy(100.0, 130.0);
    let foreign = hos_economy(130.0, 100.0);
    let free_trade = world_equilibrium(&home, &foreign, &config).unwrap();
    let with_tariff = world_equilibrium_with_tariff(&home, 0.1, &foreign, &config).unwrap();
    assert!(with_tariff.world_price() < free_trade.world_price());
    assert_abs_diff_eq!(with_tariff.excess_demand_a(), 0.0, epsilon = 1e-8);
    assert_abs_diff_eq!(with_tariff.excess_demand_b(), 0.0, epsilon = 1e-8);

    let json = serde_json::to_string(&with_tariff).unwrap();
    let back: TradeEquilibrium = serde_json::from_str(&json).unwrap();
    assert_eq!(back.home_tariff(), 0.1);
}

#[test]
fn specific_factors_frontier_contains_equilibrium_output() {
    let params = SpecificFactorsParameters::textbook();
    let ppf = specific_factors_frontier(&params, 401).unwrap();
    let r = specific_factors::solve(&params, 1.0, &SolverConfig::default()).unwrap();
    let point = &ppf[200];
    assert_relative_eq!(point.good_a(), r.output().good_a(), max_relative = 1e-8);
    assert_relative_eq!(point.good_b(), r.output().good_b(), max_relative = 1e-8);
}

#[test]
fn hos_handles_prices_far_outside_the_cone() {
    let config = SolverConfig::default();
    let economy = HosEconomy::new(EconomyParameters::textbook_hos()).unwrap();
    for (price, regime) in [
        (1e70, ProductionRegime::SpecializedA),
        (1e-70, ProductionRegime::SpecializedB),
    ] {
        let r = hos::solve(&economy, price, &config).unwrap();
        assert_eq!(r.regime(), regime);
    }
}

#[test]
fn deserialized_results_are_validated() {
    let economy = HosEconomy::new(EconomyParameters::textbook_hos()).unwrap();
    let r = hos::solve(&economy, 1.0, &SolverConfig::default()).unwrap();
    let mut json = serde_json::to_value(r).unwrap();
    json["allocation"]["labor_b"] = serde_json::json!(-5.0);
    assert!(serde_json::from_value::<EquilibriumResult>(json).is_err());
}
