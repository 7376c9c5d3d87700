//! End-to-end planning scenarios.

use u_loadplan::ga::Individual;
use u_loadplan::inventory::{Inventory, SkuId, SkuRecord};
use u_loadplan::loading::{
    FitnessEvaluator, Load, LoadLimits, LoadPlan, LoadPlanner, PenaltyWeights, PlannerConfig,
    PopulationInitializer, Position,
};
use u_loadplan::random::create_rng;
use u_loadplan::{Error, ValidationError};

fn quick_config(seed: u64) -> PlannerConfig {
    PlannerConfig::default()
        .with_population_size(20)
        .with_generations(15)
        .with_seed(seed)
}

#[test]
fn scenario_single_full_base_load() {
    let inventory =
        Inventory::from_records(vec![SkuRecord::new("A", 28, 300.0, 1.0, 400.0)]).unwrap();
    let result = LoadPlanner::new(inventory, quick_config(1))
        .unwrap()
        .plan()
        .unwrap();

    let loads = result.plan.loads();
    assert_eq!(loads.len(), 1);
    assert_eq!(loads[0].base, vec![SkuId(0); 28]);
    assert!(loads[0].remonte.is_empty());
    assert_eq!(result.fitness, 1.0 + 28.0 * 3_000.0 + 12.0 * 2_000.0);
}

#[test]
fn scenario_overweight_pallet_still_planned() {
    let inventory =
        Inventory::from_records(vec![SkuRecord::new("HEAVY", 1, 25_000.0, 1.0, 0.0)]).unwrap();
    let config = quick_config(2);
    let generations = config.ga.max_generations;
    let result = LoadPlanner::new(inventory, config).unwrap().plan().unwrap();

    assert_eq!(result.generations, generations);
    assert_eq!(result.breakdown.weight_overage, 1_000_000.0);
    assert!(!result.is_feasible());
    assert_eq!(result.report.summaries[0].total_weight, 25_000.0);
}

#[test]
fn scenario_exact_coverage_has_no_coverage_penalty() {
    let inventory = Inventory::from_records(vec![
        SkuRecord::new("A", 70, 280.0, 0.9, 400.0),
        SkuRecord::new("B", 25, 620.0, 1.4, 300.0),
        SkuRecord::new("C", 9, 90.0, 0.5, 0.0),
    ])
    .unwrap();
    let limits = LoadLimits::default();
    let weights = PenaltyWeights::default();
    let init = PopulationInitializer::new(&inventory, &limits, None);
    let eval = FitnessEvaluator::new(&inventory, &limits, &weights);

    let mut rng = create_rng(3);
    for _ in 0..10 {
        let plan = init.build_plan(&mut rng).plan;
        assert_eq!(plan.unit_counts(3), vec![70, 25, 9]);
        let b = eval.breakdown(&plan);
        assert_eq!(b.over_allocation, 0.0);
        assert_eq!(b.under_allocation, 0.0);
    }
}

#[test]
fn scenario_over_allocation_kink() {
    let inventory =
        Inventory::from_records(vec![SkuRecord::new("A", 100, 100.0, 0.1, 1_000.0)]).unwrap();
    let limits = LoadLimits::default();
    let weights = PenaltyWeights::default();
    let eval = FitnessEvaluator::new(&inventory, &limits, &weights);

    let plan_with = |units: usize| {
        let loads = (0..units)
            .collect::<Vec<_>>()
            .chunks(56)
            .map(|c| {
                let base = c.len().min(28);
                Load {
                    base: vec![SkuId(0); base],
                    remonte: vec![SkuId(0); c.len() - base],
                }
            })
            .collect();
        LoadPlan::new(loads)
    };

    assert_eq!(eval.breakdown(&plan_with(103)).over_allocation, 3.0 * 500.0);
    assert_eq!(
        eval.breakdown(&plan_with(107)).over_allocation,
        5.0 * 500.0 + 2.0 * 10_000.0
    );
}

#[test]
fn compliant_plan_scores_its_load_count() {
    let inventory = Inventory::from_records(vec![
        SkuRecord::new("BASE", 56, 350.0, 1.0, 400.0),
        SkuRecord::new("TOP", 56, 300.0, 0.5, 0.0),
    ])
    .unwrap();
    let limits = LoadLimits::default();
    let weights = PenaltyWeights::default();
    let eval = FitnessEvaluator::new(&inventory, &limits, &weights);

    let load = Load {
        base: vec![SkuId(0); 28],
        remonte: vec![SkuId(1); 28],
    };
    let mut plan = LoadPlan::new(vec![load.clone(), load.clone()]);
    plan.loads_mut().push(Load {
        base: vec![SkuId(1); 28],
        remonte: vec![SkuId(0); 28],
    });
    // Third load stacks 350 kg on pallets that take nothing on top
    assert_eq!(eval.breakdown(&plan).pairing, 28.0 * 10_000.0);

    plan.loads_mut().pop();
    let b = eval.breakdown(&plan);
    assert_eq!(b.under_allocation, 0.0);
    assert!(b.is_feasible(), "{b:?}");
    assert_eq!(eval.evaluate(&plan), 2.0);
}

#[test]
fn initializer_is_reproducible_and_capped() {
    let inventory = Inventory::from_records(vec![
        SkuRecord::new("A", 130, 300.0, 1.0, 400.0),
        SkuRecord::new("B", 41, 800.0, 1.2, 900.0),
    ])
    .unwrap();
    let limits = LoadLimits::default();
    let init = PopulationInitializer::new(&inventory, &limits, None);

    let first: Vec<Vec<Load>> = init
        .populate(8, &mut create_rng(17))
        .into_iter()
        .map(LoadPlan::into_loads)
        .collect();
    let second: Vec<Vec<Load>> = init
        .populate(8, &mut create_rng(17))
        .into_iter()
        .map(LoadPlan::into_loads)
        .collect();
    assert_eq!(first, second);

    for load in first.iter().flatten() {
        assert!(load.base.len() <= 28);
        assert!(load.remonte.len() <= 28);
    }
}

#[test]
fn evaluation_leaves_cache_to_the_runner() {
    let inventory =
        Inventory::from_records(vec![SkuRecord::new("A", 10, 300.0, 1.0, 400.0)]).unwrap();
    let limits = LoadLimits::default();
    let weights = PenaltyWeights::default();
    let eval = FitnessEvaluator::new(&inventory, &limits, &weights);
    let plan = LoadPlan::new(vec![Load {
        base: vec![SkuId(0); 10],
        remonte: vec![],
    }]);
    let score = eval.evaluate(&plan);
    assert_eq!(eval.evaluate(&plan), score);
    assert!(!plan.is_evaluated());
}

#[test]
fn table_input_errors_are_fatal() {
    let headers = ["sku", "required_quantity", "unit_weight", "unit_volume"];
    let rows = vec![vec!["A", "1", "300", "1"]];
    let err: Error = Inventory::from_table(&headers, &rows).unwrap_err().into();
    assert!(matches!(
        err,
        Error::Validation(ValidationError::MissingColumn("remonte_threshold"))
    ));

    let headers = [
        "sku",
        "required_quantity",
        "unit_weight",
        "unit_volume",
        "remonte_threshold",
    ];
    let rows = vec![vec!["A", "-3", "300", "1", "400"]];
    assert!(matches!(
        Inventory::from_table(&headers, &rows),
        Err(ValidationError::Negative { row: 1, .. })
    ));
}

#[test]
fn report_details_cover_every_pallet() {
    let inventory = Inventory::from_records(vec![
        SkuRecord::new("A", 50, 300.0, 1.0, 400.0),
        SkuRecord::new("B", 20, 500.0, 1.5, 350.0),
    ])
    .unwrap();
    let result = LoadPlanner::new(inventory, quick_config(9))
        .unwrap()
        .plan()
        .unwrap();

    let by_position = |pos: Position| -> usize {
        result
            .report
            .details
            .iter()
            .filter(|d| d.position == pos)
            .map(|d| d.quantity)
            .sum()
    };
    let base: usize = result.report.summaries.iter().map(|s| s.base_count).sum();
    let remonte: usize = result.report.summaries.iter().map(|s| s.remonte_count).sum();
    assert_eq!(by_position(Position::Base), base);
    assert_eq!(by_position(Position::Remonte), remonte);
}
