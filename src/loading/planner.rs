//! Load planning on top of the GA engine.

use super::config::PlannerConfig;
use super::fitness::{FitnessBreakdown, FitnessEvaluator};
use super::initializer::{BuildOutcome, PopulationInitializer};
use super::report::PlanReport;
use super::types::LoadPlan;
use crate::error::Result;
use crate::ga::{GaProblem, GaRunner, GenerationStats, Individual};
use crate::inventory::Inventory;
use rand::Rng;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

/// The load planning problem as seen by [`GaRunner`].
///
/// Individuals are [`LoadPlan`]s seeded by the [`PopulationInitializer`];
/// crossover exchanges runs of whole loads and mutation reorders loads.
pub struct LoadPlanningProblem<'a> {
    initializer: PopulationInitializer<'a>,
    evaluator: FitnessEvaluator<'a>,
    mutation_index_prob: f64,
}

impl<'a> LoadPlanningProblem<'a> {
    pub fn new(inventory: &'a Inventory, config: &'a PlannerConfig) -> Self {
        Self {
            initializer: PopulationInitializer::new(
                inventory,
                &config.limits,
                config.max_builds_per_plan,
            ),
            evaluator: FitnessEvaluator::new(inventory, &config.limits, &config.penalties),
            mutation_index_prob: config.mutation_index_prob,
        }
    }

    pub fn evaluator(&self) -> &FitnessEvaluator<'a> {
        &self.evaluator
    }
}

impl GaProblem for LoadPlanningProblem<'_> {
    type Individual = LoadPlan;

    fn create_individual<R: Rng>(&self, rng: &mut R) -> LoadPlan {
        let build = self.initializer.build_plan(rng);
        if let BuildOutcome::UnplaceableResidual(ref warnings) = build.outcome {
            log::debug!("seeded plan carries {} residual sku(s)", warnings.len());
        }
        build.plan
    }

    fn evaluate(&self, plan: &LoadPlan) -> f64 {
        self.evaluator.evaluate(plan)
    }

    fn crossover<R: Rng>(&self, first: &mut LoadPlan, second: &mut LoadPlan, rng: &mut R) {
        first.crossover_with(second, rng);
    }

    fn mutate<R: Rng>(&self, plan: &mut LoadPlan, rng: &mut R) {
        plan.shuffle_loads(self.mutation_index_prob, rng);
    }

    fn on_generation(&self, generation: usize, best_fitness: f64) {
        log::trace!("load planning gen {generation}: best={best_fitness:.1}");
    }
}

/// Outcome of a planning run.
#[derive(Debug, Clone)]
pub struct PlanResult {
    /// The best plan of the final population.
    pub plan: LoadPlan,
    pub fitness: f64,
    pub breakdown: FitnessBreakdown,
    pub report: PlanReport,
    pub generations: usize,
    pub cancelled: bool,
    pub history: Vec<GenerationStats>,
}

impl PlanResult {
    /// True when the plan violates no rule. Callers with a looser notion of
    /// acceptable can compare [`fitness`](Self::fitness) to a threshold.
    pub fn is_feasible(&self) -> bool {
        self.breakdown.is_feasible()
    }
}

/// Plans truck loads for an inventory.
///
/// ```
/// use u_loadplan::inventory::{Inventory, SkuRecord};
/// use u_loadplan::loading::{LoadPlanner, PlannerConfig};
///
/// let inventory = Inventory::from_records(vec![
///     SkuRecord::new("A", 56, 300.0, 1.0, 400.0),
/// ])?;
/// let config = PlannerConfig::default()
///     .with_population_size(10)
///     .with_generations(5)
///     .with_seed(42);
///
/// let result = LoadPlanner::new(inventory, config)?.plan()?;
/// assert_eq!(result.report.load_count(), result.plan.non_empty_loads());
/// # Ok::<(), u_loadplan::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct LoadPlanner {
    inventory: Inventory,
    config: PlannerConfig,
}

impl LoadPlanner {
    /// Validates `config` and binds it to `inventory`.
    pub fn new(inventory: Inventory, config: PlannerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { inventory, config })
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Runs the full generation budget.
    pub fn plan(&self) -> Result<PlanResult> {
        self.plan_with_cancel(None)
    }

    /// Runs until the generation budget is spent or `cancel` is set, in
    /// which case the best plan of the current population is returned.
    pub fn plan_with_cancel(&self, cancel: Option<Arc<AtomicBool>>) -> Result<PlanResult> {
        let problem = LoadPlanningProblem::new(&self.inventory, &self.config);

        if self.inventory.total_units() == 0 {
            log::info!("nothing to ship: returning an empty plan");
            let plan = LoadPlan::default();
            return Ok(self.finish(&problem, plan, 0, false, Vec::new()));
        }

        log::info!(
            "planning {} units of {} sku(s)",
            self.inventory.total_units(),
            self.inventory.len()
        );
        let result = GaRunner::run_with_cancel(&problem, &self.config.ga, cancel)?;
        Ok(self.finish(
            &problem,
            result.best,
            result.generations,
            result.cancelled,
            result.history,
        ))
    }

    /// Scores and reports an arbitrary plan against this planner's inventory
    /// and configuration.
    pub fn assess(&self, plan: &LoadPlan) -> (FitnessBreakdown, PlanReport) {
        let problem = LoadPlanningProblem::new(&self.inventory, &self.config);
        (
            problem.evaluator().breakdown(plan),
            PlanReport::new(&self.inventory, plan.loads()),
        )
    }

    fn finish(
        &self,
        problem: &LoadPlanningProblem<'_>,
        mut plan: LoadPlan,
        generations: usize,
        cancelled: bool,
        history: Vec<GenerationStats>,
    ) -> PlanResult {
        let breakdown = problem.evaluator().breakdown(&plan);
        plan.set_fitness(breakdown.total());
        let report = PlanReport::new(&self.inventory, plan.loads());

        log::info!(
            "plan ready: loads={}, fitness={:.1}, feasible={}",
            report.load_count(),
            breakdown.total(),
            breakdown.is_feasible()
        );

        PlanResult {
            fitness: breakdown.total(),
            plan,
            breakdown,
            report,
            generations,
            cancelled,
            history,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::SkuRecord;
    use crate::loading::LoadLimits;
    use crate::random::create_rng;

    fn small_config() -> PlannerConfig {
        PlannerConfig::default()
            .with_population_size(12)
            .with_generations(8)
            .with_seed(42)
            .with_parallel(false)
    }

    fn mixed() -> Inventory {
        Inventory::from_records(vec![
            SkuRecord::new("LIGHT", 60, 300.0, 1.0, 400.0),
            SkuRecord::new("HEAVY", 30, 700.0, 1.4, 350.0),
            SkuRecord::new("FLAT", 10, 120.0, 0.6, 0.0),
        ])
        .unwrap()
    }

    #[test]
    fn test_problem_individuals_cover_inventory() {
        let inv = mixed();
        let config = small_config();
        let problem = LoadPlanningProblem::new(&inv, &config);
        let plan = problem.create_individual(&mut create_rng(1));
        assert_eq!(plan.unit_counts(inv.len()), vec![60, 30, 10]);
        assert!(!plan.is_evaluated());
    }

    #[test]
    fn test_mutation_keeps_units() {
        let inv = mixed();
        let config = small_config().with_mutation_index_prob(1.0);
        let problem = LoadPlanningProblem::new(&inv, &config);
        let mut rng = create_rng(2);
        let mut plan = problem.create_individual(&mut rng);
        let before = plan.unit_counts(inv.len());
        problem.mutate(&mut plan, &mut rng);
        assert_eq!(plan.unit_counts(inv.len()), before);
    }

    #[test]
    fn test_plan_reports_best() {
        let planner = LoadPlanner::new(mixed(), small_config()).unwrap();
        let result = planner.plan().unwrap();

        assert_eq!(result.generations, 8);
        assert!(!result.cancelled);
        assert_eq!(result.fitness, result.breakdown.total());
        assert_eq!(result.plan.fitness(), result.fitness);
        assert_eq!(result.history.last().unwrap().best, result.fitness);
        assert_eq!(result.report.load_count(), result.plan.non_empty_loads());
    }

    #[test]
    fn test_same_seed_same_plan() {
        let a = LoadPlanner::new(mixed(), small_config()).unwrap().plan().unwrap();
        let b = LoadPlanner::new(mixed(), small_config().with_parallel(true))
            .unwrap()
            .plan()
            .unwrap();
        assert_eq!(a.plan.loads(), b.plan.loads());
        assert_eq!(a.fitness, b.fitness);
    }

    #[test]
    fn test_empty_inventory_is_not_an_error() {
        let inv = Inventory::from_records(vec![SkuRecord::new("A", 0, 10.0, 1.0, 0.0)]).unwrap();
        let result = LoadPlanner::new(inv, small_config()).unwrap().plan().unwrap();
        assert!(result.plan.is_empty());
        assert_eq!(result.fitness, 0.0);
        assert_eq!(result.generations, 0);
        assert!(result.report.summaries.is_empty());
    }

    #[test]
    fn test_invalid_config_rejected_up_front() {
        let config = small_config().with_limits(LoadLimits::default().with_max_weight(0.0));
        assert!(LoadPlanner::new(mixed(), config).is_err());
    }

    #[test]
    fn test_cancelled_before_start_returns_initial_best() {
        let planner = LoadPlanner::new(mixed(), small_config()).unwrap();
        let cancel = Arc::new(AtomicBool::new(true));
        let result = planner.plan_with_cancel(Some(cancel)).unwrap();
        assert!(result.cancelled);
        assert_eq!(result.generations, 0);
        assert_eq!(result.plan.unit_counts(3), vec![60, 30, 10]);
    }

    #[test]
    fn test_assess_matches_plan_result() {
        let planner = LoadPlanner::new(mixed(), small_config()).unwrap();
        let result = planner.plan().unwrap();
        let (breakdown, report) = planner.assess(&result.plan);
        assert_eq!(breakdown, result.breakdown);
        assert_eq!(report, result.report);
    }
}
