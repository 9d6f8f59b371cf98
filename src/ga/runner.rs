//! Evolution driver.
//!
//! Runs the generational loop: every generation is built from scratch by
//! select → crossover → mutate and replaces the previous one wholesale.
//! There is no elitism, so the best timetable seen so far can be lost
//! between generations.
//!
//! Progress is exposed as a lazy, finite iterator ([`Evolution`]) yielding
//! one [`GenerationReport`] per generation. A caller may drain it, step it
//! to drive a progress display, or simply stop pulling to abort early.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use super::chromosome::{best_index, TimetableChromosome};
use super::problem::TimetableProblem;
use super::GaConfig;
use crate::error::TimetableError;
use crate::kpi::TimetableKpi;
use crate::models::{Agent, Intervention, Timetable};
use crate::validation::validate_input;

/// Lifecycle of an [`Evolution`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvolutionState {
    /// Initial population built; no generation run yet.
    Initialized,
    /// `generation` is the next generation to run.
    Evolving {
        /// Zero-based index of the next generation.
        generation: usize,
    },
    /// All configured generations have run.
    Done,
}

/// Progress record emitted after every generation.
#[derive(Debug, Clone)]
pub struct GenerationReport {
    /// Zero-based generation index.
    pub generation: usize,
    /// Fittest timetable of this generation.
    pub best: Timetable,
    /// Its fitness.
    pub best_fitness: f64,
}

/// Outcome of a complete run.
#[derive(Debug, Clone)]
pub struct GaResult {
    /// Fittest timetable of the final generation.
    pub best: Timetable,
    /// Its fitness.
    pub best_fitness: f64,
    /// Generations actually run.
    pub generations: usize,
    /// Best fitness per generation.
    pub history: Vec<f64>,
}

/// Genetic-algorithm timetable optimizer.
///
/// # Example
/// ```
/// use u_timetable::ga::{GaConfig, TimetableGa};
/// use u_timetable::models::{Agent, Intervention, ShiftType};
///
/// let agents = vec![
///     Agent::new("A", 8.0).with_skill("fire"),
///     Agent::new("B", 8.0),
/// ];
/// let interventions = vec![
///     Intervention::new(1, ShiftType::Day).with_skill("fire").with_duration_hours(4.0),
/// ];
/// let config = GaConfig::default()
///     .with_population_size(10)
///     .with_generations(5)
///     .with_seed(42);
///
/// let ga = TimetableGa::new(&agents, &interventions, config).unwrap();
/// let result = ga.run();
/// assert_eq!(result.history.len(), 5);
/// assert_eq!(result.best.agent_for_client(1), Some("A"));
/// ```
pub struct TimetableGa {
    problem: TimetableProblem,
}

impl TimetableGa {
    /// Validates the inputs and builds the optimizer.
    ///
    /// # Errors
    /// [`TimetableError::InvalidConfig`] listing every problem found by
    /// [`validate_input`].
    pub fn new(
        agents: &[Agent],
        interventions: &[Intervention],
        config: GaConfig,
    ) -> Result<Self, TimetableError> {
        validate_input(agents, interventions, &config).map_err(TimetableError::InvalidConfig)?;
        Ok(Self {
            problem: TimetableProblem::new(agents, interventions, config),
        })
    }

    /// The underlying problem definition.
    pub fn problem(&self) -> &TimetableProblem {
        &self.problem
    }

    /// Fitness of an arbitrary timetable under this problem.
    pub fn fitness(&self, timetable: &Timetable) -> f64 {
        self.problem.evaluate(timetable)
    }

    /// Load, utilization, and violations of a timetable under this problem.
    pub fn kpi(&self, timetable: &Timetable) -> TimetableKpi {
        TimetableKpi::calculate(timetable, &self.problem.agents, &self.problem.config.weights)
    }

    /// Starts an evolution using the configured seed (or OS entropy).
    pub fn evolve(&self) -> Evolution<'_> {
        let rng = match self.problem.config.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_os_rng(),
        };
        self.evolve_with_rng(rng)
    }

    /// Starts an evolution driven by a caller-supplied RNG.
    pub fn evolve_with_rng<R: Rng>(&self, mut rng: R) -> Evolution<'_, R> {
        let config = &self.problem.config;
        info!(
            agents = self.problem.agents.len(),
            interventions = self.problem.interventions.len(),
            population_size = config.population_size,
            generations = config.generations,
            "starting timetable evolution"
        );
        let population = self.problem.initial_population(&mut rng);
        Evolution {
            problem: &self.problem,
            rng,
            population,
            state: if config.generations == 0 {
                EvolutionState::Done
            } else {
                EvolutionState::Initialized
            },
        }
    }

    /// Runs every generation and returns the final best timetable.
    pub fn run(&self) -> GaResult {
        self.run_with(|_| {})
    }

    /// Runs every generation, invoking `on_generation` after each one.
    pub fn run_with<F>(&self, on_generation: F) -> GaResult
    where
        F: FnMut(&GenerationReport),
    {
        self.evolve().run_with(on_generation)
    }
}

/// A running evolution: a lazy, finite stream of generation reports.
///
/// Holds no resources beyond memory; dropping it aborts the run.
pub struct Evolution<'a, R: Rng = SmallRng> {
    problem: &'a TimetableProblem,
    rng: R,
    population: Vec<TimetableChromosome>,
    state: EvolutionState,
}

impl<R: Rng> Evolution<'_, R> {
    /// Current lifecycle state.
    pub fn state(&self) -> EvolutionState {
        self.state
    }

    /// The current population.
    pub fn population(&self) -> &[TimetableChromosome] {
        &self.population
    }

    /// Fittest member of the current population.
    pub fn current_best(&self) -> Option<&TimetableChromosome> {
        best_index(&self.population).map(|idx| &self.population[idx])
    }

    /// Drains the remaining generations into a [`GaResult`].
    ///
    /// With no generations left to run, the result is the best member of
    /// the current population.
    pub fn run_with<F>(mut self, mut on_generation: F) -> GaResult
    where
        F: FnMut(&GenerationReport),
    {
        let mut history = Vec::new();
        let mut last = None;
        for report in self.by_ref() {
            on_generation(&report);
            history.push(report.best_fitness);
            last = Some(report);
        }

        let (best, best_fitness) = match last {
            Some(report) => (report.best, report.best_fitness),
            None => match self.current_best() {
                Some(ch) => (ch.timetable.clone(), ch.fitness),
                None => (Timetable::new(), 0.0),
            },
        };
        info!(
            generations = history.len(),
            best_fitness, "timetable evolution finished"
        );
        GaResult {
            best,
            best_fitness,
            generations: history.len(),
            history,
        }
    }

    fn step(&mut self, generation: usize) -> GenerationReport {
        let mut children = Vec::with_capacity(self.problem.config.population_size);
        for _ in 0..self.problem.config.population_size {
            children.push(self.problem.offspring(&self.population, &mut self.rng));
        }
        self.population = children;

        let (best, best_fitness) = match self.current_best() {
            Some(ch) => (ch.timetable.clone(), ch.fitness),
            None => (Timetable::new(), 0.0),
        };
        debug!(generation, best_fitness, "generation complete");
        GenerationReport {
            generation,
            best,
            best_fitness,
        }
    }
}

impl<R: Rng> Iterator for Evolution<'_, R> {
    type Item = GenerationReport;

    fn next(&mut self) -> Option<GenerationReport> {
        let generation = match self.state {
            EvolutionState::Done => return None,
            EvolutionState::Initialized => 0,
            EvolutionState::Evolving { generation } => generation,
        };
        let report = self.step(generation);
        self.state = if generation + 1 >= self.problem.config.generations {
            EvolutionState::Done
        } else {
            EvolutionState::Evolving {
                generation: generation + 1,
            }
        };
        Some(report)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = match self.state {
            EvolutionState::Done => 0,
            EvolutionState::Initialized => self.problem.config.generations,
            EvolutionState::Evolving { generation } => {
                self.problem.config.generations.saturating_sub(generation)
            }
        };
        (remaining, Some(remaining))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ShiftType, Timeslot, MS_PER_HOUR};
    use crate::validation::ValidationErrorKind;
    use std::sync::Arc;

    fn fire_scenario() -> (Vec<Agent>, Vec<Intervention>) {
        let agents = vec![
            Agent::new("A", 8.0).with_skill("fire"),
            Agent::new("B", 8.0),
        ];
        let interventions = vec![Intervention::new(1, ShiftType::Day)
            .with_skill("fire")
            .with_duration_hours(4.0)];
        (agents, interventions)
    }

    fn mixed_scenario() -> (Vec<Agent>, Vec<Intervention>) {
        let agents = vec![
            Agent::new("1", 40.0).with_skill("fire"),
            Agent::new("2", 40.0).with_skill("fighting"),
            Agent::new("3", 40.0).with_skill("maintenance"),
            Agent::new("4", 40.0).with_skills(["fire", "maintenance"]),
            Agent::new("5", 32.0),
        ];
        let mut interventions = Vec::new();
        for client in 0..12u32 {
            let (skill, shift, hours) = match client % 4 {
                0 => ("fire", ShiftType::EarlyDay, 4.0),
                1 => ("fighting", ShiftType::Night, 6.0),
                2 => ("camera", ShiftType::LateDay, 3.0),
                _ => ("maintenance", ShiftType::EarlyDay, 5.0),
            };
            interventions.push(
                Intervention::new(client, shift)
                    .with_skill(skill)
                    .with_duration_hours(hours),
            );
        }
        (agents, interventions)
    }

    #[test]
    fn test_fire_scenario_converges_to_skilled_agent() {
        let (agents, interventions) = fire_scenario();
        let config = GaConfig::default()
            .with_population_size(10)
            .with_generations(5)
            .with_seed(42);
        let ga = TimetableGa::new(&agents, &interventions, config).unwrap();
        let result = ga.run();

        assert_eq!(result.best.agent_for_client(1), Some("A"));
        assert!((result.best_fitness - 8.0).abs() < 1e-10);

        // Same placement, moved to B.
        let slot = result.best.slots_for("A")[0].clone();
        let mut on_b = Timetable::with_agents(&agents);
        on_b.assign("B", slot);
        assert!(result.best_fitness > ga.fitness(&on_b));
        assert!(ga.kpi(&result.best).is_feasible());
        assert!(!ga.kpi(&on_b).is_feasible());
    }

    #[test]
    fn test_iterator_yields_one_report_per_generation() {
        let (agents, interventions) = mixed_scenario();
        let config = GaConfig::default()
            .with_population_size(12)
            .with_generations(7)
            .with_seed(1);
        let ga = TimetableGa::new(&agents, &interventions, config).unwrap();

        let mut evolution = ga.evolve();
        assert_eq!(evolution.state(), EvolutionState::Initialized);
        assert_eq!(evolution.size_hint(), (7, Some(7)));
        assert_eq!(evolution.population().len(), 12);

        let first = evolution.next().unwrap();
        assert_eq!(first.generation, 0);
        assert_eq!(evolution.state(), EvolutionState::Evolving { generation: 1 });

        let rest: Vec<GenerationReport> = evolution.by_ref().collect();
        assert_eq!(rest.len(), 6);
        assert_eq!(rest.last().unwrap().generation, 6);
        assert_eq!(evolution.state(), EvolutionState::Done);
        assert!(evolution.next().is_none());
    }

    #[test]
    fn test_report_matches_population_best() {
        let (agents, interventions) = mixed_scenario();
        let config = GaConfig::default()
            .with_population_size(10)
            .with_generations(3)
            .with_seed(5);
        let ga = TimetableGa::new(&agents, &interventions, config).unwrap();
        let mut evolution = ga.evolve();
        while let Some(report) = evolution.next() {
            let max = evolution
                .population()
                .iter()
                .map(|c| c.fitness)
                .fold(f64::MIN, f64::max);
            assert_eq!(report.best_fitness, max);
            assert_eq!(report.best_fitness, ga.fitness(&report.best));
            assert!(report.best_fitness >= 0.0);
        }
    }

    #[test]
    fn test_seeded_runs_are_deterministic() {
        let (agents, interventions) = mixed_scenario();
        let config = GaConfig::default()
            .with_population_size(15)
            .with_generations(10)
            .with_seed(2024);
        let ga = TimetableGa::new(&agents, &interventions, config).unwrap();
        let r1 = ga.run();
        let r2 = ga.run();
        assert_eq!(r1.history, r2.history);
        assert_eq!(r1.best, r2.best);
    }

    #[test]
    fn test_run_with_callback() {
        let (agents, interventions) = mixed_scenario();
        let config = GaConfig::default()
            .with_population_size(10)
            .with_generations(4)
            .with_seed(3);
        let ga = TimetableGa::new(&agents, &interventions, config).unwrap();

        let mut seen = Vec::new();
        let result = ga.run_with(|report| seen.push((report.generation, report.best_fitness)));
        assert_eq!(seen.len(), 4);
        assert_eq!(seen.iter().map(|(g, _)| *g).collect::<Vec<_>>(), vec![0, 1, 2, 3]);
        assert_eq!(seen.iter().map(|(_, f)| *f).collect::<Vec<_>>(), result.history);
        assert_eq!(result.generations, 4);
        assert_eq!(result.best_fitness, *result.history.last().unwrap());
    }

    #[test]
    fn test_zero_generations_returns_initial_best() {
        let (agents, interventions) = fire_scenario();
        let config = GaConfig::default()
            .with_population_size(5)
            .with_generations(0)
            .with_seed(42);
        let ga = TimetableGa::new(&agents, &interventions, config).unwrap();

        let evolution = ga.evolve();
        assert_eq!(evolution.state(), EvolutionState::Done);
        let result = evolution.run_with(|_| {});
        assert_eq!(result.generations, 0);
        assert!(result.history.is_empty());
        assert_eq!(result.best.slot_count(), 1);
        assert!((result.best_fitness - 8.0).abs() < 1e-10);
    }

    #[test]
    fn test_early_abort_by_not_pulling() {
        let (agents, interventions) = mixed_scenario();
        let config = GaConfig::default()
            .with_population_size(10)
            .with_generations(1_000)
            .with_seed(42);
        let ga = TimetableGa::new(&agents, &interventions, config).unwrap();
        let taken: Vec<GenerationReport> = ga.evolve().take(3).collect();
        assert_eq!(taken.len(), 3);
    }

    #[test]
    fn test_invalid_config_fails_fast() {
        let (agents, interventions) = fire_scenario();
        let config = GaConfig::default().with_population_size(3);
        let err = TimetableGa::new(&agents, &interventions, config).err().unwrap();
        assert!(err
            .errors()
            .iter()
            .any(|e| e.kind == ValidationErrorKind::PopulationTooSmall));

        let err = TimetableGa::new(&[], &interventions, GaConfig::default()).err().unwrap();
        assert!(err.errors().iter().any(|e| e.kind == ValidationErrorKind::NoAgents));
    }

    #[test]
    fn test_degenerate_input_rejected_before_problem_is_built() {
        let (agents, interventions) = fire_scenario();
        let err = TimetableGa::new(&agents, &interventions, GaConfig::default().with_population_size(0))
            .err()
            .unwrap();
        assert!(err
            .errors()
            .iter()
            .any(|e| e.kind == ValidationErrorKind::PopulationTooSmall));

        let huge = vec![
            Intervention::new(1, ShiftType::Day).with_duration_hours(1e15),
            Intervention::new(2, ShiftType::Day).with_duration_hours(1e15),
        ];
        let err = TimetableGa::new(&agents, &huge, GaConfig::default()).err().unwrap();
        assert!(err
            .errors()
            .iter()
            .any(|e| e.kind == ValidationErrorKind::InvalidDuration));
    }

    #[test]
    fn test_unheld_skill_degrades_gracefully() {
        let agents = vec![Agent::new("A", 8.0), Agent::new("B", 8.0)];
        let interventions = vec![Intervention::new(1, ShiftType::LateDay)
            .with_skill("camera")
            .with_duration_hours(3.0)];
        let config = GaConfig::default()
            .with_population_size(8)
            .with_generations(3)
            .with_seed(11);
        let ga = TimetableGa::new(&agents, &interventions, config).unwrap();
        let result = ga.run();
        assert_eq!(result.best.slot_count(), 1);
        // Holder misses the skill bonus; the idle agent keeps all three bonuses.
        assert!((result.best_fitness - 6.0).abs() < 1e-10);
    }

    #[test]
    fn test_fitness_of_hand_built_timetable() {
        let (agents, interventions) = fire_scenario();
        let ga = TimetableGa::new(&agents, &interventions, GaConfig::default()).unwrap();
        let mut t = Timetable::with_agents(&agents);
        t.assign(
            "A",
            Timeslot::new(2, 9 * MS_PER_HOUR, Arc::new(interventions[0].clone())),
        );
        assert!((ga.fitness(&t) - 8.0).abs() < 1e-10);
    }
}
