//! Timetabling GA problem definition.
//!
//! Bridges domain models (Agent, Intervention) to the GA: builds random
//! initial timetables, evaluates fitness, and applies crossover/mutation.

use std::sync::Arc;

use rand::prelude::IndexedRandom;
use rand::Rng;
use tracing::warn;

use super::chromosome::TimetableChromosome;
use super::fitness::{FitnessBreakdown, FitnessEvaluator};
use super::operators::GeneticOperators;
use super::GaConfig;
use crate::models::{
    Agent, Intervention, ShiftWindow, Timeslot, Timetable, DAYS_IN_WEEK, MS_PER_MINUTE,
};
use crate::validation::unmatched_skills;

/// Compact intervention descriptor for initialization.
///
/// Precomputes the qualified agents and the start-time window once, so
/// building a candidate does not rescan the roster.
#[derive(Debug, Clone)]
pub struct InterventionInfo {
    /// The shared intervention.
    pub intervention: Arc<Intervention>,
    /// Indices (into the roster) of agents able to perform it.
    /// Empty = nobody qualifies; any agent is drawn instead.
    pub candidates: Vec<usize>,
    /// Window its start time is sampled from.
    pub window: ShiftWindow,
}

impl InterventionInfo {
    /// Extracts intervention info for a roster and configuration.
    pub fn from_interventions(
        interventions: &[Intervention],
        agents: &[Agent],
        config: &GaConfig,
    ) -> Vec<Self> {
        interventions
            .iter()
            .map(|i| InterventionInfo {
                intervention: Arc::new(i.clone()),
                candidates: agents
                    .iter()
                    .enumerate()
                    .filter(|(_, a)| a.can_perform(i))
                    .map(|(idx, _)| idx)
                    .collect(),
                window: config.shift_windows.window(i.shift_type),
            })
            .collect()
    }
}

/// GA problem definition for weekly timetabling.
pub struct TimetableProblem {
    /// Agent roster (read-only for the whole run).
    pub agents: Vec<Agent>,
    /// Intervention info, in input order.
    pub interventions: Vec<InterventionInfo>,
    /// Run configuration.
    pub config: GaConfig,
    /// Selection and variation operators.
    pub operators: GeneticOperators,
}

impl TimetableProblem {
    /// Creates a problem from domain models.
    ///
    /// Logs a warning for every required skill no agent holds; those
    /// interventions are placed on random agents. Input must already have
    /// passed `validate_input`; `TimetableGa::new` guarantees that.
    pub(crate) fn new(agents: &[Agent], interventions: &[Intervention], config: GaConfig) -> Self {
        for skill in unmatched_skills(agents, interventions) {
            warn!(skill, "no agent holds required skill, falling back to random agents");
        }
        Self {
            agents: agents.to_vec(),
            interventions: InterventionInfo::from_interventions(interventions, agents, &config),
            operators: GeneticOperators::new(config.tournament_size, config.mutation_rate),
            config,
        }
    }

    /// Creates one random candidate timetable.
    ///
    /// Each intervention is placed independently: a qualified agent (or any
    /// agent when none qualifies), a uniform day, and a start time sampled
    /// at minute granularity within its shift window. Collisions are left
    /// for fitness to penalize.
    pub fn create_individual<R: Rng>(&self, rng: &mut R) -> Timetable {
        let mut timetable = Timetable::with_agents(&self.agents);
        if self.agents.is_empty() {
            return timetable;
        }
        for info in &self.interventions {
            let agent_idx = match info.candidates.choose(rng) {
                Some(&idx) => idx,
                None => rng.random_range(0..self.agents.len()),
            };
            let day = rng.random_range(0..DAYS_IN_WEEK);
            let start_ms = sample_start(&info.window, rng);
            timetable.assign(
                &self.agents[agent_idx].id,
                Timeslot::new(day, start_ms, info.intervention.clone()),
            );
        }
        timetable
    }

    /// Creates and evaluates a full initial population.
    pub fn initial_population<R: Rng>(&self, rng: &mut R) -> Vec<TimetableChromosome> {
        (0..self.config.population_size)
            .map(|_| self.chromosome(self.create_individual(rng)))
            .collect()
    }

    /// Evaluates a timetable (≥ 0, higher = better).
    pub fn evaluate(&self, timetable: &Timetable) -> f64 {
        self.evaluator().evaluate(timetable)
    }

    /// Itemized fitness of a timetable.
    pub fn breakdown(&self, timetable: &Timetable) -> FitnessBreakdown {
        self.evaluator().breakdown(timetable)
    }

    /// Pairs a timetable with its fitness.
    pub fn chromosome(&self, timetable: Timetable) -> TimetableChromosome {
        let fitness = self.evaluate(&timetable);
        TimetableChromosome::new(timetable, fitness)
    }

    /// Produces one child from two parents.
    pub fn crossover<R: Rng>(&self, p1: &Timetable, p2: &Timetable, rng: &mut R) -> Timetable {
        self.operators.crossover(p1, p2, rng)
    }

    /// Mutates a child with the configured probability.
    pub fn mutate<R: Rng>(&self, timetable: &mut Timetable, rng: &mut R) -> bool {
        self.operators.mutate(timetable, rng)
    }

    /// Builds one evaluated child: select → crossover → mutate.
    pub fn offspring<R: Rng>(
        &self,
        population: &[TimetableChromosome],
        rng: &mut R,
    ) -> TimetableChromosome {
        let (p1, p2) = self.operators.select_parents(population, rng);
        let mut child = self.crossover(p1, p2, rng);
        self.mutate(&mut child, rng);
        self.chromosome(child)
    }

    fn evaluator(&self) -> FitnessEvaluator<'_> {
        FitnessEvaluator::new(&self.agents, &self.config.weights)
    }
}

fn sample_start<R: Rng>(window: &ShiftWindow, rng: &mut R) -> i64 {
    let minutes = window.duration_ms() / MS_PER_MINUTE;
    if minutes <= 0 {
        return window.start_ms;
    }
    window.start_ms + rng.random_range(0..minutes) * MS_PER_MINUTE
}
