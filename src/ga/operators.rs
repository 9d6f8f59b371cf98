//! Selection and variation strategy for the timetable GA.
//!
//! [`GeneticOperators`] bundles the tournament size and mutation rate and
//! applies them through the chromosome-level operators.
//!
//! # Usage
//!
//! ```
//! use u_timetable::ga::operators::GeneticOperators;
//!
//! let ops = GeneticOperators::default();
//! assert_eq!(ops.tournament_size, 5);
//! ```
//!
//! # Reference
//! Miller & Goldberg (1995), "Genetic Algorithms, Tournament Selection,
//! and the Effects of Noise"

use rand::seq::index;
use rand::Rng;

use super::chromosome::{splice_crossover, swap_mutation, TimetableChromosome};
use crate::models::Timetable;

/// Tournament selection: fittest of a random sample.
///
/// Samples `tournament_size` distinct members (capped at the population
/// size) and returns the index of the fittest; the earliest-drawn member
/// wins ties.
///
/// # Panics
/// Panics if `population` is empty.
pub fn tournament_select<R: Rng>(
    population: &[TimetableChromosome],
    tournament_size: usize,
    rng: &mut R,
) -> usize {
    assert!(!population.is_empty(), "tournament over an empty population");
    let k = tournament_size.clamp(1, population.len());
    let mut contenders = index::sample(rng, population.len(), k).into_iter();
    let first = contenders.next().unwrap_or(0);
    contenders.fold(first, |best, idx| {
        if population[idx].fitness > population[best].fitness {
            idx
        } else {
            best
        }
    })
}

/// Runtime-configurable genetic operators for the timetable GA.
#[derive(Debug, Clone)]
pub struct GeneticOperators {
    /// Members sampled per tournament.
    pub tournament_size: usize,
    /// Probability a child is mutated.
    pub mutation_rate: f64,
}

impl Default for GeneticOperators {
    fn default() -> Self {
        Self {
            tournament_size: 5,
            mutation_rate: 0.1,
        }
    }
}

impl GeneticOperators {
    /// Creates operators with the given tournament size and mutation rate.
    pub fn new(tournament_size: usize, mutation_rate: f64) -> Self {
        Self {
            tournament_size,
            mutation_rate: mutation_rate.clamp(0.0, 1.0),
        }
    }

    /// Draws two parents by independent tournaments.
    ///
    /// The parents may be the same member.
    pub fn select_parents<'p, R: Rng>(
        &self,
        population: &'p [TimetableChromosome],
        rng: &mut R,
    ) -> (&'p Timetable, &'p Timetable) {
        let a = tournament_select(population, self.tournament_size, rng);
        let b = tournament_select(population, self.tournament_size, rng);
        (&population[a].timetable, &population[b].timetable)
    }

    /// Produces one child by per-agent splice crossover.
    pub fn crossover<R: Rng>(&self, p1: &Timetable, p2: &Timetable, rng: &mut R) -> Timetable {
        splice_crossover(p1, p2, rng)
    }

    /// Applies swap mutation with probability `mutation_rate`.
    ///
    /// Returns `true` if the timetable changed.
    pub fn mutate<R: Rng>(&self, timetable: &mut Timetable, rng: &mut R) -> bool {
        rng.random_bool(self.mutation_rate) && swap_mutation(timetable, rng)
    }
}
