//! Input validation for timetabling runs.
//!
//! Checks that a problem and its GA configuration can be optimized at all
//! before the evolution loop starts. Detects:
//! - Empty agent or intervention lists
//! - Duplicate agent IDs
//! - Intervention durations outside one week and invalid capacities
//! - Malformed shift windows and rest/gap bands
//! - Population sizes too small for tournament selection
//!
//! Interventions requiring a skill no agent holds are deliberately *not*
//! rejected: they fall back to a random agent and are penalized by fitness.
//! [`unmatched_skills`] reports them for logging.

use std::collections::BTreeSet;
use std::collections::HashSet;

use thiserror::Error;

use crate::ga::GaConfig;
use crate::models::{Agent, Intervention, ShiftType, DAYS_IN_WEEK, MS_PER_HOUR};

/// Longest accepted duration or clock offset: one week (ms).
pub const MAX_DURATION_MS: i64 = DAYS_IN_WEEK as i64 * 24 * MS_PER_HOUR;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// The agent roster is empty.
    NoAgents,
    /// There is nothing to schedule.
    NoInterventions,
    /// Two agents share the same ID.
    DuplicateAgentId,
    /// An agent capacity is negative or not finite.
    InvalidCapacity,
    /// An intervention duration is zero, negative, or longer than a week.
    InvalidDuration,
    /// A shift window ends before it starts or past one week.
    InvalidShiftWindow,
    /// Rest and mid-gap thresholds are out of order.
    InvalidGapBands,
    /// Tournament size is zero.
    ZeroTournament,
    /// Population is smaller than the tournament sample.
    PopulationTooSmall,
    /// Mutation rate is outside 0.0..=1.0.
    InvalidMutationRate,
}

impl ValidationError {
    pub(crate) fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates the input data and run configuration.
///
/// Checks:
/// 1. At least one agent
/// 2. At least one intervention
/// 3. No duplicate agent IDs
/// 4. Every capacity is finite and non-negative
/// 5. Every intervention duration is in `1..=MAX_DURATION_MS`
/// 6. Every shift window is well-formed and ends within `MAX_DURATION_MS`
/// 7. `0 <= min_rest_ms <= mid_gap_start_ms <= mid_gap_end_ms`
/// 8. Tournament size ≥ 1 and population size ≥ tournament size
/// 9. Mutation rate within 0.0..=1.0
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_input(
    agents: &[Agent],
    interventions: &[Intervention],
    config: &GaConfig,
) -> ValidationResult {
    let mut errors = Vec::new();

    if agents.is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::NoAgents,
            "No agents to assign interventions to",
        ));
    }

    if interventions.is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::NoInterventions,
            "No interventions to schedule",
        ));
    }

    let mut agent_ids = HashSet::new();
    for agent in agents {
        if !agent_ids.insert(agent.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateAgentId,
                format!("Duplicate agent ID: {}", agent.id),
            ));
        }
        if !agent.hours_per_week.is_finite() || agent.hours_per_week < 0.0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidCapacity,
                format!(
                    "Agent '{}' has invalid weekly capacity {}",
                    agent.id, agent.hours_per_week
                ),
            ));
        }
    }

    for (idx, intervention) in interventions.iter().enumerate() {
        if intervention.duration_ms <= 0 || intervention.duration_ms > MAX_DURATION_MS {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidDuration,
                format!(
                    "Intervention #{idx} (client {}) has duration {}ms outside 1..={MAX_DURATION_MS}ms",
                    intervention.client_id, intervention.duration_ms
                ),
            ));
        }
    }

    for shift in ShiftType::ALL {
        let window = config.shift_windows.window(shift);
        if !window.is_valid() || window.end_ms > MAX_DURATION_MS {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidShiftWindow,
                format!(
                    "Shift window for {shift:?} is malformed ({}..{}ms)",
                    window.start_ms, window.end_ms
                ),
            ));
        }
    }

    let w = &config.weights;
    if w.min_rest_ms < 0 || w.min_rest_ms > w.mid_gap_start_ms || w.mid_gap_start_ms > w.mid_gap_end_ms
    {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidGapBands,
            format!(
                "Gap thresholds out of order: min rest {}ms, mid gap {}..{}ms",
                w.min_rest_ms, w.mid_gap_start_ms, w.mid_gap_end_ms
            ),
        ));
    }

    if config.tournament_size == 0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::ZeroTournament,
            "Tournament size must be at least 1",
        ));
    } else if config.population_size < config.tournament_size {
        errors.push(ValidationError::new(
            ValidationErrorKind::PopulationTooSmall,
            format!(
                "Population size {} is smaller than tournament size {}",
                config.population_size, config.tournament_size
            ),
        ));
    }

    if !(0.0..=1.0).contains(&config.mutation_rate) {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidMutationRate,
            format!("Mutation rate {} is outside 0..=1", config.mutation_rate),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Required skills that no agent in the roster holds, in sorted order.
pub fn unmatched_skills<'a>(agents: &[Agent], interventions: &'a [Intervention]) -> Vec<&'a str> {
    let mut missing = BTreeSet::new();
    for intervention in interventions {
        if let Some(skill) = intervention.skill_required.as_deref() {
            if !agents.iter().any(|a| a.has_skill(skill)) {
                missing.insert(skill);
            }
        }
    }
    missing.into_iter().collect()
}
