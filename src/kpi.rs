//! Timetable quality metrics (KPIs) and constraint violations.
//!
//! Turns a timetable into the figures a planner reads: per-agent load and
//! utilization, night work, and an explicit list of every constraint the
//! timetable breaks. Fitness folds the same constraints into one number;
//! this module keeps them itemized.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Hours | Sum of assigned slot durations per agent |
//! | Utilization | hours / weekly capacity (0 when capacity is 0) |
//! | Avg Utilization | Mean utilization over the roster |
//! | Night slots | Night-typed slots per agent |
//! | Violations | Capacity, skill, overlap, short break, night cap |

use std::collections::BTreeMap;

use crate::ga::{FitnessWeights, GapKind};
use crate::models::{ms_to_hours, Agent, Timetable};

/// Classification of timetable constraint violations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViolationType {
    /// Load exceeds the agent's weekly capacity.
    CapacityExceeded,
    /// A slot requires a skill the agent lacks.
    SkillMismatch,
    /// Two same-day slots overlap.
    Overlap,
    /// Two same-day slots are closer than the minimum rest.
    ShortBreak,
    /// More night slots than the weekly cap.
    NightCapExceeded,
}

/// A constraint violation.
#[derive(Debug, Clone, PartialEq)]
pub struct Violation {
    /// Type of violation.
    pub violation_type: ViolationType,
    /// Agent the violation belongs to.
    pub agent_id: String,
    /// Human-readable description.
    pub message: String,
}

impl Violation {
    fn new(violation_type: ViolationType, agent_id: &str, message: String) -> Self {
        Self {
            violation_type,
            agent_id: agent_id.to_string(),
            message,
        }
    }
}

/// Timetable performance indicators.
#[derive(Debug, Clone)]
pub struct TimetableKpi {
    /// Assigned hours per agent.
    pub hours_by_agent: BTreeMap<String, f64>,
    /// Utilization (hours / capacity) per agent.
    pub utilization_by_agent: BTreeMap<String, f64>,
    /// Night slots per agent.
    pub night_slots_by_agent: BTreeMap<String, usize>,
    /// Mean utilization across the roster.
    pub avg_utilization: f64,
    /// Total number of slots.
    pub total_slots: usize,
    /// Every constraint violation found.
    pub violations: Vec<Violation>,
}

impl TimetableKpi {
    /// Computes KPIs for a timetable against a roster.
    ///
    /// Uses the rest thresholds and night cap from `weights`. Mid-band gaps
    /// are discouraged by fitness but are not violations.
    pub fn calculate(timetable: &Timetable, agents: &[Agent], weights: &FitnessWeights) -> Self {
        let mut hours_by_agent = BTreeMap::new();
        let mut utilization_by_agent = BTreeMap::new();
        let mut night_slots_by_agent = BTreeMap::new();
        let mut violations = Vec::new();

        for agent in agents {
            let slots = timetable.slots_for(&agent.id);
            let load_ms = timetable.total_ms_for(&agent.id);
            let hours = ms_to_hours(load_ms);
            let utilization = if agent.hours_per_week > 0.0 {
                hours / agent.hours_per_week
            } else {
                0.0
            };
            hours_by_agent.insert(agent.id.clone(), hours);
            utilization_by_agent.insert(agent.id.clone(), utilization);

            if load_ms > agent.capacity_ms() {
                violations.push(Violation::new(
                    ViolationType::CapacityExceeded,
                    &agent.id,
                    format!(
                        "{:.1}h assigned, capacity {:.1}h",
                        hours, agent.hours_per_week
                    ),
                ));
            }

            for slot in slots.iter().filter(|s| !agent.can_perform(&s.intervention)) {
                violations.push(Violation::new(
                    ViolationType::SkillMismatch,
                    &agent.id,
                    format!(
                        "client {} requires '{}'",
                        slot.intervention.client_id,
                        slot.intervention.skill_required.as_deref().unwrap_or_default()
                    ),
                ));
            }

            let sorted = timetable.sorted_slots_for(&agent.id);
            for pair in sorted.windows(2).filter(|p| p[0].day == p[1].day) {
                let violation_type = match weights.classify_gap(pair[0].gap_to(pair[1])) {
                    GapKind::Overlap => ViolationType::Overlap,
                    GapKind::ShortBreak => ViolationType::ShortBreak,
                    GapKind::MidGap | GapKind::Free => continue,
                };
                violations.push(Violation::new(
                    violation_type,
                    &agent.id,
                    format!(
                        "day {}: clients {} and {}",
                        pair[0].day,
                        pair[0].intervention.client_id,
                        pair[1].intervention.client_id
                    ),
                ));
            }

            let nights = timetable.night_count_for(&agent.id);
            night_slots_by_agent.insert(agent.id.clone(), nights);
            if nights > weights.night_cap {
                violations.push(Violation::new(
                    ViolationType::NightCapExceeded,
                    &agent.id,
                    format!("{} night slots, cap {}", nights, weights.night_cap),
                ));
            }
        }

        let avg_utilization = if agents.is_empty() {
            0.0
        } else {
            utilization_by_agent.values().sum::<f64>() / agents.len() as f64
        };

        Self {
            hours_by_agent,
            utilization_by_agent,
            night_slots_by_agent,
            avg_utilization,
            total_slots: timetable.slot_count(),
            violations,
        }
    }

    /// Whether the timetable breaks no hard constraint.
    pub fn is_feasible(&self) -> bool {
        self.violations.is_empty()
    }

    /// Violations of one type.
    pub fn violations_of(&self, violation_type: ViolationType) -> Vec<&Violation> {
        self.violations
            .iter()
            .filter(|v| v.violation_type == violation_type)
            .collect()
    }
}
