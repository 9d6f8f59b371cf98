//! Timetable fitness evaluation.
//!
//! Scores a candidate timetable against every constraint and folds the
//! result into one non-negative scalar (higher = better). Each agent
//! contributes four terms:
//!
//! | Term | Satisfied | Violated |
//! |------|-----------|----------|
//! | Capacity | `+capacity_bonus` | `-overage_hours × overage_penalty_per_hour` |
//! | Skill | `+skill_bonus` (all slots match) | `0` |
//! | Breaks | `0` | `-overlap_penalty` / `-short_break_penalty` / `-mid_gap_penalty` per adjacent pair |
//! | Night cap | `+night_bonus` | `-excess × night_excess_penalty` |
//!
//! The summed score is clamped at zero.
//!
//! Evaluation reads the timetable and the agent roster only; workload is
//! derived from the candidate on every call.

use serde::{Deserialize, Serialize};

use crate::models::{ms_to_hours, Agent, Timetable, MS_PER_HOUR, MS_PER_MINUTE};

/// Bonuses and penalties used by the fitness function.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FitnessWeights {
    /// Awarded when an agent's load fits its weekly capacity.
    pub capacity_bonus: f64,
    /// Subtracted per hour of load beyond capacity.
    pub overage_penalty_per_hour: f64,
    /// Awarded when every slot of an agent matches its skills.
    pub skill_bonus: f64,
    /// Subtracted per pair of overlapping same-day slots.
    pub overlap_penalty: f64,
    /// Subtracted per same-day gap shorter than `min_rest_ms`.
    pub short_break_penalty: f64,
    /// Minimum rest between consecutive same-day slots (ms).
    pub min_rest_ms: i64,
    /// Subtracted per same-day gap in `[mid_gap_start_ms, mid_gap_end_ms)`.
    pub mid_gap_penalty: f64,
    /// Start of the discouraged gap band (ms).
    pub mid_gap_start_ms: i64,
    /// End of the discouraged gap band (ms, exclusive).
    pub mid_gap_end_ms: i64,
    /// Maximum night slots per agent per week.
    pub night_cap: usize,
    /// Awarded when an agent is at or below the night cap.
    pub night_bonus: f64,
    /// Subtracted per night slot above the cap.
    pub night_excess_penalty: f64,
}

impl Default for FitnessWeights {
    fn default() -> Self {
        Self {
            capacity_bonus: 1.0,
            overage_penalty_per_hour: 0.5,
            skill_bonus: 2.0,
            overlap_penalty: 3.0,
            short_break_penalty: 1.0,
            min_rest_ms: 30 * MS_PER_MINUTE,
            mid_gap_penalty: 0.5,
            mid_gap_start_ms: MS_PER_HOUR,
            mid_gap_end_ms: 8 * MS_PER_HOUR,
            night_cap: 2,
            night_bonus: 1.0,
            night_excess_penalty: 1.0,
        }
    }
}

impl FitnessWeights {
    /// Score contributed by an agent with no assigned slots.
    pub fn empty_agent_score(&self) -> f64 {
        self.capacity_bonus + self.skill_bonus + self.night_bonus
    }

    /// Classifies the gap between two consecutive same-day slots.
    pub fn classify_gap(&self, gap_ms: i64) -> GapKind {
        if gap_ms < 0 {
            GapKind::Overlap
        } else if gap_ms < self.min_rest_ms {
            GapKind::ShortBreak
        } else if gap_ms >= self.mid_gap_start_ms && gap_ms < self.mid_gap_end_ms {
            GapKind::MidGap
        } else {
            GapKind::Free
        }
    }

    fn gap_penalty(&self, kind: GapKind) -> f64 {
        match kind {
            GapKind::Overlap => self.overlap_penalty,
            GapKind::ShortBreak => self.short_break_penalty,
            GapKind::MidGap => self.mid_gap_penalty,
            GapKind::Free => 0.0,
        }
    }
}

/// Classification of the gap between consecutive same-day slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GapKind {
    /// The earlier slot ends after the later one starts.
    Overlap,
    /// Too short to rest.
    ShortBreak,
    /// Neither connected work nor a real rest period.
    MidGap,
    /// Not penalized.
    Free,
}

/// Per-agent fitness contributions.
#[derive(Debug, Clone, PartialEq)]
pub struct AgentScore {
    /// Agent ID.
    pub agent_id: String,
    /// Capacity term.
    pub capacity: f64,
    /// Skill-match term.
    pub skill: f64,
    /// Overlap/break term.
    pub breaks: f64,
    /// Night-cap term.
    pub night: f64,
}

impl AgentScore {
    /// Sum of all terms.
    pub fn total(&self) -> f64 {
        self.capacity + self.skill + self.breaks + self.night
    }
}

/// Itemized fitness of a timetable.
#[derive(Debug, Clone, PartialEq)]
pub struct FitnessBreakdown {
    /// One entry per roster agent, in roster order.
    pub agents: Vec<AgentScore>,
}

impl FitnessBreakdown {
    /// Unclamped sum of every agent's terms.
    pub fn raw(&self) -> f64 {
        self.agents.iter().map(AgentScore::total).sum()
    }

    /// Final fitness (raw sum clamped at zero).
    pub fn score(&self) -> f64 {
        self.raw().max(0.0)
    }

    /// Looks up an agent's terms.
    pub fn agent(&self, agent_id: &str) -> Option<&AgentScore> {
        self.agents.iter().find(|a| a.agent_id == agent_id)
    }
}

/// Fitness function over a fixed agent roster.
#[derive(Debug, Clone, Copy)]
pub struct FitnessEvaluator<'a> {
    agents: &'a [Agent],
    weights: &'a FitnessWeights,
}

impl<'a> FitnessEvaluator<'a> {
    /// Creates an evaluator for a roster.
    pub fn new(agents: &'a [Agent], weights: &'a FitnessWeights) -> Self {
        Self { agents, weights }
    }

    /// Computes the fitness of a timetable (≥ 0, higher = better).
    pub fn evaluate(&self, timetable: &Timetable) -> f64 {
        self.breakdown(timetable).score()
    }

    /// Computes every agent's fitness terms.
    ///
    /// Timetable entries for agents outside the roster are ignored; roster
    /// agents without an entry are scored as having no slots.
    pub fn breakdown(&self, timetable: &Timetable) -> FitnessBreakdown {
        FitnessBreakdown {
            agents: self
                .agents
                .iter()
                .map(|agent| self.score_agent(agent, timetable))
                .collect(),
        }
    }

    fn score_agent(&self, agent: &Agent, timetable: &Timetable) -> AgentScore {
        let w = self.weights;
        let slots = timetable.slots_for(&agent.id);

        let load_ms: i64 = slots.iter().map(|s| s.duration_ms()).sum();
        let overage_ms = load_ms - agent.capacity_ms();
        let capacity = if overage_ms <= 0 {
            w.capacity_bonus
        } else {
            -ms_to_hours(overage_ms) * w.overage_penalty_per_hour
        };

        let skill = if slots
            .iter()
            .all(|s| agent.can_perform(&s.intervention))
        {
            w.skill_bonus
        } else {
            0.0
        };

        let sorted = timetable.sorted_slots_for(&agent.id);
        let breaks: f64 = sorted
            .windows(2)
            .filter(|pair| pair[0].day == pair[1].day)
            .map(|pair| -w.gap_penalty(w.classify_gap(pair[0].gap_to(pair[1]))))
            .sum();

        let nights = slots.iter().filter(|s| s.is_night()).count();
        let night = if nights <= w.night_cap {
            w.night_bonus
        } else {
            -((nights - w.night_cap) as f64) * w.night_excess_penalty
        };

        AgentScore {
            agent_id: agent.id.clone(),
            capacity,
            skill,
            breaks,
            night,
        }
    }
}
