//! Agent model.
//!
//! Agents are the workers interventions are assigned to. Each agent has a
//! weekly hour capacity and a set of skill tags.
//!
//! Agents are read-only during an optimization run and shared by reference
//! across every candidate timetable. Workload is always derived from a
//! timetable, never stored on the agent.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::Intervention;

/// A worker that interventions can be assigned to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    /// Unique agent identifier.
    pub id: String,
    /// Human-readable name.
    #[serde(default)]
    pub name: String,
    /// Weekly capacity (hours).
    pub hours_per_week: f64,
    /// Skill tags held by this agent.
    #[serde(default)]
    pub skills: BTreeSet<String>,
}

impl Agent {
    /// Creates an agent with the given weekly capacity and no skills.
    pub fn new(id: impl Into<String>, hours_per_week: f64) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            hours_per_week,
            skills: BTreeSet::new(),
        }
    }

    /// Sets the agent name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Adds a skill.
    pub fn with_skill(mut self, skill: impl Into<String>) -> Self {
        self.skills.insert(skill.into());
        self
    }

    /// Adds several skills.
    pub fn with_skills<I, S>(mut self, skills: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.skills.extend(skills.into_iter().map(Into::into));
        self
    }

    /// Whether this agent holds a given skill.
    pub fn has_skill(&self, skill: &str) -> bool {
        self.skills.contains(skill)
    }

    /// Whether this agent satisfies an optional skill requirement.
    ///
    /// An absent requirement is satisfied by every agent.
    pub fn satisfies(&self, skill_required: Option<&str>) -> bool {
        match skill_required {
            None => true,
            Some(skill) => self.has_skill(skill),
        }
    }

    /// Whether this agent may perform an intervention.
    pub fn can_perform(&self, intervention: &Intervention) -> bool {
        self.satisfies(intervention.skill_required.as_deref())
    }

    /// Weekly capacity in milliseconds.
    pub fn capacity_ms(&self) -> i64 {
        (self.hours_per_week * super::MS_PER_HOUR as f64).round() as i64
    }
}
