//! Timetable (candidate solution) model.
//!
//! A timetable maps each agent id to the ordered list of timeslots assigned
//! to that agent. It is the chromosome the GA evolves.
//!
//! Constraints (capacity, skills, breaks, night cap) are not enforced here;
//! they are scored by the fitness evaluator.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{ms_to_hours, Agent, Timeslot};

/// A weekly assignment of timeslots to agents.
///
/// Keyed by agent id in a `BTreeMap` so iteration order is stable, which
/// keeps seeded runs reproducible. `Clone` deep-copies every slot list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Timetable {
    /// Agent id → assigned timeslots.
    pub slots: BTreeMap<String, Vec<Timeslot>>,
}

impl Timetable {
    /// Creates an empty timetable with no agents.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a timetable with an empty slot list for every agent.
    pub fn with_agents(agents: &[Agent]) -> Self {
        Self {
            slots: agents.iter().map(|a| (a.id.clone(), Vec::new())).collect(),
        }
    }

    /// Appends a slot to an agent's list (creating the list if needed).
    pub fn assign(&mut self, agent_id: &str, slot: Timeslot) {
        self.slots.entry(agent_id.to_string()).or_default().push(slot);
    }

    /// Slots assigned to an agent (empty if the agent is unknown).
    pub fn slots_for(&self, agent_id: &str) -> &[Timeslot] {
        self.slots.get(agent_id).map(|v| v.as_slice()).unwrap_or(&[])
    }

    /// Mutable slot list for an agent.
    pub fn slots_for_mut(&mut self, agent_id: &str) -> Option<&mut Vec<Timeslot>> {
        self.slots.get_mut(agent_id)
    }

    /// Agent ids in key order.
    pub fn agent_ids(&self) -> impl Iterator<Item = &str> {
        self.slots.keys().map(|k| k.as_str())
    }

    /// Number of agents.
    pub fn agent_count(&self) -> usize {
        self.slots.len()
    }

    /// Total number of timeslots across all agents.
    pub fn slot_count(&self) -> usize {
        self.slots.values().map(Vec::len).sum()
    }

    /// Total assigned duration for an agent (ms).
    pub fn total_ms_for(&self, agent_id: &str) -> i64 {
        self.slots_for(agent_id).iter().map(Timeslot::duration_ms).sum()
    }

    /// Total assigned duration for an agent (hours).
    pub fn total_hours_for(&self, agent_id: &str) -> f64 {
        ms_to_hours(self.total_ms_for(agent_id))
    }

    /// Number of night slots assigned to an agent.
    pub fn night_count_for(&self, agent_id: &str) -> usize {
        self.slots_for(agent_id).iter().filter(|s| s.is_night()).count()
    }

    /// An agent's slots sorted by (day, start).
    pub fn sorted_slots_for(&self, agent_id: &str) -> Vec<&Timeslot> {
        let mut sorted: Vec<&Timeslot> = self.slots_for(agent_id).iter().collect();
        sorted.sort_by_key(|s| s.sort_key());
        sorted
    }

    /// Finds the agent an intervention's client is assigned to, if any.
    pub fn agent_for_client(&self, client_id: u32) -> Option<&str> {
        self.slots
            .iter()
            .find(|(_, slots)| slots.iter().any(|s| s.intervention.client_id == client_id))
            .map(|(id, _)| id.as_str())
    }
}
