//! Knowledge State
//!
//! Per-agent, per-level epistemic state. Level 0 is "I know the rumor and
//! know who else does"; level `L` is evidence that agents hold level `L - 1`
//! knowledge. An agent *attains* a level once its evidence covers everyone.
//!
//! All evidence produced during a round is staged into `pending` and merged
//! by [`KnowledgeState::commit`], so staging only ever reads committed state.

use bevy_ecs::prelude::*;
use std::collections::BTreeSet;
use tracing::trace;

use rumor_events::{AgentId, AgentSnapshot};

use crate::error::SimError;

static NO_EVIDENCE: BTreeSet<AgentId> = BTreeSet::new();

/// One knowledge level of one agent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LevelKnowledge {
    evidence: BTreeSet<AgentId>,
    pending: BTreeSet<AgentId>,
    attained: bool,
}

impl LevelKnowledge {
    /// Agents this agent can vouch for at this level.
    pub fn evidence(&self) -> &BTreeSet<AgentId> {
        &self.evidence
    }

    /// Contributions staged this round, not yet committed.
    pub fn pending(&self) -> &BTreeSet<AgentId> {
        &self.pending
    }

    pub fn attained(&self) -> bool {
        self.attained
    }

    /// Merge pending into evidence and refresh the attained flag.
    fn settle(&mut self, agent_count: usize) {
        let pending = std::mem::take(&mut self.pending);
        self.evidence.extend(pending);
        if self.evidence.len() == agent_count {
            self.attained = true;
        }
    }
}

/// Fixed-shape record for one agent: a flag and one entry per level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentKnowledge {
    heard: bool,
    levels: Vec<LevelKnowledge>,
}

impl AgentKnowledge {
    fn new(depth: usize) -> Self {
        Self {
            heard: false,
            levels: vec![LevelKnowledge::default(); depth],
        }
    }

    pub fn heard(&self) -> bool {
        self.heard
    }

    pub fn levels(&self) -> &[LevelKnowledge] {
        &self.levels
    }

    /// Whether `level` may accumulate evidence, judged on committed state.
    ///
    /// Level 0 opens when the agent hears the rumor, level `L` when level
    /// `L - 1` is attained.
    pub fn is_open(&self, level: usize) -> bool {
        match level {
            0 => self.heard,
            _ => self
                .levels
                .get(level - 1)
                .map(|below| below.attained)
                .unwrap_or(false),
        }
    }
}

/// Knowledge of every agent, indexed by agent id then level.
#[derive(Resource, Debug, Clone, PartialEq, Eq)]
pub struct KnowledgeState {
    agents: Vec<AgentKnowledge>,
    depth: usize,
}

impl KnowledgeState {
    /// Empty state: nobody has heard, every set is empty.
    pub fn new(agent_count: usize, depth: usize) -> Result<Self, SimError> {
        if depth == 0 {
            return Err(SimError::InvalidDepth(depth));
        }
        if agent_count == 0 {
            return Err(SimError::InvalidConfig(
                "agent count must be positive".to_string(),
            ));
        }

        Ok(Self {
            agents: vec![AgentKnowledge::new(depth); agent_count],
            depth,
        })
    }

    pub fn agent_count(&self) -> usize {
        self.agents.len()
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn agent(&self, agent: AgentId) -> Option<&AgentKnowledge> {
        self.agents.get(agent.index())
    }

    pub fn has_heard(&self, agent: AgentId) -> bool {
        self.agent(agent).map(|a| a.heard).unwrap_or(false)
    }

    /// Committed evidence of `agent` at `level`; empty when out of range.
    pub fn evidence(&self, agent: AgentId, level: usize) -> &BTreeSet<AgentId> {
        self.agent(agent)
            .and_then(|a| a.levels.get(level))
            .map(|l| &l.evidence)
            .unwrap_or(&NO_EVIDENCE)
    }

    pub fn attained(&self, agent: AgentId, level: usize) -> bool {
        self.agent(agent)
            .and_then(|a| a.levels.get(level))
            .map(|l| l.attained)
            .unwrap_or(false)
    }

    /// Agents that have heard the rumor, in id order.
    pub fn informed(&self) -> Vec<AgentId> {
        self.agents
            .iter()
            .enumerate()
            .filter(|(_, a)| a.heard)
            .map(|(index, _)| AgentId::from_index(index))
            .collect()
    }

    pub fn heard_count(&self) -> usize {
        self.agents.iter().filter(|a| a.heard).count()
    }

    pub fn attained_count(&self, level: usize) -> usize {
        self.agents
            .iter()
            .filter(|a| a.levels.get(level).map(|l| l.attained).unwrap_or(false))
            .count()
    }

    pub fn all_attained(&self, level: usize) -> bool {
        self.attained_count(level) == self.agents.len()
    }

    /// The run's stop condition: everyone holds the deepest level.
    pub fn is_complete(&self) -> bool {
        self.all_attained(self.depth - 1)
    }

    /// Monotone measure of committed knowledge.
    ///
    /// Only grows, and is unchanged by a round exactly when that round left
    /// the committed state as it was.
    pub fn progress(&self) -> usize {
        self.agents
            .iter()
            .map(|a| {
                usize::from(a.heard) + a.levels.iter().map(|l| l.evidence.len()).sum::<usize>()
            })
            .sum()
    }

    pub fn has_pending(&self) -> bool {
        self.agents
            .iter()
            .any(|a| a.levels.iter().any(|l| !l.pending.is_empty()))
    }

    /// Drop everything staged since the last commit.
    pub fn discard_pending(&mut self) {
        for level in self.agents.iter_mut().flat_map(|a| a.levels.iter_mut()) {
            level.pending.clear();
        }
    }

    /// Originate the rumor at `agent`.
    pub fn seed(&mut self, agent: AgentId) -> Result<(), SimError> {
        let index = self.check(agent)?;
        let agent_count = self.agents.len();

        let origin = &mut self.agents[index];
        origin.heard = true;
        let base = &mut origin.levels[0];
        if base.evidence.is_empty() {
            base.evidence.insert(agent);
        }
        base.settle(agent_count);

        Ok(())
    }

    /// Stage what `receiver` learns from contacting `sender` this round.
    ///
    /// Marks the receiver as having heard, then for every level whose gate
    /// is open on committed state, stages the receiver's own evidence (or
    /// the receiver itself when that evidence is still empty) plus the
    /// sender's committed evidence. Nothing committed is modified apart from
    /// the `heard` flag, so calls within a round commute.
    pub fn stage_contact(&mut self, receiver: AgentId, sender: AgentId) -> Result<(), SimError> {
        let r = self.check(receiver)?;
        let s = self.check(sender)?;
        let depth = self.depth;

        let (target, source) = receiver_and_sender(&mut self.agents, r, s);
        target.heard = true;

        for level in 0..depth {
            if !target.is_open(level) {
                break;
            }

            let LevelKnowledge { evidence, pending, .. } = &mut target.levels[level];
            if evidence.is_empty() {
                trace!(agent = %receiver, level, "knowledge level opened");
                pending.insert(receiver);
            } else {
                pending.extend(evidence.iter().copied());
            }
            if let Some(source) = source {
                pending.extend(source.levels[level].evidence.iter().copied());
            }
        }

        Ok(())
    }

    /// Merge staged evidence of the `touched` agents and refresh their flags.
    ///
    /// Re-committing with nothing staged changes nothing.
    pub fn commit(&mut self, touched: impl IntoIterator<Item = AgentId>) -> Result<(), SimError> {
        let indices = touched
            .into_iter()
            .map(|agent| self.check(agent))
            .collect::<Result<Vec<_>, _>>()?;
        let agent_count = self.agents.len();

        for index in indices {
            for level in &mut self.agents[index].levels {
                level.settle(agent_count);
            }
        }

        Ok(())
    }

    pub fn snapshot(&self, agent: AgentId) -> Option<AgentSnapshot> {
        self.agent(agent).map(|a| AgentSnapshot {
            agent_id: agent,
            heard: a.heard,
            attained: a.levels.iter().map(|l| l.attained).collect(),
        })
    }

    /// Coloring view of every agent, in id order.
    pub fn agent_snapshots(&self) -> Vec<AgentSnapshot> {
        (0..self.agents.len())
            .filter_map(|index| self.snapshot(AgentId::from_index(index)))
            .collect()
    }

    fn check(&self, agent: AgentId) -> Result<usize, SimError> {
        if agent.index() < self.agents.len() {
            Ok(agent.index())
        } else {
            Err(SimError::UnknownAgent {
                agent,
                agent_count: self.agents.len(),
            })
        }
    }
}

/// Mutable receiver alongside the sender it reads from.
///
/// A self-contact has no separate sender: the receiver's own evidence is
/// already staged.
fn receiver_and_sender(
    agents: &mut [AgentKnowledge],
    receiver: usize,
    sender: usize,
) -> (&mut AgentKnowledge, Option<&AgentKnowledge>) {
    if receiver < sender {
        let (low, high) = agents.split_at_mut(sender);
        (&mut low[receiver], Some(&high[0]))
    } else if receiver > sender {
        let (low, high) = agents.split_at_mut(receiver);
        (&mut high[0], Some(&low[sender]))
    } else {
        (&mut agents[receiver], None)
    }
}
