//! Per-encounter simulation context: the grid, the unit registry, and the
//! turn state machine, owned by value and driven by explicit commands.
//! This file wires focused submodules together.

use std::collections::BTreeSet;

use rand_chacha::ChaCha8Rng;
use slotmap::SlotMap;

use crate::grid::{Grid, Prop};
use crate::types::*;
use crate::units::Unit;

mod combat;
mod commands;
mod enemy_ai;
mod hash;
mod movement;
mod setup;
mod turns;

#[cfg(test)]
mod test_support;

pub use setup::{EncounterSetup, UnitPlacement};

// An armed card waiting for a tile click. The candidate set is frozen at
// arm time; Cancel discards it without touching anything but highlights.
struct PendingAim {
    tiles: BTreeSet<Pos>,
}

pub struct Encounter {
    seed: u64,
    rng: ChaCha8Rng,
    grid: Grid,
    units: SlotMap<UnitId, Unit>,
    props: SlotMap<PropId, Prop>,
    player_order: Vec<UnitId>,
    enemy_order: Vec<UnitId>,
    phase: Phase,
    turn: u32,
    active_unit: Option<UnitId>,
    pending_aim: Option<PendingAim>,
    log: Vec<LogEvent>,
    next_input_seq: u64,
    outcome: Option<RunOutcome>,
}

impl Encounter {
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn unit(&self, id: UnitId) -> Option<&Unit> {
        self.units.get(id)
    }

    pub fn props(&self) -> impl Iterator<Item = (PropId, &Prop)> {
        self.props.iter()
    }

    pub fn units(&self) -> impl Iterator<Item = (UnitId, &Unit)> {
        self.units.iter()
    }

    pub fn player_units(&self) -> impl Iterator<Item = &Unit> {
        self.player_order.iter().filter_map(|id| self.units.get(*id))
    }

    pub fn enemy_units(&self) -> impl Iterator<Item = &Unit> {
        self.enemy_order.iter().filter_map(|id| self.units.get(*id))
    }

    pub fn unit_by_name(&self, name: &str) -> Option<UnitId> {
        self.units.iter().find(|(_, unit)| unit.name == name).map(|(id, _)| id)
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn turn(&self) -> u32 {
        self.turn
    }

    pub fn active_unit(&self) -> Option<UnitId> {
        self.active_unit
    }

    pub fn is_targeting(&self) -> bool {
        self.pending_aim.is_some()
    }

    pub fn outcome(&self) -> Option<RunOutcome> {
        self.outcome
    }

    pub fn log(&self) -> &[LogEvent] {
        &self.log
    }

    pub(crate) fn living_enemies(&self) -> usize {
        self.enemy_units().filter(|unit| unit.is_active()).count()
    }

    pub(crate) fn living_players(&self) -> usize {
        self.player_units().filter(|unit| unit.is_active()).count()
    }
}
