//! Encounter construction and validation.
//! This module exists to isolate initialization details from runtime
//! simulation flow; a missing or blocked placement is a fatal setup error,
//! never a runtime condition.

use rand_chacha::rand_core::SeedableRng;
use serde::{Deserialize, Serialize};

use super::*;
use crate::grid::Tile;
use crate::units::UnitSpec;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UnitPlacement {
    pub spec: UnitSpec,
    pub pos: Pos,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EncounterSetup {
    pub width: usize,
    pub height: usize,
    pub terrain: Vec<(Pos, Terrain)>,
    pub props: Vec<Pos>,
    pub exits: Vec<Pos>,
    pub units: Vec<UnitPlacement>,
}

impl EncounterSetup {
    pub fn open_field(width: usize, height: usize) -> Self {
        Self { width, height, terrain: Vec::new(), props: Vec::new(), exits: Vec::new(), units: Vec::new() }
    }
}

impl Encounter {
    pub fn new(seed: u64, setup: &EncounterSetup) -> Result<Self, SetupError> {
        if setup.width == 0 || setup.height == 0 {
            return Err(SetupError::ZeroSizedGrid);
        }

        let mut grid = Grid::new(setup.width, setup.height);
        for (pos, terrain) in &setup.terrain {
            grid.set_terrain(*pos, *terrain);
        }
        for pos in &setup.exits {
            let mut tile = Tile::open(*pos);
            tile.exit = true;
            tile.interactable = true;
            grid.attach_extra(tile)?;
        }

        let mut props = SlotMap::with_key();
        for pos in &setup.props {
            claimable(&grid, *pos)?;
            let prop = Prop { id: PropId::default(), pos: *pos };
            let id = props.insert(prop);
            props[id].id = id;
            let claimed = grid.occupy(*pos, Occupant::Prop(id));
            debug_assert!(claimed);
        }

        let mut units: SlotMap<UnitId, Unit> = SlotMap::with_key();
        let mut player_order = Vec::new();
        let mut enemy_order = Vec::new();
        for placement in &setup.units {
            if units.values().any(|unit| unit.name == placement.spec.name) {
                return Err(SetupError::DuplicateUnitName { name: placement.spec.name.clone() });
            }
            claimable(&grid, placement.pos)?;
            let id = units.insert(Unit::from_spec(&placement.spec, placement.pos));
            units[id].id = id;
            let claimed = grid.occupy(placement.pos, Occupant::Unit(id));
            debug_assert!(claimed);
            match placement.spec.side {
                Side::Player => player_order.push(id),
                Side::Enemy => enemy_order.push(id),
            }
        }
        if player_order.is_empty() {
            return Err(SetupError::NoPlayerUnits);
        }

        let active_unit = player_order.first().copied();
        let mut encounter = Self {
            seed,
            rng: ChaCha8Rng::seed_from_u64(seed),
            grid,
            units,
            props,
            player_order,
            enemy_order,
            phase: Phase::PlayerTurn,
            turn: 1,
            active_unit,
            pending_aim: None,
            log: Vec::new(),
            next_input_seq: 0,
            outcome: None,
        };
        encounter.log.push(LogEvent::PhaseChanged { phase: Phase::PlayerTurn, turn: 1 });
        if let Some(unit) = encounter.active_unit {
            encounter.log.push(LogEvent::UnitSelected { unit });
        }
        Ok(encounter)
    }
}

fn claimable(grid: &Grid, pos: Pos) -> Result<(), SetupError> {
    let Some(tile) = grid.tile(pos) else {
        return Err(SetupError::MissingStartTile { pos });
    };
    if !tile.is_passable() {
        return Err(SetupError::BlockedStartTile { pos });
    }
    if tile.is_occupied() {
        return Err(SetupError::OccupiedStartTile { pos });
    }
    Ok(())
}
