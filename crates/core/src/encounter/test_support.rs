//! Shared test fixtures for the encounter submodule test suites.
//! This module exists to avoid repeating setup and unit stats across many
//! tests. It does not own production gameplay logic.

use super::*;
use crate::units::UnitSpec;

pub(super) fn player_spec(name: &str) -> UnitSpec {
    UnitSpec {
        name: name.to_string(),
        side: Side::Player,
        max_hp: 20,
        start_hp: None,
        move_range: 3,
        attack_range: 1,
        attack_damage: 5,
        melee_multiplier_percent: 100,
        ranged_multiplier_percent: 50,
        dodge_percent: 0,
        ap_max: 2,
        attack_shape: AttackShape::Single,
        temper: Temper::Normal,
    }
}

pub(super) fn enemy_spec(name: &str) -> UnitSpec {
    UnitSpec {
        name: name.to_string(),
        side: Side::Enemy,
        max_hp: 10,
        start_hp: None,
        move_range: 2,
        attack_range: 1,
        attack_damage: 3,
        melee_multiplier_percent: 100,
        ranged_multiplier_percent: 100,
        dodge_percent: 0,
        ap_max: 0,
        attack_shape: AttackShape::Single,
        temper: Temper::Normal,
    }
}

pub(super) fn passive_spec(name: &str) -> UnitSpec {
    UnitSpec {
        max_hp: 20,
        attack_range: 4,
        temper: Temper::Passive,
        ..enemy_spec(name)
    }
}

// Two players against a normal and a passive enemy on an open 6x6 field.
pub(super) fn two_on_two(seed: u64) -> Encounter {
    let mut setup = EncounterSetup::open_field(6, 6);
    setup.units.push(UnitPlacement { spec: player_spec("ash"), pos: Pos { y: 0, x: 0 } });
    setup.units.push(UnitPlacement { spec: player_spec("briar"), pos: Pos { y: 1, x: 0 } });
    setup.units.push(UnitPlacement { spec: enemy_spec("grub"), pos: Pos { y: 0, x: 5 } });
    setup.units.push(UnitPlacement { spec: passive_spec("moss"), pos: Pos { y: 5, x: 5 } });
    Encounter::new(seed, &setup).expect("fixture setup")
}

// One player adjacent to one normal enemy.
pub(super) fn duel_fixture(seed: u64) -> Encounter {
    let mut setup = EncounterSetup::open_field(4, 4);
    setup.units.push(UnitPlacement { spec: player_spec("ash"), pos: Pos { y: 0, x: 0 } });
    setup.units.push(UnitPlacement { spec: enemy_spec("grub"), pos: Pos { y: 0, x: 1 } });
    Encounter::new(seed, &setup).expect("fixture setup")
}

// One player three tiles from one enemy, for line and pull cases.
pub(super) fn ranged_duel_fixture(seed: u64) -> Encounter {
    let mut setup = EncounterSetup::open_field(5, 5);
    setup.units.push(UnitPlacement { spec: player_spec("ash"), pos: Pos { y: 0, x: 0 } });
    setup.units.push(UnitPlacement { spec: enemy_spec("grub"), pos: Pos { y: 0, x: 3 } });
    Encounter::new(seed, &setup).expect("fixture setup")
}

// A player between two enemies, for splash coverage.
pub(super) fn cluster_fixture(seed: u64) -> Encounter {
    let mut setup = EncounterSetup::open_field(5, 5);
    setup.units.push(UnitPlacement { spec: player_spec("ash"), pos: Pos { y: 2, x: 2 } });
    setup.units.push(UnitPlacement { spec: enemy_spec("grub"), pos: Pos { y: 2, x: 3 } });
    setup.units.push(UnitPlacement { spec: enemy_spec("moss"), pos: Pos { y: 2, x: 1 } });
    Encounter::new(seed, &setup).expect("fixture setup")
}

// Two players and a distant passive enemy.
pub(super) fn passive_fixture(seed: u64) -> Encounter {
    let mut setup = EncounterSetup::open_field(6, 6);
    setup.units.push(UnitPlacement { spec: player_spec("ash"), pos: Pos { y: 0, x: 0 } });
    setup.units.push(UnitPlacement { spec: player_spec("briar"), pos: Pos { y: 1, x: 0 } });
    setup.units.push(UnitPlacement { spec: passive_spec("moss"), pos: Pos { y: 5, x: 5 } });
    Encounter::new(seed, &setup).expect("fixture setup")
}

// A lone player with no opposition.
pub(super) fn solo_victory_fixture(seed: u64) -> Encounter {
    let mut setup = EncounterSetup::open_field(3, 3);
    setup.units.push(UnitPlacement { spec: player_spec("ash"), pos: Pos { y: 0, x: 0 } });
    Encounter::new(seed, &setup).expect("fixture setup")
}

// The player sealed into a corner by water.
pub(super) fn moated_fixture(seed: u64) -> Encounter {
    let mut setup = EncounterSetup::open_field(5, 5);
    setup.terrain.push((Pos { y: 0, x: 1 }, Terrain::Water));
    setup.terrain.push((Pos { y: 1, x: 0 }, Terrain::Water));
    setup.terrain.push((Pos { y: 1, x: 1 }, Terrain::Water));
    setup.units.push(UnitPlacement { spec: player_spec("ash"), pos: Pos { y: 0, x: 0 } });
    Encounter::new(seed, &setup).expect("fixture setup")
}

// A passive enemy walled into a pocket within attack range of the player.
pub(super) fn pocket_fixture(seed: u64) -> Encounter {
    let mut setup = EncounterSetup::open_field(6, 6);
    for pos in [
        Pos { y: 0, x: 2 },
        Pos { y: 0, x: 4 },
        Pos { y: 1, x: 2 },
        Pos { y: 1, x: 3 },
        Pos { y: 1, x: 4 },
    ] {
        setup.terrain.push((pos, Terrain::Water));
    }
    setup.units.push(UnitPlacement { spec: player_spec("ash"), pos: Pos { y: 0, x: 0 } });
    setup.units.push(UnitPlacement { spec: passive_spec("moss"), pos: Pos { y: 0, x: 3 } });
    Encounter::new(seed, &setup).expect("fixture setup")
}

// A passive enemy sealed in a two-tile pocket; only one pocket tile lies
// inside attack range of the player.
pub(super) fn ledge_fixture(seed: u64) -> Encounter {
    let mut setup = EncounterSetup::open_field(6, 6);
    for pos in [
        Pos { y: 0, x: 3 },
        Pos { y: 0, x: 5 },
        Pos { y: 1, x: 3 },
        Pos { y: 1, x: 5 },
        Pos { y: 2, x: 4 },
    ] {
        setup.terrain.push((pos, Terrain::Water));
    }
    setup.units.push(UnitPlacement { spec: player_spec("ash"), pos: Pos { y: 0, x: 0 } });
    setup.units.push(UnitPlacement { spec: passive_spec("moss"), pos: Pos { y: 1, x: 4 } });
    Encounter::new(seed, &setup).expect("fixture setup")
}

pub(super) fn relocate(encounter: &mut Encounter, id: UnitId, to: Pos) {
    let from = encounter.units[id].pos;
    encounter.grid.vacate(from);
    let claimed = encounter.grid.occupy(to, Occupant::Unit(id));
    assert!(claimed, "relocation target must be free");
    encounter.units[id].pos = to;
}
