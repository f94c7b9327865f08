//! Unit state and the health/shield arithmetic shared by both sides.
//! This module does not own grid occupancy or attack legality; the encounter
//! keeps unit position and tile occupant in lockstep.

use serde::{Deserialize, Serialize};

use crate::types::*;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UnitSpec {
    pub name: String,
    pub side: Side,
    pub max_hp: i32,
    pub start_hp: Option<i32>,
    pub move_range: u32,
    pub attack_range: u32,
    pub attack_damage: i32,
    pub melee_multiplier_percent: u32,
    pub ranged_multiplier_percent: u32,
    pub dodge_percent: u8,
    pub ap_max: u32,
    pub attack_shape: AttackShape,
    pub temper: Temper,
}

#[derive(Clone, Debug)]
pub struct Unit {
    pub id: UnitId,
    pub name: String,
    pub side: Side,
    pub pos: Pos,
    pub hp: i32,
    pub max_hp: i32,
    pub shield: i32,
    pub move_range: u32,
    pub attack_range: u32,
    pub attack_damage: i32,
    pub melee_multiplier_percent: u32,
    pub ranged_multiplier_percent: u32,
    pub dodge_percent: u8,
    pub ap: u32,
    pub ap_max: u32,
    pub attack_shape: AttackShape,
    pub temper: Temper,
    pub stunned: bool,
    pub rider: Option<AttackRider>,
    pub provoked: bool,
    pub enraged: bool,
    pub damage_multiplier_percent: u32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DamageSplit {
    pub shield_absorbed: i32,
    pub hp_lost: i32,
}

impl Unit {
    pub fn from_spec(spec: &UnitSpec, pos: Pos) -> Self {
        let hp = spec.start_hp.unwrap_or(spec.max_hp).clamp(0, spec.max_hp);
        Self {
            id: UnitId::default(),
            name: spec.name.clone(),
            side: spec.side,
            pos,
            hp,
            max_hp: spec.max_hp,
            shield: 0,
            move_range: spec.move_range,
            attack_range: spec.attack_range,
            attack_damage: spec.attack_damage,
            melee_multiplier_percent: spec.melee_multiplier_percent,
            ranged_multiplier_percent: spec.ranged_multiplier_percent,
            dodge_percent: spec.dodge_percent,
            ap: spec.ap_max,
            ap_max: spec.ap_max,
            attack_shape: spec.attack_shape,
            temper: spec.temper,
            stunned: false,
            rider: None,
            provoked: false,
            enraged: false,
            damage_multiplier_percent: 100,
        }
    }

    // A player unit at 0 hp stays on its tile but is inert; an enemy at 0 hp
    // is removed by the encounter.
    pub fn is_active(&self) -> bool {
        self.hp > 0
    }

    pub fn hp_percent(&self) -> i32 {
        (self.hp * 100) / self.max_hp
    }

    pub fn absorb_damage(&mut self, amount: i32) -> DamageSplit {
        let amount = amount.max(0);
        let shield_absorbed = amount.min(self.shield);
        self.shield -= shield_absorbed;
        let hp_lost = (amount - shield_absorbed).min(self.hp);
        self.hp -= hp_lost;
        DamageSplit { shield_absorbed, hp_lost }
    }

    pub fn heal(&mut self, amount: i32) -> i32 {
        let healed = amount.max(0).min(self.max_hp - self.hp);
        self.hp += healed;
        healed
    }

    // Enrage burst: siphons up to `cap` health, never dropping the victim
    // below 1 hp and ignoring shields entirely.
    pub fn drain_health(&mut self, cap: i32) -> i32 {
        let drained = cap.max(0).min(self.hp - 1).max(0);
        self.hp -= drained;
        drained
    }

    pub fn attack_damage_at(&self, distance: u32) -> i32 {
        let multiplier = if distance <= 1 {
            self.melee_multiplier_percent
        } else {
            self.ranged_multiplier_percent
        };
        let scaled = (self.attack_damage as i64 * multiplier as i64) / 100;
        let scaled = (scaled * self.damage_multiplier_percent as i64) / 100;
        scaled as i32
    }
}
