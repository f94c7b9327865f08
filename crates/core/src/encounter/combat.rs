//! Attack legality and resolution: dodge, shield-then-health damage, rider
//! consumption, death handling, and the passive enrage burst.

use std::collections::BTreeSet;

use rand_chacha::rand_core::Rng;

use super::*;
use crate::grid::{manhattan, neighbors};
use crate::units::DamageSplit;

pub(super) const PULL_DISTANCE: u32 = 2;
pub(super) const LIFE_DRAIN_PER_UNIT: i32 = 3;
pub(super) const ENRAGE_THRESHOLD_PERCENT: i32 = 30;
pub(super) const ENRAGE_DAMAGE_MULTIPLIER_PERCENT: u32 = 150;
const DIALOGUE_THRESHOLD_PERCENT: i32 = 50;

impl Encounter {
    pub(super) fn arm_aim(
        &mut self,
        shape: AttackShape,
        rider: Option<AttackRider>,
    ) -> Result<(), ActionError> {
        let id = self.active_unit.ok_or(ActionError::NoActiveUnit)?;
        let unit = &self.units[id];
        if !unit.is_active() {
            return Err(ActionError::UnitDown);
        }
        if unit.ap == 0 {
            return Err(ActionError::NoActionPoints);
        }
        let tiles = self.shape_tiles(unit.pos, shape);
        if tiles.is_empty() {
            return Err(ActionError::OutOfRange);
        }

        self.units[id].rider = rider;
        self.grid.clear_highlights();
        let tile_list: Vec<Pos> = tiles.iter().copied().collect();
        self.grid.set_highlighted(&tile_list);
        self.pending_aim = Some(PendingAim { tiles });
        Ok(())
    }

    pub(super) fn cancel_aim(&mut self) -> Result<(), ActionError> {
        if self.pending_aim.take().is_some()
            && let Some(id) = self.active_unit
            && let Some(unit) = self.units.get_mut(id)
        {
            unit.rider = None;
        }
        self.grid.clear_highlights();
        Ok(())
    }

    pub(super) fn attack(&mut self, target: Pos) -> Result<(), ActionError> {
        let id = self.active_unit.ok_or(ActionError::NoActiveUnit)?;
        let unit = &self.units[id];
        if !unit.is_active() {
            return Err(ActionError::UnitDown);
        }
        if unit.ap == 0 {
            return Err(ActionError::NoActionPoints);
        }
        let origin = unit.pos;
        let default_shape = unit.attack_shape;

        let in_shape = match &self.pending_aim {
            Some(aim) => aim.tiles.contains(&target),
            None => self.in_default_shape(origin, default_shape, target),
        };
        if !in_shape {
            return Err(ActionError::OutOfRange);
        }
        let defender = match self.grid.occupant(target) {
            Some(Occupant::Unit(defender)) => defender,
            _ => return Err(ActionError::InvalidTarget),
        };
        if self.units[defender].side == self.units[id].side
            || !self.units[defender].is_active()
        {
            return Err(ActionError::InvalidTarget);
        }

        // Checks passed; the armed card and the rider are consumed now,
        // whatever the dice say.
        let aim = self.pending_aim.take();
        let rider = self.units[id].rider.take();
        let splash_area = match rider {
            Some(AttackRider::Splash) => match aim {
                Some(aim) => Some(aim.tiles),
                None => Some(self.shape_tiles(origin, default_shape)),
            },
            _ => None,
        };

        self.resolve_attack(id, defender, rider, splash_area);
        self.units[id].ap -= 1;
        self.grid.clear_highlights();
        Ok(())
    }

    pub(super) fn resolve_attack(
        &mut self,
        attacker: UnitId,
        defender: UnitId,
        rider: Option<AttackRider>,
        splash_area: Option<BTreeSet<Pos>>,
    ) {
        let distance = manhattan(self.units[attacker].pos, self.units[defender].pos);
        let dodge = self.units[defender].dodge_percent;
        if self.roll_percent() < dodge {
            self.log.push(LogEvent::AttackResolved {
                attacker,
                target: defender,
                damage: 0,
                dodged: true,
            });
            return;
        }

        let mut damage = self.units[attacker].attack_damage_at(distance);
        if rider == Some(AttackRider::Double) {
            damage *= 2;
        }
        self.log.push(LogEvent::AttackResolved { attacker, target: defender, damage, dodged: false });
        let split = self.deal_damage(defender, damage);

        match rider {
            Some(AttackRider::Stun) => {
                if let Some(unit) = self.units.get_mut(defender)
                    && unit.is_active()
                {
                    unit.stunned = true;
                    self.log.push(LogEvent::UnitStunned { unit: defender });
                }
            }
            Some(AttackRider::Pull) => {
                if self.units.get(defender).is_some_and(|unit| unit.is_active()) {
                    self.pull_toward(attacker, defender);
                }
            }
            Some(AttackRider::LifeSteal) => {
                if split.hp_lost > 0 && self.units[attacker].heal(split.hp_lost) > 0 {
                    let unit = &self.units[attacker];
                    self.log.push(LogEvent::HealthChanged {
                        unit: attacker,
                        hp: unit.hp,
                        shield: unit.shield,
                    });
                }
            }
            Some(AttackRider::Splash) => {
                if let Some(area) = splash_area {
                    self.splash_damage(attacker, defender, damage, &area);
                }
            }
            Some(AttackRider::Double) | None => {}
        }
    }

    fn splash_damage(
        &mut self,
        attacker: UnitId,
        primary: UnitId,
        damage: i32,
        area: &BTreeSet<Pos>,
    ) {
        let attacker_side = self.units[attacker].side;
        let mut victims = Vec::new();
        for pos in area {
            if let Some(Occupant::Unit(victim)) = self.grid.occupant(*pos)
                && victim != primary
                && self.units.get(victim).is_some_and(|unit| {
                    unit.side != attacker_side && unit.is_active()
                })
            {
                victims.push(victim);
            }
        }
        for victim in victims {
            let dodge = self.units[victim].dodge_percent;
            if self.roll_percent() < dodge {
                self.log.push(LogEvent::AttackResolved {
                    attacker,
                    target: victim,
                    damage: 0,
                    dodged: true,
                });
                continue;
            }
            self.log.push(LogEvent::AttackResolved { attacker, target: victim, damage, dodged: false });
            self.deal_damage(victim, damage);
        }
    }

    pub(super) fn deal_damage(&mut self, target: UnitId, amount: i32) -> DamageSplit {
        let unit = &mut self.units[target];
        let before_hp = unit.hp;
        let split = unit.absorb_damage(amount);
        let hp = unit.hp;
        let shield = unit.shield;
        let side = unit.side;
        let pos = unit.pos;
        let crossed = split.hp_lost > 0
            && before_hp * 100 >= DIALOGUE_THRESHOLD_PERCENT * unit.max_hp
            && hp * 100 < DIALOGUE_THRESHOLD_PERCENT * unit.max_hp;
        let damaged = split.shield_absorbed + split.hp_lost > 0;
        if damaged && unit.temper == Temper::Passive {
            unit.provoked = true;
        }
        let enrage_now = side == Side::Enemy
            && unit.temper == Temper::Passive
            && !unit.enraged
            && hp > 0
            && hp * 100 < ENRAGE_THRESHOLD_PERCENT * unit.max_hp;

        self.log.push(LogEvent::HealthChanged { unit: target, hp, shield });
        if crossed {
            self.log.push(LogEvent::HealthThresholdCrossed { unit: target });
        }
        if hp == 0 {
            self.handle_death(target, side, pos);
        } else if enrage_now {
            self.enrage_burst(target);
        }
        split
    }

    fn handle_death(&mut self, target: UnitId, side: Side, pos: Pos) {
        self.log.push(LogEvent::UnitDied { unit: target, side });
        match side {
            Side::Enemy => {
                self.grid.vacate(pos);
                self.units.remove(target);
                self.enemy_order.retain(|id| *id != target);
            }
            // A fallen player unit keeps its tile and is merely inert.
            Side::Player => {}
        }
    }

    fn enrage_burst(&mut self, id: UnitId) {
        {
            let unit = &mut self.units[id];
            unit.enraged = true;
            unit.damage_multiplier_percent = ENRAGE_DAMAGE_MULTIPLIER_PERCENT;
        }
        self.log.push(LogEvent::Enraged { unit: id });

        let mut total = 0;
        for pid in self.player_order.clone() {
            let Some(player) = self.units.get_mut(pid) else {
                continue;
            };
            if !player.is_active() {
                continue;
            }
            let drained = player.drain_health(LIFE_DRAIN_PER_UNIT);
            if drained > 0 {
                let hp = player.hp;
                let shield = player.shield;
                total += drained;
                self.log.push(LogEvent::HealthChanged { unit: pid, hp, shield });
            }
        }

        let healed = if total > 0 { self.units[id].heal(total) } else { 0 };
        self.log.push(LogEvent::LifeDrained { unit: id, healed });
        if healed > 0 {
            let unit = &self.units[id];
            self.log.push(LogEvent::HealthChanged { unit: id, hp: unit.hp, shield: unit.shield });
        }
    }

    fn pull_toward(&mut self, attacker: UnitId, defender: UnitId) {
        let anchor = self.units[attacker].pos;
        let mut moved = false;
        for _ in 0..PULL_DISTANCE {
            let from = self.units[defender].pos;
            if manhattan(from, anchor) <= 1 {
                break;
            }
            let dy = (anchor.y - from.y).signum();
            let dx = (anchor.x - from.x).signum();
            let y_step = Pos { y: from.y + dy, x: from.x };
            let x_step = Pos { y: from.y, x: from.x + dx };
            // Larger remaining axis delta first.
            let mut candidates = Vec::new();
            if (anchor.y - from.y).abs() >= (anchor.x - from.x).abs() {
                if dy != 0 {
                    candidates.push(y_step);
                }
                if dx != 0 {
                    candidates.push(x_step);
                }
            } else {
                if dx != 0 {
                    candidates.push(x_step);
                }
                if dy != 0 {
                    candidates.push(y_step);
                }
            }

            let mut stepped = false;
            for cand in candidates {
                let free = self
                    .grid
                    .tile(cand)
                    .is_some_and(|tile| tile.is_passable() && !tile.is_occupied());
                if !free {
                    continue;
                }
                let claimed = self.grid.occupy(cand, Occupant::Unit(defender));
                debug_assert!(claimed);
                self.grid.vacate(from);
                self.units[defender].pos = cand;
                stepped = true;
                moved = true;
                break;
            }
            if !stepped {
                break;
            }
        }
        if moved {
            let to = self.units[defender].pos;
            self.log.push(LogEvent::UnitPulled { unit: defender, to });
        }
    }

    fn in_default_shape(&self, origin: Pos, shape: AttackShape, target: Pos) -> bool {
        let dist = manhattan(origin, target);
        match shape {
            AttackShape::Single => dist == 1,
            AttackShape::Radius(r) => dist >= 1 && dist <= r,
            AttackShape::Line(r) => self.line_clear(origin, target, r),
        }
    }

    // A line shot needs a shared axis and no unit standing between the
    // muzzle and the target.
    fn line_clear(&self, origin: Pos, target: Pos, range: u32) -> bool {
        if origin.y != target.y && origin.x != target.x {
            return false;
        }
        let dist = manhattan(origin, target);
        if dist == 0 || dist > range {
            return false;
        }
        let dy = (target.y - origin.y).signum();
        let dx = (target.x - origin.x).signum();
        let mut p = Pos { y: origin.y + dy, x: origin.x + dx };
        while p != target {
            let clear = self
                .grid
                .tile(p)
                .is_some_and(|tile| !matches!(tile.occupant, Some(Occupant::Unit(_))));
            if !clear {
                return false;
            }
            p = Pos { y: p.y + dy, x: p.x + dx };
        }
        true
    }

    fn shape_tiles(&self, origin: Pos, shape: AttackShape) -> BTreeSet<Pos> {
        match shape {
            AttackShape::Single => neighbors(origin)
                .into_iter()
                .filter(|pos| self.grid.tile(*pos).is_some())
                .collect(),
            AttackShape::Radius(r) => {
                let partition = self.grid.tiles_in_radius(origin, r);
                partition.unit_bearing.into_iter().chain(partition.empty).collect()
            }
            AttackShape::Line(r) => {
                let partition = self.grid.tiles_in_cross(origin, r);
                partition.unit_bearing.into_iter().chain(partition.empty).collect()
            }
        }
    }

    pub(super) fn roll_percent(&mut self) -> u8 {
        (self.rng.next_u64() % 100) as u8
    }
}
