//! Enemy decision step and the sequential enemy-phase sweep.
//! Enemies act one at a time in a fixed scan order, so one enemy's damage
//! and deaths are visible to the next enemy's decision.

use super::*;
use crate::grid::manhattan;

impl Encounter {
    pub(super) fn run_enemy_sweep(&mut self) {
        for id in self.enemy_order.clone() {
            if self.living_players() == 0 {
                break;
            }
            let Some(unit) = self.units.get_mut(id) else {
                continue;
            };
            if !unit.is_active() {
                continue;
            }
            // A stunned enemy spends its step shaking the stun off.
            if unit.stunned {
                unit.stunned = false;
                self.log.push(LogEvent::EnemyStunSkipped { unit: id });
                continue;
            }
            let temper = unit.temper;
            match temper {
                Temper::Normal => self.normal_step(id),
                Temper::Passive => self.passive_step(id),
            }
            self.log.push(LogEvent::EnemyActed { unit: id });
        }
    }

    // Chase the nearest player by path length, close the gap, swing when
    // adjacent enough.
    fn normal_step(&mut self, id: UnitId) {
        let origin = self.units[id].pos;
        let mut best: Option<(UnitId, Vec<Pos>)> = None;
        for pid in self.player_order.clone() {
            let Some(player) = self.units.get(pid) else {
                continue;
            };
            if !player.is_active() {
                continue;
            }
            if let Some(path) = self.grid.find_path(origin, player.pos)
                && best.as_ref().is_none_or(|(_, best_path)| path.len() < best_path.len())
            {
                best = Some((pid, path));
            }
        }
        let Some((target, path)) = best else {
            return;
        };

        let reach = self.units[id].attack_range;
        if manhattan(origin, self.units[target].pos) <= reach {
            self.resolve_attack(id, target, None, None);
            return;
        }

        let move_range = self.units[id].move_range as usize;
        let steps: Vec<Pos> =
            path[..path.len() - 1].iter().copied().take(move_range).collect();
        if !steps.is_empty() {
            self.commit_path(id, &steps);
            self.log.push(LogEvent::UnitMoved { unit: id, waypoints: steps });
        }
        let now = self.units[id].pos;
        if manhattan(now, self.units[target].pos) <= reach {
            self.resolve_attack(id, target, None, None);
        }
    }

    // Dormant until provoked; then hunts the weakest player from standoff
    // range, holding `attack_range` tiles back when a path exists.
    fn passive_step(&mut self, id: UnitId) {
        if !self.units[id].provoked {
            return;
        }
        let origin = self.units[id].pos;
        let mut target: Option<UnitId> = None;
        for pid in self.player_order.clone() {
            let Some(player) = self.units.get(pid) else {
                continue;
            };
            if !player.is_active() {
                continue;
            }
            let weaker = match target {
                None => true,
                Some(current) => player.hp < self.units[current].hp,
            };
            if weaker {
                target = Some(pid);
            }
        }
        let Some(target) = target else {
            return;
        };
        let target_pos = self.units[target].pos;
        let reach = self.units[id].attack_range;
        let move_range = self.units[id].move_range as usize;

        if let Some(path) = self.grid.find_path(origin, target_pos) {
            let standoff = path.len().saturating_sub(reach as usize).min(move_range);
            let steps: Vec<Pos> =
                path[..path.len() - 1].iter().copied().take(standoff).collect();
            if !steps.is_empty() {
                self.commit_path(id, &steps);
                self.log.push(LogEvent::UnitMoved { unit: id, waypoints: steps });
            }
            if manhattan(self.units[id].pos, target_pos) <= reach {
                self.resolve_attack(id, target, None, None);
            }
            return;
        }

        // Boxed in: no path to the target itself. Attack in place if the
        // current tile already reaches, otherwise slip to the closest open
        // tile inside attack range of the target.
        if manhattan(origin, target_pos) <= reach {
            self.resolve_attack(id, target, None, None);
            return;
        }
        let ring = self.grid.tiles_in_radius(target_pos, reach).empty;
        let mut best: Option<(Pos, Vec<Pos>, u32)> = None;
        for pos in ring {
            let open = self
                .grid
                .tile(pos)
                .is_some_and(|tile| tile.is_passable() && !tile.is_occupied());
            if !open {
                continue;
            }
            let Some(path) = self.grid.find_path(origin, pos) else {
                continue;
            };
            if path.len() > move_range {
                continue;
            }
            let closeness = manhattan(pos, target_pos);
            if best.as_ref().is_none_or(|(_, _, best_closeness)| closeness < *best_closeness) {
                best = Some((pos, path, closeness));
            }
        }
        if let Some((_, path, _)) = best {
            self.commit_path(id, &path);
            self.log.push(LogEvent::UnitMoved { unit: id, waypoints: path });
            if manhattan(self.units[id].pos, target_pos) <= reach {
                self.resolve_attack(id, target, None, None);
            }
        }
    }
}
