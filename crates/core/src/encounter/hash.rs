//! Stable snapshot hashing for deterministic verification.
//! This module exists to keep hashing concerns separate from simulation
//! control code.

use std::hash::Hasher;

use xxhash_rust::xxh3::Xxh3;

use super::*;

impl Encounter {
    pub fn snapshot_hash(&self) -> u64 {
        let mut hasher = Xxh3::new();
        hasher.write_u64(self.seed);
        hasher.write_u32(self.turn);
        hasher.write_u8(match self.phase {
            Phase::PlayerTurn => 0,
            Phase::EnemyTurn => 1,
        });
        hasher.write_u64(self.next_input_seq);
        hasher.write_u8(match self.outcome {
            None => 0,
            Some(RunOutcome::Victory) => 1,
            Some(RunOutcome::Defeat) => 2,
        });

        for id in self.player_order.iter().chain(self.enemy_order.iter()) {
            let Some(unit) = self.units.get(*id) else {
                hasher.write_u8(0xFF);
                continue;
            };
            hasher.write(unit.name.as_bytes());
            hasher.write_i32(unit.pos.x);
            hasher.write_i32(unit.pos.y);
            hasher.write_i32(unit.hp);
            hasher.write_i32(unit.shield);
            hasher.write_u32(unit.ap);
            hasher.write_u8(u8::from(unit.stunned));
            hasher.write_u8(match unit.rider {
                None => 0,
                Some(AttackRider::Stun) => 1,
                Some(AttackRider::Pull) => 2,
                Some(AttackRider::Double) => 3,
                Some(AttackRider::Splash) => 4,
                Some(AttackRider::LifeSteal) => 5,
            });
            hasher.write_u8(u8::from(unit.provoked));
            hasher.write_u8(u8::from(unit.enraged));
            hasher.write_u32(unit.damage_multiplier_percent);
        }
        hasher.finish()
    }
}
