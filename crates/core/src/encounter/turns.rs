//! Turn-phase sequencing: end-of-turn, the enemy phase, and the player
//! refresh that follows it.

use super::*;

impl Encounter {
    pub(super) fn end_player_turn(&mut self) -> Result<(), ActionError> {
        // An encounter with no standing enemies is already won; the enemy
        // phase is skipped entirely.
        if self.living_enemies() == 0 {
            self.finish(RunOutcome::Victory);
            return Ok(());
        }

        self.phase = Phase::EnemyTurn;
        self.grid.clear_highlights();
        self.log.push(LogEvent::PhaseChanged { phase: Phase::EnemyTurn, turn: self.turn });
        self.run_enemy_sweep();

        if self.living_players() == 0 {
            self.finish(RunOutcome::Defeat);
            return Ok(());
        }
        self.begin_player_turn();
        Ok(())
    }

    fn begin_player_turn(&mut self) {
        self.turn += 1;
        self.phase = Phase::PlayerTurn;
        for id in self.player_order.clone() {
            let Some(unit) = self.units.get_mut(id) else {
                continue;
            };
            unit.shield = 0;
            if unit.is_active() {
                unit.ap = unit.ap_max;
            }
        }
        // Keep the previous selection when it can still act, otherwise fall
        // back to the first unit still standing.
        let keep = self
            .active_unit
            .filter(|id| self.units.get(*id).is_some_and(|unit| unit.is_active()));
        self.active_unit = keep.or_else(|| {
            self.player_order
                .iter()
                .copied()
                .find(|id| self.units.get(*id).is_some_and(|unit| unit.is_active()))
        });

        self.log.push(LogEvent::PhaseChanged { phase: Phase::PlayerTurn, turn: self.turn });
        if let Some(unit) = self.active_unit {
            self.log.push(LogEvent::UnitSelected { unit });
        }
    }

    pub(super) fn finish(&mut self, outcome: RunOutcome) {
        self.outcome = Some(outcome);
        self.log.push(LogEvent::Finished { outcome });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encounter::test_support::*;

    #[test]
    fn a_new_player_turn_restores_action_points_and_clears_shields() {
        let mut encounter = two_on_two(7);
        let ash = encounter.unit_by_name("ash").expect("ash");
        let briar = encounter.unit_by_name("briar").expect("briar");
        encounter.apply(Command::Move { to: Pos { y: 0, x: 1 } }).expect("spend ap");
        encounter.units[briar].shield = 4;

        encounter.apply(Command::EndTurn).expect("end turn");
        assert_eq!(encounter.phase(), Phase::PlayerTurn);
        assert_eq!(encounter.turn(), 2);
        let ash_unit = encounter.unit(ash).expect("ash");
        assert_eq!(ash_unit.ap, ash_unit.ap_max);
        assert_eq!(encounter.unit(briar).expect("briar").shield, 0);
    }

    #[test]
    fn ending_the_turn_with_no_enemies_wins_without_an_enemy_phase() {
        let mut encounter = solo_victory_fixture(7);
        encounter.apply(Command::EndTurn).expect("end turn");
        assert_eq!(encounter.outcome(), Some(RunOutcome::Victory));
        assert!(!encounter.log().iter().any(|event| matches!(
            event,
            LogEvent::PhaseChanged { phase: Phase::EnemyTurn, .. }
        )));
    }

    #[test]
    fn losing_every_player_unit_ends_in_defeat() {
        let mut encounter = duel_fixture(7);
        let ash = encounter.unit_by_name("ash").expect("ash");
        encounter.units[ash].hp = 1;
        encounter.units[ash].shield = 0;

        encounter.apply(Command::EndTurn).expect("end turn");
        assert_eq!(encounter.outcome(), Some(RunOutcome::Defeat));
        assert_eq!(encounter.apply(Command::EndTurn), Err(ActionError::EncounterOver));
    }

    #[test]
    fn selection_falls_back_to_a_standing_unit_when_the_active_one_dies() {
        let mut encounter = two_on_two(7);
        let ash = encounter.unit_by_name("ash").expect("ash");
        let briar = encounter.unit_by_name("briar").expect("briar");
        let grub = encounter.unit_by_name("grub").expect("grub");
        assert_eq!(encounter.active_unit(), Some(ash));

        // Park the enemy next to a dying ash so the sweep fells it.
        relocate(&mut encounter, grub, Pos { y: 0, x: 1 });
        encounter.units[ash].hp = 1;
        encounter.units[ash].shield = 0;

        encounter.apply(Command::EndTurn).expect("end turn");
        assert!(!encounter.units[ash].is_active());
        assert_eq!(encounter.active_unit(), Some(briar));
    }

    #[test]
    fn the_enemy_phase_emits_one_pacing_event_per_acting_enemy() {
        let mut encounter = two_on_two(7);
        let moss = encounter.unit_by_name("moss").expect("moss");
        encounter.units[moss].provoked = true;

        encounter.apply(Command::EndTurn).expect("end turn");
        let acted = encounter
            .log()
            .iter()
            .filter(|event| matches!(event, LogEvent::EnemyActed { .. }))
            .count();
        assert_eq!(acted, 2);
    }
}
