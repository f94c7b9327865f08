//! Command validation and dispatch for the input collaborator.
//! Every rejected command leaves the encounter untouched; the UI decides
//! whether a rejection deserves feedback.

use super::*;

impl Encounter {
    pub fn apply(&mut self, command: Command) -> Result<(), ActionError> {
        if self.outcome.is_some() {
            return Err(ActionError::EncounterOver);
        }
        if self.phase != Phase::PlayerTurn {
            return Err(ActionError::WrongPhase);
        }
        // An armed card owns the next tile click; only resolving or
        // cancelling it may proceed.
        if self.pending_aim.is_some()
            && !matches!(command, Command::Attack { .. } | Command::Cancel)
        {
            return Err(ActionError::TargetingPending);
        }

        let result = match command {
            Command::Select { unit } => self.select_unit(unit),
            Command::Move { to } => self.move_active(to),
            Command::Aim { shape, rider } => self.arm_aim(shape, rider),
            Command::Attack { target } => self.attack(target),
            Command::Cancel => self.cancel_aim(),
            Command::EndTurn => self.end_player_turn(),
        };
        if result.is_ok() {
            self.next_input_seq += 1;
        }
        result
    }

    fn select_unit(&mut self, id: UnitId) -> Result<(), ActionError> {
        let unit = self.units.get(id).ok_or(ActionError::UnknownUnit)?;
        if unit.side != Side::Player {
            return Err(ActionError::NotSelectable);
        }
        if self.active_unit == Some(id) {
            return Ok(());
        }
        // Deselection refills the outgoing unit's budget.
        if let Some(prev) = self.active_unit
            && let Some(prev_unit) = self.units.get_mut(prev)
        {
            prev_unit.ap = prev_unit.ap_max;
        }
        self.active_unit = Some(id);
        self.grid.clear_highlights();
        self.log.push(LogEvent::UnitSelected { unit: id });
        Ok(())
    }
}
