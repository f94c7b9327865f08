//! Path commit and move-range display for the active unit.
//! Logical state updates atomically per tile step; the waypoint list in the
//! emitted event is what the presentation layer animates afterwards.

use super::*;

impl Encounter {
    pub(super) fn move_active(&mut self, to: Pos) -> Result<(), ActionError> {
        let id = self.active_unit.ok_or(ActionError::NoActiveUnit)?;
        let unit = &self.units[id];
        if !unit.is_active() {
            return Err(ActionError::UnitDown);
        }
        if unit.ap == 0 {
            return Err(ActionError::NoActionPoints);
        }
        let start = unit.pos;
        if to == start {
            return Err(ActionError::InvalidTarget);
        }

        let mut path = self.grid.find_path(start, to).ok_or(ActionError::NoPath)?;
        // An occupied goal is legal for pathing but not for standing; the
        // move stops on the goal's predecessor.
        if self.grid.occupant(to).is_some() {
            path.pop();
        }
        if path.is_empty() {
            return Err(ActionError::NoPath);
        }

        self.commit_path(id, &path);
        self.units[id].ap -= 1;
        self.grid.clear_highlights();
        self.log.push(LogEvent::UnitMoved { unit: id, waypoints: path });

        let dest = self.units[id].pos;
        if self.grid.tile(dest).is_some_and(|tile| tile.exit) {
            self.log.push(LogEvent::ExitReached { unit: id, pos: dest });
        }
        Ok(())
    }

    // Claims the next tile before releasing the previous one, in strict path
    // order, so no interleaving can observe a double claim or a ghost vacancy.
    pub(super) fn commit_path(&mut self, id: UnitId, path: &[Pos]) {
        for &step in path {
            let prev = self.units[id].pos;
            let claimed = self.grid.occupy(step, Occupant::Unit(id));
            debug_assert!(claimed, "path step must land on a free tile");
            self.grid.vacate(prev);
            self.units[id].pos = step;
        }
    }

    // Recomputes the move-range display for the active unit: flood-fills
    // from its tile and highlights the result for the renderer.
    pub fn highlight_move_range(&mut self) -> Result<Vec<Pos>, ActionError> {
        let id = self.active_unit.ok_or(ActionError::NoActiveUnit)?;
        let unit = &self.units[id];
        if !unit.is_active() {
            return Err(ActionError::UnitDown);
        }
        let reachable: Vec<Pos> =
            self.grid.flood_fill_reachable(unit.pos, unit.move_range).into_iter().collect();
        self.grid.clear_highlights();
        self.grid.set_highlighted(&reachable);
        Ok(reachable)
    }
}
