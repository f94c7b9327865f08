//! Shortest-path search and range queries over the tile table.
//! This module exists so movement, targeting, and AI share one set of
//! deterministic navigation rules. It does not own occupancy mutation.

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use super::Grid;
use crate::types::{Occupant, Pos};

// Ordered by f, then h, then coordinate, so BTreeSet::pop_first is a
// deterministic open-list extraction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
struct OpenNode {
    f: u32,
    h: u32,
    y: i32,
    x: i32,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RangePartition {
    pub unit_bearing: Vec<Pos>,
    pub empty: Vec<Pos>,
}

impl Grid {
    // A* over 4-directional adjacency with uniform step cost and Manhattan
    // heuristic. A tile occupied by another entity is impassable unless it
    // is the goal itself, so "walk adjacent, then attack" resolves without
    // a separate adjacency search. Water never admits a step.
    pub fn find_path(&self, start: Pos, goal: Pos) -> Option<Vec<Pos>> {
        if self.tile(start).is_none_or(|t| !t.is_passable()) {
            return None;
        }
        if self.tile(goal).is_none_or(|t| !t.is_passable()) {
            return None;
        }
        if start == goal {
            return Some(vec![]);
        }

        let mut open_set = BTreeSet::new();
        let mut g_score = BTreeMap::new();
        let mut came_from = BTreeMap::new();
        let h = manhattan(start, goal);
        open_set.insert(OpenNode { f: h, h, y: start.y, x: start.x });
        g_score.insert(start, 0u32);

        while let Some(curr) = open_set.pop_first() {
            let p = Pos { y: curr.y, x: curr.x };
            if p == goal {
                return Some(reconstruct_path(&came_from, start, goal));
            }
            let cur_g = *g_score.get(&p).expect("current node must have g-score");
            for n in neighbors(p) {
                if !self.is_step_walkable(n, goal) {
                    continue;
                }
                let tg = cur_g + 1;
                if tg < *g_score.get(&n).unwrap_or(&u32::MAX) {
                    came_from.insert(n, p);
                    g_score.insert(n, tg);
                    let h = manhattan(n, goal);
                    open_set.insert(OpenNode { f: tg + h, h, y: n.y, x: n.x });
                }
            }
        }
        None
    }

    // BFS over the same adjacency and occupancy rules, collecting every
    // unoccupied passable tile within `max_steps` of the origin. The origin
    // itself (occupied by the mover) is not part of the result.
    pub fn flood_fill_reachable(&self, origin: Pos, max_steps: u32) -> BTreeSet<Pos> {
        let mut reachable = BTreeSet::new();
        if self.tile(origin).is_none() {
            return reachable;
        }

        let mut depth: BTreeMap<Pos, u32> = BTreeMap::new();
        let mut queue = VecDeque::new();
        depth.insert(origin, 0);
        queue.push_back(origin);

        while let Some(current) = queue.pop_front() {
            let steps = depth[&current];
            if steps == max_steps {
                continue;
            }
            for n in neighbors(current) {
                if depth.contains_key(&n) {
                    continue;
                }
                let open = self
                    .tile(n)
                    .is_some_and(|tile| tile.is_passable() && !tile.is_occupied());
                if !open {
                    continue;
                }
                depth.insert(n, steps + 1);
                reachable.insert(n);
                queue.push_back(n);
            }
        }
        reachable
    }

    // Every existing tile within the Manhattan ball of `radius`, split into
    // unit-bearing and empty tiles so callers can damage one partition and
    // merely render the other.
    pub fn tiles_in_radius(&self, origin: Pos, radius: u32) -> RangePartition {
        let r = radius as i32;
        let mut partition = RangePartition::default();
        for dy in -r..=r {
            let span = r - dy.abs();
            for dx in -span..=span {
                let pos = Pos { y: origin.y + dy, x: origin.x + dx };
                if pos == origin {
                    continue;
                }
                self.partition_push(&mut partition, pos);
            }
        }
        partition
    }

    // Tiles along the four axes up to `radius`, same partitioning as the
    // radius query.
    pub fn tiles_in_cross(&self, origin: Pos, radius: u32) -> RangePartition {
        let mut partition = RangePartition::default();
        for (dy, dx) in [(-1, 0), (0, 1), (1, 0), (0, -1)] {
            for step in 1..=radius as i32 {
                let pos = Pos { y: origin.y + dy * step, x: origin.x + dx * step };
                self.partition_push(&mut partition, pos);
            }
        }
        partition
    }

    fn partition_push(&self, partition: &mut RangePartition, pos: Pos) {
        let Some(tile) = self.tile(pos) else {
            return;
        };
        if matches!(tile.occupant, Some(Occupant::Unit(_))) {
            partition.unit_bearing.push(pos);
        } else {
            partition.empty.push(pos);
        }
    }

    fn is_step_walkable(&self, pos: Pos, goal: Pos) -> bool {
        let Some(tile) = self.tile(pos) else {
            return false;
        };
        if !tile.is_passable() {
            return false;
        }
        // Occupied tiles never admit transit; the goal may still be claimed
        // so attack pathing can end on a defender's tile.
        !tile.is_occupied() || pos == goal
    }
}

fn reconstruct_path(came: &BTreeMap<Pos, Pos>, start: Pos, goal: Pos) -> Vec<Pos> {
    let mut p = goal;
    let mut result = vec![p];
    while p != start {
        p = *came.get(&p).expect("path must be reconstructible");
        result.push(p);
    }
    result.reverse();
    result.remove(0);
    result
}

pub(crate) fn neighbors(p: Pos) -> [Pos; 4] {
    [
        Pos { y: p.y - 1, x: p.x },
        Pos { y: p.y, x: p.x + 1 },
        Pos { y: p.y + 1, x: p.x },
        Pos { y: p.y, x: p.x - 1 },
    ]
}

pub(crate) fn manhattan(a: Pos, b: Pos) -> u32 {
    a.x.abs_diff(b.x) + a.y.abs_diff(b.y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Tile;
    use crate::types::{PropId, SetupError, Terrain, UnitId};

    fn block(grid: &mut Grid, pos: Pos) {
        assert!(grid.occupy(pos, Occupant::Prop(PropId::default())));
    }

    #[test]
    fn straight_line_path_has_expected_length_and_order() {
        let grid = Grid::new(7, 7);
        let path = grid.find_path(Pos { y: 3, x: 2 }, Pos { y: 3, x: 5 }).expect("path");
        assert_eq!(path.len(), 3);
        assert_eq!(path[0], Pos { y: 3, x: 3 });
        assert_eq!(path[2], Pos { y: 3, x: 5 });
    }

    #[test]
    fn occupied_tiles_are_never_used_as_transit() {
        let mut grid = Grid::new(5, 3);
        // Occupants sealing the middle column.
        block(&mut grid, Pos { y: 0, x: 2 });
        block(&mut grid, Pos { y: 1, x: 2 });
        block(&mut grid, Pos { y: 2, x: 2 });

        assert!(grid.find_path(Pos { y: 1, x: 0 }, Pos { y: 1, x: 4 }).is_none());
    }

    #[test]
    fn occupied_goal_is_still_reachable() {
        let mut grid = Grid::new(5, 5);
        let goal = Pos { y: 2, x: 3 };
        block(&mut grid, goal);

        let path = grid.find_path(Pos { y: 2, x: 0 }, goal).expect("path onto occupied goal");
        assert_eq!(path.last().copied(), Some(goal));
        for step in &path[..path.len() - 1] {
            assert!(!grid.tile(*step).expect("tile").is_occupied());
        }
    }

    #[test]
    fn water_blocks_even_as_goal() {
        let mut grid = Grid::new(5, 5);
        let goal = Pos { y: 2, x: 3 };
        grid.set_terrain(goal, Terrain::Water);
        assert!(grid.find_path(Pos { y: 2, x: 0 }, goal).is_none());
    }

    #[test]
    fn oil_remains_traversable() {
        let mut grid = Grid::new(5, 1);
        grid.set_terrain(Pos { y: 0, x: 2 }, Terrain::Oil);
        let path = grid.find_path(Pos { y: 0, x: 0 }, Pos { y: 0, x: 4 }).expect("path");
        assert_eq!(path.len(), 4);
    }

    #[test]
    fn detour_around_water_is_shortest_available() {
        let mut grid = Grid::new(7, 7);
        grid.set_terrain(Pos { y: 3, x: 3 }, Terrain::Water);
        let path = grid.find_path(Pos { y: 3, x: 2 }, Pos { y: 3, x: 4 }).expect("path");
        assert_eq!(path.len(), 4);
    }

    #[test]
    fn path_may_leave_the_rectangle_through_an_attached_node() {
        let mut grid = Grid::new(3, 3);
        let mut door = Tile::open(Pos { y: 1, x: 3 });
        door.exit = true;
        grid.attach_extra(door).expect("attach");

        let path = grid.find_path(Pos { y: 1, x: 0 }, Pos { y: 1, x: 3 }).expect("path");
        assert_eq!(path.len(), 3);
        assert_eq!(path.last().copied(), Some(Pos { y: 1, x: 3 }));
    }

    #[test]
    fn flood_fill_excludes_origin_occupied_and_out_of_range_tiles() {
        let mut grid = Grid::new(5, 5);
        let origin = Pos { y: 2, x: 2 };
        block(&mut grid, Pos { y: 2, x: 3 });

        let reachable = grid.flood_fill_reachable(origin, 2);
        assert!(!reachable.contains(&origin));
        assert!(!reachable.contains(&Pos { y: 2, x: 3 }));
        // Going around the occupant puts (2,4) four steps out.
        assert!(!reachable.contains(&Pos { y: 2, x: 4 }));
        assert!(reachable.contains(&Pos { y: 0, x: 2 }));
        assert!(reachable.contains(&Pos { y: 1, x: 3 }));
    }

    #[test]
    fn flood_fill_is_idempotent_without_state_changes() {
        let mut grid = Grid::new(6, 6);
        grid.set_terrain(Pos { y: 2, x: 2 }, Terrain::Water);
        block(&mut grid, Pos { y: 3, x: 3 });

        let first = grid.flood_fill_reachable(Pos { y: 2, x: 3 }, 3);
        let second = grid.flood_fill_reachable(Pos { y: 2, x: 3 }, 3);
        assert_eq!(first, second);
    }

    #[test]
    fn radius_query_partitions_unit_bearing_from_empty() {
        let mut grid = Grid::new(7, 7);
        let origin = Pos { y: 3, x: 3 };
        block(&mut grid, Pos { y: 3, x: 4 });

        let mut with_unit = Grid::new(7, 7);
        let unit_pos = Pos { y: 2, x: 3 };
        assert!(with_unit.occupy(unit_pos, Occupant::Unit(UnitId::default())));
        let partition = with_unit.tiles_in_radius(origin, 2);
        assert!(partition.unit_bearing.contains(&unit_pos));
        assert!(!partition.empty.contains(&unit_pos));
        assert_eq!(partition.unit_bearing.len(), 1);

        // Props are furniture, not units; they land in the empty partition.
        let partition = grid.tiles_in_radius(origin, 2);
        assert!(partition.unit_bearing.is_empty());
        assert!(partition.empty.contains(&Pos { y: 3, x: 4 }));
    }

    #[test]
    fn cross_query_stays_on_the_axes_and_clips_to_existing_tiles() {
        let grid = Grid::new(5, 5);
        let partition = grid.tiles_in_cross(Pos { y: 0, x: 0 }, 2);
        let all: Vec<Pos> = partition.empty;
        assert_eq!(
            all,
            vec![Pos { y: 0, x: 1 }, Pos { y: 0, x: 2 }, Pos { y: 1, x: 0 }, Pos { y: 2, x: 0 }]
        );
    }

    #[test]
    fn attach_extra_error_carries_the_offending_coordinate() {
        let mut grid = Grid::new(3, 3);
        let pos = Pos { y: 0, x: 1 };
        assert_eq!(
            grid.attach_extra(Tile::open(pos)),
            Err(SetupError::ExtraTileInsideBounds { pos })
        );
    }
}
