//! Tile storage and occupancy bookkeeping for one encounter's battlefield.
//! The tile table is the single source of truth for who stands where; every
//! occupancy mutation routes through [`Grid::occupy`] and [`Grid::vacate`].

use std::collections::BTreeMap;

use crate::types::*;

mod pathfinding;

pub use pathfinding::RangePartition;
pub(crate) use pathfinding::{manhattan, neighbors};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tile {
    pub pos: Pos,
    pub terrain: Terrain,
    pub occupant: Option<Occupant>,
    pub interactable: bool,
    pub highlighted: bool,
    pub exit: bool,
}

impl Tile {
    pub fn open(pos: Pos) -> Self {
        Self {
            pos,
            terrain: Terrain::Open,
            occupant: None,
            interactable: false,
            highlighted: false,
            exit: false,
        }
    }

    pub fn is_occupied(&self) -> bool {
        self.occupant.is_some()
    }

    pub fn is_passable(&self) -> bool {
        self.terrain != Terrain::Water
    }

    // Depth ordering for the isometric renderer; a pure function of the
    // coordinate, recomputed on demand and never stored anywhere else.
    pub fn depth_key(&self) -> i32 {
        self.pos.x + self.pos.y
    }
}

// Static furniture bound to a tile for the whole encounter.
#[derive(Clone, Debug)]
pub struct Prop {
    pub id: PropId,
    pub pos: Pos,
}

#[derive(Clone)]
pub struct Grid {
    width: usize,
    height: usize,
    tiles: Vec<Tile>,
    extra: BTreeMap<Pos, Tile>,
}

impl Grid {
    pub fn new(width: usize, height: usize) -> Self {
        let mut tiles = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                tiles.push(Tile::open(Pos { y: y as i32, x: x as i32 }));
            }
        }
        Self { width, height, tiles, extra: BTreeMap::new() }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn in_bounds(&self, pos: Pos) -> bool {
        pos.x >= 0
            && pos.y >= 0
            && (pos.x as usize) < self.width
            && (pos.y as usize) < self.height
    }

    pub fn tile(&self, pos: Pos) -> Option<&Tile> {
        if self.in_bounds(pos) {
            return Some(&self.tiles[self.index(pos)]);
        }
        self.extra.get(&pos)
    }

    pub fn tile_mut(&mut self, pos: Pos) -> Option<&mut Tile> {
        if self.in_bounds(pos) {
            let idx = self.index(pos);
            return Some(&mut self.tiles[idx]);
        }
        self.extra.get_mut(&pos)
    }

    pub fn set_terrain(&mut self, pos: Pos, terrain: Terrain) {
        if let Some(tile) = self.tile_mut(pos) {
            tile.terrain = terrain;
        }
    }

    // Extends the addressable space past the rectangular bounds (doors and
    // portals into adjacent rooms). In-bounds coordinates and duplicates are
    // rejected so every coordinate keeps mapping to at most one tile.
    pub fn attach_extra(&mut self, tile: Tile) -> Result<(), SetupError> {
        let pos = tile.pos;
        if self.in_bounds(pos) || self.extra.contains_key(&pos) {
            return Err(SetupError::ExtraTileInsideBounds { pos });
        }
        self.extra.insert(pos, tile);
        Ok(())
    }

    pub fn occupy(&mut self, pos: Pos, occupant: Occupant) -> bool {
        match self.tile_mut(pos) {
            Some(tile) if tile.occupant.is_none() => {
                tile.occupant = Some(occupant);
                true
            }
            _ => false,
        }
    }

    pub fn vacate(&mut self, pos: Pos) -> Option<Occupant> {
        self.tile_mut(pos).and_then(|tile| tile.occupant.take())
    }

    pub fn occupant(&self, pos: Pos) -> Option<Occupant> {
        self.tile(pos).and_then(|tile| tile.occupant)
    }

    pub fn set_highlighted(&mut self, positions: &[Pos]) {
        for pos in positions {
            if let Some(tile) = self.tile_mut(*pos) {
                tile.highlighted = true;
            }
        }
    }

    pub fn clear_highlights(&mut self) {
        for tile in &mut self.tiles {
            tile.highlighted = false;
        }
        for tile in self.extra.values_mut() {
            tile.highlighted = false;
        }
    }

    pub fn highlighted_tiles(&self) -> Vec<Pos> {
        self.positions().filter(|pos| self.tile(*pos).is_some_and(|t| t.highlighted)).collect()
    }

    pub fn positions(&self) -> impl Iterator<Item = Pos> + '_ {
        self.tiles.iter().map(|tile| tile.pos).chain(self.extra.keys().copied())
    }

    // Clears per-encounter residue while keeping the topology itself, so a
    // grid can host the next encounter without being rebuilt.
    pub fn reset(&mut self) {
        for tile in &mut self.tiles {
            tile.occupant = None;
            tile.highlighted = false;
        }
        self.extra.clear();
    }

    fn index(&self, pos: Pos) -> usize {
        (pos.y as usize) * self.width + (pos.x as usize)
    }
}

// Isometric-diamond render anchor. The logical grid stays a square lattice;
// the projection is applied only when a collaborator asks where to draw.
pub fn world_anchor(pos: Pos, cell: f32) -> (f32, f32) {
    let x = (pos.x - pos.y) as f32 * cell;
    let y = (pos.x + pos.y) as f32 * cell * 0.5;
    (x, y)
}
