use slotmap::new_key_type;

use serde::{Deserialize, Serialize};

new_key_type! {
    pub struct UnitId;
    pub struct PropId;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Pos {
    pub y: i32,
    pub x: i32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Terrain {
    Open,
    Water,
    Oil,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Side {
    Player,
    Enemy,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Occupant {
    Unit(UnitId),
    Prop(PropId),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    PlayerTurn,
    EnemyTurn,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Temper {
    Normal,
    Passive,
}

// At most one rider is armed at a time; the next resolved attack consumes it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttackRider {
    Stun,
    Pull,
    Double,
    Splash,
    LifeSteal,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttackShape {
    Single,
    Radius(u32),
    Line(u32),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    Select { unit: UnitId },
    Move { to: Pos },
    Aim { shape: AttackShape, rider: Option<AttackRider> },
    Attack { target: Pos },
    Cancel,
    EndTurn,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunOutcome {
    Victory,
    Defeat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActionError {
    EncounterOver,
    WrongPhase,
    NoActiveUnit,
    UnknownUnit,
    NotSelectable,
    UnitDown,
    NoActionPoints,
    NoPath,
    OutOfRange,
    InvalidTarget,
    TargetingPending,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SetupError {
    ZeroSizedGrid,
    NoPlayerUnits,
    MissingStartTile { pos: Pos },
    BlockedStartTile { pos: Pos },
    OccupiedStartTile { pos: Pos },
    DuplicateUnitName { name: String },
    ExtraTileInsideBounds { pos: Pos },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LogEvent {
    PhaseChanged { phase: Phase, turn: u32 },
    UnitSelected { unit: UnitId },
    UnitMoved { unit: UnitId, waypoints: Vec<Pos> },
    ExitReached { unit: UnitId, pos: Pos },
    AttackResolved { attacker: UnitId, target: UnitId, damage: i32, dodged: bool },
    HealthChanged { unit: UnitId, hp: i32, shield: i32 },
    HealthThresholdCrossed { unit: UnitId },
    UnitStunned { unit: UnitId },
    UnitPulled { unit: UnitId, to: Pos },
    LifeDrained { unit: UnitId, healed: i32 },
    Enraged { unit: UnitId },
    UnitDied { unit: UnitId, side: Side },
    EnemyActed { unit: UnitId },
    EnemyStunSkipped { unit: UnitId },
    Finished { outcome: RunOutcome },
}
