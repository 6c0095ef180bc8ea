//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - dt-driven timers only, no wall-clock queries
//! - Seeded RNG only, owned by the target collection
//! - No rendering or platform dependencies

pub mod collision;
pub mod state;
pub mod tick;

pub use collision::{TILING_OFFSETS, paddle_hits_target, resolve_collisions};
pub use state::{
    Action, GamePhase, InputSet, Paddle, Projectile, ProjectileSet, Target, TargetSet, World,
};
pub use tick::tick;
