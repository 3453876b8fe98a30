//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (row-major over the brick grid)
//! - No rendering or platform dependencies

pub mod bricks;
pub mod collision;
pub mod particles;
pub mod rect;
pub mod screen;
pub mod state;
pub mod tick;

pub use bricks::{Brick, BrickField};
pub use collision::paddle_bounce;
pub use particles::{Emitter, EmitterPool, Particle, ParticleSystem};
pub use rect::Rect;
pub use screen::{Screen, ScreenEvent};
pub use state::{Ball, GameEvent, GameSession, Paddle};
pub use tick::{TickInput, tick};
