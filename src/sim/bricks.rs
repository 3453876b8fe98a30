//! Brick grid generation and ball/brick collision
//!
//! The grid is a fixed 4x11 array; absent bricks are marked broken rather
//! than removed, so iteration order is always row-major and deterministic.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::particles::EmitterPool;
use super::rect::Rect;
use super::state::Ball;
use crate::consts::*;

/// One cell of the brick grid
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Brick {
    /// Center position
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    pub rect: Rect,
    /// Armor tier; 0 is a plain brick, higher tiers absorb hits by
    /// downgrading one tier at a time
    pub tier: u32,
    /// Remaining hits once at tier 0
    pub health: i32,
    pub broken: bool,
}

/// The full brick grid for one level
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BrickField {
    pub bricks: [[Brick; MAX_COLS]; MAX_ROWS],
}

impl BrickField {
    /// Generate the grid for `level`. Row count grows with the level and
    /// saturates at the grid height; each row draws its own column count,
    /// skip pattern and tier pair from the RNG.
    pub fn generate(level: u32, rng: &mut Pcg32) -> Self {
        let mut field = Self {
            bricks: [[Brick::default(); MAX_COLS]; MAX_ROWS],
        };

        let max_rows = MAX_ROWS as u32;
        let mut total_rows = level % max_rows;
        if level >= max_rows {
            total_rows = max_rows;
        }
        let max_tier = level.saturating_sub(1).min(BRICK_TIERS - 1);

        for i in 0..MAX_ROWS {
            // Odd column counts keep the row symmetric around the center
            let mut total_cols = rng.random_range(MAX_COLS as u32 - 4..=MAX_COLS as u32);
            if total_cols % 2 == 0 {
                total_cols += 1;
            }
            let margin = (SCREEN_WIDTH - BRICK_WIDTH * total_cols as f32) / 2.0;
            let skipped = rng.random_range(0..=1u32) > 0;
            let alternate = rng.random_range(0..=1u32) > 0;
            let tiers = [
                rng.random_range(0..=max_tier),
                rng.random_range(0..=max_tier),
            ];
            let mut tier_index = 0;

            for j in 0..MAX_COLS {
                let brick = &mut field.bricks[i][j];
                brick.width = BRICK_WIDTH;
                brick.height = BRICK_HEIGHT;
                brick.pos = Vec2::new(
                    BRICK_WIDTH * j as f32 + BRICK_WIDTH / 2.0 + margin,
                    BRICK_HEIGHT * i as f32 + BRICK_HEIGHT / 2.0 + BRICK_HEIGHT,
                );
                brick.rect = Rect::from_center(brick.pos, BRICK_WIDTH, BRICK_HEIGHT);
                if alternate {
                    tier_index = (tier_index + 1) % 2;
                }
                brick.tier = tiers[tier_index];
                brick.health = BRICK_HEALTH;
                brick.broken =
                    (skipped && j % 2 == 1) || j as u32 >= total_cols || i as u32 >= total_rows;
            }
        }

        log::info!(
            "generated level {level} field, {} bricks standing",
            field.standing()
        );
        field
    }

    /// Number of bricks still standing
    pub fn standing(&self) -> usize {
        self.bricks
            .iter()
            .flatten()
            .filter(|b| !b.broken)
            .count()
    }

    pub fn all_broken(&self) -> bool {
        self.standing() == 0
    }

    /// Resolve at most one ball/brick collision this tick: reflect and
    /// nudge the ball, apply tier/health damage, ignite a burst over the
    /// brick. Returns true when a brick was hit.
    pub fn resolve_collision(
        &mut self,
        ball: &mut Ball,
        score: &mut u32,
        emitters: &mut EmitterPool,
        rng: &mut Pcg32,
    ) -> bool {
        for row in &mut self.bricks {
            for brick in row {
                if brick.broken {
                    continue;
                }
                if !brick.rect.overlaps_circle(ball.pos, 2.0 * ball.radius) {
                    continue;
                }

                let side_hit =
                    ball.pos.x < brick.rect.left() || ball.pos.x > brick.rect.right();
                if side_hit {
                    ball.vel.x = -ball.vel.x;
                    if ball.pos.x < brick.pos.x {
                        ball.pos.x -= ball.radius;
                    } else {
                        ball.pos.x += ball.radius;
                    }
                } else {
                    ball.vel.y = -ball.vel.y;
                    if ball.pos.y < brick.pos.y {
                        ball.pos.y -= ball.radius;
                    } else {
                        ball.pos.y += ball.radius;
                    }
                }

                let palette = if brick.tier == 0 {
                    brick.health -= 1;
                    *score += 1;
                    if brick.health <= 0 {
                        brick.broken = true;
                        // The breaking hit scores twice
                        *score += 1;
                    }
                    0
                } else {
                    *score += brick.tier;
                    let index = brick.tier as usize;
                    brick.tier -= 1;
                    index
                };

                emitters.ignite(brick.rect, palette, rng);
                return true;
            }
        }
        false
    }
}
