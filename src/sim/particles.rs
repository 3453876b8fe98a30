//! Brick-burst particle effects
//!
//! A fixed pool of emitters, each owning a fixed arena of particles. No
//! allocation happens after startup; exhausted pools overwrite the oldest
//! slot. Particle motion is visual-only and never feeds back into gameplay.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::rect::Rect;
use crate::consts::*;

/// A single burst particle
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Particle {
    pub pos: Vec2,
    /// Render opacity, 1.0 at ignition fading to 0
    pub alpha: f32,
    pub radius: f32,
    pub active: bool,
}

/// A fixed arena of particles scattered over a brick's footprint
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleSystem {
    pub particles: [Particle; MAX_PARTICLES],
    /// Spawn region (the hit brick's rect)
    pub area: Rect,
    /// Palette index for the burst color (renderer maps it)
    pub palette: usize,
    pub radius: f32,
    pub gravity: f32,
    pub fade: f32,
}

impl Default for ParticleSystem {
    fn default() -> Self {
        Self {
            particles: [Particle::default(); MAX_PARTICLES],
            area: Rect::default(),
            palette: 0,
            radius: EMITTER_PARTICLE_SIZE,
            gravity: EMITTER_GRAVITY,
            fade: EMITTER_FADE,
        }
    }
}

impl ParticleSystem {
    /// Scatter every particle over `area` at full opacity
    pub fn ignite(&mut self, area: Rect, palette: usize, rng: &mut Pcg32) {
        self.area = area;
        self.palette = palette;
        for p in &mut self.particles {
            // Integer sampling keeps particles on whole pixels
            let x = rng.random_range(area.x as i32..=(area.x + area.w) as i32);
            let y = rng.random_range(area.y as i32..=(area.y + area.h) as i32);
            p.pos = Vec2::new(x as f32, y as f32);
            p.alpha = 1.0;
            p.radius = self.radius;
            p.active = true;
        }
    }

    /// Advance every live particle one tick. Returns true while any
    /// particle was still live at entry.
    pub fn update(&mut self, rng: &mut Pcg32) -> bool {
        let mut any_active = false;
        for p in &mut self.particles {
            if !p.active {
                continue;
            }
            any_active = true;
            p.pos.x += rng.random_range(-3i32..=3) as f32;
            p.pos.y += self.gravity;
            p.alpha -= self.fade;
            if p.alpha <= 0.0 {
                p.active = false;
            }
        }
        any_active
    }
}

/// One pooled burst effect
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Emitter {
    pub system: ParticleSystem,
    pub active: bool,
}

/// Fixed pool of burst emitters
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EmitterPool {
    pub emitters: [Emitter; MAX_EMITTERS],
}

impl EmitterPool {
    /// Pick the slot the next burst will use: the highest-indexed free
    /// slot, or slot 0 when the pool is exhausted (overwriting whatever
    /// burst is running there).
    pub fn acquire(&self) -> usize {
        for i in (1..self.emitters.len()).rev() {
            if !self.emitters[i].active {
                return i;
            }
        }
        0
    }

    /// Start a burst over `area`, returning the slot used
    pub fn ignite(&mut self, area: Rect, palette: usize, rng: &mut Pcg32) -> usize {
        let slot = self.acquire();
        let emitter = &mut self.emitters[slot];
        emitter.active = true;
        emitter.system.ignite(area, palette, rng);
        slot
    }

    /// Advance all running bursts, retiring the ones that have faded out
    pub fn update(&mut self, rng: &mut Pcg32) {
        for emitter in &mut self.emitters {
            if emitter.active {
                emitter.active = emitter.system.update(rng);
            }
        }
    }

    pub fn any_active(&self) -> bool {
        self.emitters.iter().any(|e| e.active)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn rng() -> Pcg32 {
        Pcg32::seed_from_u64(7)
    }

    #[test]
    fn test_ignite_fills_arena() {
        let mut rng = rng();
        let mut system = ParticleSystem::default();
        let area = Rect::new(100.0, 50.0, 64.0, 32.0);

        system.ignite(area, 2, &mut rng);

        assert_eq!(system.palette, 2);
        for p in &system.particles {
            assert!(p.active);
            assert_eq!(p.alpha, 1.0);
            assert!(p.pos.x >= area.left() && p.pos.x <= area.right());
            assert!(p.pos.y >= area.top() && p.pos.y <= area.bottom());
        }
    }

    #[test]
    fn test_system_fades_out_after_twenty_updates() {
        let mut rng = rng();
        let mut system = ParticleSystem::default();
        system.ignite(Rect::new(0.0, 0.0, 64.0, 32.0), 0, &mut rng);

        // Alpha 1.0 minus 0.05 per tick reaches zero on the 20th update
        for i in 0..20 {
            assert!(system.update(&mut rng), "faded early at update {}", i + 1);
        }
        assert!(!system.update(&mut rng));
        assert!(system.particles.iter().all(|p| !p.active));
    }

    #[test]
    fn test_acquire_prefers_highest_free_slot() {
        let pool = EmitterPool::default();
        assert_eq!(pool.acquire(), MAX_EMITTERS - 1);
    }

    #[test]
    fn test_acquire_falls_back_to_slot_zero() {
        let mut pool = EmitterPool::default();
        for e in &mut pool.emitters {
            e.active = true;
        }
        assert_eq!(pool.acquire(), 0);
    }

    #[test]
    fn test_ignite_fills_slots_downward_then_overwrites_zero() {
        let mut rng = rng();
        let mut pool = EmitterPool::default();
        let area = Rect::new(0.0, 0.0, 64.0, 32.0);

        assert_eq!(pool.ignite(area, 0, &mut rng), 2);
        assert_eq!(pool.ignite(area, 0, &mut rng), 1);
        assert_eq!(pool.ignite(area, 0, &mut rng), 0);
        // Pool exhausted: the running burst in slot 0 is replaced
        assert_eq!(pool.ignite(area, 0, &mut rng), 0);
        assert!(pool.emitters.iter().all(|e| e.active));
    }

    #[test]
    fn test_pool_slot_frees_after_burst_expires() {
        let mut rng = rng();
        let mut pool = EmitterPool::default();
        let slot = pool.ignite(Rect::new(0.0, 0.0, 64.0, 32.0), 0, &mut rng);
        assert!(pool.emitters[slot].active);

        // The emitter outlives the last particle by one update
        for _ in 0..20 {
            pool.update(&mut rng);
        }
        assert!(pool.emitters[slot].active);
        pool.update(&mut rng);
        assert!(!pool.emitters[slot].active);
        assert!(!pool.any_active());
        assert_eq!(pool.acquire(), MAX_EMITTERS - 1);
    }
}
