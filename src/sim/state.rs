//! Game state and core simulation types
//!
//! All state for a single run lives in [`GameSession`]; there are no globals.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::bricks::BrickField;
use super::particles::EmitterPool;
use super::rect::Rect;
use super::screen::Screen;
use crate::consts::*;
use crate::scoreboard::ScoreBoard;
use crate::settings::Settings;
use crate::ui::ButtonRow;

/// Things that happened during a tick, for the frontend to react to
/// (sound cues, screen flashes). Drained each frame via
/// [`GameSession::take_events`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// Menu selection moved
    MenuMove,
    /// Menu input rejected (already at the end of a cycle)
    MenuDenied,
    /// A menu option was confirmed
    Confirm,
    /// Ball left the paddle
    Launch,
    Pause,
    Resume,
    /// Ball bounced off a side wall
    WallBounce,
    PaddleBounce,
    /// Ball hit a brick
    BrickImpact,
    BallLost,
    LevelCleared,
    GameOver,
}

/// The ball entity
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
}

impl Ball {
    pub fn new() -> Self {
        Self {
            pos: Vec2::new(SCREEN_WIDTH / 2.0, SCREEN_HEIGHT - 150.0),
            vel: Vec2::ZERO,
            radius: BALL_RADIUS,
        }
    }

    /// A resting ball rides the paddle until launched
    pub fn is_resting(&self) -> bool {
        self.vel == Vec2::ZERO
    }

    /// Launch diagonally down-right at fixed speed
    pub fn launch(&mut self) {
        self.vel = Vec2::splat(BALL_SPEED);
    }

    /// Put the ball back at rest at the given position
    pub fn reset(&mut self, pos: Vec2) {
        self.pos = pos;
        self.vel = Vec2::ZERO;
    }

    /// Advance by one timestep, bouncing off the ceiling and side walls.
    /// Returns true when a side wall was hit.
    pub fn integrate(&mut self, dt: f32) -> bool {
        let mut hit_wall = false;
        self.pos += self.vel * dt;

        if self.pos.y <= self.radius {
            self.pos.y = self.radius;
            self.vel.y = -self.vel.y;
        }

        if self.pos.x <= self.radius {
            self.pos.x = self.radius;
            self.vel.x = -self.vel.x;
            hit_wall = true;
        } else if self.pos.x >= SCREEN_WIDTH - self.radius {
            self.pos.x = SCREEN_WIDTH - self.radius;
            self.vel.x = -self.vel.x;
            hit_wall = true;
        }

        hit_wall
    }

    /// True once the ball has fallen past the bottom edge
    pub fn below_floor(&self) -> bool {
        self.pos.y >= SCREEN_HEIGHT + SPRITE_SIZE
    }
}

impl Default for Ball {
    fn default() -> Self {
        Self::new()
    }
}

/// The player's paddle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Paddle {
    /// Center position
    pub pos: Vec2,
    pub speed: f32,
    pub width: f32,
    pub height: f32,
    /// Selected skin index (cosmetic, persisted in settings)
    pub skin: usize,
}

impl Paddle {
    pub fn new() -> Self {
        Self {
            pos: Vec2::new(SCREEN_WIDTH / 2.0, SCREEN_HEIGHT - 80.0),
            speed: PADDLE_SPEED,
            width: PADDLE_WIDTH,
            height: PADDLE_HEIGHT,
            skin: 0,
        }
    }

    pub fn collision_rect(&self) -> Rect {
        Rect::from_center(self.pos, self.width, self.height)
    }

    /// Move horizontally by `dir` (-1, 0 or 1), clamped to the playfield
    pub fn steer(&mut self, dir: f32, dt: f32) {
        self.pos.x += dir * self.speed * dt;
        let half = self.width / 2.0;
        self.pos.x = self.pos.x.clamp(half, SCREEN_WIDTH - half);
    }

    /// Where a resting ball sits, centered above the paddle
    pub fn rest_point(&self, ball_radius: f32) -> Vec2 {
        Vec2::new(self.pos.x, self.pos.y - self.height - ball_radius)
    }
}

impl Default for Paddle {
    fn default() -> Self {
        Self::new()
    }
}

/// Complete state for one game session (deterministic)
#[derive(Debug, Clone)]
pub struct GameSession {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Seeded RNG; every random draw goes through here
    pub rng: Pcg32,
    pub screen: Screen,
    pub ball: Ball,
    pub paddle: Paddle,
    pub bricks: BrickField,
    pub emitters: EmitterPool,
    pub buttons: ButtonRow,
    pub settings: Settings,
    pub scoreboard: ScoreBoard,
    pub lives: u8,
    pub score: u32,
    pub level: u32,
    events: Vec<GameEvent>,
}

impl GameSession {
    /// Create a new session with the given seed, starting at the menu
    pub fn new(seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let bricks = BrickField::generate(1, &mut rng);

        Self {
            seed,
            rng,
            screen: Screen::Menu,
            ball: Ball::new(),
            paddle: Paddle::new(),
            bricks,
            emitters: EmitterPool::default(),
            buttons: ButtonRow::new(Screen::Menu.button_labels().unwrap_or_default()),
            settings: Settings::default(),
            scoreboard: ScoreBoard::default(),
            lives: STARTING_LIVES,
            score: 0,
            level: 1,
            events: Vec::new(),
        }
    }

    pub(crate) fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Events recorded since the last drain
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Drain the event queue (call once per frame from the frontend)
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Regenerate the brick field for the current level and rest the ball
    pub fn start_level(&mut self) {
        self.bricks = BrickField::generate(self.level, &mut self.rng);
        self.ball.reset(self.paddle.rest_point(self.ball.radius));
    }

    /// Begin a fresh run: full lives, zero score, level one
    pub fn start_run(&mut self) {
        self.lives = STARTING_LIVES;
        self.score = 0;
        self.level = 1;
        self.start_level();
    }
}
