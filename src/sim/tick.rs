//! Fixed timestep simulation tick
//!
//! Core game loop that advances a session deterministically. Input is a
//! plain struct of sampled button states; the frontend decides how keys
//! map onto it.

use super::bricks::BrickField;
use super::collision::paddle_bounce;
use super::screen::{Screen, ScreenEvent};
use super::state::{GameEvent, GameSession};
use crate::consts::*;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Steer the paddle left (held)
    pub move_left: bool,
    /// Steer the paddle right (held)
    pub move_right: bool,
    /// Move the menu highlight up (pressed)
    pub menu_up: bool,
    /// Move the menu highlight down (pressed)
    pub menu_down: bool,
    /// Previous paddle skin (pressed)
    pub cycle_left: bool,
    /// Next paddle skin (pressed)
    pub cycle_right: bool,
    /// Confirm the highlighted option (pressed)
    pub confirm: bool,
    /// Launch the ball, or pause/resume mid-flight (pressed)
    pub launch: bool,
    /// Regenerate the brick field at the current level (debug)
    pub regen: bool,
}

/// Advance the session by one fixed timestep
pub fn tick(session: &mut GameSession, input: &TickInput, dt: f32) {
    if input.regen {
        session.bricks = BrickField::generate(session.level, &mut session.rng);
    }

    match session.screen {
        Screen::Menu | Screen::GameOver | Screen::Victory => menu_tick(session, input),
        Screen::Setting => setting_tick(session, input),
        Screen::Play => play_tick(session, input, dt),
        Screen::Paused => {
            if input.launch {
                session.push_event(GameEvent::Resume);
                let next = session.screen.transition(ScreenEvent::PauseToggle);
                goto(session, next);
            }
        }
        Screen::Scoreboard => {
            if input.confirm {
                session.push_event(GameEvent::Confirm);
                let next = session.screen.transition(ScreenEvent::Confirm {
                    first_option: session.buttons.first_selected(),
                });
                goto(session, next);
            }
        }
    }
}

/// Shared handling for the two-button screens (menu, game over, victory)
fn menu_tick(session: &mut GameSession, input: &TickInput) {
    if session.buttons.toggle(input.menu_up, input.menu_down) {
        session.push_event(GameEvent::MenuMove);
    }
    if !input.confirm {
        return;
    }

    session.push_event(GameEvent::Confirm);
    let current = session.screen;
    let next = current.transition(ScreenEvent::Confirm {
        first_option: session.buttons.first_selected(),
    });

    match (current, next) {
        // Play Again wipes the previous run
        (Screen::GameOver, Screen::Play) => session.start_run(),
        // Next Level keeps lives and score
        (Screen::Victory, Screen::Play) => session.start_level(),
        _ => {}
    }

    goto(session, next);
}

/// Paddle-skin picker
fn setting_tick(session: &mut GameSession, input: &TickInput) {
    if input.cycle_right {
        if session.settings.cycle_right() {
            session.push_event(GameEvent::MenuMove);
        } else {
            session.push_event(GameEvent::MenuDenied);
        }
    }
    if input.cycle_left {
        if session.settings.cycle_left() {
            session.push_event(GameEvent::MenuMove);
        } else {
            session.push_event(GameEvent::MenuDenied);
        }
    }

    if input.confirm {
        session.push_event(GameEvent::Confirm);
        session.paddle.skin = session.settings.paddle_skin;
        session.start_run();
        let next = session.screen.transition(ScreenEvent::Confirm {
            first_option: session.buttons.first_selected(),
        });
        goto(session, next);
    }
}

/// One frame of active gameplay
fn play_tick(session: &mut GameSession, input: &TickInput, dt: f32) {
    if input.launch {
        if session.ball.is_resting() {
            session.push_event(GameEvent::Launch);
            session.ball.launch();
        } else {
            session.push_event(GameEvent::Pause);
            let next = session.screen.transition(ScreenEvent::PauseToggle);
            goto(session, next);
            return;
        }
    }

    // A resting ball rides the paddle's previous position; the follow
    // happens before steering, one frame behind
    if session.ball.is_resting() {
        let rest = session.paddle.rest_point(session.ball.radius);
        session.ball.reset(rest);
    }

    let dir = if input.move_right {
        1.0
    } else if input.move_left {
        -1.0
    } else {
        0.0
    };
    if dir != 0.0 {
        session.paddle.steer(dir, dt);
    }

    if paddle_bounce(&mut session.ball, &session.paddle) {
        session.push_event(GameEvent::PaddleBounce);
    }

    if session.bricks.resolve_collision(
        &mut session.ball,
        &mut session.score,
        &mut session.emitters,
        &mut session.rng,
    ) {
        session.push_event(GameEvent::BrickImpact);
    }

    if session.ball.integrate(dt) {
        session.push_event(GameEvent::WallBounce);
    }

    session.emitters.update(&mut session.rng);

    if session.ball.below_floor() {
        session.push_event(GameEvent::BallLost);
        session.lives = session.lives.saturating_sub(1);
        log::info!("ball lost, {} lives left", session.lives);
        if session.lives == 0 {
            session.push_event(GameEvent::GameOver);
            let next = session.screen.transition(ScreenEvent::BallExhausted);
            goto(session, next);
            return;
        }
        let rest = session.paddle.rest_point(session.ball.radius);
        session.ball.reset(rest);
    }

    if session.bricks.all_broken() {
        session.level += 1;
        session.score += session.level * LEVEL_BONUS;
        session.scoreboard.append(session.score);
        log::info!(
            "level cleared, score {} entering level {}",
            session.score,
            session.level
        );
        session.push_event(GameEvent::LevelCleared);
        let next = session.screen.transition(ScreenEvent::FieldCleared);
        goto(session, next);
    }
}

/// Apply a screen change, refreshing button captions where the target
/// screen has them
fn goto(session: &mut GameSession, next: Screen) {
    if next == session.screen {
        return;
    }
    log::info!("screen {:?} -> {:?}", session.screen, next);
    if let Some(labels) = next.button_labels() {
        session.buttons.set_labels(labels);
    }
    session.screen = next;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::FRAME_DT;

    fn confirm() -> TickInput {
        TickInput {
            confirm: true,
            ..Default::default()
        }
    }

    fn launch() -> TickInput {
        TickInput {
            launch: true,
            ..Default::default()
        }
    }

    /// Drive a fresh session from the menu into Play via the skin picker
    fn session_in_play(seed: u64) -> GameSession {
        let mut session = GameSession::new(seed);
        tick(&mut session, &confirm(), FRAME_DT);
        assert_eq!(session.screen, Screen::Setting);
        tick(&mut session, &confirm(), FRAME_DT);
        assert_eq!(session.screen, Screen::Play);
        session.take_events();
        session
    }

    #[test]
    fn test_menu_to_scoreboard_and_back() {
        let mut session = GameSession::new(1);
        let input = TickInput {
            menu_down: true,
            ..Default::default()
        };
        tick(&mut session, &input, FRAME_DT);
        assert!(!session.buttons.first_selected());
        assert!(session.events().contains(&GameEvent::MenuMove));

        tick(&mut session, &confirm(), FRAME_DT);
        assert_eq!(session.screen, Screen::Scoreboard);

        tick(&mut session, &confirm(), FRAME_DT);
        assert_eq!(session.screen, Screen::Menu);
    }

    #[test]
    fn test_setting_confirm_applies_skin_and_starts_fresh_run() {
        let mut session = GameSession::new(2);
        tick(&mut session, &confirm(), FRAME_DT);
        assert_eq!(session.screen, Screen::Setting);

        let cycle = TickInput {
            cycle_right: true,
            ..Default::default()
        };
        tick(&mut session, &cycle, FRAME_DT);
        assert_eq!(session.settings.paddle_skin, 1);

        session.lives = 0;
        session.score = 999;
        tick(&mut session, &confirm(), FRAME_DT);
        assert_eq!(session.screen, Screen::Play);
        assert_eq!(session.paddle.skin, 1);
        assert_eq!(session.lives, STARTING_LIVES);
        assert_eq!(session.score, 0);
        assert_eq!(session.level, 1);
    }

    #[test]
    fn test_skin_cycle_denied_at_bounds() {
        let mut session = GameSession::new(2);
        tick(&mut session, &confirm(), FRAME_DT);
        session.take_events();

        let left = TickInput {
            cycle_left: true,
            ..Default::default()
        };
        tick(&mut session, &left, FRAME_DT);
        assert_eq!(session.take_events(), vec![GameEvent::MenuDenied]);
        assert_eq!(session.settings.paddle_skin, 0);
    }

    #[test]
    fn test_launch_pause_resume() {
        let mut session = session_in_play(3);
        assert!(session.ball.is_resting());

        tick(&mut session, &launch(), FRAME_DT);
        assert!(!session.ball.is_resting());
        assert!(session.take_events().contains(&GameEvent::Launch));

        tick(&mut session, &launch(), FRAME_DT);
        assert_eq!(session.screen, Screen::Paused);
        assert!(session.take_events().contains(&GameEvent::Pause));

        // Input other than launch leaves the pause in place
        tick(&mut session, &confirm(), FRAME_DT);
        assert_eq!(session.screen, Screen::Paused);

        tick(&mut session, &launch(), FRAME_DT);
        assert_eq!(session.screen, Screen::Play);
        assert!(session.take_events().contains(&GameEvent::Resume));
    }

    #[test]
    fn test_resting_ball_rides_paddle() {
        let mut session = session_in_play(4);
        let steer = TickInput {
            move_right: true,
            ..Default::default()
        };
        tick(&mut session, &steer, FRAME_DT);
        tick(&mut session, &TickInput::default(), FRAME_DT);
        let rest = session.paddle.rest_point(session.ball.radius);
        assert_eq!(session.ball.pos, rest);
    }

    #[test]
    fn test_ball_loss_consumes_life_then_ends_run() {
        let mut session = session_in_play(5);
        tick(&mut session, &launch(), FRAME_DT);
        session.take_events();

        session.ball.pos.y = SCREEN_HEIGHT + SPRITE_SIZE + 10.0;
        tick(&mut session, &TickInput::default(), FRAME_DT);
        assert_eq!(session.lives, STARTING_LIVES - 1);
        assert!(session.ball.is_resting());
        assert!(session.take_events().contains(&GameEvent::BallLost));
        assert_eq!(session.screen, Screen::Play);

        session.lives = 1;
        session.ball.launch();
        session.ball.pos.y = SCREEN_HEIGHT + SPRITE_SIZE + 10.0;
        tick(&mut session, &TickInput::default(), FRAME_DT);
        assert_eq!(session.lives, 0);
        assert_eq!(session.screen, Screen::GameOver);
        let events = session.take_events();
        assert!(events.contains(&GameEvent::BallLost));
        assert!(events.contains(&GameEvent::GameOver));
    }

    #[test]
    fn test_field_cleared_advances_level_with_bonus() {
        let mut session = session_in_play(6);
        tick(&mut session, &launch(), FRAME_DT);
        session.take_events();
        session.score = 10;

        for brick in session.bricks.bricks.iter_mut().flatten() {
            brick.broken = true;
        }
        tick(&mut session, &TickInput::default(), FRAME_DT);

        assert_eq!(session.screen, Screen::Victory);
        assert_eq!(session.level, 2);
        // Bonus uses the level being entered
        assert_eq!(session.score, 10 + 2 * LEVEL_BONUS);
        assert_eq!(session.scoreboard.top(), Some(session.score));
        assert!(session.take_events().contains(&GameEvent::LevelCleared));
    }

    #[test]
    fn test_victory_next_level_keeps_score() {
        let mut session = session_in_play(7);
        tick(&mut session, &launch(), FRAME_DT);
        for brick in session.bricks.bricks.iter_mut().flatten() {
            brick.broken = true;
        }
        tick(&mut session, &TickInput::default(), FRAME_DT);
        assert_eq!(session.screen, Screen::Victory);
        let score = session.score;
        let lives = session.lives;

        tick(&mut session, &confirm(), FRAME_DT);
        assert_eq!(session.screen, Screen::Play);
        assert_eq!(session.score, score);
        assert_eq!(session.lives, lives);
        assert_eq!(session.level, 2);
        assert!(session.bricks.standing() > 0);
        assert!(session.ball.is_resting());
    }

    #[test]
    fn test_game_over_play_again_resets_run() {
        let mut session = session_in_play(8);
        session.score = 500;
        session.level = 3;
        session.lives = 1;
        session.ball.launch();
        session.ball.pos.y = SCREEN_HEIGHT + SPRITE_SIZE + 10.0;
        tick(&mut session, &TickInput::default(), FRAME_DT);
        assert_eq!(session.screen, Screen::GameOver);

        tick(&mut session, &confirm(), FRAME_DT);
        assert_eq!(session.screen, Screen::Play);
        assert_eq!(session.score, 0);
        assert_eq!(session.lives, STARTING_LIVES);
        assert_eq!(session.level, 1);
    }

    #[test]
    fn test_button_captions_follow_screen() {
        let mut session = session_in_play(9);
        session.lives = 1;
        session.ball.launch();
        session.ball.pos.y = SCREEN_HEIGHT + SPRITE_SIZE + 10.0;
        tick(&mut session, &TickInput::default(), FRAME_DT);
        assert_eq!(session.screen, Screen::GameOver);
        assert_eq!(session.buttons.labels(), ["Play Again", "Main Menu"]);
    }

    #[test]
    fn test_regen_rebuilds_field_at_current_level() {
        let mut session = session_in_play(10);
        for brick in session.bricks.bricks.iter_mut().flatten() {
            brick.broken = true;
        }
        let input = TickInput {
            regen: true,
            ..Default::default()
        };
        tick(&mut session, &input, FRAME_DT);
        assert!(session.bricks.standing() > 0);
        assert_eq!(session.level, 1);
    }

    #[test]
    fn test_determinism() {
        // Two sessions with the same seed and inputs stay identical
        let mut a = session_in_play(99_999);
        let mut b = session_in_play(99_999);
        tick(&mut a, &launch(), FRAME_DT);
        tick(&mut b, &launch(), FRAME_DT);

        let scripted = [
            TickInput {
                move_right: true,
                ..Default::default()
            },
            TickInput::default(),
            TickInput {
                move_left: true,
                ..Default::default()
            },
            TickInput::default(),
        ];

        for frame in 0..600 {
            let input = scripted[frame % scripted.len()];
            tick(&mut a, &input, FRAME_DT);
            tick(&mut b, &input, FRAME_DT);
        }

        assert_eq!(a.ball, b.ball);
        assert_eq!(a.paddle, b.paddle);
        assert_eq!(a.score, b.score);
        assert_eq!(a.lives, b.lives);
        assert_eq!(a.level, b.level);
        assert_eq!(a.bricks, b.bricks);
        assert_eq!(a.take_events(), b.take_events());
    }
}
