//! Headless demo driver
//!
//! Plays an unattended session against the simulation for up to two
//! minutes of game time, logging the event stream, then persists the
//! score board. Useful for soak-testing the sim without a frontend.

use std::path::Path;

use wall_break::consts::FRAME_DT;
use wall_break::sim::{GameSession, Screen, TickInput, tick};
use wall_break::{ScoreBoard, Settings};

const SCORE_PATH: &str = "score_board.txt";
const SETTINGS_PATH: &str = "settings.json";
const DEMO_FRAMES: u32 = 60 * 120;

fn main() {
    env_logger::init();

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(0xC0FFEE);

    let mut session = GameSession::new(seed);
    session.scoreboard = ScoreBoard::load(Path::new(SCORE_PATH));
    session.settings = Settings::load(Path::new(SETTINGS_PATH));
    session.paddle.skin = session.settings.paddle_skin;
    log::info!("starting demo session with seed {seed:#x}");

    for frame in 0..DEMO_FRAMES {
        let input = autopilot(&session, frame);
        tick(&mut session, &input, FRAME_DT);
        for event in session.take_events() {
            log::debug!("frame {frame}: {event:?}");
        }
        if session.screen == Screen::GameOver {
            break;
        }
    }

    println!(
        "final: score {} level {} lives {} on {:?}",
        session.score, session.level, session.lives, session.screen
    );

    if let Err(err) = session.scoreboard.save(Path::new(SCORE_PATH)) {
        log::warn!("could not save scores: {err}");
    }
    if let Err(err) = session.settings.save(Path::new(SETTINGS_PATH)) {
        log::warn!("could not save settings: {err}");
    }
}

/// Synthesize inputs so the game plays itself: confirm through menus,
/// launch when resting, chase the ball's projected position otherwise
fn autopilot(session: &GameSession, frame: u32) -> TickInput {
    let mut input = TickInput::default();
    match session.screen {
        Screen::Play => {
            if session.ball.is_resting() {
                input.launch = frame % 60 == 0;
            } else {
                let target = session.ball.pos.x + session.ball.vel.x * 0.1;
                let delta = target - session.paddle.pos.x;
                if delta > 4.0 {
                    input.move_right = true;
                } else if delta < -4.0 {
                    input.move_left = true;
                }
            }
        }
        Screen::Paused => input.launch = true,
        _ => input.confirm = frame % 60 == 0,
    }
    input
}
