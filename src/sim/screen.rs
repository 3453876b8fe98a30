//! Screen state machine
//!
//! Every screen change goes through [`Screen::transition`], a pure
//! function over the current screen and a high-level event. Side effects
//! of a change (resetting a run, regenerating bricks) are applied by the
//! tick layer after the transition is decided.

/// Top-level screens
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Menu,
    /// Paddle-skin picker, entered from the menu
    Setting,
    Play,
    Paused,
    GameOver,
    Victory,
    Scoreboard,
}

/// High-level events that can change the current screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenEvent {
    /// The active menu option was confirmed; `first_option` tells which
    /// of the two buttons was highlighted
    Confirm { first_option: bool },
    PauseToggle,
    /// The last life was lost
    BallExhausted,
    /// Every brick is broken
    FieldCleared,
}

impl Screen {
    /// Button captions for screens that show a two-option menu
    pub fn button_labels(self) -> Option<[&'static str; 2]> {
        match self {
            Screen::Menu => Some(["Start", "Leaderboard"]),
            Screen::GameOver => Some(["Play Again", "Main Menu"]),
            Screen::Victory => Some(["Next Level", "Leaderboards"]),
            _ => None,
        }
    }

    /// Decide the next screen. Events that make no sense on the current
    /// screen leave it unchanged.
    pub fn transition(self, event: ScreenEvent) -> Screen {
        use Screen::*;
        use ScreenEvent::*;

        match (self, event) {
            (Menu, Confirm { first_option: true }) => Setting,
            (Menu, Confirm { first_option: false }) => Scoreboard,
            (Setting, Confirm { .. }) => Play,
            (Play, PauseToggle) => Paused,
            (Paused, PauseToggle) => Play,
            (Play, BallExhausted) => GameOver,
            (Play, FieldCleared) => Victory,
            (GameOver, Confirm { first_option: true }) => Play,
            (GameOver, Confirm { first_option: false }) => Menu,
            (Victory, Confirm { first_option: true }) => Play,
            (Victory, Confirm { first_option: false }) => Scoreboard,
            (Scoreboard, Confirm { .. }) => Menu,
            (current, _) => current,
        }
    }
}
