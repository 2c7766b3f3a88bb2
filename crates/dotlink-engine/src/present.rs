use crate::error::{GameError, Result};
use crate::input::queue::UiAction;
use crate::level::config::LevelConfig;
use crate::level::controller::Outcome;
use crate::level::score::ScoreBand;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModalButton {
    pub label: String,
    /// Fed back as `InputEvent::Action` when clicked.
    pub action: UiAction,
}

/// A dialog shown when an attempt ends or every level is done.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Modal {
    pub title: String,
    pub message: String,
    pub button: ModalButton,
}

impl Modal {
    fn new(title: &str, message: &str, label: &str, action: UiAction) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            button: ModalButton {
                label: label.into(),
                action,
            },
        }
    }

    pub fn won(score: ScoreBand) -> Self {
        Self::new("Level Completed!", score.message(), "Next Level", UiAction::NextLevel)
    }

    pub fn lost() -> Self {
        Self::new("Level Failed", "Try again. You can do it!", "Replay", UiAction::Retry)
    }

    pub fn all_complete() -> Self {
        Self::new(
            "Congratulations!",
            "You've completed all levels!",
            "Play Again",
            UiAction::PlayAgain,
        )
    }

    pub fn for_outcome(outcome: &Outcome) -> Self {
        match outcome.score {
            Some(score) if outcome.won => Self::won(score),
            _ => Self::lost(),
        }
    }
}

/// Text displays and dialogs the game reports to.
pub trait Presenter {
    /// Look up every display this presenter writes to. A missing one is fatal
    /// to the level start.
    fn bind(&mut self) -> Result<()>;
    /// Level number, target count and initial time.
    fn show_level(&mut self, config: &LevelConfig);
    fn show_remaining_time(&mut self, seconds: u32);
    fn show_dots_remaining(&mut self, count: u32);
    /// Turn the low-time cue on or off.
    fn set_low_time(&mut self, on: bool);
    fn show_modal(&mut self, modal: &Modal);
    fn hide_modal(&mut self);
}

/// Presenter that only remembers what it was told. Backs headless runs and
/// tests.
#[derive(Debug, Clone, Default)]
pub struct HeadlessPresenter {
    pub level: Option<LevelConfig>,
    pub remaining_time: Option<u32>,
    pub dots_remaining: Option<u32>,
    pub low_time: bool,
    pub modal: Option<Modal>,
    /// Display name to report as missing from `bind`.
    pub missing: Option<&'static str>,
}

impl HeadlessPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn missing(name: &'static str) -> Self {
        Self {
            missing: Some(name),
            ..Self::default()
        }
    }
}

impl Presenter for HeadlessPresenter {
    fn bind(&mut self) -> Result<()> {
        match self.missing {
            Some(name) => Err(GameError::MissingDisplay(name)),
            None => Ok(()),
        }
    }

    fn show_level(&mut self, config: &LevelConfig) {
        self.level = Some(*config);
    }

    fn show_remaining_time(&mut self, seconds: u32) {
        self.remaining_time = Some(seconds);
    }

    fn show_dots_remaining(&mut self, count: u32) {
        self.dots_remaining = Some(count);
    }

    fn set_low_time(&mut self, on: bool) {
        self.low_time = on;
    }

    fn show_modal(&mut self, modal: &Modal) {
        self.modal = Some(modal.clone());
    }

    fn hide_modal(&mut self) {
        self.modal = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcome_modals() {
        let won = Outcome {
            level: 1,
            won: true,
            elapsed: 20,
            score: Some(ScoreBand::Good),
        };
        let modal = Modal::for_outcome(&won);
        assert_eq!(modal.title, "Level Completed!");
        assert_eq!(modal.message, "Great job! You won with a score of 75!");
        assert_eq!(modal.button.action, UiAction::NextLevel);

        let lost = Outcome {
            won: false,
            score: None,
            ..won
        };
        let modal = Modal::for_outcome(&lost);
        assert_eq!(modal.title, "Level Failed");
        assert_eq!(modal.button.action, UiAction::Retry);
    }

    #[test]
    fn final_modal_offers_play_again() {
        let modal = Modal::all_complete();
        assert_eq!(modal.message, "You've completed all levels!");
        assert_eq!(modal.button.label, "Play Again");
        assert_eq!(modal.button.action, UiAction::PlayAgain);
    }

    #[test]
    fn headless_bind_reports_missing_display() {
        assert!(HeadlessPresenter::new().bind().is_ok());
        let err = HeadlessPresenter::missing("time-display").bind().unwrap_err();
        assert!(matches!(err, GameError::MissingDisplay("time-display")));
    }
}
