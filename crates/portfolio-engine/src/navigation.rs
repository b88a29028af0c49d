//! Screen Navigation
//!
//! Four modal screens. Everything starts from the menu and every screen
//! comes back to it; there are no screen-to-screen shortcuts.

use serde::{Deserialize, Serialize};

use crate::domain::{EngineError, EngineResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Screen {
    #[default]
    Menu,
    AddForm,
    ListView,
    AdvisorView,
}

/// What the user (or a completed save) asks the navigation to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Menu entry
    Open(Screen),
    /// Explicit back action
    Back,
    /// The add form was saved successfully
    Saved,
}

impl Screen {
    /// Screens that show fetched properties and refresh them on entry
    pub fn needs_properties(self) -> bool {
        matches!(self, Screen::ListView | Screen::AdvisorView)
    }

    pub fn apply(self, transition: Transition) -> EngineResult<Screen> {
        match (self, transition) {
            (Screen::Menu, Transition::Open(target)) if target != Screen::Menu => Ok(target),
            (from, Transition::Back) if from != Screen::Menu => Ok(Screen::Menu),
            (Screen::AddForm, Transition::Saved) => Ok(Screen::Menu),
            (from, transition) => Err(EngineError::InvalidTransition { from, transition }),
        }
    }
}
