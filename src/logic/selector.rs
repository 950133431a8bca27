//! Top level profile selection.
//!
//! A selector UI calls [`ProfileSelector::choose`] when the user picks a top
//! level profile. The profile's `do_on_select` hook decides what happens:
//!
//! | Result          | Effect |
//! |-----------------|--------|
//! | `NewSelection`  | The chosen profile replaces the current one |
//! | `SameSelection` | The current profile is kept untouched |
//! | `ResetCurrent`  | The current profile is cleared |

use tracing::{debug, info};

use crate::profiles::Profile;
use crate::types::SelectResult;

/// Holds the user's current top level choice.
#[derive(Debug, Clone, Default)]
pub struct ProfileSelector {
    current: Option<Profile>,
}

impl ProfileSelector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&Profile> {
        self.current.as_ref()
    }

    pub fn current_mut(&mut self) -> Option<&mut Profile> {
        self.current.as_mut()
    }

    /// Take the current choice out of the selector.
    pub fn take(&mut self) -> Option<Profile> {
        self.current.take()
    }

    /// Apply a selection event and report how it was handled.
    pub fn choose(&mut self, profile: Profile) -> SelectResult {
        let result = profile.do_on_select();
        debug!("{} selected: {}", profile.name(), result);

        match result {
            SelectResult::NewSelection => {
                if let Some(previous) = self.current.replace(profile) {
                    info!("Replaced profile selection {}", previous.name());
                }
            }
            SelectResult::SameSelection => {}
            SelectResult::ResetCurrent => {
                if let Some(mut previous) = self.current.take() {
                    previous.reset();
                    info!("Cleared profile selection {}", previous.name());
                }
            }
        }
        result
    }

    /// Clear the current choice.
    pub fn clear(&mut self) {
        self.current = None;
    }
}
