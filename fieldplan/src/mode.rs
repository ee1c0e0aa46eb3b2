use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::FieldplanError;

/// Decides what the next click on the map does.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum InteractionMode {
    /// Clicks do nothing.
    #[default]
    None,
    /// Clicks move the anchor marker.
    MoveAnchor,
    /// Clicks append waypoints to the route.
    EditRoute,
}

impl InteractionMode {
    /// Modes that have a toggle control of their own.
    pub const TOGGLES: [InteractionMode; 2] =
        [InteractionMode::MoveAnchor, InteractionMode::EditRoute];

    /// Mode that results from pressing the toggle for `requested` while `self` is active.
    ///
    /// Pressing the toggle of the active mode switches back to [`InteractionMode::None`].
    pub fn toggle(self, requested: InteractionMode) -> InteractionMode {
        if self == requested {
            InteractionMode::None
        } else {
            requested
        }
    }

    /// Whether the toggle control for `control` should be shown as active.
    pub fn is_active(self, control: InteractionMode) -> bool {
        self != InteractionMode::None && self == control
    }

    /// Name of the mode as used in configuration and logs.
    pub fn as_str(self) -> &'static str {
        match self {
            InteractionMode::None => "none",
            InteractionMode::MoveAnchor => "move-anchor",
            InteractionMode::EditRoute => "edit-route",
        }
    }
}

impl Display for InteractionMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InteractionMode {
    type Err = FieldplanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(InteractionMode::None),
            "move-anchor" => Ok(InteractionMode::MoveAnchor),
            "edit-route" => Ok(InteractionMode::EditRoute),
            other => Err(FieldplanError::UnknownMode(other.to_string())),
        }
    }
}
