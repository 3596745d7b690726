use std::fmt;

use bevel_engine::coords::Rect;

use crate::group::WidgetId;

/// Errors surfaced by widget construction and reconfiguration.
///
/// Malformed colors and fonts never show up here; they degrade to defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WidgetError {
    /// The rectangle has a zero or negative width or height.
    InvalidGeometry { rect: Rect },
    /// The id does not belong to the group it was used with.
    UnknownWidget(WidgetId),
}

impl fmt::Display for WidgetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WidgetError::InvalidGeometry { rect } => write!(
                f,
                "invalid widget geometry: {}x{} at ({}, {})",
                rect.w, rect.h, rect.x, rect.y
            ),
            WidgetError::UnknownWidget(id) => write!(f, "unknown widget {id}"),
        }
    }
}

impl std::error::Error for WidgetError {}
