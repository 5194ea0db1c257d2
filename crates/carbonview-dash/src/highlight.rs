//! Cross-view highlight synchronizer.
//!
//! One shared selection keeps the doughnut legend, the category list, and
//! the treemap visually consistent. This state is the single source of
//! truth: views receive a projected [`VisualFlag`] per element and never
//! derive highlight state from their own rendering.
//!
//! Two interaction layers share the selection:
//! - transient hover: enter highlights, leave clears;
//! - pinned click: a clicked element keeps the selection past mouse-leave
//!   until it is re-clicked (clears) or another element is clicked
//!   (re-pins).

use carbonview_core::VisualFlag;
use serde::{Deserialize, Serialize};

/// Strip a subcategory suffix: `personal-commute` → `personal`; ids without
/// a separator are returned unchanged.
#[must_use]
pub fn main_category(category_id: &str) -> &str {
    category_id.split('-').next().unwrap_or(category_id)
}

/// The shared highlight selection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighlightState {
    active: Option<String>,
    pinned: bool,
}

impl HighlightState {
    /// Create an empty selection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The active category id, if any.
    #[must_use]
    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    /// Whether the selection is pinned by a click.
    #[must_use]
    pub const fn is_pinned(&self) -> bool {
        self.pinned
    }

    /// Hover entered an element. Ignored while a click pin is held.
    pub fn hover_enter(&mut self, category_id: &str) {
        if !self.pinned {
            self.active = Some(category_id.to_string());
        }
    }

    /// Hover left all elements. A no-op while a click pin is held.
    pub fn hover_leave(&mut self) {
        if !self.pinned {
            self.active = None;
        }
    }

    /// An element was clicked: re-clicking the pinned element clears
    /// everything, clicking anything else pins the new selection.
    pub fn click(&mut self, category_id: &str) {
        if self.pinned && self.active.as_deref() == Some(category_id) {
            self.clear();
        } else {
            self.active = Some(category_id.to_string());
            self.pinned = true;
        }
    }

    /// Remove the selection and the pin.
    pub fn clear(&mut self) {
        self.active = None;
        self.pinned = false;
    }

    /// Project the flag for one element.
    ///
    /// The active id is reduced to its main category; an element matches by
    /// exact id or by the `<main>-` subcategory prefix. Exactly one of
    /// highlighted/dimmed/normal holds per element.
    #[must_use]
    pub fn flag_for(&self, element_id: &str) -> VisualFlag {
        let Some(active) = self.active.as_deref() else {
            return VisualFlag::Normal;
        };
        let main = main_category(active);
        let matches =
            element_id == main || element_id.strip_prefix(main).is_some_and(|rest| rest.starts_with('-'));
        if matches {
            VisualFlag::Highlighted
        } else {
            VisualFlag::Dimmed
        }
    }

    /// Project flags for a set of element ids.
    #[must_use]
    pub fn project<'a>(
        &self,
        element_ids: impl IntoIterator<Item = &'a str>,
    ) -> Vec<(&'a str, VisualFlag)> {
        element_ids
            .into_iter()
            .map(|id| (id, self.flag_for(id)))
            .collect()
    }
}
