//! Keyboard focus management for text entries.
//!
//! [`EntryGroup`] owns a set of [`Entry`] widgets and the single focus slot.
//!
//! # How focus works
//!
//! 1. [`EntryGroup::mouse_pressed`] focuses the first active entry under the
//!    pointer and unfocuses every other one. A press that hits nothing is
//!    handled by the group's [`MissPolicy`].
//! 2. [`EntryGroup::key_action`] forwards key presses to the focused entry
//!    only: the delete key drops a character, the escape key releases focus,
//!    everything else types the produced character.
//! 3. [`EntryGroup::tick`] advances the caret blink of the focused entry.

use std::time::{Duration, Instant};

use bevel_engine::coords::Point;
use bevel_engine::input::{Key, KeyEvent};
use bevel_engine::raster::Image;

use crate::error::WidgetError;
use crate::event::EventResult;
use crate::group::{WidgetGroup, WidgetId};
use crate::widget::Widget;
use crate::widgets::entry::{Entry, EntryConfig, EntrySettings};

// ── configuration ─────────────────────────────────────────────────────────

/// What a pointer press outside every entry does to the current focus.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum MissPolicy {
    /// Focus stays where it is.
    #[default]
    KeepFocus,
    /// Every entry is unfocused.
    ClearFocus,
}

#[derive(Debug, Clone)]
pub struct EntryGroupConfig {
    pub miss_policy: MissPolicy,
    /// Removes the last character of the focused entry.
    pub delete_key: Key,
    /// Releases focus.
    pub escape_key: Key,
    /// Half period of the caret blink. Zero keeps the caret steady.
    pub caret_blink: Duration,
}

impl EntryGroupConfig {
    pub fn with_miss_policy(mut self, v: MissPolicy) -> Self { self.miss_policy = v; self }
    pub fn with_delete_key(mut self, v: Key) -> Self { self.delete_key = v; self }
    pub fn with_escape_key(mut self, v: Key) -> Self { self.escape_key = v; self }
    pub fn with_caret_blink(mut self, v: Duration) -> Self { self.caret_blink = v; self }
}

impl Default for EntryGroupConfig {
    fn default() -> Self {
        Self {
            miss_policy: MissPolicy::KeepFocus,
            delete_key: Key::Backspace,
            escape_key: Key::Escape,
            caret_blink: Duration::from_millis(500),
        }
    }
}

// ── EntryGroup ────────────────────────────────────────────────────────────

/// Entries plus the focus slot.
///
/// Invariant: at most one entry is focused, and it is the one in the slot.
/// Entries are only reachable immutably from outside so focus cannot be
/// changed behind the group's back.
pub struct EntryGroup {
    entries: WidgetGroup<Entry>,
    focus: Option<WidgetId>,
    config: EntryGroupConfig,
}

impl EntryGroup {
    pub fn new() -> Self {
        Self::with_config(EntryGroupConfig::default())
    }

    pub fn with_config(config: EntryGroupConfig) -> Self {
        Self { entries: WidgetGroup::new(), focus: None, config }
    }

    #[inline]
    pub fn config(&self) -> &EntryGroupConfig {
        &self.config
    }

    pub fn add(&mut self, entry: Entry) -> WidgetId {
        self.entries.add(entry)
    }

    /// Removes an entry; removing the focused one clears the focus slot.
    pub fn remove(&mut self, id: WidgetId) -> Option<Entry> {
        if self.focus == Some(id) {
            log::debug!("focused entry {id} removed");
            self.focus = None;
        }
        self.entries.remove(id)
    }

    pub fn get(&self, id: WidgetId) -> Option<&Entry> {
        self.entries.get(id)
    }

    /// Text of entry `id`.
    pub fn get_text(&self, id: WidgetId) -> Option<&str> {
        self.entries.get(id).map(Entry::get_text)
    }

    pub fn iter(&self) -> impl Iterator<Item = (WidgetId, &Entry)> {
        self.entries.iter()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Id of the focused entry, if any.
    #[inline]
    pub fn focused(&self) -> Option<WidgetId> {
        self.focus
    }

    #[inline]
    pub fn has_focus(&self) -> bool {
        self.focus.is_some()
    }

    pub fn focused_entry(&self) -> Option<&Entry> {
        self.focus.and_then(|id| self.entries.get(id))
    }

    /// [`Entry::configure`] for a member entry, keeping the focus slot in
    /// sync when the patch deactivates the focused entry.
    pub fn configure(
        &mut self,
        id: WidgetId,
        patch: EntryConfig,
    ) -> Result<EntrySettings, WidgetError> {
        let entry = self.entries.get_mut(id).ok_or(WidgetError::UnknownWidget(id))?;
        let settings = entry.configure(patch)?;
        if self.focus == Some(id) && !settings.focused {
            log::debug!("entry {id} lost focus through configure");
            self.focus = None;
        }
        Ok(settings)
    }

    // ── dispatch ──────────────────────────────────────────────────────────

    /// [`mouse_pressed_at`](Self::mouse_pressed_at) with the current time.
    pub fn mouse_pressed(&mut self, pos: Point) -> EventResult {
        self.mouse_pressed_at(pos, Instant::now())
    }

    /// Focuses the first active entry containing `pos`, stamping the focus
    /// time with `now`.
    ///
    /// Returns [`EventResult::Consumed`] when an entry was hit.
    pub fn mouse_pressed_at(&mut self, pos: Point, now: Instant) -> EventResult {
        let hit = self
            .entries
            .iter()
            .find(|(_, e)| e.is_active() && e.rect().contains(pos))
            .map(|(id, _)| id);

        match hit {
            Some(hit) => {
                for (id, entry) in self.entries.iter_mut() {
                    if id == hit {
                        entry.focus(now);
                    } else {
                        entry.blur();
                    }
                }
                if self.focus != Some(hit) {
                    log::debug!("focus -> entry {hit}");
                }
                self.focus = Some(hit);
                EventResult::Consumed
            }
            None => {
                if self.config.miss_policy == MissPolicy::ClearFocus {
                    self.clear_focus();
                }
                EventResult::Ignored
            }
        }
    }

    /// Forwards a key press to the focused entry.
    pub fn key_action(&mut self, event: &KeyEvent) -> EventResult {
        let Some(id) = self.focus else {
            return EventResult::Ignored;
        };
        let Some(entry) = self.entries.get_mut(id) else {
            self.focus = None;
            return EventResult::Ignored;
        };

        if event.key == self.config.delete_key {
            entry.delete_last();
            EventResult::Consumed
        } else if event.key == self.config.escape_key {
            entry.blur();
            self.focus = None;
            log::debug!("entry {id} released focus");
            EventResult::Consumed
        } else if let Some(c) = event.text {
            entry.push_char(c);
            EventResult::Consumed
        } else {
            EventResult::Ignored
        }
    }

    /// Advances the caret blink of the focused entry. Returns `true` when it
    /// was re-rendered.
    pub fn tick(&mut self, now: Instant) -> bool {
        let blink = self.config.caret_blink;
        self.focus
            .and_then(|id| self.entries.get_mut(id))
            .is_some_and(|entry| entry.update_caret(now, blink))
    }

    /// Unfocuses every entry and empties the slot.
    pub fn clear_focus(&mut self) {
        for (_, entry) in self.entries.iter_mut() {
            entry.blur();
        }
        if let Some(id) = self.focus.take() {
            log::debug!("entry {id} unfocused");
        }
    }

    pub fn draw(&self, surface: &mut Image) {
        self.entries.draw(surface);
    }
}

impl Default for EntryGroup {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FixedAdvance;
    use bevel_engine::coords::Rect;

    /// Three stacked entries, 100×20 each, at y = 0, 30, 60.
    fn group(config: EntryGroupConfig) -> (EntryGroup, [WidgetId; 3]) {
        let fonts = FixedAdvance::shared(6);
        let mut g = EntryGroup::with_config(config);
        let ids = [0, 30, 60].map(|y| {
            let e = Entry::new(Rect::new(0, y, 100, 20), EntryConfig::new(), fonts.clone()).unwrap();
            g.add(e)
        });
        (g, ids)
    }

    fn focused_count(g: &EntryGroup) -> usize {
        g.iter().filter(|(_, e)| e.is_focused()).count()
    }

    fn type_str(g: &mut EntryGroup, s: &str) {
        for c in s.chars() {
            g.key_action(&KeyEvent::char(Key::Unknown(c as u32), c));
        }
    }

    // ── mouse_pressed ─────────────────────────────────────────────────────

    #[test]
    fn press_focuses_exactly_one_entry() {
        let (mut g, [a, b, _]) = group(EntryGroupConfig::default());
        assert_eq!(g.mouse_pressed(Point::new(10, 35)), EventResult::Consumed);
        assert_eq!(g.focused(), Some(b));
        assert_eq!(focused_count(&g), 1);

        g.mouse_pressed(Point::new(10, 5));
        assert_eq!(g.focused(), Some(a));
        assert_eq!(focused_count(&g), 1);
        assert!(!g.get(b).unwrap().is_focused());
    }

    #[test]
    fn inactive_entries_are_not_targets() {
        let (mut g, [a, _, _]) = group(EntryGroupConfig::default());
        g.configure(a, EntryConfig::new().active(false)).unwrap();
        assert_eq!(g.mouse_pressed(Point::new(10, 5)), EventResult::Ignored);
        assert!(!g.has_focus());
    }

    #[test]
    fn miss_keeps_focus_by_default() {
        let (mut g, [a, _, _]) = group(EntryGroupConfig::default());
        g.mouse_pressed(Point::new(10, 5));
        assert_eq!(g.mouse_pressed(Point::new(10, 25)), EventResult::Ignored);
        assert_eq!(g.focused(), Some(a));
        assert!(g.get(a).unwrap().is_focused());
    }

    #[test]
    fn miss_clears_focus_when_configured() {
        let (mut g, [a, _, _]) =
            group(EntryGroupConfig::default().with_miss_policy(MissPolicy::ClearFocus));
        g.mouse_pressed(Point::new(10, 5));
        g.mouse_pressed(Point::new(500, 500));
        assert!(!g.has_focus());
        assert!(!g.get(a).unwrap().is_focused());
        assert_eq!(focused_count(&g), 0);
    }

    #[test]
    fn refocusing_restarts_the_blink() {
        let t0 = Instant::now();
        let (mut g, [a, _, _]) = group(EntryGroupConfig::default());
        g.mouse_pressed_at(Point::new(10, 5), t0);
        assert!(g.tick(t0 + Duration::from_millis(600)));
        assert!(!g.get(a).unwrap().caret_visible());

        g.mouse_pressed_at(Point::new(10, 5), t0 + Duration::from_millis(700));
        assert!(g.get(a).unwrap().caret_visible());
        assert!(!g.tick(t0 + Duration::from_millis(1100)));
    }

    // ── key_action ────────────────────────────────────────────────────────

    #[test]
    fn typing_and_deleting() {
        let (mut g, [a, _, _]) = group(EntryGroupConfig::default());
        g.mouse_pressed(Point::new(10, 5));
        type_str(&mut g, "a");
        assert_eq!(g.get_text(a), Some("a"));

        g.key_action(&KeyEvent::named(Key::Backspace));
        assert_eq!(g.get_text(a), Some(""));

        let rev = g.get(a).unwrap().revision();
        g.key_action(&KeyEvent::named(Key::Backspace));
        assert_eq!(g.get_text(a), Some(""));
        assert_eq!(g.get(a).unwrap().revision(), rev);
    }

    #[test]
    fn typing_goes_to_focused_entry_only() {
        let (mut g, [a, b, c]) = group(EntryGroupConfig::default());
        g.mouse_pressed(Point::new(10, 35));
        type_str(&mut g, "hi");
        assert_eq!(g.get_text(a), Some(""));
        assert_eq!(g.get_text(b), Some("hi"));
        assert_eq!(g.get_text(c), Some(""));
    }

    #[test]
    fn escape_clears_focus_and_later_keys_are_ignored() {
        let (mut g, [a, _, _]) = group(EntryGroupConfig::default());
        g.mouse_pressed(Point::new(10, 5));
        type_str(&mut g, "x");
        assert_eq!(g.key_action(&KeyEvent::named(Key::Escape)), EventResult::Consumed);
        assert!(!g.has_focus());
        assert!(!g.get(a).unwrap().is_focused());

        assert_eq!(
            g.key_action(&KeyEvent::char(Key::Y, 'y')),
            EventResult::Ignored
        );
        assert_eq!(g.get_text(a), Some("x"));
    }

    #[test]
    fn keys_without_text_are_ignored() {
        let (mut g, [a, _, _]) = group(EntryGroupConfig::default());
        g.mouse_pressed(Point::new(10, 5));
        assert_eq!(g.key_action(&KeyEvent::named(Key::Shift)), EventResult::Ignored);
        assert_eq!(g.get_text(a), Some(""));
    }

    #[test]
    fn delete_key_is_configurable() {
        let (mut g, [a, _, _]) =
            group(EntryGroupConfig::default().with_delete_key(Key::Backslash));
        g.mouse_pressed(Point::new(10, 5));
        type_str(&mut g, "ab");
        g.key_action(&KeyEvent::char(Key::Backslash, '\\'));
        assert_eq!(g.get_text(a), Some("a"));
        g.key_action(&KeyEvent::named(Key::Backspace));
        assert_eq!(g.get_text(a), Some("a"));
    }

    // ── membership ────────────────────────────────────────────────────────

    #[test]
    fn removing_focused_entry_clears_slot() {
        let (mut g, [a, b, _]) = group(EntryGroupConfig::default());
        g.mouse_pressed(Point::new(10, 5));
        assert!(g.remove(a).is_some());
        assert!(!g.has_focus());
        assert_eq!(g.len(), 2);

        g.mouse_pressed(Point::new(10, 35));
        assert!(g.remove(a).is_none());
        assert_eq!(g.focused(), Some(b));
    }

    #[test]
    fn deactivating_focused_entry_clears_slot() {
        let (mut g, [a, _, _]) = group(EntryGroupConfig::default());
        g.mouse_pressed(Point::new(10, 5));
        g.configure(a, EntryConfig::new().active(false)).unwrap();
        assert!(!g.has_focus());
        assert_eq!(focused_count(&g), 0);
    }

    // ── tick ──────────────────────────────────────────────────────────────

    #[test]
    fn tick_without_focus_does_nothing() {
        let (mut g, _) = group(EntryGroupConfig::default());
        assert!(!g.tick(Instant::now()));
    }
}
