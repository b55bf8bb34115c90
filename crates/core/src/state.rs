//! The two most recently activated tabs.

use parking_lot::Mutex;

use crate::browser::TabId;

/// Sentinel occupying both slots until tabs have been activated.
pub const NO_TAB: TabId = 0;

/// Ordered pair (current, previous) of tab ids.
///
/// `previous` is always the tab that was current immediately before the
/// most recent activation. Activation events and reads interleave
/// arbitrarily with other browser events, so the shift happens as a single
/// assignment under one lock - readers never see a half-updated pair.
#[derive(Debug)]
pub struct RecentTabs {
	slots: Mutex<(TabId, TabId)>,
}

impl Default for RecentTabs {
	fn default() -> Self {
		Self {
			slots: Mutex::new((NO_TAB, NO_TAB)),
		}
	}
}

impl RecentTabs {
	pub fn new() -> Self {
		Self::default()
	}

	/// Records a tab activation: current shifts into previous.
	pub fn on_activated(&self, id: TabId) {
		let mut slots = self.slots.lock();
		*slots = (id, slots.0);
	}

	/// The tab that was current before the latest activation.
	pub fn previous(&self) -> TabId {
		self.slots.lock().1
	}

	/// The most recently activated tab.
	pub fn current(&self) -> TabId {
		self.slots.lock().0
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn starts_with_sentinels() {
		let recent = RecentTabs::new();
		assert_eq!(recent.current(), NO_TAB);
		assert_eq!(recent.previous(), NO_TAB);
	}

	#[test]
	fn previous_tracks_the_one_before_last() {
		let recent = RecentTabs::new();
		recent.on_activated(10);
		recent.on_activated(20);
		recent.on_activated(30);
		assert_eq!(recent.current(), 30);
		assert_eq!(recent.previous(), 20);
	}

	#[test]
	fn single_activation_leaves_previous_at_sentinel() {
		let recent = RecentTabs::new();
		recent.on_activated(10);
		assert_eq!(recent.current(), 10);
		assert_eq!(recent.previous(), NO_TAB);
	}

	#[test]
	fn reactivating_the_same_tab_shifts_it_into_previous() {
		let recent = RecentTabs::new();
		recent.on_activated(10);
		recent.on_activated(10);
		assert_eq!(recent.current(), 10);
		assert_eq!(recent.previous(), 10);
	}
}
