/*!
 * Queue Expiry
 * Age checks for waiting entries and the "missed notifications" marker
 */

use super::Inner;
use crate::collaborators::MissedMarker;
use crate::core::limits::{CATEGORY_HUN_QUEUE_INTERNAL, MARKER_CHANNEL_ID};
use crate::entry::AlertEntry;

impl Inner {
    /// An entry expires once it has waited strictly longer than the threshold
    /// for the current restriction state. Housekeeping entries never expire.
    pub(super) fn is_expired(&self, entry: &AlertEntry, now_ms: u64, restricted: bool) -> bool {
        if entry.is_housekeeping() {
            return false;
        }
        let elapsed = now_ms.saturating_sub(entry.post_time);
        self.config
            .expiry
            .threshold(restricted)
            .is_some_and(|threshold| elapsed > threshold)
    }

    pub(super) fn build_marker(&self, restricted: bool) -> MissedMarker {
        let text = &self.config.marker;
        let title = if restricted {
            &text.title_driving
        } else {
            &text.title_parked
        };

        MissedMarker {
            channel_id: MARKER_CHANNEL_ID.into(),
            category: CATEGORY_HUN_QUEUE_INTERNAL.into(),
            title: title.clone(),
            text: text.description.clone(),
        }
    }
}
