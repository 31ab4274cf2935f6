//! The open month of the schedule and the edits made against it.
//!
//! A board shows one (year, month) at a time: the generated sailings for that
//! month with the stored ones laid over them. Saves and deletes go to the
//! store first; only the store's answer is written back into the board, so a
//! failed call never changes what is shown.

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use crate::date::MonthKey;
use crate::entry::{EntryId, ScheduleEntry, SlotKey};
use crate::error::{ScheduleError, ScheduleResult};
use crate::reconcile::{in_month, month_schedule, reconcile};
use crate::recurrence::generate_month;
use crate::rules::RuleSet;
use crate::selection::{FetchTicket, MonthSelection};
use crate::store::ScheduleStore;
use crate::upcoming::filter_upcoming;

/// A sailing being edited. `original` is the identity it was opened under.
#[derive(Debug, Clone, PartialEq)]
pub struct Draft {
    pub original: EntryId,
    pub entry: ScheduleEntry,
}

impl Draft {
    /// Open a draft of an existing (generated or persisted) sailing.
    pub fn of(entry: &ScheduleEntry) -> Self {
        Draft {
            original: entry.id.clone(),
            entry: entry.clone(),
        }
    }

    /// A brand new sailing that is not on the rules' calendar.
    pub fn new_sailing(mut entry: ScheduleEntry) -> Self {
        entry.id = EntryId::Unsaved;
        Draft {
            original: EntryId::Unsaved,
            entry,
        }
    }

    /// Saving this draft creates a stored sailing in a generated slot.
    pub fn is_promotion(&self) -> bool {
        self.original.is_generated()
    }
}

pub struct ScheduleBoard<S> {
    store: S,
    rules: RuleSet,
    selection: MonthSelection,
    current: Option<MonthKey>,
    // generated slots of the current month
    generated: Vec<ScheduleEntry>,
    // stored sailings departing in the current month, in store order
    stored: Vec<ScheduleEntry>,
    entries: Vec<ScheduleEntry>,
}

impl<S: ScheduleStore> ScheduleBoard<S> {
    pub fn new(store: S, rules: RuleSet) -> Self {
        ScheduleBoard {
            store,
            rules,
            selection: MonthSelection::new(),
            current: None,
            generated: Vec::new(),
            stored: Vec::new(),
            entries: Vec::new(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn selection(&self) -> &MonthSelection {
        &self.selection
    }

    pub fn current(&self) -> Option<MonthKey> {
        self.current
    }

    /// The merged sailings of the current month, in departure order.
    pub fn entries(&self) -> &[ScheduleEntry] {
        &self.entries
    }

    /// The current month's sailings departing on or after `reference`.
    pub fn upcoming(&self, reference: NaiveDate) -> Vec<ScheduleEntry> {
        filter_upcoming(self.entries.iter().cloned(), reference)
    }

    // FETCHING:

    /// Switch to `key` and return the ticket its fetch must be applied with.
    pub fn begin_fetch(&mut self, key: MonthKey) -> FetchTicket {
        self.current = Some(key);
        self.selection.select(key);
        FetchTicket::new(key)
    }

    /// Apply a finished fetch of the store's sailings.
    ///
    /// Returns false if the board has moved to another month since the fetch
    /// started; the result is then discarded. A failed fetch still produces
    /// the generated schedule.
    pub fn apply_fetch(
        &mut self,
        ticket: FetchTicket,
        fetched: ScheduleResult<Vec<ScheduleEntry>>,
    ) -> bool {
        if !ticket.is_current(self.current) {
            debug!(month = %ticket.key(), "discarding fetch for a month no longer shown");
            return false;
        }

        let key = ticket.key();
        let persisted = fetched.unwrap_or_else(|e| {
            warn!(month = %key, error = %e, "could not load stored sailings, showing generated schedule only");
            Vec::new()
        });

        self.generated = generate_month(&self.rules, key);
        self.stored = in_month(&persisted, key);
        self.entries = reconcile(self.generated.clone(), self.stored.clone());
        true
    }

    /// Open `key`, fetching the stored sailings for it.
    pub async fn open(&mut self, key: MonthKey) -> &[ScheduleEntry] {
        let ticket = self.begin_fetch(key);
        let fetched = self.store.list().await;
        self.apply_fetch(ticket, fetched);
        &self.entries
    }

    /// Open the remembered month for `year`, or its default month when the
    /// year has not been visited yet.
    pub async fn open_year(&mut self, year: i32, reference: NaiveDate) -> MonthKey {
        if let Some(key) = self.selection.selected(year) {
            self.open(key).await;
            return key;
        }

        let fetched = self.store.list().await;
        let persisted: &[ScheduleEntry] = match &fetched {
            Ok(entries) => entries.as_slice(),
            Err(_) => &[],
        };
        let rules = &self.rules;
        let key = self
            .selection
            .selected_or_default(year, reference, |k| month_schedule(rules, k, persisted));

        let ticket = self.begin_fetch(key);
        self.apply_fetch(ticket, fetched);
        key
    }

    /// Re-fetch the current month.
    pub async fn refresh(&mut self) -> &[ScheduleEntry] {
        match self.current {
            Some(key) => self.open(key).await,
            None => &self.entries,
        }
    }

    // EDITING:

    /// Open a draft of a sailing shown on the board.
    pub fn edit(&self, id: &EntryId) -> ScheduleResult<Draft> {
        self.entries
            .iter()
            .find(|e| &e.id == id)
            .map(Draft::of)
            .ok_or_else(|| ScheduleError::NotFound(id.to_string()))
    }

    /// The sailing shown in `window`, if any.
    pub fn find(&self, window: SlotKey) -> Option<&ScheduleEntry> {
        self.entries.iter().find(|e| e.key() == window)
    }

    /// Save a draft. Generated and new sailings are created in the store,
    /// stored ones are updated. On failure the board is left untouched and the
    /// draft comes back inside [`ScheduleError::SaveConflict`].
    pub async fn save(&mut self, draft: Draft) -> ScheduleResult<ScheduleEntry> {
        if !draft.entry.is_consistent() {
            let reason = format!(
                "end date {} is not {} nights after {}",
                draft.entry.end_text(),
                draft.entry.nights,
                draft.entry.start_text()
            );
            return Err(ScheduleError::SaveConflict {
                draft: Box::new(draft),
                reason,
            });
        }

        let result = match &draft.original {
            EntryId::Persisted(id) => self.store.update(id, &draft.entry).await,
            EntryId::Generated { .. } | EntryId::Unsaved => self.store.create(&draft.entry).await,
        };

        let saved = match result {
            Ok(saved) => saved,
            Err(e) => {
                warn!(original = %draft.original, error = %e, "saving sailing failed");
                return Err(ScheduleError::SaveConflict {
                    draft: Box::new(draft),
                    reason: e.to_string(),
                });
            }
        };

        if draft.is_promotion() {
            info!(slot = %draft.original, id = %saved.id, "stored edited generated sailing");
        }

        self.replace(&draft.original, saved.clone());
        Ok(saved)
    }

    /// Delete a stored sailing. Generated sailings are refused without
    /// contacting the store. Returns whether the store had the sailing.
    pub async fn delete(&mut self, id: &EntryId) -> ScheduleResult<bool> {
        let Some(store_id) = id.store_id() else {
            return Err(ScheduleError::DeleteRefused(id.clone()));
        };

        let removed = self.store.delete(store_id).await?;
        if !removed {
            warn!(id = store_id, "sailing was already gone from the store");
        }

        let mut windows = Vec::new();
        if let Some(pos) = self.stored.iter().position(|e| &e.id == id) {
            windows.push(self.stored.remove(pos).key());
        }
        if let Some(shown) = self.entries.iter().find(|e| &e.id == id) {
            windows.push(shown.key());
        }
        for window in windows {
            self.resettle(window);
        }
        info!(id = store_id, "deleted sailing");
        Ok(removed)
    }

    /// Put a saved sailing in place of the draft it came from.
    fn replace(&mut self, original: &EntryId, saved: ScheduleEntry) {
        let in_view = self.current.is_some_and(|key| key.contains(saved.start));
        let mut windows = vec![saved.key()];
        if let Some(shown) = self.entries.iter().find(|e| &e.id == original) {
            windows.push(shown.key());
        }

        // updates keep a record's place in the store, creates go last
        match self.stored.iter().position(|e| &e.id == original) {
            Some(pos) => {
                windows.push(self.stored[pos].key());
                if in_view {
                    self.stored[pos] = saved;
                } else {
                    self.stored.remove(pos);
                }
            }
            None if in_view => self.stored.push(saved),
            None => {}
        }

        windows.sort();
        windows.dedup();
        for window in windows {
            self.resettle(window);
        }
    }

    /// Work out again which sailing `window` shows, from the month's
    /// generated and stored sailings in that window.
    fn resettle(&mut self, window: SlotKey) {
        self.entries.retain(|e| e.key() != window);

        let in_window = |e: &&ScheduleEntry| e.key() == window;
        let shown = reconcile(
            self.generated.iter().filter(in_window).cloned(),
            self.stored.iter().filter(in_window).cloned(),
        );
        for entry in shown {
            self.insert_in_order(entry);
        }
    }

    fn insert_in_order(&mut self, entry: ScheduleEntry) {
        let pos = self.entries.partition_point(|e| e.key() < entry.key());
        self.entries.insert(pos, entry);
    }
}
