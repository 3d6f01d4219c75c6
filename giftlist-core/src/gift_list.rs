//! The in-memory gift collection, kept in step with its store.

use std::collections::HashSet;
use std::sync::{Arc, RwLock};

use serde_json::Value;
use tracing::{debug, warn};

use crate::clock::Clock;
use crate::error::{GiftError, GiftResult};
use crate::gift::{Gift, GiftId, GiftInput};
use crate::sink::{Severity, Sink};
use crate::store::Store;
use crate::transfer;

/// Handle shared between the CLI and the reminder scheduler.
pub type SharedGiftList = Arc<RwLock<GiftList>>;

/// Owns the gifts, in insertion order, with unique ids.
///
/// Every mutation is written through to the store before the sink is told
/// about it. A failed write is reported but the in-memory change stays.
pub struct GiftList {
    gifts: Vec<Gift>,
    store: Box<dyn Store>,
    sink: Arc<dyn Sink>,
    clock: Arc<dyn Clock>,
    last_issued: Option<GiftId>,
    /// Set while the store is behind the in-memory collection.
    unsaved: bool,
}

impl GiftList {
    /// Create the collection and load whatever the store holds.
    pub fn open(store: impl Store + 'static, sink: Arc<dyn Sink>, clock: Arc<dyn Clock>) -> Self {
        let mut list = GiftList {
            gifts: Vec::new(),
            store: Box::new(store),
            sink,
            clock,
            last_issued: None,
            unsaved: false,
        };
        list.load();
        list
    }

    pub fn into_shared(self) -> SharedGiftList {
        Arc::new(RwLock::new(self))
    }

    /// Re-read the store, replacing the in-memory collection.
    ///
    /// Never fails: an unreadable or malformed document yields an empty list
    /// and a warning. Changes that never reached the store are dropped; use
    /// `reload` to keep them.
    pub fn load(&mut self) -> &[Gift] {
        self.unsaved = false;
        self.gifts = match self.read_stored() {
            Ok(gifts) => self.dedupe(gifts),
            Err(message) => {
                warn!("{}", message);
                self.sink.notify(&message, Severity::Warning);
                Vec::new()
            }
        };
        debug!(count = self.gifts.len(), "loaded gifts");
        self.sink.gifts_changed(&self.gifts);
        &self.gifts
    }

    /// Pick up changes written to the store by someone else.
    ///
    /// If an earlier write failed, the store is stale: the write is retried
    /// and, while it keeps failing, the in-memory collection is kept as is.
    pub fn reload(&mut self) -> &[Gift] {
        if self.unsaved {
            if let Err(message) = self.persist() {
                warn!("{}; keeping unsaved gifts instead of reloading", message);
                return &self.gifts;
            }
            self.unsaved = false;
            debug!("unsaved gifts written on retry");
        }
        self.load()
    }

    /// Whether the last write to the store failed.
    pub fn has_unsaved_changes(&self) -> bool {
        self.unsaved
    }

    pub fn gifts(&self) -> &[Gift] {
        &self.gifts
    }

    /// A copy of the current collection for read-only consumers.
    pub fn snapshot(&self) -> Vec<Gift> {
        self.gifts.clone()
    }

    pub fn get(&self, id: GiftId) -> Option<&Gift> {
        self.gifts.iter().find(|g| g.id == id)
    }

    pub fn len(&self) -> usize {
        self.gifts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.gifts.is_empty()
    }

    pub fn add(&mut self, input: GiftInput) -> GiftResult<Gift> {
        let gift = self.insert(input).inspect_err(|e| self.report(e))?;
        self.commit();
        self.sink.notify("Gift added successfully!", Severity::Success);
        Ok(gift)
    }

    /// Remove a gift. Returns false, and changes nothing, if the id is unknown.
    pub fn remove(&mut self, id: GiftId) -> bool {
        if !self.take(id) {
            debug!(%id, "remove: no such gift");
            return false;
        }
        self.commit();
        self.sink.notify("Gift deleted successfully", Severity::Success);
        true
    }

    /// Replace a gift with one built from `input`.
    ///
    /// The replacement gets a new id and creation time. The collection is
    /// untouched if the input is invalid or the id is unknown.
    pub fn edit(&mut self, id: GiftId, input: GiftInput) -> GiftResult<Gift> {
        let draft = match input.validate() {
            Ok(draft) => draft,
            Err(e) => {
                let err = GiftError::from(e);
                self.report(&err);
                return Err(err);
            }
        };
        if self.get(id).is_none() {
            let err = GiftError::NotFound(id);
            self.report(&err);
            return Err(err);
        }
        // Issued while the old gift is still present, so the two never coincide.
        let new_id = self.next_id();
        self.take(id);
        let gift = self.push(draft.into_gift(new_id, self.clock.now()));
        self.commit();
        debug!(old = %id, new = %gift.id, "gift replaced");
        self.sink.notify("Gift updated successfully", Severity::Success);
        Ok(gift)
    }

    /// Replace the whole collection.
    ///
    /// Every gift must have a name and recipient, and ids must be unique.
    pub fn replace_all(&mut self, gifts: Vec<Gift>) -> GiftResult<()> {
        let mut seen = HashSet::new();
        for gift in &gifts {
            gift.check()
                .map_err(|e| GiftError::Format(format!("gift {}: {}", gift.id, e)))?;
            if !seen.insert(gift.id) {
                return Err(GiftError::Format(format!("duplicate gift id {}", gift.id)));
            }
        }

        self.gifts = gifts;
        self.commit();
        Ok(())
    }

    /// Import an arbitrary parsed JSON payload, replacing the collection.
    ///
    /// Returns the number of gifts imported. On error the collection is unchanged.
    pub fn import(&mut self, payload: Value) -> GiftResult<usize> {
        let result = transfer::parse_import(payload).and_then(|gifts| {
            let count = gifts.len();
            self.replace_all(gifts).map(|_| count)
        });

        match &result {
            Ok(count) => {
                debug!(count, "imported gifts");
                self.sink
                    .notify("Gift list imported successfully", Severity::Success);
            }
            Err(e) => {
                warn!(error = %e, "import rejected");
                self.sink.notify("Error importing file", Severity::Error);
            }
        }
        result
    }

    /// The collection as a pretty-printed JSON document.
    pub fn export(&self) -> GiftResult<String> {
        let document = transfer::export_json(&self.gifts)?;
        self.sink
            .notify("Gift list exported successfully", Severity::Success);
        Ok(document)
    }

    fn insert(&mut self, input: GiftInput) -> GiftResult<Gift> {
        let draft = input.validate()?;
        let id = self.next_id();
        Ok(self.push(draft.into_gift(id, self.clock.now())))
    }

    fn push(&mut self, gift: Gift) -> Gift {
        self.gifts.push(gift.clone());
        gift
    }

    fn take(&mut self, id: GiftId) -> bool {
        let before = self.gifts.len();
        self.gifts.retain(|g| g.id != id);
        self.gifts.len() != before
    }

    /// Clock-derived id, strictly after any id issued in this session,
    /// probed upward past ids already in the collection.
    fn next_id(&mut self) -> GiftId {
        let from_clock = self.clock.now().timestamp_millis();
        let mut candidate = match self.last_issued {
            Some(GiftId(last)) if last >= from_clock => last + 1,
            _ => from_clock,
        };
        while self.gifts.iter().any(|g| g.id.0 == candidate) {
            candidate += 1;
        }

        let id = GiftId(candidate);
        self.last_issued = Some(id);
        id
    }

    fn commit(&mut self) {
        match self.persist() {
            Ok(()) => self.unsaved = false,
            Err(message) => {
                warn!("{}", message);
                self.unsaved = true;
                self.sink.notify("Error saving data", Severity::Error);
            }
        }
        self.sink.gifts_changed(&self.gifts);
    }

    fn report(&self, err: &GiftError) {
        debug!(error = %err, "gift rejected");
        self.sink.notify(&err.to_string(), Severity::Error);
    }

    fn persist(&self) -> Result<(), String> {
        let document = serde_json::to_string(&self.gifts)
            .map_err(|e| format!("Could not serialize gifts: {e}"))?;
        self.store
            .write(&document)
            .map_err(|e| format!("Could not save gifts: {e}"))
    }

    fn read_stored(&self) -> Result<Vec<Gift>, String> {
        let document = self
            .store
            .read()
            .map_err(|e| format!("Could not load gifts: {e}"))?;

        match document {
            Some(document) if !document.trim().is_empty() => {
                transfer::parse_import_str(&document)
                    .map_err(|e| format!("Could not load gifts: {e}"))
            }
            _ => Ok(Vec::new()),
        }
    }

    fn dedupe(&self, gifts: Vec<Gift>) -> Vec<Gift> {
        let mut seen = HashSet::new();
        let mut kept = Vec::with_capacity(gifts.len());
        for gift in gifts {
            if seen.insert(gift.id) {
                kept.push(gift);
            } else {
                warn!(id = %gift.id, "dropping stored gift with duplicate id");
                self.sink.notify(
                    &format!("Ignored a stored gift with duplicate id {}", gift.id),
                    Severity::Warning,
                );
            }
        }
        kept
    }
}
