//! Bounded MAC address learning table.

use l2switch_types::{InterfaceNumber, MacAddress};
use std::time::Instant;

/// Monotonic time at which a MAC address was last observed.
pub type Timestamp = Instant;

/// A learned MAC → interface association.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddressTableEntry {
    pub mac: MacAddress,
    pub interface: InterfaceNumber,
    pub last_seen: Timestamp,
}

/// What a call to [`AddressTable::learn`] did to the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LearnOutcome {
    /// The MAC was new and took a free slot.
    Inserted,
    /// The MAC was already known on the same interface; only `last_seen` changed.
    Refreshed,
    /// The MAC was known on another interface and now points at the new one.
    Moved { from: InterfaceNumber },
    /// The table was full; the oldest entry was replaced.
    Evicted { victim: AddressTableEntry },
}

/// Fixed-capacity arena of learned addresses.
///
/// Slots are filled in order and never freed, only overwritten, so a slot
/// index stays stable for the lifetime of the table. Every operation is a
/// linear scan; the table is expected to be small.
#[derive(Debug, Clone)]
pub struct AddressTable {
    entries: Vec<AddressTableEntry>,
    capacity: usize,
}

impl AddressTable {
    /// Creates an empty table with `capacity` slots.
    ///
    /// A capacity of zero is raised to one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Records that `mac` was seen as a frame source on `interface` at `now`.
    ///
    /// The caller must not pass the broadcast address.
    ///
    /// A single scan both looks for `mac` and tracks the oldest occupied slot,
    /// so that an insertion into a full table knows its victim without a
    /// second pass. Ties on `last_seen` go to the lowest slot index.
    pub fn learn(
        &mut self,
        mac: MacAddress,
        interface: InterfaceNumber,
        now: Timestamp,
    ) -> LearnOutcome {
        debug_assert!(!mac.is_broadcast(), "broadcast address is never learned");

        let mut oldest: Option<(usize, Timestamp)> = None;

        for (slot, entry) in self.entries.iter_mut().enumerate() {
            if entry.mac == mac {
                let previous = entry.interface;
                entry.interface = interface;
                entry.last_seen = now;
                return if previous == interface {
                    LearnOutcome::Refreshed
                } else {
                    LearnOutcome::Moved { from: previous }
                };
            }

            // strict comparison keeps the lowest slot on ties
            if oldest.map_or(true, |(_, seen)| entry.last_seen < seen) {
                oldest = Some((slot, entry.last_seen));
            }
        }

        let learned = AddressTableEntry {
            mac,
            interface,
            last_seen: now,
        };

        match oldest {
            Some((slot, _)) if self.is_full() => {
                let victim = std::mem::replace(&mut self.entries[slot], learned);
                LearnOutcome::Evicted { victim }
            }
            _ => {
                self.entries.push(learned);
                LearnOutcome::Inserted
            }
        }
    }

    /// Returns the interface `mac` was last seen on, if known.
    ///
    /// The broadcast address never matches.
    pub fn lookup(&self, mac: &MacAddress) -> Option<InterfaceNumber> {
        if mac.is_broadcast() {
            return None;
        }
        self.entries
            .iter()
            .find(|entry| entry.mac == *mac)
            .map(|entry| entry.interface)
    }

    /// Returns the full entry for `mac`, if known.
    pub fn get(&self, mac: &MacAddress) -> Option<&AddressTableEntry> {
        self.entries.iter().find(|entry| entry.mac == *mac)
    }

    /// Returns the occupied entries in slot order.
    pub fn entries(&self) -> &[AddressTableEntry] {
        &self.entries
    }

    /// Returns the number of occupied slots.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no address has been learned.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the number of slots.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns true if every slot is occupied.
    pub fn is_full(&self) -> bool {
        self.entries.len() >= self.capacity
    }
}
