// -*- coding: utf-8 -*-
// ------------------------------------------------------------------------------------------------
// Copyright © 2020, HST authors.
//
// Licensed under the Apache License, Version 2.0 (the "License"); you may not use this file except
// in compliance with the License.  You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software distributed under the
// License is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either
// express or implied.  See the License for the specific language governing permissions and
// limitations under the License.
// ------------------------------------------------------------------------------------------------

//! Defines events, and sets of events.

use std::collections::btree_set;
use std::collections::BTreeSet;
use std::collections::HashMap;
use std::iter::FromIterator;

/// An event is an atomic action label.  Events are interned in a per-environment table; two events
/// with the same name are always represented by the same identifier, and events are totally
/// ordered by identifier so that every rendering of a set of events is deterministic.
///
/// Two events are special: τ is the invisible internal action, and ✔ signals the successful
/// termination of a process.  τ never shows up in a trace; ✔ can.
#[derive(Clone, Copy, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Event(u32);

impl Event {
    /// Returns the "not an event" placeholder.
    pub fn none() -> Event {
        Event(0)
    }

    /// Returns the invisible event τ.
    pub fn tau() -> Event {
        Event(1)
    }

    /// Returns the termination event ✔.
    pub fn tick() -> Event {
        Event(2)
    }

    /// Returns whether this event is visible to the environment of a process.  ✔ is visible; τ is
    /// not.
    pub fn is_visible(self) -> bool {
        self != Event::tau()
    }
}

impl std::fmt::Debug for Event {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "Event({})", self.0)
    }
}

/// The table that maps event names to their interned identifiers.  The environment owns exactly
/// one of these; the identities of `none`, τ, and ✔ are fixed when the table is created.
#[derive(Debug)]
pub(crate) struct EventTable {
    names: Vec<String>,
    indices: HashMap<String, u32>,
}

impl EventTable {
    pub(crate) fn new() -> EventTable {
        let mut table = EventTable {
            names: Vec::new(),
            indices: HashMap::new(),
        };
        table.intern("<none>");
        table.intern("τ");
        table.intern("✔");
        table
    }

    /// Returns the unique identifier for the event with the given name, interning the name if we
    /// haven't seen it before.  Names are compared by bytes; lookups never fail.
    pub(crate) fn intern(&mut self, name: &str) -> Event {
        if let Some(index) = self.indices.get(name) {
            return Event(*index);
        }
        let index = self.names.len() as u32;
        self.names.push(name.to_string());
        self.indices.insert(name.to_string(), index);
        Event(index)
    }

    pub(crate) fn name(&self, event: Event) -> &str {
        &self.names[event.0 as usize]
    }
}

/// A set of events, ordered by event identifier.
#[derive(Clone, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct EventSet(BTreeSet<Event>);

impl EventSet {
    pub fn new() -> EventSet {
        EventSet(BTreeSet::new())
    }

    pub fn insert(&mut self, event: Event) -> bool {
        self.0.insert(event)
    }

    pub fn remove(&mut self, event: Event) -> bool {
        self.0.remove(&event)
    }

    pub fn contains(&self, event: Event) -> bool {
        self.0.contains(&event)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_subset(&self, other: &EventSet) -> bool {
        self.0.is_subset(&other.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = Event> + '_ {
        self.0.iter().copied()
    }
}

impl Extend<Event> for EventSet {
    fn extend<I: IntoIterator<Item = Event>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

impl FromIterator<Event> for EventSet {
    fn from_iter<I: IntoIterator<Item = Event>>(iter: I) -> EventSet {
        EventSet(iter.into_iter().collect())
    }
}

impl IntoIterator for EventSet {
    type Item = Event;
    type IntoIter = btree_set::IntoIter<Event>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
