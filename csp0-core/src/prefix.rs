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

//! Defines the prefix (`→`) operator.

use crate::environment::Environment;
use crate::event::Event;
use crate::event::EventSet;
use crate::process::ProcessNode;
use crate::process::ProcessRef;
use crate::process::ProcessSet;

impl Environment {
    /// Constructs a new _prefix_ process `a → P`.  This process performs event `a` and then
    /// behaves like process `P`.
    pub fn prefix(&mut self, initial: Event, after: ProcessRef) -> ProcessRef {
        self.register(ProcessNode::Prefix(initial, after))
    }
}

// Operational semantics for a → P
//
// 1) ─────────────
//     a → P -a→ P

pub(crate) fn initials(initial: Event) -> EventSet {
    // initials(a → P) = {a}
    let mut initials = EventSet::new();
    initials.insert(initial);
    initials
}

pub(crate) fn afters(prefix_initial: Event, after: ProcessRef, initial: Event) -> ProcessSet {
    // afters(a → P, a) = {P}
    let mut afters = ProcessSet::new();
    if initial == prefix_initial {
        afters.insert(after);
    }
    afters
}
