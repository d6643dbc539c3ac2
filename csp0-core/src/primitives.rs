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

//! Defines the primitive processes STOP, SKIP, and Ω.

use crate::environment::Environment;
use crate::event::Event;
use crate::event::EventSet;
use crate::process::ProcessSet;

// Operational semantics
//
// 1) ──────────────
//     SKIP -✔→ Ω
//
// STOP and Ω have no outgoing transitions.  They are distinct processes even so: STOP is
// deadlock, while Ω is what's left of a process after it has terminated successfully.

pub(crate) fn stop_initials() -> EventSet {
    EventSet::new()
}

pub(crate) fn stop_afters() -> ProcessSet {
    ProcessSet::new()
}

pub(crate) fn skip_initials() -> EventSet {
    let mut initials = EventSet::new();
    initials.insert(Event::tick());
    initials
}

pub(crate) fn skip_afters(env: &Environment, initial: Event) -> ProcessSet {
    let mut afters = ProcessSet::new();
    if initial == Event::tick() {
        afters.insert(env.omega());
    }
    afters
}

pub(crate) fn omega_initials() -> EventSet {
    EventSet::new()
}

pub(crate) fn omega_afters() -> ProcessSet {
    ProcessSet::new()
}
