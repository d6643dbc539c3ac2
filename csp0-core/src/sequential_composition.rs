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

//! Defines the sequential composition (`;`) operator.

use crate::environment::Environment;
use crate::event::Event;
use crate::event::EventSet;
use crate::process::ProcessNode;
use crate::process::ProcessRef;
use crate::process::ProcessSet;

impl Environment {
    /// Constructs a new _sequential composition_ process `P ; Q`.  This process behaves like `P`
    /// until `P` terminates, and then behaves like `Q`.
    pub fn sequential_composition(&mut self, p: ProcessRef, q: ProcessRef) -> ProcessRef {
        self.register(ProcessNode::SequentialComposition(p, q))
    }
}

// Operational semantics for P ; Q
//
//        P -a→ P'
// 1)  ────────────── a ≠ ✔
//      P;Q -a→ P';Q
//
//     ∃ P' • P -✔→ P'
// 2) ─────────────────
//       P;Q -τ→ Q

pub(crate) fn initials(env: &Environment, p: ProcessRef) -> EventSet {
    // 1) P;Q can perform all of the same events as P, except for ✔.
    // 2) If P can perform ✔, then P;Q can perform τ.
    //
    // initials(P;Q) = initials(P) ∖ {✔}                                           [rule 1]
    //               ∪ (✔ ∈ initials(P)? {τ}: {})                                  [rule 2]
    let mut initials = EventSet::new();
    for initial in env.initials(p).iter() {
        if initial == Event::tick() {
            initials.insert(Event::tau());
        } else {
            initials.insert(initial);
        }
    }
    initials
}

pub(crate) fn afters(
    env: &mut Environment,
    p: ProcessRef,
    q: ProcessRef,
    initial: Event,
) -> ProcessSet {
    // afters(P;Q, a ≠ ✔) = { P';Q | P' ∈ afters(P, a) }                           [rule 1]
    // afters(P;Q, τ) also includes Q if ✔ ∈ initials(P)                           [rule 2]
    // afters(P;Q, ✔) = {}
    //
    // The composition can never perform a ✔ itself; P's ✔ is translated into the τ that hands
    // control over to Q.
    let mut afters = ProcessSet::new();
    if initial == Event::tick() {
        return afters;
    }

    for p_prime in env.afters(p, initial) {
        afters.insert(env.sequential_composition(p_prime, q));
    }

    if initial == Event::tau() && env.initials(p).contains(Event::tick()) {
        afters.insert(q);
    }
    afters
}
