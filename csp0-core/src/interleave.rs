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

//! Defines the interleaving (`⫴`) operator.

use crate::environment::Environment;
use crate::event::Event;
use crate::event::EventSet;
use crate::process::ProcessBag;
use crate::process::ProcessNode;
use crate::process::ProcessRef;
use crate::process::ProcessSet;

impl Environment {
    /// Constructs a new _interleaving_ process `P ⫴ Q`.  The two processes run independently of
    /// each other, synchronizing only on termination.
    pub fn interleave(&mut self, p: ProcessRef, q: ProcessRef) -> ProcessRef {
        self.replicated_interleave(vec![p, q])
    }

    /// Constructs a new _replicated interleaving_ process `⫴ Ps` over a bag of processes.  Note
    /// that this is a bag and not a set; `⫴ {P, P}` has two copies of `P` to run, not one.
    pub fn replicated_interleave<I>(&mut self, ps: I) -> ProcessRef
    where
        I: IntoIterator<Item = ProcessRef>,
    {
        let ps: ProcessBag = ps.into_iter().collect();
        self.register(ProcessNode::Interleave(ps))
    }
}

// Operational semantics for ⫴ Ps
//
//                  P -τ→ P'
//  1)  ────────────────────────────── P ∈ Ps
//       ⫴ Ps -τ→ ⫴ (Ps ∖ {P} ∪ {P'})
//
//                  P -a→ P'
//  2)  ────────────────────────────── P ∈ Ps, a ∉ {τ,✔}
//       ⫴ Ps -a→ ⫴ (Ps ∖ {P} ∪ {P'})
//
//                  P -✔→ P'
//  3)  ─────────────────────────────── P ∈ Ps
//       ⫴ Ps -τ→ ⫴ (Ps ∖ {P} ∪ {Ω})
//
//  4)  ──────────────── ∀ P ∈ Ps • initials(P) = {}
//         ⫴ Ps -✔→ Ω
//
// A ✔ never escapes from a single branch; it becomes a τ that retires the branch to Ω.  Only
// once no branch can do anything at all does the whole interleaving perform ✔ itself.

fn ticks(env: &Environment, p: ProcessRef) -> bool {
    env.initials(p).contains(Event::tick())
}

pub(crate) fn initials(env: &Environment, ps: &ProcessBag) -> EventSet {
    // initials(⫴ Ps) = ⋃ { initials(P) ∩ {τ} | P ∈ Ps }                           [rule 1]
    //                ∪ ⋃ { initials(P) ∖ {τ,✔} | P ∈ Ps }                         [rule 2]
    //                ∪ ⋃ { (✔ ∈ initials(P)? {τ}: {}) | P ∈ Ps }                  [rule 3]
    //                ∪ (∀ P • initials(P) = {}? {✔}: {})                          [rule 4]
    let mut any_events = false;
    let mut initials = EventSet::new();
    for p in ps.distinct() {
        for initial in env.initials(p).iter() {
            any_events = true;
            if initial == Event::tick() {
                initials.insert(Event::tau());
            } else {
                initials.insert(initial);
            }
        }
    }
    if !any_events {
        initials.insert(Event::tick());
    }
    initials
}

pub(crate) fn afters(env: &mut Environment, ps: &ProcessBag, initial: Event) -> ProcessSet {
    if initial == Event::tau() {
        tau_afters(env, ps)
    } else if initial == Event::tick() {
        tick_afters(env, ps)
    } else {
        normal_afters(env, ps, initial)
    }
}

fn normal_afters(env: &mut Environment, ps: &ProcessBag, initial: Event) -> ProcessSet {
    // afters(⫴ Ps, a ∉ {τ,✔}) = ⋃ { ⫴ Ps ∖ {P} ∪ {P'} | P ∈ Ps, P' ∈ afters(P, a) }
    //                                                                             [rule 2]
    let mut afters = ProcessSet::new();
    for p in ps.distinct() {
        for p_prime in env.afters(p, initial) {
            let mut ps_prime = ps.clone();
            ps_prime.remove(p);
            ps_prime.insert(p_prime);
            afters.insert(env.register(ProcessNode::Interleave(ps_prime)));
        }
    }
    afters
}

fn tau_afters(env: &mut Environment, ps: &ProcessBag) -> ProcessSet {
    // afters(⫴ Ps, τ) = ⋃ { ⫴ Ps ∖ {P} ∪ {P'} | P ∈ Ps, P' ∈ afters(P, τ) }       [rule 1]
    //                 ∪ ⋃ { ⫴ Ps ∖ {P} ∪ {Ω} | P ∈ Ps, ✔ ∈ initials(P) }          [rule 3]
    // Rule 1 has the same shape as rule 2.
    let mut afters = normal_afters(env, ps, Event::tau());
    for p in ps.distinct() {
        if ticks(env, p) {
            let mut ps_prime = ps.clone();
            ps_prime.remove(p);
            ps_prime.insert(env.omega());
            afters.insert(env.register(ProcessNode::Interleave(ps_prime)));
        }
    }
    afters
}

fn tick_afters(env: &mut Environment, ps: &ProcessBag) -> ProcessSet {
    // afters(⫴ Ps, ✔) = {Ω} if no P ∈ Ps has any initials at all                  [rule 4]
    let mut afters = ProcessSet::new();
    for p in ps.distinct() {
        if !env.initials(p).is_empty() {
            return afters;
        }
    }
    afters.insert(env.omega());
    afters
}
