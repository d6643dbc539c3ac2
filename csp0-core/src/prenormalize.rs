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

//! Defines prenormalized processes: a deterministic, τ-free view of a process obtained by subset
//! construction over τ-closed sets of states.

use crate::environment::Environment;
use crate::event::Event;
use crate::event::EventSet;
use crate::process::ProcessNode;
use crate::process::ProcessRef;
use crate::process::ProcessSet;
use crate::traversal;

impl Environment {
    /// Prenormalizes a single process.
    pub fn prenormalize(&mut self, process: ProcessRef) -> ProcessRef {
        self.prenormalize_set(std::iter::once(process).collect())
    }

    /// Prenormalizes a set of processes.  The payload of the resulting process is the τ-closure
    /// of the set: every state the underlying processes might silently be in.
    pub fn prenormalize_set(&mut self, mut processes: ProcessSet) -> ProcessRef {
        traversal::tau_close(self, &mut processes);
        self.register(ProcessNode::Prenormalized(processes))
    }

    /// Returns the single process that a prenormalized process moves to after `initial`, or None
    /// if the underlying processes can't perform it.  Prenormalized processes never perform τ.
    pub fn prenormalized_after(
        &mut self,
        process: ProcessRef,
        initial: Event,
    ) -> Option<ProcessRef> {
        let ps = match self.node(process) {
            ProcessNode::Prenormalized(ps) => ps.clone(),
            _ => panic!("{} is not prenormalized", self.display(process)),
        };
        if initial == Event::tau() {
            return None;
        }

        // Find the set of processes that you could end up in by starting in one of our
        // underlying processes and following a single `initial` event.
        let mut afters = ProcessSet::new();
        for p in ps.iter() {
            afters.extend(self.afters(p, initial));
        }
        if afters.is_empty() {
            return None;
        }

        // A prenormalized process can only have one `after` for any event, so merge everything
        // we found into a single prenormalized process.
        Some(self.prenormalize_set(afters))
    }

    /// Returns the set of non-prenormalized processes that a prenormalized or normalized process
    /// represents.
    pub fn expand(&self, process: ProcessRef) -> ProcessSet {
        match self.node(process) {
            ProcessNode::Prenormalized(ps) => ps.clone(),
            ProcessNode::Normalized { .. } => crate::normalize::expand(self, process),
            _ => panic!("{} is not a normalized process", self.display(process)),
        }
    }
}

pub(crate) fn initials(env: &Environment, ps: &ProcessSet) -> EventSet {
    // All of the non-τ events that any of the underlying processes can perform.
    let mut initials = EventSet::new();
    for p in ps.iter() {
        initials.extend(env.initials(p).iter().filter(|initial| initial.is_visible()));
    }
    initials
}

pub(crate) fn afters(env: &mut Environment, process: ProcessRef, initial: Event) -> ProcessSet {
    env.prenormalized_after(process, initial).into_iter().collect()
}
