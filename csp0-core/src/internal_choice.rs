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

//! Defines the internal choice (`⊓`) operator.

use crate::environment::Environment;
use crate::event::Event;
use crate::event::EventSet;
use crate::process::ProcessNode;
use crate::process::ProcessRef;
use crate::process::ProcessSet;

impl Environment {
    /// Constructs a new _internal choice_ process `P ⊓ Q`.  This process behaves either like `P`
    /// or like `Q`, and the environment gets no say in which.
    pub fn internal_choice(&mut self, p: ProcessRef, q: ProcessRef) -> ProcessRef {
        self.replicated_internal_choice(vec![p, q])
    }

    /// Constructs a new _replicated internal choice_ process `⊓ Ps` over any number of processes.
    pub fn replicated_internal_choice<I>(&mut self, ps: I) -> ProcessRef
    where
        I: IntoIterator<Item = ProcessRef>,
    {
        let ps: ProcessSet = ps.into_iter().collect();
        self.register(ProcessNode::InternalChoice(ps))
    }
}

// Operational semantics for ⊓ Ps
//
// 1) ──────────── P ∈ Ps
//     ⊓ Ps -τ→ P

pub(crate) fn initials(_ps: &ProcessSet) -> EventSet {
    // initials(⊓ Ps) = {τ}
    let mut initials = EventSet::new();
    initials.insert(Event::tau());
    initials
}

pub(crate) fn afters(ps: &ProcessSet, initial: Event) -> ProcessSet {
    // afters(⊓ Ps, τ) = Ps
    if initial == Event::tau() {
        ps.clone()
    } else {
        ProcessSet::new()
    }
}

#[cfg(test)]
mod internal_choice_tests {
    use maplit::hashset;

    use crate::maximal_traces::maximal_finite_traces;
    use crate::Environment;
    use crate::Event;

    #[test]
    fn check_internal_choice_transitions() {
        let mut env = Environment::new();
        let a = env.event("a");
        let b = env.event("b");
        let stop = env.stop();
        let p = env.prefix(a, stop);
        let q = env.prefix(b, stop);
        let process = env.internal_choice(p, q);

        let initials: Vec<_> = env.initials(process).iter().collect();
        assert_eq!(initials, vec![Event::tau()]);
        let expected: crate::ProcessSet = vec![p, q].into_iter().collect();
        assert_eq!(env.afters(process, Event::tau()), expected);
        assert!(env.afters(process, a).is_empty());
        assert!(env.afters(process, b).is_empty());
    }

    #[test]
    fn check_internal_choice_traces() {
        let mut env = Environment::new();
        let a = env.event("a");
        let b = env.event("b");
        let stop = env.stop();
        let p = env.prefix(a, stop);
        let q = env.prefix(b, stop);
        let process = env.internal_choice(p, q);
        assert_eq!(
            maximal_finite_traces(&mut env, process),
            hashset! {vec![a], vec![b]}
        );
    }

    // The replicated choice over the empty set still offers τ; it just doesn't go anywhere.
    #[test]
    fn check_empty_internal_choice() {
        let mut env = Environment::new();
        let process = env.replicated_internal_choice(vec![]);
        let initials: Vec<_> = env.initials(process).iter().collect();
        assert_eq!(initials, vec![Event::tau()]);
        assert!(env.afters(process, Event::tau()).is_empty());
        assert_eq!(maximal_finite_traces(&mut env, process), hashset! {vec![]});
    }
}
