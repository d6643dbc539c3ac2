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

//! Defines the external choice (`□`) operator.

use crate::environment::Environment;
use crate::event::Event;
use crate::event::EventSet;
use crate::process::ProcessNode;
use crate::process::ProcessRef;
use crate::process::ProcessSet;

impl Environment {
    /// Constructs a new _external choice_ process `P □ Q`.  This process behaves either like `P`
    /// or like `Q`; the environment resolves the choice by whichever visible event it
    /// communicates first.
    pub fn external_choice(&mut self, p: ProcessRef, q: ProcessRef) -> ProcessRef {
        self.replicated_external_choice(vec![p, q])
    }

    /// Constructs a new _replicated external choice_ process `□ Ps` over any number of
    /// processes.  The choice over no processes at all is legal, and behaves like STOP.
    pub fn replicated_external_choice<I>(&mut self, ps: I) -> ProcessRef
    where
        I: IntoIterator<Item = ProcessRef>,
    {
        let ps: ProcessSet = ps.into_iter().collect();
        self.register(ProcessNode::ExternalChoice(ps))
    }
}

// Operational semantics for □ Ps
//
//                  P -τ→ P'
//  1)  ────────────────────────────── P ∈ Ps
//       □ Ps -τ→ □ (Ps ∖ {P} ∪ {P'})
//
//         P -a→ P'
//  2)  ───────────── P ∈ Ps, a ≠ τ
//       □ Ps -a→ P'

pub(crate) fn initials(env: &Environment, ps: &ProcessSet) -> EventSet {
    // 1) If P ∈ Ps can perform τ, then □ Ps can perform τ.
    // 2) If P ∈ Ps can perform a ≠ τ, then □ Ps can perform a ≠ τ.
    //
    // initials(□ Ps) = ⋃ { initials(P) | P ∈ Ps }
    let mut initials = EventSet::new();
    for p in ps.iter() {
        initials.extend(env.initials(p).iter());
    }
    initials
}

pub(crate) fn afters(env: &mut Environment, ps: &ProcessSet, initial: Event) -> ProcessSet {
    // afters(□ Ps, τ) = ⋃ { □ Ps ∖ {P} ∪ {P'} | P ∈ Ps, P' ∈ afters(P, τ) }       [rule 1]
    // afters(□ Ps, a ≠ τ) = ⋃ { P' | P ∈ Ps, P' ∈ afters(P, a) }                  [rule 2]
    let mut afters = ProcessSet::new();
    if initial == Event::tau() {
        // A τ advances the process that performed it in place; the other members of the choice
        // stick around unchanged.
        for p in ps.iter() {
            for p_prime in env.afters(p, initial) {
                let mut ps_prime = ps.clone();
                ps_prime.remove(p);
                ps_prime.insert(p_prime);
                afters.insert(env.register(ProcessNode::ExternalChoice(ps_prime)));
            }
        }
    } else {
        // A visible event resolves the choice, discarding the members that didn't perform it.
        for p in ps.iter() {
            afters.extend(env.afters(p, initial));
        }
    }
    afters
}

#[cfg(test)]
mod external_choice_tests {
    use maplit::hashset;

    use crate::maximal_traces::maximal_finite_traces;
    use crate::test_support::require_csp0;
    use crate::Environment;
    use crate::Event;
    use crate::ProcessSet;

    #[test]
    fn check_empty_external_choice() {
        let mut env = Environment::new();
        let process = env.replicated_external_choice(vec![]);
        assert!(env.initials(process).is_empty());
        assert_eq!(maximal_finite_traces(&mut env, process), hashset! {vec![]});
    }

    #[test]
    fn check_stop_choice() {
        let mut env = Environment::new();
        let a = env.event("a");
        let stop = env.stop();
        let process = env.external_choice(stop, stop);
        assert!(env.initials(process).is_empty());
        assert!(env.afters(process, a).is_empty());
    }

    #[test]
    fn check_visible_choice() {
        let mut env = Environment::new();
        let a = env.event("a");
        let b = env.event("b");
        let stop = env.stop();
        let p = env.prefix(a, stop);
        let q = env.prefix(b, stop);
        let process = env.external_choice(p, q);
        let initials: Vec<_> = env.initials(process).iter().collect();
        assert_eq!(initials, vec![a, b]);
        assert_eq!(env.afters(process, a), std::iter::once(stop).collect());
        assert_eq!(env.afters(process, b), std::iter::once(stop).collect());
        assert!(env.afters(process, Event::tau()).is_empty());
        assert_eq!(
            maximal_finite_traces(&mut env, process),
            hashset! {vec![a], vec![b]}
        );
    }

    #[test]
    fn check_replicated_choice() {
        let mut env = Environment::new();
        let a = env.event("a");
        let b = env.event("b");
        let c = env.event("c");
        let stop = env.stop();
        let p1 = env.prefix(a, stop);
        let p2 = env.prefix(b, stop);
        let p3 = env.prefix(c, stop);
        let process = env.replicated_external_choice(vec![p1, p2, p3]);
        let initials: Vec<_> = env.initials(process).iter().collect();
        assert_eq!(initials, vec![a, b, c]);
        assert_eq!(env.afters(process, c), std::iter::once(stop).collect());
    }

    // (a → STOP) □ (b → STOP ⊓ c → STOP): a τ on the right-hand side advances the internal
    // choice in place without resolving the external choice.
    #[test]
    fn tau_advances_a_member_in_place() {
        let mut env = Environment::new();
        let root = require_csp0(&mut env, "(a → STOP) □ (b → STOP ⊓ c → STOP)");
        let a = env.event("a");

        let expected_initials: Vec<_> = env.initials(root).iter().collect();
        assert_eq!(expected_initials, vec![Event::tau(), a]);

        let resolved_b = require_csp0(&mut env, "a → STOP □ b → STOP");
        let resolved_c = require_csp0(&mut env, "a → STOP □ c → STOP");
        let tau_afters = env.afters(root, Event::tau());
        let expected: ProcessSet = vec![resolved_b, resolved_c].into_iter().collect();
        assert_eq!(tau_afters, expected);
    }

    #[test]
    fn check_reachable_states() {
        let mut env = Environment::new();
        let root = require_csp0(&mut env, "(a → STOP) □ (b → STOP ⊓ c → STOP)");
        let resolved_b = require_csp0(&mut env, "a → STOP □ b → STOP");
        let resolved_c = require_csp0(&mut env, "a → STOP □ c → STOP");
        let stop = env.stop();

        let mut reachable = ProcessSet::new();
        crate::traversal::bfs(&mut env, root, |_, process| {
            reachable.insert(process);
            true
        });
        let expected: ProcessSet = vec![root, resolved_b, resolved_c, stop]
            .into_iter()
            .collect();
        assert_eq!(reachable, expected);
    }

    #[test]
    fn check_nondeterministic_choice_traces() {
        let mut env = Environment::new();
        let root = require_csp0(&mut env, "(a → STOP) □ (b → STOP ⊓ c → STOP)");
        let a = env.event("a");
        let b = env.event("b");
        let c = env.event("c");
        assert_eq!(
            maximal_finite_traces(&mut env, root),
            hashset! {vec![a], vec![b], vec![c]}
        );
    }
}
