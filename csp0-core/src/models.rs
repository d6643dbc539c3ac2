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

//! Defines the different semantic models that you can use to interpret a CSP process.

use std::hash::Hash;

use crate::environment::Environment;
use crate::event::EventSet;
use crate::process::ProcessRef;
use crate::process::ProcessSet;

/// A semantic model of CSP.  Each semantic model defines its own _behavior_ type — the set of
/// information that fully describes what a process is doing in this model.  Normalization uses
/// behaviors to decide which states can be merged; refinement uses them to decide whether an
/// implementation state is allowed by a specification state.
pub trait SemanticModel {
    type Behavior: Behavior + Clone + Eq + Hash;

    /// The short tag for this model, e.g. `T`.
    fn abbreviation() -> &'static str;

    /// The full name of this model, e.g. `traces`.
    fn name() -> &'static str;

    /// Returns the behavior of a single process in this semantic model.
    fn process_behavior(env: &Environment, process: ProcessRef) -> Self::Behavior;

    /// Returns the combined behavior of a set of processes in this semantic model.
    fn process_set_behavior(env: &Environment, processes: &ProcessSet) -> Self::Behavior;
}

/// The behavior of a process under a particular semantic model.  The only operation that all
/// models have in common is whether one behavior is a _refinement_ of another.
pub trait Behavior {
    /// Returns whether `impl_` is allowed by this (specification) behavior.
    fn refined_by(&self, impl_: &Self) -> bool;
}

//-------------------------------------------------------------------------------------------------
// Traces

/// In the traces model, the behavior of a process is the set of non-τ events that it can
/// perform.
pub struct Traces;

impl SemanticModel for Traces {
    type Behavior = EventSet;

    fn abbreviation() -> &'static str {
        "T"
    }

    fn name() -> &'static str {
        "traces"
    }

    fn process_behavior(env: &Environment, process: ProcessRef) -> EventSet {
        env.initials(process)
            .iter()
            .filter(|initial| initial.is_visible())
            .collect()
    }

    fn process_set_behavior(env: &Environment, processes: &ProcessSet) -> EventSet {
        let mut behavior = EventSet::new();
        for process in processes.iter() {
            behavior.extend(
                env.initials(process)
                    .iter()
                    .filter(|initial| initial.is_visible()),
            );
        }
        behavior
    }
}

impl Behavior for EventSet {
    fn refined_by(&self, impl_: &EventSet) -> bool {
        // Anything the implementation can do immediately, the specification must also offer.
        impl_.is_subset(self)
    }
}

#[cfg(test)]
mod traces_tests {
    use super::*;

    use crate::test_support::require_csp0;
    use crate::Event;

    #[test]
    fn behavior_is_the_visible_initials() {
        let mut env = Environment::new();
        let process = require_csp0(&mut env, "a → STOP □ (b → STOP ⊓ c → STOP)");
        let a = env.event("a");
        let behavior = Traces::process_behavior(&env, process);
        let expected: EventSet = std::iter::once(a).collect();
        assert_eq!(behavior, expected);
        assert!(!behavior.contains(Event::tau()));
    }

    #[test]
    fn set_behavior_is_the_union() {
        let mut env = Environment::new();
        let p = require_csp0(&mut env, "a → STOP");
        let q = require_csp0(&mut env, "b → SKIP");
        let a = env.event("a");
        let b = env.event("b");
        let processes: ProcessSet = vec![p, q].into_iter().collect();
        let behavior = Traces::process_set_behavior(&env, &processes);
        let expected: EventSet = vec![a, b].into_iter().collect();
        assert_eq!(behavior, expected);
    }

    #[test]
    fn refinement_is_subset() {
        let mut env = Environment::new();
        let a = env.event("a");
        let b = env.event("b");
        let spec: EventSet = vec![a, b].into_iter().collect();
        let smaller: EventSet = std::iter::once(a).collect();
        let larger: EventSet = vec![a, b, env.event("c")].into_iter().collect();
        assert!(spec.refined_by(&smaller));
        assert!(spec.refined_by(&spec.clone()));
        assert!(!spec.refined_by(&larger));
        assert!(!smaller.refined_by(&spec));
    }

    #[test]
    fn refinement_is_reflexive() {
        let mut env = Environment::new();
        let process = require_csp0(&mut env, "a → STOP □ b → SKIP");
        let behavior = Traces::process_behavior(&env, process);
        assert!(behavior.refined_by(&behavior));
    }
}
