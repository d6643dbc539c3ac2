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

//! Defines the environment that owns every process you create.

use std::collections::HashMap;

use crate::event::Event;
use crate::event::EventTable;
use crate::normalize::Equivalences;
use crate::process::ProcessNode;
use crate::process::ProcessRef;
use crate::recursion::ScopeId;

/// The sole owner and sole constructor of processes.  The environment is an arena: every process
/// lives in it for the environment's whole lifetime, and is identified by the [`ProcessRef`]
/// handed out at construction.
///
/// Construction is hash-consed.  Asking for a process with the same definition twice — even from
/// different call sites, even with set elements supplied in a different order — returns the same
/// reference both times, so reference equality is definition equality.  That's what makes it
/// cheap to take sets of processes as we explore a transition system.
///
/// [`ProcessRef`]: struct.ProcessRef.html
///
/// An environment is strictly single-threaded, and its memory grows monotonically: processes are
/// shared, immutable, and possibly cyclic, so nothing is ever reclaimed before the environment
/// itself goes away.
pub struct Environment {
    events: EventTable,
    nodes: Vec<ProcessNode>,
    index: HashMap<ProcessNode, ProcessRef>,
    /// The one-shot definitions of recursive processes, filled in when a `let` closes.
    definitions: HashMap<ProcessRef, ProcessRef>,
    /// The names created in each recursion scope, for the unfilled-name check.
    scope_names: HashMap<ScopeId, Vec<String>>,
    /// Bisimulation results, keyed by semantic model and prenormalized root, so that repeated
    /// normalizations of the same root share one equivalence table.
    equivalences: HashMap<(&'static str, ProcessRef), Equivalences>,
    next_scope_id: ScopeId,
    stop: ProcessRef,
    skip: ProcessRef,
    omega: ProcessRef,
}

impl Environment {
    pub fn new() -> Environment {
        let mut env = Environment {
            events: EventTable::new(),
            nodes: Vec::new(),
            index: HashMap::new(),
            definitions: HashMap::new(),
            scope_names: HashMap::new(),
            equivalences: HashMap::new(),
            next_scope_id: 0,
            stop: ProcessRef(0),
            skip: ProcessRef(0),
            omega: ProcessRef(0),
        };
        env.stop = env.register(ProcessNode::Stop);
        env.omega = env.register(ProcessNode::Omega);
        env.skip = env.register(ProcessNode::Skip);
        env
    }

    /// The process that performs no actions.
    pub fn stop(&self) -> ProcessRef {
        self.stop
    }

    /// The process that performs ✔ and then becomes Ω.
    pub fn skip(&self) -> ProcessRef {
        self.skip
    }

    /// The process that has already terminated successfully.  Distinct from STOP so that
    /// interleaving can tell "everyone has terminated" apart from deadlock.
    pub fn omega(&self) -> ProcessRef {
        self.omega
    }

    /// Returns the interned event with the given name, creating it if this environment hasn't
    /// seen the name before.
    pub fn event(&mut self, name: &str) -> Event {
        self.events.intern(name)
    }

    pub fn event_name(&self, event: Event) -> &str {
        self.events.name(event)
    }

    /// Ensures that there is exactly one process with this definition, returning its reference.
    pub(crate) fn register(&mut self, node: ProcessNode) -> ProcessRef {
        if let Some(existing) = self.index.get(&node) {
            return *existing;
        }
        let reference = ProcessRef(self.nodes.len() as u32);
        self.index.insert(node.clone(), reference);
        self.nodes.push(node);
        reference
    }

    pub(crate) fn node(&self, process: ProcessRef) -> &ProcessNode {
        &self.nodes[process.index()]
    }

    pub(crate) fn lookup(&self, node: &ProcessNode) -> Option<ProcessRef> {
        self.index.get(node).copied()
    }

    pub(crate) fn fresh_scope_id(&mut self) -> ScopeId {
        let id = self.next_scope_id;
        self.next_scope_id += 1;
        id
    }

    pub(crate) fn record_scope_name(&mut self, scope: ScopeId, name: &str) {
        let names = self.scope_names.entry(scope).or_insert_with(Vec::new);
        if !names.iter().any(|existing| existing == name) {
            names.push(name.to_string());
        }
    }

    pub(crate) fn scope_names(&self, scope: ScopeId) -> &[String] {
        self.scope_names
            .get(&scope)
            .map(|names| names.as_slice())
            .unwrap_or(&[])
    }

    pub(crate) fn definition(&self, process: ProcessRef) -> Option<ProcessRef> {
        self.definitions.get(&process).copied()
    }

    pub(crate) fn record_definition(&mut self, process: ProcessRef, definition: ProcessRef) {
        let previous = self.definitions.insert(process, definition);
        assert!(
            previous.is_none(),
            "recursive process {} filled twice",
            self.display(process)
        );
    }

    pub(crate) fn equivalences(&self, model: &'static str, root: ProcessRef) -> &Equivalences {
        self.equivalences
            .get(&(model, root))
            .unwrap_or_else(|| panic!("no normalization for {}", self.display(root)))
    }

    pub(crate) fn has_equivalences(&self, model: &'static str, root: ProcessRef) -> bool {
        self.equivalences.contains_key(&(model, root))
    }

    pub(crate) fn record_equivalences(
        &mut self,
        model: &'static str,
        root: ProcessRef,
        equivalences: Equivalences,
    ) {
        self.equivalences.insert((model, root), equivalences);
    }
}

impl Default for Environment {
    fn default() -> Environment {
        Environment::new()
    }
}

#[cfg(test)]
mod hash_consing_tests {
    use super::*;

    #[test]
    fn primitives_are_preallocated() {
        let env = Environment::new();
        assert_eq!(env.stop(), env.stop());
        assert_eq!(env.skip(), env.skip());
        assert_eq!(env.omega(), env.omega());
        assert_ne!(env.stop(), env.omega());
    }

    #[test]
    fn equal_definitions_share_a_reference() {
        let mut env = Environment::new();
        let a = env.event("a");
        let first = env.prefix(a, env.stop());
        let second = env.prefix(a, env.stop());
        assert_eq!(first, second);
    }

    #[test]
    fn distinct_definitions_get_distinct_references() {
        let mut env = Environment::new();
        let a = env.event("a");
        let b = env.event("b");
        let stop = env.stop();
        assert_ne!(env.prefix(a, stop), env.prefix(b, stop));
    }

    #[test]
    fn choice_sets_are_unordered() {
        let mut env = Environment::new();
        let a = env.event("a");
        let b = env.event("b");
        let stop = env.stop();
        let p = env.prefix(a, stop);
        let q = env.prefix(b, stop);
        assert_eq!(env.external_choice(p, q), env.external_choice(q, p));
        assert_eq!(env.internal_choice(p, q), env.internal_choice(q, p));
    }

    #[test]
    fn variants_with_equal_payloads_do_not_collide() {
        let mut env = Environment::new();
        let a = env.event("a");
        let b = env.event("b");
        let stop = env.stop();
        let p = env.prefix(a, stop);
        let q = env.prefix(b, stop);
        let external = env.external_choice(p, q);
        let internal = env.internal_choice(p, q);
        assert_ne!(external, internal);
    }

    #[test]
    fn interleave_multiplicity_matters() {
        let mut env = Environment::new();
        let a = env.event("a");
        let stop = env.stop();
        let p = env.prefix(a, stop);
        let once = env.replicated_interleave(vec![p]);
        let twice = env.replicated_interleave(vec![p, p]);
        assert_ne!(once, twice);
        let also_twice = env.interleave(p, p);
        assert_eq!(twice, also_twice);
    }

    #[test]
    fn scope_ids_are_fresh() {
        let mut env = Environment::new();
        let first = env.recursion_scope();
        let second = env.recursion_scope();
        assert_ne!(first.id(), second.id());
    }
}
