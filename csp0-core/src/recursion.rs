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

//! Defines recursive (and possibly mutually recursive) processes.

use std::collections::BTreeSet;

use crate::environment::Environment;
use crate::event::Event;
use crate::event::EventSet;
use crate::process::ProcessNode;
use crate::process::ProcessRef;
use crate::process::ProcessSet;
use crate::traversal;

/// Identifies one recursion scope within an environment.  The scope id is part of the identity of
/// every recursive process created in the scope, so same-named processes from different `let`s
/// never collide.
pub type ScopeId = u32;

/// A recursion scope is the main building block that you need to create mutually recursive
/// processes.  You can create one or more recursion targets within the scope, each of which maps
/// a name to a process.  But importantly, you don't have to know in advance which process you're
/// going to map each name to.  That lets you define a name for a process, and then use that same
/// name in the definition of the process.  Presto, recursion!
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct RecursionScope {
    id: ScopeId,
}

impl Environment {
    /// Creates a new recursion scope with a fresh id.
    pub fn recursion_scope(&mut self) -> RecursionScope {
        RecursionScope {
            id: self.fresh_scope_id(),
        }
    }

    /// Returns the recursive process named `name` in scope `scope`, creating it (unfilled) if it
    /// doesn't already exist.
    pub fn recursive_process(&mut self, scope: ScopeId, name: &str) -> ProcessRef {
        self.register(ProcessNode::Recursive {
            scope,
            name: name.to_string(),
        })
    }

    /// Fills a recursive process with its definition.  Each recursive process is filled exactly
    /// once; filling it twice, or filling something that isn't a recursive process, is a
    /// programmer error.
    pub fn fill(&mut self, process: ProcessRef, definition: ProcessRef) {
        match self.node(process) {
            ProcessNode::Recursive { .. } => {}
            _ => panic!("cannot fill non-recursive process {}", self.display(process)),
        }
        self.record_definition(process, definition);
    }

    /// Returns whether a recursive process has been given its definition yet.
    pub fn filled(&self, process: ProcessRef) -> bool {
        self.definition(process).is_some()
    }

    /// Registers `name` in `scope` and returns its recursive process.
    pub(crate) fn scope_add(&mut self, scope: ScopeId, name: &str) -> ProcessRef {
        self.record_scope_name(scope, name);
        self.recursive_process(scope, name)
    }
}

impl RecursionScope {
    pub fn id(&self) -> ScopeId {
        self.id
    }

    /// Returns the recursive process for `name` in this scope, creating it if this is the first
    /// time the name has been mentioned.  Calling this again with the same name returns the same
    /// process.
    pub fn add(&self, env: &mut Environment, name: &str) -> ProcessRef {
        env.scope_add(self.id, name)
    }

    /// Returns the names of any recursive processes in this scope that haven't been filled.
    pub fn unfilled(&self, env: &Environment) -> Vec<String> {
        let mut unfilled = Vec::new();
        for name in env.scope_names(self.id) {
            let process = match env.lookup_recursive(self.id, name) {
                Some(process) => process,
                None => continue,
            };
            if !env.filled(process) {
                unfilled.push(name.clone());
            }
        }
        unfilled
    }
}

impl Environment {
    fn lookup_recursive(&self, scope: ScopeId, name: &str) -> Option<ProcessRef> {
        // Names recorded in a scope were created through `register`, so reconstructing the node
        // is a pure lookup.
        let node = ProcessNode::Recursive {
            scope,
            name: name.to_string(),
        };
        self.lookup(&node)
    }
}

// A recursive process simply delegates to its definition.  Looking at the transitions of an
// unfilled process is a programmer error.

fn expect_definition(env: &Environment, process: ProcessRef) -> ProcessRef {
    env.definition(process).unwrap_or_else(|| {
        let (scope, name) = match env.node(process) {
            ProcessNode::Recursive { scope, name } => (*scope, name.clone()),
            _ => unreachable!(),
        };
        panic!("recursive process {}@{} has not been filled", name, scope)
    })
}

pub(crate) fn initials(env: &Environment, process: ProcessRef) -> EventSet {
    env.initials(expect_definition(env, process))
}

pub(crate) fn afters(env: &mut Environment, process: ProcessRef, initial: Event) -> ProcessSet {
    let definition = expect_definition(env, process);
    env.afters(definition, initial)
}

pub(crate) fn subprocesses(env: &Environment, process: ProcessRef) -> ProcessSet {
    std::iter::once(expect_definition(env, process)).collect()
}

/// Prints the `let` statement that introduces `process` and everything mutually recursive with
/// it.  A quick syntactic search finds the cluster; the definitions are then printed in
/// construction order with `print_body` (which renders recursive references as `name@scope`).
pub(crate) fn print_cluster(
    env: &Environment,
    f: &mut std::fmt::Formatter,
    process: ProcessRef,
    print_body: impl Fn(&Environment, &mut std::fmt::Formatter, ProcessRef) -> std::fmt::Result,
) -> std::fmt::Result {
    let mut cluster = BTreeSet::new();
    traversal::bfs_syntactic(env, process, |env, subprocess| {
        if let ProcessNode::Recursive { .. } = env.node(subprocess) {
            cluster.insert(subprocess);
        }
        true
    });

    f.write_str("let")?;
    for member in &cluster {
        let name = match env.node(*member) {
            ProcessNode::Recursive { name, .. } => name,
            _ => unreachable!(),
        };
        write!(f, " {}=", name)?;
        print_body(env, f, expect_definition(env, *member))?;
    }
    f.write_str(" within ")?;
    print_body(env, f, process)
}

#[cfg(test)]
mod recursion_tests {
    use maplit::hashset;

    use crate::maximal_traces::maximal_finite_traces;
    use crate::test_support::require_csp0;
    use crate::Environment;
    use crate::ProcessSet;

    #[test]
    fn add_returns_the_same_process_for_a_name() {
        let mut env = Environment::new();
        let scope = env.recursion_scope();
        let first = scope.add(&mut env, "X");
        let second = scope.add(&mut env, "X");
        assert_eq!(first, second);
    }

    #[test]
    fn scopes_do_not_share_names() {
        let mut env = Environment::new();
        let scope1 = env.recursion_scope();
        let scope2 = env.recursion_scope();
        let x1 = scope1.add(&mut env, "X");
        let x2 = scope2.add(&mut env, "X");
        assert_ne!(x1, x2);
    }

    #[test]
    fn unfilled_names_are_reported() {
        let mut env = Environment::new();
        let scope = env.recursion_scope();
        let x = scope.add(&mut env, "X");
        scope.add(&mut env, "Y");
        let stop = env.stop();
        env.fill(x, stop);
        assert_eq!(scope.unfilled(&env), vec!["Y".to_string()]);
    }

    #[test]
    fn filled_process_delegates_to_its_definition() {
        let mut env = Environment::new();
        let a = env.event("a");
        let scope = env.recursion_scope();
        let x = scope.add(&mut env, "X");
        let body = env.prefix(a, x);
        env.fill(x, body);
        let initials: Vec<_> = env.initials(x).iter().collect();
        assert_eq!(initials, vec![a]);
        assert_eq!(env.afters(x, a), std::iter::once(x).collect());
    }

    #[test]
    #[should_panic(expected = "filled twice")]
    fn cannot_fill_twice() {
        let mut env = Environment::new();
        let scope = env.recursion_scope();
        let x = scope.add(&mut env, "X");
        let stop = env.stop();
        env.fill(x, stop);
        let skip = env.skip();
        env.fill(x, skip);
    }

    #[test]
    #[should_panic(expected = "has not been filled")]
    fn cannot_observe_unfilled_process() {
        let mut env = Environment::new();
        let scope = env.recursion_scope();
        let x = scope.add(&mut env, "X");
        env.initials(x);
    }

    // let X = a → Y; Y = b → X within X reaches exactly two states, even though its trace set is
    // infinite.
    #[test]
    fn mutual_recursion_reaches_finitely_many_states() {
        let mut env = Environment::new();
        let root = require_csp0(&mut env, "let X = a → Y; Y = b → X within X");
        let x = env.recursive_process(0, "X");
        let y = env.recursive_process(0, "Y");

        let mut reachable = ProcessSet::new();
        crate::traversal::bfs(&mut env, root, |_, process| {
            reachable.insert(process);
            true
        });
        let expected: ProcessSet = vec![x, y].into_iter().collect();
        assert_eq!(reachable, expected);
    }

    #[test]
    fn recursive_traces_are_cut_at_the_repeat() {
        let mut env = Environment::new();
        let root = require_csp0(&mut env, "let X = a → Y; Y = b → X within X");
        let a = env.event("a");
        let b = env.event("b");
        assert_eq!(maximal_finite_traces(&mut env, root), hashset! {vec![a, b]});
    }
}
