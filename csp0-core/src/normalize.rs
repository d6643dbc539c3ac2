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

//! Defines normalized processes — those in which we go through increasing lengths to collapse
//! identically behaving subprocesses together.  Normalization starts from a prenormalized root
//! and merges states by iterative bisimulation with respect to a semantic model.

use std::collections::BTreeSet;
use std::collections::HashMap;

use tracing::debug;

use crate::environment::Environment;
use crate::event::Event;
use crate::event::EventSet;
use crate::models::SemanticModel;
use crate::process::ProcessNode;
use crate::process::ProcessRef;
use crate::process::ProcessSet;
use crate::traversal;

/// One normalization's worth of equivalence classes: which class each prenormalized state
/// belongs to (named by the class's canonical head), and which states make up each class.
#[derive(Clone, Debug, Default)]
pub(crate) struct Equivalences {
    classes: HashMap<ProcessRef, ProcessRef>,
    members: HashMap<ProcessRef, BTreeSet<ProcessRef>>,
}

impl Equivalences {
    fn new() -> Equivalences {
        Equivalences::default()
    }

    fn add(&mut self, head: ProcessRef, process: ProcessRef) {
        self.classes.insert(process, head);
        self.members.entry(head).or_insert_with(BTreeSet::new).insert(process);
    }

    pub(crate) fn class_of(&self, process: ProcessRef) -> Option<ProcessRef> {
        self.classes.get(&process).copied()
    }

    pub(crate) fn members_of(&self, head: ProcessRef) -> &BTreeSet<ProcessRef> {
        self.members
            .get(&head)
            .unwrap_or_else(|| panic!("no equivalence class headed by {:?}", head))
    }

    fn heads(&self) -> Vec<ProcessRef> {
        let mut heads: Vec<_> = self.members.keys().copied().collect();
        heads.sort();
        heads
    }

    fn class_count(&self) -> usize {
        self.members.len()
    }
}

/// Partitions the prenormalized states reachable from `root` by their behavior in model `M`.
/// The first state we encounter with a given behavior becomes the head of its class.
fn initialize_bisimulation<M: SemanticModel>(
    env: &mut Environment,
    root: ProcessRef,
) -> Equivalences {
    let mut result = Equivalences::new();
    let mut behaviors: HashMap<M::Behavior, ProcessRef> = HashMap::new();
    traversal::bfs(env, root, |env, process| {
        let behavior = M::process_behavior(env, process);
        let head = *behaviors.entry(behavior).or_insert(process);
        result.add(head, process);
        true
    });
    result
}

/// Checks whether two states are shallowly equivalent: that is, whether they currently belong to
/// the same equivalence class.
fn shallow_equivalent(equivalences: &Equivalences, p1: ProcessRef, p2: ProcessRef) -> bool {
    equivalences.class_of(p1) == equivalences.class_of(p2)
}

/// Checks whether two states are deeply equivalent: every transition out of both leads to states
/// that are shallowly equivalent.
fn deep_equivalent(
    env: &mut Environment,
    equivalences: &Equivalences,
    p1: ProcessRef,
    p2: ProcessRef,
) -> bool {
    for initial in env.initials(p1).iter() {
        let after1 = env.prenormalized_after(p1, initial);
        let after2 = env.prenormalized_after(p2, initial);
        match (after1, after2) {
            (Some(after1), Some(after2)) => {
                if !shallow_equivalent(equivalences, after1, after2) {
                    return false;
                }
            }
            _ => return false,
        }
    }
    true
}

fn bisimulate<M: SemanticModel>(env: &mut Environment, root: ProcessRef) -> Equivalences {
    let mut equivalences = initialize_bisimulation::<M>(env, root);
    loop {
        let mut next = Equivalences::new();
        let mut changed = false;

        // Loop through each pair of states that were equivalent before, verifying that they're
        // still equivalent.  Separate any that are not equivalent to their head into a new
        // class.  If several members disagree with the head, they all land in the same new
        // class for now; later iterations will split them further if they also disagree with
        // each other.
        for head in equivalences.heads() {
            let members = equivalences.members_of(head).clone();
            let mut new_head = None;
            for member in members {
                if deep_equivalent(env, &equivalences, head, member) {
                    next.add(head, member);
                } else {
                    let head = *new_head.get_or_insert(member);
                    next.add(head, member);
                    changed = true;
                }
            }
        }

        debug!(
            classes = next.class_count(),
            changed, "bisimulation iteration"
        );
        equivalences = next;
        if !changed {
            return equivalences;
        }
    }
}

impl Environment {
    /// Normalizes a prenormalized process with respect to semantic model `M`, minimizing the
    /// state space by merging states that behave identically.
    pub fn normalize<M: SemanticModel>(&mut self, root: ProcessRef) -> ProcessRef {
        match self.node(root) {
            ProcessNode::Prenormalized(_) => {}
            _ => panic!("cannot normalize non-prenormalized {}", self.display(root)),
        }

        let model = M::abbreviation();
        if !self.has_equivalences(model, root) {
            let equivalences = bisimulate::<M>(self, root);
            self.record_equivalences(model, root, equivalences);
        }

        let class = self
            .equivalences(model, root)
            .class_of(root)
            .unwrap_or_else(|| panic!("root {} not in its own normalization", self.display(root)));
        self.register(ProcessNode::Normalized { model, root, class })
    }

    /// Returns the single normalized process reached after `initial`, or None if the underlying
    /// states can't perform it.
    pub fn normalized_after(&mut self, process: ProcessRef, initial: Event) -> Option<ProcessRef> {
        let (model, root, class) = normalized_payload(self, process);
        let members = self.equivalences(model, root).members_of(class).clone();

        // Find the set of states you could end up in by starting in one of our underlying
        // states and following a single `initial` event.
        let mut afters = BTreeSet::new();
        for member in members {
            if let Some(after) = self.prenormalized_after(member, initial) {
                afters.insert(after);
            }
        }

        // If none of the underlying states can perform this event, neither can we.
        if afters.is_empty() {
            return None;
        }

        // Because the underlying states are prenormalized and have already been merged by
        // bisimulation, all of the afters we just found must belong to the same equivalence
        // class.
        let mut after_class = None;
        for after in afters {
            let current = self.equivalences(model, root).class_of(after);
            debug_assert!(
                after_class.is_none() || after_class == current,
                "normalized afters straddle equivalence classes"
            );
            after_class = current;
        }
        let class = after_class?;
        Some(self.register(ProcessNode::Normalized { model, root, class }))
    }

    /// Given the expansion of some equivalence class of this normalization, returns the
    /// normalized process for that class.  It is a programmer error to ask for a set of
    /// processes that doesn't match any class.
    pub fn find_subprocess(&mut self, process: ProcessRef, expansion: &ProcessSet) -> ProcessRef {
        let (model, root, _) = normalized_payload(self, process);
        for head in self.equivalences(model, root).heads() {
            let members = self.equivalences(model, root).members_of(head).clone();
            let mut expanded = ProcessSet::new();
            for member in members {
                expanded.extend(self.expand(member));
            }
            if expanded == *expansion {
                return self.register(ProcessNode::Normalized {
                    model,
                    root,
                    class: head,
                });
            }
        }
        panic!(
            "no equivalence class of {} expands to the given set",
            self.display(process)
        );
    }
}

fn normalized_payload(
    env: &Environment,
    process: ProcessRef,
) -> (&'static str, ProcessRef, ProcessRef) {
    match env.node(process) {
        ProcessNode::Normalized { model, root, class } => (*model, *root, *class),
        _ => panic!("{} is not normalized", env.display(process)),
    }
}

pub(crate) fn initials(env: &Environment, process: ProcessRef) -> EventSet {
    // The union of the members' initials.  They're all equal by construction, but taking the
    // union means we don't have to rely on that here.
    let (model, root, class) = normalized_payload(env, process);
    let mut initials = EventSet::new();
    for member in env.equivalences(model, root).members_of(class) {
        initials.extend(env.initials(*member).iter());
    }
    initials
}

pub(crate) fn subprocesses(env: &Environment, process: ProcessRef) -> ProcessSet {
    let (model, root, class) = normalized_payload(env, process);
    env.equivalences(model, root)
        .members_of(class)
        .iter()
        .copied()
        .collect()
}

pub(crate) fn expand(env: &Environment, process: ProcessRef) -> ProcessSet {
    let (model, root, class) = normalized_payload(env, process);
    let mut expansion = ProcessSet::new();
    for member in env.equivalences(model, root).members_of(class) {
        expansion.extend(env.expand(*member));
    }
    expansion
}
