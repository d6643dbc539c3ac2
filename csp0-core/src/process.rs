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

//! Defines processes, sets and bags of processes, and how a process answers the three questions
//! that drive every analysis: which events it can perform now (`initials`), where a single event
//! takes it (`afters`), and which children you need to print it (`subprocesses`).

use std::collections::btree_set;
use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::fmt::Display;
use std::iter::FromIterator;

use crate::environment::Environment;
use crate::event::Event;
use crate::event::EventSet;
use crate::external_choice;
use crate::interleave;
use crate::internal_choice;
use crate::prefix;
use crate::prenormalize;
use crate::primitives;
use crate::recursion;
use crate::recursion::ScopeId;
use crate::sequential_composition;

/// A stable reference to a process in an environment.  The environment owns all of its processes;
/// a reference stays valid for as long as the environment is alive.  References are ordered by the
/// index that the environment assigned when the process was first constructed, which gives every
/// set of processes a reproducible iteration and rendering order.
#[derive(Clone, Copy, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct ProcessRef(pub(crate) u32);

impl ProcessRef {
    /// The index assigned to this process when it was first constructed.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Debug for ProcessRef {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "ProcessRef({})", self.0)
    }
}

/// The definition of a process.  This is a closed sum: every operator in the language is one of
/// these variants, and the environment constructs each distinct definition exactly once.  The
/// derived structural equality and hashing are what make hash-consing work; the enum discriminant
/// keeps two variants with coincidentally equal payloads from colliding.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub(crate) enum ProcessNode {
    Stop,
    Skip,
    Omega,
    Prefix(Event, ProcessRef),
    ExternalChoice(ProcessSet),
    InternalChoice(ProcessSet),
    Interleave(ProcessBag),
    SequentialComposition(ProcessRef, ProcessRef),
    Recursive { scope: ScopeId, name: String },
    Prenormalized(ProcessSet),
    Normalized {
        model: &'static str,
        root: ProcessRef,
        class: ProcessRef,
    },
}

/// A set of processes, ordered by construction index.
#[derive(Clone, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct ProcessSet(BTreeSet<ProcessRef>);

impl ProcessSet {
    pub fn new() -> ProcessSet {
        ProcessSet(BTreeSet::new())
    }

    pub fn insert(&mut self, process: ProcessRef) -> bool {
        self.0.insert(process)
    }

    pub fn remove(&mut self, process: ProcessRef) -> bool {
        self.0.remove(&process)
    }

    pub fn contains(&self, process: ProcessRef) -> bool {
        self.0.contains(&process)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = ProcessRef> + '_ {
        self.0.iter().copied()
    }
}

impl Extend<ProcessRef> for ProcessSet {
    fn extend<I: IntoIterator<Item = ProcessRef>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

impl FromIterator<ProcessRef> for ProcessSet {
    fn from_iter<I: IntoIterator<Item = ProcessRef>>(iter: I) -> ProcessSet {
        ProcessSet(iter.into_iter().collect())
    }
}

impl IntoIterator for ProcessSet {
    type Item = ProcessRef;
    type IntoIter = btree_set::IntoIter<ProcessRef>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// A bag (multiset) of processes, ordered by construction index.  Unlike [`ProcessSet`],
/// duplicates matter: `P ⫴ P` is not the same process as `P`.
#[derive(Clone, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct ProcessBag(BTreeMap<ProcessRef, usize>);

impl ProcessBag {
    pub fn new() -> ProcessBag {
        ProcessBag(BTreeMap::new())
    }

    pub fn insert(&mut self, process: ProcessRef) {
        *self.0.entry(process).or_insert(0) += 1;
    }

    /// Removes one occurrence of `process`.  Panics if the bag doesn't contain it.
    pub fn remove(&mut self, process: ProcessRef) {
        let count = self
            .0
            .get_mut(&process)
            .unwrap_or_else(|| panic!("bag does not contain {:?}", process));
        *count -= 1;
        if *count == 0 {
            self.0.remove(&process);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The total number of occurrences in the bag.
    pub fn len(&self) -> usize {
        self.0.values().sum()
    }

    /// Iterates over the distinct processes in the bag.
    pub fn distinct(&self) -> impl Iterator<Item = ProcessRef> + '_ {
        self.0.keys().copied()
    }

    /// Iterates over every occurrence in the bag, in construction order.
    pub fn iter(&self) -> impl Iterator<Item = ProcessRef> + '_ {
        self.0
            .iter()
            .flat_map(|(process, count)| std::iter::repeat(*process).take(*count))
    }
}

impl FromIterator<ProcessRef> for ProcessBag {
    fn from_iter<I: IntoIterator<Item = ProcessRef>>(iter: I) -> ProcessBag {
        let mut bag = ProcessBag::new();
        for process in iter {
            bag.insert(process);
        }
        bag
    }
}

impl Environment {
    /// Returns the set of events that `process` can perform immediately.
    pub fn initials(&self, process: ProcessRef) -> EventSet {
        match self.node(process) {
            ProcessNode::Stop => primitives::stop_initials(),
            ProcessNode::Skip => primitives::skip_initials(),
            ProcessNode::Omega => primitives::omega_initials(),
            ProcessNode::Prefix(initial, _) => prefix::initials(*initial),
            ProcessNode::ExternalChoice(ps) => external_choice::initials(self, ps),
            ProcessNode::InternalChoice(ps) => internal_choice::initials(ps),
            ProcessNode::Interleave(ps) => interleave::initials(self, ps),
            ProcessNode::SequentialComposition(p, _) => sequential_composition::initials(self, *p),
            ProcessNode::Recursive { .. } => recursion::initials(self, process),
            ProcessNode::Prenormalized(ps) => prenormalize::initials(self, ps),
            ProcessNode::Normalized { .. } => crate::normalize::initials(self, process),
        }
    }

    /// Returns the set of processes that `process` can reach by performing a single `initial`
    /// event.  Computing the afters of some operators constructs new processes, which is why this
    /// takes `&mut self`.
    pub fn afters(&mut self, process: ProcessRef, initial: Event) -> ProcessSet {
        let node = self.node(process).clone();
        match node {
            ProcessNode::Stop => primitives::stop_afters(),
            ProcessNode::Skip => primitives::skip_afters(self, initial),
            ProcessNode::Omega => primitives::omega_afters(),
            ProcessNode::Prefix(prefix_initial, after) => {
                prefix::afters(prefix_initial, after, initial)
            }
            ProcessNode::ExternalChoice(ps) => external_choice::afters(self, &ps, initial),
            ProcessNode::InternalChoice(ps) => internal_choice::afters(&ps, initial),
            ProcessNode::Interleave(ps) => interleave::afters(self, &ps, initial),
            ProcessNode::SequentialComposition(p, q) => {
                sequential_composition::afters(self, p, q, initial)
            }
            ProcessNode::Recursive { .. } => recursion::afters(self, process, initial),
            ProcessNode::Prenormalized(_) => prenormalize::afters(self, process, initial),
            ProcessNode::Normalized { .. } => {
                self.normalized_after(process, initial).into_iter().collect()
            }
        }
    }

    /// Returns the syntactic children of `process` — the subprocesses you need to visit to print
    /// its definition, not the processes it can transition to.
    pub fn subprocesses(&self, process: ProcessRef) -> ProcessSet {
        match self.node(process) {
            ProcessNode::Stop | ProcessNode::Skip | ProcessNode::Omega => ProcessSet::new(),
            ProcessNode::Prefix(_, after) => std::iter::once(*after).collect(),
            ProcessNode::ExternalChoice(ps)
            | ProcessNode::InternalChoice(ps)
            | ProcessNode::Prenormalized(ps) => ps.clone(),
            ProcessNode::Interleave(ps) => ps.distinct().collect(),
            ProcessNode::SequentialComposition(p, q) => vec![*p, *q].into_iter().collect(),
            ProcessNode::Recursive { .. } => recursion::subprocesses(self, process),
            ProcessNode::Normalized { .. } => crate::normalize::subprocesses(self, process),
        }
    }

    /// Renders `process` in CSP₀ syntax.  The rendering is deterministic: children of a set or
    /// bag are printed in the order the environment first constructed them.
    pub fn display(&self, process: ProcessRef) -> DisplayProcess<'_> {
        DisplayProcess {
            env: self,
            process,
        }
    }
}

//-------------------------------------------------------------------------------------------------
// Rendering

/// Renders a process as CSP₀ text.  Returned by [`Environment::display`].
pub struct DisplayProcess<'a> {
    env: &'a Environment,
    process: ProcessRef,
}

impl<'a> Display for DisplayProcess<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        print_process(self.env, f, self.process, PrinterContext::default())
    }
}

/// Threads the one piece of state the printer needs through the render calls: whether we're
/// already in the middle of emitting the `let` that introduces a cluster of mutually recursive
/// processes.  Inside the enumeration, recursive references print as `name@scope`; outside, they
/// print the whole `let`.
#[derive(Clone, Copy, Default)]
struct PrinterContext {
    in_let: bool,
}

/// The binding strength of each operator, used to decide where parentheses are needed.  A
/// subprocess with a larger value than its parent binds more loosely and gets wrapped.
pub(crate) fn precedence(env: &Environment, process: ProcessRef) -> u32 {
    match env.node(process) {
        ProcessNode::Stop | ProcessNode::Skip | ProcessNode::Omega => 1,
        ProcessNode::Prefix(_, _) => 2,
        ProcessNode::SequentialComposition(_, _) => 3,
        ProcessNode::ExternalChoice(_) => 6,
        ProcessNode::InternalChoice(_) => 7,
        ProcessNode::Interleave(_) => 9,
        ProcessNode::Recursive { .. } => 12,
        ProcessNode::Prenormalized(_) | ProcessNode::Normalized { .. } => 13,
    }
}

/// The precedence a child renders at.  Inside a `let` enumeration a recursive reference prints
/// as a bare `name@scope`, which binds as tightly as a primary.
fn effective_precedence(env: &Environment, process: ProcessRef, ctx: PrinterContext) -> u32 {
    if ctx.in_let {
        if let ProcessNode::Recursive { .. } = env.node(process) {
            return 1;
        }
    }
    precedence(env, process)
}

fn print_process(
    env: &Environment,
    f: &mut std::fmt::Formatter,
    process: ProcessRef,
    ctx: PrinterContext,
) -> std::fmt::Result {
    match env.node(process) {
        ProcessNode::Stop => f.write_str("STOP"),
        ProcessNode::Skip => f.write_str("SKIP"),
        ProcessNode::Omega => f.write_str("Ω"),
        ProcessNode::Prefix(initial, after) => {
            write!(f, "{} → ", env.event_name(*initial))?;
            print_subprocess(env, f, process, *after, ctx)
        }
        ProcessNode::ExternalChoice(ps) => {
            print_collection(env, f, process, ps.iter().collect(), "□", ctx)
        }
        ProcessNode::InternalChoice(ps) => {
            print_collection(env, f, process, ps.iter().collect(), "⊓", ctx)
        }
        ProcessNode::Interleave(ps) => {
            print_collection(env, f, process, ps.iter().collect(), "⫴", ctx)
        }
        ProcessNode::SequentialComposition(p, q) => {
            print_left_subprocess(env, f, process, *p, ctx)?;
            f.write_str(" ; ")?;
            print_subprocess(env, f, process, *q, ctx)
        }
        ProcessNode::Recursive { scope, name } => {
            if ctx.in_let {
                return write!(f, "{}@{}", name, scope);
            }
            recursion::print_cluster(env, f, process, |env, f, inner| {
                print_process(env, f, inner, PrinterContext { in_let: true })
            })
        }
        ProcessNode::Prenormalized(ps) => {
            f.write_str("prenormalize ")?;
            print_process_set(env, f, ps, ctx)
        }
        ProcessNode::Normalized { model, root, .. } => {
            let expansion = env.expand(process);
            let root_expansion = env.expand(*root);
            write!(f, "normalize[{}] ", model)?;
            print_process_set(env, f, &expansion, ctx)?;
            if expansion != root_expansion {
                f.write_str(" within ")?;
                print_process_set(env, f, &root_expansion, ctx)?;
            }
            Ok(())
        }
    }
}

/// Prints a subprocess of `parent`, wrapping it in parentheses if it binds more loosely.
fn print_subprocess(
    env: &Environment,
    f: &mut std::fmt::Formatter,
    parent: ProcessRef,
    inner: ProcessRef,
    ctx: PrinterContext,
) -> std::fmt::Result {
    if precedence(env, parent) < effective_precedence(env, inner, ctx) {
        f.write_str("(")?;
        print_process(env, f, inner, ctx)?;
        f.write_str(")")
    } else {
        print_process(env, f, inner, ctx)
    }
}

/// Prints the left operand of an infix operator.  The infix operators are right-associative, so
/// a left operand at the _same_ precedence needs parentheses too, or the reparse would nest it
/// to the right.
fn print_left_subprocess(
    env: &Environment,
    f: &mut std::fmt::Formatter,
    parent: ProcessRef,
    inner: ProcessRef,
    ctx: PrinterContext,
) -> std::fmt::Result {
    if precedence(env, parent) <= effective_precedence(env, inner, ctx) {
        f.write_str("(")?;
        print_process(env, f, inner, ctx)?;
        f.write_str(")")
    } else {
        print_process(env, f, inner, ctx)
    }
}

/// Prints the children of a replicated operator.  Two children render infix; any other number
/// renders in the replicated-prefix notation `op {…}`.  The children arrive sorted by
/// construction index.
fn print_collection(
    env: &Environment,
    f: &mut std::fmt::Formatter,
    parent: ProcessRef,
    children: Vec<ProcessRef>,
    op: &str,
    ctx: PrinterContext,
) -> std::fmt::Result {
    if children.len() == 2 {
        print_left_subprocess(env, f, parent, children[0], ctx)?;
        write!(f, " {} ", op)?;
        return print_subprocess(env, f, parent, children[1], ctx);
    }

    write!(f, "{} {{", op)?;
    let mut first = true;
    for child in children {
        if first {
            first = false;
        } else {
            f.write_str(", ")?;
        }
        print_process(env, f, child, ctx)?;
    }
    f.write_str("}")
}

fn print_process_set(
    env: &Environment,
    f: &mut std::fmt::Formatter,
    processes: &ProcessSet,
    ctx: PrinterContext,
) -> std::fmt::Result {
    f.write_str("{")?;
    let mut first = true;
    for process in processes.iter() {
        if first {
            first = false;
        } else {
            f.write_str(", ")?;
        }
        print_process(env, f, process, ctx)?;
    }
    f.write_str("}")
}
