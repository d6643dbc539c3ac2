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

//! Finds the maximal finite traces of a process.

use std::collections::hash_set;
use std::collections::HashSet;
use std::fmt::Debug;
use std::fmt::Display;
use std::iter::FromIterator;

use itertools::Itertools;

use crate::environment::Environment;
use crate::event::Event;
use crate::process::ProcessRef;

/// A set of traces that is maximal — where we ensure that no element of the set is a prefix of
/// any other element.
#[derive(Clone, Eq, PartialEq)]
pub struct MaximalTraces(HashSet<Vec<Event>>);

impl MaximalTraces {
    pub fn new() -> MaximalTraces {
        let mut traces = HashSet::new();
        traces.insert(Vec::new());
        MaximalTraces(traces)
    }

    pub fn insert(&mut self, trace: Vec<Event>) {
        // If the new trace is a prefix of any existing trace, do nothing.
        if self.0.iter().any(|existing| existing.starts_with(&trace)) {
            return;
        }

        // Remove any existing traces that are a prefix of the new one.
        let mut prefix = trace.clone();
        while !prefix.is_empty() {
            prefix.pop();
            self.0.remove(&prefix);
        }

        self.0.insert(trace);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Vec<Event>> {
        self.0.iter()
    }

    /// Returns the traces in a stable order, for rendering.
    pub fn sorted(&self) -> Vec<&Vec<Event>> {
        self.0.iter().sorted().collect()
    }
}

impl Default for MaximalTraces {
    fn default() -> MaximalTraces {
        MaximalTraces::new()
    }
}

impl Debug for MaximalTraces {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl FromIterator<Vec<Event>> for MaximalTraces {
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = Vec<Event>>,
    {
        let mut result = MaximalTraces::new();
        for trace in iter {
            result.insert(trace);
        }
        result
    }
}

impl IntoIterator for MaximalTraces {
    type Item = Vec<Event>;
    type IntoIter = hash_set::IntoIter<Vec<Event>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl PartialEq<HashSet<Vec<Event>>> for MaximalTraces {
    fn eq(&self, other: &HashSet<Vec<Event>>) -> bool {
        self.0 == *other
    }
}

/// Renders one trace as `⟨a,b,✔⟩`.
pub struct DisplayTrace<'a> {
    env: &'a Environment,
    trace: &'a [Event],
}

impl Environment {
    pub fn display_trace<'a>(&'a self, trace: &'a [Event]) -> DisplayTrace<'a> {
        DisplayTrace { env: self, trace }
    }
}

impl<'a> Display for DisplayTrace<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "⟨{}⟩",
            self.trace
                .iter()
                .map(|event| self.env.event_name(*event))
                .format(",")
        )
    }
}

/// Returns the maximal finite traces of a process.  Traces only contain visible events — τ moves
/// the process along without extending the trace — while ✔ is visible and can end a trace.  A
/// branch that revisits a process already on the current path is cut at the repeat.
pub fn maximal_finite_traces(env: &mut Environment, process: ProcessRef) -> MaximalTraces {
    fn subprocess(
        env: &mut Environment,
        result: &mut MaximalTraces,
        process: ProcessRef,
        previous_processes: &mut Vec<ProcessRef>,
        current_trace: &mut Vec<Event>,
    ) {
        // If `process` already appears earlier in the current trace, then we've found a cycle.
        if previous_processes.contains(&process) {
            result.insert(current_trace.clone());
            return;
        }

        // If the current subprocess doesn't have any outgoing transitions, we've found the end
        // of a finite trace.
        let initials = env.initials(process);
        if initials.is_empty() {
            result.insert(current_trace.clone());
            return;
        }

        // Otherwise recurse into the subprocesses we get by following each possible event from
        // the current state.
        previous_processes.push(process);
        for initial in initials.iter() {
            for after in env.afters(process, initial) {
                if initial == Event::tau() {
                    subprocess(env, result, after, previous_processes, current_trace);
                } else {
                    current_trace.push(initial);
                    subprocess(env, result, after, previous_processes, current_trace);
                    current_trace.pop();
                }
            }
        }
        previous_processes.pop();
    }

    let mut result = MaximalTraces::new();
    let mut previous_processes = Vec::new();
    let mut current_trace = Vec::new();
    subprocess(
        env,
        &mut result,
        process,
        &mut previous_processes,
        &mut current_trace,
    );
    result
}
