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

//! Graph traversals over the processes reachable from a root.

use std::collections::BTreeSet;
use std::collections::HashSet;

use crate::environment::Environment;
use crate::event::Event;
use crate::process::ProcessRef;
use crate::process::ProcessSet;

/// Performs a breadth-first search of the processes reachable from `root` by following
/// transitions, calling `op` exactly once for each reachable process.  Layers are visited in FIFO
/// order, and each layer in construction order, so the visit order is reproducible.  The visitor
/// returns whether the traversal should keep going.
///
/// Note that there's no guarantee the reachable set is finite; it's the caller's responsibility
/// to bound the search if the input isn't trusted.
pub fn bfs<F>(env: &mut Environment, root: ProcessRef, mut op: F)
where
    F: FnMut(&Environment, ProcessRef) -> bool,
{
    let mut seen = HashSet::new();
    let mut queue = BTreeSet::new();
    seen.insert(root);
    queue.insert(root);
    while !queue.is_empty() {
        let mut next_queue = BTreeSet::new();
        for process in queue {
            if !op(env, process) {
                return;
            }
            for initial in env.initials(process).iter() {
                for after in env.afters(process, initial) {
                    if seen.insert(after) {
                        next_queue.insert(after);
                    }
                }
            }
        }
        queue = next_queue;
    }
}

/// Performs a breadth-first search of the _syntactic_ subprocesses of `root` — the children you
/// need to print definitions, not the processes reachable by transitions.
pub fn bfs_syntactic<F>(env: &Environment, root: ProcessRef, mut op: F)
where
    F: FnMut(&Environment, ProcessRef) -> bool,
{
    let mut seen = HashSet::new();
    let mut queue = BTreeSet::new();
    seen.insert(root);
    queue.insert(root);
    while !queue.is_empty() {
        let mut next_queue = BTreeSet::new();
        for process in queue {
            if !op(env, process) {
                return;
            }
            for subprocess in env.subprocesses(process) {
                if seen.insert(subprocess) {
                    next_queue.insert(subprocess);
                }
            }
        }
        queue = next_queue;
    }
}

/// Updates `processes` to be τ-closed: adds every process you can reach from a member by
/// following τ zero or more times.
pub fn tau_close(env: &mut Environment, processes: &mut ProcessSet) {
    loop {
        let mut new_processes = ProcessSet::new();
        for process in processes.iter() {
            new_processes.extend(env.afters(process, Event::tau()));
        }
        let old_size = processes.len();
        processes.extend(new_processes);
        if processes.len() == old_size {
            return;
        }
    }
}
