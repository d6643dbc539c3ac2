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

//! Decides whether a specification process is refined by an implementation process.

use std::collections::HashSet;
use std::collections::VecDeque;

use tracing::debug;

use crate::environment::Environment;
use crate::event::Event;
use crate::models::Behavior;
use crate::models::SemanticModel;
use crate::process::ProcessRef;

/// Returns whether `spec ⊑ impl` in semantic model `M`: whether everything the implementation
/// can do, at every reachable point, is allowed by the specification.  The specification must be
/// normalized (so that it has exactly one state for any sequence of visible events); the
/// implementation can be any process.
///
/// When the check fails, a counterexample exists, but we don't construct it yet.
// TODO: Construct a counterexample.
pub fn refines<M: SemanticModel>(
    env: &mut Environment,
    spec: ProcessRef,
    impl_: ProcessRef,
) -> bool {
    let mut enqueued = HashSet::new();
    let mut queue = VecDeque::new();
    enqueued.insert((spec, impl_));
    queue.push_back((spec, impl_));

    while let Some((spec, impl_)) = queue.pop_front() {
        let spec_behavior = M::process_behavior(env, spec);
        let impl_behavior = M::process_behavior(env, impl_);
        if !spec_behavior.refined_by(&impl_behavior) {
            debug!(
                spec = %env.display(spec),
                impl_ = %env.display(impl_),
                "behavior refinement fails"
            );
            return false;
        }

        for initial in env.initials(impl_).iter() {
            // A τ is the implementation making internal progress; the specification stands
            // still.  For any visible event, the (normalized) specification has at most one
            // place to go — and if it has none, the implementation can do something the
            // specification can't.
            let spec_after = if initial == Event::tau() {
                Some(spec)
            } else {
                env.normalized_after(spec, initial)
            };
            let spec_after = match spec_after {
                Some(spec_after) => spec_after,
                None => {
                    debug!(
                        event = env.event_name(initial),
                        spec = %env.display(spec),
                        "specification cannot perform implementation event"
                    );
                    return false;
                }
            };

            for impl_after in env.afters(impl_, initial) {
                if enqueued.insert((spec_after, impl_after)) {
                    queue.push_back((spec_after, impl_after));
                }
            }
        }
    }

    true
}
