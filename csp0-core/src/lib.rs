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

//! A library for analyzing CSP processes: building them from CSP₀ scripts, exploring the
//! transition system their operational semantics induces, normalizing them, and checking
//! refinement between a specification and an implementation.

mod csp0;
mod environment;
mod event;
mod external_choice;
mod interleave;
mod internal_choice;
mod maximal_traces;
mod models;
mod normalize;
mod prefix;
mod prenormalize;
mod primitives;
mod process;
mod recursion;
mod refinement;
mod sequential_composition;
mod traversal;

pub use csp0::load_csp0_string;
pub use csp0::ParseError;
pub use environment::Environment;
pub use event::Event;
pub use event::EventSet;
pub use maximal_traces::maximal_finite_traces;
pub use maximal_traces::DisplayTrace;
pub use maximal_traces::MaximalTraces;
pub use models::Behavior;
pub use models::SemanticModel;
pub use models::Traces;
pub use process::DisplayProcess;
pub use process::ProcessBag;
pub use process::ProcessRef;
pub use process::ProcessSet;
pub use recursion::RecursionScope;
pub use recursion::ScopeId;
pub use refinement::refines;
pub use traversal::bfs;
pub use traversal::bfs_syntactic;
pub use traversal::tau_close;

#[cfg(test)]
mod test_support;
