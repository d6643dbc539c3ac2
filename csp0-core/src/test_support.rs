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

use proptest::arbitrary::any;
use proptest::arbitrary::Arbitrary;
use proptest::collection::vec;
use proptest::prop_oneof;
use proptest::strategy::BoxedStrategy;
use proptest::strategy::Just;
use proptest::strategy::Strategy;

use crate::csp0::load_csp0_string;
use crate::environment::Environment;
use crate::process::ProcessRef;

/// Parses a CSP₀ script, panicking with a useful message if it's invalid.  Test cases shouldn't
/// have invalid scripts in them!
pub fn require_csp0(env: &mut Environment, csp0: &str) -> ProcessRef {
    match load_csp0_string(env, csp0) {
        Ok(process) => process,
        Err(error) => panic!("could not parse {:?}: {}", csp0, error),
    }
}

/// A construction plan for a process.  Building the same recipe twice in the same environment
/// must produce the same reference, which is exactly what the hash-consing property tests check.
/// Recipes use a small palette of events (`e0`–`e7`) so that generated processes collide often
/// enough to be interesting.
#[derive(Clone, Debug)]
pub enum Recipe {
    Stop,
    Skip,
    Prefix(u8, Box<Recipe>),
    ExternalChoice(Vec<Recipe>),
    InternalChoice(Vec<Recipe>),
    Interleave(Vec<Recipe>),
    SequentialComposition(Box<Recipe>, Box<Recipe>),
}

impl Recipe {
    pub fn build(&self, env: &mut Environment) -> ProcessRef {
        match self {
            Recipe::Stop => env.stop(),
            Recipe::Skip => env.skip(),
            Recipe::Prefix(event, after) => {
                let initial = env.event(&format!("e{}", event % 8));
                let after = after.build(env);
                env.prefix(initial, after)
            }
            Recipe::ExternalChoice(children) => {
                let children: Vec<_> = children.iter().map(|child| child.build(env)).collect();
                env.replicated_external_choice(children)
            }
            Recipe::InternalChoice(children) => {
                let children: Vec<_> = children.iter().map(|child| child.build(env)).collect();
                env.replicated_internal_choice(children)
            }
            Recipe::Interleave(children) => {
                let children: Vec<_> = children.iter().map(|child| child.build(env)).collect();
                env.replicated_interleave(children)
            }
            Recipe::SequentialComposition(p, q) => {
                let p = p.build(env);
                let q = q.build(env);
                env.sequential_composition(p, q)
            }
        }
    }
}

impl Arbitrary for Recipe {
    type Parameters = ();
    type Strategy = BoxedStrategy<Recipe>;

    fn arbitrary_with(_args: ()) -> Self::Strategy {
        let leaf = prop_oneof![Just(Recipe::Stop), Just(Recipe::Skip)];
        leaf.prop_recursive(4, 16, 4, |inner| {
            prop_oneof![
                (any::<u8>(), inner.clone())
                    .prop_map(|(event, after)| Recipe::Prefix(event, Box::new(after))),
                vec(inner.clone(), 0..4).prop_map(Recipe::ExternalChoice),
                vec(inner.clone(), 0..4).prop_map(Recipe::InternalChoice),
                vec(inner.clone(), 0..4).prop_map(Recipe::Interleave),
                (inner.clone(), inner)
                    .prop_map(|(p, q)| Recipe::SequentialComposition(Box::new(p), Box::new(q))),
            ]
        })
        .boxed()
    }
}
