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

//! Parses CSP₀, the textual process syntax, into processes in an environment.

use thiserror::Error;
use tracing::debug;

use crate::environment::Environment;
use crate::process::ProcessRef;
use crate::recursion::RecursionScope;
use crate::recursion::ScopeId;

/// Why a CSP₀ script failed to parse.  The parser stops at the first failure.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum ParseError {
    #[error("syntax error at offset {offset}: expected {expected}")]
    Syntax {
        offset: usize,
        expected: &'static str,
    },

    #[error("undefined identifier {name:?} outside of a let")]
    UndefinedIdentifier { offset: usize, name: String },

    #[error("duplicate definition of {name:?}")]
    DuplicateDefinition { offset: usize, name: String },

    #[error("let closes with undefined processes: {}", .names.join(", "))]
    UnfilledProcesses { names: Vec<String> },

    #[error("unexpected characters at end of input (offset {offset})")]
    TrailingInput { offset: usize },
}

/// Parses a CSP₀ script, constructing the processes it describes in `env` and returning the root.
pub fn load_csp0_string(env: &mut Environment, csp0: &str) -> Result<ProcessRef, ParseError> {
    debug!(input = csp0, "parsing CSP₀");
    let mut parser = Parser {
        input: csp0,
        pos: 0,
    };
    parser.skip_whitespace();
    let process = match parser.process(env, None)? {
        Some(process) => process,
        None => return Err(parser.syntax_error("process")),
    };
    parser.skip_whitespace();
    if parser.pos != csp0.len() {
        return Err(ParseError::TrailingInput { offset: parser.pos });
    }
    Ok(process)
}

const RESERVED: &[&str] = &["STOP", "SKIP", "let", "within", "prenormalize"];

fn is_id_start(byte: u8) -> bool {
    byte.is_ascii_alphabetic() || byte == b'_'
}

fn is_id_char(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'_' || byte == b'.'
}

// Recursive descent with backtracking.  Each grammar rule is a method that returns `Ok(Some(_))`
// on success, `Ok(None)` if this rule doesn't apply at the current position (leaving the position
// untouched so the caller can try something else), and `Err(_)` for a malformed construct that
// can't be anything else.
//
// CSP₀ has a fairly deep precedence tree; there's one method per level, from `process` at the
// loosest (`prenormalize`, `let`, the replicated operators) down to `primary` at the tightest.
// The infix operators are right-associative: each level parses its left-hand side at the next
// tighter level and recurses at its own level for the right-hand side.
struct Parser<'a> {
    input: &'a str,
    pos: usize,
}

type Parsed<T> = Result<Option<T>, ParseError>;

impl<'a> Parser<'a> {
    fn syntax_error(&self, expected: &'static str) -> ParseError {
        ParseError::Syntax {
            offset: self.pos,
            expected,
        }
    }

    fn skip_whitespace(&mut self) {
        let bytes = self.input.as_bytes();
        while self.pos < bytes.len()
            && matches!(
                bytes[self.pos],
                b' ' | b'\t' | b'\n' | b'\r' | b'\x0b' | b'\x0c'
            )
        {
            self.pos += 1;
        }
    }

    /// Consumes `expected` if it appears next in the input.
    fn literal(&mut self, expected: &str) -> bool {
        if self.input[self.pos..].starts_with(expected) {
            self.pos += expected.len();
            true
        } else {
            false
        }
    }

    /// Consumes `expected` only if it appears next as a whole word — `within` the keyword, not
    /// the first six characters of an identifier.
    fn keyword(&mut self, expected: &str) -> bool {
        let save = self.pos;
        if !self.literal(expected) {
            return false;
        }
        if self.pos < self.input.len() && is_id_char(self.input.as_bytes()[self.pos]) {
            self.pos = save;
            return false;
        }
        true
    }

    /// Parses an identifier: `[A-Za-z_][A-Za-z0-9_.]*`, or `$` followed by one or more identifier
    /// characters.  Dollar identifiers are set aside for generated scripts, so that they can't
    /// collide with names a user would write.
    fn identifier(&mut self) -> Option<String> {
        let bytes = self.input.as_bytes();
        let start = self.pos;
        let mut pos = self.pos;
        if pos < bytes.len() && bytes[pos] == b'$' {
            pos += 1;
            let name_start = pos;
            while pos < bytes.len() && is_id_char(bytes[pos]) {
                pos += 1;
            }
            if pos == name_start {
                return None;
            }
        } else {
            if pos >= bytes.len() || !is_id_start(bytes[pos]) {
                return None;
            }
            pos += 1;
            while pos < bytes.len() && is_id_char(bytes[pos]) {
                pos += 1;
            }
        }
        self.pos = pos;
        Some(self.input[start..pos].to_string())
    }

    fn integer(&mut self) -> Option<u32> {
        let bytes = self.input.as_bytes();
        let start = self.pos;
        let mut pos = self.pos;
        while pos < bytes.len() && bytes[pos].is_ascii_digit() {
            pos += 1;
        }
        if pos == start {
            return None;
        }
        let value = self.input[start..pos].parse().ok()?;
        self.pos = pos;
        Some(value)
    }

    /// Looks ahead for `identifier =` without consuming anything.  Used to tell a definition
    /// separator apart from a sequential composition inside a `let`.
    fn next_is_definition(&mut self) -> bool {
        let save = self.pos;
        self.skip_whitespace();
        let result = match self.identifier() {
            Some(_) => {
                self.skip_whitespace();
                self.input.as_bytes().get(self.pos) == Some(&b'=')
            }
            None => false,
        };
        self.pos = save;
        result
    }

    // process = "prenormalize" process-set | let-process
    fn process(&mut self, env: &mut Environment, scope: Option<ScopeId>) -> Parsed<ProcessRef> {
        if self.keyword("prenormalize") {
            self.skip_whitespace();
            let ps = self
                .process_collection(env, scope)?
                .ok_or_else(|| self.syntax_error("process set"))?;
            return Ok(Some(env.prenormalize_set(ps.into_iter().collect())));
        }
        self.let_process(env, scope)
    }

    // let-process = "let" definition+ "within" process | replicated
    fn let_process(&mut self, env: &mut Environment, scope: Option<ScopeId>) -> Parsed<ProcessRef> {
        if !self.keyword("let") {
            return self.replicated(env, scope);
        }

        let new_scope = env.recursion_scope();
        self.skip_whitespace();
        self.definition(env, &new_scope)?;
        self.skip_whitespace();
        while !self.keyword("within") {
            self.definition(env, &new_scope)?;
            self.skip_whitespace();
        }

        // Check that every name used in the definitions was eventually defined.  This has to
        // wait until the `within`, so that a definition can refer to a name that only appears
        // later.
        let unfilled = new_scope.unfilled(env);
        if !unfilled.is_empty() {
            return Err(ParseError::UnfilledProcesses { names: unfilled });
        }

        self.skip_whitespace();
        match self.process(env, Some(new_scope.id()))? {
            Some(body) => Ok(Some(body)),
            None => Err(self.syntax_error("process after within")),
        }
    }

    // definition = identifier "=" process ";"?
    fn definition(
        &mut self,
        env: &mut Environment,
        scope: &RecursionScope,
    ) -> Result<(), ParseError> {
        let start = self.pos;
        let name = match self.identifier() {
            Some(name) if !RESERVED.contains(&name.as_str()) => name,
            _ => return Err(self.syntax_error("definition name")),
        };
        let process = scope.add(env, &name);
        if env.filled(process) {
            return Err(ParseError::DuplicateDefinition {
                offset: start,
                name,
            });
        }

        self.skip_whitespace();
        if !self.literal("=") {
            return Err(self.syntax_error("= in definition"));
        }
        self.skip_whitespace();
        let body = match self.process(env, Some(scope.id()))? {
            Some(body) => body,
            None => return Err(self.syntax_error("process in definition")),
        };
        env.fill(process, body);

        // Definitions may be separated by a `;`.
        self.skip_whitespace();
        let save = self.pos;
        if self.literal(";") && !self.next_is_definition() {
            self.pos = save;
        }
        Ok(())
    }

    // replicated = ("□" | "⊓" | "⫴") process-collection | interleave
    fn replicated(&mut self, env: &mut Environment, scope: Option<ScopeId>) -> Parsed<ProcessRef> {
        if self.literal("[]") || self.literal("□") {
            self.skip_whitespace();
            let ps = self
                .process_collection(env, scope)?
                .ok_or_else(|| self.syntax_error("process set"))?;
            return Ok(Some(env.replicated_external_choice(ps)));
        }
        if self.literal("|~|") || self.literal("⊓") {
            self.skip_whitespace();
            let ps = self
                .process_collection(env, scope)?
                .ok_or_else(|| self.syntax_error("process set"))?;
            return Ok(Some(env.replicated_internal_choice(ps)));
        }
        if self.literal("|||") || self.literal("⫴") {
            self.skip_whitespace();
            let ps = self
                .process_collection(env, scope)?
                .ok_or_else(|| self.syntax_error("process bag"))?;
            return Ok(Some(env.replicated_interleave(ps)));
        }
        self.interleave(env, scope)
    }

    // interleave = internal-choice ("⫴" interleave)?
    fn interleave(&mut self, env: &mut Environment, scope: Option<ScopeId>) -> Parsed<ProcessRef> {
        let lhs = match self.internal_choice(env, scope)? {
            Some(lhs) => lhs,
            None => return Ok(None),
        };
        let save = self.pos;
        self.skip_whitespace();
        if !self.literal("|||") && !self.literal("⫴") {
            self.pos = save;
            return Ok(Some(lhs));
        }
        self.skip_whitespace();
        match self.interleave(env, scope)? {
            Some(rhs) => Ok(Some(env.interleave(lhs, rhs))),
            None => Err(self.syntax_error("process after ⫴")),
        }
    }

    // internal-choice = external-choice ("⊓" internal-choice)?
    fn internal_choice(
        &mut self,
        env: &mut Environment,
        scope: Option<ScopeId>,
    ) -> Parsed<ProcessRef> {
        let lhs = match self.external_choice(env, scope)? {
            Some(lhs) => lhs,
            None => return Ok(None),
        };
        let save = self.pos;
        self.skip_whitespace();
        if !self.literal("|~|") && !self.literal("⊓") {
            self.pos = save;
            return Ok(Some(lhs));
        }
        self.skip_whitespace();
        match self.internal_choice(env, scope)? {
            Some(rhs) => Ok(Some(env.internal_choice(lhs, rhs))),
            None => Err(self.syntax_error("process after ⊓")),
        }
    }

    // external-choice = sequential ("□" external-choice)?
    fn external_choice(
        &mut self,
        env: &mut Environment,
        scope: Option<ScopeId>,
    ) -> Parsed<ProcessRef> {
        let lhs = match self.sequential(env, scope)? {
            Some(lhs) => lhs,
            None => return Ok(None),
        };
        let save = self.pos;
        self.skip_whitespace();
        if !self.literal("[]") && !self.literal("□") {
            self.pos = save;
            return Ok(Some(lhs));
        }
        self.skip_whitespace();
        match self.external_choice(env, scope)? {
            Some(rhs) => Ok(Some(env.external_choice(lhs, rhs))),
            None => Err(self.syntax_error("process after □")),
        }
    }

    // sequential = prefix (";" sequential)?
    fn sequential(&mut self, env: &mut Environment, scope: Option<ScopeId>) -> Parsed<ProcessRef> {
        let lhs = match self.prefix(env, scope)? {
            Some(lhs) => lhs,
            None => return Ok(None),
        };
        let save = self.pos;
        self.skip_whitespace();
        if !self.literal(";") {
            self.pos = save;
            return Ok(Some(lhs));
        }
        // A `;` directly in front of `name =` separates two definitions in a `let`; it can't be
        // a sequential composition.
        if self.next_is_definition() {
            self.pos = save;
            return Ok(Some(lhs));
        }
        self.skip_whitespace();
        match self.sequential(env, scope)? {
            Some(rhs) => Ok(Some(env.sequential_composition(lhs, rhs))),
            None => Err(self.syntax_error("process after ;")),
        }
    }

    // prefix = primary | identifier "@" integer | identifier "→" prefix | identifier
    fn prefix(&mut self, env: &mut Environment, scope: Option<ScopeId>) -> Parsed<ProcessRef> {
        if let Some(process) = self.primary(env, scope)? {
            return Ok(Some(process));
        }

        let start = self.pos;
        let name = match self.identifier() {
            Some(name) => name,
            None => return Ok(None),
        };
        match name.as_str() {
            "STOP" => return Ok(Some(env.stop())),
            "SKIP" => return Ok(Some(env.skip())),
            // The remaining reserved words belong to looser levels of the grammar.
            "let" | "within" | "prenormalize" => {
                self.pos = start;
                return Ok(None);
            }
            _ => {}
        }

        // name@scope refers to a recursive process in an explicit scope.  The printer emits
        // these for cyclic references, and they can be read back in.
        if self.literal("@") {
            let scope_id = match self.integer() {
                Some(scope_id) => scope_id,
                None => return Err(self.syntax_error("scope id")),
            };
            return Ok(Some(env.recursive_process(scope_id, &name)));
        }

        let save = self.pos;
        self.skip_whitespace();
        if self.literal("->") || self.literal("→") {
            self.skip_whitespace();
            let after = match self.prefix(env, scope)? {
                Some(after) => after,
                None => return Err(self.syntax_error("process after →")),
            };
            let initial = env.event(&name);
            return Ok(Some(env.prefix(initial, after)));
        }
        self.pos = save;

        // A bare identifier names a recursive process in the enclosing let, if there is one.
        match scope {
            Some(scope_id) => Ok(Some(env.scope_add(scope_id, &name))),
            None => Err(ParseError::UndefinedIdentifier {
                offset: start,
                name,
            }),
        }
    }

    // primary = "(" process ")"
    fn primary(&mut self, env: &mut Environment, scope: Option<ScopeId>) -> Parsed<ProcessRef> {
        if !self.literal("(") {
            return Ok(None);
        }
        self.skip_whitespace();
        let process = match self.process(env, scope)? {
            Some(process) => process,
            None => return Err(self.syntax_error("process")),
        };
        self.skip_whitespace();
        if !self.literal(")") {
            return Err(self.syntax_error("closing parenthesis"));
        }
        Ok(Some(process))
    }

    // process-collection = "{" (process ("," process)*)? "}"
    //
    // Returns the processes in parse order; the caller decides whether they form a set or a bag.
    fn process_collection(
        &mut self,
        env: &mut Environment,
        scope: Option<ScopeId>,
    ) -> Parsed<Vec<ProcessRef>> {
        if !self.literal("{") {
            return Ok(None);
        }
        let mut processes = Vec::new();
        self.skip_whitespace();
        if let Some(first) = self.process(env, scope)? {
            processes.push(first);
            self.skip_whitespace();
            while self.literal(",") {
                self.skip_whitespace();
                match self.process(env, scope)? {
                    Some(next) => processes.push(next),
                    None => return Err(self.syntax_error("process")),
                }
                self.skip_whitespace();
            }
        }
        if !self.literal("}") {
            return Err(self.syntax_error("closing brace"));
        }
        Ok(Some(processes))
    }
}

#[cfg(test)]
mod csp0_tests {
    use super::*;

    fn check_valid(csp0: &str) {
        let mut env = Environment::new();
        if let Err(error) = load_csp0_string(&mut env, csp0) {
            panic!("could not parse {:?}: {}", csp0, error);
        }
    }

    fn check_invalid(csp0: &str) {
        let mut env = Environment::new();
        if load_csp0_string(&mut env, csp0).is_ok() {
            panic!("shouldn't be able to parse {:?}", csp0);
        }
    }

    fn check_eq(env: &mut Environment, csp0: &str, expected: ProcessRef) {
        match load_csp0_string(env, csp0) {
            Ok(actual) => assert_eq!(actual, expected, "wrong parse for {:?}", csp0),
            Err(error) => panic!("could not parse {:?}: {}", csp0, error),
        }
    }

    #[test]
    fn can_parse_identifiers() {
        check_valid("r → STOP");
        check_valid("r0 → STOP");
        check_valid("r0r → STOP");
        check_valid("root → STOP");
        check_valid("root.root → STOP");
        check_valid("root_root → STOP");
        check_valid("_ → STOP");
        check_valid("_r → STOP");
        check_valid("_root.root → STOP");
        check_valid("$r → STOP");
        check_valid("$r0 → STOP");
        check_valid("$root_root → STOP");
        check_invalid("0 → STOP");
        check_invalid("$ → STOP");
    }

    #[test]
    fn can_parse_stop() {
        let mut env = Environment::new();
        let expected = env.stop();
        check_eq(&mut env, "STOP", expected);
        check_eq(&mut env, " STOP", expected);
        check_eq(&mut env, "STOP ", expected);
        check_eq(&mut env, " STOP ", expected);
    }

    #[test]
    fn can_parse_skip() {
        let mut env = Environment::new();
        let expected = env.skip();
        check_eq(&mut env, "SKIP", expected);
        check_eq(&mut env, " SKIP ", expected);
    }

    #[test]
    fn can_parse_prefix() {
        let mut env = Environment::new();
        let a = env.event("a");
        let b = env.event("b");
        let stop = env.stop();
        let inner = env.prefix(b, stop);
        let expected = env.prefix(a, inner);
        check_eq(&mut env, "a -> b -> STOP", expected);
        check_eq(&mut env, "a → b → STOP", expected);
        check_eq(&mut env, "a→b→STOP", expected);
    }

    #[test]
    fn can_parse_external_choice() {
        let mut env = Environment::new();
        let a = env.event("a");
        let stop = env.stop();
        let skip = env.skip();
        let lhs = env.prefix(a, stop);
        let expected = env.external_choice(lhs, skip);
        check_eq(&mut env, "a->STOP[]SKIP", expected);
        check_eq(&mut env, " a -> STOP [] SKIP ", expected);
        check_eq(&mut env, "a→STOP□SKIP", expected);
        check_eq(&mut env, " a → STOP □ SKIP ", expected);
        // a is undefined as a process name outside a let.
        check_invalid("a □ STOP");
        check_invalid("STOP □ a");
    }

    #[test]
    fn choice_operators_are_right_associative() {
        let mut env = Environment::new();
        let a = env.event("a");
        let b = env.event("b");
        let c = env.event("c");
        let stop = env.stop();
        let pa = env.prefix(a, stop);
        let pb = env.prefix(b, stop);
        let pc = env.prefix(c, stop);
        let inner = env.external_choice(pb, pc);
        let expected = env.external_choice(pa, inner);
        check_eq(&mut env, "a -> STOP [] b -> STOP [] c -> STOP", expected);
        check_eq(&mut env, "a → STOP □ b → STOP □ c → STOP", expected);
    }

    #[test]
    fn can_parse_internal_choice() {
        let mut env = Environment::new();
        let a = env.event("a");
        let stop = env.stop();
        let skip = env.skip();
        let lhs = env.prefix(a, stop);
        let expected = env.internal_choice(lhs, skip);
        check_eq(&mut env, "a->STOP|~|SKIP", expected);
        check_eq(&mut env, "a → STOP ⊓ SKIP", expected);
    }

    #[test]
    fn can_parse_interleave() {
        let mut env = Environment::new();
        let a = env.event("a");
        let stop = env.stop();
        let skip = env.skip();
        let lhs = env.prefix(a, stop);
        let expected = env.interleave(lhs, skip);
        check_eq(&mut env, "a->STOP|||SKIP", expected);
        check_eq(&mut env, "a → STOP ⫴ SKIP", expected);
    }

    #[test]
    fn can_parse_sequential_composition() {
        let mut env = Environment::new();
        let a = env.event("a");
        let b = env.event("b");
        let stop = env.stop();
        let skip = env.skip();
        let p = env.prefix(a, skip);
        let q = env.prefix(b, stop);
        let expected = env.sequential_composition(p, q);
        check_eq(&mut env, "a -> SKIP; b -> STOP", expected);
        check_eq(&mut env, "a → SKIP ; b → STOP", expected);
        check_invalid("a → SKIP ;");
    }

    #[test]
    fn operator_precedence_binds_sequential_tightest() {
        let mut env = Environment::new();
        let a = env.event("a");
        let b = env.event("b");
        let stop = env.stop();
        let skip = env.skip();
        let pa = env.prefix(a, skip);
        let pb = env.prefix(b, stop);
        let seq = env.sequential_composition(pa, pb);
        let expected = env.external_choice(seq, stop);
        check_eq(&mut env, "a → SKIP ; b → STOP □ STOP", expected);
    }

    #[test]
    fn can_parse_replicated_operators() {
        let mut env = Environment::new();
        let a = env.event("a");
        let b = env.event("b");
        let stop = env.stop();
        let pa = env.prefix(a, stop);
        let pb = env.prefix(b, stop);

        let expected = env.replicated_external_choice(vec![pa, pb]);
        check_eq(&mut env, "[] {a → STOP, b → STOP}", expected);
        check_eq(&mut env, "□ {a → STOP, b → STOP}", expected);

        let expected = env.replicated_internal_choice(vec![pa, pb]);
        check_eq(&mut env, "|~| {a → STOP, b → STOP}", expected);
        check_eq(&mut env, "⊓ {a → STOP, b → STOP}", expected);

        let expected = env.replicated_interleave(vec![pa, pa, pb]);
        check_eq(&mut env, "||| {a → STOP, a → STOP, b → STOP}", expected);
        check_eq(&mut env, "⫴ {a → STOP, a → STOP, b → STOP}", expected);
    }

    #[test]
    fn replicated_choice_over_nothing_is_legal() {
        let mut env = Environment::new();
        let expected = env.replicated_external_choice(vec![]);
        check_eq(&mut env, "[] {}", expected);
        let expected = env.replicated_internal_choice(vec![]);
        check_eq(&mut env, "|~| {}", expected);
    }

    #[test]
    fn can_parse_parentheses() {
        let mut env = Environment::new();
        let a = env.event("a");
        let b = env.event("b");
        let stop = env.stop();
        let pb = env.prefix(b, stop);
        let inner = env.external_choice(pb, stop);
        let expected = env.prefix(a, inner);
        check_eq(&mut env, "a → (b → STOP □ STOP)", expected);
    }

    #[test]
    fn can_parse_let() {
        let mut env = Environment::new();
        let root = load_csp0_string(&mut env, "let X = a → Y; Y = b → X within X").unwrap();
        let x = env.recursive_process(0, "X");
        let y = env.recursive_process(0, "Y");
        assert_eq!(root, x);
        let a = env.event("a");
        let expected_def = env.prefix(a, y);
        assert_eq!(env.definition(x), Some(expected_def));
    }

    #[test]
    fn let_definitions_do_not_need_separators() {
        check_valid("let X = a → Y Y = b → X within X");
        check_valid("let X = a → X within X");
    }

    #[test]
    fn sequential_composition_still_parses_inside_let() {
        let mut env = Environment::new();
        let root = load_csp0_string(&mut env, "let X = a → SKIP ; X within X").unwrap();
        let x = env.recursive_process(0, "X");
        assert_eq!(root, x);
        let a = env.event("a");
        let skip = env.skip();
        let p = env.prefix(a, skip);
        let expected_def = env.sequential_composition(p, x);
        assert_eq!(env.definition(x), Some(expected_def));
    }

    #[test]
    fn scoped_references_can_be_parsed_back_in() {
        let mut env = Environment::new();
        let first = load_csp0_string(&mut env, "let X = a → X within X").unwrap();
        let reparsed = load_csp0_string(&mut env, "X@0").unwrap();
        assert_eq!(first, reparsed);
    }

    #[test]
    fn lets_get_distinct_scopes() {
        let mut env = Environment::new();
        let first = load_csp0_string(&mut env, "let X = a → X within X").unwrap();
        let second = load_csp0_string(&mut env, "let X = a → X within X").unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn can_parse_prenormalize() {
        let mut env = Environment::new();
        let a = env.event("a");
        let b = env.event("b");
        let stop = env.stop();
        let pa = env.prefix(a, stop);
        let pb = env.prefix(b, stop);
        let expected = env.prenormalize_set(vec![pa, pb].into_iter().collect());
        check_eq(&mut env, "prenormalize {a → STOP, b → STOP}", expected);
    }

    #[test]
    fn reports_undefined_identifiers() {
        let mut env = Environment::new();
        match load_csp0_string(&mut env, "X") {
            Err(ParseError::UndefinedIdentifier { name, .. }) => assert_eq!(name, "X"),
            other => panic!("expected an undefined identifier error, got {:?}", other),
        }
    }

    #[test]
    fn reports_duplicate_definitions() {
        let mut env = Environment::new();
        match load_csp0_string(&mut env, "let X = STOP X = SKIP within X") {
            Err(ParseError::DuplicateDefinition { name, .. }) => assert_eq!(name, "X"),
            other => panic!("expected a duplicate definition error, got {:?}", other),
        }
    }

    #[test]
    fn reports_unfilled_processes() {
        let mut env = Environment::new();
        match load_csp0_string(&mut env, "let X = a → Y within X") {
            Err(ParseError::UnfilledProcesses { names }) => {
                assert_eq!(names, vec!["Y".to_string()])
            }
            other => panic!("expected an unfilled process error, got {:?}", other),
        }
    }

    #[test]
    fn reports_trailing_input() {
        let mut env = Environment::new();
        match load_csp0_string(&mut env, "STOP STOP") {
            Err(ParseError::TrailingInput { .. }) => {}
            other => panic!("expected a trailing input error, got {:?}", other),
        }
    }

    #[test]
    fn reserved_words_are_not_identifiers() {
        check_invalid("let STOP = SKIP within STOP");
        check_invalid("let within = SKIP within within");
        check_invalid("STOPX");
        check_valid("STOPX → STOP");
    }
}
