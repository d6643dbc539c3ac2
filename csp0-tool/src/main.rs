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

//! Command-line analyses for CSP₀ process expressions.

use anyhow::anyhow;
use clap::Parser;
use clap::Subcommand;
use csp0_core::bfs;
use csp0_core::load_csp0_string;
use csp0_core::maximal_finite_traces;
use csp0_core::Environment;
use csp0_core::ProcessRef;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "csp0", about = "Analyzes CSP₀ process expressions")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Counts the processes reachable from a CSP₀ process.
    Reachable {
        /// Prints each reachable process, not just the count.
        #[arg(short, long)]
        verbose: bool,
        /// The CSP₀ process to analyze.
        process: String,
    },
    /// Counts the maximal finite traces of a CSP₀ process.
    Traces {
        /// Prints each trace, not just the count.
        #[arg(short, long)]
        verbose: bool,
        /// The CSP₀ process to analyze.
        process: String,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    match args.command {
        Command::Reachable { verbose, process } => reachable(verbose, &process),
        Command::Traces { verbose, process } => traces(verbose, &process),
    }
}

fn parse(env: &mut Environment, csp0: &str) -> anyhow::Result<ProcessRef> {
    load_csp0_string(env, csp0)
        .map_err(|error| anyhow!("invalid CSP₀ process {:?}: {}", csp0, error))
}

fn reachable(verbose: bool, csp0: &str) -> anyhow::Result<()> {
    let mut env = Environment::new();
    let process = parse(&mut env, csp0)?;
    let mut count = 0u64;
    bfs(&mut env, process, |env, process| {
        if verbose {
            println!("{}", env.display(process));
        }
        count += 1;
        true
    });
    if verbose {
        print!("Reachable processes: ");
    }
    println!("{}", count);
    Ok(())
}

fn traces(verbose: bool, csp0: &str) -> anyhow::Result<()> {
    let mut env = Environment::new();
    let process = parse(&mut env, csp0)?;
    let prenormalized = env.prenormalize(process);
    let traces = maximal_finite_traces(&mut env, prenormalized);
    if verbose {
        for trace in traces.sorted() {
            println!("{}", env.display_trace(trace));
        }
        print!("Maximal finite traces: ");
    }
    println!("{}", traces.len());
    Ok(())
}
