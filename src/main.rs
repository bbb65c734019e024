/*!
# Introduction

ifcfg-gen compiles declared network interface and route units into
RedHat-style sysconfig files.  Given a `units.toml` describing the interfaces
and routes a host should have, plus a set of facts discovered from the running
host (such as a device's hardware address), it produces the exact contents of
each `/etc/sysconfig/network-scripts/ifcfg-*` and `route-*` file, along with
the set of services that must be notified when a file changes.

It contains two subcommands:
* `compile`: render and write all configured units, printing a JSON summary of
  the written files and their service notifications
* `check`: validate all configured units without producing any files

The compilers themselves are pure functions over (unit, facts); all file and
process concerns live in the `cli` module.
*/

#![deny(rust_2018_idioms)]

#[macro_use]
extern crate serde_plain;

mod cli;
mod compile;
mod facts;
mod interface_id;
mod units;

use argh::FromArgs;
use std::process;

static DEFAULT_UNITS_FILE: &str = "/etc/ifcfg-gen/units.toml";
static DEFAULT_FACTS_FILE: &str = "/etc/ifcfg-gen/facts.json";

/// Stores user-supplied arguments.
#[derive(FromArgs, PartialEq, Debug)]
struct Args {
    #[argh(subcommand)]
    subcommand: SubCommand,
}

#[derive(FromArgs, PartialEq, Debug)]
#[argh(subcommand)]
enum SubCommand {
    Compile(cli::compile::CompileArgs),
    Check(cli::check_units::CheckArgs),
}

fn run() -> cli::Result<()> {
    let args: Args = argh::from_env();
    match args.subcommand {
        SubCommand::Compile(args) => cli::compile::run(args)?,
        SubCommand::Check(args) => cli::check_units::run(args)?,
    }
    Ok(())
}

// Returning a Result from main makes it print a Debug representation of the error, but with Snafu
// we have nice Display representations of the error, so we wrap "main" (run) and print any error.
// https://github.com/shepmaster/snafu/issues/110
fn main() {
    if let Err(e) = run() {
        eprintln!("{}", e);
        process::exit(1);
    }
}
