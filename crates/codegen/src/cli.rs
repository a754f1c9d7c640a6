// SPDX-FileCopyrightText: 2021 - 2024 Robin Vobruba <hoijui.quaero@gmail.com>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::path::PathBuf;

use clap::{command, value_parser, Arg, ArgAction, ArgMatches, Command, ValueHint};
use const_format::formatcp;

use crate::config::{Config, DEFAULT_RUNTIME_CRATE};

pub const A_S_VERSION: char = 'V';
pub const A_L_VERSION: &str = "version";
pub const A_S_QUIET: char = 'q';
pub const A_L_QUIET: &str = "quiet";
pub const A_S_VERBOSE: char = 'v';
pub const A_L_VERBOSE: &str = "verbose";
pub const A_S_FORCE: char = 'f';
pub const A_L_FORCE: &str = "force";
pub const A_S_HEADER: char = 'H';
pub const A_L_HEADER: &str = "header";
pub const A_S_OUT_DIR: char = 'O';
pub const A_L_OUT_DIR: &str = "output-directory";
pub const A_S_CONTEXT: char = 'c';
pub const A_L_CONTEXT: &str = "context";
pub const A_S_MODULE_NAME: char = 'm';
pub const A_L_MODULE_NAME: &str = "module-name";
pub const A_S_RUNTIME_CRATE: char = 'r';
pub const A_L_RUNTIME_CRATE: &str = "runtime-crate";
pub const A_L_SHAPES_FILE: &str = "shapes-file";

fn arg_version() -> Arg {
    Arg::new(A_L_VERSION)
        .help(formatcp!(
            "Print version information and exit. \
May be combined with -{A_S_QUIET},--{A_L_QUIET}, \
to really only output the version string."
        ))
        .short(A_S_VERSION)
        .long(A_L_VERSION)
        .action(ArgAction::SetTrue)
}

fn arg_quiet() -> Arg {
    Arg::new(A_L_QUIET)
        .help("Minimize or suppress output to stderr")
        .long_help("Minimize or suppress output to stderr; stdout is never used by this program, with or without this option set.")
        .action(ArgAction::SetTrue)
        .short(A_S_QUIET)
        .long(A_L_QUIET)
        .conflicts_with(A_L_VERBOSE)
}

fn arg_verbose() -> Arg {
    Arg::new(A_L_VERBOSE)
        .help("more verbose output (useful for debugging)")
        .short(A_S_VERBOSE)
        .long(A_L_VERBOSE)
        .action(ArgAction::SetTrue)
}

fn arg_force() -> Arg {
    Arg::new(A_L_FORCE)
        .help("forces overwriting an already existing output file")
        .short(A_S_FORCE)
        .long(A_L_FORCE)
        .action(ArgAction::SetTrue)
}

fn arg_header() -> Arg {
    Arg::new(A_L_HEADER)
        .help("The text to insert on top of the output file (generated Rust source code)")
        .long_help("The text to insert on top of the output file (generated Rust source code). It is inserted as is, so it has to consist of Rust comments, e.g. a license header.")
        .short(A_S_HEADER)
        .long(A_L_HEADER)
        .action(ArgAction::Set)
        .value_hint(ValueHint::Other)
        .value_name("TEXT")
}

fn arg_out_dir() -> Arg {
    Arg::new(A_L_OUT_DIR)
        .help("The output directory, where the Rust source file gets written to")
        .short(A_S_OUT_DIR)
        .long(A_L_OUT_DIR)
        .action(ArgAction::Set)
        .value_parser(value_parser!(std::path::PathBuf))
        .value_hint(ValueHint::DirPath)
        .value_name("OUT_DIR")
        .required_unless_present(A_L_VERSION)
}

fn arg_context() -> Arg {
    Arg::new(A_L_CONTEXT)
        .help("A JSON-LD document whose @context names the generated types and accessors")
        .short(A_S_CONTEXT)
        .long(A_L_CONTEXT)
        .action(ArgAction::Set)
        .value_parser(value_parser!(std::path::PathBuf))
        .value_hint(ValueHint::FilePath)
        .value_name("JSONLD_FILE")
}

fn arg_module_name() -> Arg {
    Arg::new(A_L_MODULE_NAME)
        .help("Name of the generated module (and file); defaults to the name of the first shapes file")
        .short(A_S_MODULE_NAME)
        .long(A_L_MODULE_NAME)
        .action(ArgAction::Set)
        .value_hint(ValueHint::Other)
        .value_name("NAME")
}

fn arg_runtime_crate() -> Arg {
    Arg::new(A_L_RUNTIME_CRATE)
        .help("Path of the runtime crate, as seen from the generated code")
        .short(A_S_RUNTIME_CRATE)
        .long(A_L_RUNTIME_CRATE)
        .action(ArgAction::Set)
        .value_hint(ValueHint::Other)
        .value_name("CRATE")
        .default_value(DEFAULT_RUNTIME_CRATE)
}

fn arg_shapes_file() -> Arg {
    Arg::new(A_L_SHAPES_FILE)
        .help("The input SHACL shapes file(s); RDF/Turtle, unless the file extension says otherwise")
        .action(ArgAction::Set)
        .value_parser(value_parser!(std::path::PathBuf))
        .value_hint(ValueHint::FilePath)
        .value_name("SHAPES_FILE")
        .required_unless_present(A_L_VERSION)
        .num_args(1..)
}

#[must_use]
pub fn args_matcher() -> Command {
    command!()
        .about(clap::crate_description!())
        .bin_name("shapemill")
        .help_expected(true)
        .disable_version_flag(true)
        .arg(arg_version())
        .arg(arg_quiet())
        .arg(arg_verbose())
        .arg(arg_force())
        .arg(arg_header())
        .arg(arg_out_dir())
        .arg(arg_context())
        .arg(arg_module_name())
        .arg(arg_runtime_crate())
        .arg(arg_shapes_file())
}

#[allow(clippy::print_stdout)]
fn print_version_and_exit(quiet: bool) {
    if !quiet {
        print!("shapemill ");
    }
    println!("{}", crate::VERSION);
    std::process::exit(0);
}

#[derive(Clone, Debug)]
pub struct Args {
    pub quiet: bool,
    pub verbose: bool,
    pub config: Config,
}

/// Extracts the configuration from parsed arguments.
///
/// # Panics
///
/// - The output directory was not supplied
/// - No shapes file was supplied
#[must_use]
pub fn config_from(args: &ArgMatches) -> Config {
    let out_dir = args
        .get_one::<PathBuf>(A_L_OUT_DIR)
        .cloned()
        .expect("The output directory is required");
    let shapes: Vec<PathBuf> = args
        .get_many(A_L_SHAPES_FILE)
        .expect("At least one SHACL shapes file is required")
        .cloned()
        .collect();

    Config {
        shapes,
        context: args.get_one::<PathBuf>(A_L_CONTEXT).cloned(),
        out_dir,
        module_name: args.get_one::<String>(A_L_MODULE_NAME).cloned(),
        runtime_crate: args
            .get_one::<String>(A_L_RUNTIME_CRATE)
            .cloned()
            .unwrap_or_else(|| DEFAULT_RUNTIME_CRATE.to_owned()),
        header: args.get_one::<String>(A_L_HEADER).cloned(),
        force: args.get_flag(A_L_FORCE),
    }
}

/// Parses the command line arguments,
/// including verification.
///
/// # Panics
///
/// See [`config_from`].
#[must_use]
pub fn parse() -> Args {
    let args = args_matcher().get_matches();

    let quiet = args.get_flag(A_L_QUIET);
    let version = args.get_flag(A_L_VERSION);
    if version {
        print_version_and_exit(quiet);
    }

    Args {
        quiet,
        verbose: args.get_flag(A_L_VERBOSE),
        config: config_from(&args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn args_are_consistent() {
        args_matcher().debug_assert();
    }

    #[test]
    fn all_options() {
        let args = args_matcher().get_matches_from([
            "shapemill",
            "-f",
            "-O",
            "src/generated",
            "-c",
            "people.jsonld",
            "-m",
            "domain",
            "-r",
            "crate::rt",
            "people.ttl",
            "org.ttl",
        ]);
        let config = config_from(&args);
        assert!(config.force);
        assert_eq!(config.out_dir, PathBuf::from("src/generated"));
        assert_eq!(config.context, Some(PathBuf::from("people.jsonld")));
        assert_eq!(config.module_name.as_deref(), Some("domain"));
        assert_eq!(config.runtime_crate, "crate::rt");
        assert_eq!(
            config.shapes,
            [PathBuf::from("people.ttl"), PathBuf::from("org.ttl")]
        );
    }

    #[test]
    fn defaults() {
        let args = args_matcher().get_matches_from(["shapemill", "-O", "out", "shapes.ttl"]);
        let config = config_from(&args);
        assert!(!config.force);
        assert_eq!(config.context, None);
        assert_eq!(config.runtime_crate, DEFAULT_RUNTIME_CRATE);
        assert!(args_matcher()
            .try_get_matches_from(["shapemill", "shapes.ttl"])
            .is_err());
    }
}
