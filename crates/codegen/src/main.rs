// SPDX-FileCopyrightText: 2024 Robin Vobruba <hoijui.quaero@gmail.com>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

#![allow(unused_crate_dependencies)]

use cli_utils::logging;
use cli_utils::BoxResult;
use shapemill_codegen as codegen;
use tracing::metadata::LevelFilter;

use codegen::cli;

const fn log_level(args: &cli::Args) -> LevelFilter {
    if args.verbose {
        LevelFilter::DEBUG
    } else if args.quiet {
        LevelFilter::WARN
    } else {
        LevelFilter::INFO
    }
}

fn main() -> BoxResult<()> {
    let log_reload_handle = logging::setup(clap::crate_name!())?;

    let cli_args = cli::parse();
    logging::set_log_level_tracing(&log_reload_handle, log_level(&cli_args))?;

    let out_file = codegen::generate(&cli_args.config)?;
    tracing::debug!(
        "Generated module '{}' from {} shapes file(s)",
        out_file.display(),
        cli_args.config.shapes.len()
    );

    Ok(())
}
