// SPDX-FileCopyrightText: 2024 Robin Vobruba <hoijui.quaero@gmail.com>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

#![allow(clippy::print_stdout)]

use std::env;
use std::path::PathBuf;

use shapemill_codegen::config::Config;

const SHAPES: &str = "shapes/people.ttl";
const CONTEXT: &str = "context/people.jsonld";
const PRELUDE_SHAPES: &str = "shapes/prelude.ttl";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("cargo:rerun-if-changed={SHAPES}");
    println!("cargo:rerun-if-changed={CONTEXT}");
    println!("cargo:rerun-if-changed={PRELUDE_SHAPES}");

    let out_dir = PathBuf::from(env::var("OUT_DIR")?);
    shapemill_codegen::generate(&Config {
        shapes: vec![PathBuf::from(SHAPES)],
        context: Some(PathBuf::from(CONTEXT)),
        out_dir: out_dir.clone(),
        header: Some("// Generated from shapes/people.ttl and context/people.jsonld".to_owned()),
        force: true,
        ..Config::default()
    })?;
    // only used by the tests
    shapemill_codegen::generate(&Config {
        shapes: vec![PathBuf::from(PRELUDE_SHAPES)],
        out_dir,
        force: true,
        ..Config::default()
    })?;

    Ok(())
}
