// SPDX-FileCopyrightText: 2024 Robin Vobruba <hoijui.quaero@gmail.com>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::path::PathBuf;

pub const DEFAULT_RUNTIME_CRATE: &str = "shapemill_runtime";

#[derive(Clone, Debug)]
pub struct Config {
    /**
     * Paths to SHACL shapes files,
     * all of which together make up one ontology.
     * The RDF format is chosen by file extension,
     * defaulting to RDF/Turtle.
     */
    pub shapes: Vec<PathBuf>,
    /**
     * Path to a JSON-LD document with a `@context`,
     * used to name the generated types and accessors.
     */
    pub context: Option<PathBuf>,
    /**
     * Where to write the output Rust source file to.
     */
    pub out_dir: PathBuf,
    /**
     * Name of the generated module (and its file).
     * Defaults to the file stem of the first shapes file.
     */
    pub module_name: Option<String>,
    /**
     * Name of the runtime crate, as seen from the generated code.
     */
    pub runtime_crate: String,
    /**
     * The text to insert on top of the output file
     * (generated Rust source code).
     */
    pub header: Option<String>,
    /**
     * Whether to overwrite a potentially already existing output file.
     */
    pub force: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            shapes: Vec::new(),
            context: None,
            out_dir: PathBuf::new(),
            module_name: None,
            runtime_crate: DEFAULT_RUNTIME_CRATE.to_owned(),
            header: None,
            force: false,
        }
    }
}
