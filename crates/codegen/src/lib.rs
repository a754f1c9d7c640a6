// SPDX-FileCopyrightText: 2024 Robin Vobruba <hoijui.quaero@gmail.com>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

use cli_utils as _;

pub mod cli;
pub mod codegen;
pub mod config;
mod error;
pub mod infer;
pub mod model;
pub mod naming;

use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};

use config::Config;
use git_version::git_version;
use oxrdfio::RdfFormat;
use shapemill_context::{parse_context_str, Context};
use shapemill_shapes::{format_from_path, read_shapes, Shape};

pub use codegen::{generate_class, render_module, GeneratedClass, RenderOptions};
pub use error::GenerateError;
pub use model::{ClassModel, ModelError, OntologyModel, PropertyModel};

// This tests rust code in the README with doc-tests.
// Though, It will not appear in the generated documentation.
#[doc = include_str!("../README.md")]
#[cfg(doctest)]
pub struct ReadmeDoctests;

pub const VERSION: &str = git_version!(cargo_prefix = "", fallback = "unknown");

fn read_shapes_file(path: &Path) -> Result<Vec<Shape>, GenerateError> {
    let format = if path.extension().is_none() {
        RdfFormat::Turtle
    } else {
        format_from_path(path).ok_or_else(|| GenerateError::UnknownFormat(path.to_path_buf()))?
    };
    let input = BufReader::new(File::open(path)?);
    let shapes = read_shapes(input, format).map_err(|source| GenerateError::Shapes {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!("Read {} shapes from '{}'", shapes.len(), path.display());
    Ok(shapes)
}

fn read_context_file(path: &Path) -> Result<Context, GenerateError> {
    let content = fs::read_to_string(path)?;
    parse_context_str(&content).map_err(|source| GenerateError::Context {
        path: path.to_path_buf(),
        source,
    })
}

/// The name of the generated module:
/// the configured one, or the file stem of the first shapes file.
///
/// # Errors
///
/// If no valid Rust identifier can be derived from it.
pub fn module_name(config: &Config) -> Result<String, GenerateError> {
    let raw = config.module_name.clone().unwrap_or_else(|| {
        config
            .shapes
            .first()
            .and_then(|path| path.file_stem())
            .map(|stem| stem.to_string_lossy().to_string())
            .unwrap_or_default()
    });
    naming::module_name(&raw).ok_or(GenerateError::InvalidModuleName(raw))
}

/// Reads all configured shapes files and the context,
/// and builds the model from them.
///
/// # Errors
///
/// - one of the input files can not be read or parsed
/// - the model can not be built (see [`OntologyModel::build`])
pub fn load_model(config: &Config) -> Result<OntologyModel, GenerateError> {
    let mut shapes = Vec::new();
    for path in &config.shapes {
        shapes.append(&mut read_shapes_file(path)?);
    }
    if shapes.is_empty() {
        tracing::warn!("No shapes with a target class found; the generated module will be empty");
    }
    let context = match &config.context {
        Some(path) => read_context_file(path)?,
        None => Context::default(),
    };
    Ok(OntologyModel::build(shapes, context)?)
}

/// Generates the Rust source code for the configured shapes,
/// without writing it anywhere.
///
/// # Errors
///
/// See [`load_model`].
pub fn generate_source(config: &Config) -> Result<String, GenerateError> {
    let model = load_model(config)?;
    tracing::info!("Generating code for {} classes", model.classes.len());
    Ok(render_module(
        &model,
        &RenderOptions {
            header: config.header.clone(),
            runtime_crate: config.runtime_crate.clone(),
        },
    ))
}

/// Generates one Rust module from one or more SHACL shapes files
/// (and optionally a JSON-LD context),
/// and writes it to `<out_dir>/<module_name>.rs`.
///
/// Either everything is generated, or nothing is written.
///
/// # Errors
///
/// - one of the input files can not be read or parsed
/// - the model can not be built (see [`OntologyModel::build`])
/// - the module name is not a valid Rust identifier
/// - the output file exists already, and `force` is not set
/// - the output file can not be written
pub fn generate(config: &Config) -> Result<PathBuf, GenerateError> {
    let module = module_name(config)?;
    let out_file = config.out_dir.join(format!("{module}.rs"));
    if !config.force && out_file.exists() {
        return Err(GenerateError::OutputExists(out_file));
    }
    let source = generate_source(config)?;
    fs::create_dir_all(&config.out_dir)?;
    fs::write(&out_file, source)?;
    tracing::info!("Wrote '{}'", out_file.display());
    Ok(out_file)
}
