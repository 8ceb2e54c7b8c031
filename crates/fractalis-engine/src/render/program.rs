//! Static checking of the two program stages.
//!
//! wgpu reports shader problems through its uncaptured-error handler, which is
//! too late and too coarse for start-up. The stages are therefore parsed and
//! validated with naga first, then linked by comparing the vertex outputs with
//! the fragment inputs.

use std::collections::BTreeSet;

use naga::valid::{Capabilities, ValidationFlags, Validator};

use crate::error::{SetupError, ShaderStage};

pub const VERTEX_ENTRY: &str = "vs_main";
pub const FRAGMENT_ENTRY: &str = "fs_main";

/// WGSL text of a vertex + fragment program.
#[derive(Debug, Copy, Clone)]
pub struct ProgramSource<'a> {
    pub vertex: &'a str,
    pub fragment: &'a str,
}

impl ProgramSource<'static> {
    /// The full-surface pass-through stage paired with the Julia coloring stage.
    pub const FRACTAL: ProgramSource<'static> = ProgramSource {
        vertex: include_str!("shaders/fullscreen.wgsl"),
        fragment: include_str!("shaders/julia.wgsl"),
    };
}

/// Both stages after parsing, validation and linking.
#[derive(Debug)]
pub struct CheckedProgram {
    pub vertex: naga::Module,
    pub fragment: naga::Module,
}

/// Compiles and links `source`.
pub fn check(source: &ProgramSource<'_>) -> Result<CheckedProgram, SetupError> {
    let vertex = compile_stage(ShaderStage::Vertex, source.vertex)?;
    let fragment = compile_stage(ShaderStage::Fragment, source.fragment)?;

    link(&vertex, &fragment)?;

    Ok(CheckedProgram { vertex, fragment })
}

fn compile_stage(stage: ShaderStage, source: &str) -> Result<naga::Module, SetupError> {
    let module = naga::front::wgsl::parse_str(source).map_err(|e| SetupError::Compile {
        stage,
        diagnostic: e.emit_to_string(source),
    })?;

    Validator::new(ValidationFlags::all(), Capabilities::empty())
        .validate(&module)
        .map_err(|e| SetupError::Compile {
            stage,
            diagnostic: e.emit_to_string(source),
        })?;

    Ok(module)
}

fn link(vertex: &naga::Module, fragment: &naga::Module) -> Result<(), SetupError> {
    let vs = entry_point(vertex, naga::ShaderStage::Vertex, VERTEX_ENTRY)?;
    let fs = entry_point(fragment, naga::ShaderStage::Fragment, FRAGMENT_ENTRY)?;

    let written: BTreeSet<u32> = vs
        .function
        .result
        .iter()
        .flat_map(|r| locations(vertex, r.ty, r.binding.as_ref()))
        .collect();

    for arg in &fs.function.arguments {
        for location in locations(fragment, arg.ty, arg.binding.as_ref()) {
            if !written.contains(&location) {
                return Err(SetupError::link(format!(
                    "fragment input @location({location}) is not written by the vertex stage"
                )));
            }
        }
    }

    Ok(())
}

fn entry_point<'m>(
    module: &'m naga::Module,
    stage: naga::ShaderStage,
    name: &str,
) -> Result<&'m naga::EntryPoint, SetupError> {
    module
        .entry_points
        .iter()
        .find(|ep| ep.stage == stage && ep.name == name)
        .ok_or_else(|| SetupError::link(format!("no {stage:?} entry point named `{name}`")))
}

/// User-defined `@location`s carried by a value, looking one level into structs.
fn locations(
    module: &naga::Module,
    ty: naga::Handle<naga::Type>,
    binding: Option<&naga::Binding>,
) -> Vec<u32> {
    match binding {
        Some(naga::Binding::Location { location, .. }) => vec![*location],
        Some(naga::Binding::BuiltIn(_)) => Vec::new(),
        None => match &module.types[ty].inner {
            naga::TypeInner::Struct { members, .. } => members
                .iter()
                .filter_map(|m| match m.binding {
                    Some(naga::Binding::Location { location, .. }) => Some(location),
                    _ => None,
                })
                .collect(),
            _ => Vec::new(),
        },
    }
}
