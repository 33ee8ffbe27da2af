//! Presentation program compiler.
//!
//! WGSL text goes through three stages before wgpu sees it:
//! 1. compile: parse into a `naga` module
//! 2. link: whole-module validation
//! 3. validate: the `vs_main` vertex and `fs_main` fragment entry points exist
//!
//! A failure at any stage is reported with the compiler's diagnostic and
//! fails engine construction.

use std::path::PathBuf;

use crate::error::{EngineError, EngineResult, ProgramStage};

pub(crate) const VERTEX_ENTRY: &str = "vs_main";
pub(crate) const FRAGMENT_ENTRY: &str = "fs_main";

/// Built-in program for the textured-quad strategy.
pub const QUAD_WGSL: &str = include_str!("shaders/quad.wgsl");

/// Built-in program for the immediate-point strategy.
pub const POINT_WGSL: &str = include_str!("shaders/point.wgsl");

/// Where a presentation program's WGSL comes from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ProgramSource {
    /// The program embedded for the selected strategy.
    #[default]
    Builtin,
    Inline(String),
    /// Plain-text WGSL file read at construction time.
    File(PathBuf),
}

/// A compiled and validated presentation program.
#[derive(Debug, Clone)]
pub struct Program {
    label: String,
    wgsl: String,
}

impl Program {
    /// Loads and checks a program. `builtin` is used for [`ProgramSource::Builtin`].
    pub fn compile(label: &str, source: &ProgramSource, builtin: &str) -> EngineResult<Self> {
        let wgsl = match source {
            ProgramSource::Builtin => builtin.to_string(),
            ProgramSource::Inline(text) => text.clone(),
            ProgramSource::File(path) => {
                std::fs::read_to_string(path).map_err(|source| EngineError::ShaderIo {
                    path: path.clone(),
                    source,
                })?
            }
        };

        let fail = |stage, log: String| EngineError::Program {
            label: label.to_string(),
            stage,
            log,
        };

        let module = naga::front::wgsl::parse_str(&wgsl)
            .map_err(|e| fail(ProgramStage::Compile, e.emit_to_string(&wgsl)))?;

        naga::valid::Validator::new(
            naga::valid::ValidationFlags::all(),
            naga::valid::Capabilities::all(),
        )
        .validate(&module)
        .map_err(|e| fail(ProgramStage::Link, error_chain(&e)))?;

        let entries = [
            (VERTEX_ENTRY, naga::ShaderStage::Vertex),
            (FRAGMENT_ENTRY, naga::ShaderStage::Fragment),
        ];
        for (name, stage) in entries {
            let found = module
                .entry_points
                .iter()
                .any(|ep| ep.name == name && ep.stage == stage);
            if !found {
                return Err(fail(
                    ProgramStage::Validate,
                    format!("missing {stage:?} entry point `{name}`"),
                ));
            }
        }

        log::debug!("program `{label}` compiled ({} bytes of WGSL)", wgsl.len());

        Ok(Self {
            label: label.to_string(),
            wgsl,
        })
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn wgsl(&self) -> &str {
        &self.wgsl
    }

    /// Hands the checked source to wgpu.
    pub(crate) fn create_module(&self, device: &wgpu::Device) -> wgpu::ShaderModule {
        device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(&self.label),
            source: wgpu::ShaderSource::Wgsl(self.wgsl.as_str().into()),
        })
    }
}

fn error_chain(err: &dyn std::error::Error) -> String {
    let mut out = err.to_string();
    let mut cur = err.source();
    while let Some(e) = cur {
        out.push_str(": ");
        out.push_str(&e.to_string());
        cur = e.source();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stage_of(result: EngineResult<Program>) -> ProgramStage {
        match result {
            Err(EngineError::Program { stage, .. }) => stage,
            Err(other) => panic!("unexpected error: {other}"),
            Ok(_) => panic!("program unexpectedly compiled"),
        }
    }

    #[test]
    fn builtin_programs_compile() {
        let quad = Program::compile("quad", &ProgramSource::Builtin, QUAD_WGSL).unwrap();
        assert_eq!(quad.wgsl(), QUAD_WGSL);
        assert_eq!(quad.label(), "quad");

        Program::compile("point", &ProgramSource::Builtin, POINT_WGSL).unwrap();
    }

    #[test]
    fn inline_source_overrides_builtin() {
        let src = ProgramSource::Inline(POINT_WGSL.to_string());
        let p = Program::compile("custom", &src, QUAD_WGSL).unwrap();
        assert_eq!(p.wgsl(), POINT_WGSL);
    }

    #[test]
    fn syntax_error_fails_compile_stage() {
        let src = ProgramSource::Inline("fn vs_main( {".to_string());
        assert_eq!(stage_of(Program::compile("bad", &src, QUAD_WGSL)), ProgramStage::Compile);
    }

    #[test]
    fn missing_fragment_entry_fails_validate_stage() {
        let src = ProgramSource::Inline(
            "@vertex fn vs_main() -> @builtin(position) vec4<f32> { return vec4<f32>(0.0); }"
                .to_string(),
        );
        let err = Program::compile("vs-only", &src, QUAD_WGSL).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("fs_main"), "{msg}");
        assert!(matches!(
            err,
            EngineError::Program { stage: ProgramStage::Validate, .. }
        ));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let src = ProgramSource::File(PathBuf::from("/definitely/not/here.wgsl"));
        assert!(matches!(
            Program::compile("file", &src, QUAD_WGSL),
            Err(EngineError::ShaderIo { .. })
        ));
    }

    #[test]
    fn file_source_is_read() {
        let path = std::env::temp_dir().join(format!("rainstorm-point-{}.wgsl", std::process::id()));
        std::fs::write(&path, POINT_WGSL).unwrap();
        let p = Program::compile("file", &ProgramSource::File(path.clone()), QUAD_WGSL).unwrap();
        let _ = std::fs::remove_file(&path);
        assert_eq!(p.wgsl(), POINT_WGSL);
    }
}
