//! Value model of the SPIR-V shader generator.
//!
//! This crate provides:
//!
//! - **Entities**: types ([`TypeData`]), constants ([`ConstData`]) and
//!   module-scope variables ([`VariableData`]), all structurally hashed.
//!
//! - **Global structural table** ([`GlobalTable`]): one insertion-ordered,
//!   deduplicated table per session. Inserting an entity equal to an
//!   existing one returns the existing [`GlobalId`].
//!
//! - **Instructions** ([`Instr`]) in an arena owned by [`Module`], together
//!   with annotations and extension imports.
//!
//! - **Emission** ([`Shader::assign_ids`], [`Shader::to_text`]) to SPIR-V
//!   1.3 assembly, and a reader ([`parse_module`]) for the same text.
//!
//! # Design
//!
//! Entities never own each other; every cross-reference is a handle into
//! an arena. The `%N` ids of the text are assigned once, after
//! generation and reconditioning, and only live in the [`IdMap`].

mod annotation;
mod constant;
mod emit;
pub mod ext;
mod global;
mod id;
mod instr;
mod layout;
mod module;
pub mod op;
mod parse;
pub mod shader;
mod stats;
mod types;

pub use annotation::{Annotation, Decoration};
pub use constant::{ConstData, LitValue};
pub use emit::{EmitError, IdMap};
pub use ext::{GlslOp, GlslSignature, GLSL_STD_450};
pub use global::{GlobalEntity, GlobalTable, Interned, VariableData};
pub use id::{ExtImportId, GlobalId, InstrId, ScopeId};
pub use instr::{Instr, Operand, ValueRef};
pub use layout::{std430_offsets, BufferLayout, MemberLayout, ScalarKind};
pub use module::Module;
pub use op::{Category, Family, OpKind, OpTraits};
pub use parse::{parse_module, ParseError, ParsedLine, ParsedModule, ParsedOperand};
pub use shader::Shader;
pub use stats::ShaderStats;
pub use types::{Capability, StorageClass, TypeData};
