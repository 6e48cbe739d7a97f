//! The finished artifact of one generation session.

use std::collections::BTreeSet;

use crate::emit::{self, EmitError, IdMap};
use crate::global::GlobalEntity;
use crate::module::Module;
use crate::types::Capability;
use crate::InstrId;

/// SPIR-V version the text targets.
pub const SPIRV_VERSION: &str = "1.3";
/// Addressing and memory model.
pub const MEMORY_MODEL: &str = "Logical GLSL450";
/// Execution model of the single entry point.
pub const EXECUTION_MODEL: &str = "GLCompute";
/// Name of the entry point function.
pub const ENTRY_POINT_NAME: &str = "main";
/// Workgroup size of the entry point.
pub const LOCAL_SIZE: [u32; 3] = [1, 1, 1];

/// A module plus its laid-out program body.
///
/// Created once per session. Generation and reconditioning mutate the body
/// through [`Shader::body_mut`]; [`Shader::assign_ids`] then freezes the
/// numbering used by [`Shader::to_text`]. Touching the body again discards
/// the numbering.
#[derive(Clone, Debug)]
pub struct Shader {
    pub module: Module,
    body: Vec<InstrId>,
    entry_point: InstrId,
    ids: Option<IdMap>,
}

impl Shader {
    /// `entry_point` is the `OpFunction` of `main`.
    pub fn new(module: Module, body: Vec<InstrId>, entry_point: InstrId) -> Self {
        Self {
            module,
            body,
            entry_point,
            ids: None,
        }
    }

    /// The flat instruction stream, in emission order.
    pub fn body(&self) -> &[InstrId] {
        &self.body
    }

    /// Mutable stream. Drops any assigned ids.
    pub fn body_mut(&mut self) -> &mut Vec<InstrId> {
        self.ids = None;
        &mut self.body
    }

    pub fn entry_point(&self) -> InstrId {
        self.entry_point
    }

    /// `Shader` plus whatever the global table's types need, sorted.
    pub fn capabilities(&self) -> Vec<Capability> {
        let mut caps = BTreeSet::from([Capability::Shader]);
        caps.extend(self.module.globals.iter().filter_map(|(_, e)| match e {
            GlobalEntity::Type(t) => t.required_capabilities(),
            _ => None,
        }));
        caps.into_iter().collect()
    }

    /// Header bound: instructions plus global-table entries.
    pub fn bound(&self) -> usize {
        self.body.len() + self.module.globals.len()
    }

    /// Number the extension imports, the global table and the stream.
    pub fn assign_ids(&mut self) {
        self.ids = Some(IdMap::assign(&self.module, &self.body));
    }

    pub fn ids(&self) -> Option<&IdMap> {
        self.ids.as_ref()
    }

    /// Serialize to SPIR-V assembly. Requires [`Shader::assign_ids`].
    pub fn to_text(&self) -> Result<String, EmitError> {
        let ids = self.ids.as_ref().ok_or(EmitError::IdsNotAssigned)?;
        emit::emit(self, ids)
    }
}
