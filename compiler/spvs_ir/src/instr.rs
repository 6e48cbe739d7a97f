//! Statements and structural markers of a function body.
//!
//! Instructions share one uniform shape (opcode, optional result type,
//! operand list) so passes that only rewrite operands, like
//! reconditioning, do not need a match arm per opcode.

use std::fmt;

use smallvec::SmallVec;

use crate::ext::GlslOp;
use crate::op::OpKind;
use crate::types::StorageClass;
use crate::{ExtImportId, GlobalId, InstrId};

/// Reference to something that has (or will get) a result id.
///
/// Globals resolve through the global table's slot; instructions resolve
/// through their own slot in the emitted stream.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ValueRef {
    Global(GlobalId),
    Instr(InstrId),
}

impl From<GlobalId> for ValueRef {
    fn from(id: GlobalId) -> Self {
        ValueRef::Global(id)
    }
}

impl From<InstrId> for ValueRef {
    fn from(id: InstrId) -> Self {
        ValueRef::Instr(id)
    }
}

/// One operand of an instruction, tagged with how it renders.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operand {
    /// Renders as `%<id>`.
    Value(ValueRef),
    /// Renders as a bare number.
    Literal(u32),
    /// Renders as the storage class token.
    StorageClass(StorageClass),
    /// Renders as a bare enum token such as `None`.
    Keyword(&'static str),
    /// Extended instruction set import, renders as `%<id>`.
    ExtSet(ExtImportId),
    /// Extended instruction, renders as its bare name.
    ExtOp(GlslOp),
}

impl Operand {
    pub fn value(value: impl Into<ValueRef>) -> Self {
        Operand::Value(value.into())
    }

    pub fn as_value(self) -> Option<ValueRef> {
        match self {
            Operand::Value(v) => Some(v),
            _ => None,
        }
    }
}

/// A statement or marker.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Instr {
    pub kind: OpKind,
    /// `None` for `Untyped` opcodes.
    pub result_type: Option<GlobalId>,
    pub operands: SmallVec<[Operand; 4]>,
}

impl Instr {
    pub fn new(
        kind: OpKind,
        result_type: Option<GlobalId>,
        operands: impl IntoIterator<Item = Operand>,
    ) -> Self {
        Self {
            kind,
            result_type,
            operands: operands.into_iter().collect(),
        }
    }

    /// Values read by this instruction.
    pub fn used_values(&self) -> impl Iterator<Item = ValueRef> + '_ {
        self.operands.iter().filter_map(|op| op.as_value())
    }

    /// Replace the `index`-th operand with a value reference.
    ///
    /// Returns the previous operand, or `None` if out of range.
    pub fn replace_operand(&mut self, index: usize, value: ValueRef) -> Option<Operand> {
        let slot = self.operands.get_mut(index)?;
        Some(std::mem::replace(slot, Operand::Value(value)))
    }
}

impl fmt::Display for Instr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} operands)", self.kind, self.operands.len())
    }
}
