//! Decorations attached to global entities.

use std::fmt;

use crate::GlobalId;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Decoration {
    Block,
    DescriptorSet(u32),
    Binding(u32),
    Offset(u32),
}

impl fmt::Display for Decoration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Decoration::Block => f.write_str("Block"),
            Decoration::DescriptorSet(set) => write!(f, "DescriptorSet {set}"),
            Decoration::Binding(binding) => write!(f, "Binding {binding}"),
            Decoration::Offset(offset) => write!(f, "Offset {offset}"),
        }
    }
}

/// Out-of-band metadata, never part of the executable stream.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Annotation {
    /// `OpDecorate %target <decoration>`
    Decorate {
        target: GlobalId,
        decoration: Decoration,
    },
    /// `OpMemberDecorate %target <member> <decoration>`
    MemberDecorate {
        target: GlobalId,
        member: u32,
        decoration: Decoration,
    },
}

impl Annotation {
    pub fn target(&self) -> GlobalId {
        match *self {
            Annotation::Decorate { target, .. } | Annotation::MemberDecorate { target, .. } => {
                target
            }
        }
    }
}
