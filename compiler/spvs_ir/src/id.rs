//! Handle newtypes for the session arenas.
//!
//! Entities never own each other. A vector type refers to its element
//! through a [`GlobalId`], an `OpIAdd` refers to its operands through
//! [`InstrId`]s, and so on. Handles are allocated sequentially starting
//! from 0 by the arena that owns the entity; they are *not* the `%N`
//! result ids of the emitted text, which are assigned once at the end
//! (see [`crate::emit::IdMap`]).

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[repr(transparent)]
        pub struct $name(u32);

        impl $name {
            /// Create a handle from a raw index.
            #[inline]
            pub const fn new(raw: u32) -> Self {
                Self(raw)
            }

            /// Create a handle from an arena length.
            #[inline]
            #[expect(
                clippy::cast_possible_truncation,
                reason = "a generation session never allocates u32::MAX entities"
            )]
            pub const fn from_index(index: usize) -> Self {
                Self(index as u32)
            }

            /// Get the raw `u32` value.
            #[inline]
            pub const fn raw(self) -> u32 {
                self.0
            }

            /// Get the index as `usize` (for indexing into `Vec`s).
            #[inline]
            pub const fn index(self) -> usize {
                self.0 as usize
            }
        }
    };
}

define_id! {
    /// Slot in the global structural table (types, constants, global variables).
    GlobalId
}

define_id! {
    /// Slot in the instruction arena (statements and structural markers).
    InstrId
}

define_id! {
    /// Slot in the extension-import table.
    ExtImportId
}

define_id! {
    /// Node in the lexical scope tree.
    ScopeId
}

impl ScopeId {
    /// The global scope every session starts with.
    pub const ROOT: ScopeId = ScopeId(0);
}
