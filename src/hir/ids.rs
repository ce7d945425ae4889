//! Arena identifiers for semantic entities.
//!
//! Every entity of a translation unit lives in one of the unit's arenas and is
//! referred to by a typed index. Ids are only meaningful for the unit that
//! produced them; they are assigned in discovery order, so comparing two ids
//! of the same kind compares the order in which binding found them.

use std::fmt;

macro_rules! arena_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
        pub struct $name(u32);

        impl $name {
            #[inline]
            pub(crate) fn from_index(index: usize) -> Self {
                Self(index as u32)
            }

            /// Position of the entity in its arena.
            #[inline]
            pub const fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!(stringify!($name), "({})"), self.0)
            }
        }
    };
}

arena_id!(
    /// A lexical scope: translation unit root, function body, block or struct body.
    ScopeId
);
arena_id!(VarDeclId);
arena_id!(VarUsageId);
arena_id!(TypeDeclId);
arena_id!(TypeUsageId);
arena_id!(
    /// A function prototype, definition, or synthetic constructor.
    FuncDeclId
);
arena_id!(FuncCallId);
arena_id!(
    /// The grouped identity of overload-compatible declarations and their calls.
    LogicalFunctionId
);
