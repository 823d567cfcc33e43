//! Strongly typed, zero-cost index wrappers.
//!
//! Source data identifies nodes by string tokens.  The in-memory graph
//! interns those tokens once at load time and works exclusively with the
//! dense indices defined here; the token ↔ index lookup lives on
//! `RoadGraph` and is only consulted at the API boundary.

use std::fmt;

/// Define a `u32` dense index.  `$tag` prefixes the `Display` form.
macro_rules! dense_index {
    ($(#[$attr:meta])* $vis:vis struct $name:ident, $tag:literal;) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[cfg_attr(feature = "serde", serde(transparent))]
        $vis struct $name(pub u32);

        impl $name {
            /// Marks "no index", e.g. the predecessor of a search root.
            pub const INVALID: $name = $name(u32::MAX);

            /// Position in the graph's per-element arrays.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }

            /// `None` when `i` does not fit below [`Self::INVALID`].
            pub fn from_index(i: usize) -> Option<Self> {
                u32::try_from(i).ok().filter(|&v| v != u32::MAX).map($name)
            }

            #[inline]
            pub fn is_valid(self) -> bool {
                self != Self::INVALID
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::INVALID
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                if self.is_valid() {
                    write!(f, concat!($tag, "{}"), self.0)
                } else {
                    f.write_str(concat!($tag, "-"))
                }
            }
        }
    };
}

dense_index! {
    /// Dense index of a node in a loaded `RoadGraph`.
    pub struct NodeIdx, "n";
}

dense_index! {
    /// Dense index of a directed edge in a loaded `RoadGraph`.
    pub struct EdgeIdx, "e";
}
