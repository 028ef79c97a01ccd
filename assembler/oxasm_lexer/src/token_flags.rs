//! Keyword flag bitset attached to scanned tokens.

use bitflags::bitflags;

bitflags! {
    /// Flags inherited from keyword lookup.
    ///
    /// The scanner branches on `BRC`, `BRC_OPT`, and `WARN`; beyond that
    /// the set is opaque and flows through to the parser on the token.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct TokenFlags: u8 {
        /// Keyword is meaningful only inside `{...}` decorators.
        const BRC = 1 << 0;
        /// Keyword may appear inside braces as an optional mask decorator.
        const BRC_OPT = 1 << 1;
        /// Spelling from another assembler: warn, then honor the lookup.
        const WARN = 1 << 2;
        /// Any brace validity at all.
        const BRC_ANY = Self::BRC.bits() | Self::BRC_OPT.bits();
    }
}
