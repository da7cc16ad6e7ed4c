// =============================================================================
// Decoder Submodules
// =============================================================================

/// Search limits, heuristic selection and the decoder builder.
pub mod builder;

/// Detector to mechanism adjacency.
pub mod index;

/// Best-first search over residual syndromes.
pub mod search;

// =============================================================================
// Public Re-exports
// =============================================================================

pub use builder::{DecoderBuilder, Heuristic, SearchConfig};
pub use index::SyndromeIndex;
pub use search::{Decoding, Residual, SearchDecoder};
