//! Shared transform helpers (matrix construction, composition, decomposition).

/// Matrix constructors and ordered composition.
pub mod affine;
/// Decomposition into translate/scale/rotate/skew components and recomposition.
pub mod decompose;
