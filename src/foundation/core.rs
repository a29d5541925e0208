use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

pub use kurbo::{Affine, Point, Rect, Vec2};

/// Index of a slot in a [`crate::SceneGraph`].
///
/// Parent links between scene objects are expressed with this id rather than with shared
/// pointers: the graph owns every object, a link only names another slot.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct ObjectId(pub usize);

/// Cooperative cancellation flag shared between a caller and a parse call.
///
/// The flag is only consulted at parse entry; flipping it later does not interrupt work
/// that has already started.
#[derive(Clone, Debug, Default)]
pub struct AbortSignal(Arc<AtomicBool>);

impl AbortSignal {
    /// Create a signal in the non-aborted state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation.
    pub fn abort(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    /// Return `true` once [`AbortSignal::abort`] was called on any clone.
    pub fn is_aborted(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Cross-origin policy forwarded to collaborators that fetch external resources.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CrossOrigin {
    /// `crossorigin="anonymous"`.
    Anonymous,
    /// `crossorigin="use-credentials"`.
    UseCredentials,
}

impl CrossOrigin {
    /// Attribute spelling of the policy.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Anonymous => "anonymous",
            Self::UseCredentials => "use-credentials",
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
