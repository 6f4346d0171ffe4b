// ============================================================================
// reactive-mv - Observe Module
// The generic publish/subscribe primitive and its equality functions
// ============================================================================

pub mod equality;
pub mod observable;

// Re-export for convenience
pub use equality::{always_equals, default_equals, never_equals, EqualsFn};
pub use observable::{observable, Observable, Observer};
