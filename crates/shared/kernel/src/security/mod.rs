//! Guards applied to untrusted request input.

pub mod filename;

pub use filename::FileNameGuard;
