// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// Plain Rust structs and traits describing what the system
// works with. No Burn types, no file I/O.
//
// Reference: Rust Book §5 (Structs), §10 (Traits)

// A (dialogue, summary) example
pub mod dialogue;

// Abstractions implemented by the data layer
pub mod traits;
