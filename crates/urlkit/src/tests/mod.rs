//! Crate-wide property and scenario tests, colocated here rather than next
//! to the code they exercise because they cross module boundaries (codec
//! round-trip laws call both `codec` and, indirectly through `parser`,
//! `tables`). Per-module unit tests stay next to their module.

mod codec_laws;
