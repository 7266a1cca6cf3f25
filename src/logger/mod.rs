//! Activity logging: JSONL append-only with graceful degradation.

pub mod jsonl;
