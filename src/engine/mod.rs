//! # Engine Module
//!
//! Storage engine internals.
//!
//! Layers, from leaf to root:
//! - identifiers and signatures (`types`)
//! - the per-world type registry (`component`)
//! - type-erased columns (`storage`) grouped into archetypes (`archetype`)
//! - entity records (`entity`) and component bundles (`bundle`)
//! - the archetype membership index (`query`)
//! - deferred commands (`commands`) and the owning `world`
//!
//! Public API exposure is controlled by `lib.rs`.

pub mod types;
pub mod error;
pub mod config;
pub mod component;
pub mod bundle;
pub mod storage;
pub mod entity;
pub mod archetype;
pub mod query;
pub mod commands;
pub mod world;
