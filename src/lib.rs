//! Installs multi-guard authentication scaffolding: derives cased naming
//! strings from a guard name, hydrates a stub template tree into a sibling
//! `.stubs` output, and copies the selected stack's subtree into the
//! application tree.

pub mod api;
pub mod config;
pub mod errors;
pub mod hydrate;
pub mod placeholders;
pub mod stacks;
pub mod stage;
pub mod transactions;
