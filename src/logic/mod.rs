//! Logic modules: translate a profile selection into concrete actions.
//!
//! # Modules
//!
//! - `resolver`: Package and service name resolution for a selection tree
//! - `selector`: Top level selection driven by `SelectResult`

pub mod resolver;
pub mod selector;
