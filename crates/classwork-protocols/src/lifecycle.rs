//! States of the staged construction protocol.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Construction state of an instance.
///
/// States are entered strictly in declaration order; each one completes
/// before the next begins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum LifecycleState {
    /// Framework data and the config store are being set up.
    Init = 0,
    /// Mixin `before_construct` hooks, eldest first.
    BeforeConstruct = 1,
    /// Construction stages, most-derived class first.
    Construct = 2,
    /// Mixin `after_construct` hooks, eldest first.
    AfterConstruct = 3,
    /// Mixin `before_ready` hooks, eldest first.
    BeforeReady = 4,
    /// The single most-derived ready override.
    Ready = 5,
    /// Mixin `after_ready` hooks, eldest first.
    AfterReady = 6,
    /// Fully constructed and ready for use.
    Constructed = 7,
}

impl LifecycleState {
    /// All states in execution order.
    pub const ORDER: [LifecycleState; 8] = [
        LifecycleState::Init,
        LifecycleState::BeforeConstruct,
        LifecycleState::Construct,
        LifecycleState::AfterConstruct,
        LifecycleState::BeforeReady,
        LifecycleState::Ready,
        LifecycleState::AfterReady,
        LifecycleState::Constructed,
    ];

    /// Mixin hook name driven by this state, if the state runs a hook chain.
    pub fn hook_name(self) -> Option<&'static str> {
        match self {
            LifecycleState::BeforeConstruct => Some(hooks::BEFORE_CONSTRUCT),
            LifecycleState::AfterConstruct => Some(hooks::AFTER_CONSTRUCT),
            LifecycleState::BeforeReady => Some(hooks::BEFORE_READY),
            LifecycleState::AfterReady => Some(hooks::AFTER_READY),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LifecycleState::Init => "INIT",
            LifecycleState::BeforeConstruct => "BEFORE_CONSTRUCT",
            LifecycleState::Construct => "CONSTRUCT",
            LifecycleState::AfterConstruct => "AFTER_CONSTRUCT",
            LifecycleState::BeforeReady => "BEFORE_READY",
            LifecycleState::Ready => "READY",
            LifecycleState::AfterReady => "AFTER_READY",
            LifecycleState::Constructed => "CONSTRUCTED",
        }
    }
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Well-known hook and member names.
pub mod hooks {
    pub const BEFORE_CONSTRUCT: &str = "before_construct";
    pub const AFTER_CONSTRUCT: &str = "after_construct";
    pub const BEFORE_READY: &str = "before_ready";
    pub const AFTER_READY: &str = "after_ready";

    pub const BEFORE_COMPOSITION: &str = "before_composition";
    pub const ON_COMPOSITION: &str = "on_composition";
    pub const AFTER_COMPOSITION: &str = "after_composition";

    pub const CONSTRUCT: &str = "construct";
    pub const READY: &str = "ready";

    /// Identity members carried by every definition.
    pub const FULL_NAME: &str = "full_name";
    pub const MIXINS: &str = "mixins";

    /// Member names a mixin can never copy onto a host class.
    pub const PROTECTED: &[&str] = &[
        CONSTRUCT,
        READY,
        BEFORE_CONSTRUCT,
        AFTER_CONSTRUCT,
        BEFORE_READY,
        AFTER_READY,
        BEFORE_COMPOSITION,
        ON_COMPOSITION,
        AFTER_COMPOSITION,
        FULL_NAME,
        MIXINS,
    ];

    /// Returns true if `name` is reserved for lifecycle or identity machinery.
    pub fn is_protected(name: &str) -> bool {
        PROTECTED.contains(&name)
    }
}
