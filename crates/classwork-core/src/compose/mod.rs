//! Mixin composer.
//!
//! `compose` turns a base class and a list of mixins into a new subclass:
//!
//! 1. Resolve the base and every mixin through the registry.
//! 2. Create an empty subclass of the base and attach its [`ResultContext`].
//! 3. Run every mixin's `before_composition` hook.
//! 4. Per mixin: copy its methods and statics (protected names excluded),
//!    then run its `on_composition` hook.
//! 5. Run every mixin's `after_composition` hook.
//!
//! Each phase visits mixins in declaration order.

mod chain;
mod context;

pub use context::{InvocationContext, MixinContext, OperationContext, ResultContext};

use std::sync::Arc;

use tracing::{debug, info};

use classwork_protocols::error::CompositionError;
use classwork_protocols::lifecycle::hooks;

use crate::class::{ClassDef, ClassRef, Definition, InvocationHookFn, Mixin, MixinRef};
use crate::registry::ClassRegistry;

/// Builds composed classes from registry definitions.
pub struct Composer {
    registry: Arc<ClassRegistry>,
}

impl Composer {
    pub fn new(registry: Arc<ClassRegistry>) -> Self {
        Self { registry }
    }

    /// Compose `base` with `mixins`. Unknown definitions fail here, not at
    /// instantiation.
    pub fn compose<B, I, M>(&self, base: B, mixins: I) -> Result<Arc<ClassDef>, CompositionError>
    where
        B: Into<ClassRef>,
        I: IntoIterator<Item = M>,
        M: Into<MixinRef>,
    {
        let base = self.registry.load_class(base)?;
        let mixins = mixins
            .into_iter()
            .map(|m| self.registry.load_mixin(m))
            .collect::<Result<Vec<_>, _>>()?;

        let class = Arc::new(ClassDef::subclass_of(base.clone()));
        let result = Arc::new(ResultContext::new(
            OperationContext { base, mixins },
            Arc::downgrade(&class),
        ));
        class.attach_composition(result.clone());

        run_invocation_hooks(&result, hooks::BEFORE_COMPOSITION, Mixin::before_composition)?;

        for mixin in &result.mixins {
            copy_members(&class, mixin);
            if let Some(hook) = mixin.on_composition() {
                hook(&MixinContext::new(&result, mixin))?;
            }
        }

        run_invocation_hooks(&result, hooks::AFTER_COMPOSITION, Mixin::after_composition)?;

        info!(
            "Composed {} with [{}]",
            result.base_name(),
            result.mixin_names().join(", ")
        );
        Ok(class)
    }

    /// Compose and register the result under `identifier`.
    pub fn compose_as<B, I, M>(
        &self,
        identifier: &str,
        base: B,
        mixins: I,
    ) -> Result<Arc<ClassDef>, CompositionError>
    where
        B: Into<ClassRef>,
        I: IntoIterator<Item = M>,
        M: Into<MixinRef>,
    {
        let class = self.compose(base, mixins)?;
        self.registry
            .define(identifier, Definition::Class(class.clone()))?;
        Ok(class)
    }

    pub fn registry(&self) -> &Arc<ClassRegistry> {
        &self.registry
    }
}

fn run_invocation_hooks(
    result: &ResultContext,
    hook_name: &'static str,
    select: fn(&Mixin) -> Option<&InvocationHookFn>,
) -> Result<(), CompositionError> {
    for mixin in &result.mixins {
        if let Some(hook) = select(mixin) {
            hook(&InvocationContext::new(
                MixinContext::new(result, mixin),
                hook_name,
            ))?;
        }
    }
    Ok(())
}

fn copy_members(class: &ClassDef, mixin: &Mixin) {
    for (name, method) in mixin.methods() {
        if hooks::is_protected(name) {
            debug!("Skipping protected member {}::{}", mixin.display_name(), name);
            continue;
        }
        class.insert_method(name.clone(), method.clone());
    }
    for (name, value) in mixin.statics() {
        if hooks::is_protected(name) {
            debug!("Skipping protected static {}::{}", mixin.display_name(), name);
            continue;
        }
        class.set_static(name.clone(), value.clone());
    }
}

#[cfg(test)]
#[path = "compose_tests.rs"]
mod tests;
