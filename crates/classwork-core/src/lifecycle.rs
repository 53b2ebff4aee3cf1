//! Construction lifecycle controller.
//!
//! Every instance is built through the same sequence of states:
//! - `INIT`: framework data and the config store
//! - `BEFORE_CONSTRUCT`, `AFTER_CONSTRUCT`, `BEFORE_READY`, `AFTER_READY`:
//!   the same-named hook of every contributing mixin, eldest first
//! - `CONSTRUCT`: every construction stage in the lineage, most-derived first,
//!   until a stage halts its ancestors
//! - `READY`: the single most-derived ready override
//!
//! Any error aborts the remaining states.

use std::sync::Arc;

use tracing::debug;

use classwork_protocols::error::LifecycleError;
use classwork_protocols::lifecycle::LifecycleState;
use classwork_protocols::stage::ConstructOutcome;

use crate::class::ClassDef;
use crate::context::ConstructionConfig;
use crate::instance::{Args, Instance};

#[cfg(test)]
#[path = "lifecycle_tests.rs"]
mod tests;

impl Instance {
    /// Create an instance of `class` and run its full construction sequence.
    pub fn construct(
        class: Arc<ClassDef>,
        config: ConstructionConfig,
    ) -> Result<Self, LifecycleError> {
        let mut instance = Instance::init(class.clone(), config);
        debug!("{} {} entered {}", instance.class_name(), instance.id(), instance.state());

        for state in LifecycleState::ORDER.into_iter().skip(1) {
            instance.set_state(state);
            debug!("{} {} entered {}", instance.class_name(), instance.id(), state);
            match state {
                LifecycleState::Construct => run_construct(&class, &mut instance)?,
                LifecycleState::Ready => run_ready(&class, &mut instance)?,
                _ => {
                    if let Some(hook) = state.hook_name() {
                        run_hooks(&class, hook, &mut instance)?;
                    }
                }
            }
        }
        Ok(instance)
    }
}

/// Run one hook chain; hook results are not consulted.
fn run_hooks(class: &ClassDef, hook: &str, instance: &mut Instance) -> Result<(), LifecycleError> {
    for (mixin, f) in class.method_chain(hook) {
        f(&mut *instance).map_err(|e| match e {
            LifecycleError::Custom(message) => LifecycleError::HookFailed {
                mixin,
                hook: hook.to_string(),
                message,
            },
            other => other,
        })?;
    }
    Ok(())
}

fn run_construct(class: &ClassDef, instance: &mut Instance) -> Result<(), LifecycleError> {
    for level in class.lineage() {
        let Some(stage) = level.construct_stage() else {
            continue;
        };
        let owner = level.display_name();
        let args = Args::resolve(stage.manifest(), instance.config(), &format!("{owner}::construct"))?;

        let outcome = (stage.run)(&mut *instance, &args)
            .map_err(|e| attribute(e, &owner, LifecycleState::Construct))?;
        match outcome {
            ConstructOutcome::Continue => {}
            ConstructOutcome::Merge(settings) => instance.config().merge(settings),
            ConstructOutcome::HaltAncestors => {
                debug!("{} halted ancestor construction", owner);
                break;
            }
        }
    }
    Ok(())
}

fn run_ready(class: &ClassDef, instance: &mut Instance) -> Result<(), LifecycleError> {
    if let Some((owner, ready)) = class.ready_override() {
        ready(&mut *instance).map_err(|e| attribute(e, &owner, LifecycleState::Ready))?;
    }
    Ok(())
}

fn attribute(err: LifecycleError, class: &str, state: LifecycleState) -> LifecycleError {
    match err {
        LifecycleError::Custom(message) => LifecycleError::StageFailed {
            class: class.to_string(),
            state,
            message,
        },
        other => other,
    }
}
