//! Composition metadata.
//!
//! Four widening contexts, each derefs to the one it extends:
//! [`InvocationContext`] → [`MixinContext`] → [`ResultContext`] → [`OperationContext`].

use std::ops::Deref;
use std::sync::{Arc, Weak};

use crate::class::{ClassDef, Mixin};

/// The base class and mixins of one `compose` call, in declaration order.
#[derive(Debug)]
pub struct OperationContext {
    pub base: Arc<ClassDef>,
    pub mixins: Vec<Arc<Mixin>>,
}

impl OperationContext {
    pub fn base_name(&self) -> String {
        self.base.display_name()
    }

    pub fn mixin_names(&self) -> Vec<String> {
        self.mixins.iter().map(|m| m.display_name()).collect()
    }
}

/// Operation context plus the class it produced.
///
/// Attached once to the composed class. The back-reference is weak so the
/// record does not keep its own class alive.
#[derive(Debug)]
pub struct ResultContext {
    operation: OperationContext,
    class: Weak<ClassDef>,
}

impl ResultContext {
    pub(crate) fn new(operation: OperationContext, class: Weak<ClassDef>) -> Self {
        Self { operation, class }
    }

    /// The composed class, while it is alive.
    pub fn class(&self) -> Option<Arc<ClassDef>> {
        self.class.upgrade()
    }

    pub fn operation(&self) -> &OperationContext {
        &self.operation
    }
}

impl Deref for ResultContext {
    type Target = OperationContext;

    fn deref(&self) -> &Self::Target {
        &self.operation
    }
}

/// Result context narrowed to one contributing mixin.
#[derive(Debug, Clone, Copy)]
pub struct MixinContext<'a> {
    result: &'a ResultContext,
    pub mixin: &'a Arc<Mixin>,
}

impl<'a> MixinContext<'a> {
    pub(crate) fn new(result: &'a ResultContext, mixin: &'a Arc<Mixin>) -> Self {
        Self { result, mixin }
    }

    pub fn mixin_name(&self) -> String {
        self.mixin.display_name()
    }

    pub fn result(&self) -> &'a ResultContext {
        self.result
    }
}

impl Deref for MixinContext<'_> {
    type Target = ResultContext;

    fn deref(&self) -> &Self::Target {
        self.result
    }
}

/// Mixin context narrowed to one hook being invoked.
#[derive(Debug, Clone, Copy)]
pub struct InvocationContext<'a> {
    mixin: MixinContext<'a>,
    pub hook: &'static str,
}

impl<'a> InvocationContext<'a> {
    pub(crate) fn new(mixin: MixinContext<'a>, hook: &'static str) -> Self {
        Self { mixin, hook }
    }

    pub fn mixin_context(&self) -> &MixinContext<'a> {
        &self.mixin
    }
}

impl<'a> Deref for InvocationContext<'a> {
    type Target = MixinContext<'a>;

    fn deref(&self) -> &Self::Target {
        &self.mixin
    }
}
