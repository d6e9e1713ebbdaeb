//! # Delegating Pipelines
//!
//! A [`Pipeline`] composes an ordered list of stages into one callable, in the
//! spirit of middleware stacks: the **last** stage is the most specific and runs
//! first, and every stage may hand off to the one it overrides through a
//! [`Next`] handle.
//!
//! ```text
//! stages: [default, constructor, call-site]
//!
//! call(args) ──► call-site ──next──► constructor ──next──► default ──next──► default value
//! ```
//!
//! A stage can:
//! - answer without delegating (veto or accept outright),
//! - delegate with the same arguments: [`Next::call`],
//! - delegate with different arguments: [`Next::call_with`].
//!
//! How a stage is actually invoked is up to the pipeline's *invoker*, which
//! receives the current stage, the `Next` handle and the arguments. This keeps
//! the pipeline independent of the stage type: stages can be trait objects,
//! function pointers or plain data.

use std::rc::Rc;

/// Strategy used to call one stage.
pub type Invoker<S, A, R> = fn(&S, &Next<'_, S, A, R>, A) -> R;

pub struct Pipeline<S: ?Sized, A, R> {
    invoker: Invoker<S, A, R>,
    default: R,
}

impl<S: ?Sized, A: Clone, R: Clone> Pipeline<S, A, R> {
    /// `default` is what an exhausted (or empty) stage list yields.
    pub fn new(invoker: Invoker<S, A, R>, default: R) -> Self {
        Self { invoker, default }
    }

    /// Compose `stages` into a callable. The chain owns its own copy of the
    /// list, so chains built from the same pipeline never share state.
    pub fn build<I>(&self, stages: I) -> Chain<'_, S, A, R>
    where
        I: IntoIterator<Item = Rc<S>>,
    {
        Chain {
            pipeline: self,
            stages: stages.into_iter().collect(),
        }
    }

    fn run(&self, stages: &[Rc<S>], args: A) -> R {
        match stages.split_last() {
            None => self.default.clone(),
            Some((current, rest)) => {
                let next = Next {
                    pipeline: self,
                    rest,
                    args: args.clone(),
                };
                (self.invoker)(current, &next, args)
            }
        }
    }
}

/// A composed stage list, ready to be called.
pub struct Chain<'p, S: ?Sized, A, R> {
    pipeline: &'p Pipeline<S, A, R>,
    stages: Vec<Rc<S>>,
}

impl<S: ?Sized, A: Clone, R: Clone> Chain<'_, S, A, R> {
    pub fn call(&self, args: A) -> R {
        self.pipeline.run(&self.stages, args)
    }
}

/// Handle to the stages below the current one.
pub struct Next<'p, S: ?Sized, A, R> {
    pipeline: &'p Pipeline<S, A, R>,
    rest: &'p [Rc<S>],
    args: A,
}

impl<S: ?Sized, A: Clone, R: Clone> Next<'_, S, A, R> {
    /// Delegate with the arguments the current stage was called with.
    pub fn call(&self) -> R {
        self.pipeline.run(self.rest, self.args.clone())
    }

    /// Delegate with replacement arguments.
    pub fn call_with(&self, args: A) -> R {
        self.pipeline.run(self.rest, args)
    }
}
