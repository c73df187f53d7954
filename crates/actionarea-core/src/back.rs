//! Back-navigation interception.
//!
//! Whenever a unit becomes the top of the master stack through a push,
//! the back control that leads away from it (provided by the unit beneath
//! it, or by the host for the first unit) is redirected to the controller.
//! The displaced binding is kept on a LIFO so a back gesture can be
//! observed by the transition automaton first and then forwarded to where
//! it was originally going.

use serde::Serialize;

use crate::content::{BackBinding, ContentId};
use crate::error::{Error, Result};
use crate::stack::ContentStack;

/// Who provides an intercepted back control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "id", rename_all = "lowercase")]
pub enum BackOwner {
    /// The content host's own back control
    Root,
    /// A unit on the stack
    Unit(ContentId),
}

/// One intercepted back control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BackOverride {
    /// Provider of the control
    pub owner: BackOwner,
    /// Binding that was displaced
    pub original: BackBinding,
}

/// LIFO of intercepted back controls, one per master stack unit.
#[derive(Debug)]
pub struct BackInterceptor {
    root: BackBinding,
    overrides: Vec<BackOverride>,
}

impl BackInterceptor {
    /// Create an interceptor for a host whose own back control is `root`.
    #[must_use]
    pub const fn new(root: BackBinding) -> Self {
        Self {
            root,
            overrides: Vec::new(),
        }
    }

    /// Intercept the back control leading away from the top of `stack`.
    pub fn intercept(&mut self, stack: &mut ContentStack) {
        let depth = self.overrides.len();
        debug_assert_eq!(depth + 1, stack.len(), "one override per unit below the top");

        let owner = if depth == 0 {
            BackOwner::Root
        } else {
            BackOwner::Unit(stack.all()[depth - 1].id())
        };
        let original = self.swap(stack, owner, BackBinding::intercepted());
        tracing::debug!(?owner, %original, depth = depth + 1, "back intercepted");
        self.overrides.push(BackOverride { owner, original });
    }

    /// Restore the most recent override and return the displaced binding
    /// for re-dispatch.
    pub fn replay(&mut self, stack: &mut ContentStack) -> Result<BackBinding> {
        let entry = self.overrides.pop().ok_or(Error::OverrideStackEmpty)?;
        self.swap(stack, entry.owner, entry.original.clone());
        tracing::debug!(owner = ?entry.owner, original = %entry.original, "back replayed");
        Ok(entry.original)
    }

    /// Restore overrides above `len` without dispatching anything.
    pub fn truncate(&mut self, stack: &mut ContentStack, len: usize) {
        while self.overrides.len() > len {
            if let Some(entry) = self.overrides.pop() {
                self.swap(stack, entry.owner, entry.original);
            }
        }
    }

    /// Restore every override without dispatching anything.
    pub fn release_all(&mut self, stack: &mut ContentStack) {
        self.truncate(stack, 0);
    }

    /// Re-intercept every position of `stack` after its contents were
    /// swapped wholesale.
    pub fn rebind(&mut self, stack: &mut ContentStack) {
        self.release_all(stack);
        let units = stack.drain_from(0);
        for unit in units {
            stack.push(unit);
            self.intercept(stack);
        }
    }

    /// Number of recorded overrides.
    pub fn len(&self) -> usize {
        self.overrides.len()
    }

    /// Whether no override is recorded.
    pub fn is_empty(&self) -> bool {
        self.overrides.is_empty()
    }

    /// Recorded overrides in push order.
    pub fn pending(&self) -> &[BackOverride] {
        &self.overrides
    }

    /// The host's back control as currently bound.
    pub const fn root(&self) -> &BackBinding {
        &self.root
    }

    fn swap(&mut self, stack: &mut ContentStack, owner: BackOwner, binding: BackBinding) -> BackBinding {
        match owner {
            BackOwner::Root => std::mem::replace(&mut self.root, binding),
            BackOwner::Unit(id) => match stack.get_mut(id) {
                Some(unit) => unit.replace_back(binding),
                None => {
                    // owner already left the stack; nothing to restore on it
                    tracing::trace!(%id, "back owner no longer on stack");
                    binding
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::ContentUnit;

    fn root() -> BackBinding {
        BackBinding::new("host", "dismiss")
    }

    fn push(stack: &mut ContentStack, interceptor: &mut BackInterceptor, title: &str) {
        let unit = ContentUnit::master(title).with_back(BackBinding::new(title, "pop"));
        stack.push(unit);
        interceptor.intercept(stack);
    }

    #[test]
    fn test_intercept_redirects_owner() {
        let mut stack = ContentStack::new();
        let mut interceptor = BackInterceptor::new(root());

        push(&mut stack, &mut interceptor, "a");
        assert!(interceptor.root().is_intercepted());
        assert_eq!(interceptor.pending()[0].owner, BackOwner::Root);

        push(&mut stack, &mut interceptor, "b");
        assert!(stack.all()[0].back().is_intercepted());
        assert!(!stack.all()[1].back().is_intercepted());
        assert_eq!(interceptor.len(), stack.len());
    }

    #[test]
    fn test_replay_is_lifo() {
        let mut stack = ContentStack::new();
        let mut interceptor = BackInterceptor::new(root());
        for title in ["a", "b", "c"] {
            push(&mut stack, &mut interceptor, title);
        }

        let mut replayed = Vec::new();
        while !stack.is_empty() {
            replayed.push(interceptor.replay(&mut stack).expect("one per unit"));
            stack.pop();
        }
        assert_eq!(
            replayed,
            [
                BackBinding::new("b", "pop"),
                BackBinding::new("a", "pop"),
                root()
            ]
        );
        assert_eq!(interceptor.root(), &root());
        assert!(matches!(
            interceptor.replay(&mut stack),
            Err(Error::OverrideStackEmpty)
        ));
    }

    #[test]
    fn test_release_restores_without_dispatch() {
        let mut stack = ContentStack::new();
        let mut interceptor = BackInterceptor::new(root());
        push(&mut stack, &mut interceptor, "a");
        push(&mut stack, &mut interceptor, "b");

        interceptor.truncate(&mut stack, 1);
        assert_eq!(interceptor.len(), 1);
        assert_eq!(stack.all()[0].back(), &BackBinding::new("a", "pop"));

        interceptor.release_all(&mut stack);
        assert!(interceptor.is_empty());
        assert_eq!(interceptor.root(), &root());
    }

    #[test]
    fn test_rebind_follows_new_contents() {
        let mut stack = ContentStack::new();
        let mut interceptor = BackInterceptor::new(root());
        push(&mut stack, &mut interceptor, "a");

        interceptor.release_all(&mut stack);
        stack.push(ContentUnit::detail("x"));
        interceptor.rebind(&mut stack);

        assert_eq!(interceptor.len(), 2);
        assert!(stack.all()[0].back().is_intercepted());
        assert_eq!(
            interceptor.pending()[1].original,
            BackBinding::new("a", "pop")
        );
    }
}
