//! Scoped release of provider resources.

use core::ops::{Deref, DerefMut};

use super::provider::LineProvider;

/// One provider resource, released through `free` when dropped.
///
/// Guards declared in sequence are dropped in reverse, so a chain of
/// acquisitions unwinds in reverse order on every return path.
pub(crate) struct Held<'p, P: LineProvider, T> {
    provider: &'p P,
    resource: Option<T>,
    free: fn(&P, T),
}

impl<'p, P: LineProvider, T> Held<'p, P, T> {
    pub(crate) fn new(provider: &'p P, resource: T, free: fn(&P, T)) -> Self {
        Self {
            provider,
            resource: Some(resource),
            free,
        }
    }

    pub(crate) fn provider(&self) -> &'p P {
        self.provider
    }
}

impl<P: LineProvider, T> Deref for Held<'_, P, T> {
    type Target = T;

    fn deref(&self) -> &T {
        match self.resource {
            Some(ref resource) => resource,
            None => unreachable!("resource is only taken on drop"),
        }
    }
}

impl<P: LineProvider, T> DerefMut for Held<'_, P, T> {
    fn deref_mut(&mut self) -> &mut T {
        match self.resource {
            Some(ref mut resource) => resource,
            None => unreachable!("resource is only taken on drop"),
        }
    }
}

impl<P: LineProvider, T> Drop for Held<'_, P, T> {
    fn drop(&mut self) {
        if let Some(resource) = self.resource.take() {
            (self.free)(self.provider, resource);
        }
    }
}
