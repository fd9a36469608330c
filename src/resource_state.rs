use crate::error::Error;
use serde::{Deserialize, Serialize};

/// Observable state of a single reactive resource.
///
/// Only the owning resource mutates it; consumers get a read-only view
/// through [`crate::reactive_resource::StateReader`].
#[derive(Deserialize, Serialize, PartialEq, Debug, Clone)]
pub struct ResourceState<T> {
    pub loading: bool,
    pub data: Option<T>,
    pub error: Option<Error>,
}

impl<T> ResourceState<T> {
    pub fn idle() -> Self {
        Self {
            loading: false,
            data: None,
            error: None,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }

    pub(crate) fn begin(&mut self) {
        self.loading = true;
        self.data = None;
        self.error = None;
    }

    // Success and failure only touch their own field: a late stale response
    // under the overwrite policy leaves whatever the newer cycle set.
    pub(crate) fn succeed(&mut self, data: T) {
        self.data = Some(data);
        self.loading = false;
    }

    pub(crate) fn fail(&mut self, error: Error) {
        self.error = Some(error);
        self.loading = false;
    }

    pub(crate) fn finish(&mut self) {
        self.loading = false;
    }
}

impl<T> Default for ResourceState<T> {
    fn default() -> Self {
        Self::idle()
    }
}
