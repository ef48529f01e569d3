use std::future::Future;

use crate::error::HostError;

/// A render module that finished its load phase.
///
/// Only [`Bootstrap::load`] produces this, so a host can never be built around
/// a module that is still loading.
#[derive(Debug)]
pub struct ReadyModule<R> {
    routine: R,
}

impl<R> ReadyModule<R> {
    #[inline]
    pub fn get_ref(&self) -> &R {
        &self.routine
    }

    pub(crate) fn into_inner(self) -> R {
        self.routine
    }
}

/// Async phase of host startup.
pub struct Bootstrap;

impl Bootstrap {
    /// Awaits the render module. Load failures are fatal and map to
    /// [`HostError::ModuleLoad`].
    pub async fn load<R, Fut>(load: Fut) -> anyhow::Result<ReadyModule<R>>
    where
        Fut: Future<Output = anyhow::Result<R>>,
    {
        let routine = load
            .await
            .map_err(|e| HostError::ModuleLoad { reason: format!("{e:#}") })?;
        log::debug!("render module ready");
        Ok(ReadyModule { routine })
    }
}
