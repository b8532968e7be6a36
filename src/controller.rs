use std::sync::Arc;

use ::log::info;

use crate::backend::{Backend, BackendError, Params};
use crate::render::{Page, PageResult, RenderError, Renderer};
use crate::session::SessionUser;

#[derive(Debug, ::thiserror::Error)]
pub enum ArchivingError {
    #[error("{0}")]
    Backend(#[from] BackendError),
    #[error("{0}")]
    Render(#[from] RenderError),
}

/// Archive browsing pages: asks the backend for data and hands it to the renderer.
///
/// Holds no per-request state; one instance serves every worker.
#[derive(Clone)]
pub struct PageController {
    backend: Arc<dyn Backend>,
    renderer: Arc<dyn Renderer>,
}

impl PageController {
    pub fn new(backend: Arc<dyn Backend>, renderer: Arc<dyn Renderer>) -> Self {
        Self { backend, renderer }
    }

    pub async fn show(&self, user: &SessionUser) -> Result<PageResult, ArchivingError> {
        info!("`{}` opened the archiving page", user.name);

        let indexes = self.backend.list_indexes().await?;

        Ok(self.renderer.render(Page::Archiving { indexes })?)
    }

    pub async fn list_buckets(&self, params: &Params) -> Result<PageResult, ArchivingError> {
        let buckets = self.backend.list_buckets(params).await?;

        Ok(self.renderer.render(Page::BucketList { buckets })?)
    }

    pub async fn thaw(
        &self,
        user: &SessionUser,
        params: Params,
    ) -> Result<PageResult, ArchivingError> {
        let params = params.trimmed();
        info!("`{}` requested thaw: {:?}", user.name, params);

        self.backend.thaw(&params).await?;

        Ok(self.renderer.render(Page::Success)?)
    }
}
