use ::askama_actix::Template;
use ::aw::{body::BoxBody, http::header, HttpRequest, HttpResponse, Responder};

use crate::backend::BucketRecord;

#[derive(Debug, ::thiserror::Error)]
#[error("failed to render `{template}`: {source}")]
pub struct RenderError {
    pub template: &'static str,
    #[source]
    pub source: ::askama::Error,
}

/// A template together with the values bound into it.
#[derive(Debug, Clone, PartialEq)]
pub enum Page {
    Archiving { indexes: Vec<String> },
    BucketList { buckets: Vec<BucketRecord> },
    Success,
}

impl Page {
    pub fn template_id(&self) -> &'static str {
        match self {
            Page::Archiving { .. } => "archiving",
            Page::BucketList { .. } => "bucket_list",
            Page::Success => "success",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageResult {
    pub template: &'static str,
    pub body: String,
}

impl Responder for PageResult {
    type Body = BoxBody;

    fn respond_to(self, _req: &HttpRequest) -> HttpResponse<Self::Body> {
        HttpResponse::Ok()
            .insert_header((header::CONTENT_TYPE, "text/html; charset=utf-8"))
            .body(self.body)
    }
}

pub trait Renderer: Send + Sync {
    fn render(&self, page: Page) -> Result<PageResult, RenderError>;
}

#[derive(Template)]
#[template(path = "archiving.html")]
struct ArchivingTpl {
    indexes: Vec<String>,
}

#[derive(Template)]
#[template(path = "bucket_list.html")]
struct BucketListTpl {
    buckets: Vec<BucketRecord>,
}

#[derive(Template)]
#[template(path = "success.html")]
struct SuccessTpl {}

/// Renders pages from the compiled templates under `templates/`.
#[derive(Debug, Default, Clone, Copy)]
pub struct AskamaRenderer;

impl Renderer for AskamaRenderer {
    fn render(&self, page: Page) -> Result<PageResult, RenderError> {
        let template = page.template_id();

        let body = match page {
            Page::Archiving { indexes } => ArchivingTpl { indexes }.render(),
            Page::BucketList { buckets } => BucketListTpl { buckets }.render(),
            Page::Success => SuccessTpl {}.render(),
        }
        .map_err(|source| RenderError { template, source })?;

        Ok(PageResult { template, body })
    }
}
