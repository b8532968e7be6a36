use std::sync::Mutex;

pub use ::actix_web_lab::middleware::from_fn;
pub use ::async_trait::async_trait;
pub use ::aw::{
    cookie::Cookie,
    dev::ServiceResponse,
    http::{header, StatusCode},
    test,
    web::{self, Data},
};
pub use ::serde_json::json;
pub use std::sync::Arc;

pub use crate::main::{
    backend::{Backend, BackendError, BucketRecord, Params},
    controller::PageController,
    render::{AskamaRenderer, Page, PageResult, RenderError, Renderer},
    state::Registry,
};

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    ListIndexes,
    ListBuckets(Params),
    Thaw(Params),
}

#[derive(Debug, Clone, Copy)]
pub enum Failure {
    Unavailable,
    Rejected(u16),
}

#[derive(Debug, Default)]
pub struct FakeBackend {
    pub indexes: Vec<String>,
    pub buckets: Vec<BucketRecord>,
    pub failure: Option<Failure>,
    pub calls: Mutex<Vec<Call>>,
}

impl FakeBackend {
    pub fn with_indexes(indexes: &[&str]) -> Self {
        Self {
            indexes: indexes.iter().map(|i| i.to_string()).collect(),
            ..Default::default()
        }
    }

    pub fn failing(failure: Failure) -> Self {
        Self {
            failure: Some(failure),
            ..Default::default()
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) -> Result<(), BackendError> {
        self.calls.lock().unwrap().push(call);
        match self.failure {
            None => Ok(()),
            Some(Failure::Unavailable) => {
                Err(BackendError::Unavailable("connection refused".into()))
            }
            Some(Failure::Rejected(status)) => Err(BackendError::Rejected {
                status,
                message: "archiver exploded".into(),
            }),
        }
    }
}

#[async_trait]
impl Backend for FakeBackend {
    async fn list_indexes(&self) -> Result<Vec<String>, BackendError> {
        self.record(Call::ListIndexes)?;
        Ok(self.indexes.clone())
    }

    async fn list_buckets(&self, params: &Params) -> Result<Vec<BucketRecord>, BackendError> {
        self.record(Call::ListBuckets(params.clone()))?;
        Ok(self.buckets.clone())
    }

    async fn thaw(&self, params: &Params) -> Result<(), BackendError> {
        self.record(Call::Thaw(params.clone()))
    }
}

/// keeps every page it was asked to render; the body is the page's debug dump
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    pub pages: Mutex<Vec<Page>>,
    pub broken: bool,
}

impl RecordingRenderer {
    pub fn broken() -> Self {
        Self {
            broken: true,
            ..Default::default()
        }
    }

    pub fn pages(&self) -> Vec<Page> {
        self.pages.lock().unwrap().clone()
    }
}

impl Renderer for RecordingRenderer {
    fn render(&self, page: Page) -> Result<PageResult, RenderError> {
        let template = page.template_id();
        if self.broken {
            return Err(RenderError {
                template,
                source: ::askama::Error::Fmt(std::fmt::Error),
            });
        }

        let body = format!("{template}: {page:?}");
        self.pages.lock().unwrap().push(page);
        Ok(PageResult { template, body })
    }
}

pub fn registry(backend: Arc<FakeBackend>, renderer: Arc<dyn Renderer>) -> Data<Registry> {
    Data::new(Registry {
        controller: PageController::new(backend, renderer),
        login_url: String::from("/account/login"),
    })
}

pub fn bucket(value: ::serde_json::Value) -> BucketRecord {
    match value {
        ::serde_json::Value::Object(map) => BucketRecord::from(map),
        other => panic!("bucket must be a JSON object, got {other}"),
    }
}

pub fn params(pairs: &[(&str, &str)]) -> Params {
    pairs.iter().copied().collect()
}

pub fn dev_login_uri(name: &str) -> String {
    format!("/auth/dev-login?name={name}")
}

pub fn session_cookie<B>(res: &ServiceResponse<B>) -> Option<Cookie<'static>> {
    res.response()
        .cookies()
        .find(|c| c.name() == "session")
        .map(|c| c.into_owned())
}
