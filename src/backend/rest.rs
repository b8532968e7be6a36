use std::time::Duration;

use ::async_trait::async_trait;
use ::log::trace;
use ::reqwest::{Client, Response};
use ::serde::Deserialize;
use ::url::Url;

use super::{Backend, BackendError, BucketRecord, Params};

const INDEX_LIST: &str = "shuttl/rest/archiver/index/list";
const BUCKET_LIST: &str = "shuttl/rest/archiver/bucket/list";
const BUCKET_THAW: &str = "shuttl/rest/archiver/bucket/thaw";

impl From<::reqwest::Error> for BackendError {
    fn from(err: ::reqwest::Error) -> Self {
        if err.is_decode() {
            BackendError::Malformed(err.to_string())
        } else if let Some(status) = err.status() {
            BackendError::Rejected {
                status: status.as_u16(),
                message: err.to_string(),
            }
        } else {
            BackendError::Unavailable(err.to_string())
        }
    }
}

#[derive(Debug, Deserialize)]
struct BucketList {
    buckets: Vec<BucketRecord>,
}

/// Talks to the archiver's REST API.
#[derive(Debug, Clone)]
pub struct RestBackend {
    http: Client,
    base: Url,
}

impl RestBackend {
    pub fn new(base: Url, timeout: Duration) -> Result<Self, ::reqwest::Error> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(http, base))
    }

    pub fn with_client(http: Client, mut base: Url) -> Self {
        // relative joins drop the last path segment unless it ends with `/`
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        Self { http, base }
    }

    fn endpoint(&self, path: &str) -> Result<Url, BackendError> {
        self.base
            .join(path)
            .map_err(|err| BackendError::Unavailable(format!("bad archiver url: {err}")))
    }
}

/// passes 2xx answers through, turns the rest into `Rejected` with the body as message
async fn check(res: Response) -> Result<Response, BackendError> {
    let status = res.status();
    if status.is_success() {
        return Ok(res);
    }

    let message = res.text().await.unwrap_or_default();
    Err(BackendError::Rejected {
        status: status.as_u16(),
        message,
    })
}

#[async_trait]
impl Backend for RestBackend {
    async fn list_indexes(&self) -> Result<Vec<String>, BackendError> {
        let url = self.endpoint(INDEX_LIST)?;
        trace!("GET {url}");

        let res = check(self.http.get(url).send().await?).await?;
        Ok(res.json().await?)
    }

    async fn list_buckets(&self, params: &Params) -> Result<Vec<BucketRecord>, BackendError> {
        let url = self.endpoint(BUCKET_LIST)?;
        trace!("GET {url} {:?}", params);

        let res = check(self.http.get(url).query(params).send().await?).await?;
        let BucketList { buckets } = res.json().await?;
        Ok(buckets)
    }

    async fn thaw(&self, params: &Params) -> Result<(), BackendError> {
        let url = self.endpoint(BUCKET_THAW)?;
        trace!("POST {url} {:?}", params);

        check(self.http.post(url).form(params).send().await?).await?;
        Ok(())
    }
}
