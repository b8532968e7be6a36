use super::*;

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("show")
            .route(web::get().to(show))
            .default_service(method_not_allowed("GET")),
    );

    cfg.service(
        web::resource("list_buckets")
            .route(web::get().to(list_buckets))
            .route(web::post().to(list_buckets_form))
            .default_service(method_not_allowed("GET, POST")),
    );

    cfg.service(
        web::resource("thaw")
            .route(web::post().to(thaw))
            .default_service(method_not_allowed("POST")),
    );
}

impl ResponseError for ArchivingError {
    fn status_code(&self) -> StatusCode {
        match self {
            ArchivingError::Backend(BackendError::Unavailable(_)) => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            ArchivingError::Backend(_) => StatusCode::BAD_GATEWAY,
            ArchivingError::Render(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse<BoxBody> {
        error!("{:?}", &self);

        let status_code = self.status_code();
        let page = ErrorTpl {
            status_code: status_code.as_u16(),
            message: self.to_string(),
        }
        .render();

        let mut res = HttpResponse::new(status_code);
        match page {
            Ok(body) => {
                let h_value = header::HeaderValue::from_static("text/html; charset=utf-8");
                res.headers_mut().insert(header::CONTENT_TYPE, h_value);
                res.set_body(BoxBody::new(body))
            }
            Err(_) => res.set_body(BoxBody::new(format!(
                "error occured (HTTP ERROR #{})",
                status_code
            ))),
        }
    }
}

async fn show(reg: Data<Registry>, user: Authenticated) -> Result<PageResult, ArchivingError> {
    reg.controller.show(&user).await
}

async fn list_buckets(
    reg: Data<Registry>,
    _: Authenticated,
    Query(params): Query<Params>,
) -> Result<PageResult, ArchivingError> {
    reg.controller.list_buckets(&params).await
}

/// query string params with the form body laid over them; a POST may come without a body
fn merged(Query(query): Query<Params>, form: Option<Form<Params>>) -> Params {
    match form {
        Some(Form(form)) => query.merge(form),
        None => query,
    }
}

async fn list_buckets_form(
    reg: Data<Registry>,
    _: Authenticated,
    query: Query<Params>,
    form: Option<Form<Params>>,
) -> Result<PageResult, ArchivingError> {
    reg.controller.list_buckets(&merged(query, form)).await
}

async fn thaw(
    reg: Data<Registry>,
    user: Authenticated,
    query: Query<Params>,
    form: Option<Form<Params>>,
) -> Result<PageResult, ArchivingError> {
    reg.controller.thaw(&user, merged(query, form)).await
}
