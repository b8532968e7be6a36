use ::actix_session::Session;
use ::actix_web_lab::middleware::from_fn;
use ::askama_actix::Template;
use ::aw::{
    body::BoxBody,
    http::{header, StatusCode},
    web::{self, Data, Form, Query, Redirect},
    HttpRequest, HttpResponse, Responder, ResponseError,
};
use ::log::error;
use ::serde::Deserialize;

use crate::backend::{BackendError, Params};
use crate::controller::ArchivingError;
use crate::middleware::{self, Authenticated};
use crate::render::PageResult;
use crate::session::{SessionUser, SESSION_USER_KEY};
use crate::state::*;

mod archiving;
mod auth;
mod index;

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/").route(web::get().to(index::get)));
    cfg.service(
        web::scope("/archiving")
            .wrap(from_fn(middleware::require_login))
            .configure(archiving::config),
    );
    cfg.service(web::scope("/auth").configure(auth::config));
}

/// answers 405 listing the methods the resource does accept
fn method_not_allowed(allow: &'static str) -> ::aw::Route {
    web::route().to(move || async move {
        HttpResponse::MethodNotAllowed()
            .insert_header((header::ALLOW, allow))
            .finish()
    })
}

#[derive(Clone, Template)]
#[template(path = "error.html")]
pub struct ErrorTpl {
    pub status_code: u16,
    pub message: String,
}
