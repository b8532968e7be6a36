use std::{future::Ready, ops::Deref, rc::Rc};

use ::actix_session::Session;
use ::actix_web_lab::middleware::Next;
use ::aw::{
    body::{BoxBody, MessageBody},
    dev::{ServiceRequest, ServiceResponse},
    http::{self, header},
    web::Data,
    FromRequest, HttpMessage, HttpRequest, HttpResponse, ResponseError,
};
use ::log::warn;
use ::url::form_urlencoded;

use crate::session::{SessionUser, SESSION_USER_KEY};
use crate::state::Registry;

#[derive(Debug, thiserror::Error)]
pub enum MiddlewareError {
    #[error("Authentication failure")]
    AuthenticationError,
    #[error("Login required")]
    LoginRequired { location: String },
}

impl MiddlewareError {
    /// redirect to `login_url`, asking it to come back to `return_to` afterwards
    pub fn login_required(login_url: &str, return_to: &str) -> Self {
        let query = form_urlencoded::Serializer::new(String::new())
            .append_pair("return_to", return_to)
            .finish();
        let sep = if login_url.contains('?') { '&' } else { '?' };

        MiddlewareError::LoginRequired {
            location: format!("{login_url}{sep}{query}"),
        }
    }
}

impl ResponseError for MiddlewareError {
    fn status_code(&self) -> http::StatusCode {
        match self {
            MiddlewareError::AuthenticationError => http::StatusCode::UNAUTHORIZED,
            MiddlewareError::LoginRequired { .. } => http::StatusCode::SEE_OTHER,
        }
    }

    fn error_response(&self) -> HttpResponse<BoxBody> {
        match self {
            MiddlewareError::LoginRequired { location } => HttpResponse::build(self.status_code())
                .insert_header((header::LOCATION, location.as_str()))
                .finish(),
            _ => HttpResponse::build(self.status_code()).body(self.to_string()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Authenticated(pub Rc<SessionUser>);

impl FromRequest for Authenticated {
    type Error = MiddlewareError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut ::aw::dev::Payload) -> Self::Future {
        std::future::ready({
            req.extensions()
                .get::<Self>()
                .cloned()
                .ok_or(MiddlewareError::AuthenticationError)
        })
    }
}

impl Deref for Authenticated {
    type Target = SessionUser;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Resolves the session user and attaches it to the request as [`Authenticated`].
pub async fn auth(
    session: Session,
    req: ServiceRequest,
    next: Next<impl MessageBody>,
) -> Result<ServiceResponse<impl MessageBody>, ::aw::Error> {
    match session.get::<SessionUser>(SESSION_USER_KEY) {
        Ok(Some(user)) if user.is_valid() => {
            req.extensions_mut().insert(Authenticated(Rc::new(user)));
        }
        Ok(_) => {}
        Err(err) => {
            warn!("dropping unreadable session user: {err}");
            session.remove(SESSION_USER_KEY);
        }
    }

    next.call(req).await
}

/// Lets only authenticated requests through; everyone else is sent to the login page.
pub async fn require_login(
    reg: Data<Registry>,
    req: ServiceRequest,
    next: Next<impl MessageBody + 'static>,
) -> Result<ServiceResponse<BoxBody>, ::aw::Error> {
    let is_authenticated = req.extensions().contains::<Authenticated>();

    if !is_authenticated {
        let return_to = req
            .uri()
            .path_and_query()
            .map(|pq| pq.as_str())
            .unwrap_or("/")
            .to_owned();
        let err = MiddlewareError::login_required(&reg.login_url, &return_to);

        return Ok(req.into_response(err.error_response()));
    }

    Ok(next.call(req).await?.map_into_boxed_body())
}
