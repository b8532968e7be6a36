use super::*;

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("")
            .route("dev-login", web::get().to(dev_login))
            .route("logout", web::post().to(logout)),
    );
}

#[derive(Debug, Deserialize)]
struct DevLogin {
    name: String,
}

#[cfg(debug_assertions)]
async fn dev_login(
    Query(DevLogin { name }): Query<DevLogin>,
    session: Session,
    req: HttpRequest,
) -> ::aw::Result<HttpResponse> {
    let user = SessionUser::new(name.trim());
    if !user.is_valid() {
        return Ok(HttpResponse::BadRequest().body("`name` must not be empty"));
    }

    session.renew();
    session.insert(SESSION_USER_KEY, &user)?;

    Ok(Redirect::to("/archiving/show")
        .see_other()
        .respond_to(&req)
        .map_into_boxed_body())
}

#[cfg(not(debug_assertions))]
async fn dev_login(_: Query<DevLogin>) -> impl Responder {
    "disabled in release"
}

async fn logout(req: HttpRequest, session: Session) -> ::aw::Result<HttpResponse> {
    session.remove(SESSION_USER_KEY);

    Ok(Redirect::to("/")
        .using_status_code(StatusCode::FOUND)
        .respond_to(&req)
        .map_into_boxed_body())
}
