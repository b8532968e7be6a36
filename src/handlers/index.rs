use super::*;

pub async fn get() -> impl Responder {
    Redirect::to("/archiving/show").see_other()
}
