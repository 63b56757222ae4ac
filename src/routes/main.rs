use actix_web::{HttpRequest, HttpResponse, Responder, get, web};
use tera::{Context, Tera};

use crate::repository::AdvocateStore;
use crate::routes::{parse_query, render_template, status_for};
use crate::services::main::load_index_page;

#[get("/")]
pub async fn show_index(
    req: HttpRequest,
    store: web::Data<AdvocateStore>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let result = parse_query(req.query_string())
        .and_then(|query| load_index_page(store.get_ref(), &query));

    let data = match result {
        Ok(data) => data,
        Err(err) => {
            log::warn!("Failed to load index page: {err}");
            return HttpResponse::build(status_for(&err)).body(err.to_string());
        }
    };

    let mut context = Context::new();
    context.insert("current_page", "index");
    context.insert("page", &data);

    render_template(&tera, "main/index.html", &context)
}
