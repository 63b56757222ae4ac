use actix_web::{HttpRequest, HttpResponse, Responder, get, post, web};

use crate::dto::api::{AdvocatesResponse, SeedResponse};
use crate::repository::AdvocateStore;
use crate::routes::{error_response, parse_query};
use crate::seed;
use crate::services::ServiceError;
use crate::services::advocates::list_advocates;
use crate::services::seed::seed_advocates;

#[get("/advocates")]
pub async fn api_advocates(req: HttpRequest, store: web::Data<AdvocateStore>) -> impl Responder {
    let result = parse_query(req.query_string())
        .and_then(|query| list_advocates(store.get_ref(), &query));

    match result {
        Ok(page) => HttpResponse::Ok().json(AdvocatesResponse::from(page)),
        Err(err) => error_response(&err),
    }
}

#[post("/seed")]
pub async fn api_seed(store: web::Data<AdvocateStore>) -> impl Responder {
    let records = match seed::advocates() {
        Ok(records) => records,
        Err(err) => {
            log::error!("Bundled seed data is invalid: {err}");
            return error_response(&ServiceError::Internal(err.to_string()));
        }
    };

    match seed_advocates(store.database(), &records) {
        Ok(advocates) => HttpResponse::Ok().json(SeedResponse { advocates }),
        Err(err) => error_response(&err),
    }
}
