use actix_web::{get, http::StatusCode, post, web, HttpRequest, HttpResponse, ResponseError};
use serde::{Deserialize, Serialize};

use crate::auth::resolve_viewer;
use crate::balance::BalanceOptions;
use crate::error::SplitError;
use crate::exchange::settle_group;
use crate::schemas::Group;
use crate::snapshot::GroupSnapshot;
use crate::summary::{calculate_all_balances_with, compute_group_balances_with};

pub struct AppState {
    pub secret: String,
    pub options: BalanceOptions,
}

#[derive(Deserialize)]
struct GroupsJson {
    groups: Vec<GroupSnapshot>,
}

#[derive(Serialize)]
struct ErrorJson {
    error: String,
}

impl ResponseError for SplitError {
    fn status_code(&self) -> StatusCode {
        match self {
            SplitError::MissingAuthorization
            | SplitError::InvalidToken(_)
            | SplitError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            SplitError::Config(_) | SplitError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorJson {
            error: self.to_string(),
        })
    }
}

#[get("/health")]
async fn health() -> &'static str {
    "OK"
}

#[post("/balances")]
async fn get_balances(
    state: web::Data<AppState>,
    request: HttpRequest,
    json: web::Json<GroupsJson>,
) -> Result<HttpResponse, SplitError> {
    let viewer = resolve_viewer(&request, &state.secret)?;
    let groups: Vec<Group> = json.into_inner().groups.into_iter().map(Group::from).collect();
    tracing::info!(viewer = %viewer, groups = groups.len(), "computing balances");
    Ok(HttpResponse::Ok().json(calculate_all_balances_with(&groups, &viewer, &state.options)))
}

#[post("/groups/balance")]
async fn get_group_balance(
    state: web::Data<AppState>,
    request: HttpRequest,
    json: web::Json<GroupSnapshot>,
) -> Result<HttpResponse, SplitError> {
    let viewer = resolve_viewer(&request, &state.secret)?;
    let group = Group::from(json.into_inner());
    Ok(HttpResponse::Ok().json(compute_group_balances_with(&group, &viewer, &state.options)))
}

#[post("/groups/settlement")]
async fn get_group_settlement(
    state: web::Data<AppState>,
    request: HttpRequest,
    json: web::Json<GroupSnapshot>,
) -> Result<HttpResponse, SplitError> {
    resolve_viewer(&request, &state.secret)?;
    let group = Group::from(json.into_inner());
    Ok(HttpResponse::Ok().json(settle_group(&group, &state.options)))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(health)
        .service(get_balances)
        .service(get_group_balance)
        .service(get_group_settlement);
}
