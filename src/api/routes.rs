use crate::api::api_error::APIError;
use crate::api::extract::{AuthUser, SESSION_COOKIE};
use crate::api::model::{
    AccountResult, AckResult, AddDomainsRequest, BulkResult, CreateAccountRequest,
    CreateRecordRequest, CredentialsRequest, CustomSubdomainRequest, CustomSubdomainResult,
    DeleteDomainsRequest, DomainsQuery, DomainsResult, GenerateRequest, GenerateResult,
    RecordsResult, SessionResult, SuggestionsQuery, SuggestionsResult, UserResult,
};
use crate::api::server::AppState;
use crate::auth;
use crate::error::Error;
use crate::provider::{filter_and_paginate, DynuClient, PerPage};
use crate::store::Account;
use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use axum_extra::extract::WithRejection;
use serde_json::json;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

/// Upper bound on one generation request, keeping a single call from
/// hammering the provider with hundreds of registrations.
const MAX_GENERATE_COUNT: usize = 50;

const DEFAULT_PER_PAGE: usize = 10;
const MAX_PER_PAGE: usize = 50;

const DEFAULT_SUGGESTION_COUNT: usize = 5;

pub(super) fn new(state: AppState) -> Router {
    Router::new()
        .route("/healthcheck", get(health_check))
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/logout", get(logout))
        .route("/accounts", get(list_accounts).post(create_account))
        .route("/accounts/:account_id", delete(delete_account))
        .route("/main-domains", get(main_domains))
        .route("/suggestions", get(suggestions))
        .route("/domains/:account_id", get(list_domains))
        .route("/domains/:account_id/add", post(add_domains))
        .route("/domains/:account_id/delete", post(delete_domains))
        .route("/domains/:account_id/generate", post(generate))
        .route("/domains/:account_id/custom", post(add_custom_subdomain))
        .route(
            "/domains/:account_id/:domain_id/records",
            get(list_records).post(create_record),
        )
        .route(
            "/domains/:account_id/:domain_id/records/:record_id",
            delete(delete_record),
        )
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(state.config.api_timeout))
        .with_state(state)
}

#[allow(clippy::unused_async)]
async fn health_check() -> impl IntoResponse {
    Json(json!({"ok":"healthy"}))
}

async fn register(
    State(state): State<AppState>,
    WithRejection(Json(payload), _): WithRejection<Json<CredentialsRequest>, APIError>,
) -> Result<Json<UserResult>, APIError> {
    let password_hash = auth::hash_password(&payload.password);
    let user = state
        .store
        .write()
        .await
        .add_user(&payload.username, &password_hash)
        .await?;
    tracing::info!("registered user \"{}\"", user.username);
    Ok(Json(UserResult {
        id: user.id,
        username: user.username,
    }))
}

async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    WithRejection(Json(payload), _): WithRejection<Json<CredentialsRequest>, APIError>,
) -> Result<(CookieJar, Json<SessionResult>), APIError> {
    let user = state
        .store
        .read()
        .await
        .user_by_username(&payload.username)
        .await
        .ok_or(Error::InvalidCredentials)?;
    if !auth::verify_password(&payload.password, &user.password_hash) {
        tracing::debug!("rejected login for \"{}\"", payload.username);
        return Err(Error::InvalidCredentials.into());
    }

    let token = auth::issue_token(
        &user.username,
        state.config.session_secret.as_bytes(),
        state.config.session_ttl,
    )?;
    tracing::info!("user \"{}\" logged in", user.username);

    let cookie = Cookie::build(SESSION_COOKIE, format!("Bearer {token}"))
        .path("/")
        .http_only(true)
        .finish();
    Ok((jar.add(cookie), Json(SessionResult { token })))
}

#[allow(clippy::unused_async)]
async fn logout(jar: CookieJar) -> impl IntoResponse {
    let removal = Cookie::build(SESSION_COOKIE, "").path("/").finish();
    (jar.remove(removal), Json(json!({"ok":"logged out"})))
}

async fn list_accounts(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<Json<Vec<AccountResult>>, APIError> {
    let accounts = state.store.read().await.accounts_for_user(user.id).await;
    Ok(Json(accounts.into_iter().map(AccountResult::from).collect()))
}

async fn create_account(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    WithRejection(Json(payload), _): WithRejection<Json<CreateAccountRequest>, APIError>,
) -> Result<Json<AccountResult>, APIError> {
    let account = state
        .store
        .write()
        .await
        .add_account(user.id, &payload.name, &payload.api_key)
        .await?;
    tracing::info!(
        "user \"{}\" registered account \"{}\"",
        user.username,
        account.name
    );
    Ok(Json(account.into()))
}

async fn delete_account(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(account_id): Path<u64>,
) -> Result<Json<AckResult>, APIError> {
    state
        .store
        .write()
        .await
        .remove_account(user.id, account_id)
        .await?;
    tracing::info!("user \"{}\" deleted account {account_id}", user.username);
    Ok(Json(AckResult { ok: true }))
}

#[allow(clippy::unused_async)]
async fn main_domains(
    State(state): State<AppState>,
    AuthUser(_): AuthUser,
) -> Json<Vec<String>> {
    Json(state.generator.main_domains())
}

#[allow(clippy::unused_async)]
async fn suggestions(
    State(state): State<AppState>,
    AuthUser(_): AuthUser,
    Query(query): Query<SuggestionsQuery>,
) -> Json<SuggestionsResult> {
    let count = query
        .count
        .unwrap_or(DEFAULT_SUGGESTION_COUNT)
        .min(MAX_GENERATE_COUNT);
    let suggestions = {
        let mut rng = rand::thread_rng();
        state.generator.random_suggestions(&mut rng, count)
    };
    Json(SuggestionsResult { suggestions })
}

async fn account_client(state: &AppState, user_id: u64, account_id: u64) -> Result<DynuClient, Error> {
    let account: Account = state
        .store
        .read()
        .await
        .account_for_user(user_id, account_id)
        .await
        .ok_or(Error::AccountNotFound(account_id))?;
    Ok(DynuClient::new(
        state.http.clone(),
        state.config.provider_api_url.clone(),
        account.api_key,
    ))
}

fn parse_per_page(raw: Option<&str>) -> PerPage {
    match raw {
        Some("all") => PerPage::All,
        Some(s) => PerPage::Limit(
            s.parse()
                .map_or(DEFAULT_PER_PAGE, |n: usize| n.clamp(1, MAX_PER_PAGE)),
        ),
        None => PerPage::Limit(DEFAULT_PER_PAGE),
    }
}

async fn list_domains(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(account_id): Path<u64>,
    Query(query): Query<DomainsQuery>,
) -> Result<Json<DomainsResult>, APIError> {
    let client = account_client(&state, user.id, account_id).await?;
    let all = client.domains().await?;
    let (domains, pagination) = filter_and_paginate(
        all,
        query.page.unwrap_or(1),
        parse_per_page(query.per_page.as_deref()),
        query.search.as_deref(),
    );
    Ok(Json(DomainsResult {
        domains,
        pagination,
    }))
}

async fn add_domains(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(account_id): Path<u64>,
    WithRejection(Json(payload), _): WithRejection<Json<AddDomainsRequest>, APIError>,
) -> Result<Json<BulkResult>, APIError> {
    let client = account_client(&state, user.id, account_id).await?;
    let names: Vec<&str> = payload
        .domains
        .iter()
        .map(|name| name.trim())
        .filter(|name| !name.is_empty())
        .collect();

    let mut succeeded = 0;
    for name in &names {
        if client.add_domain(name).await? {
            succeeded += 1;
        }
    }
    tracing::info!(
        "added {succeeded} of {} domains for account {account_id}",
        names.len()
    );
    Ok(Json(BulkResult {
        requested: names.len(),
        succeeded,
    }))
}

async fn delete_domains(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(account_id): Path<u64>,
    WithRejection(Json(payload), _): WithRejection<Json<DeleteDomainsRequest>, APIError>,
) -> Result<Json<BulkResult>, APIError> {
    let client = account_client(&state, user.id, account_id).await?;
    let mut succeeded = 0;
    for domain_id in &payload.domain_ids {
        if client.delete_domain(*domain_id).await? {
            succeeded += 1;
        }
    }
    tracing::info!(
        "deleted {succeeded} of {} domains for account {account_id}",
        payload.domain_ids.len()
    );
    Ok(Json(BulkResult {
        requested: payload.domain_ids.len(),
        succeeded,
    }))
}

async fn generate(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(account_id): Path<u64>,
    WithRejection(Json(payload), _): WithRejection<Json<GenerateRequest>, APIError>,
) -> Result<Json<GenerateResult>, APIError> {
    let client = account_client(&state, user.id, account_id).await?;
    let count = payload.count.min(MAX_GENERATE_COUNT);
    let subdomains = {
        let mut rng = rand::thread_rng();
        state.generator.generate_subdomains(
            &mut rng,
            &payload.main_domain,
            count,
            payload.use_prefix,
            payload.use_suffix,
        )?
    };

    let mut added = 0;
    for subdomain in &subdomains {
        if client.add_domain(&subdomain.full_domain).await? {
            added += 1;
        }
    }
    tracing::info!(
        "registered {added} of {} generated subdomains under \"{}\" for account {account_id}",
        subdomains.len(),
        payload.main_domain
    );
    Ok(Json(GenerateResult {
        requested: count,
        added,
        subdomains,
    }))
}

async fn add_custom_subdomain(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(account_id): Path<u64>,
    WithRejection(Json(payload), _): WithRejection<Json<CustomSubdomainRequest>, APIError>,
) -> Result<Json<CustomSubdomainResult>, APIError> {
    let client = account_client(&state, user.id, account_id).await?;
    let full_domain = state
        .generator
        .create_custom_subdomain(&payload.name, &payload.main_domain)?;
    let added = client.add_domain(&full_domain).await?;
    tracing::info!(
        "custom subdomain \"{full_domain}\" for account {account_id}: added={added}"
    );
    Ok(Json(CustomSubdomainResult { full_domain, added }))
}

async fn list_records(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path((account_id, domain_id)): Path<(u64, u64)>,
) -> Result<Json<RecordsResult>, APIError> {
    let client = account_client(&state, user.id, account_id).await?;
    let records = client.records(domain_id).await?;
    Ok(Json(RecordsResult { records }))
}

async fn create_record(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path((account_id, domain_id)): Path<(u64, u64)>,
    WithRejection(Json(payload), _): WithRejection<Json<CreateRecordRequest>, APIError>,
) -> Result<Json<AckResult>, APIError> {
    let client = account_client(&state, user.id, account_id).await?;
    let record = payload.into_record()?;
    let ok = client.add_record(domain_id, &record).await?;
    tracing::info!(
        "added {} record on domain {domain_id} for account {account_id}: ok={ok}",
        record.record_type
    );
    Ok(Json(AckResult { ok }))
}

async fn delete_record(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path((account_id, domain_id, record_id)): Path<(u64, u64, u64)>,
) -> Result<Json<AckResult>, APIError> {
    let client = account_client(&state, user.id, account_id).await?;
    let ok = client.delete_record(domain_id, record_id).await?;
    tracing::info!(
        "deleted record {record_id} on domain {domain_id} for account {account_id}: ok={ok}"
    );
    Ok(Json(AckResult { ok }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn per_page_parsing_clamps_and_falls_back() {
        assert_eq!(parse_per_page(None), PerPage::Limit(10));
        assert_eq!(parse_per_page(Some("25")), PerPage::Limit(25));
        assert_eq!(parse_per_page(Some("0")), PerPage::Limit(1));
        assert_eq!(parse_per_page(Some("500")), PerPage::Limit(50));
        assert_eq!(parse_per_page(Some("all")), PerPage::All);
        assert_eq!(parse_per_page(Some("garbage")), PerPage::Limit(10));
    }
}
