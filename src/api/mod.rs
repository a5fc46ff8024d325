//! HTTP API for managing Dynu-hosted domains and generated subdomains.
//!
//! All request and response bodies are JSON. Routes other than
//! `/healthcheck`, `/register`, and `/login` require a session, presented
//! either as the http-only `access_token` cookie set on login or as an
//! `Authorization` header (a `Bearer ` prefix is accepted in both).
//! Failures produce a body of the form `{"error": "..."}`.
//!
//! # API Endpoints
//!
//! ## `/healthcheck` (GET)
//!
//!   Returns HTTP 200 (OK) and the JSON body `{"ok":"healthy"}` when the
//!   service is operational.
//!
//! ## `/register` (POST), `/login` (POST), `/logout` (GET)
//!
//!   Account lifecycle. `register` expects `{"username": "...", "password":
//!   "..."}` and fails with HTTP 409 when the username is taken. `login`
//!   checks the same body, sets the session cookie, and returns
//!   `{"token": "..."}` for header-based clients. `logout` clears the cookie.
//!
//! ## `/accounts` (GET, POST), `/accounts/:id` (DELETE)
//!
//!   Per-user DNS provider credentials. `POST` expects `{"name": "...",
//!   "api_key": "..."}`. API keys are write-only; listings never echo them.
//!
//! ## `/domains/:account_id` (GET)
//!
//!   The account's domains as reported by the provider, with client-side
//!   search and pagination: `?page=`, `?per_page=` (1-50, or `all`), and
//!   `?search=` (case-insensitive substring). Returns
//!   `{"domains": [...], "pagination": {...}}`.
//!
//! ## `/domains/:account_id/add` (POST), `/domains/:account_id/delete` (POST)
//!
//!   Bulk operations. `add` expects `{"domains": [...]}`; `delete` expects
//!   `{"domain_ids": [...]}`. Each name or id is forwarded to the provider
//!   individually and the per-item outcomes are aggregated into
//!   `{"requested": n, "succeeded": m}`.
//!
//! ## `/main-domains` (GET), `/suggestions` (GET)
//!
//!   The allowlist of main domains, and `?count=` (default 5) random
//!   subdomain suggestions drawn across the whole allowlist.
//!
//! ## `/domains/:account_id/generate` (POST)
//!
//!   Expects `{"main_domain": "...", "count": 10, "use_prefix": false,
//!   "use_suffix": false}`. Generates up to `count` distinct names (capped
//!   at 50) under the main domain, registers each with the provider, and
//!   returns the generated set plus how many the provider accepted. Fewer
//!   than `count` names may come back when the dictionary runs out of
//!   combinations; that is not an error.
//!
//! ## `/domains/:account_id/custom` (POST)
//!
//!   Expects `{"name": "...", "main_domain": "..."}`. Validates and
//!   normalizes the label, registers the full domain with the provider, and
//!   returns `{"full_domain": "...", "added": true|false}`.
//!
//! ## `/domains/:account_id/:domain_id/records` (GET, POST) and
//! ## `/domains/:account_id/:domain_id/records/:record_id` (DELETE)
//!
//!   Per-domain DNS records. `POST` expects `{"node_name": "...",
//!   "record_type": "A|TXT|MX|SPF", "ttl": 300, "value": "...",
//!   "priority": 10}` (priority applies to MX only). Record types are
//!   normalized to uppercase; anything outside the supported set is
//!   rejected before the provider is called.

mod api_error;
mod extract;
mod model;
mod routes;
pub mod server;

pub use server::new;
