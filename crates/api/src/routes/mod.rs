pub mod accounts;
pub mod admin;
pub mod auth;
pub mod bans;
pub mod characters;
pub mod downloads;
pub mod health;
pub mod news;
pub mod rankings;
pub mod setup;
pub mod wcoin;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                      register (public, rate limited)
/// /auth/login                         login (public, rate limited)
/// /auth/refresh                       refresh (public, rate limited)
/// /auth/logout                        logout (requires auth)
///
/// /accounts/me                        own profile (auth)
/// /accounts/me/password               change password (auth)
/// /accounts/me/email                  change email (auth)
/// /accounts                           search (admin)
/// /accounts/{username}                get, update (admin)
/// /accounts/{username}/wcoin          credit / debit (staff)
///
/// /characters                         own characters (auth)
/// /characters/{name}                  character card (public) / full (owner, staff)
/// /characters/{name}/points           distribute points (owner)
/// /characters/{name}/reset            reset (owner)
/// /characters/{name}/pk-clear         clear PK status (owner)
///
/// /rankings/resets                    resets board (public)
/// /rankings/level                     level board (public)
/// /rankings/pk                        PK board (public)
/// /rankings/guilds                    guild board (public)
/// /rankings/online                    online snapshot (public)
///
/// /bans                               list, create (staff)
/// /bans/{id}                          lift (staff)
///
/// /news                               list (public), create (admin)
/// /news/{id}                          get (public), update, delete (admin)
///
/// /downloads                          list (public), create (admin)
/// /downloads/{id}                     update, delete (admin)
///
/// /wcoin/packages                     list (public), create (admin)
/// /wcoin/packages/{id}                update, delete (admin)
/// /wcoin/balance                      own balance (auth)
/// /wcoin/history                      own ledger (auth)
///
/// /admin/logs                         audit trail (admin)
/// /admin/characters/{name}            direct character edit (admin)
///
/// /setup/status                       wizard status (public)
/// /setup/database                     connectivity check (public, pre-install)
/// /setup/admin                        first admin account (public, pre-install)
/// /setup/complete                     finish installation (public, pre-install)
/// ```
pub fn api_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        // Authentication (rate limited inside the auth router).
        .nest("/auth", auth::router(state))
        // Account profile + admin lookup.
        .nest("/accounts", accounts::router())
        // Characters: stats, resets, PK clears.
        .nest("/characters", characters::router())
        // Public rankings.
        .nest("/rankings", rankings::router())
        // Ban management.
        .nest("/bans", bans::router())
        // News.
        .nest("/news", news::router())
        // Downloads.
        .nest("/downloads", downloads::router())
        // WCoin shop.
        .nest("/wcoin", wcoin::router())
        // Admin: audit trail + direct character edits.
        .nest("/admin", admin::router())
        // Installation wizard.
        .nest("/setup", setup::router())
}
