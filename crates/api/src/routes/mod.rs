//! Route definitions, one router per resource family, merged under
//! `/api/v1` by [`api_routes`].

pub mod health;

use axum::routing::{delete, get, post, put};
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /auth/register                        POST  register (public)
/// /auth/login                           POST  login (public)
/// /auth/refresh                         POST  rotate tokens (public)
/// /auth/logout                          POST  revoke sessions (auth)
///
/// /users                                GET   list (staff)
/// /users/nearby                         GET   box search (public)
/// /users/me/favorites                   GET   own favorites (auth)
/// /users/{id}                           GET, PUT, DELETE (self or staff)
///
/// /saved-searches                       GET, POST (owner)
/// /saved-searches/{id}                  GET, PUT, DELETE (owner)
///
/// /properties                           GET (public), POST (auth)
/// /properties/{id}                      GET (public), PUT, DELETE (owner)
/// /properties/{id}/transit              GET (public), POST (staff)
/// /properties/{id}/schools              GET (public), POST (staff)
/// /transits                             GET (public), POST (staff)
/// /schools                              GET (public), POST (staff)
///
/// /listings                             GET (public), POST (auth, owner of property)
/// /listings/map                         GET   box search + aggregates (public)
/// /listings/{id}                        GET (public), PUT, DELETE=deactivate (owner)
/// /listings/{id}/photos                 GET (public), POST (owner)
/// /listings/{id}/photos/{photo_id}      DELETE (owner)
/// /listings/{id}/price-history          GET (public)
/// /listings/{id}/favorite               PUT, DELETE (auth)
/// /listings/{id}/inquire                POST (auth)
/// /listings/{id}/open-houses            GET (public), POST (owner)
/// /open-houses/{id}                     DELETE (owner)
/// /open-houses/{id}/rsvp                POST (auth)
///
/// /map-clusters                         GET (public, refreshes), POST (staff)
/// /map-clusters/{id}                    GET (public, refreshes), DELETE (staff)
///
/// /ad-campaigns                         GET own, POST (auth)
/// /ad-campaigns/pending                 GET review queue (admin)
/// /ad-campaigns/{id}                    GET, PUT, DELETE (owner)
/// /ad-campaigns/{id}/approve            POST (admin)
/// /ad-campaigns/{id}/reject             POST (admin)
/// /ad-campaigns/{id}/banners            GET (owner)
/// /banners                              POST (campaign owner)
/// /banners/{id}                         GET, PUT, DELETE (campaign owner)
/// /banners/{id}/click                   POST (public)
/// /ad-requests                          GET own, POST (auth)
/// /ad-requests/{id}                     GET (owner)
/// /ad-requests/{id}/serve               POST (owner)
///
/// /messages                             GET mailbox, POST send (auth)
/// /messages/{id}                        GET thread, DELETE (participant)
/// /messages/{id}/mark-read              POST (recipient, idempotent)
///
/// /support-tickets                      GET own, POST (auth)
/// /support-tickets/queue                GET all (staff)
/// /support-tickets/{id}                 GET (owner or staff), PUT, DELETE (staff)
///
/// /faqs                                 GET (public), POST (staff)
/// /faqs/{id}                            PUT, DELETE (staff)
/// /legal-documents                      GET (public), POST (staff)
/// /legal-documents/{slug}               GET current version (public)
/// /legal-documents/{id}                 PUT, DELETE (staff)
/// /announcements                        GET current (public), POST (staff)
/// /announcements/all                    GET every row (staff)
/// /announcements/{id}                   PUT, DELETE (staff)
/// /contact-messages                     POST (public), GET (staff)
/// /contact-messages/{id}/status         PUT (staff)
///
/// /system-config                        GET, POST (admin)
/// /system-config/active                 GET (public)
/// /system-config/{id}                   GET, PUT, DELETE (admin)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth_routes())
        .nest("/users", user_routes())
        .nest("/saved-searches", saved_search_routes())
        .nest("/properties", property_routes())
        .nest("/transits", transit_routes())
        .nest("/schools", school_routes())
        .nest("/listings", listing_routes())
        .nest("/open-houses", open_house_routes())
        .nest("/map-clusters", map_cluster_routes())
        .nest("/ad-campaigns", campaign_routes())
        .nest("/banners", banner_routes())
        .nest("/ad-requests", ad_request_routes())
        .nest("/messages", message_routes())
        .nest("/support-tickets", ticket_routes())
        .nest("/faqs", faq_routes())
        .nest("/legal-documents", legal_routes())
        .nest("/announcements", announcement_routes())
        .nest("/contact-messages", contact_routes())
        .nest("/system-config", system_config_routes())
}

fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(handlers::auth::register))
        .route("/login", post(handlers::auth::login))
        .route("/refresh", post(handlers::auth::refresh))
        .route("/logout", post(handlers::auth::logout))
}

fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::users::list))
        .route("/nearby", get(handlers::users::nearby))
        .route("/me/favorites", get(handlers::listings::list_my_favorites))
        .route(
            "/{id}",
            get(handlers::users::get_by_id)
                .put(handlers::users::update)
                .delete(handlers::users::delete),
        )
}

fn saved_search_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::saved_searches::list).post(handlers::saved_searches::create),
        )
        .route(
            "/{id}",
            get(handlers::saved_searches::get_by_id)
                .put(handlers::saved_searches::update)
                .delete(handlers::saved_searches::delete),
        )
}

fn property_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::properties::list).post(handlers::properties::create),
        )
        .route(
            "/{id}",
            get(handlers::properties::get_by_id)
                .put(handlers::properties::update)
                .delete(handlers::properties::delete),
        )
        .route(
            "/{id}/transit",
            get(handlers::properties::list_transit).post(handlers::properties::link_transit),
        )
        .route(
            "/{id}/schools",
            get(handlers::properties::list_schools).post(handlers::properties::link_school),
        )
}

fn transit_routes() -> Router<AppState> {
    Router::new().route(
        "/",
        get(handlers::properties::list_transit_catalog).post(handlers::properties::create_transit),
    )
}

fn school_routes() -> Router<AppState> {
    Router::new().route(
        "/",
        get(handlers::properties::list_school_catalog).post(handlers::properties::create_school),
    )
}

fn listing_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::listings::list).post(handlers::listings::create),
        )
        .route("/map", get(handlers::map::search))
        .route(
            "/{id}",
            get(handlers::listings::get_by_id)
                .put(handlers::listings::update)
                .delete(handlers::listings::delete),
        )
        .route(
            "/{id}/photos",
            get(handlers::listings::list_photos).post(handlers::listings::add_photo),
        )
        .route(
            "/{id}/photos/{photo_id}",
            delete(handlers::listings::delete_photo),
        )
        .route(
            "/{id}/price-history",
            get(handlers::listings::list_price_history),
        )
        .route(
            "/{id}/favorite",
            put(handlers::listings::favorite).delete(handlers::listings::unfavorite),
        )
        .route("/{id}/inquire", post(handlers::listings::inquire))
        .route(
            "/{id}/open-houses",
            get(handlers::open_houses::list_by_listing).post(handlers::open_houses::create),
        )
}

fn open_house_routes() -> Router<AppState> {
    Router::new()
        .route("/{id}", delete(handlers::open_houses::delete))
        .route("/{id}/rsvp", post(handlers::open_houses::rsvp))
}

fn map_cluster_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::map::list).post(handlers::map::create))
        .route(
            "/{id}",
            get(handlers::map::get_by_id).delete(handlers::map::delete),
        )
}

fn campaign_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::campaigns::list).post(handlers::campaigns::create),
        )
        .route("/pending", get(handlers::campaigns::list_pending))
        .route(
            "/{id}",
            get(handlers::campaigns::get_by_id)
                .put(handlers::campaigns::update)
                .delete(handlers::campaigns::delete),
        )
        .route("/{id}/approve", post(handlers::campaigns::approve))
        .route("/{id}/reject", post(handlers::campaigns::reject))
        .route("/{id}/banners", get(handlers::banners::list_by_campaign))
}

fn banner_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(handlers::banners::create))
        .route(
            "/{id}",
            get(handlers::banners::get_by_id)
                .put(handlers::banners::update)
                .delete(handlers::banners::delete),
        )
        .route("/{id}/click", post(handlers::banners::record_click))
}

fn ad_request_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::ad_requests::list).post(handlers::ad_requests::create),
        )
        .route("/{id}", get(handlers::ad_requests::get_by_id))
        .route("/{id}/serve", post(handlers::ad_requests::serve))
}

fn message_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::messages::list).post(handlers::messages::create),
        )
        .route(
            "/{id}",
            get(handlers::messages::get_by_id).delete(handlers::messages::delete),
        )
        .route("/{id}/mark-read", post(handlers::messages::mark_read))
}

fn ticket_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::tickets::list).post(handlers::tickets::create),
        )
        .route("/queue", get(handlers::tickets::queue))
        .route(
            "/{id}",
            get(handlers::tickets::get_by_id)
                .put(handlers::tickets::update)
                .delete(handlers::tickets::delete),
        )
}

fn faq_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::content::list_faqs).post(handlers::content::create_faq),
        )
        .route(
            "/{id}",
            put(handlers::content::update_faq).delete(handlers::content::delete_faq),
        )
}

fn legal_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::content::list_legal).post(handlers::content::create_legal),
        )
        .route(
            "/{slug}",
            get(handlers::content::get_legal_by_slug)
                .put(handlers::content::update_legal)
                .delete(handlers::content::delete_legal),
        )
}

fn announcement_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::content::list_announcements).post(handlers::content::create_announcement),
        )
        .route("/all", get(handlers::content::list_all_announcements))
        .route(
            "/{id}",
            put(handlers::content::update_announcement)
                .delete(handlers::content::delete_announcement),
        )
}

fn contact_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::content::list_contact).post(handlers::content::create_contact),
        )
        .route("/{id}/status", put(handlers::content::set_contact_status))
}

fn system_config_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::system_config::list).post(handlers::system_config::create),
        )
        .route("/active", get(handlers::system_config::get_active))
        .route(
            "/{id}",
            get(handlers::system_config::get_by_id)
                .put(handlers::system_config::update)
                .delete(handlers::system_config::delete),
        )
}
