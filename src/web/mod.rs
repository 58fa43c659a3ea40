// src/web/mod.rs
//! HTTP surface for the popup button and for scripts posting their own scrapes.

pub mod types;

pub use types::*;

use crate::browser::{DispatchOutcome, Extension, TriggerSignal};
use crate::error::{DispatchError, MessagingError};
use crate::linkedin::{JobScraper, Page};
use crate::messaging::Message;
use anyhow::Result;
use rocket::fairing::{Fairing, Info, Kind};
use rocket::http::{Header, Status};
use rocket::serde::json::Json;
use rocket::{catchers, delete, get, options, post, routes, Build, Request, Response, Rocket, State};
use tracing::{error, info};

type ApiError = (Status, Json<ErrorResponse>);

pub struct Cors;

#[rocket::async_trait]
impl Fairing for Cors {
    fn info(&self) -> Info {
        Info {
            name: "Add CORS headers to responses",
            kind: Kind::Response,
        }
    }

    async fn on_response<'r>(&self, _request: &'r Request<'_>, response: &mut Response<'r>) {
        response.set_header(Header::new("Access-Control-Allow-Origin", "*"));
        response.set_header(Header::new("Access-Control-Allow-Methods", "POST, GET, DELETE, OPTIONS"));
        response.set_header(Header::new("Access-Control-Allow-Headers", "*"));
    }
}

#[get("/health")]
pub async fn health() -> Json<&'static str> {
    info!("Health check");
    Json("OK")
}

#[post("/tabs", data = "<request>")]
pub async fn open_tab(
    request: Json<OpenTabRequest>,
    extension: &State<Extension>,
    scraper: &State<JobScraper>,
) -> Result<Json<OpenTabResponse>, ApiError> {
    let request = request.into_inner();
    let page = match request.html {
        Some(html) => Page::new(request.url, html),
        None => scraper.fetch_page(&request.url).await.map_err(|e| {
            error!("Failed to load {}: {:#}", request.url, e);
            (
                Status::BadGateway,
                Json(ErrorResponse::new(format!("{:#}", e), "FETCH_FAILED")),
            )
        })?,
    };

    let tab_id = extension.open_page(page);
    Ok(Json(OpenTabResponse {
        success: true,
        tab_id,
    }))
}

#[post("/tabs/<id>/activate")]
pub async fn activate_tab(
    id: u64,
    extension: &State<Extension>,
) -> Result<Json<ActionResponse>, ApiError> {
    if !extension.tabs().activate(id) {
        return Err(tab_not_found(id));
    }
    Ok(Json(ActionResponse {
        success: true,
        message: format!("Tab {} is active", id),
    }))
}

#[get("/tabs/<id>")]
pub async fn tab_info(id: u64, extension: &State<Extension>) -> Result<Json<TabResponse>, ApiError> {
    let tabs = extension.tabs();
    let tab = tabs.get(id).ok_or_else(|| tab_not_found(id))?;
    let active = tabs.active().map(|t| t.id) == Some(id);

    Ok(Json(TabResponse {
        success: true,
        tab_id: tab.id,
        url: tab.page.url.clone(),
        context: tab.context.name().to_string(),
        active,
        open_tabs: tabs.len(),
    }))
}

/// Drops the tab's page and stops its context.
#[delete("/tabs/<id>")]
pub async fn close_tab(
    id: u64,
    extension: &State<Extension>,
) -> Result<Json<ActionResponse>, ApiError> {
    if !extension.tabs().close(id) {
        return Err(tab_not_found(id));
    }
    info!("Closed tab {}, {} still open", id, extension.tabs().len());
    Ok(Json(ActionResponse {
        success: true,
        message: format!("Tab {} closed", id),
    }))
}

/// The popup's extract button.
#[post("/extract")]
pub async fn extract(extension: &State<Extension>) -> Result<Json<DispatchResponse>, ApiError> {
    dispatch_response(extension.trigger(TriggerSignal::ButtonClick))
}

/// A keyboard-shortcut command by name.
#[post("/commands/<name>")]
pub async fn command(
    name: &str,
    extension: &State<Extension>,
) -> Result<Json<DispatchResponse>, ApiError> {
    dispatch_response(extension.trigger(TriggerSignal::Command(name.to_string())))
}

#[post("/messages", data = "<message>")]
pub async fn post_message(
    message: Json<Message>,
    extension: &State<Extension>,
) -> Result<Json<ActionResponse>, ApiError> {
    match message.into_inner() {
        Message::ExtractJobDetails => {
            let response = dispatch_response(extension.trigger(TriggerSignal::ButtonClick))?;
            Ok(Json(ActionResponse {
                success: response.success,
                message: format!("Extraction {}", response.status),
            }))
        }
        message @ Message::SaveYaml { .. } => {
            extension
                .background()
                .request(message)
                .map_err(messaging_error)?
                .wait()
                .await
                .map_err(messaging_error)?;
            Ok(Json(ActionResponse {
                success: true,
                message: "Job data delivered to background context".to_string(),
            }))
        }
    }
}

#[options("/<_..>")]
pub async fn options() -> Status {
    Status::Ok
}

fn dispatch_response(
    result: Result<DispatchOutcome, DispatchError>,
) -> Result<Json<DispatchResponse>, ApiError> {
    let (success, status, tab_id) = match result {
        Ok(DispatchOutcome::Dispatched(receipt)) => (true, "dispatched", Some(receipt.tab_id())),
        Ok(DispatchOutcome::Busy) => (false, "busy", None),
        Ok(DispatchOutcome::Ignored) => (false, "ignored", None),
        Err(DispatchError::NoActiveTab) => {
            return Err((
                Status::NotFound,
                Json(ErrorResponse::new("No active tab found", "NO_ACTIVE_TAB")),
            ))
        }
        Err(DispatchError::Messaging(e)) => return Err(messaging_error(e)),
    };

    Ok(Json(DispatchResponse {
        success,
        status,
        tab_id,
    }))
}

fn tab_not_found(id: u64) -> ApiError {
    (
        Status::NotFound,
        Json(ErrorResponse::new(format!("No tab with id {}", id), "TAB_NOT_FOUND")),
    )
}

fn messaging_error(e: MessagingError) -> ApiError {
    error!("Message delivery failed: {}", e);
    (
        Status::InternalServerError,
        Json(ErrorResponse::new(e.to_string(), "MESSAGING_ERROR")),
    )
}

#[rocket::catch(400)]
pub fn bad_request() -> Json<ErrorResponse> {
    Json(ErrorResponse::new("Invalid request format", "BAD_REQUEST"))
}

#[rocket::catch(404)]
pub fn not_found() -> Json<ErrorResponse> {
    Json(ErrorResponse::new("Route not found", "NOT_FOUND"))
}

#[rocket::catch(422)]
pub fn unprocessable() -> Json<ErrorResponse> {
    Json(ErrorResponse::new("Request body could not be parsed", "UNPROCESSABLE"))
}

#[rocket::catch(500)]
pub fn internal_error() -> Json<ErrorResponse> {
    Json(ErrorResponse::new("Internal server error", "INTERNAL_ERROR"))
}

pub fn build_rocket(extension: Extension, scraper: JobScraper, port: u16) -> Rocket<Build> {
    let figment = rocket::Config::figment()
        .merge(("port", port))
        .merge(("address", "0.0.0.0"));

    rocket::custom(figment)
        .attach(Cors)
        .manage(extension)
        .manage(scraper)
        .register(
            "/api",
            catchers![bad_request, not_found, unprocessable, internal_error],
        )
        .mount(
            "/api",
            routes![
                health,
                open_tab,
                tab_info,
                close_tab,
                activate_tab,
                extract,
                command,
                post_message,
                options,
            ],
        )
}

pub async fn start_web_server(extension: Extension, port: u16) -> Result<()> {
    let scraper = JobScraper::new()?;

    info!("Starting job exporter API server");
    info!("Server: http://0.0.0.0:{}", port);

    let _rocket = build_rocket(extension, scraper, port)
        .launch()
        .await
        .map_err(|e| anyhow::anyhow!("Server error: {}", e))?;

    Ok(())
}
