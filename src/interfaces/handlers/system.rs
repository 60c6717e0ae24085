use actix_web::{get, web, HttpResponse, Responder};
use chrono::Utc;
use humantime::format_duration;
use parking_lot::RwLock;
use serde::Serialize;
use std::{
    sync::atomic::{AtomicI64, Ordering},
    time::Duration,
};

use crate::{constants::START_TIME, AppState};

#[derive(Serialize, Clone, Default)]
struct StorageStatus {
    projects: String,
    contact_messages: String,
    uploads: String,
}

#[derive(Serialize, Clone, Default)]
struct HealthCheckResponse {
    status: String,
    uptime: String,
    timestamp: String,
    start_at: String,
    version: String,
    storage: String,
    components: StorageStatus,
}

/// Seconds a health report is reused before the stores are probed again.
const HEALTH_CACHE_SECS: i64 = 5;

/// Last health report of one running app, held in `AppState`.
#[derive(Default)]
pub struct HealthCache {
    last_check: AtomicI64,
    report: RwLock<Option<HealthCheckResponse>>,
}

impl HealthCache {
    fn fresh(&self, now: i64) -> Option<HealthCheckResponse> {
        if now - self.last_check.load(Ordering::Relaxed) > HEALTH_CACHE_SECS {
            return None;
        }
        self.report.read().clone()
    }

    fn store(&self, now: i64, report: HealthCheckResponse) {
        *self.report.write() = Some(report);
        self.last_check.store(now, Ordering::Relaxed);
    }
}

fn label<E: std::fmt::Display>(result: Result<(), E>, component: &str) -> String {
    match result {
        Ok(()) => "OK".to_string(),
        Err(e) => {
            tracing::warn!(component, "Health check failed: {}", e);
            "Unavailable".to_string()
        }
    }
}

async fn build_health_response(state: &web::Data<AppState>) -> HealthCheckResponse {
    let now_utc = Utc::now();
    let uptime = now_utc.signed_duration_since(*START_TIME);
    let human_uptime = format_duration(Duration::from_secs(uptime.num_seconds().max(0) as u64));

    let components = StorageStatus {
        projects: label(state.project_handler.crud.repo().check_connection().await, "projects"),
        contact_messages: label(state.contact_handler.crud.repo().check_connection().await, "contact_messages"),
        uploads: label(state.upload_handler.image_store.check_connection().await, "uploads"),
    };

    let healthy = [&components.projects, &components.contact_messages, &components.uploads]
        .iter()
        .all(|s| s.as_str() == "OK");

    HealthCheckResponse {
        status: if healthy { "healthy" } else { "degraded" }.to_string(),
        uptime: human_uptime.to_string(),
        timestamp: now_utc.to_rfc3339(),
        start_at: START_TIME.to_rfc3339(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        storage: if healthy { "OK" } else { "Unavailable" }.to_string(),
        components,
    }
}

/// Reports uptime and store reachability. Results are reused for a few
/// seconds so probes do not hammer the backing store.
#[get("/health")]
pub async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let now = Utc::now().timestamp();

    if let Some(report) = state.health_cache.fresh(now) {
        return HttpResponse::Ok().json(report);
    }

    let report = build_health_response(&state).await;
    state.health_cache.store(now, report.clone());
    HttpResponse::Ok().json(report)
}
