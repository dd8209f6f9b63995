//! Liveness and readiness checks, mounted outside `/api/v1`.

use std::sync::atomic::{AtomicBool, Ordering};

use actix_web::{HttpResponse, get, http::header, web};

/// Health flags. Starts live but not ready.
#[derive(Debug)]
pub struct HealthState {
    ready: AtomicBool,
    live: AtomicBool,
}

impl Default for HealthState {
    fn default() -> Self {
        Self {
            ready: AtomicBool::new(false),
            live: AtomicBool::new(true),
        }
    }
}

impl HealthState {
    /// Live, not yet ready.
    pub fn new() -> Self {
        Self::default()
    }

    /// Called once adapters are wired and the listener is bound.
    pub fn mark_ready(&self) {
        self.ready.store(true, Ordering::Release);
    }

    /// Fail liveness so the orchestrator stops routing during shutdown.
    pub fn mark_unhealthy(&self) {
        self.live.store(false, Ordering::Release);
    }

    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }

    pub fn is_alive(&self) -> bool {
        self.live.load(Ordering::Acquire)
    }
}

fn check_response(ok: bool) -> HttpResponse {
    let mut response = if ok {
        HttpResponse::Ok()
    } else {
        HttpResponse::ServiceUnavailable()
    };
    response
        .insert_header((header::CACHE_CONTROL, "no-store"))
        .finish()
}

#[get("/health/ready")]
pub async fn ready(state: web::Data<HealthState>) -> HttpResponse {
    check_response(state.is_ready())
}

#[get("/health/live")]
pub async fn live(state: web::Data<HealthState>) -> HttpResponse {
    check_response(state.is_alive())
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::{App, test};

    #[actix_web::test]
    async fn checks_follow_flags() {
        let health = web::Data::new(HealthState::new());
        let app = test::init_service(
            App::new()
                .app_data(health.clone())
                .service(ready)
                .service(live),
        )
        .await;

        let get = |uri: &'static str| test::TestRequest::get().uri(uri).to_request();

        assert_eq!(
            test::call_service(&app, get("/health/ready")).await.status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        health.mark_ready();
        let res = test::call_service(&app, get("/health/ready")).await;
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(
            res.headers().get(header::CACHE_CONTROL).map(|v| v.as_bytes()),
            Some(&b"no-store"[..])
        );

        health.mark_unhealthy();
        assert_eq!(
            test::call_service(&app, get("/health/live")).await.status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }
}
