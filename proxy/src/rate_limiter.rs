//! Per-IP rate limiting middleware
//!
//! Fixed-window request counter keyed by client IP, enforcing the
//! reference proxy's policy of 100 requests per 15-minute window.
//! CORS preflight (OPTIONS) requests are exempt.

use std::collections::HashMap;
use std::future::{ready, Ready};
use std::rc::Rc;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::{Method, StatusCode},
    HttpResponse, ResponseError,
};
use serde_json::json;
use tracing::warn;

/// Rejection returned when a client exceeds its window budget.
#[derive(Debug)]
pub struct RateLimitExceeded {
    pub max_requests: u32,
    pub window_secs: u64,
}

impl std::fmt::Display for RateLimitExceeded {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Rate limit exceeded: {} requests per {} seconds",
            self.max_requests, self.window_secs
        )
    }
}

impl ResponseError for RateLimitExceeded {
    fn status_code(&self) -> StatusCode {
        StatusCode::TOO_MANY_REQUESTS
    }

    fn error_response(&self) -> HttpResponse {
        let mut res = HttpResponse::TooManyRequests();
        res.insert_header(("Retry-After", self.window_secs.to_string()));
        res.json(json!({
            "error": self.to_string(),
            "retry_after": self.window_secs
        }))
    }
}

/// Counter for one client in the current window.
struct WindowEntry {
    started: Instant,
    count: u32,
}

struct LimiterState {
    clients: Mutex<HashMap<String, WindowEntry>>,
    max_requests: u32,
    window: Duration,
}

/// Rate limiting middleware factory.
pub struct RateLimiter {
    state: Rc<LimiterState>,
}

impl RateLimiter {
    pub fn new(max_requests: u32, window_secs: u64) -> Self {
        Self {
            state: Rc::new(LimiterState {
                clients: Mutex::new(HashMap::new()),
                max_requests,
                window: Duration::from_secs(window_secs),
            }),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RateLimiter
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = actix_web::Error;
    type Transform = RateLimiterMiddleware<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RateLimiterMiddleware {
            service,
            state: self.state.clone(),
        }))
    }
}

pub struct RateLimiterMiddleware<S> {
    service: S,
    state: Rc<LimiterState>,
}

impl<S, B> Service<ServiceRequest> for RateLimiterMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = actix_web::Error;
    type Future =
        std::pin::Pin<Box<dyn std::future::Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        // CORS preflight must not eat into the budget.
        if req.method() == Method::OPTIONS {
            let fut = self.service.call(req);
            return Box::pin(async move { fut.await });
        }

        let ip = req
            .connection_info()
            .peer_addr()
            .unwrap_or("unknown")
            .to_string();

        let now = Instant::now();
        let allowed = match self.state.clients.lock() {
            Ok(mut clients) => {
                clients.retain(|_, entry| now.duration_since(entry.started) < self.state.window);

                let entry = clients.entry(ip.clone()).or_insert(WindowEntry {
                    started: now,
                    count: 0,
                });
                if entry.count >= self.state.max_requests {
                    false
                } else {
                    entry.count += 1;
                    true
                }
            }
            // Poisoned lock: let the request through rather than lock
            // everyone out.
            Err(_) => true,
        };

        if !allowed {
            warn!(client = %ip, "rate limit exceeded");
            let error = RateLimitExceeded {
                max_requests: self.state.max_requests,
                window_secs: self.state.window.as_secs(),
            };
            return Box::pin(async move { Err(error.into()) });
        }

        let fut = self.service.call(req);
        Box::pin(async move { fut.await })
    }
}
