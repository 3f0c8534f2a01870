use crate::metrics::ROUTE_CALLS_COUNTER;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use futures::future::LocalBoxFuture;
use std::future::{ready, Ready};

// Middleware to count calls per route
// Routes are labeled by their pattern (`/getBalance/{wallet}`), never by the raw path,
// so wallet addresses do not end up as metric labels
pub struct RequestsCounters;

impl<S, B> Transform<S, ServiceRequest> for RequestsCounters
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = actix_web::Error;
    type Transform = RequestsCountersMiddleware<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequestsCountersMiddleware {
            service: std::rc::Rc::new(service),
        }))
    }
}

pub struct RequestsCountersMiddleware<S> {
    service: std::rc::Rc<S>,
}

impl<S, B> Service<ServiceRequest> for RequestsCountersMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, request: ServiceRequest) -> Self::Future {
        let service_clone = self.service.clone();
        Box::pin(async move {
            let route = request
                .match_pattern()
                .unwrap_or_else(|| "route_not_found".to_string());
            if route != "/metrics" {
                ROUTE_CALLS_COUNTER.with_label_values(&[&route]).inc();
            }
            service_clone.call(request).await
        })
    }
}
