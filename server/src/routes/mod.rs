use axum::{routing::get, routing::post, Router};
use tower_http::trace::TraceLayer;

use crate::config::{
    create_cors_layer, create_security_headers_layer, propagate_request_id_layer,
    set_request_id_layer, Config,
};
use crate::handlers::{events, health_check, registrations, users};
use crate::state::AppState;

pub fn create_routes(state: AppState, config: &Config) -> Router {
    let api = Router::new()
        .route("/events", get(events::list_events).post(events::create_event))
        .route(
            "/events/:id",
            get(events::get_event)
                .put(events::update_event)
                .delete(events::delete_event),
        )
        .route("/events/:id/participants", get(events::list_participants))
        .route("/users", get(users::list_users).post(users::create_user))
        .route(
            "/users/:id",
            get(users::get_user)
                .put(users::update_user)
                .delete(users::delete_user),
        )
        .route("/users/:id/events", get(users::list_user_events))
        .route("/registrations", post(registrations::register))
        .route(
            "/registrations/:id",
            get(registrations::get_registration).delete(registrations::unregister),
        );

    Router::new()
        .route("/health", get(health_check))
        .nest("/api", api)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(propagate_request_id_layer())
        .layer(create_security_headers_layer(config.production))
        .layer(create_cors_layer(&config.cors_allowed_origins))
        .layer(set_request_id_layer())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::unit_of_work::UnitOfWork;
    use axum::body::{to_bytes, Body};
    use axum::http::{Method, Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn app() -> Router {
        let config = Config::from_lookup(|_| None).unwrap();
        create_routes(AppState::new(UnitOfWork::in_memory(), 10), &config)
    }

    async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    fn event_body(name: &str, category: &str) -> Value {
        json!({
            "name": name,
            "description": "Description",
            "dateAndTime": "2024-09-28T18:00:00",
            "venue": "Arena",
            "category": category,
            "maxNumberOfParticipants": 50,
        })
    }

    fn names(body: &Value) -> Vec<&str> {
        body["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|e| e["name"].as_str().unwrap())
            .collect()
    }

    #[tokio::test]
    async fn test_health_check() {
        let (status, body) = send(&app(), Method::GET, "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["status"], "ok");
    }

    #[tokio::test]
    async fn test_event_crud_round() {
        let app = app();

        let (status, body) = send(&app, Method::POST, "/api/events", Some(event_body("Gala", "Music"))).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["success"], true);
        let id = body["data"]["id"].as_i64().unwrap();

        let mut changed = event_body("Gala", "Music");
        changed["venue"] = json!("Opera");
        let (status, body) = send(&app, Method::PUT, &format!("/api/events/{id}"), Some(changed)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["venue"], "Opera");

        let (status, _) = send(&app, Method::DELETE, &format!("/api/events/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = send(&app, Method::GET, &format!("/api/events/{id}"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_invalid_event_lists_violations() {
        let (status, body) = send(&app(), Method::POST, "/api/events", Some(json!({ "name": "x" }))).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(body["error"]["details"].as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_negative_id_is_out_of_range() {
        let (status, body) = send(&app(), Method::GET, "/api/events/-1", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "OUT_OF_RANGE");
    }

    #[tokio::test]
    async fn test_listing_filters_and_pages() {
        let app = app();
        for (name, category) in [("A", "Music"), ("B", "Sport"), ("C", "Music"), ("D", "Music")] {
            let (status, _) = send(&app, Method::POST, "/api/events", Some(event_body(name, category))).await;
            assert_eq!(status, StatusCode::CREATED);
        }

        let (_, body) = send(&app, Method::GET, "/api/events", None).await;
        assert_eq!(names(&body), ["A", "B", "C", "D"]);

        let (_, body) = send(&app, Method::GET, "/api/events?sortby=category&value=Music&page=2&pageSize=2", None).await;
        assert_eq!(names(&body), ["D"]);

        let (_, body) = send(&app, Method::GET, "/api/events?sortby=name&value=C&page=5", None).await;
        assert_eq!(names(&body), ["C"]);

        let (status, body) = send(&app, Method::GET, "/api/events?sortby=date&value=not-a-date", None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(names(&body).is_empty());

        let (_, body) = send(&app, Method::GET, "/api/events?sortby=bogus&value=x&page=1&pageSize=2", None).await;
        assert_eq!(names(&body).len(), 4);

        let (status, body) = send(&app, Method::GET, "/api/events?page=x&pageSize=oops", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(names(&body).len(), 4);
    }

    #[tokio::test]
    async fn test_registration_flow() {
        let app = app();
        let (_, event) = send(&app, Method::POST, "/api/events", Some(event_body("Meetup", "Tech"))).await;
        let (status, user) = send(
            &app,
            Method::POST,
            "/api/users",
            Some(json!({
                "name": "Alan",
                "surname": "Turing",
                "email": "alan@example.com",
                "birthDate": "1912-06-23",
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        let event_id = event["data"]["id"].as_i64().unwrap();
        let user_id = user["data"]["id"].as_i64().unwrap();
        let registration = json!({ "userId": user_id, "eventId": event_id });

        let (status, saved) = send(&app, Method::POST, "/api/registrations", Some(registration.clone())).await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, _) = send(&app, Method::POST, "/api/registrations", Some(registration)).await;
        assert_eq!(status, StatusCode::CONFLICT);

        let (_, participants) = send(&app, Method::GET, &format!("/api/events/{event_id}/participants"), None).await;
        assert_eq!(participants["data"][0]["surname"], "Turing");

        let (_, events) = send(&app, Method::GET, &format!("/api/users/{user_id}/events"), None).await;
        assert_eq!(names(&events), ["Meetup"]);

        let registration_id = saved["data"]["id"].as_i64().unwrap();
        let (status, _) = send(&app, Method::DELETE, &format!("/api/registrations/{registration_id}"), None).await;
        assert_eq!(status, StatusCode::OK);

        let (status, _) = send(&app, Method::GET, &format!("/api/registrations/{registration_id}"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send(&app, Method::DELETE, &format!("/api/users/{user_id}"), None).await;
        assert_eq!(status, StatusCode::OK);

        let (status, _) = send(&app, Method::GET, &format!("/api/users/{user_id}"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_responses_carry_request_id_and_security_headers() {
        let response = app()
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert!(response.headers().contains_key("x-request-id"));
        assert_eq!(response.headers()["x-frame-options"], "DENY");
    }
}
