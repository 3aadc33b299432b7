use crate::api::{attendance, dashboard, employee};
use actix_governor::{
    Governor, GovernorConfig, GovernorConfigBuilder, PeerIpKeyExtractor,
    governor::middleware::NoOpMiddleware,
};
use actix_web::{HttpResponse, error::InternalError, web};
use serde_json::json;

pub type RateLimit = GovernorConfig<PeerIpKeyExtractor, NoOpMiddleware>;

/// Per-peer-IP budget of `requests_per_min`, replenished evenly over the minute.
/// A budget of zero has no usable quota and yields `None`.
pub fn build_rate_limit(requests_per_min: u32) -> Option<RateLimit> {
    if requests_per_min == 0 {
        return None;
    }
    GovernorConfigBuilder::default()
        .milliseconds_per_request((60_000 / requests_per_min as u64).max(1))
        .burst_size(requests_per_min)
        .key_extractor(PeerIpKeyExtractor)
        .finish()
}

pub fn configure(cfg: &mut web::ServiceConfig, rate_limit: &RateLimit) {
    // Body/path extraction failures answer in the same {"error": ...} shape as handlers
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| {
        let message = err.to_string();
        InternalError::from_response(
            err,
            HttpResponse::BadRequest().json(json!({ "error": message })),
        )
        .into()
    }))
    .app_data(web::PathConfig::default().error_handler(|err, _req| {
        InternalError::from_response(
            err,
            HttpResponse::NotFound().json(json!({ "error": "Not found" })),
        )
        .into()
    }));

    cfg.service(
        web::scope("")
            .wrap(Governor::new(rate_limit))
            .service(web::resource("/").route(web::get().to(dashboard::index)))
            // /employees
            .service(
                web::resource("/employees")
                    .route(web::get().to(employee::list_employees))
                    .route(web::post().to(employee::create_employee)),
            )
            // /employees/{id}
            .service(
                web::resource("/employees/{id}")
                    .route(web::delete().to(employee::delete_employee)),
            )
            // /attendance
            .service(
                web::resource("/attendance").route(web::post().to(attendance::mark_attendance)),
            )
            // /attendance/{employee_id}
            .service(
                web::resource("/attendance/{employee_id}")
                    .route(web::get().to(attendance::get_attendance)),
            )
            .service(web::resource("/dashboard").route(web::get().to(dashboard::get_dashboard))),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::Config, db::test_pool};
    use actix_web::{
        App,
        dev::{Service, ServiceResponse},
        http::StatusCode,
        test,
        web::Data,
    };
    use serde_json::Value;
    use sqlx::SqlitePool;

    async fn app(
        pool: SqlitePool,
    ) -> impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>
    {
        app_with_rate(pool, Config::for_tests().rate_per_min).await
    }

    async fn app_with_rate(
        pool: SqlitePool,
        rate_per_min: u32,
    ) -> impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>
    {
        let config = Config {
            rate_per_min,
            ..Config::for_tests()
        };
        let rate_limit = build_rate_limit(config.rate_per_min).unwrap();
        test::init_service(
            App::new()
                .app_data(Data::new(pool))
                .app_data(Data::new(config))
                .configure(|cfg| configure(cfg, &rate_limit)),
        )
        .await
    }

    fn peer() -> std::net::SocketAddr {
        "127.0.0.1:40000".parse().unwrap()
    }

    fn get(uri: &str) -> actix_http::Request {
        test::TestRequest::get().uri(uri).peer_addr(peer()).to_request()
    }

    fn post(uri: &str, body: Value) -> actix_http::Request {
        test::TestRequest::post()
            .uri(uri)
            .peer_addr(peer())
            .set_json(body)
            .to_request()
    }

    fn delete(uri: &str) -> actix_http::Request {
        test::TestRequest::delete().uri(uri).peer_addr(peer()).to_request()
    }

    fn ann() -> Value {
        json!({ "emp_id": "E1", "name": "Ann", "email": "a@b.com", "department": "IT" })
    }

    #[actix_web::test]
    async fn index_reports_banner() {
        let app = app(test_pool().await).await;

        let resp = test::call_service(&app, get("/")).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(
            body,
            json!({ "message": "HRMS API running", "developer": "Ujju" })
        );
    }

    #[actix_web::test]
    async fn created_employee_lists_with_zero_present_days() {
        let app = app(test_pool().await).await;

        let resp = test::call_service(&app, post("/employees", ann())).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, json!({ "message": "Employee created" }));

        let resp = test::call_service(&app, get("/employees")).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(
            body,
            json!([{
                "id": 1,
                "emp_id": "E1",
                "name": "Ann",
                "email": "a@b.com",
                "department": "IT",
                "present_days": 0
            }])
        );
    }

    #[actix_web::test]
    async fn duplicate_emp_id_is_rejected() {
        let app = app(test_pool().await).await;

        test::call_service(&app, post("/employees", ann())).await;
        let resp = test::call_service(&app, post("/employees", ann())).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, json!({ "error": "Employee ID already exists" }));

        let resp = test::call_service(&app, get("/employees")).await;
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body.as_array().map(Vec::len), Some(1));
    }

    #[actix_web::test]
    async fn invalid_employee_payloads_are_bad_requests() {
        let app = app(test_pool().await).await;

        let cases = [
            (json!({ "emp_id": "E1", "name": "Ann", "email": "a@b.com" }), "All fields are required"),
            (json!({ "emp_id": "E 1", "name": "Ann", "email": "a@b.com", "department": "IT" }), "Employee ID must be alphanumeric"),
            (json!({ "emp_id": "E1", "name": "Ann3", "email": "a@b.com", "department": "IT" }), "Name must contain only letters"),
            (json!({ "emp_id": "E1", "name": "Ann", "email": "a.b.com", "department": "IT" }), "Invalid email format"),
        ];

        for (payload, expected) in cases {
            let resp = test::call_service(&app, post("/employees", payload)).await;
            assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
            let body: Value = test::read_body_json(resp).await;
            assert_eq!(body, json!({ "error": expected }));
        }
    }

    #[actix_web::test]
    async fn deleting_unknown_employee_is_404() {
        let app = app(test_pool().await).await;

        let resp = test::call_service(&app, delete("/employees/7")).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, json!({ "error": "Employee not found" }));

        let resp = test::call_service(&app, delete("/employees/abc")).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn delete_cascades_to_attendance() {
        let app = app(test_pool().await).await;

        test::call_service(&app, post("/employees", ann())).await;
        test::call_service(
            &app,
            post("/attendance", json!({ "employee_id": 1, "date": "2024-01-01", "status": "Present" })),
        )
        .await;

        let resp = test::call_service(&app, delete("/employees/1")).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, json!({ "message": "Deleted" }));

        let resp = test::call_service(&app, get("/attendance/1")).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, json!([]));

        let resp = test::call_service(&app, get("/dashboard")).await;
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, json!({ "totalEmployees": 0, "present": 0, "absent": 0 }));
    }

    #[actix_web::test]
    async fn marking_twice_updates_in_place_and_dashboard_follows() {
        let app = app(test_pool().await).await;

        let resp = test::call_service(&app, post("/employees", ann())).await;
        assert_eq!(resp.status(), StatusCode::CREATED);

        let resp = test::call_service(
            &app,
            post("/attendance", json!({ "employee_id": 1, "date": "2024-01-01", "status": "Present" })),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, json!({ "message": "Attendance marked" }));

        let resp = test::call_service(
            &app,
            post("/attendance", json!({ "employee_id": 1, "date": "2024-01-01", "status": "Absent" })),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, json!({ "message": "Attendance updated" }));

        let resp = test::call_service(&app, get("/attendance/1")).await;
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, json!([{ "date": "2024-01-01", "status": "Absent" }]));

        let resp = test::call_service(&app, get("/dashboard")).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, json!({ "totalEmployees": 1, "present": 0, "absent": 1 }));
    }

    #[actix_web::test]
    async fn attendance_date_filter_and_present_days() {
        let app = app(test_pool().await).await;
        test::call_service(&app, post("/employees", ann())).await;

        for (date, status) in [("2024-01-01", "Present"), ("2024-01-02", "Present"), ("2024-01-03", "present")] {
            test::call_service(
                &app,
                post("/attendance", json!({ "employee_id": 1, "date": date, "status": status })),
            )
            .await;
        }

        let resp = test::call_service(&app, get("/attendance/1?date=2024-01-02")).await;
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, json!([{ "date": "2024-01-02", "status": "Present" }]));

        let resp = test::call_service(&app, get("/attendance/1?date=")).await;
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body.as_array().map(Vec::len), Some(3));

        let resp = test::call_service(&app, get("/employees")).await;
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body[0]["present_days"], json!(2));

        let resp = test::call_service(&app, get("/dashboard")).await;
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, json!({ "totalEmployees": 1, "present": 2, "absent": 0 }));
    }

    #[actix_web::test]
    async fn attendance_for_unknown_employee() {
        let app = app(test_pool().await).await;

        let resp = test::call_service(&app, get("/attendance/5")).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, json!([]));

        let resp = test::call_service(
            &app,
            post("/attendance", json!({ "employee_id": 5, "date": "2024-01-01", "status": "Present" })),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, json!({ "error": "Employee not found" }));
    }

    #[actix_web::test]
    async fn malformed_attendance_body_is_bad_request() {
        let app = app(test_pool().await).await;

        let resp = test::call_service(&app, post("/attendance", json!({ "date": "2024-01-01" }))).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert!(body["error"].is_string());
    }

    /// Status of a response, including ones a middleware produced as an error.
    async fn status_of(
        app: &impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
        req: actix_http::Request,
    ) -> StatusCode {
        match test::try_call_service(app, req).await {
            Ok(resp) => resp.status(),
            Err(err) => err.as_response_error().status_code(),
        }
    }

    #[actix_web::test]
    async fn rate_limit_is_enforced_per_peer() {
        let app = app_with_rate(test_pool().await, 2).await;

        let dashboard_from = |addr: &str| {
            test::TestRequest::get()
                .uri("/dashboard")
                .peer_addr(addr.parse().unwrap())
                .to_request()
        };

        assert_eq!(status_of(&app, dashboard_from("10.0.0.1:5000")).await, StatusCode::OK);
        assert_eq!(status_of(&app, dashboard_from("10.0.0.1:5001")).await, StatusCode::OK);
        assert_eq!(
            status_of(&app, dashboard_from("10.0.0.1:5002")).await,
            StatusCode::TOO_MANY_REQUESTS
        );

        // another address starts with its own budget
        assert_eq!(status_of(&app, dashboard_from("10.0.0.2:5000")).await, StatusCode::OK);
    }

    #[actix_web::test]
    async fn zero_rate_has_no_limiter() {
        assert!(build_rate_limit(0).is_none());
        assert!(build_rate_limit(1).is_some());
        assert!(build_rate_limit(120_000).is_some());
    }
}
