use std::io::Cursor;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use jobboard::board::{
    board_router, AccountId, ApplicationStatus, JobBoardService, JobId, MemoryStore,
    ACCOUNT_HEADER,
};
use jobboard::config::BoardConfig;
use tower::ServiceExt;

const SNAPSHOT: &str = r#"{
    "jobs": [
        {"id": 1, "profession": "Electrician", "company_id": "biz-spark", "company_name": "Spark Works",
         "location": "Chennai", "job_type": ["Full-time"], "salary": "32,000",
         "skills": ["Wiring", "Solar", "Safety"], "created_at": "2025-10-10T06:30:00Z"},
        {"id": 2, "profession": "Plumber", "company_id": "biz-spark", "company_name": "Spark Works",
         "location": "Chennai", "salary": "28,000", "created_at": "2025-10-12T06:30:00Z"}
    ],
    "applications": [
        {"id": 5, "job_id": 1, "applicant_id": "user-anu", "full_name": "Anu Varghese",
         "email": "anu@example.com", "status": "pending", "created_at": "2025-10-11T09:00:00Z"},
        {"id": 6, "job_id": 1, "applicant_id": "user-raj", "full_name": "Raj Patel",
         "email": "raj@example.com", "status": "rejected", "created_at": "2025-10-12T09:00:00Z"}
    ],
    "businesses": [
        {"id": "biz-spark", "business_name": "Spark Works", "industry": "Electrical",
         "instagram": "https://instagram.com/sparkworks"}
    ],
    "profiles": [
        {"user_id": "user-anu", "name": "Anu Varghese", "skills": "solar, wiring", "experience": 1}
    ]
}"#;

fn service() -> Arc<JobBoardService<MemoryStore>> {
    let store = MemoryStore::from_reader(Cursor::new(SNAPSHOT)).expect("snapshot loads");
    Arc::new(JobBoardService::new(Arc::new(store)))
}

fn request(method: &str, uri: &str, account: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(id) = account {
        builder = builder.header(ACCOUNT_HEADER, id);
    }
    builder.body(Body::empty()).expect("request builds")
}

async fn body_text(response: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body readable");
    String::from_utf8(bytes.to_vec()).expect("utf8 body")
}

#[tokio::test]
async fn snapshot_backed_board_serves_owner_and_public_pages() {
    let service = service();
    let app = board_router(service.clone(), BoardConfig::default());

    let response = app
        .clone()
        .oneshot(request("GET", "/my-job-posts", Some("biz-spark")))
        .await
        .expect("request handled");
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    let plumber = body.find("Plumber").expect("plumber card");
    let electrician = body.find("Electrician").expect("electrician card");
    assert!(plumber < electrician, "newest post renders first");

    let response = app
        .clone()
        .oneshot(request("GET", "/jobs", Some("user-anu")))
        .await
        .expect("request handled");
    let body = body_text(response).await;
    assert!(body.contains("2 skill matches"));
    assert!(body.contains("Wiring ✓"));

    let response = app
        .clone()
        .oneshot(request("GET", "/business/Spark%20Works", None))
        .await
        .expect("request handled");
    let body = body_text(response).await;
    assert!(body.contains("Instagram"));
    assert!(body.contains(">S<"), "initial shown when no logo is set");

    let response = app
        .oneshot(request("GET", "/profile/user-anu", None))
        .await
        .expect("request handled");
    assert!(body_text(response).await.contains("1 year experience"));
}

#[tokio::test]
async fn only_pending_applications_can_be_approved() {
    let service = service();
    let app = board_router(service.clone(), BoardConfig::default());

    let response = app
        .clone()
        .oneshot(request("POST", "/applications/6/approve", Some("biz-spark")))
        .await
        .expect("request handled");
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body_text(response)
        .await
        .contains("Application is already rejected"));

    let response = app
        .clone()
        .oneshot(request("POST", "/applications/5/approve", Some("user-anu")))
        .await
        .expect("request handled");
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = app
        .oneshot(request("POST", "/applications/5/approve", Some("biz-spark")))
        .await
        .expect("request handled");
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response
            .headers()
            .get(header::LOCATION)
            .and_then(|value| value.to_str().ok()),
        Some("/my-job-posts/1/applicants?approved=5")
    );

    let loaded = service
        .job_applicants(&AccountId("biz-spark".to_string()), JobId(1))
        .expect("owner reads applicants");
    let statuses: Vec<ApplicationStatus> = loaded
        .applications
        .iter()
        .map(|application| application.status)
        .collect();
    assert_eq!(
        statuses,
        vec![ApplicationStatus::Approved, ApplicationStatus::Rejected]
    );
}

#[tokio::test]
async fn custom_landing_route_is_used_after_login() {
    let settings = BoardConfig {
        landing_route: "/dashboard".to_string(),
        ..BoardConfig::default()
    };
    let app = board_router(service(), settings);

    let response = app
        .oneshot(request("GET", "/login-redirect", Some("user-anu")))
        .await
        .expect("request handled");
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response.headers().get(header::LOCATION).map(|v| v.as_bytes()),
        Some(&b"/dashboard"[..])
    );
}
