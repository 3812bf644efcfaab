use axum::{
	body::{self, Body},
	http::{Request, StatusCode},
};
use tower::util::ServiceExt;

use ckpt_api::{routes, state::AppState};
use ckpt_config::{Config, Postgres, Search, Security, Service, Storage};
use ckpt_testkit::TestDatabase;

fn test_config(dsn: String) -> Config {
	Config {
		service: Service {
			http_bind: "127.0.0.1:0".to_string(),
			log_level: "info".to_string(),
		},
		storage: Storage { postgres: Postgres { dsn, pool_max_conns: 1 } },
		search: Search { default_limit: 20, max_fetch_rows: 1_000 },
		security: Security { bind_localhost_only: true },
	}
}

async fn test_env() -> Option<TestDatabase> {
	let base_dsn = match ckpt_testkit::env_dsn() {
		Some(value) => value,
		None => {
			eprintln!("Skipping HTTP tests; set CKPT_PG_DSN to run this test.");

			return None;
		},
	};

	Some(TestDatabase::new(&base_dsn).await.expect("Failed to create test database."))
}

async fn app_for(test_db: &TestDatabase) -> axum::Router {
	let config = test_config(test_db.dsn().to_string());
	let state = AppState::new(config).await.expect("Failed to initialize app state.");

	routes::router(state)
}

fn json_post(uri: &str, payload: serde_json::Value) -> Request<Body> {
	Request::builder()
		.method("POST")
		.uri(uri)
		.header("content-type", "application/json")
		.body(Body::from(payload.to_string()))
		.expect("Failed to build request.")
}

async fn json_body(response: axum::response::Response) -> serde_json::Value {
	let bytes = body::to_bytes(response.into_body(), usize::MAX)
		.await
		.expect("Failed to read response body.");

	serde_json::from_slice(&bytes).expect("Failed to parse response.")
}

#[tokio::test]
#[ignore = "Requires external Postgres. Set CKPT_PG_DSN to run."]
async fn health_ok() {
	let Some(test_db) = test_env().await else {
		return;
	};
	let app = app_for(&test_db).await;
	let response = app
		.oneshot(
			Request::builder().uri("/health").body(Body::empty()).expect("Failed to build request."),
		)
		.await
		.expect("Failed to call /health.");

	assert_eq!(response.status(), StatusCode::OK);

	test_db.cleanup().await.expect("Failed to cleanup test database.");
}

#[tokio::test]
#[ignore = "Requires external Postgres. Set CKPT_PG_DSN to run."]
async fn create_rejects_blank_title_with_field_path() {
	let Some(test_db) = test_env().await else {
		return;
	};
	let app = app_for(&test_db).await;
	let payload = serde_json::json!({
		"title": "   ",
		"summary": "Something.",
		"code_snippet": "fn main() {}",
		"user_feedback": "Fine.",
		"programming_language": "Rust",
		"tags": [],
		"embedding": [0.1]
	});
	let response = app
		.oneshot(json_post("/v1/checkpoints/create", payload))
		.await
		.expect("Failed to call create.");

	assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

	let json = json_body(response).await;

	assert_eq!(json["error_code"], "VALIDATION_FAILED");
	assert_eq!(json["fields"][0], "$.title");

	test_db.cleanup().await.expect("Failed to cleanup test database.");
}

#[tokio::test]
#[ignore = "Requires external Postgres. Set CKPT_PG_DSN to run."]
async fn get_unknown_id_is_a_null_checkpoint_not_an_error() {
	let Some(test_db) = test_env().await else {
		return;
	};
	let app = app_for(&test_db).await;
	let response = app
		.oneshot(json_post("/v1/checkpoints/get", serde_json::json!({ "id": 7 })))
		.await
		.expect("Failed to call get.");

	assert_eq!(response.status(), StatusCode::OK);

	let json = json_body(response).await;

	assert!(json["checkpoint"].is_null());

	test_db.cleanup().await.expect("Failed to cleanup test database.");
}

#[tokio::test]
#[ignore = "Requires external Postgres. Set CKPT_PG_DSN to run."]
async fn delete_unknown_id_reports_false() {
	let Some(test_db) = test_env().await else {
		return;
	};
	let app = app_for(&test_db).await;
	let response = app
		.oneshot(json_post("/v1/checkpoints/delete", serde_json::json!({ "id": 7 })))
		.await
		.expect("Failed to call delete.");

	assert_eq!(response.status(), StatusCode::OK);

	let json = json_body(response).await;

	assert_eq!(json["deleted"], false);

	test_db.cleanup().await.expect("Failed to cleanup test database.");
}

#[tokio::test]
#[ignore = "Requires external Postgres. Set CKPT_PG_DSN to run."]
async fn create_search_roundtrip_over_http() {
	let Some(test_db) = test_env().await else {
		return;
	};
	let app = app_for(&test_db).await;
	let payload = serde_json::json!({
		"title": "Debounce helper",
		"summary": "Debounce user input events.",
		"code_snippet": "const debounce = (fn, ms) => { /* ... */ };",
		"user_feedback": "Saved me twice.",
		"programming_language": "JavaScript",
		"tags": ["javascript", "timing"],
		"embedding": [0.3, 0.7]
	});
	let created = app
		.clone()
		.oneshot(json_post("/v1/checkpoints/create", payload))
		.await
		.expect("Failed to call create.");

	assert_eq!(created.status(), StatusCode::OK);

	let created_json = json_body(created).await;

	assert!(created_json["checkpoint"]["id"].as_i64().is_some());

	let search = app
		.oneshot(json_post(
			"/v1/checkpoints/search",
			serde_json::json!({ "keywords": ["debounce"] }),
		))
		.await
		.expect("Failed to call search.");

	assert_eq!(search.status(), StatusCode::OK);

	let search_json = json_body(search).await;

	assert_eq!(search_json["total"], 1);
	assert_eq!(search_json["has_more"], false);
	assert_eq!(search_json["results"][0]["title"], "Debounce helper");

	test_db.cleanup().await.expect("Failed to cleanup test database.");
}
