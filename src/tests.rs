//! Integration tests for the school content backend.

use std::sync::Arc;

use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde_json::{json, Value};
use tempfile::TempDir;

use crate::config::Config;
use crate::db::{init_database, Repository};
use crate::search::SearchIndex;
use crate::{create_router, AppState};

const ADMIN_TOKEN: &str = "test-admin-token";

/// Test fixture for integration tests.
struct TestFixture {
    client: Client,
    base_url: String,
    _temp_dir: TempDir,
}

impl TestFixture {
    async fn new() -> Self {
        Self::with_token(Some(ADMIN_TOKEN.to_string())).await
    }

    async fn with_token(token: Option<String>) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let db_path = temp_dir.path().join("test.sqlite");
        let index_path = temp_dir.path().join("index");
        let upload_dir = temp_dir.path().join("uploads");

        // Initialize database
        let pool = init_database(&db_path).await.expect("Failed to init DB");
        let repo = Arc::new(Repository::new(pool));

        // Initialize search index
        let search = Arc::new(SearchIndex::open(&index_path).expect("Failed to init search"));

        // Create config
        let config = Config {
            admin_token: token.clone(),
            db_path,
            index_path,
            upload_dir,
            bind_addr: "127.0.0.1:0".parse().unwrap(),
            log_level: "warn".to_string(),
        };

        let state = AppState {
            repo,
            search,
            config: Arc::new(config),
        };

        let app = create_router(state);

        // Bind to random port
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind");
        let addr = listener.local_addr().expect("Failed to get addr");
        let base_url = format!("http://{}", addr);

        // Spawn server
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        // Wait for server to start
        tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;

        let mut client_builder = Client::builder();
        if let Some(token) = token {
            let mut headers = reqwest::header::HeaderMap::new();
            headers.insert(
                reqwest::header::AUTHORIZATION,
                format!("Bearer {}", token).parse().unwrap(),
            );
            client_builder = client_builder.default_headers(headers);
        }

        TestFixture {
            client: client_builder.build().unwrap(),
            base_url,
            _temp_dir: temp_dir,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Upload a PDF document through the admin API and return the response body.
    async fn upload_document(&self, title: &str, extra: &[(&str, &str)]) -> Value {
        let part = Part::bytes(b"%PDF-1.4 test content".to_vec())
            .file_name(format!("{}.pdf", title))
            .mime_str("application/pdf")
            .unwrap();

        let mut form = Form::new().part("file", part).text("title", title.to_string());
        for (name, value) in extra {
            form = form.text(name.to_string(), value.to_string());
        }

        let resp = self
            .client
            .post(self.url("/api/admin/documents"))
            .multipart(form)
            .send()
            .await
            .unwrap();

        assert_eq!(resp.status(), 200);
        resp.json().await.unwrap()
    }

    /// Upload a PNG image through the admin API and return the response body.
    async fn upload_image(&self, title: &str, extra: &[(&str, &str)]) -> Value {
        let part = Part::bytes(b"\x89PNG\r\n\x1a\n fake image".to_vec())
            .file_name(format!("{}.png", title))
            .mime_str("image/png")
            .unwrap();

        let mut form = Form::new().part("file", part).text("title", title.to_string());
        for (name, value) in extra {
            form = form.text(name.to_string(), value.to_string());
        }

        let resp = self
            .client
            .post(self.url("/api/admin/gallery"))
            .multipart(form)
            .send()
            .await
            .unwrap();

        assert_eq!(resp.status(), 200);
        resp.json().await.unwrap()
    }
}

#[tokio::test]
async fn test_health_check() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .client
        .get(fixture.url("/health"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(resp.text().await.unwrap(), "OK");
}

#[tokio::test]
async fn test_admin_requires_token() {
    let fixture = TestFixture::new().await;

    // Plain client without the default Authorization header
    let client = Client::new();
    let resp = client
        .get(fixture.url("/api/admin/vacancies"))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 401);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn test_admin_rejects_wrong_token() {
    let fixture = TestFixture::new().await;

    let client = Client::new();
    let resp = client
        .get(fixture.url("/api/admin/vacancies"))
        .header("authorization", "Bearer wrong-token")
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 401);
}

#[tokio::test]
async fn test_admin_accepts_api_key_header() {
    let fixture = TestFixture::new().await;

    let client = Client::new();
    let resp = client
        .get(fixture.url("/api/admin/vacancies"))
        .header("x-api-key", ADMIN_TOKEN)
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 200);
}

#[tokio::test]
async fn test_public_routes_do_not_require_token() {
    let fixture = TestFixture::new().await;

    let client = Client::new();
    for path in ["/api/documents", "/api/gallery", "/api/board", "/api/vacancies", "/api/staff"] {
        let resp = client.get(fixture.url(path)).send().await.unwrap();
        assert_eq!(resp.status(), 200, "expected 200 for {}", path);
    }
}

#[tokio::test]
async fn test_document_upload_and_publish_filtering() {
    let fixture = TestFixture::new().await;

    let published = fixture
        .upload_document(
            "Term Dates",
            &[("category", "newsletter"), ("isPublished", "true")],
        )
        .await;
    assert_eq!(published["success"], true);
    assert_eq!(published["data"]["category"], "newsletter");
    assert_eq!(published["data"]["isPublished"], true);
    assert!(published["data"]["fileUrl"]
        .as_str()
        .unwrap()
        .starts_with("/uploads/"));

    fixture
        .upload_document("Draft Newsletter", &[("category", "newsletter")])
        .await;

    // Public list only contains the published document
    let resp = fixture
        .client
        .get(fixture.url("/api/documents"))
        .send()
        .await
        .unwrap();
    let body: Value = resp.json().await.unwrap();
    let titles: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["title"].as_str().unwrap())
        .collect();
    assert!(titles.contains(&"Term Dates"));
    assert!(!titles.contains(&"Draft Newsletter"));

    // Admin list contains both
    let resp = fixture
        .client
        .get(fixture.url("/api/admin/documents"))
        .send()
        .await
        .unwrap();
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["data"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_document_category_filter() {
    let fixture = TestFixture::new().await;

    fixture
        .upload_document("Fee Schedule", &[("category", "fees"), ("isPublished", "true")])
        .await;
    fixture
        .upload_document("Newsletter 1", &[("category", "newsletter"), ("isPublished", "true")])
        .await;

    let resp = fixture
        .client
        .get(fixture.url("/api/documents?category=fees"))
        .send()
        .await
        .unwrap();
    let body: Value = resp.json().await.unwrap();
    let docs = body["data"].as_array().unwrap();
    assert_eq!(docs.len(), 1);
    assert_eq!(docs[0]["title"], "Fee Schedule");

    // Unknown category is a validation error
    let resp = fixture
        .client
        .get(fixture.url("/api/documents?category=homework"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_document_download_serves_uploaded_bytes() {
    let fixture = TestFixture::new().await;

    let created = fixture
        .upload_document("Code of Conduct", &[("isPublished", "true")])
        .await;
    let id = created["data"]["id"].as_str().unwrap();

    // The redirect lands on the statically served upload
    let resp = fixture
        .client
        .get(fixture.url(&format!("/api/documents/{}/download", id)))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(resp.bytes().await.unwrap().as_ref(), b"%PDF-1.4 test content");
}

#[tokio::test]
async fn test_document_file_size_display() {
    let fixture = TestFixture::new().await;

    let created = fixture
        .upload_document("Sized", &[("isPublished", "true")])
        .await;

    // 21 bytes of test content
    assert_eq!(created["data"]["fileSize"], 21);
    assert_eq!(created["data"]["fileSizeDisplay"], "21 Bytes");
}

#[tokio::test]
async fn test_document_update_and_delete() {
    let fixture = TestFixture::new().await;

    let created = fixture.upload_document("Old Title", &[]).await;
    let id = created["data"]["id"].as_str().unwrap();

    let resp = fixture
        .client
        .put(fixture.url(&format!("/api/admin/documents/{}", id)))
        .json(&json!({ "title": "New Title", "isPublished": true }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["data"]["title"], "New Title");
    assert_eq!(body["data"]["isPublished"], true);

    let resp = fixture
        .client
        .delete(fixture.url(&format!("/api/admin/documents/{}", id)))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let resp = fixture
        .client
        .get(fixture.url(&format!("/api/documents/{}", id)))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
}

#[tokio::test]
async fn test_policy_catalog_resolution() {
    let fixture = TestFixture::new().await;

    // Matched by normalized title heuristics
    fixture
        .upload_document("CODE OF CONDUCT.pdf", &[("isPublished", "true")])
        .await;

    // Matched by explicit slug despite an unrelated title
    fixture
        .upload_document(
            "2025 enrolment pack",
            &[("policySlug", "admissions-policy"), ("isPublished", "true")],
        )
        .await;

    // Draft policies are invisible to the catalog
    fixture.upload_document("Uniform Policy", &[]).await;

    let resp = fixture
        .client
        .get(fixture.url("/api/documents/policies"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    let slots = body["data"].as_array().unwrap();

    let slot = |slug: &str| {
        slots
            .iter()
            .find(|s| s["slug"] == slug)
            .unwrap_or_else(|| panic!("missing slot {}", slug))
    };

    assert_eq!(
        slot("code-of-conduct")["document"]["title"],
        "CODE OF CONDUCT.pdf"
    );
    assert_eq!(
        slot("admissions-policy")["document"]["title"],
        "2025 enrolment pack"
    );
    assert!(slot("uniform-policy")["document"].is_null());
    assert!(slot("school-fees")["document"].is_null());
}

#[tokio::test]
async fn test_document_upload_rejects_wrong_type() {
    let fixture = TestFixture::new().await;

    let part = Part::bytes(b"not a document".to_vec())
        .file_name("script.sh")
        .mime_str("application/x-sh")
        .unwrap();
    let form = Form::new().part("file", part).text("title", "Bad Upload");

    let resp = fixture
        .client
        .post(fixture.url("/api/admin/documents"))
        .multipart(form)
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 400);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_document_upload_requires_title() {
    let fixture = TestFixture::new().await;

    let part = Part::bytes(b"%PDF-1.4".to_vec())
        .file_name("untitled.pdf")
        .mime_str("application/pdf")
        .unwrap();
    let form = Form::new().part("file", part);

    let resp = fixture
        .client
        .post(fixture.url("/api/admin/documents"))
        .multipart(form)
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 400);
}

#[tokio::test]
async fn test_gallery_upload_and_category_listing() {
    let fixture = TestFixture::new().await;

    let created = fixture
        .upload_image(
            "Sports Day",
            &[
                ("category", "events"),
                ("isPublished", "true"),
                ("width", "1600"),
                ("height", "900"),
                ("tags", r#"["sports","athletics"]"#),
            ],
        )
        .await;
    assert_eq!(created["data"]["category"], "events");
    assert_eq!(created["data"]["width"], 1600);
    assert_eq!(created["data"]["height"], 900);

    fixture
        .upload_image("Staff Photo", &[("category", "staff"), ("isPublished", "true")])
        .await;
    fixture
        .upload_image("Unreviewed", &[("category", "events")])
        .await;

    let resp = fixture
        .client
        .get(fixture.url("/api/gallery/category/events"))
        .send()
        .await
        .unwrap();
    let body: Value = resp.json().await.unwrap();
    let images = body["data"].as_array().unwrap();
    assert_eq!(images.len(), 1);
    assert_eq!(images[0]["title"], "Sports Day");

    // Unknown category is a validation error
    let resp = fixture
        .client
        .get(fixture.url("/api/gallery/category/banana"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
}

#[tokio::test]
async fn test_gallery_publish_toggle() {
    let fixture = TestFixture::new().await;

    let created = fixture.upload_image("Carol Service", &[]).await;
    let id = created["data"]["id"].as_str().unwrap();

    // Draft is hidden from the public endpoint
    let resp = fixture
        .client
        .get(fixture.url(&format!("/api/gallery/{}", id)))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);

    let resp = fixture
        .client
        .patch(fixture.url(&format!("/api/admin/gallery/{}/publish", id)))
        .json(&json!({ "isPublished": true }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let resp = fixture
        .client
        .get(fixture.url(&format!("/api/gallery/{}", id)))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["data"]["title"], "Carol Service");
}

#[tokio::test]
async fn test_gallery_stats() {
    let fixture = TestFixture::new().await;

    fixture
        .upload_image("One", &[("category", "events"), ("isPublished", "true")])
        .await;
    fixture
        .upload_image("Two", &[("category", "events")])
        .await;
    fixture
        .upload_image("Three", &[("category", "news"), ("isPublished", "true")])
        .await;

    let resp = fixture
        .client
        .get(fixture.url("/api/gallery/stats"))
        .send()
        .await
        .unwrap();
    let body: Value = resp.json().await.unwrap();

    assert_eq!(body["data"]["total"], 3);
    assert_eq!(body["data"]["published"], 2);

    let by_category = body["data"]["byCategory"].as_array().unwrap();
    let events = by_category
        .iter()
        .find(|c| c["category"] == "events")
        .unwrap();
    assert_eq!(events["total"], 2);
    assert_eq!(events["published"], 1);
}

#[tokio::test]
async fn test_gallery_search() {
    let fixture = TestFixture::new().await;

    fixture
        .upload_image(
            "Athletics Championship",
            &[
                ("description", "Inter-house athletics finals"),
                ("isPublished", "true"),
            ],
        )
        .await;
    fixture
        .upload_image("Library Opening", &[("isPublished", "true")])
        .await;
    fixture
        .upload_image("Athletics Draft", &[("description", "athletics draft")])
        .await;

    // Wait for search index to update
    tokio::time::sleep(tokio::time::Duration::from_millis(200)).await;

    let resp = fixture
        .client
        .get(fixture.url("/api/gallery/search?q=athletics&limit=10"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["success"], true);

    let results = body["data"]["results"].as_array().unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0]["image"]["title"], "Athletics Championship");
    assert!(results[0]["score"].as_f64().unwrap() > 0.0);
}

#[tokio::test]
async fn test_gallery_delete_removes_from_search() {
    let fixture = TestFixture::new().await;

    let created = fixture
        .upload_image("Prize Giving", &[("isPublished", "true")])
        .await;
    let id = created["data"]["id"].as_str().unwrap();

    tokio::time::sleep(tokio::time::Duration::from_millis(200)).await;

    let resp = fixture
        .client
        .delete(fixture.url(&format!("/api/admin/gallery/{}", id)))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    tokio::time::sleep(tokio::time::Duration::from_millis(200)).await;

    let resp = fixture
        .client
        .get(fixture.url("/api/gallery/search?q=prize"))
        .send()
        .await
        .unwrap();
    let body: Value = resp.json().await.unwrap();
    assert!(body["data"]["results"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_board_member_crud_and_ordering() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .client
        .post(fixture.url("/api/admin/board"))
        .json(&json!({
            "name": "Jane Doe",
            "role": "Treasurer",
            "type": "EXECUTIVE",
            "order": 2
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    let member_id = body["data"]["id"].as_str().unwrap().to_string();
    assert_eq!(body["data"]["type"], "EXECUTIVE");

    fixture
        .client
        .post(fixture.url("/api/admin/board"))
        .json(&json!({
            "name": "Sam Smith",
            "role": "Chairperson",
            "type": "EXECUTIVE",
            "order": 1
        }))
        .send()
        .await
        .unwrap();

    // Public list is sorted by display order
    let resp = fixture
        .client
        .get(fixture.url("/api/board"))
        .send()
        .await
        .unwrap();
    let body: Value = resp.json().await.unwrap();
    let members = body["data"].as_array().unwrap();
    assert_eq!(members[0]["name"], "Sam Smith");
    assert_eq!(members[1]["name"], "Jane Doe");

    // Update
    let resp = fixture
        .client
        .put(fixture.url(&format!("/api/admin/board/{}", member_id)))
        .json(&json!({ "role": "Secretary" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["data"]["role"], "Secretary");
    assert_eq!(body["data"]["name"], "Jane Doe");

    // Delete
    let resp = fixture
        .client
        .delete(fixture.url(&format!("/api/admin/board/{}", member_id)))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let resp = fixture
        .client
        .get(fixture.url("/api/board"))
        .send()
        .await
        .unwrap();
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_vacancy_open_filtering() {
    let fixture = TestFixture::new().await;

    // Open: closes in the future
    fixture
        .client
        .post(fixture.url("/api/admin/vacancies"))
        .json(&json!({
            "title": "Grade 3 Teacher",
            "department": "Foundation Phase",
            "employmentType": "Full-time",
            "description": "Teach Grade 3",
            "closingDate": "2099-12-31T23:59:59Z",
            "isPublished": true
        }))
        .send()
        .await
        .unwrap();

    // Open: no closing date
    fixture
        .client
        .post(fixture.url("/api/admin/vacancies"))
        .json(&json!({
            "title": "Relief Teacher",
            "department": "All Phases",
            "employmentType": "Part-time",
            "description": "Relief pool",
            "isPublished": true
        }))
        .send()
        .await
        .unwrap();

    // Closed: closing date has passed
    fixture
        .client
        .post(fixture.url("/api/admin/vacancies"))
        .json(&json!({
            "title": "Music Teacher",
            "department": "Culture",
            "employmentType": "Part-time",
            "description": "Choir and orchestra",
            "closingDate": "2020-01-31T23:59:59Z",
            "isPublished": true
        }))
        .send()
        .await
        .unwrap();

    // Draft, never visible publicly
    fixture
        .client
        .post(fixture.url("/api/admin/vacancies"))
        .json(&json!({
            "title": "Unapproved Post",
            "department": "Admin",
            "employmentType": "Full-time",
            "description": "Pending approval"
        }))
        .send()
        .await
        .unwrap();

    let resp = fixture
        .client
        .get(fixture.url("/api/vacancies"))
        .send()
        .await
        .unwrap();
    let body: Value = resp.json().await.unwrap();
    let titles: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v["title"].as_str().unwrap())
        .collect();
    assert!(titles.contains(&"Grade 3 Teacher"));
    assert!(titles.contains(&"Relief Teacher"));
    assert!(!titles.contains(&"Music Teacher"));
    assert!(!titles.contains(&"Unapproved Post"));

    // include_closed keeps the expired vacancy, but never drafts
    let resp = fixture
        .client
        .get(fixture.url("/api/vacancies?include_closed=true"))
        .send()
        .await
        .unwrap();
    let body: Value = resp.json().await.unwrap();
    let titles: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v["title"].as_str().unwrap())
        .collect();
    assert!(titles.contains(&"Music Teacher"));
    assert!(!titles.contains(&"Unapproved Post"));

    // Admin sees everything
    let resp = fixture
        .client
        .get(fixture.url("/api/admin/vacancies"))
        .send()
        .await
        .unwrap();
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["data"].as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn test_vacancy_crud() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .client
        .post(fixture.url("/api/admin/vacancies"))
        .json(&json!({
            "title": "Grade 1 Teacher",
            "department": "Foundation Phase",
            "employmentType": "Full-time",
            "description": "Teach Grade 1",
            "requirements": ["SACE registration"],
            "qualifications": ["B.Ed Foundation Phase"],
            "isPublished": true,
            "isUrgent": true
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    let id = body["data"]["id"].as_str().unwrap().to_string();
    assert_eq!(body["data"]["isUrgent"], true);
    assert_eq!(body["data"]["isOpen"], true);
    assert_eq!(body["data"]["requirements"][0], "SACE registration");

    // Fetch single
    let resp = fixture
        .client
        .get(fixture.url(&format!("/api/vacancies/{}", id)))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    // Update
    let resp = fixture
        .client
        .put(fixture.url(&format!("/api/admin/vacancies/{}", id)))
        .json(&json!({ "title": "Grade 1 Class Teacher", "isUrgent": false }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["data"]["title"], "Grade 1 Class Teacher");
    assert_eq!(body["data"]["isUrgent"], false);
    assert_eq!(body["data"]["requirements"][0], "SACE registration");

    // Delete
    let resp = fixture
        .client
        .delete(fixture.url(&format!("/api/admin/vacancies/{}", id)))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let resp = fixture
        .client
        .get(fixture.url(&format!("/api/vacancies/{}", id)))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
}

#[tokio::test]
async fn test_staff_crud_and_bulk_roles() {
    let fixture = TestFixture::new().await;

    for (name, role) in [
        ("Mrs A. van der Merwe", "Class Teacher"),
        ("Mr B. Petersen", "Class Teacher"),
        ("Mrs C. Petersen", "Admin Assistant"),
    ] {
        let resp = fixture
            .client
            .post(fixture.url("/api/admin/staff"))
            .json(&json!({ "name": name, "role": role }))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 200);
    }

    // Bulk reassignment by name substring
    let resp = fixture
        .client
        .put(fixture.url("/api/admin/staff/roles"))
        .json(&json!({
            "updates": [
                { "nameContains": "Petersen", "role": "Senior Teacher", "grade": "Grade 7" },
                { "nameContains": "Nobody", "role": "Unused" }
            ]
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    let results = body["data"].as_array().unwrap();
    assert_eq!(results[0]["matched"], 2);
    assert_eq!(results[1]["matched"], 0);

    // Both Petersens got the new role and grade
    let resp = fixture
        .client
        .get(fixture.url("/api/staff"))
        .send()
        .await
        .unwrap();
    let body: Value = resp.json().await.unwrap();
    let staff = body["data"].as_array().unwrap();
    let petersens: Vec<&Value> = staff
        .iter()
        .filter(|s| s["name"].as_str().unwrap().contains("Petersen"))
        .collect();
    assert_eq!(petersens.len(), 2);
    for p in petersens {
        assert_eq!(p["role"], "Senior Teacher");
        assert_eq!(p["grade"], "Grade 7");
    }
    let van_der_merwe = staff
        .iter()
        .find(|s| s["name"].as_str().unwrap().contains("van der Merwe"))
        .unwrap();
    assert_eq!(van_der_merwe["role"], "Class Teacher");
}

#[tokio::test]
async fn test_validation_errors() {
    let fixture = TestFixture::new().await;

    // Board member with empty name
    let resp = fixture
        .client
        .post(fixture.url("/api/admin/board"))
        .json(&json!({ "name": "", "role": "Chair", "type": "MEMBER" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");

    // Vacancy without a department
    let resp = fixture
        .client
        .post(fixture.url("/api/admin/vacancies"))
        .json(&json!({
            "title": "Teacher",
            "department": "",
            "employmentType": "Full-time",
            "description": "Teach"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);

    // Empty bulk role update
    let resp = fixture
        .client
        .put(fixture.url("/api/admin/staff/roles"))
        .json(&json!({ "updates": [] }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
}

#[tokio::test]
async fn test_not_found_errors() {
    let fixture = TestFixture::new().await;

    for path in [
        "/api/documents/non-existent-id",
        "/api/gallery/non-existent-id",
        "/api/vacancies/non-existent-id",
    ] {
        let resp = fixture.client.get(fixture.url(path)).send().await.unwrap();
        assert_eq!(resp.status(), 404, "expected 404 for {}", path);
        let body: Value = resp.json().await.unwrap();
        assert_eq!(body["success"], false);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }

    // Deleting something that does not exist is also a 404
    let resp = fixture
        .client
        .delete(fixture.url("/api/admin/board/non-existent-id"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
}

#[tokio::test]
async fn test_open_admin_api_without_configured_token() {
    let fixture = TestFixture::with_token(None).await;

    // Dev mode: no token configured, admin surface is open
    let resp = fixture
        .client
        .get(fixture.url("/api/admin/vacancies"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
}
