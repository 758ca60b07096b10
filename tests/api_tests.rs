use std::sync::Arc;

use axum::http::{header::AUTHORIZATION, HeaderValue, StatusCode};
use axum_test::TestServer;
use serde_json::{json, Value};

use recipe_finder_api::catalog::Catalog;
use recipe_finder_api::config::Config;
use recipe_finder_api::models::{Session, UserInfo};
use recipe_finder_api::routes::{create_router, AppState};
use recipe_finder_api::services::providers::{AuthError, AuthProvider};
use recipe_finder_api::services::AuthService;

fn test_state() -> AppState {
    AppState::from_config(&Config::default(), Catalog::builtin().unwrap())
}

fn create_test_server() -> TestServer {
    let state = test_state();
    state.auth.mark_ready();
    let app = create_router(state);
    TestServer::new(app).unwrap()
}

/// Accepts any password and hands out a token derived from the email
struct AcceptingAuthProvider;

#[async_trait::async_trait]
impl AuthProvider for AcceptingAuthProvider {
    async fn sign_up(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        self.sign_in(email, password).await
    }

    async fn sign_in(&self, email: &str, _password: &str) -> Result<Session, AuthError> {
        Ok(Session {
            user: UserInfo {
                id: format!("user-{}", email),
                email: Some(email.to_string()),
            },
            access_token: Some(format!("token-{}", email)),
            expires_at: None,
        })
    }

    async fn sign_out(&self, _session: &Session) -> Result<(), AuthError> {
        Ok(())
    }

    fn name(&self) -> &'static str {
        "accepting"
    }
}

fn create_server_with_accounts() -> TestServer {
    let mut state = test_state();
    state.auth = Arc::new(AuthService::new(Arc::new(AcceptingAuthProvider)));
    state.auth.mark_ready();
    TestServer::new(create_router(state)).unwrap()
}

fn bearer(token: &str) -> HeaderValue {
    format!("Bearer {}", token).parse().unwrap()
}

fn ids(recipes: &[Value]) -> Vec<&str> {
    recipes.iter().map(|r| r["id"].as_str().unwrap()).collect()
}

#[tokio::test]
async fn test_health_check() {
    let server = create_test_server();
    let response = server.get("/health").await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_request_id_echoed() {
    let server = create_test_server();
    let response = server
        .get("/health")
        .add_header(
            "x-request-id".parse::<axum::http::HeaderName>().unwrap(),
            "trace-me-123".parse::<HeaderValue>().unwrap(),
        )
        .await;
    assert_eq!(response.header("x-request-id"), "trace-me-123");
}

#[tokio::test]
async fn test_list_and_get_recipes() {
    let server = create_test_server();

    let recipes: Vec<Value> = server.get("/api/v1/recipes").await.json();
    assert_eq!(recipes.len(), 8);
    assert_eq!(ids(&recipes), vec!["1", "2", "3", "4", "5", "6", "7", "8"]);

    let response = server.get("/api/v1/recipes/7").await;
    response.assert_status_ok();
    let curry: Value = response.json();
    assert_eq!(curry["title"], "Spicy Potato Curry");
    assert_eq!(curry["cookingTime"], 40);
    assert_eq!(curry["difficulty"], "Medium");
}

#[tokio::test]
async fn test_unknown_recipe_is_404() {
    let server = create_test_server();
    let response = server.get("/api/v1/recipes/99").await;
    response.assert_status(StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert!(body["error"].as_str().unwrap().contains("99"));
}

#[tokio::test]
async fn test_suggest_ranks_by_match() {
    let server = create_test_server();

    let response = server
        .post("/api/v1/recipes/suggest")
        .json(&json!({ "selectedIngredients": ["eggs", "cheese"] }))
        .await;
    response.assert_status_ok();

    let suggestions: Vec<Value> = response.json();
    assert_eq!(suggestions.len(), 8);
    assert_eq!(suggestions[0]["id"], "6");
    assert_eq!(suggestions[0]["matchedIngredients"], json!(["eggs", "cheese"]));
    assert_eq!(suggestions[0]["matchPercentage"], 40);
}

#[tokio::test]
async fn test_suggest_applies_filters_and_search() {
    let server = create_test_server();

    let response = server
        .post("/api/v1/recipes/suggest")
        .json(&json!({
            "selectedIngredients": [],
            "filters": {
                "maxCookingTime": 20,
                "difficulty": ["Easy"],
                "dietaryRestrictions": ["Vegetarian"],
                "sortBy": "time"
            },
            "query": ""
        }))
        .await;
    response.assert_status_ok();
    let suggestions: Vec<Value> = response.json();
    assert_eq!(ids(&suggestions), vec!["6", "5"]);

    let response = server
        .post("/api/v1/recipes/suggest")
        .json(&json!({ "query": "RICE" }))
        .await;
    let suggestions: Vec<Value> = response.json();
    assert_eq!(ids(&suggestions), vec!["3", "5"]);
}

#[tokio::test]
async fn test_suggest_is_lenient_about_filters() {
    let server = create_test_server();

    let response = server
        .post("/api/v1/recipes/suggest")
        .json(&json!({
            "filters": {
                "maxCookingTime": 500,
                "difficulty": ["Impossible"],
                "sortBy": "popularity"
            }
        }))
        .await;
    response.assert_status_ok();
    let suggestions: Vec<Value> = response.json();
    assert_eq!(suggestions.len(), 8);
}

#[tokio::test]
async fn test_suggest_tolerates_wrongly_typed_filters() {
    let server = create_test_server();
    let payloads = [
        json!({ "filters": { "maxCookingTime": "30" } }),
        json!({ "filters": { "difficulty": "Easy" } }),
        json!({ "filters": { "servings": [4.5] } }),
        json!({ "filters": { "sortBy": 3 } }),
        json!({ "filters": { "dietaryRestrictions": "Vegan" } }),
        json!({ "filters": "quick" }),
    ];

    for payload in payloads {
        let response = server.post("/api/v1/recipes/suggest").json(&payload).await;
        response.assert_status_ok();
        let suggestions: Vec<Value> = response.json();
        assert_eq!(suggestions.len(), 8, "{}", payload);
    }
}

#[tokio::test]
async fn test_suggest_keeps_valid_parts_of_mixed_filters() {
    let server = create_test_server();
    let response = server
        .post("/api/v1/recipes/suggest")
        .json(&json!({
            "filters": {
                "maxCookingTime": "fast",
                "difficulty": ["Easy", 2],
                "dietaryRestrictions": ["Vegetarian", false],
                "sortBy": "time"
            }
        }))
        .await;
    response.assert_status_ok();

    let lenient: Vec<Value> = response.json();
    let strict: Vec<Value> = server
        .post("/api/v1/recipes/suggest")
        .json(&json!({
            "filters": {
                "difficulty": ["Easy"],
                "dietaryRestrictions": ["Vegetarian"],
                "sortBy": "time"
            }
        }))
        .await
        .json();
    assert!(!lenient.is_empty());
    assert_eq!(ids(&lenient), ids(&strict));
}

#[tokio::test]
async fn test_repeated_suggestion_is_identical() {
    let server = create_test_server();
    let request = json!({ "selectedIngredients": ["Chicken"], "filters": { "sortBy": "rating" } });

    let first: Value = server.post("/api/v1/recipes/suggest").json(&request).await.json();
    let second: Value = server.post("/api/v1/recipes/suggest").json(&request).await.json();
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_shopping_list_aggregates() {
    let server = create_test_server();

    let response = server
        .post("/api/v1/shopping-list")
        .json(&json!({ "recipeIds": ["1", "8", "404"] }))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["recipeIds"], json!(["1", "8"]));

    let entries = body["entries"].as_array().unwrap();
    let chicken = entries
        .iter()
        .find(|e| e["ingredient"] == "chicken")
        .unwrap();
    assert_eq!(chicken["recipeCount"], 2);
    assert_eq!(
        chicken["contributingRecipeTitles"],
        json!(["Classic Chicken Stir-Fry", "Grilled Chicken Salad"])
    );
}

#[tokio::test]
async fn test_shopping_list_empty_selection() {
    let server = create_test_server();
    let body: Value = server
        .post("/api/v1/shopping-list")
        .json(&json!({ "recipeIds": [] }))
        .await
        .json();
    assert_eq!(body["entries"], json!([]));
}

#[tokio::test]
async fn test_filter_options() {
    let server = create_test_server();
    let response = server.get("/api/v1/filters/options").await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["dietaryOptions"].as_array().unwrap().len(), 8);
    assert_eq!(body["difficulties"], json!(["Easy", "Medium", "Hard"]));
    assert_eq!(body["servingThresholds"], json!([2, 4, 6, 8]));
    assert_eq!(body["sortOptions"][0], json!({ "value": "match", "label": "Best Match" }));
    assert_eq!(body["cookingTime"], json!({ "min": 10, "max": 120 }));
    assert_eq!(body["defaults"]["maxCookingTime"], 120);
}

#[tokio::test]
async fn test_popular_ingredients() {
    let server = create_test_server();
    let response = server
        .get("/api/v1/ingredients/popular")
        .add_query_param("q", "CH")
        .add_query_param("selected", "chicken")
        .await;
    response.assert_status_ok();

    let suggestions: Vec<String> = response.json();
    assert_eq!(suggestions, vec!["spinach"]);
}

#[tokio::test]
async fn test_rating_lifecycle() {
    let server = create_test_server();

    let response = server
        .put("/api/v1/recipes/3/rating")
        .json(&json!({ "value": 5 }))
        .await;
    response.assert_status_ok();
    let rated: Value = response.json();
    assert_eq!(rated["userRating"], 5);
    assert_eq!(rated["displayRating"], 5.0);
    // The aggregate is untouched
    assert!((rated["rating"].as_f64().unwrap() - 4.7).abs() < 1e-6);

    let current: Value = server.get("/api/v1/recipes/3/rating").await.json();
    assert_eq!(current["userRating"], 5);

    let cleared: Value = server.delete("/api/v1/recipes/3/rating").await.json();
    assert_eq!(cleared["userRating"], Value::Null);
}

#[tokio::test]
async fn test_rating_out_of_range() {
    let server = create_test_server();
    let response = server
        .put("/api/v1/recipes/3/rating")
        .json(&json!({ "value": 6 }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_recipe_image_resolves() {
    let server = create_test_server();
    let response = server.get("/api/v1/recipes/7/image").await;
    response.assert_status_ok();

    let image: Value = response.json();
    assert_eq!(image["source"], "resolved");
    assert!(image["url"].as_str().unwrap().starts_with("https://"));
}

#[tokio::test]
async fn test_generate_image_requires_key() {
    let server = create_test_server();
    let response = server
        .post("/api/v1/images/generate")
        .json(&json!({ "recipeId": "2" }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert!(body["error"].as_str().unwrap().contains("API key"));
}

#[tokio::test]
async fn test_generate_image_requires_subject() {
    let server = create_test_server();
    let response = server
        .post("/api/v1/images/generate")
        .json(&json!({ "apiKey": "key" }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_session_starts_as_guest() {
    let server = create_test_server();
    let body: Value = server.get("/api/v1/auth/session").await.json();
    assert_eq!(body["access"], "guest");
    assert_eq!(body["user"], Value::Null);
}

#[tokio::test]
async fn test_sign_in_without_provider() {
    let server = create_test_server();

    let response = server
        .post("/api/v1/auth/signin")
        .json(&json!({ "email": "cook@example.com", "password": "secret" }))
        .await;
    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);

    let response = server
        .post("/api/v1/auth/signin")
        .json(&json!({ "email": "", "password": "" }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let body: Value = server.post("/api/v1/auth/signout").await.json();
    assert_eq!(body["access"], "guest");
}

#[tokio::test]
async fn test_sessions_are_scoped_per_client() {
    let server = create_server_with_accounts();

    let response = server
        .post("/api/v1/auth/signin")
        .json(&json!({ "email": "alice@example.com", "password": "secret" }))
        .await;
    response.assert_status_ok();
    let signed_in: Value = response.json();
    assert_eq!(signed_in["access"], "authenticated");
    assert_eq!(signed_in["user"]["email"], "alice@example.com");
    let token = signed_in["accessToken"].as_str().unwrap().to_string();

    // A second client without alice's token is still a guest
    let other: Value = server.get("/api/v1/auth/session").await.json();
    assert_eq!(other["access"], "guest");
    assert_eq!(other["user"], Value::Null);

    let own: Value = server
        .get("/api/v1/auth/session")
        .add_header(AUTHORIZATION, bearer(&token))
        .await
        .json();
    assert_eq!(own["access"], "authenticated");
    assert_eq!(own["user"]["email"], "alice@example.com");
    assert!(own.get("accessToken").is_none());

    // Signing out without the token leaves alice signed in
    server.post("/api/v1/auth/signout").await.assert_status_ok();
    let still: Value = server
        .get("/api/v1/auth/session")
        .add_header(AUTHORIZATION, bearer(&token))
        .await
        .json();
    assert_eq!(still["access"], "authenticated");

    let signed_out: Value = server
        .post("/api/v1/auth/signout")
        .add_header(AUTHORIZATION, bearer(&token))
        .await
        .json();
    assert_eq!(signed_out["access"], "guest");

    let after: Value = server
        .get("/api/v1/auth/session")
        .add_header(AUTHORIZATION, bearer(&token))
        .await
        .json();
    assert_eq!(after["access"], "guest");
}

#[tokio::test]
async fn test_sign_up_returns_token() {
    let server = create_server_with_accounts();
    let response = server
        .post("/api/v1/auth/signup")
        .json(&json!({ "email": "bob@example.com", "password": "secret" }))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["confirmed"], true);
    assert_eq!(body["accessToken"], "token-bob@example.com");
    assert_eq!(body["session"]["user"]["id"], "user-bob@example.com");
}
