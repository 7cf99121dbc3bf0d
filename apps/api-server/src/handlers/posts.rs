//! Post handlers.

use actix_web::{HttpResponse, web};

use quill_core::domain::{Post, PostDraft};
use quill_shared::dto::{CreatePostRequest, DeletePostResponse, PostResponse, UpdatePostRequest};

use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

fn to_response(post: Post) -> PostResponse {
    PostResponse {
        id: post.id,
        title: post.title,
        description: post.description,
        content: post.content,
        image: post.image,
        created_at: post.created_at.to_rfc3339(),
        updated_at: post.updated_at.to_rfc3339(),
    }
}

/// GET /api/posts - public, newest first
pub async fn list(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let posts = state.posts.list_all().await?;
    let body: Vec<PostResponse> = posts.into_iter().map(to_response).collect();

    Ok(HttpResponse::Ok().json(body))
}

/// GET /api/posts/{id} - public
pub async fn get(state: web::Data<AppState>, path: web::Path<i64>) -> AppResult<HttpResponse> {
    let id = path.into_inner();

    let post = state
        .posts
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Post {} not found", id)))?;

    Ok(HttpResponse::Ok().json(to_response(post)))
}

/// POST /api/posts - protected
pub async fn create(
    state: web::Data<AppState>,
    _identity: Identity,
    body: web::Json<CreatePostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    // Validation happens before any storage access
    let draft = PostDraft::new(req.title, req.description, req.content, req.image)?;
    let post = state.posts.create(draft).await?;

    Ok(HttpResponse::Created().json(to_response(post)))
}

/// PUT /api/posts/{id} - protected, full-field replace
pub async fn update(
    state: web::Data<AppState>,
    _identity: Identity,
    path: web::Path<i64>,
    body: web::Json<UpdatePostRequest>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let req = body.into_inner();

    let draft = PostDraft::new(req.title, req.description, req.content, req.image)?;
    let post = state.posts.update(id, draft).await?;

    Ok(HttpResponse::Ok().json(to_response(post)))
}

/// DELETE /api/posts/{id} - protected
///
/// Reports whether a row was removed; deleting a missing id is not an
/// error.
pub async fn delete(
    state: web::Data<AppState>,
    _identity: Identity,
    path: web::Path<i64>,
) -> AppResult<HttpResponse> {
    let deleted = state.posts.delete(path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(DeletePostResponse { deleted }))
}

#[cfg(test)]
mod tests {
    use actix_web::{App, http::StatusCode, test, web};
    use std::sync::Arc;

    use migration::{Migrator, MigratorTrait};
    use quill_core::ports::SessionGate;
    use quill_infra::{JwtSessionGate, SessionConfig};
    use quill_shared::dto::{AuthResponse, DeletePostResponse, PostResponse};

    use crate::state::AppState;

    async fn test_state() -> web::Data<AppState> {
        let mut opts = sea_orm::ConnectOptions::new("sqlite::memory:");
        opts.max_connections(1);
        let db = sea_orm::Database::connect(opts).await.unwrap();
        Migrator::up(&db, None).await.unwrap();
        web::Data::new(AppState::new(db))
    }

    fn test_gate() -> web::Data<Arc<dyn SessionGate>> {
        let gate: Arc<dyn SessionGate> = Arc::new(JwtSessionGate::new(SessionConfig {
            admin_username: "admin".to_string(),
            admin_password: "password".to_string(),
            secret: "test-secret-key".to_string(),
            ttl_hours: 1,
            issuer: "test-issuer".to_string(),
        }));
        web::Data::new(gate)
    }

    macro_rules! test_app {
        ($state:expr) => {
            test::init_service(
                App::new()
                    .app_data($state)
                    .app_data(test_gate())
                    .configure(crate::handlers::configure_routes),
            )
            .await
        };
    }

    macro_rules! login {
        ($app:expr) => {{
            let req = test::TestRequest::post()
                .uri("/api/auth/login")
                .set_json(serde_json::json!({"username": "admin", "password": "password"}))
                .to_request();
            let auth: AuthResponse = test::call_and_read_body_json($app, req).await;
            auth.access_token
        }};
    }

    #[actix_web::test]
    async fn test_mutations_require_session() {
        let app = test_app!(test_state().await);

        let create = test::TestRequest::post()
            .uri("/api/posts")
            .set_json(serde_json::json!({"title": "Hello", "content": "# Hi"}))
            .to_request();
        assert_eq!(
            test::call_service(&app, create).await.status(),
            StatusCode::UNAUTHORIZED
        );

        let update = test::TestRequest::put()
            .uri("/api/posts/1")
            .set_json(serde_json::json!({"title": "Hello", "content": "# Hi"}))
            .to_request();
        assert_eq!(
            test::call_service(&app, update).await.status(),
            StatusCode::UNAUTHORIZED
        );

        let delete = test::TestRequest::delete().uri("/api/posts/1").to_request();
        assert_eq!(
            test::call_service(&app, delete).await.status(),
            StatusCode::UNAUTHORIZED
        );
    }

    #[actix_web::test]
    async fn test_full_post_lifecycle() {
        let app = test_app!(test_state().await);
        let token = login!(&app);
        let bearer = format!("Bearer {}", token);

        // Create
        let req = test::TestRequest::post()
            .uri("/api/posts")
            .insert_header(("Authorization", bearer.clone()))
            .set_json(
                serde_json::json!({"title": "Hello", "description": "d", "content": "# Hi"}),
            )
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let created: PostResponse = test::read_body_json(resp).await;
        assert_eq!(created.id, 1);
        assert_eq!(created.created_at, created.updated_at);

        // Update
        let req = test::TestRequest::put()
            .uri("/api/posts/1")
            .insert_header(("Authorization", bearer.clone()))
            .set_json(serde_json::json!({"title": "Hello2", "content": "# Hi"}))
            .to_request();
        let updated: PostResponse = test::call_and_read_body_json(&app, req).await;
        assert_eq!(updated.id, 1);
        assert_eq!(updated.title, "Hello2");
        assert_eq!(updated.created_at, created.created_at);

        // Public read
        let req = test::TestRequest::get().uri("/api/posts/1").to_request();
        let fetched: PostResponse = test::call_and_read_body_json(&app, req).await;
        assert_eq!(fetched.title, "Hello2");

        // Delete
        let req = test::TestRequest::delete()
            .uri("/api/posts/1")
            .insert_header(("Authorization", bearer.clone()))
            .to_request();
        let deleted: DeletePostResponse = test::call_and_read_body_json(&app, req).await;
        assert!(deleted.deleted);

        // Gone
        let req = test::TestRequest::get().uri("/api/posts/1").to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::NOT_FOUND
        );

        let req = test::TestRequest::get().uri("/api/posts").to_request();
        let all: Vec<PostResponse> = test::call_and_read_body_json(&app, req).await;
        assert!(all.is_empty());
    }

    #[actix_web::test]
    async fn test_create_rejects_empty_title() {
        let app = test_app!(test_state().await);
        let token = login!(&app);

        let req = test::TestRequest::post()
            .uri("/api/posts")
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .set_json(serde_json::json!({"title": "  ", "content": "# Hi"}))
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[actix_web::test]
    async fn test_update_missing_id_is_not_found() {
        let app = test_app!(test_state().await);
        let token = login!(&app);

        let req = test::TestRequest::put()
            .uri("/api/posts/42")
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .set_json(serde_json::json!({"title": "Hello", "content": "# Hi"}))
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::NOT_FOUND
        );
    }

    #[actix_web::test]
    async fn test_delete_missing_id_reports_false() {
        let app = test_app!(test_state().await);
        let token = login!(&app);

        let req = test::TestRequest::delete()
            .uri("/api/posts/42")
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: DeletePostResponse = test::read_body_json(resp).await;
        assert!(!body.deleted);
    }
}
