//! CMIO Web Server
//!
//! Axum-based server for the care coordination dashboard. Every mutation is a
//! form POST that answers with a redirect back to `/`.

pub mod routes;
pub mod state;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

pub use state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(routes::dashboard::index))
        .route(
            "/pending-facts/{fact_id}/{action}",
            post(routes::facts::review_fact),
        )
        .route("/notes/{note_id}/promote", post(routes::notes::promote_note))
        .route("/notes/{note_id}/submit", post(routes::notes::submit_note))
        .route("/notes/{note_id}/reject", post(routes::notes::reject_note))
        .route("/model/select", post(routes::model::select_model))
        .route(
            "/tasks/{task_id}/steps/{step_index}/toggle",
            post(routes::tasks::toggle_step),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Run the web server.
pub async fn run_server(state: AppState, host: &str, port: u16) -> anyhow::Result<()> {
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(format!("{}:{}", host, port)).await?;
    tracing::info!("Dashboard listening on http://{}:{}", host, port);

    axum::serve(listener, app).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
        response::Response,
    };
    use cmio_core::fact::model::FactStatus;
    use cmio_core::note::model::NoteStatus;
    use cmio_db::DbPool;
    use std::sync::Arc;
    use tower::ServiceExt;

    fn setup() -> (Router, Arc<DbPool>) {
        let db = Arc::new(cmio_db::init_memory_pool().unwrap());
        (create_router(AppState::new(db.clone())), db)
    }

    async fn post(app: &Router, uri: &str) -> Response {
        app.clone()
            .oneshot(Request::post(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    async fn post_form(app: &Router, uri: &str, form: &'static str) -> Response {
        app.clone()
            .oneshot(
                Request::post(uri)
                    .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                    .body(Body::from(form))
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    async fn body_text(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    fn assert_redirects_home(response: &Response) {
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], "/");
    }

    #[tokio::test]
    async fn test_dashboard_renders() {
        let (app, _db) = setup();
        let response = app
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let html = body_text(response).await;
        assert!(html.contains("Housing application submitted"));
        assert!(html.contains("Prep SNAP application"));
        assert!(html.contains("Local LLM (balanced)"));
        assert!(html.contains("housing-support"));
    }

    #[tokio::test]
    async fn test_fact_review_redirects() {
        let (app, db) = setup();

        let response = post(&app, "/pending-facts/1/approve").await;
        assert_redirects_home(&response);
        let fact = cmio_core::fact::get_fact(&db, 1).unwrap();
        assert_eq!(fact.status, FactStatus::Approved);
        assert_eq!(fact.reviewer_id, Some(1));

        // Unknown action and unknown fact are absorbed.
        assert_redirects_home(&post(&app, "/pending-facts/2/escalate").await);
        assert_redirects_home(&post(&app, "/pending-facts/99/approve").await);
        let fact = cmio_core::fact::get_fact(&db, 2).unwrap();
        assert_eq!(fact.status, FactStatus::Pending);
    }

    #[tokio::test]
    async fn test_note_promotion_redirects() {
        let (app, db) = setup();
        assert_redirects_home(&post(&app, "/notes/1/promote").await);
        assert_redirects_home(&post(&app, "/notes/1/promote").await);
        assert_redirects_home(&post(&app, "/notes/8/promote").await);

        let note = cmio_core::note::get_note(&db, 1).unwrap();
        assert_eq!(note.status, NoteStatus::Approved);
        let case_notes = cmio_core::note::list_case_notes(&db).unwrap();
        assert_eq!(case_notes.len(), 1);
        assert_eq!(case_notes[0].body, note.details);

        let html = body_text(
            app.oneshot(Request::get("/").body(Body::empty()).unwrap())
                .await
                .unwrap(),
        )
        .await;
        assert!(html.contains("Draft created from channel post."));
    }

    #[tokio::test]
    async fn test_note_submit_and_reject() {
        let (app, db) = setup();
        assert_redirects_home(&post(&app, "/notes/1/submit").await);
        assert_eq!(
            cmio_core::note::get_note(&db, 1).unwrap().status,
            NoteStatus::ReadyForApproval
        );

        assert_redirects_home(&post(&app, "/notes/2/reject").await);
        assert_eq!(
            cmio_core::note::get_note(&db, 2).unwrap().status,
            NoteStatus::Rejected
        );
    }

    #[tokio::test]
    async fn test_model_selection() {
        let (app, db) = setup();
        assert_redirects_home(&post_form(&app, "/model/select", "model=local-llm").await);
        assert_eq!(cmio_core::analysis::get_selected_model(&db).unwrap(), "local-llm");

        assert_redirects_home(&post_form(&app, "/model/select", "model=whatever%20works").await);
        assert_eq!(
            cmio_core::analysis::get_selected_model(&db).unwrap(),
            "whatever works"
        );

        // Missing field keeps the current selection.
        assert_redirects_home(&post_form(&app, "/model/select", "").await);
        assert_eq!(
            cmio_core::analysis::get_selected_model(&db).unwrap(),
            "whatever works"
        );

        // So does a bare POST without any form body.
        assert_redirects_home(&post(&app, "/model/select").await);
        assert_eq!(
            cmio_core::analysis::get_selected_model(&db).unwrap(),
            "whatever works"
        );
    }

    #[tokio::test]
    async fn test_strict_model_selection() {
        let db = Arc::new(cmio_db::init_memory_pool().unwrap());
        let app = create_router(AppState::new(db.clone()).with_strict_models(true));

        let response = post_form(&app, "/model/select", "model=mystery").await;
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(cmio_core::analysis::get_selected_model(&db).unwrap(), "pattern");

        assert_redirects_home(&post_form(&app, "/model/select", "model=private-llm").await);
        assert_eq!(cmio_core::analysis::get_selected_model(&db).unwrap(), "private-llm");
    }

    #[tokio::test]
    async fn test_step_toggle() {
        let (app, db) = setup();
        assert_redirects_home(&post(&app, "/tasks/2/steps/0/toggle").await);
        assert!(!cmio_core::task::get_task(&db, 2).unwrap().steps[0].completed);

        assert_redirects_home(&post(&app, "/tasks/2/steps/5/toggle").await);
        assert_redirects_home(&post(&app, "/tasks/12/steps/0/toggle").await);
        let steps = cmio_core::task::get_task(&db, 2).unwrap().steps;
        assert!(!steps[0].completed);
        assert!(!steps[1].completed);
    }

    #[tokio::test]
    async fn test_non_numeric_ids_are_rejected() {
        let (app, _db) = setup();
        let response = post(&app, "/tasks/two/steps/0/toggle").await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = post(&app, "/tasks/2/steps/-1/toggle").await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
