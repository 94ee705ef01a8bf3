#[cfg(test)]
mod tests {
    use crate::helpers::make_test_app;
    use crate::helpers::request::{body_text, get};
    use axum::http::{StatusCode, header::CONTENT_TYPE};
    use tower::ServiceExt;

    #[tokio::test]
    async fn home_links_to_both_features() {
        let t = make_test_app();
        let response = t.app.oneshot(get("/")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(
            response.headers()[CONTENT_TYPE]
                .to_str()
                .unwrap()
                .starts_with("text/html")
        );

        let html = body_text(response).await;
        assert!(html.contains("href=\"/upload\""));
        assert!(html.contains("href=\"/send-email\""));
        assert!(html.contains("quickbuild"));
    }

    #[tokio::test]
    async fn upload_form_posts_multipart() {
        let t = make_test_app();
        let response = t.app.oneshot(get("/upload")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let html = body_text(response).await;
        assert!(html.contains("enctype=\"multipart/form-data\""));
        assert!(html.contains("name=\"file\""));
        assert!(html.contains("Maximum upload size: 10 MB"));
    }

    #[tokio::test]
    async fn email_form_has_fields() {
        let t = make_test_app();
        let response = t.app.oneshot(get("/send-email")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let html = body_text(response).await;
        assert!(html.contains("name=\"receiver_email\""));
        assert!(html.contains("name=\"body\""));
    }

    #[tokio::test]
    async fn unknown_route_is_404() {
        let t = make_test_app();
        let response = t.app.oneshot(get("/nope")).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
