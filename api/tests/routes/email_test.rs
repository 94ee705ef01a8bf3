#[cfg(test)]
mod tests {
    use crate::helpers::make_test_app;
    use crate::helpers::request::body_text;
    use axum::{
        body::Body,
        http::{Request, StatusCode, header::CONTENT_TYPE},
    };
    use tower::ServiceExt;

    fn form_request(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/send-email")
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn sends_and_reports_success() {
        let t = make_test_app();
        let response = t
            .app
            .oneshot(form_request(
                "receiver_email=bob%40example.com&body=Hello+from+the+build+server",
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await;
        assert!(html.contains("🎉 Email Sent Successfully"));

        let sent = t.mail.messages().await;
        assert_eq!(sent.len(), 1);
        let (envelope, raw) = &sent[0];
        assert_eq!(envelope.to()[0].to_string(), "bob@example.com");
        assert!(raw.contains("Subject: QUICK MAIL"));
        assert!(raw.contains("Hello from the build server"));
    }

    #[tokio::test]
    async fn invalid_receiver_shows_error() {
        let t = make_test_app();
        let response = t
            .app
            .oneshot(form_request("receiver_email=nobody&body=hi"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await;
        assert!(html.contains("Error Occurred: invalid receiver address"));
        assert!(t.mail.messages().await.is_empty());
    }

    #[tokio::test]
    async fn missing_field_is_rejected() {
        let t = make_test_app();
        let response = t
            .app
            .oneshot(form_request("receiver_email=bob%40example.com"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
