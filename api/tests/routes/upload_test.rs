#[cfg(test)]
mod tests {
    use crate::helpers::request::{body_text, get, multipart_body, multipart_request};
    use crate::helpers::{Packager, make_test_app, make_test_app_with};
    use axum::http::{StatusCode, header::LOCATION};
    use tower::ServiceExt;

    #[tokio::test]
    async fn upload_builds_and_redirects_to_download() {
        let t = make_test_app();

        let body = multipart_body("file", Some("hello world.py"), b"print('hi')\n");
        let response = t
            .app
            .clone()
            .oneshot(multipart_request("/upload", body))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[LOCATION], "/download/hello_world");

        // the upload folder is gone once the build is over
        assert_eq!(std::fs::read_dir(t.state.upload_dir()).unwrap().count(), 0);

        let download = t.app.oneshot(get("/download/hello_world")).await.unwrap();
        assert_eq!(download.status(), StatusCode::OK);
        assert_eq!(body_text(download).await, "fake executable for hello_world");

        let jobs = t.state.builds().jobs().await;
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].source_name, "hello_world.py");
    }

    #[tokio::test]
    async fn missing_file_part_is_rejected() {
        let t = make_test_app();
        let body = multipart_body("comment", None, b"just text");
        let response = t
            .app
            .oneshot(multipart_request("/upload", body))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_text(response).await, "No file part");
    }

    #[tokio::test]
    async fn empty_filename_is_rejected() {
        let t = make_test_app();
        let body = multipart_body("file", Some(""), b"");
        let response = t
            .app
            .oneshot(multipart_request("/upload", body))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_text(response).await, "No selected file");
    }

    #[tokio::test]
    async fn unsanitizable_filename_is_rejected() {
        let t = make_test_app();
        let body = multipart_body("file", Some("../"), b"print(1)");
        let response = t
            .app
            .oneshot(multipart_request("/upload", body))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_text(response).await, "Invalid filename");
        assert!(t.state.builds().jobs().await.is_empty());
    }

    #[tokio::test]
    async fn oversized_upload_is_413() {
        let t = make_test_app_with(Packager::Working, 1024);
        let body = multipart_body("file", Some("big.py"), &vec![b'#'; 8 * 1024]);
        let response = t
            .app
            .oneshot(multipart_request("/upload", body))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
        assert!(t.state.builds().jobs().await.is_empty());
    }

    #[tokio::test]
    async fn packager_failure_is_500_with_message() {
        let t = make_test_app_with(Packager::Failing, 10 * 1024 * 1024);
        let body = multipart_body("file", Some("broken.py"), b"import nope\n");
        let response = t
            .app
            .oneshot(multipart_request("/upload", body))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let text = body_text(response).await;
        assert!(text.starts_with("Error creating executable: "), "got {text}");
        assert!(text.contains("status 2"));
        assert!(text.contains("ModuleNotFoundError"));

        // a failed build cleans up its upload too
        assert_eq!(std::fs::read_dir(t.state.upload_dir()).unwrap().count(), 0);
    }
}
