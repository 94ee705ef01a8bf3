mod email_test;
mod health_test;
mod pages_test;
mod upload_test;
