//! Hand-built multipart/form-data bodies

use axum::body::Body;
use axum::http::Request;

const BOUNDARY: &str = "voiceage-test-boundary";

#[derive(Debug, Default)]
pub struct MultipartBody {
    body: Vec<u8>,
}

impl MultipartBody {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, name: &str, value: &str) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{}\"\r\n\r\n{}\r\n",
                BOUNDARY, name, value
            )
            .as_bytes(),
        );
        self
    }

    /// File part; `None` omits the Content-Type header
    pub fn file(mut self, name: &str, content_type: Option<&str>, data: &[u8]) -> Self {
        let mut header = format!(
            "--{}\r\nContent-Disposition: form-data; name=\"{}\"; filename=\"voice.wav\"\r\n",
            BOUNDARY, name
        );
        if let Some(ct) = content_type {
            header.push_str(&format!("Content-Type: {}\r\n", ct));
        }
        header.push_str("\r\n");
        self.body.extend_from_slice(header.as_bytes());
        self.body.extend_from_slice(data);
        self.body.extend_from_slice(b"\r\n");
        self
    }

    pub fn finish(mut self) -> Vec<u8> {
        self.body
            .extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
        self.body
    }
}

/// POST /api/analyze with the given form
pub fn analyze_request(form: MultipartBody) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/analyze")
        .header(
            "content-type",
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(form.finish()))
        .unwrap()
}
