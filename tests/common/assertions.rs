//! Shared assertion helpers.

use axum::http::StatusCode;

use super::app::TestResponse;

const PNG_MAGIC: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

pub fn assert_status(response: &TestResponse, expected: StatusCode) {
    assert_eq!(
        response.status,
        expected,
        "unexpected status; body: {}",
        String::from_utf8_lossy(&response.body)
    );
}

/// Assert the response is a well-formed PNG with the right content type.
pub fn assert_png(response: &TestResponse) {
    assert_status(response, StatusCode::OK);

    let content_type = response
        .headers
        .get("content-type")
        .and_then(|v| v.to_str().ok());
    assert_eq!(content_type, Some("image/png"));

    assert!(
        response.body.len() > 8 && response.body[..8] == PNG_MAGIC,
        "body does not start with the PNG signature"
    );
}

/// Assert an error response with the standard `{status, error}` JSON body.
pub fn assert_json_error(response: &TestResponse, expected: StatusCode) {
    assert_status(response, expected);
    let json = response.json();
    assert_eq!(json["status"], expected.as_u16());
    assert!(
        json["error"].as_str().map(|s| !s.is_empty()).unwrap_or(false),
        "error body missing message: {json}"
    );
}

/// Decode a PNG body into (width, height, RGBA pixels).
pub fn decode_png(body: &[u8]) -> (u32, u32, Vec<u8>) {
    let mut decoder = png::Decoder::new(std::io::Cursor::new(body));
    // Expand indexed/low-depth images so the optimizer's format choice is
    // invisible to callers.
    decoder.set_transformations(png::Transformations::normalize_to_color8());
    let mut reader = decoder.read_info().expect("PNG header should parse");
    let mut buf = vec![0; reader.output_buffer_size()];
    let info = reader.next_frame(&mut buf).expect("PNG frame should decode");
    buf.truncate(info.buffer_size());

    // Normalize to RGBA so comparisons don't depend on the optimizer's
    // choice of output color type.
    let rgba = match info.color_type {
        png::ColorType::Rgba => buf,
        png::ColorType::Rgb => buf
            .chunks_exact(3)
            .flat_map(|p| [p[0], p[1], p[2], 255])
            .collect(),
        png::ColorType::Grayscale => buf.iter().flat_map(|&v| [v, v, v, 255]).collect(),
        png::ColorType::GrayscaleAlpha => buf
            .chunks_exact(2)
            .flat_map(|p| [p[0], p[0], p[0], p[1]])
            .collect(),
        png::ColorType::Indexed => unreachable!("indexed is expanded by the decoder"),
    };

    (info.width, info.height, rgba)
}
