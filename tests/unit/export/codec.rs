use base64::Engine as _;

use super::*;

fn checker() -> RasterImage {
    let mut rgba = Vec::new();
    for i in 0..6u8 {
        rgba.extend_from_slice(&[i * 40, 255 - i * 40, 7, if i % 2 == 0 { 255 } else { 128 }]);
    }
    RasterImage::from_straight(3, 2, rgba).unwrap()
}

#[test]
fn png_keeps_dimensions_and_straight_alpha() {
    let img = checker();
    let png = encode_png(&img).unwrap();
    assert_eq!(&png[..4], b"\x89PNG");

    let decoded = image::load_from_memory(&png).unwrap().to_rgba8();
    assert_eq!(decoded.dimensions(), (3, 2));
    assert_eq!(decoded.get_pixel(0, 0).0, [0, 255, 7, 255]);
    assert_eq!(decoded.get_pixel(1, 0).0[3], 128);
}

#[test]
fn data_url_payload_decodes() {
    let png = encode_png(&checker()).unwrap();
    let url = format!(
        "data:image/png;base64,{}",
        base64::engine::general_purpose::STANDARD.encode(&png)
    );
    let img = ImagePayload::DataUrl(url).decode().unwrap();
    assert_eq!((img.width(), img.height()), (3, 2));
    assert_eq!(ImagePayload::Bytes(png).decode().unwrap(), img);
}

#[test]
fn malformed_payloads_are_invalid_input() {
    for bad in [
        "image/png;base64,AAAA",
        "data:image/png;base64",
        "data:image/png,AAAA",
        "data:text/plain;base64,AAAA",
        "data:image/png;base64,***",
    ] {
        let err = decode_data_url(bad).unwrap_err();
        assert!(matches!(err, TypestampError::InvalidInput(_)), "{bad}");
    }
    let err = decode_image(b"not an image").unwrap_err();
    assert!(matches!(err, TypestampError::InvalidInput(_)));
}
