use super::*;

#[test]
fn canvas_rejects_zero_and_oversized() {
    assert!(Canvas::new(0, 10).is_err());
    assert!(Canvas::new(10, 0).is_err());
    assert!(Canvas::new(70_000, 10).is_err());
    assert!(Canvas::new(1000, 800).is_ok());
}

#[test]
fn percent_px_conversions_are_inverse() {
    let c = Canvas::new(1600, 900).unwrap();
    let px = c.percent_to_px(Point::new(25.0, 50.0));
    assert_eq!(px, Point::new(400.0, 450.0));
    let back = c.px_to_percent(px);
    assert!((back.x - 25.0).abs() < 1e-9);
    assert!((back.y - 50.0).abs() < 1e-9);
}

#[test]
fn raster_length_is_validated() {
    assert!(RasterImage::from_premul(2, 2, vec![0; 15]).is_err());
    let img = RasterImage::from_premul(2, 1, vec![0; 8]).unwrap();
    assert_eq!(img.width(), 2);
    assert_eq!(img.height(), 1);
}

#[test]
fn straight_premul_round_trip_is_close() {
    let img = RasterImage::from_straight(1, 1, vec![200, 100, 50, 128]).unwrap();
    assert_eq!(
        img.premul_bytes(),
        &[
            ((200u16 * 128 + 127) / 255) as u8,
            ((100u16 * 128 + 127) / 255) as u8,
            ((50u16 * 128 + 127) / 255) as u8,
            128
        ]
    );
    let straight = img.to_straight();
    for (a, b) in straight.iter().zip([200u8, 100, 50, 128]) {
        assert!((i16::from(*a) - i16::from(b)).abs() <= 1);
    }
}
