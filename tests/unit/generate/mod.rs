use super::*;
use crate::export::codec::encode_png;
use crate::foundation::color::Color;
use crate::foundation::core::{Canvas, Point, RasterImage};
use crate::foundation::error::TypestampError;
use crate::scene::layer::TextLayer;

struct Scripted(Option<Result<ImagePayload, GenerationError>>);

impl ImageGenerator for Scripted {
    fn generate(&mut self, _req: &GenerateRequest) -> Result<ImagePayload, GenerationError> {
        self.0
            .take()
            .unwrap_or(Err(GenerationError::NoImageReturned("exhausted".into())))
    }

    fn edit(&mut self, _req: &EditRequest) -> Result<ImagePayload, GenerationError> {
        Err(GenerationError::SafetyBlocked("edit".into()))
    }
}

fn design_with_path() -> DesignState {
    let bg = Background::Solid {
        color: Color::WHITE,
        canvas: Canvas::new(8, 8).unwrap(),
    };
    let (d, _) = DesignState::new(bg).with_layer_added(TextLayer {
        path_points: vec![Point::new(0.0, 0.0), Point::new(8.0, 8.0)],
        ..TextLayer::new("x")
    });
    d
}

fn request() -> GenerateRequest {
    GenerateRequest {
        prompt: "sunset".into(),
        aspect_ratio: "1:1".into(),
        orientation: Orientation::Square,
        config: GenerationConfig::default(),
    }
}

#[test]
fn success_swaps_background_and_clears_paths() {
    let png = encode_png(&RasterImage::from_straight(2, 3, vec![9; 24]).unwrap()).unwrap();
    let mut svc = Scripted(Some(Ok(ImagePayload::Bytes(png))));
    let design = design_with_path();
    let next = apply_generated_image(&design, svc.generate(&request())).unwrap();
    assert_eq!(next.canvas(), Canvas::new(2, 3).unwrap());
    assert!(next.layers()[0].path_points.is_empty());
}

#[test]
fn failures_leave_the_design_untouched() {
    let design = design_with_path();
    let mut svc = Scripted(Some(Err(GenerationError::ServiceUnavailable("503".into()))));
    let err = apply_generated_image(&design, svc.generate(&request())).unwrap_err();
    assert!(matches!(err, TypestampError::Generation(GenerationError::ServiceUnavailable(_))));
    assert!(err.is_transient());

    let edit = EditRequest {
        image: ImagePayload::Bytes(Vec::new()),
        prompt: "more clouds".into(),
        config: GenerationConfig::default(),
    };
    let err = apply_generated_image(&design, svc.edit(&edit)).unwrap_err();
    assert!(!err.is_transient());

    let err =
        apply_generated_image(&design, Ok(ImagePayload::Bytes(b"junk".to_vec()))).unwrap_err();
    assert!(matches!(err, TypestampError::InvalidInput(_)));
    assert_eq!(design.layers()[0].path_points.len(), 2);
}

#[test]
fn retry_classification() {
    assert!(GenerationError::QuotaExceeded(String::new()).is_retryable());
    assert!(GenerationError::NetworkError(String::new()).is_retryable());
    assert!(!GenerationError::AuthError(String::new()).is_retryable());
    assert!(!GenerationError::NoImageReturned(String::new()).is_retryable());
}
