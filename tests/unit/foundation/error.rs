use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        TypestampError::invalid_input("x")
            .to_string()
            .contains("invalid input:")
    );
    assert!(
        TypestampError::resource_unready("x")
            .to_string()
            .contains("resource not ready:")
    );
    assert!(TypestampError::render("x").to_string().contains("render error:"));
    assert!(TypestampError::export("x").to_string().contains("export error:"));
    assert!(
        TypestampError::cancelled("x")
            .to_string()
            .contains("operation cancelled:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = TypestampError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn transient_classification() {
    assert!(TypestampError::resource_unready("font").is_transient());
    assert!(TypestampError::cancelled("superseded").is_transient());
    assert!(!TypestampError::invalid_input("bad").is_transient());
    assert!(
        TypestampError::from(GenerationError::ServiceUnavailable("busy".into())).is_transient()
    );
    assert!(!TypestampError::from(GenerationError::SafetyBlocked("nope".into())).is_transient());
}
