//! Loads that must fail, and what the error says.

use vitrine_core::Error;

use crate::common::{Fixture, product};

#[tokio::test]
async fn test_unterminated_front_matter_names_file() {
    let fx = Fixture::new();
    fx.write_product("a.mdx", "a", 1);
    let broken = fx.write_raw("broken.mdx", "---\ntitle: Broken\nslug: broken\n\nBody\n");

    let err = fx.load().await.unwrap_err();

    assert!(matches!(err, Error::ContentParse { .. }), "{err}");
    assert_eq!(err.path(), Some(broken.as_path()));
    assert!(err.to_string().contains("broken.mdx"));
}

#[tokio::test]
async fn test_duplicate_slug_names_both_files() {
    let fx = Fixture::new();
    fx.write_product("first.mdx", "cowcow", 1);
    fx.write_product("second.mdx", "cowcow", 2);

    let err = fx.load().await.unwrap_err();
    let msg = err.to_string();

    assert!(matches!(err, Error::ContentValidation { .. }));
    assert!(msg.contains("first.mdx"), "{msg}");
    assert!(msg.contains("second.mdx"), "{msg}");
}

#[tokio::test]
async fn test_unknown_status_fails() {
    let fx = Fixture::new();
    fx.write_raw("a.mdx", &product("a", 1, "gamma", ""));

    let err = fx.load().await.unwrap_err();

    assert!(matches!(err, Error::ContentValidation { .. }), "{err}");
    assert!(err.is_content_error());
}

#[tokio::test]
async fn test_missing_field_fails() {
    let fx = Fixture::new();
    fx.write_raw(
        "a.mdx",
        "---\ntitle: A\nslug: a\nstatus: beta\nstack: []\norder: 1\nmodelScene: false\n---\n",
    );

    let err = fx.load().await.unwrap_err();

    assert!(matches!(err, Error::ContentValidation { .. }));
    assert!(err.to_string().contains("tagline"), "{err}");
}

#[tokio::test]
async fn test_invalid_yaml_reports_line() {
    let fx = Fixture::new();
    fx.write_raw("a.mdx", "---\ntitle: A\nslug: [unclosed\n---\n");

    let err = fx.load().await.unwrap_err();

    assert!(matches!(err, Error::ContentParse { .. }), "{err}");
    // The flow sequence opens on line 3 and is never closed.
    assert_eq!(err.line(), Some(3), "{err}");
    assert!(err.path().is_some_and(|p| p.ends_with("a.mdx")));
}

#[tokio::test]
async fn test_unterminated_display_math_fails() {
    let fx = Fixture::new();
    fx.write_raw("a.mdx", &product("a", 1, "beta", "\n$$\nx^2\n\nMore.\n"));

    let err = fx.load().await.unwrap_err();

    assert!(matches!(err, Error::ContentParse { .. }));
    assert_eq!(err.line(), Some(11));
}

#[tokio::test]
async fn test_non_directory_category_is_io_error() {
    let fx = Fixture::new();
    std::fs::write(fx.root().join("products"), "oops").unwrap();

    let err = fx.load().await.unwrap_err();

    assert!(matches!(err, Error::Io { .. }));
    assert!(!err.is_content_error());
}
