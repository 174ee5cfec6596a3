//! Route enumeration from front matter only.

use vitrine_catalog::{ProductMeta, StaticPath, static_paths};

use crate::common::{Fixture, product};

#[tokio::test]
async fn test_static_paths_match_repository() {
    let fx = Fixture::new();
    fx.write_product("deep-ubuntu-ai.mdx", "deep-ubuntu-ai", 2);
    fx.write_product("cowcow.mdx", "cowcow", 1);

    let paths = static_paths::<ProductMeta>("products", fx.root(), &Fixture::category())
        .await
        .unwrap();
    let repo = fx.load().await.unwrap();

    assert_eq!(paths, repo.static_paths("products"));
    let routes: Vec<String> = paths.iter().map(StaticPath::route).collect();
    assert_eq!(routes, vec!["/products/cowcow", "/products/deep-ubuntu-ai"]);
}

#[tokio::test]
async fn test_static_paths_validate_front_matter() {
    let fx = Fixture::new();
    fx.write_raw("bad.mdx", &product("Not Safe", 1, "beta", ""));

    let err = static_paths::<ProductMeta>("products", fx.root(), &Fixture::category())
        .await
        .unwrap_err();

    assert!(err.is_content_error());
    assert!(err.to_string().contains("bad.mdx"));
}
