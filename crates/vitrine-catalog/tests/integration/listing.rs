//! Listing order and lookup through a loaded repository.

use proptest::prelude::*;
use vitrine_catalog::{PageMetadata, ProductMeta, Status, enumerate_identifiers};
use vitrine_content::{Node, RenderOptions};

use crate::common::{Fixture, product};

#[tokio::test]
async fn test_listing_sorted_by_order() {
    let fx = Fixture::new();
    fx.write_product("a.mdx", "a", 2);
    fx.write_product("b.mdx", "b", 1);

    let repo = fx.load().await.unwrap();

    assert_eq!(repo.identifiers("products"), vec!["b", "a"]);
}

#[tokio::test]
async fn test_ties_keep_discovery_order() {
    let fx = Fixture::new();
    fx.write_product("01-zeta.mdx", "zeta", 5);
    fx.write_product("02-alpha.mdx", "alpha", 5);
    fx.write_product("03-mid.mdx", "mid", 0);
    fx.write_product("04-beta.mdx", "beta", 5);

    let repo = fx.load().await.unwrap();

    assert_eq!(
        repo.identifiers("products"),
        vec!["mid", "zeta", "alpha", "beta"]
    );
}

#[tokio::test]
async fn test_missing_directory_lists_nothing() {
    let fx = Fixture::new();

    let repo = fx.load().await.unwrap();
    let ids = enumerate_identifiers::<ProductMeta>("products", fx.root(), &Fixture::category())
        .await
        .unwrap();

    assert!(repo.list_all("products").is_empty());
    assert!(ids.is_empty());
}

#[tokio::test]
async fn test_get_nonexistent_is_none() {
    let fx = Fixture::new();
    fx.write_product("cowcow.mdx", "cowcow", 1);

    let repo = fx.load().await.unwrap();

    assert!(repo.get("products", "nonexistent").is_none());
    assert_eq!(
        PageMetadata::not_found::<ProductMeta>().title,
        "Product Not Found"
    );
}

#[tokio::test]
async fn test_get_iff_enumerated() {
    let fx = Fixture::new();
    for (i, slug) in ["deep-ubuntu-ai", "cowcow", "ubuntu-voice"].iter().enumerate() {
        fx.write_product(&format!("{slug}.mdx"), slug, i as i64);
    }

    let repo = fx.load().await.unwrap();
    let ids = enumerate_identifiers::<ProductMeta>("products", fx.root(), &Fixture::category())
        .await
        .unwrap();

    assert_eq!(ids, repo.identifiers("products"));
    for id in &ids {
        assert!(repo.get("products", id).is_some());
    }
    for id in ["", "missing", "deep-ubuntu"] {
        assert!(!ids.iter().any(|i| i == id));
        assert!(repo.get("products", id).is_none());
    }
}

#[tokio::test]
async fn test_document_fields() {
    let fx = Fixture::new();
    let body = "\n# Overview\n\nEnergy is $E = mc^2$.\n\n$$\n\\int_0^1 x\\,dx\n$$\n\n## Stack\n";
    let path = fx.write_raw("deep.mdx", &product("deep", 1, "stable", body));

    let repo = fx.load().await.unwrap();
    let doc = repo.get("products", "deep").unwrap();

    assert_eq!(doc.source, path);
    assert_eq!(doc.metadata.status, Status::Stable);
    assert_eq!(doc.metadata.status.label(), "STABLE");
    assert_eq!(doc.metadata.stack, vec!["Rust", "TypeScript"]);
    assert_eq!(doc.raw_body, body);
    assert_eq!(doc.summary(100).unwrap(), "Energy is E = mc^2.");
    assert_eq!(doc.outline().len(), 2);

    let math: Vec<bool> = doc
        .rendered
        .tree
        .descendants()
        .filter_map(|n| match n {
            Node::Math { display, .. } => Some(*display),
            _ => None,
        })
        .collect();
    assert_eq!(math, vec![false, true]);
}

#[tokio::test]
async fn test_component_tags_produce_diagnostics() {
    let fx = Fixture::new();
    fx.write_raw(
        "viz.mdx",
        &product("viz", 1, "alpha", "\n<ModelScene />\n\nText.\n"),
    );

    let repo = fx.load().await.unwrap();
    let doc = repo.get("products", "viz").unwrap();

    assert_eq!(doc.rendered.diagnostics.len(), 1);
    assert_eq!(doc.rendered.diagnostics[0].line, 11);
}

#[tokio::test]
async fn test_render_is_deterministic_across_loads() {
    let fx = Fixture::new();
    fx.write_raw(
        "a.mdx",
        &product("a", 1, "beta", "\n| a | b |\n|---|---|\n| 1 | $x$ |\n\n- [x] done\n"),
    );

    let first = fx.load().await.unwrap();
    let second = fx.load().await.unwrap();

    assert_eq!(
        first.get("products", "a").unwrap().rendered,
        second.get("products", "a").unwrap().rendered
    );
}

#[tokio::test]
async fn test_multiple_categories() {
    use vitrine_catalog::{CatalogConfig, CategoryConfig, ContentRepository};

    let fx = Fixture::new();
    fx.write_product("a.mdx", "a", 1);
    let labs = fx.root().join("labs");
    std::fs::create_dir(&labs).unwrap();
    std::fs::write(labs.join("x.md"), product("x", 1, "alpha", "")).unwrap();

    let config = CatalogConfig::new(fx.root())
        .with_category("products", CategoryConfig::new("products"))
        .with_category("labs", CategoryConfig::new("labs").with_extensions(["md"]));
    let repo: ContentRepository<ProductMeta> =
        ContentRepository::load(&config, &RenderOptions::default())
            .await
            .unwrap();

    assert_eq!(repo.categories().collect::<Vec<_>>(), vec!["labs", "products"]);
    assert_eq!(repo.len(), 2);
    assert!(repo.get("labs", "a").is_none());
    assert!(repo.get("labs", "x").is_some());
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn prop_listing_is_stable_sorted(orders in proptest::collection::vec(-3i64..3, 1..8)) {
        let rt = tokio::runtime::Builder::new_current_thread().build().unwrap();
        let fx = Fixture::new();
        for (i, order) in orders.iter().enumerate() {
            fx.write_product(&format!("{i:02}.mdx"), &format!("p{i}"), *order);
        }

        let repo = rt.block_on(fx.load()).unwrap();
        let listed: Vec<(i64, usize)> = repo
            .list_all("products")
            .iter()
            .map(|d| (d.order(), d.discovery_index))
            .collect();

        let mut expected = listed.clone();
        expected.sort();
        prop_assert_eq!(listed, expected);
    }
}
