//! End-to-end tests against the SQLite wiki store.

use dple_core::config::Settings;
use dple_core::errors::{EngineError, GuardError};
use dple_core::params::ParameterSet;
use dple_core::traits::Host;
use dple_core::types::SortMethod;
use dple_engine::features::OrderFeature;
use dple_engine::{DynamicPageList, Feature, ResultView};
use dple_storage::queries::fixtures::*;
use dple_storage::SqliteWiki;

/// Five pages in Category:Foo added in a shuffled order, plus links,
/// templates, images, redirects, subpages and revisions around them.
fn wiki() -> SqliteWiki {
    let wiki = SqliteWiki::open_in_memory().unwrap();
    wiki.db()
        .with_writer(|conn| {
            insert_page(conn, &NewPage::new(14, "Foo"))?;
            insert_page(conn, &NewPage::new(14, "Bar"))?;

            let stamps = [
                "20240105000000",
                "20240103000000",
                "20240101000000",
                "20240104000000",
                "20240102000000",
            ];
            let mut ids = Vec::new();
            for (i, stamp) in stamps.iter().enumerate() {
                let title = format!("Page_{}", i + 1);
                let id = insert_page(
                    conn,
                    &NewPage {
                        len: 100 * (i as i64 + 1),
                        ..NewPage::new(0, &title)
                    },
                )?;
                let prefix = if i == 1 { "Two|second place" } else { "" };
                insert_category_link(
                    conn,
                    &NewCategoryLink {
                        from: id,
                        to: "Foo",
                        sortkey_prefix: prefix,
                        timestamp: stamp,
                        ..Default::default()
                    },
                )?;
                ids.push(id);
            }

            insert_category_link(
                conn,
                &NewCategoryLink {
                    from: ids[0],
                    to: "Bar",
                    timestamp: "20240201000000",
                    ..Default::default()
                },
            )?;

            let loose = insert_page(conn, &NewPage::new(0, "Loose"))?;
            insert_page(conn, &NewPage::new(0, "Loose/Sub"))?;
            let old = insert_page(conn, &NewPage::new(0, "Old_name"))?;
            insert_redirect(conn, old, 0, "Page_1")?;
            insert_page(conn, &NewPage::new(10, "Box"))?;
            insert_page(conn, &NewPage::new(6, "Logo.png"))?;

            insert_template_link(conn, ids[0], 10, "Box")?;
            insert_template_link(conn, ids[1], 10, "Box")?;
            insert_page_link(conn, ids[3], 0, "Page_5")?;
            insert_page_link(conn, loose, 0, "Page_5")?;
            insert_image_link(conn, ids[2], "Logo.png")?;

            let alice = insert_user(conn, "Alice")?;
            let bob = insert_user(conn, "Bob")?;
            insert_revision(conn, ids[0], alice, "20240101000000")?;
            insert_revision(conn, ids[1], alice, "20240101000000")?;
            insert_revision(conn, ids[2], bob, "20240101000000")?;
            insert_revision(conn, ids[2], alice, "20240301000000")?;
            insert_revision(conn, ids[3], bob, "20240101000000")?;
            Ok(())
        })
        .unwrap();
    wiki
}

fn run<'h>(wiki: &'h SqliteWiki, params: &ParameterSet, settings: &Settings) -> Result<DynamicPageList<'h>, EngineError> {
    DynamicPageList::new(params, settings, Host::from_backend(wiki))
}

fn pagenames(dpl: &DynamicPageList<'_>) -> Vec<String> {
    dpl.pagenames().unwrap().to_vec()
}

/// The reference scenario: three rich records in ascending category order.
#[test]
fn test_category_count_ascending() {
    let wiki = wiki();
    let settings = Settings::default();
    let params = ParameterSet::new()
        .with("category", "Foo")
        .with("count", "3")
        .with("order", "ascending");
    let dpl = run(&wiki, &params, &settings).unwrap();

    assert_eq!(dpl.count(), 3);
    let titles = dpl.titles().unwrap();
    assert_eq!(titles.len(), 3);
    let stamps: Vec<_> = titles
        .iter()
        .map(|r| r.custom.categoryadd.clone().expect("categoryadd set"))
        .collect();
    assert_eq!(stamps, vec!["20240101000000", "20240102000000", "20240103000000"]);
    assert_eq!(pagenames(&dpl), vec!["Page 3", "Page 5", "Page 2"]);
    assert_eq!(titles[2].custom.length, 200);
    assert!(titles.iter().all(|r| r.title.exists()));
}

/// An exclusion that resolves to nothing leaves the query without conditions.
#[test]
fn test_no_selection_criteria() {
    let wiki = wiki();
    let settings = Settings::default();
    let open = ParameterSet::new()
        .with("redirects", "include")
        .with("subpages", "include");

    let err = run(&wiki, &open.clone().with("notcategory", "Bar[]"), &settings).unwrap_err();
    assert_eq!(err, EngineError::Guard(GuardError::NoSelectionCriteria));

    let dpl = run(&wiki, &open.with("notcategory", "Bar"), &settings).unwrap();
    let names = pagenames(&dpl);
    assert!(!names.contains(&"Page 1".to_string()));
    assert!(names.contains(&"Page 2".to_string()));
    assert!(names.contains(&"Old name".to_string()));
}

#[test]
fn test_cost_boundary() {
    let wiki = wiki();
    let params = ParameterSet::new().with("category", vec!["Foo", "Bar"]).with("notcategory", "Baz");

    let dpl = run(&wiki, &params, &Settings::default().with_max_cost(3)).unwrap();
    assert_eq!(pagenames(&dpl), vec!["Page 1"]);

    let err = run(&wiki, &params, &Settings::default().with_max_cost(2)).unwrap_err();
    assert_eq!(err, EngineError::Guard(GuardError::CostExceeded { total: 3, max: 2 }));
}

/// categoryadd without a category sorts exactly like created.
#[test]
fn test_sort_fallback_matches_created() {
    let wiki = wiki();
    let settings = Settings::default();
    let base = ParameterSet::new().with("namespace", 0_i64);

    let fallback = run(&wiki, &base.clone().with("ordermethod", "categoryadd"), &settings).unwrap();
    let created = run(&wiki, &base.clone().with("ordermethod", "created"), &settings).unwrap();
    let popularity = run(&wiki, &base.with("ordermethod", "popularity"), &settings).unwrap();

    assert_eq!(pagenames(&fallback), pagenames(&created));
    assert_eq!(pagenames(&popularity), pagenames(&created));
    assert_eq!(pagenames(&created)[0], "Loose");

    let order = match fallback.features().get(dple_core::types::FeatureKind::Order) {
        Some(Feature::Order(order)) => order,
        other => panic!("order feature missing: {other:?}"),
    };
    assert_eq!(OrderFeature::method(order), Some(SortMethod::Created));
}

#[test]
fn test_title_and_sortkey_orders() {
    let wiki = wiki();
    let settings = Settings::default();

    let by_title = ParameterSet::new()
        .with("category", "Foo")
        .with("ordermethod", "title")
        .with("order", "ascending");
    let dpl = run(&wiki, &by_title, &settings).unwrap();
    assert_eq!(pagenames(&dpl), vec!["Page 1", "Page 2", "Page 3", "Page 4", "Page 5"]);

    let by_sortkey = ParameterSet::new()
        .with("category", "Foo")
        .with("ordermethod", "sortkey")
        .with("order", "ascending");
    let dpl = run(&wiki, &by_sortkey, &settings).unwrap();
    assert_eq!(pagenames(&dpl).last().map(String::as_str), Some("Page 2"));
}

/// Converters are memoized; arrays reuse the titles scan.
#[test]
fn test_converters_memoized() {
    let wiki = wiki();
    let settings = Settings::default();
    let params = ParameterSet::new().with("category", "Foo");
    let dpl = run(&wiki, &params, &settings).unwrap();
    let scans = || dpl.query().result().unwrap().scan_count();

    let first = dpl.result("fullpagenames").unwrap();
    let second = dpl.result("toFullpagenames").unwrap();
    assert_eq!(first, second);
    assert_eq!(scans(), 1);

    dpl.result("titles").unwrap();
    dpl.result("arrays").unwrap();
    dpl.result("toArrays").unwrap();
    assert_eq!(scans(), 2);

    match dpl.result("fullpagenames").unwrap() {
        ResultView::Fullpagenames(names) => assert!(names.iter().all(|n| n.starts_with(':'))),
        other => panic!("unexpected view {other:?}"),
    }
}

#[test]
fn test_extra_annotation() {
    let wiki = wiki();
    let settings = Settings::default();
    let params = ParameterSet::new().with("category", "Foo").with("titlematch", "2");
    let dpl = run(&wiki, &params, &settings).unwrap();

    let titles = dpl.titles().unwrap();
    assert_eq!(titles.len(), 1);
    assert_eq!(titles[0].custom.sortkey.as_deref(), Some("Two|second place"));
    assert_eq!(titles[0].custom.extra.as_deref(), Some("second place"));

    let arrays = dpl.arrays().unwrap();
    assert_eq!(arrays[0]["extra"], "second place");
    assert_eq!(arrays[0]["prefixedText"], "Page 2");
}

#[test]
fn test_linked_entities() {
    let wiki = wiki();
    let settings = Settings::default();
    let names = |params: ParameterSet| {
        let dpl = run(&wiki, &params.with("order", "ascending"), &settings).unwrap();
        pagenames(&dpl)
    };

    assert_eq!(names(ParameterSet::new().with("uses", "Box")), vec!["Page 1", "Page 2"]);
    assert_eq!(
        names(ParameterSet::new().with("category", "Foo").with("notuses", "Box")),
        vec!["Page 3", "Page 5", "Page 4"]
    );
    assert_eq!(names(ParameterSet::new().with("linksto", "Page 5")), vec!["Page 4", "Loose"]);
    assert_eq!(names(ParameterSet::new().with("imageused", "Logo.png")), vec!["Page 3"]);
    assert_eq!(names(ParameterSet::new().with("linksfrom", "Page 4")), vec!["Page 5"]);
    assert_eq!(names(ParameterSet::new().with("usedby", "Page 1")), vec!["Box"]);
    assert_eq!(names(ParameterSet::new().with("contains", "Page 1")), vec!["Foo", "Bar"]);
    assert_eq!(
        names(ParameterSet::new().with("redirectsto", "Page 1").with("redirects", "include")),
        vec!["Old name"]
    );
}

#[test]
fn test_user_relations() {
    let wiki = wiki();
    // modifiedby alone is priced above the default ceiling
    let settings = Settings::default().with_max_cost(20);
    let names = |params: ParameterSet| {
        let dpl = run(&wiki, &params.with("ordermethod", "created").with("order", "ascending"), &settings).unwrap();
        pagenames(&dpl)
    };

    assert_eq!(names(ParameterSet::new().with("createdby", "Alice")), vec!["Page 1", "Page 2"]);
    assert_eq!(names(ParameterSet::new().with("lastmodifiedby", "alice")), vec!["Page 1", "Page 2", "Page 3"]);
    assert_eq!(names(ParameterSet::new().with("notcreatedby", "Alice")), vec!["Page 3", "Page 4"]);
    assert_eq!(names(ParameterSet::new().with("modifiedby", "Bob")), vec!["Page 3", "Page 4"]);
    assert_eq!(
        names(ParameterSet::new().with("namespace", 0_i64).with("notmodifiedby", "Bob")),
        vec!["Page 1", "Page 2", "Page 5", "Loose"]
    );

    let err = run(&wiki, &ParameterSet::new().with("modifiedby", "Bob"), &Settings::default()).unwrap_err();
    assert_eq!(err, EngineError::Guard(GuardError::CostExceeded { total: 10, max: 6 }));
}

/// Resolved redirects carry their target; the list itself holds only redirects.
#[test]
fn test_resolve_redirects() {
    let wiki = wiki();
    let settings = Settings::default();
    let params = ParameterSet::new().with("redirects", "resolve").with("namespace", 0_i64);
    let dpl = run(&wiki, &params, &settings).unwrap();

    let titles = dpl.titles().unwrap();
    assert_eq!(titles.len(), 1);
    let target = titles[0].custom.target.clone().flatten().expect("target");
    assert_eq!(target.text, "Page 1");
    assert!(target.id > 0);
}

#[test]
fn test_subpages() {
    let wiki = wiki();
    let settings = Settings::default();

    let only = ParameterSet::new().with("namespace", 0_i64).with("subpages", "only");
    assert_eq!(pagenames(&run(&wiki, &only, &settings).unwrap()), vec!["Loose/Sub"]);

    let default = ParameterSet::new().with("titlematch", "Loose");
    assert_eq!(pagenames(&run(&wiki, &default, &settings).unwrap()), vec!["Loose"]);
}

#[test]
fn test_invalid_namespace() {
    let wiki = wiki();
    let params = ParameterSet::new().with("namespace", 4242_i64);
    let err = run(&wiki, &params, &Settings::default()).unwrap_err();
    assert!(matches!(err, EngineError::Param(_)));
}

/// The same request against a file-backed store reads through the reader pool.
#[test]
fn test_on_disk_store() {
    let dir = tempfile::tempdir().unwrap();
    let db = dple_storage::DatabaseManager::open(&dir.path().join("wiki.db")).unwrap();
    db.with_writer(|conn| {
        let id = insert_page(conn, &NewPage::new(0, "Alpha"))?;
        insert_category_link(
            conn,
            &NewCategoryLink {
                from: id,
                to: "Foo",
                timestamp: "20240101000000",
                ..Default::default()
            },
        )?;
        insert_page(conn, &NewPage::new(0, "Beta"))?;
        Ok(())
    })
    .unwrap();
    let wiki = SqliteWiki::new(db, dple_core::types::NamespaceRegistry::standard());

    let params = ParameterSet::new().with("category", "Foo");
    let dpl = run(&wiki, &params, &Settings::default()).unwrap();
    assert_eq!(pagenames(&dpl), vec!["Alpha"]);
    assert_eq!(dpl.arrays().unwrap()[0]["categoryadd"], "20240101000000");
}

/// Configured content namespaces reach the titles the engine builds.
#[test]
fn test_configured_content_namespaces() {
    let config = dple_core::config::DpleConfig::from_toml("[site]\ncontent_namespaces = [0, 2]").unwrap();
    let settings = Settings::from_config(&config).unwrap();
    let wiki = SqliteWiki::open_in_memory_with(&settings).unwrap();
    wiki.db()
        .with_writer(|conn| {
            insert_page(conn, &NewPage::new(2, "Alice"))?;
            insert_page(conn, &NewPage::new(4, "About"))?;
            Ok(())
        })
        .unwrap();

    let params = ParameterSet::new().with("namespace", vec![2_i64, 4]).with("order", "ascending");
    let dpl = run(&wiki, &params, &settings).unwrap();
    let arrays = dpl.arrays().unwrap();
    assert_eq!(arrays.len(), 2);
    assert_eq!(arrays[0]["prefixedText"], "User:Alice");
    assert_eq!(arrays[0]["isContentPage"], true);
    assert_eq!(arrays[1]["prefixedText"], "Project:About");
    assert_eq!(arrays[1]["isContentPage"], false);
}

/// The guard sees the complete query wherever it sits in the feature list.
#[test]
fn test_check_listed_first_runs_last() {
    use dple_core::types::FeatureKind;

    let wiki = wiki();
    let settings = Settings::default().with_features(vec![
        FeatureKind::Check,
        FeatureKind::Namespace,
        FeatureKind::Category,
        FeatureKind::Order,
        FeatureKind::Results,
    ]);
    assert_eq!(settings.features().last(), Some(&FeatureKind::Check));

    let params = ParameterSet::new().with("category", "Foo");
    let dpl = run(&wiki, &params, &settings).unwrap();
    assert_eq!(dpl.count(), 5);

    let err = run(&wiki, &ParameterSet::new(), &settings).unwrap_err();
    assert_eq!(err, EngineError::Guard(GuardError::NoSelectionCriteria));
}
