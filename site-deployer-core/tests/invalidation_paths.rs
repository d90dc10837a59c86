use site_deployer_core::invalidation::{derive_invalidation_paths, escape_key, paths_for_key};
use site_deployer_core::ledger::UploadLedger;

fn derive(keys: &[&str]) -> Vec<String> {
    let ledger: UploadLedger = keys.iter().copied().collect();
    derive_invalidation_paths(&ledger).into_vec()
}

#[test]
fn root_index_document_invalidates_slash_but_not_blank() {
    assert_eq!(derive(&["index.html"]), vec!["/", "/index.html"]);
}

#[test]
fn nested_index_document_invalidates_all_three_aliases() {
    assert_eq!(
        derive(&["blog/index.html"]),
        vec!["/blog", "/blog/", "/blog/index.html"]
    );
}

#[test]
fn plain_asset_is_not_aliased() {
    assert_eq!(derive(&["css/site.css"]), vec!["/css/site.css"]);
}

#[test]
fn space_is_percent_encoded_not_plus() {
    assert_eq!(escape_key("a b.txt"), "a%20b.txt");
    assert_eq!(derive(&["a b.txt"]), vec!["/a%20b.txt"]);
}

#[test]
fn only_slash_dot_and_dash_pass_through_unescaped() {
    assert_eq!(escape_key("docs/v1.2-beta/x"), "docs/v1.2-beta/x");
    assert_eq!(escape_key("a_b~c+d"), "a%5Fb%7Ec%2Bd");
    assert_eq!(escape_key("café.html"), "caf%C3%A9.html");
}

#[test]
fn index_match_is_case_sensitive_and_needs_a_separator() {
    assert_eq!(derive(&["blog/Index.html"]), vec!["/blog/Index.html"]);
    assert_eq!(derive(&["myindex.html"]), vec!["/myindex.html"]);
}

#[test]
fn aliases_of_escaped_directories_stay_escaped() {
    assert_eq!(
        paths_for_key("my docs/index.html"),
        vec!["/my%20docs/index.html", "/my%20docs/", "/my%20docs"]
    );
}

#[test]
fn key_with_leading_slash_is_not_doubled() {
    assert_eq!(paths_for_key("/about.html"), vec!["/about.html"]);
}

#[test]
fn overlapping_keys_are_deduplicated_and_sorted() {
    let paths = derive(&["index.html", "blog/index.html", "blog/post.html", "a.css"]);
    assert_eq!(
        paths,
        vec![
            "/",
            "/a.css",
            "/blog",
            "/blog/",
            "/blog/index.html",
            "/blog/post.html",
            "/index.html",
        ]
    );
}

#[test]
fn every_escaped_key_is_in_the_derived_set() {
    let ledger: UploadLedger = ["x/index.html", "y z/q.js", "index.html"].into_iter().collect();
    let set = derive_invalidation_paths(&ledger);
    for key in ledger.iter() {
        assert!(set.contains(&format!("/{}", escape_key(key))), "missing {key}");
    }
    assert!(set.iter().all(|p| p.starts_with('/')));
}

#[test]
fn derivation_is_idempotent() {
    let ledger: UploadLedger = ["index.html", "docs/index.html", "img/a b.png"]
        .into_iter()
        .collect();
    assert_eq!(
        derive_invalidation_paths(&ledger),
        derive_invalidation_paths(&ledger)
    );
}

#[test]
fn empty_ledger_derives_nothing() {
    assert!(derive_invalidation_paths(&UploadLedger::new()).is_empty());
}
