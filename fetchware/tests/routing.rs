mod common;

use common::matched;
use fetchware::{RegistrationError, Router};

#[test]
fn test_named_params_by_name() {
    let mut router = Router::new();
    router.get("/:band/:album", "mw").unwrap();

    let matches = router.match_route("get", "/judas-priest/painkiller");
    let params = &matches[0].params;
    assert_eq!(params.len(), 2);
    assert_eq!(params.get("band"), Some("judas-priest"));
    assert_eq!(params.get("album"), Some("painkiller"));
}

#[test]
fn test_params_follow_each_route() {
    let mut router = Router::new();
    router.get("/:band/:album", "mw").unwrap();
    router.get("/:collection/:id", "mw2").unwrap();

    let matches = router.match_route("get", "/judas-priest/painkiller");
    assert_eq!(matches.len(), 2);
    assert_eq!(matches[0].params.get("band"), Some("judas-priest"));
    assert_eq!(matches[1].params.get("collection"), Some("judas-priest"));
    assert_eq!(matches[1].params.get("id"), Some("painkiller"));
}

#[test]
fn test_numeric_param_names() {
    let mut router = Router::new();
    router.get("/:1/:0", "mw").unwrap();

    let params = &router.match_route("get", "/judas-priest/painkiller")[0].params;
    assert_eq!(params.get("1"), Some("judas-priest"));
    assert_eq!(params.get("0"), Some("painkiller"));
}

#[test]
fn test_anonymous_placeholders_are_not_params() {
    let mut router = Router::new();
    router.get("/*/:band/:album", "mw").unwrap();
    router.get("/***/:band/:album", "mw2").unwrap();

    for matched in router.match_route("get", "/foo/judas-priest/painkiller") {
        assert_eq!(matched.params.len(), 2);
        assert_eq!(matched.params.get("band"), Some("judas-priest"));
        assert_eq!(matched.params.get("album"), Some("painkiller"));
    }
}

#[test]
fn test_exact_match_without_placeholders() {
    let mut router = Router::new();
    router.get("/foo/", "mw").unwrap();
    router.get("/foo/bar", "mw2").unwrap();

    assert!(matched(&router, "get", "/foo").is_empty());
    assert_eq!(matched(&router, "get", "/foo/"), ["mw"]);
    assert_eq!(matched(&router, "get", "/foo/bar"), ["mw2"]);
    assert!(matched(&router, "get", "/foo/bar/").is_empty());
}

#[test]
fn test_anonymous_placeholders_in_order() {
    let mut router = Router::new();
    router.get("*", "mw").unwrap();
    router.get("/foo/bar", "mw2").unwrap();
    router.get("*", "mw3").unwrap();

    assert_eq!(matched(&router, "get", "/"), ["mw", "mw3"]);
    assert_eq!(matched(&router, "get", "/foo/bar"), ["mw", "mw2", "mw3"]);
}

#[test]
fn test_trailing_placeholders() {
    let mut router = Router::new();
    router.get("/foo/*", "mw").unwrap();
    router.get("/foo/bar/*", "mw2").unwrap();

    assert!(matched(&router, "get", "/").is_empty());
    assert!(matched(&router, "get", "/foo").is_empty());
    assert_eq!(matched(&router, "get", "/foo/"), ["mw"]);
    assert_eq!(matched(&router, "get", "/foo/bar"), ["mw"]);
    assert_eq!(matched(&router, "get", "/foo/bar/baz"), ["mw", "mw2"]);
}

#[test]
fn test_infix_placeholders() {
    let mut router = Router::new();
    router.get("/foo*bar", "mw").unwrap();
    router.get("/foo/*/bar", "mw2").unwrap();

    assert!(matched(&router, "get", "/").is_empty());
    assert!(matched(&router, "get", "/foo").is_empty());
    assert_eq!(matched(&router, "get", "/foo/bar"), ["mw"]);
    assert_eq!(matched(&router, "get", "/foo/doh/bar"), ["mw", "mw2"]);
}

#[test]
fn test_multiple_placeholders() {
    let mut router = Router::new();
    router.get("/pre/*/fix/*", "mw").unwrap();
    router.get("*/suf/*/fix", "mw2").unwrap();
    router.get("*inner*", "mw3").unwrap();

    assert!(matched(&router, "get", "/").is_empty());
    assert_eq!(matched(&router, "get", "/pre/123/fix/"), ["mw"]);
    assert_eq!(matched(&router, "get", "/pre/123/fix/456"), ["mw"]);
    assert!(matched(&router, "get", "/pre/123/").is_empty());

    assert_eq!(matched(&router, "get", "/matched/suf/123/fix"), ["mw2"]);
    assert_eq!(matched(&router, "get", "/any/other/suf/123/456/fix"), ["mw2"]);
    assert_eq!(matched(&router, "get", "/suf/nopre/fix"), ["mw2"]);
    assert!(matched(&router, "get", "/fix").is_empty());

    assert_eq!(matched(&router, "get", "/inner"), ["mw3"]);
    assert_eq!(matched(&router, "get", "/beginners"), ["mw3"]);
    assert_eq!(matched(&router, "get", "/pre/inner/fix/"), ["mw", "mw3"]);
    assert_eq!(matched(&router, "get", "/inner/suf/other/fix"), ["mw2", "mw3"]);
    assert_eq!(matched(&router, "get", "/inner/suf/other/fix/"), ["mw3"]);

    assert_eq!(
        matched(&router, "get", "/pre/123/fix/inner/suf/456/fix"),
        ["mw", "mw2", "mw3"]
    );
}

#[test]
fn test_named_placeholders_need_a_character() {
    let mut router = Router::new();
    router.get("/:foo", "mw").unwrap();

    assert!(matched(&router, "get", "/").is_empty());
    assert_eq!(matched(&router, "get", "/a"), ["mw"]);
}

#[test]
fn test_crowded_patterns_fail_alike() {
    let mut router = Router::new();
    let errors: Vec<_> = ["/foo/:bar:baz", "/foo/*:bar", "/:foo*"]
        .into_iter()
        .map(|pattern| router.get(pattern, "mw").unwrap_err().to_string())
        .collect();

    assert!(errors.iter().all(|e| e.contains("invalid usage of named placeholders")));
    assert!(router.is_empty());
}

#[test]
fn test_unknown_verb_is_asymmetric() {
    let mut router = Router::new();
    router.all("*", "mw").unwrap();

    assert!(matched(&router, "PATCH", "/").is_empty());
    assert_eq!(
        router.add("PATCH", "/", "mw2").unwrap_err(),
        RegistrationError::UnsupportedMethod("PATCH".into())
    );
}

#[test]
fn test_anonymous_crowding_matches_like_single() {
    let mut crowded = Router::new();
    crowded.get("/f**bar", "mw").unwrap();
    let mut single = Router::new();
    single.get("/f*bar", "mw").unwrap();

    for url in ["/fbar", "/foobar", "/f/x/bar", "/foo", "/bar", "/fbar/"] {
        assert_eq!(
            matched(&crowded, "get", url),
            matched(&single, "get", url),
            "url {url}"
        );
    }
    assert_eq!(matched(&crowded, "get", "/foo/bar"), ["mw"]);
}
