use super::*;

fn resolver_with(prefixes: &[(&str, &str)]) -> NamespaceResolver {
    let resolver = NamespaceResolver::new();
    for (prefix, root) in prefixes {
        resolver.register(prefix, *root).unwrap();
    }
    resolver
}

#[test]
fn test_resolver_creation() {
    let resolver = NamespaceResolver::new();
    assert!(resolver.is_empty());
    assert_eq!(resolver.len(), 0);
}

#[test]
fn test_longest_prefix_wins() {
    let resolver = resolver_with(&[("A.", "/a"), ("A.b.", "/ab"), ("A.b.c", "/abc")]);

    let entry = resolver.resolve("A.b.c.X").unwrap();
    assert_eq!(entry.prefix, "A.b.c");
    assert_eq!(entry.root_path, PathBuf::from("/abc"));
}

#[test]
fn test_registration_order_does_not_matter() {
    let resolver = resolver_with(&[("A.b.c", "/abc"), ("A", "/a"), ("A.b", "/ab")]);

    let prefixes: Vec<_> = resolver.entries().into_iter().map(|e| e.prefix).collect();
    assert_eq!(prefixes, ["A.b.c", "A.b", "A"]);
    assert_eq!(resolver.resolve("A.b.Y").unwrap().prefix, "A.b");
    assert_eq!(resolver.resolve("A.Z").unwrap().prefix, "A");
}

#[test]
fn test_equal_length_ties_are_deterministic() {
    let first = resolver_with(&[("Bb", "/b"), ("Aa", "/a")]);
    let second = resolver_with(&[("Aa", "/a"), ("Bb", "/b")]);
    assert_eq!(first.entries(), second.entries());
}

#[test]
fn test_no_duplicate_namespaces() {
    let resolver = resolver_with(&[("Core", "/first")]);
    resolver.register("Core.", "/second").unwrap();

    assert_eq!(resolver.len(), 1);
    assert_eq!(
        resolver.resolve("Core.Thing").unwrap().root_path,
        PathBuf::from("/second")
    );
}

#[test]
fn test_register_normalizes_prefix() {
    let resolver = resolver_with(&[(".App.", "/app")]);
    assert_eq!(resolver.entries()[0].prefix, "App");
}

#[test]
fn test_register_empty_prefix() {
    let resolver = NamespaceResolver::new();
    let result = resolver.register("..", "/x");
    assert_eq!(result, Err(NamespaceError::InvalidPrefix("..".to_string())));
}

#[test]
fn test_resolve_unknown_is_error() {
    let resolver = resolver_with(&[("Core", "/core")]);
    let result = resolver.resolve("App.Service");
    assert_eq!(
        result,
        Err(NamespaceError::NotFound("App.Service".to_string()))
    );
}

#[test]
fn test_remove_exact() {
    let resolver = resolver_with(&[("Core", "/core"), ("Core.util", "/util")]);

    assert!(resolver.remove_exact("Core.util"));
    assert!(!resolver.remove_exact("Core.util"));
    assert_eq!(resolver.len(), 1);
    assert_eq!(resolver.resolve("Core.util.Path").unwrap().prefix, "Core");
}

#[test]
fn test_remove_matching_prefix() {
    let resolver = resolver_with(&[("Core", "/core"), ("Core.util", "/util"), ("App", "/app")]);

    assert!(resolver.remove_matching("Core"));
    assert_eq!(resolver.len(), 1);
    assert!(!resolver.remove_matching("Core"));
}

#[test]
fn test_remove_matching_pattern() {
    let resolver = resolver_with(&[("Core", "/core"), ("Plugin.a", "/pa"), ("Plugin.b", "/pb")]);

    assert!(resolver.remove_matching(Regex::new(r"^Plugin\.").unwrap()));
    let prefixes: Vec<_> = resolver.entries().into_iter().map(|e| e.prefix).collect();
    assert_eq!(prefixes, ["Core"]);
}

#[test]
fn test_module_location() {
    let resolver = resolver_with(&[("Core", "/lib/core")]);

    let location = resolver
        .module_location("Core.abstract.Component", "class")
        .unwrap();
    assert_eq!(location.namespace.prefix, "Core");
    assert_eq!(
        location.relative_path,
        PathBuf::from("abstract").join("Component.class")
    );
    assert_eq!(
        location.path,
        PathBuf::from("/lib/core").join("abstract").join("Component.class")
    );
}

#[test]
fn test_module_location_without_extension() {
    let resolver = resolver_with(&[("Core", "/lib/core")]);
    let location = resolver.module_location("Core.Thing", "").unwrap();
    assert_eq!(location.relative_path, PathBuf::from("Thing"));
}

#[test]
fn test_module_location_unknown_namespace() {
    let resolver = NamespaceResolver::new();
    assert!(resolver.module_location("Core.Thing", "class").is_err());
}
