//! Integration tests for repeated generation into the same directory.
//!
//! A project is generated once, edited by hand, and regenerated with a
//! grown operation list. Hand-written code must survive every update.

use std::{fs, path::Path, str::FromStr};

use routegen_codegen::{
    GenerateError,
    generation::{Generator, StagedAction},
    merge::{INSERT_POINT, count_markers},
};
use routegen_manifest::Manifest;
use tempfile::TempDir;

const PROJECT: &str = r#"
[project]
module = "github.com/acme/demo"
service = "Demo"
package = "demo"
"#;

const USERS: &str = r#"
[[operations]]
method = "GET"
path = "/users"
handler = "ListUsers"
request = "ListUsersRequest"
response = "ListUsersResponse"

[[operations]]
method = "GET"
path = "/users/:id"
handler = "GetUser"
request = "GetUserRequest"
response = "GetUserResponse"
params = [{ name = "id", field = "req.ID", location = "path" }]

[[operations]]
method = "POST"
path = "/users"
handler = "CreateUser"
request = "CreateUserRequest"
response = "CreateUserResponse"
"#;

const HEALTH: &str = r#"
[[operations]]
method = "GET"
path = "/health"
handler = "Health"
"#;

fn manifest(operations: &[&str]) -> Manifest {
    let content = format!("{PROJECT}{}", operations.concat());
    Manifest::from_str(&content).expect("Failed to parse manifest")
}

fn generate(manifest: &Manifest, dir: &Path) -> Result<(), GenerateError> {
    let plan = Generator::from_manifest(manifest)?.plan(dir)?;
    plan.commit()?;
    Ok(())
}

fn read(dir: &Path, relative: &str) -> String {
    fs::read_to_string(dir.join(relative))
        .unwrap_or_else(|e| panic!("Failed to read {relative}: {e}"))
}

/// Snapshot of every regular file under `dir`, sorted by path.
fn tree_contents(dir: &Path) -> Vec<(String, String)> {
    fn walk(root: &Path, dir: &Path, out: &mut Vec<(String, String)>) {
        for entry in fs::read_dir(dir).unwrap() {
            let path = entry.unwrap().path();
            if path.is_dir() {
                walk(root, &path, out);
            } else {
                let relative = path.strip_prefix(root).unwrap().display().to_string();
                out.push((relative, fs::read_to_string(&path).unwrap()));
            }
        }
    }
    let mut out = Vec::new();
    walk(dir, dir, &mut out);
    out.sort();
    out
}

#[test]
fn test_regenerating_is_idempotent() {
    let temp = TempDir::new().unwrap();
    let manifest = manifest(&[USERS]);

    generate(&manifest, temp.path()).unwrap();
    let first = tree_contents(temp.path());

    let plan = Generator::from_manifest(&manifest)
        .unwrap()
        .plan(temp.path())
        .unwrap();
    assert!(
        plan.files()
            .iter()
            .all(|f| f.action == StagedAction::Unchanged),
        "second run should not change anything"
    );
    assert_eq!(plan.commit().unwrap().written(), 0);
    assert_eq!(tree_contents(temp.path()), first);
}

#[test]
fn test_hand_edits_survive_update() {
    let temp = TempDir::new().unwrap();
    generate(&manifest(&[USERS]), temp.path()).unwrap();

    let handler_path = "biz/handler/demo/demo.go";
    let edited = read(temp.path(), handler_path).replace(
        "\tresp := new(demo.GetUserResponse)\n",
        "\tresp := new(demo.GetUserResponse)\n\tresp.Name = lookup(req.ID)\n",
    );
    assert!(edited.contains("lookup(req.ID)"));
    fs::write(temp.path().join(handler_path), &edited).unwrap();

    let middleware_path = "biz/router/demo/middleware.go";
    let edited_mw = read(temp.path(), middleware_path).replace(
        "func _usersMw() []app.HandlerFunc {\n\t// your code...\n\treturn nil\n}",
        "func _usersMw() []app.HandlerFunc {\n\treturn []app.HandlerFunc{auth()}\n}",
    );
    fs::write(temp.path().join(middleware_path), &edited_mw).unwrap();

    generate(&manifest(&[USERS, HEALTH]), temp.path()).unwrap();

    let handler = read(temp.path(), handler_path);
    assert!(handler.starts_with(&edited), "existing handler code must be kept verbatim");
    assert!(handler.contains("func Health(ctx context.Context, c *app.RequestContext) {"));

    let middleware = read(temp.path(), middleware_path);
    assert!(middleware.starts_with(&edited_mw));
    assert!(middleware.contains("func _healthMw() []app.HandlerFunc {"));

    // The router is fully generated and picks up the new route.
    let router = read(temp.path(), "biz/router/demo/demo.go");
    assert!(router.contains("\tr.GET(\"/health\", append(_healthMw(), demo.Health)...)\n"));
}

#[test]
fn test_growth_is_monotonic() {
    let temp = TempDir::new().unwrap();
    generate(&manifest(&[USERS]), temp.path()).unwrap();
    let before = tree_contents(temp.path());

    generate(&manifest(&[USERS, HEALTH]), temp.path()).unwrap();
    let after = tree_contents(temp.path());

    for (path, content) in &before {
        let (_, grown) = after
            .iter()
            .find(|(p, _)| p == path)
            .unwrap_or_else(|| panic!("{path} disappeared"));
        let strategy_keeps_content = path.ends_with("middleware.go")
            || path.starts_with("biz/handler")
            || path.ends_with("register.go")
            || path == "biz/client/client.go";
        if strategy_keeps_content {
            for line in content.lines() {
                assert!(grown.contains(line), "{path} lost line {line:?}");
            }
        }
    }

    // One new descriptor adds exactly one handler, hook and route.
    let count = |files: &[(String, String)], path: &str, needle: &str| {
        files
            .iter()
            .find(|(p, _)| p == path)
            .map(|(_, content)| content.matches(needle).count())
            .unwrap_or_else(|| panic!("{path} missing"))
    };
    let handler = "biz/handler/demo/demo.go";
    let middleware = "biz/router/demo/middleware.go";
    let router = "biz/router/demo/demo.go";

    assert_eq!(count(&after, handler, "func Health("), 1);
    assert_eq!(count(&after, handler, "\nfunc "), count(&before, handler, "\nfunc ") + 1);
    assert_eq!(count(&after, middleware, "func _healthMw()"), 1);
    assert_eq!(
        count(&after, middleware, "\nfunc "),
        count(&before, middleware, "\nfunc ") + 1
    );
    assert_eq!(count(&after, router, ".GET("), count(&before, router, ".GET(") + 1);
}

#[test]
fn test_register_marker_is_stable() {
    let temp = TempDir::new().unwrap();
    generate(&manifest(&[USERS]), temp.path()).unwrap();

    let register_path = "biz/router/register.go";
    let custom = read(temp.path(), register_path).replace(
        &format!("\t{INSERT_POINT}\n"),
        &format!("\t{INSERT_POINT}\n\tcustomRegister(r)\n"),
    );
    fs::write(temp.path().join(register_path), &custom).unwrap();

    for _ in 0..3 {
        generate(&manifest(&[USERS, HEALTH]), temp.path()).unwrap();
    }

    let register = read(temp.path(), register_path);
    assert_eq!(register, custom);
    assert_eq!(count_markers(&register), 1);
    assert_eq!(register.matches("demo.Register(r)").count(), 1);
}

#[test]
fn test_new_router_package_is_registered() {
    let temp = TempDir::new().unwrap();
    generate(&manifest(&[USERS]), temp.path()).unwrap();

    let renamed = Manifest::from_str(&format!(
        "{}router_package = \"admin\"\n{HEALTH}",
        PROJECT.trim_end().to_string() + "\n"
    ))
    .unwrap();
    generate(&renamed, temp.path()).unwrap();

    let register = read(temp.path(), "biz/router/register.go");
    assert!(register.contains("\tdemo.Register(r)\n\tadmin.Register(r)\n\t//INSERT_POINT"));
    assert!(register.contains("\tadmin \"github.com/acme/demo/biz/router/admin\"\n"));
    assert!(register.contains("\tdemo \"github.com/acme/demo/biz/router/demo\"\n"));
}

#[test]
fn test_missing_marker_aborts_without_writing() {
    let temp = TempDir::new().unwrap();
    generate(&manifest(&[USERS]), temp.path()).unwrap();

    let register_path = temp.path().join("biz/router/register.go");
    fs::write(&register_path, "package router\n").unwrap();
    let before = tree_contents(temp.path());

    let err = generate(&manifest(&[USERS, HEALTH]), temp.path()).unwrap_err();
    match err {
        GenerateError::MarkerNotFound { path } => assert_eq!(path, register_path),
        other => panic!("unexpected error: {other:?}"),
    }
    // The router would have changed, but nothing was written.
    assert_eq!(tree_contents(temp.path()), before);
}

#[test]
fn test_duplicate_route_aborts_before_planning() {
    let temp = TempDir::new().unwrap();
    let duplicated = format!(
        "{PROJECT}{}",
        r#"
[[operations]]
method = "GET"
path = "/ping"
handler = "Ping"

[[operations]]
method = "GET"
path = "/ping/"
handler = "PingAgain"
"#
    );
    let manifest = Manifest::from_str(&duplicated).unwrap();

    let err = generate(&manifest, temp.path()).unwrap_err();
    assert!(matches!(err, GenerateError::DuplicateRoute { .. }));
    assert!(fs::read_dir(temp.path()).unwrap().next().is_none());
}
