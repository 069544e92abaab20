//! Snapshot tests for the default Go/Hertz templates.
//!
//! Run `cargo insta review` to update snapshots when making intentional changes.

use std::str::FromStr;

use routegen_codegen::generation::Generator;
use routegen_manifest::Manifest;

const USERS: &str = r#"
[project]
module = "github.com/acme/demo"
service = "Demo"
package = "demo"

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
comment = "GetUser returns one user."
params = [
    { name = "id", field = "req.ID", location = "path" },
    { name = "X-Trace", field = "req.Trace", location = "header" },
]

[[operations]]
method = "POST"
path = "/users"
handler = "CreateUser"
request = "CreateUserRequest"
response = "CreateUserResponse"
params = [{ name = "body", field = "req", location = "body" }]
"#;

/// Preview generated files for a manifest, keyed by relative path.
fn generate_files(manifest_toml: &str) -> Vec<(String, String)> {
    let manifest = Manifest::from_str(manifest_toml).expect("Failed to parse manifest");
    let generator = Generator::from_manifest(&manifest).expect("Failed to load templates");
    let plan = generator
        .plan("does-not-exist")
        .expect("Failed to plan generation");

    plan.preview()
        .into_iter()
        .map(|f| (f.path, f.content))
        .collect()
}

/// Get a specific file from the generated output.
fn get_file<'a>(files: &'a [(String, String)], path: &str) -> Option<&'a str> {
    files
        .iter()
        .find(|(p, _)| p == path)
        .map(|(_, c)| c.as_str())
}

#[test]
fn test_users_router() {
    let files = generate_files(USERS);
    let router = get_file(&files, "biz/router/demo/demo.go").expect("router not found");
    insta::assert_snapshot!("users_router", router);
}

#[test]
fn test_users_register() {
    let files = generate_files(USERS);
    let register = get_file(&files, "biz/router/register.go").expect("register not found");
    insta::assert_snapshot!("users_register", register);
}

#[test]
fn test_users_middleware() {
    let files = generate_files(USERS);
    let middleware =
        get_file(&files, "biz/router/demo/middleware.go").expect("middleware not found");
    insta::assert_snapshot!("users_middleware", middleware);
}

#[test]
fn test_users_handler() {
    let files = generate_files(USERS);
    let handler = get_file(&files, "biz/handler/demo/demo.go").expect("handler not found");

    assert!(handler.starts_with("// Code generated by hertz generator.\n\npackage demo\n"));
    assert!(handler.contains("\tdemo \"github.com/acme/demo/biz/model/demo\"\n"));
    assert!(handler.contains(
        "// GetUser returns one user.\n// @router /users/:id [GET]\nfunc GetUser(ctx context.Context, c *app.RequestContext) {\n"
    ));
    assert!(handler.contains("\tvar req demo.CreateUserRequest\n"));
    assert!(handler.contains("\tresp := new(demo.ListUsersResponse)\n\n\tc.JSON(consts.StatusOK, resp)\n}"));
}

#[test]
fn test_users_idl_client() {
    let files = generate_files(USERS);
    let client = get_file(&files, "biz/client/demo/demo_client.go").expect("client not found");

    assert!(client.contains("func NewDemoClient(hostUrl string, ops ...Option) (Client, error) {"));
    assert!(client.contains("\t\t\t\"id\": req.ID,\n"));
    assert!(client.contains("\t\t\t\"X-Trace\": req.Trace,\n"));
    assert!(client.contains("\t\tsetBodyParam(req).\n"));
    assert!(client.contains("\t\texecute(\"POST\", \"/users\")\n"));
    assert!(client.contains("\t\texecute(\"GET\", \"/users/:id\")\n"));
    // The package-level client surfaces its construction error.
    assert!(client.contains("return defaultClient, defaultClientErr"));
    assert!(client.contains("defaultClient, defaultClientErr = NewDemoClient(\"http://demo\")"));
}

#[test]
fn test_hertz_client_settings() {
    let files = generate_files(&USERS.replace(
        "package = \"demo\"",
        "package = \"demo\"\nquery_enum_as_int = true",
    ));
    let client =
        get_file(&files, "biz/client/demo/hertz_client.go").expect("hertz client not found");

    assert!(client.starts_with("// Code generated by hertz generator. DO NOT EDIT.\n\npackage demo\n"));
    assert!(client.contains("\t\tqueryEnumAsInt: true,\n"));
    assert!(client.contains("return statusCode > 399"));
}

#[test]
fn test_hertz_client_defaults() {
    let files = generate_files(USERS);
    let client =
        get_file(&files, "biz/client/demo/hertz_client.go").expect("hertz client not found");

    // Booleans must render as Go literals.
    assert!(client.contains("\t\tqueryEnumAsInt: false,\n"));
    assert!(!client.contains("True") && !client.contains("False"));
}

#[test]
fn test_custom_template_override() {
    let manifest = format!(
        "{USERS}{}",
        r##"
[templates.routes_doc]
path = "docs/{{ router_package }}.md"
delims = ["[[", "]]"]
body = "# [[ service ]]\n{% for m in methods %}- [[ m.method ]] [[ m.path ]]\n{% endfor %}"
"##
    );
    let files = generate_files(&manifest);

    // Output paths always render with the default delimiters.
    let doc = get_file(&files, "docs/demo.md").expect("doc not found");
    assert_eq!(
        doc,
        "# Demo\n- GET /users\n- POST /users\n- GET /users/:id\n"
    );
}
