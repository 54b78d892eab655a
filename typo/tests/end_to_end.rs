//! Derive, build, and generate through the public API

#![allow(clippy::unwrap_used, clippy::expect_used, missing_docs, reason = "test code")]

use std::collections::HashMap;

use serde_json::{Value, json};
use typo::{ApiDocs, Describe, GeneratorConfig, OutputFormat};

#[derive(Describe)]
#[typo(rename_all = "camelCase")]
#[allow(dead_code, reason = "only described, never constructed")]
struct UserDto {
    user_id:    uuid::Uuid,
    name:       String,
    email:      Option<String>,
    address:    Address,
    roles:      Vec<Role>,
    attributes: HashMap<String, i32>,
    #[typo(skip)]
    password:   String,
}

#[derive(Describe)]
#[allow(dead_code, reason = "only described, never constructed")]
struct Address {
    street: String,
    city:   String,
}

#[derive(Describe, serde::Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[allow(dead_code, reason = "only described, never constructed")]
enum Role {
    Admin,
    ReadOnly,
}

#[derive(Describe)]
#[allow(dead_code, reason = "only described, never constructed")]
struct PageResponse<T> {
    content:     Vec<T>,
    total_count: u64,
}

#[derive(Describe)]
#[allow(dead_code, reason = "only described, never constructed")]
struct ApiResponse<T> {
    data:    Option<T>,
    success: bool,
}

#[derive(Describe)]
#[allow(dead_code, reason = "only described, never constructed")]
struct Category {
    name:     String,
    children: Vec<Category>,
    parent:   Option<Box<Self>>,
}

#[derive(Describe)]
#[allow(dead_code, reason = "only described, never constructed")]
struct Tree(Vec<Tree>);

#[derive(Describe)]
#[allow(dead_code, reason = "only described, never constructed")]
struct Link(Option<Box<Self>>);

#[derive(Describe)]
#[allow(dead_code, reason = "only described, never constructed")]
enum Shape {
    Circle { radius: f64 },
    Rectangle { width: f64, height: f64 },
}

#[derive(Describe)]
#[allow(dead_code, reason = "only described, never constructed")]
struct ErrorBody {
    code:    String,
    message: String,
}

#[derive(Describe)]
#[allow(dead_code, reason = "only described, never constructed")]
struct CreateUser {
    name:    String,
    address: Address,
}

#[derive(Describe, serde::Serialize)]
#[serde(rename_all = "camelCase")]
#[allow(dead_code, reason = "only described, never constructed")]
struct AuditEntry {
    created_at: chrono::NaiveDateTime,
    #[serde(rename = "by")]
    actor:      String,
    #[serde(skip)]
    internal:   u8,
}

fn docs(config: GeneratorConfig) -> ApiDocs {
    ApiDocs::builder()
        .info(|info| info.title("User Service").version("2.1.0").description("Users and more"))
        .config(config)
        .common_responses(|c| {
            c.response::<ErrorBody>(500, |r| r.description("Internal Server Error"))
        })
        .document("create-user", |doc| {
            doc.post("/users", |op| {
                op.summary("Create user")
                    .tags(["users"])
                    .request_body::<CreateUser>(|body| {
                        body.field("name", |f| f.description("Full name").max_length(100))
                            .field("address.city", |f| f.description("City name"))
                    })
                    .response_body::<UserDto>(|r| r.status_code(201).description("Created"))
                    .header_parameter("X-Request-Id", |p| p.description("Trace id"))
            })
        })
        .document("list-users", |doc| {
            doc.get("/users", |op| {
                op.query_parameter("page", |p| p.schema_type::<u32>().example(0))
                    .response_body::<ApiResponse<PageResponse<UserDto>>>(|r| r)
                    .exclude_common_responses([500])
            })
        })
        .document("get-category", |doc| {
            doc.get("/categories/{id}", |op| {
                op.path_parameter("id", |p| p.schema_type::<i64>().description("Category id"))
                    .response_body::<Category>(|r| r)
            })
        })
        .document("draw", |doc| {
            doc.put("/shapes", |op| op.request_body::<Shape>(|b| b).response(204, "Drawn"))
        })
        .build()
        .unwrap()
}

fn openapi_value(docs: &ApiDocs) -> Value {
    serde_json::from_str(&docs.to_json().unwrap()).unwrap()
}

#[test]
fn components_are_named_and_deduplicated() {
    let docs = docs(GeneratorConfig::default());
    let names: Vec<&str> = docs.registry().entries().keys().map(String::as_str).collect();

    assert_eq!(
        names,
        vec![
            "ErrorBody",
            "Address",
            "CreateUser",
            "UserDto",
            "PageResponse_UserDto",
            "ApiResponse_PageResponse_UserDto",
            "Category",
            "Circle",
            "Rectangle",
        ]
    );
}

#[test]
fn derived_struct_projection() {
    let value = openapi_value(&docs(GeneratorConfig::default()));
    let user = &value["components"]["schemas"]["UserDto"];

    assert_eq!(
        user["properties"].as_object().unwrap().keys().collect::<Vec<_>>(),
        vec!["userId", "name", "email", "address", "roles", "attributes"]
    );
    assert_eq!(
        user["required"],
        json!(["userId", "name", "address", "roles", "attributes"])
    );
    assert_eq!(user["properties"]["userId"], json!({"type": "string", "format": "uuid"}));
    assert_eq!(user["properties"]["email"], json!({"type": "string", "nullable": true}));
    assert_eq!(
        user["properties"]["roles"],
        json!({"type": "array", "items": {"type": "string", "enum": ["ADMIN", "READ_ONLY"]}})
    );
    assert_eq!(
        user["properties"]["attributes"],
        json!({"type": "object", "additionalProperties": {"type": "integer", "format": "int32"}})
    );
}

#[test]
fn serde_attributes_are_honored() {
    let mut resolver = typo::TypeResolver::new();
    let reference = resolver.resolve_type::<AuditEntry>();
    assert_eq!(reference.reference_target(), Some("AuditEntry"));

    let body = resolver.registry().get("AuditEntry").unwrap();
    let names: Vec<&str> = body.properties().unwrap().keys().map(String::as_str).collect();
    assert_eq!(names, vec!["createdAt", "by"]);
    assert_eq!(
        body.properties().unwrap()["createdAt"].format.as_deref(),
        Some("date-time")
    );
}

#[test]
fn generic_and_recursive_types() {
    let value = openapi_value(&docs(GeneratorConfig::default()));
    let schemas = &value["components"]["schemas"];

    assert_eq!(
        schemas["PageResponse_UserDto"]["properties"]["content"]["items"],
        json!({"$ref": "#/components/schemas/UserDto"})
    );
    assert_eq!(
        schemas["ApiResponse_PageResponse_UserDto"]["properties"]["data"],
        json!({"$ref": "#/components/schemas/PageResponse_UserDto", "nullable": true})
    );
    assert_eq!(
        schemas["Category"]["properties"]["children"]["items"],
        json!({"$ref": "#/components/schemas/Category"})
    );
    assert_eq!(schemas["Category"]["required"], json!(["name", "children"]));
}

#[test]
fn self_recursive_newtypes_resolve() {
    let mut resolver = typo::TypeResolver::new();

    let tree = resolver.resolve_type::<Tree>();
    assert_eq!(tree.reference_target(), Some("Tree"));
    let body = resolver.registry().get("Tree").unwrap();
    let items = body.properties().unwrap()["0"].items().unwrap();
    assert_eq!(items.reference_target(), Some("Tree"));

    let link = resolver.resolve_type::<Link>();
    assert_eq!(link.reference_target(), Some("Link"));
    let next = &resolver.registry().get("Link").unwrap().properties().unwrap()["0"];
    assert_eq!(next.reference_target(), Some("Link"));
    assert!(next.nullable);
}

#[test]
fn operations_and_overrides() {
    let value = openapi_value(&docs(GeneratorConfig::default()));
    let create = &value["paths"]["/users"]["post"];

    assert_eq!(create["parameters"][0]["in"], json!("header"));
    assert_eq!(create["parameters"][0]["required"], json!(false));
    assert_eq!(
        create["requestBody"]["content"]["application/json"]["schema"],
        json!({"$ref": "#/components/schemas/CreateUser"})
    );
    assert_eq!(
        create["responses"].as_object().unwrap().keys().collect::<Vec<_>>(),
        vec!["201", "500"]
    );

    let list = &value["paths"]["/users"]["get"];
    assert_eq!(list["parameters"][0]["schema"]["format"], json!("int64"));
    assert_eq!(list["parameters"][0]["example"], json!(0));
    assert_eq!(list["responses"].as_object().unwrap().len(), 1);

    let schemas = &value["components"]["schemas"];
    assert_eq!(
        schemas["CreateUser"]["properties"]["name"],
        json!({"type": "string", "description": "Full name", "maxLength": 100})
    );
    // Address is shared, so the nested override is visible from every use
    assert_eq!(
        schemas["Address"]["properties"]["city"]["description"],
        json!("City name")
    );

    let draw = &value["paths"]["/shapes"]["put"];
    let shape = &draw["requestBody"]["content"]["application/json"]["schema"];
    assert_eq!(shape["discriminator"]["propertyName"], json!("type"));
    assert_eq!(
        shape["discriminator"]["mapping"]["Circle"],
        json!("#/components/schemas/Circle")
    );
    assert_eq!(draw["responses"]["204"], json!({"description": "Drawn"}));
}

#[test]
fn generate_writes_documents_and_snippets() {
    let dir = tempfile::tempdir().unwrap();
    let config = GeneratorConfig::default()
        .output_dir(dir.path().join("docs"))
        .snippet_dir(dir.path().join("snippets"))
        .format(OutputFormat::Both);
    docs(config).generate().unwrap();

    let yaml = std::fs::read_to_string(dir.path().join("docs/openapi.yaml")).unwrap();
    assert!(yaml.contains("title: User Service"));
    assert!(dir.path().join("docs/openapi.json").exists());

    let snippets = dir.path().join("snippets");
    let request = std::fs::read_to_string(snippets.join("create-user/request-fields.adoc")).unwrap();
    assert!(request.contains("|`address.city`\n|`String`\n|City name\n|false\n"));

    let response = std::fs::read_to_string(snippets.join("list-users/response-fields.adoc")).unwrap();
    assert!(response.contains("|`data.content[].address.street`\n|`String`\n"));
    assert!(response.contains("|`data`\n|`Object`\n|\n|true\n"));

    let category = std::fs::read_to_string(snippets.join("get-category/response-fields.adoc")).unwrap();
    assert!(category.contains("|`children`\n|`Array<Object>`\n"));
    assert!(!category.contains("children[].name"));

    let parameters =
        std::fs::read_to_string(snippets.join("get-category/path-parameters.adoc")).unwrap();
    assert!(parameters.contains("|`id`\n|Category id\n|true\n"));
    assert!(snippets.join("create-user/response-fields-201.adoc").exists());
    assert!(snippets.join("create-user/response-fields-500.adoc").exists());
    assert!(!snippets.join("draw/response-fields.adoc").exists());
}
