use apiref_core::{
    build_all, generate_example, render_snippet, ApiDocument, Environment, HttpMethod,
    NormalizedSchema, SchemaType,
};
use pretty_assertions::assert_eq;
use serde_json::json;

const DOMAIN: &str = "https://api.example.com";

const PETSTORE: &str = r##"
openapi: 3.0.3
info:
  title: Users
  version: 1.0.0
paths:
  /user:
    get:
      operationId: getUser
      parameters:
        - $ref: '#/components/parameters/UserId'
        - name: verbose
          in: query
          schema:
            type: boolean
      responses:
        200:
          description: OK
          content:
            application/json:
              schema:
                $ref: '#/components/schemas/User'
  /search:
    get:
      parameters:
        - name: query
          in: query
          required: true
          schema: { type: string, example: john }
        - name: limit
          in: query
          required: true
          schema: { type: integer, example: 10 }
        - name: offset
          in: query
          schema: { type: integer, example: 5 }
      responses: {}
  /users:
    post:
      requestBody:
        required: true
        content:
          application/json:
            schema:
              $ref: '#/components/schemas/NewUser'
      responses:
        201:
          description: Created
components:
  parameters:
    UserId:
      name: userId
      in: query
      required: true
      schema:
        type: string
        example: abc123
  schemas:
    User:
      type: object
      properties:
        id: { type: string, example: u_1 }
        name: { $ref: '#/components/schemas/Name' }
        labels:
          type: object
          additionalProperties: { type: string }
    Name:
      type: string
      example: John Doe
    NewUser:
      type: object
      required: [name]
      properties:
        name: { $ref: '#/components/schemas/Name' }
        contact:
          oneOf:
            - { type: string, format: email }
            - oneOf:
                - { type: integer }
                - { type: boolean }
"##;

fn document() -> ApiDocument {
    ApiDocument::from_yaml_str(PETSTORE).unwrap()
}

#[test]
fn building_twice_gives_identical_models() {
    let doc = document();
    for op in doc.operations() {
        let first = doc.build_request(&op.path, op.method).unwrap();
        let second = doc.build_request(&op.path, op.method).unwrap();
        assert_eq!(first, second);
    }
}

#[test]
fn references_are_transparent() {
    let referenced = document();
    let inlined = ApiDocument::from_value(json!({
        "paths": { "/user": { "get": {
            "operationId": "getUser",
            "parameters": [
                { "name": "userId", "in": "query", "required": true,
                  "schema": { "type": "string", "example": "abc123" } },
                { "name": "verbose", "in": "query", "schema": { "type": "boolean" } }
            ],
            "responses": { "200": { "description": "OK", "content": { "application/json": {
                "schema": { "type": "object", "properties": {
                    "id": { "type": "string", "example": "u_1" },
                    "name": { "type": "string", "example": "John Doe" },
                    "labels": { "type": "object", "additionalProperties": { "type": "string" } }
                } }
            } } } }
        } } }
    }));

    assert_eq!(
        referenced.build_request("/user", HttpMethod::Get).unwrap(),
        inlined.build_request("/user", HttpMethod::Get).unwrap()
    );
}

#[test]
fn one_of_is_flattened_and_dictionaries_detected() {
    let request = document().build_request("/users", HttpMethod::Post).unwrap();
    let body = request.body_schema("application/json").unwrap().primary().unwrap();
    let properties = body.properties.as_ref().unwrap();

    let NormalizedSchema::Variants(variants) = &properties["contact"] else {
        panic!("contact should be a variant list");
    };
    let types: Vec<_> = variants.iter().map(|v| v.schema_type).collect();
    assert_eq!(
        types,
        vec![SchemaType::String, SchemaType::Integer, SchemaType::Boolean]
    );

    let user = document().build_request("/user", HttpMethod::Get).unwrap();
    let content = user.responses["200"].content.as_ref().unwrap();
    let schema = content["application/json"].schema.as_ref().unwrap().primary().unwrap();
    let labels = schema.properties.as_ref().unwrap()["labels"].primary().unwrap();
    assert_eq!(labels.schema_type, SchemaType::Dictionary);
}

#[test]
fn example_generation_follows_precedence() {
    let request = document().build_request("/user", HttpMethod::Get).unwrap();
    let content = request.responses["200"].content.as_ref().unwrap();
    let schema = content["application/json"].schema.as_ref().unwrap().primary().unwrap();
    assert_eq!(
        generate_example(schema),
        json!({ "id": "u_1", "name": "John Doe", "labels": {} })
    );
}

#[test]
fn only_required_query_params_reach_any_snippet() {
    let request = document().build_request("/user", HttpMethod::Get).unwrap();
    for env in Environment::ALL {
        let code = render_snippet(DOMAIN, &request, env).unwrap();
        assert!(code.contains("/user?userId=abc123"), "{}: {}", env, code);
        assert!(!code.contains("verbose"), "{}: {}", env, code);
    }
}

#[test]
fn curl_for_user_lookup() {
    let request = document().build_request("/user", HttpMethod::Get).unwrap();
    let code = render_snippet(DOMAIN, &request, Environment::Shell).unwrap();
    assert_eq!(
        code,
        "curl --location --request GET 'https://api.example.com/user?userId=abc123' \\\n     --header 'Content-Type: application/json; charset=utf-8'"
    );
}

#[test]
fn multiple_required_query_params_keep_order() {
    let request = document().build_request("/search", HttpMethod::Get).unwrap();
    for env in Environment::ALL {
        let code = render_snippet(DOMAIN, &request, env).unwrap();
        assert!(code.contains("/search?query=john&limit=10"), "{}: {}", env, code);
        assert!(!code.contains("offset"), "{}: {}", env, code);
    }
}

#[test]
fn post_body_is_embedded_in_every_snippet() {
    let request = document().build_request("/users", HttpMethod::Post).unwrap();
    for env in Environment::ALL {
        let code = render_snippet(DOMAIN, &request, env).unwrap();
        assert!(code.contains("\"name\": \"John Doe\""), "{}: {}", env, code);
    }
    let python = render_snippet(DOMAIN, &request, Environment::Python).unwrap();
    assert!(python.contains("requests.post(url, json=payload, headers=headers)"));
}

#[test]
fn failing_endpoint_does_not_abort_the_batch() {
    let mut root: serde_json::Value = document().root().clone();
    root["paths"]["/broken"] = json!({ "delete": { "responses": { "204": {
        "description": "gone",
        "headers": { "X-Trace": { "$ref": "#/components/headers/Missing" } }
    } } } });
    let doc = ApiDocument::from_value(root);

    let (requests, report) = build_all(&doc);
    assert_eq!(report.succeeded, 3);
    assert_eq!(report.failed(), 1);
    assert_eq!(report.failures[0].endpoint, "delete /broken");
    assert_eq!(requests.len(), 3);
}

#[test]
fn content_declared_query_param_uses_its_media_schema() {
    let doc = ApiDocument::from_value(json!({
        "paths": { "/q": { "get": {
            "parameters": [
                { "name": "filter", "in": "query", "required": true,
                  "content": { "application/json": {
                      "schema": { "type": "string", "example": "active" }
                  } } },
                { "name": "opaque", "in": "query", "required": true,
                  "content": { "application/json": {} } }
            ],
            "responses": {}
        } } }
    }));
    let request = doc.build_request("/q", HttpMethod::Get).unwrap();
    for env in Environment::ALL {
        let code = render_snippet("https://h", &request, env).unwrap();
        assert!(code.contains("/q?filter=active"), "{}: {}", env, code);
        assert!(!code.contains("null"), "{}: {}", env, code);
        assert!(!code.contains("opaque"), "{}: {}", env, code);
    }
}

#[test]
fn operations_keep_method_declaration_order() {
    let doc = ApiDocument::from_value(json!({
        "paths": { "/u": { "post": { "responses": {} }, "get": { "responses": {} } } }
    }));
    let (requests, _) = build_all(&doc);
    let labels: Vec<_> = requests.iter().map(|(op, _)| op.label()).collect();
    assert_eq!(labels, vec!["post /u", "get /u"]);
}
