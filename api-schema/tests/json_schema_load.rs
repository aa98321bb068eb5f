//! Loading schema tables from JSON instead of building them in code.

use api_schema::{api_registry, REGISTER_PIPED_REQUEST};
use codec::{decode, Message};
use schema::SchemaRegistry;

#[test]
fn registry_survives_json_roundtrip() {
    let registry = api_registry();
    let json = serde_json::to_string_pretty(&registry).unwrap();
    let loaded: SchemaRegistry = serde_json::from_str(&json).unwrap();

    assert_eq!(loaded, registry);
    assert_eq!(loaded.fingerprint(), registry.fingerprint());
    assert_eq!(
        loaded.schema_hash(REGISTER_PIPED_REQUEST),
        registry.schema_hash(REGISTER_PIPED_REQUEST)
    );
}

#[test]
fn hand_written_table_decodes_messages_from_the_built_in_one() {
    let json = r#"[
        {
            "type_name": "grpc.service.webservice.RegisterPipedRequest",
            "fields": [
                {"number": 1, "name": "name", "kind": {"singular": {"scalar": "string"}}}
            ]
        }
    ]"#;
    let partial: SchemaRegistry = serde_json::from_str(json).unwrap();

    let registry = api_registry();
    let mut request = Message::for_type(&registry, REGISTER_PIPED_REQUEST).unwrap();
    request.set(1, "dev").unwrap();
    request.set(2, "staging").unwrap();

    let decoded = decode(&partial, REGISTER_PIPED_REQUEST, &request.encode()).unwrap();
    assert_eq!(decoded.get_str(1).unwrap(), "dev");
    assert!(decoded.get_str(2).is_err());
}

#[test]
fn unresolved_reference_in_json_is_rejected() {
    let json = r#"[
        {
            "type_name": "grpc.service.webservice.ListPipedsResponse",
            "fields": [
                {"number": 1, "name": "pipeds", "kind": {"repeated": {"message": "model.Piped"}}}
            ]
        }
    ]"#;
    assert!(serde_json::from_str::<SchemaRegistry>(json).is_err());
}
