//! Field tables for a slice of the deployment-management web API.
//!
//! Each message type is a [`MessageSchema`] built from its `.proto` field
//! numbers. [`api_registry`] registers all of them, and the constructors in
//! this crate build the request messages clients send most often.

mod enums;
mod model;
mod service;

pub use enums::{application_kind, application_sync_status, event_status, piped_status};
pub use model::{application_git_repository, event, piped, piped_key, wrappers};
pub use service::{
    list_applications_options, list_applications_request, list_events_response,
    list_pipeds_options, list_pipeds_request, list_pipeds_response,
    new_list_applications_options, new_list_applications_request, new_list_pipeds_options,
    new_list_pipeds_request, new_register_piped_request,
    new_update_piped_desired_version_request, register_piped_request, register_piped_response,
    update_piped_desired_version_request, ApplicationFilter,
};

use codec::{CodecResult, Message};
use schema::{MessageSchema, SchemaRegistry};

pub const BOOL_VALUE: &str = "google.protobuf.BoolValue";
pub const STRING_VALUE: &str = "google.protobuf.StringValue";
pub const INT64_VALUE: &str = "google.protobuf.Int64Value";

pub const APPLICATION_GIT_REPOSITORY: &str = "model.ApplicationGitRepository";
pub const PIPED_KEY: &str = "model.PipedKey";
pub const PIPED_CLOUD_PROVIDER: &str = "model.Piped.CloudProvider";
pub const PIPED_SECRET_ENCRYPTION: &str = "model.Piped.SecretEncryption";
pub const PIPED: &str = "model.Piped";
pub const EVENT: &str = "model.Event";

pub const REGISTER_PIPED_REQUEST: &str = "grpc.service.webservice.RegisterPipedRequest";
pub const REGISTER_PIPED_RESPONSE: &str = "grpc.service.webservice.RegisterPipedResponse";
pub const UPDATE_PIPED_DESIRED_VERSION_REQUEST: &str =
    "grpc.service.webservice.UpdatePipedDesiredVersionRequest";
pub const LIST_PIPEDS_REQUEST: &str = "grpc.service.webservice.ListPipedsRequest";
pub const LIST_PIPEDS_REQUEST_OPTIONS: &str = "grpc.service.webservice.ListPipedsRequest.Options";
pub const LIST_PIPEDS_RESPONSE: &str = "grpc.service.webservice.ListPipedsResponse";
pub const LIST_APPLICATIONS_REQUEST: &str = "grpc.service.webservice.ListApplicationsRequest";
pub const LIST_APPLICATIONS_REQUEST_OPTIONS: &str =
    "grpc.service.webservice.ListApplicationsRequest.Options";
pub const LIST_EVENTS_RESPONSE: &str = "grpc.service.webservice.ListEventsResponse";

/// Every message type registered by [`api_registry`].
pub const API_TYPE_NAMES: &[&str] = &[
    BOOL_VALUE,
    STRING_VALUE,
    INT64_VALUE,
    APPLICATION_GIT_REPOSITORY,
    PIPED_KEY,
    PIPED_CLOUD_PROVIDER,
    PIPED_SECRET_ENCRYPTION,
    PIPED,
    EVENT,
    REGISTER_PIPED_REQUEST,
    REGISTER_PIPED_RESPONSE,
    UPDATE_PIPED_DESIRED_VERSION_REQUEST,
    LIST_PIPEDS_REQUEST,
    LIST_PIPEDS_REQUEST_OPTIONS,
    LIST_PIPEDS_RESPONSE,
    LIST_APPLICATIONS_REQUEST,
    LIST_APPLICATIONS_REQUEST_OPTIONS,
    LIST_EVENTS_RESPONSE,
];

/// Returns the field tables of every API message type.
pub fn api_message_schemas() -> Vec<MessageSchema> {
    let mut schemas = model::schemas();
    schemas.extend(service::schemas());
    schemas
}

/// Builds the registry of every API message type.
pub fn api_registry() -> SchemaRegistry {
    SchemaRegistry::new(api_message_schemas()).expect("api schema tables must be valid")
}

/// Creates a `google.protobuf.BoolValue` wrapper.
pub fn bool_value(registry: &SchemaRegistry, value: bool) -> CodecResult<Message> {
    let mut wrapper = Message::for_type(registry, BOOL_VALUE)?;
    wrapper.set(wrappers::VALUE, value)?;
    Ok(wrapper)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_api_exports() {
        let _ = ApplicationFilter::default();
        let _ = application_kind::ECS;
        let _ = application_sync_status::SYNCED;
        let _ = event_status::SUCCESS;
        let _ = piped_status::ONLINE;
        let _ = piped::DESIRED_VERSION;
        let _ = register_piped_request::NAME;
        let _ = list_applications_options::LABELS;
        let _: fn() -> SchemaRegistry = api_registry;
    }

    #[test]
    fn registry_contains_every_listed_type() {
        let registry = api_registry();
        assert_eq!(registry.len(), API_TYPE_NAMES.len());
        for type_name in API_TYPE_NAMES {
            assert!(registry.contains(type_name), "{type_name} missing");
        }
    }

    #[test]
    fn registry_is_deterministic() {
        assert_eq!(api_registry().fingerprint(), api_registry().fingerprint());
    }

    #[test]
    fn bool_value_false_is_present_but_empty() {
        let registry = api_registry();
        let wrapper = bool_value(&registry, false).unwrap();
        assert!(!wrapper.has(wrappers::VALUE));
        assert!(wrapper.encode().is_empty());
    }
}
