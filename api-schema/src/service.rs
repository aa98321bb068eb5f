//! Web service requests and responses.

use codec::{CodecResult, Message, Value};
use schema::{FieldSchema, MessageSchema, ScalarKind, SchemaRegistry};

use crate::{
    bool_value, EVENT, LIST_APPLICATIONS_REQUEST, LIST_APPLICATIONS_REQUEST_OPTIONS,
    LIST_EVENTS_RESPONSE, LIST_PIPEDS_REQUEST, LIST_PIPEDS_REQUEST_OPTIONS, LIST_PIPEDS_RESPONSE,
    BOOL_VALUE, PIPED, REGISTER_PIPED_REQUEST, REGISTER_PIPED_RESPONSE,
    UPDATE_PIPED_DESIRED_VERSION_REQUEST,
};

pub mod register_piped_request {
    use schema::FieldNumber;

    pub const NAME: FieldNumber = 1;
    pub const DESC: FieldNumber = 2;
}

pub mod register_piped_response {
    use schema::FieldNumber;

    pub const ID: FieldNumber = 1;
    pub const KEY: FieldNumber = 2;
}

pub mod update_piped_desired_version_request {
    use schema::FieldNumber;

    pub const VERSION: FieldNumber = 1;
    pub const PIPED_IDS: FieldNumber = 2;
}

pub mod list_pipeds_request {
    use schema::FieldNumber;

    pub const WITH_STATUS: FieldNumber = 1;
    pub const OPTIONS: FieldNumber = 2;
}

pub mod list_pipeds_options {
    use schema::FieldNumber;

    pub const ENABLED: FieldNumber = 1;
}

pub mod list_pipeds_response {
    use schema::FieldNumber;

    pub const PIPEDS: FieldNumber = 1;
}

pub mod list_applications_request {
    use schema::FieldNumber;

    pub const OPTIONS: FieldNumber = 1;
}

pub mod list_applications_options {
    use schema::FieldNumber;

    pub const ENABLED: FieldNumber = 1;
    pub const KINDS: FieldNumber = 2;
    pub const SYNC_STATUSES: FieldNumber = 3;
    pub const NAME: FieldNumber = 4;
    pub const LABELS: FieldNumber = 5;
    pub const PIPED_ID: FieldNumber = 6;
}

pub mod list_events_response {
    use schema::FieldNumber;

    pub const EVENTS: FieldNumber = 1;
    pub const CURSOR: FieldNumber = 2;
}

pub(crate) fn schemas() -> Vec<MessageSchema> {
    let table = |type_name: &str, fields: Vec<FieldSchema>| {
        MessageSchema::new(type_name, fields).expect("service schema must be valid")
    };

    vec![
        table(
            REGISTER_PIPED_REQUEST,
            vec![
                FieldSchema::scalar(register_piped_request::NAME, "name", ScalarKind::String),
                FieldSchema::scalar(register_piped_request::DESC, "desc", ScalarKind::String),
            ],
        ),
        table(
            REGISTER_PIPED_RESPONSE,
            vec![
                FieldSchema::scalar(register_piped_response::ID, "id", ScalarKind::String),
                FieldSchema::scalar(register_piped_response::KEY, "key", ScalarKind::String),
            ],
        ),
        table(
            UPDATE_PIPED_DESIRED_VERSION_REQUEST,
            vec![
                FieldSchema::scalar(
                    update_piped_desired_version_request::VERSION,
                    "version",
                    ScalarKind::String,
                ),
                FieldSchema::repeated(
                    update_piped_desired_version_request::PIPED_IDS,
                    "piped_ids",
                    ScalarKind::String,
                ),
            ],
        ),
        table(
            LIST_PIPEDS_REQUEST,
            vec![
                FieldSchema::scalar(list_pipeds_request::WITH_STATUS, "with_status", ScalarKind::Bool),
                FieldSchema::message(
                    list_pipeds_request::OPTIONS,
                    "options",
                    LIST_PIPEDS_REQUEST_OPTIONS,
                ),
            ],
        ),
        table(
            LIST_PIPEDS_REQUEST_OPTIONS,
            vec![FieldSchema::message(list_pipeds_options::ENABLED, "enabled", BOOL_VALUE)],
        ),
        table(
            LIST_PIPEDS_RESPONSE,
            vec![FieldSchema::repeated_message(list_pipeds_response::PIPEDS, "pipeds", PIPED)],
        ),
        table(
            LIST_APPLICATIONS_REQUEST,
            vec![FieldSchema::message(
                list_applications_request::OPTIONS,
                "options",
                LIST_APPLICATIONS_REQUEST_OPTIONS,
            )],
        ),
        table(
            LIST_APPLICATIONS_REQUEST_OPTIONS,
            vec![
                FieldSchema::message(list_applications_options::ENABLED, "enabled", BOOL_VALUE),
                FieldSchema::repeated(list_applications_options::KINDS, "kinds", ScalarKind::Enum),
                FieldSchema::repeated(
                    list_applications_options::SYNC_STATUSES,
                    "sync_statuses",
                    ScalarKind::Enum,
                ),
                FieldSchema::scalar(list_applications_options::NAME, "name", ScalarKind::String),
                FieldSchema::map(list_applications_options::LABELS, "labels", ScalarKind::String),
                FieldSchema::scalar(
                    list_applications_options::PIPED_ID,
                    "piped_id",
                    ScalarKind::String,
                ),
            ],
        ),
        table(
            LIST_EVENTS_RESPONSE,
            vec![
                FieldSchema::repeated_message(list_events_response::EVENTS, "events", EVENT),
                FieldSchema::scalar(list_events_response::CURSOR, "cursor", ScalarKind::String),
            ],
        ),
    ]
}

/// Creates a piped registration request.
pub fn new_register_piped_request(
    registry: &SchemaRegistry,
    name: &str,
    desc: &str,
) -> CodecResult<Message> {
    let mut request = Message::for_type(registry, REGISTER_PIPED_REQUEST)?;
    request.set(register_piped_request::NAME, name)?;
    request.set(register_piped_request::DESC, desc)?;
    Ok(request)
}

pub fn new_update_piped_desired_version_request<I, S>(
    registry: &SchemaRegistry,
    version: &str,
    piped_ids: I,
) -> CodecResult<Message>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut request = Message::for_type(registry, UPDATE_PIPED_DESIRED_VERSION_REQUEST)?;
    request.set(update_piped_desired_version_request::VERSION, version)?;
    request.set_all(
        update_piped_desired_version_request::PIPED_IDS,
        piped_ids.into_iter().map(|id| Value::String(id.into())),
    )?;
    Ok(request)
}

/// Creates `ListPipedsRequest.Options`.
///
/// `enabled: Some(false)` is sent as a present wrapper holding `false`,
/// which the server reads differently from an absent filter.
pub fn new_list_pipeds_options(
    registry: &SchemaRegistry,
    enabled: Option<bool>,
) -> CodecResult<Message> {
    let mut options = Message::for_type(registry, LIST_PIPEDS_REQUEST_OPTIONS)?;
    if let Some(enabled) = enabled {
        options.set(list_pipeds_options::ENABLED, bool_value(registry, enabled)?)?;
    }
    Ok(options)
}

pub fn new_list_pipeds_request(
    registry: &SchemaRegistry,
    with_status: bool,
    options: Option<Message>,
) -> CodecResult<Message> {
    let mut request = Message::for_type(registry, LIST_PIPEDS_REQUEST)?;
    request.set(list_pipeds_request::WITH_STATUS, with_status)?;
    if let Some(options) = options {
        request.set(list_pipeds_request::OPTIONS, options)?;
    }
    Ok(request)
}

/// Filters for listing applications. Empty filters are left unset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplicationFilter {
    pub enabled: Option<bool>,
    pub kinds: Vec<i32>,
    pub sync_statuses: Vec<i32>,
    pub name: String,
    pub labels: Vec<(String, String)>,
    pub piped_id: String,
}

pub fn new_list_applications_options(
    registry: &SchemaRegistry,
    filter: &ApplicationFilter,
) -> CodecResult<Message> {
    let mut options = Message::for_type(registry, LIST_APPLICATIONS_REQUEST_OPTIONS)?;
    if let Some(enabled) = filter.enabled {
        options.set(list_applications_options::ENABLED, bool_value(registry, enabled)?)?;
    }
    options.set_all(
        list_applications_options::KINDS,
        filter.kinds.iter().copied().map(Value::Enum),
    )?;
    options.set_all(
        list_applications_options::SYNC_STATUSES,
        filter.sync_statuses.iter().copied().map(Value::Enum),
    )?;
    options.set(list_applications_options::NAME, filter.name.as_str())?;
    for (key, value) in &filter.labels {
        options.map_set(list_applications_options::LABELS, key.as_str(), value.as_str())?;
    }
    options.set(list_applications_options::PIPED_ID, filter.piped_id.as_str())?;
    Ok(options)
}

pub fn new_list_applications_request(
    registry: &SchemaRegistry,
    filter: &ApplicationFilter,
) -> CodecResult<Message> {
    let mut request = Message::for_type(registry, LIST_APPLICATIONS_REQUEST)?;
    request.set(
        list_applications_request::OPTIONS,
        new_list_applications_options(registry, filter)?,
    )?;
    Ok(request)
}
