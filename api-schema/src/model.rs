//! Shared model types and well-known wrappers.

use schema::{FieldSchema, MessageSchema, ScalarKind};

use crate::{
    APPLICATION_GIT_REPOSITORY, BOOL_VALUE, EVENT, INT64_VALUE, PIPED, PIPED_CLOUD_PROVIDER,
    PIPED_KEY, PIPED_SECRET_ENCRYPTION, STRING_VALUE,
};

/// Field numbers shared by the `google.protobuf.*Value` wrappers.
pub mod wrappers {
    use schema::FieldNumber;

    pub const VALUE: FieldNumber = 1;
}

pub mod application_git_repository {
    use schema::FieldNumber;

    pub const ID: FieldNumber = 1;
    pub const REMOTE: FieldNumber = 2;
    pub const BRANCH: FieldNumber = 3;
}

pub mod piped_key {
    use schema::FieldNumber;

    pub const HASH: FieldNumber = 1;
    pub const CREATOR: FieldNumber = 2;
    pub const CREATED_AT: FieldNumber = 10;
}

pub mod piped {
    use schema::FieldNumber;

    pub const ID: FieldNumber = 1;
    pub const NAME: FieldNumber = 2;
    pub const DESC: FieldNumber = 3;
    pub const KEY_HASH: FieldNumber = 4;
    pub const PROJECT_ID: FieldNumber = 5;
    pub const VERSION: FieldNumber = 7;
    pub const STARTED_AT: FieldNumber = 8;
    pub const CLOUD_PROVIDERS: FieldNumber = 9;
    pub const REPOSITORIES: FieldNumber = 10;
    pub const STATUS: FieldNumber = 11;
    pub const CONFIG: FieldNumber = 12;
    pub const DISABLED: FieldNumber = 13;
    pub const CREATED_AT: FieldNumber = 14;
    pub const UPDATED_AT: FieldNumber = 15;
    pub const KEYS: FieldNumber = 20;
    pub const SECRET_ENCRYPTION: FieldNumber = 21;
    pub const DESIRED_VERSION: FieldNumber = 30;

    pub mod cloud_provider {
        use schema::FieldNumber;

        pub const NAME: FieldNumber = 1;
        pub const TYPE: FieldNumber = 2;
    }

    pub mod secret_encryption {
        use schema::FieldNumber;

        pub const TYPE: FieldNumber = 1;
        pub const PUBLIC_KEY: FieldNumber = 2;
        pub const ENCRYPT_SERVICE_ACCOUNT: FieldNumber = 3;
    }
}

pub mod event {
    use schema::FieldNumber;

    pub const ID: FieldNumber = 1;
    pub const NAME: FieldNumber = 2;
    pub const DATA: FieldNumber = 3;
    pub const PROJECT_ID: FieldNumber = 4;
    pub const LABELS: FieldNumber = 5;
    pub const EVENT_KEY: FieldNumber = 6;
    pub const STATUS: FieldNumber = 8;
    pub const STATUS_DESCRIPTION: FieldNumber = 9;
    pub const HANDLED_AT: FieldNumber = 13;
    pub const CREATED_AT: FieldNumber = 14;
    pub const UPDATED_AT: FieldNumber = 15;
}

fn wrapper(type_name: &str, kind: ScalarKind) -> MessageSchema {
    MessageSchema::builder(type_name)
        .field(FieldSchema::scalar(wrappers::VALUE, "value", kind))
        .build()
        .expect("wrapper schema must be valid")
}

pub(crate) fn schemas() -> Vec<MessageSchema> {
    let repository = MessageSchema::builder(APPLICATION_GIT_REPOSITORY)
        .field(FieldSchema::scalar(application_git_repository::ID, "id", ScalarKind::String))
        .field(FieldSchema::scalar(
            application_git_repository::REMOTE,
            "remote",
            ScalarKind::String,
        ))
        .field(FieldSchema::scalar(
            application_git_repository::BRANCH,
            "branch",
            ScalarKind::String,
        ))
        .build()
        .expect("git repository schema must be valid");

    let piped_key = MessageSchema::builder(PIPED_KEY)
        .field(FieldSchema::scalar(piped_key::HASH, "hash", ScalarKind::String))
        .field(FieldSchema::scalar(piped_key::CREATOR, "creator", ScalarKind::String))
        .field(FieldSchema::scalar(piped_key::CREATED_AT, "created_at", ScalarKind::Int64))
        .build()
        .expect("piped key schema must be valid");

    let cloud_provider = MessageSchema::builder(PIPED_CLOUD_PROVIDER)
        .field(FieldSchema::scalar(piped::cloud_provider::NAME, "name", ScalarKind::String))
        .field(FieldSchema::scalar(piped::cloud_provider::TYPE, "type", ScalarKind::String))
        .build()
        .expect("cloud provider schema must be valid");

    let secret_encryption = MessageSchema::builder(PIPED_SECRET_ENCRYPTION)
        .field(FieldSchema::scalar(piped::secret_encryption::TYPE, "type", ScalarKind::String))
        .field(FieldSchema::scalar(
            piped::secret_encryption::PUBLIC_KEY,
            "public_key",
            ScalarKind::String,
        ))
        .field(FieldSchema::scalar(
            piped::secret_encryption::ENCRYPT_SERVICE_ACCOUNT,
            "encrypt_service_account",
            ScalarKind::String,
        ))
        .build()
        .expect("secret encryption schema must be valid");

    let piped = MessageSchema::builder(PIPED)
        .field(FieldSchema::scalar(piped::ID, "id", ScalarKind::String))
        .field(FieldSchema::scalar(piped::NAME, "name", ScalarKind::String))
        .field(FieldSchema::scalar(piped::DESC, "desc", ScalarKind::String))
        .field(FieldSchema::scalar(piped::KEY_HASH, "key_hash", ScalarKind::String))
        .field(FieldSchema::scalar(piped::PROJECT_ID, "project_id", ScalarKind::String))
        .field(FieldSchema::scalar(piped::VERSION, "version", ScalarKind::String))
        .field(FieldSchema::scalar(piped::STARTED_AT, "started_at", ScalarKind::Int64))
        .field(FieldSchema::repeated_message(
            piped::CLOUD_PROVIDERS,
            "cloud_providers",
            PIPED_CLOUD_PROVIDER,
        ))
        .field(FieldSchema::repeated_message(
            piped::REPOSITORIES,
            "repositories",
            APPLICATION_GIT_REPOSITORY,
        ))
        .field(FieldSchema::scalar(piped::STATUS, "status", ScalarKind::Enum))
        .field(FieldSchema::scalar(piped::CONFIG, "config", ScalarKind::String))
        .field(FieldSchema::scalar(piped::DISABLED, "disabled", ScalarKind::Bool))
        .field(FieldSchema::scalar(piped::CREATED_AT, "created_at", ScalarKind::Int64))
        .field(FieldSchema::scalar(piped::UPDATED_AT, "updated_at", ScalarKind::Int64))
        .field(FieldSchema::repeated_message(piped::KEYS, "keys", PIPED_KEY))
        .field(FieldSchema::message(
            piped::SECRET_ENCRYPTION,
            "secret_encryption",
            PIPED_SECRET_ENCRYPTION,
        ))
        .field(FieldSchema::scalar(
            piped::DESIRED_VERSION,
            "desired_version",
            ScalarKind::String,
        ))
        .build()
        .expect("piped schema must be valid");

    let event = MessageSchema::builder(EVENT)
        .field(FieldSchema::scalar(event::ID, "id", ScalarKind::String))
        .field(FieldSchema::scalar(event::NAME, "name", ScalarKind::String))
        .field(FieldSchema::scalar(event::DATA, "data", ScalarKind::String))
        .field(FieldSchema::scalar(event::PROJECT_ID, "project_id", ScalarKind::String))
        .field(FieldSchema::map(event::LABELS, "labels", ScalarKind::String))
        .field(FieldSchema::scalar(event::EVENT_KEY, "event_key", ScalarKind::String))
        .field(FieldSchema::scalar(event::STATUS, "status", ScalarKind::Enum))
        .field(FieldSchema::scalar(
            event::STATUS_DESCRIPTION,
            "status_description",
            ScalarKind::String,
        ))
        .field(FieldSchema::scalar(event::HANDLED_AT, "handled_at", ScalarKind::Int64))
        .field(FieldSchema::scalar(event::CREATED_AT, "created_at", ScalarKind::Int64))
        .field(FieldSchema::scalar(event::UPDATED_AT, "updated_at", ScalarKind::Int64))
        .build()
        .expect("event schema must be valid");

    vec![
        wrapper(BOOL_VALUE, ScalarKind::Bool),
        wrapper(STRING_VALUE, ScalarKind::String),
        wrapper(INT64_VALUE, ScalarKind::Int64),
        repository,
        piped_key,
        cloud_provider,
        secret_encryption,
        piped,
        event,
    ]
}
