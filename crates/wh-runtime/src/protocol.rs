//! The JSON wire protocol, as typed envelopes.
//!
//! Command decoding is a plain tagged-union deserialization — the command
//! name selects the variant, the `parameters` object carries the payload.
//! No runtime type discovery, no partial decoding: a JSON document either
//! is a known command or it is an error the transport drops and logs.
//!
//! Client → server: `{"type": <name>, "parameters": {…}}`
//! Server → client: `{"id": <uuid>, "command": <name>, "parameters": {…}}`

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use wh_core::Vec3;
use wh_world::EntityDelta;

// ── Client → server ───────────────────────────────────────────────────────────

/// Every command a viewer may send, keyed by its `type` field.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(tag = "type", content = "parameters")]
pub enum ClientCommand {
    /// Spawn a truck carrying `amount` cargo units and have robots unload
    /// it into storage.
    ReceiveShipmentCommand { amount: u32 },
    /// Spawn an empty truck and have robots load `amount` cargo units from
    /// storage into it.
    SendShipmentCommand { amount: u32 },
    /// Send any idle robot to `target` via pathfinding.
    TestCommand { target: Vec3 },
}

/// Decode one client command from its JSON envelope.
pub fn decode(json: &str) -> Result<ClientCommand, serde_json::Error> {
    serde_json::from_str(json)
}

// ── Server → client ───────────────────────────────────────────────────────────

/// Entity pose update, emitted once per tick per dirty entity.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct UpdateModel3D {
    pub guid: Uuid,
    #[serde(rename = "Type")]
    pub kind: &'static str,
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub rotation_x: f32,
    pub rotation_y: f32,
    pub rotation_z: f32,
    /// Truck door state; omitted for entities without a door.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub door_open: Option<bool>,
}

/// Entity removal, emitted once; the entity is gone afterwards.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct DiscardModel3D {
    pub guid: Uuid,
}

/// Payload of a server→client envelope.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ServerCommand {
    UpdateModel3D(UpdateModel3D),
    DiscardModel3D(DiscardModel3D),
}

/// The full server→client envelope.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ServerEnvelope {
    pub id: Uuid,
    pub command: &'static str,
    pub parameters: ServerCommand,
}

impl ServerEnvelope {
    /// Wrap a world delta for the wire.
    pub fn from_delta(delta: &EntityDelta) -> Self {
        match delta {
            EntityDelta::Update { guid, kind, position, rotation, door_open } => Self {
                id: Uuid::new_v4(),
                command: "UpdateModel3DCommand",
                parameters: ServerCommand::UpdateModel3D(UpdateModel3D {
                    guid: *guid,
                    kind: kind.as_str(),
                    x: position.x,
                    y: position.y,
                    z: position.z,
                    rotation_x: rotation.x,
                    rotation_y: rotation.y,
                    rotation_z: rotation.z,
                    door_open: *door_open,
                }),
            },
            EntityDelta::Discard { guid } => Self {
                id: Uuid::new_v4(),
                command: "DiscardModel3DCommand",
                parameters: ServerCommand::DiscardModel3D(DiscardModel3D { guid: *guid }),
            },
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
