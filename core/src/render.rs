//! Renderers: roster cards, player details, and the new-player form.
//!
//! Every renderer replaces the whole content of its mount in one step. The
//! roster cards carry `data-action` and `data-player-id` on their buttons so
//! a single listener on the container can dispatch clicks (see
//! [`Action::from_element`](crate::app::Action::from_element)).

use log::{error, warn};

use serde::Deserialize;

use crate::dom::{Element, Mount};
use crate::error::RenderError;
use crate::types::{Player, PlayerDraft, RosterPayload};

pub const CARD_CLASS: &str = "player-card";
pub const DETAILS_CLASS: &str = "player-details";
pub const DETAILS_BUTTON_CLASS: &str = "details-btn";
pub const REMOVE_BUTTON_CLASS: &str = "remove-btn";
pub const FORM_ID: &str = "add-player-form";

pub const ACTION_ATTR: &str = "data-action";
pub const PLAYER_ID_ATTR: &str = "data-player-id";
pub const ACTION_DETAILS: &str = "details";
pub const ACTION_REMOVE: &str = "remove";

/// Input ids of the new-player form.
pub const NAME_INPUT: &str = "name";
pub const AGE_INPUT: &str = "age";
pub const BREED_INPUT: &str = "breed";

/// Validates the payload and renders it. On error the mount is untouched.
pub fn render_roster(mount: &mut Mount, payload: &RosterPayload) -> Result<usize, RenderError> {
    let players = match roster_players(payload) {
        Ok(players) => players,
        Err(e) => {
            error!("trouble rendering players: {e}");
            return Err(e);
        }
    };
    Ok(render_players(mount, &players))
}

/// Checks that the payload is a list and decodes each entry. Entries with
/// missing display fields still decode; entries without an id cannot carry
/// controls and are skipped with a warning.
pub fn roster_players(payload: &RosterPayload) -> Result<Vec<Player>, RenderError> {
    let items = match &payload.0 {
        serde_json::Value::Array(items) => items,
        other => return Err(RenderError::NotASequence(json_kind(other))),
    };
    let players = items
        .iter()
        .enumerate()
        .filter_map(|(index, item)| match Player::deserialize(item) {
            Ok(player) => Some(player),
            Err(e) => {
                warn!("skipping roster entry {index}: {e}");
                None
            }
        })
        .collect();
    Ok(players)
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

/// One card per player, replacing whatever the mount showed before.
/// Returns the number of cards rendered.
pub fn render_players(mount: &mut Mount, players: &[Player]) -> usize {
    let cards: Vec<Element> = players.iter().map(player_card).collect();
    let count = cards.len();
    mount.replace_children(cards);
    count
}

fn player_card(player: &Player) -> Element {
    let id = player.id.to_string();
    Element::new("div")
        .class(CARD_CLASS)
        .attr(PLAYER_ID_ATTR, id.clone())
        .child(Element::new("h3").text(player.name.clone()))
        .child(Element::new("p").text(format!("Age: {}", player.age_label())))
        .child(Element::new("p").text(format!("Breed: {}", player.breed)))
        .child(
            Element::new("button")
                .class(DETAILS_BUTTON_CLASS)
                .attr(ACTION_ATTR, ACTION_DETAILS)
                .attr(PLAYER_ID_ATTR, id.clone())
                .text("See Details"),
        )
        .child(
            Element::new("button")
                .class(REMOVE_BUTTON_CLASS)
                .attr(ACTION_ATTR, ACTION_REMOVE)
                .attr(PLAYER_ID_ATTR, id)
                .text("Remove from Roster"),
        )
}

/// Replaces the roster view with a single player's details. There is no way
/// back other than a fresh roster render.
pub fn render_player_details(mount: &mut Mount, player: &Player) {
    let details = Element::new("div")
        .class(DETAILS_CLASS)
        .attr(PLAYER_ID_ATTR, player.id.to_string())
        .child(Element::new("h3").text(player.name.clone()))
        .child(Element::new("p").text(format!("Age: {}", player.age_label())))
        .child(Element::new("p").text(format!("Breed: {}", player.breed)));
    mount.replace_children(vec![details]);
}

pub fn render_new_player_form(mount: &mut Mount) {
    let form = Element::new("form")
        .attr("id", FORM_ID)
        .child(Element::new("h2").text("Add New Player"))
        .child(form_field(NAME_INPUT, "Name:", "text"))
        .child(form_field(AGE_INPUT, "Age:", "number"))
        .child(form_field(BREED_INPUT, "Breed:", "text"))
        .child(Element::new("button").attr("type", "submit").text("Add Player"));
    mount.replace_children(vec![form]);
}

fn form_field(id: &str, label: &str, kind: &str) -> Element {
    Element::new("div")
        .child(Element::new("label").attr("for", id).text(label))
        .child(
            Element::new("input")
                .attr("type", kind)
                .attr("id", id)
                .attr("name", id)
                .flag("required"),
        )
}

/// Raw values of the three form inputs at submission time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFields {
    pub name: String,
    pub age: String,
    pub breed: String,
}

impl FormFields {
    /// `None` when the form has not been rendered into `mount`.
    pub fn read(mount: &Mount) -> Option<Self> {
        Some(Self {
            name: mount.input_value(NAME_INPUT)?.to_string(),
            age: mount.input_value(AGE_INPUT)?.to_string(),
            breed: mount.input_value(BREED_INPUT)?.to_string(),
        })
    }

    /// Copies the values into the rendered inputs.
    pub fn write(&self, mount: &mut Mount) {
        mount.set_input_value(NAME_INPUT, &self.name);
        mount.set_input_value(AGE_INPUT, &self.age);
        mount.set_input_value(BREED_INPUT, &self.breed);
    }

    pub fn to_draft(&self) -> PlayerDraft {
        PlayerDraft::from_fields(&self.name, &self.age, &self.breed)
    }
}

pub fn clear_form(mount: &mut Mount) {
    FormFields::default().write(mount);
}
