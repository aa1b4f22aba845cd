//! Controller tying API calls to renders.
//!
//! # Design
//! `RosterApp` owns the API and the [`Page`]. Every step is one request
//! followed by one synchronous render; the page is borrowed only after the
//! request resolves, so a step never holds the page across an await.
//!
//! Adding a player re-fetches and re-renders the whole roster. Removing a
//! player only detaches that player's card; the roster is not re-fetched.

use std::cell::{Ref, RefCell};

use crate::api::{PlayerApi, Transport};
use crate::dom::{Element, Page};
use crate::error::AppError;
use crate::render::{
    clear_form, render_new_player_form, render_player_details, render_roster, FormFields,
    ACTION_ATTR, ACTION_DETAILS, ACTION_REMOVE, CARD_CLASS, PLAYER_ID_ATTR,
};
use crate::types::{Player, PlayerId};

/// A click on one of a card's controls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    ShowDetails(PlayerId),
    Remove(PlayerId),
}

impl Action {
    /// Decodes `data-action` / `data-player-id` attribute values.
    pub fn parse(action: &str, player_id: &str) -> Option<Self> {
        let id: PlayerId = player_id.parse().ok()?;
        match action {
            ACTION_DETAILS => Some(Action::ShowDetails(id)),
            ACTION_REMOVE => Some(Action::Remove(id)),
            _ => None,
        }
    }

    pub fn from_element(element: &Element) -> Option<Self> {
        Self::parse(
            element.attribute(ACTION_ATTR)?,
            element.attribute(PLAYER_ID_ATTR)?,
        )
    }
}

pub struct RosterApp<T> {
    api: PlayerApi<T>,
    page: RefCell<Page>,
}

impl<T: Transport> RosterApp<T> {
    pub fn new(api: PlayerApi<T>, page: Page) -> Self {
        Self {
            api,
            page: RefCell::new(page),
        }
    }

    pub fn api(&self) -> &PlayerApi<T> {
        &self.api
    }

    pub fn page(&self) -> Ref<'_, Page> {
        self.page.borrow()
    }

    /// Fetches and renders the roster, then renders the form. The form is
    /// rendered even when the roster could not be loaded.
    pub async fn bootstrap(&self) -> Result<usize, AppError> {
        let roster = self.refresh().await;
        render_new_player_form(&mut self.page.borrow_mut().form);
        roster
    }

    /// Full re-fetch and re-render. Returns the number of cards shown.
    pub async fn refresh(&self) -> Result<usize, AppError> {
        let payload = self.api.list_players().await?;
        let count = render_roster(&mut self.page.borrow_mut().roster, &payload)?;
        Ok(count)
    }

    pub async fn dispatch(&self, action: Action) -> Result<(), AppError> {
        match action {
            Action::ShowDetails(id) => self.show_details(&id).await.map(|_| ()),
            Action::Remove(id) => self.remove(&id).await.map(|_| ()),
        }
    }

    /// Replaces the roster view with the player's current details.
    pub async fn show_details(&self, id: &PlayerId) -> Result<Player, AppError> {
        let player = self.api.get_player(id).await?;
        render_player_details(&mut self.page.borrow_mut().roster, &player);
        Ok(player)
    }

    /// Deletes the player and detaches its card. Returns how many card nodes
    /// were removed; zero if the card is no longer on screen.
    pub async fn remove(&self, id: &PlayerId) -> Result<usize, AppError> {
        self.api.delete_player(id).await?;
        let key = id.to_string();
        let removed = self.page.borrow_mut().roster.remove_where(|e| {
            e.has_class(CARD_CLASS) && e.attribute(PLAYER_ID_ATTR) == Some(key.as_str())
        });
        Ok(removed)
    }

    /// Copies live input values into the mounted form.
    pub fn fill_form(&self, fields: &FormFields) {
        fields.write(&mut self.page.borrow_mut().form);
    }

    /// Creates a player from the form; on success clears the inputs and
    /// re-renders the roster once.
    pub async fn submit(&self) -> Result<Player, AppError> {
        let fields = FormFields::read(&self.page.borrow().form).ok_or(AppError::FormMissing)?;
        let player = self.api.create_player(&fields.to_draft()).await?;
        clear_form(&mut self.page.borrow_mut().form);
        self.refresh().await?;
        Ok(player)
    }
}
