//! Browser host for `roster-core`.
//!
//! # Overview
//! Locates the two mount points on the page, runs the controller with a
//! `fetch`-backed transport, and writes each virtual mount into its real
//! container whenever the mount changed.
//!
//! # Design
//! - One click listener on the roster container dispatches on the clicked
//!   button's `data-action` / `data-player-id`; cards need no per-render
//!   listeners.
//! - One submit listener on the form container copies the live input values
//!   into the virtual form before submitting.
//! - Each event spawns a single sequential task: one request, one render,
//!   one sync. Failures are already logged by the core and leave the page as
//!   it was.
//! - A successful remove detaches only that card's node from the real
//!   container; the other cards keep their nodes.

pub mod transport;

use std::cell::Cell;
use std::rc::Rc;

use roster_core::render::{
    ACTION_ATTR, AGE_INPUT, BREED_INPUT, CARD_CLASS, NAME_INPUT, PLAYER_ID_ATTR,
};
use roster_core::{
    Action, ClientConfig, FormFields, Page, PlayerApi, PlayerClient, PlayerId, RosterApp,
};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, Element, Event, HtmlInputElement};

use transport::FetchTransport;

/// Last mount revisions written to the real page.
#[derive(Debug, Default)]
pub struct SyncState {
    roster: Cell<u64>,
    form: Cell<u64>,
}

/// Which containers need rewriting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stale {
    pub roster: bool,
    pub form: bool,
}

impl SyncState {
    /// Reports which mounts changed since the last call and records the
    /// current revisions.
    pub fn take(&self, page: &Page) -> Stale {
        let stale = Stale {
            roster: page.roster.revision() != self.roster.get(),
            form: page.form.revision() != self.form.get(),
        };
        self.roster.set(page.roster.revision());
        self.form.set(page.form.revision());
        stale
    }

    /// Records a detach of `removed` roster nodes as already mirrored, when
    /// the real roster matched the mount right before it. Returns false when
    /// the container has to be rewritten instead.
    pub fn absorb_detach(&self, page: &Page, removed: usize) -> bool {
        let revision = page.roster.revision();
        if removed == 0 || self.roster.get() + 1 != revision {
            return false;
        }
        self.roster.set(revision);
        true
    }
}

struct Host {
    app: RosterApp<FetchTransport>,
    roster: Element,
    form: Element,
    synced: SyncState,
}

impl Host {
    async fn run(&self, action: Action) {
        match action {
            Action::ShowDetails(id) => {
                if let Err(e) = self.app.show_details(&id).await {
                    log::warn!("details not shown: {e}");
                }
            }
            Action::Remove(id) => match self.app.remove(&id).await {
                Ok(removed) => {
                    if self.synced.absorb_detach(&self.app.page(), removed) {
                        self.detach_card(&id);
                    }
                }
                Err(e) => log::warn!("player not removed: {e}"),
            },
        }
    }

    fn detach_card(&self, id: &PlayerId) {
        let key = id.key();
        let cards = self.roster.children();
        for index in (0..cards.length()).rev() {
            let Some(card) = cards.item(index) else {
                continue;
            };
            let is_card = card.matches(&format!(".{CARD_CLASS}")).unwrap_or(false);
            if is_card && card.get_attribute(PLAYER_ID_ATTR).as_deref() == Some(&*key) {
                card.remove();
            }
        }
    }

    fn sync(&self) {
        let page = self.app.page();
        let stale = self.synced.take(&page);
        if stale.roster {
            self.roster.set_inner_html(&page.roster.inner_html());
        }
        if stale.form {
            self.form.set_inner_html(&page.form.inner_html());
        }
    }

    fn read_inputs(&self) -> FormFields {
        FormFields {
            name: input_value(&self.form, NAME_INPUT),
            age: input_value(&self.form, AGE_INPUT),
            breed: input_value(&self.form, BREED_INPUT),
        }
    }
}

fn input_value(container: &Element, id: &str) -> String {
    container
        .query_selector(&format!("#{id}"))
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
        .map(|input| input.value())
        .unwrap_or_default()
}

fn mount_point(document: &Document, id: &str) -> Result<Element, JsValue> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("missing mount point #{id}")))
}

/// The action of the button the click landed on, if any.
fn clicked_action(event: &Event) -> Option<Action> {
    let target = event.target()?.dyn_into::<Element>().ok()?;
    let button = target.closest(&format!("[{ACTION_ATTR}]")).ok()??;
    Action::parse(
        &button.get_attribute(ACTION_ATTR)?,
        &button.get_attribute(PLAYER_ID_ATTR)?,
    )
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    wasm_logger::init(wasm_logger::Config::default());

    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let page = Page::default();
    let roster = mount_point(&document, page.roster.id())?;
    let form = mount_point(&document, page.form.id())?;

    let config = ClientConfig::default();
    log::info!("roster client for {}", config.base_url());
    let api = PlayerApi::new(PlayerClient::from_config(&config), FetchTransport);
    let host = Rc::new(Host {
        app: RosterApp::new(api, page),
        roster,
        form,
        synced: SyncState::default(),
    });

    let on_click = {
        let host = Rc::clone(&host);
        Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            let Some(action) = clicked_action(&event) else {
                return;
            };
            let host = Rc::clone(&host);
            spawn_local(async move {
                host.run(action).await;
                host.sync();
            });
        })
    };
    host.roster
        .add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
    on_click.forget();

    let on_submit = {
        let host = Rc::clone(&host);
        Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            event.prevent_default();
            host.app.fill_form(&host.read_inputs());
            let host = Rc::clone(&host);
            spawn_local(async move {
                if let Err(e) = host.app.submit().await {
                    log::warn!("player not added: {e}");
                }
                host.sync();
            });
        })
    };
    host.form
        .add_event_listener_with_callback("submit", on_submit.as_ref().unchecked_ref())?;
    on_submit.forget();

    spawn_local(async move {
        if let Err(e) = host.app.bootstrap().await {
            log::warn!("roster not loaded: {e}");
        }
        host.sync();
    });

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use roster_core::render::{render_new_player_form, render_players};
    use roster_core::Player;

    fn player(id: i64, name: &str) -> Player {
        Player {
            id: PlayerId::Number(id),
            name: name.to_string(),
            age: Some(1),
            breed: "Pug".to_string(),
        }
    }

    fn detach(page: &mut Page, id: &str) -> usize {
        page.roster
            .remove_where(|e| e.has_class(CARD_CLASS) && e.attribute(PLAYER_ID_ATTR) == Some(id))
    }

    #[test]
    fn sync_state_reports_each_change_once() {
        let mut page = Page::default();
        let synced = SyncState::default();
        assert_eq!(synced.take(&page), Stale { roster: false, form: false });

        render_new_player_form(&mut page.form);
        assert_eq!(synced.take(&page), Stale { roster: false, form: true });
        assert_eq!(synced.take(&page), Stale { roster: false, form: false });

        render_players(&mut page.roster, &[]);
        render_new_player_form(&mut page.form);
        assert_eq!(synced.take(&page), Stale { roster: true, form: true });
    }

    #[test]
    fn single_detach_is_mirrored_without_a_rewrite() {
        let mut page = Page::default();
        let synced = SyncState::default();
        render_players(&mut page.roster, &[player(1, "Rex"), player(2, "Bella")]);
        synced.take(&page);

        let removed = detach(&mut page, "1");
        assert!(synced.absorb_detach(&page, removed));
        assert_eq!(synced.take(&page), Stale { roster: false, form: false });
    }

    #[test]
    fn detach_on_a_stale_roster_falls_back_to_a_rewrite() {
        let mut page = Page::default();
        let synced = SyncState::default();
        render_players(&mut page.roster, &[player(1, "Rex"), player(2, "Bella")]);

        let removed = detach(&mut page, "1");
        assert!(!synced.absorb_detach(&page, removed));
        assert!(synced.take(&page).roster);

        let removed = detach(&mut page, "9");
        assert!(!synced.absorb_detach(&page, removed));
    }
}
