//! Rendered listing state: the card container and the popup slot.

use crate::backend::{Project, ProjectId};

use super::markup::{self, CLOSE_CLASS, OVERLAY_CLASS};

/// Element that dismisses the popup when clicked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DismissTarget {
    Overlay,
    CloseButton,
}

impl DismissTarget {
    /// Map a clicked element's class to a dismiss target.
    pub fn from_class(class: &str) -> Option<Self> {
        match class {
            OVERLAY_CLASS => Some(DismissTarget::Overlay),
            CLOSE_CLASS => Some(DismissTarget::CloseButton),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
struct Card {
    id: ProjectId,
    markup: String,
}

/// The open detail popup.
#[derive(Debug, Clone)]
pub struct Popup {
    pub project_id: ProjectId,
    pub markup: String,
}

/// Listing page view.
///
/// Holds at most one popup; opening another replaces it.
#[derive(Debug, Clone)]
pub struct ProjectView {
    asset_base: String,
    cards: Vec<Card>,
    popup: Option<Popup>,
}

impl ProjectView {
    pub fn new(asset_base: impl Into<String>) -> Self {
        Self {
            asset_base: asset_base.into(),
            cards: Vec::new(),
            popup: None,
        }
    }

    /// Replace the card container contents with one card per project.
    pub fn show_projects(&mut self, projects: &[Project]) {
        self.cards = projects
            .iter()
            .map(|project| Card {
                id: project.id.clone(),
                markup: markup::render_card(project),
            })
            .collect();
    }

    pub fn card_count(&self) -> usize {
        self.cards.len()
    }

    /// Identity markers of the rendered cards, in display order.
    pub fn card_markers(&self) -> impl Iterator<Item = &ProjectId> {
        self.cards.iter().map(|card| &card.id)
    }

    pub fn open_popup(&mut self, project: &Project) {
        self.popup = Some(Popup {
            project_id: project.id.clone(),
            markup: markup::render_detail_popup(project, &self.asset_base),
        });
    }

    pub fn popup(&self) -> Option<&Popup> {
        self.popup.as_ref()
    }

    /// Remove the popup and its overlay. Returns whether one was open.
    pub fn dismiss_popup(&mut self, target: DismissTarget) -> bool {
        tracing::debug!(?target, "dismissing popup");
        self.popup.take().is_some()
    }

    /// Current markup: the project container followed by any open popup.
    pub fn to_html(&self) -> String {
        let mut html = String::from("<div id=\"projectsContainer\">\n");
        for card in &self.cards {
            html.push_str(&card.markup);
            html.push('\n');
        }
        html.push_str("</div>\n");

        if let Some(popup) = &self.popup {
            html.push_str(&popup.markup);
            html.push('\n');
        }
        html
    }
}
