//! Page bootstrapper: wires the behavior for the injected route.

use tracing::{debug, info, warn};

use crate::backend::{ProjectId, ProjectService};
use crate::form::{FormController, SubmitOutcome};
use crate::notify::Notifier;
use crate::render::ProjectView;

use super::Route;

/// Shown for any listing or detail fetch failure.
pub const FETCH_ERROR_MESSAGE: &str = "Error fetching data";

/// State of the loaded page.
pub enum Page {
    Listing(ProjectView),
    Create(FormController),
    Inert,
}

/// Result of a click on a card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Placeholder card; no request was made.
    Ignored,
    /// Detail fetched and the popup is open.
    PopupOpened(ProjectId),
    /// Detail fetch failed; the user was notified.
    Failed,
}

/// Owns the collaborators every page behavior needs.
pub struct Bootstrapper<S: ProjectService, N: Notifier> {
    service: S,
    notifier: N,
    asset_base: String,
}

impl<S: ProjectService, N: Notifier> Bootstrapper<S, N> {
    pub fn new(service: S, notifier: N, asset_base: impl Into<String>) -> Self {
        Self {
            service,
            notifier,
            asset_base: asset_base.into(),
        }
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    /// A listing view with no cards and no popup.
    pub fn empty_view(&self) -> ProjectView {
        ProjectView::new(self.asset_base.clone())
    }

    /// Initial load for `route`.
    pub fn load(&self, route: &Route) -> Page {
        info!(%route, "loading page");
        match route {
            Route::Listing => {
                let mut view = self.empty_view();
                self.refresh_listing(&mut view);
                Page::Listing(view)
            }
            Route::Create => Page::Create(FormController::for_project_form()),
            Route::Unknown(_) => Page::Inert,
        }
    }

    /// Fetch the project list and re-render the cards.
    ///
    /// On failure the user is notified and the container is left as is.
    pub fn refresh_listing(&self, view: &mut ProjectView) -> bool {
        match self.service.list_projects() {
            Ok(projects) => {
                debug!(count = projects.len(), "rendering project cards");
                view.show_projects(&projects);
                true
            }
            Err(e) => {
                warn!(error = %e, "failed to fetch projects");
                self.notifier.alert(FETCH_ERROR_MESSAGE);
                false
            }
        }
    }

    /// Delegated click handler for the project container.
    ///
    /// Each click on a real card is a fresh round trip; whichever detail
    /// completes last owns the popup.
    pub fn handle_card_click(&self, view: &mut ProjectView, marker: &str) -> ClickOutcome {
        let id = ProjectId::new(marker);
        if id.is_sentinel() {
            debug!("click on placeholder card ignored");
            return ClickOutcome::Ignored;
        }

        match self.service.get_project(&id) {
            Ok(project) => {
                view.open_popup(&project);
                ClickOutcome::PopupOpened(id)
            }
            Err(e) => {
                warn!(%id, error = %e, "failed to fetch project details");
                self.notifier.alert(FETCH_ERROR_MESSAGE);
                ClickOutcome::Failed
            }
        }
    }

    /// Submit handler for the create form.
    pub fn submit(&self, form: &FormController) -> SubmitOutcome {
        form.submit(&self.service, &self.notifier)
    }
}
