//! Markup rendering for the project listing and detail popup.

mod markup;
mod view;

pub use markup::{
    CARD_CLASS, CLOSE_CLASS, OVERLAY_CLASS, POPUP_CLASS, audio_source_url, escape_html,
    render_card, render_detail_popup,
};
pub use view::{DismissTarget, Popup, ProjectView};
