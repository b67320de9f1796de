//! HTML fragments for project cards and the detail popup.

use crate::backend::{Project, ProjectId};

pub const CARD_CLASS: &str = "project-card";
pub const OVERLAY_CLASS: &str = "popup-overlay";
pub const POPUP_CLASS: &str = "popup-container";
pub const CLOSE_CLASS: &str = "close-popup";

const AVATAR_SRC: &str = "avatar.png";

/// Escape text for use in element content and quoted attributes.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Location of a project's cloned voice: `{asset_base}/{id}.wav`.
///
/// The output bucket names every render after its project id, so this must
/// stay in step with the job that writes it.
pub fn audio_source_url(asset_base: &str, id: &ProjectId) -> String {
    format!("{}/{}.wav", asset_base.trim_end_matches('/'), id)
}

/// Clickable card keyed by the project id.
pub fn render_card(project: &Project) -> String {
    let disabled = if project.id.is_sentinel() {
        r#" aria-disabled="true""#
    } else {
        ""
    };

    format!(
        r##"<a href="#" project_id="{id}" class="{CARD_CLASS}"{disabled}>
    <img src="{AVATAR_SRC}" alt="Project Avatar" class="avatar">
    <div class="card-content">
        <h3>{title}</h3>
        <p>Quality: {quality} | {created}</p>
    </div>
</a>"##,
        id = escape_html(project.id.as_str()),
        title = escape_html(&project.title),
        quality = escape_html(&project.quality),
        created = escape_html(&project.created_at_display()),
    )
}

/// Overlay plus modal with the full project record and its audio player.
pub fn render_detail_popup(project: &Project, asset_base: &str) -> String {
    format!(
        r#"<div class="{OVERLAY_CLASS}"></div>
<div class="{POPUP_CLASS}">
    <h2>{title}</h2>
    <p><b>Text:</b> {text}</p>
    <p><b>Quality:</b> {quality}</p>
    <p><b>Created at:</b> {created}</p>
    <p><b>Description:</b> {description}</p>
    <p><b>Uploaded audio files:</b> {file_count}</p>
    <p><b>Cloned voice:</b></p>
    <audio controls autoplay>
        <source src="{src}" type="audio/wav">
        Your browser does not support the audio element.
    </audio>
    <button class="{CLOSE_CLASS}">Close</button>
</div>"#,
        title = escape_html(&project.title),
        text = escape_html(&project.text),
        quality = escape_html(&project.quality),
        created = escape_html(&project.created_at_display()),
        description = escape_html(&project.description),
        file_count = project.audio_files.len(),
        src = escape_html(&audio_source_url(asset_base, &project.id)),
    )
}
