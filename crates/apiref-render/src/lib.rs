//! apiref Render - Detail-pane fragments
//!
//! Turns member records into the hidden detail sections and member
//! fragments of the details pane, with the escaping and return-type
//! linkification the reference pages need.

mod escape;
mod section;

pub use escape::{escape_html, linkify_types, wrappable_title};
pub use section::{
    display_default, render_object_member, render_object_section, render_option_member,
    render_option_section, value_class,
};

/// Rendering context, owned by the session.
#[derive(Debug, Clone)]
pub struct RenderContext {
    /// Path between the domain and the member, e.g. `highcharts/`.
    pub base_path: String,
    /// Whether a structured history backend is available; without one,
    /// generated type links fall back to `#` fragments.
    pub history_enabled: bool,
    /// Class names rewritten into reference links inside return types.
    pub linkable_types: Vec<String>,
}

impl RenderContext {
    /// Menu and title link target for a dotted member name.
    pub fn member_href(&self, dotted: &str) -> String {
        format!("/{}{}", self.base_path, dotted)
    }

    /// Link prefix for return-type linkification.
    pub fn type_link_prefix(&self) -> String {
        if self.history_enabled {
            format!("/{}", self.base_path)
        } else {
            "#".to_string()
        }
    }
}
