//! Member records
//!
//! A member is one documented option, property, method or object in the
//! reference, as delivered by the backend listing endpoints. Field names
//! follow the backend JSON spelling.

use serde::Deserialize;

/// Kind of a documented member.
///
/// The backend sends this as a lowercase string; anything outside the
/// known set lands in `Unknown` so a newer backend cannot break decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberKind {
    Option,
    Property,
    Method,
    Object,
    #[default]
    #[serde(other)]
    Unknown,
}

impl MemberKind {
    /// True for members rendered with a trailing call marker.
    pub fn is_method(self) -> bool {
        matches!(self, MemberKind::Method)
    }
}

/// One documented member.
///
/// `fullname` is the dotted global identifier (`chart.backgroundColor`),
/// `name` the locally-unique DOM-safe form, `parent` the wire name of the
/// owning member (empty for first-level members).
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Member {
    pub name: String,
    pub fullname: String,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: MemberKind,
    pub parent: String,
    #[serde(rename = "isParent")]
    pub is_parent: bool,
    #[serde(rename = "returnType")]
    pub return_type: Option<String>,
    pub defaults: Option<String>,
    pub description: Option<String>,
    pub demo: Option<String>,
    pub deprecated: bool,
    pub since: Option<String>,
    pub params: Option<String>,
    #[serde(rename = "paramsDescription")]
    pub params_description: Option<String>,
    #[serde(rename = "seeAlso")]
    pub see_also: Option<String>,
    pub context: Option<String>,
    /// Products this member is documented for; drives cross-product links.
    pub products: Option<Vec<String>>,
}

impl Member {
    /// True for the empty placeholder the registry hands out for names it
    /// has never seen.
    pub fn is_placeholder(&self) -> bool {
        self.fullname.is_empty()
    }

    /// Display name: the dotted identifier, with `()` appended for methods.
    ///
    /// Returns `None` for placeholder records so callers can skip title
    /// updates for members that never loaded.
    pub fn pretty_name(&self) -> Option<String> {
        if self.is_placeholder() {
            return None;
        }
        if self.kind.is_method() {
            Some(format!("{}()", self.fullname))
        } else {
            Some(self.fullname.clone())
        }
    }
}
