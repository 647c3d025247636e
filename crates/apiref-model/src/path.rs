//! Identifier encoding
//!
//! Members are addressed in three forms:
//!
//! - dotted: `series<line>.marker.radius` - the global identifier shown to
//!   users and carried in URLs,
//! - wire: `series<line>-marker-radius` - what the backend `name` and
//!   `parent` fields carry; one or two consecutive hyphens both separate
//!   segments,
//! - slug: `series--line-marker-radius` - the DOM-safe form used for
//!   element ids; its alphabet is `[A-Za-z0-9_-]` only.
//!
//! A typed variant (`series<line>`) is a segment carrying a type
//! parameter. For navigation it counts as two expansion levels: the shared
//! parent (`series`) and the variant itself.

use std::fmt;

/// Which listing namespace a member belongs to.
///
/// Object members (uppercase first letter, e.g. `Chart`) live under the
/// `object/` endpoints and get an `object-` prefix on their element ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Namespace {
    Option,
    Object,
}

/// One path segment, optionally carrying a type parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathSegment {
    pub name: String,
    pub variant: Option<String>,
}

impl PathSegment {
    fn parse(raw: &str) -> Self {
        match raw.split_once('<') {
            Some((name, rest)) => Self {
                name: name.to_string(),
                variant: Some(rest.trim_end_matches('>').to_string()),
            },
            None => Self {
                name: raw.to_string(),
                variant: None,
            },
        }
    }

    fn dotted(&self) -> String {
        match &self.variant {
            Some(variant) => format!("{}<{}>", self.name, variant),
            None => self.name.clone(),
        }
    }

    fn slug(&self) -> String {
        match &self.variant {
            Some(variant) => format!("{}--{}", self.name, variant),
            None => self.name.clone(),
        }
    }
}

/// A parsed member identifier.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MemberPath {
    segments: Vec<PathSegment>,
}

impl MemberPath {
    /// Parse the dotted form, e.g. `series<line>.marker.radius`.
    pub fn parse_dotted(dotted: &str) -> Self {
        let segments = dotted
            .split('.')
            .filter(|part| !part.is_empty())
            .map(PathSegment::parse)
            .collect();
        Self { segments }
    }

    /// Parse the wire form, e.g. `series<line>-marker` or `chart--events`.
    ///
    /// Hyphens inside a `<...>` type parameter never separate segments.
    pub fn parse_wire(wire: &str) -> Self {
        let mut segments = Vec::new();
        let mut current = String::new();
        let mut in_brackets = false;
        for ch in wire.chars() {
            match ch {
                '<' => {
                    in_brackets = true;
                    current.push(ch);
                }
                '>' => {
                    in_brackets = false;
                    current.push(ch);
                }
                '-' if !in_brackets => {
                    if !current.is_empty() {
                        segments.push(PathSegment::parse(&current));
                        current.clear();
                    }
                }
                _ => current.push(ch),
            }
        }
        if !current.is_empty() {
            segments.push(PathSegment::parse(&current));
        }
        Self { segments }
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// Dotted form, the global identifier.
    pub fn dotted(&self) -> String {
        self.segments
            .iter()
            .map(PathSegment::dotted)
            .collect::<Vec<_>>()
            .join(".")
    }

    /// Canonical wire form, used for child-listing endpoints.
    pub fn wire(&self) -> String {
        self.segments
            .iter()
            .map(PathSegment::dotted)
            .collect::<Vec<_>>()
            .join("-")
    }

    /// DOM-safe slug of the whole path.
    pub fn slug(&self) -> String {
        self.segments
            .iter()
            .map(PathSegment::slug)
            .collect::<Vec<_>>()
            .join("-")
    }

    /// DOM-safe slug of the final segment only; member fragments reuse it
    /// inside their parent's section.
    pub fn local_slug(&self) -> String {
        self.segments.last().map(PathSegment::slug).unwrap_or_default()
    }

    /// Namespace of the member, decided by the first segment's case.
    pub fn namespace(&self) -> Namespace {
        let is_object = self
            .segments
            .first()
            .and_then(|segment| segment.name.chars().next())
            .is_some_and(|first| first.is_ascii_uppercase());
        if is_object {
            Namespace::Object
        } else {
            Namespace::Option
        }
    }

    /// Element id of this member's detail section.
    pub fn section_id(&self) -> String {
        match self.namespace() {
            Namespace::Object => format!("object-{}", self.slug()),
            Namespace::Option => self.slug(),
        }
    }

    /// Element id of this member's child menu container.
    pub fn menu_id(&self) -> String {
        format!("{}-menu", self.slug())
    }

    /// Expansion levels, outermost first.
    ///
    /// Every prefix of the path is a level, and a typed segment
    /// contributes two: the shared parent and the variant itself.
    /// `series<line>.marker` yields `series`, `series<line>`,
    /// `series<line>.marker`.
    pub fn levels(&self) -> Vec<MemberPath> {
        let mut levels = Vec::new();
        let mut prefix: Vec<PathSegment> = Vec::new();
        for segment in &self.segments {
            if segment.variant.is_some() {
                prefix.push(PathSegment {
                    name: segment.name.clone(),
                    variant: None,
                });
                levels.push(Self { segments: prefix.clone() });
                prefix.pop();
            }
            prefix.push(segment.clone());
            levels.push(Self { segments: prefix.clone() });
        }
        levels
    }

    /// The level containing this member's detail fragment, if any.
    pub fn parent_level(&self) -> Option<MemberPath> {
        let levels = self.levels();
        let index = levels.len().checked_sub(2)?;
        Some(levels[index].clone())
    }

    /// True for the redundant `type` child the backend emits under every
    /// typed variant (`series<line>-type`); these are never rendered.
    pub fn is_typed_duplicate(&self) -> bool {
        let last_two = self.segments.len().checked_sub(2).map(|i| &self.segments[i..]);
        match last_two {
            Some([parent, leaf]) => parent.variant.is_some() && leaf.name == "type",
            _ => false,
        }
    }
}

impl fmt::Display for MemberPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.dotted())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_dotted_plain() {
        let path = MemberPath::parse_dotted("chart.events.load");
        assert_eq!(path.len(), 3);
        assert_eq!(path.dotted(), "chart.events.load");
        assert_eq!(path.wire(), "chart-events-load");
        assert_eq!(path.slug(), "chart-events-load");
        assert_eq!(path.local_slug(), "load");
    }

    #[test]
    fn test_parse_dotted_typed_variant() {
        let path = MemberPath::parse_dotted("series<line>.marker");
        assert_eq!(path.len(), 2);
        assert_eq!(path.segments()[0].variant.as_deref(), Some("line"));
        assert_eq!(path.dotted(), "series<line>.marker");
        assert_eq!(path.wire(), "series<line>-marker");
        assert_eq!(path.slug(), "series--line-marker");
    }

    #[test]
    fn test_parse_wire_single_and_double_hyphens() {
        let single = MemberPath::parse_wire("chart-events-load");
        let double = MemberPath::parse_wire("chart--events--load");
        assert_eq!(single, double);
        assert_eq!(single.dotted(), "chart.events.load");
    }

    #[test]
    fn test_parse_wire_keeps_bracketed_hyphens() {
        let path = MemberPath::parse_wire("series<area-spline>-marker");
        assert_eq!(path.len(), 2);
        assert_eq!(path.segments()[0].variant.as_deref(), Some("area-spline"));
    }

    #[test]
    fn test_empty_path() {
        assert!(MemberPath::parse_dotted("").is_empty());
        assert!(MemberPath::parse_dotted("").levels().is_empty());
    }

    #[test]
    fn test_namespace_by_case() {
        assert_eq!(
            MemberPath::parse_dotted("chart.type").namespace(),
            Namespace::Option
        );
        assert_eq!(
            MemberPath::parse_dotted("Chart.addSeries").namespace(),
            Namespace::Object
        );
    }

    #[test]
    fn test_section_and_menu_ids() {
        let option = MemberPath::parse_dotted("plotOptions.line");
        assert_eq!(option.section_id(), "plotOptions-line");
        assert_eq!(option.menu_id(), "plotOptions-line-menu");

        let object = MemberPath::parse_dotted("Axis");
        assert_eq!(object.section_id(), "object-Axis");
        assert_eq!(object.menu_id(), "Axis-menu");
    }

    #[test]
    fn test_levels_expand_typed_segments() {
        let path = MemberPath::parse_dotted("series<line>.marker.radius");
        let levels: Vec<String> = path.levels().iter().map(MemberPath::dotted).collect();
        assert_eq!(
            levels,
            vec![
                "series",
                "series<line>",
                "series<line>.marker",
                "series<line>.marker.radius",
            ]
        );
    }

    #[test]
    fn test_parent_level() {
        let path = MemberPath::parse_dotted("chart.type");
        assert_eq!(path.parent_level().unwrap().dotted(), "chart");

        let typed = MemberPath::parse_dotted("series<line>");
        assert_eq!(typed.parent_level().unwrap().dotted(), "series");

        assert!(MemberPath::parse_dotted("chart").parent_level().is_none());
    }

    #[test]
    fn test_typed_duplicate_detection() {
        assert!(MemberPath::parse_wire("series<line>--type").is_typed_duplicate());
        assert!(MemberPath::parse_wire("series<pie>-type").is_typed_duplicate());
        assert!(!MemberPath::parse_wire("chart-type").is_typed_duplicate());
        assert!(!MemberPath::parse_wire("series<line>-marker").is_typed_duplicate());
    }
}
