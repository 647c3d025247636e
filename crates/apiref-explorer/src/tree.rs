//! Lazy tree loading
//!
//! Menu entries and detail content for a member's children are built the
//! first time that member is expanded. The fetch-once guarantee hangs on
//! the session's endpoint set: the key is inserted before the request
//! goes out, so a second expansion of the same node, or of a node sharing
//! its listing, never refetches. Listing failures mark the node and leave
//! the rest of the page usable.

use apiref_data::{ApiSource, Endpoint};
use apiref_dom::NodeId;
use apiref_model::{Member, MemberPath, Namespace};
use apiref_render::{
    display_default, escape_html, render_object_member, render_object_section,
    render_option_member, render_option_section, value_class,
};

use crate::session::Session;
use crate::ExplorerError;

/// What one expansion did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpandOutcome {
    /// The listing was already loaded; the node was only re-opened.
    AlreadyLoaded,
    /// The listing was fetched and this many children inserted.
    Loaded(usize),
    /// The listing request failed; the node is marked and stays closed.
    Failed,
}

/// Expand a parent node, fetching its child listing on first use.
pub fn expand(
    session: &mut Session,
    source: &dyn ApiSource,
    path: &MemberPath,
) -> Result<ExpandOutcome, ExplorerError> {
    let menu = session
        .menu_node(path)
        .ok_or_else(|| ExplorerError::UnknownNode(path.dotted()))?;
    let item = session
        .dom
        .parent(menu)
        .ok_or_else(|| ExplorerError::UnknownNode(path.dotted()))?;

    let endpoint = Endpoint::children_of(path);
    let key = endpoint.path(&session.config.product);
    if session.fetched.contains(&key) {
        open(session, path);
        return Ok(ExpandOutcome::AlreadyLoaded);
    }
    session.fetched.insert(key);

    let dots = session.dom.element_by_class_in(item, "dots");
    if let Some(dots) = dots {
        session.dom.add_class(dots, "loading");
    }

    let children = match source.fetch_members(&endpoint) {
        Ok(children) => children,
        Err(e) => {
            tracing::warn!(member = %path.dotted(), error = %e, "child listing failed");
            if let Some(dots) = dots {
                session.dom.remove_class(dots, "loading");
                session.dom.add_class(dots, "error");
                session.dom.clear_children(dots);
                let text = session.dom.create_text("Error");
                session.dom.append_child(dots, text);
            }
            return Ok(ExpandOutcome::Failed);
        }
    };

    if let Some(dots) = dots {
        session.dom.remove_class(dots, "loading");
        session.dom.hide(dots);
    }

    let mut inserted = 0;
    for child in children {
        let child_path = MemberPath::parse_dotted(&child.fullname);
        if child_path.is_typed_duplicate() {
            continue;
        }
        session.registry.store(child.clone());
        if child.is_parent {
            insert_parent_entry(session, menu, &child);
        } else {
            insert_leaf_entry(session, menu, &child);
        }
        inserted += 1;
    }
    tracing::debug!(member = %path.dotted(), children = inserted, "listing loaded");

    open(session, path);
    Ok(ExpandOutcome::Loaded(inserted))
}

/// Open an already-built node: swap the collapse marker and show its menu.
pub fn open(session: &mut Session, path: &MemberPath) {
    if let Some(menu) = session.menu_node(path) {
        if let Some(item) = session.dom.parent(menu) {
            session.dom.remove_class(item, "collapsed");
            session.dom.add_class(item, "expanded");
        }
        session.dom.show(menu);
    }
}

/// Close a node without discarding anything it loaded.
pub fn collapse(session: &mut Session, path: &MemberPath) {
    if let Some(menu) = session.menu_node(path) {
        if let Some(item) = session.dom.parent(menu) {
            session.dom.remove_class(item, "expanded");
            session.dom.add_class(item, "collapsed");
        }
        session.dom.hide(menu);
    }
}

/// Toggle a node; expanding may fetch.
pub fn toggle(
    session: &mut Session,
    source: &dyn ApiSource,
    path: &MemberPath,
) -> Result<ExpandOutcome, ExplorerError> {
    if session.is_collapsed(path) {
        expand(session, source, path)
    } else {
        collapse(session, path);
        Ok(ExpandOutcome::AlreadyLoaded)
    }
}

/// Insert a parent member's menu entry, its (empty, hidden) detail
/// section, and — when it is itself somebody's child — its member
/// fragment in the enclosing section. The entry starts collapsed with a
/// hidden child menu.
pub(crate) fn insert_parent_entry(session: &mut Session, menu: NodeId, member: &Member) -> NodeId {
    let path = MemberPath::parse_dotted(&member.fullname);

    let item = session.dom.create_element("div");
    session.dom.add_class(item, "menuitem");
    session.dom.add_class(item, "collapsed");
    session.dom.append_child(menu, item);

    let plus = session.dom.create_element("a");
    session.dom.add_class(plus, "plus");
    session.dom.append_child(item, plus);

    let title = session.dom.create_element("a");
    session.dom.add_class(title, "title");
    let href = session.render_ctx.member_href(&member.fullname);
    session.dom.set_attr(title, "href", &href);
    let text = session.dom.create_text(&member.title);
    session.dom.append_child(title, text);
    session.dom.append_child(item, title);

    // Arrays of option objects open with a bracket, plain groups with a
    // brace.
    let is_array = member
        .return_type
        .as_deref()
        .is_some_and(|t| t.starts_with("Array"));
    let bracket = session.dom.create_element("span");
    session.dom.add_class(bracket, "bracket");
    let mark = session.dom.create_text(if is_array { "[" } else { "{" });
    session.dom.append_child(bracket, mark);
    session.dom.append_child(item, bracket);

    let dots = session.dom.create_element("span");
    session.dom.add_class(dots, "dots");
    let ellipsis = session.dom.create_text("...");
    session.dom.append_child(dots, ellipsis);
    session.dom.append_child(item, dots);

    let submenu = session.dom.create_element_with_id("div", &path.menu_id());
    session.dom.add_class(submenu, "menu");
    session.dom.hide(submenu);
    session.dom.append_child(item, submenu);

    match path.namespace() {
        Namespace::Option => {
            render_option_section(&mut session.dom, session.details, member, &session.render_ctx)
        }
        Namespace::Object => {
            render_object_section(&mut session.dom, session.details, member, &session.render_ctx)
        }
    };

    if let Some(section) = path
        .parent_level()
        .and_then(|parent| session.section_node(&parent))
    {
        insert_member_fragment(session, &path, section, member);
    }

    item
}

/// Insert a leaf member's menu entry and its detail fragment inside the
/// parent's section. A first-level leaf has no enclosing section and gets
/// a detail section of its own instead, so it stays navigable.
pub(crate) fn insert_leaf_entry(session: &mut Session, menu: NodeId, member: &Member) -> NodeId {
    let path = MemberPath::parse_dotted(&member.fullname);

    let item = session.dom.create_element("div");
    session.dom.add_class(item, "menuitem");
    session.dom.add_class(item, "leaf");
    session.dom.append_child(menu, item);

    let link = session.dom.create_element("a");
    let href = session.render_ctx.member_href(&member.fullname);
    session.dom.set_attr(link, "href", &href);
    let label = if member.kind.is_method() {
        format!("{}()", member.title)
    } else {
        member.title.clone()
    };
    let text = session.dom.create_text(&label);
    session.dom.append_child(link, text);
    session.dom.append_child(item, link);

    let value = session.dom.create_element("span");
    session.dom.add_class(value, "value");
    let class = value_class(member);
    if !class.is_empty() {
        session.dom.add_class(value, &format!("value-{class}"));
    }
    let body = session
        .dom
        .create_raw_html(&escape_html(&display_default(member)));
    session.dom.append_child(value, body);
    session.dom.append_child(item, value);

    match path.parent_level() {
        Some(parent) => match session.section_node(&parent) {
            Some(section) => insert_member_fragment(session, &path, section, member),
            None => {
                tracing::warn!(member = %member.fullname, "no parent section for fragment");
            }
        },
        None => {
            match path.namespace() {
                Namespace::Option => render_option_section(
                    &mut session.dom,
                    session.details,
                    member,
                    &session.render_ctx,
                ),
                Namespace::Object => render_object_section(
                    &mut session.dom,
                    session.details,
                    member,
                    &session.render_ctx,
                ),
            };
        }
    }

    item
}

fn insert_member_fragment(
    session: &mut Session,
    path: &MemberPath,
    section: NodeId,
    member: &Member,
) {
    match path.namespace() {
        Namespace::Option => {
            render_option_member(&mut session.dom, section, member, &session.render_ctx)
        }
        Namespace::Object => {
            render_object_member(&mut session.dom, section, member, &session.render_ctx)
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ExplorerConfig;
    use apiref_data::{DataError, Payload};
    use apiref_model::MemberKind;

    struct StubSource {
        children: Vec<Member>,
        fail: bool,
    }

    impl ApiSource for StubSource {
        fn fetch(&self, _endpoint: &Endpoint) -> Result<Payload, DataError> {
            if self.fail {
                Err(DataError::Transport("connection refused".to_string()))
            } else {
                Ok(Payload::Members(self.children.clone()))
            }
        }
    }

    fn parent(fullname: &str) -> Member {
        Member {
            name: fullname.rsplit('.').next().unwrap_or(fullname).to_string(),
            fullname: fullname.to_string(),
            title: fullname.rsplit('.').next().unwrap_or(fullname).to_string(),
            is_parent: true,
            ..Member::default()
        }
    }

    fn leaf(fullname: &str) -> Member {
        Member {
            name: fullname.rsplit('.').next().unwrap_or(fullname).to_string(),
            fullname: fullname.to_string(),
            title: fullname.rsplit('.').next().unwrap_or(fullname).to_string(),
            kind: MemberKind::Option,
            return_type: Some("String".to_string()),
            defaults: Some("line".to_string()),
            ..Member::default()
        }
    }

    fn session_with_chart() -> Session {
        let mut session = Session::new(ExplorerConfig::default());
        let menu = session.options_menu;
        insert_parent_entry(&mut session, menu, &parent("chart"));
        session
    }

    #[test]
    fn test_expand_builds_menu_and_fragments() {
        let mut session = session_with_chart();
        let source = StubSource {
            children: vec![leaf("chart.type"), parent("chart.events")],
            fail: false,
        };

        let path = MemberPath::parse_dotted("chart");
        let outcome = expand(&mut session, &source, &path).unwrap();
        assert_eq!(outcome, ExpandOutcome::Loaded(2));
        assert!(!session.is_collapsed(&path));

        // Leaf fragment lives in the parent section, keyed locally.
        let type_path = MemberPath::parse_dotted("chart.type");
        assert!(session.member_fragment(&type_path).is_some());
        // Parent child got its own hidden section and submenu, and a
        // member fragment in chart's section like any other child.
        assert!(session.dom.element_by_id("chart-events-menu").is_some());
        let events_path = MemberPath::parse_dotted("chart.events");
        assert!(session.member_fragment(&events_path).is_some());
        let events = session.section_node(&events_path).unwrap();
        assert!(session.dom.is_hidden(events));
    }

    #[test]
    fn test_first_level_leaf_gets_its_own_section() {
        let mut session = Session::new(ExplorerConfig::default());
        let menu = session.options_menu;
        let colors = Member {
            name: "colors".to_string(),
            fullname: "colors".to_string(),
            title: "colors".to_string(),
            kind: MemberKind::Option,
            return_type: Some("Array<Color>".to_string()),
            description: Some("Default series colors.".to_string()),
            ..Member::default()
        };
        insert_leaf_entry(&mut session, menu, &colors);

        let section = session
            .section_node(&MemberPath::parse_dotted("colors"))
            .unwrap();
        assert!(session.dom.is_hidden(section));
        assert!(session.dom.to_html(section).contains("Default series colors."));
    }

    #[test]
    fn test_expand_fetches_once() {
        let mut session = session_with_chart();
        let source = StubSource {
            children: vec![leaf("chart.type")],
            fail: false,
        };

        let path = MemberPath::parse_dotted("chart");
        expand(&mut session, &source, &path).unwrap();
        collapse(&mut session, &path);
        let outcome = expand(&mut session, &source, &path).unwrap();
        assert_eq!(outcome, ExpandOutcome::AlreadyLoaded);

        let menu = session.menu_node(&path).unwrap();
        assert_eq!(session.dom.children(menu).len(), 1);
    }

    #[test]
    fn test_failed_listing_marks_node_and_keeps_it_closed() {
        let mut session = session_with_chart();
        let source = StubSource { children: Vec::new(), fail: true };

        let path = MemberPath::parse_dotted("chart");
        let outcome = expand(&mut session, &source, &path).unwrap();
        assert_eq!(outcome, ExpandOutcome::Failed);
        assert!(session.is_collapsed(&path));

        let item = session.menu_item(&path).unwrap();
        let dots = session.dom.element_by_class_in(item, "dots").unwrap();
        assert!(session.dom.has_class(dots, "error"));
        assert_eq!(session.dom.text_content(dots), "Error");
    }

    #[test]
    fn test_typed_duplicate_children_are_dropped() {
        let mut session = Session::new(ExplorerConfig::default());
        let menu = session.options_menu;
        insert_parent_entry(&mut session, menu, &parent("series<line>"));

        let source = StubSource {
            children: vec![leaf("series<line>.lineWidth"), leaf("series<line>.type")],
            fail: false,
        };
        let path = MemberPath::parse_dotted("series<line>");
        let outcome = expand(&mut session, &source, &path).unwrap();
        assert_eq!(outcome, ExpandOutcome::Loaded(1));

        let submenu = session.menu_node(&path).unwrap();
        assert_eq!(session.dom.children(submenu).len(), 1);
    }

    #[test]
    fn test_toggle_roundtrip() {
        let mut session = session_with_chart();
        let source = StubSource { children: vec![leaf("chart.type")], fail: false };

        let path = MemberPath::parse_dotted("chart");
        toggle(&mut session, &source, &path).unwrap();
        assert!(!session.is_collapsed(&path));
        toggle(&mut session, &source, &path).unwrap();
        assert!(session.is_collapsed(&path));
    }

    #[test]
    fn test_method_leaf_label_and_value() {
        let mut session = Session::new(ExplorerConfig::default());
        let menu = session.objects_menu;
        insert_parent_entry(&mut session, menu, &parent("Chart"));

        let method = Member {
            name: "addSeries".to_string(),
            fullname: "Chart.addSeries".to_string(),
            title: "addSeries".to_string(),
            kind: MemberKind::Method,
            return_type: Some("Series".to_string()),
            ..Member::default()
        };
        let source = StubSource { children: vec![method], fail: false };
        expand(&mut session, &source, &MemberPath::parse_dotted("Chart")).unwrap();

        let submenu = session
            .menu_node(&MemberPath::parse_dotted("Chart"))
            .unwrap();
        let html = session.dom.to_html(submenu);
        assert!(html.contains("addSeries()"));
        assert!(html.contains("[function]"));
        assert!(html.contains("value-series"));
    }
}
