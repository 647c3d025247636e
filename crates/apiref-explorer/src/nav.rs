//! Navigation
//!
//! Resolving a member name means expanding every level of its path in
//! order, then revealing exactly one detail section and highlighting the
//! member's fragment and menu entry. Expansion is strictly sequential;
//! each level's listing is in place before the next is requested, so a
//! child never renders before its parent.

use apiref_data::ApiSource;
use apiref_dom::NodeId;
use apiref_model::MemberPath;
use serde_json::json;
use tracing::{debug, warn};

use crate::session::Session;
use crate::tree::{self, ExpandOutcome};
use crate::ExplorerError;

/// Resolve a dotted member name and reveal it.
///
/// With `update_chrome` the highlights, document title, metadata card and
/// cross-product links follow along. Passing `false` moves the tree and
/// sections only, for callers that manage their own chrome.
pub fn goto(
    session: &mut Session,
    source: &dyn ApiSource,
    dotted: &str,
    update_chrome: bool,
) -> Result<(), ExplorerError> {
    if dotted.is_empty() {
        show_splash(session);
        return Ok(());
    }

    let path = MemberPath::parse_dotted(dotted);
    debug!(member = %path.dotted(), "goto");

    // Walk the expansion levels outermost first. A level without a menu
    // node is a leaf and has nothing to expand.
    for level in path.levels() {
        if session.menu_node(&level).is_none() {
            continue;
        }
        if session.is_collapsed(&level) {
            match tree::expand(session, source, &level)? {
                ExpandOutcome::Failed => {
                    warn!(member = %level.dotted(), "navigation stopped at failed listing");
                    return Ok(());
                }
                ExpandOutcome::AlreadyLoaded | ExpandOutcome::Loaded(_) => {}
            }
        }
    }

    // Parents show their own section, leaves their parent's.
    let section = session
        .section_node(&path)
        .or_else(|| {
            path.parent_level()
                .and_then(|parent| session.section_node(&parent))
        })
        .ok_or_else(|| ExplorerError::UnknownNode(dotted.to_string()))?;
    show_section(session, section);
    session.search_query.clear();

    if update_chrome {
        update_hilights(session, &path);
        update_metadata(session, &path);
    }

    Ok(())
}

/// Reveal one detail section, hiding whatever was visible.
pub fn show_section(session: &mut Session, section: NodeId) {
    if let Some(previous) = session.current_section {
        if previous != section {
            session.dom.hide(previous);
        }
    }
    session.dom.hide(session.splash);
    session.dom.show(section);
    session.current_section = Some(section);
}

/// Back to the landing state: no section, splash visible, first-level
/// tree closed again.
pub fn show_splash(session: &mut Session) {
    if let Some(previous) = session.current_section.take() {
        session.dom.hide(previous);
    }
    clear_hilights(session);
    session.scroll_target = None;
    session.rich_card = None;
    session.document_title = format!("{} API Reference", session.config.product_title());

    for menu in [session.options_menu, session.global_menu, session.objects_menu] {
        let items = session.dom.children(menu).to_vec();
        for item in items {
            if session.dom.has_class(item, "expanded") {
                session.dom.remove_class(item, "expanded");
                session.dom.add_class(item, "collapsed");
                let children = session.dom.children(item).to_vec();
                for child in children {
                    if session.dom.has_class(child, "menu") {
                        session.dom.hide(child);
                    }
                }
            }
        }
    }
    session.dom.show(session.splash);
}

fn clear_hilights(session: &mut Session) {
    if let Some(previous) = session.hilighted_member.take() {
        session.dom.remove_class(previous, "hilighted");
    }
    if let Some(previous) = session.hilighted_menu.take() {
        session.dom.remove_class(previous, "hilighted");
    }
}

fn update_hilights(session: &mut Session, path: &MemberPath) {
    clear_hilights(session);

    if let Some(fragment) = session.member_fragment(path) {
        session.dom.add_class(fragment, "hilighted");
        session.hilighted_member = Some(fragment);
        session.scroll_target = Some(path.dotted());
    } else {
        session.scroll_target = None;
    }

    let href = session.render_ctx.member_href(&path.dotted());
    if let Some(link) = session.dom.element_by_attr_in(session.nav, "href", &href) {
        session.dom.add_class(link, "hilighted");
        session.hilighted_menu = Some(link);
    }
}

fn update_metadata(session: &mut Session, path: &MemberPath) {
    let dotted = path.dotted();
    let member = session.registry.get(&dotted);
    if let Some(pretty) = member.pretty_name() {
        session.document_title = format!(
            "{pretty} | {} API Reference",
            session.config.product_title()
        );
        session.rich_card = Some(json!({
            "@context": "https://schema.org",
            "@type": "APIReference",
            "name": pretty,
            "image": format!("/resources/images/{}.svg", session.config.product),
            "description": member.description.clone().unwrap_or_default(),
        }));
    }

    // A record listing its products only links to those; the rest point
    // back at the sibling's landing page.
    let documented_for = member.products.clone();
    for link in &mut session.product_links {
        let covered = documented_for
            .as_ref()
            .is_none_or(|products| products.iter().any(|p| p == &link.product));
        let base = link.base.trim_end_matches('/');
        link.href = if covered {
            format!("{base}/{dotted}")
        } else {
            format!("{base}/")
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ExplorerConfig, RelatedProduct};
    use crate::tree::insert_parent_entry;
    use apiref_data::{DataError, Endpoint, Payload};
    use apiref_model::{Member, MemberKind};

    struct StubApi;

    impl ApiSource for StubApi {
        fn fetch(&self, endpoint: &Endpoint) -> Result<Payload, DataError> {
            let members = match endpoint {
                Endpoint::ChildOptions { name } if name == "chart" => vec![
                    leaf("chart.type"),
                    group("chart.events"),
                ],
                Endpoint::ChildOptions { name } if name == "chart-events" => {
                    vec![leaf("chart.events.load")]
                }
                _ => Vec::new(),
            };
            Ok(Payload::Members(members))
        }
    }

    fn leaf(fullname: &str) -> Member {
        Member {
            name: fullname.rsplit('.').next().unwrap_or(fullname).to_string(),
            fullname: fullname.to_string(),
            title: fullname.rsplit('.').next().unwrap_or(fullname).to_string(),
            kind: MemberKind::Option,
            return_type: Some("String".to_string()),
            ..Member::default()
        }
    }

    fn group(fullname: &str) -> Member {
        Member {
            is_parent: true,
            ..leaf(fullname)
        }
    }

    fn session() -> Session {
        let mut config = ExplorerConfig::default();
        config.related_products = vec![RelatedProduct {
            product: "highstock".to_string(),
            base: "https://api.example.com/highstock".to_string(),
        }];
        let mut session = Session::new(config);
        let menu = session.options_menu;
        insert_parent_entry(&mut session, menu, &group("chart"));
        session.registry.store(group("chart"));
        session
    }

    #[test]
    fn test_goto_nested_leaf_shows_parent_section() {
        let mut session = session();
        goto(&mut session, &StubApi, "chart.events.load", true).unwrap();

        let events = session
            .section_node(&MemberPath::parse_dotted("chart.events"))
            .unwrap();
        assert_eq!(session.current_section, Some(events));
        assert!(session.dom.is_effectively_visible(events));
        assert!(session.dom.is_hidden(session.splash));

        let fragment = session
            .member_fragment(&MemberPath::parse_dotted("chart.events.load"))
            .unwrap();
        assert!(session.dom.has_class(fragment, "hilighted"));
        assert_eq!(session.scroll_target.as_deref(), Some("chart.events.load"));
    }

    #[test]
    fn test_goto_keeps_one_section_visible() {
        let mut session = session();
        goto(&mut session, &StubApi, "chart.type", true).unwrap();
        goto(&mut session, &StubApi, "chart.events", true).unwrap();

        let chart = session
            .section_node(&MemberPath::parse_dotted("chart"))
            .unwrap();
        let events = session
            .section_node(&MemberPath::parse_dotted("chart.events"))
            .unwrap();
        assert!(session.dom.is_hidden(chart));
        assert!(session.dom.is_effectively_visible(events));
    }

    #[test]
    fn test_goto_updates_title_and_product_links() {
        let mut session = session();
        session.registry.store(leaf("chart.type"));
        goto(&mut session, &StubApi, "chart.type", true).unwrap();

        assert_eq!(session.document_title, "chart.type | Highcharts API Reference");
        let card = session.rich_card.as_ref().unwrap();
        assert_eq!(card["@type"], "APIReference");
        assert_eq!(card["name"], "chart.type");
        assert_eq!(
            session.product_links[0].href,
            "https://api.example.com/highstock/chart.type"
        );
    }

    /// Serves `chart.type` tagged as documented for highcharts only.
    struct SingleProductApi;

    impl ApiSource for SingleProductApi {
        fn fetch(&self, endpoint: &Endpoint) -> Result<Payload, DataError> {
            let members = match endpoint {
                Endpoint::ChildOptions { name } if name == "chart" => {
                    let mut only_here = leaf("chart.type");
                    only_here.products = Some(vec!["highcharts".to_string()]);
                    vec![only_here]
                }
                _ => Vec::new(),
            };
            Ok(Payload::Members(members))
        }
    }

    #[test]
    fn test_product_links_respect_member_coverage() {
        let mut session = session();
        goto(&mut session, &SingleProductApi, "chart.type", true).unwrap();

        // highstock is not in the member's product list, so its link
        // drops back to the landing page.
        assert_eq!(
            session.product_links[0].href,
            "https://api.example.com/highstock/"
        );
    }

    #[test]
    fn test_goto_unknown_member() {
        let mut session = session();
        let result = goto(&mut session, &StubApi, "nosuchthing", true);
        assert!(matches!(result, Err(ExplorerError::UnknownNode(_))));
    }

    #[test]
    fn test_empty_target_restores_splash() {
        let mut session = session();
        goto(&mut session, &StubApi, "chart.type", true).unwrap();
        goto(&mut session, &StubApi, "", true).unwrap();

        assert!(session.current_section.is_none());
        assert!(!session.dom.is_hidden(session.splash));
        assert!(session.is_collapsed(&MemberPath::parse_dotted("chart")));
        assert_eq!(session.document_title, "Highcharts API Reference");
    }
}
