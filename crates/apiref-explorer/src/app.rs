//! Explorer bootstrap and entry points
//!
//! `Explorer` owns the session, the listing source and the history, and
//! exposes the user-facing moves: clicking a member, replaying history,
//! opening a deep link. Bootstrap is eager and sequential: the name list,
//! first-level options and first-level objects are all fetched before the
//! page is considered ready. Only the options listing is fatal; names and
//! objects degrade with a logged warning.

use apiref_data::{ApiSource, Endpoint};
use apiref_model::{Member, MemberPath};
use tracing::{info, warn};

use crate::config::ExplorerConfig;
use crate::history::HistorySync;
use crate::nav;
use crate::session::Session;
use crate::tree::{self, insert_leaf_entry, insert_parent_entry, ExpandOutcome};
use crate::ExplorerError;

pub struct Explorer {
    session: Session,
    source: Box<dyn ApiSource>,
    history: HistorySync,
}

impl Explorer {
    /// Build the page skeleton and run the bootstrap fetches.
    pub fn new(
        config: ExplorerConfig,
        source: Box<dyn ApiSource>,
    ) -> Result<Self, ExplorerError> {
        let session = Session::new(config);
        let history = HistorySync::new(
            session.config.history_api,
            &format!("/{}", session.config.base_path()),
        );
        let mut explorer = Self {
            session,
            source,
            history,
        };
        explorer.bootstrap()?;
        Ok(explorer)
    }

    fn bootstrap(&mut self) -> Result<(), ExplorerError> {
        match self.source.fetch_names() {
            Ok(names) => {
                for name in names {
                    let path = MemberPath::parse_wire(&name);
                    let dotted = path.dotted();
                    self.session
                        .name_dictionary
                        .insert(dotted.clone(), path.wire());
                    self.session.names.push(dotted);
                }
                info!(names = self.session.names.len(), "name list loaded");
            }
            Err(e) => warn!(error = %e, "name list unavailable, search disabled"),
        }

        let options = self.source.fetch_members(&Endpoint::MainOptions)?;
        self.add_first_level_options(options);

        match self.source.fetch_members(&Endpoint::MainObjects) {
            Ok(objects) if !objects.is_empty() => self.add_first_level_objects(objects),
            Ok(_) => self.session.dom.hide(self.session.objects_nav),
            Err(e) => {
                warn!(error = %e, "object listing unavailable");
                self.session.dom.hide(self.session.objects_nav);
            }
        }

        self.session.document_title =
            format!("{} API Reference", self.session.config.product_title());
        Ok(())
    }

    fn add_first_level_options(&mut self, members: Vec<Member>) {
        let mut global_used = false;
        for member in members {
            let path = MemberPath::parse_dotted(&member.fullname);
            if member.is_placeholder() || path.is_empty() {
                continue;
            }
            let menu = self.session.menu_root_for(&path);
            if menu == self.session.global_menu {
                global_used = true;
            }
            self.session.registry.store(member.clone());

            let segment = &path.segments()[0];
            match segment.variant.clone() {
                Some(variant) => {
                    let shared_path = MemberPath::parse_dotted(&segment.name);
                    if self.session.menu_node(&shared_path).is_none() {
                        // The shared name has no listing of its own; the
                        // typed variants fill its menu right here.
                        let shared = Member {
                            name: segment.name.clone(),
                            fullname: segment.name.clone(),
                            title: segment.name.clone(),
                            is_parent: true,
                            ..Member::default()
                        };
                        self.session.registry.store(shared.clone());
                        insert_parent_entry(&mut self.session, menu, &shared);
                        let key = Endpoint::children_of(&shared_path)
                            .path(&self.session.config.product);
                        self.session.fetched.insert(key);
                    }
                    let submenu = match self.session.menu_node(&shared_path) {
                        Some(submenu) => submenu,
                        None => continue,
                    };
                    let item = if member.is_parent {
                        insert_parent_entry(&mut self.session, submenu, &member)
                    } else {
                        insert_leaf_entry(&mut self.session, submenu, &member)
                    };
                    let label = self.session.dom.create_element("span");
                    self.session.dom.add_class(label, "typed");
                    let text = self
                        .session
                        .dom
                        .create_text(&format!("type: \"{variant}\""));
                    self.session.dom.append_child(label, text);
                    self.session.dom.append_child(item, label);
                }
                None if member.is_parent => {
                    insert_parent_entry(&mut self.session, menu, &member);
                }
                None => {
                    insert_leaf_entry(&mut self.session, menu, &member);
                }
            }
        }
        if !global_used {
            self.session.dom.hide(self.session.global_tree);
        }
    }

    fn add_first_level_objects(&mut self, members: Vec<Member>) {
        for member in members {
            if member.is_placeholder() {
                continue;
            }
            self.session.registry.store(member.clone());
            let menu = self.session.objects_menu;
            if member.is_parent {
                insert_parent_entry(&mut self.session, menu, &member);
            } else {
                insert_leaf_entry(&mut self.session, menu, &member);
            }
        }
    }

    /// A click on a member link: record history, then resolve.
    pub fn click_member(&mut self, dotted: &str) -> Result<(), ExplorerError> {
        let url = self.session.render_ctx.member_href(dotted);
        self.history.push(&url, Some(dotted));
        self.session.current_page = dotted.to_string();
        self.resolve(dotted)
    }

    /// Open a deep link: the entry the page landed on is replaced, not
    /// pushed, so back never leads to a half-initialized state.
    pub fn open(&mut self, dotted: &str) -> Result<(), ExplorerError> {
        let url = self.session.render_ctx.member_href(dotted);
        self.history.replace(&url, Some(dotted));
        self.session.current_page = dotted.to_string();
        self.resolve(dotted)
    }

    /// A click on a node's expand marker: open or close it in place,
    /// without touching history, the visible section or the highlights.
    pub fn toggle_node(&mut self, dotted: &str) -> Result<ExpandOutcome, ExplorerError> {
        let path = MemberPath::parse_dotted(dotted);
        tree::toggle(&mut self.session, self.source.as_ref(), &path)
    }

    /// Open a legacy `#member` fragment URL.
    pub fn open_fragment(&mut self, fragment: &str) -> Result<(), ExplorerError> {
        self.open(fragment.trim_start_matches('#'))
    }

    /// Replay one step back. Returns `false` at the oldest entry.
    pub fn back(&mut self) -> Result<bool, ExplorerError> {
        match self.history.back() {
            Some(entry) => {
                let page = self.replayed_page(entry.page);
                self.resolve(&page)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Replay one step forward. Returns `false` at the newest entry.
    pub fn forward(&mut self) -> Result<bool, ExplorerError> {
        match self.history.forward() {
            Some(entry) => {
                let page = self.replayed_page(entry.page);
                self.resolve(&page)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Page to restore for a replayed entry. A structured entry without a
    /// page is the landing state; the fragment fallback carries no state
    /// at all on its oldest entry, so the tracked current page stands in.
    fn replayed_page(&self, page: Option<String>) -> String {
        match page {
            Some(page) => page,
            None if self.history.structured() => String::new(),
            None => self.session.current_page.clone(),
        }
    }

    /// Resolve a member, downgrading an unknown name to an inline error
    /// marker so the rest of the page stays usable.
    fn resolve(&mut self, dotted: &str) -> Result<(), ExplorerError> {
        match nav::goto(&mut self.session, self.source.as_ref(), dotted, true) {
            Err(ExplorerError::UnknownNode(name)) => {
                warn!(member = %name, "member not found");
                self.annotate_not_found(&name);
                Ok(())
            }
            other => other,
        }
    }

    fn annotate_not_found(&mut self, name: &str) {
        let error = self.session.dom.create_element("div");
        self.session.dom.add_class(error, "error");
        let text = self
            .session
            .dom
            .create_text(&format!("Could not find {name}."));
        self.session.dom.append_child(error, text);
        self.session.dom.append_child(self.session.details, error);
        self.session.dom.hide(self.session.splash);
    }

    pub fn suggest(&self, query: &str) -> Vec<&str> {
        self.session.suggest(query)
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn history(&self) -> &HistorySync {
        &self.history
    }

    pub fn document_title(&self) -> &str {
        &self.session.document_title
    }

    /// Serialized markup of the one visible detail section.
    pub fn visible_section_html(&self) -> Option<String> {
        let section = self.session.current_section?;
        Some(self.session.dom.to_html(section))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use apiref_data::OfflineSource;
    use serde_json::json;

    fn dump_source() -> OfflineSource {
        let dump = serde_json::from_value(json!({
            "option": [
                {"name": "chart", "fullname": "chart", "title": "chart",
                 "type": "option", "parent": "", "isParent": true},
                {"name": "lang", "fullname": "lang", "title": "lang",
                 "type": "option", "parent": "", "isParent": true},
                {"name": "series<line>", "fullname": "series<line>",
                 "title": "series", "type": "option", "parent": "",
                 "isParent": true},
                {"name": "series<pie>", "fullname": "series<pie>",
                 "title": "series", "type": "option", "parent": "",
                 "isParent": true},
                {"name": "chart-type", "fullname": "chart.type", "title": "type",
                 "type": "option", "parent": "chart", "returnType": "String",
                 "defaults": "line"}
            ],
            "object": [
                {"name": "Chart", "fullname": "Chart", "title": "Chart",
                 "type": "object", "parent": "", "isParent": true}
            ]
        }))
        .unwrap();
        OfflineSource::from_dump(&dump)
    }

    #[test]
    fn test_bootstrap_populates_menus() {
        let explorer = Explorer::new(ExplorerConfig::default(), Box::new(dump_source())).unwrap();
        let session = explorer.session();

        assert!(session.menu_node(&MemberPath::parse_dotted("chart")).is_some());
        assert!(session.menu_node(&MemberPath::parse_dotted("Chart")).is_some());
        // lang routes to the global group, which therefore stays visible.
        assert!(!session.dom.is_hidden(session.global_tree));
        assert_eq!(explorer.document_title(), "Highcharts API Reference");
    }

    #[test]
    fn test_typed_variants_share_one_parent() {
        let explorer = Explorer::new(ExplorerConfig::default(), Box::new(dump_source())).unwrap();
        let session = explorer.session();

        let series = MemberPath::parse_dotted("series");
        let submenu = session.menu_node(&series).unwrap();
        assert_eq!(session.dom.children(submenu).len(), 2);
        assert!(session.dom.to_html(submenu).contains("type: \"line\""));
        // The shared name never hits the backend.
        assert!(session.fetched.contains("option/highcharts/child/series"));
    }

    #[test]
    fn test_names_are_dotted_for_search() {
        let explorer = Explorer::new(ExplorerConfig::default(), Box::new(dump_source())).unwrap();
        assert_eq!(explorer.suggest("chart.t"), vec!["chart.type"]);
        assert_eq!(
            explorer.session().name_dictionary.get("chart.type").unwrap(),
            "chart-type"
        );
    }

    #[test]
    fn test_unknown_member_leaves_marker() {
        let mut explorer =
            Explorer::new(ExplorerConfig::default(), Box::new(dump_source())).unwrap();
        explorer.click_member("nosuchthing").unwrap();

        let session = explorer.session();
        let error = session
            .dom
            .element_by_class_in(session.details, "error")
            .unwrap();
        assert_eq!(session.dom.text_content(error), "Could not find nosuchthing.");
    }
}
