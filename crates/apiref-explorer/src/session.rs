//! Browsing session
//!
//! All page-wide state lives here: the element tree and its well-known
//! containers, the member registry, the fetched-endpoint set and the
//! highlight pointers. One session per page; the bootstrap routine owns
//! its lifetime, every component receives it explicitly. Single-threaded
//! by construction.

use std::collections::{HashMap, HashSet};

use apiref_dom::{DomTree, NodeId};
use apiref_model::{MemberPath, MemberRegistry, Namespace};
use apiref_render::RenderContext;

use crate::config::{ExplorerConfig, RelatedProduct};

/// A cross-product link and its current target.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductLink {
    pub product: String,
    pub base: String,
    pub href: String,
}

/// Per-page explorer state.
#[derive(Debug)]
pub struct Session {
    pub config: ExplorerConfig,
    pub render_ctx: RenderContext,

    pub dom: DomTree,
    /// `#nav-wrap`, the menu column.
    pub nav: NodeId,
    /// `#options`, first-level option items.
    pub options_menu: NodeId,
    /// `#global-options-tree` wrapper, hidden when the product has no
    /// global options.
    pub global_tree: NodeId,
    /// `#global-options`, the `global`/`lang` group.
    pub global_menu: NodeId,
    /// `#objects-nav-section` wrapper, hidden when the product has no
    /// objects.
    pub objects_nav: NodeId,
    /// `#objects`, first-level object items.
    pub objects_menu: NodeId,
    /// `#details`, the section container.
    pub details: NodeId,
    /// `#splash`, the landing state.
    pub splash: NodeId,

    pub registry: MemberRegistry,
    /// Child-listing endpoints requested this session; never evicted.
    pub fetched: HashSet<String>,

    /// Autocomplete source, dotted names in backend order.
    pub names: Vec<String>,
    /// Dotted name to the wire name the backend knows it by.
    pub name_dictionary: HashMap<String, String>,

    /// The one visible detail section, if any.
    pub current_section: Option<NodeId>,
    pub hilighted_member: Option<NodeId>,
    pub hilighted_menu: Option<NodeId>,
    /// Dotted name of the fragment last scrolled into view; `None`
    /// scrolls the pane back to the top.
    pub scroll_target: Option<String>,

    pub search_query: String,
    /// Tracked current page, the popstate fallback.
    pub current_page: String,
    pub document_title: String,
    /// Structured-data metadata block for the resolved member.
    pub rich_card: Option<serde_json::Value>,
    pub product_links: Vec<ProductLink>,
}

impl Session {
    /// Build an empty session with the page skeleton in place.
    pub fn new(config: ExplorerConfig) -> Self {
        let render_ctx = RenderContext {
            base_path: config.base_path(),
            history_enabled: config.history_api,
            linkable_types: config.linkable_types.clone(),
        };

        let mut dom = DomTree::new();
        let root = dom.root();

        let nav = dom.create_element_with_id("nav", "nav-wrap");
        dom.append_child(root, nav);

        let options_section = dom.create_element_with_id("div", "options-nav-section");
        let options_menu = dom.create_element_with_id("div", "options");
        dom.append_child(options_section, options_menu);
        dom.append_child(nav, options_section);

        let global_tree = dom.create_element_with_id("div", "global-options-tree");
        let global_menu = dom.create_element_with_id("div", "global-options");
        dom.append_child(global_tree, global_menu);
        dom.append_child(nav, global_tree);

        let objects_nav = dom.create_element_with_id("div", "objects-nav-section");
        let objects_menu = dom.create_element_with_id("div", "objects");
        dom.append_child(objects_nav, objects_menu);
        dom.append_child(nav, objects_nav);

        let details_wrap = dom.create_element_with_id("div", "details-wrap");
        let splash = dom.create_element_with_id("div", "splash");
        let details = dom.create_element_with_id("div", "details");
        dom.append_child(details_wrap, splash);
        dom.append_child(details_wrap, details);
        dom.append_child(root, details_wrap);

        let product_links = config
            .related_products
            .iter()
            .map(|RelatedProduct { product, base }| ProductLink {
                product: product.clone(),
                base: base.clone(),
                href: format!("{}/", base.trim_end_matches('/')),
            })
            .collect();

        Self {
            config,
            render_ctx,
            dom,
            nav,
            options_menu,
            global_tree,
            global_menu,
            objects_nav,
            objects_menu,
            details,
            splash,
            registry: MemberRegistry::new(),
            fetched: HashSet::new(),
            names: Vec::new(),
            name_dictionary: HashMap::new(),
            current_section: None,
            hilighted_member: None,
            hilighted_menu: None,
            scroll_target: None,
            search_query: String::new(),
            current_page: String::new(),
            document_title: String::new(),
            rich_card: None,
            product_links,
        }
    }

    /// The first-level menu container a path's item belongs in.
    pub fn menu_root_for(&self, path: &MemberPath) -> NodeId {
        match path.namespace() {
            Namespace::Object => self.objects_menu,
            Namespace::Option => {
                let first = path
                    .segments()
                    .first()
                    .map(|segment| segment.name.as_str())
                    .unwrap_or_default();
                if matches!(first, "global" | "lang") {
                    self.global_menu
                } else {
                    self.options_menu
                }
            }
        }
    }

    /// The child menu container for a path, if it has been created.
    pub fn menu_node(&self, path: &MemberPath) -> Option<NodeId> {
        self.dom.element_by_id(&path.menu_id())
    }

    /// The menu item wrapping a path's child menu.
    pub fn menu_item(&self, path: &MemberPath) -> Option<NodeId> {
        self.dom.parent(self.menu_node(path)?)
    }

    /// Whether the path's tree node is collapsed. Nodes without a menu
    /// (leaves) report `false`.
    pub fn is_collapsed(&self, path: &MemberPath) -> bool {
        self.menu_item(path)
            .is_some_and(|item| self.dom.has_class(item, "collapsed"))
    }

    /// The detail section for a path, if it exists.
    pub fn section_node(&self, path: &MemberPath) -> Option<NodeId> {
        self.dom.element_by_id_in(self.details, &path.section_id())
    }

    /// The detail fragment for a path: its local id scoped to the parent
    /// level's section. First-level members have no fragment.
    pub fn member_fragment(&self, path: &MemberPath) -> Option<NodeId> {
        let parent = path.parent_level()?;
        let section = self.section_node(&parent)?;
        self.dom.element_by_id_in(section, &path.local_slug())
    }

    /// Autocomplete suggestions: case-insensitive substring match over
    /// the dotted names, backend order preserved, two-character minimum.
    pub fn suggest(&self, query: &str) -> Vec<&str> {
        if query.chars().count() < 2 {
            return Vec::new();
        }
        let needle = query.to_lowercase();
        self.names
            .iter()
            .filter(|name| name.to_lowercase().contains(&needle))
            .map(String::as_str)
            .collect()
    }
}
