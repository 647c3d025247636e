//! Section and member fragment rendering
//!
//! Every parent member owns one hidden `div.section` under the details
//! container; every listed member gets a `div.member` fragment inside its
//! parent's section. Optional blocks render only when the record carries
//! the field, in a fixed order. Idempotence is the caller's concern: the
//! tree loader's fetch-once guarantee is what prevents double insertion.

use apiref_dom::{DomTree, NodeId};
use apiref_model::{Member, MemberKind, MemberPath};

use crate::{escape_html, linkify_types, wrappable_title, RenderContext};

/// The value shown next to a leaf menu entry.
///
/// Methods display `[function]`, properties their bracketed return type;
/// string and color defaults are quoted, everything else is shown as
/// delivered (which may be empty).
pub fn display_default(member: &Member) -> String {
    match member.kind {
        MemberKind::Method => "[function]".to_string(),
        MemberKind::Property => format!(
            "[{}]",
            member.return_type.as_deref().unwrap_or("undefined")
        ),
        _ => {
            let defaults = member.defaults.as_deref().unwrap_or("");
            match defaults {
                "" | "null" | "undefined" => defaults.to_string(),
                _ => match member.return_type.as_deref() {
                    Some("String") | Some("Color") => format!("\"{defaults}\""),
                    _ => defaults.to_string(),
                },
            }
        }
    }
}

/// CSS class suffix for a leaf value span, derived from the return type.
///
/// A missing return type degrades to no class and a logged warning.
pub fn value_class(member: &Member) -> String {
    match &member.return_type {
        Some(return_type) => return_type.to_lowercase(),
        None => {
            tracing::warn!(fullname = %member.fullname, "missing returnType");
            String::new()
        }
    }
}

/// Append the hidden detail section for a parent option member.
pub fn render_option_section(
    tree: &mut DomTree,
    details: NodeId,
    member: &Member,
    _ctx: &RenderContext,
) -> NodeId {
    let path = MemberPath::parse_dotted(&member.fullname);
    let section = new_section(tree, details, &path.section_id());

    let heading = tree.create_element("h1");
    let title = wrappable_title(&escape_html(&member.fullname));
    let title_node = tree.create_raw_html(&title);
    tree.append_child(heading, title_node);
    tree.append_child(section, heading);

    if let Some(description) = &member.description {
        let block = tree.create_element("div");
        tree.add_class(block, "section-description");
        let body = tree.create_raw_html(description);
        tree.append_child(block, body);
        tree.append_child(section, block);
    }

    if let Some(demo) = &member.demo {
        let block = tree.create_element("div");
        tree.add_class(block, "demo");
        tree.add_class(block, "section-demo");
        let body = tree.create_raw_html(&format!("<h4>Try it:</h4> {demo}"));
        tree.append_child(block, body);
        tree.append_child(section, block);
    }

    section
}

/// Append the hidden detail section for a parent object member.
pub fn render_object_section(
    tree: &mut DomTree,
    details: NodeId,
    member: &Member,
    _ctx: &RenderContext,
) -> NodeId {
    let path = MemberPath::parse_dotted(&member.fullname);
    let section = new_section(tree, details, &path.section_id());

    let heading = tree.create_element("h1");
    let title_node = tree.create_raw_html(&wrappable_title(&member.title));
    tree.append_child(heading, title_node);
    tree.append_child(section, heading);

    if let Some(description) = &member.description {
        let block = tree.create_element("div");
        tree.add_class(block, "section-description");
        let body = tree.create_raw_html(description);
        tree.append_child(block, body);
        tree.append_child(section, block);
    }

    section
}

fn new_section(tree: &mut DomTree, details: NodeId, id: &str) -> NodeId {
    let section = tree.create_element_with_id("div", id);
    tree.add_class(section, "section");
    tree.hide(section);
    tree.append_child(details, section);
    section
}

/// Append one option member fragment to its parent's section.
///
/// Block order: title, return type, deprecation, since, description with
/// appended default, context note, demo, see-also.
pub fn render_option_member(
    tree: &mut DomTree,
    section: NodeId,
    member: &Member,
    ctx: &RenderContext,
) -> NodeId {
    let fragment = new_member_fragment(tree, section, member, ctx);

    if let Some(return_type) = &member.return_type {
        let span = tree.create_element("span");
        tree.add_class(span, "returnType");
        let body = tree.create_raw_html(&format!(": {}", linkify_types(return_type, ctx)));
        tree.append_child(span, body);
        tree.append_child(fragment, span);
    }

    if member.deprecated {
        let block = tree.create_element("div");
        tree.add_class(block, "deprecated");
        let body = tree.create_raw_html("<p>Deprecated</p>");
        tree.append_child(block, body);
        tree.append_child(fragment, block);
    }

    if let Some(since) = &member.since {
        let block = tree.create_element("div");
        tree.add_class(block, "since");
        let text = tree.create_text(&format!("Since {since}"));
        tree.append_child(block, text);
        tree.append_child(fragment, block);
    }

    if let Some(description) = &member.description {
        let block = tree.create_element("div");
        tree.add_class(block, "description");
        let mut markup = description.clone();
        if let Some(defaults) = &member.defaults {
            markup.push_str(&format!(
                " Defaults to <code>{}</code>.",
                escape_html(defaults)
            ));
        }
        let body = tree.create_raw_html(&markup);
        tree.append_child(block, body);
        tree.append_child(fragment, block);
    }

    if let Some(context) = &member.context {
        let block = tree.create_element("div");
        tree.add_class(block, "description");
        // Records whose description lacks paragraph markup get the
        // standalone context styling.
        let has_paragraphs = member
            .description
            .as_deref()
            .is_some_and(|d| d.contains("<p>"));
        if !has_paragraphs {
            tree.add_class(block, "context");
        }
        let body = tree.create_raw_html(&format!(
            "The <code>this</code> keyword refers to the {} object.",
            linkify_types(context, ctx)
        ));
        tree.append_child(block, body);
        tree.append_child(fragment, block);
    }

    if let Some(demo) = &member.demo {
        let block = tree.create_element("div");
        tree.add_class(block, "demo");
        let body = tree.create_raw_html(&format!("<h4>Try it:</h4> {demo}"));
        tree.append_child(block, body);
        tree.append_child(fragment, block);
    }

    if let Some(see_also) = &member.see_also {
        let block = tree.create_element("div");
        tree.add_class(block, "see-also");
        let body = tree.create_raw_html(&format!("<h4>See also:</h4> {see_also}"));
        tree.append_child(block, body);
        tree.append_child(fragment, block);
    }

    fragment
}

/// Append one object member fragment to its parent's section.
///
/// Block order: title, parameters, since, deprecation, description with
/// parameter and return lists, demo.
pub fn render_object_member(
    tree: &mut DomTree,
    section: NodeId,
    member: &Member,
    ctx: &RenderContext,
) -> NodeId {
    let fragment = new_member_fragment(tree, section, member, ctx);

    if let Some(params) = &member.params {
        let span = tree.create_element("span");
        tree.add_class(span, "parameters");
        let body = tree.create_raw_html(params);
        tree.append_child(span, body);
        tree.append_child(fragment, span);
    }

    if let Some(since) = &member.since {
        let block = tree.create_element("div");
        tree.add_class(block, "since");
        let text = tree.create_text(&format!("Since {since}"));
        tree.append_child(block, text);
        tree.append_child(fragment, block);
    }

    if member.deprecated {
        let block = tree.create_element("div");
        tree.add_class(block, "deprecated");
        let body = tree.create_raw_html("<p>Deprecated</p>");
        tree.append_child(block, body);
        tree.append_child(fragment, block);
    }

    let description = tree.create_element("div");
    tree.add_class(description, "description");
    let mut markup = format!("<p>{}</p>", member.description.as_deref().unwrap_or(""));
    if let Some(params_description) = &member.params_description {
        markup.push_str(&format!(
            "<h4>Parameters</h4><ul class=\"paramdesc\"><li>{}</li></ul>",
            params_description.replace("||", "</li><li>")
        ));
    }
    if let Some(return_type) = &member.return_type {
        markup.push_str(&format!(
            "<h4>Returns</h4><ul class=\"returns\"><li>{}</li></ul>",
            linkify_types(return_type, ctx)
        ));
    }
    let body = tree.create_raw_html(&markup);
    tree.append_child(description, body);
    tree.append_child(fragment, description);

    if let Some(demo) = &member.demo {
        let block = tree.create_element("div");
        tree.add_class(block, "demo");
        let body = tree.create_raw_html(&format!("<h4>Try it:</h4> {demo}"));
        tree.append_child(block, body);
        tree.append_child(fragment, block);
    }

    fragment
}

fn new_member_fragment(
    tree: &mut DomTree,
    section: NodeId,
    member: &Member,
    ctx: &RenderContext,
) -> NodeId {
    let path = MemberPath::parse_dotted(&member.fullname);
    let fragment = tree.create_element_with_id("div", &path.local_slug());
    tree.add_class(fragment, "member");
    tree.append_child(section, fragment);

    let heading = tree.create_element("h2");
    tree.add_class(heading, "title");
    let link = tree.create_element("a");
    tree.set_attr(link, "href", &ctx.member_href(&member.fullname));
    if !member.is_parent {
        tree.add_class(link, "noChildren");
    }
    let text = tree.create_text(&member.title);
    tree.append_child(link, text);
    tree.append_child(heading, link);
    tree.append_child(fragment, heading);

    fragment
}
