//! Rendering functions for the mdast renderer.

use super::context::{Context, Scope, footnote_id};
use crate::registry::{PropValue, Props, write_element, write_void_element};
use markdown::mdast::{AlignKind, AttributeContent, AttributeValue, Node};

/// Elements that never take children.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source",
    "track", "wbr",
];

/// Shortcodes are capitalized; anything else is an HTML tag name.
fn is_shortcode(name: &str) -> bool {
    name.starts_with(|c: char| c.is_ascii_uppercase())
}

/// Collects JSX attributes into props. Spread attributes are dropped.
fn collect_props(attributes: &[AttributeContent]) -> Props {
    let mut props = Props::new();
    for attr in attributes {
        match attr {
            AttributeContent::Property(prop) => {
                let value = match &prop.value {
                    Some(AttributeValue::Literal(s)) => PropValue::literal(s.clone()),
                    Some(AttributeValue::Expression(expr)) => {
                        PropValue::expression(expr.value.clone())
                    }
                    // `<Button disabled />`
                    None => PropValue::expression("true"),
                };
                props.insert(prop.name.clone(), value);
            }
            AttributeContent::Expression(expr) => {
                log::debug!("Dropping spread attribute {{{}}}", expr.value);
            }
        }
    }
    props
}

fn render_children(children: &[Node], ctx: &mut Context) {
    for child in children {
        render_node(child, ctx);
    }
}

/// Renders a JSX element through its binding, or as a plain element when unbound.
fn render_jsx(
    name: Option<&str>,
    attributes: &[AttributeContent],
    children: &[Node],
    ctx: &mut Context,
) {
    // Fragment: <>...</>
    let Some(tag) = name else {
        render_children(children, ctx);
        return;
    };

    let resolver = ctx.resolver();
    let binding = if is_shortcode(tag) {
        resolver.resolve_shortcode(tag)
    } else {
        resolver.resolve_html(tag)
    };

    let props = collect_props(attributes);
    let inner = ctx.capture(|ctx| render_children(children, ctx));

    let html = match binding {
        Some(binding) => binding.render(&props, &inner),
        None => {
            if is_shortcode(tag) {
                log::warn!("No component bound to <{}>; emitting it unchanged", tag);
            }
            if inner.is_empty() && VOID_ELEMENTS.contains(&tag) {
                write_void_element(tag, &props)
            } else {
                write_element(tag, &props, &inner)
            }
        }
    };
    ctx.push_raw(&html);
}

/// Renders `tag` through its HTML override when one exists.
fn render_overridable(tag: &str, props: Props, children: &[Node], ctx: &mut Context) {
    let resolver = ctx.resolver();
    let inner = ctx.capture(|ctx| render_children(children, ctx));
    let html = match resolver.resolve_html(tag) {
        Some(binding) => binding.render(&props, &inner),
        None => write_element(tag, &props, &inner),
    };
    ctx.push_raw(&html);
}

fn link_props(url: &str, title: Option<&str>) -> Props {
    let mut props = Props::new();
    props.insert("href".to_string(), PropValue::literal(url));
    if let Some(title) = title {
        props.insert("title".to_string(), PropValue::literal(title));
    }
    props
}

/// Renders fenced code through the `pre` override, or as `<pre><code>`.
///
/// The override gets the fence info as `lang`/`meta` props and the escaped code as
/// children, rather than the `<code className="language-x">` child a JSX runtime
/// would pass it.
fn render_code(code: &markdown::mdast::Code, ctx: &mut Context) {
    let escaped = html_escape::encode_text(&code.value);

    if let Some(binding) = ctx.resolver().resolve_html("pre") {
        let mut props = Props::new();
        if let Some(lang) = &code.lang {
            props.insert("lang".to_string(), PropValue::literal(lang.clone()));
        }
        if let Some(meta) = &code.meta {
            props.insert("meta".to_string(), PropValue::literal(meta.clone()));
        }
        let html = binding.render(&props, &escaped);
        ctx.push_raw(&html);
        return;
    }

    ctx.push_raw("<pre><code");
    if let Some(lang) = &code.lang {
        ctx.push_raw(" class=\"language-");
        ctx.push_attr_value(lang);
        ctx.push_raw("\"");
    }
    ctx.push_raw(">");
    ctx.push_raw(&escaped);
    ctx.push_raw("</code></pre>");
}

/// Renders a paragraph node, suppressing `<p>` wrappers in tight lists.
fn render_paragraph(para: &markdown::mdast::Paragraph, ctx: &mut Context) {
    if ctx.is_in_tight_list() {
        render_children(&para.children, ctx);
    } else {
        ctx.push_raw("<p>");
        render_children(&para.children, ctx);
        ctx.push_raw("</p>");
    }
}

fn render_list(list: &markdown::mdast::List, ctx: &mut Context) {
    if list.ordered {
        match list.start {
            Some(start) if start != 1 => ctx.push_raw(&format!("<ol start=\"{}\">", start)),
            _ => ctx.push_raw("<ol>"),
        }
    } else {
        ctx.push_raw("<ul>");
    }

    ctx.enter(Scope::List {
        spread: list.spread,
    });
    render_children(&list.children, ctx);
    ctx.exit();

    ctx.push_raw(if list.ordered { "</ol>" } else { "</ul>" });
}

fn render_list_item(item: &markdown::mdast::ListItem, ctx: &mut Context) {
    match item.checked {
        Some(checked) => {
            ctx.push_raw("<li class=\"task-list-item\">");
            ctx.push_raw(if checked {
                "<input type=\"checkbox\" disabled checked /> "
            } else {
                "<input type=\"checkbox\" disabled /> "
            });
        }
        None => ctx.push_raw("<li>"),
    }
    render_children(&item.children, ctx);
    ctx.push_raw("</li>");
}

fn render_image(url: &str, alt: &str, title: Option<&str>, ctx: &mut Context) {
    ctx.push_raw("<img src=\"");
    ctx.push_attr_value(url);
    ctx.push_raw("\" alt=\"");
    ctx.push_attr_value(alt);
    ctx.push_raw("\"");
    if let Some(title) = title {
        ctx.push_raw(" title=\"");
        ctx.push_attr_value(title);
        ctx.push_raw("\"");
    }
    ctx.push_raw(" />");
}

fn render_table(table: &markdown::mdast::Table, ctx: &mut Context) {
    ctx.push_raw("<table>");
    let mut rows = table.children.iter();

    if let Some(Node::TableRow(head)) = rows.next() {
        ctx.push_raw("<thead>");
        render_table_row(head, "th", &table.align, ctx);
        ctx.push_raw("</thead>");
    }

    let body: Vec<_> = rows.collect();
    if !body.is_empty() {
        ctx.push_raw("<tbody>");
        for row in body {
            if let Node::TableRow(row) = row {
                render_table_row(row, "td", &table.align, ctx);
            }
        }
        ctx.push_raw("</tbody>");
    }

    ctx.push_raw("</table>");
}

fn render_table_row(
    row: &markdown::mdast::TableRow,
    cell_tag: &str,
    aligns: &[AlignKind],
    ctx: &mut Context,
) {
    ctx.push_raw("<tr>");
    for (i, cell) in row.children.iter().enumerate() {
        let Node::TableCell(cell) = cell else {
            continue;
        };
        let align = match aligns.get(i) {
            Some(AlignKind::Left) => " align=\"left\"",
            Some(AlignKind::Right) => " align=\"right\"",
            Some(AlignKind::Center) => " align=\"center\"",
            Some(AlignKind::None) | None => "",
        };
        ctx.push_raw(&format!("<{}{}>", cell_tag, align));
        render_children(&cell.children, ctx);
        ctx.push_raw(&format!("</{}>", cell_tag));
    }
    ctx.push_raw("</tr>");
}

/// Renders a footnote call as a numbered superscript link to its definition.
///
/// Repeated calls get suffixed ids (`fnref-x`, `fnref-x-2`, ...) so each one has
/// its own back reference.
fn render_footnote_reference(fnref: &markdown::mdast::FootnoteReference, ctx: &mut Context) {
    let (ordinal, count) = ctx.reference_footnote(&fnref.identifier);
    let safe_id = footnote_id(&fnref.identifier);
    let suffix = if count == 1 {
        String::new()
    } else {
        format!("-{}", count)
    };
    ctx.push_raw(&format!(
        "<sup><a href=\"#user-content-fn-{id}\" id=\"user-content-fnref-{id}{suffix}\" data-footnote-ref aria-describedby=\"footnote-label\">{ordinal}</a></sup>",
        id = safe_id,
    ));
}

/// Renders a footnote definition aside; the section is emitted at the end.
fn render_footnote_definition(fndef: &markdown::mdast::FootnoteDefinition, ctx: &mut Context) {
    let content = ctx.capture(|ctx| render_children(&fndef.children, ctx));
    ctx.push_footnote(&fndef.identifier, content);
}

/// Recursively renders an AST node to HTML, updating the context state.
pub fn render_node(node: &Node, ctx: &mut Context) {
    match node {
        Node::Root(root) => render_children(&root.children, ctx),
        Node::Text(text) => ctx.push_text(&text.value),
        Node::Paragraph(para) => render_paragraph(para, ctx),
        Node::Heading(heading) => {
            ctx.push_raw(&format!("<h{}>", heading.depth));
            render_children(&heading.children, ctx);
            ctx.push_raw(&format!("</h{}>", heading.depth));
        }
        Node::Strong(strong) => {
            ctx.push_raw("<strong>");
            render_children(&strong.children, ctx);
            ctx.push_raw("</strong>");
        }
        Node::Emphasis(emphasis) => {
            ctx.push_raw("<em>");
            render_children(&emphasis.children, ctx);
            ctx.push_raw("</em>");
        }
        Node::Delete(delete) => {
            ctx.push_raw("<del>");
            render_children(&delete.children, ctx);
            ctx.push_raw("</del>");
        }
        Node::InlineCode(code) => {
            ctx.push_raw("<code>");
            ctx.push_text(&code.value);
            ctx.push_raw("</code>");
        }
        Node::Break(_) => ctx.push_raw("<br />"),
        Node::ThematicBreak(_) => ctx.push_raw("<hr />"),
        Node::Link(link) => {
            let props = link_props(&link.url, link.title.as_deref());
            render_overridable("a", props, &link.children, ctx);
        }
        Node::LinkReference(reference) => match ctx.definition(&reference.identifier) {
            Some((url, title)) => {
                let props = link_props(&url, title.as_deref());
                render_overridable("a", props, &reference.children, ctx);
            }
            None => {
                log::warn!("Undefined link reference [{}]", reference.identifier);
                render_children(&reference.children, ctx);
            }
        },
        Node::Image(img) => render_image(&img.url, &img.alt, img.title.as_deref(), ctx),
        Node::ImageReference(reference) => match ctx.definition(&reference.identifier) {
            Some((url, title)) => render_image(&url, &reference.alt, title.as_deref(), ctx),
            None => {
                log::warn!("Undefined image reference [{}]", reference.identifier);
                ctx.push_text(&reference.alt);
            }
        },
        Node::Definition(_) => {}
        Node::Blockquote(quote) => {
            render_overridable("blockquote", Props::new(), &quote.children, ctx);
        }
        Node::Code(code) => render_code(code, ctx),
        Node::List(list) => render_list(list, ctx),
        Node::ListItem(item) => render_list_item(item, ctx),
        Node::Table(table) => render_table(table, ctx),
        Node::TableRow(_) | Node::TableCell(_) => {}
        // Only produced when raw HTML parsing is on.
        Node::Html(html) => {
            debug_assert!(ctx.raw_html_allowed());
            ctx.push_raw(&html.value);
        }
        Node::FootnoteReference(fnref) => render_footnote_reference(fnref, ctx),
        Node::FootnoteDefinition(fndef) => render_footnote_definition(fndef, ctx),
        Node::MdxJsxFlowElement(elem) => {
            render_jsx(elem.name.as_deref(), &elem.attributes, &elem.children, ctx);
        }
        Node::MdxJsxTextElement(elem) => {
            render_jsx(elem.name.as_deref(), &elem.attributes, &elem.children, ctx);
        }
        Node::MdxjsEsm(esm) => log::debug!("Skipping ESM statement: {}", esm.value),
        Node::MdxFlowExpression(expr) => log::debug!("Skipping expression {{{}}}", expr.value),
        Node::MdxTextExpression(expr) => log::debug!("Skipping expression {{{}}}", expr.value),
        Node::Yaml(_) | Node::Toml(_) => {}
        _ => {
            log::warn!("Unhandled markdown node type: {:?}", node);
        }
    }
}
