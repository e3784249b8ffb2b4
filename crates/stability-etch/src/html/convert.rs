//! Lowering of the comrak AST into the markup tree
//!
//! Block containers put a newline text node between and around their
//! children, so the serialized HTML reads one block element per line.

use super::tree::{Element, MarkupNode, MarkupTree};
use comrak::nodes::{AstNode, ListType, NodeValue};
use comrak::{parse_document, Arena, Options};

/// Parse Markdown (GFM tables and strikethrough enabled) into a markup tree.
pub fn markdown_to_tree(markdown: &str) -> MarkupTree {
    let arena = Arena::new();
    let mut options = Options::default();
    options.extension.table = true;
    options.extension.strikethrough = true;

    let root = parse_document(&arena, markdown, &options);
    MarkupTree::new(join_blocks(convert_children(root, false)))
}

fn convert_children<'a>(node: &'a AstNode<'a>, tight: bool) -> Vec<MarkupNode> {
    node.children()
        .flat_map(|child| convert_node(child, tight))
        .collect()
}

fn convert_node<'a>(node: &'a AstNode<'a>, tight: bool) -> Vec<MarkupNode> {
    let value = node.data.borrow().value.clone();

    match value {
        NodeValue::Document => join_blocks(convert_children(node, false)),
        NodeValue::Paragraph if tight => convert_children(node, false),
        NodeValue::Paragraph => vec![element("p", convert_children(node, false))],
        NodeValue::Heading(heading) => vec![element(
            format!("h{}", heading.level),
            convert_children(node, false),
        )],
        NodeValue::BlockQuote => vec![element(
            "blockquote",
            wrap_blocks(convert_children(node, false)),
        )],
        NodeValue::List(list) => {
            let items = wrap_blocks(convert_children(node, list.tight));
            let el = match list.list_type {
                ListType::Bullet => Element::new("ul"),
                ListType::Ordered if list.start != 1 => {
                    Element::new("ol").with_attr("start", list.start.to_string())
                }
                ListType::Ordered => Element::new("ol"),
            };
            vec![el.with_children(items).into()]
        }
        NodeValue::Item(_) => {
            let children = convert_children(node, tight);
            let children = if tight { children } else { wrap_blocks(children) };
            vec![element("li", children)]
        }
        NodeValue::CodeBlock(block) => {
            let mut code = Element::new("code");
            if let Some(lang) = block.info.split_whitespace().next() {
                code.set_attr("class", format!("language-{}", lang));
            }
            let code = code.with_children(vec![MarkupNode::text(block.literal)]);
            vec![element("pre", vec![code.into()])]
        }
        NodeValue::HtmlBlock(block) => vec![MarkupNode::Raw(trim_line_end(&block.literal))],
        NodeValue::ThematicBreak => vec![Element::new("hr").into()],
        NodeValue::Table(_) => vec![convert_table(node)],
        NodeValue::Text(text) => vec![MarkupNode::text(text.to_string())],
        NodeValue::Code(code) => vec![element(
            "code",
            vec![MarkupNode::text(code.literal.to_string())],
        )],
        NodeValue::HtmlInline(html) => vec![MarkupNode::Raw(html.to_string())],
        NodeValue::SoftBreak => vec![MarkupNode::text("\n")],
        NodeValue::LineBreak => vec![Element::new("br").into(), MarkupNode::text("\n")],
        NodeValue::Emph => vec![element("em", convert_children(node, false))],
        NodeValue::Strong => vec![element("strong", convert_children(node, false))],
        NodeValue::Strikethrough => vec![element("del", convert_children(node, false))],
        NodeValue::Link(link) => {
            let mut a = Element::new("a").with_attr("href", link.url.to_string());
            if !link.title.is_empty() {
                a.set_attr("title", link.title.to_string());
            }
            vec![a.with_children(convert_children(node, false)).into()]
        }
        NodeValue::Image(link) => {
            let alt = MarkupTree::new(convert_children(node, false));
            let alt = text_of(&alt.nodes);
            let mut img = Element::new("img")
                .with_attr("src", link.url.to_string())
                .with_attr("alt", alt);
            if !link.title.is_empty() {
                img.set_attr("title", link.title.to_string());
            }
            vec![img.into()]
        }
        _ => convert_children(node, tight),
    }
}

/// `table > thead > tr > th` for the header row, `tbody > tr > td` for the
/// rest. `tbody` is omitted when there are no body rows.
fn convert_table<'a>(node: &'a AstNode<'a>) -> MarkupNode {
    let mut head = vec![];
    let mut body = vec![];

    for row in node.children() {
        let header = matches!(row.data.borrow().value, NodeValue::TableRow(true));
        let cell_tag = if header { "th" } else { "td" };
        let cells: Vec<MarkupNode> = row
            .children()
            .map(|cell| element(cell_tag, convert_children(cell, false)))
            .collect();
        let tr = element("tr", wrap_blocks(cells));
        if header {
            head.push(tr);
        } else {
            body.push(tr);
        }
    }

    let mut sections = vec![element("thead", wrap_blocks(head))];
    if !body.is_empty() {
        sections.push(element("tbody", wrap_blocks(body)));
    }
    element("table", wrap_blocks(sections))
}

fn element(tag: impl Into<String>, children: Vec<MarkupNode>) -> MarkupNode {
    Element::new(tag).with_children(children).into()
}

/// Newline between, before and after each node
fn wrap_blocks(nodes: Vec<MarkupNode>) -> Vec<MarkupNode> {
    let mut out = Vec::with_capacity(nodes.len() * 2 + 1);
    out.push(MarkupNode::text("\n"));
    for node in nodes {
        out.push(node);
        out.push(MarkupNode::text("\n"));
    }
    out
}

/// Newline between nodes only
fn join_blocks(nodes: Vec<MarkupNode>) -> Vec<MarkupNode> {
    let mut out = Vec::with_capacity(nodes.len() * 2);
    for (i, node) in nodes.into_iter().enumerate() {
        if i > 0 {
            out.push(MarkupNode::text("\n"));
        }
        out.push(node);
    }
    out
}

fn text_of(nodes: &[MarkupNode]) -> String {
    Element::new("").with_children(nodes.to_vec()).text_content()
}

fn trim_line_end(html: &str) -> String {
    html.trim_end_matches('\n').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn render(md: &str) -> String {
        markdown_to_tree(md).to_html()
    }

    #[test]
    fn test_paragraph_and_inline() {
        assert_eq!(
            render("Hello *big* **world** `code`"),
            "<p>Hello <em>big</em> <strong>world</strong> <code>code</code></p>"
        );
    }

    #[test]
    fn test_link() {
        assert_eq!(
            render("[fs](fs.html \"File system\")"),
            "<p><a href=\"fs.html\" title=\"File system\">fs</a></p>"
        );
    }

    #[test]
    fn test_table_layout() {
        let html = render("| A | B |\n| - | - |\n| 1 | 2 |");
        assert_eq!(
            html,
            "<table>\n<thead>\n<tr>\n<th>A</th>\n<th>B</th>\n</tr>\n</thead>\n\
             <tbody>\n<tr>\n<td>1</td>\n<td>2</td>\n</tr>\n</tbody>\n</table>"
        );
    }

    #[test]
    fn test_table_without_body() {
        let html = render("| A | B |\n| - | - |");
        assert_eq!(
            html,
            "<table>\n<thead>\n<tr>\n<th>A</th>\n<th>B</th>\n</tr>\n</thead>\n</table>"
        );
    }

    #[test]
    fn test_raw_html_passthrough() {
        assert_eq!(
            render("a <span class=\"x\">b</span>"),
            "<p>a <span class=\"x\">b</span></p>"
        );
        assert_eq!(render("<div>\nraw\n</div>"), "<div>\nraw\n</div>");
    }

    #[test]
    fn test_lists() {
        assert_eq!(
            render("- one\n- two"),
            "<ul>\n<li>one</li>\n<li>two</li>\n</ul>"
        );
        assert_eq!(render("3. three"), "<ol start=\"3\">\n<li>three</li>\n</ol>");
    }

    #[test]
    fn test_code_block() {
        assert_eq!(
            render("```js\nlet a = 1 < 2;\n```"),
            "<pre><code class=\"language-js\">let a = 1 &lt; 2;\n</code></pre>"
        );
    }

    #[test]
    fn test_blocks_joined_by_newline() {
        assert_eq!(render("# Title\n\nBody"), "<h1>Title</h1>\n<p>Body</p>");
    }
}
