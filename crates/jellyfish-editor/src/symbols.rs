//! Static symbol tables: every HTML tag, CSS property and CSS value the
//! editor suggests. Declaration order is the suggestion order, so the most
//! common entries come first.

use crate::locator::Context;
use crate::mode::Mode;

// ── Symbol ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Symbol {
    /// Matched against the typed word.
    pub key: &'static str,
    /// Snippet spliced into the buffer on accept.
    pub insert_text: &'static str,
    pub description: &'static str,
}

const fn sym(key: &'static str, insert_text: &'static str, description: &'static str) -> Symbol {
    Symbol { key, insert_text, description }
}

// ── HTML tags ─────────────────────────────────────────────────────────────

pub static HTML_TAGS: &[Symbol] = &[
    sym("div", "<div></div>", "Generic block container."),
    sym("span", "<span></span>", "Generic inline container."),
    sym("p", "<p></p>", "Paragraph."),
    sym("a", "<a href=\"\"></a>", "Hyperlink."),
    sym("h1", "<h1></h1>", "Top-level heading."),
    sym("h2", "<h2></h2>", "Second-level heading."),
    sym("h3", "<h3></h3>", "Third-level heading."),
    sym("h4", "<h4></h4>", "Fourth-level heading."),
    sym("h5", "<h5></h5>", "Fifth-level heading."),
    sym("h6", "<h6></h6>", "Sixth-level heading."),
    sym("img", "<img src=\"\" alt=\"\">", "Embedded image."),
    sym("button", "<button></button>", "Clickable button."),
    sym("input", "<input type=\"text\">", "Form input field."),
    sym("label", "<label></label>", "Caption for a form control."),
    sym("form", "<form></form>", "Form with submittable controls."),
    sym("ul", "<ul></ul>", "Unordered list."),
    sym("ol", "<ol></ol>", "Ordered list."),
    sym("li", "<li></li>", "List item."),
    sym("section", "<section></section>", "Generic document section."),
    sym("header", "<header></header>", "Introductory content or navigation."),
    sym("footer", "<footer></footer>", "Footer of a section or page."),
    sym("nav", "<nav></nav>", "Navigation links."),
    sym("main", "<main></main>", "Dominant content of the body."),
    sym("article", "<article></article>", "Self-contained composition."),
    sym("aside", "<aside></aside>", "Content tangential to the main content."),
    sym("table", "<table></table>", "Tabular data."),
    sym("thead", "<thead></thead>", "Table header rows."),
    sym("tbody", "<tbody></tbody>", "Table body rows."),
    sym("tr", "<tr></tr>", "Table row."),
    sym("th", "<th></th>", "Table header cell."),
    sym("td", "<td></td>", "Table data cell."),
    sym("strong", "<strong></strong>", "Strong importance."),
    sym("em", "<em></em>", "Stress emphasis."),
    sym("br", "<br>", "Line break."),
    sym("hr", "<hr>", "Thematic break."),
    sym("textarea", "<textarea></textarea>", "Multi-line text input."),
    sym("select", "<select></select>", "Drop-down list."),
    sym("option", "<option></option>", "Option in a select list."),
    sym("html", "<html></html>", "Root of an HTML document."),
    sym("head", "<head></head>", "Document metadata container."),
    sym("body", "<body></body>", "Document content."),
    sym("title", "<title></title>", "Document title."),
    sym("meta", "<meta charset=\"UTF-8\">", "Document metadata."),
    sym("link", "<link rel=\"stylesheet\" href=\"\">", "Link to an external resource."),
    sym("style", "<style></style>", "Embedded CSS."),
    sym("script", "<script></script>", "Embedded or referenced script."),
    sym("iframe", "<iframe src=\"\"></iframe>", "Nested browsing context."),
    sym("video", "<video src=\"\" controls></video>", "Embedded video."),
    sym("audio", "<audio src=\"\" controls></audio>", "Embedded audio."),
    sym("canvas", "<canvas></canvas>", "Scriptable bitmap drawing surface."),
    sym("code", "<code></code>", "Fragment of computer code."),
    sym("pre", "<pre></pre>", "Preformatted text."),
    sym("blockquote", "<blockquote></blockquote>", "Extended quotation."),
];

// ── CSS properties ────────────────────────────────────────────────────────

pub static CSS_PROPERTIES: &[Symbol] = &[
    sym("color", "color: ;", "Foreground (text) color."),
    sym("background", "background: ;", "Shorthand for all background properties."),
    sym("background-color", "background-color: ;", "Background color of an element."),
    sym("background-image", "background-image: url();", "Background image(s) of an element."),
    sym("margin", "margin: ;", "Outer spacing on all four sides."),
    sym("margin-top", "margin-top: ;", "Outer spacing above the element."),
    sym("margin-bottom", "margin-bottom: ;", "Outer spacing below the element."),
    sym("padding", "padding: ;", "Inner spacing on all four sides."),
    sym("padding-top", "padding-top: ;", "Inner spacing above the content."),
    sym("padding-bottom", "padding-bottom: ;", "Inner spacing below the content."),
    sym("border", "border: ;", "Shorthand for border width, style and color."),
    sym("border-radius", "border-radius: ;", "Rounded corners."),
    sym("border-color", "border-color: ;", "Color of all four borders."),
    sym("width", "width: ;", "Content box width."),
    sym("height", "height: ;", "Content box height."),
    sym("max-width", "max-width: ;", "Maximum width."),
    sym("min-height", "min-height: ;", "Minimum height."),
    sym("display", "display: ;", "Display type (block, inline, flex, grid, ...)."),
    sym("position", "position: ;", "Positioning scheme."),
    sym("top", "top: ;", "Offset from the top edge."),
    sym("left", "left: ;", "Offset from the left edge."),
    sym("right", "right: ;", "Offset from the right edge."),
    sym("bottom", "bottom: ;", "Offset from the bottom edge."),
    sym("font-size", "font-size: ;", "Size of the font."),
    sym("font-weight", "font-weight: ;", "Weight (boldness) of the font."),
    sym("font-family", "font-family: ;", "Prioritized list of font families."),
    sym("line-height", "line-height: ;", "Height of a line box."),
    sym("text-align", "text-align: ;", "Horizontal alignment of inline content."),
    sym("text-decoration", "text-decoration: ;", "Decorative lines on text."),
    sym("flex", "flex: ;", "Flex grow, shrink and basis shorthand."),
    sym("flex-direction", "flex-direction: ;", "Main axis direction of a flex container."),
    sym("justify-content", "justify-content: ;", "Main-axis alignment of flex/grid items."),
    sym("align-items", "align-items: ;", "Cross-axis alignment of flex/grid items."),
    sym("gap", "gap: ;", "Gutter between rows and columns."),
    sym("grid-template-columns", "grid-template-columns: ;", "Column track sizes of a grid."),
    sym("opacity", "opacity: ;", "Transparency level."),
    sym("overflow", "overflow: ;", "Behavior for content overflowing the box."),
    sym("cursor", "cursor: ;", "Mouse cursor shown over the element."),
    sym("box-shadow", "box-shadow: ;", "Shadow effects around the frame."),
    sym("transition", "transition: ;", "Animated property transitions."),
    sym("transform", "transform: ;", "Rotate, scale, skew or translate."),
    sym("z-index", "z-index: ;", "Stacking order."),
];

// ── CSS values ────────────────────────────────────────────────────────────

pub static CSS_VALUES: &[Symbol] = &[
    sym("none", "none", "No value / hidden."),
    sym("auto", "auto", "Computed by the browser."),
    sym("block", "block", "Block-level box."),
    sym("inline", "inline", "Inline box."),
    sym("inline-block", "inline-block", "Inline-level block container."),
    sym("flex", "flex", "Flex container."),
    sym("grid", "grid", "Grid container."),
    sym("center", "center", "Centered alignment."),
    sym("space-between", "space-between", "Evenly distributed, no outer space."),
    sym("space-around", "space-around", "Evenly distributed with half-size outer space."),
    sym("flex-start", "flex-start", "Packed toward the start."),
    sym("flex-end", "flex-end", "Packed toward the end."),
    sym("row", "row", "Horizontal main axis."),
    sym("column", "column", "Vertical main axis."),
    sym("relative", "relative", "Positioned relative to its normal position."),
    sym("absolute", "absolute", "Positioned relative to the nearest positioned ancestor."),
    sym("fixed", "fixed", "Positioned relative to the viewport."),
    sym("sticky", "sticky", "Relative until a scroll threshold, then fixed."),
    sym("hidden", "hidden", "Content is clipped."),
    sym("scroll", "scroll", "Content is clipped, scrollbars always shown."),
    sym("bold", "bold", "Bold font weight."),
    sym("normal", "normal", "Normal value."),
    sym("italic", "italic", "Italic font style."),
    sym("underline", "underline", "Underlined text."),
    sym("pointer", "pointer", "Link cursor."),
    sym("solid", "solid", "Solid line style."),
    sym("dashed", "dashed", "Dashed line style."),
    sym("transparent", "transparent", "Fully transparent color."),
    sym("white", "white", "#ffffff"),
    sym("black", "black", "#000000"),
    sym("red", "red", "#ff0000"),
    sym("green", "green", "#008000"),
    sym("blue", "blue", "#0000ff"),
    sym("gray", "gray", "#808080"),
    sym("inherit", "inherit", "Inherit the parent's computed value."),
];

// ── Lookup ────────────────────────────────────────────────────────────────

/// The table completions draw from for a mode/context pair.
pub fn table(mode: Mode, context: Context) -> &'static [Symbol] {
    match (mode, context) {
        (Mode::Html, Context::Tag | Context::Text) => HTML_TAGS,
        (Mode::Css, Context::Property) => CSS_PROPERTIES,
        (Mode::Css, Context::Value) => CSS_VALUES,
        _ => &[],
    }
}

/// Exact (case-insensitive) key lookup across a mode's tables.
pub fn lookup(mode: Mode, key: &str) -> Option<&'static Symbol> {
    let find = |table: &'static [Symbol]| table.iter().find(|s| s.key.eq_ignore_ascii_case(key));
    match mode {
        Mode::Html => find(HTML_TAGS),
        Mode::Css => find(CSS_PROPERTIES).or_else(|| find(CSS_VALUES)),
    }
}

/// Entries of `table` whose key starts with `word`, ignoring ASCII case, in
/// declaration order, at most `max`.
pub fn filter(table: &'static [Symbol], word: &str, max: usize) -> Vec<&'static Symbol> {
    table
        .iter()
        .filter(|s| {
            s.key
                .get(..word.len())
                .is_some_and(|prefix| prefix.eq_ignore_ascii_case(word))
        })
        .take(max)
        .collect()
}
