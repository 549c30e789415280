use super::node::{Element, View};

/// Elements that never have children or a closing tag
const VOID_TAGS: &[&str] = &["input", "br", "hr", "img", "meta", "link"];

/// Serialize a view description to HTML. Bindings are not serialized.
pub fn to_html(view: &View) -> String {
    let mut out = String::new();
    write_view(view, &mut out);
    out
}

pub fn element_to_html(el: &Element) -> String {
    let mut out = String::new();
    write_element(el, &mut out);
    out
}

fn write_view(view: &View, out: &mut String) {
    match view {
        View::Element(el) => write_element(el, out),
        View::Text(text) => push_escaped(text, out),
        View::Fragment(nodes) => {
            for node in nodes {
                write_view(node, out);
            }
        }
    }
}

fn write_element(el: &Element, out: &mut String) {
    out.push('<');
    out.push_str(el.tag);
    for attr in &el.attrs {
        out.push(' ');
        out.push_str(attr.name);
        if let Some(value) = &attr.value {
            out.push_str("=\"");
            push_escaped(value, out);
            out.push('"');
        }
    }
    out.push('>');
    if VOID_TAGS.contains(&el.tag) {
        return;
    }
    for child in &el.children {
        write_view(child, out);
    }
    out.push_str("</");
    out.push_str(el.tag);
    out.push('>');
}

fn push_escaped(s: &str, out: &mut String) {
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn void_elements_have_no_close_tag() {
        let view: View = Element::new("input").attr("value", "x").into();
        assert_eq!(to_html(&view), r#"<input value="x">"#);
    }

    #[test]
    fn bare_boolean_attribute() {
        let view: View = Element::new("input").flag("checked").into();
        assert_eq!(to_html(&view), "<input checked>");
    }

    #[test]
    fn nested_with_text() {
        let view: View = Element::new("p")
            .child(Element::new("b").text("a & b"))
            .text(" <c>")
            .into();
        assert_eq!(to_html(&view), "<p><b>a &amp; b</b> &lt;c&gt;</p>");
    }

    #[test]
    fn fragment_concatenates() {
        let view = View::Fragment(vec![
            Element::new("i").into(),
            View::Text("t".into()),
            Element::new("u").into(),
        ]);
        assert_eq!(to_html(&view), "<i></i>t<u></u>");
    }
}
