mod content;
mod node;

pub use content::Content;
pub use node::Element;

/// Find an element by ID in the tree.
pub fn find_element<'a>(root: &'a Element, id: &str) -> Option<&'a Element> {
    if root.id == id {
        return Some(root);
    }

    if let Content::Children(children) = &root.content {
        for child in children {
            if let Some(found) = find_element(child, id) {
                return Some(found);
            }
        }
    }

    None
}

/// Find the first element (depth-first) whose data entry `key` equals `value`.
pub fn find_by_data<'a>(root: &'a Element, key: &str, value: &str) -> Option<&'a Element> {
    if root.get_data(key).is_some_and(|v| v == value) {
        return Some(root);
    }

    if let Content::Children(children) = &root.content {
        for child in children {
            if let Some(found) = find_by_data(child, key, value) {
                return Some(found);
            }
        }
    }

    None
}

/// Concatenated text of an element and all its descendants, depth-first.
pub fn text_content(root: &Element) -> String {
    let mut out = String::new();
    collect_text(root, &mut out);
    out
}

fn collect_text(element: &Element, out: &mut String) {
    match &element.content {
        Content::Text(text) => out.push_str(text),
        Content::TextInput { value, .. } => out.push_str(value),
        Content::Children(children) => {
            for child in children {
                collect_text(child, out);
            }
        }
        Content::None => {}
    }
}
