//! Just enough HTML querying to pull category members out of a wiki page.
//!
//! There is no DOM here: tags are found with regexes and element extents are
//! recovered by counting same-named open/close tags. Malformed markup never
//! fails, it only produces fewer (or wider) matches.

use regex::{Captures, Regex};
use std::ops::Range;
use std::sync::LazyLock;

/// A comment, or the opening tag of an element whose content is raw text.
static OPAQUE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<!--.*?(?:-->|\z)|<(script|style|textarea|title)\b[^>]*>")
        .expect("opaque pattern is valid")
});

// Quotes only delimit values after `=`; a stray quote elsewhere is an ordinary character.
static TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<(/?)([A-Za-z][A-Za-z0-9:-]*)((?:[^>"'=]|=\s*"[^"]*"|=\s*'[^']*'|=|["'])*)>"#)
        .expect("tag pattern is valid")
});

static ATTR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"([^\s"'=<>/]+)(?:\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'=<>`]+)))?"#)
        .expect("attribute pattern is valid")
});

static ENTITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"&(#[0-9]{1,7}|#[xX][0-9a-fA-F]{1,6}|[A-Za-z]{2,8});").expect("entity pattern is valid")
});

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    /// Lowercased tag name.
    pub name: String,
    pub attrs: Vec<(String, String)>,
    pub closing: bool,
    pub self_closing: bool,
    pub span: Range<usize>,
}

impl Tag {
    /// Attribute value with entities decoded. Attribute names are case-insensitive.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.attr("class")
            .is_some_and(|classes| classes.split_ascii_whitespace().any(|c| c == class))
    }

    fn is_void(&self) -> bool {
        self.self_closing || VOID_ELEMENTS.contains(&self.name.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    /// Position of the opening tag in the document's tag list.
    pub tag_index: usize,
    /// From the start of the opening tag to the end of the closing tag.
    pub outer: Range<usize>,
    /// Between the opening and closing tags.
    pub inner: Range<usize>,
}

impl Element {
    fn contains(&self, other: &Element) -> bool {
        self.tag_index != other.tag_index
            && self.outer.start <= other.outer.start
            && other.outer.end <= self.outer.end
    }
}

pub struct Document<'a> {
    source: &'a str,
    tags: Vec<Tag>,
}

impl<'a> Document<'a> {
    pub fn parse(source: &'a str) -> Self {
        let masked = mask_opaque(source);
        let tags = TAG.captures_iter(&masked).filter_map(parse_tag).collect();
        Self { source, tags }
    }

    /// Every element carrying `class` as one of its class tokens, in document order.
    pub fn elements_with_class(&self, class: &str) -> Vec<Element> {
        self.tags
            .iter()
            .enumerate()
            .filter(|(_, tag)| !tag.closing && tag.has_class(class))
            .map(|(index, _)| self.element_at(index))
            .collect()
    }

    /// The innermost element of `candidates` that encloses `element`.
    pub fn closest<'e>(&self, candidates: &'e [Element], element: &Element) -> Option<&'e Element> {
        candidates
            .iter()
            .filter(|candidate| candidate.contains(element))
            .max_by_key(|candidate| candidate.outer.start)
    }

    pub fn first_descendant(&self, element: &Element, name: &str) -> Option<&Tag> {
        self.tags
            .iter()
            .skip(element.tag_index + 1)
            .take_while(|tag| tag.span.start < element.inner.end)
            .find(|tag| !tag.closing && tag.name.eq_ignore_ascii_case(name))
    }

    pub fn inner_html(&self, element: &Element) -> &'a str {
        &self.source[element.inner.clone()]
    }

    pub fn text_content(&self, element: &Element) -> String {
        text_content(self.inner_html(element))
    }

    fn element_at(&self, index: usize) -> Element {
        let open = &self.tags[index];
        if open.is_void() {
            return Element {
                tag_index: index,
                outer: open.span.clone(),
                inner: open.span.end..open.span.end,
            };
        }

        let mut depth = 1usize;
        for tag in &self.tags[index + 1..] {
            if tag.name != open.name {
                continue;
            }
            if tag.closing {
                depth -= 1;
                if depth == 0 {
                    return Element {
                        tag_index: index,
                        outer: open.span.start..tag.span.end,
                        inner: open.span.end..tag.span.start,
                    };
                }
            } else if !tag.self_closing {
                depth += 1;
            }
        }

        // Never closed: runs to the end of the document.
        Element {
            tag_index: index,
            outer: open.span.start..self.source.len(),
            inner: open.span.end..self.source.len(),
        }
    }
}

fn parse_tag(caps: Captures<'_>) -> Option<Tag> {
    let whole = caps.get(0)?;
    let closing = !caps[1].is_empty();
    let name = caps[2].to_ascii_lowercase();
    let body = caps.get(3).map_or("", |m| m.as_str());
    let self_closing = body.trim_end().ends_with('/');

    let attrs = if closing {
        Vec::new()
    } else {
        ATTR.captures_iter(body)
            .map(|a| {
                let key = a[1].to_ascii_lowercase();
                let value = a
                    .get(2)
                    .or_else(|| a.get(3))
                    .or_else(|| a.get(4))
                    .map_or(String::new(), |v| decode_entities(v.as_str()));
                (key, value)
            })
            .collect()
    };

    Some(Tag {
        name,
        attrs,
        closing,
        self_closing,
        span: whole.range(),
    })
}

/// Blanks comments and the bodies of `script`, `style`, `textarea` and
/// `title` with spaces, so byte offsets into the result still index `source`.
/// The raw-text element tags themselves are kept.
fn mask_opaque(source: &str) -> String {
    let lowered = source.to_ascii_lowercase();
    let mut masked = String::with_capacity(source.len());
    let mut copied = 0;
    let mut pos = 0;

    while let Some(caps) = OPAQUE.captures_at(source, pos) {
        let whole = match caps.get(0) {
            Some(m) => m,
            None => break,
        };
        let blank = match caps.get(1) {
            None => whole.range(),
            Some(name) => {
                let closer = format!("</{}", name.as_str().to_ascii_lowercase());
                let body_end = lowered[whole.end()..]
                    .find(&closer)
                    .map_or(source.len(), |offset| whole.end() + offset);
                whole.end()..body_end
            }
        };

        masked.push_str(&source[copied..blank.start]);
        masked.push_str(&" ".repeat(blank.len()));
        copied = blank.end;
        pos = blank.end.max(whole.end());
    }

    masked.push_str(&source[copied..]);
    masked
}

/// Visible text of a markup fragment: comments, raw-text bodies and tags
/// removed, entities decoded.
pub fn text_content(fragment: &str) -> String {
    let masked = mask_opaque(fragment);
    let without_tags = TAG.replace_all(&masked, "");
    decode_entities(&without_tags)
}

pub fn decode_entities(text: &str) -> String {
    ENTITY
        .replace_all(text, |caps: &Captures| {
            let entity = &caps[1];
            let decoded = if let Some(hex) = entity
                .strip_prefix("#x")
                .or_else(|| entity.strip_prefix("#X"))
            {
                u32::from_str_radix(hex, 16).ok().and_then(char::from_u32)
            } else if let Some(dec) = entity.strip_prefix('#') {
                dec.parse::<u32>().ok().and_then(char::from_u32)
            } else {
                named_entity(entity)
            };
            decoded.map_or_else(|| caps[0].to_string(), String::from)
        })
        .into_owned()
}

fn named_entity(name: &str) -> Option<char> {
    let c = match name {
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" => '\'',
        "nbsp" => '\u{a0}',
        "ndash" => '–',
        "mdash" => '—',
        "rsquo" => '’',
        "lsquo" => '‘',
        _ => return None,
    };
    Some(c)
}
