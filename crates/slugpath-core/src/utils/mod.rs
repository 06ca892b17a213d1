use crate::config::PathFormat;

/// Normalize free text into a URL-safe slug segment.
///
/// Rules:
/// - Convert to lowercase
/// - Preserve Unicode letters and digits, hyphens and underscores
/// - Replace whitespace with hyphens
/// - Drop everything else (punctuation, emoji)
/// - Trim leading/trailing hyphens
///
/// # Examples
///
/// ```
/// use slugpath_core::slugify;
///
/// assert_eq!(slugify("About Us"), "about-us");
/// assert_eq!(slugify("Café (Menu)!"), "café-menu");
/// assert_eq!(slugify("A  B"), "a--b"); // Consecutive spaces → consecutive hyphens
/// assert_eq!(slugify("-news-"), "news");
/// assert_eq!(slugify("!!!"), "");
/// ```
pub fn slugify(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .filter_map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '_' {
                Some(c)
            } else if c.is_whitespace() {
                Some('-')
            } else {
                None
            }
        })
        .collect::<String>()
        .trim_matches('-')
        .to_string()
}

/// Render a slug chain into a URL path.
///
/// The empty chain is the bare separator with `leading` set, and the empty
/// string otherwise; `trailing` never applies to it.
///
/// # Examples
///
/// ```
/// use slugpath_core::{render_path, PathFormat};
///
/// let format = PathFormat::default();
/// assert_eq!(render_path(&["blog", "2024", "launch"], &format), "/blog/2024/launch");
/// assert_eq!(render_path::<&str>(&[], &format), "/");
/// ```
pub fn render_path<S: AsRef<str>>(segments: &[S], format: &PathFormat) -> String {
    let body = segments
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<&str>>()
        .join(&format.separator);

    if body.is_empty() {
        return if format.leading {
            format.separator.clone()
        } else {
            String::new()
        };
    }

    let mut path = String::with_capacity(body.len() + 2 * format.separator.len());
    if format.leading {
        path.push_str(&format.separator);
    }
    path.push_str(&body);
    if format.trailing {
        path.push_str(&format.separator);
    }
    path
}
