//! Server-rendered HTML pages.

use std::fmt::Write;
use std::path::Path;

use filedeck_core::{DirectoryListing, format_datetime, format_optional_size};
use filedeck_ops::SearchHit;
use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};

/// Characters escaped inside a single URL path segment.
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'?')
    .add(b'<')
    .add(b'>')
    .add(b'`')
    .add(b'{')
    .add(b'}');

const STYLE: &str = "\
body{font-family:system-ui,sans-serif;margin:2rem;color:#222}\
table{border-collapse:collapse;width:100%}\
th,td{text-align:left;padding:.3rem .6rem;border-bottom:1px solid #ddd}\
form.inline{display:inline}\
button.link{background:none;border:none;color:#0645ad;cursor:pointer;padding:0;font:inherit}\
.toolbar{margin:1rem 0;display:flex;gap:1rem;flex-wrap:wrap}\
.path{font-family:monospace}.error{color:#b00}";

/// Posts `data-api` forms with fetch and reloads, surfacing `{error}`.
const SCRIPT: &str = r#"
document.querySelectorAll('form[data-api]').forEach(function (form) {
  form.addEventListener('submit', function (ev) {
    ev.preventDefault();
    var data = new FormData(form);
    var body = form.enctype === 'multipart/form-data' ? data : new URLSearchParams(data);
    fetch(form.action, { method: 'POST', body: body })
      .then(function (r) { return r.json(); })
      .then(function (body) { if (body.error) { alert(body.error); } else { location.reload(); } });
  });
});
"#;

/// Escape text for HTML element and attribute content.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Download URL for a path relative to the session directory.
pub fn download_href(relative: &Path) -> String {
    let segments: Vec<String> = relative
        .components()
        .map(|c| utf8_percent_encode(&c.as_os_str().to_string_lossy(), SEGMENT).to_string())
        .collect();
    format!("/download/{}", segments.join("/"))
}

fn page(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html><head><meta charset=\"utf-8\"><title>{}</title>\
         <style>{STYLE}</style></head><body>{body}<script>{SCRIPT}</script></body></html>",
        escape(title)
    )
}

fn navigate_button(path: &Path, label: &str) -> String {
    format!(
        "<form class=\"inline\" method=\"post\" action=\"/navigate\">\
         <input type=\"hidden\" name=\"path\" value=\"{}\">\
         <button class=\"link\" type=\"submit\">{}</button></form>",
        escape(&path.to_string_lossy()),
        escape(label)
    )
}

fn toolbar(current: &Path, clipboard: &str) -> String {
    format!(
        "<div class=\"toolbar\">\
         <form method=\"post\" action=\"/navigate\"><input name=\"path\" size=\"50\" value=\"{path}\">\
         <button type=\"submit\">Go</button></form>\
         <form method=\"get\" action=\"/search\"><input name=\"q\" placeholder=\"Search\">\
         <button type=\"submit\">Search</button></form>\
         <form data-api method=\"post\" action=\"/create_folder\"><input name=\"name\" placeholder=\"New folder\">\
         <button type=\"submit\">Create</button></form>\
         <form data-api method=\"post\" action=\"/upload\" enctype=\"multipart/form-data\">\
         <input type=\"file\" name=\"file\"><button type=\"submit\">Upload</button></form>\
         <form data-api method=\"post\" action=\"/paste\"><button type=\"submit\">Paste</button></form>\
         <span>{clipboard}</span></div>",
        path = escape(&current.to_string_lossy()),
        clipboard = escape(clipboard),
    )
}

fn item_actions(path: &Path) -> String {
    let path = escape(&path.to_string_lossy());
    format!(
        "<form data-api class=\"inline\" method=\"post\" action=\"/copy\">\
         <input type=\"hidden\" name=\"path\" value=\"{path}\"><button type=\"submit\">Copy</button></form> \
         <form data-api class=\"inline\" method=\"post\" action=\"/cut\">\
         <input type=\"hidden\" name=\"path\" value=\"{path}\"><button type=\"submit\">Cut</button></form> \
         <form data-api class=\"inline\" method=\"post\" action=\"/rename\">\
         <input type=\"hidden\" name=\"old_path\" value=\"{path}\"><input name=\"new_name\" size=\"12\">\
         <button type=\"submit\">Rename</button></form> \
         <form data-api class=\"inline\" method=\"post\" action=\"/delete\">\
         <input type=\"hidden\" name=\"path\" value=\"{path}\"><button type=\"submit\">Delete</button></form>"
    )
}

/// The main listing page.
pub fn render_index(listing: &DirectoryListing, clipboard: &str) -> String {
    let mut body = format!(
        "<h1>filedeck</h1><p class=\"path\">{}</p>{}",
        escape(&listing.path.to_string_lossy()),
        toolbar(&listing.path, clipboard)
    );

    body.push_str("<table><tr><th>Name</th><th>Size</th><th>Modified</th><th></th></tr>");
    if let Some(parent) = &listing.parent {
        let _ = write!(
            body,
            "<tr><td>{}</td><td></td><td></td><td></td></tr>",
            navigate_button(parent, "..")
        );
    }
    for entry in &listing.entries {
        let name = if entry.is_folder() {
            navigate_button(&entry.path, &format!("{}/", entry.name))
        } else {
            format!(
                "<a href=\"{}\">{}</a>",
                escape(&download_href(Path::new(entry.name.as_str()))),
                escape(&entry.name)
            )
        };
        let _ = write!(
            body,
            "<tr><td>{name}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
            format_optional_size(entry.size),
            format_datetime(entry.modified.as_ref()),
            item_actions(&entry.path)
        );
    }
    let _ = write!(body, "</table><p>{}</p>", escape(&listing.summary()));

    page(&listing.path.to_string_lossy(), &body)
}

/// Search results page.
pub fn render_search(query: &str, current: &Path, hits: &[SearchHit]) -> String {
    let mut body = format!(
        "<h1>Search results for \"{}\"</h1><p class=\"path\">in {}</p><p><a href=\"/\">Back</a></p>",
        escape(query),
        escape(&current.to_string_lossy())
    );

    if hits.is_empty() {
        body.push_str("<p>No matches.</p>");
    } else {
        body.push_str("<table><tr><th>Name</th><th>Location</th><th>Size</th><th>Modified</th></tr>");
        for hit in hits {
            let entry = &hit.entry;
            let name = if entry.is_folder() {
                navigate_button(&entry.path, &format!("{}/", entry.name))
            } else {
                format!(
                    "<a href=\"{}\">{}</a>",
                    escape(&download_href(&hit.relative)),
                    escape(&entry.name)
                )
            };
            let location = hit
                .relative
                .parent()
                .map(|p| p.to_string_lossy().into_owned())
                .unwrap_or_default();
            let _ = write!(
                body,
                "<tr><td>{name}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
                escape(&location),
                format_optional_size(entry.size),
                format_datetime(entry.modified.as_ref())
            );
        }
        let _ = write!(body, "</table><p>{} result(s)</p>", hits.len());
    }

    page("Search", &body)
}

/// Error page shown when a directory cannot be displayed.
pub fn render_error(message: &str) -> String {
    page(
        "Error",
        &format!(
            "<h1>Error</h1><p class=\"error\">{}</p><p><a href=\"/\">Back</a></p>",
            escape(message)
        ),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape() {
        assert_eq!(
            escape("<a href=\"x\">&'"),
            "&lt;a href=&quot;x&quot;&gt;&amp;&#39;"
        );
    }

    #[test]
    fn test_download_href_encodes_segments() {
        assert_eq!(
            download_href(Path::new("my docs/100% #1.txt")),
            "/download/my%20docs/100%25%20%231.txt"
        );
    }
}
