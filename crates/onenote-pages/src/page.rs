//! Blank page documents for the OneNote pages endpoint.

/// Content type the pages endpoint expects for XHTML bodies
pub const PAGE_CONTENT_TYPE: &str = "application/xhtml+xml";

/// Minimal XHTML document; OneNote shows `<title>` as the page heading.
pub fn blank_page(title: &str) -> String {
    format!(
        "<!DOCTYPE html>\n\
         <html>\n\
         <head>\n\
         <title>{}</title>\n\
         </head>\n\
         <body>\n\
         </body>\n\
         </html>\n",
        escape_xml(title)
    )
}

fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            c => escaped.push(c),
        }
    }
    escaped
}
