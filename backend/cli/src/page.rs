//! Server-rendered landing page.
//!
//! The page is rebuilt from the current [`PageState`] on every request; the
//! small script only posts files and reloads.

use placefinder_core::UploadLimits;
use placefinder_markdown::{escape_html, Renderer};
use placefinder_session::PageState;

const STYLE: &str = r#"
body { font-family: system-ui, sans-serif; background: #f9fafb; color: #374151; margin: 0; }
main { max-width: 56rem; margin: 0 auto; padding: 3rem 1rem; }
header { text-align: center; margin-bottom: 2rem; }
header h1 { color: #111827; margin-bottom: .5rem; }
.card { background: #fff; border: 1px solid #e5e7eb; border-radius: .75rem; padding: 1.5rem; }
.upload { display: flex; flex-direction: column; align-items: center; margin-bottom: 1.5rem; }
.upload label { background: #2563eb; color: #fff; padding: .75rem 1.5rem; border-radius: .5rem; cursor: pointer; }
.upload input { display: none; }
.hint { font-size: .875rem; color: #6b7280; }
.error { background: #fef2f2; color: #b91c1c; padding: 1rem; border-radius: .375rem; margin-bottom: 1.5rem; }
.loading { text-align: center; padding: 2rem; }
.preview img { width: 100%; max-height: 500px; object-fit: contain; background: #f3f4f6; border-radius: .5rem; }
.actions { display: grid; grid-template-columns: 1fr 1fr; gap: 1rem; margin: 1rem 0 1.5rem; }
.actions button { padding: .5rem 1rem; border-radius: .375rem; font-size: 1rem; cursor: pointer; }
.actions button:disabled { opacity: .5; cursor: default; }
#identify { background: #2563eb; color: #fff; border: none; }
#another { background: #fff; border: 1px solid #d1d5db; }
.analysis { background: #f9fafb; border: 1px solid #e5e7eb; border-radius: .5rem; padding: 1.5rem 2rem; }
.analysis h2 { color: #1d4ed8; }
.analysis h3 { color: #2563eb; }
.verdict-line { font-size: 1.125rem; font-weight: bold; }
.verdict { color: #1d4ed8; }
.subsection { font-weight: bold; color: #1f2937; margin-left: 1.5rem; }
.section { font-weight: bold; color: #111827; }
.item-title { font-weight: bold; }
li.indent-0 { margin-left: 1.5rem; }
li.indent-1 { margin-left: 2.5rem; }
li.indent-2 { margin-left: 3rem; }
.spacer { height: .5rem; }
"#;

const SCRIPT: &str = r#"
const input = document.getElementById('image-upload');
async function send(url, body, type) {
  const init = { method: 'POST' };
  if (body) { init.body = body; init.headers = { 'Content-Type': type || 'application/octet-stream' }; }
  await fetch(url, init);
  location.reload();
}
input.addEventListener('change', () => {
  const file = input.files[0];
  if (file) send('/api/analyze', file, file.type);
});
const identify = document.getElementById('identify');
if (identify) identify.addEventListener('click', () => { identify.disabled = true; send('/api/reanalyze'); });
const another = document.getElementById('another');
if (another) another.addEventListener('click', () => input.click());
"#;

/// Render the full page for `state`.
pub fn render_page(state: &PageState, limits: &UploadLimits) -> String {
    let mut body = String::new();

    body.push_str("<div class=\"upload\">");
    body.push_str(&format!(
        "<label for=\"image-upload\">Upload Location Image to Identify<input id=\"image-upload\" type=\"file\" accept=\"{}\"></label>",
        escape_html(&limits.accepted_types.join(","))
    ));
    body.push_str(&format!(
        "<p class=\"hint\">PNG, JPG, JPEG or WEBP (MAX. {}MB)</p></div>",
        limits.max_bytes / (1024 * 1024)
    ));

    if let Some(error) = &state.error {
        body.push_str(&format!("<div class=\"error\"><p>{}</p></div>", escape_html(error)));
    }

    match &state.image {
        None if state.loading => body.push_str("<div class=\"loading\">Loading...</div>"),
        None => {}
        Some(image) => {
            body.push_str(&format!(
                "<div class=\"preview\"><img src=\"{}\" alt=\"Location to analyze\"></div>",
                image.data_uri()
            ));
            let (disabled, label) = if state.loading {
                (" disabled", "Analyzing...")
            } else {
                ("", "Identify Location")
            };
            body.push_str(&format!(
                "<div class=\"actions\"><button id=\"identify\"{disabled}>{label}</button><button id=\"another\">Upload Another Image</button></div>"
            ));
        }
    }

    let blocks = state.blocks();
    if !blocks.is_empty() {
        body.push_str("<section class=\"analysis\"><h2>Location Analysis</h2>");
        body.push_str(&Renderer::to_html(&blocks));
        body.push_str("</section>");
    }

    format!(
        "<!doctype html>\n<html lang=\"en\"><head><meta charset=\"utf-8\"><meta name=\"viewport\" content=\"width=device-width, initial-scale=1\"><title>Free AI Location Finder from Picture</title><style>{STYLE}</style></head><body><main><header><h1>Free AI Location Finder from Picture</h1><p>Upload any travel photo and instantly identify locations, landmarks, and destinations around the world</p></header><div class=\"card\">{body}</div></main><script>{SCRIPT}</script></body></html>"
    )
}
