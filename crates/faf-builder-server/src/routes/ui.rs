//! Landing page, not-found page, and error boundary.
//!
//! The landing page is rendered once per request from static markup with
//! the configured setup command and deploy link substituted in. Its inline
//! script drives the GitHub view through the session API in
//! [`super::sessions`]; all validation happens server-side.

use std::any::Any;
use std::sync::Arc;

use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;

use crate::state::AppState;

/// Build the UI router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/", get(landing_page))
}

// ── Landing page ─────────────────────────────────────────────────────

async fn landing_page(State(state): State<Arc<AppState>>) -> Html<String> {
    Html(render_landing(&state))
}

/// Render the landing page for the given state.
#[must_use]
pub fn render_landing(state: &AppState) -> String {
    let mut html = String::with_capacity(LANDING_HEAD.len() + LANDING_BODY.len() + 512);
    html.push_str(LANDING_HEAD);
    let body = LANDING_BODY
        .replace("{{SETUP_COMMAND}}", &escape_html(&state.setup_command))
        .replace("{{DEPLOY_LINK}}", &escape_html(&state.deploy_link))
        .replace(
            "{{COPY_FEEDBACK_MS}}",
            &state.site.copy_feedback.as_millis().to_string(),
        );
    html.push_str(&body);
    html
}

/// Escape text for use inside HTML element content and quoted attributes.
fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
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

// ── Not found ────────────────────────────────────────────────────────

/// Fallback handler for unmatched paths.
pub async fn not_found() -> Response {
    (StatusCode::NOT_FOUND, Html(status_page(NOT_FOUND_BODY))).into_response()
}

// ── Error boundary ───────────────────────────────────────────────────

/// Response for a handler that panicked.
///
/// Installed through `CatchPanicLayer::custom`. The fault is logged and the
/// visitor gets the static apology page with two recovery actions.
#[allow(clippy::needless_pass_by_value)]
pub fn panic_page(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic payload");
    tracing::error!(panic = detail, "request handler panicked");

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Html(status_page(ERROR_BODY)),
    )
        .into_response()
}

fn status_page(body: &str) -> String {
    let mut html = String::with_capacity(STATUS_HEAD.len() + body.len());
    html.push_str(STATUS_HEAD);
    html.push_str(body);
    html
}

/// Shared head for the 404 and error pages.
const STATUS_HEAD: &str = r##"<!DOCTYPE html>
<html lang="en"><head><meta charset="utf-8"/><meta name="viewport" content="width=device-width,initial-scale=1"/>
<title>Zero-FAF-Builder</title>
<style>
*,*::before,*::after{box-sizing:border-box;margin:0;padding:0}
body{font-family:-apple-system,'Segoe UI',sans-serif;background:#000;color:#FAFAFA;min-height:100vh;display:flex;flex-direction:column;align-items:center;justify-content:center;padding:24px;text-align:center;gap:24px}
.badge{width:96px;height:96px;border-radius:50%;display:flex;align-items:center;justify-content:center;font-size:44px}
.badge-muted{background:#27272A;animation:pulse 2s infinite}
.badge-danger{background:rgba(239,68,68,.1);color:#EF4444}
h2{font-size:30px;font-weight:700;letter-spacing:-.5px}
p{color:#A1A1AA;max-width:28rem}
.actions{display:flex;gap:16px}
.btn{display:inline-flex;padding:10px 20px;border-radius:8px;font-weight:600;font-size:14px;cursor:pointer;text-decoration:none;border:1px solid transparent}
.btn-primary{background:#FFA500;color:#000}
.btn-outline{background:transparent;color:#FAFAFA;border-color:#3F3F46}
@keyframes pulse{50%{opacity:.5}}
</style></head>
"##;

const NOT_FOUND_BODY: &str = r##"<body>
<div class="badge badge-muted" aria-hidden="true">?</div>
<div>
  <h2>404 - Page Not Found</h2>
  <p>This page seems to have rolled away.</p>
</div>
<a class="btn btn-primary" href="/">Return Home</a>
</body></html>
"##;

const ERROR_BODY: &str = r##"<body>
<div class="badge badge-danger" aria-hidden="true">!</div>
<div>
  <h2>Something went wrong!</h2>
  <p>Even the Big Orange gets squeezed sometimes. We've logged this issue.</p>
</div>
<div class="actions">
  <button class="btn btn-primary" onclick="window.location.replace(window.location.href)">Try again</button>
  <button class="btn btn-outline" onclick="window.location.reload()">Reload Page</button>
</div>
</body></html>
"##;

/// CSS and HTML head for the landing page at `/`.
const LANDING_HEAD: &str = r##"<!DOCTYPE html>
<html lang="en"><head><meta charset="utf-8"/><meta name="viewport" content="width=device-width,initial-scale=1"/>
<title>Zero-FAF-Builder</title>
<style>
*,*::before,*::after{box-sizing:border-box;margin:0;padding:0}
:root{--primary:#FFA500;--bg:#000;--text:#FAFAFA;--muted:#A1A1AA;--card:#09090B;--border:#27272A}
body{font-family:-apple-system,'Segoe UI',sans-serif;background:var(--bg);color:var(--text);line-height:1.5;-webkit-font-smoothing:antialiased}
main{min-height:100vh;display:flex;flex-direction:column;align-items:center;justify-content:center;padding:24px;position:relative;overflow:hidden}
.glow{position:absolute;width:384px;height:384px;border-radius:50%;background:rgba(255,165,0,.2);filter:blur(120px);pointer-events:none}
.glow-a{top:25%;left:25%}.glow-b{bottom:25%;right:25%}
.content{max-width:56rem;width:100%;position:relative;z-index:1;display:flex;flex-direction:column;gap:48px;animation:fade .5s ease-out}
.hero{text-align:center;display:flex;flex-direction:column;gap:24px;align-items:center}
.orange{position:relative;width:128px;height:128px;margin-bottom:32px}
.orange-body{width:128px;height:128px;border-radius:50%;background:var(--primary);box-shadow:0 0 50px rgba(255,165,0,.3);background-image:linear-gradient(135deg,rgba(255,255,255,.2),transparent 50%,rgba(0,0,0,.1))}
.orange-leaf{position:absolute;top:-24px;right:0;width:80px;height:80px;transform:rotate(15deg);transition:transform .2s}
.orange-leaf:hover{transform:rotate(25deg)}
h1{font-size:64px;font-weight:700;color:var(--primary)}
.tagline{font-size:22px;color:rgba(250,250,250,.9)}
.actions{display:grid;grid-template-columns:repeat(3,1fr);gap:24px}
.cta{width:100%;display:flex;flex-direction:column;align-items:center;gap:16px;padding:32px 24px;font-size:18px;font-weight:600;background:transparent;border:2px solid var(--primary);color:var(--primary);border-radius:12px;cursor:pointer;text-decoration:none;box-shadow:0 10px 15px rgba(255,165,0,.3);transition:all .2s}
.cta:hover{background:rgba(255,165,0,.2);transform:scale(1.05)}
.cta-fresh{border-color:#A1A1AA;color:#F4F4F5;box-shadow:0 10px 15px rgba(255,255,255,.05)}
.cta-fresh:hover{background:rgba(255,255,255,.3);border-color:#fff}
.cta svg{width:48px;height:48px}
.guide{font-size:13px;color:var(--muted);text-align:center;margin-top:8px}
footer{text-align:center;padding-top:48px;color:var(--muted)}
footer a{color:var(--primary);text-decoration:none}
.modal{position:fixed;inset:0;background:rgba(0,0,0,.8);display:none;align-items:center;justify-content:center;z-index:10}
.modal.open{display:flex}
.dialog{background:var(--card);border:1px solid var(--border);border-radius:12px;padding:24px;width:min(42rem,92vw);display:flex;flex-direction:column;gap:16px;position:relative}
.dialog h2{font-size:24px}
.dialog .desc{color:var(--muted);font-size:14px}
.close{position:absolute;top:12px;right:16px;background:none;border:none;color:var(--muted);font-size:20px;cursor:pointer}
label{font-size:14px;font-weight:500}
.row{display:flex;gap:8px}
input{flex:1;background:transparent;border:1px solid var(--border);border-radius:6px;padding:8px 12px;color:var(--text);font-size:14px}
input.mono{font-family:ui-monospace,monospace}
input.invalid{border-color:#EF4444}
.btn{padding:8px 16px;border-radius:6px;border:1px solid var(--border);background:transparent;color:var(--text);cursor:pointer;font-weight:600}
.btn-primary{width:100%;background:var(--primary);color:#000;border:none}
.btn-primary:disabled{opacity:.5;cursor:not-allowed}
.ok{color:#22C55E;font-size:14px}
.err{color:#EF4444;font-size:14px}
.info{background:#18181B;border-radius:8px;padding:16px;font-size:14px}
.info ul{color:var(--muted);padding-left:20px}
.preview{flex:1;font-family:ui-monospace,monospace;font-size:13px;background:#18181B;border-radius:8px;padding:12px;white-space:pre}
.clone{display:flex;flex-direction:column;gap:8px}
.clone.hidden{display:none}
.hidden{display:none}
@keyframes fade{from{opacity:0}to{opacity:1}}
@media(max-width:768px){h1{font-size:40px}.actions{grid-template-columns:1fr}}
</style></head>
"##;

/// HTML body for the landing page.
const LANDING_BODY: &str = r##"<body>
<main data-testid="main-container">
  <div class="glow glow-a"></div>
  <div class="glow glow-b"></div>
  <div class="content">
    <section class="hero" data-testid="hero-section">
      <div class="orange" data-testid="big-orange-logo" role="img" aria-label="Big Orange Logo">
        <div class="orange-body"></div>
        <svg class="orange-leaf" viewBox="0 0 24 24" fill="#22C55E" stroke="#22C55E" stroke-width="1.5"><path d="M11 20A7 7 0 0 1 9.8 6.1C15.5 5 17 4.48 19 2c1 2 2 4.18 2 8 0 5.5-4.78 10-10 10Z"/><path d="M2 21c0-3 1.85-5.36 5.08-6C9.5 14.52 12 13 13 12" fill="none"/></svg>
      </div>
      <h1>Zero-FAF-Builder</h1>
      <p class="tagline">Zero faff from day zero &mdash; Grok-ready in one click</p>
    </section>

    <section class="actions">
      <div>
        <button class="cta" data-testid="btn-local-folder" onclick="openModal('modal-local')">
          <svg viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2"><path d="M20 20a2 2 0 0 0 2-2V8a2 2 0 0 0-2-2h-7.9a2 2 0 0 1-1.69-.9L9.6 3.9A2 2 0 0 0 7.93 3H4a2 2 0 0 0-2 2v13a2 2 0 0 0 2 2Z"/></svg>
          <span>I have a local folder</span>
        </button>
        <p class="guide">A. Open your terminal &middot; B. Paste the command &middot; C. Run to configure</p>
      </div>
      <div>
        <a class="cta cta-fresh" data-testid="btn-start-fresh" href="{{DEPLOY_LINK}}" target="_blank" rel="noopener noreferrer">
          <svg viewBox="0 0 24 24" fill="currentColor" aria-hidden="true"><path d="M12 1L24 22H0L12 1Z"/></svg>
          <span>Start fresh</span>
        </a>
        <p class="guide">A. Click to start &middot; B. Connect Git account &middot; C. Get live URL</p>
      </div>
      <div>
        <button class="cta" data-testid="btn-github-repo" onclick="openGithub()">
          <svg viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2"><path d="M15 22v-4a4.8 4.8 0 0 0-1-3.5c3 0 6-2 6-5.5.08-1.25-.27-2.48-1-3.5.28-1.15.28-2.35 0-3.5 0 0-1 0-3 1.5-2.64-.5-5.36-.5-8 0C6 2 5 2 5 2c-.3 1.15-.3 2.35 0 3.5A5.4 5.4 0 0 0 4 9c0 3.5 3 5.5 6 5.5-.39.49-.68 1.05-.85 1.65-.17.6-.22 1.23-.15 1.85v4"/><path d="M9 18c-4.51 2-5-2-7-2"/></svg>
          <span>I have a GitHub repo</span>
        </button>
        <p class="guide">A. Copy repo URL &middot; B. Paste in modal &middot; C. Analyze in cloud</p>
      </div>
    </section>

    <footer>
      <p>Built with love by <a href="https://twitter.com/wolfejam" target="_blank" rel="noopener noreferrer">@wolfejam</a>
      &middot; Dedicated to <a href="https://twitter.com/elonmusk" target="_blank" rel="noopener noreferrer">@elonmusk</a>
      and the #1 model &#10084;&#65039;</p>
    </footer>
  </div>

  <div class="modal" id="modal-local" data-testid="modal-local" onclick="if(event.target===this)closeModal('modal-local')">
    <div class="dialog">
      <button class="close" aria-label="Close" onclick="closeModal('modal-local')">&times;</button>
      <h2>Initialize Your Local Project</h2>
      <p class="desc">Run this command in your project folder to add project.faf with Grok MCP integration</p>
      <label for="command">Command</label>
      <div class="row">
        <input id="command" class="mono" value="{{SETUP_COMMAND}}" readonly/>
        <button class="btn" id="btn-copy" title="Copy to clipboard" onclick="copyText($('command').value, 'btn-copy', 'copied')">Copy</button>
      </div>
      <p class="ok hidden" id="copied">&#10003; Command copied to clipboard!</p>
      <div class="info">
        <p><strong>What this does:</strong></p>
        <ul>
          <li>Creates project.faf with quality_bar: zero_errors</li>
          <li>Configures Grok MCP server integration</li>
          <li>Sets up championship orange branding</li>
          <li>Ready for immediate development</li>
        </ul>
      </div>
    </div>
  </div>

  <div class="modal" id="modal-github" data-testid="modal-github" onclick="if(event.target===this)closeGithub()">
    <div class="dialog">
      <button class="close" aria-label="Close" onclick="closeGithub()">&times;</button>
      <h2>Add FAF to Your GitHub Repo</h2>
      <p class="desc">Enter your GitHub repository URL to download it with project.faf injected</p>
      <label for="github-url">GitHub Repository URL</label>
      <input id="github-url" data-testid="input-github-url" placeholder="https://github.com/username/repo"/>
      <p class="err hidden" id="url-error"></p>
      <div class="clone hidden" id="clone-box">
        <div class="row">
          <div class="preview" id="clone-preview"></div>
          <button class="btn" id="btn-copy-github" data-testid="btn-copy-github" title="Copy to clipboard" onclick="copyText($('clone-preview').textContent, 'btn-copy-github', 'copied-github')">Copy</button>
        </div>
        <p class="ok hidden" id="copied-github">&#10003; Commands copied to clipboard!</p>
      </div>
      <button class="btn btn-primary" id="btn-download-github" data-testid="btn-download-github" disabled onclick="submitGithub()">Download ZIP with project.faf</button>
      <div class="info">
        <p><strong>What you'll get:</strong></p>
        <ul>
          <li>Your complete repository code</li>
          <li>project.faf pre-configured at root</li>
          <li>Grok MCP integration ready</li>
          <li>Zero manual setup required</li>
        </ul>
      </div>
    </div>
  </div>
</main>
<script>
const COPY_FEEDBACK_MS = {{COPY_FEEDBACK_MS}};
const $ = (id) => document.getElementById(id);
let sessionId = null;
const copiedTimers = {};
let pollTimer = null;

function openModal(id) { $(id).classList.add('open'); }
function closeModal(id) { $(id).classList.remove('open'); }

async function copyText(text, buttonId, noticeId) {
  try {
    await navigator.clipboard.writeText(text);
  } catch (err) {
    console.error('Failed to copy:', err);
    return;
  }
  $(noticeId).classList.remove('hidden');
  $(buttonId).title = 'Copied!';
  clearTimeout(copiedTimers[noticeId]);
  copiedTimers[noticeId] = setTimeout(() => {
    $(noticeId).classList.add('hidden');
    $(buttonId).title = 'Copy to clipboard';
  }, COPY_FEEDBACK_MS);
}

async function api(method, path, body) {
  const resp = await fetch(path, {
    method,
    headers: body === undefined ? {} : { 'content-type': 'application/json' },
    body: body === undefined ? undefined : JSON.stringify(body),
  });
  const text = await resp.text();
  return { status: resp.status, data: text ? JSON.parse(text) : null };
}

function render(view) {
  const input = $('github-url');
  const error = $('url-error');
  const button = $('btn-download-github');
  if (!view.open) {
    finishGithub();
    return;
  }
  error.textContent = view.error || '';
  error.classList.toggle('hidden', !view.error);
  input.classList.toggle('invalid', Boolean(view.error));
  button.disabled = !input.value || view.state === 'submitting';
  button.textContent = view.submitting_label || 'Download ZIP with project.faf';
}

async function openGithub() {
  const { data } = await api('POST', '/api/github/sessions');
  sessionId = data.id;
  $('github-url').value = '';
  $('clone-box').classList.add('hidden');
  render(data.view);
  openModal('modal-github');
  $('github-url').focus();
}

function finishGithub() {
  clearInterval(pollTimer);
  pollTimer = null;
  sessionId = null;
  $('github-url').value = '';
  $('url-error').classList.add('hidden');
  $('clone-box').classList.add('hidden');
  $('btn-download-github').textContent = 'Download ZIP with project.faf';
  closeModal('modal-github');
}

async function closeGithub() {
  const id = sessionId;
  finishGithub();
  if (id) await api('DELETE', `/api/github/sessions/${id}`);
}

async function preview(url) {
  const { data } = await api('POST', '/api/github/validate', { url });
  $('clone-preview').textContent = data.commands.join('\n');
  $('clone-box').classList.toggle('hidden', data.outcome !== 'valid');
}

$('github-url').addEventListener('input', async (e) => {
  if (!sessionId) return;
  const value = e.target.value;
  const { status, data } = await api('PUT', `/api/github/sessions/${sessionId}/input`, { input: value });
  if (status === 200) render(data);
  preview(value);
});

$('github-url').addEventListener('keydown', (e) => {
  if (e.key === 'Enter') submitGithub();
});

async function submitGithub() {
  if (!sessionId) return;
  const id = sessionId;
  const input = $('github-url').value;
  const { status, data } = await api('POST', `/api/github/sessions/${id}/submit`, { input });
  if (status === 202) {
    render(data.view);
    pollTimer = setInterval(async () => {
      const resp = await api('GET', `/api/github/sessions/${id}`);
      if (resp.status !== 200) { finishGithub(); return; }
      render(resp.data);
    }, 250);
  } else if (status === 422) {
    const view = (await api('GET', `/api/github/sessions/${id}`)).data;
    render(view);
  }
}
</script>
</body></html>
"##;

#[cfg(test)]
mod tests {
    use faf_builder_core::config::SiteConfig;

    use super::*;

    #[test]
    fn escape_html_covers_markup_characters() {
        assert_eq!(
            escape_html(r#"<a href="x">&'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;&amp;&#39;&lt;/a&gt;"
        );
    }

    #[test]
    fn landing_page_embeds_configured_links() {
        let state = AppState::new(SiteConfig::default());
        let html = render_landing(&state);
        assert!(html.contains("<title>Zero-FAF-Builder</title>"));
        assert!(html.contains(
            r#"value="npx faf-cli@latest init --mcp=https://grok-faf-mcp.vercel.app""#
        ));
        assert!(html.contains(
            "https://vercel.com/new/clone?repository-url=https%3A%2F%2Fgithub.com%2Fwolfe-jam%2Fzero-faf-builder&amp;project-name=zero-faf-project"
        ));
        assert!(html.contains("const COPY_FEEDBACK_MS = 2000;"));
        assert!(html.contains(r#"data-testid="btn-copy-github""#));
        assert!(!html.contains("{{"));
    }

    #[test]
    fn panic_page_accepts_str_and_string_payloads() {
        let resp = panic_page(Box::new("boom"));
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let resp = panic_page(Box::new(String::from("boom")));
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
