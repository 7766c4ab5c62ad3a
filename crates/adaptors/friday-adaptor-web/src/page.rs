//! Browser dashboard page

use friday_core::{Persona, HISTORY_DISPLAY_LIMIT};

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Render the dashboard for `personas`, in answer order
pub fn render_index(personas: &[Persona], greeting: &str) -> String {
    let personas_js = serde_json::to_string(personas).unwrap_or_else(|_| "[]".to_string());
    let title = personas
        .iter()
        .map(|p| p.name.as_str())
        .collect::<Vec<_>>()
        .join(" x ");

    INDEX_TEMPLATE
        .replace("{TITLE}", &escape_html(&title))
        .replace("{GREETING}", &escape_html(greeting))
        .replace("{PERSONAS_JS}", &personas_js)
        .replace("{HISTORY_LIMIT}", &HISTORY_DISPLAY_LIMIT.to_string())
}

const INDEX_TEMPLATE: &str = r##"<!doctype html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>{TITLE} Dashboard</title>
  <style>
    :root {
      --bg: #0b1020;
      --card: #141b2f;
      --primary: #22d3ee;
      --text: #e2e8f0;
      --muted: #94a3b8;
      --danger: #ef4444;
      --border: rgba(255,255,255,0.08);
    }
    * { box-sizing: border-box; }
    body {
      margin: 0;
      font-family: system-ui, -apple-system, sans-serif;
      background: var(--bg);
      color: var(--text);
    }
    main { max-width: 760px; margin: 40px auto; padding: 0 16px; }
    h1 { font-size: 22px; margin: 0 0 6px; }
    .greeting { color: var(--muted); margin-bottom: 20px; }
    .card {
      background: var(--card);
      border: 1px solid var(--border);
      border-radius: 10px;
      padding: 16px;
      margin-bottom: 16px;
    }
    form { display: flex; gap: 8px; }
    input[type=text] {
      flex: 1;
      padding: 10px 12px;
      border-radius: 8px;
      border: 1px solid var(--border);
      background: #0f172a;
      color: var(--text);
    }
    button {
      padding: 10px 16px;
      border: 0;
      border-radius: 8px;
      background: var(--primary);
      color: #0b1020;
      font-weight: 600;
      cursor: pointer;
    }
    button:disabled { opacity: 0.5; cursor: wait; }
    .error { border-color: var(--danger); color: var(--danger); }
    .hidden { display: none; }
    pre { white-space: pre-wrap; margin: 0; font-family: inherit; }
    .entry { border-top: 1px solid var(--border); padding: 10px 0; }
    .entry:first-child { border-top: 0; }
    .stamp { color: var(--muted); font-size: 12px; }
  </style>
</head>
<body>
  <main>
    <h1>{TITLE}</h1>
    <div class="greeting">{GREETING}</div>

    <div class="card">
      <form id="query-form">
        <input id="query" type="text" placeholder="Ask anything..." autocomplete="off">
        <button id="submit" type="submit">Send</button>
      </form>
    </div>

    <div id="error" class="card error hidden"></div>
    <div id="response" class="card hidden"><pre id="response-text"></pre></div>
    <div id="history" class="card hidden"><h2>History</h2><div id="history-list"></div></div>
  </main>

  <script>
    const personas = {PERSONAS_JS};
    const historyLimit = {HISTORY_LIMIT};
    const fallback = 'Failed to reach the proxy endpoint';
    const state = { loading: false, history: [] };

    const $ = (id) => document.getElementById(id);

    async function ask(persona, input) {
      let data;
      try {
        const res = await fetch('/api/' + persona.slug, {
          method: 'POST',
          headers: { 'Content-Type': 'application/json' },
          body: JSON.stringify({ input })
        });
        data = await res.json();
      } catch (_) {
        throw new Error(persona.name + ' error: ' + fallback);
      }
      if (data.error) throw new Error(persona.name + ' error: ' + data.error);
      if (typeof data.response !== 'string') throw new Error(persona.name + ' error: ' + fallback);
      return persona.name + ': ' + data.response;
    }

    // Settled results are in persona order; the first failure in that order wins
    function combine(results) {
      const failed = results.find((r) => r.status === 'rejected');
      if (failed) throw failed.reason;
      return results.map((r) => r.value).join('\n\n');
    }

    function stamp(d) {
      return d.toLocaleDateString('en-US') + ', ' + d.toLocaleTimeString('en-US');
    }

    function renderHistory() {
      const list = $('history-list');
      list.innerHTML = '';
      for (const entry of state.history.slice(0, historyLimit)) {
        const el = document.createElement('div');
        el.className = 'entry';
        const q = document.createElement('div');
        q.textContent = 'Query: ' + entry.query;
        const r = document.createElement('pre');
        r.textContent = 'Response: ' + entry.response;
        const t = document.createElement('div');
        t.className = 'stamp';
        t.textContent = entry.timestamp;
        el.append(q, r, t);
        list.appendChild(el);
      }
      $('history').classList.toggle('hidden', state.history.length === 0);
    }

    $('query-form').addEventListener('submit', async (e) => {
      e.preventDefault();
      const query = $('query').value;
      if (state.loading || !query.trim()) return;

      state.loading = true;
      $('submit').disabled = true;
      $('error').classList.add('hidden');

      try {
        const combined = combine(await Promise.allSettled(personas.map((p) => ask(p, query))));
        state.history.unshift({ query, response: combined, timestamp: stamp(new Date()) });
        $('response-text').textContent = combined;
        $('response').classList.remove('hidden');
        renderHistory();
      } catch (err) {
        $('error').textContent = err.message;
        $('error').classList.remove('hidden');
      } finally {
        state.loading = false;
        $('submit').disabled = false;
        $('query').value = '';
      }
    });
  </script>
</body>
</html>
"##;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_index() {
        let html = render_index(&[Persona::grok(), Persona::friday()], "All systems green.");
        assert!(html.contains("<title>Grok x F.R.I.D.A.Y. Dashboard</title>"));
        assert!(html.contains("All systems green."));
        assert!(html.contains(r#"{"name":"Grok","slug":"grok"}"#));
        assert!(html.contains("const historyLimit = 5;"));
        assert!(!html.contains("{GREETING}"));
    }

    #[test]
    fn test_first_failure_in_persona_order_is_shown() {
        let html = render_index(&[Persona::grok(), Persona::friday()], "hi");
        assert!(html.contains("Promise.allSettled(personas.map("));
        assert!(!html.contains("Promise.all("));
        assert!(html.contains("results.find((r) => r.status === 'rejected')"));
    }

    #[test]
    fn test_greeting_is_escaped() {
        let html = render_index(&[Persona::grok()], "<b>hi</b>");
        assert!(html.contains("&lt;b&gt;hi&lt;/b&gt;"));
    }
}
