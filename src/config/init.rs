// ABOUTME: Project scaffolding for `stratus init`.
// ABOUTME: Writes wrangler.toml, a minimal worker, and the assets dir with the widget.

use std::path::Path;

use crate::error::{Error, Result};
use crate::types::WorkerName;
use crate::widget;

/// Scaffold a new worker project in `dir`.
///
/// Refuses to touch a directory that already has a wrangler.toml unless
/// `force` is set. Files that already exist (package.json, src/index.ts,
/// public/index.html) are left alone so init is safe on partial projects.
pub fn init_project(dir: &Path, name: &str, domain: &str, force: bool) -> Result<()> {
    let name = WorkerName::new(name).map_err(|e| Error::InvalidConfig(e.to_string()))?;

    let toml_path = dir.join("wrangler.toml");
    if toml_path.exists() && !force {
        return Err(Error::AlreadyExists(toml_path));
    }

    std::fs::write(&toml_path, wrangler_toml(&name))?;

    let src_dir = dir.join("src");
    std::fs::create_dir_all(&src_dir)?;
    let index_ts = src_dir.join("index.ts");
    if !index_ts.exists() {
        std::fs::write(&index_ts, worker_source())?;
    }

    let public = dir.join("public");
    widget::write_into(&public)?;
    let index_html = public.join("index.html");
    if !index_html.exists() {
        std::fs::write(&index_html, index_page(&name))?;
    }

    let pkg = dir.join("package.json");
    if !pkg.exists() {
        std::fs::write(&pkg, package_json(&name))?;
    }

    println!("Initialized stratus project: {name}");
    println!("\nNext steps:");
    println!("  npm install");
    println!("  npx wrangler dev             # local dev at http://localhost:8788");
    println!("  stratus upload");
    println!("  stratus smoke https://{name}.{domain}");
    println!("  stratus promote");

    Ok(())
}

fn wrangler_toml(name: &WorkerName) -> String {
    format!(
        r#"name = "{name}"
main = "src/index.ts"
compatibility_date = "2024-12-01"
workers_dev = true
preview_urls = true

[assets]
directory = "public"

[dev]
port = 8788
"#
    )
}

fn worker_source() -> &'static str {
    r#"import { Hono } from "hono";

type Bindings = { ASSETS: Fetcher; APP_VERSION?: string };

const app = new Hono<{ Bindings: Bindings }>();

app.get("/api/health", (c) =>
  c.json({
    status: "ok",
    version: c.env.APP_VERSION || "dev",
    timestamp: new Date().toISOString(),
  })
);

app.all("*", async (c) => c.env.ASSETS.fetch(c.req.raw));

export default app;
"#
}

fn index_page(name: &WorkerName) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en" data-theme="dark">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>{name}</title>
  <link href="https://cdn.jsdelivr.net/npm/daisyui@4/dist/full.min.css" rel="stylesheet">
  <script src="https://cdn.tailwindcss.com"></script>
</head>
<body class="min-h-screen bg-base-100 flex items-center justify-center">
  <div class="text-center space-y-6 p-8">
    <h1 class="text-4xl font-bold">{name}</h1>
    <div class="stats shadow">
      <div class="stat">
        <div class="stat-title">Health</div>
        <div class="stat-value text-success" id="health-status">...</div>
        <div class="stat-desc" id="health-version"></div>
      </div>
    </div>
    <div class="flex justify-center">
      <stratus-version-picker></stratus-version-picker>
    </div>
  </div>
  <script type="module" src="/version-picker.js"></script>
  <script>
    fetch('/api/health')
      .then(r => r.json())
      .then(d => {{
        document.getElementById('health-status').textContent = d.status;
        document.getElementById('health-version').textContent = 'v' + d.version;
      }})
      .catch(() => {{
        document.getElementById('health-status').textContent = 'offline';
        document.getElementById('health-status').classList.replace('text-success', 'text-error');
      }});
  </script>
</body>
</html>
"#
    )
}

fn package_json(name: &WorkerName) -> String {
    format!(
        r#"{{
  "name": "{name}",
  "version": "1.0.0",
  "private": true,
  "dependencies": {{
    "hono": "^4"
  }},
  "devDependencies": {{
    "wrangler": "^4"
  }}
}}
"#
    )
}
