use std::env;
use std::fs;
use std::path::PathBuf;
use std::process;

// Trunk post-build hook: make the staged page load its bundle relative to
// wherever it is hosted, so the globe can be served from a sub-path.
fn main() {
    let Ok(staging_dir) = env::var("TRUNK_STAGING_DIR") else {
        eprintln!("TRUNK_STAGING_DIR is not set; run this as a Trunk hook");
        process::exit(1);
    };

    let staged_html_path = PathBuf::from(staging_dir).join("index.html");

    let html = match fs::read_to_string(&staged_html_path) {
        Ok(html) => html,
        Err(e) => {
            eprintln!("Cannot read {}: {}", staged_html_path.display(), e);
            process::exit(1);
        }
    };

    let html = html
        .replace("/globe-render-engine.js", "./globe-render-engine.js")
        .replace("/globe-render-engine_bg.wasm", "./globe-render-engine_bg.wasm");

    if let Err(e) = fs::write(&staged_html_path, html) {
        eprintln!("Cannot write {}: {}", staged_html_path.display(), e);
        process::exit(1);
    }
}
