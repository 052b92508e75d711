//! Dev loop: serve the packed page over HTTP and re-pack whenever files
//! under the asset root change.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use notify::{Event, RecursiveMode, Watcher};
use tiny_http::{Header, Response, Server};

use crate::assets::AssetKind;
use crate::error::{PackError, Result};
use crate::PackOptions;

mod page;

/// Quiet period that folds a burst of file events into one rebuild.
const DEBOUNCE: Duration = Duration::from_millis(150);

struct DevState {
    html: Mutex<String>,
    version: AtomicU64,
}

/// Build the page for `root`, serve it on `port`, and rebuild on change.
/// Blocks until the server stops.
pub fn run_dev_server(root: PathBuf, options: PackOptions, port: u16) -> Result<()> {
    let state = Arc::new(DevState {
        html: Mutex::new(String::new()),
        version: AtomicU64::new(0),
    });
    if let Err(e) = rebuild(&root, &options, &state) {
        log::error!("initial build failed: {e}");
        store(&state, page::build_error_page(&root.display().to_string(), &e.to_string()));
    }

    let (tx, rx) = mpsc::channel::<notify::Result<Event>>();
    let mut watcher = notify::recommended_watcher(tx).map_err(PackError::serve)?;
    watcher
        .watch(&root, RecursiveMode::Recursive)
        .map_err(PackError::serve)?;

    let watch_state = Arc::clone(&state);
    let watch_root = root.clone();
    thread::spawn(move || {
        while let Ok(first) = rx.recv() {
            let mut relevant = is_relevant(&first);
            thread::sleep(DEBOUNCE);
            for more in rx.try_iter() {
                relevant |= is_relevant(&more);
            }
            if !relevant {
                continue;
            }
            // A failed rebuild keeps serving the last good page.
            if let Err(e) = rebuild(&watch_root, &options, &watch_state) {
                log::error!("rebuild failed: {e}");
            }
        }
    });

    let server = Server::http(("127.0.0.1", port)).map_err(PackError::serve)?;
    let html_type = Header::from_bytes(&b"Content-Type"[..], &b"text/html; charset=utf-8"[..])
        .map_err(|_| PackError::serve("invalid content-type header"))?;

    eprintln!("brawl-pack dev server");
    eprintln!("  assets:  {}", root.display());
    eprintln!("  page:    http://localhost:{port}/");
    eprintln!("  watching for changes...");

    for request in server.incoming_requests() {
        let url = request.url().to_string();
        let result = match url.as_str() {
            "/" | "/index.html" => {
                let html = match state.html.lock() {
                    Ok(html) => html.clone(),
                    Err(poisoned) => poisoned.into_inner().clone(),
                };
                request.respond(Response::from_string(html).with_header(html_type.clone()))
            }
            "/version" => {
                let version = state.version.load(Ordering::SeqCst);
                request.respond(Response::from_string(version.to_string()))
            }
            _ => request.respond(Response::from_string("not found").with_status_code(404)),
        };
        if let Err(e) = result {
            log::warn!("failed to answer request: {e}");
        }
    }

    drop(watcher);
    Ok(())
}

fn rebuild(root: &Path, options: &PackOptions, state: &DevState) -> Result<()> {
    let output = crate::pack_dir(root, options)?;
    log::info!("{}", output.bundle.summary());
    store(state, page::with_reload_hook(&output.html));
    Ok(())
}

fn store(state: &DevState, html: String) {
    match state.html.lock() {
        Ok(mut slot) => *slot = html,
        Err(poisoned) => *poisoned.into_inner() = html,
    }
    let version = state.version.fetch_add(1, Ordering::SeqCst) + 1;
    log::info!("page rebuilt (build {version})");
}

/// Whether a file event can change the packed output: a created, modified
/// or removed asset, or any directory-level change.
fn is_relevant(event: &notify::Result<Event>) -> bool {
    let Ok(event) = event else {
        return false;
    };
    if !(event.kind.is_create() || event.kind.is_modify() || event.kind.is_remove()) {
        return false;
    }
    event.paths.iter().any(|p| match p.extension() {
        Some(ext) => ext.to_str().and_then(AssetKind::from_extension).is_some(),
        None => true,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use notify::event::{AccessKind, CreateKind, EventKind, ModifyKind};

    fn event(kind: EventKind, path: &str) -> notify::Result<Event> {
        Ok(Event::new(kind).add_path(PathBuf::from(path)))
    }

    #[test]
    fn asset_changes_trigger_rebuild() {
        assert!(is_relevant(&event(
            EventKind::Create(CreateKind::File),
            "assets/goblin.PNG"
        )));
        assert!(is_relevant(&event(
            EventKind::Modify(ModifyKind::Any),
            "assets/sfx/hit.wav"
        )));
        assert!(is_relevant(&event(
            EventKind::Create(CreateKind::Folder),
            "assets/enemies"
        )));
    }

    #[test]
    fn unrelated_changes_are_ignored() {
        assert!(!is_relevant(&event(
            EventKind::Modify(ModifyKind::Any),
            "assets/notes.txt"
        )));
        assert!(!is_relevant(&event(EventKind::Access(AccessKind::Any), "a.png")));
        assert!(!is_relevant(&Err(notify::Error::generic("boom"))));
    }
}
