//! Generate static files

use anyhow::{bail, Result};
use notify::RecursiveMode;
use notify_debouncer_mini::new_debouncer;
use std::path::{Path, PathBuf};
use std::sync::mpsc::channel;
use std::time::{Duration, Instant};

use crate::generator::Generator;
use crate::Folio;

/// Build the whole site, failing if any page could not be generated
pub fn run(folio: &Folio) -> Result<()> {
    let start = Instant::now();

    let blog = folio.load_blog()?;
    tracing::info!("Loaded {} posts", blog.source().len());

    let generator = Generator::new(folio)?;
    let report = generator.generate(&blog)?;

    tracing::info!(
        "Wrote {} pages and copied {} static files",
        report.pages_written,
        report.assets_copied
    );

    if !report.is_success() {
        let failed: Vec<String> = report
            .failures
            .iter()
            .map(|f| format!("  {}: {:#}", f.route, f.error))
            .collect();
        bail!(
            "{} of {} pages failed to generate:\n{}",
            report.failures.len(),
            report.failures.len() + report.pages_written,
            failed.join("\n")
        );
    }

    let duration = start.elapsed();
    tracing::info!("Generated in {:.2}s", duration.as_secs_f64());

    Ok(())
}

/// Watch posts, static files and config, regenerating on change
pub fn watch(folio: &Folio) -> Result<()> {
    tracing::info!("Watching for changes. Press Ctrl+C to stop.");
    watch_with(folio, || {})
}

/// Like [`watch`], calling `on_rebuilt` after every successful rebuild
pub fn watch_with(folio: &Folio, mut on_rebuilt: impl FnMut()) -> Result<()> {
    let (tx, rx) = channel();
    let mut debouncer = new_debouncer(Duration::from_millis(500), tx)?;

    for (path, mode) in watched_paths(folio) {
        debouncer.watcher().watch(&path, mode)?;
        tracing::debug!("Watching: {:?}", path);
    }

    for result in rx {
        let events = match result {
            Ok(events) => events,
            Err(e) => {
                tracing::error!("Watch error: {:?}", e);
                continue;
            }
        };

        let changed: Vec<_> = events.iter().filter(|e| is_relevant(&e.path)).collect();
        if changed.is_empty() {
            continue;
        }
        for event in changed {
            tracing::info!("File changed: {}", event.path.display());
        }

        // Reload so config edits take effect
        match Folio::new(&folio.base_dir).and_then(|f| run(&f)) {
            Ok(()) => on_rebuilt(),
            Err(e) => tracing::error!("Generation failed: {:#}", e),
        }
    }

    Ok(())
}

/// Inputs of a build that exist on disk
fn watched_paths(folio: &Folio) -> Vec<(PathBuf, RecursiveMode)> {
    let config_path = folio.base_dir.join(crate::CONFIG_FILE);
    [
        (folio.posts_dir.clone(), RecursiveMode::Recursive),
        (folio.static_dir.clone(), RecursiveMode::Recursive),
        (config_path, RecursiveMode::NonRecursive),
    ]
    .into_iter()
    .filter(|(path, _)| path.exists())
    .collect()
}

/// Skip editor swap files and VCS metadata
fn is_relevant(path: &Path) -> bool {
    let path_str = path.to_string_lossy();
    !path_str.contains(".git")
        && !path_str.contains(".DS_Store")
        && !path_str.ends_with('~')
        && !path_str.ends_with(".swp")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_post(folio: &Folio, file: &str, raw: &str) {
        fs::create_dir_all(&folio.posts_dir).unwrap();
        fs::write(folio.posts_dir.join(file), raw).unwrap();
    }

    #[test]
    fn test_run_builds_site() {
        let tmp = TempDir::new().unwrap();
        let folio = Folio::new(tmp.path()).unwrap();
        write_post(
            &folio,
            "hello.md",
            "---\ntitle: Hello\ndate: 2024-01-01\ndescription: Hi\npath: /hello\n---\nHi there\n",
        );

        run(&folio).unwrap();
        assert!(folio.public_dir.join("blog/index.html").exists());
        assert!(folio.public_dir.join("hello/index.html").exists());
    }

    #[test]
    fn test_run_reports_failed_pages() {
        let tmp = TempDir::new().unwrap();
        let folio = Folio::new(tmp.path()).unwrap();
        write_post(
            &folio,
            "good.md",
            "---\ntitle: Good\ndate: 2024-01-01\ndescription: ok\npath: /good\n---\n",
        );
        write_post(
            &folio,
            "bad.md",
            "---\ntitle: Bad\ndate: not a date\ndescription: no\npath: /bad\n---\n",
        );

        let err = run(&folio).unwrap_err().to_string();
        assert!(err.starts_with("2 of 3 pages failed"), "{}", err);
        assert!(err.contains("not a date"));
        // The healthy post is still written
        assert!(folio.public_dir.join("good/index.html").exists());
    }

    #[test]
    fn test_run_writes_good_pages_despite_malformed_post() {
        let tmp = TempDir::new().unwrap();
        let folio = Folio::new(tmp.path()).unwrap();
        write_post(
            &folio,
            "good.md",
            "---\ntitle: Good\ndate: 2024-01-01\ndescription: ok\npath: /good\n---\n",
        );
        write_post(&folio, "bad.md", "---\ntitle: [oops\n---\n");

        let err = run(&folio).unwrap_err().to_string();
        assert!(err.starts_with("1 of 2 pages failed"), "{}", err);
        assert!(err.contains("posts/bad.md"));
        assert!(folio.public_dir.join("good/index.html").exists());
    }

    #[test]
    fn test_watched_paths_skip_missing_inputs() {
        let tmp = TempDir::new().unwrap();
        let folio = Folio::new(tmp.path()).unwrap();
        assert!(watched_paths(&folio).is_empty());

        fs::create_dir_all(&folio.posts_dir).unwrap();
        fs::write(tmp.path().join(crate::CONFIG_FILE), "title: Mine\n").unwrap();
        let paths: Vec<_> = watched_paths(&folio).into_iter().map(|(p, _)| p).collect();
        assert_eq!(
            paths,
            vec![folio.posts_dir.clone(), tmp.path().join(crate::CONFIG_FILE)]
        );
    }

    #[test]
    fn test_is_relevant() {
        assert!(is_relevant(Path::new("posts/a.md")));
        assert!(!is_relevant(Path::new("posts/.a.md.swp")));
        assert!(!is_relevant(Path::new(".git/index")));
    }
}
