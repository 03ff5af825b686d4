//! File-level story work: finding story files, reading story JSON, writing rendered
//! stories. The library stays shell agnostic; everything that touches disk lives here.

use jiramd_babel::story::{preferred_story_file_name, render_single_story_markdown};
use jiramd_babel::Story;
use serde_json::Value;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Markdown files under `path`: the file itself, or every `.md` file below a directory,
/// sorted so output order is stable.
pub fn collect_markdown_files(path: &Path) -> io::Result<Vec<PathBuf>> {
    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }
    let mut files = Vec::new();
    let mut pending = vec![path.to_path_buf()];
    while let Some(dir) = pending.pop() {
        for entry in fs::read_dir(&dir)? {
            let entry_path = entry?.path();
            if entry_path.is_dir() {
                pending.push(entry_path);
            } else if entry_path
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("md"))
            {
                files.push(entry_path);
            }
        }
    }
    files.sort();
    debug!(count = files.len(), dir = %path.display(), "collected story files");
    Ok(files)
}

/// Stories from JSON: one story object or an array of them.
pub fn stories_from_json(json: &str) -> serde_json::Result<Vec<Story>> {
    match serde_json::from_str::<Value>(json)? {
        array @ Value::Array(_) => serde_json::from_value(array),
        other => Ok(vec![serde_json::from_value(other)?]),
    }
}

/// Render every story into `dir`, one file each. Returns the written paths.
pub fn write_stories(stories: &[Story], dir: &Path, max_file_name_len: usize) -> io::Result<Vec<PathBuf>> {
    fs::create_dir_all(dir)?;
    let mut written = Vec::with_capacity(stories.len());
    for story in stories {
        let path = dir.join(preferred_story_file_name(story, max_file_name_len));
        fs::write(&path, render_single_story_markdown(story))?;
        info!(path = %path.display(), "wrote story");
        written.push(path);
    }
    Ok(written)
}

/// All stories rendered into one stream, separated by a blank line.
pub fn render_all(stories: &[Story]) -> String {
    stories
        .iter()
        .map(render_single_story_markdown)
        .collect::<Vec<_>>()
        .join("\n")
}
