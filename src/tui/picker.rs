//! File Picker State
//!
//! Directory browser that only offers directories and files whose guessed
//! MIME type is `image/*`.

use crate::controller::is_image_path;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum EntryKind {
    Parent,
    Directory,
    Image,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickerEntry {
    pub name: String,
    pub path: PathBuf,
    pub kind: EntryKind,
}

#[derive(Debug)]
pub struct FilePicker {
    dir: PathBuf,
    entries: Vec<PickerEntry>,
    selected: usize,
    show_hidden: bool,
}

impl FilePicker {
    pub fn open(dir: impl AsRef<Path>) -> io::Result<Self> {
        let dir = dir.as_ref().canonicalize()?;
        let entries = read_entries(&dir, false)?;
        Ok(Self {
            dir,
            entries,
            selected: 0,
            show_hidden: false,
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn entries(&self) -> &[PickerEntry] {
        &self.entries
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn selected_entry(&self) -> Option<&PickerEntry> {
        self.entries.get(self.selected)
    }

    pub fn show_hidden(&self) -> bool {
        self.show_hidden
    }

    /// Re-read the current directory, keeping the cursor on the same entry when possible
    pub fn refresh(&mut self) -> io::Result<()> {
        let current = self.selected_entry().map(|e| e.path.clone());
        self.entries = read_entries(&self.dir, self.show_hidden)?;
        self.selected = current
            .and_then(|p| self.entries.iter().position(|e| e.path == p))
            .unwrap_or(0);
        Ok(())
    }

    pub fn toggle_hidden(&mut self) -> io::Result<()> {
        self.show_hidden = !self.show_hidden;
        self.refresh()
    }

    pub fn move_by(&mut self, delta: isize) {
        if self.entries.is_empty() {
            self.selected = 0;
            return;
        }
        let last = self.entries.len() - 1;
        self.selected = self.selected.saturating_add_signed(delta).min(last);
    }

    pub fn first(&mut self) {
        self.selected = 0;
    }

    pub fn last(&mut self) {
        self.selected = self.entries.len().saturating_sub(1);
    }

    /// Enter the highlighted directory, or return the highlighted image path.
    pub fn activate(&mut self) -> io::Result<Option<PathBuf>> {
        let Some(entry) = self.selected_entry().cloned() else {
            return Ok(None);
        };

        match entry.kind {
            EntryKind::Image => Ok(Some(entry.path)),
            EntryKind::Parent => {
                self.parent()?;
                Ok(None)
            }
            EntryKind::Directory => {
                self.change_dir(entry.path)?;
                Ok(None)
            }
        }
    }

    /// Go up one level, highlighting the directory we came from
    pub fn parent(&mut self) -> io::Result<()> {
        let Some(parent) = self.dir.parent().map(Path::to_path_buf) else {
            return Ok(());
        };
        let came_from = self.dir.clone();
        self.change_dir(parent)?;
        if let Some(index) = self.entries.iter().position(|e| e.path == came_from) {
            self.selected = index;
        }
        Ok(())
    }

    fn change_dir(&mut self, dir: PathBuf) -> io::Result<()> {
        // Read first so a failure leaves the picker where it was
        let entries = read_entries(&dir, self.show_hidden)?;
        debug!(dir = %dir.display(), entries = entries.len(), "Picker changed directory");
        self.dir = dir;
        self.entries = entries;
        self.selected = 0;
        Ok(())
    }
}

fn read_entries(dir: &Path, show_hidden: bool) -> io::Result<Vec<PickerEntry>> {
    let mut entries = Vec::new();

    if let Some(parent) = dir.parent() {
        entries.push(PickerEntry {
            name: "..".to_string(),
            path: parent.to_path_buf(),
            kind: EntryKind::Parent,
        });
    }

    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if !show_hidden && name.starts_with('.') {
            continue;
        }

        let path = entry.path();
        let kind = if path.is_dir() {
            EntryKind::Directory
        } else if path.is_file() && is_image_path(&path) {
            EntryKind::Image
        } else {
            continue;
        };

        entries.push(PickerEntry { name, path, kind });
    }

    entries.sort_by(|a, b| {
        a.kind
            .cmp(&b.kind)
            .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
    });
    Ok(entries)
}
