//! Output accumulator: pages copied out of source documents, in order.

use crate::page_range::PageSelection;
use crate::pdf::PdfDocument;
use anyhow::{anyhow, bail, Context, Result};
use lopdf::{Dictionary, Document, Object, ObjectId};
use std::collections::HashSet;
use std::path::Path;
use tracing::{debug, info};

/// Page attributes a page may inherit from its ancestors in the page tree.
const INHERITABLE: [&[u8]; 4] = [b"Resources", b"MediaBox", b"CropBox", b"Rotate"];

/// Guards against cyclic `Parent` chains in damaged files.
const MAX_TREE_DEPTH: usize = 64;

pub struct Assembler {
    doc: Document,
    pages: Vec<ObjectId>,
}

impl Assembler {
    pub fn new() -> Self {
        Assembler {
            doc: Document::with_version("1.7"),
            pages: Vec::new(),
        }
    }

    /// Number of pages collected so far
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Copy the selected pages of `source` to the end of the output.
    ///
    /// Every object of the source is imported under fresh IDs so nothing the
    /// pages reference is lost; whatever ends up unreachable is dropped in
    /// [`Assembler::write`]. Unselected pages are replaced by `null` first, so
    /// links pointing at them cannot drag them into the output. The selection
    /// is validated before the accumulator is touched.
    pub fn append_pages(&mut self, source: PdfDocument, selection: &PageSelection) -> Result<usize> {
        let page_ids = source.page_ids();
        let PdfDocument { mut doc, path } = source;

        let selected = selection
            .iter()
            .map(|index| {
                page_ids
                    .get(index as usize)
                    .map(|&(_, id)| id)
                    .ok_or_else(|| anyhow!("Page {} does not exist in {}", index + 1, path))
            })
            .collect::<Result<Vec<_>>>()?;

        for &page_id in &selected {
            flatten_inherited(&mut doc, page_id)
                .with_context(|| format!("Failed to read page tree of {}", path))?;
        }

        let keep: HashSet<ObjectId> = selected.iter().copied().collect();
        for &(_, page_id) in &page_ids {
            if !keep.contains(&page_id) {
                doc.objects.insert(page_id, Object::Null);
            }
        }

        let offset = self.doc.max_id;
        for (id, mut object) in std::mem::take(&mut doc.objects) {
            shift_references(&mut object, offset);
            self.doc.objects.insert((id.0 + offset, id.1), object);
        }
        self.doc.max_id = self.doc.max_id.max(doc.max_id + offset);

        let added = selected.len();
        self.pages
            .extend(selected.into_iter().map(|(num, generation)| (num + offset, generation)));

        debug!(path = %path, added, total = self.pages.len(), "appended pages");
        Ok(added)
    }

    /// Build the page tree and write the collected pages to `path`.
    ///
    /// The document is serialized in memory first, so a failure leaves no
    /// file behind.
    pub fn write<P: AsRef<Path>>(mut self, path: P) -> Result<()> {
        let path = path.as_ref();
        if self.pages.is_empty() {
            bail!("No pages to write to {}", path.display());
        }

        let pages_id = self.doc.new_object_id();
        for &page_id in &self.pages {
            self.doc
                .get_dictionary_mut(page_id)
                .context("Copied page is not a dictionary")?
                .set("Parent", Object::Reference(pages_id));
        }

        let kids = self
            .pages
            .iter()
            .map(|&id| Object::Reference(id))
            .collect::<Vec<_>>();
        let pages = Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Pages".to_vec())),
            ("Count", Object::Integer(self.pages.len() as i64)),
            ("Kids", Object::Array(kids)),
        ]);
        self.doc.objects.insert(pages_id, Object::Dictionary(pages));

        let catalog = Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Catalog".to_vec())),
            ("Pages", Object::Reference(pages_id)),
        ]);
        let catalog_id = self.doc.add_object(catalog);
        self.doc.trailer.set("Root", Object::Reference(catalog_id));

        self.doc.prune_objects();
        self.doc.renumber_objects();

        let mut buffer = Vec::new();
        self.doc
            .save_to(&mut buffer)
            .with_context(|| format!("Failed to save PDF: {}", path.display()))?;
        std::fs::write(path, buffer)
            .with_context(|| format!("Failed to save PDF: {}", path.display()))?;

        info!(path = %path.display(), pages = self.pages.len(), "wrote document");
        Ok(())
    }
}

impl Default for Assembler {
    fn default() -> Self {
        Self::new()
    }
}

/// Copy attributes the page inherits from its ancestors onto the page itself,
/// since the page is about to be detached from its original tree.
fn flatten_inherited(doc: &mut Document, page_id: ObjectId) -> Result<()> {
    let mut inherited = Vec::new();
    {
        let page = doc.get_dictionary(page_id)?;
        let mut missing: Vec<&[u8]> = INHERITABLE
            .iter()
            .copied()
            .filter(|key| !page.has(key))
            .collect();
        let mut parent = page.get(b"Parent").and_then(Object::as_reference).ok();

        let mut depth = 0;
        while let Some(node_id) = parent {
            if missing.is_empty() || depth == MAX_TREE_DEPTH {
                break;
            }
            let node = doc.get_dictionary(node_id)?;
            missing.retain(|&key| match node.get(key) {
                Ok(value) => {
                    inherited.push((key.to_vec(), value.clone()));
                    false
                }
                Err(_) => true,
            });
            parent = node.get(b"Parent").and_then(Object::as_reference).ok();
            depth += 1;
        }
    }

    if !inherited.is_empty() {
        let page = doc.get_dictionary_mut(page_id)?;
        for (key, value) in inherited {
            page.set(key, value);
        }
    }
    Ok(())
}

fn shift_references(object: &mut Object, offset: u32) {
    match object {
        Object::Reference(id) => id.0 += offset,
        Object::Array(items) => {
            for item in items {
                shift_references(item, offset);
            }
        }
        Object::Dictionary(dict) => {
            for (_, value) in dict.iter_mut() {
                shift_references(value, offset);
            }
        }
        Object::Stream(stream) => {
            for (_, value) in stream.dict.iter_mut() {
                shift_references(value, offset);
            }
        }
        _ => {}
    }
}
