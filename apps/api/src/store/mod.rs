//! Document store: owns the document collection and the current-document
//! reference, persists the whole collection on every mutation.
//!
//! Documents are held as `Arc<Document>` snapshots and never mutated in
//! place. A mutation builds a new document and swaps the `Arc`, so callers
//! can detect change with `Arc::ptr_eq`. Mutations report whether they were
//! applied and never fail across this boundary.

pub mod handlers;
pub mod storage;

use std::collections::HashSet;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde_json::Value;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::models::document::{
    Document, Section, SectionType, TemplateId, ThemeSettings, DEFAULT_TITLE,
};
use crate::sections::{ordering, registry};
use crate::store::storage::{KeyValueStorage, StorageError};

/// Storage key the collection lives under.
pub const STORAGE_KEY: &str = "cv-builder-cvs";

const COPY_SUFFIX: &str = " (Copy)";

pub struct DocumentStore {
    documents: Vec<Arc<Document>>,
    current: Option<Uuid>,
    storage: Box<dyn KeyValueStorage>,
    last_stamp: Option<DateTime<Utc>>,
}

impl DocumentStore {
    /// Reads the persisted collection once. Missing, unreadable or
    /// structurally incompatible data all start the store empty.
    pub fn load(storage: Box<dyn KeyValueStorage>) -> Self {
        let documents = match storage.get(STORAGE_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<Document>>(&raw) {
                Ok(docs) => docs,
                Err(e) => {
                    warn!("Discarding unreadable document collection: {e}");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!("Could not read document collection: {e}");
                Vec::new()
            }
        };
        let documents = drop_duplicate_ids(documents);
        let last_stamp = documents
            .iter()
            .flat_map(|d| [d.created_at, d.updated_at])
            .max();
        info!("Loaded {} document(s)", documents.len());
        Self {
            documents: documents.into_iter().map(Arc::new).collect(),
            current: None,
            storage,
            last_stamp,
        }
    }

    // ── Reads ───────────────────────────────────────────────────────────────

    pub fn list(&self) -> &[Arc<Document>] {
        &self.documents
    }

    pub fn get(&self, id: Uuid) -> Option<Arc<Document>> {
        self.documents.iter().find(|d| d.id == id).cloned()
    }

    /// The current document, resolved against the collection so it always
    /// reflects the latest update.
    pub fn get_current(&self) -> Option<Arc<Document>> {
        self.current.and_then(|id| self.get(id))
    }

    /// Selects the current document, or clears it with `None`.
    /// Returns false (and leaves current untouched) for an unknown id.
    pub fn set_current(&mut self, id: Option<Uuid>) -> bool {
        match id {
            Some(id) if self.get(id).is_none() => {
                warn!("Cannot select unknown document {id}");
                false
            }
            _ => {
                self.current = id;
                true
            }
        }
    }

    // ── Document lifecycle ──────────────────────────────────────────────────

    /// Builds a document with the default section set, appends it and makes
    /// it current.
    pub fn create(&mut self) -> Arc<Document> {
        let sections = SectionType::DEFAULT_SET
            .into_iter()
            .enumerate()
            .map(|(index, section_type)| {
                let id = section_type.to_string();
                Section {
                    order: index as i64,
                    ..registry::new_section(section_type, Some(id), None)
                }
            })
            .collect();
        let now = self.stamp();
        let document = Arc::new(Document {
            id: Uuid::new_v4(),
            title: DEFAULT_TITLE.to_string(),
            template_id: TemplateId::default(),
            theme_settings: ThemeSettings::default(),
            sections,
            created_at: now,
            updated_at: now,
        });
        self.documents.push(Arc::clone(&document));
        self.current = Some(document.id);
        info!("Created document {}", document.id);
        self.persist();
        document
    }

    /// Replaces the stored document with the same id, keeping its
    /// `created_at` and stamping `updated_at`.
    ///
    /// No-op when the id is unknown or the document carries duplicate
    /// section ids.
    pub fn update(&mut self, document: Document) -> bool {
        let Some(index) = self.position(document.id) else {
            warn!("Ignoring update for unknown document {}", document.id);
            return false;
        };
        if !document.has_unique_section_ids() {
            warn!("Rejecting update for document {}: duplicate section ids", document.id);
            return false;
        }
        let updated = Document {
            created_at: self.documents[index].created_at,
            updated_at: self.stamp(),
            ..document
        };
        debug!("Updated document {}", updated.id);
        self.documents[index] = Arc::new(updated);
        self.persist();
        true
    }

    /// Deletes a document, clearing current when it was the current one.
    pub fn remove(&mut self, id: Uuid) -> bool {
        let Some(index) = self.position(id) else {
            debug!("Nothing to remove for document {id}");
            return false;
        };
        self.documents.remove(index);
        if self.current == Some(id) {
            self.current = None;
        }
        info!("Removed document {id}");
        self.persist();
        true
    }

    /// Deep-copies a document under a new id and fresh timestamps. Current
    /// is left as it was.
    pub fn duplicate(&mut self, id: Uuid) -> Option<Arc<Document>> {
        let Some(original) = self.get(id) else {
            warn!("Cannot duplicate unknown document {id}");
            return None;
        };
        let now = self.stamp();
        let copy = Arc::new(Document {
            id: Uuid::new_v4(),
            title: format!("{}{COPY_SUFFIX}", original.title),
            created_at: now,
            updated_at: now,
            ..(*original).clone()
        });
        self.documents.push(Arc::clone(&copy));
        info!("Duplicated document {id} as {}", copy.id);
        self.persist();
        Some(copy)
    }

    // ── Section mutations on the current document ───────────────────────────

    /// Replaces one section's payload. No-op without a current document or
    /// when the section id is unknown.
    pub fn update_section_data(&mut self, section_id: &str, data: Value) -> bool {
        self.modify_current_sections(|sections| {
            if !sections.iter().any(|s| s.id == section_id) {
                return None;
            }
            Some(
                sections
                    .iter()
                    .map(|s| {
                        if s.id == section_id {
                            Section {
                                data: data.clone(),
                                ..s.clone()
                            }
                        } else {
                            s.clone()
                        }
                    })
                    .collect(),
            )
        })
    }

    /// Takes the full, already reordered section list for the current
    /// document and renumbers `order` to match its positions.
    pub fn reorder_sections(&mut self, sections: Vec<Section>) -> bool {
        self.modify_current_sections(|_| Some(ordering::renumber(sections)))
    }

    pub fn move_section(&mut self, from: usize, to: usize) -> bool {
        self.modify_current_sections(|sections| ordering::move_section(sections, from, to))
    }

    pub fn toggle_section_visibility(&mut self, section_id: &str) -> bool {
        self.modify_current_sections(|sections| ordering::toggle_visibility(sections, section_id))
    }

    /// Appends a new section of `section_type` with the registry's default
    /// payload. Returns the section as stored.
    pub fn add_section(&mut self, section_type: SectionType, title: Option<String>) -> Option<Section> {
        let section = registry::new_section(section_type, None, title);
        let id = section.id.clone();
        let applied = self
            .modify_current_sections(|sections| Some(ordering::append_section(sections, section)));
        if !applied {
            return None;
        }
        self.get_current()
            .and_then(|doc| doc.section(&id).cloned())
    }

    pub fn remove_section(&mut self, section_id: &str) -> bool {
        self.modify_current_sections(|sections| ordering::remove_section(sections, section_id))
    }

    // ── Internals ───────────────────────────────────────────────────────────

    fn position(&self, id: Uuid) -> Option<usize> {
        self.documents.iter().position(|d| d.id == id)
    }

    /// Runs `change` against the current document's sections and feeds the
    /// result through `update`. `None` from `change` means nothing to do.
    fn modify_current_sections<F>(&mut self, change: F) -> bool
    where
        F: FnOnce(&[Section]) -> Option<Vec<Section>>,
    {
        let Some(current) = self.get_current() else {
            debug!("No current document; section change ignored");
            return false;
        };
        let Some(sections) = change(&current.sections) else {
            debug!("Section change did not apply to document {}", current.id);
            return false;
        };
        self.update(Document {
            sections,
            ..(*current).clone()
        })
    }

    /// Now, bumped past the previous stamp so timestamps from this store are
    /// strictly increasing.
    fn stamp(&mut self) -> DateTime<Utc> {
        let now = Utc::now();
        let stamp = match self.last_stamp {
            Some(last) if now <= last => last + Duration::microseconds(1),
            _ => now,
        };
        self.last_stamp = Some(stamp);
        stamp
    }

    fn persist(&self) {
        if let Err(e) = self.try_persist() {
            warn!("Failed to persist {} document(s): {e}", self.documents.len());
        }
    }

    fn try_persist(&self) -> Result<(), StorageError> {
        let snapshot: Vec<&Document> = self.documents.iter().map(Arc::as_ref).collect();
        let raw = serde_json::to_string(&snapshot)?;
        self.storage.set(STORAGE_KEY, &raw)
    }
}

/// Keeps the first document per id and, inside each document, the first
/// section per id.
fn drop_duplicate_ids(documents: Vec<Document>) -> Vec<Document> {
    let mut seen_docs = HashSet::new();
    documents
        .into_iter()
        .filter(|doc| {
            let first = seen_docs.insert(doc.id);
            if !first {
                warn!("Dropping stored document with repeated id {}", doc.id);
            }
            first
        })
        .map(|mut doc| {
            if !doc.has_unique_section_ids() {
                let mut seen_sections = HashSet::new();
                let before = doc.sections.len();
                doc.sections.retain(|s| seen_sections.insert(s.id.clone()));
                warn!(
                    "Dropped {} section(s) with repeated ids from document {}",
                    before - doc.sections.len(),
                    doc.id
                );
            }
            doc
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::storage::{FileStorage, MemoryStorage};
    use serde_json::json;

    fn store() -> (DocumentStore, MemoryStorage) {
        let storage = MemoryStorage::new();
        (DocumentStore::load(Box::new(storage.clone())), storage)
    }

    fn section(id: &str, order: i64) -> Section {
        Section {
            order,
            ..registry::new_section(SectionType::Summary, Some(id.to_string()), None)
        }
    }

    struct FailingStorage;

    impl KeyValueStorage for FailingStorage {
        fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Err(std::io::Error::other("disk gone").into())
        }
        fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(std::io::Error::other("disk gone").into())
        }
    }

    #[test]
    fn test_create_has_default_sections() {
        let (mut store, _) = store();
        let doc = store.create();
        let types: Vec<&str> = doc.sections.iter().map(|s| s.section_type.as_str()).collect();
        assert_eq!(types, vec!["contact", "summary", "experience", "education", "skills"]);
        let orders: Vec<i64> = doc.sections.iter().map(|s| s.order).collect();
        assert_eq!(orders, vec![0, 1, 2, 3, 4]);
        assert!(doc.sections.iter().all(|s| s.visible));
        assert_eq!(doc.sections[0].id, "contact");
        assert_eq!(doc.sections[0].title, "Contact Information");
        assert_eq!(doc.title, "Untitled Resume");
        assert_eq!(doc.created_at, doc.updated_at);
        assert_eq!(store.get_current().unwrap().id, doc.id);
    }

    #[test]
    fn test_update_stamps_and_keeps_created_at() {
        let (mut store, _) = store();
        let doc = store.create();
        let mut edited = (*doc).clone();
        edited.title = "Backend Engineer".to_string();
        edited.created_at = Utc::now() + Duration::days(10);
        assert!(store.update(edited));

        let current = store.get_current().unwrap();
        assert_eq!(current.title, "Backend Engineer");
        assert_eq!(current.created_at, doc.created_at);
        assert!(current.updated_at > doc.updated_at);
        assert!(!Arc::ptr_eq(&current, &doc));
    }

    #[test]
    fn test_update_unknown_id_leaves_collection_unchanged() {
        let (mut store, storage) = store();
        let doc = store.create();
        let before: Vec<Arc<Document>> = store.list().to_vec();
        let persisted = storage.get(STORAGE_KEY).unwrap();

        let stranger = Document {
            id: Uuid::new_v4(),
            ..(*doc).clone()
        };
        assert!(!store.update(stranger));

        assert_eq!(store.list().len(), before.len());
        assert!(store.list().iter().zip(&before).all(|(a, b)| Arc::ptr_eq(a, b)));
        assert_eq!(storage.get(STORAGE_KEY).unwrap(), persisted);
    }

    #[test]
    fn test_update_rejects_duplicate_section_ids() {
        let (mut store, _) = store();
        let doc = store.create();
        let mut edited = (*doc).clone();
        edited.sections[1].id = "contact".to_string();
        assert!(!store.update(edited));
        assert!(Arc::ptr_eq(&store.get(doc.id).unwrap(), &doc));
    }

    #[test]
    fn test_remove_clears_current() {
        let (mut store, _) = store();
        let first = store.create();
        let second = store.create();
        assert!(store.remove(first.id));
        assert_eq!(store.get_current().unwrap().id, second.id);
        assert!(store.remove(second.id));
        assert!(store.get_current().is_none());
        assert!(store.list().is_empty());
        assert!(!store.remove(second.id));
    }

    #[test]
    fn test_duplicate_copies_sections_with_new_identity() {
        let (mut store, _) = store();
        let original = store.create();
        assert!(store.update_section_data("summary", json!({ "content": "Ships things." })));
        let original = store.get(original.id).unwrap();

        let copy = store.duplicate(original.id).unwrap();
        assert_ne!(copy.id, original.id);
        assert_eq!(copy.sections, original.sections);
        assert_eq!(copy.title, "Untitled Resume (Copy)");
        assert!(copy.created_at > original.created_at);
        assert!(copy.updated_at > original.updated_at);
        // current is unchanged
        assert_eq!(store.get_current().unwrap().id, original.id);
        assert_eq!(store.list().len(), 2);
        assert!(store.duplicate(Uuid::new_v4()).is_none());
    }

    #[test]
    fn test_section_mutations_without_current_are_noops() {
        let (mut store, _) = store();
        assert!(!store.update_section_data("summary", json!({})));
        assert!(!store.reorder_sections(vec![]));
        assert!(!store.move_section(0, 1));
        assert!(!store.toggle_section_visibility("summary"));
        assert!(store.add_section(SectionType::Projects, None).is_none());
        assert!(!store.remove_section("summary"));
    }

    #[test]
    fn test_update_section_data_unknown_section_is_noop() {
        let (mut store, _) = store();
        let doc = store.create();
        assert!(!store.update_section_data("nope", json!({ "content": "x" })));
        assert!(Arc::ptr_eq(&store.get_current().unwrap(), &doc));
    }

    #[test]
    fn test_reorder_renumbers_sparse_orders() {
        let (mut store, _) = store();
        store.create();
        let mut sections = vec![section("a", 0), section("b", 2), section("c", 2), section("d", 5)];
        let last = sections.pop().unwrap();
        sections.insert(0, last);
        assert!(store.reorder_sections(sections));

        let current = store.get_current().unwrap();
        let ids: Vec<&str> = current.sections.iter().map(|s| s.id.as_str()).collect();
        let orders: Vec<i64> = current.sections.iter().map(|s| s.order).collect();
        assert_eq!(ids, vec!["d", "a", "b", "c"]);
        assert_eq!(orders, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_move_toggle_add_remove_sections() {
        let (mut store, _) = store();
        store.create();

        assert!(store.move_section(4, 0));
        let ids: Vec<String> = store.get_current().unwrap().sections.iter().map(|s| s.id.clone()).collect();
        assert_eq!(ids, vec!["skills", "contact", "summary", "experience", "education"]);
        assert!(!store.move_section(0, 9));

        assert!(store.toggle_section_visibility("summary"));
        let current = store.get_current().unwrap();
        assert!(!current.section("summary").unwrap().visible);
        assert_eq!(current.section("summary").unwrap().order, 2);

        let added = store.add_section(SectionType::Projects, Some("Side Projects".to_string())).unwrap();
        assert_eq!(added.order, 5);
        assert_eq!(added.title, "Side Projects");
        assert_eq!(added.data, json!({ "items": [] }));

        assert!(store.remove_section(&added.id));
        assert!(store.get_current().unwrap().section(&added.id).is_none());
        assert!(!store.remove_section(&added.id));
    }

    #[test]
    fn test_set_current() {
        let (mut store, _) = store();
        let first = store.create();
        store.create();
        assert!(store.set_current(Some(first.id)));
        assert_eq!(store.get_current().unwrap().id, first.id);
        assert!(!store.set_current(Some(Uuid::new_v4())));
        assert_eq!(store.get_current().unwrap().id, first.id);
        assert!(store.set_current(None));
        assert!(store.get_current().is_none());
    }

    #[test]
    fn test_persistence_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = DocumentStore::load(Box::new(FileStorage::new(dir.path()).unwrap()));
        store.create();
        store.create();
        store.update_section_data("contact", json!({ "fullName": "Ada Lovelace" }));
        let first_id = store.list()[0].id;
        let copy = store.duplicate(first_id).unwrap();
        let before: Vec<Document> = store.list().iter().map(|d| (**d).clone()).collect();

        let reloaded = DocumentStore::load(Box::new(FileStorage::new(dir.path()).unwrap()));
        let after: Vec<Document> = reloaded.list().iter().map(|d| (**d).clone()).collect();
        assert_eq!(after, before);
        assert!(reloaded.get(copy.id).is_some());
        assert!(reloaded.get_current().is_none());
    }

    #[test]
    fn test_reload_keeps_timestamps_increasing() {
        let storage = MemoryStorage::new();
        let mut store = DocumentStore::load(Box::new(storage.clone()));
        let doc = store.create();
        let mut edited = (*doc).clone();
        edited.updated_at = Utc::now() + Duration::days(1);
        // a stored stamp in the future still bounds the next one
        storage
            .set(STORAGE_KEY, &serde_json::to_string(&vec![edited.clone()]).unwrap())
            .unwrap();
        let mut reloaded = DocumentStore::load(Box::new(storage));
        let copy = reloaded.duplicate(doc.id).unwrap();
        assert!(copy.created_at > edited.updated_at);
    }

    #[test]
    fn test_corrupted_storage_loads_empty() {
        for raw in ["{not json", "{\"id\": 1}", "[{\"title\": \"no id\"}]"] {
            let storage = MemoryStorage::new();
            storage.set(STORAGE_KEY, raw).unwrap();
            let store = DocumentStore::load(Box::new(storage));
            assert!(store.list().is_empty(), "raw: {raw}");
        }
    }

    #[test]
    fn test_load_drops_repeated_document_and_section_ids() {
        let storage = MemoryStorage::new();
        let mut store = DocumentStore::load(Box::new(storage.clone()));
        let doc = store.create();
        let mut twin = (*doc).clone();
        twin.title = "Shadow".to_string();
        let mut repeated = (*doc).clone();
        repeated.id = Uuid::new_v4();
        let mut shadow_contact = repeated.sections[0].clone();
        shadow_contact.title = "Shadow Contact".to_string();
        repeated.sections.push(shadow_contact);
        storage
            .set(
                STORAGE_KEY,
                &serde_json::to_string(&vec![(*doc).clone(), twin, repeated.clone()]).unwrap(),
            )
            .unwrap();

        let mut reloaded = DocumentStore::load(Box::new(storage));
        assert_eq!(reloaded.list().len(), 2);
        assert_eq!(reloaded.get(doc.id).unwrap().title, "Untitled Resume");
        let kept = reloaded.get(repeated.id).unwrap();
        assert!(kept.has_unique_section_ids());
        assert_eq!(kept.sections.len(), 5);
        assert_eq!(kept.section("contact").unwrap().title, "Contact Information");

        // removal by id now takes the only copy
        assert!(reloaded.remove(doc.id));
        assert!(reloaded.get(doc.id).is_none());
    }

    #[test]
    fn test_add_section_after_max_order() {
        let (mut store, _) = store();
        let doc = store.create();
        let mut edited = (*doc).clone();
        edited.sections[4].order = i64::MAX;
        assert!(store.update(edited));

        let added = store.add_section(SectionType::Projects, None).unwrap();
        assert_eq!(added.order, i64::MAX);
        let current = store.get_current().unwrap();
        let last = ordering::sorted_by_order(&current.sections).last().map(|s| s.id.clone());
        assert_eq!(last, Some(added.id));
    }

    #[test]
    fn test_storage_failures_do_not_escape() {
        let mut store = DocumentStore::load(Box::new(FailingStorage));
        assert!(store.list().is_empty());
        let doc = store.create();
        assert!(store.toggle_section_visibility("skills"));
        assert!(store.remove(doc.id));
    }
}
