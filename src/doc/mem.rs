use std::collections::HashMap;

use crate::doc::{Document, ParaId, ParaStyle, PropertyStore, PropsError, Scope};

#[derive(Debug, Clone)]
struct Para {
    id: ParaId,
    text: String,
    style: ParaStyle,
}

/// In-memory document: the production backing for file-loaded drafts and the
/// test double for ops. A document always holds at least one paragraph.
#[derive(Debug, Clone)]
pub struct MemDoc {
    paras: Vec<Para>,
    next_id: u64,
}

impl MemDoc {
    pub fn new() -> Self {
        MemDoc::from_lines([""])
    }

    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut doc = MemDoc {
            paras: Vec::new(),
            next_id: 0,
        };
        for line in lines {
            let id = doc.fresh_id();
            doc.paras.push(Para {
                id,
                text: line.into(),
                style: ParaStyle::default(),
            });
        }
        if doc.paras.is_empty() {
            let id = doc.fresh_id();
            doc.paras.push(Para {
                id,
                text: String::new(),
                style: ParaStyle::default(),
            });
        }
        doc
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.paras.iter().map(|p| p.text.as_str())
    }

    fn fresh_id(&mut self) -> ParaId {
        let id = ParaId(self.next_id);
        self.next_id += 1;
        id
    }
}

impl Default for MemDoc {
    fn default() -> Self {
        MemDoc::new()
    }
}

impl Document for MemDoc {
    fn len(&self) -> usize {
        self.paras.len()
    }

    fn text(&self, idx: usize) -> Option<&str> {
        self.paras.get(idx).map(|p| p.text.as_str())
    }

    fn handle(&self, idx: usize) -> Option<ParaId> {
        self.paras.get(idx).map(|p| p.id)
    }

    fn position(&self, id: ParaId) -> Option<usize> {
        self.paras.iter().position(|p| p.id == id)
    }

    fn set_text(&mut self, idx: usize, text: &str) {
        if let Some(p) = self.paras.get_mut(idx) {
            p.text = text.to_string();
        }
    }

    fn append_text(&mut self, idx: usize, suffix: &str) {
        if let Some(p) = self.paras.get_mut(idx) {
            p.text.push_str(suffix);
        }
    }

    fn insert(&mut self, idx: usize, text: &str) {
        if idx > self.paras.len() {
            return;
        }
        let id = self.fresh_id();
        self.paras.insert(
            idx,
            Para {
                id,
                text: text.to_string(),
                style: ParaStyle::default(),
            },
        );
    }

    fn remove(&mut self, idx: usize) {
        if idx < self.paras.len() {
            self.paras.remove(idx);
        }
    }

    fn clear(&mut self, idx: usize) {
        if let Some(p) = self.paras.get_mut(idx) {
            p.text.clear();
        }
    }

    fn style(&self, idx: usize) -> Option<&ParaStyle> {
        self.paras.get(idx).map(|p| &p.style)
    }

    fn set_style(&mut self, idx: usize, style: ParaStyle) {
        if let Some(p) = self.paras.get_mut(idx) {
            p.style = style;
        }
    }
}

/// In-memory property store used as a test double
#[derive(Debug, Clone, Default)]
pub struct MemProps {
    doc: HashMap<String, String>,
    user: HashMap<String, String>,
}

impl MemProps {
    pub fn new() -> Self {
        MemProps::default()
    }

    fn map(&self, scope: Scope) -> &HashMap<String, String> {
        match scope {
            Scope::Document => &self.doc,
            Scope::User => &self.user,
        }
    }
}

impl PropertyStore for MemProps {
    fn get(&self, scope: Scope, key: &str) -> Option<String> {
        self.map(scope).get(key).cloned()
    }

    fn set(&mut self, scope: Scope, key: &str, value: &str) -> Result<(), PropsError> {
        let map = match scope {
            Scope::Document => &mut self.doc,
            Scope::User => &mut self.user,
        };
        map.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
