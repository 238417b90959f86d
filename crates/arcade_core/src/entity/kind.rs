use crate::entity::EntityKind;
use crate::error::EngineError;
use std::collections::HashMap;
use tracing::debug;

/// Names of the entity kinds defined for a session.
#[derive(Debug, Default)]
pub struct KindRegistry {
    names: Vec<String>,
    name_lookup: HashMap<String, EntityKind>,
}

impl KindRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn define(&mut self, name: &str) -> Result<EntityKind, EngineError> {
        if self.name_lookup.contains_key(name) {
            return Err(EngineError::DuplicateKind {
                name: name.to_string(),
            });
        }

        let index = u16::try_from(self.names.len()).map_err(|_| EngineError::KindLimit {
            limit: u16::MAX as usize + 1,
        })?;
        let kind = EntityKind::new(index);

        self.names.push(name.to_string());
        self.name_lookup.insert(name.to_string(), kind);
        debug!(%kind, name, "defined entity kind");

        Ok(kind)
    }

    pub fn contains(&self, kind: EntityKind) -> bool {
        (kind.index() as usize) < self.names.len()
    }

    /// Fail with `UnknownKind` unless `kind` was defined here.
    pub fn ensure(&self, kind: EntityKind) -> Result<(), EngineError> {
        if self.contains(kind) {
            Ok(())
        } else {
            Err(EngineError::UnknownKind { kind })
        }
    }

    pub fn name(&self, kind: EntityKind) -> Option<&str> {
        self.names.get(kind.index() as usize).map(String::as_str)
    }

    /// Name for log output; never fails.
    pub(crate) fn label(&self, kind: EntityKind) -> &str {
        self.name(kind).unwrap_or("<undefined>")
    }

    pub fn lookup(&self, name: &str) -> Option<EntityKind> {
        self.name_lookup.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (EntityKind, &str)> {
        self.names
            .iter()
            .enumerate()
            .map(|(idx, name)| (EntityKind::new(idx as u16), name.as_str()))
    }
}
