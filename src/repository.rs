//! Character persistence behind an explicit get/put interface.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::character::types::Character;

/// Storage for character snapshots keyed by character id.
pub trait CharacterRepository {
    fn get(&self, id: &str) -> io::Result<Option<Character>>;
    fn put(&mut self, character: &Character) -> io::Result<()>;
    /// Returns whether a character was removed.
    fn delete(&mut self, id: &str) -> io::Result<bool>;
    /// All stored characters, ordered by id.
    fn list(&self) -> io::Result<Vec<Character>>;
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    characters: BTreeMap<String, Character>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CharacterRepository for InMemoryRepository {
    fn get(&self, id: &str) -> io::Result<Option<Character>> {
        Ok(self.characters.get(id).cloned())
    }

    fn put(&mut self, character: &Character) -> io::Result<()> {
        self.characters
            .insert(character.id.clone(), character.clone());
        Ok(())
    }

    fn delete(&mut self, id: &str) -> io::Result<bool> {
        Ok(self.characters.remove(id).is_some())
    }

    fn list(&self) -> io::Result<Vec<Character>> {
        Ok(self.characters.values().cloned().collect())
    }
}

/// One pretty-printed JSON document per character in a directory.
#[derive(Debug, Clone)]
pub struct JsonFileRepository {
    dir: PathBuf,
}

impl JsonFileRepository {
    /// Stores characters under `~/.ravenhollow`.
    pub fn new() -> io::Result<Self> {
        let home_dir = dirs::home_dir().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                "Could not determine home directory",
            )
        })?;
        Self::with_dir(home_dir.join(".ravenhollow"))
    }

    pub fn with_dir(dir: impl Into<PathBuf>) -> io::Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, id: &str) -> io::Result<PathBuf> {
        let file_stem = sanitize_id(id);
        if file_stem.is_empty() || file_stem != id {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("character id {id:?} is not a valid file name"),
            ));
        }
        Ok(self.dir.join(format!("{file_stem}.json")))
    }

    fn read(path: &Path) -> io::Result<Character> {
        let json = fs::read_to_string(path)?;
        serde_json::from_str(&json).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }
}

impl CharacterRepository for JsonFileRepository {
    fn get(&self, id: &str) -> io::Result<Option<Character>> {
        match Self::read(&self.path_for(id)?) {
            Ok(character) if character.id == id => Ok(Some(character)),
            Ok(character) => Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("file for {id} holds character {}", character.id),
            )),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn put(&mut self, character: &Character) -> io::Result<()> {
        let json = serde_json::to_string_pretty(character)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        fs::write(self.path_for(&character.id)?, json)
    }

    fn delete(&mut self, id: &str) -> io::Result<bool> {
        match fs::remove_file(self.path_for(id)?) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e),
        }
    }

    fn list(&self) -> io::Result<Vec<Character>> {
        let mut characters = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.extension().and_then(|s| s.to_str()) != Some("json") {
                continue;
            }
            characters.push(Self::read(&path)?);
        }
        characters.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(characters)
    }
}

/// File-safe form of an id: letters, digits, `-` and `_` only.
/// The file store only accepts ids that are already in this form.
pub fn sanitize_id(id: &str) -> String {
    id.trim()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::types::{create_character, CharacterClass};
    use tempfile::TempDir;

    fn hero(id: &str) -> Character {
        create_character(id, "Mira", CharacterClass::Warrior).unwrap()
    }

    fn exercise(repo: &mut impl CharacterRepository) {
        assert!(repo.get("char-1").unwrap().is_none());

        repo.put(&hero("char-2")).unwrap();
        let mut first = hero("char-1");
        repo.put(&first).unwrap();
        assert_eq!(repo.get("char-1").unwrap(), Some(first.clone()));

        first.gold = 5;
        repo.put(&first).unwrap();
        assert_eq!(repo.get("char-1").unwrap().map(|c| c.gold), Some(5));

        let ids: Vec<String> = repo.list().unwrap().into_iter().map(|c| c.id).collect();
        assert_eq!(ids, vec!["char-1", "char-2"]);

        assert!(repo.delete("char-1").unwrap());
        assert!(!repo.delete("char-1").unwrap());
        assert_eq!(repo.list().unwrap().len(), 1);
    }

    #[test]
    fn test_in_memory_repository() {
        exercise(&mut InMemoryRepository::new());
    }

    #[test]
    fn test_json_file_repository() {
        let temp = TempDir::new().unwrap();
        let mut repo = JsonFileRepository::with_dir(temp.path().join("saves")).unwrap();
        exercise(&mut repo);
        assert!(repo.dir().join("char-2.json").exists());
    }

    #[test]
    fn test_json_file_repository_rejects_corrupt_file() {
        let temp = TempDir::new().unwrap();
        let repo = JsonFileRepository::with_dir(temp.path()).unwrap();
        fs::write(temp.path().join("char-1.json"), "{ not json").unwrap();
        let err = repo.get("char-1").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }

    #[test]
    fn test_sanitize_id() {
        assert_eq!(sanitize_id("char-1"), "char-1");
        assert_eq!(sanitize_id("../etc/passwd"), "etcpasswd");
        assert_eq!(sanitize_id(" a b_c "), "ab_c");
    }

    #[test]
    fn test_unusable_id_rejected() {
        let temp = TempDir::new().unwrap();
        let mut repo = JsonFileRepository::with_dir(temp.path()).unwrap();
        let err = repo.put(&hero("///")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }

    #[test]
    fn test_ids_that_differ_only_in_dropped_characters_do_not_collide() {
        let temp = TempDir::new().unwrap();
        let mut repo = JsonFileRepository::with_dir(temp.path()).unwrap();

        let mut dotted = hero("char.1");
        dotted.gold = 1;
        let err = repo.put(&dotted).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);

        let mut plain = hero("char1");
        plain.gold = 999;
        repo.put(&plain).unwrap();
        assert_eq!(repo.get("char.1").unwrap_err().kind(), io::ErrorKind::InvalidInput);
        assert_eq!(repo.get("char1").unwrap().map(|c| c.gold), Some(999));
    }

    #[test]
    fn test_file_holding_another_id_is_rejected() {
        let temp = TempDir::new().unwrap();
        let repo = JsonFileRepository::with_dir(temp.path()).unwrap();
        let json = serde_json::to_string(&hero("char-2")).unwrap();
        fs::write(temp.path().join("char-1.json"), json).unwrap();
        assert_eq!(repo.get("char-1").unwrap_err().kind(), io::ErrorKind::InvalidData);
    }
}
