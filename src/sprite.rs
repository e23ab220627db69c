use crate::*;
use ndarray::Array3;
use std::collections::HashMap;
use std::path::Path;

/// A named reference image used for matching against frames.
#[derive(new, Debug, Clone, PartialEq)]
pub struct Sprite {
    pub name: String,
    pub image: Array3<u8>,
}

/// The game an agent plays. The agent only reads its sprite catalog, once,
/// while it is being built.
pub trait Game {
    fn name(&self) -> &str;
    fn sprites(&self) -> &HashMap<String, Sprite>;
}

#[derive(new, Debug, Clone, Default)]
pub struct StaticGame {
    name: String,
    sprites: HashMap<String, Sprite>,
}

impl StaticGame {
    /// Loads every `.png` file directly inside `dir` as a sprite named after
    /// the file stem.
    pub fn from_sprite_dir<P: AsRef<Path>>(name: &str, dir: P) -> GameAgentResult<Self> {
        let dir = dir.as_ref();
        let dataset_io_error = |source| {
            GameAgentError::new(GameAgentErrorVariant::DatasetIo {
                path: dir.to_path_buf(),
                source,
            })
        };
        let mut sprites = HashMap::new();
        for entry in std::fs::read_dir(dir).map_err(dataset_io_error)? {
            let path = entry.map_err(dataset_io_error)?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("png") {
                continue;
            }
            let Some(sprite_name) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            let frame = GameFrame::open(&path)?;
            sprites.insert(
                sprite_name.to_string(),
                Sprite::new(sprite_name.to_string(), frame.pixels().clone()),
            );
        }
        Ok(Self::new(name.to_string(), sprites))
    }

    pub fn with_sprite(mut self, sprite: Sprite) -> Self {
        self.sprites.insert(sprite.name.clone(), sprite);
        self
    }
}

impl Game for StaticGame {
    fn name(&self) -> &str {
        &self.name
    }

    fn sprites(&self) -> &HashMap<String, Sprite> {
        &self.sprites
    }
}

/// Registry of sprites an agent can match against.
#[derive(Debug, Clone, Default)]
pub struct SpriteCatalog {
    sprites: HashMap<String, Sprite>,
}

impl SpriteCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, sprite: Sprite) -> Option<Sprite> {
        self.sprites.insert(sprite.name.clone(), sprite)
    }

    pub fn get(&self, name: &str) -> Option<&Sprite> {
        self.sprites.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.sprites.keys().map(|name| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.sprites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sprites.is_empty()
    }
}
