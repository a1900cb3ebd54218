//! Song dataset as stored on disk, and its encoding into clues.
//!
//! The file is either a JSON object keyed by song id, or a JSON array of
//! song records carrying a `song_title`. Both load into a [`Dataset`] that
//! keeps the song order of the file and always saves as an object.

use std::{
    collections::{BTreeMap, HashMap},
    fmt, fs,
    path::Path,
};

use serde::{
    Deserialize, Deserializer, Serialize, Serializer,
    de::{MapAccess, SeqAccess, Visitor},
    ser::SerializeMap,
};
use serde_json::{Map, Value};

use super::{
    encoder::encode_text,
    error::{ClueError, Result},
    pipeline::LanguageRegistry,
};

/// Extra per-language fields carried from the clue dataset into restored output.
pub const RESTORED_EXTRA_FIELDS: [&str; 5] = ["character_count", "start", "end", "video", "ipa"];

/// One lyric line in every language it exists in, keyed by language code.
pub type Segment = BTreeMap<String, LanguageEntry>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LyricText {
    Plain(String),
    Clues(Vec<Vec<String>>),
    /// Anything else; reported as a malformed clue instead of failing the load.
    Other(Value),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LanguageEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<LyricText>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_number: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub syllable_count: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl LanguageEntry {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: Some(LyricText::Plain(text.into())),
            ..Self::default()
        }
    }

    pub fn clues(clues: Vec<Vec<String>>) -> Self {
        Self {
            text: Some(LyricText::Clues(clues)),
            ..Self::default()
        }
    }

    /// Copy of this entry holding `text`, keeping the line metadata the
    /// restored dataset carries.
    pub fn restored(&self, text: String) -> Self {
        let extra = RESTORED_EXTRA_FIELDS
            .iter()
            .filter_map(|&key| self.extra.get(key).map(|v| (key.to_string(), v.clone())))
            .collect();
        Self {
            text: Some(LyricText::Plain(text)),
            line_number: self.line_number.clone(),
            syllable_count: self.syllable_count.clone(),
            extra,
        }
    }

    fn encoded(&self, text: LyricText) -> Self {
        let mut extra = Map::new();
        if let (Some(start), Some(end)) = (self.extra.get("start"), self.extra.get("end")) {
            extra.insert("start".to_string(), start.clone());
            extra.insert("end".to_string(), end.clone());
        }
        Self {
            text: Some(text),
            line_number: self.line_number.clone(),
            syllable_count: self.syllable_count.clone(),
            extra,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SongRecord {
    #[serde(default)]
    pub lyrics: Vec<Vec<Segment>>,
    #[serde(default)]
    pub youtube_url: Map<String, Value>,
    #[serde(default)]
    pub lyrics_url: Map<String, Value>,
    #[serde(default)]
    pub video: Map<String, Value>,
}

impl SongRecord {
    pub fn lyrics_url(&self, language: &str) -> Option<&str> {
        self.lyrics_url.get(language).and_then(Value::as_str)
    }

    /// Same metadata, no lyrics.
    pub fn header(&self) -> Self {
        Self {
            lyrics: Vec::new(),
            youtube_url: self.youtube_url.clone(),
            lyrics_url: self.lyrics_url.clone(),
            video: self.video.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    songs: Vec<(String, SongRecord)>,
    /// Song id to its position in `songs`.
    index: HashMap<String, usize>,
}

impl Dataset {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a song; a repeated id replaces the earlier record in place.
    pub fn insert(&mut self, id: impl Into<String>, record: SongRecord) {
        let id = id.into();
        match self.index.get(&id) {
            Some(&pos) => self.songs[pos].1 = record,
            None => {
                self.index.insert(id.clone(), self.songs.len());
                self.songs.push((id, record));
            }
        }
    }

    pub fn get(&self, id: &str) -> Option<&SongRecord> {
        self.index.get(id).map(|&pos| &self.songs[pos].1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SongRecord)> {
        self.songs.iter().map(|(id, record)| (id.as_str(), record))
    }

    pub fn len(&self) -> usize {
        self.songs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path).map_err(|source| ClueError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        fs::write(path, self.to_json_string()?)?;
        Ok(())
    }
}

impl FromIterator<(String, SongRecord)> for Dataset {
    fn from_iter<I: IntoIterator<Item = (String, SongRecord)>>(iter: I) -> Self {
        let mut dataset = Dataset::new();
        for (id, record) in iter {
            dataset.insert(id, record);
        }
        dataset
    }
}

impl Serialize for Dataset {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.songs.len()))?;
        for (id, record) in &self.songs {
            map.serialize_entry(id, record)?;
        }
        map.end()
    }
}

#[derive(Deserialize)]
struct ListedSong {
    song_title: Option<String>,
    #[serde(flatten)]
    record: SongRecord,
}

struct DatasetVisitor;

impl<'de> Visitor<'de> for DatasetVisitor {
    type Value = Dataset;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an object of songs or an array of songs with `song_title`")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> std::result::Result<Dataset, A::Error> {
        let mut dataset = Dataset::new();
        while let Some((id, record)) = access.next_entry::<String, SongRecord>()? {
            dataset.insert(id, record);
        }
        Ok(dataset)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut access: A) -> std::result::Result<Dataset, A::Error> {
        let mut dataset = Dataset::new();
        while let Some(song) = access.next_element::<ListedSong>()? {
            match song.song_title {
                Some(title) => dataset.insert(title, song.record),
                None => tracing::warn!("Skipping song entry without `song_title`"),
            }
        }
        Ok(dataset)
    }
}

impl<'de> Deserialize<'de> for Dataset {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_any(DatasetVisitor)
    }
}

/// Replace every plain lyric text with its clues.
///
/// Languages without a registered strategy are dropped, from the lyrics and
/// from the per-language URL maps alike. Entries that already hold clues are
/// copied unchanged.
pub fn encode_dataset(dataset: &Dataset, registry: &LanguageRegistry) -> Dataset {
    dataset
        .iter()
        .map(|(id, record)| (id.to_string(), encode_song(id, record, registry)))
        .collect()
}

fn encode_song(id: &str, record: &SongRecord, registry: &LanguageRegistry) -> SongRecord {
    let keep_registered = |urls: &Map<String, Value>| -> Map<String, Value> {
        urls.iter()
            .filter(|(code, _)| registry.contains(code))
            .map(|(code, value)| (code.clone(), value.clone()))
            .collect()
    };

    let lyrics = record
        .lyrics
        .iter()
        .map(|group| {
            group
                .iter()
                .map(|segment| encode_segment(id, segment, registry))
                .collect()
        })
        .collect();

    tracing::info!(song = id, "Encoded song");
    SongRecord {
        lyrics,
        youtube_url: keep_registered(&record.youtube_url),
        lyrics_url: keep_registered(&record.lyrics_url),
        video: keep_registered(&record.video),
    }
}

fn encode_segment(song: &str, segment: &Segment, registry: &LanguageRegistry) -> Segment {
    let mut encoded = Segment::new();
    for (language, entry) in segment {
        let Ok(strategy) = registry.strategy(language) else {
            tracing::warn!(song, language = %language, "Dropping unregistered language");
            continue;
        };
        let Some(text) = &entry.text else {
            continue;
        };
        let text = match text {
            LyricText::Plain(raw) => LyricText::Clues(
                encode_text(raw, strategy.family())
                    .iter()
                    .map(|clue| clue.to_parts())
                    .collect(),
            ),
            other => other.clone(),
        };
        encoded.insert(language.clone(), entry.encoded(text));
    }
    encoded
}
