use std::fs;
use std::hash::Hash;
use std::io::{self, Write};
use std::path::Path;

use serde::{de::DeserializeOwned, ser::SerializeStruct, Deserialize, Serialize};

use crate::config::{ComputeMode, SNAPSHOT_FORMAT_VERSION, SNAPSHOT_TMP_SUFFIX};
use crate::error::{Error, Result};
use crate::vectorizer::{corpus::Corpus, tfidf::{TermStatistics, TfIdfEngine}, TfIdf};

/// Deserialized form of a `TfIdf` snapshot.
///
/// Holds exactly what `TfIdf` serializes: corpus, term statistics and
/// compute mode, plus the format version. Turn it back into an engine with
/// `into_tf_idf`.
#[derive(Debug, Clone, Deserialize)]
#[serde(bound(deserialize = "K: Deserialize<'de> + Eq + Hash"))]
pub struct TfIdfData<K = String>
where
    K: Eq + Hash,
{
    pub version: u32,
    pub corpus: Corpus<K>,
    pub statistics: TermStatistics,
    pub mode: ComputeMode,
}

impl<K> TfIdfData<K>
where
    K: Clone + Eq + Hash,
{
    /// Reject snapshots that could not have been produced by `export`.
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.version != SNAPSHOT_FORMAT_VERSION {
            return Err(format!(
                "unsupported snapshot version {} (expected {})",
                self.version, SNAPSHOT_FORMAT_VERSION
            ));
        }
        for (index, (_, doc)) in self.corpus.iter().enumerate() {
            if doc.recount() != doc.term_sum() {
                return Err(format!(
                    "document #{index} total {} does not match its term counts ({})",
                    doc.term_sum(),
                    doc.recount()
                ));
            }
        }
        if self.statistics.generation > self.corpus.gen_num() {
            return Err(format!(
                "statistics generation {} is ahead of corpus generation {}",
                self.statistics.generation,
                self.corpus.gen_num()
            ));
        }
        // same generation: must be exactly what a rescan yields
        if self.statistics.generation == self.corpus.gen_num()
            && self.statistics != TermStatistics::from_corpus(&self.corpus)
        {
            return Err(format!(
                "term statistics at generation {} do not match the corpus",
                self.statistics.generation
            ));
        }
        Ok(())
    }

    /// Build an engine from the snapshot, statistics restored verbatim.
    pub fn into_tf_idf<E>(self) -> TfIdf<K, E>
    where
        E: TfIdfEngine,
    {
        TfIdf::from_parts(self.corpus, self.statistics, self.mode)
    }
}

impl<K, E> Serialize for TfIdf<K, E>
where
    K: Clone + Eq + Hash + Serialize,
    E: TfIdfEngine,
{
    /// The engine marker is not part of the snapshot.
    /// Use `TfIdfData` to deserialize.
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("TfIdf", 4)?;
        state.serialize_field("version", &SNAPSHOT_FORMAT_VERSION)?;
        state.serialize_field("corpus", &self.corpus)?;
        state.serialize_field("statistics", &self.statistics)?;
        state.serialize_field("mode", &self.mode)?;
        state.end()
    }
}

impl<K, E> TfIdf<K, E>
where
    K: Clone + Eq + Hash + Serialize,
    E: TfIdfEngine,
{
    /// Write the whole engine state to `path` as a CBOR snapshot.
    ///
    /// Missing parent directories are created. The bytes go to a uniquely
    /// named temporary file in the same directory, which is renamed over
    /// `path` once complete. On any failure the temporary file is removed and
    /// `path` is left as it was.
    pub fn export<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let bytes = serde_cbor::to_vec(self).map_err(|e| {
            Error::persistence(path, io::Error::new(io::ErrorKind::InvalidData, e.to_string()))
        })?;

        let dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        fs::create_dir_all(dir).map_err(|e| Error::persistence(dir, e))?;

        // dropped (and deleted) on every early return
        let mut tmp = tempfile::Builder::new()
            .prefix(".")
            .suffix(SNAPSHOT_TMP_SUFFIX)
            .tempfile_in(dir)
            .map_err(|e| Error::persistence(dir, e))?;
        tmp.write_all(&bytes)
            .and_then(|()| tmp.as_file().sync_all())
            .map_err(|e| Error::persistence(tmp.path(), e))?;
        tmp.persist(path).map_err(|e| Error::persistence(path, e.error))?;

        tracing::info!(
            path = %path.display(),
            bytes = bytes.len(),
            docs = self.corpus.len(),
            "snapshot exported"
        );
        Ok(())
    }
}

impl<K, E> TfIdf<K, E>
where
    K: Clone + Eq + Hash + DeserializeOwned,
    E: TfIdfEngine,
{
    /// Replace the whole engine state with the snapshot at `path`.
    ///
    /// On error the current state is left untouched.
    pub fn load<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        *self = Self::from_snapshot(path)?;
        Ok(())
    }

    /// Read a snapshot into a fresh engine.
    pub fn from_snapshot<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|e| Error::persistence(path, e))?;
        let data: TfIdfData<K> =
            serde_cbor::from_slice(&bytes).map_err(|e| Error::deserialization(path, e))?;
        data.validate().map_err(|reason| Error::deserialization(path, reason))?;

        tracing::info!(
            path = %path.display(),
            bytes = bytes.len(),
            docs = data.corpus.len(),
            "snapshot loaded"
        );
        Ok(data.into_tf_idf())
    }
}
