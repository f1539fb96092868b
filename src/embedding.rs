use std::collections::{BTreeSet, HashMap};
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tokio::time::timeout;

#[derive(Error, Debug)]
pub enum EmbedError {
    #[error("Provider error: {0}")]
    Provider(String),

    #[error("Embedding call timed out after {0} ms")]
    TimedOut(u64),

    #[error("Provider returned {got} vectors for {want} inputs")]
    LengthMismatch { want: usize, got: usize },

    #[error("Provider returned a vector of width {got}, expected {want}")]
    InconsistentWidth { want: usize, got: usize },
}

/// Capability boundary: turn a batch of short texts into fixed-width
/// vectors. Implementations must return one vector per input, in input
/// order, and be deterministic for a fixed configuration.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbedError>;
}

/// Scale a vector to unit length in place. Zero vectors are left untouched
/// so they compare as similarity 0 instead of dividing by zero.
pub fn unit_normalize(v: &mut [f32]) {
    let norm = v.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm > 0.0 {
        for x in v.iter_mut() {
            *x /= norm;
        }
    }
}

/// Cosine similarity of two unit-normalized vectors, which reduces to the
/// dot product. A degenerate zero vector yields 0 against everything.
pub fn cosine(a: &[f32], b: &[f32]) -> f32 {
    debug_assert_eq!(a.len(), b.len());
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}

/// Per-run cache in front of an [`EmbeddingProvider`].
///
/// Deduplicates texts across lookups, issues one batched call for the
/// misses, normalizes what comes back and enforces the provider contract
/// (vector count, consistent width, hard deadline).
#[derive(Debug)]
pub struct VectorCache {
    vectors: HashMap<String, Vec<f32>>,
    deadline: Duration,
    width: Option<usize>,
}

impl VectorCache {
    pub fn new(deadline: Duration) -> Self {
        Self {
            vectors: HashMap::new(),
            deadline,
            width: None,
        }
    }

    /// Fetch vectors for every text not already cached. One provider call
    /// per invocation at most, covering all misses.
    pub async fn ensure<'a, I>(
        &mut self,
        provider: &dyn EmbeddingProvider,
        texts: I,
    ) -> Result<(), EmbedError>
    where
        I: IntoIterator<Item = &'a String>,
    {
        let misses: BTreeSet<String> = texts
            .into_iter()
            .filter(|t| !self.vectors.contains_key(t.as_str()))
            .cloned()
            .collect();
        if misses.is_empty() {
            return Ok(());
        }

        let batch: Vec<String> = misses.into_iter().collect();
        let vectors = match timeout(self.deadline, provider.embed(&batch)).await {
            Ok(result) => result?,
            Err(_) => return Err(EmbedError::TimedOut(self.deadline.as_millis() as u64)),
        };
        if vectors.len() != batch.len() {
            return Err(EmbedError::LengthMismatch {
                want: batch.len(),
                got: vectors.len(),
            });
        }

        for (text, mut vector) in batch.into_iter().zip(vectors) {
            match self.width {
                Some(want) if vector.len() != want => {
                    return Err(EmbedError::InconsistentWidth {
                        want,
                        got: vector.len(),
                    });
                }
                Some(_) => {}
                None => self.width = Some(vector.len()),
            }
            unit_normalize(&mut vector);
            self.vectors.insert(text, vector);
        }
        Ok(())
    }

    /// Cached unit vector for a text, if [`ensure`](Self::ensure) has seen it.
    pub fn get(&self, text: &str) -> Option<&[f32]> {
        self.vectors.get(text).map(|v| v.as_slice())
    }

    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }
}

pub const DEFAULT_HASH_DIM: usize = 256;

/// Deterministic in-process provider: character trigrams feature-hashed
/// into a fixed-width vector. Not a semantic model; it keeps tests, demos
/// and offline runs reproducible without the external capability, and
/// strings sharing trigrams still land near each other.
#[derive(Debug, Clone)]
pub struct HashEmbedding {
    dim: usize,
}

impl Default for HashEmbedding {
    fn default() -> Self {
        Self::new()
    }
}

impl HashEmbedding {
    pub fn new() -> Self {
        Self::with_dim(DEFAULT_HASH_DIM)
    }

    pub fn with_dim(dim: usize) -> Self {
        Self { dim }
    }

    fn vector(&self, text: &str) -> Vec<f32> {
        let mut v = vec![0.0f32; self.dim];
        let padded = format!(" {} ", text.to_lowercase());
        let chars: Vec<char> = padded.chars().collect();
        for window in chars.windows(3) {
            let trigram: String = window.iter().collect();
            let h = fnv1a(trigram.as_bytes());
            let bucket = (h % self.dim as u64) as usize;
            let sign = if h & (1u64 << 63) == 0 { 1.0 } else { -1.0 };
            v[bucket] += sign;
        }
        unit_normalize(&mut v);
        v
    }
}

#[async_trait]
impl EmbeddingProvider for HashEmbedding {
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbedError> {
        Ok(texts.iter().map(|t| self.vector(t)).collect())
    }
}

const fn fnv1a(bytes: &[u8]) -> u64 {
    let mut hash = 0xcbf2_9ce4_8422_2325u64;
    let mut i = 0;
    while i < bytes.len() {
        hash ^= bytes[i] as u64;
        hash = hash.wrapping_mul(0x0000_0100_0000_01b3);
        i += 1;
    }
    hash
}
